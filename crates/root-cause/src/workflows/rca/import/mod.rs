mod parser;

use super::domain::{Candidate, IdAllocator, Rating, RatingDimension, UNNAMED_PLACEHOLDER};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug)]
pub enum CandidateImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRating {
        record: usize,
        dimension: RatingDimension,
        value: String,
    },
}

impl std::fmt::Display for CandidateImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateImportError::Io(err) => write!(f, "failed to read candidate file: {}", err),
            CandidateImportError::Csv(err) => write!(f, "invalid candidate CSV data: {}", err),
            CandidateImportError::InvalidRating {
                record,
                dimension,
                value,
            } => write!(
                f,
                "record {}: '{}' is not a valid {} rating (expected N, S or V)",
                record,
                value,
                dimension.label()
            ),
        }
    }
}

impl std::error::Error for CandidateImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CandidateImportError::Io(err) => Some(err),
            CandidateImportError::Csv(err) => Some(err),
            CandidateImportError::InvalidRating { .. } => None,
        }
    }
}

impl From<std::io::Error> for CandidateImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CandidateImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads candidates back from the CSV export layout.
pub struct CandidateImporter;

impl CandidateImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        ids: &mut IdAllocator,
    ) -> Result<Vec<Candidate>, CandidateImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, ids)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        ids: &mut IdAllocator,
    ) -> Result<Vec<Candidate>, CandidateImportError> {
        let rows = parser::parse_rows(reader)?;
        let mut candidates = Vec::with_capacity(rows.len());

        for (index, row) in rows.into_iter().enumerate() {
            let record = index + 1;
            let likelihood = parse_rating(record, RatingDimension::Likelihood, row.likelihood)?;
            let impact = parse_rating(record, RatingDimension::Impact, row.impact)?;
            let controllability =
                parse_rating(record, RatingDimension::Controllability, row.controllability)?;

            let name = match row.name.trim() {
                UNNAMED_PLACEHOLDER => "",
                trimmed => trimmed,
            };

            candidates.push(
                Candidate::new(ids.allocate(), name)
                    .with_ratings(likelihood, impact, controllability)
                    .with_notes(row.notes),
            );
        }

        info!(candidates = candidates.len(), "candidates imported");
        Ok(candidates)
    }
}

fn parse_rating(
    record: usize,
    dimension: RatingDimension,
    raw: Option<String>,
) -> Result<Option<Rating>, CandidateImportError> {
    let Some(value) = raw.map(|value| value.trim().to_string()) else {
        return Ok(None);
    };

    match Rating::parse(&value) {
        Some(rating) => Ok(Some(rating)),
        None => {
            warn!(record, dimension = dimension.label(), %value, "rejected rating");
            Err(CandidateImportError::InvalidRating {
                record,
                dimension,
                value,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::rca::export::encode_csv;
    use std::io::Cursor;

    #[test]
    fn reads_export_layout_and_ignores_score_column() {
        let csv = "Root Cause,Likelihood,Impact,Controllability,Score,Notes\n\
\"a,b\",V,V,V,1,\n\
(unnamed),s,,n,,\"multi\nline\"\n";
        let mut ids = IdAllocator::default();
        let candidates =
            CandidateImporter::from_reader(Cursor::new(csv), &mut ids).expect("imports");

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].text, "a,b");
        assert_eq!(candidates[0].score(), Some(8), "score is re-derived");
        assert_eq!(candidates[1].text, "");
        assert_eq!(candidates[1].likelihood, Some(Rating::SomewhatLikely));
        assert_eq!(candidates[1].impact, None);
        assert_eq!(candidates[1].controllability, Some(Rating::NotLikely));
        assert_eq!(candidates[1].notes, "multi\nline");
        assert_ne!(candidates[0].id(), candidates[1].id());
    }

    #[test]
    fn notes_column_is_optional() {
        let csv = "Root Cause,Likelihood,Impact,Controllability\nTrigger missing,V,S,V\n";
        let mut ids = IdAllocator::default();
        let candidates =
            CandidateImporter::from_reader(Cursor::new(csv), &mut ids).expect("imports");
        assert_eq!(candidates[0].notes, "");
        assert_eq!(candidates[0].score(), Some(4));
    }

    #[test]
    fn unknown_rating_names_the_record() {
        let csv = "Root Cause,Likelihood,Impact,Controllability\nok,V,V,V\nbad,V,X,V\n";
        let mut ids = IdAllocator::default();
        let error = CandidateImporter::from_reader(Cursor::new(csv), &mut ids)
            .expect_err("invalid rating rejected");

        match error {
            CandidateImportError::InvalidRating {
                record,
                dimension,
                value,
            } => {
                assert_eq!(record, 2);
                assert_eq!(dimension, RatingDimension::Impact);
                assert_eq!(value, "X");
            }
            other => panic!("expected invalid rating, got {other:?}"),
        }
    }

    #[test]
    fn missing_root_cause_column_is_rejected() {
        let csv = "Cause,Likelihood,Impact,Controllability\nTrigger missing,V,S,V\n";
        let mut ids = IdAllocator::default();
        let error = CandidateImporter::from_reader(Cursor::new(csv), &mut ids)
            .expect_err("name column required");
        assert!(matches!(error, CandidateImportError::Csv(_)));
    }

    #[test]
    fn notes_keep_surrounding_whitespace_while_fields_are_trimmed() {
        let mut ids = IdAllocator::default();
        let original = vec![Candidate::new(ids.allocate(), "Trigger missing")
            .with_ratings(Some(Rating::VeryLikely), None, Some(Rating::NotLikely))
            .with_notes("  indented\nsecond line  ")];
        let csv = encode_csv(&original).expect("encodes");

        let mut ids = IdAllocator::default();
        let imported =
            CandidateImporter::from_reader(Cursor::new(csv), &mut ids).expect("imports");
        assert_eq!(imported[0].notes, "  indented\nsecond line  ");
        assert_eq!(imported[0].text, "Trigger missing");

        let padded = "Root Cause,Likelihood,Impact,Controllability\n  Friction ,  v , S ,\n";
        let imported =
            CandidateImporter::from_reader(Cursor::new(padded), &mut ids).expect("imports");
        assert_eq!(imported[0].text, "Friction");
        assert_eq!(imported[0].likelihood, Some(Rating::VeryLikely));
        assert_eq!(imported[0].controllability, None);
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let mut ids = IdAllocator::default();
        let error = CandidateImporter::from_path("./does-not-exist.csv", &mut ids)
            .expect_err("expected io error");
        assert!(matches!(error, CandidateImportError::Io(_)));
    }
}
