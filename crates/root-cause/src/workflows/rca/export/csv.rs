use super::super::domain::{Candidate, Rating};
use super::ExportError;

pub const CSV_HEADER: [&str; 6] = [
    "Root Cause",
    "Likelihood",
    "Impact",
    "Controllability",
    "Score",
    "Notes",
];

/// One row per candidate in the given order. Unset ratings and missing scores are empty cells.
pub fn encode_csv(candidates: &[Candidate]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for candidate in candidates {
        let score = candidate
            .score()
            .map(|value| value.to_string())
            .unwrap_or_default();
        writer.write_record([
            candidate.display_name(),
            symbol_or_empty(candidate.likelihood),
            symbol_or_empty(candidate.impact),
            symbol_or_empty(candidate.controllability),
            score.as_str(),
            candidate.notes.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Flush(err.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

fn symbol_or_empty(rating: Option<Rating>) -> &'static str {
    rating.map(Rating::symbol).unwrap_or("")
}
