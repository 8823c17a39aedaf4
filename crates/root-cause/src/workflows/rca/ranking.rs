use super::domain::Candidate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Descending,
    Ascending,
}

impl SortDirection {
    pub const fn toggle(self) -> Self {
        match self {
            Self::Descending => Self::Ascending,
            Self::Ascending => Self::Descending,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Descending => "High→Low",
            Self::Ascending => "Low→High",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "desc" | "descending" | "high-low" => Some(Self::Descending),
            "asc" | "ascending" | "low-high" => Some(Self::Ascending),
            _ => None,
        }
    }
}

/// Returns a new ordering: scored candidates by score in `direction`, then
/// unscored candidates. Both groups keep their relative input order.
pub fn rank(candidates: &[Candidate], direction: SortDirection) -> Vec<Candidate> {
    let mut ranked = candidates.to_vec();
    ranked.sort_by(|a, b| compare_scores(a.score(), b.score(), direction));
    ranked
}

pub fn is_ranked(candidates: &[Candidate], direction: SortDirection) -> bool {
    candidates.windows(2).all(|pair| {
        compare_scores(pair[0].score(), pair[1].score(), direction) != Ordering::Greater
    })
}

fn compare_scores(a: Option<u8>, b: Option<u8>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match direction {
            SortDirection::Descending => b.cmp(&a),
            SortDirection::Ascending => a.cmp(&b),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::rca::domain::{IdAllocator, Rating};

    #[test]
    fn direction_toggles_and_parses() {
        assert_eq!(SortDirection::default().toggle(), SortDirection::Ascending);
        assert_eq!(SortDirection::parse("ASC"), Some(SortDirection::Ascending));
        assert_eq!(SortDirection::parse("sideways"), None);
        assert_eq!(SortDirection::Descending.label(), "High→Low");
    }

    #[test]
    fn ascending_still_sinks_unscored() {
        let mut ids = IdAllocator::default();
        let partial = Candidate::new(ids.allocate(), "partial");
        let low = Candidate::new(ids.allocate(), "low").with_ratings(
            Some(Rating::NotLikely),
            Some(Rating::VeryLikely),
            Some(Rating::VeryLikely),
        );
        let high = Candidate::new(ids.allocate(), "high").with_ratings(
            Some(Rating::VeryLikely),
            Some(Rating::VeryLikely),
            Some(Rating::VeryLikely),
        );

        let input = vec![partial.clone(), high.clone(), low.clone()];
        let ranked = rank(&input, SortDirection::Ascending);

        assert_eq!(ranked, vec![low, high, partial]);
        assert_eq!(input[0].text, "partial", "input is left untouched");
        assert!(is_ranked(&ranked, SortDirection::Ascending));
        assert!(!is_ranked(&input, SortDirection::Ascending));
    }

    #[test]
    fn empty_input_ranks_to_empty() {
        assert!(rank(&[], SortDirection::Descending).is_empty());
    }
}
