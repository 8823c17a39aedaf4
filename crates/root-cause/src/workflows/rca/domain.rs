use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-valued ordinal scale shared by every rating dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rating {
    #[serde(rename = "N")]
    NotLikely,
    #[serde(rename = "S")]
    SomewhatLikely,
    #[serde(rename = "V")]
    VeryLikely,
}

impl Rating {
    pub const fn ordered() -> [Self; 3] {
        [Self::NotLikely, Self::SomewhatLikely, Self::VeryLikely]
    }

    pub const fn weight(self) -> u8 {
        match self {
            Self::NotLikely => 0,
            Self::SomewhatLikely => 1,
            Self::VeryLikely => 2,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::NotLikely => "N",
            Self::SomewhatLikely => "S",
            Self::VeryLikely => "V",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NotLikely => "Not Likely",
            Self::SomewhatLikely => "Somewhat Likely",
            Self::VeryLikely => "Very Likely",
        }
    }

    /// Accepts the symbol (`N`, `S`, `V`) or the full label, ignoring case.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ordered().into_iter().find(|rating| {
            normalized == rating.symbol().to_ascii_lowercase()
                || normalized == rating.label().to_ascii_lowercase()
        })
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingDimension {
    Likelihood,
    Impact,
    Controllability,
}

impl RatingDimension {
    pub const fn ordered() -> [Self; 3] {
        [Self::Likelihood, Self::Impact, Self::Controllability]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Likelihood => "Likelihood",
            Self::Impact => "Impact",
            Self::Controllability => "Controllability",
        }
    }

    pub const fn initial(self) -> &'static str {
        match self {
            Self::Likelihood => "L",
            Self::Impact => "I",
            Self::Controllability => "C",
        }
    }

    /// Accepts the initial or the full label, ignoring case.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ordered().into_iter().find(|dimension| {
            normalized == dimension.initial().to_ascii_lowercase()
                || normalized == dimension.label().to_ascii_lowercase()
        })
    }
}

/// Session-scoped identifier; assigned once and never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(u64);

impl CandidateId {
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rc-{}", self.0)
    }
}

/// Hands out identifiers in allocation order.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn allocate(&mut self) -> CandidateId {
        let id = CandidateId(self.next);
        self.next += 1;
        id
    }
}

/// Rating assigned to every dimension of a seeded candidate.
pub const DEFAULT_SEED_RATING: Rating = Rating::SomewhatLikely;

/// Rendered in place of an empty candidate name.
pub const UNNAMED_PLACEHOLDER: &str = "(unnamed)";

/// A hypothesised root cause being rated and ranked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    id: CandidateId,
    pub text: String,
    pub likelihood: Option<Rating>,
    pub impact: Option<Rating>,
    pub controllability: Option<Rating>,
    pub notes: String,
}

impl Candidate {
    pub fn new(id: CandidateId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            likelihood: None,
            impact: None,
            controllability: None,
            notes: String::new(),
        }
    }

    pub fn seeded(id: CandidateId, text: impl Into<String>) -> Self {
        Self::new(id, text)
            .with_rating(RatingDimension::Likelihood, Some(DEFAULT_SEED_RATING))
            .with_rating(RatingDimension::Impact, Some(DEFAULT_SEED_RATING))
            .with_rating(RatingDimension::Controllability, Some(DEFAULT_SEED_RATING))
    }

    pub fn id(&self) -> CandidateId {
        self.id
    }

    pub fn rating(&self, dimension: RatingDimension) -> Option<Rating> {
        match dimension {
            RatingDimension::Likelihood => self.likelihood,
            RatingDimension::Impact => self.impact,
            RatingDimension::Controllability => self.controllability,
        }
    }

    pub fn with_rating(mut self, dimension: RatingDimension, rating: Option<Rating>) -> Self {
        match dimension {
            RatingDimension::Likelihood => self.likelihood = rating,
            RatingDimension::Impact => self.impact = rating,
            RatingDimension::Controllability => self.controllability = rating,
        }
        self
    }

    pub fn with_ratings(
        self,
        likelihood: Option<Rating>,
        impact: Option<Rating>,
        controllability: Option<Rating>,
    ) -> Self {
        self.with_rating(RatingDimension::Likelihood, likelihood)
            .with_rating(RatingDimension::Impact, impact)
            .with_rating(RatingDimension::Controllability, controllability)
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn display_name(&self) -> &str {
        if self.text.is_empty() {
            UNNAMED_PLACEHOLDER
        } else {
            &self.text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_symbols_and_labels() {
        assert_eq!(Rating::parse("v"), Some(Rating::VeryLikely));
        assert_eq!(Rating::parse(" S "), Some(Rating::SomewhatLikely));
        assert_eq!(Rating::parse("not likely"), Some(Rating::NotLikely));
        assert_eq!(Rating::parse("maybe"), None);
        assert_eq!(Rating::parse(""), None);
    }

    #[test]
    fn dimension_parses_initials() {
        assert_eq!(RatingDimension::parse("c"), Some(RatingDimension::Controllability));
        assert_eq!(RatingDimension::parse("Impact"), Some(RatingDimension::Impact));
        assert_eq!(RatingDimension::parse("x"), None);
    }

    #[test]
    fn allocator_never_repeats_ids() {
        let mut ids = IdAllocator::default();
        let first = ids.allocate();
        let second = ids.allocate();
        assert_ne!(first, second);
        assert_eq!(first.to_string(), "rc-1");
    }

    #[test]
    fn seeded_candidates_start_somewhat_likely_everywhere() {
        let mut ids = IdAllocator::default();
        let candidate = Candidate::seeded(ids.allocate(), "Trigger missing");
        for dimension in RatingDimension::ordered() {
            assert_eq!(candidate.rating(dimension), Some(Rating::SomewhatLikely));
        }
    }

    #[test]
    fn empty_names_use_the_placeholder() {
        let mut ids = IdAllocator::default();
        assert_eq!(Candidate::new(ids.allocate(), "").display_name(), "(unnamed)");
    }
}
