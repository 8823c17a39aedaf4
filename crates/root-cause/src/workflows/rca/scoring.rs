use super::domain::{Candidate, Rating, RatingDimension};

/// Formula identifier carried by the JSON export.
pub const FORMULA_ID: &str = "L*I*C";
pub const FORMULA_TEXT: &str = "Score = Likelihood × Impact × Controllability";
pub const MAX_SCORE: u8 = 8;

/// Rendered wherever a candidate has no score yet.
pub const NO_SCORE: &str = "–";

/// Product of the three weights, or `None` when any rating is unset.
///
/// A fully rated candidate can legitimately score `Some(0)`.
pub fn score(
    likelihood: Option<Rating>,
    impact: Option<Rating>,
    controllability: Option<Rating>,
) -> Option<u8> {
    Some(likelihood?.weight() * impact?.weight() * controllability?.weight())
}

pub fn score_label(score: Option<u8>) -> String {
    match score {
        Some(value) => value.to_string(),
        None => NO_SCORE.to_string(),
    }
}

impl Candidate {
    pub fn score(&self) -> Option<u8> {
        score(self.likelihood, self.impact, self.controllability)
    }

    pub fn is_complete(&self) -> bool {
        RatingDimension::ordered()
            .into_iter()
            .all(|dimension| self.rating(dimension).is_some())
    }

    pub fn missing_dimensions(&self) -> Vec<RatingDimension> {
        RatingDimension::ordered()
            .into_iter()
            .filter(|dimension| self.rating(*dimension).is_none())
            .collect()
    }
}
