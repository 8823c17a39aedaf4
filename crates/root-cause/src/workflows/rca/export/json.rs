use super::super::domain::{Candidate, Rating};
use super::super::scoring::FORMULA_ID;
use super::ExportError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringDescriptor {
    #[serde(rename = "N")]
    pub not_likely: u8,
    #[serde(rename = "S")]
    pub somewhat_likely: u8,
    #[serde(rename = "V")]
    pub very_likely: u8,
    pub formula: String,
}

impl ScoringDescriptor {
    pub fn canonical() -> Self {
        Self {
            not_likely: Rating::NotLikely.weight(),
            somewhat_likely: Rating::SomewhatLikely.weight(),
            very_likely: Rating::VeryLikely.weight(),
            formula: FORMULA_ID.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedCause {
    pub name: String,
    pub likelihood: Option<Rating>,
    pub impact: Option<Rating>,
    pub controllability: Option<Rating>,
    pub score: Option<u8>,
    pub notes: String,
}

impl From<&Candidate> for ExportedCause {
    fn from(candidate: &Candidate) -> Self {
        Self {
            name: candidate.text.clone(),
            likelihood: candidate.likelihood,
            impact: candidate.impact,
            controllability: candidate.controllability,
            score: candidate.score(),
            notes: candidate.notes.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub title: String,
    pub scoring: ScoringDescriptor,
    pub causes: Vec<ExportedCause>,
}

impl ExportDocument {
    pub fn new(title: &str, candidates: &[Candidate]) -> Self {
        Self {
            title: title.to_string(),
            scoring: ScoringDescriptor::canonical(),
            causes: candidates.iter().map(ExportedCause::from).collect(),
        }
    }
}

pub fn encode_json(title: &str, candidates: &[Candidate]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&ExportDocument::new(
        title, candidates,
    ))?)
}
