use super::super::band::Band;
use super::super::domain::{CandidateId, RatingDimension};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CandidateRow {
    pub position: usize,
    pub id: CandidateId,
    pub name: String,
    pub likelihood: &'static str,
    pub impact: &'static str,
    pub controllability: &'static str,
    pub score: Option<u8>,
    pub score_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<Band>,
    pub band_label: &'static str,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<RatingDimension>,
    pub needs_attention: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopPick {
    pub id: CandidateId,
    pub name: String,
    pub ratings: String,
    pub score: u8,
    pub band_label: &'static str,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationSummary {
    pub title: String,
    /// Direction the next sort will use.
    pub direction_label: &'static str,
    /// Direction the rows are currently ranked in; `None` until a sort runs.
    pub sorted_label: Option<&'static str>,
    pub total: usize,
    pub complete: usize,
    pub incomplete: usize,
    pub rows: Vec<CandidateRow>,
    pub top_picks: Vec<TopPick>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendRating {
    pub symbol: &'static str,
    pub label: &'static str,
    pub weight: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendBand {
    pub score: u8,
    pub label: &'static str,
    pub tone: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoringLegend {
    pub ratings: Vec<LegendRating>,
    pub formula: String,
    pub bands: Vec<LegendBand>,
}
