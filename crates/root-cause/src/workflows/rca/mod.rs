//! Root cause rating, scoring, ranking and export.
//!
//! Candidates carry three optional N/S/V ratings. The score is always derived
//! from them on demand, and ranking produces a new ordering only when the user
//! asks for one.

mod band;
mod board;
pub mod domain;
pub mod export;
pub mod import;
mod ranking;
pub mod report;
mod scoring;
mod session;
mod wizard;

#[cfg(test)]
mod tests;

pub use band::Band;
pub use board::CandidateBoard;
pub use domain::{
    Candidate, CandidateId, IdAllocator, Rating, RatingDimension, DEFAULT_SEED_RATING,
    UNNAMED_PLACEHOLDER,
};
pub use export::{export, ExportArtifact, ExportError, ExportFormat};
pub use import::{CandidateImportError, CandidateImporter};
pub use ranking::{is_ranked, rank, SortDirection};
pub use report::EvaluationReport;
pub use scoring::{score, score_label, FORMULA_ID, FORMULA_TEXT, MAX_SCORE, NO_SCORE};
pub use session::{
    Attention, CompletionWatch, EvaluationDialog, EvaluationSession, EvaluationSettings,
    SortOutcome, SortPolicy, SortRequest,
};
pub use wizard::{starter_candidates, Wizard, WizardStep, DEFAULT_TITLE};
