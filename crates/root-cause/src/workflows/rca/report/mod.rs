mod summary;
pub mod views;

pub use summary::{top_picks, EvaluationReport, TOP_PICK_LIMIT};
