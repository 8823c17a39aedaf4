pub mod domain;
mod summary;

pub use domain::{FramingDraft, SystemFraming};
pub use summary::{FramingSummary, FramingSummaryEntry};
