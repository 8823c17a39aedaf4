use super::domain::SystemFraming;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FramingSummaryEntry {
    pub label: &'static str,
    pub values: Vec<String>,
}

/// Collapsible recap of the framing shown above the evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FramingSummary {
    open: bool,
}

impl FramingSummary {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.open {
            "Hide framing"
        } else {
            "Show framing"
        }
    }

    pub fn entries(framing: &SystemFraming) -> Vec<FramingSummaryEntry> {
        vec![
            FramingSummaryEntry {
                label: "System",
                values: vec![framing.system_name.clone()],
            },
            FramingSummaryEntry {
                label: "Optimal output",
                values: vec![framing.optimal_outcome.clone()],
            },
            FramingSummaryEntry {
                label: "Current failures",
                values: framing.insufficient_outcomes.clone(),
            },
        ]
    }
}
