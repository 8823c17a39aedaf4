use serde::{Deserialize, Serialize};

/// The system under refinement, as framed before brainstorming starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemFraming {
    pub system_name: String,
    pub optimal_outcome: String,
    pub insufficient_outcomes: Vec<String>,
}

/// Raw form text for the framing step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FramingDraft {
    pub system_name: String,
    pub optimal_outcome: String,
    /// One insufficient outcome per line.
    pub insufficient_raw: String,
}

impl FramingDraft {
    pub fn from_framing(framing: &SystemFraming) -> Self {
        Self {
            system_name: framing.system_name.clone(),
            optimal_outcome: framing.optimal_outcome.clone(),
            insufficient_raw: framing.insufficient_outcomes.join("\n"),
        }
    }

    pub fn insufficient_outcomes(&self) -> Vec<String> {
        self.insufficient_raw
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn can_continue(&self) -> bool {
        !self.system_name.trim().is_empty()
            && !self.optimal_outcome.trim().is_empty()
            && !self.insufficient_outcomes().is_empty()
    }

    /// `None` while any required field is blank.
    pub fn submit(&self) -> Option<SystemFraming> {
        if !self.can_continue() {
            return None;
        }

        Some(SystemFraming {
            system_name: self.system_name.trim().to_string(),
            optimal_outcome: self.optimal_outcome.trim().to_string(),
            insufficient_outcomes: self.insufficient_outcomes(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evening_draft() -> FramingDraft {
        FramingDraft {
            system_name: " Evening transition from work to rest ".to_string(),
            optimal_outcome: "Asleep by 10:30 PM 5+ nights/week".to_string(),
            insufficient_raw: "\n  Scrolling until midnight \n\nSkipping wind-down\r\n".to_string(),
        }
    }

    #[test]
    fn outcomes_are_trimmed_and_blank_lines_dropped() {
        assert_eq!(
            evening_draft().insufficient_outcomes(),
            vec!["Scrolling until midnight", "Skipping wind-down"]
        );
    }

    #[test]
    fn submit_requires_every_field() {
        let mut draft = evening_draft();
        let framing = draft.submit().expect("complete draft submits");
        assert_eq!(framing.system_name, "Evening transition from work to rest");

        draft.insufficient_raw = "   \n".to_string();
        assert!(!draft.can_continue());
        assert_eq!(draft.submit(), None);
    }

    #[test]
    fn reopening_a_framing_restores_the_draft() {
        let framing = evening_draft().submit().expect("submits");
        let reopened = FramingDraft::from_framing(&framing);
        assert_eq!(reopened.submit(), Some(framing));
    }
}
