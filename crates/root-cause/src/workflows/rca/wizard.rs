use super::board::CandidateBoard;
use super::domain::{Candidate, IdAllocator, Rating};
use super::session::{EvaluationSession, EvaluationSettings};
use crate::workflows::framing::{FramingDraft, FramingSummary, SystemFraming};
use tracing::{debug, info};

pub const DEFAULT_TITLE: &str = "Root Cause Evaluation";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Framing,
    Brainstorm,
    Evaluation,
}

impl WizardStep {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Framing => "System Framing",
            Self::Brainstorm => "Root Cause Candidates",
            Self::Evaluation => "Root Cause Evaluation",
        }
    }
}

/// Frame the system, brainstorm candidates, then rate and rank them.
#[derive(Debug)]
pub struct Wizard {
    step: WizardStep,
    settings: EvaluationSettings,
    framing: Option<SystemFraming>,
    draft: FramingDraft,
    summary: FramingSummary,
    board: CandidateBoard,
    evaluation: Option<EvaluationSession>,
    title: Option<String>,
}

impl Wizard {
    pub fn new(settings: EvaluationSettings) -> Self {
        Self {
            step: WizardStep::Framing,
            settings,
            framing: None,
            draft: FramingDraft::default(),
            summary: FramingSummary::default(),
            board: CandidateBoard::default(),
            evaluation: None,
            title: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn framing(&self) -> Option<&SystemFraming> {
        self.framing.as_ref()
    }

    pub fn draft_mut(&mut self) -> &mut FramingDraft {
        &mut self.draft
    }

    pub fn summary(&self) -> FramingSummary {
        self.summary
    }

    pub fn summary_mut(&mut self) -> &mut FramingSummary {
        &mut self.summary
    }

    pub fn board(&self) -> &CandidateBoard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut CandidateBoard {
        &mut self.board
    }

    pub fn evaluation(&self) -> Option<&EvaluationSession> {
        self.evaluation.as_ref()
    }

    pub fn evaluation_mut(&mut self) -> Option<&mut EvaluationSession> {
        self.evaluation.as_mut()
    }

    /// Evaluation title used by the table and the exports: the edited title,
    /// else the framed system name, else [`DEFAULT_TITLE`].
    pub fn title(&self) -> &str {
        self.title
            .as_deref()
            .or_else(|| {
                self.framing
                    .as_ref()
                    .map(|framing| framing.system_name.as_str())
            })
            .unwrap_or(DEFAULT_TITLE)
    }

    /// Blank titles are ignored.
    pub fn set_title(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        debug!(title = text, "evaluation title edited");
        self.title = Some(text.to_string());
        true
    }

    /// Leaves the framing step once every field is filled in. Returns to
    /// whichever later step was reached before.
    pub fn submit_framing(&mut self) -> bool {
        let Some(framing) = self.draft.submit() else {
            return false;
        };

        info!(system = %framing.system_name, "system framed");
        self.framing = Some(framing);
        self.step = if self.evaluation.is_some() {
            WizardStep::Evaluation
        } else {
            WizardStep::Brainstorm
        };
        true
    }

    pub fn edit_framing(&mut self) {
        if let Some(framing) = &self.framing {
            self.draft = FramingDraft::from_framing(framing);
        }
        self.step = WizardStep::Framing;
    }

    /// Hands the brainstormed candidates to a fresh evaluation session.
    pub fn continue_to_evaluation(&mut self) -> bool {
        if self.step != WizardStep::Brainstorm || !self.board.can_continue() {
            return false;
        }

        let (candidates, ids) = std::mem::take(&mut self.board).into_parts();
        info!(candidates = candidates.len(), "brainstorm closed, evaluation opened");
        self.evaluation = Some(EvaluationSession::with_candidates(
            self.settings,
            candidates,
            ids,
        ));
        self.step = WizardStep::Evaluation;
        true
    }
}

/// The example causes a fresh scoring sheet opens with.
pub fn starter_candidates(ids: &mut IdAllocator) -> Vec<Candidate> {
    use Rating::{SomewhatLikely as S, VeryLikely as V};

    [
        ("Friction too high (too many steps/tools)", S, V, V),
        ("Trigger missing (no reliable cue)", V, V, V),
        ("Timing misaligned (wrong time/day/week)", S, S, V),
    ]
    .into_iter()
    .map(|(name, likelihood, impact, controllability)| {
        Candidate::seeded(ids.allocate(), name).with_ratings(
            Some(likelihood),
            Some(impact),
            Some(controllability),
        )
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_candidates_are_complete() {
        let mut ids = IdAllocator::default();
        let scores: Vec<_> = starter_candidates(&mut ids)
            .iter()
            .map(Candidate::score)
            .collect();
        assert_eq!(scores, vec![Some(4), Some(8), Some(2)]);
    }

    #[test]
    fn evaluation_requires_a_candidate() {
        let mut wizard = Wizard::new(EvaluationSettings::default());
        assert!(!wizard.continue_to_evaluation(), "framing comes first");

        let draft = wizard.draft_mut();
        draft.system_name = "Household cleaning".to_string();
        draft.optimal_outcome = "Clean kitchen every evening".to_string();
        draft.insufficient_raw = "Dishes pile up".to_string();
        assert!(wizard.submit_framing());
        assert_eq!(wizard.step(), WizardStep::Brainstorm);

        assert!(!wizard.continue_to_evaluation());
        wizard.board_mut().add("No cue after dinner");
        assert!(wizard.continue_to_evaluation());
        assert_eq!(wizard.step(), WizardStep::Evaluation);
        assert!(wizard.board().candidates().is_empty());
    }

    #[test]
    fn edited_title_outranks_the_system_name() {
        let mut wizard = Wizard::new(EvaluationSettings::default());
        assert_eq!(wizard.title(), DEFAULT_TITLE);

        let draft = wizard.draft_mut();
        draft.system_name = "Household cleaning".to_string();
        draft.optimal_outcome = "Clean kitchen every evening".to_string();
        draft.insufficient_raw = "Dishes pile up".to_string();
        assert!(wizard.submit_framing());
        assert_eq!(wizard.title(), "Household cleaning");

        assert!(wizard.set_title("  Kitchen Review "));
        assert_eq!(wizard.title(), "Kitchen Review");

        assert!(!wizard.set_title("   "));
        assert_eq!(wizard.title(), "Kitchen Review");
    }
}
