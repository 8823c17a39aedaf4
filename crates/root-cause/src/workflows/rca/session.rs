use super::domain::{Candidate, CandidateId, IdAllocator, Rating, RatingDimension};
use super::ranking::{is_ranked, rank, SortDirection};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// How a sort request behaves while some candidates are still unrated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortPolicy {
    /// Ask before sorting an incomplete evaluation.
    #[default]
    Confirm,
    /// Sort straight away.
    Allow,
}

impl SortPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "confirm" | "warn" => Some(Self::Confirm),
            "allow" | "silent" => Some(Self::Allow),
            _ => None,
        }
    }
}

/// Settings an evaluation session is opened with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationSettings {
    pub sort_policy: SortPolicy,
    pub direction: SortDirection,
}

/// Rising-edge detector over "every candidate is rated".
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletionWatch {
    previous: bool,
}

impl CompletionWatch {
    /// True exactly when completeness flips from false to true.
    pub fn observe(&mut self, all_complete: bool) -> bool {
        let fired = !self.previous && all_complete;
        self.previous = all_complete;
        fired
    }
}

/// The single dialog the evaluation screen may be showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EvaluationDialog {
    #[default]
    Closed,
    /// "Evaluation completed. Would you like to sort your results?"
    CompletionPrompt,
    /// "Not all root causes have been evaluated. Sort anyway?"
    EarlySortConfirm,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attention {
    pub id: CandidateId,
    pub missing: Vec<RatingDimension>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOutcome {
    pub direction: SortDirection,
    pub order: Vec<CandidateId>,
    pub attention: Vec<Attention>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortRequest {
    NeedsConfirmation { incomplete: usize },
    Sorted(SortOutcome),
}

/// State owned by the evaluation screen: the candidates plus its dialogs and flags.
#[derive(Debug, Clone)]
pub struct EvaluationSession {
    candidates: Vec<Candidate>,
    ids: IdAllocator,
    direction: SortDirection,
    policy: SortPolicy,
    completion: CompletionWatch,
    dialog: EvaluationDialog,
    last_sort: Option<SortDirection>,
    sorted_while_incomplete: bool,
}

impl EvaluationSession {
    pub fn new(settings: EvaluationSettings) -> Self {
        Self::with_candidates(settings, Vec::new(), IdAllocator::default())
    }

    /// `ids` must be the allocator the candidates were created with.
    pub fn with_candidates(
        settings: EvaluationSettings,
        candidates: Vec<Candidate>,
        ids: IdAllocator,
    ) -> Self {
        let mut session = Self {
            candidates,
            ids,
            direction: settings.direction,
            policy: settings.sort_policy,
            completion: CompletionWatch::default(),
            dialog: EvaluationDialog::Closed,
            last_sort: None,
            sorted_while_incomplete: false,
        };
        session.refresh_completion();
        session
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn get(&self, id: CandidateId) -> Option<&Candidate> {
        self.candidates.iter().find(|candidate| candidate.id() == id)
    }

    /// 1-based position lookup used by line-oriented front ends.
    pub fn id_at(&self, position: usize) -> Option<CandidateId> {
        position
            .checked_sub(1)
            .and_then(|index| self.candidates.get(index))
            .map(Candidate::id)
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn policy(&self) -> SortPolicy {
        self.policy
    }

    pub fn dialog(&self) -> EvaluationDialog {
        self.dialog
    }

    pub fn all_complete(&self) -> bool {
        !self.candidates.is_empty() && self.candidates.iter().all(Candidate::is_complete)
    }

    pub fn incomplete_count(&self) -> usize {
        self.candidates
            .iter()
            .filter(|candidate| !candidate.is_complete())
            .count()
    }

    /// Direction of the last sort, while the list still holds that order.
    pub fn last_sort(&self) -> Option<SortDirection> {
        self.last_sort
    }

    pub fn sorted_while_incomplete(&self) -> bool {
        self.sorted_while_incomplete
    }

    /// Whether the candidate should be highlighted after an incomplete sort.
    pub fn needs_attention(&self, id: CandidateId) -> bool {
        self.sorted_while_incomplete
            && self
                .get(id)
                .map(|candidate| !candidate.is_complete())
                .unwrap_or(false)
    }

    pub fn highlights(&self, id: CandidateId, dimension: RatingDimension) -> bool {
        self.sorted_while_incomplete
            && self
                .get(id)
                .map(|candidate| candidate.rating(dimension).is_none())
                .unwrap_or(false)
    }

    pub fn attention(&self) -> Vec<Attention> {
        self.candidates
            .iter()
            .filter(|candidate| !candidate.is_complete())
            .map(|candidate| Attention {
                id: candidate.id(),
                missing: candidate.missing_dimensions(),
            })
            .collect()
    }

    /// Empty drafts are ignored.
    pub fn add_candidate(&mut self, draft: &str) -> Option<CandidateId> {
        let text = draft.trim();
        if text.is_empty() {
            return None;
        }

        let id = self.ids.allocate();
        let mut next = self.candidates.clone();
        next.push(Candidate::new(id, text));
        self.replace(next);

        debug!(candidate = %id, "root cause added during evaluation");
        Some(id)
    }

    pub fn rate(&mut self, id: CandidateId, dimension: RatingDimension, rating: Rating) -> bool {
        let updated = self.update(id, |candidate| candidate.with_rating(dimension, Some(rating)));
        if updated {
            debug!(
                candidate = %id,
                dimension = dimension.label(),
                rating = rating.symbol(),
                "rating assigned"
            );
        }
        updated
    }

    pub fn clear_rating(&mut self, id: CandidateId, dimension: RatingDimension) -> bool {
        self.update(id, |candidate| candidate.with_rating(dimension, None))
    }

    /// Empty names are rejected.
    pub fn rename(&mut self, id: CandidateId, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.update(id, |mut candidate| {
            candidate.text = text.to_string();
            candidate
        })
    }

    pub fn set_notes(&mut self, id: CandidateId, notes: &str) -> bool {
        self.update(id, |candidate| candidate.with_notes(notes))
    }

    pub fn remove(&mut self, id: CandidateId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        let next = self
            .candidates
            .iter()
            .filter(|candidate| candidate.id() != id)
            .cloned()
            .collect();
        self.replace(next);
        debug!(candidate = %id, "root cause removed");
        true
    }

    pub fn toggle_direction(&mut self) -> SortDirection {
        self.direction = self.direction.toggle();
        self.direction
    }

    /// The user pressed "Sort".
    pub fn request_sort(&mut self) -> SortRequest {
        let incomplete = self.incomplete_count();
        if incomplete > 0 && self.policy == SortPolicy::Confirm {
            self.dialog = EvaluationDialog::EarlySortConfirm;
            info!(incomplete, "sort requested with unrated candidates, awaiting confirmation");
            return SortRequest::NeedsConfirmation { incomplete };
        }

        SortRequest::Sorted(self.sort_now())
    }

    /// Accepts whichever prompt is open. `None` when no prompt is showing.
    pub fn confirm_sort(&mut self) -> Option<SortOutcome> {
        match self.dialog {
            EvaluationDialog::Closed => None,
            EvaluationDialog::CompletionPrompt | EvaluationDialog::EarlySortConfirm => {
                Some(self.sort_now())
            }
        }
    }

    /// "Go back": closes any prompt without sorting.
    pub fn dismiss_prompts(&mut self) {
        self.dialog = EvaluationDialog::Closed;
    }

    fn sort_now(&mut self) -> SortOutcome {
        let ranked = rank(&self.candidates, self.direction);
        self.candidates = ranked;
        self.last_sort = Some(self.direction);

        let attention = self.attention();
        self.sorted_while_incomplete = !attention.is_empty();
        self.dialog = EvaluationDialog::Closed;

        info!(
            candidates = self.candidates.len(),
            incomplete = attention.len(),
            direction = self.direction.label(),
            "root causes sorted"
        );

        SortOutcome {
            direction: self.direction,
            order: self.candidates.iter().map(Candidate::id).collect(),
            attention,
        }
    }

    fn update<F>(&mut self, id: CandidateId, apply: F) -> bool
    where
        F: Fn(Candidate) -> Candidate,
    {
        if self.get(id).is_none() {
            return false;
        }
        let next = self
            .candidates
            .iter()
            .cloned()
            .map(|candidate| {
                if candidate.id() == id {
                    apply(candidate)
                } else {
                    candidate
                }
            })
            .collect();
        self.replace(next);
        true
    }

    fn replace(&mut self, next: Vec<Candidate>) {
        self.candidates = next;
        if let Some(direction) = self.last_sort {
            if !is_ranked(&self.candidates, direction) {
                self.last_sort = None;
            }
        }
        self.refresh_completion();
    }

    fn refresh_completion(&mut self) {
        if self.completion.observe(self.all_complete()) {
            self.dialog = EvaluationDialog::CompletionPrompt;
            info!(candidates = self.candidates.len(), "evaluation completed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_fires_once_per_rising_edge() {
        let mut watch = CompletionWatch::default();
        assert!(!watch.observe(false));
        assert!(watch.observe(true));
        assert!(!watch.observe(true));
        assert!(!watch.observe(false));
        assert!(watch.observe(true));
    }

    #[test]
    fn policy_parses_aliases() {
        assert_eq!(SortPolicy::parse("warn"), Some(SortPolicy::Confirm));
        assert_eq!(SortPolicy::parse("Allow"), Some(SortPolicy::Allow));
        assert_eq!(SortPolicy::parse("never"), None);
    }

    #[test]
    fn confirm_without_prompt_does_nothing() {
        let mut session = EvaluationSession::new(EvaluationSettings::default());
        session.add_candidate("Friction too high");
        assert_eq!(session.confirm_sort(), None);
    }

    #[test]
    fn last_sort_lapses_once_edits_break_the_order() {
        let settings = EvaluationSettings {
            sort_policy: SortPolicy::Allow,
            direction: SortDirection::Descending,
        };
        let mut session = EvaluationSession::new(settings);
        let first = session.add_candidate("Trigger missing").expect("added");
        let second = session.add_candidate("Friction too high").expect("added");
        for dimension in RatingDimension::ordered() {
            session.rate(first, dimension, Rating::SomewhatLikely);
            session.rate(second, dimension, Rating::SomewhatLikely);
        }
        assert_eq!(session.last_sort(), None);

        session.request_sort();
        assert_eq!(session.last_sort(), Some(SortDirection::Descending));

        session.set_notes(first, "cue after dinner");
        assert_eq!(session.last_sort(), Some(SortDirection::Descending));

        session.rate(second, RatingDimension::Impact, Rating::VeryLikely);
        assert_eq!(session.last_sort(), None);
    }
}
