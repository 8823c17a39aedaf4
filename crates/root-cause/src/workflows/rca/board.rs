use super::domain::{Candidate, CandidateId, IdAllocator};
use tracing::debug;

#[derive(Debug, Clone)]
struct EditBuffer {
    id: CandidateId,
    draft: String,
}

/// Brainstorming step: collect candidate root causes without rating them.
#[derive(Debug, Clone, Default)]
pub struct CandidateBoard {
    candidates: Vec<Candidate>,
    ids: IdAllocator,
    editing: Option<EditBuffer>,
}

impl CandidateBoard {
    pub fn from_parts(candidates: Vec<Candidate>, ids: IdAllocator) -> Self {
        Self {
            candidates,
            ids,
            editing: None,
        }
    }

    pub fn into_parts(self) -> (Vec<Candidate>, IdAllocator) {
        (self.candidates, self.ids)
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Candidates paired with their 1-based position.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &Candidate)> {
        self.candidates
            .iter()
            .enumerate()
            .map(|(index, candidate)| (index + 1, candidate))
    }

    pub fn id_at(&self, position: usize) -> Option<CandidateId> {
        position
            .checked_sub(1)
            .and_then(|index| self.candidates.get(index))
            .map(Candidate::id)
    }

    pub fn can_continue(&self) -> bool {
        !self.candidates.is_empty()
    }

    pub fn add(&mut self, draft: &str) -> Option<CandidateId> {
        let text = draft.trim();
        if text.is_empty() {
            return None;
        }

        let id = self.ids.allocate();
        let mut next = self.candidates.clone();
        next.push(Candidate::new(id, text));
        self.candidates = next;
        debug!(candidate = %id, "root cause brainstormed");
        Some(id)
    }

    pub fn begin_edit(&mut self, id: CandidateId) -> bool {
        let Some(candidate) = self.candidates.iter().find(|candidate| candidate.id() == id) else {
            return false;
        };
        self.editing = Some(EditBuffer {
            id,
            draft: candidate.text.clone(),
        });
        true
    }

    pub fn editing(&self) -> Option<CandidateId> {
        self.editing.as_ref().map(|buffer| buffer.id)
    }

    pub fn edit_draft(&self) -> Option<&str> {
        self.editing.as_ref().map(|buffer| buffer.draft.as_str())
    }

    pub fn set_edit_draft(&mut self, text: &str) {
        if let Some(buffer) = self.editing.as_mut() {
            buffer.draft = text.to_string();
        }
    }

    /// An empty draft keeps the edit open and changes nothing.
    pub fn commit_edit(&mut self) -> bool {
        let Some(buffer) = self.editing.as_ref() else {
            return false;
        };
        let text = buffer.draft.trim().to_string();
        if text.is_empty() {
            return false;
        }

        let id = buffer.id;
        self.candidates = self
            .candidates
            .iter()
            .cloned()
            .map(|mut candidate| {
                if candidate.id() == id {
                    candidate.text = text.clone();
                }
                candidate
            })
            .collect();
        self.editing = None;
        debug!(candidate = %id, "root cause renamed");
        true
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn remove(&mut self, id: CandidateId) -> bool {
        let before = self.candidates.len();
        self.candidates = self
            .candidates
            .iter()
            .filter(|candidate| candidate.id() != id)
            .cloned()
            .collect();
        if self.editing() == Some(id) {
            self.editing = None;
        }
        self.candidates.len() != before
    }
}
