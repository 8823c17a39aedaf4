use crate::workflows::rca::domain::{Candidate, IdAllocator, Rating};
use crate::workflows::rca::{EvaluationSession, EvaluationSettings, SortPolicy};

pub(super) use Rating::{NotLikely as N, SomewhatLikely as S, VeryLikely as V};

pub(super) fn candidate(
    ids: &mut IdAllocator,
    name: &str,
    likelihood: Option<Rating>,
    impact: Option<Rating>,
    controllability: Option<Rating>,
) -> Candidate {
    Candidate::new(ids.allocate(), name).with_ratings(likelihood, impact, controllability)
}

/// The four worked examples: A(V,V,V)=8, B(S,V,V)=4, C(N,S,V)=0, D(unset,S,V).
pub(super) fn worked_examples(ids: &mut IdAllocator) -> Vec<Candidate> {
    vec![
        candidate(ids, "A", Some(V), Some(V), Some(V)),
        candidate(ids, "B", Some(S), Some(V), Some(V)),
        candidate(ids, "C", Some(N), Some(S), Some(V)),
        candidate(ids, "D", None, Some(S), Some(V)),
    ]
}

/// Same candidates in a scrambled order.
pub(super) fn scrambled_examples() -> Vec<Candidate> {
    let mut ids = IdAllocator::default();
    let mut candidates = worked_examples(&mut ids);
    candidates.swap(0, 3);
    candidates.swap(1, 2);
    candidates
}

pub(super) fn names(candidates: &[Candidate]) -> Vec<&str> {
    candidates.iter().map(|candidate| candidate.text.as_str()).collect()
}

pub(super) fn settings(sort_policy: SortPolicy) -> EvaluationSettings {
    EvaluationSettings {
        sort_policy,
        ..EvaluationSettings::default()
    }
}

/// Three unrated candidates, so no completion prompt is open at construction.
pub(super) fn unrated_session(sort_policy: SortPolicy) -> EvaluationSession {
    let mut ids = IdAllocator::default();
    let candidates = vec![
        candidate(&mut ids, "Friction too high", None, None, None),
        candidate(&mut ids, "Trigger missing", None, None, None),
        candidate(&mut ids, "Timing misaligned", None, None, None),
    ];
    EvaluationSession::with_candidates(settings(sort_policy), candidates, ids)
}
