use super::common::*;
use crate::workflows::rca::domain::IdAllocator;
use crate::workflows::rca::report::{top_picks, TOP_PICK_LIMIT};
use crate::workflows::rca::{
    rank, EvaluationReport, EvaluationSession, SortDirection, SortPolicy,
};

#[test]
fn top_picks_ignore_display_order_and_incomplete() {
    let mut ids = IdAllocator::default();
    let mut candidates = worked_examples(&mut ids);
    candidates.push(candidate(&mut ids, "E", Some(S), Some(S), Some(S)));
    let ascending = rank(&candidates, SortDirection::Ascending);

    let picks = top_picks(&ascending);
    let names: Vec<_> = picks.iter().map(|pick| pick.name.as_str()).collect();
    assert_eq!(picks.len(), TOP_PICK_LIMIT);
    assert_eq!(names, vec!["A", "B", "E"]);
    assert_eq!(picks[0].ratings, "L V • I V • C V");
    assert_eq!(picks[0].band_label, "Top");
}

#[test]
fn summary_counts_and_rows_follow_session_order() {
    let mut ids = IdAllocator::default();
    let candidates = worked_examples(&mut ids);
    let mut session =
        EvaluationSession::with_candidates(settings(SortPolicy::Allow), candidates, ids);
    session.request_sort();

    let summary = EvaluationReport::from_session("Evening dishes", &session);
    assert_eq!(summary.title, "Evening dishes");
    assert_eq!(summary.direction_label, "High→Low");
    assert_eq!(summary.sorted_label, Some("High→Low"));
    assert_eq!((summary.total, summary.complete, summary.incomplete), (4, 3, 1));

    let labels: Vec<_> = summary
        .rows
        .iter()
        .map(|row| (row.position, row.score_label.as_str(), row.band_label))
        .collect();
    assert_eq!(
        labels,
        vec![
            (1, "8", "Top"),
            (2, "4", "Strong"),
            (3, "0", "Discard"),
            (4, "–", "–")
        ]
    );
    assert!(summary.rows[3].needs_attention);
    assert!(!summary.rows[0].needs_attention);
}

#[test]
fn summary_stays_unsorted_until_a_sort_runs() {
    let mut ids = IdAllocator::default();
    let candidates = vec![
        candidate(&mut ids, "low", Some(N), Some(N), Some(N)),
        candidate(&mut ids, "high", Some(V), Some(V), Some(V)),
    ];
    let mut session =
        EvaluationSession::with_candidates(settings(SortPolicy::Confirm), candidates, ids);

    let before = EvaluationReport::from_session("Evening dishes", &session);
    assert_eq!(before.sorted_label, None);
    assert_eq!(before.rows[0].name, "low");

    session.confirm_sort().expect("completion prompt is open");
    let after = EvaluationReport::from_session("Evening dishes", &session);
    assert_eq!(after.sorted_label, Some("High→Low"));
    assert_eq!(after.rows[0].name, "high");
}
