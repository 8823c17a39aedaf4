use super::super::band::Band;
use super::super::domain::{Candidate, Rating, RatingDimension};
use super::super::ranking::{rank, SortDirection};
use super::super::scoring::{score_label, FORMULA_TEXT, MAX_SCORE, NO_SCORE};
use super::super::session::EvaluationSession;
use super::views::{
    CandidateRow, EvaluationSummary, LegendBand, LegendRating, ScoringLegend, TopPick,
};

/// Number of candidates surfaced as top picks.
pub const TOP_PICK_LIMIT: usize = 3;

/// Builds display rows for candidates in their current order.
pub struct EvaluationReport;

impl EvaluationReport {
    pub fn from_session(title: &str, session: &EvaluationSession) -> EvaluationSummary {
        Self::build(
            title,
            session.candidates(),
            session.direction(),
            session.last_sort(),
            session.sorted_while_incomplete(),
        )
    }

    /// `sorted` is the direction the candidates are already ranked in, if any.
    /// `highlight_missing` flags incomplete rows, as after an early sort.
    pub fn build(
        title: &str,
        candidates: &[Candidate],
        direction: SortDirection,
        sorted: Option<SortDirection>,
        highlight_missing: bool,
    ) -> EvaluationSummary {
        let rows: Vec<CandidateRow> = candidates
            .iter()
            .enumerate()
            .map(|(index, candidate)| candidate_row(index + 1, candidate, highlight_missing))
            .collect();

        let complete = candidates.iter().filter(|c| c.is_complete()).count();

        EvaluationSummary {
            title: title.to_string(),
            direction_label: direction.label(),
            sorted_label: sorted.map(SortDirection::label),
            total: candidates.len(),
            complete,
            incomplete: candidates.len() - complete,
            rows,
            top_picks: top_picks(candidates),
        }
    }

    pub fn legend() -> ScoringLegend {
        let ratings = Rating::ordered()
            .into_iter()
            .rev()
            .map(|rating| LegendRating {
                symbol: rating.symbol(),
                label: rating.label(),
                weight: rating.weight(),
            })
            .collect();

        let bands = Band::ordered()
            .into_iter()
            .map(|band| LegendBand {
                score: band.representative_score(),
                label: band.label(),
                tone: band.tone(),
            })
            .collect();

        ScoringLegend {
            ratings,
            formula: format!("{FORMULA_TEXT} (0–{MAX_SCORE})"),
            bands,
        }
    }
}

/// Highest scoring complete candidates, independent of the display order.
pub fn top_picks(candidates: &[Candidate]) -> Vec<TopPick> {
    rank(candidates, SortDirection::Descending)
        .into_iter()
        .filter_map(|candidate| {
            let score = candidate.score()?;
            Some(TopPick {
                id: candidate.id(),
                name: candidate.display_name().to_string(),
                ratings: rating_trail(&candidate),
                score,
                band_label: Band::for_score(score).label(),
                notes: candidate.notes.clone(),
            })
        })
        .take(TOP_PICK_LIMIT)
        .collect()
}

fn candidate_row(position: usize, candidate: &Candidate, highlight_missing: bool) -> CandidateRow {
    let score = candidate.score();
    let band = score.map(Band::for_score);
    let missing = candidate.missing_dimensions();

    CandidateRow {
        position,
        id: candidate.id(),
        name: candidate.display_name().to_string(),
        likelihood: symbol_or_dash(candidate.likelihood),
        impact: symbol_or_dash(candidate.impact),
        controllability: symbol_or_dash(candidate.controllability),
        score,
        score_label: score_label(score),
        band,
        band_label: band.map(Band::label).unwrap_or(NO_SCORE),
        needs_attention: highlight_missing && !missing.is_empty(),
        missing,
        notes: candidate.notes.clone(),
    }
}

fn symbol_or_dash(rating: Option<Rating>) -> &'static str {
    rating.map(Rating::symbol).unwrap_or(NO_SCORE)
}

/// "L V • I S • C V"
fn rating_trail(candidate: &Candidate) -> String {
    RatingDimension::ordered()
        .into_iter()
        .map(|dimension| {
            format!(
                "{} {}",
                dimension.initial(),
                symbol_or_dash(candidate.rating(dimension))
            )
        })
        .collect::<Vec<_>>()
        .join(" • ")
}
