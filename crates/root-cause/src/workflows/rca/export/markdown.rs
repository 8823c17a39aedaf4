use super::super::domain::{Candidate, Rating};
use super::super::scoring::{score_label, FORMULA_TEXT, NO_SCORE};
use std::fmt::Write as _;

const TABLE_HEADER: &str = "| Root Cause | Likelihood (N/S/V) | Impact (N/S/V) \
                            | Controllability (N/S/V) | Score | Notes |";
const TABLE_ALIGNMENT: &str = "|---|---:|---:|---:|---:|---|";

/// Clipboard transcript: title, scoring metadata, then a pipe table.
pub fn encode_markdown(title: &str, candidates: &[Candidate]) -> String {
    let mut out = String::new();

    writeln!(out, "# {}", title.trim()).expect("write title");
    out.push('\n');
    writeln!(out, "- Scoring:: {}", weight_mapping()).expect("write scoring");
    writeln!(out, "- Formula:: {FORMULA_TEXT}").expect("write formula");
    out.push('\n');
    writeln!(out, "{TABLE_HEADER}").expect("write table header");
    writeln!(out, "{TABLE_ALIGNMENT}").expect("write table alignment");

    for candidate in candidates {
        writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} |",
            cell(candidate.display_name()),
            symbol_or_dash(candidate.likelihood),
            symbol_or_dash(candidate.impact),
            symbol_or_dash(candidate.controllability),
            score_label(candidate.score()),
            cell(&candidate.notes),
        )
        .expect("write row");
    }

    out
}

/// "N=0, S=1, V=2"
pub(crate) fn weight_mapping() -> String {
    Rating::ordered()
        .into_iter()
        .map(|rating| format!("{}={}", rating.symbol(), rating.weight()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn symbol_or_dash(rating: Option<Rating>) -> &'static str {
    rating.map(Rating::symbol).unwrap_or(NO_SCORE)
}

// Pipes would split the cell and newlines would end the row.
fn cell(value: &str) -> String {
    value
        .replace('|', "\\|")
        .split(|c: char| c == '\r' || c == '\n')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::rca::domain::IdAllocator;

    #[test]
    fn transcript_layout() {
        let mut ids = IdAllocator::default();
        let candidates = vec![
            Candidate::new(ids.allocate(), "Trigger missing").with_ratings(
                Some(Rating::VeryLikely),
                Some(Rating::VeryLikely),
                Some(Rating::VeryLikely),
            ),
            Candidate::new(ids.allocate(), "Timing | cadence")
                .with_ratings(Some(Rating::SomewhatLikely), None, Some(Rating::VeryLikely))
                .with_notes("weekday\nonly"),
        ];

        let transcript = encode_markdown("Household Cleaning System", &candidates);
        let expected = "# Household Cleaning System\n\
\n\
- Scoring:: N=0, S=1, V=2\n\
- Formula:: Score = Likelihood × Impact × Controllability\n\
\n\
| Root Cause | Likelihood (N/S/V) | Impact (N/S/V) | Controllability (N/S/V) | Score | Notes |\n\
|---|---:|---:|---:|---:|---|\n\
| Trigger missing | V | V | V | 8 |  |\n\
| Timing \\| cadence | S | – | V | – | weekday only |\n";
        assert_eq!(transcript, expected);
    }
}
