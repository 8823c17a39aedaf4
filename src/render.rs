//! Plain-text rendering of reports for the terminal.

use root_cause::workflows::framing::{FramingSummary, SystemFraming};
use root_cause::workflows::rca::report::views::{EvaluationSummary, ScoringLegend};
use root_cause::workflows::rca::CandidateBoard;
use std::io::{self, Write};

pub fn render_summary<W: Write>(out: &mut W, summary: &EvaluationSummary) -> io::Result<()> {
    writeln!(out, "{}", summary.title)?;
    let order = match summary.sorted_label {
        Some(label) => format!("Sorted {label}"),
        None => format!("Unsorted (sort: {})", summary.direction_label),
    };
    writeln!(out, "{order} | {}/{} rated", summary.complete, summary.total)?;

    if summary.rows.is_empty() {
        writeln!(out, "No root causes yet.")?;
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "  #  L  I  C  Score  Band       Root Cause")?;
    for row in &summary.rows {
        let marker = if row.needs_attention { '!' } else { ' ' };
        writeln!(
            out,
            "{}{:>2}  {}  {}  {}  {:>5}  {:<9}  {}",
            marker,
            row.position,
            row.likelihood,
            row.impact,
            row.controllability,
            row.score_label,
            row.band_label,
            row.name
        )?;
        if row.needs_attention {
            let missing: Vec<_> = row.missing.iter().map(|dimension| dimension.label()).collect();
            writeln!(out, "       missing: {}", missing.join(", "))?;
        }
        if !row.notes.is_empty() {
            writeln!(out, "       notes: {}", row.notes)?;
        }
    }

    if !summary.top_picks.is_empty() {
        writeln!(out, "\nTop picks")?;
        for pick in &summary.top_picks {
            writeln!(
                out,
                "- {} ({}) score {} {}",
                pick.name, pick.ratings, pick.score, pick.band_label
            )?;
        }
    }

    Ok(())
}

pub fn render_legend<W: Write>(out: &mut W, legend: &ScoringLegend) -> io::Result<()> {
    writeln!(out, "Ratings")?;
    for rating in &legend.ratings {
        writeln!(out, "- {} {} = {}", rating.symbol, rating.label, rating.weight)?;
    }
    writeln!(out, "{}", legend.formula)?;
    writeln!(out, "Bands")?;
    for band in &legend.bands {
        writeln!(out, "- {} {}", band.score, band.label)?;
    }
    Ok(())
}

pub fn render_framing<W: Write>(out: &mut W, framing: &SystemFraming) -> io::Result<()> {
    for entry in FramingSummary::entries(framing) {
        match entry.values.as_slice() {
            [single] => writeln!(out, "{}: {}", entry.label, single)?,
            values => {
                writeln!(out, "{}:", entry.label)?;
                for value in values {
                    writeln!(out, "  - {value}")?;
                }
            }
        }
    }
    Ok(())
}

pub fn render_board<W: Write>(out: &mut W, board: &CandidateBoard) -> io::Result<()> {
    if board.candidates().is_empty() {
        return writeln!(out, "No root causes yet.");
    }
    for (position, candidate) in board.numbered() {
        writeln!(out, "{:>2}. {}", position, candidate.display_name())?;
    }
    Ok(())
}
