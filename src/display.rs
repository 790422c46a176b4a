//! Terminal output for standings tables and reconciliation summaries.
//!
//! Layout is built as plain lines first so it can be tested, then written
//! with colors through crossterm.

use std::io::Write;

use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::error::AppError;
use crate::reconciler::ReconciliationResult;
use crate::standings::{DivisionStandings, SkipReason, StandingsTable};

const TEAM_COLUMN_MIN: usize = 12;
const TEAM_COLUMN_MAX: usize = 32;

const HEADER_COLOR: Color = Color::Cyan;
const TEXT_COLOR: Color = Color::AnsiValue(231);
const OK_COLOR: Color = Color::Green;
const WARN_COLOR: Color = Color::Yellow;
const ERROR_COLOR: Color = Color::Red;

/// Pads `text` with spaces to `width` terminal columns, truncating it first
/// when it is wider.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str(&" ".repeat(width - used));
    out
}

fn team_column_width(table: &StandingsTable) -> usize {
    table
        .entries
        .iter()
        .map(|e| e.team.width())
        .max()
        .unwrap_or(0)
        .clamp(TEAM_COLUMN_MIN, TEAM_COLUMN_MAX)
}

/// Header and one row per team
pub fn standings_lines(table: &StandingsTable) -> Vec<String> {
    let team_width = team_column_width(table);
    let mut lines = Vec::with_capacity(table.entries.len() + 1);

    lines.push(format!(
        "{:>3}  {}  {:>3} {:>3} {:>3} {:>3} {:>4}",
        "#",
        pad_to_width("Team", team_width),
        "P",
        "W",
        "D",
        "L",
        "Pts"
    ));

    for entry in &table.entries {
        lines.push(format!(
            "{:>3}  {}  {:>3} {:>3} {:>3} {:>3} {:>4}",
            entry.position,
            pad_to_width(&entry.team, team_width),
            entry.played,
            entry.wins,
            entry.draws,
            entry.losses,
            entry.points
        ));
    }

    lines
}

fn describe_skip(reason: &SkipReason) -> Option<String> {
    match reason {
        SkipReason::Unparsable(raw) => Some(format!("unreadable score {raw:?}")),
        SkipReason::UnknownTeam(team) => Some(format!("team {team:?} is not in the division")),
        // Void results and bye slots are expected and not worth a warning
        SkipReason::Void(_) | SkipReason::ByeSlot => None,
    }
}

/// Warnings for matches that were ignored because of bad data
pub fn skipped_lines(table: &StandingsTable) -> Vec<String> {
    table
        .skipped
        .iter()
        .filter_map(|skipped| {
            describe_skip(&skipped.reason)
                .map(|reason| format!("Ignored match {}: {reason}", skipped.match_key))
        })
        .collect()
}

/// Short textual summary of a reconciliation run
pub fn summary_lines(result: &ReconciliationResult) -> Vec<String> {
    let mut lines = vec![format!(
        "Updated matches: {} ({} saved, {} not saved)",
        result.updated_count,
        result.committed_count(),
        result.failed_count()
    )];

    if !result.unmatched_keys.is_empty() {
        lines.push(format!(
            "Matches without feed counterpart: {}",
            result.unmatched_keys.join(", ")
        ));
    }

    for diagnostic in &result.diagnostics {
        lines.push(format!(
            "Season {}: match {} received unreadable score {:?}",
            diagnostic.season_id, diagnostic.match_key, diagnostic.raw_score
        ));
    }

    lines.extend(result.errors.iter().map(|e| format!("Error: {e}")));
    lines
}

/// Writes the tables of every division, each followed by its warnings.
pub fn render_standings<W: Write>(
    out: &mut W,
    season_label: &str,
    divisions: &[DivisionStandings],
) -> Result<(), AppError> {
    queue!(
        out,
        SetForegroundColor(HEADER_COLOR),
        SetAttribute(Attribute::Bold),
        Print(format!("{season_label}\n")),
        SetAttribute(Attribute::Reset),
    )?;

    if divisions.is_empty() {
        queue!(
            out,
            SetForegroundColor(WARN_COLOR),
            Print("No divisions to show\n"),
            ResetColor
        )?;
        out.flush()?;
        return Ok(());
    }

    for division in divisions {
        queue!(
            out,
            Print("\n"),
            SetForegroundColor(HEADER_COLOR),
            Print(format!("{}\n", division.division_name)),
        )?;

        for (i, line) in standings_lines(&division.table).into_iter().enumerate() {
            let color = if i == 0 { HEADER_COLOR } else { TEXT_COLOR };
            queue!(out, SetForegroundColor(color), Print(format!("{line}\n")))?;
        }

        for line in skipped_lines(&division.table) {
            queue!(out, SetForegroundColor(WARN_COLOR), Print(format!("{line}\n")))?;
        }
    }

    queue!(out, ResetColor)?;
    out.flush()?;
    Ok(())
}

/// Writes the summary of a reconciliation run.
pub fn render_summary<W: Write>(out: &mut W, result: &ReconciliationResult) -> Result<(), AppError> {
    for line in summary_lines(result) {
        let color = if line.starts_with("Error:") {
            ERROR_COLOR
        } else if line.starts_with("Updated") && result.is_clean() {
            OK_COLOR
        } else if line.starts_with("Updated") {
            TEXT_COLOR
        } else {
            WARN_COLOR
        };
        queue!(out, SetForegroundColor(color), Print(format!("{line}\n")))?;
    }
    queue!(out, ResetColor)?;
    out.flush()?;
    Ok(())
}
