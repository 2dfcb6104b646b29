//! Plain-text rendering of run results for stdout.

use std::fmt::Write as _;

use crate::catalog::Catalog;
use crate::core::classifier::classify;
use crate::core::report::RunReport;
use crate::core::types::{RequiredAction, ResultTag};
use crate::core::walk::for_each_task;
use crate::farm::FarmSummary;
use crate::game::GameRound;

/// Render the catalog as an indented tree with the action each task needs.
pub fn render_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();
    for_each_task(catalog, |task, depth| {
        let action = match classify(&task.status) {
            RequiredAction::None => "done",
            RequiredAction::StartThenClaim => "start+claim",
            RequiredAction::ClaimOnly => "claim",
            RequiredAction::Unrecognized => "skip",
        };
        let _ = writeln!(
            out,
            "{}- [{}] {} ({}) -> {}",
            "  ".repeat(depth),
            task.status,
            task.title,
            task.id,
            action
        );
    });
    out
}

/// Render one line per outcome followed by per-result totals.
pub fn render_report(report: &RunReport) -> String {
    let mut out = String::new();
    for outcome in report.outcomes() {
        let _ = write!(
            out,
            "{:<28} {} ({})",
            outcome.result.as_str(),
            outcome.title,
            outcome.task_id
        );
        if let Some(detail) = &outcome.detail {
            let _ = write!(out, ": {detail}");
        }
        out.push('\n');
    }

    let summary = report.summary();
    let _ = write!(out, "{} task(s)", summary.total);
    for tag in [
        ResultTag::Claimed,
        ResultTag::AlreadyComplete,
        ResultTag::StartFailed,
        ResultTag::ClaimFailed,
        ResultTag::SkippedUnrecognizedStatus,
    ] {
        let count = summary.count(tag);
        if count > 0 {
            let _ = write!(out, ", {count} {}", tag.as_str());
        }
    }
    out.push('\n');
    out
}

pub fn render_farm(summary: &FarmSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "user: {}", summary.username);
    let _ = writeln!(out, "balance: {}", summary.balance.available_balance);
    let _ = writeln!(out, "play passes: {}", summary.balance.play_passes);
    if let Some(farming) = &summary.balance.farming {
        let _ = writeln!(out, "farming balance: {}", farming.balance);
    }
    let _ = writeln!(out, "farm claim: {}", summary.farm_claim);
    let _ = writeln!(out, "daily reward: {}", summary.daily_reward);
    if let Some(session) = &summary.restarted {
        let _ = writeln!(out, "farming restarted: balance {}", session.balance);
    }
    out
}

pub fn render_games(rounds: &[GameRound]) -> String {
    if rounds.is_empty() {
        return "no play passes left\n".to_string();
    }
    let mut out = String::new();
    for round in rounds {
        let _ = writeln!(
            out,
            "game {}: {} points -> {}",
            round.game_id, round.points, round.reply
        );
    }
    out
}
