//! Plain-text rendering of an analysis for the terminal.

use tradejournal_core::analysis::{StreakLengthStats, TransitionBucket, TransitionKind};
use tradejournal_core::AnalysisResult;

pub fn render_text(result: &AnalysisResult) -> String {
    let s = &result.summary;
    if result.is_empty() {
        return format!(
            "No analyzable trades ({} record(s) skipped).\n",
            s.skipped_records
        );
    }

    let current = match result.current_streak.kind {
        Some(kind) => format!("{} {}", result.current_streak.length, kind),
        None => "none".to_string(),
    };

    let mut out = format!(
        "Trade Journal Streaks\n\
         =====================\n\
         Trades: {} ({} skipped)\n\
         Wins / Losses: {} / {} ({:.1}% win rate)\n\
         Longest win streak: {}\n\
         Longest loss streak: {}\n\
         Current streak: {}\n\
         Streaks: {} (avg win {:.1}, avg loss {:.1})\n\
         Fingerprint: {}\n",
        s.total_trades,
        s.skipped_records,
        s.wins,
        s.losses,
        s.win_rate * 100.0,
        result.longest_win_streak,
        result.longest_loss_streak,
        current,
        s.total_streaks,
        s.avg_win_streak,
        s.avg_loss_streak,
        &result.fingerprint[..12.min(result.fingerprint.len())],
    );

    out.push_str("\nTransitions\n");
    out.push_str(&format!(
        "  {:<16} {:>5} {:>9} {:>9} {:>9} {:>9}\n",
        "", "count", "avg", "max", "min", "vol"
    ));
    for kind in TransitionKind::ALL {
        out.push_str(&transition_row(kind, result.transitions.bucket(kind)));
    }

    if !result.length_distribution.win.is_empty() {
        out.push_str("\nWin streak lengths\n");
        out.push_str(&format!(
            "  {:<6} {:>7} {:>7} {:>12}\n",
            "length", "streaks", "trades", "avg/trade"
        ));
        for b in &result.length_distribution.win {
            out.push_str(&length_row(b));
        }
    }

    if !result.insights.is_empty() {
        out.push_str("\nInsights\n");
        for (i, insight) in result.insights.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, insight));
        }
    }
    out
}

fn label(kind: TransitionKind) -> &'static str {
    match kind {
        TransitionKind::WinAfterLoss => "win after loss",
        TransitionKind::LossAfterWin => "loss after win",
        TransitionKind::WinAfterWin => "win after win",
        TransitionKind::LossAfterLoss => "loss after loss",
    }
}

fn pct(v: Option<f64>) -> String {
    v.map(|x| format!("{x:+.2}%")).unwrap_or_else(|| "-".into())
}

fn transition_row(kind: TransitionKind, b: &TransitionBucket) -> String {
    let avg = if b.is_empty() { None } else { Some(b.avg_pl) };
    format!(
        "  {:<16} {:>5} {:>9} {:>9} {:>9} {:>9}\n",
        label(kind),
        b.count,
        pct(avg),
        pct(b.max_pl),
        pct(b.min_pl),
        b.volatility
            .map(|v| format!("{v:.2}"))
            .unwrap_or_else(|| "-".into()),
    )
}

fn length_row(b: &StreakLengthStats) -> String {
    format!(
        "  {:<6} {:>7} {:>7} {:>12}\n",
        b.bucket.to_string(),
        b.streak_count,
        b.trade_count,
        pct(Some(b.avg_pl_per_trade)),
    )
}
