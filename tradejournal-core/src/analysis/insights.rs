//! Rule-based insight generation.
//!
//! Rules run in a fixed order and each one either emits a single observation
//! or nothing:
//! 1. longest streak
//! 2. recovery after a loss
//! 3. behavior after a win
//! 4. best/worst win streak length
//! 5. current streak against its historical average

use super::distribution::{LengthDistribution, StreakLengthStats};
use super::streaks::StreakComputation;
use super::transitions::Transitions;
use crate::config::InsightThresholds;
use crate::domain::Outcome;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    LongestStreak,
    Recovery,
    PostWin,
    OptimalLength,
    CurrentStreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub tone: Tone,
    pub text: String,
}

impl Insight {
    fn new(kind: InsightKind, tone: Tone, text: String) -> Self {
        Self { kind, tone, text }
    }
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Produce up to five observations from precomputed statistics.
pub fn generate_insights(
    streaks: &StreakComputation,
    transitions: &Transitions,
    distribution: &LengthDistribution,
    thresholds: &InsightThresholds,
) -> Vec<Insight> {
    [
        longest_streak_insight(streaks, thresholds),
        recovery_insight(transitions, thresholds),
        post_win_insight(transitions, thresholds),
        optimal_length_insight(streaks, distribution, thresholds),
        current_streak_insight(streaks, thresholds),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn longest_streak_insight(
    streaks: &StreakComputation,
    thresholds: &InsightThresholds,
) -> Option<Insight> {
    let (wins, losses) = (streaks.longest_win_streak, streaks.longest_loss_streak);
    if wins.max(losses) < thresholds.min_longest_streak {
        return None;
    }
    let insight = if wins > losses {
        Insight::new(
            InsightKind::LongestStreak,
            Tone::Positive,
            format!(
                "Your longest winning streak ran {wins} trades, ahead of your longest losing \
                 streak of {losses}. Review the setups from that run and look for conditions \
                 you can replicate."
            ),
        )
    } else if losses > wins {
        Insight::new(
            InsightKind::LongestStreak,
            Tone::Negative,
            format!(
                "Your longest losing streak ran {losses} trades, longer than your best winning \
                 streak of {wins}. Review that run for repeated mistakes and consider a pause \
                 rule after consecutive losses."
            ),
        )
    } else {
        Insight::new(
            InsightKind::LongestStreak,
            Tone::Neutral,
            format!(
                "Your longest winning and losing streaks both ran {wins} trades. Review both \
                 runs to see what separated them."
            ),
        )
    };
    Some(insight)
}

fn recovery_insight(transitions: &Transitions, thresholds: &InsightThresholds) -> Option<Insight> {
    let bucket = &transitions.win_after_loss;
    if bucket.is_empty() {
        return None;
    }
    let (avg, n) = (bucket.avg_pl, bucket.count);
    let insight = if avg > thresholds.strong_recovery {
        Insight::new(
            InsightKind::Recovery,
            Tone::Positive,
            format!(
                "Strong resilience: wins that follow a loss average {avg:+.2}% across {n} \
                 recoveries. You bounce back decisively after setbacks."
            ),
        )
    } else if avg > 0.0 {
        Insight::new(
            InsightKind::Recovery,
            Tone::Neutral,
            format!(
                "Modest recovery: wins that follow a loss average {avg:+.2}% across {n} \
                 recoveries. Rebuilding size gradually after a loss may help."
            ),
        )
    } else {
        Insight::new(
            InsightKind::Recovery,
            Tone::Negative,
            format!(
                "You struggle to recover after losses: the following trades average {avg:+.2}% \
                 across {n} instances. Consider stepping back before re-entering."
            ),
        )
    };
    Some(insight)
}

fn post_win_insight(transitions: &Transitions, thresholds: &InsightThresholds) -> Option<Insight> {
    let bucket = &transitions.loss_after_win;
    if bucket.is_empty() {
        return None;
    }
    let (avg, n) = (bucket.avg_pl, bucket.count);
    let insight = if avg > 0.0 {
        Insight::new(
            InsightKind::PostWin,
            Tone::Positive,
            format!(
                "You maintain momentum after wins: trades that follow a win average {avg:+.2}% \
                 across {n} instances."
            ),
        )
    } else if avg > thresholds.post_win_give_back {
        Insight::new(
            InsightKind::PostWin,
            Tone::Neutral,
            format!(
                "You give back some gains after wins: losses that follow a win average \
                 {avg:+.2}% across {n} instances."
            ),
        )
    } else {
        Insight::new(
            InsightKind::PostWin,
            Tone::Negative,
            format!(
                "Significant give-back after wins: losses that follow a win average {avg:+.2}% \
                 across {n} instances. Watch for oversizing or loosened discipline after a win."
            ),
        )
    };
    Some(insight)
}

fn optimal_length_insight(
    streaks: &StreakComputation,
    distribution: &LengthDistribution,
    thresholds: &InsightThresholds,
) -> Option<Insight> {
    if streaks.streaks.len() < thresholds.min_streaks_for_length {
        return None;
    }
    let qualifying: Vec<&StreakLengthStats> = distribution
        .win
        .iter()
        .filter(|b| b.streak_count >= thresholds.min_bucket_samples)
        .collect();
    if qualifying.len() < 2 {
        return None;
    }

    let mut best = qualifying[0];
    let mut worst = qualifying[0];
    for &b in &qualifying[1..] {
        if b.avg_pl_per_trade > best.avg_pl_per_trade {
            best = b;
        }
        if b.avg_pl_per_trade < worst.avg_pl_per_trade {
            worst = b;
        }
    }

    Some(Insight::new(
        InsightKind::OptimalLength,
        Tone::Neutral,
        format!(
            "Win streaks of length {} deliver your best per-trade return ({:+.2}%), while \
             length {} delivers the weakest ({:+.2}%).",
            best.bucket, best.avg_pl_per_trade, worst.bucket, worst.avg_pl_per_trade
        ),
    ))
}

fn current_streak_insight(
    streaks: &StreakComputation,
    thresholds: &InsightThresholds,
) -> Option<Insight> {
    let current = streaks.current_streak;
    let kind = current.kind?;
    let n = current.length;
    if n < thresholds.min_current_streak {
        return None;
    }
    let avg = streaks.average_length(kind);
    let label = kind.label();

    let insight = match (kind, n as f64 > avg) {
        (Outcome::Win, true) => Insight::new(
            InsightKind::CurrentStreak,
            Tone::Neutral,
            format!(
                "You are on a {n}-trade {label} streak, above your average of {avg:.1}. Watch \
                 for overconfidence and keep position sizes consistent."
            ),
        ),
        (Outcome::Loss, true) => Insight::new(
            InsightKind::CurrentStreak,
            Tone::Negative,
            format!(
                "You are on a {n}-trade {label} streak, above your average of {avg:.1}. Watch \
                 for fatigue and consider reducing size or pausing."
            ),
        ),
        (Outcome::Win, false) => Insight::new(
            InsightKind::CurrentStreak,
            Tone::Positive,
            format!(
                "Your current {n}-trade {label} streak is within your normal range (average \
                 {avg:.1}). Maintain the behavior that got you here."
            ),
        ),
        (Outcome::Loss, false) => Insight::new(
            InsightKind::CurrentStreak,
            Tone::Neutral,
            format!(
                "Your current {n}-trade {label} streak is within your normal range (average \
                 {avg:.1}). Stick to your process and avoid revenge trading."
            ),
        ),
    };
    Some(insight)
}
