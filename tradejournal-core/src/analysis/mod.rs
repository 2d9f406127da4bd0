//! Streak analysis: a pure function of the trade list.
//!
//! `Analyzer::analyze` validates and sorts the records, splits them into
//! streaks, buckets transitions, groups streaks by length and derives the
//! insight list. Nothing is cached between calls and the input is never
//! mutated.

pub mod distribution;
pub mod insights;
pub mod prepare;
pub mod stats;
pub mod streaks;
pub mod transitions;

pub use distribution::{length_distribution, LengthBucket, LengthDistribution, StreakLengthStats};
pub use insights::{generate_insights, Insight, InsightKind, Tone};
pub use prepare::{prepare_trades, PreparedTrades, SkippedRecord};
pub use streaks::{compute_streaks, streaks_from_sorted, CurrentStreak, Streak, StreakComputation};
pub use transitions::{compute_transitions, TransitionBucket, TransitionKind, Transitions};

use crate::config::AnalyzerConfig;
use crate::domain::{AnalyzedTrade, Outcome, TradeLike};
use crate::fingerprint::journal_fingerprint;
use serde::{Deserialize, Serialize};

/// Headline counts for the analyzed journal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_trades: usize,
    pub skipped_records: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub total_streaks: usize,
    pub avg_win_streak: f64,
    pub avg_loss_streak: f64,
    pub win_after_loss_rate: Option<f64>,
    pub win_after_win_rate: Option<f64>,
}

/// Everything the host needs to render the streak views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub longest_win_streak: usize,
    pub longest_loss_streak: usize,
    pub current_streak: CurrentStreak,
    pub streaks: Vec<Streak>,
    pub transitions: Transitions,
    pub insights: Vec<Insight>,
    pub summary: Summary,
    pub length_distribution: LengthDistribution,
    pub skipped: Vec<SkippedRecord>,
    pub fingerprint: String,
}

impl AnalysisResult {
    pub fn insight_texts(&self) -> Vec<&str> {
        self.insights.iter().map(|i| i.text.as_str()).collect()
    }

    /// Valid trades in analysis order, recovered from the streak partition.
    pub fn trades(&self) -> impl Iterator<Item = &AnalyzedTrade> {
        self.streaks.iter().flat_map(|s| s.trades.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.streaks.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn analyze<T: TradeLike>(&self, records: &[T]) -> AnalysisResult {
        let PreparedTrades { trades, skipped } = prepare_trades(records);

        let computation = streaks_from_sorted(&trades);
        let transitions = compute_transitions(&trades);
        let distribution = length_distribution(&computation.streaks);
        let insights = generate_insights(
            &computation,
            &transitions,
            &distribution,
            &self.config.insights,
        );
        let summary = summarize(&trades, skipped.len(), &computation, &transitions);
        let fingerprint = journal_fingerprint(&trades);

        tracing::trace!(
            trades = trades.len(),
            skipped = skipped.len(),
            streaks = computation.streaks.len(),
            insights = insights.len(),
            "journal analyzed"
        );

        let StreakComputation {
            streaks,
            longest_win_streak,
            longest_loss_streak,
            current_streak,
        } = computation;

        AnalysisResult {
            longest_win_streak,
            longest_loss_streak,
            current_streak,
            streaks,
            transitions,
            insights,
            summary,
            length_distribution: distribution,
            skipped,
            fingerprint,
        }
    }
}

/// Analyze with the default configuration.
pub fn analyze<T: TradeLike>(records: &[T]) -> AnalysisResult {
    Analyzer::default().analyze(records)
}

fn summarize(
    trades: &[AnalyzedTrade],
    skipped: usize,
    computation: &StreakComputation,
    transitions: &Transitions,
) -> Summary {
    let wins = trades.iter().filter(|t| t.outcome.is_win()).count();
    let total = trades.len();
    Summary {
        total_trades: total,
        skipped_records: skipped,
        wins,
        losses: total - wins,
        win_rate: if total == 0 {
            0.0
        } else {
            wins as f64 / total as f64
        },
        total_streaks: computation.streaks.len(),
        avg_win_streak: computation.average_length(Outcome::Win),
        avg_loss_streak: computation.average_length(Outcome::Loss),
        win_after_loss_rate: transitions.win_after_loss_rate(),
        win_after_win_rate: transitions.win_after_win_rate(),
    }
}
