//! Streak construction: a single left-to-right pass over date-ordered trades.

use super::prepare::prepare_trades;
use crate::domain::{AnalyzedTrade, Outcome, TradeLike};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A maximal run of consecutive trades sharing the same outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    #[serde(rename = "type")]
    pub kind: Outcome,
    pub length: usize,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    #[serde(rename = "totalPL")]
    pub total_pl: f64,
    pub trades: Vec<AnalyzedTrade>,
}

impl Streak {
    fn open(trade: &AnalyzedTrade) -> Self {
        Self {
            kind: trade.outcome,
            length: 1,
            start_date: trade.timestamp,
            end_date: trade.timestamp,
            total_pl: trade.return_pct,
            trades: vec![trade.clone()],
        }
    }

    fn extend(&mut self, trade: &AnalyzedTrade) {
        self.length += 1;
        self.end_date = trade.timestamp;
        self.total_pl += trade.return_pct;
        self.trades.push(trade.clone());
    }

    /// Mean return per trade within the streak.
    pub fn avg_pl(&self) -> f64 {
        self.total_pl / self.length as f64
    }
}

/// The streak ending at the latest trade. `kind` is `None` only for empty input.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CurrentStreak {
    #[serde(rename = "type")]
    pub kind: Option<Outcome>,
    pub length: usize,
}

/// Output of [`compute_streaks`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakComputation {
    pub streaks: Vec<Streak>,
    pub longest_win_streak: usize,
    pub longest_loss_streak: usize,
    pub current_streak: CurrentStreak,
}

impl StreakComputation {
    fn close(&mut self, streak: Streak) {
        match streak.kind {
            Outcome::Win => self.longest_win_streak = self.longest_win_streak.max(streak.length),
            Outcome::Loss => self.longest_loss_streak = self.longest_loss_streak.max(streak.length),
        }
        self.streaks.push(streak);
    }

    /// Streaks of one outcome, oldest first.
    pub fn of_kind(&self, kind: Outcome) -> impl Iterator<Item = &Streak> {
        self.streaks.iter().filter(move |s| s.kind == kind)
    }

    /// Mean streak length for one outcome, 0.0 when there are none.
    pub fn average_length(&self, kind: Outcome) -> f64 {
        let (count, total) = self
            .of_kind(kind)
            .fold((0usize, 0usize), |(c, t), s| (c + 1, t + s.length));
        if count == 0 {
            return 0.0;
        }
        total as f64 / count as f64
    }
}

/// Validate, sort and split raw records into streaks.
///
/// Records with an unparseable date or a non-numeric return are skipped.
pub fn compute_streaks<T: TradeLike>(records: &[T]) -> StreakComputation {
    streaks_from_sorted(&prepare_trades(records).trades)
}

/// Split already validated, date-ordered trades into streaks.
pub fn streaks_from_sorted(trades: &[AnalyzedTrade]) -> StreakComputation {
    let mut result = StreakComputation::default();
    let mut open: Option<Streak> = None;

    for trade in trades {
        match open.as_mut() {
            Some(streak) if streak.kind == trade.outcome => streak.extend(trade),
            _ => {
                if let Some(done) = open.replace(Streak::open(trade)) {
                    result.close(done);
                }
            }
        }
    }
    if let Some(done) = open {
        result.close(done);
    }

    if let Some(last) = result.streaks.last() {
        result.current_streak = CurrentStreak {
            kind: Some(last.kind),
            length: last.length,
        };
    }
    result
}
