//! First-order transition buckets: how a trade performs given the previous outcome.

use super::stats::{max_f64, mean_f64, min_f64, population_std_dev};
use crate::domain::{AnalyzedTrade, Outcome};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransitionKind {
    WinAfterLoss,
    LossAfterWin,
    WinAfterWin,
    LossAfterLoss,
}

impl TransitionKind {
    pub const ALL: [TransitionKind; 4] = [
        TransitionKind::WinAfterLoss,
        TransitionKind::LossAfterWin,
        TransitionKind::WinAfterWin,
        TransitionKind::LossAfterLoss,
    ];

    pub fn of(previous: Outcome, current: Outcome) -> Self {
        match (previous, current) {
            (Outcome::Loss, Outcome::Win) => TransitionKind::WinAfterLoss,
            (Outcome::Win, Outcome::Loss) => TransitionKind::LossAfterWin,
            (Outcome::Win, Outcome::Win) => TransitionKind::WinAfterWin,
            (Outcome::Loss, Outcome::Loss) => TransitionKind::LossAfterLoss,
        }
    }
}

/// Aggregate of every trade that falls into one transition category.
///
/// Empty buckets report `avg_pl = 0` and no extremes; `volatility` needs at
/// least two trades.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionBucket {
    pub count: usize,
    #[serde(rename = "totalPL")]
    pub total_pl: f64,
    #[serde(rename = "avgPL")]
    pub avg_pl: f64,
    #[serde(rename = "maxPL")]
    pub max_pl: Option<f64>,
    #[serde(rename = "minPL")]
    pub min_pl: Option<f64>,
    pub volatility: Option<f64>,
    pub trades: Vec<AnalyzedTrade>,
}

impl TransitionBucket {
    fn from_trades(trades: Vec<AnalyzedTrade>) -> Self {
        let returns: Vec<f64> = trades.iter().map(|t| t.return_pct).collect();
        Self {
            count: trades.len(),
            total_pl: returns.iter().sum(),
            avg_pl: mean_f64(&returns),
            max_pl: max_f64(&returns),
            min_pl: min_f64(&returns),
            volatility: population_std_dev(&returns),
            trades,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// The four fixed transition buckets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transitions {
    pub win_after_loss: TransitionBucket,
    pub loss_after_win: TransitionBucket,
    pub win_after_win: TransitionBucket,
    pub loss_after_loss: TransitionBucket,
}

impl Transitions {
    pub fn bucket(&self, kind: TransitionKind) -> &TransitionBucket {
        match kind {
            TransitionKind::WinAfterLoss => &self.win_after_loss,
            TransitionKind::LossAfterWin => &self.loss_after_win,
            TransitionKind::WinAfterWin => &self.win_after_win,
            TransitionKind::LossAfterLoss => &self.loss_after_loss,
        }
    }

    /// Share of trades following a loss that were wins.
    pub fn win_after_loss_rate(&self) -> Option<f64> {
        rate(self.win_after_loss.count, self.loss_after_loss.count)
    }

    /// Share of trades following a win that were wins.
    pub fn win_after_win_rate(&self) -> Option<f64> {
        rate(self.win_after_win.count, self.loss_after_win.count)
    }
}

fn rate(hits: usize, misses: usize) -> Option<f64> {
    let total = hits + misses;
    if total == 0 {
        return None;
    }
    Some(hits as f64 / total as f64)
}

/// Bucket every trade after the first by its own outcome and its predecessor's.
pub fn compute_transitions(sorted: &[AnalyzedTrade]) -> Transitions {
    let mut win_after_loss = Vec::new();
    let mut loss_after_win = Vec::new();
    let mut win_after_win = Vec::new();
    let mut loss_after_loss = Vec::new();

    for pair in sorted.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);
        let target = match TransitionKind::of(prev.outcome, cur.outcome) {
            TransitionKind::WinAfterLoss => &mut win_after_loss,
            TransitionKind::LossAfterWin => &mut loss_after_win,
            TransitionKind::WinAfterWin => &mut win_after_win,
            TransitionKind::LossAfterLoss => &mut loss_after_loss,
        };
        target.push(cur.clone());
    }

    Transitions {
        win_after_loss: TransitionBucket::from_trades(win_after_loss),
        loss_after_win: TransitionBucket::from_trades(loss_after_win),
        win_after_win: TransitionBucket::from_trades(win_after_win),
        loss_after_loss: TransitionBucket::from_trades(loss_after_loss),
    }
}
