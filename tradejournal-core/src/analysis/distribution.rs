//! Streak length distribution: per-trade performance grouped by streak length.

use super::stats::population_std_dev;
use super::streaks::Streak;
use crate::domain::Outcome;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Streak length bucket: 1, 2, 3 or 4 and longer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LengthBucket {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4+")]
    FourPlus,
}

impl LengthBucket {
    pub const ALL: [LengthBucket; 4] = [
        LengthBucket::One,
        LengthBucket::Two,
        LengthBucket::Three,
        LengthBucket::FourPlus,
    ];

    pub fn of(length: usize) -> Self {
        match length {
            0 | 1 => LengthBucket::One,
            2 => LengthBucket::Two,
            3 => LengthBucket::Three,
            _ => LengthBucket::FourPlus,
        }
    }
}

impl fmt::Display for LengthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LengthBucket::One => "1",
            LengthBucket::Two => "2",
            LengthBucket::Three => "3",
            LengthBucket::FourPlus => "4+",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakLengthStats {
    pub bucket: LengthBucket,
    pub streak_count: usize,
    pub trade_count: usize,
    #[serde(rename = "totalPL")]
    pub total_pl: f64,
    /// Total P/L divided by the number of trades across all streaks in the bucket.
    #[serde(rename = "avgPLPerTrade")]
    pub avg_pl_per_trade: f64,
    pub volatility: Option<f64>,
}

/// Win and loss streaks bucketed by length. Empty buckets are omitted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LengthDistribution {
    pub win: Vec<StreakLengthStats>,
    pub loss: Vec<StreakLengthStats>,
}

impl LengthDistribution {
    pub fn for_kind(&self, kind: Outcome) -> &[StreakLengthStats] {
        match kind {
            Outcome::Win => &self.win,
            Outcome::Loss => &self.loss,
        }
    }
}

pub fn length_distribution(streaks: &[Streak]) -> LengthDistribution {
    LengthDistribution {
        win: buckets_for(streaks, Outcome::Win),
        loss: buckets_for(streaks, Outcome::Loss),
    }
}

fn buckets_for(streaks: &[Streak], kind: Outcome) -> Vec<StreakLengthStats> {
    LengthBucket::ALL
        .iter()
        .filter_map(|&bucket| {
            let members: Vec<&Streak> = streaks
                .iter()
                .filter(|s| s.kind == kind && LengthBucket::of(s.length) == bucket)
                .collect();
            if members.is_empty() {
                return None;
            }
            let returns: Vec<f64> = members
                .iter()
                .flat_map(|s| s.trades.iter().map(|t| t.return_pct))
                .collect();
            let total_pl: f64 = members.iter().map(|s| s.total_pl).sum();
            let trade_count: usize = members.iter().map(|s| s.length).sum();
            Some(StreakLengthStats {
                bucket,
                streak_count: members.len(),
                trade_count,
                total_pl,
                avg_pl_per_trade: total_pl / trade_count as f64,
                volatility: population_std_dev(&returns),
            })
        })
        .collect()
}
