//! Win/loss classification and the validated per-trade view the analyzer works on.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single trade.
///
/// A return of exactly zero is a loss: breakeven trades break a win streak
/// and extend a loss streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    pub fn classify(return_pct: f64) -> Self {
        if return_pct > 0.0 {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }

    pub fn is_win(self) -> bool {
        self == Outcome::Win
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Win => "winning",
            Outcome::Loss => "losing",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "win"),
            Outcome::Loss => write!(f, "loss"),
        }
    }
}

/// A trade that passed validation.
///
/// `index` is the record's position in the slice the caller handed in, so the
/// host can map results back to its own records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedTrade {
    pub index: usize,
    pub timestamp: NaiveDateTime,
    pub return_pct: f64,
    pub outcome: Outcome,
}

impl AnalyzedTrade {
    pub fn new(index: usize, timestamp: NaiveDateTime, return_pct: f64) -> Self {
        Self {
            index,
            timestamp,
            return_pct,
            outcome: Outcome::classify(return_pct),
        }
    }
}
