//! Deterministic synthetic journals for demos, benches and tests.

use crate::domain::TradeRecord;
use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SYMBOLS: &[&str] = &["SPY", "QQQ", "AAPL", "MSFT", "NVDA", "TSLA", "AMD", "IWM"];

/// Generate `count` trades, one per weekday starting 2024-01-02.
///
/// Wins draw a return in (0, 6]%, losses in [-5, 0]% so breakeven trades can
/// appear. The same seed always yields the same journal.
pub fn sample_journal(count: usize, seed: u64, win_probability: f64) -> Vec<TradeRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let p = win_probability.clamp(0.0, 1.0);
    let mut date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap_or_default();
    let mut trades = Vec::with_capacity(count);

    for _ in 0..count {
        let return_pct = if rng.gen_bool(p) {
            round2(rng.gen_range(0.01..=6.0))
        } else {
            round2(rng.gen_range(-5.0..=0.0))
        };
        let hour = rng.gen_range(9..16);
        let minute = rng.gen_range(0..60);
        let symbol = SYMBOLS[rng.gen_range(0..SYMBOLS.len())];

        trades.push(
            TradeRecord::new(
                format!("{} {hour:02}:{minute:02}", date.format("%Y-%m-%d")),
                return_pct,
            )
            .with_field("symbol", symbol),
        );
        date = next_weekday(date);
    }
    trades
}

fn next_weekday(date: NaiveDate) -> NaiveDate {
    let mut next = date.succ_opt().unwrap_or(date);
    while matches!(next.weekday(), Weekday::Sat | Weekday::Sun) {
        next = next.succ_opt().unwrap_or(next);
    }
    next
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TradeLike;

    #[test]
    fn same_seed_same_journal() {
        assert_eq!(sample_journal(50, 7, 0.5), sample_journal(50, 7, 0.5));
        assert_ne!(sample_journal(50, 7, 0.5), sample_journal(50, 8, 0.5));
    }

    #[test]
    fn every_record_is_valid() {
        for trade in sample_journal(200, 1, 0.55) {
            assert!(trade.timestamp().is_ok());
            let r = trade.return_pct().unwrap();
            assert!((-5.0..=6.0).contains(&r));
        }
    }

    #[test]
    fn skips_weekends() {
        for trade in sample_journal(30, 3, 0.5) {
            let ts = trade.timestamp().unwrap();
            assert!(!matches!(ts.weekday(), Weekday::Sat | Weekday::Sun));
        }
    }

    #[test]
    fn probability_extremes() {
        assert!(sample_journal(40, 2, 1.0)
            .iter()
            .all(|t| t.return_pct().unwrap() > 0.0));
        assert!(sample_journal(40, 2, 0.0)
            .iter()
            .all(|t| t.return_pct().unwrap() <= 0.0));
        // out-of-range probability is clamped rather than panicking
        assert_eq!(sample_journal(5, 2, 1.5).len(), 5);
    }
}
