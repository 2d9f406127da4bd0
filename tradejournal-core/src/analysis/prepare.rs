//! Validation and ordering of raw journal records.

use crate::domain::{AnalyzedTrade, RecordError, TradeLike};
use serde::{Deserialize, Serialize};

/// A record that was left out, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRecord {
    pub index: usize,
    pub reason: String,
}

/// Valid trades sorted by timestamp, plus whatever was skipped.
#[derive(Debug, Clone, Default)]
pub struct PreparedTrades {
    pub trades: Vec<AnalyzedTrade>,
    pub skipped: Vec<SkippedRecord>,
}

fn validate<T: TradeLike>(index: usize, record: &T) -> Result<AnalyzedTrade, RecordError> {
    let timestamp = record.timestamp()?;
    let return_pct = record.return_pct()?;
    Ok(AnalyzedTrade::new(index, timestamp, return_pct))
}

/// Drop malformed records and sort the rest ascending by timestamp.
///
/// The sort is stable: trades sharing a timestamp keep their input order.
/// The input slice is never modified.
pub fn prepare_trades<T: TradeLike>(records: &[T]) -> PreparedTrades {
    let mut prepared = PreparedTrades {
        trades: Vec::with_capacity(records.len()),
        skipped: Vec::new(),
    };

    for (index, record) in records.iter().enumerate() {
        match validate(index, record) {
            Ok(trade) => prepared.trades.push(trade),
            Err(err) => {
                tracing::debug!(index, %err, "skipping malformed trade record");
                prepared.skipped.push(SkippedRecord {
                    index,
                    reason: err.to_string(),
                });
            }
        }
    }

    prepared.trades.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    prepared
}
