//! TradeRecord: a journal entry as supplied by the host application.
//!
//! The analyzer only reads two things from a record: when it happened and the
//! signed percentage return. Everything else travels along untouched.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Why a single record was left out of the analysis.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("unparseable date '{0}'")]
    UnparseableDate(String),

    #[error("non-numeric return value '{0}'")]
    NonNumericReturn(String),

    #[error("non-finite return value {0}")]
    NonFiniteReturn(f64),
}

/// Anything the analyzer can read a timestamp and a percentage return from.
///
/// Hosts with their own record types implement this instead of converting
/// into [`TradeRecord`].
pub trait TradeLike {
    fn timestamp(&self) -> Result<NaiveDateTime, RecordError>;
    fn return_pct(&self) -> Result<f64, RecordError>;
}

impl<T: TradeLike + ?Sized> TradeLike for &T {
    fn timestamp(&self) -> Result<NaiveDateTime, RecordError> {
        (**self).timestamp()
    }

    fn return_pct(&self) -> Result<f64, RecordError> {
        (**self).return_pct()
    }
}

/// A trade journal entry in the host's JSON shape.
///
/// `date` and `profitLossPercentage` are kept as raw JSON values so that a
/// malformed entry still deserializes and can be skipped individually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    #[serde(default)]
    pub date: Value,

    #[serde(
        rename = "profitLossPercentage",
        alias = "profit_loss_percentage",
        default
    )]
    pub profit_loss_percentage: Value,

    /// Symbol, notes, tags and whatever else the host stores.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl TradeRecord {
    pub fn new(date: impl Into<String>, profit_loss_percentage: f64) -> Self {
        Self {
            date: Value::String(date.into()),
            profit_loss_percentage: serde_json::Number::from_f64(profit_loss_percentage)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            extra: BTreeMap::new(),
        }
    }

    /// Attach an opaque host field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

impl TradeLike for TradeRecord {
    fn timestamp(&self) -> Result<NaiveDateTime, RecordError> {
        match &self.date {
            Value::String(s) => {
                parse_timestamp(s).ok_or_else(|| RecordError::UnparseableDate(s.clone()))
            }
            other => Err(RecordError::UnparseableDate(other.to_string())),
        }
    }

    fn return_pct(&self) -> Result<f64, RecordError> {
        let value = match &self.profit_loss_percentage {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| RecordError::NonNumericReturn(n.to_string()))?,
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| RecordError::NonNumericReturn(s.clone()))?,
            other => return Err(RecordError::NonNumericReturn(other.to_string())),
        };
        if !value.is_finite() {
            return Err(RecordError::NonFiniteReturn(value));
        }
        Ok(value)
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a calendar date with an optional time of day.
///
/// Date-only values land at midnight. Offsets are normalized to UTC.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
