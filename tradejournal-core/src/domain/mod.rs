//! Domain types for the trade journal analyzer

pub mod outcome;
pub mod trade;

pub use outcome::{AnalyzedTrade, Outcome};
pub use trade::{parse_timestamp, RecordError, TradeLike, TradeRecord};
