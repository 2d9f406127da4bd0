//! Journal file loading: JSON exports and CSV spreadsheets.
//!
//! JSON may be a bare array of trades or an object with a `trades` array.
//! CSV needs a header row with a `date` column and a return column
//! (`profitLossPercentage`, `profit_loss_percentage` or `pl`); every other
//! column is carried along as an opaque string field.

use clap::ValueEnum;
use serde::Deserialize;
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tradejournal_core::TradeRecord;

const RETURN_COLUMNS: &[&str] = &["profitLossPercentage", "profit_loss_percentage", "pl"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("read journal {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse JSON journal: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parse CSV journal: {0}")]
    Csv(#[from] csv::Error),

    #[error("unsupported journal format for {0} (expected .json or .csv, or pass --input-format)")]
    UnsupportedFormat(String),

    #[error("CSV journal has no {0} column")]
    MissingColumn(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum JournalFormat {
    Json,
    Csv,
}

impl JournalFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(JournalFormat::Json),
            "csv" => Some(JournalFormat::Csv),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonJournal {
    List(Vec<TradeRecord>),
    Wrapped { trades: Vec<TradeRecord> },
}

/// Load a journal, picking the format from the extension unless one is given.
pub fn load_journal(
    path: &Path,
    format: Option<JournalFormat>,
) -> Result<Vec<TradeRecord>, LoadError> {
    let format = format
        .or_else(|| JournalFormat::from_path(path))
        .ok_or_else(|| LoadError::UnsupportedFormat(path.display().to_string()))?;

    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let trades = match format {
        JournalFormat::Json => parse_json(file)?,
        JournalFormat::Csv => parse_csv(file)?,
    };
    tracing::debug!(path = %path.display(), records = trades.len(), "journal loaded");
    Ok(trades)
}

pub fn parse_json<R: Read>(reader: R) -> Result<Vec<TradeRecord>, LoadError> {
    let journal: JsonJournal = serde_json::from_reader(reader)?;
    Ok(match journal {
        JsonJournal::List(trades) | JsonJournal::Wrapped { trades } => trades,
    })
}

pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<TradeRecord>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let date_col = headers
        .iter()
        .position(|h| h == "date")
        .ok_or(LoadError::MissingColumn("date"))?;
    let return_col = headers
        .iter()
        .position(|h| RETURN_COLUMNS.contains(&h))
        .ok_or(LoadError::MissingColumn("profitLossPercentage"))?;

    let mut trades = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let cell = |i: usize| Value::String(row.get(i).unwrap_or_default().to_string());

        let mut trade = TradeRecord {
            date: cell(date_col),
            profit_loss_percentage: cell(return_col),
            extra: Default::default(),
        };
        for (i, name) in headers.iter().enumerate() {
            if i != date_col && i != return_col {
                trade.extra.insert(name.to_string(), cell(i));
            }
        }
        trades.push(trade);
    }
    Ok(trades)
}
