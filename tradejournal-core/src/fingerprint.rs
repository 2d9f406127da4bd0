//! Journal fingerprinting: identifies the exact trade sequence an analysis ran on.
//!
//! BLAKE3 over each analyzed trade's timestamp and the bit pattern of its
//! return, in analysis order. Two inputs that differ only in malformed records,
//! opaque fields or input ordering (with distinct dates) share a fingerprint.

use crate::domain::AnalyzedTrade;

pub fn journal_fingerprint(trades: &[AnalyzedTrade]) -> String {
    let mut hasher = blake3::Hasher::new();
    for trade in trades {
        hasher.update(trade.timestamp.to_string().as_bytes());
        hasher.update(b"|");
        hasher.update(&trade.return_pct.to_bits().to_le_bytes());
        hasher.update(b"\n");
    }
    hasher.finalize().to_hex().to_string()
}
