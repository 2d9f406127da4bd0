//! End-to-end journal scenarios through the public analyzer API.

use chrono::NaiveDateTime;
use serde_json::json;
use tradejournal_core::analysis::{compute_streaks, CurrentStreak, InsightKind, TransitionKind};
use tradejournal_core::domain::parse_timestamp;
use tradejournal_core::{
    analyze, AnalysisResult, Analyzer, AnalyzerConfig, Outcome, RecordError, TradeLike,
    TradeRecord,
};

fn journal(entries: &[(&str, f64)]) -> Vec<TradeRecord> {
    entries
        .iter()
        .map(|&(date, pl)| TradeRecord::new(date, pl))
        .collect()
}

/// Streak structure without input indices, for comparing differently ordered inputs.
fn shape(result: &AnalysisResult) -> Vec<(Outcome, usize, f64)> {
    result
        .streaks
        .iter()
        .map(|s| (s.kind, s.length, s.total_pl))
        .collect()
}

#[test]
fn two_wins_then_a_loss() {
    let result = analyze(&journal(&[
        ("2024-01-01", 2.0),
        ("2024-01-02", 3.0),
        ("2024-01-03", -1.0),
    ]));
    assert_eq!(
        shape(&result),
        vec![(Outcome::Win, 2, 5.0), (Outcome::Loss, 1, -1.0)]
    );
    assert_eq!(result.longest_win_streak, 2);
    assert_eq!(result.longest_loss_streak, 1);
    assert_eq!(
        result.current_streak,
        CurrentStreak {
            kind: Some(Outcome::Loss),
            length: 1
        }
    );
}

#[test]
fn empty_journal_zero_result() {
    let result = analyze::<TradeRecord>(&[]);
    assert!(result.streaks.is_empty());
    assert_eq!(result.longest_win_streak, 0);
    assert_eq!(result.longest_loss_streak, 0);
    assert_eq!(result.current_streak.kind, None);
    assert_eq!(result.current_streak.length, 0);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["currentStreak"], json!({"type": null, "length": 0}));
}

#[test]
fn all_wins_is_one_streak() {
    let result = analyze(&journal(&[
        ("2024-01-01", 1.0),
        ("2024-01-02", 2.0),
        ("2024-01-03", 0.5),
        ("2024-01-04", 4.0),
        ("2024-01-05", 1.5),
    ]));
    assert_eq!(result.streaks.len(), 1);
    assert_eq!(result.streaks[0].kind, Outcome::Win);
    assert_eq!(result.streaks[0].length, 5);
    assert_eq!(result.longest_loss_streak, 0);
}

#[test]
fn malformed_record_is_ignored() {
    let valid = journal(&[
        ("2024-01-01", 1.0),
        ("2024-01-02", -2.0),
        ("2024-01-03", -1.0),
        ("2024-01-04", 3.0),
    ]);
    let mut with_bad = valid.clone();
    with_bad.insert(2, TradeRecord::new("not-a-date", 7.0));

    let clean = analyze(&valid);
    let dirty = analyze(&with_bad);

    assert_eq!(shape(&clean), shape(&dirty));
    assert_eq!(clean.longest_win_streak, dirty.longest_win_streak);
    assert_eq!(clean.longest_loss_streak, dirty.longest_loss_streak);
    assert_eq!(clean.current_streak, dirty.current_streak);
    assert_eq!(clean.insights, dirty.insights);
    assert_eq!(clean.fingerprint, dirty.fingerprint);
    assert_eq!(dirty.skipped.len(), 1);
    assert_eq!(dirty.skipped[0].index, 2);
}

#[test]
fn non_numeric_return_is_ignored() {
    let mut records = journal(&[("2024-01-01", 1.0), ("2024-01-02", 1.0)]);
    records.push(TradeRecord {
        date: json!("2024-01-03"),
        profit_loss_percentage: json!("n/a"),
        extra: Default::default(),
    });
    let result = analyze(&records);
    assert_eq!(result.streaks.len(), 1);
    assert_eq!(result.streaks[0].length, 2);
    assert_eq!(result.summary.skipped_records, 1);
}

#[test]
fn alternating_outcomes() {
    let result = analyze(&journal(&[
        ("2024-01-01", 1.0),
        ("2024-01-02", -1.0),
        ("2024-01-03", 1.0),
        ("2024-01-04", -1.0),
    ]));
    assert_eq!(result.streaks.len(), 4);
    assert!(result.streaks.iter().all(|s| s.length == 1));
    assert_eq!(result.longest_win_streak, 1);
    assert_eq!(result.longest_loss_streak, 1);
}

#[test]
fn transition_buckets_for_win_loss_win_win() {
    let result = analyze(&journal(&[
        ("2024-01-01", 1.0),
        ("2024-01-02", -1.0),
        ("2024-01-03", 2.0),
        ("2024-01-04", 3.0),
    ]));
    let t = &result.transitions;
    assert_eq!(t.bucket(TransitionKind::WinAfterLoss).count, 1);
    assert_eq!(t.win_after_loss.trades[0].index, 2);
    assert_eq!(t.bucket(TransitionKind::LossAfterWin).count, 1);
    assert_eq!(t.loss_after_win.trades[0].index, 1);
    assert_eq!(t.bucket(TransitionKind::WinAfterWin).count, 1);
    assert_eq!(t.win_after_win.trades[0].index, 3);
    assert_eq!(t.bucket(TransitionKind::LossAfterLoss).count, 0);
}

#[test]
fn unsorted_input_is_sorted_by_date() {
    let result = analyze(&journal(&[
        ("2024-01-03", -1.0),
        ("2024-01-01", 2.0),
        ("2024-01-02", 3.0),
    ]));
    assert_eq!(
        shape(&result),
        vec![(Outcome::Win, 2, 5.0), (Outcome::Loss, 1, -1.0)]
    );
}

#[test]
fn time_of_day_orders_same_day_trades() {
    let result = analyze(&journal(&[
        ("2024-01-01T15:00", -1.0),
        ("2024-01-01T09:30", 1.0),
        ("2024-01-01 12:00:00", 1.0),
    ]));
    assert_eq!(
        shape(&result),
        vec![(Outcome::Win, 2, 2.0), (Outcome::Loss, 1, -1.0)]
    );
}

#[test]
fn compute_streaks_matches_full_analysis() {
    let records = journal(&[
        ("2024-02-01", 1.0),
        ("2024-02-02", 0.0),
        ("2024-02-05", -2.0),
        ("2024-02-06", 2.0),
    ]);
    let partial = compute_streaks(&records);
    let full = analyze(&records);
    assert_eq!(partial.streaks, full.streaks);
    assert_eq!(partial.current_streak, full.current_streak);
}

#[test]
fn rich_journal_emits_every_insight_in_order() {
    let returns = [1.0, -1.0, 1.0, -1.0, 4.0, 4.0, -1.0, 4.0, 4.0, -1.0, -2.0];
    let records: Vec<TradeRecord> = returns
        .iter()
        .enumerate()
        .map(|(i, &r)| TradeRecord::new(format!("2024-03-{:02}", i + 1), r))
        .collect();
    let result = analyze(&records);
    let kinds: Vec<InsightKind> = result.insights.iter().map(|i| i.kind).collect();
    assert_eq!(
        kinds,
        vec![
            InsightKind::LongestStreak,
            InsightKind::Recovery,
            InsightKind::PostWin,
            InsightKind::OptimalLength,
            InsightKind::CurrentStreak,
        ]
    );
    assert_eq!(result.insight_texts().len(), 5);
}

#[test]
fn config_from_toml_drives_analyzer() {
    let config = AnalyzerConfig::from_toml("[insights]\nstrong_recovery = 0.5\n").unwrap();
    let records = journal(&[("2024-01-01", -1.0), ("2024-01-02", 1.0)]);

    let default_tone = analyze(&records).insights[0].tone;
    let tuned_tone = Analyzer::new(config).analyze(&records).insights[0].tone;
    assert_ne!(default_tone, tuned_tone);
}

// ── Host-supplied record types ──

struct HostTrade {
    closed_at: &'static str,
    pct: Option<f64>,
}

impl TradeLike for HostTrade {
    fn timestamp(&self) -> Result<NaiveDateTime, RecordError> {
        parse_timestamp(self.closed_at)
            .ok_or_else(|| RecordError::UnparseableDate(self.closed_at.to_string()))
    }

    fn return_pct(&self) -> Result<f64, RecordError> {
        self.pct
            .ok_or_else(|| RecordError::NonNumericReturn("missing".into()))
    }
}

#[test]
fn host_record_types_via_trait() {
    let trades = vec![
        HostTrade {
            closed_at: "2024-04-02",
            pct: Some(-0.5),
        },
        HostTrade {
            closed_at: "2024-04-01",
            pct: Some(1.0),
        },
        HostTrade {
            closed_at: "2024-04-03",
            pct: None,
        },
    ];
    let result = analyze(&trades);
    assert_eq!(result.summary.total_trades, 2);
    assert_eq!(result.summary.skipped_records, 1);
    assert_eq!(result.current_streak.kind, Some(Outcome::Loss));

    // references work too
    let refs: Vec<&HostTrade> = trades.iter().collect();
    assert_eq!(analyze(&refs), result);
}
