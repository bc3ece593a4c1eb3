//! Equity curve construction.
//!
//! Two modes exist because the dashboard and the journal listing feed the
//! chart from different shapes of data. Mode A rebuilds the curve from the
//! dashboard's daily P/L series and known final equity, Mode B walks a
//! flat trade list. Both are pure functions of their input.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{DailyPnl, JournalEntry};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

/// Mode A: accumulate the dashboard's daily P/L series.
///
/// The series is sorted ascending by date and seeded with the starting
/// equity back-computed as `final_equity - total_pnl`, so the last point
/// lands exactly on the known final equity when the series covers the
/// full period. Accumulation is plain f64 addition, rounding is left to
/// display formatting.
pub fn curve_from_daily(daily: &[DailyPnl], final_equity: f64, total_pnl: f64) -> Vec<EquityPoint> {
    if daily.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<&DailyPnl> = daily.iter().collect();
    sorted.sort_by_key(|d| d.date);

    let mut cumulative = final_equity - total_pnl;
    sorted
        .into_iter()
        .map(|d| {
            cumulative += d.pnl;
            EquityPoint {
                date: d.date,
                equity: cumulative,
            }
        })
        .collect()
}

/// Mode B: accumulate profit over a trade list assumed pre-sorted
/// ascending by date. Seeded at zero, one point per trade.
pub fn curve_from_entries(entries: &[JournalEntry]) -> Vec<EquityPoint> {
    let mut cumulative = 0.0;
    entries
        .iter()
        .map(|e| {
            cumulative += e.profit;
            EquityPoint {
                date: e.tanggal,
                equity: cumulative,
            }
        })
        .collect()
}
