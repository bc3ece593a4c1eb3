//! Per-page aggregates over a loaded journal listing.
//!
//! These are statistics for the entries currently in hand, not for the
//! full filtered result set. True account-wide totals come from the
//! dashboard endpoint, so anything rendered from here is labeled as a
//! page statistic.

use crate::models::{JournalEntry, WinLose};

#[derive(Debug, Clone, PartialEq)]
pub struct PairProfit {
    pub pair: String,
    pub profit: f64,
}

/// Synchronous reduction over one page of entries.
#[derive(Debug, Clone, Default)]
pub struct PageSummary {
    pub entries: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub total_profit: f64,
    /// Profit grouped by pair, first-seen order preserved
    pub profit_per_pair: Vec<PairProfit>,
}

impl PageSummary {
    pub fn from_entries(entries: &[JournalEntry]) -> Self {
        let mut summary = PageSummary {
            entries: entries.len(),
            ..Default::default()
        };

        for entry in entries {
            match entry.win_lose {
                WinLose::Win => summary.wins += 1,
                WinLose::Lose => summary.losses += 1,
                WinLose::Draw => summary.draws += 1,
                WinLose::Unset => {}
            }
            summary.total_profit += entry.profit;

            match summary
                .profit_per_pair
                .iter_mut()
                .find(|p| p.pair == entry.pair)
            {
                Some(existing) => existing.profit += entry.profit,
                None => summary.profit_per_pair.push(PairProfit {
                    pair: entry.pair.clone(),
                    profit: entry.profit,
                }),
            }
        }

        summary
    }

    /// Percentage of wins among the loaded entries, 0.0 for an empty page.
    pub fn win_rate(&self) -> f64 {
        self.wins as f64 / (self.entries.max(1)) as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ModalType, Side};
    use chrono::{NaiveDate, Utc};

    fn entry(pair: &str, win_lose: WinLose, profit: f64) -> JournalEntry {
        JournalEntry {
            id: "j1".to_string(),
            user_id: "u1".to_string(),
            modal: 1000.0,
            modal_type: ModalType::Usd,
            tanggal: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            pair: pair.to_string(),
            side: Side::Buy,
            lot: 0.1,
            harga_entry: None,
            harga_take_profit: None,
            harga_stop_loss: None,
            analisa_before: None,
            analisa_after: None,
            reason: String::new(),
            win_lose,
            profit,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_page_has_zero_win_rate() {
        let summary = PageSummary::from_entries(&[]);
        assert_eq!(summary.win_rate(), 0.0);
        assert!(!summary.win_rate().is_nan());
        assert_eq!(summary.total_profit, 0.0);
    }

    #[test]
    fn test_counts_and_total_profit() {
        let entries = vec![
            entry("EURUSD", WinLose::Win, 10.0),
            entry("EURUSD", WinLose::Lose, -3.0),
            entry("BTCUSD", WinLose::Win, 5.0),
            entry("XAUUSD", WinLose::Unset, 0.0),
        ];
        let summary = PageSummary::from_entries(&entries);
        assert_eq!(summary.wins, 2);
        assert_eq!(summary.losses, 1);
        assert_eq!(summary.draws, 0);
        assert_eq!(summary.total_profit, 12.0);
        assert_eq!(summary.win_rate(), 50.0);
    }

    #[test]
    fn test_profit_per_pair_preserves_first_seen_order() {
        let entries = vec![
            entry("EURUSD", WinLose::Win, 10.0),
            entry("EURUSD", WinLose::Lose, -3.0),
            entry("BTCUSD", WinLose::Win, 5.0),
        ];
        let summary = PageSummary::from_entries(&entries);
        assert_eq!(
            summary.profit_per_pair,
            vec![
                PairProfit {
                    pair: "EURUSD".to_string(),
                    profit: 7.0
                },
                PairProfit {
                    pair: "BTCUSD".to_string(),
                    profit: 5.0
                },
            ]
        );
    }
}
