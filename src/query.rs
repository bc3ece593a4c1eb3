//! Listing query assembly for the journal endpoint.
//!
//! Filtering, sorting and pagination are delegated entirely to the server,
//! this module only builds the request parameters and keeps the small
//! amount of client-side state those controls carry: which column is
//! sorted, in which direction, and which page is current.

use chrono::NaiveDate;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::{Side, WinLose};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_SORT_COLUMN: &str = "tanggal";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn flipped(&self) -> SortOrder {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Filter, sort and pagination state for one journal listing.
#[derive(Debug, Clone)]
pub struct JournalQuery {
    pub page: u32,
    pub limit: u32,
    pub pair: Option<String>,
    pub side: Option<Side>,
    pub win_lose: Option<WinLose>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub sort_by: String,
    pub sort_order: SortOrder,
}

impl Default for JournalQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            pair: None,
            side: None,
            win_lose: None,
            date_from: None,
            date_to: None,
            sort_by: DEFAULT_SORT_COLUMN.to_string(),
            sort_order: SortOrder::Asc,
        }
    }
}

impl JournalQuery {
    /// Apply a sort request for `column`.
    ///
    /// Sorting the already-sorted column flips the direction. Sorting a new
    /// column resets the direction to ascending and jumps back to page 1.
    pub fn toggle_sort(&mut self, column: &str) {
        if self.sort_by == column {
            self.sort_order = self.sort_order.flipped();
        } else {
            self.sort_by = column.to_string();
            self.sort_order = SortOrder::Asc;
        }
        self.page = 1;
    }

    /// Move to `page`, clamped to `[1, total_pages]`. A zero `total_pages`
    /// (empty result set) pins the query to page 1.
    pub fn set_page(&mut self, page: u32, total_pages: u32) {
        self.page = page.clamp(1, total_pages.max(1));
    }

    /// Query-string parameters understood by the listing endpoint.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("sort_by", self.sort_by.clone()),
            ("sort_order", self.sort_order.as_str().to_string()),
        ];
        if let Some(pair) = &self.pair {
            params.push(("pair", pair.clone()));
        }
        if let Some(side) = self.side {
            params.push(("side", side.as_str().to_string()));
        }
        if let Some(win_lose) = self.win_lose {
            params.push(("win_lose", win_lose.as_str().to_string()));
        }
        if let Some(from) = self.date_from {
            params.push(("date_from", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.date_to {
            params.push(("date_to", to.format("%Y-%m-%d").to_string()));
        }
        params
    }
}

/// Ticket handed out by [`FetchCoordinator::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Guard against stale responses overwriting newer state.
///
/// Every fetch for the same intent (say, "load journal page") takes a
/// ticket before going out. Starting a new fetch invalidates all earlier
/// tickets, so a slow response that lands after a newer request simply
/// gets dropped instead of winning the race.
#[derive(Debug, Default)]
pub struct FetchCoordinator {
    current: AtomicU64,
}

impl FetchCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query_params() {
        let q = JournalQuery::default();
        let params = q.to_params();
        assert!(params.contains(&("page", "1".to_string())));
        assert!(params.contains(&("limit", "10".to_string())));
        assert!(params.contains(&("sort_by", "tanggal".to_string())));
        assert!(params.contains(&("sort_order", "asc".to_string())));
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn test_toggle_same_column_flips_order() {
        let mut q = JournalQuery::default();
        q.toggle_sort("tanggal");
        assert_eq!(q.sort_order, SortOrder::Desc);
        q.toggle_sort("tanggal");
        assert_eq!(q.sort_order, SortOrder::Asc);
    }

    #[test]
    fn test_toggle_new_column_resets_order_and_page() {
        let mut q = JournalQuery::default();
        q.page = 4;
        q.toggle_sort("tanggal"); // now desc
        q.toggle_sort("profit");
        assert_eq!(q.sort_by, "profit");
        assert_eq!(q.sort_order, SortOrder::Asc);
        assert_eq!(q.page, 1);
    }

    #[test]
    fn test_set_page_clamps() {
        let mut q = JournalQuery::default();
        q.set_page(12, 7);
        assert_eq!(q.page, 7);
        q.set_page(0, 7);
        assert_eq!(q.page, 1);
        q.set_page(3, 0);
        assert_eq!(q.page, 1);
    }

    #[test]
    fn test_filters_serialize_to_params() {
        let q = JournalQuery {
            pair: Some("EURUSD".to_string()),
            side: Some(Side::Sell),
            win_lose: Some(WinLose::Win),
            date_from: NaiveDate::from_ymd_opt(2024, 1, 1),
            date_to: NaiveDate::from_ymd_opt(2024, 1, 31),
            ..Default::default()
        };
        let params = q.to_params();
        assert!(params.contains(&("pair", "EURUSD".to_string())));
        assert!(params.contains(&("side", "sell".to_string())));
        assert!(params.contains(&("win_lose", "win".to_string())));
        assert!(params.contains(&("date_from", "2024-01-01".to_string())));
        assert!(params.contains(&("date_to", "2024-01-31".to_string())));
    }

    #[test]
    fn test_coordinator_invalidates_older_tickets() {
        let coordinator = FetchCoordinator::new();
        let first = coordinator.begin();
        let second = coordinator.begin();
        assert!(!coordinator.is_current(first));
        assert!(coordinator.is_current(second));
    }
}
