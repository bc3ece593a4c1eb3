pub mod equity;
pub mod summary;

pub use equity::{curve_from_daily, curve_from_entries, EquityPoint};
pub use summary::{PageSummary, PairProfit};
