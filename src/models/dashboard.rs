use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// P/L for one trading day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyPnl {
    pub date: NaiveDate,
    pub pnl: f64,
}

/// P/L for one ISO week, the week label is backend-formatted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyPnl {
    pub week: String,
    pub pnl: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairPnl {
    pub pair: String,
    pub pnl: f64,
}

/// Server-computed performance snapshot. Everything here is derived
/// upstream and consumed as-is, the client never recomputes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub equity: f64,
    pub total_pnl: f64,
    pub avg_rr: f64,
    pub win_rate: f64,
    pub max_drawdown_percent: f64,
    pub total_trades: i64,
    pub avg_profit_per_trade: f64,
    pub avg_loss_per_trade: f64,
    pub profit_factor: f64,
    pub largest_win: f64,
    pub largest_loss: f64,
    #[serde(default)]
    pub most_traded_pair: String,
    pub consecutive_wins: i64,
    pub consecutive_losses: i64,
    #[serde(default)]
    pub daily: Vec<DailyPnl>,
    #[serde(default)]
    pub weekly: Vec<WeeklyPnl>,
    #[serde(default)]
    pub profit_per_pair: Vec<PairPnl>,
}
