use anyhow::Result;
use clap::Args;

use super::pretty_table;
use crate::api::JournalApi;
use crate::query::{JournalQuery, SortOrder, DEFAULT_SORT_COLUMN};
use crate::stats::{curve_from_daily, curve_from_entries, EquityPoint};

pub async fn dashboard(api: &dyn JournalApi) -> Result<()> {
    let snapshot = api.dashboard().await?;

    let rows = vec![
        vec!["Equity".to_string(), format!("{:.2}", snapshot.equity)],
        vec!["Total P/L".to_string(), format!("{:.2}", snapshot.total_pnl)],
        vec!["Avg risk/reward".to_string(), format!("{:.2}", snapshot.avg_rr)],
        vec!["Win rate".to_string(), format!("{:.1}%", snapshot.win_rate)],
        vec![
            "Max drawdown".to_string(),
            format!("{:.1}%", snapshot.max_drawdown_percent),
        ],
        vec!["Trades".to_string(), snapshot.total_trades.to_string()],
        vec![
            "Avg profit/trade".to_string(),
            format!("{:.2}", snapshot.avg_profit_per_trade),
        ],
        vec![
            "Avg loss/trade".to_string(),
            format!("{:.2}", snapshot.avg_loss_per_trade),
        ],
        vec![
            "Profit factor".to_string(),
            format!("{:.2}", snapshot.profit_factor),
        ],
        vec!["Largest win".to_string(), format!("{:.2}", snapshot.largest_win)],
        vec!["Largest loss".to_string(), format!("{:.2}", snapshot.largest_loss)],
        vec!["Most traded pair".to_string(), snapshot.most_traded_pair.clone()],
        vec![
            "Streak".to_string(),
            format!(
                "{} wins / {} losses",
                snapshot.consecutive_wins, snapshot.consecutive_losses
            ),
        ],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], rows));

    if !snapshot.profit_per_pair.is_empty() {
        let rows = snapshot
            .profit_per_pair
            .iter()
            .map(|p| vec![p.pair.clone(), format!("{:.2}", p.pnl)])
            .collect();
        println!("{}", pretty_table(&["Pair", "P/L"], rows));
    }
    Ok(())
}

#[derive(Args, Debug)]
pub struct EquityArgs {
    /// Accumulate the journal listing instead of the dashboard's daily series
    #[arg(long)]
    pub from_trades: bool,
    /// Number of trades to fetch with --from-trades
    #[arg(long, default_value_t = 500)]
    pub limit: u32,
}

pub async fn equity(api: &dyn JournalApi, args: &EquityArgs) -> Result<()> {
    let curve = if args.from_trades {
        // Listing sorted ascending by date so the walk is chronological
        let query = JournalQuery {
            limit: args.limit,
            sort_by: DEFAULT_SORT_COLUMN.to_string(),
            sort_order: SortOrder::Asc,
            ..Default::default()
        };
        let page = api.list_journal(&query).await?;
        curve_from_entries(&page.data)
    } else {
        let snapshot = api.dashboard().await?;
        curve_from_daily(&snapshot.daily, snapshot.equity, snapshot.total_pnl)
    };

    print_curve(&curve);
    Ok(())
}

fn print_curve(curve: &[EquityPoint]) {
    if curve.is_empty() {
        println!("No data to chart.");
        return;
    }
    let rows = curve
        .iter()
        .map(|p| {
            vec![
                p.date.format("%Y-%m-%d").to_string(),
                format!("{:.2}", p.equity),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Date", "Equity"], rows));
}
