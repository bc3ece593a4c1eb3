use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

use super::pretty_table;
use crate::api::{ApiError, Attachments, JournalApi};
use crate::models::{is_valid_image, JournalEntry, JournalForm};
use crate::query::{JournalQuery, SortOrder};
use crate::stats::PageSummary;

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long, default_value_t = 10)]
    pub limit: u32,
    /// Filter on instrument symbol
    #[arg(long)]
    pub pair: Option<String>,
    /// Filter on side (buy/sell)
    #[arg(long)]
    pub side: Option<String>,
    /// Filter on outcome (win/lose)
    #[arg(long = "result")]
    pub win_lose: Option<String>,
    /// Only trades on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,
    /// Only trades on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
    #[arg(long, default_value = "tanggal")]
    pub sort_by: String,
    /// Sort direction (asc/desc)
    #[arg(long, default_value = "asc")]
    pub order: String,
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| ApiError::Validation {
        field,
        reason: format!("'{}' is not a YYYY-MM-DD date", value),
    })
}

impl ListArgs {
    pub fn to_query(&self) -> Result<JournalQuery, ApiError> {
        let sort_order = match self.order.to_lowercase().as_str() {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            other => {
                return Err(ApiError::Validation {
                    field: "order",
                    reason: format!("expected asc or desc, got '{}'", other),
                })
            }
        };

        Ok(JournalQuery {
            page: self.page.max(1),
            limit: self.limit,
            pair: self.pair.clone(),
            side: self.side.as_deref().map(str::parse).transpose()?,
            win_lose: self.win_lose.as_deref().map(str::parse).transpose()?,
            date_from: self.from.as_deref().map(|d| parse_date("from", d)).transpose()?,
            date_to: self.to.as_deref().map(|d| parse_date("to", d)).transpose()?,
            sort_by: self.sort_by.clone(),
            sort_order,
        })
    }
}

#[derive(Args, Debug)]
pub struct EntryArgs {
    /// Trading capital amount
    #[arg(long)]
    pub modal: String,
    /// Capital unit (usd/usc/idr)
    #[arg(long, default_value = "usd")]
    pub modal_type: String,
    /// Trade date (YYYY-MM-DD)
    #[arg(long)]
    pub tanggal: String,
    #[arg(long)]
    pub pair: String,
    /// buy or sell
    #[arg(long)]
    pub side: String,
    #[arg(long)]
    pub lot: String,
    #[arg(long)]
    pub entry: Option<String>,
    #[arg(long)]
    pub take_profit: Option<String>,
    #[arg(long)]
    pub stop_loss: Option<String>,
    #[arg(long)]
    pub reason: Option<String>,
    /// Outcome (win/lose/draw); determines the profit sign
    #[arg(long = "result")]
    pub win_lose: Option<String>,
    /// Profit magnitude, sign derived from the outcome
    #[arg(long)]
    pub profit: Option<String>,
    /// Path to the "before" analysis screenshot
    #[arg(long)]
    pub before: Option<PathBuf>,
    /// Path to the "after" analysis screenshot
    #[arg(long)]
    pub after: Option<PathBuf>,
}

impl EntryArgs {
    fn to_form(&self) -> JournalForm {
        JournalForm {
            modal: self.modal.clone(),
            modal_type: self.modal_type.clone(),
            tanggal: self.tanggal.clone(),
            pair: self.pair.clone(),
            side: self.side.clone(),
            lot: self.lot.clone(),
            harga_entry: self.entry.clone(),
            harga_take_profit: self.take_profit.clone(),
            harga_stop_loss: self.stop_loss.clone(),
            reason: self.reason.clone(),
            win_lose: self.win_lose.clone(),
            profit: self.profit.clone(),
        }
    }

    fn attachments(&self) -> Attachments {
        Attachments {
            before: self.before.clone(),
            after: self.after.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Id of the entry to replace
    #[arg(long)]
    pub id: String,
    #[command(flatten)]
    pub entry: EntryArgs,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[arg(long)]
    pub id: String,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub filter: ListArgs,
    /// Output CSV file
    #[arg(long)]
    pub out: PathBuf,
}

fn image_cell(url: Option<&str>) -> String {
    if is_valid_image(url) {
        url.unwrap_or_default().to_string()
    } else {
        "-".to_string()
    }
}

fn entry_row(entry: &JournalEntry) -> Vec<String> {
    vec![
        entry.tanggal.format("%Y-%m-%d").to_string(),
        entry.pair.clone(),
        entry.side.as_str().to_string(),
        format!("{:.2}", entry.lot),
        entry
            .harga_entry
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string()),
        entry
            .harga_take_profit
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string()),
        entry
            .harga_stop_loss
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string()),
        entry.win_lose.as_str().to_uppercase(),
        format!("{:.2}", entry.profit),
        image_cell(entry.analisa_before.as_deref()),
        image_cell(entry.analisa_after.as_deref()),
    ]
}

pub async fn list(api: &dyn JournalApi, args: &ListArgs) -> Result<()> {
    let query = args.to_query()?;
    let page = api.list_journal(&query).await?;

    if page.data.is_empty() {
        println!("No journal entries found.");
        return Ok(());
    }

    let rows = page.data.iter().map(entry_row).collect();
    println!(
        "{}",
        pretty_table(
            &[
                "Date", "Pair", "Side", "Lot", "Entry", "TP", "SL", "Result", "Profit", "Before",
                "After"
            ],
            rows,
        )
    );

    let summary = PageSummary::from_entries(&page.data);
    println!(
        "Page {} of {} ({} entries total)",
        page.page, page.total_pages, page.total
    );
    println!(
        "This page: {} wins / {} losses, win rate {:.1}%, P/L {:.2}",
        summary.wins,
        summary.losses,
        summary.win_rate(),
        summary.total_profit
    );
    for pair in &summary.profit_per_pair {
        println!("  {}: {:.2}", pair.pair, pair.profit);
    }
    Ok(())
}

pub async fn add(api: &dyn JournalApi, args: &EntryArgs) -> Result<()> {
    let draft = args.to_form().validate()?;
    let entry = api.create_journal(&draft, &args.attachments()).await?;
    println!("Created journal entry {} ({})", entry.id, entry.pair);
    Ok(())
}

pub async fn edit(api: &dyn JournalApi, args: &EditArgs) -> Result<()> {
    let draft = args.entry.to_form().validate()?;
    let entry = api
        .update_journal(&args.id, &draft, &args.entry.attachments())
        .await?;
    println!("Updated journal entry {}", entry.id);
    Ok(())
}

pub async fn delete(api: &dyn JournalApi, args: &DeleteArgs) -> Result<()> {
    let ack = api.delete_journal(&args.id).await?;
    println!("{}", ack.message);
    Ok(())
}

/// Write the filtered listing to CSV.
pub async fn export(api: &dyn JournalApi, args: &ExportArgs) -> Result<()> {
    let query = args.filter.to_query()?;
    let page = api.list_journal(&query).await?;

    let mut writer = csv::Writer::from_path(&args.out)?;
    writer.write_record([
        "id",
        "tanggal",
        "pair",
        "side",
        "lot",
        "modal",
        "modal_type",
        "harga_entry",
        "harga_take_profit",
        "harga_stop_loss",
        "win_lose",
        "profit",
        "reason",
    ])?;
    for entry in &page.data {
        writer.write_record([
            entry.id.clone(),
            entry.tanggal.format("%Y-%m-%d").to_string(),
            entry.pair.clone(),
            entry.side.as_str().to_string(),
            entry.lot.to_string(),
            entry.modal.to_string(),
            entry.modal_type.as_str().to_string(),
            entry.harga_entry.map(|v| v.to_string()).unwrap_or_default(),
            entry
                .harga_take_profit
                .map(|v| v.to_string())
                .unwrap_or_default(),
            entry
                .harga_stop_loss
                .map(|v| v.to_string())
                .unwrap_or_default(),
            entry.win_lose.as_str().to_string(),
            entry.profit.to_string(),
            entry.reason.clone(),
        ])?;
    }
    writer.flush()?;
    println!("Exported {} entries to {}", page.data.len(), args.out.display());
    Ok(())
}
