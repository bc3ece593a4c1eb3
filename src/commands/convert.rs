use anyhow::Result;
use clap::Args;

use crate::api::fx::{normalize, FrankfurterRates};
use crate::models::ModalType;

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Amount to convert
    #[arg(long)]
    pub amount: f64,
    /// Unit the amount is in (usd/usc/idr)
    #[arg(long)]
    pub unit: String,
}

pub async fn convert(args: &ConvertArgs) -> Result<()> {
    let unit: ModalType = args.unit.parse()?;
    let rates = FrankfurterRates::new();
    let idr = normalize(args.amount, unit, &rates).await?;
    println!("{} {} -> {:.2} IDR", args.amount, unit, idr);
    Ok(())
}
