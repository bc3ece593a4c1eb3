use anyhow::Result;
use clap::Args;

use crate::api::JournalApi;
use crate::models::PairQuery;

#[derive(Args, Debug)]
pub struct PairsArgs {
    /// Asset class filter (crypto/forex/commodity)
    #[arg(long = "type")]
    pub pair_type: Option<String>,
    /// Substring filter on the symbol
    #[arg(long)]
    pub search: Option<String>,
}

pub async fn pairs(api: &dyn JournalApi, args: &PairsArgs) -> Result<()> {
    let query = PairQuery {
        pair_type: args.pair_type.as_deref().map(str::parse).transpose()?,
        search: args.search.clone(),
    };
    let catalog = api.list_pairs(&query).await?;

    if catalog.pairs.is_empty() {
        println!("No pairs matched.");
        return Ok(());
    }
    for pair in &catalog.pairs {
        println!("{}", pair);
    }
    println!("{} pairs", catalog.total);
    Ok(())
}
