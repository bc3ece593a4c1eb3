use anyhow::Result;
use clap::{Parser, Subcommand};

use tradelog::api::BackendClient;
use tradelog::commands;
use tradelog::commands::convert::ConvertArgs;
use tradelog::commands::dashboard::EquityArgs;
use tradelog::commands::journal::{DeleteArgs, EditArgs, EntryArgs, ExportArgs, ListArgs};
use tradelog::commands::login::LoginArgs;
use tradelog::commands::pairs::PairsArgs;
use tradelog::config::Config;
use tradelog::session::SessionStore;

#[derive(Parser, Debug)]
#[command(name = "tradelog", version, about = "Trading journal client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Authenticate and persist the session
    Login(LoginArgs),
    /// Clear the persisted session
    Logout,
    /// List journal entries with filters, sorting and pagination
    List(ListArgs),
    /// Log a new trade
    Add(EntryArgs),
    /// Replace an existing trade
    Edit(EditArgs),
    /// Delete a trade by id
    Delete(DeleteArgs),
    /// Export the filtered listing to CSV
    Export(ExportArgs),
    /// List tradable instrument symbols
    Pairs(PairsArgs),
    /// Show the server-computed performance snapshot
    Dashboard,
    /// Print the equity curve
    Equity(EquityArgs),
    /// Convert a capital amount to IDR at the live rate
    Convert(ConvertArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    // Conversion only talks to the public rate API, no backend needed
    if let Command::Convert(args) = &cli.command {
        return commands::convert::convert(args).await;
    }

    let config = Config::from_env()?;
    let store = SessionStore::open()?;
    let mut client = BackendClient::new(&config.base_url, &config.api_key, store)?;

    match &cli.command {
        Command::Login(args) => commands::login::login(&mut client, args).await,
        Command::Logout => commands::login::logout(&mut client),
        Command::List(args) => commands::journal::list(&client, args).await,
        Command::Add(args) => commands::journal::add(&client, args).await,
        Command::Edit(args) => commands::journal::edit(&client, args).await,
        Command::Delete(args) => commands::journal::delete(&client, args).await,
        Command::Export(args) => commands::journal::export(&client, args).await,
        Command::Pairs(args) => commands::pairs::pairs(&client, args).await,
        Command::Dashboard => commands::dashboard::dashboard(&client).await,
        Command::Equity(args) => commands::dashboard::equity(&client, args).await,
        Command::Convert(_) => unreachable!(),
    }
}
