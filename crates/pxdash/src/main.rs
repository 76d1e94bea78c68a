use anyhow::Result;
use clap::Parser;
use pxdash_data::client_ext::ClientExt;
use pxdash_data::table::{self, PriceRow};
use pxdash_data::universe;
use std::path::Path;

mod cli;

fn preprocess() {
    // grant access to .env
    dotenv::dotenv().ok();

    // initialise logger
    env_logger::init();
}

fn client() -> Result<reqwest::Client> {
    let client = reqwest::ClientBuilder::new()
        .user_agent(&std::env::var("USER_AGENT")?)
        .build()?;
    Ok(client)
}

#[tokio::main]
async fn main() -> Result<()> {
    preprocess();
    let cli = cli::Cli::parse();
    log::info!("Command line input recorded: {cli:#?}");

    // cli framework:
    // "> pxdash <COMMAND>"
    match &cli.command {
        // "> pxdash serve"
        // full pipeline: load -> fetch -> derive -> serve
        cli::Commands::Serve { universe } => {
            let table = collect(universe).await?;
            pxdash_app::serve(table).await?;
        }

        // "> pxdash fetch"
        // pipeline without the web process; log the derived table
        cli::Commands::Fetch { universe } => {
            let table = collect(universe).await?;
            for row in &table {
                log::info!(
                    "[{}] price: {:?} | dated: {:?} | change: {:?} | highlight: {}",
                    row.sedol,
                    row.price,
                    row.dated,
                    row.change,
                    row.highlight,
                );
            }
        }
    }

    Ok(())
}

/// Load the universe, fetch its quotes, and derive the change columns.
async fn collect(universe: &Path) -> Result<Vec<PriceRow>> {
    let sedols = universe::load(universe)?;
    log::info!("Universe loaded: {} securities", sedols.len());

    let base = std::env::var("MARKET_DATA_URL")?;
    let client = client()?;
    let series = client.fetch_universe(&base, &sedols).await?;
    log::info!("Quotes collected for {} securities", series.len());

    Ok(table::build_table(&series))
}
