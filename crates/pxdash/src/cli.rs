use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch prices for the universe, derive the change columns, and
    /// serve the dashboard over local HTTP.
    Serve {
        /// CSV file listing the security universe (header: SEDOL).
        #[arg(long, default_value = "./securities.csv")]
        universe: PathBuf,
    },

    /// Run the pipeline without the web process; log the derived table.
    Fetch {
        /// CSV file listing the security universe (header: SEDOL).
        #[arg(long, default_value = "./securities.csv")]
        universe: PathBuf,
    },
}
