use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "catalogbot")]
#[command(author, version, about = "Telegram bot that keeps a product catalog per chat", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot (long polling)
    Run,

    /// Check the catalog file: permissions, parseability, products per chat
    CheckStorage {
        /// Catalog file to check instead of CATALOG_FILE
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
