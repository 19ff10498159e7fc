use clap::{Parser, Subcommand, ValueEnum};

use crate::utils::formatting::ListingOrder;

#[derive(Parser)]
#[command(name = "online-store")]
#[command(about = "A terminal online store: browse a product catalog, fill a cart and check out")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Catalog file path (pipe-delimited: id|name|price)
    #[arg(short, long, global = true)]
    pub catalog: Option<String>,

    /// Order used for product and cart listings
    #[arg(long, global = true)]
    pub order: Option<ListingOrderArg>,

    /// Exit with an error if the catalog file does not exist
    #[arg(long, global = true)]
    pub require_catalog: bool,

    /// Use plain line prompts even when attached to a terminal
    #[arg(long)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive store (default)
    Shop,
    /// Catalog inspection commands
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// Print the catalog table and exit
    List,
    /// Report problems in the catalog file
    Check,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ListingOrderArg {
    Insertion,
    Reverse,
    Legacy,
}

impl From<ListingOrderArg> for ListingOrder {
    fn from(order: ListingOrderArg) -> Self {
        match order {
            ListingOrderArg::Insertion => ListingOrder::Insertion,
            ListingOrderArg::Reverse => ListingOrder::Reverse,
            ListingOrderArg::Legacy => ListingOrder::Legacy,
        }
    }
}
