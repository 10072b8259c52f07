use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "partfinderctl",
    version,
    about = "Search the motorcycle parts catalog by vehicle and category"
)]
pub struct Cli {
    /// Path to a partfinder.toml config file
    #[arg(long, global = true, env = "PARTFINDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Load environment overrides from this file instead of ./.env
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Catalog API base URL; overrides the config file and environment
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all brands
    Brands,
    /// List all product categories with their ids
    Categories,
    /// List the models of a brand
    Models {
        /// Brand name, e.g. "KTM"
        #[arg(long)]
        brand: String,
    },
    /// List the production year ranges of a model
    Years {
        #[arg(long)]
        brand: String,
        /// Model name, e.g. "250 SX"
        #[arg(long)]
        model: String,
    },
    /// Search products by vehicle and category
    Search(SearchArgs),
    /// Import a product CSV under a new root category
    Upload {
        /// Semicolon separated product CSV
        #[arg(long)]
        file: PathBuf,
        /// Name of the root category to create
        #[arg(long)]
        category: String,
    },
}

#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Brand name
    #[arg(long)]
    pub brand: Option<String>,

    /// Model name; requires --brand
    #[arg(long, requires = "brand")]
    pub model: Option<String>,

    /// Year range as START-END, or START- when still produced
    #[arg(long, requires = "model")]
    pub year: Option<String>,

    /// Category id
    #[arg(long)]
    pub category: Option<String>,

    /// Result page to show, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}
