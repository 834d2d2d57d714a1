//! Utils

use clap::Parser;

/// Arguments for the till demo
#[derive(Debug, Parser)]
pub struct ExampleTillArgs {
    /// Fixture set to use for the catalog, promotions and scan list
    #[clap(short, long, default_value = "kassa")]
    pub fixture: String,

    /// Directory holding the fixture sets
    #[clap(short, long, default_value = "./fixtures")]
    pub base_path: String,

    /// Extra SKUs to scan after the fixture scan list
    #[clap(short, long)]
    pub scan: Vec<String>,

    /// Amount tendered, in minor units; defaults to the exact total
    #[clap(short, long)]
    pub tendered: Option<i64>,
}
