//! Till Example
//!
//! Scans a fixture scan list through a checkout session, echoing each line to a
//! console customer display, then prints the receipt and the posting record.
//!
//! Use `-f` to load a fixture set by name
//! Use `-s` to scan extra SKUs after the fixture scan list
//! Use `-t` to tender an amount in minor units
//!
//! Set `RUST_LOG=checkout=debug` to follow rule evaluation.

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use checkout::{
    fixtures::Fixture, observer::CheckoutObserver, receipt::line::ReceiptLine,
    utils::ExampleTillArgs,
};

/// Customer display that echoes each scanned line.
#[derive(Debug)]
struct ConsoleDisplay;

impl CheckoutObserver for ConsoleDisplay {
    #[expect(clippy::print_stdout, reason = "Example code")]
    fn on_scan(&mut self, line: &ReceiptLine) {
        println!("{:<24}{:>8}", line.item().description(), line.price());
    }

    #[expect(clippy::print_stdout, reason = "Example code")]
    fn on_total(&mut self, total: i64) {
        println!("{:<24}{:>8}", "TOTAL", total);
    }
}

/// Till Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = ExampleTillArgs::parse();

    let fixture = Fixture::from_set_in(&args.fixture, &args.base_path)?;
    let mut checkout = fixture.checkout()?;
    let mut display = ConsoleDisplay;

    for sku in fixture.items().iter().chain(&args.scan) {
        if let Err(err) = checkout.scan_with_observer(sku, &mut display) {
            warn!(%err, "rescan or look up the item manually");
        }
    }

    checkout.total_with_observer(&mut display)?;

    let receipt = checkout.finalize()?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    receipt.write_to(&mut handle)?;

    let tendered = args.tendered.unwrap_or_else(|| receipt.total());
    let posting = receipt.confirm_payment(tendered)?;

    println!("\nPosted {} lines, change {}", posting.entries.len(), posting.change);

    Ok(())
}
