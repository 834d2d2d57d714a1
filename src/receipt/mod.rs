//! Receipt
//!
//! The finalized, immutable record of a checkout session, handed to the
//! receipt printer and, once paid, to inventory and financial posting.

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;
use tracing::info;

use crate::receipt::line::ReceiptLine;

pub mod line;

/// Errors raised when settling or writing a receipt.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReceiptError {
    /// Tendered amount does not cover the total.
    #[error("insufficient payment: {tendered} tendered, {due} due")]
    InsufficientPayment {
        /// Amount payable
        due: i64,
        /// Amount tendered
        tendered: i64,
    },

    /// IO error
    #[error("IO error")]
    IO,
}

/// Final receipt for a checkout session.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    lines: Vec<ReceiptLine>,
    subtotal: i64,
    discount: i64,
    total: i64,
    currency: &'static Currency,
}

impl Receipt {
    /// Create a new receipt with the given details.
    #[must_use]
    pub fn new(
        lines: Vec<ReceiptLine>,
        subtotal: i64,
        discount: i64,
        total: i64,
        currency: &'static Currency,
    ) -> Self {
        Self {
            lines,
            subtotal,
            discount,
            total,
            currency,
        }
    }

    /// Lines in scan order, at their final prices.
    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }

    /// `(description, price)` pairs for the receipt printer, in scan order.
    pub fn printable_lines(&self) -> impl Iterator<Item = (&str, i64)> {
        self.lines
            .iter()
            .map(|line| (line.item().description(), line.price()))
    }

    /// Total of catalog prices before any discount
    pub fn subtotal(&self) -> i64 {
        self.subtotal
    }

    /// Flat discount not attributed to individual lines
    pub fn discount(&self) -> i64 {
        self.discount
    }

    /// Amount payable
    pub fn total(&self) -> i64 {
        self.total
    }

    /// Amount payable, in the catalog currency
    pub fn total_money(&self) -> Money<'static, Currency> {
        Money::from_minor(self.total, self.currency)
    }

    /// Savings made by applying discount rules
    pub fn savings(&self) -> i64 {
        self.subtotal - self.total
    }

    /// Currency used for all monetary values
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Confirm payment and produce the posting record for inventory and finance.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::InsufficientPayment`] if `tendered` is below the total.
    pub fn confirm_payment(self, tendered: i64) -> Result<Posting, ReceiptError> {
        if tendered < self.total {
            return Err(ReceiptError::InsufficientPayment {
                due: self.total,
                tendered,
            });
        }

        let entries = self
            .lines
            .iter()
            .map(|line| PostingEntry {
                sku: line.item().sku().to_string(),
                quantity: 1,
                final_price: line.price(),
            })
            .collect();

        let change = tendered - self.total;

        info!(total = self.total, tendered, change, "payment confirmed");

        Ok(Posting {
            entries,
            discount: self.discount,
            total: self.total,
            tendered,
            change,
        })
    }

    /// Writes the receipt as a plain table. Amounts are in minor units.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::IO`] if the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Price", "Paid", "Savings"]);

        for (idx, line) in self.lines.iter().enumerate() {
            let savings = if line.is_discounted() {
                line.savings().to_string()
            } else {
                String::new()
            };

            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.item().description().to_string(),
                line.item().price().to_string(),
                line.price().to_string(),
                savings,
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(
            1,
            HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
        );

        table.with(theme);
        table.modify(Columns::new(2..5), Alignment::right());
        table.modify(Rows::first(), Alignment::center());

        writeln!(out, "{table}").map_err(|_err| ReceiptError::IO)?;

        write_summary(&mut out, self)
    }
}

fn write_summary(out: &mut impl io::Write, receipt: &Receipt) -> Result<(), ReceiptError> {
    let mut rows = vec![("Subtotal:", receipt.subtotal())];

    if receipt.discount() > 0 {
        rows.push(("Discount:", receipt.discount()));
    }

    rows.push(("Total:", receipt.total()));
    rows.push(("Savings:", receipt.savings()));

    let value_width = rows
        .iter()
        .map(|(_, value)| value.to_string().len())
        .max()
        .unwrap_or(0);

    for (label, value) in rows {
        writeln!(out, "{label:>10}  {value:>value_width$}").map_err(|_err| ReceiptError::IO)?;
    }

    Ok(())
}

/// One posted line: SKU, quantity and the price it was sold at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostingEntry {
    /// SKU sold
    pub sku: String,

    /// Quantity sold; always 1 per receipt line
    pub quantity: u32,

    /// Price after line discounts, in minor units
    pub final_price: i64,
}

/// Record handed to inventory and financial posting after payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    /// Posted lines in scan order
    pub entries: Vec<PostingEntry>,

    /// Flat discount not attributed to lines
    pub discount: i64,

    /// Amount paid for the transaction
    pub total: i64,

    /// Amount tendered by the customer
    pub tendered: i64,

    /// Change returned to the customer
    pub change: i64,
}
