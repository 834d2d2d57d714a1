//! Checkout
//!
//! Checkout is a point-of-sale engine: it accumulates scanned items into a
//! receipt, resolves prices from a catalog, and computes the payable total
//! after running an ordered set of discount rules.

pub mod catalog;
pub mod checkout;
pub mod discounts;
pub mod fixtures;
pub mod items;
pub mod observer;
pub mod prelude;
pub mod promotions;
pub mod receipt;
pub mod utils;
