//! Promotion Types

mod bundle_price;
mod group_second_free;
mod nth_item_free;

pub use bundle_price::*;
pub use group_second_free::*;
pub use nth_item_free::*;
