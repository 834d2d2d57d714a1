//! Checkout Observer
//!
//! Callbacks for surfaces that follow a session as it happens, such as the
//! customer display showing each article and its price as it is scanned.

use crate::{discounts::DiscountOutcome, receipt::line::ReceiptLine};

/// Observer notified by the checkout as lines are scanned and totals computed.
///
/// Only `on_scan` is required; the other callbacks default to doing nothing.
pub trait CheckoutObserver {
    /// Called after a line has been appended to the session.
    fn on_scan(&mut self, line: &ReceiptLine);

    /// Called after a rule has been applied during a total calculation.
    fn on_rule_applied(&mut self, _rule: &str, _outcome: &DiscountOutcome) {}

    /// Called with the payable total once it has been computed.
    fn on_total(&mut self, _total: i64) {}
}

/// Observer that ignores every callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl CheckoutObserver for NoopObserver {
    fn on_scan(&mut self, _line: &ReceiptLine) {}
}

#[cfg(test)]
mod tests {
    use crate::items::Item;

    use super::*;

    #[derive(Debug, Default)]
    struct Display {
        shown: Vec<(String, i64)>,
    }

    impl CheckoutObserver for Display {
        fn on_scan(&mut self, line: &ReceiptLine) {
            self.shown
                .push((line.item().description().to_string(), line.price()));
        }
    }

    #[test]
    fn default_callbacks_are_callable() {
        let mut display = Display::default();
        let observer: &mut dyn CheckoutObserver = &mut display;

        observer.on_scan(&ReceiptLine::new(
            Item::new("4001", "Brood", "", "Brood volkoren", 195),
            0,
        ));
        observer.on_rule_applied("none", &DiscountOutcome::none());
        observer.on_total(195);

        assert_eq!(display.shown, vec![("Brood volkoren".to_string(), 195)]);
    }

    #[test]
    fn noop_observer_accepts_callbacks() {
        let mut observer = NoopObserver;

        observer.on_rule_applied("none", &DiscountOutcome::none());
        observer.on_total(0);
    }
}
