#![doc(test(attr(deny(warnings))))]

//! Expense Core keeps a volunteer's expense claims and the organization's
//! client invoices in memory and renders both to downloadable PDF documents.
//! Receipt PDFs attached to invoice-backed expenses are merged verbatim at the
//! end of the expense report.

pub mod clock;
pub mod config;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod import;
pub mod ledger;
pub mod render;
pub mod session;
pub mod utils;

pub use errors::{ExpenseError, ImportError, RenderError, Result, ValidationError};
pub use session::Session;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
