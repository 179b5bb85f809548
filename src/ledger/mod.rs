//! In-memory ledgers owning the session's expenses and invoices.

pub mod expense_ledger;
pub mod invoice_ledger;

pub use expense_ledger::ExpenseLedger;
pub use invoice_ledger::InvoiceLedger;
