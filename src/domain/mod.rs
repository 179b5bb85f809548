//! Expense and invoice records. Validation happens when a record is built, so
//! anything that reaches a ledger is already well-formed.

pub mod common;
pub mod expense;
pub mod invoice;

pub use common::{
    Displayable, ExpenseId, IdSequence, Identifiable, InvoiceId, LineItemId, MAX_INPUT_VALUE,
};
pub use expense::{Attachment, ExpenseDetails, ExpenseKind, ExpenseRecord, NewExpense};
pub use invoice::{InvoiceDraft, InvoiceLineItem, InvoiceRecord, NewInvoice};

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use rust_decimal;
