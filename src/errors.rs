use std::result::Result as StdResult;

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::{ExpenseId, InvoiceId};

/// Rejected input for a record or a render request. Raised before anything is
/// stored, so the ledgers are never left half-updated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("amount must not be negative")]
    NegativeAmount,
    #[error("an invoice expense needs a receipt attachment")]
    MissingAttachment,
    #[error("distance must be greater than zero")]
    NonPositiveDistance,
    #[error("value must not exceed {}", crate::domain::MAX_INPUT_VALUE)]
    ValueTooLarge,
    #[error("invoice number must not be empty")]
    EmptyInvoiceNumber,
    #[error("customer name must not be empty")]
    EmptyCustomerName,
    #[error("quantity must be greater than zero")]
    NonPositiveQuantity,
    #[error("unit price must not be negative")]
    NegativeUnitPrice,
    #[error("an invoice needs at least one line")]
    NoInvoiceLines,
    #[error("volunteer name must not be empty")]
    EmptyVolunteerName,
    #[error("add at least one expense before generating the report")]
    NoExpenses,
}

/// Failure of a bulk import as a whole. Individual malformed lines are only
/// counted, never raised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("no expense could be imported ({errors} malformed line(s))")]
    NothingImported { errors: usize },
}

/// Failure while composing or saving a PDF document.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF drawing failed: {0}")]
    Pdf(String),
    #[error("PDF structure error: {0}")]
    Structure(#[from] lopdf::Error),
    #[error("attachment is not a readable PDF: {0}")]
    UnreadableAttachment(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Unified error type for session-level operations.
#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("expense not found: {0}")]
    ExpenseNotFound(ExpenseId),
    #[error("invoice not found: {0}")]
    InvoiceNotFound(InvoiceId),
}

pub type Result<T> = StdResult<T, ExpenseError>;
