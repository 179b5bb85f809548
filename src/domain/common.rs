use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::errors::ValidationError;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    type Id: Copy + Eq;

    fn id(&self) -> Self::Id;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Identifier of an expense within one [`ExpenseLedger`](crate::ledger::ExpenseLedger).
    ExpenseId
);
record_id!(
    /// Identifier of an invoice within one [`InvoiceLedger`](crate::ledger::InvoiceLedger).
    InvoiceId
);
record_id!(
    /// Identifier of a line within its parent invoice.
    LineItemId
);

/// Monotonic id source. Never rewinds, so ids freed by a delete are not
/// handed out again.
#[derive(Debug, Clone)]
pub struct IdSequence {
    next: u64,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdSequence {
    pub fn next_id<T: From<u64>>(&mut self) -> T {
        let id = self.next;
        self.next += 1;
        T::from(id)
    }
}

/// Largest amount, distance, quantity or unit price accepted from input.
/// Products and ledger sums of bounded values stay far inside `Decimal`'s range.
pub const MAX_INPUT_VALUE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

pub(crate) fn within_bounds(value: Decimal) -> Result<Decimal, ValidationError> {
    if value > MAX_INPUT_VALUE {
        return Err(ValidationError::ValueTooLarge);
    }
    Ok(value)
}

/// Trims `value` and returns `None` when nothing is left.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
