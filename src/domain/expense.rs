use std::{fmt, fs, io, path::Path};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::common::{within_bounds, Displayable, ExpenseId, Identifiable};
use crate::errors::ValidationError;

/// A receipt supplied by the volunteer. The bytes are kept opaque until the
/// report is rendered; nothing checks that they really are a PDF here.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    name: String,
    #[serde(skip_serializing)]
    data: Vec<u8>,
}

impl Attachment {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            data,
        }
    }

    /// Reads a receipt from disk, keeping its file name.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let data = fs::read(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, data))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("name", &self.name)
            .field("len", &self.data.len())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseKind {
    Invoice,
    Mileage,
}

impl ExpenseKind {
    /// Label printed in the report's "Type" column.
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseKind::Invoice => "Facture",
            ExpenseKind::Mileage => "Kilométrage",
        }
    }
}

/// Variant-specific fields. Exactly one variant is ever populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExpenseDetails {
    Invoice {
        amount: Decimal,
        attachment: Attachment,
    },
    Mileage {
        distance_km: Decimal,
        date: NaiveDate,
    },
}

impl ExpenseDetails {
    pub fn kind(&self) -> ExpenseKind {
        match self {
            ExpenseDetails::Invoice { .. } => ExpenseKind::Invoice,
            ExpenseDetails::Mileage { .. } => ExpenseKind::Mileage,
        }
    }

    /// Reimbursable amount: the receipt amount, or distance × rate.
    pub fn contribution(&self, mileage_rate: Decimal) -> Decimal {
        match self {
            ExpenseDetails::Invoice { amount, .. } => *amount,
            ExpenseDetails::Mileage { distance_km, .. } => *distance_km * mileage_rate,
        }
    }
}

/// A validated expense that has not been given an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewExpense {
    description: String,
    #[serde(flatten)]
    details: ExpenseDetails,
}

impl NewExpense {
    pub fn invoice(
        description: impl Into<String>,
        amount: Decimal,
        attachment: Attachment,
    ) -> Result<Self, ValidationError> {
        let description = checked_description(description.into())?;
        if amount < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount);
        }
        let amount = within_bounds(amount)?;
        if attachment.name().is_empty() || attachment.is_empty() {
            return Err(ValidationError::MissingAttachment);
        }
        Ok(Self {
            description,
            details: ExpenseDetails::Invoice { amount, attachment },
        })
    }

    pub fn mileage(
        description: impl Into<String>,
        distance_km: Decimal,
        date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let description = checked_description(description.into())?;
        if distance_km <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveDistance);
        }
        let distance_km = within_bounds(distance_km)?;
        Ok(Self {
            description,
            details: ExpenseDetails::Mileage { distance_km, date },
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn details(&self) -> &ExpenseDetails {
        &self.details
    }

    pub fn kind(&self) -> ExpenseKind {
        self.details.kind()
    }

    pub(crate) fn into_record(self, id: ExpenseId) -> ExpenseRecord {
        ExpenseRecord {
            id,
            description: self.description,
            details: self.details,
        }
    }
}

/// An expense stored in a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseRecord {
    id: ExpenseId,
    description: String,
    #[serde(flatten)]
    details: ExpenseDetails,
}

impl ExpenseRecord {
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn details(&self) -> &ExpenseDetails {
        &self.details
    }

    pub fn kind(&self) -> ExpenseKind {
        self.details.kind()
    }

    pub fn contribution(&self, mileage_rate: Decimal) -> Decimal {
        self.details.contribution(mileage_rate)
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        match &self.details {
            ExpenseDetails::Invoice { attachment, .. } => Some(attachment),
            ExpenseDetails::Mileage { .. } => None,
        }
    }
}

impl Identifiable for ExpenseRecord {
    type Id = ExpenseId;

    fn id(&self) -> ExpenseId {
        self.id
    }
}

impl Displayable for ExpenseRecord {
    fn display_label(&self) -> String {
        format!("expense:{} [{:?}] {}", self.id, self.kind(), self.description)
    }
}

fn checked_description(description: String) -> Result<String, ValidationError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    Ok(trimmed.to_string())
}
