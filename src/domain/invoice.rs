use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::common::{
    non_blank, within_bounds, Displayable, IdSequence, Identifiable, InvoiceId, LineItemId,
};
use crate::errors::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceLineItem {
    id: LineItemId,
    description: String,
    quantity: Decimal,
    unit_price: Decimal,
}

impl InvoiceLineItem {
    fn new(
        id: LineItemId,
        description: String,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Result<Self, ValidationError> {
        let description = description.trim().to_string();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        if quantity <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveQuantity);
        }
        if unit_price < Decimal::ZERO {
            return Err(ValidationError::NegativeUnitPrice);
        }
        let quantity = within_bounds(quantity)?;
        let unit_price = within_bounds(unit_price)?;
        Ok(Self {
            id,
            description,
            quantity,
            unit_price,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn line_total(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

impl Identifiable for InvoiceLineItem {
    type Id = LineItemId;

    fn id(&self) -> LineItemId {
        self.id
    }
}

fn lines_total(lines: &[InvoiceLineItem]) -> Decimal {
    lines.iter().map(InvoiceLineItem::line_total).sum()
}

/// An invoice being edited. Lines may be empty here; [`InvoiceDraft::finalize`]
/// is where the header and the line count are checked.
#[derive(Debug, Clone)]
pub struct InvoiceDraft {
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub customer_name: String,
    pub customer_address: Option<String>,
    pub comments: Option<String>,
    lines: Vec<InvoiceLineItem>,
    line_ids: IdSequence,
}

impl InvoiceDraft {
    /// Starts a draft dated `today` with the default invoice number.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            invoice_number: Self::default_invoice_number(today),
            invoice_date: today,
            customer_name: String::new(),
            customer_address: None,
            comments: None,
            lines: Vec::new(),
            line_ids: IdSequence::default(),
        }
    }

    /// `{year}-{month:02}-0001`.
    pub fn default_invoice_number(date: NaiveDate) -> String {
        format!("{}-{:02}-0001", date.year(), date.month())
    }

    pub fn add_line(
        &mut self,
        description: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Result<LineItemId, ValidationError> {
        let line = InvoiceLineItem::new(
            self.line_ids.next_id(),
            description.into(),
            quantity,
            unit_price,
        )?;
        let id = line.id;
        self.lines.push(line);
        Ok(id)
    }

    /// Removes a line; unknown ids are ignored.
    pub fn remove_line(&mut self, id: LineItemId) -> Option<InvoiceLineItem> {
        let index = self.lines.iter().position(|line| line.id == id)?;
        Some(self.lines.remove(index))
    }

    pub fn lines(&self) -> &[InvoiceLineItem] {
        &self.lines
    }

    pub fn total(&self) -> Decimal {
        lines_total(&self.lines)
    }

    pub fn finalize(self) -> Result<NewInvoice, ValidationError> {
        let invoice_number = self.invoice_number.trim().to_string();
        if invoice_number.is_empty() {
            return Err(ValidationError::EmptyInvoiceNumber);
        }
        let customer_name = self.customer_name.trim().to_string();
        if customer_name.is_empty() {
            return Err(ValidationError::EmptyCustomerName);
        }
        if self.lines.is_empty() {
            return Err(ValidationError::NoInvoiceLines);
        }
        Ok(NewInvoice {
            invoice_number,
            invoice_date: self.invoice_date,
            customer_name,
            customer_address: non_blank(self.customer_address),
            comments: non_blank(self.comments),
            lines: self.lines,
        })
    }
}

/// A finalized invoice waiting for a ledger id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    invoice_number: String,
    invoice_date: NaiveDate,
    customer_name: String,
    customer_address: Option<String>,
    comments: Option<String>,
    lines: Vec<InvoiceLineItem>,
}

impl NewInvoice {
    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    pub fn lines(&self) -> &[InvoiceLineItem] {
        &self.lines
    }

    pub(crate) fn into_record(self, id: InvoiceId) -> InvoiceRecord {
        InvoiceRecord {
            id,
            invoice_number: self.invoice_number,
            invoice_date: self.invoice_date,
            customer_name: self.customer_name,
            customer_address: self.customer_address,
            comments: self.comments,
            lines: self.lines,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceRecord {
    id: InvoiceId,
    invoice_number: String,
    invoice_date: NaiveDate,
    customer_name: String,
    customer_address: Option<String>,
    comments: Option<String>,
    lines: Vec<InvoiceLineItem>,
}

impl InvoiceRecord {
    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    pub fn invoice_date(&self) -> NaiveDate {
        self.invoice_date
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn customer_address(&self) -> Option<&str> {
        self.customer_address.as_deref()
    }

    pub fn comments(&self) -> Option<&str> {
        self.comments.as_deref()
    }

    pub fn lines(&self) -> &[InvoiceLineItem] {
        &self.lines
    }

    pub fn total(&self) -> Decimal {
        lines_total(&self.lines)
    }
}

impl Identifiable for InvoiceRecord {
    type Id = InvoiceId;

    fn id(&self) -> InvoiceId {
        self.id
    }
}

impl Displayable for InvoiceRecord {
    fn display_label(&self) -> String {
        format!(
            "invoice:{} #{} ({})",
            self.id, self.invoice_number, self.customer_name
        )
    }
}
