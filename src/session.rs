//! The working session of one volunteer: two ledgers, the report details and
//! the document generation entry points.

use rust_decimal::Decimal;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::domain::{
    ExpenseId, ExpenseRecord, InvoiceDraft, InvoiceId, InvoiceRecord, NewExpense, NewInvoice,
};
use crate::errors::{ExpenseError, Result, ValidationError};
use crate::import::{parse_mileage_block, BulkImport};
use crate::ledger::{ExpenseLedger, InvoiceLedger};
use crate::render::{
    ExpenseReportRenderer, ExpenseReportRequest, InvoiceRenderer, RenderedDocument,
};

/// Outcome of a successful bulk import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: Vec<ExpenseId>,
    pub errors: usize,
}

/// In-memory state for one user. Nothing survives the session.
///
/// Generating a document borrows the session exclusively, so a second
/// generation cannot start while one is running.
pub struct Session {
    config: Config,
    clock: Box<dyn Clock>,
    pub volunteer_name: String,
    pub notes: String,
    expenses: ExpenseLedger,
    invoices: InvoiceLedger,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    pub fn with_clock(config: Config, clock: Box<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            volunteer_name: String::new(),
            notes: String::new(),
            expenses: ExpenseLedger::new(),
            invoices: InvoiceLedger::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn expenses(&self) -> &ExpenseLedger {
        &self.expenses
    }

    pub fn invoices(&self) -> &InvoiceLedger {
        &self.invoices
    }

    pub fn add_expense(&mut self, expense: NewExpense) -> ExpenseId {
        self.expenses.add(expense)
    }

    pub fn delete_expense(&mut self, id: ExpenseId) -> Option<ExpenseRecord> {
        self.expenses.delete(id)
    }

    /// Parses `text` and appends every valid line. Fails without touching the
    /// ledger when not a single line could be imported.
    pub fn import_mileage(&mut self, text: &str) -> Result<ImportSummary> {
        let BulkImport { records, errors } = parse_mileage_block(text).into_result()?;
        let added = self.expenses.add_many(records);
        Ok(ImportSummary { added, errors })
    }

    pub fn expense_total(&self) -> Decimal {
        self.expenses.compute_total(self.config.mileage_rate)
    }

    /// Renders the report for the whole expense ledger. Requires a volunteer
    /// name and at least one expense.
    pub fn generate_expense_report(&mut self) -> Result<RenderedDocument> {
        if self.volunteer_name.trim().is_empty() {
            return Err(ValidationError::EmptyVolunteerName.into());
        }
        if self.expenses.is_empty() {
            return Err(ValidationError::NoExpenses.into());
        }
        let request = ExpenseReportRequest {
            volunteer_name: &self.volunteer_name,
            expenses: self.expenses.records(),
            mileage_rate: self.config.mileage_rate,
            total: self.expense_total(),
            notes: Some(self.notes.as_str()),
            generated_on: self.clock.today(),
        };
        let document = ExpenseReportRenderer::new(&self.config).render(&request)?;
        Ok(document)
    }

    /// Blank draft dated today with the default invoice number.
    pub fn new_invoice_draft(&self) -> InvoiceDraft {
        InvoiceDraft::new(self.clock.today())
    }

    pub fn add_invoice(&mut self, invoice: NewInvoice) -> InvoiceId {
        self.invoices.add(invoice)
    }

    pub fn delete_invoice(&mut self, id: InvoiceId) -> Option<InvoiceRecord> {
        self.invoices.delete(id)
    }

    pub fn generate_invoice(&mut self, id: InvoiceId) -> Result<RenderedDocument> {
        let invoice = self
            .invoices
            .get(id)
            .ok_or(ExpenseError::InvoiceNotFound(id))?;
        let document = InvoiceRenderer::new(&self.config).render(invoice)?;
        Ok(document)
    }
}
