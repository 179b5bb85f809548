use rust_decimal::Decimal;

use crate::domain::{Displayable, IdSequence, Identifiable, InvoiceId, InvoiceRecord, NewInvoice};

/// Session-scoped collection of finalized invoices.
#[derive(Debug, Clone, Default)]
pub struct InvoiceLedger {
    records: Vec<InvoiceRecord>,
    ids: IdSequence,
}

impl InvoiceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, invoice: NewInvoice) -> InvoiceId {
        let id = self.ids.next_id();
        tracing::debug!(invoice_id = %id, number = invoice.invoice_number(), "invoice added");
        self.records.push(invoice.into_record(id));
        id
    }

    /// Removes the invoice if present. Deleting an unknown id is a no-op.
    pub fn delete(&mut self, id: InvoiceId) -> Option<InvoiceRecord> {
        let index = self.records.iter().position(|record| record.id() == id)?;
        let record = self.records.remove(index);
        tracing::debug!(invoice = %record.display_label(), "invoice deleted");
        Some(record)
    }

    /// Total of one invoice, or `None` when the id is unknown.
    pub fn compute_total(&self, id: InvoiceId) -> Option<Decimal> {
        self.get(id).map(InvoiceRecord::total)
    }

    pub fn get(&self, id: InvoiceId) -> Option<&InvoiceRecord> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn records(&self) -> &[InvoiceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::InvoiceDraft;
    use chrono::NaiveDate;

    fn invoice(customer: &str) -> NewInvoice {
        let mut draft = InvoiceDraft::new(NaiveDate::from_ymd_opt(2025, 5, 2).unwrap());
        draft.customer_name = customer.into();
        draft
            .add_line("Guided hike", Decimal::TWO, Decimal::new(1000, 2))
            .unwrap();
        draft
            .add_line("Trail map", Decimal::ONE, Decimal::new(500, 2))
            .unwrap();
        draft.finalize().unwrap()
    }

    #[test]
    fn per_invoice_total() {
        let mut ledger = InvoiceLedger::new();
        let id = ledger.add(invoice("Club"));
        assert_eq!(ledger.compute_total(id), Some(Decimal::new(2500, 2)));
        assert_eq!(ledger.compute_total(InvoiceId::from(42)), None);
    }

    #[test]
    fn delete_removes_only_the_target() {
        let mut ledger = InvoiceLedger::new();
        let a = ledger.add(invoice("A"));
        let b = ledger.add(invoice("B"));
        assert!(ledger.delete(a).is_some());
        assert!(ledger.delete(a).is_none());
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(b).map(InvoiceRecord::customer_name), Some("B"));
    }
}
