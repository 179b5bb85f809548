use rust_decimal::Decimal;

use crate::domain::{
    Attachment, Displayable, ExpenseId, ExpenseRecord, IdSequence, Identifiable, NewExpense,
};

/// Ordered, session-scoped collection of expenses. Insertion order is the
/// display order and the report order.
#[derive(Debug, Clone, Default)]
pub struct ExpenseLedger {
    records: Vec<ExpenseRecord>,
    ids: IdSequence,
}

impl ExpenseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, expense: NewExpense) -> ExpenseId {
        let id = self.ids.next_id();
        tracing::debug!(expense_id = %id, kind = ?expense.kind(), "expense added");
        self.records.push(expense.into_record(id));
        id
    }

    /// Appends every expense in order, each with its own fresh id.
    pub fn add_many<I>(&mut self, expenses: I) -> Vec<ExpenseId>
    where
        I: IntoIterator<Item = NewExpense>,
    {
        let ids: Vec<ExpenseId> = expenses.into_iter().map(|e| self.add(e)).collect();
        tracing::debug!(count = ids.len(), "expenses added in bulk");
        ids
    }

    /// Removes the expense if present. Deleting an unknown id is a no-op.
    pub fn delete(&mut self, id: ExpenseId) -> Option<ExpenseRecord> {
        let index = self.records.iter().position(|record| record.id() == id)?;
        let record = self.records.remove(index);
        tracing::debug!(expense = %record.display_label(), "expense deleted");
        Some(record)
    }

    pub fn compute_total(&self, mileage_rate: Decimal) -> Decimal {
        self.records
            .iter()
            .map(|record| record.contribution(mileage_rate))
            .sum()
    }

    pub fn get(&self, id: ExpenseId) -> Option<&ExpenseRecord> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    /// Receipts in ledger order, as they will be appended to the report.
    pub fn attachments(&self) -> impl Iterator<Item = &Attachment> {
        self.records.iter().filter_map(ExpenseRecord::attachment)
    }

    pub fn has_attachments(&self) -> bool {
        self.attachments().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
