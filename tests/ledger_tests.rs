mod common;

use common::{date, mileage_expense, receipt_expense};
use expense_core::{
    domain::{rust_decimal::Decimal, Attachment, InvoiceDraft, NewExpense, MAX_INPUT_VALUE},
    ledger::{ExpenseLedger, InvoiceLedger},
    ValidationError,
};

fn rate() -> Decimal {
    Decimal::new(25, 2)
}

#[test]
fn invoice_and_mileage_total() {
    let mut ledger = ExpenseLedger::new();
    ledger.add(receipt_expense("Paint", 5000, "paint.pdf", 1));
    ledger.add(mileage_expense("Drive", 20));
    assert_eq!(ledger.compute_total(rate()), Decimal::new(5500, 2));
}

#[test]
fn total_of_empty_ledger_is_zero() {
    assert_eq!(ExpenseLedger::new().compute_total(rate()), Decimal::ZERO);
}

#[test]
fn ids_are_unique_and_never_reused() {
    let mut ledger = ExpenseLedger::new();
    let first = ledger.add(mileage_expense("A", 1));
    ledger.delete(first);
    let second = ledger.add(mileage_expense("B", 1));
    assert_ne!(first, second);
}

#[test]
fn delete_keeps_order_of_the_rest() {
    let mut ledger = ExpenseLedger::new();
    let ids = ledger.add_many(vec![
        mileage_expense("A", 1),
        mileage_expense("B", 2),
        mileage_expense("C", 3),
    ]);
    ledger.delete(ids[1]).expect("expense exists");
    let names: Vec<&str> = ledger.records().iter().map(|r| r.description()).collect();
    assert_eq!(names, vec!["A", "C"]);
    assert!(ledger.delete(ids[1]).is_none());
    assert_eq!(ledger.len(), 2);
}

#[test]
fn invoice_expense_requires_attachment_bytes() {
    let err = NewExpense::invoice("Paint", Decimal::ONE, Attachment::new("paint.pdf", Vec::new()))
        .unwrap_err();
    assert_eq!(err, ValidationError::MissingAttachment);
}

#[test]
fn zero_amount_is_allowed_but_negative_is_not() {
    let attachment = || Attachment::new("r.pdf", b"%PDF-1.4".to_vec());
    assert!(NewExpense::invoice("Free", Decimal::ZERO, attachment()).is_ok());
    assert_eq!(
        NewExpense::invoice("Refund", Decimal::NEGATIVE_ONE, attachment()).unwrap_err(),
        ValidationError::NegativeAmount
    );
}

#[test]
fn mileage_requires_positive_distance() {
    assert_eq!(
        NewExpense::mileage("Drive", Decimal::ZERO, date(2025, 1, 1)).unwrap_err(),
        ValidationError::NonPositiveDistance
    );
}

#[test]
fn attachments_follow_ledger_order() {
    let mut ledger = ExpenseLedger::new();
    ledger.add(receipt_expense("One", 100, "one.pdf", 1));
    ledger.add(mileage_expense("Drive", 3));
    ledger.add(receipt_expense("Two", 200, "two.pdf", 1));
    let names: Vec<&str> = ledger.attachments().map(|a| a.name()).collect();
    assert_eq!(names, vec!["one.pdf", "two.pdf"]);
}

#[test]
fn invoice_total_sums_lines() {
    let mut draft = InvoiceDraft::new(date(2025, 4, 1));
    draft.customer_name = "Club".into();
    draft
        .add_line("Guided hike", Decimal::TWO, Decimal::new(1000, 2))
        .unwrap();
    draft
        .add_line("Trail map", Decimal::ONE, Decimal::new(500, 2))
        .unwrap();
    assert_eq!(draft.total(), Decimal::new(2500, 2));

    let mut ledger = InvoiceLedger::new();
    let id = ledger.add(draft.finalize().unwrap());
    assert_eq!(ledger.compute_total(id), Some(Decimal::new(2500, 2)));
}

#[test]
fn invoice_without_lines_is_rejected() {
    let mut draft = InvoiceDraft::new(date(2025, 4, 1));
    draft.customer_name = "Club".into();
    assert_eq!(draft.finalize().unwrap_err(), ValidationError::NoInvoiceLines);
}

#[test]
fn receipt_loaded_from_disk_keeps_its_file_name() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("quincaillerie.pdf");
    std::fs::write(&path, common::sample_pdf(1)).unwrap();

    let attachment = Attachment::from_path(&path).unwrap();
    assert_eq!(attachment.name(), "quincaillerie.pdf");
    assert!(NewExpense::invoice("Hardware", Decimal::ONE, attachment).is_ok());
}

#[test]
fn total_does_not_depend_on_insertion_order() {
    let mut forward = ExpenseLedger::new();
    forward.add(receipt_expense("Paint", 5000, "paint.pdf", 1));
    forward.add(mileage_expense("Drive", 20));

    let mut backward = ExpenseLedger::new();
    backward.add(mileage_expense("Drive", 20));
    backward.add(receipt_expense("Paint", 5000, "paint.pdf", 1));

    assert_eq!(forward.compute_total(rate()), backward.compute_total(rate()));
}

#[test]
fn oversized_values_are_rejected() {
    let mut draft = InvoiceDraft::new(date(2025, 4, 1));
    assert_eq!(
        draft.add_line("x", Decimal::MAX, Decimal::TWO).unwrap_err(),
        ValidationError::ValueTooLarge
    );
    assert_eq!(
        draft.add_line("x", Decimal::ONE, Decimal::MAX).unwrap_err(),
        ValidationError::ValueTooLarge
    );
    assert_eq!(draft.total(), Decimal::ZERO);

    let attachment = Attachment::new("r.pdf", b"%PDF-1.4".to_vec());
    assert_eq!(
        NewExpense::invoice("Big", Decimal::MAX, attachment).unwrap_err(),
        ValidationError::ValueTooLarge
    );
    assert_eq!(
        NewExpense::mileage("Far", Decimal::MAX, date(2025, 1, 1)).unwrap_err(),
        ValidationError::ValueTooLarge
    );
}

#[test]
fn largest_accepted_values_total_without_overflow() {
    let mut ledger = ExpenseLedger::new();
    for _ in 0..5 {
        ledger.add(NewExpense::mileage("Far", MAX_INPUT_VALUE, date(2025, 1, 1)).unwrap());
    }
    let expected = MAX_INPUT_VALUE * rate() * Decimal::from(5);
    assert_eq!(ledger.compute_total(rate()), expected);
}
