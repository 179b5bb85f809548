mod common;

use common::{fixed_session, mileage_expense, pdf_page_count, receipt_expense};
use expense_core::{domain::rust_decimal::Decimal, ExpenseError};

#[test]
fn expense_report_end_to_end() {
    let mut session = fixed_session();
    session.volunteer_name = "Marie".into();
    session.notes = "Corvée du 1er février".into();
    session.add_expense(receipt_expense("Paint", 5000, "paint.pdf", 1));
    session.add_expense(mileage_expense("Drive", 20));
    assert_eq!(session.expense_total(), Decimal::new(5500, 2));

    let document = session.generate_expense_report().expect("report");
    assert_eq!(document.file_name, "Compte_Depenses_Marie_2025-02-03.pdf");
    assert_eq!(pdf_page_count(&document.bytes), document.summary_pages + 1);
}

#[test]
fn import_then_delete() {
    let mut session = fixed_session();
    let summary = session
        .import_mileage("A;2025-01-01;10\nB;bad-line\nC;2025-01-02;5")
        .unwrap();
    assert_eq!(summary.errors, 1);
    session.delete_expense(summary.added[0]);
    assert_eq!(session.expenses().len(), 1);
    assert_eq!(session.expense_total(), Decimal::new(125, 2));
}

#[test]
fn invoice_lifecycle() {
    let mut session = fixed_session();
    let mut draft = session.new_invoice_draft();
    assert_eq!(draft.invoice_number, "2025-02-0001");
    draft.customer_name = "Club".into();
    draft
        .add_line("Guided hike", Decimal::TWO, Decimal::new(1000, 2))
        .unwrap();
    let id = session.add_invoice(draft.finalize().unwrap());

    let document = session.generate_invoice(id).expect("invoice");
    assert_eq!(pdf_page_count(&document.bytes), 1);

    session.delete_invoice(id);
    assert!(matches!(
        session.generate_invoice(id),
        Err(ExpenseError::InvoiceNotFound(_))
    ));
}
