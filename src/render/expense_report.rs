use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::Config;
use crate::currency::{format_plain, Formatter};
use crate::domain::{ExpenseDetails, ExpenseRecord, Identifiable};
use crate::errors::{ExpenseError, ValidationError};
use crate::utils::file_slug;

use super::composer::DocumentComposer;
use super::layout::{Alignment, Layout, Table, TableColumn, TextStyle};
use super::{compose_document, PdfComposer, RenderedDocument};

const TITLE: &str = "COMPTE DE DÉPENSES";
const SIGNATURE_RULE: &str = "______________________________";

/// Everything printed on an expense report.
#[derive(Debug, Clone, Copy)]
pub struct ExpenseReportRequest<'a> {
    pub volunteer_name: &'a str,
    pub expenses: &'a [ExpenseRecord],
    pub mileage_rate: Decimal,
    /// Printed as is; callers pass the ledger total at `mileage_rate`.
    pub total: Decimal,
    pub notes: Option<&'a str>,
    pub generated_on: NaiveDate,
}

impl ExpenseReportRequest<'_> {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.volunteer_name.trim().is_empty() {
            return Err(ValidationError::EmptyVolunteerName);
        }
        Ok(())
    }
}

/// Builds the volunteer expense report: a summary table followed by every
/// receipt PDF in ledger order.
pub struct ExpenseReportRenderer<'c> {
    config: &'c Config,
    format: Formatter,
}

impl<'c> ExpenseReportRenderer<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self {
            config,
            format: Formatter::from_config(config),
        }
    }

    /// `Compte_Depenses_<name>_<YYYY-MM-DD>.pdf`
    pub fn file_name(&self, request: &ExpenseReportRequest<'_>) -> String {
        format!(
            "Compte_Depenses_{}_{}.pdf",
            file_slug(request.volunteer_name),
            request.generated_on.format("%Y-%m-%d")
        )
    }

    pub fn layout(&self, request: &ExpenseReportRequest<'_>) -> Result<Layout, ValidationError> {
        request.validate()?;
        let mut layout = Layout::new();

        layout
            .text(TITLE, TextStyle::new(20.0).bold().centered())
            .text(
                self.config.organization.description.as_str(),
                TextStyle::new(12.0).centered(),
            )
            .spacer(8.0)
            .text(
                format!("Bénévole : {}", request.volunteer_name.trim()),
                TextStyle::new(11.0),
            )
            .text(
                format!("Date : {}", self.format.date(request.generated_on)),
                TextStyle::new(11.0),
            )
            .spacer(6.0);

        layout.table(self.expense_table(request));

        layout.spacer(8.0).text(
            format!("TOTAL À REMBOURSER : {}", self.format.money(request.total)),
            TextStyle::new(12.0).bold().centered(),
        );

        if let Some(notes) = request.notes.map(str::trim).filter(|n| !n.is_empty()) {
            layout
                .spacer(6.0)
                .text("Informations complémentaires :", TextStyle::new(10.0).bold())
                .paragraph(notes, TextStyle::new(10.0));
        }

        layout.spacer(6.0).text(
            format!(
                "Taux de remboursement kilométrique : {}",
                self.format.rate_per_km(request.mileage_rate)
            ),
            TextStyle::new(9.0),
        );

        let receipts: Vec<&str> = request
            .expenses
            .iter()
            .filter_map(ExpenseRecord::attachment)
            .map(|attachment| attachment.name())
            .collect();
        if !receipts.is_empty() {
            layout.text(
                "Note : Les factures originales sont jointes à ce compte de dépenses.",
                TextStyle::new(9.0),
            );
            layout.text("Documents joints :", TextStyle::new(9.0).bold());
            for name in receipts {
                layout.text(format!("- {name}"), TextStyle::new(9.0));
            }
        }

        layout
            .spacer(14.0)
            .text(
                format!("Signature du bénévole : {SIGNATURE_RULE}"),
                TextStyle::new(10.0),
            )
            .spacer(4.0)
            .text(format!("Date : {SIGNATURE_RULE}"), TextStyle::new(10.0));

        Ok(layout)
    }

    pub fn render(
        &self,
        request: &ExpenseReportRequest<'_>,
    ) -> Result<RenderedDocument, ExpenseError> {
        let composer = PdfComposer::new(TITLE)?;
        self.render_with(composer, request)
    }

    /// Renders through `composer`; receipts are appended in ledger order.
    pub fn render_with<C: DocumentComposer>(
        &self,
        composer: C,
        request: &ExpenseReportRequest<'_>,
    ) -> Result<RenderedDocument, ExpenseError> {
        let layout = self.layout(request)?;
        let attachments = request
            .expenses
            .iter()
            .filter_map(|record| record.attachment().map(|a| (record.id(), a)));
        let document =
            compose_document(composer, &layout, attachments, self.file_name(request))?;
        Ok(document)
    }

    fn expense_table(&self, request: &ExpenseReportRequest<'_>) -> Table {
        let mut table = Table::new(
            vec![
                TableColumn::new("#", 10.0, Alignment::Center),
                TableColumn::new("Type", 30.0, Alignment::Left),
                TableColumn::new("Description", 60.0, Alignment::Left),
                TableColumn::new("Détails", 50.0, Alignment::Left),
                TableColumn::new("Montant", 30.0, Alignment::Right),
            ],
            10.0,
        );
        for (index, record) in request.expenses.iter().enumerate() {
            table.push_row(vec![
                (index + 1).to_string(),
                record.kind().label().to_string(),
                record.description().to_string(),
                self.details(record, request.mileage_rate),
                self.format.money(record.contribution(request.mileage_rate)),
            ]);
        }
        table
    }

    fn details(&self, record: &ExpenseRecord, rate: Decimal) -> String {
        match record.details() {
            ExpenseDetails::Mileage { distance_km, date } => format!(
                "{} - {} km × {}",
                self.format.date(*date),
                format_plain(*distance_km),
                self.format.rate_per_km(rate)
            ),
            ExpenseDetails::Invoice { attachment, .. } => attachment.name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Attachment, NewExpense};
    use crate::ledger::ExpenseLedger;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ledger() -> ExpenseLedger {
        let mut ledger = ExpenseLedger::new();
        ledger.add(
            NewExpense::invoice(
                "Paint",
                Decimal::new(5000, 2),
                Attachment::new("paint.pdf", b"%PDF".to_vec()),
            )
            .unwrap(),
        );
        ledger.add(NewExpense::mileage("Drive", Decimal::new(20, 0), date(2025, 1, 1)).unwrap());
        ledger
    }

    fn request<'a>(ledger: &'a ExpenseLedger, name: &'a str) -> ExpenseReportRequest<'a> {
        let rate = Decimal::new(25, 2);
        ExpenseReportRequest {
            volunteer_name: name,
            expenses: ledger.records(),
            mileage_rate: rate,
            total: ledger.compute_total(rate),
            notes: None,
            generated_on: date(2025, 2, 3),
        }
    }

    #[test]
    fn layout_lists_rows_and_total() {
        let config = Config::default();
        let ledger = ledger();
        let layout = ExpenseReportRenderer::new(&config)
            .layout(&request(&ledger, "Marie"))
            .unwrap();

        let table = layout.tables().next().unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][1], "Facture");
        assert_eq!(table.rows[0][3], "paint.pdf");
        assert_eq!(table.rows[1][3], "2025-01-01 - 20 km × 0.25 $/km");
        assert_eq!(table.rows[1][4], "5.00 $");
        assert!(layout.contains_text("TOTAL À REMBOURSER : 55.00 $"));
        assert!(layout.contains_text("Bénévole : Marie"));
        assert!(layout.contains_text("- paint.pdf"));
    }

    #[test]
    fn mileage_only_report_has_no_attachment_list() {
        let config = Config::default();
        let mut ledger = ExpenseLedger::new();
        ledger.add(NewExpense::mileage("Drive", Decimal::TEN, date(2025, 1, 1)).unwrap());
        let layout = ExpenseReportRenderer::new(&config)
            .layout(&request(&ledger, "Marie"))
            .unwrap();
        assert!(!layout.contains_text("Documents joints"));
        assert!(layout.contains_text("Taux de remboursement kilométrique : 0.25 $/km"));
    }

    #[test]
    fn blank_notes_are_omitted() {
        let config = Config::default();
        let ledger = ledger();
        let mut req = request(&ledger, "Marie");
        req.notes = Some("   ");
        let layout = ExpenseReportRenderer::new(&config).layout(&req).unwrap();
        assert!(!layout.contains_text("Informations complémentaires"));

        req.notes = Some("Trail day");
        let layout = ExpenseReportRenderer::new(&config).layout(&req).unwrap();
        assert!(layout.contains_text("Informations complémentaires"));
        assert!(layout.contains_text("Trail day"));
    }

    #[test]
    fn volunteer_name_is_required() {
        let config = Config::default();
        let renderer = ExpenseReportRenderer::new(&config);
        let ledger = ledger();
        assert_eq!(
            renderer.layout(&request(&ledger, "  ")).unwrap_err(),
            ValidationError::EmptyVolunteerName
        );
    }

    #[test]
    fn empty_expense_list_renders_an_empty_table() {
        let config = Config::default();
        let empty = ExpenseLedger::new();
        let layout = ExpenseReportRenderer::new(&config)
            .layout(&request(&empty, "Marie"))
            .unwrap();
        assert!(layout.tables().next().unwrap().rows.is_empty());
        assert!(layout.contains_text("TOTAL À REMBOURSER : 0.00 $"));
    }

    #[test]
    fn file_name_uses_slug_and_date() {
        let config = Config::default();
        let ledger = ledger();
        let name = ExpenseReportRenderer::new(&config).file_name(&request(&ledger, "Marie Côté"));
        assert_eq!(name, "Compte_Depenses_Marie_Côté_2025-02-03.pdf");
    }
}
