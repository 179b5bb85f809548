use crate::config::Config;
use crate::currency::{format_plain, Formatter};
use crate::domain::InvoiceRecord;
use crate::errors::RenderError;
use crate::utils::{file_slug, number_slug};

use super::composer::DocumentComposer;
use super::layout::{Alignment, Layout, Table, TableColumn, TextStyle};
use super::{compose_document, PdfComposer, RenderedDocument};

const TITLE: &str = "FACTURE";
const THANK_YOU: &str = "Merci de votre confiance!";

/// Renders one finalized invoice issued by the organization.
pub struct InvoiceRenderer<'c> {
    config: &'c Config,
    format: Formatter,
}

impl<'c> InvoiceRenderer<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self {
            config,
            format: Formatter::from_config(config),
        }
    }

    /// `Facture_<number>_<customer>.pdf`. Slashes in the number become dashes
    /// and no path separator survives in either part.
    pub fn file_name(&self, invoice: &InvoiceRecord) -> String {
        format!(
            "Facture_{}_{}.pdf",
            number_slug(invoice.invoice_number()),
            file_slug(invoice.customer_name())
        )
    }

    pub fn layout(&self, invoice: &InvoiceRecord) -> Layout {
        let org = &self.config.organization;
        let mut layout = Layout::new();

        layout.text(org.name.as_str(), TextStyle::new(22.0).bold().centered());
        for line in &org.address_lines {
            layout.text(line.as_str(), TextStyle::new(10.0).centered());
        }
        layout
            .spacer(8.0)
            .text(TITLE, TextStyle::new(16.0).bold().centered())
            .spacer(6.0)
            .text(
                format!("Facture # : {}", invoice.invoice_number()),
                TextStyle::new(11.0),
            )
            .text(
                format!("Date : {}", self.format.date(invoice.invoice_date())),
                TextStyle::new(11.0),
            )
            .spacer(6.0)
            .text("Facturé à :", TextStyle::new(11.0).bold())
            .text(invoice.customer_name(), TextStyle::new(11.0));
        if let Some(address) = invoice.customer_address() {
            layout.paragraph(address, TextStyle::new(11.0));
        }
        layout.spacer(6.0).table(self.line_table(invoice));

        if let Some(comments) = invoice.comments() {
            layout
                .spacer(8.0)
                .text("Commentaires :", TextStyle::new(10.0).bold())
                .paragraph(comments, TextStyle::new(10.0));
        }

        layout.page_footer(
            vec![THANK_YOU.to_string(), org.name.clone()],
            TextStyle::new(9.0).italic().centered().muted(),
        );
        layout
    }

    pub fn render(&self, invoice: &InvoiceRecord) -> Result<RenderedDocument, RenderError> {
        let composer = PdfComposer::new(&format!("{TITLE} {}", invoice.invoice_number()))?;
        self.render_with(composer, invoice)
    }

    pub fn render_with<C: DocumentComposer>(
        &self,
        composer: C,
        invoice: &InvoiceRecord,
    ) -> Result<RenderedDocument, RenderError> {
        let layout = self.layout(invoice);
        compose_document(composer, &layout, std::iter::empty(), self.file_name(invoice))
    }

    fn line_table(&self, invoice: &InvoiceRecord) -> Table {
        let mut table = Table::new(
            vec![
                TableColumn::new("#", 10.0, Alignment::Center),
                TableColumn::new("Description", 75.0, Alignment::Left),
                TableColumn::new("Quantité", 25.0, Alignment::Center),
                TableColumn::new("Prix unitaire", 35.0, Alignment::Right),
                TableColumn::new("Total", 35.0, Alignment::Right),
            ],
            10.0,
        );
        for (index, line) in invoice.lines().iter().enumerate() {
            table.push_row(vec![
                (index + 1).to_string(),
                line.description().to_string(),
                format_plain(line.quantity()),
                self.format.money(line.unit_price()),
                self.format.money(line.line_total()),
            ]);
        }
        table.with_footer(
            "TOTAL",
            format!(
                "{} {}",
                self.format.money(invoice.total()),
                self.config.invoice_currency
            ),
        )
    }
}
