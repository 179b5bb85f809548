//! PDF generation for expense reports and invoices.
//!
//! Each renderer builds a [`Layout`] from ledger data and hands it to a
//! [`DocumentComposer`]. Receipts are appended after the composed pages.

pub mod composer;
pub mod expense_report;
pub mod invoice;
pub mod layout;
mod merge;
pub mod pdf;

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{Attachment, ExpenseId};
use crate::errors::RenderError;

pub use composer::{draw_layout, DocumentComposer};
pub use expense_report::{ExpenseReportRenderer, ExpenseReportRequest};
pub use invoice::InvoiceRenderer;
pub use layout::{Alignment, Block, FontWeight, Layout, Table, TableColumn, TextStyle};
pub use pdf::PdfComposer;

/// An attachment left out of a report because it could not be read as PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedAttachment {
    pub expense_id: ExpenseId,
    pub file_name: String,
    pub reason: String,
}

/// A finished document, ready to be offered as a download.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub summary_pages: usize,
    pub attachment_pages: usize,
    pub skipped_attachments: Vec<SkippedAttachment>,
}

impl RenderedDocument {
    pub fn page_count(&self) -> usize {
        self.summary_pages + self.attachment_pages
    }

    /// Writes the document into `dir` under its file name.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, RenderError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.bytes)?;
        tracing::info!(path = %path.display(), bytes = self.bytes.len(), "document written");
        Ok(path)
    }
}

/// Draws `layout`, queues every attachment and saves. Unreadable attachments
/// are recorded and skipped; any other failure aborts with no output.
pub(crate) fn compose_document<'a, C, I>(
    mut composer: C,
    layout: &Layout,
    attachments: I,
    file_name: String,
) -> Result<RenderedDocument, RenderError>
where
    C: DocumentComposer,
    I: IntoIterator<Item = (ExpenseId, &'a Attachment)>,
{
    draw_layout(&mut composer, layout)?;
    let summary_pages = composer.page_count();

    let mut attachment_pages = 0;
    let mut skipped_attachments = Vec::new();
    for (expense_id, attachment) in attachments {
        match composer.append_pages_from_bytes(attachment.data()) {
            Ok(pages) => attachment_pages += pages,
            Err(err) => {
                tracing::warn!(
                    %expense_id,
                    attachment = attachment.name(),
                    error = %err,
                    "skipping unreadable attachment"
                );
                skipped_attachments.push(SkippedAttachment {
                    expense_id,
                    file_name: attachment.name().to_string(),
                    reason: err.to_string(),
                });
            }
        }
    }

    let bytes = composer.save_to_bytes()?;
    tracing::info!(
        file = %file_name,
        summary_pages,
        attachment_pages,
        skipped = skipped_attachments.len(),
        "document rendered"
    );
    Ok(RenderedDocument {
        file_name,
        bytes,
        summary_pages,
        attachment_pages,
        skipped_attachments,
    })
}
