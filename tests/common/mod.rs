#![allow(dead_code)]

use chrono::NaiveDate;
use expense_core::{
    clock::FixedClock,
    config::Config,
    domain::{rust_decimal::Decimal, Attachment, NewExpense},
    render::{DocumentComposer, PdfComposer, TextStyle},
    RenderError, Session,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}

/// A real PDF with `pages` pages, built with the crate's own composer.
pub fn sample_pdf(pages: usize) -> Vec<u8> {
    labeled_pdf("RECEIPT", pages)
}

/// Like [`sample_pdf`], each page reading `<label>-<page number>`.
pub fn labeled_pdf(label: &str, pages: usize) -> Vec<u8> {
    let mut composer = PdfComposer::new(label).expect("create composer");
    for page in 0..pages {
        if page > 0 {
            composer.skip(1_000.0).expect("page break");
        }
        composer
            .write_text(&format!("{label}-{}", page + 1), &TextStyle::new(12.0))
            .expect("write text");
    }
    composer.save_to_bytes().expect("save sample pdf")
}

/// Text of one 1-based page of `bytes`.
pub fn page_text(bytes: &[u8], page: u32) -> String {
    lopdf::Document::load_mem(bytes)
        .expect("output is a readable pdf")
        .extract_text(&[page])
        .expect("extract page text")
}

pub fn pdf_page_count(bytes: &[u8]) -> usize {
    lopdf::Document::load_mem(bytes)
        .expect("output is a readable pdf")
        .get_pages()
        .len()
}

pub fn receipt_expense(description: &str, cents: i64, file: &str, pages: usize) -> NewExpense {
    NewExpense::invoice(
        description,
        Decimal::new(cents, 2),
        Attachment::new(file, sample_pdf(pages)),
    )
    .expect("valid invoice expense")
}

pub fn mileage_expense(description: &str, km: i64) -> NewExpense {
    NewExpense::mileage(description, Decimal::new(km, 0), date(2025, 1, 15))
        .expect("valid mileage expense")
}

/// Session pinned to 2025-02-03 with the default configuration.
pub fn fixed_session() -> Session {
    Session::with_clock(Config::default(), Box::new(FixedClock::new(date(2025, 2, 3))))
}

/// Composer double that records every call instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingComposer {
    pub calls: Vec<String>,
    pub appended: Vec<usize>,
    pub fail_on_save: bool,
}

impl DocumentComposer for RecordingComposer {
    fn write_text(&mut self, text: &str, _style: &TextStyle) -> Result<(), RenderError> {
        self.calls.push(format!("text:{text}"));
        Ok(())
    }

    fn write_paragraph(&mut self, text: &str, _style: &TextStyle) -> Result<(), RenderError> {
        self.calls.push(format!("paragraph:{text}"));
        Ok(())
    }

    fn render_table(&mut self, table: &expense_core::render::Table) -> Result<(), RenderError> {
        self.calls.push(format!("table:{}", table.rows.len()));
        Ok(())
    }

    fn skip(&mut self, _height_mm: f32) -> Result<(), RenderError> {
        Ok(())
    }

    fn write_page_footer(
        &mut self,
        lines: &[String],
        _style: &TextStyle,
    ) -> Result<(), RenderError> {
        self.calls.push(format!("footer:{}", lines.join("|")));
        Ok(())
    }

    fn append_pages_from_bytes(&mut self, bytes: &[u8]) -> Result<usize, RenderError> {
        if !bytes.starts_with(b"%PDF") {
            return Err(RenderError::UnreadableAttachment("missing header".into()));
        }
        self.appended.push(bytes.len());
        Ok(1)
    }

    fn page_count(&self) -> usize {
        1
    }

    fn save_to_bytes(self) -> Result<Vec<u8>, RenderError> {
        if self.fail_on_save {
            return Err(RenderError::Pdf("disk full".into()));
        }
        Ok(self.calls.join("\n").into_bytes())
    }
}
