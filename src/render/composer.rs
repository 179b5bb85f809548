use crate::errors::RenderError;

use super::layout::{Block, Layout, Table, TextStyle};

/// Paged output target. [`PdfComposer`](super::PdfComposer) is the production
/// implementation; tests substitute recording doubles.
///
/// The cursor only moves forward: every call draws below whatever was drawn
/// before it, starting a new page when the current one is full.
pub trait DocumentComposer {
    /// Draws one unwrapped line.
    fn write_text(&mut self, text: &str, style: &TextStyle) -> Result<(), RenderError>;

    /// Draws `text` wrapped to the content width.
    fn write_paragraph(&mut self, text: &str, style: &TextStyle) -> Result<(), RenderError>;

    /// Draws a bordered table, repeating the header row on continuation pages.
    fn render_table(&mut self, table: &Table) -> Result<(), RenderError>;

    fn skip(&mut self, height_mm: f32) -> Result<(), RenderError>;

    /// Draws `lines` at the bottom of the current page without moving the
    /// cursor.
    fn write_page_footer(&mut self, lines: &[String], style: &TextStyle)
        -> Result<(), RenderError>;

    /// Queues every page of an existing PDF for appending after the composed
    /// pages. Unreadable input is rejected here, before anything is queued.
    fn append_pages_from_bytes(&mut self, bytes: &[u8]) -> Result<usize, RenderError>;

    /// Composed pages so far, excluding appended ones.
    fn page_count(&self) -> usize;

    fn save_to_bytes(self) -> Result<Vec<u8>, RenderError>
    where
        Self: Sized;
}

/// Feeds every block of `layout` to `composer`, in order.
pub fn draw_layout<C>(composer: &mut C, layout: &Layout) -> Result<(), RenderError>
where
    C: DocumentComposer + ?Sized,
{
    for block in layout.blocks() {
        match block {
            Block::Text { content, style } => composer.write_text(content, style)?,
            Block::Paragraph { content, style } => composer.write_paragraph(content, style)?,
            Block::Table(table) => composer.render_table(table)?,
            Block::Spacer(height) => composer.skip(*height)?,
            Block::PageFooter { lines, style } => composer.write_page_footer(lines, style)?,
        }
    }
    Ok(())
}
