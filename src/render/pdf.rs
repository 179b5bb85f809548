use std::io::BufWriter;

use printpdf::{
    BuiltinFont, Color, Greyscale, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point,
};

use crate::errors::RenderError;

use super::composer::DocumentComposer;
use super::layout::{
    line_height_mm, text_width_mm, wrap_text, Alignment, FontWeight, Table, TextStyle,
    CONTENT_WIDTH_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, SIDE_MARGIN_MM,
};
use super::merge;

const LAYER_NAME: &str = "Layer 1";
const TOP_MARGIN_MM: f32 = 15.0;
/// Keeps body text clear of the page footer area.
const BOTTOM_MARGIN_MM: f32 = 25.0;
const FOOTER_TOP_MM: f32 = PAGE_HEIGHT_MM - 18.0;
const CELL_PADDING_MM: f32 = 1.5;
const GRID_THICKNESS: f32 = 0.3;
const MUTED_GREY: f32 = 0.4;
/// Baseline offset from the top of a line box, as a fraction of the font size.
const ASCENT_RATIO: f32 = 0.8;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl Fonts {
    fn get(&self, weight: FontWeight) -> &IndirectFontRef {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
            FontWeight::Italic => &self.italic,
        }
    }
}

struct Cell<'a> {
    x_mm: f32,
    width_mm: f32,
    alignment: Alignment,
    text: &'a str,
}

/// A4 portrait composer drawing with the PDF built-in Helvetica family.
///
/// Positions are tracked as a distance from the top edge; printpdf's origin
/// is the bottom-left corner.
pub struct PdfComposer {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Fonts,
    cursor_mm: f32,
    pages: usize,
    appended: Vec<lopdf::Document>,
}

impl PdfComposer {
    pub fn new(title: &str) -> Result<Self, RenderError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
        let layer = doc.get_page(page).get_layer(layer);
        let fonts = Fonts {
            regular: builtin_font(&doc, BuiltinFont::Helvetica)?,
            bold: builtin_font(&doc, BuiltinFont::HelveticaBold)?,
            italic: builtin_font(&doc, BuiltinFont::HelveticaOblique)?,
        };
        layer.set_outline_thickness(GRID_THICKNESS);
        Ok(Self {
            doc,
            layer,
            fonts,
            cursor_mm: TOP_MARGIN_MM,
            pages: 1,
            appended: Vec::new(),
        })
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.layer.set_outline_thickness(GRID_THICKNESS);
        self.cursor_mm = TOP_MARGIN_MM;
        self.pages += 1;
        tracing::trace!(page = self.pages, "page break");
    }

    fn fits(&self, height_mm: f32) -> bool {
        self.cursor_mm + height_mm <= PAGE_HEIGHT_MM - BOTTOM_MARGIN_MM
    }

    fn ensure_space(&mut self, height_mm: f32) {
        // A block taller than a page still starts at the top of a fresh one.
        if !self.fits(height_mm) && self.cursor_mm > TOP_MARGIN_MM {
            self.new_page();
        }
    }

    fn draw_text(&self, text: &str, style: &TextStyle, left_mm: f32, width_mm: f32, top_mm: f32) {
        let x = aligned_x(text, style.size, style.alignment, left_mm, width_mm);
        let baseline = top_mm + style.size_mm() * ASCENT_RATIO;
        if style.muted {
            self.layer
                .set_fill_color(Color::Greyscale(Greyscale::new(MUTED_GREY, None)));
        }
        self.layer.use_text(
            text,
            style.size,
            Mm(x),
            Mm(PAGE_HEIGHT_MM - baseline),
            self.fonts.get(style.weight),
        );
        if style.muted {
            self.layer
                .set_fill_color(Color::Greyscale(Greyscale::new(0.0, None)));
        }
    }

    fn draw_segment(&self, from: (f32, f32), to: (f32, f32)) {
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(from.0), Mm(PAGE_HEIGHT_MM - from.1)), false),
                (Point::new(Mm(to.0), Mm(PAGE_HEIGHT_MM - to.1)), false),
            ],
            is_closed: false,
        });
    }

    fn row_height(cells: &[Cell<'_>], size: f32) -> f32 {
        let lines = cells
            .iter()
            .map(|cell| wrap_text(cell.text, cell.width_mm - 2.0 * CELL_PADDING_MM, size).len())
            .max()
            .unwrap_or(1);
        lines as f32 * line_height_mm(size) + 2.0 * CELL_PADDING_MM
    }

    /// Draws one bordered row at the cursor and moves the cursor below it.
    fn draw_row(&mut self, cells: &[Cell<'_>], style: &TextStyle) {
        let top = self.cursor_mm;
        let height = Self::row_height(cells, style.size);
        let line_height = line_height_mm(style.size);
        for cell in cells {
            let inner_width = cell.width_mm - 2.0 * CELL_PADDING_MM;
            let cell_style = TextStyle {
                alignment: cell.alignment,
                ..*style
            };
            for (index, line) in wrap_text(cell.text, inner_width, style.size)
                .iter()
                .enumerate()
            {
                let line_top = top + CELL_PADDING_MM + index as f32 * line_height;
                self.draw_text(line, &cell_style, cell.x_mm + CELL_PADDING_MM, inner_width, line_top);
            }
        }

        let left = cells.first().map_or(SIDE_MARGIN_MM, |cell| cell.x_mm);
        let right = cells
            .last()
            .map_or(left, |cell| cell.x_mm + cell.width_mm);
        self.draw_segment((left, top), (right, top));
        self.draw_segment((left, top + height), (right, top + height));
        self.draw_segment((left, top), (left, top + height));
        for cell in cells {
            let edge = cell.x_mm + cell.width_mm;
            self.draw_segment((edge, top), (edge, top + height));
        }
        self.cursor_mm = top + height;
    }

    fn header_cells(table: &Table) -> Vec<Cell<'_>> {
        let mut x = SIDE_MARGIN_MM;
        table
            .columns
            .iter()
            .map(|column| {
                let cell = Cell {
                    x_mm: x,
                    width_mm: column.width_mm,
                    alignment: column.alignment,
                    text: column.header.as_str(),
                };
                x += column.width_mm;
                cell
            })
            .collect()
    }

    fn body_cells<'a>(table: &'a Table, row: &'a [String]) -> Vec<Cell<'a>> {
        Self::header_cells(table)
            .into_iter()
            .enumerate()
            .map(|(index, cell)| Cell {
                text: row.get(index).map_or("", String::as_str),
                ..cell
            })
            .collect()
    }

    fn draw_header(&mut self, table: &Table) {
        let style = TextStyle::new(table.font_size).bold();
        let cells = Self::header_cells(table);
        self.draw_row(&cells, &style);
    }
}

impl DocumentComposer for PdfComposer {
    fn write_text(&mut self, text: &str, style: &TextStyle) -> Result<(), RenderError> {
        let height = style.line_height_mm();
        self.ensure_space(height);
        self.draw_text(text, style, SIDE_MARGIN_MM, CONTENT_WIDTH_MM, self.cursor_mm);
        self.cursor_mm += height;
        Ok(())
    }

    fn write_paragraph(&mut self, text: &str, style: &TextStyle) -> Result<(), RenderError> {
        for line in wrap_text(text, CONTENT_WIDTH_MM, style.size) {
            self.write_text(&line, style)?;
        }
        Ok(())
    }

    fn render_table(&mut self, table: &Table) -> Result<(), RenderError> {
        let style = TextStyle::new(table.font_size);
        let header_height = Self::row_height(&Self::header_cells(table), table.font_size);
        self.ensure_space(header_height * 2.0);
        self.draw_header(table);

        for row in &table.rows {
            let cells = Self::body_cells(table, row);
            if !self.fits(Self::row_height(&cells, table.font_size)) {
                self.new_page();
                self.draw_header(table);
            }
            self.draw_row(&cells, &style);
        }

        if let Some(footer) = &table.footer {
            let columns = &table.columns;
            let last_width = columns.last().map_or(0.0, |column| column.width_mm);
            let span_width = table.width_mm() - last_width;
            let cells = [
                Cell {
                    x_mm: SIDE_MARGIN_MM,
                    width_mm: span_width,
                    alignment: Alignment::Right,
                    text: footer.label.as_str(),
                },
                Cell {
                    x_mm: SIDE_MARGIN_MM + span_width,
                    width_mm: last_width,
                    alignment: columns.last().map_or(Alignment::Right, |c| c.alignment),
                    text: footer.value.as_str(),
                },
            ];
            if !self.fits(Self::row_height(&cells, table.font_size)) {
                self.new_page();
            }
            self.draw_row(&cells, &style.bold());
        }
        Ok(())
    }

    fn skip(&mut self, height_mm: f32) -> Result<(), RenderError> {
        if self.fits(height_mm) {
            self.cursor_mm += height_mm;
        } else {
            self.new_page();
        }
        Ok(())
    }

    fn write_page_footer(
        &mut self,
        lines: &[String],
        style: &TextStyle,
    ) -> Result<(), RenderError> {
        let height = style.line_height_mm();
        for (index, line) in lines.iter().enumerate() {
            let top = FOOTER_TOP_MM + index as f32 * height;
            self.draw_text(line, style, SIDE_MARGIN_MM, CONTENT_WIDTH_MM, top);
        }
        Ok(())
    }

    fn append_pages_from_bytes(&mut self, bytes: &[u8]) -> Result<usize, RenderError> {
        let document = lopdf::Document::load_mem(bytes)
            .map_err(|err| RenderError::UnreadableAttachment(err.to_string()))?;
        let pages = document.get_pages().len();
        if pages == 0 {
            return Err(RenderError::UnreadableAttachment(
                "document has no pages".into(),
            ));
        }
        self.appended.push(document);
        Ok(pages)
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn save_to_bytes(self) -> Result<Vec<u8>, RenderError> {
        let mut writer = BufWriter::new(Vec::<u8>::new());
        self.doc
            .save(&mut writer)
            .map_err(|err| RenderError::Pdf(err.to_string()))?;
        let composed = writer
            .into_inner()
            .map_err(|err| RenderError::Io(err.into_error()))?;
        if self.appended.is_empty() {
            return Ok(composed);
        }

        let mut merged = lopdf::Document::load_mem(&composed)?;
        for document in self.appended {
            merge::append_document(&mut merged, document)?;
        }
        merged.prune_objects();
        let mut bytes = Vec::new();
        merged.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

fn builtin_font(
    doc: &PdfDocumentReference,
    font: BuiltinFont,
) -> Result<IndirectFontRef, RenderError> {
    doc.add_builtin_font(font)
        .map_err(|err| RenderError::Pdf(err.to_string()))
}

fn aligned_x(text: &str, size: f32, alignment: Alignment, left_mm: f32, width_mm: f32) -> f32 {
    let text_width = text_width_mm(text, size);
    match alignment {
        Alignment::Left => left_mm,
        Alignment::Center => left_mm + ((width_mm - text_width) / 2.0).max(0.0),
        Alignment::Right => left_mm + (width_mm - text_width).max(0.0),
    }
}
