//! Page-independent description of a generated document.
//!
//! Renderers build a [`Layout`] first; a [`DocumentComposer`](super::DocumentComposer)
//! then turns it into pages. Keeping the two apart makes the content of a
//! report comparable without parsing PDF output.

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const SIDE_MARGIN_MM: f32 = 15.0;
pub const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * SIDE_MARGIN_MM;

const PT_TO_MM: f32 = 0.352_778;
/// Average Helvetica advance width as a fraction of the font size.
const AVERAGE_GLYPH_RATIO: f32 = 0.5;
const LINE_SPACING: f32 = 1.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub weight: FontWeight,
    pub alignment: Alignment,
    /// Grey instead of black.
    pub muted: bool,
}

impl TextStyle {
    pub const fn new(size: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Regular,
            alignment: Alignment::Left,
            muted: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub const fn italic(mut self) -> Self {
        self.weight = FontWeight::Italic;
        self
    }

    pub const fn centered(mut self) -> Self {
        self.alignment = Alignment::Center;
        self
    }

    pub const fn muted(mut self) -> Self {
        self.muted = true;
        self
    }

    /// Font size in millimetres.
    pub fn size_mm(&self) -> f32 {
        self.size * PT_TO_MM
    }

    pub fn line_height_mm(&self) -> f32 {
        line_height_mm(self.size)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableColumn {
    pub header: String,
    pub width_mm: f32,
    pub alignment: Alignment,
}

impl TableColumn {
    pub fn new(header: impl Into<String>, width_mm: f32, alignment: Alignment) -> Self {
        Self {
            header: header.into(),
            width_mm,
            alignment,
        }
    }
}

/// Bold closing row: `label` spans every column but the last, `value` sits
/// in the last one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFooter {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
    pub footer: Option<TableFooter>,
    pub font_size: f32,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>, font_size: f32) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            footer: None,
            font_size,
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn with_footer(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.footer = Some(TableFooter {
            label: label.into(),
            value: value.into(),
        });
        self
    }

    pub fn width_mm(&self) -> f32 {
        self.columns.iter().map(|column| column.width_mm).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Single line, never wrapped.
    Text { content: String, style: TextStyle },
    /// Word-wrapped to the content width.
    Paragraph { content: String, style: TextStyle },
    Table(Table),
    Spacer(f32),
    /// Lines pinned to the bottom of the page that is current when drawn.
    PageFooter { lines: Vec<String>, style: TextStyle },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    blocks: Vec<Block>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, content: impl Into<String>, style: TextStyle) -> &mut Self {
        self.blocks.push(Block::Text {
            content: content.into(),
            style,
        });
        self
    }

    pub fn paragraph(&mut self, content: impl Into<String>, style: TextStyle) -> &mut Self {
        self.blocks.push(Block::Paragraph {
            content: content.into(),
            style,
        });
        self
    }

    pub fn table(&mut self, table: Table) -> &mut Self {
        self.blocks.push(Block::Table(table));
        self
    }

    pub fn spacer(&mut self, height_mm: f32) -> &mut Self {
        self.blocks.push(Block::Spacer(height_mm));
        self
    }

    pub fn page_footer(&mut self, lines: Vec<String>, style: TextStyle) -> &mut Self {
        self.blocks.push(Block::PageFooter { lines, style });
        self
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Every string drawn outside of tables, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .flat_map(|block| match block {
                Block::Text { content, .. } | Block::Paragraph { content, .. } => {
                    vec![content.as_str()]
                }
                Block::PageFooter { lines, .. } => lines.iter().map(String::as_str).collect(),
                Block::Table(_) | Block::Spacer(_) => Vec::new(),
            })
            .collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|text| text.contains(needle))
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Table(table) => Some(table),
            _ => None,
        })
    }
}

pub fn line_height_mm(size: f32) -> f32 {
    size * PT_TO_MM * LINE_SPACING
}

/// Estimated printed width of `text`; built-in fonts carry no metrics here.
pub fn text_width_mm(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * PT_TO_MM * AVERAGE_GLYPH_RATIO
}

/// Greedy word wrap. Explicit line breaks are kept and words longer than a
/// line are split.
pub fn wrap_text(text: &str, max_width_mm: f32, size: f32) -> Vec<String> {
    let glyph = size * PT_TO_MM * AVERAGE_GLYPH_RATIO;
    let max_chars = ((max_width_mm / glyph).floor() as usize).max(1);
    let mut out = Vec::new();
    for source_line in text.lines() {
        let mut current = String::new();
        let mut current_len = 0usize;
        for word in source_line.split_whitespace() {
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(max_chars) {
                let chunk_len = chunk.len();
                let needed = if current_len == 0 {
                    chunk_len
                } else {
                    current_len + 1 + chunk_len
                };
                if needed > max_chars && current_len > 0 {
                    out.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                if current_len > 0 {
                    current.push(' ');
                    current_len += 1;
                }
                current.extend(chunk.iter());
                current_len += chunk_len;
            }
        }
        out.push(current);
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}
