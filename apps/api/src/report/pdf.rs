//! Minimal cursor-based page writer on top of `lopdf`.
//!
//! The cursor moves top-down like a typewriter: `cell` writes one line, `multi_cell`
//! wraps a block, `ln` adds vertical space. A new page starts automatically when the
//! next line would cross the bottom margin. Text must already be Latin-1 clean
//! (see `preprocessing::text_cleaner::clean_text_for_pdf`); fonts are the base-14
//! Helvetica pair with WinAnsi encoding, so nothing is embedded.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use super::font_metrics::Font;
use super::ReportError;
use crate::preprocessing::text_cleaner::to_latin1_bytes;

/// A4 portrait in points.
pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;
/// 10 mm on every side.
pub const MARGIN: f32 = 28.35;

const LINE_SPACING: f32 = 1.45;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// An RGB fill colour, components in 0.0 – 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

pub const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);

pub struct PdfCanvas {
    pages: Vec<Vec<Operation>>,
    /// Distance from the top edge to the top of the next line.
    cursor_y: f32,
    font: Font,
    size_pt: f32,
    color: Rgb,
}

impl Default for PdfCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfCanvas {
    pub fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            cursor_y: MARGIN,
            font: Font::Helvetica,
            size_pt: 12.0,
            color: BLACK,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn content_width(&self) -> f32 {
        PAGE_WIDTH - 2.0 * MARGIN
    }

    pub fn set_font(&mut self, font: Font, size_pt: f32) {
        self.font = font;
        self.size_pt = size_pt;
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    fn line_height(&self) -> f32 {
        self.size_pt * LINE_SPACING
    }

    pub fn add_page(&mut self) {
        self.pages.push(Vec::new());
        self.cursor_y = MARGIN;
    }

    fn ensure_room(&mut self, height: f32) {
        if self.cursor_y + height > PAGE_HEIGHT - MARGIN {
            self.add_page();
        }
    }

    fn current_ops(&mut self) -> &mut Vec<Operation> {
        // `pages` starts with one page and only ever grows.
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Writes one line of text and moves the cursor below it.
    /// Text wider than the content area is wrapped instead of clipped.
    pub fn cell(&mut self, text: &str, align: Align) {
        let metrics = self.font.metrics();
        let width = metrics.measure_pt(text, self.size_pt);
        if width > self.content_width() {
            self.multi_cell(text);
            return;
        }

        let line_height = self.line_height();
        self.ensure_room(line_height);

        let x = match align {
            Align::Left => MARGIN,
            Align::Center => (PAGE_WIDTH - width) / 2.0,
        };
        // Baseline sits roughly one font size below the top of the line box.
        let baseline = PAGE_HEIGHT - (self.cursor_y + self.size_pt);

        let Rgb(r, g, b) = self.color;
        let font_name = self.font.resource_name();
        let size = self.size_pt;
        self.current_ops().extend([
            Operation::new("BT", vec![]),
            Operation::new("rg", vec![r.into(), g.into(), b.into()]),
            Operation::new(
                "Tf",
                vec![Object::Name(font_name.as_bytes().to_vec()), size.into()],
            ),
            Operation::new("Td", vec![x.into(), baseline.into()]),
            Operation::new("Tj", vec![Object::string_literal(to_latin1_bytes(text))]),
            Operation::new("ET", vec![]),
        ]);

        self.cursor_y += line_height;
    }

    /// Writes a wrapped block, one `cell` per wrapped line.
    pub fn multi_cell(&mut self, text: &str) {
        let lines = self
            .font
            .metrics()
            .wrap_text(text, self.size_pt, self.content_width());
        for line in lines {
            if line.is_empty() {
                self.ln(self.line_height());
            } else {
                self.cell(&line, Align::Left);
            }
        }
    }

    /// Moves the cursor down by `height` points.
    pub fn ln(&mut self, height: f32) {
        self.cursor_y += height;
        if self.cursor_y > PAGE_HEIGHT - MARGIN {
            self.add_page();
        }
    }

    /// Draws a thin horizontal rule across the content area at the cursor.
    pub fn rule(&mut self) {
        self.ensure_room(4.0);
        let y = PAGE_HEIGHT - self.cursor_y;
        self.current_ops().extend([
            Operation::new("w", vec![0.5_f32.into()]),
            Operation::new("m", vec![MARGIN.into(), y.into()]),
            Operation::new("l", vec![(PAGE_WIDTH - MARGIN).into(), y.into()]),
            Operation::new("S", vec![]),
        ]);
        self.cursor_y += 4.0;
    }

    /// Serializes all pages into a PDF document.
    pub fn finish(self, title: &str) -> Result<Vec<u8>, ReportError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(font_dictionary(Font::Helvetica));
        let bold_id = doc.add_object(font_dictionary(Font::HelveticaBold));
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                Font::Helvetica.resource_name() => regular_id,
                Font::HelveticaBold.resource_name() => bold_id,
            },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());
        for operations in self.pages {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let media_box: Vec<Object> =
            vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()];
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => media_box,
            }),
        );

        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(to_latin1_bytes(title)),
            "Producer" => Object::string_literal("CareerVantage"),
        });
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

fn font_dictionary(font: Font) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}
