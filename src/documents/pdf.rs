//! PDF layout on A4 pages with the built-in Helvetica fonts.
//!
//! `PdfCanvas` places text directly: a vertical cursor moves down the page,
//! lines wrap on an estimated glyph width and a new page starts when the
//! bottom margin is reached.

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

use super::html::{Align, BlockKind, TextBlock};
use super::DocumentError;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 25.0;
const PT_TO_MM: f32 = 0.352_778;
/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_EM: f32 = 0.5;
const LINE_SPACING: f32 = 1.45;
const LAYER_NAME: &str = "Contenido";

pub const BODY_SIZE: f32 = 11.0;

#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
    pub align: Align,
    pub indent_mm: f32,
}

impl TextStyle {
    pub fn body() -> Self {
        Self {
            size: BODY_SIZE,
            bold: false,
            align: Align::Left,
            indent_mm: 0.0,
        }
    }

    pub fn title() -> Self {
        Self {
            size: 16.0,
            bold: true,
            align: Align::Center,
            indent_mm: 0.0,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn sized(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn aligned(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn indented(mut self, indent_mm: f32) -> Self {
        self.indent_mm = indent_mm;
        self
    }
}

pub struct PdfCanvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    cursor_mm: f32,
    pages: usize,
}

impl PdfCanvas {
    pub fn new(title: &str) -> Result<Self, DocumentError> {
        let (doc, page, layer) = PdfDocument::new(
            title,
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            LAYER_NAME,
        );
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            cursor_mm: PAGE_HEIGHT_MM - MARGIN_MM,
            pages: 1,
        })
    }

    pub fn page_count(&self) -> usize {
        self.pages
    }

    /// Write a paragraph, wrapping it to the usable width.
    pub fn text(&mut self, text: &str, style: TextStyle) {
        let usable = PAGE_WIDTH_MM - 2.0 * MARGIN_MM - style.indent_mm;
        let glyph = glyph_width_mm(style.size);
        let max_chars = ((usable / glyph).floor() as usize).max(10);

        for line in wrap_text(text, max_chars) {
            self.line(&line, style, glyph);
        }
    }

    /// Move the cursor down by `mm`.
    pub fn space(&mut self, mm: f32) {
        if self.cursor_mm - mm < MARGIN_MM {
            self.new_page();
        } else {
            self.cursor_mm -= mm;
        }
    }

    /// Blank line for a handwritten signature with a caption below it.
    pub fn signature(&mut self, caption: &str, align: Align) {
        self.space(18.0);
        let style = TextStyle::body().aligned(align);
        self.text("______________________________", style);
        self.text(caption, style.sized(9.0));
    }

    pub fn finish(self) -> Result<Vec<u8>, DocumentError> {
        Ok(self.doc.save_to_bytes()?)
    }

    fn line(&mut self, line: &str, style: TextStyle, glyph: f32) {
        let line_height = style.size * PT_TO_MM * LINE_SPACING;
        if self.cursor_mm - line_height < MARGIN_MM {
            self.new_page();
        }
        self.cursor_mm -= line_height;

        let width = line.chars().count() as f32 * glyph;
        let x = match style.align {
            Align::Left => MARGIN_MM + style.indent_mm,
            Align::Center => ((PAGE_WIDTH_MM - width) / 2.0).max(MARGIN_MM),
            Align::Right => (PAGE_WIDTH_MM - MARGIN_MM - width).max(MARGIN_MM),
        };
        let font = if style.bold { &self.bold } else { &self.regular };

        self.layer
            .use_text(line, style.size, Mm(x), Mm(self.cursor_mm), font);
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor_mm = PAGE_HEIGHT_MM - MARGIN_MM;
        self.pages += 1;
    }
}

fn glyph_width_mm(size: f32) -> f32 {
    size * AVG_GLYPH_EM * PT_TO_MM
}

/// Greedy word wrap on character count; words longer than a line are split.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let current_len = current.chars().count();
        if current_len > 0 && current_len + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Lay out flattened HTML blocks as a PDF.
pub fn render_blocks(title: &str, blocks: &[TextBlock]) -> Result<Vec<u8>, DocumentError> {
    let mut canvas = PdfCanvas::new(title)?;

    for block in blocks {
        match block.kind {
            BlockKind::Heading(level) => {
                let size = match level {
                    1 => 16.0,
                    2 => 14.0,
                    3 => 13.0,
                    _ => 12.0,
                };
                canvas.text(
                    &block.text,
                    TextStyle::body().sized(size).bold().aligned(block.align),
                );
                canvas.space(3.0);
            }
            BlockKind::Paragraph => {
                canvas.text(&block.text, TextStyle::body().aligned(block.align));
                canvas.space(2.0);
            }
            BlockKind::ListItem => {
                canvas.text(
                    &format!("- {}", block.text),
                    TextStyle::body().indented(6.0),
                );
                canvas.space(1.0);
            }
        }
    }

    canvas.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_respects_width() {
        let lines = wrap_text("uno dos tres cuatro cinco seis", 9);
        assert_eq!(lines, vec!["uno dos", "tres", "cuatro", "cinco", "seis"]);
        assert!(lines.iter().all(|l| l.chars().count() <= 9));
    }

    #[test]
    fn test_wrap_text_splits_long_words() {
        let lines = wrap_text("abcdefghij xy", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn test_wrap_text_empty() {
        assert!(wrap_text("   ", 20).is_empty());
    }

    #[test]
    fn test_canvas_produces_pdf_bytes() {
        let mut canvas = PdfCanvas::new("Prueba").unwrap();
        canvas.text("Constancia de trabajo", TextStyle::title());
        canvas.text("Se deja constancia de que la persona trabaja aquí.", TextStyle::body());
        let pdf = canvas.finish().unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_text_breaks_pages() {
        let mut canvas = PdfCanvas::new("Largo").unwrap();
        for _ in 0..120 {
            canvas.text("Párrafo de relleno para forzar un salto de página.", TextStyle::body());
        }
        assert!(canvas.page_count() > 1);
    }
}
