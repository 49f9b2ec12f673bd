//! Page canvas - drawing primitives over a `pdf-writer` content stream.
//!
//! The canvas only records operations; nothing is finalized until the page
//! is handed to the document writer. Text measurement uses an approximate
//! per-character width, which is adequate for centering and right-aligning
//! the short ASCII strings this document contains.

use pdf_writer::{Content, Name, Str};

/// Approximate character width as a fraction of font size. 0.5 is a
/// reasonable default for proportional fonts such as Helvetica.
const APPROX_CHAR_WIDTH_RATIO: f32 = 0.5;

/// The two built-in fonts the document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    /// Resource name referenced from the content stream.
    pub fn resource_name(self) -> Name<'static> {
        match self {
            Self::Helvetica => Name(b"F1"),
            Self::HelveticaBold => Name(b"F2"),
        }
    }

    /// PostScript base font name.
    pub fn base_font(self) -> Name<'static> {
        match self {
            Self::Helvetica => Name(b"Helvetica"),
            Self::HelveticaBold => Name(b"Helvetica-Bold"),
        }
    }
}

/// Estimate the rendered width of a string at the given font size.
pub fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * APPROX_CHAR_WIDTH_RATIO
}

/// Recording surface for one page. Holds the live drawing state until the
/// numbered document finalizes it.
pub struct PageCanvas {
    content: Content,
    op_count: usize,
}

impl PageCanvas {
    pub fn new() -> Self {
        Self {
            content: Content::new(),
            op_count: 0,
        }
    }

    /// True when nothing has been drawn yet.
    pub fn is_empty(&self) -> bool {
        self.op_count == 0
    }

    /// Draw a string with its baseline starting at `(x, y)`.
    pub fn text(&mut self, x: f32, y: f32, font: Font, size: f32, text: &str) {
        let encoded = encode_latin1(text);
        self.content.begin_text();
        self.content.set_font(font.resource_name(), size);
        self.content.next_line(x, y);
        self.content.show(Str(&encoded));
        self.content.end_text();
        self.op_count += 1;
    }

    /// Draw a string centered horizontally on `cx`.
    pub fn text_centered(&mut self, cx: f32, y: f32, font: Font, size: f32, text: &str) {
        let x = cx - text_width(text, size) / 2.0;
        self.text(x, y, font, size, text);
    }

    /// Draw a string ending at `right_x`.
    pub fn text_right(&mut self, right_x: f32, y: f32, font: Font, size: f32, text: &str) {
        let x = right_x - text_width(text, size);
        self.text(x, y, font, size, text);
    }

    /// Set the fill color used by subsequent text and filled shapes.
    pub fn set_fill_rgb(&mut self, r: f32, g: f32, b: f32) {
        self.content.set_fill_rgb(r, g, b);
        self.op_count += 1;
    }

    /// Stroke a straight line.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32) {
        self.content.set_line_width(width);
        self.content.move_to(x1, y1);
        self.content.line_to(x2, y2);
        self.content.stroke();
        self.op_count += 1;
    }

    /// Stroke a rectangle outline. `(x, y)` is the lower-left corner.
    pub fn rect_stroke(&mut self, x: f32, y: f32, w: f32, h: f32, line_width: f32) {
        self.content.set_line_width(line_width);
        self.content.rect(x, y, w, h);
        self.content.stroke();
        self.op_count += 1;
    }

    /// Fill a rectangle with the given color, then restore black fill.
    pub fn rect_fill(&mut self, x: f32, y: f32, w: f32, h: f32, rgb: (f32, f32, f32)) {
        self.content.set_fill_rgb(rgb.0, rgb.1, rgb.2);
        self.content.rect(x, y, w, h);
        self.content.fill_nonzero();
        self.content.set_fill_rgb(0.0, 0.0, 0.0);
        self.op_count += 1;
    }

    /// Finalize the recorded operations into content-stream bytes.
    pub(crate) fn finish(self) -> Vec<u8> {
        self.content.finish()
    }
}

impl Default for PageCanvas {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode text for the standard one-byte font encoding. Characters outside
/// Latin-1 are replaced, which cannot happen for the fixed document strings.
fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| if (ch as u32) < 256 { ch as u8 } else { b'?' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width_scales_with_size() {
        assert_eq!(text_width("abcd", 10.0), 20.0);
        assert_eq!(text_width("abcd", 20.0), 40.0);
    }

    #[test]
    fn test_canvas_records_operations() {
        let mut canvas = PageCanvas::new();
        assert!(canvas.is_empty());

        canvas.text(10.0, 10.0, Font::Helvetica, 9.0, "halo");
        assert!(!canvas.is_empty());

        let bytes = canvas.finish();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_encode_latin1_replaces_wide_chars() {
        assert_eq!(encode_latin1("abc"), b"abc".to_vec());
        assert_eq!(encode_latin1("a\u{2603}b"), b"a?b".to_vec());
    }
}
