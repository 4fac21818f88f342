//! Layout accumulator
//!
//! Cursor and page index threaded through section emission. Every block
//! reserves its height first; a block that would cross the content bottom
//! starts a new page.

use super::types::{Align, DrawOp, PageSetup, PaintStyle, Rgb};

/// Points to millimetres
const PT_TO_MM: f64 = 25.4 / 72.0;

/// Average Helvetica glyph advance, in em
const AVG_GLYPH_EM: f64 = 0.5;

pub struct Layout {
    page: PageSetup,
    cursor: f64,
    page_index: usize,
    ops: Vec<DrawOp>,
}

impl Layout {
    pub fn new(page: PageSetup) -> Self {
        Self {
            page,
            cursor: 0.0,
            page_index: 0,
            ops: Vec::new(),
        }
    }

    pub fn page(&self) -> &PageSetup {
        &self.page
    }

    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    pub fn page_count(&self) -> usize {
        self.page_index + 1
    }

    pub fn move_to(&mut self, y: f64) {
        self.cursor = y;
    }

    pub fn advance(&mut self, dy: f64) {
        self.cursor += dy;
    }

    /// Break the page if `height` does not fit below the cursor
    pub fn reserve(&mut self, height: f64) {
        if self.cursor + height > self.page.content_bottom() {
            self.ops.push(DrawOp::PageBreak);
            self.page_index += 1;
            self.cursor = self.page.margin;
        }
    }

    /// Ops emitted since the last call
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    // ------------------------------------------------------------------------
    // drawing helpers
    // ------------------------------------------------------------------------

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    pub fn font(&mut self, size: f64, bold: bool) {
        self.push(DrawOp::SetFont { size, bold });
    }

    pub fn text_color(&mut self, color: Rgb) {
        self.push(DrawOp::SetTextColor { color });
    }

    pub fn fill_color(&mut self, color: Rgb) {
        self.push(DrawOp::SetFillColor { color });
    }

    pub fn draw_color(&mut self, color: Rgb) {
        self.push(DrawOp::SetDrawColor { color });
    }

    pub fn text(&mut self, x: f64, y: f64, text: impl Into<String>) {
        self.push(DrawOp::Text {
            x,
            y,
            text: text.into(),
            align: Align::Left,
        });
    }

    pub fn centered_text(&mut self, y: f64, text: impl Into<String>) {
        self.push(DrawOp::Text {
            x: self.page.width / 2.0,
            y,
            text: text.into(),
            align: Align::Center,
        });
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, style: PaintStyle) {
        self.push(DrawOp::Rect { x, y, width, height, style });
    }

    /// Horizontal rule across the content width
    pub fn rule(&mut self, y: f64) {
        self.push(DrawOp::Line {
            x1: self.page.margin,
            y1: y,
            x2: self.page.width - self.page.margin,
            y2: y,
        });
    }
}

/// Estimated width of `text` in mm at `font_size` pt
pub fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * PT_TO_MM * AVG_GLYPH_EM
}

/// Greedy word wrap to `max_width` mm. Words longer than a line are split.
pub fn wrap_text(text: &str, font_size: f64, max_width: f64) -> Vec<String> {
    let char_width = text_width(" ", font_size);
    let max_chars = ((max_width / char_width).floor() as usize).max(1);

    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > max_chars {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let line_len = line.chars().count();
        if line.is_empty() {
            line.extend(word);
        } else if line_len + 1 + word.len() <= max_chars {
            line.push(' ');
            line.extend(word);
        } else {
            lines.push(std::mem::take(&mut line));
            line.extend(word);
        }
    }

    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}
