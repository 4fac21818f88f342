//! Report document types
//!
//! The document is a flat list of drawing instructions per section, ready for
//! an external PDF renderer. Coordinates are millimetres from the top-left of
//! the current page, font sizes are points.

use serde::Serialize;

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const INDIGO: Rgb = Rgb(63, 81, 181);
    pub const SLATE: Rgb = Rgb(44, 62, 80);
    pub const RULE_GREY: Rgb = Rgb(200, 200, 200);
    pub const BODY_GREY: Rgb = Rgb(60, 60, 60);
    pub const FOOTER_GREY: Rgb = Rgb(150, 150, 150);
    pub const BAR: Rgb = Rgb(100, 116, 139);

    pub const PASS_FILL: Rgb = Rgb(220, 252, 231);
    pub const PASS_BORDER: Rgb = Rgb(34, 197, 94);
    pub const PASS_TEXT: Rgb = Rgb(21, 128, 61);
    pub const FAIL_FILL: Rgb = Rgb(255, 235, 238);
    pub const FAIL_BORDER: Rgb = Rgb(239, 68, 68);
    pub const FAIL_TEXT: Rgb = Rgb(185, 28, 28);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaintStyle {
    Fill,
    FillStroke,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Center,
}

/// One renderer instruction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Helvetica at `size` pt
    SetFont { size: f64, bold: bool },
    SetTextColor { color: Rgb },
    SetFillColor { color: Rgb },
    SetDrawColor { color: Rgb },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        style: PaintStyle,
    },
    RoundedRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
        style: PaintStyle,
    },
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    Text { x: f64, y: f64, text: String, align: Align },
    /// Continue on a fresh page
    PageBreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Header,
    StudentProfile,
    PredictionResult,
    KeyFactors,
    Recommendations,
    Footer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub ops: Vec<DrawOp>,
}

/// Page geometry (A4 portrait by default)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSetup {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            width: 210.0,
            height: 297.0,
            margin: 20.0,
        }
    }
}

impl PageSetup {
    /// Lowest y a block may reach before a page break
    pub fn content_bottom(&self) -> f64 {
        self.height - self.margin
    }

    pub fn content_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }
}

/// Composed report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub page: PageSetup,
    pub page_count: usize,
    pub sections: Vec<Section>,
}

impl ReportDocument {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

impl Section {
    /// Text strings in emission order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
