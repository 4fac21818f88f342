//! Report Composer
//!
//! Lays out Header, Student Profile, Prediction Result, Key Influencing
//! Factors, Actionable Recommendations and Footer, in that order.
//! Pure function of its inputs; `generated_at` only feeds the header.

use chrono::{DateTime, NaiveDate, Utc};

use super::layout::{wrap_text, Layout};
use super::profile::profile_rows;
use super::types::{DrawOp, PageSetup, PaintStyle, ReportDocument, Rgb, Section, SectionKind};
use crate::logic::drivers::{max_magnitude, REPORT_DRIVER_LIMIT};
use crate::logic::recommend::FALLBACK_ADVISORY;
use crate::logic::types::{DriverEntry, PredictionResult, StudentRecord};

pub const REPORT_TITLE: &str = "Student Performance Analysis";
pub const FOOTER_TEXT: &str = "Generated by Student Performance Predictor System";
pub const NO_DRIVERS_TEXT: &str = "No feature importance data available for this model.";
pub const NO_PROFILE_TEXT: &str = "No profile data provided.";

// ============================================================================
// GEOMETRY (mm)
// ============================================================================

const HEADER_BAND: f64 = 40.0;
const BODY_START: f64 = 55.0;
const HEADING_ADVANCE: f64 = 15.0;
const PROFILE_ROW: f64 = 10.0;
const PROFILE_VALUE_OFFSET: f64 = 35.0;
const RESULT_BOX: f64 = 30.0;
const RESULT_ADVANCE: f64 = 45.0;
const DRIVER_ROW: f64 = 8.0;
const BAR_X: f64 = 60.0;
const BAR_MAX_WIDTH: f64 = 80.0;
const REC_LINE: f64 = 6.0;
const REC_GAP: f64 = 2.0;
const SECTION_GAP: f64 = 10.0;
const BODY_FONT: f64 = 10.0;

/// Compose on A4
pub fn compose(
    profile: &StudentRecord,
    prediction: &PredictionResult,
    drivers: &[DriverEntry],
    recommendations: &[String],
    generated_at: DateTime<Utc>,
) -> ReportDocument {
    compose_with_page(PageSetup::default(), profile, prediction, drivers, recommendations, generated_at)
}

pub fn compose_with_page(
    page: PageSetup,
    profile: &StudentRecord,
    prediction: &PredictionResult,
    drivers: &[DriverEntry],
    recommendations: &[String],
    generated_at: DateTime<Utc>,
) -> ReportDocument {
    let mut layout = Layout::new(page);
    let mut sections = Vec::with_capacity(6);

    header(&mut layout, generated_at);
    close(&mut sections, &mut layout, SectionKind::Header);
    student_profile(&mut layout, profile);
    close(&mut sections, &mut layout, SectionKind::StudentProfile);
    prediction_result(&mut layout, prediction);
    close(&mut sections, &mut layout, SectionKind::PredictionResult);
    key_factors(&mut layout, drivers);
    close(&mut sections, &mut layout, SectionKind::KeyFactors);
    recommendations_section(&mut layout, recommendations);
    close(&mut sections, &mut layout, SectionKind::Recommendations);
    footer(&mut layout);
    close(&mut sections, &mut layout, SectionKind::Footer);

    ReportDocument {
        page,
        page_count: layout.page_count(),
        sections,
    }
}

/// `Student_Report_<YYYY-MM-DD>.pdf`
pub fn report_filename(date: NaiveDate) -> String {
    format!("Student_Report_{}.pdf", date.format("%Y-%m-%d"))
}

// ============================================================================
// SECTIONS
// ============================================================================

fn close(sections: &mut Vec<Section>, layout: &mut Layout, kind: SectionKind) {
    sections.push(Section {
        kind,
        ops: layout.take_ops(),
    });
}

fn header(l: &mut Layout, generated_at: DateTime<Utc>) {
    let width = l.page().width;
    let margin = l.page().margin;

    l.fill_color(Rgb::INDIGO);
    l.rect(0.0, 0.0, width, HEADER_BAND, PaintStyle::Fill);

    l.text_color(Rgb::WHITE);
    l.font(22.0, true);
    l.text(margin, 20.0, REPORT_TITLE);

    l.font(12.0, false);
    l.text(
        margin,
        30.0,
        format!("Generated on: {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
    );

    l.move_to(BODY_START);
}

/// Title + rule. Keeps the title on the same page as the first block.
fn heading(l: &mut Layout, title: &str, first_block: f64) {
    l.reserve(HEADING_ADVANCE + first_block);

    let margin = l.page().margin;
    let y = l.cursor();
    l.text_color(Rgb::SLATE);
    l.font(14.0, true);
    l.text(margin, y, title);
    l.draw_color(Rgb::RULE_GREY);
    l.rule(y + 2.0);

    l.advance(HEADING_ADVANCE);
    l.font(BODY_FONT, false);
}

fn student_profile(l: &mut Layout, profile: &StudentRecord) {
    heading(l, "Student Profile", PROFILE_ROW);

    let rows = profile_rows(profile);
    let margin = l.page().margin;
    let right_column = l.page().width / 2.0 + 10.0;

    if rows.is_empty() {
        l.text(margin, l.cursor(), NO_PROFILE_TEXT);
        l.advance(PROFILE_ROW);
    }

    for pair in rows.chunks(2) {
        l.reserve(PROFILE_ROW);
        let y = l.cursor();
        for (col, (label, value)) in pair.iter().enumerate() {
            let x = if col == 0 { margin } else { right_column };
            l.font(BODY_FONT, true);
            l.text(x, y, format!("{}:", label));
            l.font(BODY_FONT, false);
            l.text(x + PROFILE_VALUE_OFFSET, y, value.as_str());
        }
        l.advance(PROFILE_ROW);
    }

    l.advance(SECTION_GAP);
}

fn prediction_result(l: &mut Layout, prediction: &PredictionResult) {
    heading(l, "Prediction Result", RESULT_ADVANCE);

    let (fill, border, ink) = if prediction.is_pass() {
        (Rgb::PASS_FILL, Rgb::PASS_BORDER, Rgb::PASS_TEXT)
    } else {
        (Rgb::FAIL_FILL, Rgb::FAIL_BORDER, Rgb::FAIL_TEXT)
    };

    let margin = l.page().margin;
    let width = l.page().content_width();
    let y = l.cursor();

    l.fill_color(fill);
    l.draw_color(border);
    l.push(DrawOp::RoundedRect {
        x: margin,
        y,
        width,
        height: RESULT_BOX,
        radius: 3.0,
        style: PaintStyle::FillStroke,
    });

    l.font(16.0, true);
    l.text_color(ink);
    l.centered_text(y + 12.0, prediction.verdict_label());

    l.font(11.0, false);
    l.text_color(Rgb::BODY_GREY);
    l.centered_text(y + 22.0, format!("Confidence Level: {}%", prediction.confidence_percent()));

    l.advance(RESULT_ADVANCE);
}

fn key_factors(l: &mut Layout, drivers: &[DriverEntry]) {
    let drivers = &drivers[..drivers.len().min(REPORT_DRIVER_LIMIT)];
    let first = if drivers.is_empty() { SECTION_GAP } else { DRIVER_ROW };
    heading(l, "Key Influencing Factors", first);

    let margin = l.page().margin;

    if drivers.is_empty() {
        l.text(margin, l.cursor(), NO_DRIVERS_TEXT);
        l.advance(SECTION_GAP);
    } else {
        let max = match max_magnitude(drivers) {
            m if m > 0.0 => m,
            _ => 1.0,
        };

        for (i, driver) in drivers.iter().enumerate() {
            l.reserve(DRIVER_ROW);
            let y = l.cursor();
            let bar = driver.magnitude / max * BAR_MAX_WIDTH;

            l.text(margin, y, format!("{}. {}", i + 1, driver.name));
            l.fill_color(Rgb::BAR);
            l.rect(BAR_X, y - 3.0, bar, 3.0, PaintStyle::Fill);
            l.text(BAR_X + bar + 5.0, y, format!("{:.3}", driver.magnitude));

            l.advance(DRIVER_ROW);
        }
    }

    l.advance(SECTION_GAP);
}

fn recommendations_section(l: &mut Layout, recommendations: &[String]) {
    let fallback = [FALLBACK_ADVISORY.to_string()];
    let items = if recommendations.is_empty() { &fallback[..] } else { recommendations };

    let width = l.page().content_width();
    let wrapped: Vec<Vec<String>> = items
        .iter()
        .map(|rec| wrap_text(&format!("• {}", rec), BODY_FONT, width))
        .collect();
    let extent = |lines: &[String]| lines.len() as f64 * REC_LINE + REC_GAP;

    heading(l, "Actionable Recommendations", extent(&wrapped[0]));

    let margin = l.page().margin;
    for lines in &wrapped {
        l.reserve(extent(lines));
        let y = l.cursor();
        for (j, line) in lines.iter().enumerate() {
            l.text(margin, y + j as f64 * REC_LINE, line.as_str());
        }
        l.advance(extent(lines));
    }
}

fn footer(l: &mut Layout) {
    let y = l.page().height - 10.0;
    l.font(8.0, false);
    l.text_color(Rgb::FOOTER_GREY);
    l.centered_text(y, FOOTER_TEXT);
}
