//! PDF screening report: layout of the analysis results on A4 pages.

pub mod font_metrics;
pub mod pdf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matching::similarity::{is_critical_gap, MatchBand};
use crate::preprocessing::text_cleaner::clean_text_for_pdf;
use font_metrics::Font;
use pdf::{Align, PdfCanvas, Rgb, BLACK};

pub const REPORT_TITLE: &str = "CareerVantage Resume Screening Report";
const TAGLINE: &str = "Analyze. Optimize. Get Hired.";

const BRAND_BLUE: Rgb = Rgb(0.0, 0.294, 0.553);
const MUTED: Rgb = Rgb(0.4, 0.4, 0.4);
const RED: Rgb = Rgb(0.776, 0.157, 0.157);
const AMBER: Rgb = Rgb(0.902, 0.494, 0.0);
const GREEN: Rgb = Rgb(0.18, 0.49, 0.196);

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything the report shows. Matches the shape returned by the analyze endpoint,
/// so a client can post its analysis result back unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportInput {
    pub candidate_name: String,
    pub ats_score: f32,
    pub role: String,
    #[serde(default)]
    pub resume_skills: Vec<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    pub recommendations: String,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
}

impl ReportInput {
    /// Checks the fields a client could get wrong when posting results back.
    pub fn validate(&self) -> Result<(), String> {
        if !self.ats_score.is_finite() || !(0.0..=1.0).contains(&self.ats_score) {
            return Err(format!(
                "ats_score must be between 0 and 1, got {}",
                self.ats_score
            ));
        }
        Ok(())
    }
}

/// `"Alex Smith"` → `"Alex_Smith_CareerVantage_Report.pdf"`.
/// Characters that are unsafe in a Content-Disposition filename are dropped.
pub fn report_filename(candidate_name: &str) -> String {
    let stem: String = candidate_name
        .trim()
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('_')
            } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                Some(c)
            } else {
                None
            }
        })
        .collect();
    let stem = if stem.trim_matches('_').is_empty() {
        "Candidate"
    } else {
        stem.as_str()
    };
    format!("{stem}_CareerVantage_Report.pdf")
}

fn skill_list(skills: &[String]) -> String {
    if skills.is_empty() {
        "None".to_string()
    } else {
        skills.join(", ")
    }
}

fn band_color(band: MatchBand) -> Rgb {
    match band {
        MatchBand::Low => RED,
        MatchBand::Moderate => AMBER,
        MatchBand::Strong => GREEN,
    }
}

fn section(canvas: &mut PdfCanvas, heading: &str, body: &str) {
    canvas.ln(6.0);
    canvas.set_font(Font::HelveticaBold, 12.0);
    canvas.set_color(BRAND_BLUE);
    canvas.cell(heading, Align::Left);
    canvas.set_font(Font::Helvetica, 11.0);
    canvas.set_color(BLACK);
    canvas.multi_cell(&clean_text_for_pdf(body));
}

/// Lays out the screening report and returns the PDF bytes.
pub fn create_pdf_report(input: &ReportInput) -> Result<Vec<u8>, ReportError> {
    let score = input.ats_score.clamp(0.0, 1.0);
    let band = MatchBand::from_score(score);
    let generated_at = input.generated_at.unwrap_or_else(Utc::now);

    let mut canvas = PdfCanvas::new();

    canvas.set_font(Font::HelveticaBold, 18.0);
    canvas.set_color(BRAND_BLUE);
    canvas.cell(REPORT_TITLE, Align::Center);
    canvas.set_font(Font::Helvetica, 11.0);
    canvas.set_color(MUTED);
    canvas.cell(TAGLINE, Align::Center);
    canvas.ln(4.0);
    canvas.rule();
    canvas.ln(6.0);

    canvas.set_font(Font::Helvetica, 12.0);
    canvas.set_color(BLACK);
    canvas.cell(
        &clean_text_for_pdf(&format!("Candidate: {}", input.candidate_name)),
        Align::Left,
    );
    canvas.cell(
        &clean_text_for_pdf(&format!("Target Role: {}", input.role)),
        Align::Left,
    );
    canvas.cell(
        &format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M UTC")),
        Align::Left,
    );

    canvas.ln(6.0);
    canvas.set_font(Font::HelveticaBold, 14.0);
    canvas.set_color(band_color(band));
    canvas.cell(
        &format!(
            "ATS Match Score: {:.1}% ({})",
            score * 100.0,
            band.label()
        ),
        Align::Left,
    );
    if is_critical_gap(score, &input.missing_skills) {
        canvas.set_font(Font::HelveticaBold, 12.0);
        canvas.set_color(RED);
        canvas.cell("Critical Gaps Detected!", Align::Left);
    }
    canvas.set_color(BLACK);

    section(
        &mut canvas,
        "Identified Skills (Resume):",
        &skill_list(&input.resume_skills),
    );
    section(
        &mut canvas,
        "Required Skills (Job Description):",
        &skill_list(&input.required_skills),
    );
    section(
        &mut canvas,
        "Missing Skills:",
        &skill_list(&input.missing_skills),
    );
    section(&mut canvas, "AI Recommendations:", &input.recommendations);

    canvas.finish(&clean_text_for_pdf(&format!(
        "{REPORT_TITLE} - {}",
        input.candidate_name
    )))
}
