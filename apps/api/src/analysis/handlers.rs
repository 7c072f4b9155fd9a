use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::debug;

use crate::analysis::pipeline::{run_analysis, AnalysisInput, AnalysisOutcome, MISSING_INPUTS_MESSAGE};
use crate::errors::AppError;
use crate::matching::skills::vocabulary;
use crate::preprocessing::resume_parser::extract_resume_text;
use crate::report::{create_pdf_report, report_filename, ReportInput};
use crate::state::AppState;

/// Fields of the analyze form. Unknown fields are ignored.
#[derive(Debug, Default)]
struct AnalyzeForm {
    name: String,
    resume: Option<Bytes>,
    job_description: String,
}

async fn read_analyze_form(mut multipart: Multipart) -> Result<AnalyzeForm, AppError> {
    let mut form = AnalyzeForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed form data: {e}")))?
    {
        let Some(field_name) = field.name().map(str::to_owned) else {
            continue;
        };
        match field_name.as_str() {
            "name" => {
                form.name = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid name field: {e}")))?;
            }
            "job_description" => {
                form.job_description = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Invalid job_description field: {e}"))
                })?;
            }
            "resume" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid resume upload: {e}")))?;
                debug!("Received resume upload ({} bytes)", data.len());
                form.resume = Some(data);
            }
            other => debug!("Ignoring unknown form field '{other}'"),
        }
    }
    Ok(form)
}

/// POST /api/v1/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisOutcome>, AppError> {
    let form = read_analyze_form(multipart).await?;

    let resume = match form.resume {
        Some(data) if !data.is_empty() && !form.job_description.trim().is_empty() => data,
        _ => return Err(AppError::Validation(MISSING_INPUTS_MESSAGE.to_string())),
    };

    // pdf-extract is CPU-bound.
    let resume_text = tokio::task::spawn_blocking(move || extract_resume_text(&resume))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    let outcome = run_analysis(
        &state,
        AnalysisInput {
            name: form.name,
            resume_text,
            jd_text: form.job_description,
        },
    )
    .await?;
    Ok(Json(outcome))
}

/// POST /api/v1/report
/// Renders a previously returned analysis as a downloadable PDF.
pub async fn handle_report(Json(input): Json<ReportInput>) -> Result<impl IntoResponse, AppError> {
    input.validate().map_err(AppError::Validation)?;

    let filename = report_filename(&input.candidate_name);
    let pdf = tokio::task::spawn_blocking(move || create_pdf_report(&input))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        pdf,
    ))
}

#[derive(Serialize)]
pub struct SkillsResponse {
    pub skills: Vec<&'static str>,
}

/// GET /api/v1/skills
pub async fn handle_list_skills() -> Json<SkillsResponse> {
    Json(SkillsResponse {
        skills: vocabulary().collect(),
    })
}
