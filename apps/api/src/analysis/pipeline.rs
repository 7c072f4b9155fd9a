//! The analysis pipeline: clean → skills → similarity → blended score → advice.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::{Recommendations, TemplateAdvisor};
use crate::matching::similarity::{
    calculate_ats_score, is_critical_gap, similarity_score, LexicalEmbedder, MatchBand,
};
use crate::matching::{identify_missing_skills, Embedder};
use crate::preprocessing::jd_parser::extract_jd_text;
use crate::preprocessing::text_cleaner::clean_text_for_analysis;
use crate::state::AppState;

pub const DEFAULT_CANDIDATE_NAME: &str = "Candidate";
pub const EMPTY_RESUME_MESSAGE: &str = "The Resume PDF appears empty.";
pub const MISSING_INPUTS_MESSAGE: &str =
    "Please upload both a Resume and a Job Description to start.";

#[derive(Debug, Clone)]
pub struct AnalysisInput {
    pub name: String,
    pub resume_text: String,
    pub jd_text: String,
}

/// Everything the UI shows after an analysis. Its JSON is also a valid report input.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub analysis_id: Uuid,
    pub candidate_name: String,
    pub role: String,
    /// Blended score, 0.0 – 1.0.
    pub ats_score: f32,
    /// `ats_score` as a percentage rounded to one decimal.
    pub ats_percent: f32,
    pub band: MatchBand,
    pub band_label: String,
    pub critical_gaps: bool,
    pub keyword_score: f32,
    pub semantic_score: f32,
    pub resume_skills: Vec<String>,
    pub required_skills: Vec<String>,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    /// Plain-text rendering of `advice`.
    pub recommendations: String,
    pub advice: Recommendations,
    pub embedding_backend: String,
    pub generated_at: DateTime<Utc>,
}

fn candidate_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_CANDIDATE_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Semantic similarity with the configured embedder, degrading to the lexical one.
async fn semantic_similarity(
    embedder: &dyn Embedder,
    resume_text: &str,
    jd_text: &str,
) -> Result<(f32, &'static str), AppError> {
    match similarity_score(embedder, resume_text, jd_text).await {
        Ok(score) => Ok((score, embedder.backend())),
        Err(e) => {
            warn!("Embedding backend '{}' failed, using lexical similarity: {e}", embedder.backend());
            let fallback = LexicalEmbedder;
            let score = similarity_score(&fallback, resume_text, jd_text).await?;
            Ok((score, fallback.backend()))
        }
    }
}

pub async fn run_analysis(state: &AppState, input: AnalysisInput) -> Result<AnalysisOutcome, AppError> {
    let analysis_id = Uuid::new_v4();
    let candidate_name = candidate_name(&input.name);

    let resume_text = clean_text_for_analysis(&input.resume_text);
    if resume_text.is_empty() {
        return Err(AppError::UnprocessableEntity(EMPTY_RESUME_MESSAGE.to_string()));
    }
    let jd_text = extract_jd_text(&input.jd_text);
    if jd_text.is_empty() {
        return Err(AppError::Validation(MISSING_INPUTS_MESSAGE.to_string()));
    }

    let gap = identify_missing_skills(&resume_text, &jd_text);
    let (semantic_score, embedding_backend) =
        semantic_similarity(state.embedder.as_ref(), &resume_text, &jd_text).await?;
    let ats_score = calculate_ats_score(
        semantic_score,
        gap.keyword_score,
        gap.has_requirements(),
        state.config.keyword_weight,
    );
    let band = MatchBand::from_score(ats_score);

    let advice = match state.advisor.recommend(&gap.missing_skills, &gap.role).await {
        Ok(advice) => advice,
        Err(e) => {
            warn!(%analysis_id, "Advisor '{}' failed, using curated advice: {e}", state.advisor.backend());
            TemplateAdvisor::advise(&gap.missing_skills, &gap.role)
        }
    };

    info!(
        %analysis_id,
        role = %gap.role,
        ats_score,
        keyword_score = gap.keyword_score,
        semantic_score,
        missing = gap.missing_skills.len(),
        "Analysis complete"
    );

    Ok(AnalysisOutcome {
        analysis_id,
        candidate_name,
        role: gap.role,
        ats_score,
        ats_percent: (ats_score * 1000.0).round() / 10.0,
        band,
        band_label: band.label().to_string(),
        critical_gaps: is_critical_gap(ats_score, &gap.missing_skills),
        keyword_score: gap.keyword_score,
        semantic_score,
        resume_skills: gap.resume_skills,
        required_skills: gap.required_skills,
        matched_skills: gap.matched_skills,
        missing_skills: gap.missing_skills,
        recommendations: advice.to_plain_text(),
        advice,
        embedding_backend: embedding_backend.to_string(),
        generated_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::config::Config;
    use crate::generation::recommendation::NO_GAPS_MESSAGE;
    use crate::generation::Advisor;
    use crate::report::ReportInput;

    struct FailingAdvisor;

    #[async_trait]
    impl Advisor for FailingAdvisor {
        async fn recommend(&self, _: &[String], _: &str) -> Result<Recommendations, AppError> {
            Err(AppError::Llm("boom".to_string()))
        }

        fn backend(&self) -> &'static str {
            "failing"
        }
    }

    struct FailingEmbedder;

    #[async_trait]
    impl Embedder for FailingEmbedder {
        async fn embed(&self, _: &[&str]) -> Result<Vec<Vec<f32>>, AppError> {
            Err(AppError::Embedding("connection refused".to_string()))
        }

        fn backend(&self) -> &'static str {
            "failing"
        }
    }

    fn offline_state() -> AppState {
        AppState {
            config: Config::default(),
            embedder: Arc::new(LexicalEmbedder),
            advisor: Arc::new(TemplateAdvisor),
        }
    }

    fn input(name: &str, resume: &str, jd: &str) -> AnalysisInput {
        AnalysisInput {
            name: name.to_string(),
            resume_text: resume.to_string(),
            jd_text: jd.to_string(),
        }
    }

    const RESUME: &str = "Jordan Lee\nBackend engineer. Python, Django, SQL, Docker and Git.\n\
                          Built REST APIs and data pipelines.";
    const JD: &str = "Backend Developer\nWe need Python, Django, SQL, AWS and Kubernetes. \
                      You will build REST APIs.";

    #[tokio::test]
    async fn test_full_pipeline_offline() {
        let outcome = run_analysis(&offline_state(), input("Jordan Lee", RESUME, JD))
            .await
            .unwrap();

        assert_eq!(outcome.candidate_name, "Jordan Lee");
        assert_eq!(outcome.role, "Backend Developer");
        assert_eq!(outcome.missing_skills, vec!["aws", "kubernetes"]);
        assert_eq!(outcome.matched_skills, vec!["python", "sql", "django"]);
        assert!((outcome.keyword_score - 0.6).abs() < 1e-6);
        assert!((0.0..=1.0).contains(&outcome.ats_score));
        assert_eq!(outcome.band, MatchBand::from_score(outcome.ats_score));
        assert_eq!(outcome.embedding_backend, "lexical");
        assert_eq!(outcome.advice.items.len(), 2);
        assert!(outcome.recommendations.contains("KUBERNETES"));
    }

    #[tokio::test]
    async fn test_blank_name_defaults_to_candidate() {
        let outcome = run_analysis(&offline_state(), input("   ", RESUME, JD)).await.unwrap();
        assert_eq!(outcome.candidate_name, DEFAULT_CANDIDATE_NAME);
    }

    #[tokio::test]
    async fn test_empty_resume_is_rejected() {
        let err = run_analysis(&offline_state(), input("A", " \n ", JD))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(ref m) if m == EMPTY_RESUME_MESSAGE));
    }

    #[tokio::test]
    async fn test_empty_jd_is_rejected() {
        let err = run_analysis(&offline_state(), input("A", RESUME, ""))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_no_gaps_gets_congratulation() {
        let outcome = run_analysis(&offline_state(), input("A", RESUME, "Python and Docker"))
            .await
            .unwrap();
        assert!(outcome.missing_skills.is_empty());
        assert!(!outcome.critical_gaps);
        assert_eq!(outcome.recommendations, NO_GAPS_MESSAGE);
    }

    #[tokio::test]
    async fn test_percent_has_one_decimal() {
        let outcome = run_analysis(&offline_state(), input("A", RESUME, JD)).await.unwrap();
        let scaled = outcome.ats_percent * 10.0;
        assert!((scaled - scaled.round()).abs() < 1e-3);
    }

    #[tokio::test]
    async fn test_failing_advisor_falls_back_to_template() {
        let mut state = offline_state();
        state.advisor = Arc::new(FailingAdvisor);
        let outcome = run_analysis(&state, input("A", RESUME, JD)).await.unwrap();
        assert_eq!(outcome.advice.backend, "template");
    }

    #[tokio::test]
    async fn test_failing_embedder_falls_back_to_lexical() {
        let mut state = offline_state();
        state.embedder = Arc::new(FailingEmbedder);
        let outcome = run_analysis(&state, input("A", RESUME, JD)).await.unwrap();
        assert_eq!(outcome.embedding_backend, "lexical");
        assert!(outcome.semantic_score > 0.0);
    }

    #[tokio::test]
    async fn test_outcome_json_is_a_report_input() {
        let outcome = run_analysis(&offline_state(), input("A", RESUME, JD)).await.unwrap();
        let json = serde_json::to_value(&outcome).unwrap();
        let report: ReportInput = serde_json::from_value(json).unwrap();
        assert_eq!(report.missing_skills, outcome.missing_skills);
        assert!(report.validate().is_ok());
    }
}
