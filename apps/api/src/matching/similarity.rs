//! Semantic similarity between résumé and JD, and the blended ATS score.
//!
//! Embedding backends are pluggable behind [`Embedder`]; `AppState` holds an
//! `Arc<dyn Embedder>` chosen at startup:
//! - `HttpEmbedder`: any OpenAI-compatible `/embeddings` server hosting a sentence
//!   model (default `all-MiniLM-L6-v2`).
//! - `LexicalEmbedder`: offline hashed term-frequency vectors. Deterministic, used when
//!   no embedding server is configured and in tests.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;

#[async_trait]
pub trait Embedder: Send + Sync {
    /// Returns one vector per input text, in input order.
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, AppError>;

    /// Short backend label surfaced in analysis results.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// HttpEmbedder
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingDatum {
    embedding: Vec<f32>,
    #[serde(default)]
    index: usize,
}

/// Client for an OpenAI-compatible embeddings endpoint.
pub struct HttpEmbedder {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
}

impl HttpEmbedder {
    pub fn new(base_url: &str, api_key: Option<String>, model: String) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/embeddings", base_url.trim_end_matches('/')),
            api_key,
            model,
        })
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, AppError> {
        let mut request = self.client.post(&self.endpoint).json(&EmbeddingRequest {
            model: &self.model,
            input: texts,
        });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Embedding(format!("request to {} failed: {e}", self.endpoint)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Embedding(format!("status {status}: {body}")));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| AppError::Embedding(format!("malformed response: {e}")))?;

        let vectors = ordered_vectors(parsed, texts.len())?;
        debug!(model = %self.model, count = vectors.len(), "Embedded texts");
        Ok(vectors)
    }

    fn backend(&self) -> &'static str {
        "http"
    }
}

/// Puts `data[]` back in input order and checks that every input got a vector.
fn ordered_vectors(mut response: EmbeddingResponse, expected: usize) -> Result<Vec<Vec<f32>>, AppError> {
    if response.data.len() != expected {
        return Err(AppError::Embedding(format!(
            "expected {expected} embeddings, got {}",
            response.data.len()
        )));
    }
    response.data.sort_by_key(|d| d.index);
    Ok(response.data.into_iter().map(|d| d.embedding).collect())
}

// ────────────────────────────────────────────────────────────────────────────
// LexicalEmbedder
// ────────────────────────────────────────────────────────────────────────────

const LEXICAL_DIMENSIONS: usize = 1024;

/// Words too common to say anything about fit.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "in", "is", "it", "of",
    "on", "or", "our", "that", "the", "this", "to", "we", "will", "with", "you", "your",
];

/// Offline embedder: sublinear term frequencies hashed into a fixed-size vector.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexicalEmbedder;

impl LexicalEmbedder {
    fn vectorize(text: &str) -> Vec<f32> {
        let mut counts = vec![0u32; LEXICAL_DIMENSIONS];
        let lowered = text.to_lowercase();
        let tokens = lowered
            .split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
            .filter(|t| !t.is_empty() && !STOPWORDS.contains(t));

        for token in tokens {
            let mut hasher = DefaultHasher::new();
            token.hash(&mut hasher);
            counts[(hasher.finish() % LEXICAL_DIMENSIONS as u64) as usize] += 1;
        }

        counts
            .into_iter()
            .map(|n| if n == 0 { 0.0 } else { 1.0 + (n as f32).ln() })
            .collect()
    }
}

#[async_trait]
impl Embedder for LexicalEmbedder {
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, AppError> {
        Ok(texts.iter().map(|t| Self::vectorize(t)).collect())
    }

    fn backend(&self) -> &'static str {
        "lexical"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// Cosine similarity. 0.0 for mismatched lengths or a zero vector.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Embeds both texts in one call and returns their cosine similarity.
pub async fn similarity_score(
    embedder: &dyn Embedder,
    resume_text: &str,
    jd_text: &str,
) -> Result<f32, AppError> {
    let vectors = embedder.embed(&[resume_text, jd_text]).await?;
    match vectors.as_slice() {
        [resume, jd] => Ok(cosine_similarity(resume, jd)),
        other => Err(AppError::Embedding(format!(
            "expected 2 embeddings, got {}",
            other.len()
        ))),
    }
}

/// Blends semantic similarity with the keyword score and clamps to [0, 1].
///
/// When the JD names no known skill the keyword score carries no information and
/// the semantic score is used alone.
pub fn calculate_ats_score(
    semantic: f32,
    keyword_score: f32,
    has_requirements: bool,
    keyword_weight: f32,
) -> f32 {
    let semantic = if semantic.is_finite() { semantic.clamp(0.0, 1.0) } else { 0.0 };
    let raw = if has_requirements {
        let w = keyword_weight.clamp(0.0, 1.0);
        w * keyword_score + (1.0 - w) * semantic
    } else {
        semantic
    };
    raw.clamp(0.0, 1.0)
}

/// Coarse verdict shown next to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchBand {
    Low,
    Moderate,
    Strong,
}

impl MatchBand {
    pub fn from_score(score: f32) -> Self {
        if score < 0.5 {
            MatchBand::Low
        } else if score < 0.75 {
            MatchBand::Moderate
        } else {
            MatchBand::Strong
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchBand::Low => "Low Match",
            MatchBand::Moderate => "Moderate Match",
            MatchBand::Strong => "Strong Match",
        }
    }
}

/// Missing skills combined with a near-zero score.
pub fn is_critical_gap(score: f32, missing_skills: &[String]) -> bool {
    !missing_skills.is_empty() && score < 0.1
}
