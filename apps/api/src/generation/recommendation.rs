//! Recommendation generation: learning resources and projects for missing skills.
//!
//! Pluggable behind [`Advisor`]; `AppState` holds an `Arc<dyn Advisor>`:
//! - `LlmAdvisor`: asks Claude for tailored resources (needs `ANTHROPIC_API_KEY`).
//! - `TemplateAdvisor`: curated offline table. Also the fallback when the LLM fails.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::prompts::{advisor_system, build_recommendation_prompt};
use crate::llm_client::LlmClient;

/// Message used when the résumé already covers every skill the JD asks for.
pub const NO_GAPS_MESSAGE: &str = "Excellent! You have all the required skills.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecommendation {
    pub skill: String,
    pub resources: Vec<String>,
    pub project: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub summary: String,
    pub items: Vec<SkillRecommendation>,
    /// Which advisor produced this: "llm" or "template".
    #[serde(default)]
    pub backend: String,
}

impl Recommendations {
    pub fn no_gaps(backend: &str) -> Self {
        Self {
            summary: NO_GAPS_MESSAGE.to_string(),
            items: vec![],
            backend: backend.to_string(),
        }
    }

    /// Renders the advice as plain text for the UI and the PDF report.
    pub fn to_plain_text(&self) -> String {
        let mut out = self.summary.trim().to_string();
        for (i, item) in self.items.iter().enumerate() {
            out.push_str(&format!("\n\n{}. {}", i + 1, item.skill.to_uppercase()));
            if !item.resources.is_empty() {
                out.push_str(&format!("\n   Learn: {}", item.resources.join("; ")));
            }
            if !item.project.trim().is_empty() {
                out.push_str(&format!("\n   Build: {}", item.project.trim()));
            }
        }
        out
    }
}

#[async_trait]
pub trait Advisor: Send + Sync {
    async fn recommend(&self, missing: &[String], role: &str) -> Result<Recommendations, AppError>;

    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmAdvisor
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct LlmAdvice {
    summary: String,
    #[serde(default)]
    items: Vec<SkillRecommendation>,
}

pub struct LlmAdvisor(pub LlmClient);

#[async_trait]
impl Advisor for LlmAdvisor {
    async fn recommend(&self, missing: &[String], role: &str) -> Result<Recommendations, AppError> {
        if missing.is_empty() {
            return Ok(Recommendations::no_gaps(self.backend()));
        }

        let prompt = build_recommendation_prompt(missing, role);
        let advice: LlmAdvice = self
            .0
            .call_json(&prompt, &advisor_system())
            .await
            .map_err(|e| AppError::Llm(format!("Recommendation generation failed: {e}")))?;

        Ok(Recommendations {
            summary: advice.summary,
            items: retain_requested(advice.items, missing),
            backend: self.backend().to_string(),
        })
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

/// Keeps only items for skills that were asked about, in the order they were asked.
fn retain_requested(items: Vec<SkillRecommendation>, missing: &[String]) -> Vec<SkillRecommendation> {
    missing
        .iter()
        .filter_map(|skill| {
            items
                .iter()
                .find(|item| item.skill.trim().eq_ignore_ascii_case(skill))
                .cloned()
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// TemplateAdvisor
// ────────────────────────────────────────────────────────────────────────────

struct Curated {
    skill: &'static str,
    resources: &'static [&'static str],
    project: &'static str,
}

#[rustfmt::skip]
static CURATED: &[Curated] = &[
    Curated { skill: "python", resources: &["The official Python Tutorial (docs.python.org)", "Automate the Boring Stuff with Python"], project: "Write a command-line tool that cleans and summarises a CSV dataset" },
    Curated { skill: "java", resources: &["Oracle's Java Tutorials", "Effective Java by Joshua Bloch"], project: "Build a small REST service with an embedded database and unit tests" },
    Curated { skill: "c++", resources: &["learncpp.com", "A Tour of C++ by Bjarne Stroustrup"], project: "Implement an in-memory key-value store with a simple text protocol" },
    Curated { skill: "javascript", resources: &["MDN JavaScript Guide", "javascript.info"], project: "Build an interactive to-do app that persists to local storage" },
    Curated { skill: "typescript", resources: &["The TypeScript Handbook"], project: "Port a small JavaScript project to strict-mode TypeScript" },
    Curated { skill: "html", resources: &["MDN Learn Web Development: HTML"], project: "Hand-write an accessible, semantic portfolio page" },
    Curated { skill: "css", resources: &["MDN Learn Web Development: CSS", "Flexbox Froggy and Grid Garden"], project: "Make your portfolio page fully responsive with Grid and Flexbox" },
    Curated { skill: "sql", resources: &["SQLBolt interactive lessons", "The PostgreSQL tutorial (postgresql.org)"], project: "Design a schema for a small shop and write its reporting queries" },
    Curated { skill: "nosql", resources: &["MongoDB University free courses"], project: "Store and query event logs in MongoDB with suitable indexes" },
    Curated { skill: "machine learning", resources: &["Machine Learning Specialization by Andrew Ng (Coursera)", "Hands-On Machine Learning with Scikit-Learn, Keras & TensorFlow"], project: "Train, tune and evaluate a model on a public Kaggle dataset" },
    Curated { skill: "deep learning", resources: &["fast.ai Practical Deep Learning for Coders", "Deep Learning Specialization (Coursera)"], project: "Fine-tune a pretrained network on a small custom dataset" },
    Curated { skill: "nlp", resources: &["Hugging Face NLP Course"], project: "Build a text classifier for support tickets and report its F1 score" },
    Curated { skill: "computer vision", resources: &["Stanford CS231n course notes"], project: "Build an image classifier with transfer learning and a simple web demo" },
    Curated { skill: "tensorflow", resources: &["TensorFlow tutorials (tensorflow.org)"], project: "Reimplement a classic Keras example and export it with SavedModel" },
    Curated { skill: "pytorch", resources: &["PyTorch official tutorials", "Deep Learning with PyTorch (Stevens, Antiga, Viehmann)"], project: "Write a training loop from scratch for an MNIST-style dataset" },
    Curated { skill: "scikit-learn", resources: &["scikit-learn User Guide"], project: "Compare three classifiers with cross-validated pipelines" },
    Curated { skill: "pandas", resources: &["pandas Getting Started tutorials", "Python for Data Analysis by Wes McKinney"], project: "Analyse a public dataset and publish a notebook with your findings" },
    Curated { skill: "numpy", resources: &["NumPy quickstart (numpy.org)"], project: "Implement linear regression with gradient descent using only NumPy" },
    Curated { skill: "generative ai", resources: &["DeepLearning.AI short courses on generative AI"], project: "Build a prompt-driven content tool with evaluation of its outputs" },
    Curated { skill: "llm", resources: &["Hugging Face LLM Course", "DeepLearning.AI short courses on LLM applications"], project: "Build a retrieval-augmented chatbot over your own notes" },
    Curated { skill: "transformers", resources: &["Hugging Face Transformers documentation", "The Illustrated Transformer by Jay Alammar"], project: "Fine-tune a small transformer for sentiment analysis" },
    Curated { skill: "django", resources: &["The official Django tutorial"], project: "Build a multi-user blog with authentication and an admin panel" },
    Curated { skill: "flask", resources: &["The Flask Mega-Tutorial by Miguel Grinberg"], project: "Build a small JSON API with Flask and SQLAlchemy" },
    Curated { skill: "fastapi", resources: &["The FastAPI official tutorial"], project: "Serve a trained model behind a typed FastAPI endpoint" },
    Curated { skill: "react", resources: &["react.dev Learn section"], project: "Build a dashboard that fetches and filters data from a public API" },
    Curated { skill: "angular", resources: &["Angular Tour of Heroes tutorial"], project: "Build a small CRUD app with routing and reactive forms" },
    Curated { skill: "node.js", resources: &["Node.js Learn section (nodejs.org)", "The Odin Project NodeJS path"], project: "Build a REST API with Express and integration tests" },
    Curated { skill: "spring boot", resources: &["Spring Guides (spring.io/guides)"], project: "Build a Spring Boot service with JPA, validation and tests" },
    Curated { skill: "aws", resources: &["AWS Skill Builder: Cloud Practitioner Essentials"], project: "Deploy a small web app on AWS with S3, Lambda and API Gateway" },
    Curated { skill: "azure", resources: &["Microsoft Learn AZ-900 learning path"], project: "Deploy a web app to Azure App Service with a managed database" },
    Curated { skill: "google cloud", resources: &["Google Cloud Skills Boost"], project: "Deploy a containerised service to Cloud Run" },
    Curated { skill: "docker", resources: &["Docker Get Started guide", "Play with Docker labs"], project: "Containerise an existing app with a multi-stage Dockerfile and Compose" },
    Curated { skill: "kubernetes", resources: &["Kubernetes Basics tutorial (kubernetes.io)", "Kubernetes the Hard Way by Kelsey Hightower"], project: "Run a multi-service app on a local kind cluster with health checks" },
    Curated { skill: "jenkins", resources: &["Jenkins pipeline tutorials (jenkins.io)"], project: "Write a Jenkinsfile that tests, builds and publishes a project" },
    Curated { skill: "git", resources: &["Pro Git (git-scm.com/book)", "Learn Git Branching"], project: "Contribute a documented pull request to an open-source project" },
    Curated { skill: "linux", resources: &["Linux Journey", "The Linux Command Line by William Shotts"], project: "Automate a server setup with shell scripts and systemd units" },
];

/// Offline advisor backed by a curated table.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateAdvisor;

impl TemplateAdvisor {
    pub fn advise(missing: &[String], role: &str) -> Recommendations {
        if missing.is_empty() {
            return Recommendations::no_gaps("template");
        }

        let items = missing
            .iter()
            .map(|skill| match CURATED.iter().find(|c| c.skill == skill.as_str()) {
                Some(c) => SkillRecommendation {
                    skill: skill.clone(),
                    resources: c.resources.iter().map(|r| r.to_string()).collect(),
                    project: c.project.to_string(),
                },
                None => SkillRecommendation {
                    skill: skill.clone(),
                    resources: vec![format!("The official {skill} documentation")],
                    project: format!("Build a small {role} portfolio project that uses {skill} end to end"),
                },
            })
            .collect();

        Recommendations {
            summary: format!(
                "To strengthen your fit for the {role} role, focus on: {}. \
                 Pair each resource with the suggested project and list the result on your resume.",
                missing.join(", ")
            ),
            items,
            backend: "template".to_string(),
        }
    }
}

#[async_trait]
impl Advisor for TemplateAdvisor {
    async fn recommend(&self, missing: &[String], role: &str) -> Result<Recommendations, AppError> {
        Ok(Self::advise(missing, role))
    }

    fn backend(&self) -> &'static str {
        "template"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::skills::vocabulary;

    fn owned(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_no_missing_skills_is_congratulation() {
        let rec = TemplateAdvisor.recommend(&[], "Data Scientist").await.unwrap();
        assert_eq!(rec.summary, NO_GAPS_MESSAGE);
        assert!(rec.items.is_empty());
        assert_eq!(rec.to_plain_text(), NO_GAPS_MESSAGE);
    }

    #[tokio::test]
    async fn test_template_covers_each_missing_skill_in_order() {
        let rec = TemplateAdvisor
            .recommend(&owned(&["aws", "docker"]), "DevOps Engineer")
            .await
            .unwrap();
        assert_eq!(rec.backend, "template");
        let skills: Vec<&str> = rec.items.iter().map(|i| i.skill.as_str()).collect();
        assert_eq!(skills, vec!["aws", "docker"]);
        assert!(rec.summary.contains("DevOps Engineer"));
        assert!(rec.items.iter().all(|i| !i.resources.is_empty()));
    }

    #[test]
    fn test_every_vocabulary_skill_is_curated() {
        for skill in vocabulary() {
            assert!(
                CURATED.iter().any(|c| c.skill == skill),
                "no curated advice for {skill}"
            );
        }
    }

    #[test]
    fn test_unknown_skill_gets_generic_advice() {
        let rec = TemplateAdvisor::advise(&owned(&["cobol"]), "General");
        assert_eq!(rec.items[0].resources, vec!["The official cobol documentation"]);
        assert!(rec.items[0].project.contains("General portfolio project"));
    }

    #[test]
    fn test_plain_text_lists_numbered_items() {
        let rec = TemplateAdvisor::advise(&owned(&["git"]), "Software Engineer");
        let text = rec.to_plain_text();
        assert!(text.contains("1. GIT"));
        assert!(text.contains("Learn: Pro Git"));
        assert!(text.contains("Build: "));
    }

    #[test]
    fn test_llm_items_filtered_to_requested_skills() {
        let items = vec![
            SkillRecommendation {
                skill: "Kubernetes".to_string(),
                resources: vec!["k8s docs".to_string()],
                project: "cluster".to_string(),
            },
            SkillRecommendation {
                skill: "rust".to_string(),
                resources: vec![],
                project: "unasked".to_string(),
            },
            SkillRecommendation {
                skill: "aws".to_string(),
                resources: vec![],
                project: "lambda".to_string(),
            },
        ];
        let kept = retain_requested(items, &owned(&["aws", "kubernetes"]));
        let projects: Vec<&str> = kept.iter().map(|i| i.project.as_str()).collect();
        assert_eq!(projects, vec!["lambda", "cluster"]);
    }

    #[test]
    fn test_llm_advice_json_shape() {
        let raw = r#"{"summary": "Focus on cloud.", "items": [
            {"skill": "aws", "resources": ["Skill Builder"], "project": "Deploy a Lambda"}
        ]}"#;
        let advice: LlmAdvice = serde_json::from_str(raw).unwrap();
        assert_eq!(advice.items.len(), 1);
        assert_eq!(advice.items[0].resources, vec!["Skill Builder"]);
    }
}
