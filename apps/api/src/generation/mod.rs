// Recommendation generation: learning resources and projects for the skills a
// résumé is missing. LLM calls go through llm_client only.

pub mod prompts;
pub mod recommendation;

pub use recommendation::{Advisor, LlmAdvisor, Recommendations, TemplateAdvisor};
