// Prompt constants for recommendation generation.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// Persona for the advisor; the JSON-only rules are appended by [`advisor_system`].
const ADVISOR_PERSONA: &str = "You are a pragmatic career coach for software and data roles. \
    You recommend concrete, well-known learning resources and small portfolio projects.";

pub fn advisor_system() -> String {
    format!("{ADVISOR_PERSONA} {JSON_ONLY_SYSTEM}")
}

/// Recommendation prompt template. Replace `{role}` and `{missing_skills}` before sending.
pub const RECOMMENDATION_PROMPT_TEMPLATE: &str = r#"A candidate is applying for a {role} position.
Their resume is missing these technical skills required by the job description:
{missing_skills}

Suggest specific learning resources and projects to learn these technical skills.

Return a JSON object with this EXACT schema (no extra fields):
{
  "summary": "Two or three sentences on how to close the gap for this role.",
  "items": [
    {
      "skill": "docker",
      "resources": ["Docker 'Get Started' guide", "Play with Docker labs"],
      "project": "Containerise an existing web app and publish the image with a CI job"
    }
  ]
}

Rules:
- Exactly one item per missing skill, using the skill name exactly as listed.
- 1 to 3 resources per item; name real courses, books or official docs.
- One project per item, small enough to finish in a weekend, relevant to the {role} role."#;

pub fn build_recommendation_prompt(missing: &[String], role: &str) -> String {
    let list = missing
        .iter()
        .map(|s| format!("- {s}"))
        .collect::<Vec<_>>()
        .join("\n");
    RECOMMENDATION_PROMPT_TEMPLATE
        .replace("{role}", role)
        .replace("{missing_skills}", &list)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_every_missing_skill() {
        let prompt = build_recommendation_prompt(
            &["aws".to_string(), "kubernetes".to_string()],
            "DevOps Engineer",
        );
        assert!(prompt.contains("- aws\n- kubernetes"));
        assert!(prompt.contains("DevOps Engineer position"));
        assert!(!prompt.contains("{role}"));
    }

    #[test]
    fn test_system_prompt_demands_json() {
        assert!(advisor_system().contains("valid JSON only"));
    }
}
