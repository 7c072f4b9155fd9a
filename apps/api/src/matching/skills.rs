//! Skill vocabulary and résumé-vs-JD skill gap analysis.
//!
//! Matching is case-insensitive and works on whole tokens. A token is a run of
//! `[a-z0-9+#.]` with surrounding dots trimmed, so `java` is not found inside
//! `javascript`, `git` not inside `github`, and `node.js` stays one token.
//! Hyphens separate tokens: "Python-based" mentions python, while hyphenated skill
//! names such as `scikit-learn` are matched as a token sequence.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::roles::detect_role;

/// A canonical skill name plus the alternative spellings that count as the same skill.
struct SkillSpec {
    name: &'static str,
    aliases: &'static [&'static str],
}

const fn skill(name: &'static str, aliases: &'static [&'static str]) -> SkillSpec {
    SkillSpec { name, aliases }
}

#[rustfmt::skip]
static VOCABULARY: &[SkillSpec] = &[
    // Programming languages
    skill("python", &[]),
    skill("java", &[]),
    skill("c++", &["cpp"]),
    skill("javascript", &["js", "ecmascript"]),
    skill("typescript", &[]),
    skill("html", &["html5"]),
    skill("css", &["css3"]),
    skill("sql", &[]),
    skill("nosql", &["no-sql"]),
    // AI / ML
    skill("machine learning", &["ml"]),
    skill("deep learning", &[]),
    skill("nlp", &["natural language processing"]),
    skill("computer vision", &[]),
    skill("tensorflow", &[]),
    skill("pytorch", &[]),
    skill("scikit-learn", &["sklearn", "scikit learn"]),
    skill("pandas", &[]),
    skill("numpy", &[]),
    skill("generative ai", &["genai", "gen ai"]),
    skill("llm", &["llms", "large language models", "large language model"]),
    skill("transformers", &[]),
    // Web & frameworks
    skill("django", &[]),
    skill("flask", &[]),
    skill("fastapi", &[]),
    skill("react", &["reactjs", "react.js"]),
    skill("angular", &["angularjs"]),
    skill("node.js", &["nodejs"]),
    skill("spring boot", &["springboot"]),
    // DevOps & cloud
    skill("aws", &["amazon web services"]),
    skill("azure", &[]),
    skill("google cloud", &["gcp", "google cloud platform"]),
    skill("docker", &[]),
    skill("kubernetes", &["k8s"]),
    skill("jenkins", &[]),
    skill("git", &[]),
    skill("linux", &[]),
];

static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z0-9+#.]+").expect("token pattern is a static literal"));

/// Splits already-lowercased text into matchable tokens.
fn tokenize(text: &str) -> Vec<&str> {
    TOKEN
        .find_iter(text)
        .map(|m| m.as_str().trim_matches('.'))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Every spelling of every skill as a token sequence, longest first, paired with
/// its index in `VOCABULARY`.
static PHRASES: Lazy<Vec<(Vec<&'static str>, usize)>> = Lazy::new(|| {
    let mut phrases: Vec<(Vec<&'static str>, usize)> = VOCABULARY
        .iter()
        .enumerate()
        .flat_map(|(idx, spec)| {
            std::iter::once(spec.name)
                .chain(spec.aliases.iter().copied())
                .map(move |spelling| (tokenize(spelling), idx))
        })
        .collect();
    // Stable: equal lengths keep vocabulary order.
    phrases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    phrases
});

/// Every canonical skill name, in vocabulary order.
pub fn vocabulary() -> impl Iterator<Item = &'static str> {
    VOCABULARY.iter().map(|spec| spec.name)
}

/// Returns the canonical skills mentioned in `text`, in vocabulary order.
///
/// Tokens are scanned left to right and the longest spelling starting at each
/// position wins, so "no-sql" counts as nosql only, not also as sql.
pub fn extract_skills(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let tokens = tokenize(&lowered);
    let mut found = vec![false; VOCABULARY.len()];

    let mut pos = 0;
    while pos < tokens.len() {
        let rest = &tokens[pos..];
        match PHRASES.iter().find(|(phrase, _)| rest.starts_with(phrase)) {
            Some((phrase, idx)) => {
                found[*idx] = true;
                pos += phrase.len();
            }
            None => pos += 1,
        }
    }

    VOCABULARY
        .iter()
        .zip(found)
        .filter(|(_, hit)| *hit)
        .map(|(spec, _)| spec.name.to_string())
        .collect()
}

/// Outcome of comparing the skills in a résumé with those a JD asks for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
    pub resume_skills: Vec<String>,
    pub required_skills: Vec<String>,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    /// |matched| / |required|; 0.0 when the JD names no known skill.
    pub keyword_score: f32,
    pub role: String,
}

impl SkillGap {
    pub fn has_requirements(&self) -> bool {
        !self.required_skills.is_empty()
    }
}

/// Extracts skills from both texts, splits the JD's skills into matched and missing,
/// and detects the target role from the JD.
pub fn identify_missing_skills(resume_text: &str, jd_text: &str) -> SkillGap {
    let resume_skills = extract_skills(resume_text);
    let required_skills = extract_skills(jd_text);

    let (matched_skills, missing_skills): (Vec<String>, Vec<String>) = required_skills
        .iter()
        .cloned()
        .partition(|s| resume_skills.contains(s));

    let keyword_score = if required_skills.is_empty() {
        0.0
    } else {
        matched_skills.len() as f32 / required_skills.len() as f32
    };

    let role = detect_role(jd_text, &required_skills);

    SkillGap {
        resume_skills,
        required_skills,
        matched_skills,
        missing_skills,
        keyword_score,
        role,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_in_vocabulary_order() {
        let skills = extract_skills("Docker, Python and SQL daily");
        assert_eq!(skills, vec!["python", "sql", "docker"]);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(extract_skills("PYTHON"), vec!["python"]);
    }

    #[test]
    fn test_java_not_inside_javascript() {
        assert_eq!(extract_skills("Expert in JavaScript"), vec!["javascript"]);
    }

    #[test]
    fn test_git_not_inside_github_or_digital() {
        assert!(extract_skills("digital marketing on GitHub").is_empty());
    }

    #[test]
    fn test_sql_not_inside_nosql_or_mysql() {
        assert_eq!(extract_skills("MySQL and NoSQL stores"), vec!["nosql"]);
    }

    #[test]
    fn test_symbols_in_skill_names() {
        let skills = extract_skills("C++, Node.js, scikit-learn");
        assert_eq!(skills, vec!["c++", "scikit-learn", "node.js"]);
    }

    #[test]
    fn test_sentence_punctuation_does_not_block_match() {
        assert_eq!(extract_skills("I write Python."), vec!["python"]);
        assert_eq!(extract_skills("(AWS)"), vec!["aws"]);
    }

    #[test]
    fn test_aliases_map_to_canonical_names() {
        let skills = extract_skills("k8s on GCP, models in sklearn");
        assert_eq!(skills, vec!["scikit-learn", "google cloud", "kubernetes"]);
    }

    #[test]
    fn test_hyphen_after_skill_is_a_boundary() {
        assert_eq!(extract_skills("Python-based, AWS-certified"), vec!["python", "aws"]);
        assert_eq!(
            extract_skills("Python-based services, AWS-certified, Kubernetes-native, Docker-compose"),
            vec!["python", "aws", "docker", "kubernetes"]
        );
    }

    #[test]
    fn test_hyphenated_spellings_win_over_their_parts() {
        assert_eq!(extract_skills("no-sql databases"), vec!["nosql"]);
        assert_eq!(extract_skills("scikit-learn pipelines"), vec!["scikit-learn"]);
        assert_eq!(extract_skills("cloud-native on node.js."), vec!["node.js"]);
    }

    #[test]
    fn test_every_spelling_finds_its_skill() {
        for spec in VOCABULARY {
            for spelling in std::iter::once(spec.name).chain(spec.aliases.iter().copied()) {
                assert_eq!(
                    extract_skills(&format!("Experience with {spelling}.")),
                    vec![spec.name],
                    "spelling {spelling:?}"
                );
            }
        }
    }

    #[test]
    fn test_multiword_skill_across_line_break() {
        assert_eq!(extract_skills("machine\nlearning"), vec!["machine learning"]);
    }

    #[test]
    fn test_multiword_skill() {
        assert_eq!(
            extract_skills("Applied machine learning"),
            vec!["machine learning"]
        );
    }

    #[test]
    fn test_vocabulary_covers_all_categories() {
        let vocab: Vec<&str> = vocabulary().collect();
        for expected in ["python", "pytorch", "fastapi", "kubernetes"] {
            assert!(vocab.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn test_gap_partitions_required_skills() {
        let gap = identify_missing_skills(
            "Python developer with Docker and Git",
            "We need Python, Docker, Kubernetes and AWS",
        );
        assert_eq!(gap.required_skills, vec!["python", "aws", "docker", "kubernetes"]);
        assert_eq!(gap.matched_skills, vec!["python", "docker"]);
        assert_eq!(gap.missing_skills, vec!["aws", "kubernetes"]);
        assert!((gap.keyword_score - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_gap_with_no_requirements_scores_zero() {
        let gap = identify_missing_skills("Python", "Friendly team, great snacks");
        assert!(!gap.has_requirements());
        assert!(gap.missing_skills.is_empty());
        assert_eq!(gap.keyword_score, 0.0);
        assert_eq!(gap.role, "General");
    }

    #[test]
    fn test_full_coverage_scores_one() {
        let gap = identify_missing_skills("React, TypeScript, CSS", "React and TypeScript");
        assert!(gap.missing_skills.is_empty());
        assert!((gap.keyword_score - 1.0).abs() < f32::EPSILON);
    }
}
