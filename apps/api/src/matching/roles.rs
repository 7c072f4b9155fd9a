//! Target-role detection from a job description.

/// Returned when neither a title phrase nor a skill signature points at a role.
pub const GENERAL_ROLE: &str = "General";

struct RoleProfile {
    name: &'static str,
    /// Phrases that name the role outright in a JD title or summary.
    titles: &'static [&'static str],
    /// Canonical skill names (see `skills::VOCABULARY`) characteristic of the role.
    signature: &'static [&'static str],
}

// Titles are role nouns so a passing mention ("the frontend team") is not a title.
// Order breaks ties between titles found at the same position.
static ROLES: &[RoleProfile] = &[
    RoleProfile {
        name: "Machine Learning Engineer",
        titles: &["machine learning engineer", "ml engineer", "ai engineer", "mlops engineer"],
        signature: &[
            "python", "machine learning", "deep learning", "tensorflow", "pytorch",
            "transformers", "llm", "generative ai", "docker", "kubernetes",
        ],
    },
    RoleProfile {
        name: "Data Scientist",
        titles: &["data scientist", "data analyst", "research scientist"],
        signature: &[
            "python", "sql", "machine learning", "deep learning", "nlp", "computer vision",
            "scikit-learn", "pandas", "numpy",
        ],
    },
    RoleProfile {
        name: "DevOps Engineer",
        titles: &[
            "devops engineer", "site reliability engineer", "platform engineer",
            "cloud engineer",
        ],
        signature: &[
            "aws", "azure", "google cloud", "docker", "kubernetes", "jenkins", "git", "linux",
        ],
    },
    RoleProfile {
        name: "Full Stack Developer",
        titles: &[
            "full stack developer", "full stack engineer", "full-stack developer",
            "full-stack engineer", "fullstack developer", "fullstack engineer",
        ],
        signature: &[
            "javascript", "typescript", "html", "css", "react", "angular", "node.js", "sql",
            "nosql",
        ],
    },
    RoleProfile {
        name: "Frontend Developer",
        titles: &[
            "frontend developer", "frontend engineer", "front-end developer",
            "front-end engineer", "front end developer", "front end engineer", "ui developer",
        ],
        signature: &["javascript", "typescript", "html", "css", "react", "angular"],
    },
    RoleProfile {
        name: "Backend Developer",
        titles: &[
            "backend developer", "backend engineer", "back-end developer",
            "back-end engineer", "back end developer", "back end engineer", "api developer",
        ],
        signature: &[
            "python", "java", "sql", "nosql", "django", "flask", "fastapi", "node.js",
            "spring boot",
        ],
    },
    RoleProfile {
        name: "Software Engineer",
        titles: &["software engineer", "software developer", "programmer"],
        signature: &["java", "c++", "python", "git", "linux", "sql"],
    },
];

/// Picks the target role for a JD.
///
/// The title phrase that appears earliest in the JD wins outright. Otherwise the role
/// whose signature overlaps the most with `required_skills` is chosen, ties going to
/// the earlier role. No overlap at all yields [`GENERAL_ROLE`].
pub fn detect_role(jd_text: &str, required_skills: &[String]) -> String {
    let lowered = jd_text.to_lowercase();

    let titled = ROLES
        .iter()
        .filter_map(|role| {
            role.titles
                .iter()
                .filter_map(|t| find_phrase(&lowered, t))
                .min()
                .map(|pos| (pos, role))
        })
        .min_by_key(|(pos, _)| *pos);
    if let Some((_, role)) = titled {
        return role.name.to_string();
    }

    let mut best: Option<(&RoleProfile, usize)> = None;
    for role in ROLES {
        let overlap = role
            .signature
            .iter()
            .filter(|s| required_skills.iter().any(|r| r == *s))
            .count();
        if overlap > 0 && best.map_or(true, |(_, top)| overlap > top) {
            best = Some((role, overlap));
        }
    }

    best.map(|(role, _)| role.name.to_string())
        .unwrap_or_else(|| GENERAL_ROLE.to_string())
}

/// Byte offset of the first occurrence of `phrase` that neither starts nor ends
/// inside a word.
fn find_phrase(haystack: &str, phrase: &str) -> Option<usize> {
    haystack.match_indices(phrase).find_map(|(start, matched)| {
        let end = start + matched.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        (before_ok && after_ok).then_some(start)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_title_phrase_wins_over_skills() {
        let role = detect_role(
            "Senior Data Scientist needed. Must know Docker and Kubernetes.",
            &skills(&["docker", "kubernetes"]),
        );
        assert_eq!(role, "Data Scientist");
    }

    #[test]
    fn test_specific_title_beats_generic_title() {
        let role = detect_role("Machine Learning Engineer / Software Engineer", &[]);
        assert_eq!(role, "Machine Learning Engineer");
    }

    #[test]
    fn test_skill_overlap_picks_role() {
        let role = detect_role(
            "You will ship pipelines on AWS with Docker, Jenkins and Linux.",
            &skills(&["aws", "docker", "jenkins", "linux"]),
        );
        assert_eq!(role, "DevOps Engineer");
    }

    #[test]
    fn test_overlap_tie_goes_to_earlier_role() {
        // "javascript" + "react" is shared by Full Stack and Frontend.
        let role = detect_role("Build UIs", &skills(&["javascript", "react"]));
        assert_eq!(role, "Full Stack Developer");
    }

    #[test]
    fn test_no_signal_is_general() {
        assert_eq!(detect_role("Friendly team, great snacks", &[]), GENERAL_ROLE);
    }

    #[test]
    fn test_title_must_be_whole_words() {
        assert_eq!(detect_role("Our programmers answered promptly", &[]), GENERAL_ROLE);
    }

    #[test]
    fn test_passing_mention_is_not_a_title() {
        let required = skills(&["python", "sql", "django"]);
        assert_eq!(
            detect_role(
                "Backend Developer working closely with the frontend team. Python, Django, SQL.",
                &required,
            ),
            "Backend Developer"
        );
        assert_eq!(
            detect_role(
                "Backend Developer. Familiarity with DevOps practices is a plus. Python, SQL.",
                &required,
            ),
            "Backend Developer"
        );
    }

    #[test]
    fn test_earliest_title_wins() {
        let role = detect_role(
            "Frontend Developer. You will pair with our Backend Engineer on APIs.",
            &[],
        );
        assert_eq!(role, "Frontend Developer");
    }

    #[test]
    fn test_hyphenated_title() {
        assert_eq!(detect_role("Senior Back-End Engineer", &[]), "Backend Developer");
    }
}
