//! Job description intake. The JD arrives as pasted text, so "parsing" is normalisation.

use super::text_cleaner::clean_text_for_analysis;

/// Normalises a pasted job description for matching.
pub fn extract_jd_text(raw: &str) -> String {
    clean_text_for_analysis(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pasted_jd_is_flattened() {
        let jd = "Data Scientist\n\nRequirements:\n  - Python\n  - SQL\n";
        assert_eq!(extract_jd_text(jd), "Data Scientist Requirements: - Python - SQL");
    }

    #[test]
    fn test_blank_jd_is_empty() {
        assert!(extract_jd_text("\n\n   ").is_empty());
    }
}
