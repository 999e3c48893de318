//! Field extraction: turns raw resume text into an `ExtractedProfile`.
//!
//! Pure and deterministic: no I/O, no randomness. Every miss degrades to the
//! field's default (`"Unknown"` name, `None` section, empty skill list).

pub mod contact;
pub mod name;
pub mod rules;
pub mod sections;
pub mod skills;

use crate::models::profile::ExtractedProfile;

use self::rules::{
    ExtractionRules, CERTIFICATION_HEADINGS, EXPERIENCE_HEADINGS, PROJECT_HEADINGS, SOFT_SKILLS,
    TECHNICAL_SKILLS,
};

/// Extracts a profile from `text`. `rules` carries the tunable windows;
/// `ExtractionRules::default()` reproduces the stock heuristics.
pub fn extract(text: &str, rules: &ExtractionRules) -> ExtractedProfile {
    let experience =
        sections::extract_section(text, EXPERIENCE_HEADINGS, rules.experience_section_lines);

    ExtractedProfile {
        name: name::detect_name(text, rules.name_scan_lines),
        email: contact::find_email(text),
        phone: contact::find_phone(text),
        skills: skills::match_vocabulary(text, TECHNICAL_SKILLS),
        soft_skills: skills::match_vocabulary(text, SOFT_SKILLS),
        projects: sections::extract_section(text, PROJECT_HEADINGS, rules.section_lines),
        certifications: sections::extract_section(
            text,
            CERTIFICATION_HEADINGS,
            rules.section_lines,
        ),
        experience_summary: sections::experience_summary(
            experience.as_deref(),
            text,
            rules.summary_fallback_chars,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESUME: &str = "\
RESUME
Maria Garcia
maria.garcia@example.com | (415) 555-0199

SUMMARY
Backend engineer with strong communication and leadership.

WORK EXPERIENCE
Acme Corp, Senior Engineer 2019-2024
Built Python and Rust services on AWS with Docker.

PROJECTS
Open-source SQL query planner

CERTIFICATIONS
AWS Certified Solutions Architect
";

    #[test]
    fn test_minimal_example() {
        let profile = extract(
            "John Smith\nJohn@example.com\nSkills: Python, SQL",
            &ExtractionRules::default(),
        );
        assert_eq!(profile.name, "John Smith");
        assert_eq!(profile.email.as_deref(), Some("John@example.com"));
        assert!(profile.skills.contains(&"python".to_string()));
        assert!(profile.skills.contains(&"sql".to_string()));
    }

    #[test]
    fn test_full_resume() {
        let profile = extract(SAMPLE_RESUME, &ExtractionRules::default());
        assert_eq!(profile.name, "Maria Garcia");
        assert_eq!(profile.email.as_deref(), Some("maria.garcia@example.com"));
        assert_eq!(profile.phone.as_deref(), Some("(415) 555-0199"));
        assert!(profile.skills.contains(&"rust".to_string()));
        assert!(profile.skills.contains(&"aws".to_string()));
        assert_eq!(profile.soft_skills, vec!["leadership", "communication"]);
        assert!(profile
            .projects
            .as_deref()
            .is_some_and(|p| p.starts_with("Open-source SQL query planner")));
        assert!(profile
            .certifications
            .as_deref()
            .is_some_and(|c| c.starts_with("AWS Certified")));
        assert!(profile.experience_summary.starts_with("Acme Corp, Senior Engineer"));
        assert!(profile.experience_summary.ends_with("..."));
        assert!(!profile.experience_summary.contains('\n'));
    }

    #[test]
    fn test_empty_text_defaults() {
        let profile = extract("", &ExtractionRules::default());
        assert_eq!(profile.name, "Unknown");
        assert_eq!(profile.email, None);
        assert_eq!(profile.phone, None);
        assert!(profile.skills.is_empty());
        assert!(profile.soft_skills.is_empty());
        assert_eq!(profile.projects, None);
        assert_eq!(profile.certifications, None);
        assert_eq!(profile.experience_summary, "...");
    }

    #[test]
    fn test_hostile_inputs_never_panic() {
        let inputs = [
            "\u{130}\u{130}\u{130} experience\nİstanbul",
            "\r\n\r\n\r\n",
            "@@@@@@@@",
            "(((((((((((",
            "ß\u{0}\u{feff}projects\n\u{202e}",
        ];
        for input in inputs {
            let profile = extract(input, &ExtractionRules::default());
            assert!(!profile.name.is_empty());
            assert!(profile.experience_summary.ends_with("..."));
        }
    }

    #[test]
    fn test_heading_without_content_is_empty_section() {
        let profile = extract("Jane Doe\nProjects\n  \n", &ExtractionRules::default());
        assert_eq!(profile.projects.as_deref(), Some(""));
        assert_eq!(profile.certifications, None);
        assert!(profile.experience_summary.starts_with("Jane Doe Projects"));
    }

    #[test]
    fn test_custom_scan_window() {
        let rules = ExtractionRules::default().with_name_scan_lines(1);
        let profile = extract("Summary\nJohn Smith", &rules);
        assert_eq!(profile.name, "Unknown");
    }
}
