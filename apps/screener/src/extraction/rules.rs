//! Heuristic tables and tunable limits for resume field extraction.
//!
//! Vocabulary order is significant: matched skills are reported in the order
//! they appear here, and section synonyms are tried first to last.

/// Lines containing any of these (case-insensitive) are never taken as the name.
pub const HEADER_SKIP_WORDS: &[&str] = &[
    "resume",
    "cv",
    "curriculum vitae",
    "personal details",
    "contact",
    "profile",
    "summary",
];

/// Substrings that mark a line as contact details rather than a name.
pub const CONTACT_MARKERS: &[&str] = &[":", "@", "phone", "email"];

pub const URL_MARKERS: &[&str] = &["http", "www", ".com"];

pub const TECHNICAL_SKILLS: &[&str] = &[
    "python",
    "java",
    "react",
    "javascript",
    "typescript",
    "sql",
    "aws",
    "docker",
    "kubernetes",
    "html",
    "css",
    "node.js",
    "fastapi",
    "django",
    "flask",
    "c++",
    "go",
    "rust",
];

pub const SOFT_SKILLS: &[&str] = &[
    "leadership",
    "communication",
    "teamwork",
    "problem solving",
    "time management",
    "adaptability",
    "project management",
    "agile",
    "scrum",
    "collaboration",
];

pub const PROJECT_HEADINGS: &[&str] = &[
    "projects",
    "personal projects",
    "academic projects",
    "portfolio",
    "key projects",
];

pub const CERTIFICATION_HEADINGS: &[&str] = &[
    "certifications",
    "courses",
    "licenses",
    "credentials",
    "training",
    "achievements",
    "certificates",
];

pub const EXPERIENCE_HEADINGS: &[&str] = &[
    "experience",
    "employment",
    "work history",
    "professional background",
    "work experience",
];

pub const UNKNOWN_NAME: &str = "Unknown";

/// Appended to every experience summary, extracted or fallback.
pub const SUMMARY_MARKER: &str = "...";

pub const NAME_SCAN_LINES: usize = 10;
pub const NAME_MAX_WORDS: usize = 5;
/// All-caps lines longer than this are treated as section banners.
pub const BANNER_MIN_CHARS: usize = 15;
pub const SECTION_LINES: usize = 15;
pub const EXPERIENCE_SECTION_LINES: usize = 20;
pub const SUMMARY_FALLBACK_CHARS: usize = 800;

/// Tunable limits for one extraction run. `Default` uses the constants above.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRules {
    pub name_scan_lines: usize,
    pub section_lines: usize,
    pub experience_section_lines: usize,
    pub summary_fallback_chars: usize,
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self {
            name_scan_lines: NAME_SCAN_LINES,
            section_lines: SECTION_LINES,
            experience_section_lines: EXPERIENCE_SECTION_LINES,
            summary_fallback_chars: SUMMARY_FALLBACK_CHARS,
        }
    }
}

impl ExtractionRules {
    pub fn with_name_scan_lines(mut self, lines: usize) -> Self {
        self.name_scan_lines = lines;
        self
    }
}
