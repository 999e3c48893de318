use serde::{Deserialize, Serialize};

/// Structured fields recovered from one resume's plain text.
///
/// Produced once per document by `extraction::extract`. Optional sections are
/// `None` when no heading synonym was found anywhere in the text, and `Some("")`
/// when the heading is present but nothing follows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedProfile {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Technical skills in vocabulary order.
    pub skills: Vec<String>,
    /// Soft skills in vocabulary order.
    pub soft_skills: Vec<String>,
    pub projects: Option<String>,
    pub certifications: Option<String>,
    pub experience_summary: String,
}
