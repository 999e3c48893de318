use crate::models::profile::ExtractedProfile;

/// Placeholder for any blank or missing field in the profile template.
pub const MISSING_FIELD: &str = "N/A";

/// Renders the canonical text fed to the embedder for a candidate.
///
/// Every path that (re)computes a candidate embedding goes through here, so a
/// freshly uploaded candidate and a regenerated one embed identical text.
pub fn profile_text(profile: &ExtractedProfile) -> String {
    format!(
        "Name: {}\nSkills: {}\nSoft Skills: {}\nExperience: {}\nProjects: {}\nCertifications: {}",
        or_missing(&profile.name),
        or_missing(&profile.skills.join(", ")),
        or_missing(&profile.soft_skills.join(", ")),
        or_missing(&profile.experience_summary),
        or_missing(profile.projects.as_deref().unwrap_or_default()),
        or_missing(profile.certifications.as_deref().unwrap_or_default()),
    )
}

fn or_missing(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        MISSING_FIELD
    } else {
        trimmed
    }
}
