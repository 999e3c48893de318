use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::embedding::codec::EMPTY_EMBEDDING_JSON;
use crate::models::profile::ExtractedProfile;

/// A stored candidate. `embedding` holds the JSON-array form of the vector;
/// `"[]"` means the embedding has not been computed yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Zero until the store assigns an id on first save.
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub resume_text: String,
    pub skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub experience_summary: Option<String>,
    pub projects: Option<String>,
    pub certifications: Option<String>,
    pub embedding: String,
    pub created_at: DateTime<Utc>,
}

impl CandidateRecord {
    /// Builds an unsaved record from an extraction result and the raw text it came from.
    pub fn from_profile(profile: &ExtractedProfile, resume_text: &str, embedding: String) -> Self {
        Self {
            id: 0,
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            resume_text: resume_text.to_string(),
            skills: profile.skills.clone(),
            soft_skills: profile.soft_skills.clone(),
            experience_summary: Some(profile.experience_summary.clone()),
            projects: profile.projects.clone(),
            certifications: profile.certifications.clone(),
            embedding,
            created_at: Utc::now(),
        }
    }

    /// Projects the stored fields back into the shape the profile template expects.
    /// Used when embeddings are regenerated for records that were created or edited elsewhere.
    pub fn to_profile(&self) -> ExtractedProfile {
        ExtractedProfile {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            skills: self.skills.clone(),
            soft_skills: self.soft_skills.clone(),
            projects: self.projects.clone(),
            certifications: self.certifications.clone(),
            experience_summary: self.experience_summary.clone().unwrap_or_default(),
        }
    }

    pub fn has_embedding(&self) -> bool {
        self.embedding.trim() != EMPTY_EMBEDDING_JSON
    }
}
