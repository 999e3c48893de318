use chrono::Utc;
use tracing::{debug, info, warn};

use crate::embedding::codec::{encode_embedding, EMPTY_EMBEDDING_JSON};
use crate::embedding::profile_text::profile_text;
use crate::errors::AppError;
use crate::models::candidate::CandidateRecord;
use crate::state::AppState;

use super::run_blocking;

/// Recomputes candidate embeddings from the canonical profile template.
///
/// With `only_missing`, candidates that already carry an embedding are left
/// alone. Returns how many records received a new, non-empty embedding.
pub async fn regenerate_embeddings(state: &AppState, only_missing: bool) -> Result<usize, AppError> {
    let targets: Vec<CandidateRecord> = state
        .candidates
        .list()
        .await?
        .into_iter()
        .filter(|c| !only_missing || !c.has_embedding())
        .collect();
    if targets.is_empty() {
        return Ok(0);
    }

    let embedder = state.embedder.clone();
    let refreshed = run_blocking(move || {
        targets
            .into_iter()
            .map(|mut record| {
                let vector = embedder.embed(&profile_text(&record.to_profile()));
                let updated = !vector.is_empty();
                record.embedding = encode_embedding(&vector);
                (record, updated)
            })
            .collect::<Vec<_>>()
    })
    .await?;

    let mut updated = 0;
    for (record, ok) in refreshed {
        if !ok {
            warn!(candidate_id = record.id, "Embedding regeneration produced no vector");
            continue;
        }
        // Only the embedding is written back; a candidate deleted or re-saved
        // since the listing keeps its current state.
        if !state
            .candidates
            .update_embedding(record.id, record.embedding)
            .await?
        {
            debug!(candidate_id = record.id, "Candidate removed before regeneration finished");
            continue;
        }
        updated += 1;
    }
    info!(updated, only_missing, "Embeddings regenerated");
    Ok(updated)
}

pub async fn delete_candidate(state: &AppState, candidate_id: i64) -> Result<(), AppError> {
    if !state.candidates.delete(candidate_id).await? {
        return Err(AppError::NotFound(format!("Candidate {candidate_id} not found")));
    }
    info!(candidate_id, "Candidate deleted");
    Ok(())
}

pub async fn delete_all_candidates(state: &AppState) -> Result<usize, AppError> {
    let removed = state.candidates.delete_all().await?;
    info!(removed, "All candidates deleted");
    Ok(removed)
}

/// Inserts the demo candidates when the store holds no candidates at all.
/// They are stored without embeddings; `regenerate_embeddings` fills them in.
pub async fn seed_demo_candidates(state: &AppState) -> Result<usize, AppError> {
    if !state.candidates.list().await?.is_empty() {
        info!("Store already has candidates. Skipping seed.");
        return Ok(0);
    }

    let seeds = demo_candidates();
    let count = seeds.len();
    for record in seeds {
        state.candidates.save(record).await?;
    }
    info!(count, "Seeded demo candidates");
    Ok(count)
}

fn demo_candidates() -> Vec<CandidateRecord> {
    let demo = |name: &str,
                email: &str,
                phone: &str,
                resume_text: &str,
                skills: &[&str],
                soft_skills: &[&str],
                experience: &str,
                projects: &str,
                certifications: &str| CandidateRecord {
        id: 0,
        name: name.to_string(),
        email: Some(email.to_string()),
        phone: Some(phone.to_string()),
        resume_text: resume_text.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        soft_skills: soft_skills.iter().map(|s| s.to_string()).collect(),
        experience_summary: Some(experience.to_string()),
        projects: Some(projects.to_string()),
        certifications: Some(certifications.to_string()),
        embedding: EMPTY_EMBEDDING_JSON.to_string(),
        created_at: Utc::now(),
    };

    vec![
        demo(
            "Alice Johnson",
            "alice@example.com",
            "123-456-7890",
            "Experienced Software Engineer with a focus on full-stack development. \
             Proficient in Python, React, and cloud technologies.",
            &["Python", "React", "FastAPI", "Docker", "AWS"],
            &["Leadership", "Problem Solving"],
            "5 years as a Senior Software Engineer at Tech Corp. Led a team of 4 developers.",
            "Built a scalable e-commerce platform.",
            "AWS Certified Solutions Architect",
        ),
        demo(
            "Bob Smith",
            "bob@example.com",
            "987-654-3210",
            "Business Analyst with strong data analysis skills. \
             Expert in SQL, Tableau, and financial modeling.",
            &["SQL", "Tableau", "Excel", "Data Analysis"],
            &["Communication", "Strategic Thinking"],
            "3 years as a Business Analyst at Finance Inc. Improved reporting efficiency by 40%.",
            "Financial forecasting dashboard.",
            "Google Data Analytics Professional Certificate",
        ),
        demo(
            "Dr. Carol Williams",
            "carol@example.com",
            "555-123-4567",
            "Board-certified Cardiologist with 10 years of clinical experience. \
             Dedicated to patient care and medical research.",
            &["Cardiology", "Patient Care", "Surgery", "Medical Research"],
            &["Empathy", "Decision Making"],
            "Cardiologist at City Hospital. Conducted over 500 successful procedures.",
            "Research on heart disease prevention.",
            "Board Certified in Cardiology",
        ),
    ]
}
