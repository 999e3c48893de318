use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::documents::extract_document_text;
use crate::extraction::extract;
use crate::extraction::rules::ExtractionRules;
use crate::models::ranking::RankedCandidate;
use crate::screening::{
    create_job, ingest_documents, rank_job, regenerate_embeddings, seed_demo_candidates,
    IngestOutcome,
};
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "screener", version, about = "Resume screening: extract, embed and rank candidates")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract profile fields from a resume document
    Extract {
        /// Resume file (.pdf, .docx, .doc, .txt, .md)
        file: PathBuf,
    },
    /// Print the embedding vector for a piece of text
    Embed {
        text: String,
    },
    /// Ingest resumes, then rank them against a job description
    Screen {
        /// Job description file
        #[arg(long)]
        job: PathBuf,
        /// Job title (defaults to the job file name)
        #[arg(long)]
        title: Option<String>,
        /// Add the demo candidates before ranking
        #[arg(long, default_value_t = false)]
        seed: bool,
        /// Only report the best N candidates
        #[arg(long)]
        top: Option<usize>,
        /// Resume files to ingest
        resumes: Vec<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
pub struct ScreenReport {
    pub job_id: i64,
    pub job_title: String,
    pub ingested: Vec<IngestOutcome>,
    pub ranked: Vec<RankedEntry>,
}

#[derive(Debug, Serialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub candidate_id: i64,
    pub name: String,
    pub email: Option<String>,
    pub match_score: f64,
    pub reasoning: String,
}

impl RankedEntry {
    fn from_ranked(rank: usize, ranked: RankedCandidate) -> Self {
        Self {
            rank,
            candidate_id: ranked.candidate.id,
            name: ranked.candidate.name,
            email: ranked.candidate.email,
            match_score: ranked.match_score,
            reasoning: ranked.reasoning,
        }
    }
}

pub async fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Extract { file } => run_extract(&config, file).await,
        Commands::Embed { text } => {
            let state = AppState::initialize(config).await?;
            run_embed(&state, &text)
        }
        Commands::Screen {
            job,
            title,
            seed,
            top,
            resumes,
        } => {
            let state = AppState::initialize(config).await?;
            let report = screen(&state, job, title, seed, top, &resumes).await?;
            print_json(&report)
        }
    }
}

async fn run_extract(config: &Config, file: PathBuf) -> Result<()> {
    let rules = ExtractionRules::default().with_name_scan_lines(config.name_scan_lines);
    let profile = tokio::task::spawn_blocking(move || -> Result<_> {
        let text = extract_document_text(&file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        if text.trim().is_empty() {
            bail!("Could not extract text from {}", file.display());
        }
        Ok(extract(&text, &rules))
    })
    .await
    .context("extraction task failed")??;
    print_json(&profile)
}

fn run_embed(state: &AppState, text: &str) -> Result<()> {
    let vector = state.embedder.embed(text);
    if vector.is_empty() {
        warn!("No embedding produced for the given text");
    }
    println!("{}", serde_json::to_string(&vector)?);
    Ok(())
}

/// Full screening pass: optionally seed demo candidates, ingest resumes, store
/// the job, and rank everything stored against it. Seeding only fills an empty
/// store, so it runs before the uploaded resumes land.
pub async fn screen(
    state: &AppState,
    job_file: PathBuf,
    title: Option<String>,
    seed: bool,
    top: Option<usize>,
    resumes: &[PathBuf],
) -> Result<ScreenReport> {
    if seed {
        seed_demo_candidates(state).await?;
        regenerate_embeddings(state, true).await?;
    }

    let ingested = ingest_documents(state, resumes).await;
    let succeeded = ingested.iter().filter(|o| o.is_success()).count();
    info!(succeeded, total = ingested.len(), "Resumes ingested");

    let title = title.unwrap_or_else(|| {
        job_file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled job".to_string())
    });
    let job_path = job_file.clone();
    let description = tokio::task::spawn_blocking(move || extract_document_text(&job_path))
        .await
        .context("job description task failed")?
        .with_context(|| format!("failed to read {}", job_file.display()))?;
    if description.trim().is_empty() {
        bail!("Could not extract text from {}", job_file.display());
    }

    let job = create_job(state, &title, &description).await?;
    let ranked = rank_job(state, job.id).await?;
    let limit = top.unwrap_or(ranked.len());

    Ok(ScreenReport {
        job_id: job.id,
        job_title: job.title,
        ingested,
        ranked: ranked
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(i, r)| RankedEntry::from_ranked(i + 1, r))
            .collect(),
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::test_support::hash_state;

    #[test]
    fn test_parse_screen_command() {
        let cli = Cli::try_parse_from([
            "screener", "screen", "--job", "jd.txt", "--seed", "--top", "2", "a.pdf", "b.docx",
        ])
        .unwrap();
        match cli.command {
            Commands::Screen {
                job,
                title,
                seed,
                top,
                resumes,
            } => {
                assert_eq!(job, PathBuf::from("jd.txt"));
                assert!(title.is_none());
                assert!(seed);
                assert_eq!(top, Some(2));
                assert_eq!(resumes.len(), 2);
            }
            _ => panic!("expected screen command"),
        }
    }

    #[test]
    fn test_parse_embed_command() {
        let cli = Cli::try_parse_from(["screener", "embed", "hello world"]).unwrap();
        assert!(matches!(cli.command, Commands::Embed { ref text } if text == "hello world"));
    }

    #[tokio::test]
    async fn test_screen_ranks_ingested_and_seeded_candidates() {
        let dir = tempfile::tempdir().unwrap();
        let jd = dir.path().join("scrum_master.txt");
        std::fs::write(&jd, "Certified Scrum Master to lead agile teams").unwrap();
        let resume = dir.path().join("sam.txt");
        std::fs::write(
            &resume,
            "Sam Rivera\nCertified Scrum Master\nSkills: Agile, Scrum, Leadership\nLed agile teams",
        )
        .unwrap();

        let state = hash_state();
        let report = screen(&state, jd, None, true, Some(2), &[resume])
            .await
            .unwrap();

        assert_eq!(report.job_title, "scrum_master");
        assert_eq!(report.ingested.len(), 1);
        assert!(report.ingested[0].is_success());
        assert_eq!(report.ranked.len(), 2);
        assert_eq!(report.ranked[0].rank, 1);
        assert_eq!(report.ranked[0].name, "Sam Rivera");
        assert!(report.ranked[0].match_score >= report.ranked[1].match_score);
    }

    #[tokio::test]
    async fn test_screen_seeds_alongside_uploaded_resumes() {
        let dir = tempfile::tempdir().unwrap();
        let jd = dir.path().join("scrum_master.txt");
        std::fs::write(&jd, "Certified Scrum Master to lead agile teams").unwrap();
        let resume = dir.path().join("sam.txt");
        std::fs::write(
            &resume,
            "Sam Rivera\nCertified Scrum Master\nSkills: Agile, Scrum, Leadership\nLed agile teams",
        )
        .unwrap();

        let state = hash_state();
        let report = screen(&state, jd, None, true, None, &[resume])
            .await
            .unwrap();

        assert_eq!(state.candidates.list().await.unwrap().len(), 4);
        let names: Vec<&str> = report.ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names.len(), 4);
        assert_eq!(names[0], "Sam Rivera");
        for seeded in ["Alice Johnson", "Bob Smith", "Dr. Carol Williams"] {
            assert!(names.contains(&seeded), "{seeded} missing from {names:?}");
        }
    }

    #[tokio::test]
    async fn test_screen_with_unreadable_job_fails() {
        let dir = tempfile::tempdir().unwrap();
        let jd = dir.path().join("empty.txt");
        std::fs::write(&jd, "  ").unwrap();
        let state = hash_state();
        assert!(screen(&state, jd, None, false, None, &[]).await.is_err());
    }
}
