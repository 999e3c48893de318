//! Ranking Engine: orders candidates against a job description by cosine
//! similarity of their embeddings, plus an additive keyword boost.

pub mod boost;
pub mod similarity;

use tracing::{debug, warn};

use crate::embedding::{is_usable, EmbeddingProvider};
use crate::models::ranking::{RankResult, RankableCandidate};

use self::boost::BoostRules;
use self::similarity::cosine_similarity;

/// Ranks `candidates` against `job_description`, best match first.
///
/// Candidates without a usable embedding are skipped. Ties keep input order.
pub fn rank(
    provider: &EmbeddingProvider,
    rules: &BoostRules,
    job_description: &str,
    candidates: &[RankableCandidate],
) -> Vec<RankResult> {
    let usable: Vec<&RankableCandidate> = candidates
        .iter()
        .filter(|c| is_usable(&c.embedding))
        .collect();
    if usable.is_empty() {
        return Vec::new();
    }

    let jd_embedding = provider.embed(job_description);
    if jd_embedding.is_empty() {
        warn!("job description produced no embedding; nothing to rank against");
        return Vec::new();
    }

    let active_terms = rules.active_terms(job_description);
    let mut results: Vec<RankResult> = usable
        .into_iter()
        .filter_map(|candidate| {
            if candidate.embedding.len() != jd_embedding.len() {
                debug!(
                    candidate_id = candidate.id,
                    expected = jd_embedding.len(),
                    actual = candidate.embedding.len(),
                    "skipping candidate with stale embedding dimension"
                );
                return None;
            }
            Some(score_candidate(rules, &active_terms, &jd_embedding, candidate))
        })
        .collect();

    // stable: equal scores keep input order
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results
}

fn score_candidate(
    rules: &BoostRules,
    active_terms: &[&str],
    jd_embedding: &[f32],
    candidate: &RankableCandidate,
) -> RankResult {
    let semantic = cosine_similarity(jd_embedding, &candidate.embedding) * 100.0;
    let (matched, boost) = rules.apply(active_terms, &candidate.text);
    let score = round2((semantic + boost).clamp(0.0, rules.cap));

    let mut reasoning = format!("Semantic Match: {semantic:.1}%.");
    if !matched.is_empty() {
        reasoning.push_str(&format!(" Boosted for: {}.", matched.join(", ")));
    }

    RankResult {
        candidate_id: candidate.id,
        score,
        reasoning,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashEmbedder;

    fn provider() -> EmbeddingProvider {
        EmbeddingProvider::new(HashEmbedder::new(128))
    }

    fn candidate(provider: &EmbeddingProvider, id: i64, text: &str) -> RankableCandidate {
        RankableCandidate {
            id,
            text: text.to_string(),
            embedding: provider.embed(text),
        }
    }

    #[test]
    fn test_empty_candidates() {
        let p = provider();
        assert!(rank(&p, &BoostRules::default(), "any job", &[]).is_empty());
    }

    #[test]
    fn test_results_sorted_descending() {
        let p = provider();
        let jd = "senior rust engineer with tokio and axum experience";
        let candidates = vec![
            candidate(&p, 1, "pastry chef and baker"),
            candidate(&p, 2, "rust engineer tokio axum"),
            candidate(&p, 3, "rust developer"),
        ];
        let results = rank(&p, &BoostRules::default(), jd, &candidates);
        assert_eq!(results.len(), 3);
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert_eq!(results[0].candidate_id, 2);
    }

    #[test]
    fn test_self_similarity_scores_100() {
        let p = provider();
        let jd = "python data engineer";
        let results = rank(&p, &BoostRules::default(), jd, &[candidate(&p, 7, jd)]);
        assert_eq!(results[0].score, 100.0);
        assert_eq!(results[0].reasoning, "Semantic Match: 100.0%.");
    }

    #[test]
    fn test_boost_is_monotonic_and_capped() {
        let p = provider();
        let rules = BoostRules::default();
        let jd = "agile scrum master with pmp, certified lead";
        let base_text = "backend developer";
        let base_embedding = p.embed(base_text);

        let plain = RankableCandidate {
            id: 1,
            text: base_text.to_string(),
            embedding: base_embedding.clone(),
        };
        let boosted = RankableCandidate {
            id: 2,
            text: format!("{base_text} agile"),
            embedding: base_embedding,
        };
        let results = rank(&p, &rules, jd, &[plain, boosted]);
        let score_of = |id: i64| results.iter().find(|r| r.candidate_id == id).unwrap().score;
        assert!(score_of(2) >= score_of(1));

        let self_match = candidate(&p, 3, jd);
        let results = rank(&p, &rules, jd, &[self_match]);
        assert_eq!(results[0].score, 100.0);
        assert!(results[0].reasoning.contains("Boosted for:"));
    }

    #[test]
    fn test_empty_embedding_excluded() {
        let p = provider();
        let missing = RankableCandidate {
            id: 1,
            text: "certified pmp agile lead".into(),
            embedding: Vec::new(),
        };
        let results = rank(
            &p,
            &BoostRules::default(),
            "certified pmp agile lead",
            &[missing.clone(), candidate(&p, 2, "gardener")],
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].candidate_id, 2);

        assert!(rank(&p, &BoostRules::default(), "anything", &[missing]).is_empty());
    }

    #[test]
    fn test_mismatched_dimension_excluded() {
        let p = provider();
        let stale = RankableCandidate {
            id: 1,
            text: "rust".into(),
            embedding: vec![0.5; 16],
        };
        assert!(rank(&p, &BoostRules::default(), "rust", &[stale]).is_empty());
    }

    #[test]
    fn test_pmp_candidate_ranks_first() {
        let p = provider();
        let jd = "Looking for a certified PMP agile lead";
        let candidates = vec![
            candidate(&p, 1, "Watercolor painter and gallery curator"),
            candidate(&p, 2, "PMP certified agile lead with ten years of delivery"),
        ];
        let results = rank(&p, &BoostRules::default(), jd, &candidates);
        assert_eq!(results[0].candidate_id, 2);
        assert!(results[0]
            .reasoning
            .contains("Boosted for: lead, certified, pmp, agile."));
        assert!(!results[1].reasoning.contains("Boosted"));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let p = provider();
        let text = "identical profile";
        let candidates = vec![
            candidate(&p, 10, text),
            candidate(&p, 4, text),
            candidate(&p, 7, text),
        ];
        let ids: Vec<i64> = rank(&p, &BoostRules::default(), "unrelated job", &candidates)
            .into_iter()
            .map(|r| r.candidate_id)
            .collect();
        assert_eq!(ids, vec![10, 4, 7]);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.345678), 12.35);
        assert_eq!(round2(0.0), 0.0);
    }
}
