//! Keyword boost applied on top of semantic similarity.

/// Terms that earn a boost when present in both the job description and the
/// candidate text.
pub const BOOST_TERMS: &[&str] = &[
    "management",
    "lead",
    "certified",
    "pmp",
    "agile",
    "scrum",
    "master",
    "phd",
];

/// Points added per matched term, before the final cap.
pub const BOOST_INCREMENT: f64 = 5.0;

/// Upper bound of every final score.
pub const SCORE_CAP: f64 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BoostRules {
    pub terms: Vec<String>,
    pub increment: f64,
    pub cap: f64,
}

impl Default for BoostRules {
    fn default() -> Self {
        Self {
            terms: BOOST_TERMS.iter().map(|t| t.to_string()).collect(),
            increment: BOOST_INCREMENT,
            cap: SCORE_CAP,
        }
    }
}

impl BoostRules {
    pub fn with_increment(mut self, increment: f64) -> Self {
        self.increment = increment;
        self
    }

    /// Boost terms that appear in the job description (case-insensitive), in table order.
    pub fn active_terms(&self, job_description: &str) -> Vec<&str> {
        let jd_lower = job_description.to_lowercase();
        self.terms
            .iter()
            .map(String::as_str)
            .filter(|term| jd_lower.contains(term))
            .collect()
    }

    /// Which of the active terms the candidate text contains, and the total boost they earn.
    pub fn apply<'a>(&self, active_terms: &[&'a str], candidate_text: &str) -> (Vec<&'a str>, f64) {
        let text_lower = candidate_text.to_lowercase();
        let matched: Vec<&str> = active_terms
            .iter()
            .copied()
            .filter(|term| text_lower.contains(term))
            .collect();
        let boost = matched.len() as f64 * self.increment;
        (matched, boost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_terms_follow_table_order() {
        let rules = BoostRules::default();
        let active = rules.active_terms("Looking for a certified PMP agile lead");
        assert_eq!(active, vec!["lead", "certified", "pmp", "agile"]);
    }

    #[test]
    fn test_no_active_terms() {
        assert!(BoostRules::default().active_terms("Rust developer").is_empty());
    }

    #[test]
    fn test_apply_adds_increment_per_match() {
        let rules = BoostRules::default();
        let (matched, boost) = rules.apply(&["lead", "pmp", "phd"], "PMP holder, team LEAD");
        assert_eq!(matched, vec!["lead", "pmp"]);
        assert_eq!(boost, 10.0);
    }

    #[test]
    fn test_substring_semantics() {
        // "leadership" contains "lead"; matching is plain substring search.
        let rules = BoostRules::default();
        let (matched, _) = rules.apply(&["lead"], "Strong leadership");
        assert_eq!(matched, vec!["lead"]);
    }

    #[test]
    fn test_custom_increment() {
        let rules = BoostRules::default().with_increment(2.5);
        let (_, boost) = rules.apply(&["scrum", "agile"], "agile scrum");
        assert_eq!(boost, 5.0);
    }
}
