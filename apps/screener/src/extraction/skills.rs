/// Returns the vocabulary entries that occur anywhere in `text`, case-insensitively,
/// in vocabulary order.
pub fn match_vocabulary(text: &str, vocabulary: &[&str]) -> Vec<String> {
    let lower = text.to_lowercase();
    vocabulary
        .iter()
        .filter(|term| lower.contains(*term))
        .map(|term| term.to_string())
        .collect()
}
