use crate::extraction::rules::SUMMARY_MARKER;

/// Harvests the lines that follow a section heading.
///
/// Headings are tried in the given priority order; the first one found anywhere
/// in the text (case-insensitive) wins, and up to `max_lines` lines after the
/// line containing it are returned, original case, joined and trimmed.
/// `None` only when no heading occurs; a heading with nothing after it yields `Some("")`.
pub fn extract_section(text: &str, headings: &[&str], max_lines: usize) -> Option<String> {
    let lines: Vec<&str> = text.split('\n').collect();
    let lowered: Vec<String> = lines.iter().map(|l| l.to_lowercase()).collect();

    let heading_line = headings
        .iter()
        .find_map(|heading| lowered.iter().position(|l| l.contains(heading)))?;

    let body = lines
        .iter()
        .skip(heading_line + 1)
        .take(max_lines)
        .copied()
        .collect::<Vec<_>>()
        .join("\n");
    Some(body.trim().to_string())
}

/// Flattens an extracted experience section, or the head of the raw text when
/// no section was found or it came back blank, into a single line ending in
/// the summary marker.
pub fn experience_summary(section: Option<&str>, raw_text: &str, fallback_chars: usize) -> String {
    let source = match section {
        Some(section) if !section.is_empty() => section.to_string(),
        _ => raw_text.chars().take(fallback_chars).collect(),
    };
    format!("{}{}", source.replace('\n', " "), SUMMARY_MARKER)
}
