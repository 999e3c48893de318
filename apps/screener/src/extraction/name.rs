use crate::extraction::rules::{
    BANNER_MIN_CHARS, CONTACT_MARKERS, HEADER_SKIP_WORDS, NAME_MAX_WORDS, UNKNOWN_NAME,
    URL_MARKERS,
};

/// Picks the candidate's name from the top of the resume.
///
/// Scans the first `scan_lines` non-blank lines and returns the first one that
/// is not a header, banner, contact line or URL, and consists of 1–5 purely
/// alphabetic words (dots and commas ignored). Falls back to `"Unknown"`.
pub fn detect_name(text: &str, scan_lines: usize) -> String {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(scan_lines)
        .find(|line| !is_skippable(line) && looks_like_name(line))
        .map(title_case)
        .unwrap_or_else(|| UNKNOWN_NAME.to_string())
}

fn is_skippable(line: &str) -> bool {
    let lower = line.to_lowercase();
    if HEADER_SKIP_WORDS.iter().any(|w| lower.contains(w)) {
        return true;
    }
    if is_all_upper(line) && line.chars().count() > BANNER_MIN_CHARS {
        return true;
    }
    if CONTACT_MARKERS.iter().any(|m| lower.contains(m)) {
        return true;
    }
    URL_MARKERS.iter().any(|m| lower.contains(m))
}

fn looks_like_name(line: &str) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() || words.len() > NAME_MAX_WORDS {
        return false;
    }
    words.iter().all(|w| {
        let stripped: String = w.chars().filter(|c| *c != '.' && *c != ',').collect();
        !stripped.is_empty() && stripped.chars().all(char::is_alphabetic)
    })
}

/// True when the line has at least one cased letter and none are lowercase.
fn is_all_upper(line: &str) -> bool {
    let mut cased = false;
    for c in line.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Uppercases the first letter of every alphabetic run and lowercases the rest.
fn title_case(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut prev_alpha = false;
    for c in line.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::rules::NAME_SCAN_LINES;

    #[test]
    fn test_first_plain_line_is_name() {
        assert_eq!(detect_name("john smith\nDeveloper", NAME_SCAN_LINES), "John Smith");
    }

    #[test]
    fn test_skips_headers_and_contact_lines() {
        let text = "RESUME\n\nPhone: 555-123-4567\njane@doe.io\nwww.jane.dev\nJANE Q. DOE\n";
        assert_eq!(detect_name(text, NAME_SCAN_LINES), "Jane Q. Doe");
    }

    #[test]
    fn test_long_all_caps_banner_skipped() {
        let text = "SENIOR SOFTWARE ENGINEER\nAda Lovelace";
        assert_eq!(detect_name(text, NAME_SCAN_LINES), "Ada Lovelace");
    }

    #[test]
    fn test_short_all_caps_line_accepted() {
        assert_eq!(detect_name("ADA LOVELACE", NAME_SCAN_LINES), "Ada Lovelace");
    }

    #[test]
    fn test_rejects_digits_and_too_many_words() {
        let text = "Room 101\nthis line has far too many words in it\n";
        assert_eq!(detect_name(text, NAME_SCAN_LINES), UNKNOWN_NAME);
    }

    #[test]
    fn test_scan_window_is_respected() {
        let mut text = String::new();
        for i in 0..10 {
            text.push_str(&format!("line {i}\n"));
        }
        text.push_str("Late Name\n");
        assert_eq!(detect_name(&text, 10), UNKNOWN_NAME);
        assert_eq!(detect_name(&text, 11), "Late Name");
    }

    #[test]
    fn test_empty_text_is_unknown() {
        assert_eq!(detect_name("", NAME_SCAN_LINES), UNKNOWN_NAME);
        assert_eq!(detect_name("\n \n\t\n", NAME_SCAN_LINES), UNKNOWN_NAME);
    }

    #[test]
    fn test_title_case_matches_word_runs() {
        assert_eq!(title_case("o'BRIEN mc,donald"), "O'Brien Mc,Donald");
    }
}
