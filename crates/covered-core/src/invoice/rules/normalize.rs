//! Whitespace normalization applied before header and item matching.

use super::patterns::WHITESPACE_RUN;

/// Collapse every whitespace run to a single space and trim both ends.
pub fn normalize_spaces(line: &str) -> String {
    WHITESPACE_RUN.replace_all(line.trim(), " ").into_owned()
}

/// Split raw text into trimmed, non-empty lines.
pub fn content_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_spaces() {
        assert_eq!(normalize_spaces("  Bananas \t 1kg   2 "), "Bananas 1kg 2");
        assert_eq!(normalize_spaces("Line\u{00a0}\u{00a0}Description"), "Line Description");
        assert_eq!(normalize_spaces("   "), "");
        assert_eq!(normalize_spaces("Pantry"), "Pantry");
    }

    #[test]
    fn test_content_lines_drops_blank_lines() {
        let lines = content_lines("  Header \r\n\n   \nFruit & Vegetables\n");
        assert_eq!(lines, vec!["Header", "Fruit & Vegetables"]);
    }
}
