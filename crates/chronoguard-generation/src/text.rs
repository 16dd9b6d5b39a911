/// First `max_chars` characters of `text`, trimmed.
pub(crate) fn snippet(text: &str, max_chars: usize) -> String {
    text.trim().chars().take(max_chars).collect()
}

/// Whitespace token estimate.
pub fn token_estimate(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_respects_char_boundaries() {
        assert_eq!(snippet("  Genève → Zürich ", 8), "Genève →");
    }
}
