/// Truncates `text` to at most `max_width` characters, appending an
/// ellipsis when anything was cut.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        return text.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let prefix: String = text.chars().take(max_width - 3).collect();

    format!("{prefix}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_with_ellipsis_keeps_short_text() {
        assert_eq!(truncate_with_ellipsis("short", 10), "short");
    }

    #[test]
    fn test_truncate_with_ellipsis_cuts_long_text() {
        assert_eq!(truncate_with_ellipsis("abcdefghij", 7), "abcd...");
    }

    #[test]
    fn test_truncate_with_ellipsis_handles_tiny_width() {
        assert_eq!(truncate_with_ellipsis("abcdef", 2), "..");
    }
}
