//! CSS selector parsing utilities.

use scraper::Selector;

/// Parses a CSS selector with a safe fallback.
///
/// If parsing fails, logs an error and returns a selector that matches
/// nothing (`*:not(*)`). This prevents panics while allowing extraction to
/// continue.
pub fn parse_selector_with_fallback(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse CSS selector '{}' in {}: {}. Using fallback selector.",
            selector_str,
            context,
            e
        );
        Selector::parse("*:not(*)")
            .expect("Fallback selector '*:not(*)' should always parse - this is a programming error")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_valid_selector_parses() {
        let selector = parse_selector_with_fallback("meta", "test");
        let document = Html::parse_document("<html><head><meta name=\"a\" content=\"b\"></head></html>");
        assert_eq!(document.select(&selector).count(), 1);
    }

    #[test]
    fn test_invalid_selector_falls_back_to_matching_nothing() {
        let selector = parse_selector_with_fallback("!!!", "test");
        let document = Html::parse_document("<html><body><p>text</p></body></html>");
        assert_eq!(document.select(&selector).count(), 0);
    }
}
