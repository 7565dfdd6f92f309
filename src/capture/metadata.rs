//! Rendered-document metadata extraction.

use crate::models::PageMetadata;
use crate::utils::parse_selector_with_fallback;
use scraper::Html;

/// Extracts the title and meta tags from rendered HTML.
///
/// Meta tags are keyed by their `name` attribute, falling back to `property`
/// (Open Graph and friends); tags without a `content` attribute are skipped.
pub fn extract_metadata(html: &str) -> PageMetadata {
    let document = Html::parse_document(html);

    let title_selector = parse_selector_with_fallback("title", "title extraction");
    let title = document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let mut metadata = PageMetadata {
        title,
        ..Default::default()
    };

    let meta_selector = parse_selector_with_fallback("meta", "meta tag extraction");
    for element in document.select(&meta_selector) {
        let name = element
            .value()
            .attr("name")
            .or_else(|| element.value().attr("property"));
        if let (Some(name), Some(content)) = (name, element.value().attr("content")) {
            metadata
                .meta_tags
                .insert(name.to_string(), content.to_string());
        }
    }

    metadata
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title_and_meta_tags() {
        let html = r#"
            <html>
                <head>
                    <title>  Login Portal  </title>
                    <meta name="generator" content="WordPress 6.4">
                    <meta property="og:title" content="Portal">
                    <meta name="viewport" content="width=device-width">
                </head>
                <body></body>
            </html>
        "#;
        let metadata = extract_metadata(html);
        assert_eq!(metadata.title, "Login Portal");
        assert_eq!(
            metadata.meta_tags.get("generator").map(String::as_str),
            Some("WordPress 6.4")
        );
        assert_eq!(
            metadata.meta_tags.get("og:title").map(String::as_str),
            Some("Portal")
        );
        assert_eq!(metadata.meta_tags.len(), 3);
    }

    #[test]
    fn test_meta_without_content_is_skipped() {
        let html = r#"<html><head><meta name="robots"><meta charset="utf-8"></head></html>"#;
        let metadata = extract_metadata(html);
        assert!(metadata.meta_tags.is_empty());
    }

    #[test]
    fn test_name_takes_precedence_over_property() {
        let html = r#"<html><head><meta name="author" property="og:author" content="alice"></head></html>"#;
        let metadata = extract_metadata(html);
        assert_eq!(
            metadata.meta_tags.get("author").map(String::as_str),
            Some("alice")
        );
        assert!(!metadata.meta_tags.contains_key("og:author"));
    }

    #[test]
    fn test_missing_title_yields_empty_string() {
        let metadata = extract_metadata("<html><body>no head</body></html>");
        assert_eq!(metadata.title, "");
    }
}
