//! Small shared utilities.

mod sanitize;
mod selector;

pub use sanitize::{sanitize_and_truncate_error_message, sanitize_error_message};
pub use selector::parse_selector_with_fallback;

/// Derives a filesystem-safe directory name from a target URL.
///
/// The substitution is fixed and deterministic: the scheme separator, path
/// separators, dots, and port colons all become underscores, so the same URL
/// always maps to the same directory.
pub fn url_safe_name(url: &str) -> String {
    url.replace("://", "_")
        .replace(['/', '.', ':'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_safe_name_basic() {
        assert_eq!(
            url_safe_name("https://example.com/admin"),
            "https_example_com_admin"
        );
    }

    #[test]
    fn test_url_safe_name_with_port() {
        assert_eq!(
            url_safe_name("http://10.0.0.5:8080/login"),
            "http_10_0_0_5_8080_login"
        );
    }

    #[test]
    fn test_url_safe_name_deterministic() {
        let url = "https://a.example/x/y.z";
        assert_eq!(url_safe_name(url), url_safe_name(url));
    }
}
