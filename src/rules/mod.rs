//! Signature and category rule loading.
//!
//! Rule files are line-oriented UTF-8 text (decoded with replacement):
//! `#`-prefixed lines and blank lines are ignored, fields are separated by
//! `|`, and the pattern list in field 0 is separated by `;`. Fields beyond
//! index 1 are ignored. Lines with fewer than two fields are dropped without
//! an error: rule files are community-maintained, and a permissive parse
//! keeps one bad line from taking out the whole set.
//!
//! Rules are parsed once at batch start into typed records and never mutated
//! afterwards.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// Extracts the application name from credential text shaped `(Name)rest`.
static APP_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\((.*?)\)(.*)$").expect("app name regex should compile"));

/// One fingerprint definition.
///
/// Every pattern must match the page content (case-insensitive substring)
/// for the rule to fire.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureRule {
    /// Required substrings, all of which must be present.
    pub patterns: Vec<String>,
    /// Application name from the `(Name)` prefix of the credential text,
    /// or the first pattern when no prefix is present.
    pub app_name: String,
    /// Credential/description text, kept verbatim.
    pub credentials: String,
}

/// One category definition.
///
/// Category rules are evaluated in file order and the first full match
/// wins, so the file defines a total order over category assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRule {
    /// Required substrings, all of which must be present.
    pub patterns: Vec<String>,
    /// Category label, trimmed.
    pub name: String,
}

/// Immutable, ordered rule lists held for the duration of a batch.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    /// Signature rules in file order.
    pub signatures: Vec<SignatureRule>,
    /// Category rules in file order.
    pub categories: Vec<CategoryRule>,
}

/// Loads signature and category rules from their definition files.
///
/// A missing file is logged as a warning and yields an empty list for that
/// rule kind; it never fails the batch.
pub fn load_rules(signatures_path: &Path, categories_path: &Path) -> RuleSet {
    let signatures: Vec<SignatureRule> = read_rule_lines(signatures_path, "signatures")
        .iter()
        .filter_map(|line| parse_signature_line(line))
        .collect();
    log::info!(
        "loaded {} signature rules from {}",
        signatures.len(),
        signatures_path.display()
    );

    let categories: Vec<CategoryRule> = read_rule_lines(categories_path, "categories")
        .iter()
        .filter_map(|line| parse_category_line(line))
        .collect();
    log::info!(
        "loaded {} category rules from {}",
        categories.len(),
        categories_path.display()
    );

    RuleSet {
        signatures,
        categories,
    }
}

/// Reads a rule file into trimmed, non-comment, non-empty lines.
fn read_rule_lines(path: &Path, kind: &str) -> Vec<String> {
    match std::fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(ToString::to_string)
            .collect(),
        Err(e) => {
            log::warn!("{} file not found at {}: {}", kind, path.display(), e);
            Vec::new()
        }
    }
}

fn parse_signature_line(line: &str) -> Option<SignatureRule> {
    let mut fields = line.splitn(3, '|');
    let patterns_field = fields.next()?;
    let credentials = fields.next()?.to_string();

    let patterns: Vec<String> = patterns_field.split(';').map(ToString::to_string).collect();
    let app_name = APP_NAME_RE
        .captures(&credentials)
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str().trim().to_string())
        .unwrap_or_else(|| patterns.first().cloned().unwrap_or_default());

    Some(SignatureRule {
        patterns,
        app_name,
        credentials,
    })
}

fn parse_category_line(line: &str) -> Option<CategoryRule> {
    let mut fields = line.splitn(3, '|');
    let patterns_field = fields.next()?;
    let name = fields.next()?.trim().to_string();

    Some(CategoryRule {
        patterns: patterns_field.split(';').map(ToString::to_string).collect(),
        name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_signature_line_with_app_name() {
        let rule = parse_signature_line("wordpress;wp-content|(WordPress) admin/admin")
            .expect("should parse");
        assert_eq!(rule.patterns, vec!["wordpress", "wp-content"]);
        assert_eq!(rule.app_name, "WordPress");
        assert_eq!(rule.credentials, "(WordPress) admin/admin");
    }

    #[test]
    fn test_parse_signature_line_without_app_name_falls_back_to_first_pattern() {
        let rule = parse_signature_line("Grafana;grafana-app|admin/admin").expect("should parse");
        assert_eq!(rule.app_name, "Grafana");
        assert_eq!(rule.credentials, "admin/admin");
    }

    #[test]
    fn test_parse_signature_line_single_field_is_dropped() {
        assert!(parse_signature_line("just-a-pattern").is_none());
    }

    #[test]
    fn test_parse_signature_line_extra_fields_ignored() {
        let rule = parse_signature_line("tomcat|(Tomcat) tomcat/tomcat|ignored|also ignored")
            .expect("should parse");
        assert_eq!(rule.app_name, "Tomcat");
        assert_eq!(rule.credentials, "(Tomcat) tomcat/tomcat");
    }

    #[test]
    fn test_parse_category_line_trims_name() {
        let rule = parse_category_line("jenkins| devops ").expect("should parse");
        assert_eq!(rule.patterns, vec!["jenkins"]);
        assert_eq!(rule.name, "devops");
    }

    #[test]
    fn test_parse_category_line_single_field_is_dropped() {
        assert!(parse_category_line("no-separator-here").is_none());
    }

    #[test]
    fn test_empty_pattern_field_yields_single_empty_pattern() {
        // "".split(';') produces one empty pattern, which matches any page.
        // Preserved deliberately; the engine tests pin the behavior down.
        let rule = parse_signature_line("|(Anything) creds").expect("should parse");
        assert_eq!(rule.patterns, vec![""]);
        assert_eq!(rule.app_name, "Anything");
    }
}
