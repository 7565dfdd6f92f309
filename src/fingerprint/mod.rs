//! Rule-based application fingerprinting.
//!
//! Evaluates the loaded signature and category rules against rendered page
//! content. Matching is conjunctive case-insensitive substring search: every
//! pattern of a rule must occur somewhere in the content for the rule to
//! fire.
//!
//! A rule whose pattern list is empty (or holds a single empty string, the
//! parse of an empty field) matches every page: the conjunction is vacuous.
//! This mirrors the long-standing behavior of the rule file format and is
//! pinned down by tests rather than guarded against.

use crate::models::IdentifiedApplication;
use crate::rules::RuleSet;

/// Outcome of evaluating all rules against one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FingerprintResult {
    /// One entry per matching signature rule, in rule-file order.
    pub identified_applications: Vec<IdentifiedApplication>,
    /// Distinct credential strings from matching rules, insertion-order
    /// deduplicated with case-sensitive comparison.
    pub default_credentials: Vec<String>,
    /// First matching category rule's label, else a title heuristic, else
    /// absent.
    pub category: Option<String>,
}

/// Evaluates every rule against the page content and title.
///
/// Signature rules all run; category rules stop at the first match. When no
/// category rule matched and the title is non-empty, fixed title heuristics
/// apply in the precedence `unauth`, then `dirlist`, then `notfound`.
pub fn evaluate(content: &str, title: &str, rules: &RuleSet) -> FingerprintResult {
    let content_lower = content.to_lowercase();
    let mut result = FingerprintResult::default();

    for rule in &rules.signatures {
        if matches_all(&rule.patterns, &content_lower) {
            result.identified_applications.push(IdentifiedApplication {
                name: rule.app_name.clone(),
                matched_patterns: rule.patterns.clone(),
                credentials: rule.credentials.clone(),
            });
            if !result.default_credentials.contains(&rule.credentials) {
                result.default_credentials.push(rule.credentials.clone());
            }
        }
    }

    for rule in &rules.categories {
        if matches_all(&rule.patterns, &content_lower) {
            result.category = Some(rule.name.clone());
            break;
        }
    }

    if result.category.is_none() && !title.is_empty() {
        result.category = fallback_category(title).map(ToString::to_string);
    }

    result
}

fn matches_all(patterns: &[String], content_lower: &str) -> bool {
    patterns
        .iter()
        .all(|pattern| content_lower.contains(&pattern.to_lowercase()))
}

/// Coarse classification from well-known error and listing titles.
///
/// Only consulted when no category rule matched. The precedence is fixed:
/// authentication errors beat directory listings beat not-found pages.
fn fallback_category(title: &str) -> Option<&'static str> {
    if title.contains("403 Forbidden") || title.contains("401 Unauthorized") {
        return Some("unauth");
    }
    if title.contains("Index of /")
        || title.contains("Directory Listing For /")
        || title.contains("Directory of /")
    {
        return Some("dirlist");
    }
    if title.contains("404 Not Found") {
        return Some("notfound");
    }
    None
}
