// End-to-end fingerprinting tests: rules loaded from files, evaluated
// against page content, covering the documented matching semantics.

use webwitness::{evaluate, load_rules};

fn rules_from(signatures: &str, categories: &str) -> webwitness::RuleSet {
    let dir = tempfile::tempdir().expect("tempdir");
    let signatures_path = dir.path().join("signatures.txt");
    let categories_path = dir.path().join("categories.txt");
    std::fs::write(&signatures_path, signatures).expect("write signatures");
    std::fs::write(&categories_path, categories).expect("write categories");
    load_rules(&signatures_path, &categories_path)
}

#[test]
fn test_wordpress_signature_example() {
    // Signature line `wordpress;wp-content|(WordPress) admin/admin` against
    // content containing both patterns in any case yields an application
    // named "WordPress" with the full credential text.
    let rules = rules_from("wordpress;wp-content|(WordPress) admin/admin\n", "");
    let content = "<html><body>Powered by WordPress. Assets under /WP-Content/.</body></html>";

    let result = evaluate(content, "", &rules);

    assert_eq!(result.identified_applications.len(), 1);
    let app = &result.identified_applications[0];
    assert_eq!(app.name, "WordPress");
    assert_eq!(app.matched_patterns, vec!["wordpress", "wp-content"]);
    assert_eq!(app.credentials, "(WordPress) admin/admin");
    assert_eq!(result.default_credentials, vec!["(WordPress) admin/admin"]);
}

#[test]
fn test_category_rule_beats_title_fallback() {
    // Category line `Apache|notfound` plus title "404 Not Found": the
    // fallback applies only when the content does not contain "Apache".
    let rules = rules_from("", "Apache|apache-page\n");

    let with_apache = evaluate("Apache/2.4 test page", "404 Not Found", &rules);
    assert_eq!(with_apache.category.as_deref(), Some("apache-page"));

    let without_apache = evaluate("nginx error page", "404 Not Found", &rules);
    assert_eq!(without_apache.category.as_deref(), Some("notfound"));
}

#[test]
fn test_earlier_category_rule_wins_file_order() {
    let rules = rules_from("", "login|first-match\nlogin|second-match\n");
    let result = evaluate("a login page", "", &rules);
    assert_eq!(result.category.as_deref(), Some("first-match"));
}

#[test]
fn test_multiple_signatures_share_credentials_without_duplicates() {
    let rules = rules_from(
        "tomcat|(Tomcat) tomcat/tomcat\nmanager/html|(Tomcat) tomcat/tomcat\n",
        "",
    );
    let result = evaluate("Apache Tomcat /manager/html console", "", &rules);
    assert_eq!(result.identified_applications.len(), 2);
    assert_eq!(result.default_credentials.len(), 1);
}

#[test]
fn test_empty_pattern_field_matches_everything() {
    // A line with an empty pattern field parses to a single empty pattern,
    // and an empty string is a substring of every page.
    let rules = rules_from("|(CatchAll) none\n", "");
    let result = evaluate("any page at all", "", &rules);
    assert_eq!(result.identified_applications.len(), 1);
    assert_eq!(result.identified_applications[0].name, "CatchAll");
}

#[test]
fn test_no_rules_no_title_yields_empty_result() {
    let rules = rules_from("", "");
    let result = evaluate("some content", "", &rules);
    assert!(result.identified_applications.is_empty());
    assert!(result.default_credentials.is_empty());
    assert!(result.category.is_none());
}
