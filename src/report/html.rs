//! HTML dashboard rendering.
//!
//! Consumes [`AggregateStats`] and writes one index page plus one page per
//! target. Templates are compiled into the binary; a template that fails to
//! compile or render is a batch-level failure, unlike anything inside a
//! target's scan.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde_json::json;

use super::AggregateStats;
use crate::models::ScanResult;

const INDEX_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>webwitness dashboard</title>
<style>
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 0; color: #212529; background: #f6f7f9; }
.container { max-width: 1200px; margin: 0 auto; padding: 2rem; }
header { background: #243447; color: white; padding: 1.5rem 2rem; border-radius: 8px; margin-bottom: 2rem; }
header h1 { margin: 0; font-size: 1.6rem; }
header p { margin: 0.4rem 0 0; opacity: 0.8; }
.cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 1rem; margin-bottom: 2rem; }
.card { background: white; border-radius: 8px; padding: 1.2rem; box-shadow: 0 2px 8px rgba(0,0,0,0.06); text-align: center; }
.card h3 { margin: 0; color: #6c757d; font-size: 0.8rem; text-transform: uppercase; letter-spacing: 0.5px; }
.card .number { font-size: 2rem; font-weight: 700; margin-top: 0.5rem; }
.card .number.danger { color: #c0392b; }
.card .number.warning { color: #d68910; }
table { width: 100%; border-collapse: collapse; background: white; border-radius: 8px; overflow: hidden; box-shadow: 0 2px 8px rgba(0,0,0,0.06); margin-bottom: 2rem; }
th, td { padding: 0.7rem 1rem; text-align: left; border-bottom: 1px solid #e3e6ea; }
th { background: #eef1f4; font-weight: 600; }
.badge { display: inline-block; padding: 0.2em 0.6em; font-size: 0.75em; font-weight: 600; color: white; border-radius: 10px; }
.badge-danger { background: #c0392b; }
.badge-warning { background: #d68910; }
.badge-success { background: #1e8449; }
a.btn { text-decoration: none; color: #2c5aa0; font-weight: 500; }
.url-col { max-width: 320px; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; }
</style>
</head>
<body>
<div class="container">
  <header>
    <h1>webwitness dashboard</h1>
    <p>Report generated at {{generated_at}}</p>
  </header>

  <div class="cards">
    <div class="card"><h3>Targets Scanned</h3><div class="number">{{stats.total_urls}}</div></div>
    <div class="card"><h3>Errors</h3><div class="number{{#if stats.errors}} danger{{/if}}">{{stats.errors}}</div></div>
    <div class="card"><h3>Default Credentials</h3><div class="number{{#if stats.default_creds_found}} warning{{/if}}">{{stats.default_creds_found}}</div></div>
  </div>

  <h2>Categories</h2>
  <table>
    <tr><th>Category</th><th>Count</th></tr>
    {{#each stats.categories}}
    <tr><td>{{@key}}</td><td>{{this}}</td></tr>
    {{/each}}
  </table>

  {{#if stats.apps_identified}}
  <h2>Identified Applications</h2>
  <table>
    <tr><th>Application</th><th>Count</th></tr>
    {{#each stats.apps_identified}}
    <tr><td>{{@key}}</td><td>{{this}}</td></tr>
    {{/each}}
  </table>
  {{/if}}

  <h2>Scan Results</h2>
  <table>
    <tr><th>URL</th><th>Title</th><th>Category</th><th>Apps</th><th>Default Creds</th><th>Status</th><th></th></tr>
    {{#each stats.reports}}
    <tr>
      <td class="url-col">{{url}}</td>
      <td>{{title}}</td>
      <td>{{#if category}}{{category}}{{else}}-{{/if}}</td>
      <td>{{apps_count}}</td>
      <td>{{#if has_default_creds}}<span class="badge badge-warning">Yes</span>{{else}}No{{/if}}</td>
      <td>{{#if error}}<span class="badge badge-danger">Error</span>{{else}}<span class="badge badge-success">OK</span>{{/if}}</td>
      <td><a class="btn" href="{{report_file}}">View</a></td>
    </tr>
    {{/each}}
  </table>
</div>
</body>
</html>
"##;

const REPORT_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Report - {{summary.url}}</title>
<style>
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 0; color: #212529; background: #f6f7f9; }
.container { max-width: 1000px; margin: 0 auto; padding: 2rem; }
.panel { background: white; border-radius: 8px; padding: 1.5rem 2rem; box-shadow: 0 2px 8px rgba(0,0,0,0.06); margin-bottom: 1.5rem; }
h1 { font-size: 1.4rem; }
h2 { font-size: 1.1rem; border-bottom: 1px solid #e3e6ea; padding-bottom: 0.5rem; }
table { width: 100%; border-collapse: collapse; margin: 1rem 0; }
th, td { padding: 0.5rem 0.8rem; text-align: left; border: 1px solid #e3e6ea; font-size: 0.9rem; }
th { background: #eef1f4; }
.screenshot { max-width: 100%; border-radius: 6px; border: 1px solid #e3e6ea; }
.error { background: #fdeaea; border-left: 4px solid #c0392b; padding: 1rem; border-radius: 4px; }
.creds { background: #fdf3e3; border-left: 4px solid #d68910; padding: 1rem; border-radius: 4px; }
.missing { color: #c0392b; }
.present { color: #1e8449; }
a { color: #2c5aa0; }
</style>
</head>
<body>
<div class="container">
  <p><a href="index.html">&larr; Back to dashboard</a></p>
  <div class="panel">
    <h1>{{summary.url}}</h1>
    <p>Scanned at {{summary.timestamp}}</p>

    {{#if result.error}}
    <div class="error"><strong>Error:</strong> {{result.error}}</div>
    {{/if}}

    {{#if summary.screenshot_data}}
    <h2>Screenshot</h2>
    <img class="screenshot" alt="Screenshot of {{summary.url}}" src="data:image/png;base64,{{{summary.screenshot_data}}}">
    {{/if}}

    {{#if result.category}}
    <p><strong>Category:</strong> {{result.category}}</p>
    {{/if}}

    {{#if result.identified_applications}}
    <h2>Identified Applications</h2>
    <table>
      <tr><th>Application</th><th>Matched Patterns</th><th>Default Credentials</th></tr>
      {{#each result.identified_applications}}
      <tr><td>{{name}}</td><td>{{#each matched_patterns}}{{this}} {{/each}}</td><td>{{credentials}}</td></tr>
      {{/each}}
    </table>
    {{/if}}

    {{#if result.default_credentials}}
    <div class="creds">
      <strong>Default credentials identified:</strong>
      <ul>
      {{#each result.default_credentials}}
        <li>{{this}}</li>
      {{/each}}
      </ul>
    </div>
    {{/if}}

    <h2>Security Headers</h2>
    <table>
      <tr><th>Header</th><th>Status</th><th>Value</th></tr>
      {{#each result.security_headers}}
      <tr>
        <td>{{@key}}</td>
        <td>{{#if (eq this "Not set")}}<span class="missing">Missing</span>{{else}}<span class="present">Present</span>{{/if}}</td>
        <td>{{this}}</td>
      </tr>
      {{/each}}
    </table>

    {{#if result.http_headers}}
    <h2>HTTP Headers</h2>
    <table>
      <tr><th>Header</th><th>Value</th></tr>
      {{#each result.http_headers}}
      <tr><td>{{@key}}</td><td>{{this}}</td></tr>
      {{/each}}
    </table>
    {{/if}}

    <h2>Metadata</h2>
    <p><strong>Title:</strong> {{result.metadata.title}}</p>
    {{#if result.metadata.meta_tags}}
    <table>
      <tr><th>Name</th><th>Content</th></tr>
      {{#each result.metadata.meta_tags}}
      <tr><td>{{@key}}</td><td>{{this}}</td></tr>
      {{/each}}
    </table>
    {{/if}}
  </div>
</div>
</body>
</html>
"##;

/// Renders the index page and one report page per target into `output_dir`,
/// returning the index path.
pub fn render_reports(
    stats: &AggregateStats,
    results: &[ScanResult],
    output_dir: &Path,
) -> Result<PathBuf> {
    let mut handlebars = Handlebars::new();
    handlebars
        .register_template_string("index", INDEX_TEMPLATE)
        .context("Failed to compile index template")?;
    handlebars
        .register_template_string("report", REPORT_TEMPLATE)
        .context("Failed to compile report template")?;

    for (summary, result) in stats.reports.iter().zip(results) {
        let html = handlebars
            .render("report", &json!({ "summary": summary, "result": result }))
            .with_context(|| format!("Failed to render report for {}", summary.url))?;
        std::fs::write(output_dir.join(&summary.report_file), html)
            .with_context(|| format!("Failed to write {}", summary.report_file))?;
    }

    let html = handlebars
        .render(
            "index",
            &json!({
                "stats": stats,
                "generated_at": chrono::Utc::now().to_rfc3339(),
            }),
        )
        .context("Failed to render index page")?;
    let index_path = output_dir.join("index.html");
    std::fs::write(&index_path, html).context("Failed to write index page")?;

    log::info!(
        "generated reports for {} target(s) in {}",
        stats.reports.len(),
        output_dir.display()
    );
    Ok(index_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScanResult;
    use crate::report::aggregate;

    #[test]
    fn test_render_reports_writes_index_and_pages() {
        let dir = tempfile::tempdir().expect("tempdir");
        let results = vec![
            ScanResult::new("https://a.example"),
            ScanResult::failed("https://b.example", "navigation failed"),
        ];
        let stats = aggregate(&results);

        let index = render_reports(&stats, &results, dir.path()).expect("render");
        assert!(index.ends_with("index.html"));
        assert!(dir.path().join("report_0.html").exists());
        assert!(dir.path().join("report_1.html").exists());

        let index_html = std::fs::read_to_string(&index).expect("read index");
        assert!(index_html.contains("https://a.example"));
        assert!(index_html.contains("Error"));

        let failed_page =
            std::fs::read_to_string(dir.path().join("report_1.html")).expect("read page");
        assert!(failed_page.contains("navigation failed"));
    }

    #[test]
    fn test_report_page_marks_missing_security_headers() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut result = ScanResult::new("https://a.example");
        result
            .security_headers
            .insert("X-Frame-Options".into(), "DENY".into());
        let results = vec![result];
        let stats = aggregate(&results);

        render_reports(&stats, &results, dir.path()).expect("render");
        let page = std::fs::read_to_string(dir.path().join("report_0.html")).expect("read page");
        assert!(page.contains("Missing"));
        assert!(page.contains("Present"));
    }
}
