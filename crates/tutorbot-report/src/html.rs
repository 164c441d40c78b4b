//! HTML results page.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::Result;
use std::collections::BTreeMap;
use std::path::Path;

use tutorbot_core::profile::{STRENGTH_THRESHOLD, WEAKNESS_THRESHOLD};
use tutorbot_core::report::AssessmentReport;

use crate::html_escape;

/// Generate the results page for one assessment report.
pub fn generate_html(report: &AssessmentReport) -> String {
    let student = report.student_id.as_deref().unwrap_or("anonymous");
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>Assessment results: {}</title>\n",
        html_escape(student)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<header>\n");
    html.push_str("<h1>Assessment results</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Student: <strong>{}</strong> | {} | {} of {} answered | {}</p>\n",
        html_escape(student),
        html_escape(&report.bank.name),
        report.answers.len(),
        report.presented,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Headline cards
    html.push_str("<section class=\"cards\">\n");
    html.push_str(&format!(
        "<div class=\"card\"><span>Core competency</span><strong>{:.1} / 10</strong></div>\n",
        report.core_competency_score
    ));
    if !report.holland_code.is_empty() {
        html.push_str(&format!(
            "<div class=\"card\"><span>Holland code</span><strong>{}</strong></div>\n",
            html_escape(&report.holland_code)
        ));
    }
    if let Some(top) = report.interests.ranked().first() {
        html.push_str(&format!(
            "<div class=\"card\"><span>Suggested pathway</span><strong>{}</strong></div>\n",
            html_escape(top.suggested_pathway())
        ));
    }
    html.push_str("</section>\n");

    let means = report.profile.category_means();
    html.push_str("<section class=\"profile\">\n");
    html.push_str("<h2>Category scores</h2>\n");
    if !means.is_empty() {
        html.push_str(&generate_bar_chart(&means));
    }
    html.push_str("<table id=\"categories\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Category</th><th onclick=\"sortTable(1)\">Mean</th><th onclick=\"sortTable(2)\">Answered</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for (category, mean) in &means {
        let class = if report.profile.is_strength(category) {
            "strength"
        } else if report.profile.is_weakness(category) {
            "weakness"
        } else {
            ""
        };
        let answered = report
            .profile
            .category_scores
            .get(category)
            .map_or(0, Vec::len);
        html.push_str(&format!(
            "<tr class=\"{class}\"><td>{}</td><td>{mean:.2}</td><td>{answered}</td></tr>\n",
            html_escape(category)
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    let ranked = report.interests.ranked();
    if !ranked.is_empty() {
        html.push_str("<section class=\"interests\">\n<h2>Career interests</h2>\n<ol>\n");
        for kind in ranked.iter().take(3) {
            html.push_str(&format!(
                "<li><strong>{}</strong>: {}</li>\n",
                html_escape(&kind.to_string()),
                html_escape(&kind.example_careers().join(", "))
            ));
        }
        html.push_str("</ol>\n</section>\n");
    }

    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML results page to a file.
pub fn write_html_report(report: &AssessmentReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

/// Horizontal bars of category means on the 1-5 scale.
fn generate_bar_chart(means: &BTreeMap<String, f64>) -> String {
    let bar_height = 24;
    let max_width = 400;
    let padding = 8;
    let label_width = 200;

    let total_height = means.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (category, mean)) in means.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = (mean / 5.0 * max_width as f64) as usize;

        let color = if *mean >= STRENGTH_THRESHOLD {
            "#22c55e"
        } else if *mean > WEAKNESS_THRESHOLD {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(category)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{label_width}\" y=\"{y}\" width=\"{width}\" height=\"{bar_height}\" fill=\"{color}\" rx=\"4\"/>\n"
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.2}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            mean
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --strong: #dcfce7; --weak: #fde2e2; --accent: #006600; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --strong: #064e3b; --weak: #7f1d1d; --accent: #4ade80; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1 { color: var(--accent); }
h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.cards { display: flex; gap: 1rem; flex-wrap: wrap; }
.card { border: 1px solid var(--border); border-radius: 8px; padding: 1rem 1.5rem; display: flex; flex-direction: column; }
.card strong { font-size: 1.5rem; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.strength { background: var(--strong); }
.weakness { background: var(--weak); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('categories');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    const na = parseFloat(va), nb = parseFloat(vb);
    const cmp = isNaN(na) || isNaN(nb) ? va.localeCompare(vb) : na - nb;
    return asc ? cmp : -cmp;
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn results_page_contains_profile() {
        let report = fixtures::report("STU-1", &[5, 4, 1, 5, 3, 2, 4]);
        let html = generate_html(&report);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.ends_with("</html>"));
        assert!(html.contains("<strong>8.0 / 10</strong>"));
        assert!(html.contains("<strong>IAS</strong>"));
        assert!(html.contains("<tr class=\"strength\"><td>mathematics</td><td>4.50</td><td>2</td></tr>"));
        assert!(html.contains("<tr class=\"weakness\"><td>languages</td>"));
        assert!(html.contains("<svg"));
    }

    #[test]
    fn bank_name_is_escaped() {
        let report = fixtures::report("<script>", &[3]);
        let html = generate_html(&report);
        assert!(html.contains("Career &lt;Assessment&gt;"));
        assert!(!html.contains("Student: <strong><script>"));
    }

    #[test]
    fn write_to_file() {
        let report = fixtures::report("STU-1", &[5]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.html");

        write_html_report(&report, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
