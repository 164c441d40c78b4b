//! Plain-text results export.

use std::path::Path;

use anyhow::Result;

use tutorbot_core::report::AssessmentReport;

/// Render a report as the plain-text "download results" document.
pub fn generate_text(report: &AssessmentReport) -> String {
    let mut out = String::new();
    let rule = "=".repeat(48);

    out.push_str(&format!("{rule}\n"));
    out.push_str("CBC TUTORBOT ASSESSMENT RESULTS\n");
    out.push_str(&format!("{rule}\n"));
    out.push_str(&format!(
        "Student:    {}\n",
        report.student_id.as_deref().unwrap_or("anonymous")
    ));
    out.push_str(&format!("Assessment: {}\n", report.bank.name));
    if let Some(grade) = &report.bank.grade {
        out.push_str(&format!("Grade:      {grade}\n"));
    }
    out.push_str(&format!(
        "Date:       {}\n",
        report.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    out.push_str(&format!(
        "Status:     {} ({} of {} questions answered)\n",
        if report.completed { "completed" } else { "in progress" },
        report.answers.len(),
        report.presented
    ));
    out.push('\n');
    out.push_str(&format!(
        "Core competency score: {:.1} / 10\n",
        report.core_competency_score
    ));
    if !report.holland_code.is_empty() {
        out.push_str(&format!("Holland code:          {}\n", report.holland_code));
    }

    let means = report.profile.category_means();
    if !means.is_empty() {
        out.push_str("\nCategory scores (1-5):\n");
        for (category, mean) in &means {
            let tag = if report.profile.is_strength(category) {
                "  strength"
            } else if report.profile.is_weakness(category) {
                "  needs support"
            } else {
                ""
            };
            out.push_str(&format!("  {category:<24} {mean:.2}{tag}\n"));
        }
    }

    out.push_str("\nStrengths:\n");
    write_list(&mut out, &report.profile.strengths);
    out.push_str("\nAreas to improve:\n");
    write_list(&mut out, &report.profile.weaknesses);

    let ranked = report.interests.ranked();
    if let Some(top) = ranked.first() {
        out.push_str("\nCareer interests:\n");
        for kind in &ranked {
            if let Some((_, total, n)) = report.interests.totals.iter().find(|(t, _, _)| t == kind)
            {
                out.push_str(&format!("  {:<24} {total} ({n} answered)\n", kind.to_string()));
            }
        }
        out.push_str(&format!("\nSuggested pathway: {}\n", top.suggested_pathway()));
        out.push_str(&format!("Example careers:   {}\n", top.example_careers().join(", ")));
    }

    out
}

fn write_list(out: &mut String, items: &[String]) {
    if items.is_empty() {
        out.push_str("  (none yet)\n");
    }
    for item in items {
        out.push_str(&format!("  - {item}\n"));
    }
}

/// Write a plain-text export to a file.
pub fn write_text_report(report: &AssessmentReport, path: &Path) -> Result<()> {
    let text = generate_text(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, text)?;
    Ok(())
}
