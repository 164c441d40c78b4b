//! The `tutorbot compare` command.

use std::path::PathBuf;

use anyhow::Result;

use tutorbot_core::report::AssessmentReport;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: f64,
    fail_on_decline: bool,
    format: String,
) -> Result<()> {
    anyhow::ensure!(threshold >= 0.0, "threshold must not be negative");

    let baseline = AssessmentReport::load_json(&baseline_path)?;
    let current = AssessmentReport::load_json(&current_path)?;

    if baseline.student_id != current.student_id {
        tracing::warn!(
            baseline = ?baseline.student_id,
            current = ?current.student_id,
            "comparing reports from different students"
        );
    }

    let report = current.compare(&baseline, threshold);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            println!(
                "Comparison: {} improvements, {} declines, {} unchanged",
                report.improvements.len(),
                report.declines.len(),
                report.unchanged
            );
            println!("Core competency score: {:+.1}", report.core_score_delta);

            if !report.improvements.is_empty() {
                println!("\nImprovements:");
                for d in &report.improvements {
                    println!(
                        "  {} {:.2} -> {:.2} ({:+.2})",
                        d.category, d.baseline_mean, d.current_mean, d.delta
                    );
                }
            }

            if !report.declines.is_empty() {
                println!("\nDeclines:");
                for d in &report.declines {
                    println!(
                        "  {} {:.2} -> {:.2} ({:+.2})",
                        d.category, d.baseline_mean, d.current_mean, d.delta
                    );
                }
            }

            if report.new_categories > 0 {
                println!("\n{} new categor(ies)", report.new_categories);
            }
            if report.dropped_categories > 0 {
                println!("{} categor(ies) no longer assessed", report.dropped_categories);
            }
        }
    }

    if fail_on_decline && report.has_declines() {
        std::process::exit(1);
    }

    Ok(())
}
