//! The `tutorbot assess` command.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};

use tutorbot_core::assessment::{AssessmentSession, SelectionPolicy, Step};
use tutorbot_core::parser;
use tutorbot_core::report::AssessmentReport;
use tutorbot_providers::config::load_config_from;
use tutorbot_report::{write_html_report, write_text_report};

pub fn execute(
    bank_path: PathBuf,
    student: Option<String>,
    answers_path: Option<PathBuf>,
    output: Option<PathBuf>,
    export: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    if let Some(format) = &export {
        anyhow::ensure!(
            matches!(format.as_str(), "txt" | "html" | "all"),
            "unknown export format '{format}' (expected txt, html or all)"
        );
    }

    let bank = parser::parse_question_bank(&bank_path)?;
    for w in parser::validate_question_bank(&bank) {
        tracing::warn!(question = ?w.question_id, "{}", w.message);
    }

    // The config can only tighten a bank's own bounds.
    let policy = SelectionPolicy {
        max_questions: bank.max_questions.min(config.assessment.max_questions),
        min_questions: bank.min_questions.max(config.assessment.min_questions),
    };
    let mut session = AssessmentSession::with_policy(bank, policy)?;

    let input: Box<dyn BufRead> = match &answers_path {
        Some(path) => Box::new(BufReader::new(File::open(path).with_context(|| {
            format!("failed to open answers file: {}", path.display())
        })?)),
        None => Box::new(io::stdin().lock()),
    };

    println!(
        "{}: {} questions. Answer 1 (strongly disagree) to 5 (strongly agree); b = back, q = quit.",
        session.bank().name,
        session.len()
    );
    run_session(&mut session, input)?;

    let student_id = student.unwrap_or_else(|| config.default_student_id.clone());
    let report = AssessmentReport::from_session(&session, Some(student_id.clone()));
    tracing::info!(
        student = %student_id,
        answered = report.answers.len(),
        completed = report.completed,
        "assessment finished"
    );

    print_summary(&report);

    let dir = output.unwrap_or_else(|| config.reports_dir.clone());
    let stem = format!(
        "{}-{}-{}",
        file_safe(&student_id),
        report.created_at.format("%Y%m%d-%H%M%S"),
        &report.id.to_string()[..8]
    );
    let json_path = dir.join(format!("{stem}.json"));
    report.save_json(&json_path)?;
    println!("\nReport saved to {}", json_path.display());

    if let Some(format) = export.as_deref() {
        if matches!(format, "txt" | "all") {
            let path = dir.join(format!("{stem}.txt"));
            write_text_report(&report, &path)?;
            println!("Results exported to {}", path.display());
        }
        if matches!(format, "html" | "all") {
            let path = dir.join(format!("{stem}.html"));
            write_html_report(&report, &path)?;
            println!("Results page written to {}", path.display());
        }
    }

    Ok(())
}

/// Drive the session from line input until completion, `q`, or end of input.
fn run_session(session: &mut AssessmentSession, input: Box<dyn BufRead>) -> Result<()> {
    let mut lines = input.lines();

    loop {
        let Some(question) = session.current() else {
            break;
        };
        println!(
            "\n[{}/{}] ({}) {}",
            session.index() + 1,
            session.len(),
            question.category,
            question.text
        );
        if let Some(previous) = session.answers().get(&question.id) {
            println!("  current answer: {}", previous.value());
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let entry = line.trim();

        match entry {
            "" => {
                // Enter keeps an existing answer.
                if session.can_advance() && session.advance()? == Step::Completed {
                    break;
                }
                continue;
            }
            "b" | "back" => {
                if !session.retreat() {
                    println!("  Already at the first question.");
                }
                continue;
            }
            "q" | "quit" => break,
            _ => {}
        }

        let Ok(raw) = entry.parse::<i64>() else {
            println!("  Enter a score from 1 to 5, b to go back or q to quit.");
            continue;
        };
        match session.answer_current(raw) {
            Ok(_) => {}
            Err(e) if e.is_input_error() => {
                println!("  {e}");
                continue;
            }
            Err(e) => return Err(e.into()),
        }

        if session.advance()? == Step::Completed {
            break;
        }
    }

    Ok(())
}

fn print_summary(report: &AssessmentReport) {
    use comfy_table::{Cell, Table};

    if report.completed {
        println!("\nAssessment complete.");
    } else {
        println!(
            "\nAssessment incomplete: answered {} of {} questions.",
            report.answers.len(),
            report.presented
        );
    }

    let means = report.profile.category_means();
    if !means.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Category", "Mean", "Answered", ""]);
        for (category, mean) in &means {
            let tag = if report.profile.is_strength(category) {
                "strength"
            } else if report.profile.is_weakness(category) {
                "needs support"
            } else {
                ""
            };
            let answered = report
                .profile
                .category_scores
                .get(category)
                .map_or(0, Vec::len);
            table.add_row(vec![
                Cell::new(category),
                Cell::new(format!("{mean:.2}")),
                Cell::new(answered),
                Cell::new(tag),
            ]);
        }
        println!("\n{table}");
    }

    println!(
        "\nCore competency score: {:.1} / 10",
        report.core_competency_score
    );
    if !report.holland_code.is_empty() {
        println!("Holland code: {}", report.holland_code);
    }
    if let Some(top) = report.interests.ranked().first() {
        println!("Suggested pathway: {}", top.suggested_pathway());
    }
}

fn file_safe(s: &str) -> String {
    let cleaned: String = s
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "student".to_string()
    } else {
        cleaned
    }
}
