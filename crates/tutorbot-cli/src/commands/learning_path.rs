//! The `tutorbot learning-path` command.

use std::path::PathBuf;

use anyhow::Result;

use tutorbot_core::guidance::fetch_learning_paths;
use tutorbot_core::report::AssessmentReport;
use tutorbot_core::traits::{LearningPath, LearningPathRequest};
use tutorbot_providers::config::load_config_from;
use tutorbot_providers::{create_learning_path_source, ProviderError};

pub async fn execute(
    students: Option<String>,
    personality: Option<String>,
    report_path: Option<PathBuf>,
    parallelism: Option<usize>,
    json: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let parallelism = parallelism.unwrap_or(config.parallelism);
    anyhow::ensure!(parallelism >= 1, "parallelism must be at least 1");

    let report = report_path
        .as_deref()
        .map(AssessmentReport::load_json)
        .transpose()?;

    let personality = match (personality, &report) {
        (Some(p), _) => p.trim().to_uppercase(),
        (None, Some(r)) => r.holland_code.clone(),
        (None, None) => String::new(),
    };
    anyhow::ensure!(
        !personality.is_empty(),
        "a personality code is required: pass --personality or --report from a completed assessment"
    );

    let student_ids: Vec<String> = match (students, &report) {
        (Some(list), _) => list
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        (None, Some(r)) => vec![r
            .student_id
            .clone()
            .unwrap_or_else(|| config.default_student_id.clone())],
        (None, None) => vec![config.default_student_id.clone()],
    };
    anyhow::ensure!(!student_ids.is_empty(), "no student ids given");

    let requests: Vec<LearningPathRequest> = student_ids
        .into_iter()
        .map(|student_id| LearningPathRequest {
            student_id,
            personality: personality.clone(),
        })
        .collect();

    let source = create_learning_path_source(&config.learning_path);
    tracing::info!(
        source = source.name(),
        students = requests.len(),
        parallelism,
        "fetching learning paths"
    );
    let outcomes = fetch_learning_paths(source, requests, parallelism).await;

    let mut failures = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(path) if json => println!("{}", serde_json::to_string_pretty(path)?),
            Ok(path) => print_path(path),
            Err(e) => {
                failures += 1;
                let message = e
                    .downcast_ref::<ProviderError>()
                    .map(ProviderError::user_message)
                    .unwrap_or("Something went wrong while loading your learning path. Please try again.");
                eprintln!("{}: {message}", outcome.request.student_id);
                tracing::debug!("{}: {e:#}", outcome.request.student_id);
            }
        }
    }

    if failures == outcomes.len() {
        anyhow::bail!("could not load any learning path; please retry");
    }
    Ok(())
}

fn print_path(path: &LearningPath) {
    println!("\nLearning path for {} ({})", path.student_id, path.personality);
    if let Some(best) = path.best_pathway() {
        println!("Recommended pathway: {best}");
    }
    if !path.pathways.is_empty() {
        println!("Pathway matches:");
        for p in &path.pathways {
            println!("  {:<28} {:>5.1}%", p.name, p.match_score);
        }
    }
    if !path.learning_areas.is_empty() {
        println!("Learning areas:");
        for area in &path.learning_areas {
            if area.subjects.is_empty() {
                println!("  - {}", area.name);
            } else {
                println!("  - {} ({})", area.name, area.subjects.join(", "));
            }
        }
    }
    if !path.career_guidance.is_empty() {
        println!("Careers to explore:");
        for career in &path.career_guidance {
            println!("  - {}", career.title);
        }
    }
    if !path.study_tips.is_empty() {
        println!("Study tips:");
        for tip in &path.study_tips {
            println!("  - {tip}");
        }
    }
}
