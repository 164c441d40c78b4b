//! TOML question bank parser.
//!
//! Loads question banks from TOML files and directories, and validates them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::career::RiasecType;
use crate::model::{Difficulty, Question, QuestionBank, Source, DEFAULT_MAX_QUESTIONS};

/// Intermediate TOML structure for parsing question bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    grade: Option<String>,
    #[serde(default = "default_max_questions")]
    max_questions: usize,
    #[serde(default)]
    min_questions: usize,
}

fn default_max_questions() -> usize {
    DEFAULT_MAX_QUESTIONS
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    text: String,
    category: String,
    source: String,
    #[serde(default = "default_difficulty_str")]
    difficulty: String,
    #[serde(default = "default_adaptive_level")]
    adaptive_level: u8,
    #[serde(default)]
    competency_focus: Vec<String>,
    #[serde(default)]
    core_competency: bool,
}

fn default_difficulty_str() -> String {
    "medium".to_string()
}

fn default_adaptive_level() -> u8 {
    1
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_question_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank file: {}", path.display()))?;

    parse_question_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_question_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            let source: Source = q
                .source
                .parse()
                .map_err(|e: String| anyhow::anyhow!("question {}: {}", q.id, e))?;
            let difficulty: Difficulty = q
                .difficulty
                .parse()
                .map_err(|e: String| anyhow::anyhow!("question {}: {}", q.id, e))?;

            Ok(Question {
                id: q.id,
                text: q.text,
                category: q.category.trim().to_lowercase(),
                source,
                difficulty,
                adaptive_level: q.adaptive_level,
                competency_focus: q.competency_focus,
                core_competency: q.core_competency,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(QuestionBank {
        id: parsed.bank.id,
        name: parsed.bank.name,
        description: parsed.bank.description,
        grade: parsed.bank.grade,
        max_questions: parsed.bank.max_questions,
        min_questions: parsed.bank.min_questions,
        questions,
    })
}

/// Recursively load all `.toml` question bank files from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<_>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_question_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// Load a single file or every bank under a directory.
pub fn load_banks(path: &Path) -> Result<Vec<QuestionBank>> {
    if path.is_dir() {
        load_bank_directory(path)
    } else {
        Ok(vec![parse_question_bank(path)?])
    }
}

/// A warning from question bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a question bank for common authoring issues.
pub fn validate_question_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if bank.questions.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "bank has no questions".into(),
        });
    }

    if bank.questions.len() > bank.max_questions {
        warnings.push(ValidationWarning {
            question_id: None,
            message: format!(
                "{} questions authored but at most {} are presented",
                bank.questions.len(),
                bank.max_questions
            ),
        });
    }

    if bank.min_questions > bank.questions.len().min(bank.max_questions) {
        warnings.push(ValidationWarning {
            question_id: None,
            message: format!(
                "min_questions {} cannot be satisfied by this bank",
                bank.min_questions
            ),
        });
    }

    let mut seen_ids = std::collections::HashSet::new();
    for question in &bank.questions {
        if !seen_ids.insert(&question.id) {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: format!("duplicate question ID: {}", question.id),
            });
        }
    }

    for question in &bank.questions {
        if question.text.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: "question text is empty".into(),
            });
        }
        if question.core_competency && question.competency_focus.is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: "core competency question has no competency_focus tags".into(),
            });
        }
        if question.source == Source::Interest && question.category.parse::<RiasecType>().is_err()
        {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: format!(
                    "interest question category '{}' is not a RIASEC type",
                    question.category
                ),
            });
        }
    }

    warnings
}
