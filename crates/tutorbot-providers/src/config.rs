//! Tutorbot configuration and factories.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use tutorbot_core::assessment::SelectionPolicy;
use tutorbot_core::model::DEFAULT_MAX_QUESTIONS;
use tutorbot_core::traits::{LearningPathSource, Tutor};

use crate::learning_path::HttpLearningPathClient;
use crate::tutor::{RuleTableTutor, TutorRule};

/// Learning-path backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningPathConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for LearningPathConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}
fn default_timeout() -> u64 {
    30
}

/// Chat tutor settings. Empty `rules` means the built-in CBC rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorConfig {
    /// Simulated thinking time before a reply.
    #[serde(default = "default_thinking_delay")]
    pub thinking_delay_ms: u64,
    #[serde(default)]
    pub rules: Vec<TutorRule>,
    #[serde(default)]
    pub fallback_responses: Vec<String>,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            thinking_delay_ms: default_thinking_delay(),
            rules: Vec::new(),
            fallback_responses: Vec::new(),
        }
    }
}

fn default_thinking_delay() -> u64 {
    1500
}

/// Question selection limits applied when a bank does not set its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentConfig {
    #[serde(default = "default_max_questions")]
    pub max_questions: usize,
    #[serde(default)]
    pub min_questions: usize,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            max_questions: default_max_questions(),
            min_questions: 0,
        }
    }
}

impl AssessmentConfig {
    pub fn policy(&self) -> SelectionPolicy {
        SelectionPolicy {
            max_questions: self.max_questions,
            min_questions: self.min_questions,
        }
    }
}

fn default_max_questions() -> usize {
    DEFAULT_MAX_QUESTIONS
}

/// Top-level tutorbot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorbotConfig {
    #[serde(default)]
    pub learning_path: LearningPathConfig,
    #[serde(default)]
    pub tutor: TutorConfig,
    #[serde(default)]
    pub assessment: AssessmentConfig,
    /// Student id used when none is given on the command line.
    #[serde(default = "default_student_id")]
    pub default_student_id: String,
    /// Max concurrent learning-path requests.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    /// Where assessment reports are written.
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,
}

fn default_student_id() -> String {
    "student".to_string()
}
fn default_parallelism() -> usize {
    4
}
fn default_reports_dir() -> PathBuf {
    PathBuf::from("./tutorbot-reports")
}

impl Default for TutorbotConfig {
    fn default() -> Self {
        Self {
            learning_path: LearningPathConfig::default(),
            tutor: TutorConfig::default(),
            assessment: AssessmentConfig::default(),
            default_student_id: default_student_id(),
            parallelism: default_parallelism(),
            reports_dir: default_reports_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let value = std::env::var(&result[start + 2..start + end]).unwrap_or_default();
        result.replace_range(start..start + end + 1, &value);
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `tutorbot.toml` in the current directory
/// 2. `~/.config/tutorbot/config.toml`
///
/// `TUTORBOT_API_URL` overrides the learning-path base URL.
pub fn load_config() -> Result<TutorbotConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<TutorbotConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("tutorbot.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<TutorbotConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => TutorbotConfig::default(),
    };

    if let Ok(url) = std::env::var("TUTORBOT_API_URL") {
        config.learning_path.base_url = url;
    }
    config.learning_path.base_url = resolve_env_vars(&config.learning_path.base_url);
    config.default_student_id = resolve_env_vars(&config.default_student_id);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("tutorbot"))
}

/// Build the chat tutor described by `config`.
pub fn create_tutor(config: &TutorConfig) -> Box<dyn Tutor> {
    let mut tutor = if config.rules.is_empty() {
        RuleTableTutor::cbc_default()
    } else {
        RuleTableTutor::new(config.rules.clone(), Vec::new())
    };
    if !config.fallback_responses.is_empty() {
        tutor = tutor.with_fallbacks(config.fallback_responses.clone());
    }
    Box::new(tutor.with_delay(config.thinking_delay_ms))
}

/// Build the HTTP learning-path client described by `config`.
pub fn create_learning_path_source(config: &LearningPathConfig) -> Arc<dyn LearningPathSource> {
    Arc::new(HttpLearningPathClient::new(
        &config.base_url,
        config.timeout_secs,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_TUTORBOT_TEST_VAR", "school.example");
        assert_eq!(resolve_env_vars("${_TUTORBOT_TEST_VAR}"), "school.example");
        assert_eq!(
            resolve_env_vars("https://${_TUTORBOT_TEST_VAR}/api"),
            "https://school.example/api"
        );
        assert_eq!(resolve_env_vars("${UNTERMINATED"), "${UNTERMINATED");
        std::env::remove_var("_TUTORBOT_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = TutorbotConfig::default();
        assert_eq!(config.tutor.thinking_delay_ms, 1500);
        assert_eq!(config.assessment.max_questions, 60);
        assert_eq!(config.parallelism, 4);
        assert_eq!(config.learning_path.timeout_secs, 30);
    }

    #[test]
    fn parse_partial_config() {
        let toml_str = r#"
default_student_id = "STU-001"

[learning_path]
base_url = "https://api.example.org"

[tutor]
thinking_delay_ms = 0
fallback_responses = ["Ask your teacher about that."]

[[tutor.rules]]
keyword = "photosynthesis"
response = "Plants make food using sunlight."

[assessment]
min_questions = 10
"#;
        let config: TutorbotConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default_student_id, "STU-001");
        assert_eq!(config.learning_path.base_url, "https://api.example.org");
        assert_eq!(config.learning_path.timeout_secs, 30);
        assert_eq!(config.tutor.rules.len(), 1);
        assert_eq!(config.assessment.policy().min_questions, 10);
        assert_eq!(config.assessment.policy().max_questions, 60);
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tutorbot.toml");
        std::fs::write(&path, "parallelism = 2\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.parallelism, 2);
    }
}
