//! Core data model types for tutorbot.
//!
//! Questions are authored ahead of time and never change while an assessment
//! runs; answers are the only mutable input to the flow.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AssessmentError;

/// Default cap on how many questions a single run presents.
pub const DEFAULT_MAX_QUESTIONS: usize = 60;

/// A single pre-authored assessment question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the bank.
    pub id: String,
    /// Prompt shown to the learner.
    pub text: String,
    /// Category label used for profiling (e.g. "mathematics", "investigative").
    pub category: String,
    /// Where the question comes from.
    pub source: Source,
    /// Authored difficulty.
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Authored adaptive level; higher levels are kept for strong categories.
    #[serde(default = "default_adaptive_level")]
    pub adaptive_level: u8,
    /// Competency tags this question exercises.
    #[serde(default)]
    pub competency_focus: Vec<String>,
    /// Whether this question contributes to the core competency score.
    #[serde(default)]
    pub core_competency: bool,
}

fn default_adaptive_level() -> u8 {
    1
}

/// Classification of a question's origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Curriculum,
    Interest,
    Psychometric,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Curriculum => write!(f, "curriculum"),
            Source::Interest => write!(f, "interest"),
            Source::Psychometric => write!(f, "psychometric"),
        }
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "curriculum" => Ok(Source::Curriculum),
            "interest" | "riasec" => Ok(Source::Interest),
            "psychometric" | "personality" => Ok(Source::Psychometric),
            other => Err(format!("unknown question source: {other}")),
        }
    }
}

/// Authored difficulty label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// A validated Likert score in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validate a raw score. Out-of-range input is rejected, never clamped.
    pub fn new(raw: i64) -> Result<Self, AssessmentError> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&raw) {
            Ok(Score(raw as u8))
        } else {
            Err(AssessmentError::ScoreOutOfRange(raw))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Score {
    type Error = AssessmentError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Score::new(raw)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> u8 {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Recorded answers keyed by question id.
///
/// Re-answering a question overwrites the previous score; no history is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers(BTreeMap<String, Score>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a score, returning the one it replaced.
    pub fn record(&mut self, question_id: impl Into<String>, score: Score) -> Option<Score> {
        self.0.insert(question_id.into(), score)
    }

    pub fn get(&self, question_id: &str) -> Option<Score> {
        self.0.get(question_id).copied()
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.0.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Score)> {
        self.0.iter().map(|(id, s)| (id.as_str(), *s))
    }
}

/// A named pool of questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    /// Unique identifier for this bank.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// CBC grade level the bank targets, if any.
    #[serde(default)]
    pub grade: Option<String>,
    /// Maximum questions presented per run.
    #[serde(default = "default_max_questions")]
    pub max_questions: usize,
    /// Minimum questions a run must present after adaptive filtering.
    #[serde(default)]
    pub min_questions: usize,
    /// The questions, in authored order.
    #[serde(default)]
    pub questions: Vec<Question>,
}

fn default_max_questions() -> usize {
    DEFAULT_MAX_QUESTIONS
}

impl QuestionBank {
    pub fn get(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    pub fn core_questions(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(|q| q.core_competency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_rejects_out_of_range() {
        assert!(Score::new(0).is_err());
        assert!(Score::new(6).is_err());
        assert_eq!(
            Score::new(-3).unwrap_err(),
            AssessmentError::ScoreOutOfRange(-3)
        );
        assert_eq!(Score::new(1).unwrap().value(), 1);
        assert_eq!(Score::new(5).unwrap().value(), 5);
    }

    #[test]
    fn score_deserialize_validates() {
        let ok: Score = serde_json::from_str("4").unwrap();
        assert_eq!(ok.value(), 4);
        assert!(serde_json::from_str::<Score>("9").is_err());
    }

    #[test]
    fn answers_overwrite_keeps_latest() {
        let mut answers = Answers::new();
        assert!(answers.record("q1", Score::new(2).unwrap()).is_none());
        let previous = answers.record("q1", Score::new(5).unwrap());
        assert_eq!(previous.map(Score::value), Some(2));
        assert_eq!(answers.get("q1").map(Score::value), Some(5));
        assert_eq!(answers.len(), 1);
    }

    #[test]
    fn difficulty_and_source_parse() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!("riasec".parse::<Source>().unwrap(), Source::Interest);
        assert!("impossible".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn question_serde_defaults() {
        let json = r#"{"id":"q1","text":"Do you enjoy experiments?","category":"investigative","source":"interest"}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.difficulty, Difficulty::Medium);
        assert_eq!(q.adaptive_level, 1);
        assert!(!q.core_competency);
        assert!(q.competency_focus.is_empty());
    }
}
