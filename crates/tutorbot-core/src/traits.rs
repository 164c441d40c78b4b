//! Core trait definitions for tutor backends and learning-path sources.
//!
//! These async traits are implemented by the `tutorbot-providers` crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Tutor trait
// ---------------------------------------------------------------------------

/// Trait for chat tutors that answer a learner's message.
#[async_trait]
pub trait Tutor: Send + Sync {
    /// Human-readable tutor name (e.g. "rule-table").
    fn name(&self) -> &str;

    /// Produce a reply to a learner message.
    async fn respond(&self, message: &str) -> anyhow::Result<TutorReply>;
}

/// A tutor's answer to one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorReply {
    /// Reply text shown to the learner.
    pub content: String,
    /// Keyword of the rule that matched, if any.
    #[serde(default)]
    pub matched_keyword: Option<String>,
    /// Time spent producing the reply in milliseconds.
    pub latency_ms: u64,
}

// ---------------------------------------------------------------------------
// Learning path source trait
// ---------------------------------------------------------------------------

/// Trait for backends that recommend a learning path for a student.
#[async_trait]
pub trait LearningPathSource: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch the learning path for one student.
    async fn fetch(&self, request: &LearningPathRequest) -> anyhow::Result<LearningPath>;
}

/// Who to fetch a learning path for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPathRequest {
    pub student_id: String,
    /// Personality / Holland code, e.g. "IAS".
    pub personality: String,
}

/// Learning path payload returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub personality: String,
    #[serde(default)]
    pub learning_areas: Vec<LearningArea>,
    #[serde(default)]
    pub recommended_pathway: Option<String>,
    #[serde(default)]
    pub pathways: Vec<PathwayMatch>,
    #[serde(default)]
    pub career_guidance: Vec<CareerSuggestion>,
    #[serde(default)]
    pub study_tips: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningArea {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subjects: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathwayMatch {
    pub name: String,
    /// Match score in percent.
    #[serde(default)]
    pub match_score: f64,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerSuggestion {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required_subjects: Vec<String>,
}

impl LearningPath {
    /// The pathway with the highest match score, falling back to the
    /// backend's explicit recommendation.
    pub fn best_pathway(&self) -> Option<&str> {
        self.pathways
            .iter()
            .max_by(|a, b| a.match_score.total_cmp(&b.match_score))
            .map(|p| p.name.as_str())
            .or(self.recommended_pathway.as_deref())
    }
}
