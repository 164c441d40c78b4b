//! Performance profiling derived from recorded answers.
//!
//! A profile is never stored on its own: it is recomputed from the question
//! pool and the answer set whenever either changes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Answers, Question};

/// Mean score at or above which a category counts as a strength.
pub const STRENGTH_THRESHOLD: f64 = 4.0;
/// Mean score at or below which a category counts as a weakness.
pub const WEAKNESS_THRESHOLD: f64 = 2.0;

/// Per-category scores plus the derived strength/weakness buckets.
///
/// Categories whose mean lies strictly between the two thresholds appear in
/// neither list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceProfile {
    /// Recorded scores per category, in pool order.
    pub category_scores: BTreeMap<String, Vec<u8>>,
    /// Categories with mean >= 4.
    pub strengths: Vec<String>,
    /// Categories with mean <= 2.
    pub weaknesses: Vec<String>,
}

impl PerformanceProfile {
    /// Build a profile from the answered questions in `pool`.
    ///
    /// Answers for ids not present in the pool are ignored.
    pub fn from_answers(pool: &[Question], answers: &Answers) -> Self {
        let mut category_scores: BTreeMap<String, Vec<u8>> = BTreeMap::new();
        for question in pool {
            if let Some(score) = answers.get(&question.id) {
                category_scores
                    .entry(question.category.clone())
                    .or_default()
                    .push(score.value());
            }
        }

        let mut strengths = Vec::new();
        let mut weaknesses = Vec::new();
        for (category, scores) in &category_scores {
            let Some(avg) = mean(scores) else { continue };
            if avg >= STRENGTH_THRESHOLD {
                strengths.push(category.clone());
            } else if avg <= WEAKNESS_THRESHOLD {
                weaknesses.push(category.clone());
            }
        }

        Self {
            category_scores,
            strengths,
            weaknesses,
        }
    }

    pub fn is_strength(&self, category: &str) -> bool {
        self.strengths.iter().any(|c| c == category)
    }

    pub fn is_weakness(&self, category: &str) -> bool {
        self.weaknesses.iter().any(|c| c == category)
    }

    /// Mean score for a category, if it has any answers.
    pub fn category_mean(&self, category: &str) -> Option<f64> {
        self.category_scores.get(category).and_then(|s| mean(s))
    }

    /// Mean score for every answered category.
    pub fn category_means(&self) -> BTreeMap<String, f64> {
        self.category_scores
            .iter()
            .filter_map(|(c, s)| mean(s).map(|m| (c.clone(), m)))
            .collect()
    }
}

fn mean(scores: &[u8]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().map(|&s| s as f64).sum::<f64>() / scores.len() as f64)
}

/// Core competency score on a 0–10 scale, rounded to one decimal.
///
/// Only answered questions flagged `core_competency` count:
/// `sum / (answered * 5) * 10`. Returns 0.0 when none are answered. This is a
/// partial-completion score and is not comparable between learners who have
/// answered different numbers of core questions.
pub fn core_competency_score(pool: &[Question], answers: &Answers) -> f64 {
    let (sum, answered) = pool
        .iter()
        .filter(|q| q.core_competency)
        .filter_map(|q| answers.get(&q.id))
        .fold((0u32, 0u32), |(sum, n), s| (sum + s.value() as u32, n + 1));

    if answered == 0 {
        return 0.0;
    }

    let max_possible = (answered * 5) as f64;
    let scaled = sum as f64 / max_possible * 10.0;
    (scaled * 10.0).round() / 10.0
}
