//! Assessment report types with JSON persistence and progress comparison.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assessment::AssessmentSession;
use crate::career::InterestProfile;
use crate::model::{Answers, QuestionBank};
use crate::profile::{core_competency_score, PerformanceProfile};

/// A saved assessment outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the question bank.
    pub bank: BankSummary,
    /// Learner the report belongs to.
    #[serde(default)]
    pub student_id: Option<String>,
    /// Whether the learner reached the end of the flow.
    pub completed: bool,
    /// Number of questions the flow presented.
    pub presented: usize,
    /// Raw answers.
    pub answers: Answers,
    /// Derived profile at the time of saving.
    pub profile: PerformanceProfile,
    /// Core competency score on a 0–10 scale.
    pub core_competency_score: f64,
    /// Summed RIASEC interest scores.
    #[serde(default)]
    pub interests: InterestProfile,
    /// Top three RIASEC letters.
    #[serde(default)]
    pub holland_code: String,
}

/// Summary of a question bank (without the questions).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub grade: Option<String>,
    pub question_count: usize,
}

impl BankSummary {
    pub fn of(bank: &QuestionBank) -> Self {
        Self {
            id: bank.id.clone(),
            name: bank.name.clone(),
            grade: bank.grade.clone(),
            question_count: bank.questions.len(),
        }
    }
}

impl AssessmentReport {
    /// Build a report from a bank and an answer set.
    pub fn from_answers(
        bank: &QuestionBank,
        answers: &Answers,
        student_id: Option<String>,
        completed: bool,
        presented: usize,
    ) -> Self {
        let interests = InterestProfile::from_answers(&bank.questions, answers);
        let holland_code = interests.holland_code();
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            bank: BankSummary::of(bank),
            student_id,
            completed,
            presented,
            answers: answers.clone(),
            profile: PerformanceProfile::from_answers(&bank.questions, answers),
            core_competency_score: core_competency_score(&bank.questions, answers),
            interests,
            holland_code,
        }
    }

    /// Snapshot a running or finished session.
    pub fn from_session(session: &AssessmentSession, student_id: Option<String>) -> Self {
        Self::from_answers(
            session.bank(),
            session.answers(),
            student_id,
            session.is_complete(),
            session.len(),
        )
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AssessmentReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Load every `.json` report in a directory, skipping unreadable ones.
    pub fn load_dir(dir: &Path) -> Result<Vec<Self>> {
        let mut reports = Vec::new();
        for entry in std::fs::read_dir(dir)
            .with_context(|| format!("failed to read directory: {}", dir.display()))?
        {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                match Self::load_json(&path) {
                    Ok(r) => reports.push(r),
                    Err(e) => tracing::warn!("skipping {}: {:#}", path.display(), e),
                }
            }
        }
        reports.sort_by_key(|r| r.created_at);
        Ok(reports)
    }

    /// Compare category means against an earlier report.
    ///
    /// Deltas whose magnitude does not exceed `threshold` count as unchanged.
    pub fn compare(&self, baseline: &AssessmentReport, threshold: f64) -> ProgressReport {
        let current = self.profile.category_means();
        let previous = baseline.profile.category_means();

        let mut improvements = Vec::new();
        let mut declines = Vec::new();
        let mut unchanged = 0usize;
        let mut new_categories = 0usize;

        for (category, &now) in &current {
            let Some(&before) = previous.get(category) else {
                new_categories += 1;
                continue;
            };
            let delta = now - before;
            let entry = CategoryDelta {
                category: category.clone(),
                baseline_mean: before,
                current_mean: now,
                delta,
            };
            if delta > threshold {
                improvements.push(entry);
            } else if delta < -threshold {
                declines.push(entry);
            } else {
                unchanged += 1;
            }
        }

        let dropped_categories = previous.keys().filter(|c| !current.contains_key(*c)).count();

        ProgressReport {
            baseline_id: baseline.id,
            current_id: self.id,
            core_score_delta: self.core_competency_score - baseline.core_competency_score,
            improvements,
            declines,
            unchanged,
            new_categories,
            dropped_categories,
        }
    }
}

/// Change in one category's mean between two reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDelta {
    pub category: String,
    pub baseline_mean: f64,
    pub current_mean: f64,
    pub delta: f64,
}

/// Result of comparing two assessment reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub baseline_id: Uuid,
    pub current_id: Uuid,
    pub core_score_delta: f64,
    pub improvements: Vec<CategoryDelta>,
    pub declines: Vec<CategoryDelta>,
    pub unchanged: usize,
    pub new_categories: usize,
    pub dropped_categories: usize,
}

impl ProgressReport {
    pub fn has_declines(&self) -> bool {
        !self.declines.is_empty()
    }

    /// Render as a markdown summary.
    pub fn to_markdown(&self) -> String {
        let mut md = String::from("## Progress\n\n");
        md.push_str(&format!(
            "Core competency score change: {:+.1}\n\n",
            self.core_score_delta
        ));

        let mut table = |title: &str, rows: &[CategoryDelta]| {
            if rows.is_empty() {
                return;
            }
            md.push_str(&format!("### {title}\n\n"));
            md.push_str("| Category | Before | After | Change |\n|---|---|---|---|\n");
            for r in rows {
                md.push_str(&format!(
                    "| {} | {:.2} | {:.2} | {:+.2} |\n",
                    r.category, r.baseline_mean, r.current_mean, r.delta
                ));
            }
            md.push('\n');
        };
        table("Improvements", &self.improvements);
        table("Declines", &self.declines);

        md.push_str(&format!(
            "{} unchanged, {} new, {} no longer assessed\n",
            self.unchanged, self.new_categories, self.dropped_categories
        ));
        md
    }

    /// Per-category deltas keyed by category, improvements and declines only.
    pub fn deltas(&self) -> BTreeMap<&str, f64> {
        self.improvements
            .iter()
            .chain(&self.declines)
            .map(|d| (d.category.as_str(), d.delta))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, Question, Score, Source};

    fn bank() -> QuestionBank {
        let q = |id: &str, category: &str, source: Source, core: bool| Question {
            id: id.into(),
            text: id.into(),
            category: category.into(),
            source,
            difficulty: Difficulty::Medium,
            adaptive_level: 1,
            competency_focus: vec!["communication".into()],
            core_competency: core,
        };
        QuestionBank {
            id: "b".into(),
            name: "Bank".into(),
            description: String::new(),
            grade: Some("Grade 9".into()),
            max_questions: 60,
            min_questions: 0,
            questions: vec![
                q("m1", "maths", Source::Curriculum, true),
                q("s1", "science", Source::Curriculum, false),
                q("i1", "investigative", Source::Interest, false),
                q("a1", "art", Source::Curriculum, false),
            ],
        }
    }

    fn answers(pairs: &[(&str, i64)]) -> Answers {
        let mut a = Answers::new();
        for (id, s) in pairs {
            a.record(*id, Score::new(*s).unwrap());
        }
        a
    }

    #[test]
    fn report_captures_derived_values() {
        let bank = bank();
        let report = AssessmentReport::from_answers(
            &bank,
            &answers(&[("m1", 5), ("s1", 1), ("i1", 4)]),
            Some("s-1".into()),
            true,
            4,
        );
        assert_eq!(report.core_competency_score, 10.0);
        assert_eq!(report.profile.strengths, vec!["investigative", "maths"]);
        assert_eq!(report.profile.weaknesses, vec!["science"]);
        assert_eq!(report.holland_code, "I");
        assert_eq!(report.bank.question_count, 4);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/report.json");
        let report =
            AssessmentReport::from_answers(&bank(), &answers(&[("m1", 3)]), None, false, 4);
        report.save_json(&path).unwrap();

        let loaded = AssessmentReport::load_json(&path).unwrap();
        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.answers, report.answers);

        let all = AssessmentReport::load_dir(&dir.path().join("nested")).unwrap();
        assert_eq!(all.len(), 1);
    }

    #[test]
    fn compare_detects_progress() {
        let bank = bank();
        let before = AssessmentReport::from_answers(
            &bank,
            &answers(&[("m1", 2), ("s1", 4), ("a1", 3)]),
            None,
            true,
            4,
        );
        let after = AssessmentReport::from_answers(
            &bank,
            &answers(&[("m1", 4), ("s1", 3), ("i1", 5)]),
            None,
            true,
            4,
        );
        let progress = after.compare(&before, 0.5);
        assert_eq!(progress.improvements.len(), 1);
        assert_eq!(progress.improvements[0].category, "maths");
        assert_eq!(progress.declines.len(), 1);
        assert_eq!(progress.declines[0].category, "science");
        assert_eq!(progress.new_categories, 1);
        assert_eq!(progress.dropped_categories, 1);
        assert!(progress.has_declines());
        assert!((progress.core_score_delta - 4.0).abs() < 1e-9);
        assert!(progress.to_markdown().contains("| maths |"));
        assert_eq!(progress.deltas().len(), 2);
    }
}
