//! Adaptive assessment flow.
//!
//! Presents a bank's questions one at a time, records 1–5 answers, and
//! re-filters the not-yet-shown remainder of the pool against the learner's
//! current performance profile.

use std::collections::HashSet;

use crate::error::AssessmentError;
use crate::model::{Answers, Difficulty, Question, QuestionBank, Score, DEFAULT_MAX_QUESTIONS};
use crate::profile::{core_competency_score, PerformanceProfile};

/// Bounds applied when materialising a question list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPolicy {
    /// Upper bound on the materialised list.
    pub max_questions: usize,
    /// Lower bound; when filtering drops below it the unfiltered pool is used.
    pub min_questions: usize,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            max_questions: DEFAULT_MAX_QUESTIONS,
            min_questions: 0,
        }
    }
}

impl SelectionPolicy {
    pub fn from_bank(bank: &QuestionBank) -> Self {
        Self {
            max_questions: bank.max_questions,
            min_questions: bank.min_questions,
        }
    }

    fn required(&self) -> usize {
        self.min_questions.min(self.max_questions)
    }
}

/// Whether a question survives adaptive filtering for this profile.
///
/// Strong categories keep only hard or level >= 2 questions, weak categories
/// keep only easy or medium ones, everything else is kept.
pub fn keep_question(question: &Question, profile: &PerformanceProfile) -> bool {
    if profile.is_strength(&question.category) {
        question.difficulty == Difficulty::Hard || question.adaptive_level >= 2
    } else if profile.is_weakness(&question.category) {
        matches!(question.difficulty, Difficulty::Easy | Difficulty::Medium)
    } else {
        true
    }
}

/// Filter `pool` against `profile`, preserving authored order.
///
/// The result is truncated to `policy.max_questions`. If fewer than
/// `policy.min_questions` survive, the unfiltered pool (truncated) is returned
/// instead; if even that is too short the call fails.
pub fn select_questions<'a>(
    pool: &'a [Question],
    profile: &PerformanceProfile,
    policy: &SelectionPolicy,
) -> Result<Vec<&'a Question>, AssessmentError> {
    if pool.is_empty() {
        return Err(AssessmentError::EmptyPool);
    }
    let candidates: Vec<usize> = (0..pool.len()).collect();
    let picked = select_indices(pool, &candidates, profile, *policy)?;
    Ok(picked.into_iter().map(|i| &pool[i]).collect())
}

fn select_indices(
    pool: &[Question],
    candidates: &[usize],
    profile: &PerformanceProfile,
    policy: SelectionPolicy,
) -> Result<Vec<usize>, AssessmentError> {
    let required = policy.required();

    let filtered: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|&i| keep_question(&pool[i], profile))
        .take(policy.max_questions)
        .collect();
    if filtered.len() >= required {
        return Ok(filtered);
    }

    let unfiltered: Vec<usize> = candidates
        .iter()
        .copied()
        .take(policy.max_questions)
        .collect();
    if unfiltered.len() < required {
        return Err(AssessmentError::InsufficientQuestions {
            available: unfiltered.len(),
            required,
        });
    }

    tracing::debug!(
        filtered = filtered.len(),
        required,
        "adaptive filter too aggressive, falling back to unfiltered pool"
    );
    Ok(unfiltered)
}

/// Outcome of a successful `advance()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Moved to the question at this zero-based index.
    Moved { index: usize },
    /// The last question was answered; reported exactly once.
    Completed,
}

/// A single learner's pass through a question bank.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    bank: QuestionBank,
    policy: SelectionPolicy,
    /// Indices into `bank.questions`, in presentation order.
    order: Vec<usize>,
    index: usize,
    /// Highest index reached; everything up to it stays fixed.
    furthest: usize,
    answers: Answers,
    completed: bool,
}

impl AssessmentSession {
    /// Start a session using the bank's own selection bounds.
    pub fn new(bank: QuestionBank) -> Result<Self, AssessmentError> {
        let policy = SelectionPolicy::from_bank(&bank);
        Self::with_policy(bank, policy)
    }

    pub fn with_policy(bank: QuestionBank, policy: SelectionPolicy) -> Result<Self, AssessmentError> {
        if bank.questions.is_empty() {
            return Err(AssessmentError::EmptyPool);
        }
        let mut seen = HashSet::new();
        if let Some(dup) = bank.questions.iter().find(|q| !seen.insert(q.id.as_str())) {
            return Err(AssessmentError::DuplicateQuestion(dup.id.clone()));
        }
        let candidates: Vec<usize> = (0..bank.questions.len()).collect();
        let order = select_indices(
            &bank.questions,
            &candidates,
            &PerformanceProfile::default(),
            policy,
        )?;
        if order.is_empty() {
            return Err(AssessmentError::InsufficientQuestions {
                available: 0,
                required: 1,
            });
        }

        Ok(Self {
            bank,
            policy,
            order,
            index: 0,
            furthest: 0,
            answers: Answers::new(),
            completed: false,
        })
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// The question at the current position, or `None` once complete.
    pub fn current(&self) -> Option<&Question> {
        if self.completed {
            return None;
        }
        self.order.get(self.index).map(|&i| &self.bank.questions[i])
    }

    /// Zero-based position of the current question.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of questions in the materialised list.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// The materialised question list in presentation order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.order.iter().map(|&i| &self.bank.questions[i])
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn profile(&self) -> PerformanceProfile {
        PerformanceProfile::from_answers(&self.bank.questions, &self.answers)
    }

    pub fn core_competency_score(&self) -> f64 {
        core_competency_score(&self.bank.questions, &self.answers)
    }

    /// Whether the current question may be left via `advance()`.
    pub fn can_advance(&self) -> bool {
        self.current()
            .is_some_and(|q| self.answers.contains(&q.id))
    }

    /// Record a raw 1–5 score for any question in the bank.
    ///
    /// Returns the score it replaced. The remainder of the list is re-filtered
    /// against the updated profile.
    pub fn record_answer(
        &mut self,
        question_id: &str,
        raw_score: i64,
    ) -> Result<Option<Score>, AssessmentError> {
        if self.bank.get(question_id).is_none() {
            return Err(AssessmentError::UnknownQuestion(question_id.to_string()));
        }
        let score = Score::new(raw_score)?;
        let previous = self.answers.record(question_id, score);

        if !self.completed {
            self.rematerialize()?;
        }
        Ok(previous)
    }

    /// Record a score for the current question.
    pub fn answer_current(&mut self, raw_score: i64) -> Result<Option<Score>, AssessmentError> {
        let id = self
            .current()
            .map(|q| q.id.clone())
            .ok_or(AssessmentError::AlreadyComplete)?;
        self.record_answer(&id, raw_score)
    }

    /// Move forward one question.
    ///
    /// Fails with `Unanswered` if the current question has no score. From the
    /// last question this reports `Step::Completed` once; later calls fail
    /// with `AlreadyComplete`.
    pub fn advance(&mut self) -> Result<Step, AssessmentError> {
        if self.completed {
            return Err(AssessmentError::AlreadyComplete);
        }
        let question = self.current().ok_or(AssessmentError::EmptyPool)?;
        if !self.answers.contains(&question.id) {
            return Err(AssessmentError::Unanswered(question.id.clone()));
        }

        if self.index + 1 >= self.order.len() {
            self.completed = true;
            tracing::debug!(answered = self.answers.len(), "assessment complete");
            return Ok(Step::Completed);
        }

        self.index += 1;
        self.furthest = self.furthest.max(self.index);
        Ok(Step::Moved { index: self.index })
    }

    /// Move back one question. Returns `false` (and does nothing) at the
    /// first question or after completion.
    pub fn retreat(&mut self) -> bool {
        if self.completed || self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    fn rematerialize(&mut self) -> Result<(), AssessmentError> {
        let fixed = self.furthest + 1;
        let shown: Vec<usize> = self.order.iter().copied().take(fixed).collect();
        let shown_set: HashSet<usize> = shown.iter().copied().collect();
        let remaining: Vec<usize> = (0..self.bank.questions.len())
            .filter(|i| !shown_set.contains(i))
            .collect();

        let profile = self.profile();
        let tail_policy = SelectionPolicy {
            max_questions: self.policy.max_questions.saturating_sub(shown.len()),
            min_questions: self.policy.required().saturating_sub(shown.len()),
        };
        let tail = select_indices(&self.bank.questions, &remaining, &profile, tail_policy)?;

        tracing::debug!(
            shown = shown.len(),
            upcoming = tail.len(),
            strengths = ?profile.strengths,
            weaknesses = ?profile.weaknesses,
            "re-materialised question list"
        );

        self.order = shown;
        self.order.extend(tail);
        Ok(())
    }
}
