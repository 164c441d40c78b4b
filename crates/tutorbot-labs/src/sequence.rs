//! Generic guided step sequence.
//!
//! A sequence owns its state and a cursor over an ordered list of steps. The
//! cursor only moves forward when the current step's predicate holds; moving
//! back is never gated.

use std::fmt;

use thiserror::Error;

type Predicate<S> = Box<dyn Fn(&S) -> bool + Send + Sync>;
type Feedback<S> = Box<dyn Fn(&S) -> String + Send + Sync>;

/// One step of a guided sequence.
pub struct Step<S> {
    pub title: String,
    pub instructions: String,
    validate: Predicate<S>,
    feedback: Feedback<S>,
}

impl<S> Step<S> {
    pub fn new(
        title: impl Into<String>,
        instructions: impl Into<String>,
        validate: impl Fn(&S) -> bool + Send + Sync + 'static,
        feedback: impl Fn(&S) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            instructions: instructions.into(),
            validate: Box::new(validate),
            feedback: Box::new(feedback),
        }
    }

    pub fn is_satisfied(&self, state: &S) -> bool {
        (self.validate)(state)
    }

    pub fn feedback(&self, state: &S) -> String {
        (self.feedback)(state)
    }
}

impl<S> fmt::Debug for Step<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("title", &self.title)
            .field("instructions", &self.instructions)
            .finish_non_exhaustive()
    }
}

/// Errors from moving through a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// The current step's predicate is false.
    #[error("step {index} ({title}) is not complete: {feedback}")]
    StepIncomplete {
        index: usize,
        title: String,
        feedback: String,
    },

    #[error("sequence is already complete")]
    AlreadyComplete,

    #[error("a guided sequence needs at least one step")]
    NoSteps,
}

/// Outcome of a successful `advance()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Moved { index: usize },
    /// The last step was satisfied; reported exactly once.
    Completed,
}

/// An ordered list of steps over a piece of lab state.
#[derive(Debug)]
pub struct GuidedSequence<S> {
    name: String,
    steps: Vec<Step<S>>,
    state: S,
    index: usize,
    completed: bool,
}

impl<S> GuidedSequence<S> {
    pub fn new(name: impl Into<String>, state: S, steps: Vec<Step<S>>) -> Result<Self, SequenceError> {
        if steps.is_empty() {
            return Err(SequenceError::NoSteps);
        }
        Ok(Self {
            name: name.into(),
            steps,
            state,
            index: 0,
            completed: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// The step under the cursor, or `None` once complete.
    pub fn current(&self) -> Option<&Step<S>> {
        if self.completed {
            None
        } else {
            self.steps.get(self.index)
        }
    }

    /// Feedback for the current step against the current state.
    pub fn current_feedback(&self) -> Option<String> {
        self.current().map(|s| s.feedback(&self.state))
    }

    pub fn can_advance(&self) -> bool {
        self.current().is_some_and(|s| s.is_satisfied(&self.state))
    }

    /// Move to the next step if the current one is satisfied.
    pub fn advance(&mut self) -> Result<Progress, SequenceError> {
        if self.completed {
            return Err(SequenceError::AlreadyComplete);
        }
        let step = &self.steps[self.index];
        if !step.is_satisfied(&self.state) {
            return Err(SequenceError::StepIncomplete {
                index: self.index,
                title: step.title.clone(),
                feedback: step.feedback(&self.state),
            });
        }

        if self.index + 1 == self.steps.len() {
            self.completed = true;
            tracing::debug!(lab = %self.name, "guided sequence complete");
            return Ok(Progress::Completed);
        }
        self.index += 1;
        Ok(Progress::Moved { index: self.index })
    }

    /// Move back one step. No-op at the first step or after completion.
    pub fn retreat(&mut self) -> bool {
        if self.completed || self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn into_state(self) -> S {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter_sequence() -> GuidedSequence<u32> {
        GuidedSequence::new(
            "counter",
            0u32,
            vec![
                Step::new(
                    "Reach one",
                    "Increment once",
                    |n: &u32| *n >= 1,
                    |n: &u32| format!("count is {n}"),
                ),
                Step::new(
                    "Reach three",
                    "Increment twice more",
                    |n: &u32| *n >= 3,
                    |n: &u32| format!("{} to go", 3u32.saturating_sub(*n)),
                ),
            ],
        )
        .unwrap()
    }

    #[test]
    fn empty_sequence_rejected() {
        let err = GuidedSequence::<u32>::new("empty", 0, vec![]).unwrap_err();
        assert_eq!(err, SequenceError::NoSteps);
    }

    #[test]
    fn advance_is_gated_on_predicate() {
        let mut seq = counter_sequence();
        let err = seq.advance().unwrap_err();
        assert!(matches!(err, SequenceError::StepIncomplete { index: 0, .. }));
        *seq.state_mut() += 1;
        assert_eq!(seq.advance().unwrap(), Progress::Moved { index: 1 });
        assert_eq!(seq.current_feedback().unwrap(), "2 to go");
    }

    #[test]
    fn completion_signalled_once() {
        let mut seq = counter_sequence();
        *seq.state_mut() = 3;
        assert_eq!(seq.advance().unwrap(), Progress::Moved { index: 1 });
        assert_eq!(seq.advance().unwrap(), Progress::Completed);
        assert!(seq.is_complete());
        assert!(seq.current().is_none());
        assert_eq!(seq.advance().unwrap_err(), SequenceError::AlreadyComplete);
    }

    #[test]
    fn finished_sequence_hands_back_its_state() {
        let mut seq = counter_sequence();
        *seq.state_mut() = 3;
        seq.advance().unwrap();
        seq.advance().unwrap();
        assert_eq!(seq.into_state(), 3);
    }

    #[test]
    fn retreat_from_first_is_noop() {
        let mut seq = counter_sequence();
        assert!(!seq.retreat());
        *seq.state_mut() = 1;
        seq.advance().unwrap();
        assert!(seq.retreat());
        assert_eq!(seq.index(), 0);
        assert!(!seq.retreat());
    }
}
