//! Demo experiment creation wizard.

use serde::Serialize;

use crate::sequence::{GuidedSequence, Step};

/// Minimum procedure steps for a usable experiment.
pub const MIN_PROCEDURE_STEPS: usize = 2;

/// An experiment being authored by a teacher or learner.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExperimentDraft {
    pub title: String,
    pub learning_area: String,
    pub hypothesis: String,
    pub materials: Vec<String>,
    pub procedure: Vec<String>,
    pub safety_notes: Vec<String>,
}

impl ExperimentDraft {
    pub fn add_material(&mut self, item: impl Into<String>) {
        let item = item.into();
        if !item.trim().is_empty() {
            self.materials.push(item.trim().to_string());
        }
    }

    pub fn add_procedure_step(&mut self, step: impl Into<String>) {
        let step = step.into();
        if !step.trim().is_empty() {
            self.procedure.push(step.trim().to_string());
        }
    }

    /// Plain-text worksheet for printing or download.
    pub fn to_plain_text(&self) -> String {
        let mut out = format!("EXPERIMENT: {}\n", self.title);
        if !self.learning_area.is_empty() {
            out.push_str(&format!("Learning area: {}\n", self.learning_area));
        }
        out.push_str(&format!("\nHypothesis:\n  {}\n", self.hypothesis));
        out.push_str("\nMaterials:\n");
        for m in &self.materials {
            out.push_str(&format!("  - {m}\n"));
        }
        out.push_str("\nProcedure:\n");
        for (i, p) in self.procedure.iter().enumerate() {
            out.push_str(&format!("  {}. {p}\n", i + 1));
        }
        if !self.safety_notes.is_empty() {
            out.push_str("\nSafety:\n");
            for s in &self.safety_notes {
                out.push_str(&format!("  ! {s}\n"));
            }
        }
        out
    }
}

pub fn experiment_wizard() -> GuidedSequence<ExperimentDraft> {
    let steps = vec![
        Step::new(
            "Name the experiment",
            "Give the experiment a short, descriptive title.",
            |d: &ExperimentDraft| !d.title.trim().is_empty(),
            |d: &ExperimentDraft| {
                if d.title.trim().is_empty() {
                    "A title is required.".to_string()
                } else {
                    format!("Title set to \"{}\".", d.title.trim())
                }
            },
        ),
        Step::new(
            "State a hypothesis",
            "What do you expect to happen, and why?",
            |d: &ExperimentDraft| d.hypothesis.split_whitespace().count() >= 3,
            |d: &ExperimentDraft| {
                if d.hypothesis.split_whitespace().count() >= 3 {
                    "Good, that is a testable statement.".to_string()
                } else {
                    "Write the hypothesis as a full sentence.".to_string()
                }
            },
        ),
        Step::new(
            "List materials",
            "Add everything needed to run the experiment.",
            |d: &ExperimentDraft| !d.materials.is_empty(),
            |d: &ExperimentDraft| match d.materials.len() {
                0 => "Add at least one material.".to_string(),
                n => format!("{n} material(s) listed."),
            },
        ),
        Step::new(
            "Write the procedure",
            "Describe the method step by step.",
            |d: &ExperimentDraft| d.procedure.len() >= MIN_PROCEDURE_STEPS,
            |d: &ExperimentDraft| {
                if d.procedure.len() >= MIN_PROCEDURE_STEPS {
                    format!("{} procedure steps written.", d.procedure.len())
                } else {
                    format!(
                        "Add {} more procedure step(s).",
                        MIN_PROCEDURE_STEPS - d.procedure.len()
                    )
                }
            },
        ),
        Step::new(
            "Review",
            "Check the worksheet before sharing it with the class.",
            |_: &ExperimentDraft| true,
            |d: &ExperimentDraft| {
                if d.safety_notes.is_empty() {
                    "Ready to share. Consider adding safety notes.".to_string()
                } else {
                    "Ready to share.".to_string()
                }
            },
        ),
    ];

    GuidedSequence::new("experiment creation", ExperimentDraft::default(), steps)
        .expect("experiment wizard has steps")
}
