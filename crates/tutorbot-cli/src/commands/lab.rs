//! The `tutorbot lab` command.
//!
//! Each lab is set up from the command-line choices, then walked step by step
//! until a step is incomplete or the lab finishes.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;

use tutorbot_labs::atom::{atom_builder_lab, AtomTarget, Particle};
use tutorbot_labs::bonding::{bonding_lab, BondType, ELEMENTS};
use tutorbot_labs::experiment::experiment_wizard;
use tutorbot_labs::ph::{ph_lab, PhCategory, SUBSTANCES};
use tutorbot_labs::{GuidedSequence, Progress, SequenceError};

#[derive(Subcommand)]
pub enum LabCommand {
    /// Test a household substance with universal indicator
    Ph {
        /// Substance to test (omit to list the bench)
        #[arg(long)]
        substance: Option<String>,

        /// Skip adding the indicator
        #[arg(long)]
        no_indicator: bool,

        /// Your prediction, e.g. "weakly acidic"
        #[arg(long)]
        predict: Option<String>,
    },

    /// Predict the bond between two elements
    Bond {
        /// First element (symbol or name)
        #[arg(long)]
        first: Option<String>,

        /// Second element (symbol or name)
        #[arg(long)]
        second: Option<String>,

        /// Your prediction: ionic, polar or nonpolar
        #[arg(long)]
        predict: Option<String>,
    },

    /// Build an atom from protons, neutrons and electrons
    Atom {
        /// Target element (symbol or name)
        #[arg(long, default_value = "sodium")]
        element: String,

        #[arg(long, default_value = "0")]
        protons: u8,

        #[arg(long, default_value = "0")]
        neutrons: u8,

        /// Electrons per shell, innermost first (e.g. "2,8,1")
        #[arg(long, default_value = "")]
        electrons: String,
    },

    /// Draft an experiment worksheet
    Experiment {
        #[arg(long, default_value = "")]
        title: String,

        #[arg(long, default_value = "")]
        learning_area: String,

        #[arg(long, default_value = "")]
        hypothesis: String,

        /// Material (repeatable)
        #[arg(long = "material")]
        materials: Vec<String>,

        /// Procedure step (repeatable, in order)
        #[arg(long = "step")]
        steps: Vec<String>,

        /// Safety note (repeatable)
        #[arg(long = "safety")]
        safety: Vec<String>,

        /// Write the worksheet to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

pub fn execute(lab: LabCommand) -> Result<()> {
    match lab {
        LabCommand::Ph {
            substance,
            no_indicator,
            predict,
        } => {
            let Some(substance) = substance else {
                println!("Substances on the bench:");
                for s in SUBSTANCES {
                    println!("  {}", s.name);
                }
                return Ok(());
            };
            let mut lab = ph_lab();
            lab.state_mut().select_substance(&substance)?;
            if !no_indicator {
                lab.state_mut().add_indicator();
            }
            if let Some(p) = predict {
                lab.state_mut().predict(p.parse::<PhCategory>()?);
            }
            walk(&mut lab);
        }
        LabCommand::Bond {
            first,
            second,
            predict,
        } => {
            if first.is_none() && second.is_none() {
                println!("Elements available:");
                for e in ELEMENTS {
                    println!("  {:<3} {:<10} {:.1}", e.symbol, e.name, e.electronegativity);
                }
                return Ok(());
            }
            let mut lab = bonding_lab();
            for key in first.iter().chain(second.iter()) {
                lab.state_mut().select(key)?;
            }
            if let Some(p) = predict {
                lab.state_mut().predict(p.parse::<BondType>()?);
            }
            walk(&mut lab);
        }
        LabCommand::Atom {
            element,
            protons,
            neutrons,
            electrons,
        } => {
            let mut lab = atom_builder_lab(AtomTarget::named(&element)?);
            let state = lab.state_mut();
            for _ in 0..protons {
                state.place(Particle::Proton)?;
            }
            for _ in 0..neutrons {
                state.place(Particle::Neutron)?;
            }
            for (shell, count) in parse_shells(&electrons)?.into_iter().enumerate() {
                for _ in 0..count {
                    state.place(Particle::Electron(shell))?;
                }
            }
            walk(&mut lab);
        }
        LabCommand::Experiment {
            title,
            learning_area,
            hypothesis,
            materials,
            steps,
            safety,
            output,
        } => {
            let mut lab = experiment_wizard();
            let draft = lab.state_mut();
            draft.title = title;
            draft.learning_area = learning_area;
            draft.hypothesis = hypothesis;
            for m in materials {
                draft.add_material(m);
            }
            for s in steps {
                draft.add_procedure_step(s);
            }
            draft.safety_notes = safety;

            if walk(&mut lab) {
                let text = lab.into_state().to_plain_text();
                match output {
                    Some(path) => {
                        std::fs::write(&path, &text).with_context(|| {
                            format!("failed to write worksheet: {}", path.display())
                        })?;
                        println!("\nWorksheet written to {}", path.display());
                    }
                    None => println!("\n{text}"),
                }
            }
        }
    }
    Ok(())
}

/// Advance through the lab, printing each step's feedback. Returns whether
/// the lab was completed.
fn walk<S>(lab: &mut GuidedSequence<S>) -> bool {
    println!("== {} ==", lab.name());
    let total = lab.len();
    loop {
        let index = lab.index();
        let (Some(step), Some(feedback)) = (lab.current(), lab.current_feedback()) else {
            return lab.is_complete();
        };
        println!("[{}/{}] {}: {}", index + 1, total, step.title, feedback);

        match lab.advance() {
            Ok(Progress::Moved { .. }) => {}
            Ok(Progress::Completed) => {
                println!("Lab complete.");
                return true;
            }
            Err(SequenceError::StepIncomplete { .. }) => {
                println!("Stopped at step {}: {}", index + 1, lab_hint(lab));
                return false;
            }
            Err(e) => {
                tracing::warn!("lab stopped: {e}");
                return false;
            }
        }
    }
}

fn lab_hint<S>(lab: &GuidedSequence<S>) -> String {
    lab.current()
        .map(|step| step.instructions.clone())
        .unwrap_or_default()
}

fn parse_shells(spec: &str) -> Result<Vec<u8>> {
    spec.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u8>()
                .map_err(|_| anyhow::anyhow!("invalid electron count: '{s}'"))
        })
        .collect()
}
