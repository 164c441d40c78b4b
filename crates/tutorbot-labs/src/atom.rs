//! Atom builder lab.
//!
//! Learners place protons, neutrons and electrons until the atom matches a
//! target element. Shells fill with the 2, 8, 8 rule used in school
//! chemistry for the first twenty elements.

use serde::Serialize;

use crate::error::LabError;
use crate::sequence::{GuidedSequence, Step};

/// Electron capacity of each shell, innermost first.
pub const SHELL_CAPACITY: [u8; 4] = [2, 8, 8, 2];

/// The atom the learner is asked to build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AtomTarget {
    pub name: String,
    pub symbol: String,
    pub protons: u8,
    pub neutrons: u8,
}

impl AtomTarget {
    pub fn new(name: &str, symbol: &str, protons: u8, neutrons: u8) -> Result<Self, LabError> {
        let max = SHELL_CAPACITY.iter().map(|&c| c as u32).sum::<u32>();
        if protons == 0 || protons as u32 > max {
            return Err(LabError::InvalidInput(format!(
                "atomic number must be between 1 and {max}"
            )));
        }
        Ok(Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            protons,
            neutrons,
        })
    }

    pub fn sodium() -> Self {
        Self {
            name: "Sodium".into(),
            symbol: "Na".into(),
            protons: 11,
            neutrons: 12,
        }
    }

    /// Look up a common element by name or symbol.
    pub fn named(key: &str) -> Result<Self, LabError> {
        let (name, symbol, p, n) = match key.trim().to_lowercase().as_str() {
            "hydrogen" | "h" => ("Hydrogen", "H", 1, 0),
            "helium" | "he" => ("Helium", "He", 2, 2),
            "carbon" | "c" => ("Carbon", "C", 6, 6),
            "nitrogen" | "n" => ("Nitrogen", "N", 7, 7),
            "oxygen" | "o" => ("Oxygen", "O", 8, 8),
            "sodium" | "na" => ("Sodium", "Na", 11, 12),
            "magnesium" | "mg" => ("Magnesium", "Mg", 12, 12),
            "chlorine" | "cl" => ("Chlorine", "Cl", 17, 18),
            "calcium" | "ca" => ("Calcium", "Ca", 20, 20),
            _ => return Err(LabError::UnknownElement(key.to_string())),
        };
        Self::new(name, symbol, p, n)
    }

    pub fn mass_number(&self) -> u16 {
        self.protons as u16 + self.neutrons as u16
    }

    /// Ground-state electrons per shell for a neutral atom.
    pub fn electron_configuration(&self) -> Vec<u8> {
        let mut remaining = self.protons;
        let mut shells = Vec::new();
        for capacity in SHELL_CAPACITY {
            if remaining == 0 {
                break;
            }
            let placed = remaining.min(capacity);
            shells.push(placed);
            remaining -= placed;
        }
        shells
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Particle {
    Proton,
    Neutron,
    /// An electron in the given zero-based shell.
    Electron(usize),
}

/// Particles placed so far.
#[derive(Debug, Clone)]
pub struct AtomBuilderState {
    pub target: AtomTarget,
    pub protons: u8,
    pub neutrons: u8,
    pub shells: [u8; SHELL_CAPACITY.len()],
}

impl AtomBuilderState {
    pub fn new(target: AtomTarget) -> Self {
        Self {
            target,
            protons: 0,
            neutrons: 0,
            shells: [0; SHELL_CAPACITY.len()],
        }
    }

    pub fn place(&mut self, particle: Particle) -> Result<(), LabError> {
        match particle {
            Particle::Proton => self.protons = self.protons.saturating_add(1),
            Particle::Neutron => self.neutrons = self.neutrons.saturating_add(1),
            Particle::Electron(shell) => {
                let capacity = *SHELL_CAPACITY.get(shell).ok_or(LabError::NoSuchShell(shell))?;
                if self.shells[shell] >= capacity {
                    return Err(LabError::ShellFull { shell, capacity });
                }
                self.shells[shell] += 1;
            }
        }
        Ok(())
    }

    pub fn remove(&mut self, particle: Particle) -> Result<(), LabError> {
        let (count, what) = match particle {
            Particle::Proton => (&mut self.protons, "protons"),
            Particle::Neutron => (&mut self.neutrons, "neutrons"),
            Particle::Electron(shell) => (
                self.shells.get_mut(shell).ok_or(LabError::NoSuchShell(shell))?,
                "electrons",
            ),
        };
        if *count == 0 {
            return Err(LabError::NothingToRemove(what));
        }
        *count -= 1;
        Ok(())
    }

    pub fn electrons(&self) -> u8 {
        self.shells.iter().sum()
    }

    pub fn charge(&self) -> i16 {
        self.protons as i16 - self.electrons() as i16
    }

    /// Whether the placed particles match the target's neutral ground state.
    pub fn is_complete(&self) -> bool {
        let config = self.target.electron_configuration();
        self.protons == self.target.protons
            && self.neutrons == self.target.neutrons
            && self
                .shells
                .iter()
                .enumerate()
                .all(|(i, &n)| n == config.get(i).copied().unwrap_or(0))
    }
}

fn count_feedback(kind: &str, have: u8, want: u8) -> String {
    match have.cmp(&want) {
        std::cmp::Ordering::Less => format!("Add {} more {kind}.", want - have),
        std::cmp::Ordering::Greater => format!("Too many {kind}: remove {}.", have - want),
        std::cmp::Ordering::Equal => format!("All {want} {kind} placed."),
    }
}

/// Build the atom builder lab for `target`: nucleus first, then one step
/// per occupied shell.
pub fn atom_builder_lab(target: AtomTarget) -> GuidedSequence<AtomBuilderState> {
    let mut steps = vec![
        Step::new(
            "Place the protons",
            format!(
                "{} has atomic number {}.",
                target.name, target.protons
            ),
            |s: &AtomBuilderState| s.protons == s.target.protons,
            |s: &AtomBuilderState| count_feedback("protons", s.protons, s.target.protons),
        ),
        Step::new(
            "Place the neutrons",
            format!(
                "The mass number of {} is {}.",
                target.symbol,
                target.mass_number()
            ),
            |s: &AtomBuilderState| s.neutrons == s.target.neutrons,
            |s: &AtomBuilderState| count_feedback("neutrons", s.neutrons, s.target.neutrons),
        ),
    ];

    for (shell, want) in target.electron_configuration().into_iter().enumerate() {
        steps.push(Step::new(
            format!("Fill shell {}", shell + 1),
            format!("Shell {} holds up to {} electrons.", shell + 1, SHELL_CAPACITY[shell]),
            move |s: &AtomBuilderState| s.shells[shell] == want,
            move |s: &AtomBuilderState| {
                count_feedback(&format!("electrons in shell {}", shell + 1), s.shells[shell], want)
            },
        ));
    }

    steps.push(Step::new(
        "Check the atom",
        "A neutral atom has as many electrons as protons.",
        |s: &AtomBuilderState| s.is_complete(),
        |s: &AtomBuilderState| {
            if s.is_complete() {
                let config: Vec<String> = s
                    .target
                    .electron_configuration()
                    .iter()
                    .map(|n| n.to_string())
                    .collect();
                format!(
                    "Well done! You built a neutral {} atom ({}).",
                    s.target.name,
                    config.join(".")
                )
            } else {
                format!("Not yet: the atom has a charge of {:+}.", s.charge())
            }
        },
    ));

    let name = format!("{} atom builder", target.name);
    GuidedSequence::new(name, AtomBuilderState::new(target), steps)
        .expect("atom builder has steps")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::{Progress, SequenceError};

    fn place_n(state: &mut AtomBuilderState, particle: Particle, n: usize) {
        for _ in 0..n {
            state.place(particle).unwrap();
        }
    }

    #[test]
    fn electron_configurations() {
        assert_eq!(AtomTarget::sodium().electron_configuration(), vec![2, 8, 1]);
        assert_eq!(AtomTarget::named("H").unwrap().electron_configuration(), vec![1]);
        assert_eq!(AtomTarget::named("chlorine").unwrap().electron_configuration(), vec![2, 8, 7]);
        assert_eq!(AtomTarget::named("calcium").unwrap().electron_configuration(), vec![2, 8, 8, 2]);
        assert!(AtomTarget::named("uranium").is_err());
        assert!(AtomTarget::new("Too big", "X", 30, 30).is_err());
    }

    #[test]
    fn shells_enforce_capacity() {
        let mut state = AtomBuilderState::new(AtomTarget::sodium());
        place_n(&mut state, Particle::Electron(0), 2);
        assert_eq!(
            state.place(Particle::Electron(0)).unwrap_err(),
            LabError::ShellFull { shell: 0, capacity: 2 }
        );
        assert_eq!(
            state.place(Particle::Electron(9)).unwrap_err(),
            LabError::NoSuchShell(9)
        );
        assert_eq!(
            state.remove(Particle::Neutron).unwrap_err(),
            LabError::NothingToRemove("neutrons")
        );
        state.remove(Particle::Electron(0)).unwrap();
        assert_eq!(state.electrons(), 1);
    }

    #[test]
    fn build_sodium() {
        let mut lab = atom_builder_lab(AtomTarget::sodium());
        // protons, neutrons, three shells, check
        assert_eq!(lab.len(), 6);

        place_n(lab.state_mut(), Particle::Proton, 10);
        match lab.advance().unwrap_err() {
            SequenceError::StepIncomplete { feedback, .. } => {
                assert_eq!(feedback, "Add 1 more protons.")
            }
            other => panic!("unexpected error: {other}"),
        }
        place_n(lab.state_mut(), Particle::Proton, 1);
        lab.advance().unwrap();

        place_n(lab.state_mut(), Particle::Neutron, 12);
        lab.advance().unwrap();

        place_n(lab.state_mut(), Particle::Electron(0), 2);
        lab.advance().unwrap();
        place_n(lab.state_mut(), Particle::Electron(1), 8);
        lab.advance().unwrap();
        place_n(lab.state_mut(), Particle::Electron(2), 1);
        lab.advance().unwrap();

        assert_eq!(lab.state().charge(), 0);
        assert_eq!(
            lab.current_feedback().unwrap(),
            "Well done! You built a neutral Sodium atom (2.8.1)."
        );
        assert_eq!(lab.advance().unwrap(), Progress::Completed);
    }

    #[test]
    fn ion_is_not_complete() {
        let mut state = AtomBuilderState::new(AtomTarget::sodium());
        place_n(&mut state, Particle::Proton, 11);
        place_n(&mut state, Particle::Neutron, 12);
        place_n(&mut state, Particle::Electron(0), 2);
        place_n(&mut state, Particle::Electron(1), 8);
        assert!(!state.is_complete());
        assert_eq!(state.charge(), 1);
    }
}
