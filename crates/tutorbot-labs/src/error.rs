//! Lab input errors.

use thiserror::Error;

/// Invalid actions inside a lab.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LabError {
    /// pH outside 0–14 or not a number.
    #[error("pH {0} is outside the 0-14 scale")]
    InvalidPh(f64),

    #[error("unknown substance: {0}")]
    UnknownSubstance(String),

    #[error("unknown element: {0}")]
    UnknownElement(String),

    /// Both atom slots in the bonding lab are already filled.
    #[error("both atoms are already selected")]
    AtomsAlreadySelected,

    #[error("shell {shell} is full (capacity {capacity})")]
    ShellFull { shell: usize, capacity: u8 },

    #[error("shell {0} does not exist")]
    NoSuchShell(usize),

    #[error("no {0} left to remove")]
    NothingToRemove(&'static str),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}
