//! tutorbot-labs — Virtual science labs.
//!
//! Every lab is a [`GuidedSequence`] over its own state: an ordered list of
//! steps, each with a completion predicate and canned feedback.

pub mod atom;
pub mod bonding;
pub mod error;
pub mod experiment;
pub mod ph;
pub mod sequence;

pub use error::LabError;
pub use sequence::{GuidedSequence, Progress, SequenceError, Step};
