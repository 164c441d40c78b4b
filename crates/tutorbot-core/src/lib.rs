//! tutorbot-core — Assessment engine, question banks, and career profiling.
//!
//! This crate defines the question model, the adaptive assessment flow, the
//! derived performance profile, and the report types that the rest of the
//! tutorbot workspace builds on.

pub mod assessment;
pub mod career;
pub mod curriculum;
pub mod error;
pub mod guidance;
pub mod model;
pub mod parser;
pub mod profile;
pub mod report;
pub mod traits;
