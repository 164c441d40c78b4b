//! tutorbot-providers — Tutor backends and the learning-path client.
//!
//! Implements the `Tutor` and `LearningPathSource` traits from
//! `tutorbot-core`, plus the configuration that wires them together.

pub mod config;
pub mod error;
pub mod learning_path;
pub mod mock;
pub mod tutor;

pub use config::{create_learning_path_source, create_tutor, load_config, TutorbotConfig};
pub use error::ProviderError;
