//! The environment-rules document and its persistence.
//!
//! The rules document is the single piece of shared state: it declares the
//! known environments, the direct-copy mapping, the extra search roots and
//! the persisted (version, buildNumber, versionCode) triple. It is read once
//! per run, mutated in memory and written back wholesale at the end.

pub mod document;
pub mod store;

pub use document::{EnvironmentEntry, RulesDocument};
pub use store::{load, rules_file_path, save};
