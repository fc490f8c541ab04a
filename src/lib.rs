//! envswitch - build-time environment switching and versioning for mobile
//! app projects.
//!
//! A host build tool invokes envswitch once per platform build. It resolves
//! which environment-tagged resource files (`config.staging.json`) replace
//! their canonical siblings (`config.json`), keeps a monotonically consistent
//! (version, buildNumber, versionCode) triple in the project's
//! environment-rules document, and propagates bundle ids and versions into
//! platform build files.
//!
//! # Modules
//!
//! - [`cli`] - Hook entry points and argument parsing
//! - [`engine`] - Run orchestration (switch and finalize stages)
//! - [`error`] - Error types and result aliases
//! - [`platform`] - Platform capability records and build-file editing
//! - [`rules`] - The environment-rules document and its persistence
//! - [`variant`] - Variant file matching, walking and direct-copy routing
//! - [`version`] - Version resolution and version-code encoding
//!
//! # Example
//!
//! ```
//! use envswitch::variant::canonical_name;
//! use envswitch::version::encode_version_code;
//!
//! assert_eq!(
//!     canonical_name("en.default.staging.json").as_deref(),
//!     Some("en.default.json")
//! );
//! assert_eq!(encode_version_code("1.2.1", "2").unwrap(), "1020102");
//! ```

pub mod cli;
pub mod engine;
pub mod error;
pub mod platform;
pub mod rules;
pub mod variant;
pub mod version;

pub use error::{EnvSwitchError, Result};
