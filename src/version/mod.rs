//! Version, build-number and version-code handling.
//!
//! A build is identified by a (version, buildNumber, versionCode) triple:
//!
//! - `version` is the public semantic version, sourced from the project's
//!   package metadata
//! - `buildNumber` counts release builds within one version
//! - `versionCode` is a bounded, order-preserving integer encoding of the
//!   first two, required by platforms that want a strictly increasing build
//!   identifier

pub mod codec;
pub mod resolver;
pub mod source;

pub use codec::{encode_version_code, VersionCodeError};
pub use resolver::{resolve_versioning, VersionState};
pub use source::declared_version;
