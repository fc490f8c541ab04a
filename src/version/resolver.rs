//! Version and build-number resolution.
//!
//! Compares the declared version (from the project's package metadata)
//! against the persisted triple in the rules document and advances it under a
//! monotonicity invariant:
//!
//! - the persisted version must never be ahead of the declared one
//! - a version bump resets the build number to `"1"`
//! - within an unchanged version, the build number advances only in release
//!   mode
//! - the version code is regenerated only in release mode and only when the
//!   rules document opts in via `autoVersionCode`

use semver::Version;
use tracing::info;

use crate::error::{EnvSwitchError, Result};
use crate::version::codec::encode_version_code;

/// The persisted versioning fields, detached from the rules document so the
/// resolver can be exercised with literal values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionState {
    pub version: String,
    pub build_number: String,
    pub version_code: String,
    pub auto_version_code: bool,
}

/// Resolve the next (version, buildNumber, versionCode) triple.
///
/// # Errors
///
/// - [`EnvSwitchError::RulesValidationError`] when a version string or the
///   build number does not parse
/// - [`EnvSwitchError::VersionRegression`] when the persisted version is
///   strictly ahead of the declared one (pre-release precedence included)
/// - [`EnvSwitchError::VersionCode`] when regeneration hits a bounds check
pub fn resolve_versioning(
    declared: &str,
    state: VersionState,
    release_mode: bool,
) -> Result<VersionState> {
    let declared_version = parse_version(declared)?;
    let persisted_version = parse_version(&state.version)?;

    if persisted_version > declared_version {
        return Err(EnvSwitchError::VersionRegression {
            persisted: state.version,
            declared: declared.to_string(),
        });
    }

    let mut next = state;

    if declared_version > persisted_version {
        info!(
            "Version bumped to \"{}\", resetting build # to \"1\"",
            declared
        );
        next.version = declared.to_string();
        next.build_number = "1".to_string();
    } else if release_mode {
        let current: u64 =
            next.build_number
                .trim()
                .parse()
                .map_err(|_| EnvSwitchError::RulesValidationError {
                    message: format!("\"{}\" is not a valid build number", next.build_number),
                })?;
        next.build_number = (current + 1).to_string();
        info!(
            "Keeping version \"{}\", build # advanced to \"{}\"",
            next.version, next.build_number
        );
    } else {
        info!(
            "Not a release build, keeping version \"{}\" and build # \"{}\"",
            next.version, next.build_number
        );
        return Ok(next);
    }

    if release_mode && next.auto_version_code {
        next.version_code = encode_version_code(&next.version, &next.build_number)?;
        info!(
            "Generated version code \"{}\" from version \"{}\" and build # \"{}\"",
            next.version_code, next.version, next.build_number
        );
    }

    Ok(next)
}

fn parse_version(value: &str) -> Result<Version> {
    Version::parse(value).map_err(|e| EnvSwitchError::RulesValidationError {
        message: format!("\"{}\" is not a valid semantic version: {}", value, e),
    })
}
