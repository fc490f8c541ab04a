//! Order-preserving version-code encoding.
//!
//! Some platforms (notably Android) want a single strictly increasing integer
//! per published build. This codec derives one from the semantic version and
//! the build number:
//!
//! - `major` is taken as-is (any number of digits)
//! - `minor`, `patch` and the build number are each zero-padded to 2 digits
//! - the concatenation is rendered as a decimal integer
//!
//! `1.2.1` with build `2` becomes `1` + `02` + `01` + `02` = `"1020102"`.
//!
//! Keeping minor, patch and build within 0..=99 is what makes the encoding
//! order-preserving: two in-bounds (version, build) pairs compare the same
//! way as their encoded integers. Each bound is checked individually and
//! violations come back as values, not panics, so the caller decides whether
//! to abort.

use semver::Version;
use thiserror::Error;

/// Upper bound for the minor, patch and build-number fields.
const FIELD_MAX: u64 = 99;

/// A bounds or parse failure while encoding a version code.
///
/// Each variant names the offending field and suggests the field to bump,
/// mirroring what a release engineer would actually do about it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionCodeError {
    /// The version string is not a valid semantic version.
    #[error("\"{value}\" is not a valid semantic version: {message}")]
    InvalidVersion { value: String, message: String },

    /// The build number is not a decimal integer.
    #[error("\"{value}\" is not a valid build number")]
    InvalidBuildNumber { value: String },

    /// The minor number exceeds 99.
    #[error("The minor # of the version ({minor}) exceeds 99. Consider bumping the major #")]
    MinorOutOfRange { minor: u64 },

    /// The patch number exceeds 99.
    #[error("The patch # of the version ({patch}) exceeds 99. Consider bumping the minor #")]
    PatchOutOfRange { patch: u64 },

    /// The build number exceeds 99.
    #[error("The build # ({build}) exceeds 99. Consider bumping the version #")]
    BuildOutOfRange { build: u64 },
}

/// Encode a version and build number into a version-code string.
///
/// Pre-release and build metadata on the version are ignored here; ordering
/// across pre-releases is the resolver's concern, not the codec's.
pub fn encode_version_code(
    version: &str,
    build_number: &str,
) -> Result<String, VersionCodeError> {
    let version = Version::parse(version).map_err(|e| VersionCodeError::InvalidVersion {
        value: version.to_string(),
        message: e.to_string(),
    })?;

    let build: u64 =
        build_number
            .trim()
            .parse()
            .map_err(|_| VersionCodeError::InvalidBuildNumber {
                value: build_number.to_string(),
            })?;

    if version.minor > FIELD_MAX {
        return Err(VersionCodeError::MinorOutOfRange {
            minor: version.minor,
        });
    }
    if version.patch > FIELD_MAX {
        return Err(VersionCodeError::PatchOutOfRange {
            patch: version.patch,
        });
    }
    if build > FIELD_MAX {
        return Err(VersionCodeError::BuildOutOfRange { build });
    }

    // Numerically equivalent to concatenating major + 2-digit minor, patch
    // and build, then parsing as a decimal integer (which strips a leading
    // zero from major only).
    let code = version.major * 1_000_000 + version.minor * 10_000 + version.patch * 100 + build;

    Ok(code.to_string())
}
