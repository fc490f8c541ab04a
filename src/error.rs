//! Error types for envswitch operations.
//!
//! This module defines [`EnvSwitchError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Configuration problems (rules document, environment names, version
//!   fields) abort the run and are surfaced verbatim to the host build tool
//! - A persisted version that is ahead of the declared one is never silently
//!   "fixed"; it is a distinct, fatal error
//! - Version-code bounds violations carry the offending field so the message
//!   can say which number to bump
//! - Per-file failures during a resource walk are *not* represented here;
//!   they are isolated and reported through the walk report instead

use std::path::PathBuf;
use thiserror::Error;

use crate::version::VersionCodeError;

/// Core error type for envswitch operations.
#[derive(Debug, Error)]
pub enum EnvSwitchError {
    /// Environment rules file not found at any expected location.
    #[error("Environment rules file not found: {path}")]
    RulesNotFound { path: PathBuf },

    /// Failed to parse the environment rules file.
    #[error("Failed to parse environment rules at {path}: {message}")]
    RulesParseError { path: PathBuf, message: String },

    /// Invalid rules document structure or values.
    #[error("Invalid environment rules: {message}")]
    RulesValidationError { message: String },

    /// The requested environment has no entry in the rules document.
    #[error("No rules found for environment: {name}")]
    UnknownEnvironment { name: String },

    /// The rules document is missing one of the required version fields.
    #[error(
        "Missing \"{field}\" in the environment rules file. \
         Make sure \"version\", \"buildNumber\" and \"versionCode\" are all present"
    )]
    MissingVersionInfo { field: &'static str },

    /// The source-of-truth version (package metadata) could not be read.
    #[error("Could not read the declared version from {path}: {message}")]
    VersionSourceError { path: PathBuf, message: String },

    /// The persisted version is ahead of the declared one.
    #[error(
        "Persisted version \"{persisted}\" is ahead of the declared version \
         \"{declared}\". Refusing to move backwards; fix the version source first"
    )]
    VersionRegression { persisted: String, declared: String },

    /// Version-code generation failed a bounds check.
    #[error("Could not generate a version code: {0}")]
    VersionCode(#[from] VersionCodeError),

    /// A platform build file that must be rewritten is missing or unusable.
    #[error("Unable to update platform build file {path}: {message}")]
    BuildFileError { path: PathBuf, message: String },

    /// An external tool invocation failed (e.g. icon generation).
    #[error("External command failed: {command}: {message}")]
    ExternalTool { command: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for envswitch operations.
pub type Result<T> = std::result::Result<T, EnvSwitchError>;
