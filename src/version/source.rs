//! Source-of-truth version lookup.
//!
//! The declared version lives in the project's `package.json`. A build with
//! no declared version cannot proceed, so every failure path here is fatal.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{EnvSwitchError, Result};

#[derive(Debug, Deserialize)]
struct PackageManifest {
    version: Option<String>,
}

/// Read the declared semantic version from `<project>/package.json`.
pub fn declared_version(project_root: &Path) -> Result<String> {
    let path = project_root.join("package.json");

    let content = fs::read_to_string(&path).map_err(|e| EnvSwitchError::VersionSourceError {
        path: path.clone(),
        message: e.to_string(),
    })?;

    let manifest: PackageManifest =
        serde_json::from_str(&content).map_err(|e| EnvSwitchError::VersionSourceError {
            path: path.clone(),
            message: e.to_string(),
        })?;

    manifest
        .version
        .ok_or_else(|| EnvSwitchError::VersionSourceError {
            path,
            message: "no \"version\" field".to_string(),
        })
}
