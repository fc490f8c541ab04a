//! The rules document schema.
//!
//! An open record: fields this tool does not know about are captured in a
//! flattened map and written back untouched, so projects can annotate the
//! file freely without losing data on the next build.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{EnvSwitchError, Result};
use crate::version::VersionState;

/// One named environment with its bundle id and variant-matching pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentEntry {
    pub name: String,
    pub app_bundle_id: String,
    /// Regular expression deciding which filenames belong to this
    /// environment, e.g. `.*\.staging\..*`.
    pub match_pattern: String,
}

impl EnvironmentEntry {
    /// Compile the match pattern.
    pub fn pattern(&self) -> Result<Regex> {
        Regex::new(&self.match_pattern).map_err(|e| EnvSwitchError::RulesValidationError {
            message: format!(
                "environment \"{}\" has an invalid match pattern \"{}\": {}",
                self.name, self.match_pattern, e
            ),
        })
    }
}

/// The persisted environment-rules document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesDocument {
    #[serde(default)]
    pub environments: Vec<EnvironmentEntry>,

    /// Canonical filename -> destination path relative to the project root.
    #[serde(default)]
    pub direct_copy_rules: BTreeMap<String, String>,

    /// Directories searched in addition to the platform resource tree.
    #[serde(default)]
    pub extra_paths: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_code: Option<String>,

    #[serde(default)]
    pub auto_version_code: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_icon_path: Option<String>,

    /// Unrecognized fields, preserved verbatim across rewrites.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RulesDocument {
    /// The baseline document synthesized when no rules file exists yet.
    pub fn default_document() -> Self {
        Self {
            environments: vec![
                EnvironmentEntry {
                    name: "development".to_string(),
                    app_bundle_id: "org.example.app.dev".to_string(),
                    match_pattern: r".*\.development\..*".to_string(),
                },
                EnvironmentEntry {
                    name: "release".to_string(),
                    app_bundle_id: "org.example.app".to_string(),
                    match_pattern: r".*\.release\..*".to_string(),
                },
            ],
            direct_copy_rules: BTreeMap::new(),
            extra_paths: Vec::new(),
            version: Some("1.0.0".to_string()),
            build_number: Some("1".to_string()),
            version_code: Some("1000001".to_string()),
            auto_version_code: false,
            app_icon_path: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Structural checks that every run depends on: environment names must be
    /// unique and every match pattern must compile.
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::BTreeSet::new();
        for entry in &self.environments {
            if !seen.insert(entry.name.as_str()) {
                return Err(EnvSwitchError::RulesValidationError {
                    message: format!("duplicate environment name \"{}\"", entry.name),
                });
            }
            entry.pattern()?;
        }
        Ok(())
    }

    /// Look up the entry for `name`.
    pub fn environment(&self, name: &str) -> Result<&EnvironmentEntry> {
        self.environments
            .iter()
            .find(|entry| entry.name == name)
            .ok_or_else(|| EnvSwitchError::UnknownEnvironment {
                name: name.to_string(),
            })
    }

    /// Extract the versioning fields, failing if any is missing.
    pub fn version_state(&self) -> Result<VersionState> {
        let version = self
            .version
            .clone()
            .ok_or(EnvSwitchError::MissingVersionInfo { field: "version" })?;
        let build_number =
            self.build_number
                .clone()
                .ok_or(EnvSwitchError::MissingVersionInfo {
                    field: "buildNumber",
                })?;
        let version_code =
            self.version_code
                .clone()
                .ok_or(EnvSwitchError::MissingVersionInfo {
                    field: "versionCode",
                })?;

        Ok(VersionState {
            version,
            build_number,
            version_code,
            auto_version_code: self.auto_version_code,
        })
    }

    /// Write a resolved version state back into the document.
    pub fn apply_version_state(&mut self, state: &VersionState) {
        self.version = Some(state.version.clone());
        self.build_number = Some(state.build_number.clone());
        self.version_code = Some(state.version_code.clone());
    }
}
