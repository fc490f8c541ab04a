//! Rules document discovery, loading and persistence.
//!
//! Resolution order: `environment-rules.<platform>.json` under the project
//! root first, then the platform-agnostic `environment-rules.json`. When
//! neither exists a default document is synthesized and persisted
//! immediately so subsequent runs have a stable baseline.
//!
//! Saves rewrite the whole document with pretty JSON via the
//! write-to-temp-then-rename pattern, so a crash mid-write never leaves a
//! truncated file behind.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{EnvSwitchError, Result};
use crate::rules::document::RulesDocument;

/// Platform-agnostic fallback filename.
pub const DEFAULT_RULES_FILENAME: &str = "environment-rules.json";

/// Resolve the rules file path for a platform.
///
/// Prefers the platform-specific file when it exists; otherwise falls back to
/// the default filename (whether or not that file exists yet).
pub fn rules_file_path(project_root: &Path, platform_name: &str) -> PathBuf {
    let platform_file = project_root.join(format!("environment-rules.{}.json", platform_name));
    if platform_file.exists() {
        platform_file
    } else {
        project_root.join(DEFAULT_RULES_FILENAME)
    }
}

/// Load the rules document for a platform, synthesizing and persisting a
/// default one when no rules file exists.
///
/// Returns the document together with the path it was loaded from (and will
/// be saved back to).
pub fn load(project_root: &Path, platform_name: &str) -> Result<(RulesDocument, PathBuf)> {
    let path = rules_file_path(project_root, platform_name);
    debug!("Environment rules file: {}", path.display());

    if !path.exists() {
        info!(
            "No environment rules found, writing a default document to {}",
            path.display()
        );
        let document = RulesDocument::default_document();
        save(&path, &document)?;
        return Ok((document, path));
    }

    let content = fs::read_to_string(&path)?;
    let document: RulesDocument =
        serde_json::from_str(&content).map_err(|e| EnvSwitchError::RulesParseError {
            path: path.clone(),
            message: e.to_string(),
        })?;

    Ok((document, path))
}

/// Save the full document back to `path` using an atomic write.
pub fn save(path: &Path, document: &RulesDocument) -> Result<()> {
    let mut content =
        serde_json::to_string_pretty(document).map_err(|e| EnvSwitchError::RulesValidationError {
            message: format!("Failed to serialize environment rules: {}", e),
        })?;
    content.push('\n');

    // Atomic write: write to temp file, then rename.
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, &content)?;
    fs::rename(&temp_path, path)?;

    Ok(())
}
