//! Bundle-id propagation into `app.gradle`.
//!
//! Android reads the application id from `App_Resources/Android/app.gradle`;
//! switching environments means rewriting the `applicationId = '...'`
//! assignment in place.

use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::info;

use crate::error::{EnvSwitchError, Result};

const APPLICATION_ID_PATTERN: &str =
    r"applicationId = '([A-Za-z][A-Za-z\d_]*\.)*[A-Za-z][A-Za-z\d_]*'";

/// Rewrite the `applicationId` assignment in `app.gradle` under
/// `app_resources_root`.
///
/// A missing gradle file is a configuration error: the project cannot build
/// for Android without one, and silently skipping would ship the previous
/// environment's bundle id.
pub fn update_application_id(app_resources_root: &Path, bundle_id: &str) -> Result<()> {
    let gradle_file = app_resources_root.join("app.gradle");
    if !gradle_file.exists() {
        return Err(EnvSwitchError::BuildFileError {
            path: gradle_file,
            message: "gradle file not found".to_string(),
        });
    }

    let content = fs::read_to_string(&gradle_file)?;

    let pattern = Regex::new(APPLICATION_ID_PATTERN).map_err(|e| anyhow::anyhow!(e))?;
    let replacement = format!("applicationId = '{}'", bundle_id);
    let updated = pattern.replace(&content, replacement.as_str());

    info!("Updating app bundle id to: {}", bundle_id);
    fs::write(&gradle_file, updated.as_bytes())?;

    Ok(())
}
