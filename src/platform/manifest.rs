//! Version push into the prepared Android manifest.
//!
//! After the host build tool has prepared the platform output, the persisted
//! version and version code are stamped into
//! `platforms/android/app/src/main/AndroidManifest.xml`. The iOS equivalent
//! (the Info.plist) is edited by the host itself and is out of scope here.

use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::{debug, info};

use crate::error::Result;

const MANIFEST_RELATIVE_PATH: &str = "app/src/main/AndroidManifest.xml";

/// Rewrite `android:versionName` and `android:versionCode` in the prepared
/// manifest under `platform_output_root`.
///
/// Returns `false` without touching anything when the manifest does not
/// exist yet (the platform may not have been prepared).
pub fn push_android_versions(
    platform_output_root: &Path,
    version: &str,
    version_code: &str,
) -> Result<bool> {
    let manifest_path = platform_output_root.join(MANIFEST_RELATIVE_PATH);
    if !manifest_path.exists() {
        debug!(
            "No Android manifest at {}, skipping version push",
            manifest_path.display()
        );
        return Ok(false);
    }

    let content = fs::read_to_string(&manifest_path)?;

    let version_name_pattern =
        Regex::new(r#"(android:versionName=")[\d.]+(")"#).map_err(|e| anyhow::anyhow!(e))?;
    let version_code_pattern =
        Regex::new(r#"(android:versionCode=")[\d.]+(")"#).map_err(|e| anyhow::anyhow!(e))?;

    let updated = version_name_pattern
        .replace(&content, format!("${{1}}{}${{2}}", version))
        .into_owned();
    let updated = version_code_pattern
        .replace(&updated, format!("${{1}}{}${{2}}", version_code))
        .into_owned();

    info!(
        "Stamping version \"{}\" (code \"{}\") into the Android manifest",
        version, version_code
    );
    fs::write(&manifest_path, updated)?;

    Ok(true)
}
