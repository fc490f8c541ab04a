//! Post-prepare removal of environment-tagged files.
//!
//! After an Android prepare, the platform output tree still contains the
//! tagged variant files for every environment. They are dead weight in the
//! APK, so they are deleted. The traversal isolates per-entry failures the
//! same way the variant walker does.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{info, warn};

use crate::error::Result;
use crate::variant::SkippedEntry;

/// Filename pattern covering every known environment tag.
const VARIANT_FILE_PATTERN: &str =
    r".*\.(development|dev|edge|test|uat|beta|staging|release)\..*";

/// What a cleanup pass did.
#[derive(Debug, Default)]
pub struct CleanupReport {
    pub deleted: Vec<PathBuf>,
    pub skipped: Vec<SkippedEntry>,
}

/// Recursively delete environment-tagged files under `root`.
///
/// Only an unreadable `root` is fatal; anything below it is isolated into
/// the report.
pub fn remove_variant_files(root: &Path) -> Result<CleanupReport> {
    let pattern = Regex::new(VARIANT_FILE_PATTERN).map_err(|e| anyhow::anyhow!(e))?;
    let mut report = CleanupReport::default();

    let entries = fs::read_dir(root)?;
    for entry in entries {
        match entry {
            Ok(entry) => visit(&entry.path(), &pattern, &mut report),
            Err(e) => record_skip(&mut report, root.to_path_buf(), &e.to_string()),
        }
    }

    Ok(report)
}

fn visit(path: &Path, pattern: &Regex, report: &mut CleanupReport) {
    if let Err(reason) = try_visit(path, pattern, report) {
        record_skip(report, path.to_path_buf(), &reason);
    }
}

fn try_visit(
    path: &Path,
    pattern: &Regex,
    report: &mut CleanupReport,
) -> std::result::Result<(), String> {
    let metadata = fs::metadata(path).map_err(|e| e.to_string())?;

    if metadata.is_dir() {
        for entry in fs::read_dir(path).map_err(|e| e.to_string())? {
            match entry {
                Ok(entry) => visit(&entry.path(), pattern, report),
                Err(e) => record_skip(report, path.to_path_buf(), &e.to_string()),
            }
        }
        return Ok(());
    }

    let filename = match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => return Ok(()),
    };

    if pattern.is_match(&filename) {
        info!("Deleting environment-tagged file: {}", path.display());
        fs::remove_file(path).map_err(|e| e.to_string())?;
        report.deleted.push(path.to_path_buf());
    }

    Ok(())
}

fn record_skip(report: &mut CleanupReport, path: PathBuf, reason: &str) {
    warn!("Skipping \"{}\": {}", path.display(), reason);
    report.skipped.push(SkippedEntry {
        path,
        reason: reason.to_string(),
    });
}
