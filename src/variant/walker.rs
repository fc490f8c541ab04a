//! Recursive, fault-isolated resource-tree traversal.
//!
//! The walker descends from a root directory, copies every variant file that
//! matches the active environment onto its canonical sibling, and hands each
//! canonical result to the [`DirectCopyRouter`]. One bad entry (permission
//! problem, transient stat failure, dangling symlink) never aborts the rest
//! of the tree; it is recorded in the report and the walk continues. Only an
//! unreadable root is fatal.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::variant::matcher;
use crate::variant::router::DirectCopyRouter;

/// A per-entry failure that was isolated during a walk.
#[derive(Debug, Clone)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub reason: String,
}

/// What a single walk did.
#[derive(Debug, Default)]
pub struct WalkReport {
    /// Canonical destinations that were actually written.
    pub copied: Vec<PathBuf>,
    /// Canonical destinations left alone because their bytes already matched.
    pub unchanged: Vec<PathBuf>,
    /// Auxiliary destinations refreshed by the direct-copy router.
    pub routed: Vec<PathBuf>,
    /// Entries whose processing failed and was isolated.
    pub skipped: Vec<SkippedEntry>,
}

impl WalkReport {
    /// Fold another report into this one (used across extra search roots).
    pub fn merge(&mut self, other: WalkReport) {
        self.copied.extend(other.copied);
        self.unchanged.extend(other.unchanged);
        self.routed.extend(other.routed);
        self.skipped.extend(other.skipped);
    }
}

/// Walk `root`, materializing variant files for the environment described by
/// `pattern`.
///
/// # Errors
///
/// Only a failure to read `root` itself is returned; everything below it is
/// isolated into [`WalkReport::skipped`].
pub fn walk(root: &Path, pattern: &Regex, router: &DirectCopyRouter<'_>) -> Result<WalkReport> {
    let mut report = WalkReport::default();

    let entries = fs::read_dir(root)?;
    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                record_skip(&mut report, root.to_path_buf(), &e.to_string());
                continue;
            }
        };
        visit(&path, pattern, router, &mut report);
    }

    Ok(report)
}

/// Process one entry, isolating any failure into the report.
fn visit(path: &Path, pattern: &Regex, router: &DirectCopyRouter<'_>, report: &mut WalkReport) {
    if let Err(reason) = try_visit(path, pattern, router, report) {
        record_skip(report, path.to_path_buf(), &reason);
    }
}

fn try_visit(
    path: &Path,
    pattern: &Regex,
    router: &DirectCopyRouter<'_>,
    report: &mut WalkReport,
) -> std::result::Result<(), String> {
    let metadata = fs::metadata(path).map_err(|e| e.to_string())?;

    if metadata.is_dir() {
        for entry in fs::read_dir(path).map_err(|e| e.to_string())? {
            match entry {
                Ok(entry) => visit(&entry.path(), pattern, router, report),
                Err(e) => record_skip(report, path.to_path_buf(), &e.to_string()),
            }
        }
        return Ok(());
    }

    let filename = match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => return Ok(()),
    };

    debug!("Checking file: {}", filename);
    if !matcher::is_variant(&filename, pattern) {
        return Ok(());
    }

    // A matching name that cannot be canonicalized means the pattern is wider
    // than the <base>.<tag>.<ext> convention; leave the file alone.
    let Some(canonical) = matcher::canonical_name(&filename) else {
        return Err(format!(
            "\"{}\" matched the environment pattern but has no environment tag to strip",
            filename
        ));
    };

    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    let destination = parent.join(&canonical);

    let source_bytes = fs::read(path).map_err(|e| e.to_string())?;
    if destination_matches(&destination, &source_bytes) {
        debug!(
            "Skipping \"{}\": destination already has the same content",
            canonical
        );
        report.unchanged.push(destination.clone());
    } else {
        info!("Copying variant file \"{}\" to \"{}\"", filename, canonical);
        fs::write(&destination, &source_bytes).map_err(|e| e.to_string())?;
        report.copied.push(destination.clone());
    }

    // Routed from the canonical destination, so the auxiliary copy always
    // reflects what the resource tree ends up with.
    match router.route(&canonical, &destination) {
        Ok(Some(routed)) => report.routed.push(routed),
        Ok(None) => {}
        Err(e) => return Err(e.to_string()),
    }

    Ok(())
}

fn destination_matches(destination: &Path, source_bytes: &[u8]) -> bool {
    match fs::read(destination) {
        Ok(existing) => existing == source_bytes,
        Err(_) => false,
    }
}

fn record_skip(report: &mut WalkReport, path: PathBuf, reason: &str) {
    warn!("Skipping \"{}\": {}", path.display(), reason);
    report.skipped.push(SkippedEntry {
        path,
        reason: reason.to_string(),
    });
}
