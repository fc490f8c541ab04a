//! Variant filename matching and canonicalization.
//!
//! Pure string logic, no I/O. A variant filename has the shape
//! `<base>.<envTag>.<ext>` where `base` may itself contain dots. The
//! canonical destination keeps everything before the tag plus the extension:
//! `en.default.staging.json` becomes `en.default.json`.

use regex::Regex;

/// Whether `filename` is a variant of the environment described by `pattern`.
///
/// The pattern comes straight from the environment's `matchPattern` rule; a
/// well-formed pattern only matches names with at least three dot-segments,
/// since anything shorter has no tag to strip.
pub fn is_variant(filename: &str, pattern: &Regex) -> bool {
    pattern.is_match(filename)
}

/// Compute the canonical (untagged) filename for a variant filename.
///
/// Returns `None` when the name has fewer than three dot-segments and
/// therefore cannot carry an environment tag.
pub fn canonical_name(filename: &str) -> Option<String> {
    let segments: Vec<&str> = filename.split('.').collect();
    if segments.len() < 3 {
        return None;
    }

    let extension = segments[segments.len() - 1];
    let base = segments[..segments.len() - 2].join(".");

    Some(format!("{}.{}", base, extension))
}
