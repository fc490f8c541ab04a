//! Direct-copy routing for canonical filenames.
//!
//! Some canonical files are consumed by a native build stage at a location
//! outside the resource tree (a typical case: `GoogleService-Info.plist`
//! living next to the Xcode project). The rules document maps canonical
//! filenames to those destinations; after every matched copy the router
//! refreshes the mapped destination unconditionally, so a previous
//! environment's bytes never linger there.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;

/// Routes canonical filenames to auxiliary destinations under the project
/// root, per the `directCopyRules` mapping.
#[derive(Debug)]
pub struct DirectCopyRouter<'a> {
    rules: &'a BTreeMap<String, String>,
    project_root: &'a Path,
}

impl<'a> DirectCopyRouter<'a> {
    pub fn new(rules: &'a BTreeMap<String, String>, project_root: &'a Path) -> Self {
        Self {
            rules,
            project_root,
        }
    }

    /// Copy `source` to the mapped destination if `canonical_name` is
    /// registered. Returns the destination path when a copy happened.
    ///
    /// The copy is unconditional: no content comparison, always refresh.
    pub fn route(&self, canonical_name: &str, source: &Path) -> Result<Option<PathBuf>> {
        let Some(mapped) = self.rules.get(canonical_name) else {
            return Ok(None);
        };

        let destination = self.project_root.join(mapped);
        info!("Direct copying \"{}\" to \"{}\"", canonical_name, mapped);
        fs::copy(source, &destination)?;

        Ok(Some(destination))
    }
}
