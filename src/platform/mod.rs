//! Platform capability records and platform build-file editing.
//!
//! Platform differences are expressed as data, not types: a [`PlatformSpec`]
//! says where the resource tree lives, whether the gradle bundle id is
//! rewritten and whether leftover variant files may be deleted after a
//! prepare. The engine consults the record instead of branching on platform
//! names.

pub mod cleanup;
pub mod gradle;
pub mod manifest;

use std::path::{Path, PathBuf};

pub use cleanup::{remove_variant_files, CleanupReport};
pub use gradle::update_application_id;
pub use manifest::push_android_versions;

/// Capabilities and layout of one supported platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformSpec {
    /// Lowercase platform name, as used in rules filenames and CLI flags.
    pub name: String,
    /// Directory name under `App_Resources`.
    pub resources_dir_name: String,
    /// Extra path appended below the resources directory (Android projects
    /// with a migrated resource layout keep variant files under
    /// `src/main/res`).
    pub resources_subpath: Option<PathBuf>,
    /// Whether the bundle id is rewritten into `app.gradle`.
    pub edits_gradle_bundle_id: bool,
    /// Whether version fields are stamped into the prepared platform
    /// manifest. iOS versions go through the host's property-list editor
    /// instead.
    pub pushes_manifest_versions: bool,
    /// Whether leftover variant files may be deleted from the platform
    /// output tree after a prepare. On iOS every prepared file is registered
    /// with the Xcode build target, so deletion there would break the build.
    pub allows_variant_cleanup: bool,
}

impl PlatformSpec {
    pub fn android() -> Self {
        Self {
            name: "android".to_string(),
            resources_dir_name: "Android".to_string(),
            resources_subpath: None,
            edits_gradle_bundle_id: true,
            pushes_manifest_versions: true,
            allows_variant_cleanup: true,
        }
    }

    pub fn ios() -> Self {
        Self {
            name: "ios".to_string(),
            resources_dir_name: "iOS".to_string(),
            resources_subpath: None,
            edits_gradle_bundle_id: false,
            pushes_manifest_versions: false,
            allows_variant_cleanup: false,
        }
    }

    /// Look up a platform by (case-insensitive) name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "android" => Some(Self::android()),
            "ios" => Some(Self::ios()),
            _ => None,
        }
    }

    /// Use a migrated Android resource layout (`src/main/res`).
    pub fn with_migrated_resources(mut self) -> Self {
        self.resources_subpath = Some(PathBuf::from("src/main/res"));
        self
    }

    /// Root of the `App_Resources` tree for this platform.
    pub fn app_resources_root(&self, project_root: &Path) -> PathBuf {
        project_root
            .join("App_Resources")
            .join(&self.resources_dir_name)
    }

    /// Directory the variant walker starts from.
    pub fn variant_resources_root(&self, project_root: &Path) -> PathBuf {
        let root = self.app_resources_root(project_root);
        match &self.resources_subpath {
            Some(subpath) => root.join(subpath),
            None => root,
        }
    }

    /// Platform output directory under `platforms/`.
    pub fn platform_output_root(&self, project_root: &Path) -> PathBuf {
        project_root.join("platforms").join(&self.name)
    }
}
