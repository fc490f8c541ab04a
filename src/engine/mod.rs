//! Run orchestration.
//!
//! One [`EnvironmentEngine`] run covers a single platform build:
//!
//! 1. load and validate the rules document
//! 2. propagate the environment's bundle id into the platform build file
//! 3. resolve (version, buildNumber, versionCode) against the declared
//!    version
//! 4. stamp the resolved versions into the prepared platform manifest, when
//!    the platform takes them that way
//! 5. walk the platform resource tree and every configured extra path
//! 6. optionally regenerate app icons
//! 7. persist the mutated rules document
//!
//! Every step aborts the run on failure except the per-file isolation inside
//! the walks. The rules document is threaded through explicitly; no step
//! keeps ambient state.

pub mod icon;

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::Result;
use crate::platform::{self, CleanupReport, PlatformSpec};
use crate::rules::{self, RulesDocument};
use crate::variant::{self, DirectCopyRouter, WalkReport};
use crate::version::{self, VersionState};

pub use icon::{IconGenerator, NsIconGenerator};

/// Everything one run needs from the host build tool. Never persisted.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub platform: PlatformSpec,
    pub environment_name: String,
    pub release_mode: bool,
    pub project_root: PathBuf,
    /// Root of the platform resource tree the walker starts from.
    pub resources_root: PathBuf,
}

impl RunContext {
    /// Build a context with the platform's default resource root.
    pub fn new(
        platform: PlatformSpec,
        environment_name: impl Into<String>,
        release_mode: bool,
        project_root: impl Into<PathBuf>,
    ) -> Self {
        let project_root = project_root.into();
        let resources_root = platform.variant_resources_root(&project_root);
        Self {
            platform,
            environment_name: environment_name.into(),
            release_mode,
            project_root,
            resources_root,
        }
    }

    /// Override the resource root (host projects with custom layouts).
    pub fn with_resources_root(mut self, resources_root: impl Into<PathBuf>) -> Self {
        self.resources_root = resources_root.into();
        self
    }
}

/// Outcome of a full `switch` run.
#[derive(Debug)]
pub struct RunSummary {
    pub version: VersionState,
    pub walk: WalkReport,
    pub rules_path: PathBuf,
}

/// Outcome of a `finalize` pass.
#[derive(Debug)]
pub struct FinalizeSummary {
    pub manifest_updated: bool,
    pub cleanup: CleanupReport,
}

/// Orchestrates environment switching for one build invocation.
pub struct EnvironmentEngine {
    context: RunContext,
    icon_generator: Box<dyn IconGenerator>,
}

impl EnvironmentEngine {
    pub fn new(context: RunContext) -> Self {
        Self {
            context,
            icon_generator: Box::new(NsIconGenerator),
        }
    }

    /// Replace the icon generator (tests substitute a recording stub).
    pub fn with_icon_generator(mut self, icon_generator: Box<dyn IconGenerator>) -> Self {
        self.icon_generator = icon_generator;
        self
    }

    /// The before-prepare stage: switch variant files and advance versions.
    pub fn run(&self) -> Result<RunSummary> {
        let ctx = &self.context;
        info!(
            "Switching environment \"{}\" for platform \"{}\"",
            ctx.environment_name, ctx.platform.name
        );

        let (mut document, rules_path) = rules::load(&ctx.project_root, &ctx.platform.name)?;
        document.validate()?;
        let environment = document.environment(&ctx.environment_name)?.clone();

        if ctx.platform.edits_gradle_bundle_id {
            platform::update_application_id(
                &ctx.platform.app_resources_root(&ctx.project_root),
                &environment.app_bundle_id,
            )?;
        }

        let declared = version::declared_version(&ctx.project_root)?;
        let resolved =
            version::resolve_versioning(&declared, document.version_state()?, ctx.release_mode)?;
        document.apply_version_state(&resolved);

        if ctx.platform.pushes_manifest_versions {
            platform::push_android_versions(
                &ctx.platform.platform_output_root(&ctx.project_root),
                &resolved.version,
                &resolved.version_code,
            )?;
        }

        let pattern = environment.pattern()?;
        let router = DirectCopyRouter::new(&document.direct_copy_rules, &ctx.project_root);

        let mut walk = variant::walk(&ctx.resources_root, &pattern, &router)?;
        for extra in &document.extra_paths {
            let root = self.resolve_extra_path(extra);
            walk.merge(variant::walk(&root, &pattern, &router)?);
        }
        if !walk.skipped.is_empty() {
            warn!(
                "{} entr{} skipped during the resource walk",
                walk.skipped.len(),
                if walk.skipped.len() == 1 { "y" } else { "ies" }
            );
        }

        self.generate_icon(&document)?;

        rules::save(&rules_path, &document)?;

        Ok(RunSummary {
            version: resolved,
            walk,
            rules_path,
        })
    }

    /// The after-prepare stage: stamp versions into the prepared manifest
    /// and delete leftover variant files from the platform output tree.
    pub fn finalize(&self) -> Result<FinalizeSummary> {
        let ctx = &self.context;
        let (document, _) = rules::load(&ctx.project_root, &ctx.platform.name)?;
        let state = document.version_state()?;

        let output_root = ctx.platform.platform_output_root(&ctx.project_root);

        let manifest_updated = if ctx.platform.pushes_manifest_versions {
            platform::push_android_versions(&output_root, &state.version, &state.version_code)?
        } else {
            false
        };

        let cleanup = if ctx.platform.allows_variant_cleanup {
            let app_root = output_root.join("app");
            if app_root.is_dir() {
                platform::remove_variant_files(&app_root)?
            } else {
                CleanupReport::default()
            }
        } else {
            CleanupReport::default()
        };

        Ok(FinalizeSummary {
            manifest_updated,
            cleanup,
        })
    }

    /// Extra paths may be absolute or relative to the project root.
    fn resolve_extra_path(&self, extra: &str) -> PathBuf {
        let path = Path::new(extra);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.context.project_root.join(path)
        }
    }

    fn generate_icon(&self, document: &RulesDocument) -> Result<()> {
        let Some(icon_path) = &document.app_icon_path else {
            return Ok(());
        };

        let full_path = self.context.project_root.join(icon_path);
        if !full_path.exists() {
            warn!(
                "Configured app icon {} does not exist, skipping regeneration",
                full_path.display()
            );
            return Ok(());
        }

        self.icon_generator.generate(&full_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::icon::testing::RecordingIconGenerator;
    use crate::error::EnvSwitchError;
    use crate::rules::EnvironmentEntry;
    use std::fs;
    use tempfile::TempDir;

    const GRADLE: &str =
        "android {\n  defaultConfig {\n    applicationId = 'org.example.app'\n  }\n}\n";

    /// Lay out a minimal Android project with one staging variant file.
    fn android_project(temp: &TempDir) -> PathBuf {
        let root = temp.path().to_path_buf();
        let resources = root.join("App_Resources/Android");
        fs::create_dir_all(&resources).unwrap();
        fs::write(resources.join("app.gradle"), GRADLE).unwrap();
        fs::write(resources.join("google-services.staging.json"), "staging").unwrap();

        fs::write(
            root.join("package.json"),
            r#"{"name": "app", "version": "1.2.1"}"#,
        )
        .unwrap();

        let document = test_document();
        rules::save(&root.join("environment-rules.android.json"), &document).unwrap();

        root
    }

    fn test_document() -> RulesDocument {
        let mut document = RulesDocument::default_document();
        document.environments = vec![EnvironmentEntry {
            name: "staging".to_string(),
            app_bundle_id: "org.example.app.staging".to_string(),
            match_pattern: r".*\.staging\..*".to_string(),
        }];
        document.version = Some("1.2.1".to_string());
        document.build_number = Some("4".to_string());
        document.version_code = Some("1020104".to_string());
        document
    }

    fn engine(root: &Path, release: bool) -> EnvironmentEngine {
        let context = RunContext::new(PlatformSpec::android(), "staging", release, root);
        EnvironmentEngine::new(context)
    }

    #[test]
    fn full_run_copies_variants_and_persists_rules() {
        let temp = TempDir::new().unwrap();
        let root = android_project(&temp);

        let summary = engine(&root, true).run().unwrap();

        assert_eq!(summary.version.build_number, "5");
        assert_eq!(summary.walk.copied.len(), 1);
        assert_eq!(
            fs::read_to_string(root.join("App_Resources/Android/google-services.json")).unwrap(),
            "staging"
        );

        // Rules were written back with the advanced build number.
        let (reloaded, _) = rules::load(&root, "android").unwrap();
        assert_eq!(reloaded.build_number.as_deref(), Some("5"));
    }

    #[test]
    fn run_updates_gradle_bundle_id() {
        let temp = TempDir::new().unwrap();
        let root = android_project(&temp);

        engine(&root, false).run().unwrap();

        let gradle = fs::read_to_string(root.join("App_Resources/Android/app.gradle")).unwrap();
        assert!(gradle.contains("applicationId = 'org.example.app.staging'"));
    }

    #[test]
    fn non_release_run_leaves_versions_alone() {
        let temp = TempDir::new().unwrap();
        let root = android_project(&temp);

        let summary = engine(&root, false).run().unwrap();
        assert_eq!(summary.version.build_number, "4");
        assert_eq!(summary.version.version_code, "1020104");
    }

    #[test]
    fn unknown_environment_aborts_before_touching_anything() {
        let temp = TempDir::new().unwrap();
        let root = android_project(&temp);

        let context = RunContext::new(PlatformSpec::android(), "qa", true, &root);
        let err = EnvironmentEngine::new(context).run().unwrap_err();
        assert!(matches!(err, EnvSwitchError::UnknownEnvironment { .. }));

        // The gradle file still carries the original id.
        let gradle = fs::read_to_string(root.join("App_Resources/Android/app.gradle")).unwrap();
        assert!(gradle.contains("applicationId = 'org.example.app'"));
    }

    #[test]
    fn missing_package_json_aborts_the_run() {
        let temp = TempDir::new().unwrap();
        let root = android_project(&temp);
        fs::remove_file(root.join("package.json")).unwrap();

        let err = engine(&root, true).run().unwrap_err();
        assert!(matches!(err, EnvSwitchError::VersionSourceError { .. }));
    }

    #[test]
    fn extra_paths_are_walked_relative_to_project_root() {
        let temp = TempDir::new().unwrap();
        let root = android_project(&temp);

        let shared = root.join("shared/config");
        fs::create_dir_all(&shared).unwrap();
        fs::write(shared.join("api.staging.json"), "extra").unwrap();

        let rules_path = root.join("environment-rules.android.json");
        let mut document = test_document();
        document.extra_paths = vec!["shared/config".to_string()];
        rules::save(&rules_path, &document).unwrap();

        let summary = engine(&root, false).run().unwrap();

        assert_eq!(summary.walk.copied.len(), 2);
        assert_eq!(fs::read_to_string(shared.join("api.json")).unwrap(), "extra");
    }

    #[test]
    fn second_identical_run_writes_no_resource_files() {
        let temp = TempDir::new().unwrap();
        let root = android_project(&temp);

        let first = engine(&root, false).run().unwrap();
        assert_eq!(first.walk.copied.len(), 1);

        let second = engine(&root, false).run().unwrap();
        assert_eq!(second.walk.copied.len(), 0);
        assert_eq!(second.walk.unchanged.len(), 1);
    }

    #[test]
    fn icon_generation_runs_when_icon_exists() {
        let temp = TempDir::new().unwrap();
        let root = android_project(&temp);
        fs::write(root.join("icon.png"), "png").unwrap();

        let rules_path = root.join("environment-rules.android.json");
        let mut document = test_document();
        document.app_icon_path = Some("icon.png".to_string());
        rules::save(&rules_path, &document).unwrap();

        let (generator, calls) = RecordingIconGenerator::with_handle();
        let context = RunContext::new(PlatformSpec::android(), "staging", false, &root);
        EnvironmentEngine::new(context)
            .with_icon_generator(Box::new(generator))
            .run()
            .unwrap();

        assert_eq!(calls.borrow().len(), 1);
        assert!(calls.borrow()[0].ends_with("icon.png"));
    }

    #[test]
    fn missing_icon_asset_skips_generation() {
        let temp = TempDir::new().unwrap();
        let root = android_project(&temp);

        let rules_path = root.join("environment-rules.android.json");
        let mut document = test_document();
        document.app_icon_path = Some("missing.png".to_string());
        rules::save(&rules_path, &document).unwrap();

        let (generator, calls) = RecordingIconGenerator::with_handle();
        let context = RunContext::new(PlatformSpec::android(), "staging", false, &root);
        EnvironmentEngine::new(context)
            .with_icon_generator(Box::new(generator))
            .run()
            .unwrap();

        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn failed_icon_generation_aborts_and_skips_persistence() {
        let temp = TempDir::new().unwrap();
        let root = android_project(&temp);
        fs::write(root.join("icon.png"), "png").unwrap();

        let rules_path = root.join("environment-rules.android.json");
        let mut document = test_document();
        document.app_icon_path = Some("icon.png".to_string());
        rules::save(&rules_path, &document).unwrap();

        let (mut generator, _calls) = RecordingIconGenerator::with_handle();
        generator.fail = true;
        let context = RunContext::new(PlatformSpec::android(), "staging", true, &root);
        let err = EnvironmentEngine::new(context)
            .with_icon_generator(Box::new(generator))
            .run()
            .unwrap_err();

        assert!(matches!(err, EnvSwitchError::ExternalTool { .. }));

        // The failed run must not have persisted the advanced build number.
        let (reloaded, _) = rules::load(&root, "android").unwrap();
        assert_eq!(reloaded.build_number.as_deref(), Some("4"));
    }

    #[test]
    fn finalize_stamps_manifest_and_cleans_output_tree() {
        let temp = TempDir::new().unwrap();
        let root = android_project(&temp);

        let manifest_dir = root.join("platforms/android/app/src/main");
        fs::create_dir_all(&manifest_dir).unwrap();
        fs::write(
            manifest_dir.join("AndroidManifest.xml"),
            r#"<manifest android:versionCode="1" android:versionName="0.1.0"/>"#,
        )
        .unwrap();
        fs::write(
            root.join("platforms/android/app/leftover.staging.json"),
            "x",
        )
        .unwrap();

        let summary = engine(&root, true).finalize().unwrap();

        assert!(summary.manifest_updated);
        assert_eq!(summary.cleanup.deleted.len(), 1);

        let manifest = fs::read_to_string(manifest_dir.join("AndroidManifest.xml")).unwrap();
        assert!(manifest.contains(r#"android:versionName="1.2.1""#));
        assert!(manifest.contains(r#"android:versionCode="1020104""#));
    }

    #[test]
    fn finalize_on_ios_neither_stamps_nor_deletes() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_path_buf();
        fs::write(
            root.join("package.json"),
            r#"{"name": "app", "version": "1.0.0"}"#,
        )
        .unwrap();
        rules::save(&root.join("environment-rules.ios.json"), &test_document()).unwrap();

        let context = RunContext::new(PlatformSpec::ios(), "staging", true, &root);
        let summary = EnvironmentEngine::new(context).finalize().unwrap();

        assert!(!summary.manifest_updated);
        assert!(summary.cleanup.deleted.is_empty());
    }
}
