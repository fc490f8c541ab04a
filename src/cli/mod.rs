//! Command-line interface for the build-tool hooks.
//!
//! The host build tool invokes the binary once per platform build:
//! `envswitch switch` before the prepare stage and `envswitch finalize`
//! after it. All run parameters (platform, environment, release flag, paths)
//! come from the host; there is no interactive surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::engine::RunContext;
use crate::error::{EnvSwitchError, Result};
use crate::platform::PlatformSpec;

/// Environment used when the host does not name one.
pub const DEFAULT_ENV_NAME: &str = "development";

#[derive(Debug, Parser)]
#[command(name = "envswitch", version, about = "Environment switching and versioning for mobile app builds")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging.
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Before-prepare hook: switch variant files and advance versions.
    Switch(HookArgs),

    /// After-prepare hook: stamp versions into the prepared manifest and
    /// remove leftover variant files.
    Finalize(HookArgs),
}

#[derive(Debug, Args)]
pub struct HookArgs {
    /// Target platform (android or ios).
    #[arg(long)]
    pub platform: String,

    /// Environment name to switch to.
    #[arg(long, default_value = DEFAULT_ENV_NAME)]
    pub env: String,

    /// Release build: advance the build number and version code.
    #[arg(long)]
    pub release: bool,

    /// Project root (defaults to the current directory).
    #[arg(long)]
    pub project: Option<PathBuf>,

    /// Override the platform resource root.
    #[arg(long)]
    pub resources: Option<PathBuf>,

    /// Android project with a migrated resource layout (src/main/res).
    #[arg(long)]
    pub migrated_resources: bool,
}

impl HookArgs {
    /// Translate the host's invocation into a [`RunContext`].
    pub fn run_context(&self) -> Result<RunContext> {
        let platform = PlatformSpec::from_name(&self.platform).ok_or_else(|| {
            EnvSwitchError::RulesValidationError {
                message: format!("unsupported platform \"{}\"", self.platform),
            }
        })?;
        let platform = if self.migrated_resources {
            platform.with_migrated_resources()
        } else {
            platform
        };

        let project_root = match &self.project {
            Some(path) => path.clone(),
            None => std::env::current_dir()?,
        };

        let mut context =
            RunContext::new(platform, self.env.clone(), self.release, project_root);
        if let Some(resources) = &self.resources {
            context = context.with_resources_root(resources.clone());
        }

        Ok(context)
    }
}
