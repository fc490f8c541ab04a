//! App-icon regeneration via the host CLI.
//!
//! Icon generation is an external command (`ns resources generate icons`),
//! behind a trait so the engine can be tested without the host CLI
//! installed.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::info;

use crate::error::{EnvSwitchError, Result};

/// Regenerates the app icon set from a source asset.
pub trait IconGenerator {
    fn generate(&self, icon_path: &Path) -> Result<()>;
}

/// Runs `ns resources generate icons <path>`.
#[derive(Debug, Default)]
pub struct NsIconGenerator;

impl IconGenerator for NsIconGenerator {
    fn generate(&self, icon_path: &Path) -> Result<()> {
        let command = format!("ns resources generate icons {}", icon_path.display());
        info!("Regenerating app icons from {}", icon_path.display());

        let status = Command::new("ns")
            .args(["resources", "generate", "icons"])
            .arg(icon_path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| EnvSwitchError::ExternalTool {
                command: command.clone(),
                message: e.to_string(),
            })?;

        if !status.success() {
            return Err(EnvSwitchError::ExternalTool {
                command,
                message: format!("exit status {}", status),
            });
        }

        info!("Done generating app icons");
        Ok(())
    }
}

pub mod testing {
    //! Recording stub used by engine tests in place of the host CLI.

    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    /// Shared log of icon-generation calls.
    pub type IconCalls = Rc<RefCell<Vec<PathBuf>>>;

    #[derive(Debug, Default)]
    pub struct RecordingIconGenerator {
        pub calls: IconCalls,
        pub fail: bool,
    }

    impl RecordingIconGenerator {
        /// A generator plus a handle for inspecting its calls afterwards.
        pub fn with_handle() -> (Self, IconCalls) {
            let calls: IconCalls = Rc::default();
            let generator = Self {
                calls: Rc::clone(&calls),
                fail: false,
            };
            (generator, calls)
        }
    }

    impl IconGenerator for RecordingIconGenerator {
        fn generate(&self, icon_path: &Path) -> Result<()> {
            self.calls.borrow_mut().push(icon_path.to_path_buf());
            if self.fail {
                return Err(EnvSwitchError::ExternalTool {
                    command: "ns resources generate icons".to_string(),
                    message: "exit status 1".to_string(),
                });
            }
            Ok(())
        }
    }
}
