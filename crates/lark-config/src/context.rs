//! Build context passed into configuration assembly.
//!
//! Wraps the process-global inputs (working directory, invoking script,
//! command, mode) so the assemblers never read them ad hoc and stay
//! testable without process-level mocking.

use std::path::PathBuf;

/// Command the external bundler was invoked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Build,
    Serve,
}

/// Snapshot of the invocation environment for one configuration assembly.
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub command: Command,
    pub mode: String,
    pub root: PathBuf,
    /// Invoking script line, when known; used to derive env-file candidates.
    pub script: Option<String>,
}

impl BuildContext {
    pub fn new(command: Command, mode: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            command,
            mode: mode.into(),
            root: root.into(),
            script: None,
        }
    }

    /// Context rooted at the current working directory.
    pub fn from_cwd(command: Command, mode: impl Into<String>) -> std::io::Result<Self> {
        Ok(Self::new(command, mode, std::env::current_dir()?))
    }

    /// Attach the invoking script line (e.g. the package-manager lifecycle
    /// script) used for `--mode` extraction.
    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }

    pub fn is_build(&self) -> bool {
        self.command == Command::Build
    }
}
