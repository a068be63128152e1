//! External command execution.
//!
//! The authoring service and the model converter are both reached through
//! command-line tools. Everything goes through [`CommandRunner`] so flows can
//! be driven by a scripted fake in tests.

use crate::error::{SyncError, SyncResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tracing::debug;

/// Captured result of one command invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl CommandOutput {
    #[must_use]
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self { stdout: stdout.into(), stderr: String::new(), code: Some(0) }
    }

    #[must_use]
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self { stdout: String::new(), stderr: stderr.into(), code: Some(code) }
    }

    #[must_use]
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Trimmed stdout and stderr joined, empty when the command was silent.
    #[must_use]
    pub fn diagnostic(&self) -> String {
        let parts: Vec<&str> =
            [self.stdout.trim(), self.stderr.trim()].into_iter().filter(|s| !s.is_empty()).collect();
        parts.join("\n")
    }
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args` to completion.
    ///
    /// A non-zero exit is reported through [`CommandOutput::code`], not as an
    /// error. Errors are reserved for failing to start the process at all.
    async fn run(&self, program: &str, args: &[String]) -> SyncResult<CommandOutput>;
}

/// Runs real processes from a fixed working directory.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    working_dir: PathBuf,
}

impl ProcessRunner {
    #[must_use]
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    /// Prefers a locally installed npm binary over one on `PATH`.
    fn resolve(&self, program: &str) -> PathBuf {
        let local = self.working_dir.join("node_modules").join(".bin").join(program);
        if Path::new(program).components().count() == 1 && local.is_file() {
            local
        } else {
            PathBuf::from(program)
        }
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[String]) -> SyncResult<CommandOutput> {
        let resolved = self.resolve(program);
        debug!(program = %resolved.display(), operation = %args.iter().take(2).cloned().collect::<Vec<_>>().join(" "), "Running command");

        let output = tokio::process::Command::new(&resolved)
            .args(args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| SyncError::Spawn { program: program.to_string(), source })?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code(),
        })
    }
}
