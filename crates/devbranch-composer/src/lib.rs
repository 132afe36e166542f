//! Composer adapter: run `composer show` and hand back its raw JSON.
//!
//! This is the only crate that spawns processes. It does not interpret the output; parsing and
//! classification live in `devbranch-domain`.

#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use std::process::{Command, Output, Stdio};
use thiserror::Error;

/// Default program name, resolved through `PATH`.
pub const DEFAULT_COMPOSER: &str = "composer";

/// The dependency listing could not be obtained.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran and exited non-zero. `diagnostic` is the tool's own output.
    #[error("{diagnostic}")]
    Failed {
        command: String,
        status: Option<i32>,
        diagnostic: String,
    },
}

impl ProcessError {
    /// Human-readable text suitable for a verdict message.
    pub fn diagnostic(&self) -> String {
        self.to_string()
    }
}

/// Source of the installed-dependency listing for a project directory.
pub trait DependencyLister {
    /// Return the raw stdout of the listing for `working_dir`, undecoded. Exactly one attempt,
    /// no retries.
    fn list_dependencies(&self, working_dir: &Utf8Path) -> Result<Vec<u8>, ProcessError>;
}

/// Runs the real composer binary.
#[derive(Clone, Debug)]
pub struct ComposerCli {
    program: Utf8PathBuf,
}

impl Default for ComposerCli {
    fn default() -> Self {
        Self::new(DEFAULT_COMPOSER)
    }
}

impl ComposerCli {
    pub fn new(program: impl Into<Utf8PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Utf8Path {
        &self.program
    }

    /// Arguments for "show installed packages, direct and transitive, as JSON".
    pub fn show_args(working_dir: &Utf8Path) -> Vec<String> {
        vec![
            "show".to_string(),
            format!("--working-dir={working_dir}"),
            "--format=json".to_string(),
        ]
    }

    fn command_line(&self, args: &[String]) -> String {
        let mut line = self.program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

impl DependencyLister for ComposerCli {
    fn list_dependencies(&self, working_dir: &Utf8Path) -> Result<Vec<u8>, ProcessError> {
        let args = Self::show_args(working_dir);
        let command = self.command_line(&args);
        tracing::debug!(%command, "running dependency listing");

        let output = Command::new(self.program.as_std_path())
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ProcessError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            let status = output.status.code();
            tracing::debug!(%command, ?status, "dependency listing failed");
            return Err(ProcessError::Failed {
                diagnostic: format_failure(&command, status, &output),
                command,
                status,
            });
        }

        Ok(output.stdout)
    }
}

/// Render a failed run the way a developer would want to read it in a hook: the tool's own
/// stdout and stderr, or the exit status when it printed nothing.
fn format_failure(command: &str, status: Option<i32>, output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    let parts: Vec<&str> = [stdout.trim(), stderr.trim()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();

    if !parts.is_empty() {
        return parts.join("\n");
    }

    match status {
        Some(code) => format!("`{command}` exited with status {code}"),
        None => format!("`{command}` was terminated by a signal"),
    }
}
