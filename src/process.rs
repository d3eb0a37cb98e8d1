//! External process execution.
//!
//! Every external tool call is described by an [`Invocation`] and executed by
//! a [`CommandRunner`]. The [`SystemRunner`] launches real child processes;
//! tests plug in a runner that only records what would have been run.

use std::{
    fmt::{self, Display, Formatter},
    io,
    path::{Path, PathBuf},
    process::Command,
};

use thiserror::Error;
use tracing::debug;

/// Failure of an external command.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` {}", describe_exit(.code))]
    Failed { command: String, code: Option<i32> },
}

impl ProcessError {
    /// Exit code the whole tool should terminate with.
    ///
    /// Mirrors the child's code when it has one, and `1` otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Failed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match *code {
        Some(code) => format!("returned non-zero exit status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

/// One external command: program, arguments and working directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    #[must_use]
    pub fn new<I, S>(program: impl Into<String>, args: I, cwd: impl AsRef<Path>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: cwd.as_ref().to_path_buf(),
        }
    }
}

impl Display for Invocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Executes invocations to completion.
pub trait CommandRunner {
    /// Run `invocation`, blocking until it exits.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::Spawn`] if the program cannot be started and
    /// [`ProcessError::Failed`] if it exits unsuccessfully.
    fn run(&mut self, invocation: &Invocation) -> Result<(), ProcessError>;
}

/// Runs invocations as child processes sharing this process' stdio.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<(), ProcessError> {
        debug!("Running `{invocation}` in {}", invocation.cwd.display());

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .status()
            .map_err(|source| ProcessError::Spawn {
                command: invocation.to_string(),
                source,
            })?;

        debug!("`{invocation}` exited with {status}");

        if status.success() {
            Ok(())
        } else {
            Err(ProcessError::Failed {
                command: invocation.to_string(),
                code: status.code(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_display() {
        let inv = Invocation::new("dfx", ["start", "--background", "--clean"], "/work");

        assert_eq!(inv.to_string(), "dfx start --background --clean");
        assert_eq!(inv.cwd, PathBuf::from("/work"));
    }

    #[test]
    fn test_failed_error_message() {
        let err = ProcessError::Failed {
            command: "npm run build".into(),
            code: Some(2),
        };

        assert_eq!(
            err.to_string(),
            "`npm run build` returned non-zero exit status 2"
        );
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_signal_error_exit_code() {
        let err = ProcessError::Failed {
            command: "dfx deploy".into(),
            code: None,
        };

        assert_eq!(err.to_string(), "`dfx deploy` was terminated by a signal");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let inv = Invocation::new(
            "icp-mgr-test-program-that-does-not-exist",
            Vec::<String>::new(),
            dir.path(),
        );

        let err = SystemRunner.run(&inv).unwrap_err();

        assert!(matches!(err, ProcessError::Spawn { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_code_is_captured() {
        let dir = tempfile::TempDir::new().unwrap();
        let inv = Invocation::new("sh", ["-c", "exit 3"], dir.path());

        let err = SystemRunner.run(&inv).unwrap_err();

        assert!(matches!(err, ProcessError::Failed { code: Some(3), .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_in_working_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let inv = Invocation::new("sh", ["-c", "touch ran-here"], dir.path());

        SystemRunner.run(&inv).unwrap();

        assert!(dir.path().join("ran-here").exists());
    }
}
