//! Frontend build and canister deployment sequencing.
//!
//! Each operation runs its external commands one after another and stops at
//! the first failure. Nothing is retried or rolled back.

use tracing::debug;

use crate::{
    config::{ProjectLayout, Style, Toolchain},
    process::{CommandRunner, Invocation, ProcessError},
};

/// Drives `npm` and `dfx` for a project.
pub struct Orchestrator<R> {
    runner: R,
    layout: ProjectLayout,
    tools: Toolchain,
    style: Style,

    /// When `true`, progress messages are not printed.
    quiet: bool,
}

impl<R: CommandRunner> Orchestrator<R> {
    #[must_use]
    pub fn new(runner: R, layout: ProjectLayout, tools: Toolchain, style: Style) -> Self {
        Self {
            runner,
            layout,
            tools,
            style,
            quiet: false,
        }
    }

    #[must_use]
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    #[cfg(test)]
    const fn runner(&self) -> &R {
        &self.runner
    }

    /// Build the frontend with `npm run build` in the frontend directory.
    ///
    /// # Errors
    ///
    /// Returns the [`ProcessError`] of the build command.
    pub fn build_frontend(&mut self) -> Result<(), ProcessError> {
        self.say(&self.style.info("Building frontend..."));

        let build = Invocation::new(
            self.tools.npm.clone(),
            ["run", "build"],
            self.layout.frontend_path(),
        );

        match self.runner.run(&build) {
            Ok(()) => {
                self.say(&self.style.success("Frontend build complete."));
                Ok(())
            }
            Err(e) => {
                self.say(&self.style.error(&format!("Frontend build failed: {e}")));
                Err(e)
            }
        }
    }

    /// Stop the local replica (if running) and start a clean one in the
    /// background.
    ///
    /// # Errors
    ///
    /// Returns the [`ProcessError`] of the start command. A failing stop is
    /// ignored, since the replica may simply not be running.
    pub fn restart_replica(&mut self) -> Result<(), ProcessError> {
        self.say(&self.style.info("Restarting IC replica..."));

        let stop = self.dfx(["stop"]);
        if let Err(e) = self.runner.run(&stop) {
            debug!("Ignoring failed replica stop: {e}");
        }
        self.say(&self.style.warning("Replica stopped."));

        let start = self.dfx(["start", "--background", "--clean"]);
        match self.runner.run(&start) {
            Ok(()) => {
                self.say(&self.style.success("Replica started."));
                Ok(())
            }
            Err(e) => {
                self.say(&self.style.error(&format!("Replica operation failed: {e}")));
                Err(e)
            }
        }
    }

    /// Deploy every canister with `dfx deploy`.
    ///
    /// Deploying also regenerates the candid interface consumed by the
    /// frontend build.
    ///
    /// # Errors
    ///
    /// Returns the [`ProcessError`] of the deploy command.
    pub fn deploy_backend(&mut self) -> Result<(), ProcessError> {
        self.say(&self.style.info("Deploying backend..."));

        let deploy = self.dfx(["deploy"]);
        match self.runner.run(&deploy) {
            Ok(()) => {
                self.say(&self.style.success("Backend deployed."));
                Ok(())
            }
            Err(e) => {
                self.say(&self.style.error(&format!("Backend deploy failed: {e}")));
                Err(e)
            }
        }
    }

    /// Restart the replica, then deploy the backend.
    ///
    /// # Errors
    ///
    /// Returns the first [`ProcessError`]; later steps don't run.
    pub fn restart_and_deploy(&mut self) -> Result<(), ProcessError> {
        self.restart_replica()?;
        self.deploy_backend()
    }

    /// Full rebuild: restart the replica, deploy the backend, then build the
    /// frontend against the freshly generated interface.
    ///
    /// # Errors
    ///
    /// Returns the first [`ProcessError`]; later steps don't run.
    pub fn rebuild(&mut self) -> Result<(), ProcessError> {
        self.say(&self.style.banner("--- Full Rebuild ---"));

        self.restart_replica()?;
        self.deploy_backend()?;
        self.build_frontend()?;

        self.say(&self.style.banner_success("--- Rebuild complete! ---"));
        Ok(())
    }

    fn dfx<const N: usize>(&self, args: [&str; N]) -> Invocation {
        Invocation::new(self.tools.dfx.clone(), args, self.layout.root())
    }

    fn say(&self, line: &str) {
        if !self.quiet {
            println!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    /// Records invocations and fails the ones whose command line matches.
    #[derive(Default)]
    struct RecordingRunner {
        calls: Vec<Invocation>,
        failing: Vec<&'static str>,
    }

    impl RecordingRunner {
        fn failing(commands: &[&'static str]) -> Self {
            Self {
                calls: Vec::new(),
                failing: commands.to_vec(),
            }
        }

        fn commands(&self) -> Vec<String> {
            self.calls.iter().map(ToString::to_string).collect()
        }
    }

    impl CommandRunner for RecordingRunner {
        fn run(&mut self, invocation: &Invocation) -> Result<(), ProcessError> {
            self.calls.push(invocation.clone());
            let command = invocation.to_string();

            if self.failing.contains(&command.as_str()) {
                Err(ProcessError::Failed {
                    command,
                    code: Some(1),
                })
            } else {
                Ok(())
            }
        }
    }

    fn orchestrator(runner: RecordingRunner) -> Orchestrator<RecordingRunner> {
        Orchestrator::new(
            runner,
            ProjectLayout::new("/work/app"),
            Toolchain::with_overrides(Some("npm".into()), Some("dfx".into())),
            Style::plain(),
        )
        .with_quiet(true)
    }

    #[test]
    fn test_build_frontend_runs_in_frontend_dir() {
        let mut orch = orchestrator(RecordingRunner::default());

        orch.build_frontend().unwrap();

        let calls = &orch.runner().calls;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].to_string(), "npm run build");
        assert_eq!(calls[0].cwd, PathBuf::from("/work/app/frontend"));
    }

    #[test]
    fn test_restart_ignores_failed_stop() {
        let mut orch = orchestrator(RecordingRunner::failing(&["dfx stop"]));

        orch.restart_replica().unwrap();

        assert_eq!(
            orch.runner().commands(),
            ["dfx stop", "dfx start --background --clean"]
        );
        assert!(
            orch.runner()
                .calls
                .iter()
                .all(|c| c.cwd == PathBuf::from("/work/app"))
        );
    }

    #[test]
    fn test_restart_propagates_failed_start() {
        let mut orch = orchestrator(RecordingRunner::failing(&["dfx start --background --clean"]));

        let err = orch.restart_replica().unwrap_err();

        assert!(matches!(err, ProcessError::Failed { .. }));
    }

    #[test]
    fn test_restart_and_deploy_order() {
        let mut orch = orchestrator(RecordingRunner::default());

        orch.restart_and_deploy().unwrap();

        assert_eq!(
            orch.runner().commands(),
            ["dfx stop", "dfx start --background --clean", "dfx deploy"]
        );
    }

    #[test]
    fn test_rebuild_runs_steps_in_order() {
        let mut orch = orchestrator(RecordingRunner::default());

        orch.rebuild().unwrap();

        assert_eq!(
            orch.runner().commands(),
            [
                "dfx stop",
                "dfx start --background --clean",
                "dfx deploy",
                "npm run build"
            ]
        );
    }

    #[test]
    fn test_rebuild_stops_after_failed_deploy() {
        let mut orch = orchestrator(RecordingRunner::failing(&["dfx deploy"]));

        assert!(orch.rebuild().is_err());
        assert_eq!(
            orch.runner().commands(),
            ["dfx stop", "dfx start --background --clean", "dfx deploy"]
        );
    }

    #[test]
    fn test_rebuild_stops_after_failed_start() {
        let mut orch = orchestrator(RecordingRunner::failing(&["dfx start --background --clean"]));

        assert!(orch.rebuild().is_err());
        assert_eq!(
            orch.runner().commands(),
            ["dfx stop", "dfx start --background --clean"]
        );
    }

    #[test]
    fn test_deploy_failure_is_returned() {
        let mut orch = orchestrator(RecordingRunner::failing(&["dfx deploy"]));

        let err = orch.deploy_backend().unwrap_err();

        assert_eq!(err.exit_code(), 1);
        assert_eq!(orch.runner().commands(), ["dfx deploy"]);
    }
}
