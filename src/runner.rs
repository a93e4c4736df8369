//! Backend command execution
//!
//! All subprocesses go through a `CommandRunner`. The process-backed runner is
//! used in production; tests substitute their own implementation to script
//! probe answers and record what would have run.
//!
//! Two execution shapes exist:
//!
//! - Probes (`run_check`): stdio detached, output discarded, only the exit
//!   status matters. Interruptible through the `CancelToken`.
//! - The batched command (`run_interactive`): stdio inherited so the backend's
//!   own progress bars and prompts reach the operator.

use std::process::{Command, Stdio};
use std::time::Duration;

use crate::error::{PkgFrontError, Result};
use crate::process_guard::{CancelToken, CommandDeathPact, WaitOutcome, wait_or_cancel};

/// Time a cancelled probe gets to exit after SIGTERM
const PROBE_GRACE_PERIOD: Duration = Duration::from_secs(2);

/// Result of a single probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Exit status 0
    Passed,
    /// Clean non-zero exit
    Failed(i32),
    /// The probe could not be run or died without an exit code
    Errored(String),
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// Exit information of the batched command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code (None if terminated by signal)
    pub exit_code: Option<i32>,
    pub success: bool,
}

impl CommandOutput {
    /// Return an execution error unless the command succeeded
    pub fn ensure_success(&self, context: &str) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            let code = self.exit_code.unwrap_or(-1);
            Err(PkgFrontError::execution(format!(
                "{} failed (exit code {})",
                context, code
            )))
        }
    }
}

/// Executes argv vectors on behalf of the checker and the executor
pub trait CommandRunner {
    /// Run a probe with output suppressed.
    ///
    /// Returns `Err(PkgFrontError::Interrupted)` when `cancel` is set while the
    /// probe runs; every other failure is folded into `CheckOutcome::Errored`.
    fn run_check(&self, argv: &[String], cancel: &CancelToken) -> Result<CheckOutcome>;

    /// Run the batched command with inherited stdio and wait for it.
    fn run_interactive(&self, argv: &[String]) -> Result<CommandOutput>;
}

/// `CommandRunner` backed by real subprocesses
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run_check(&self, argv: &[String], cancel: &CancelToken) -> Result<CheckOutcome> {
        let Some((program, args)) = argv.split_first() else {
            return Ok(CheckOutcome::Errored("empty command line".to_string()));
        };

        let spawned = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .with_death_pact()
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                return Ok(CheckOutcome::Errored(format!(
                    "Failed to run '{}': {}",
                    argv.join(" "),
                    e
                )));
            }
        };

        match wait_or_cancel(&mut child, cancel, PROBE_GRACE_PERIOD) {
            Ok(WaitOutcome::Cancelled) => Err(PkgFrontError::Interrupted),
            // A probe killed by the operator's Ctrl+C lands here before the poll sees the token
            Ok(WaitOutcome::Exited(_)) if cancel.is_cancelled() => Err(PkgFrontError::Interrupted),
            Ok(WaitOutcome::Exited(status)) => Ok(match status.code() {
                Some(0) => CheckOutcome::Passed,
                Some(code) => CheckOutcome::Failed(code),
                None => CheckOutcome::Errored(format!(
                    "Command '{}' terminated by signal",
                    argv.join(" ")
                )),
            }),
            Err(e) => Ok(CheckOutcome::Errored(format!(
                "Failed waiting for '{}': {}",
                argv.join(" "),
                e
            ))),
        }
    }

    fn run_interactive(&self, argv: &[String]) -> Result<CommandOutput> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| PkgFrontError::execution("empty command line"))?;

        tracing::debug!("run_interactive: {:?}", argv);

        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| PkgFrontError::execution(format!("Failed to run {}: {}", program, e)))?;

        Ok(CommandOutput {
            exit_code: status.code(),
            success: status.success(),
        })
    }
}
