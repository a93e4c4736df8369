//! Final batched install/remove invocation.
//!
//! The whole filtered set goes to the backend in a single command:
//! `[elevator, elevator_args.., cmd, cmd_args.., pkgs_to_handle..]`. Nothing
//! runs without an explicit yes from the operator (or `--yes`).

use crate::config::RunOptions;
use crate::error::{PkgFrontError, Result};
use crate::interface::Interface;
use crate::logging::LogSink;
use crate::package_list::PackageSet;
use crate::process_guard::CancelToken;
use crate::prompt::Prompt;
use crate::runner::CommandRunner;
use crate::types::Operation;

/// What the executor ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Empty package set or unsupported action: nothing ran
    NothingToHandle,
    /// `--dry-run`: the command was logged only
    DryRun(Vec<String>),
    /// Operator answered no
    Declined,
    /// The batched command ran and exited successfully
    Completed,
}

/// Collaborators the executor needs besides the data it acts on
pub struct Executor<'a> {
    pub runner: &'a dyn CommandRunner,
    pub prompt: &'a dyn Prompt,
    pub sink: &'a dyn LogSink,
    pub cancel: &'a CancelToken,
}

impl Executor<'_> {
    /// Build, confirm and run the batched command for `operation`.
    pub fn execute(
        &self,
        operation: Operation,
        interface: &Interface,
        pkgs_to_handle: &PackageSet,
        options: &RunOptions,
    ) -> Result<ExecutionOutcome> {
        let Some(command) = build_command(interface, operation, pkgs_to_handle) else {
            self.sink.info("No packages to handle");
            return Ok(ExecutionOutcome::NothingToHandle);
        };

        self.sink
            .info(&format!("Command that will be executed:\n{}", command.join(" ")));

        if options.dry_run {
            self.sink.info("Dry run: command not executed");
            return Ok(ExecutionOutcome::DryRun(command));
        }

        let question = format!("Proceed with package {}?", operation.noun());
        let confirmed = options.assume_yes || self.prompt.confirm(&question, false)?;

        // A signal landing after the answer was read only sets the token
        if self.cancel.is_cancelled() {
            return Err(PkgFrontError::Interrupted);
        }

        if !confirmed {
            self.sink
                .info(&format!("{} canceled", capitalize(operation.noun())));
            return Ok(ExecutionOutcome::Declined);
        }

        self.sink.info(operation.verb());
        let output = self.runner.run_interactive(&command)?;
        output.ensure_success(&format!("Package {}", operation.noun()))?;

        tracing::info!("Package {} finished", operation.noun());
        Ok(ExecutionOutcome::Completed)
    }
}

/// Derived command plus every package, `None` when there is nothing to run
pub fn build_command(
    interface: &Interface,
    operation: Operation,
    pkgs_to_handle: &PackageSet,
) -> Option<Vec<String>> {
    if pkgs_to_handle.is_empty() {
        return None;
    }

    let base = interface.command(operation.action())?;
    let mut command = base.to_vec();
    command.extend(pkgs_to_handle.iter().cloned());
    Some(command)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
