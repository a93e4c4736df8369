//! Per-package existence and installed-state probes.
//!
//! Every probe lands the package in exactly one bucket of its pair. Probes that
//! could not run are also recorded in `errors` and count as a failed check: when
//! in doubt, pkgfront does not touch the package.

use std::collections::HashMap;

use crate::error::{PkgFrontError, Result};
use crate::interface::Interface;
use crate::process_guard::CancelToken;
use crate::runner::{CheckOutcome, CommandRunner};
use crate::types::CheckKind;

/// Buckets filled by the checker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckResults {
    pub non_existent: Vec<String>,
    pub existent: Vec<String>,
    pub not_installed: Vec<String>,
    pub installed: Vec<String>,
    /// Package list load failures and probes that could not run
    pub errors: Vec<String>,
    /// Check kinds that took no part in this run
    pub skipped: HashMap<CheckKind, SkipReason>,
}

/// Why a check kind took no part in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Disabled from the command line
    Ignored,
    /// The interface has no command for it
    Unsupported,
    /// The operation never uses it (existence on remove)
    NotApplicable,
}

impl CheckResults {
    /// `None` when the check was in effect, even if no package reached it
    pub fn skip_reason(&self, kind: CheckKind) -> Option<SkipReason> {
        self.skipped.get(&kind).copied()
    }

    fn record(&mut self, package: &str, kind: CheckKind, passed: bool) {
        let bucket = match (kind, passed) {
            (CheckKind::Exists, true) => &mut self.existent,
            (CheckKind::Exists, false) => &mut self.non_existent,
            (CheckKind::Installed, true) => &mut self.installed,
            (CheckKind::Installed, false) => &mut self.not_installed,
        };
        bucket.push(package.to_string());
    }
}

/// Runs interface probes and accumulates their results
pub struct PackageChecker<'a> {
    interface: &'a Interface,
    runner: &'a dyn CommandRunner,
    cancel: &'a CancelToken,
    results: CheckResults,
}

impl<'a> PackageChecker<'a> {
    pub fn new(
        interface: &'a Interface,
        runner: &'a dyn CommandRunner,
        cancel: &'a CancelToken,
    ) -> Self {
        Self {
            interface,
            runner,
            cancel,
            results: CheckResults::default(),
        }
    }

    /// Whether the interface defines a command for `kind`
    pub fn supports(&self, kind: CheckKind) -> bool {
        self.interface.supports(kind.action())
    }

    /// Probe `package` with the interface's `kind` command.
    ///
    /// Returns whether the check passed. An interface without a command for
    /// `kind` passes every package without recording anything. Fails only with
    /// `PkgFrontError::Interrupted`.
    pub fn check(&mut self, package: &str, kind: CheckKind) -> Result<bool> {
        if self.cancel.is_cancelled() {
            return Err(PkgFrontError::Interrupted);
        }

        let Some(command) = self.interface.command(kind.action()) else {
            return Ok(true);
        };

        let mut argv = command.to_vec();
        argv.push(package.to_string());

        let passed = match self.runner.run_check(&argv, self.cancel)? {
            CheckOutcome::Passed => true,
            CheckOutcome::Failed(code) => {
                tracing::debug!("{} check for {} exited with {}", kind, package, code);
                false
            }
            CheckOutcome::Errored(reason) => {
                tracing::debug!("{} check for {} errored: {}", kind, package, reason);
                self.results.errors.push(reason);
                false
            }
        };

        self.results.record(package, kind, passed);
        Ok(passed)
    }

    /// Mark `kind` as not taking part in this run
    pub fn skip(&mut self, kind: CheckKind, reason: SkipReason) {
        self.results.skipped.insert(kind, reason);
    }

    /// Add errors gathered before checking (package list failures)
    pub fn extend_errors(&mut self, errors: impl IntoIterator<Item = String>) {
        self.results.errors.extend(errors);
    }

    pub fn results(&self) -> &CheckResults {
        &self.results
    }

    pub fn into_results(self) -> CheckResults {
        self.results
    }
}
