//! The install/remove pipeline: load, filter, report, execute.

use crate::checker::{CheckResults, PackageChecker};
use crate::config::{AppPaths, RunOptions};
use crate::error::{PkgFrontError, Result};
use crate::executor::{ExecutionOutcome, Executor};
use crate::filter::filter_packages;
use crate::interface::Interface;
use crate::logging::LogSink;
use crate::package_list::{PackageSet, PackageSources, load_packages};
use crate::process_guard::CancelToken;
use crate::prompt::Prompt;
use crate::runner::CommandRunner;
use crate::types::Operation;

/// External collaborators of a run
pub struct RunContext<'a> {
    pub runner: &'a dyn CommandRunner,
    pub prompt: &'a dyn Prompt,
    pub sink: &'a dyn LogSink,
    pub cancel: &'a CancelToken,
}

/// Requested packages plus the interface that will handle them
#[derive(Debug, Clone)]
pub struct PackageManager {
    interface: Interface,
    packages: PackageSet,
    load_errors: Vec<String>,
    options: RunOptions,
}

/// Everything a finished run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub results: CheckResults,
    pub pkgs_to_handle: PackageSet,
    pub outcome: ExecutionOutcome,
}

impl PackageManager {
    /// Load the interface and every package list.
    ///
    /// A broken interface is fatal. Broken package lists are recorded and
    /// reported with the check errors.
    pub fn load(
        paths: &AppPaths,
        interface_name: &str,
        sources: &PackageSources,
        options: RunOptions,
    ) -> Result<Self> {
        if sources.is_empty() {
            return Err(PkgFrontError::config("at least one package list is required"));
        }

        let interface = Interface::load(paths, interface_name)?;
        tracing::debug!("Interface {} loaded", interface.name());

        let loaded = load_packages(paths, sources);
        tracing::info!(
            "{} unique package(s) requested from {} source(s)",
            loaded.packages.len(),
            sources.relative.len() + sources.absolute.len()
        );

        Ok(Self::new(interface, loaded.packages, loaded.errors, options))
    }

    pub fn new(
        interface: Interface,
        packages: PackageSet,
        load_errors: Vec<String>,
        options: RunOptions,
    ) -> Self {
        Self {
            interface,
            packages,
            load_errors,
            options,
        }
    }

    pub fn packages(&self) -> &PackageSet {
        &self.packages
    }

    pub fn interface(&self) -> &Interface {
        &self.interface
    }

    /// Filter, report and execute `operation`.
    ///
    /// An interrupt during filtering aborts before anything is reported.
    pub fn manage(&self, operation: Operation, ctx: &RunContext<'_>) -> Result<RunReport> {
        let mut checker = PackageChecker::new(&self.interface, ctx.runner, ctx.cancel);
        checker.extend_errors(self.load_errors.iter().cloned());

        let pkgs_to_handle =
            filter_packages(&mut checker, ctx.sink, &self.packages, operation, &self.options)?;
        let results = checker.into_results();

        crate::report::report(ctx.sink, operation, &self.packages, &results, &pkgs_to_handle);

        if ctx.cancel.is_cancelled() {
            return Err(PkgFrontError::Interrupted);
        }

        let executor = Executor {
            runner: ctx.runner,
            prompt: ctx.prompt,
            sink: ctx.sink,
            cancel: ctx.cancel,
        };
        let outcome = executor.execute(operation, &self.interface, &pkgs_to_handle, &self.options)?;

        Ok(RunReport {
            results,
            pkgs_to_handle,
            outcome,
        })
    }
}
