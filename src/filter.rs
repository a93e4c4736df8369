//! Reconciliation filter: which requested packages are worth acting on.
//!
//! - install: drop packages the sources do not have, then drop packages that
//!   are already installed. Only packages that survive the first probe are
//!   probed again.
//! - remove: drop packages that are not installed. Existence in the sources
//!   does not matter for removal and is never probed.
//!
//! A disabled check logs a warning and lets every package through.

use crate::checker::{PackageChecker, SkipReason};
use crate::config::RunOptions;
use crate::error::Result;
use crate::logging::LogSink;
use crate::package_list::PackageSet;
use crate::types::{CheckKind, Operation};

const EXISTS_IGNORED: &str = "Check for package existence ignored";
const INSTALLED_IGNORED: &str = "Check for package installed state ignored";

/// Compute the packages `operation` should act on.
///
/// Returns `Err(PkgFrontError::Interrupted)` as soon as the operator cancels;
/// no partial result is produced.
pub fn filter_packages(
    checker: &mut PackageChecker<'_>,
    sink: &dyn LogSink,
    packages: &PackageSet,
    operation: Operation,
    options: &RunOptions,
) -> Result<PackageSet> {
    let mut pkgs_to_handle = packages.clone();

    if options.ignore_exists_check {
        sink.warn(EXISTS_IGNORED);
        checker.skip(CheckKind::Exists, SkipReason::Ignored);
    } else if operation == Operation::Install {
        tracing::info!("Filtering non existent packages...");
        pkgs_to_handle = retain_checked(checker, pkgs_to_handle, CheckKind::Exists, true)?;
    } else {
        checker.skip(CheckKind::Exists, SkipReason::NotApplicable);
    }

    if options.ignore_installed_check {
        sink.warn(INSTALLED_IGNORED);
        checker.skip(CheckKind::Installed, SkipReason::Ignored);
    } else {
        tracing::info!("Filtering packages by installed state...");
        // install keeps packages that are NOT installed, remove keeps installed ones
        let keep_when = operation == Operation::Remove;
        pkgs_to_handle = retain_checked(checker, pkgs_to_handle, CheckKind::Installed, keep_when)?;
    }

    Ok(pkgs_to_handle)
}

/// Keep the packages whose `kind` check result equals `keep_when`
fn retain_checked(
    checker: &mut PackageChecker<'_>,
    packages: PackageSet,
    kind: CheckKind,
    keep_when: bool,
) -> Result<PackageSet> {
    if !checker.supports(kind) {
        tracing::warn!("Interface has no '{}' command, check skipped", kind);
        checker.skip(kind, SkipReason::Unsupported);
        return Ok(packages);
    }

    let mut kept = PackageSet::new();
    for package in packages {
        if checker.check(&package, kind)? == keep_when {
            kept.insert(package);
        }
    }
    Ok(kept)
}
