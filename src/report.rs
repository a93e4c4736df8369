//! Summary report shown before the batched command.
//!
//! The terminal gets a short summary with counts. The log file gets every
//! list in full, sorted, so the run can be audited afterwards.

use std::path::Path;

use crate::checker::{CheckResults, SkipReason};
use crate::logging::LogSink;
use crate::package_list::PackageSet;
use crate::types::{CheckKind, Operation};

/// Counts interpolated into the summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary<'a> {
    pub operation: Operation,
    pub requested: usize,
    pub results: &'a CheckResults,
    pub pkgs_to_handle: usize,
    pub log_file: &'a Path,
}

impl Summary<'_> {
    /// Render the summary. Lines for a skipped check kind are blank.
    pub fn render(&self) -> String {
        let results = self.results;

        let (non_existent, existent) = if results.skip_reason(CheckKind::Exists).is_none() {
            (
                format!(
                    "- {} packages are NOT available on the software sources.\n",
                    results.non_existent.len()
                ),
                format!(
                    "- {} packages are available on the software sources.\n",
                    results.existent.len()
                ),
            )
        } else {
            (String::new(), String::new())
        };

        let (not_installed, installed) = if results.skip_reason(CheckKind::Installed).is_none() {
            (
                format!("- {} packages are NOT installed.\n", results.not_installed.len()),
                format!("- {} packages are already installed.\n", results.installed.len()),
            )
        } else {
            (String::new(), String::new())
        };

        let chosen = match self.operation {
            Operation::Install => "installed",
            Operation::Remove => "removed",
        };

        format!(
            "Summary:\n\
             Of the {requested} packages that you are trying to {operation}.\n\
             \n\
             {non_existent}{existent}{not_installed}{installed}\
             - {errors} errors were raised trying to gather the displayed information.\n\
             \n\
             {pkgs_to_handle} packages were chosen to be {chosen}.\n\
             \n\
             More details can be found on the log file:\n\
             {log_file}\n",
            requested = self.requested,
            operation = self.operation,
            errors = results.errors.len(),
            pkgs_to_handle = self.pkgs_to_handle,
            log_file = self.log_file.display(),
        )
    }
}

/// Log the full lists to the file and the summary to the terminal.
///
/// The summary is a warning when any error was recorded.
pub fn report(
    sink: &dyn LogSink,
    operation: Operation,
    packages: &PackageSet,
    results: &CheckResults,
    pkgs_to_handle: &PackageSet,
) {
    log_details(sink, "Packages processed:", packages.iter());

    if let Some(reason) = results.skip_reason(CheckKind::Exists) {
        sink.detail(&skip_message("existence", reason));
    } else {
        log_details(
            sink,
            "Packages non existent on software sources:",
            results.non_existent.iter(),
        );
        log_details(
            sink,
            "Packages available on software sources:",
            results.existent.iter(),
        );
    }

    if let Some(reason) = results.skip_reason(CheckKind::Installed) {
        sink.detail(&skip_message("installed state", reason));
    } else {
        log_details(sink, "Packages NOT installed:", results.not_installed.iter());
        log_details(sink, "Packages installed:", results.installed.iter());
    }

    log_details(
        sink,
        "Errors raised while gathering package information:",
        results.errors.iter(),
    );
    log_details(sink, "Packages to handle:", pkgs_to_handle.iter());

    let summary = Summary {
        operation,
        requested: packages.len(),
        results,
        pkgs_to_handle: pkgs_to_handle.len(),
        log_file: sink.log_file(),
    }
    .render();

    if results.errors.is_empty() {
        sink.info(&summary);
    } else {
        sink.warn(&summary);
    }
}

fn skip_message(subject: &str, reason: SkipReason) -> String {
    match reason {
        SkipReason::Ignored => format!("Check for package {} ignored", subject),
        SkipReason::Unsupported => {
            format!("Check for package {} not supported by the interface", subject)
        }
        SkipReason::NotApplicable => format!("Check for package {} not needed", subject),
    }
}

/// One sorted entry per line, `None` for an empty list
fn log_details<'a>(sink: &dyn LogSink, title: &str, items: impl Iterator<Item = &'a String>) {
    let mut items: Vec<&str> = items.map(String::as_str).collect();
    items.sort_unstable();

    let body = if items.is_empty() {
        "None".to_string()
    } else {
        items.join("\n")
    };
    sink.detail(&format!("{}\n{}", title, body));
}
