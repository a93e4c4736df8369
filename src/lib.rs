//! pkgfront library
//!
//! Reconciles requested package lists against a pluggable package manager
//! interface and runs one batched install/remove command for what is left.

pub mod checker;
pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod filter;
pub mod interface;
pub mod logging;
pub mod manager;
pub mod package_list;
pub mod process_guard;
pub mod prompt;
pub mod report;
pub mod runner;
pub mod types;

// Re-export main types for convenience
pub use checker::{CheckResults, PackageChecker, SkipReason};
pub use config::{AppPaths, RunOptions};
pub use error::{PkgFrontError, Result};
pub use executor::{ExecutionOutcome, Executor};
pub use filter::filter_packages;
pub use interface::{CommandSpec, Interface, InterfaceDocument};
pub use logging::{LogSink, TracingSink};
pub use manager::{PackageManager, RunContext, RunReport};
pub use package_list::{PackageListDocument, PackageSet, PackageSources, load_packages};
pub use process_guard::CancelToken;
pub use prompt::{Prompt, StdinPrompt};
pub use runner::{CheckOutcome, CommandOutput, CommandRunner, ProcessRunner};
pub use types::{Action, CheckKind, Operation};
