//! pkgfront - Main entry point
//!
//! Parses the command line, sets up logging and signal handling, then hands
//! install/remove requests to the reconciliation pipeline.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::CommandFactory;
use tracing::{debug, error, info};

use pkgfront::cli::{Cli, Commands, PackageArgs};
use pkgfront::config::{AppPaths, document_names};
use pkgfront::logging::{TracingSink, init_logging};
use pkgfront::process_guard::{CancelToken, init_signal_handlers};
use pkgfront::{
    ExecutionOutcome, Operation, PackageManager, PkgFrontError, ProcessRunner, RunContext,
    StdinPrompt,
};

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let paths = match AppPaths::new(&cli.root) {
        Ok(paths) => paths,
        Err(e) => {
            eprintln!("✗ Cannot resolve root folder {}: {}", cli.root.display(), e);
            return ExitCode::from(2);
        }
    };

    let result = match &cli.command {
        Commands::Install(args) => {
            return manage_packages(&paths, args, Operation::Install, cli.dry_run);
        }
        Commands::Remove(args) => {
            return manage_packages(&paths, args, Operation::Remove, cli.dry_run);
        }
        Commands::ListInterfaces => print_names(&paths.interfaces_dir()),
        Commands::ListPackageLists => print_names(&paths.package_lists_dir()),
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(*shell, &mut command, "pkgfront", &mut io::stdout());
            Ok(())
        }
        Commands::Manpage => render_manpage(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✗ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run the install/remove pipeline with logging and signal handling in place
fn manage_packages(
    paths: &AppPaths,
    args: &PackageArgs,
    operation: Operation,
    dry_run: bool,
) -> ExitCode {
    let _guard = match init_logging(paths) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("✗ {:#}", e);
            return ExitCode::from(2);
        }
    };
    info!("pkgfront {} starting", env!("CARGO_PKG_VERSION"));

    let cancel = CancelToken::new();
    if let Err(e) = init_signal_handlers(&cancel) {
        tracing::warn!("Failed to initialize signal handlers: {}", e);
    }
    debug!("Signal handlers initialized");

    let sink = TracingSink::new(paths.log_file());
    let code = match run(paths, args, operation, dry_run, &sink, &cancel) {
        Ok(outcome) => {
            debug!("Run finished: {:?}", outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    };

    eprintln!("Log file: {}", paths.log_file().display());
    code
}

fn run(
    paths: &AppPaths,
    args: &PackageArgs,
    operation: Operation,
    dry_run: bool,
    sink: &TracingSink,
    cancel: &CancelToken,
) -> Result<ExecutionOutcome, PkgFrontError> {
    let manager = PackageManager::load(
        paths,
        &args.interface,
        &args.sources(),
        args.options(dry_run),
    )?;

    let runner = ProcessRunner;
    let prompt = StdinPrompt::new(cancel.clone());
    let ctx = RunContext {
        runner: &runner,
        prompt: &prompt,
        sink,
        cancel,
    };

    Ok(manager.manage(operation, &ctx)?.outcome)
}

fn print_names(dir: &std::path::Path) -> Result<()> {
    let names =
        document_names(dir).with_context(|| format!("Failed to list {}", dir.display()))?;

    let mut stdout = io::stdout().lock();
    for name in names {
        writeln!(stdout, "{}", name)?;
    }
    Ok(())
}

fn render_manpage() -> Result<()> {
    let man = clap_mangen::Man::new(Cli::command());
    man.render(&mut io::stdout())
        .context("Failed to render manual page")?;
    Ok(())
}
