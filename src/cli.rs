use clap::{ArgGroup, Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::RunOptions;
use crate::package_list::PackageSources;

/// pkgfront - filter package lists and hand them to your package manager
#[derive(Parser, Debug)]
#[command(name = "pkgfront")]
#[command(about = "Install or remove package lists through a configurable package manager interface")]
#[command(version)]
pub struct Cli {
    /// Application folder containing UserData/interfaces and UserData/packages_lists
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Show the command that would run without running it.
    ///
    /// Existence and installed checks still execute so the preview is
    /// realistic. Only the final install/remove command is skipped.
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install the packages from the given lists
    Install(PackageArgs),
    /// Remove the packages from the given lists
    Remove(PackageArgs),
    /// Print the available interface names, one per line
    ListInterfaces,
    /// Print the available package list names, one per line
    ListPackageLists,
    /// Generate a shell completion script on stdout
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Render the manual page (roff) on stdout
    Manpage,
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("lists")
        .required(true)
        .multiple(true)
        .args(["list_relative", "list_absolute"])
))]
pub struct PackageArgs {
    /// Interface name: a file in UserData/interfaces/<NAME>.json
    #[arg(short, long, value_name = "NAME")]
    pub interface: String,

    /// Package list name: a file in UserData/packages_lists/<NAME>.json
    #[arg(short = 'l', long, value_name = "NAME")]
    pub list_relative: Vec<String>,

    /// Path to a package list file anywhere on disk
    #[arg(short = 'L', long, value_name = "PATH")]
    pub list_absolute: Vec<String>,

    /// Skip the check for package existence
    #[arg(long)]
    pub ignore_exists_check: bool,

    /// Skip the check for package installed state
    #[arg(long)]
    pub ignore_installed_check: bool,

    /// Do not ask for confirmation before running the command
    #[arg(short = 'y', long = "yes")]
    pub assume_yes: bool,
}

impl PackageArgs {
    pub fn sources(&self) -> PackageSources {
        PackageSources {
            relative: self.list_relative.clone(),
            absolute: self.list_absolute.clone(),
        }
    }

    pub fn options(&self, dry_run: bool) -> RunOptions {
        RunOptions {
            ignore_exists_check: self.ignore_exists_check,
            ignore_installed_check: self.ignore_installed_check,
            dry_run,
            assume_yes: self.assume_yes,
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
