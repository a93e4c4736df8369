//! Run configuration resolved once at process start.
//!
//! `AppPaths` pins every on-disk location to a single root directory so that
//! loaders never consult the working directory on their own.

use std::path::{Path, PathBuf};

/// Directory holding user-provided documents, relative to the root
const USER_DATA_DIR: &str = "UserData";
/// Extension of interface and package list documents
pub const DOCUMENT_EXTENSION: &str = "json";
/// File name of the run log inside the logs directory
pub const LOG_FILE_NAME: &str = "pkgfront.log";

/// On-disk layout rooted at the application folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    root: PathBuf,
}

impl AppPaths {
    /// Build the layout for `root`, made absolute against the current directory
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref();
        let root = if root.is_absolute() {
            root.to_path_buf()
        } else {
            std::env::current_dir()?.join(root)
        };
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `UserData/interfaces`
    pub fn interfaces_dir(&self) -> PathBuf {
        self.root.join(USER_DATA_DIR).join("interfaces")
    }

    /// `UserData/packages_lists`
    pub fn package_lists_dir(&self) -> PathBuf {
        self.root.join(USER_DATA_DIR).join("packages_lists")
    }

    /// `UserData/logs`
    pub fn logs_dir(&self) -> PathBuf {
        self.root.join(USER_DATA_DIR).join("logs")
    }

    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join(LOG_FILE_NAME)
    }

    /// Document path for interface `name`
    pub fn interface_file(&self, name: &str) -> PathBuf {
        self.interfaces_dir()
            .join(format!("{name}.{DOCUMENT_EXTENSION}"))
    }

    /// Document path for the named package list
    pub fn package_list_file(&self, name: &str) -> PathBuf {
        self.package_lists_dir()
            .join(format!("{name}.{DOCUMENT_EXTENSION}"))
    }
}

/// Names (file stems) of the documents in `dir`, sorted.
///
/// Only regular `.json` files count; symlinks and subdirectories are skipped.
pub fn document_names(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(DOCUMENT_EXTENSION) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            names.push(stem.to_string());
        }
    }

    names.sort();
    Ok(names)
}

/// Switches that shape a single install/remove run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Skip the `exists` probe (identity filter)
    pub ignore_exists_check: bool,
    /// Skip the `installed` probe (identity filter)
    pub ignore_installed_check: bool,
    /// Log the final command instead of running it
    pub dry_run: bool,
    /// Answer the confirmation prompt with yes
    pub assume_yes: bool,
}

/// Expand a leading `~` and `$VAR`/`${VAR}` references, then make the path absolute.
///
/// Unknown variables are left untouched, matching shell `expanduser`/`expandvars`.
pub fn expand_path(raw: &str) -> PathBuf {
    let expanded = expand_vars(raw);

    let path = match expanded.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => match dirs::home_dir() {
            Some(home) => home.join(rest.trim_start_matches('/')),
            None => PathBuf::from(&expanded),
        },
        _ => PathBuf::from(&expanded),
    };

    if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&path))
            .unwrap_or(path)
    }
}

fn expand_vars(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => ("", 0),
            }
        } else {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..end], end)
        };

        match std::env::var(name) {
            Ok(value) if !name.is_empty() => out.push_str(&value),
            _ => out.push_str(&rest[pos..pos + 1 + consumed]),
        }
        rest = &after[consumed..];
    }

    out.push_str(rest);
    out
}
