//! Package list loading.
//!
//! Lists are JSON documents of the form `{"packages": ["vim", "git"]}`, found
//! by name under `UserData/packages_lists/` or by path anywhere on disk. One
//! broken list never stops the others from loading: its error is recorded and
//! the loader moves on.

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{AppPaths, expand_path};

/// The deduplicated set of requested package names
pub type PackageSet = BTreeSet<String>;

/// Raw package list document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageListDocument {
    pub packages: Vec<String>,
}

impl PackageListDocument {
    /// Parse and validate a document from JSON text
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }
}

/// Where the requested packages come from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageSources {
    /// Names of documents under `UserData/packages_lists`
    pub relative: Vec<String>,
    /// Paths to documents anywhere (`~` and `$VAR` are expanded)
    pub absolute: Vec<String>,
}

impl PackageSources {
    pub fn is_empty(&self) -> bool {
        self.relative.is_empty() && self.absolute.is_empty()
    }

    /// Resolve every source to a document path, dropping repeated references
    pub fn resolve(&self, paths: &AppPaths) -> Vec<PathBuf> {
        let named = self.relative.iter().map(|n| paths.package_list_file(n));
        let files = self.absolute.iter().map(|p| expand_path(p));

        let mut seen = HashSet::new();
        named
            .chain(files)
            .filter(|path| seen.insert(path.clone()))
            .collect()
    }
}

/// Result of loading every source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedPackages {
    pub packages: PackageSet,
    /// One entry per source that failed to load
    pub errors: Vec<String>,
}

/// Load and merge every source into a single package set.
pub fn load_packages(paths: &AppPaths, sources: &PackageSources) -> LoadedPackages {
    let mut loaded = LoadedPackages::default();

    for file in sources.resolve(paths) {
        match load_document(&file) {
            Ok(document) => {
                tracing::debug!(
                    "Loaded {} package(s) from {}",
                    document.packages.len(),
                    file.display()
                );
                loaded.packages.extend(document.packages);
            }
            Err(message) => {
                tracing::warn!("{}", message);
                loaded.errors.push(message);
            }
        }
    }

    loaded
}

fn load_document(file: &Path) -> Result<PackageListDocument, String> {
    let content = fs::read_to_string(file)
        .map_err(|e| format!("Failed to read package list {}: {}", file.display(), e))?;

    PackageListDocument::from_json(&content).map_err(|e| {
        format!(
            "Invalid package list\nFile: {}\nData key: packages\n{}",
            file.display(),
            e
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_list(paths: &AppPaths, name: &str, content: &str) {
        fs::create_dir_all(paths.package_lists_dir()).unwrap();
        fs::write(paths.package_list_file(name), content).unwrap();
    }

    #[test]
    fn test_document_requires_packages_key() {
        assert!(PackageListDocument::from_json("{}").is_err());
        assert!(PackageListDocument::from_json(r#"{"packages": ["a"], "extra": 1}"#).is_err());
        assert!(PackageListDocument::from_json(r#"{"packages": ["a", 2]}"#).is_err());
        assert_eq!(
            PackageListDocument::from_json(r#"{"packages": []}"#).unwrap(),
            PackageListDocument::default()
        );
    }

    #[test]
    fn test_duplicate_references_resolve_once() {
        let paths = AppPaths::new("/srv/app").unwrap();
        let sources = PackageSources {
            relative: vec!["base".into(), "base".into()],
            absolute: vec!["/srv/app/UserData/packages_lists/base.json".into()],
        };
        assert_eq!(sources.resolve(&paths).len(), 1);
    }

    #[test]
    fn test_packages_deduplicated_across_lists() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AppPaths::new(dir.path()).unwrap();
        write_list(&paths, "one", r#"{"packages": ["vim", "git"]}"#);
        write_list(&paths, "two", r#"{"packages": ["git", "curl", "vim"]}"#);

        let loaded = load_packages(
            &paths,
            &PackageSources {
                relative: vec!["one".into(), "two".into()],
                absolute: vec![],
            },
        );

        assert!(loaded.errors.is_empty());
        let names: Vec<&str> = loaded.packages.iter().map(String::as_str).collect();
        assert_eq!(names, ["curl", "git", "vim"]);
    }

    #[test]
    fn test_bad_list_does_not_stop_others() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AppPaths::new(dir.path()).unwrap();
        write_list(&paths, "good", r#"{"packages": ["htop"]}"#);
        write_list(&paths, "malformed", r#"{"packages": ["#);

        let loaded = load_packages(
            &paths,
            &PackageSources {
                relative: vec!["malformed".into(), "missing".into(), "good".into()],
                absolute: vec![],
            },
        );

        assert_eq!(loaded.errors.len(), 2);
        assert!(loaded.packages.contains("htop"));
        assert_eq!(loaded.packages.len(), 1);
    }

    #[test]
    fn test_absolute_list() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AppPaths::new(dir.path()).unwrap();
        let file = dir.path().join("elsewhere.json");
        fs::write(&file, r#"{"packages": ["tmux"]}"#).unwrap();

        let loaded = load_packages(
            &paths,
            &PackageSources {
                relative: vec![],
                absolute: vec![file.to_string_lossy().into_owned()],
            },
        );

        assert!(loaded.errors.is_empty());
        assert!(loaded.packages.contains("tmux"));
    }
}
