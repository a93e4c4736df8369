//! Interface profiles: which backend command serves each action.
//!
//! An interface document lives at `UserData/interfaces/<name>.json` and must
//! define all four actions. Unknown keys are rejected at parse time, so a
//! document that deserializes is a document that passed schema validation.
//!
//! ```json
//! {
//!   "exists":    { "cmd": "apt-cache", "cmd_args": ["show"] },
//!   "installed": { "cmd": "dpkg", "cmd_args": ["-s"] },
//!   "install":   { "cmd": "apt-get", "cmd_args": ["install"], "elevator": "sudo" },
//!   "remove":    { "cmd": "apt-get", "cmd_args": ["remove"], "elevator": "sudo" }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::config::AppPaths;
use crate::error::{PkgFrontError, Result};
use crate::types::Action;

/// Command definition for a single action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandSpec {
    /// Name or path of the command. Empty means the action is unsupported.
    #[serde(default)]
    pub cmd: String,
    #[serde(default)]
    pub cmd_args: Vec<String>,
    /// Name or path of a privilege elevator (normally sudo)
    #[serde(default)]
    pub elevator: String,
    #[serde(default)]
    pub elevator_args: Vec<String>,
}

/// Raw interface document, one command definition per action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterfaceDocument {
    pub exists: CommandSpec,
    pub installed: CommandSpec,
    pub install: CommandSpec,
    pub remove: CommandSpec,
}

impl InterfaceDocument {
    /// Parse and validate a document from JSON text
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    pub fn spec(&self, action: Action) -> &CommandSpec {
        match action {
            Action::Exists => &self.exists,
            Action::Installed => &self.installed,
            Action::Install => &self.install,
            Action::Remove => &self.remove,
        }
    }
}

/// A loaded interface with every supported action resolved to a full argv
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    name: String,
    commands: BTreeMap<Action, Vec<String>>,
}

impl Interface {
    /// Load `UserData/interfaces/<name>.json` and resolve its executables on `PATH`.
    pub fn load(paths: &AppPaths, name: &str) -> Result<Self> {
        let file = paths.interface_file(name);
        let document = read_document(&file)?;
        Ok(Self::resolve(name, &document, |exe| which::which(exe).ok()))
    }

    /// Build the derived commands using `lookup` to locate executables.
    ///
    /// An action whose `cmd` is empty or cannot be found stays unset. An
    /// elevator that cannot be found is dropped and the command runs without it.
    pub fn resolve<F>(name: &str, document: &InterfaceDocument, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<PathBuf>,
    {
        let mut commands = BTreeMap::new();

        for action in Action::iter() {
            let spec = document.spec(action);

            let Some(cmd) = non_empty(&spec.cmd).and_then(&lookup) else {
                if spec.cmd.trim().is_empty() {
                    tracing::debug!("Interface {}: no command for '{}'", name, action);
                } else {
                    tracing::warn!(
                        "Interface {}: command '{}' for '{}' not found",
                        name,
                        spec.cmd,
                        action
                    );
                }
                continue;
            };

            let mut argv = Vec::with_capacity(
                2 + spec.elevator_args.len() + spec.cmd_args.len(),
            );

            match non_empty(&spec.elevator).map(|e| (e, lookup(e))) {
                Some((_, Some(elevator))) => {
                    argv.push(elevator.to_string_lossy().into_owned());
                    argv.extend(spec.elevator_args.iter().cloned());
                }
                Some((elevator, None)) => {
                    tracing::warn!(
                        "Interface {}: elevator '{}' for '{}' not found, running without it",
                        name,
                        elevator,
                        action
                    );
                }
                None => {}
            }

            argv.push(cmd.to_string_lossy().into_owned());
            argv.extend(spec.cmd_args.iter().cloned());

            tracing::debug!("Interface {}: '{}' -> {:?}", name, action, argv);
            commands.insert(action, argv);
        }

        Self {
            name: name.to_string(),
            commands,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Derived argv for `action`, `None` when the action is unsupported
    pub fn command(&self, action: Action) -> Option<&[String]> {
        self.commands.get(&action).map(Vec::as_slice)
    }

    pub fn supports(&self, action: Action) -> bool {
        self.commands.contains_key(&action)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

fn read_document(file: &Path) -> Result<InterfaceDocument> {
    let content = fs::read_to_string(file).map_err(|e| {
        PkgFrontError::config(format!(
            "Failed to read interface file {}: {}",
            file.display(),
            e
        ))
    })?;

    InterfaceDocument::from_json(&content).map_err(|e| {
        PkgFrontError::config(format!(
            "Invalid interface document\nFile: {}\nData key: interface\n{}",
            file.display(),
            e
        ))
    })
}
