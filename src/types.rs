//! Type-safe action types for pkgfront
//!
//! Interface documents are keyed by action name. These enums replace the
//! stringly-typed keys with exhaustive matching.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Every action an interface document must define a command for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    /// Probe: is the package available in the software sources
    Exists,
    /// Probe: is the package present on this system
    Installed,
    /// Batched install of the filtered packages
    Install,
    /// Batched removal of the filtered packages
    Remove,
}

/// Per-package probes run by the checker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum CheckKind {
    Exists,
    Installed,
}

impl CheckKind {
    /// The interface action that provides this probe's command
    pub fn action(self) -> Action {
        match self {
            Self::Exists => Action::Exists,
            Self::Installed => Action::Installed,
        }
    }
}

/// Batched operations requested from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    Install,
    Remove,
}

impl Operation {
    /// The interface action that provides this operation's command
    pub fn action(self) -> Action {
        match self {
            Self::Install => Action::Install,
            Self::Remove => Action::Remove,
        }
    }

    /// Progress verb logged right before the command runs
    pub fn verb(self) -> &'static str {
        match self {
            Self::Install => "Installing...",
            Self::Remove => "Removing...",
        }
    }

    /// Noun used in the confirmation prompt and cancellation message
    pub fn noun(self) -> &'static str {
        match self {
            Self::Install => "installation",
            Self::Remove => "removal",
        }
    }
}
