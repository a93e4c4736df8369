//! Shared fixtures: a scripted package system, a recording log sink and a
//! prompt with a fixed answer.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use pkgfront::{
    AppPaths, CancelToken, CheckOutcome, CommandOutput, CommandRunner, Interface,
    InterfaceDocument, LogSink, PkgFrontError, Prompt,
};

/// Fake package system answering `exists <pkg>` / `installed <pkg>` probes
#[derive(Default)]
pub struct FakeSystem {
    pub available: BTreeSet<String>,
    pub installed: BTreeSet<String>,
    /// Packages whose probes cannot run
    pub broken: BTreeSet<String>,
    pub checks: RefCell<Vec<Vec<String>>>,
    pub interactive: RefCell<Vec<Vec<String>>>,
    pub exit_code: Cell<i32>,
}

impl FakeSystem {
    pub fn new(available: &[&str], installed: &[&str]) -> Self {
        Self {
            available: available.iter().map(|s| s.to_string()).collect(),
            installed: installed.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }
}

impl CommandRunner for FakeSystem {
    fn run_check(&self, argv: &[String], cancel: &CancelToken) -> Result<CheckOutcome, PkgFrontError> {
        if cancel.is_cancelled() {
            return Err(PkgFrontError::Interrupted);
        }
        self.checks.borrow_mut().push(argv.to_vec());

        let package = argv.last().cloned().unwrap_or_default();
        if self.broken.contains(&package) {
            return Ok(CheckOutcome::Errored(format!("probe for {} crashed", package)));
        }

        let set = if argv[0].ends_with("exists") {
            &self.available
        } else {
            &self.installed
        };
        Ok(if set.contains(&package) {
            CheckOutcome::Passed
        } else {
            CheckOutcome::Failed(1)
        })
    }

    fn run_interactive(&self, argv: &[String]) -> Result<CommandOutput, PkgFrontError> {
        self.interactive.borrow_mut().push(argv.to_vec());
        let code = self.exit_code.get();
        Ok(CommandOutput {
            exit_code: Some(code),
            success: code == 0,
        })
    }
}

/// Log sink that keeps every message
#[derive(Default)]
pub struct RecordingSink {
    pub info: RefCell<Vec<String>>,
    pub warn: RefCell<Vec<String>>,
    pub detail: RefCell<Vec<String>>,
    pub log_file: PathBuf,
}

impl RecordingSink {
    pub fn terminal_text(&self) -> String {
        let mut all = self.info.borrow().clone();
        all.extend(self.warn.borrow().iter().cloned());
        all.join("\n")
    }
}

impl LogSink for RecordingSink {
    fn info(&self, message: &str) {
        self.info.borrow_mut().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warn.borrow_mut().push(message.to_string());
    }

    fn detail(&self, message: &str) {
        self.detail.borrow_mut().push(message.to_string());
    }

    fn log_file(&self) -> &Path {
        &self.log_file
    }
}

/// Prompt returning a fixed answer and counting questions
pub struct FixedPrompt {
    pub answer: bool,
    pub asked: Cell<usize>,
}

impl FixedPrompt {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: Cell::new(0),
        }
    }
}

impl Prompt for FixedPrompt {
    fn confirm(&self, _message: &str, default: bool) -> Result<bool, PkgFrontError> {
        assert!(!default, "Confirmation must default to no");
        self.asked.set(self.asked.get() + 1);
        Ok(self.answer)
    }
}

/// Interface whose probe commands are named `exists` and `installed`
pub const FAKE_INTERFACE: &str = r#"{
    "exists": { "cmd": "exists" },
    "installed": { "cmd": "installed" },
    "install": { "cmd": "pm", "cmd_args": ["install"], "elevator": "sudo" },
    "remove": { "cmd": "pm", "cmd_args": ["remove"], "elevator": "sudo" }
}"#;

/// `FAKE_INTERFACE` with every executable resolved to its bare name
pub fn fake_interface() -> Interface {
    let document = InterfaceDocument::from_json(FAKE_INTERFACE).expect("valid interface");
    Interface::resolve("fake", &document, |exe| Some(PathBuf::from(exe)))
}

/// Create a root folder with the given interfaces and package lists
pub fn app_root(interfaces: &[(&str, &str)], lists: &[(&str, &str)]) -> (tempfile::TempDir, AppPaths) {
    let dir = tempfile::tempdir().expect("tempdir");
    let paths = AppPaths::new(dir.path()).expect("paths");

    fs::create_dir_all(paths.interfaces_dir()).unwrap();
    fs::create_dir_all(paths.package_lists_dir()).unwrap();
    for (name, content) in interfaces {
        fs::write(paths.interface_file(name), content).unwrap();
    }
    for (name, content) in lists {
        fs::write(paths.package_list_file(name), content).unwrap();
    }

    (dir, paths)
}

pub fn set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}
