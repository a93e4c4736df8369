//! Operator confirmation before the batched command runs.
//!
//! The executor only sees the `Prompt` trait, so the interactive stdin prompt
//! can be replaced by a scripted prompt in tests. `--yes` is handled by the
//! executor and never reaches a prompt.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crate::error::{PkgFrontError, Result};
use crate::process_guard::CancelToken;

/// Interval between cancellation checks while waiting for an answer
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Yes/no question with a stated default
pub trait Prompt {
    /// Ask the operator to confirm.
    ///
    /// Empty or unrecognized input selects `default`.
    fn confirm(&self, message: &str, default: bool) -> Result<bool>;
}

/// Prompt that reads the answer from stdin.
///
/// The read runs on a helper thread. Signal handlers restart the blocking
/// read, so the prompt itself watches the token and gives up on cancel.
#[derive(Debug, Clone)]
pub struct StdinPrompt {
    cancel: CancelToken,
}

impl StdinPrompt {
    pub fn new(cancel: CancelToken) -> Self {
        Self { cancel }
    }
}

impl Prompt for StdinPrompt {
    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        if self.cancel.is_cancelled() {
            return Err(PkgFrontError::Interrupted);
        }

        let suffix = if default { "[Y/n]" } else { "[y/N]" };
        print!("{} {}: ", message, suffix);
        io::stdout().flush()?;

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut input = String::new();
            let read = io::stdin().lock().read_line(&mut input).map(|n| (n, input));
            let _ = tx.send(read);
        });

        let input = await_line(&rx, &self.cancel).inspect_err(|e| {
            if e.is_interrupted() {
                println!();
            }
        })?;
        Ok(parse_answer(&input, default))
    }
}

/// Wait for the reader thread's line, bailing out once `cancel` is set
fn await_line(
    lines: &Receiver<io::Result<(usize, String)>>,
    cancel: &CancelToken,
) -> Result<String> {
    loop {
        if cancel.is_cancelled() {
            return Err(PkgFrontError::Interrupted);
        }
        match lines.recv_timeout(POLL_INTERVAL) {
            Ok(read) => {
                let (count, input) = read?;
                if count == 0 {
                    return Err(PkgFrontError::prompt("standard input closed"));
                }
                return Ok(input);
            }
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                return Err(PkgFrontError::prompt("standard input reader stopped"));
            }
        }
    }
}

fn parse_answer(input: &str, default: bool) -> bool {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default,
    }
}
