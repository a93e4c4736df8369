//! Process lifecycle management for probe subprocesses
//!
//! Package checks spawn one short-lived child per package. This module makes
//! sure an operator interrupt stops that loop promptly and that no probe child
//! outlives pkgfront.
//!
//! # Cancellation
//! SIGINT, SIGTERM and SIGHUP set a shared `CancelToken`. The checker inspects
//! the token before each probe and while waiting on one. A second signal of the
//! same kind while the token is already set terminates the process outright.
//!
//! # Death pact
//! Probe children get `PR_SET_PDEATHSIG` so they receive SIGTERM if pkgfront
//! dies. A probe still running at cancellation gets SIGTERM, then SIGKILL once
//! the grace period runs out.

use nix::libc;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use std::process::{Child, ExitStatus};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Interval between `try_wait` polls on a running probe
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Cooperative cancellation flag shared with the signal handlers
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Route SIGINT, SIGTERM and SIGHUP into `token`.
///
/// The first signal only sets the token. A repeated signal while the token is
/// set exits with `128 + signal`.
pub fn init_signal_handlers(token: &CancelToken) -> Result<(), std::io::Error> {
    use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};
    use signal_hook::flag;

    for sig in [SIGINT, SIGTERM, SIGHUP] {
        // Order matters: the shutdown check must see the flag before it is set
        flag::register_conditional_shutdown(sig, 128 + sig, Arc::clone(&token.flag))?;
        flag::register(sig, Arc::clone(&token.flag))?;
    }

    Ok(())
}

/// Extension trait for std::process::Command to bind the child's lifetime to ours
pub trait CommandDeathPact {
    /// Deliver SIGTERM to the child when the parent process dies
    fn with_death_pact(&mut self) -> &mut Self;
}

impl CommandDeathPact for std::process::Command {
    fn with_death_pact(&mut self) -> &mut Self {
        use std::os::unix::process::CommandExt;
        // SAFETY: prctl is async-signal-safe and touches no parent state
        unsafe {
            self.pre_exec(|| {
                if libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGTERM) == -1 {
                    return Err(std::io::Error::last_os_error());
                }
                Ok(())
            });
        }
        self
    }
}

/// How a waited-on child finished
#[derive(Debug)]
pub enum WaitOutcome {
    Exited(ExitStatus),
    /// The token was cancelled and the child was terminated
    Cancelled,
}

/// Wait for `child`, terminating it if `token` is cancelled first.
pub fn wait_or_cancel(
    child: &mut Child,
    token: &CancelToken,
    grace_period: Duration,
) -> std::io::Result<WaitOutcome> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(WaitOutcome::Exited(status));
        }
        if token.is_cancelled() {
            terminate(child, grace_period);
            return Ok(WaitOutcome::Cancelled);
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

/// SIGTERM, wait up to `grace_period`, then SIGKILL. Always reaps the child.
fn terminate(child: &mut Child, grace_period: Duration) {
    let pid = child.id();

    if let Err(e) = send_signal(pid, Signal::SIGTERM) {
        tracing::debug!("Failed to send SIGTERM to PID {}: {}", pid, e);
    }

    let start = Instant::now();
    while start.elapsed() < grace_period {
        if matches!(child.try_wait(), Ok(Some(_))) {
            tracing::debug!("Probe PID {} terminated", pid);
            return;
        }
        std::thread::sleep(POLL_INTERVAL);
    }

    tracing::warn!("Probe PID {} did not terminate, sending SIGKILL", pid);
    if let Err(e) = child.kill() {
        tracing::debug!("Failed to send SIGKILL to PID {}: {}", pid, e);
    }
    if let Err(e) = child.wait() {
        tracing::debug!("Failed to reap PID {}: {}", pid, e);
    }
}

fn send_signal(pid: u32, signal: Signal) -> Result<(), nix::Error> {
    signal::kill(Pid::from_raw(pid as i32), signal)
}
