//! Headless PyMOL driven over its command pipe.

use std::io::Write;
use std::process::{Child, ChildStdin, Command, Stdio};

use super::{EngineCommand, EngineSession};
use crate::error::ChainprepError;
use crate::options::EngineOptions;

/// A running headless PyMOL process accepting commands on stdin.
///
/// One session is opened per run and closed once at the end.  All structural
/// state lives inside the engine process and is referenced by object name.
pub struct PymolSession {
    child: Child,
    stdin: ChildStdin,
}

impl PymolSession {
    /// Start the engine process.
    ///
    /// Failure here is fatal to a run: without a session there is no
    /// per-structure work to do.
    pub fn start(options: &EngineOptions) -> Result<Self, ChainprepError> {
        let mut child = Command::new(&options.executable)
            .args(&options.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(ChainprepError::EngineStart)?;
        let Some(stdin) = child.stdin.take() else {
            return Err(ChainprepError::EngineStart(std::io::Error::other(
                "engine stdin was not captured",
            )));
        };
        log::info!(
            "engine started: `{}` (pid {})",
            options.executable,
            child.id()
        );
        Ok(Self { child, stdin })
    }

    /// Ask the engine to terminate and wait for the process to exit.
    ///
    /// Best-effort: failures are logged and never escalate, so a botched
    /// shutdown cannot mask the run's outcome.
    pub fn quit(mut self) {
        if let Err(e) = self.submit(&EngineCommand::Quit) {
            log::error!("error terminating the engine session: {e}");
        }
        match self.child.wait() {
            Ok(status) => {
                log::info!("engine session terminated ({status})");
            }
            Err(e) => log::error!("failed to wait for engine exit: {e}"),
        }
    }
}

impl EngineSession for PymolSession {
    fn submit(
        &mut self,
        command: &EngineCommand,
    ) -> Result<(), ChainprepError> {
        log::debug!("engine <- {command}");
        writeln!(self.stdin, "{command}")
            .and_then(|()| self.stdin.flush())
            .map_err(|source| ChainprepError::EngineSubmit {
                command: command.to_string(),
                source,
            })
    }
}

impl Drop for PymolSession {
    fn drop(&mut self) {
        // Reached with a live child only when `quit` was never called
        // (e.g. unwinding out of the run).
        if let Ok(None) = self.child.try_wait() {
            if self.child.kill().is_ok() {
                let _ = self.child.wait();
            }
        }
    }
}
