//! A recording engine double for orchestration tests.

use std::fs;

use super::{EngineCommand, EngineSession};
use crate::error::ChainprepError;

/// Records every submitted command as its rendered text.
///
/// `Save` and `Png` commands create empty files at their target paths so the
/// pipeline's artifact polling sees them, mimicking a cooperative engine.
pub(crate) struct FakeEngine {
    /// Rendered text of every successfully submitted command, in order.
    pub(crate) submitted: Vec<String>,
    /// 0-based submission index that should fail, if any.
    pub(crate) fail_at: Option<usize>,
    /// When false, `Save`/`Png` produce no artifact on disk.
    pub(crate) create_artifacts: bool,
    attempts: usize,
}

impl FakeEngine {
    pub(crate) fn new() -> Self {
        Self {
            submitted: Vec::new(),
            fail_at: None,
            create_artifacts: true,
            attempts: 0,
        }
    }
}

impl EngineSession for FakeEngine {
    fn submit(
        &mut self,
        command: &EngineCommand,
    ) -> Result<(), ChainprepError> {
        let index = self.attempts;
        self.attempts += 1;
        if self.fail_at == Some(index) {
            return Err(ChainprepError::EngineSubmit {
                command: command.to_string(),
                source: std::io::Error::other("scripted failure"),
            });
        }
        if self.create_artifacts {
            if let EngineCommand::Save { path, .. }
            | EngineCommand::Png { path, .. } = command
            {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent).unwrap();
                }
                fs::write(path, b"").unwrap();
            }
        }
        self.submitted.push(command.to_string());
        Ok(())
    }
}
