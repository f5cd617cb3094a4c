//! Crate-level error types.

use std::fmt;
use std::path::PathBuf;

/// Errors produced by the chainprep crate.
#[derive(Debug)]
pub enum ChainprepError {
    /// Failed to read the DALI result file.
    ResultFile(std::io::Error),
    /// The engine process could not be started.
    EngineStart(std::io::Error),
    /// A command could not be delivered to the engine's input stream.
    EngineSubmit {
        /// Rendered command text.
        command: String,
        /// Underlying pipe error.
        source: std::io::Error,
    },
    /// An engine-produced file never appeared on disk.
    ArtifactTimeout(PathBuf),
    /// Run configuration parsing/serialization failure.
    ConfigParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for ChainprepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResultFile(e) => write!(f, "result file error: {e}"),
            Self::EngineStart(e) => {
                write!(f, "failed to start the engine: {e}")
            }
            Self::EngineSubmit { command, source } => {
                write!(f, "failed to submit `{command}` to the engine: {source}")
            }
            Self::ArtifactTimeout(path) => {
                write!(f, "timed out waiting for {}", path.display())
            }
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for ChainprepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ResultFile(e)
            | Self::EngineStart(e)
            | Self::EngineSubmit { source: e, .. }
            | Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ChainprepError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
