//! Session handling for the external visualization engine.
//!
//! The orchestration layer only ever talks to [`EngineSession`], a narrow
//! seam over the engine's textual command interface.  [`PymolSession`] is
//! the production implementation (a headless PyMOL child process); tests
//! drive the pipeline with a recording fake instead of a live engine.

mod command;
#[cfg(test)]
pub(crate) mod fake;
mod pymol;

pub use command::{DeleteTarget, EngineCommand, SaveFormat, Selection};
pub use pymol::PymolSession;

use crate::error::ChainprepError;

/// One live session with the external engine.
///
/// The engine processes its command queue asynchronously, so a returned `Ok`
/// only means the command text was delivered — not that the engine finished
/// executing it.  Callers pace dependent commands themselves (see
/// [`crate::pipeline`]).
pub trait EngineSession {
    /// Deliver one command to the engine.
    fn submit(
        &mut self,
        command: &EngineCommand,
    ) -> Result<(), ChainprepError>;
}
