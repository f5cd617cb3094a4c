//! Run driver: one linear pass over the parsed hits.

use std::fs;

use crate::dali::{self, Hits};
use crate::engine::{EngineSession, PymolSession};
use crate::error::ChainprepError;
use crate::options::RunOptions;
use crate::{organize, pipeline};

/// Execute one full run.
///
/// An empty result set ends the run successfully without starting the
/// engine.  A session that fails to start is fatal; once the session is up,
/// per-hit and per-file failures are logged and skipped, and shutdown is
/// best-effort.
pub fn run(options: &RunOptions) -> Result<(), ChainprepError> {
    let hits = dali::load_hits(&options.input, options.limit);
    if hits.is_empty() {
        log::warn!(
            "no structure ids extracted from {}; nothing to do",
            options.input.display()
        );
        return Ok(());
    }
    log::info!(
        "{} unique structure ids extracted from {}",
        hits.len(),
        options.input.display()
    );

    let mut session = PymolSession::start(&options.engine)?;
    let outcome = run_with_engine(&mut session, &hits, options);
    session.quit();
    outcome
}

/// Process every hit against a live session and file the outputs.
///
/// The only error out of here is a failure to create the processing
/// directory before any engine work starts; everything after that point is
/// recoverable per item or per file.
pub fn run_with_engine(
    engine: &mut dyn EngineSession,
    hits: &Hits,
    options: &RunOptions,
) -> Result<(), ChainprepError> {
    fs::create_dir_all(&options.processed_dir)
        .map_err(ChainprepError::Io)?;

    for hit in hits {
        if let Err(e) = pipeline::process_hit(engine, hit, options) {
            log::error!("error processing structure {}: {e}", hit.id);
        }
    }

    let moved = organize::collect_structures(
        &options.work_dir,
        &options.downloads_dir,
        hits.ids(),
    );
    log::debug!(
        "{moved} structure files relocated to {}",
        options.downloads_dir.display()
    );

    if let Some(alignment) = &options.alignment {
        let moved =
            organize::collect_images(&options.work_dir, &alignment.images_dir);
        log::debug!(
            "{moved} alignment images relocated to {}",
            alignment.images_dir.display()
        );
    }

    Ok(())
}
