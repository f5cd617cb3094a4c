//! The per-structure command sequence.
//!
//! Each DALI hit is processed by issuing a fixed sequence of commands to the
//! engine session: fetch the structure, persist it as CIF, cut it down to
//! the matched chain, persist the chain as PDB, optionally align against the
//! local reference and render a snapshot, then clear the workspace so memory
//! stays bounded across hits.
//!
//! Every command is followed by the configured settle delay (the engine
//! drains its queue asynchronously and gives no completion signal).  Steps
//! that must observe a file on disk additionally poll for it with a
//! deadline rather than trusting the sleep alone.

use std::path::Path;
use std::thread;
use std::time::Instant;

use crate::dali::Hit;
use crate::engine::{
    DeleteTarget, EngineCommand, EngineSession, SaveFormat, Selection,
};
use crate::error::ChainprepError;
use crate::options::RunOptions;

/// Poll interval for artifact-existence checks.
const ARTIFACT_POLL_MS: u64 = 50;

/// Run the full command sequence for one hit.
///
/// Any error aborts this hit only.  No partial-state repair is attempted:
/// on failure the engine workspace is left as-is, to be cleared by the next
/// hit's fetch/delete or by session shutdown.
pub fn process_hit(
    engine: &mut dyn EngineSession,
    hit: &Hit,
    options: &RunOptions,
) -> Result<(), ChainprepError> {
    log::debug!("processing structure {} chain {}", hit.id, hit.chain);

    submit_paced(
        engine,
        &EngineCommand::Fetch {
            id: hit.id.clone(),
        },
        options,
    )?;
    log::info!("fetched {}", hit.id);

    let cif_path = options.work_dir.join(format!("{}.cif", hit.id));
    submit_paced(
        engine,
        &EngineCommand::Save {
            path: cif_path.clone(),
            selection: Selection::Object(hit.id.clone()),
            format: Some(SaveFormat::Cif),
        },
        options,
    )?;
    wait_for_artifact(&cif_path, options)?;
    log::info!("saved {}", cif_path.display());

    if options.alignment.is_some() {
        submit_paced(
            engine,
            &EngineCommand::Remove {
                selection: Selection::NonPolymer,
            },
            options,
        )?;
        log::debug!("removed non-polymer content from {}", hit.id);
    }

    submit_paced(
        engine,
        &EngineCommand::Remove {
            selection: Selection::NotChain(hit.chain),
        },
        options,
    )?;
    log::debug!("kept only chain {} of {}", hit.chain, hit.id);

    let chain_path = options
        .processed_dir
        .join(format!("{}{}.pdb", hit.id, hit.chain));
    submit_paced(
        engine,
        &EngineCommand::Save {
            path: chain_path.clone(),
            selection: Selection::Chain(hit.chain),
            format: None,
        },
        options,
    )?;
    wait_for_artifact(&chain_path, options)?;
    log::info!(
        "saved chain {} of {} to {}",
        hit.chain,
        hit.id,
        chain_path.display()
    );

    if let Some(alignment) = &options.alignment {
        submit_paced(
            engine,
            &EngineCommand::Load {
                path: alignment.reference.clone(),
                alias: alignment.alias.clone(),
            },
            options,
        )?;
        submit_paced(
            engine,
            &EngineCommand::Align {
                mobile: hit.id.clone(),
                target: alignment.alias.clone(),
            },
            options,
        )?;
        log::info!("aligned {} with {}", hit.id, alignment.alias);
        submit_paced(engine, &EngineCommand::Zoom, options)?;
        submit_paced(engine, &EngineCommand::Orient, options)?;
        submit_paced(
            engine,
            &EngineCommand::Color {
                color: alignment.mobile_color.clone(),
                target: hit.id.clone(),
            },
            options,
        )?;
        submit_paced(
            engine,
            &EngineCommand::Color {
                color: alignment.reference_color.clone(),
                target: alignment.alias.clone(),
            },
            options,
        )?;
        let png_path = options
            .work_dir
            .join(format!("{}_{}_alignment.png", hit.id, hit.chain));
        submit_paced(
            engine,
            &EngineCommand::Png {
                path: png_path.clone(),
                dpi: alignment.dpi,
            },
            options,
        )?;
        wait_for_artifact(&png_path, options)?;
        log::info!("saved alignment image to {}", png_path.display());

        // The reference is loaded per hit, so clear everything.
        submit_paced(
            engine,
            &EngineCommand::Delete {
                target: DeleteTarget::All,
            },
            options,
        )?;
    } else {
        submit_paced(
            engine,
            &EngineCommand::Delete {
                target: DeleteTarget::Object(hit.id.clone()),
            },
            options,
        )?;
    }
    log::debug!("cleared engine workspace after {}", hit.id);

    Ok(())
}

/// Submit one command, then give the engine's internal queue time to drain.
fn submit_paced(
    engine: &mut dyn EngineSession,
    command: &EngineCommand,
    options: &RunOptions,
) -> Result<(), ChainprepError> {
    engine.submit(command)?;
    let settle = options.settle();
    if !settle.is_zero() {
        thread::sleep(settle);
    }
    Ok(())
}

/// Wait for an engine-produced file to appear on disk.
fn wait_for_artifact(
    path: &Path,
    options: &RunOptions,
) -> Result<(), ChainprepError> {
    let deadline = Instant::now() + options.artifact_timeout();
    while !path.exists() {
        if Instant::now() >= deadline {
            return Err(ChainprepError::ArtifactTimeout(path.to_path_buf()));
        }
        thread::sleep(std::time::Duration::from_millis(ARTIFACT_POLL_MS));
    }
    Ok(())
}
