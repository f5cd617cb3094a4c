//! Output relocation.
//!
//! Engine-produced intermediates land in the working directory; after the
//! per-structure loop the driver files them into per-category directories.
//! Moves are best-effort per file: one bad file never stops the rest, and a
//! missing structure file only warns — the fetch or save step for that id
//! may have failed upstream.

use std::fs;
use std::io;
use std::path::Path;

/// Move `<id>.cif` for each id from `work_dir` into `dest`.
///
/// Creates `dest` if absent.  Returns the number of files moved.
pub fn collect_structures<'a>(
    work_dir: &Path,
    dest: &Path,
    ids: impl Iterator<Item = &'a str>,
) -> usize {
    if let Err(e) = fs::create_dir_all(dest) {
        log::error!("failed to create {}: {e}", dest.display());
        return 0;
    }
    let mut moved = 0;
    for id in ids {
        let name = format!("{id}.cif");
        let source = work_dir.join(&name);
        if !source.exists() {
            log::warn!(
                "structure file for {id} not found in {}",
                work_dir.display()
            );
            continue;
        }
        let target = dest.join(&name);
        match move_file(&source, &target) {
            Ok(()) => {
                log::info!(
                    "moved {} to {}",
                    source.display(),
                    target.display()
                );
                moved += 1;
            }
            Err(e) => log::error!(
                "error moving {} to {}: {e}",
                source.display(),
                target.display()
            ),
        }
    }
    moved
}

/// Move every rendered image (`*.png`) from `work_dir` into `dest`,
/// regardless of which structure produced it.
///
/// Creates `dest` if absent.  Returns the number of files moved.
pub fn collect_images(work_dir: &Path, dest: &Path) -> usize {
    if let Err(e) = fs::create_dir_all(dest) {
        log::error!("failed to create {}: {e}", dest.display());
        return 0;
    }
    let entries = match fs::read_dir(work_dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::error!("failed to list {}: {e}", work_dir.display());
            return 0;
        }
    };
    let mut moved = 0;
    for entry in entries.flatten() {
        let source = entry.path();
        if !source.extension().is_some_and(|ext| ext == "png") {
            continue;
        }
        let Some(name) = source.file_name() else {
            continue;
        };
        let target = dest.join(name);
        match move_file(&source, &target) {
            Ok(()) => {
                log::info!(
                    "moved {} to {}",
                    source.display(),
                    target.display()
                );
                moved += 1;
            }
            Err(e) => log::error!(
                "error moving {} to {}: {e}",
                source.display(),
                target.display()
            ),
        }
    }
    moved
}

/// Rename, falling back to copy+remove for cross-device moves.
fn move_file(source: &Path, target: &Path) -> io::Result<()> {
    match fs::rename(source, target) {
        Ok(()) => Ok(()),
        Err(_) => {
            let _ = fs::copy(source, target)?;
            fs::remove_file(source)
        }
    }
}
