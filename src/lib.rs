// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Batch preparation of protein chains from DALI structural-similarity hits,
//! driven through a headless PyMOL session.
//!
//! Chainprep parses a DALI result listing into unique (structure id, chain)
//! pairs, then walks them one at a time through a scripted engine session:
//! fetch the structure, persist it, cut it down to the matched chain, persist
//! the chain, optionally align it against a local reference and render a
//! comparison image, and finally file the outputs into per-category
//! directories.
//!
//! # Key entry points
//!
//! - [`run`] - one full run from a [`options::RunOptions`]
//! - [`dali::Hits`] - parsed result entries
//! - [`engine::EngineSession`] / [`engine::PymolSession`] - the engine seam
//! - [`pipeline::process_hit`] - the per-structure command sequence
//!
//! # Architecture
//!
//! Execution is one strictly sequential pass: parse → session start →
//! per-hit command sequence → output relocation → best-effort quit. The
//! engine offers no completion acknowledgment, so ordering between dependent
//! commands relies on a configurable settle delay plus on-disk polling for
//! the steps that must observe an artifact (see [`pipeline`]). Per-hit and
//! per-file failures are logged and skipped; only session startup is fatal.

pub mod dali;
pub mod engine;
pub mod error;
pub mod options;
pub mod organize;
pub mod pipeline;
pub mod run;

pub use error::ChainprepError;
pub use run::run;
