//! Run configuration with TOML support.
//!
//! Every knob the original workflow hardcoded — input path, directory names,
//! engine command line, settle delays, alignment reference and colors — is
//! explicit configuration here.  All structs use `#[serde(default)]` so
//! partial TOML files (e.g. only overriding `[engine]`) work correctly, and
//! the defaults reproduce the original constants.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ChainprepError;

/// Top-level run configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunOptions {
    /// Path to the DALI result file.
    pub input: PathBuf,
    /// Keep only the first N distinct structure ids, in file order.
    pub limit: Option<usize>,
    /// Directory where engine-produced intermediates land before relocation.
    pub work_dir: PathBuf,
    /// Destination for single-chain PDB files.
    pub processed_dir: PathBuf,
    /// Destination for relocated full-structure CIF files.
    pub downloads_dir: PathBuf,
    /// Seconds to wait after each engine command.
    ///
    /// The engine drains its command queue asynchronously and offers no
    /// completion signal; this delay is a placeholder for one, not a
    /// guarantee.  Artifact-producing steps additionally poll the disk.
    pub settle_secs: f32,
    /// Seconds to wait for an engine-produced file before giving up on the
    /// current structure.
    pub artifact_timeout_secs: f32,
    /// Engine process settings.
    pub engine: EngineOptions,
    /// Align-and-render variant; `None` runs chain extraction only.
    pub alignment: Option<AlignmentOptions>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from("dali_results.txt"),
            limit: None,
            work_dir: PathBuf::from("."),
            processed_dir: PathBuf::from("processed_pdbs"),
            downloads_dir: PathBuf::from("downloaded_pdbs"),
            settle_secs: 3.0,
            artifact_timeout_secs: 30.0,
            engine: EngineOptions::default(),
            alignment: None,
        }
    }
}

impl RunOptions {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ChainprepError> {
        let content =
            std::fs::read_to_string(path).map_err(ChainprepError::Io)?;
        toml::from_str(&content)
            .map_err(|e| ChainprepError::ConfigParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), ChainprepError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ChainprepError::ConfigParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ChainprepError::Io)?;
        }
        std::fs::write(path, content).map_err(ChainprepError::Io)
    }

    /// Per-command settle delay.
    #[must_use]
    pub fn settle(&self) -> Duration {
        Duration::from_secs_f32(self.settle_secs.max(0.0))
    }

    /// Deadline for artifact polling.
    #[must_use]
    pub fn artifact_timeout(&self) -> Duration {
        Duration::from_secs_f32(self.artifact_timeout_secs.max(0.0))
    }
}

/// How to start the engine process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineOptions {
    /// Engine executable name or path.
    pub executable: String,
    /// Arguments passed at startup.
    ///
    /// The defaults run PyMOL headless: `-c` no GUI, `-q` quiet launch,
    /// `-p` read commands from stdin.
    pub args: Vec<String>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            executable: "pymol".to_owned(),
            args: vec!["-cq".to_owned(), "-p".to_owned()],
        }
    }
}

/// Settings for the align-and-render variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AlignmentOptions {
    /// Local reference structure the fetched chain is aligned against.
    pub reference: PathBuf,
    /// Workspace alias the reference is loaded under.
    pub alias: String,
    /// Destination for rendered comparison images.
    pub images_dir: PathBuf,
    /// Engine color name applied to the fetched structure.
    pub mobile_color: String,
    /// Engine color name applied to the reference.
    pub reference_color: String,
    /// Snapshot render resolution.
    pub dpi: u32,
}

impl Default for AlignmentOptions {
    fn default() -> Self {
        Self {
            reference: PathBuf::from("reference.pdb"),
            alias: "local_pdb".to_owned(),
            images_dir: PathBuf::from("alignment_images"),
            mobile_color: "cyan".to_owned(),
            reference_color: "red".to_owned(),
            dpi: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = RunOptions::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: RunOptions = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
input = "8a1dA.txt"
limit = 50

[engine]
executable = "/opt/pymol/bin/pymol"
"#;
        let opts: RunOptions = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.input, PathBuf::from("8a1dA.txt"));
        assert_eq!(opts.limit, Some(50));
        assert_eq!(opts.engine.executable, "/opt/pymol/bin/pymol");
        // Everything else should be default
        assert_eq!(opts.engine.args, vec!["-cq", "-p"]);
        assert_eq!(opts.processed_dir, PathBuf::from("processed_pdbs"));
        assert!(opts.alignment.is_none());
    }

    #[test]
    fn alignment_table_enables_the_variant_with_defaults() {
        let toml_str = r#"
[alignment]
reference = "my_query.pdb"
"#;
        let opts: RunOptions = toml::from_str(toml_str).unwrap();
        let alignment = opts.alignment.unwrap();
        assert_eq!(alignment.reference, PathBuf::from("my_query.pdb"));
        assert_eq!(alignment.alias, "local_pdb");
        assert_eq!(alignment.mobile_color, "cyan");
        assert_eq!(alignment.reference_color, "red");
        assert_eq!(alignment.dpi, 300);
    }

    #[test]
    fn negative_delays_clamp_to_zero() {
        let opts = RunOptions {
            settle_secs: -1.0,
            artifact_timeout_secs: -5.0,
            ..RunOptions::default()
        };
        assert!(opts.settle().is_zero());
        assert!(opts.artifact_timeout().is_zero());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("presets/run.toml");
        let mut opts = RunOptions::default();
        opts.alignment = Some(AlignmentOptions::default());
        opts.save(&path).unwrap();
        let loaded = RunOptions::load(&path).unwrap();
        assert_eq!(opts, loaded);
    }
}
