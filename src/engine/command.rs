//! The engine's complete command vocabulary.
//!
//! Every operation chainprep asks of the visualization engine is represented
//! as an [`EngineCommand`].  Consumers construct commands and pass them to
//! [`EngineSession::submit`](super::EngineSession::submit); the `Display`
//! impl renders the exact textual grammar the engine expects, so the
//! orchestration layer never concatenates command strings by hand.

use std::fmt;
use std::path::PathBuf;

// ── Command payload types ────────────────────────────────────────────────

/// An atom selection in engine syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A named workspace object (a fetched structure id or a load alias).
    Object(String),
    /// All atoms in one chain.
    Chain(char),
    /// Everything outside one chain.
    NotChain(char),
    /// Everything that is not polymer (solvent, ligands, ions).
    NonPolymer,
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(name) => write!(f, "{name}"),
            Self::Chain(c) => write!(f, "chain {c}"),
            Self::NotChain(c) => write!(f, "not chain {c}"),
            Self::NonPolymer => write!(f, "(all and not polymer)"),
        }
    }
}

/// What [`EngineCommand::Delete`] clears from the engine workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    /// One named object.
    Object(String),
    /// The whole workspace.
    All,
}

/// On-disk format override for [`EngineCommand::Save`].
///
/// When absent, the engine infers the format from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFormat {
    /// Macromolecular crystallographic information file.
    Cif,
}

impl fmt::Display for SaveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cif => write!(f, "cif"),
        }
    }
}

// ── Commands ─────────────────────────────────────────────────────────────

/// A discrete operation the engine can perform.
///
/// This is the single, centralized description of what chainprep asks of the
/// engine.  The session never cares *which* pipeline step produced a command
/// — every submission looks identical:
///
/// ```ignore
/// session.submit(&EngineCommand::Fetch { id: "1abc".to_owned() })?;
/// session.submit(&EngineCommand::Orient)?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    /// Fetch a structure from the public repository into the workspace,
    /// in synchronous fetch mode.
    Fetch {
        /// 4-character structure id.
        id: String,
    },

    /// Persist a selection to disk.
    Save {
        /// Output file path.
        path: PathBuf,
        /// What to write.
        selection: Selection,
        /// Explicit format, or `None` to infer from the extension.
        format: Option<SaveFormat>,
    },

    /// Remove atoms matching a selection from the workspace.
    Remove {
        /// What to remove.
        selection: Selection,
    },

    /// Load a local structure file under an alias.
    Load {
        /// Structure file on disk.
        path: PathBuf,
        /// Workspace object name for the loaded structure.
        alias: String,
    },

    /// Structurally align one workspace object onto another.
    Align {
        /// Object being moved.
        mobile: String,
        /// Object being aligned against.
        target: String,
    },

    /// Zoom to fit everything currently loaded.
    Zoom,

    /// Auto-orient the view.
    Orient,

    /// Apply a named color to a workspace object.
    Color {
        /// Engine color name.
        color: String,
        /// Object to color.
        target: String,
    },

    /// Render the current view to a PNG file.
    Png {
        /// Output image path.
        path: PathBuf,
        /// Render resolution.
        dpi: u32,
    },

    /// Clear objects from the workspace.
    Delete {
        /// What to clear.
        target: DeleteTarget,
    },

    /// Terminate the engine process.
    Quit,
}

impl fmt::Display for EngineCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch { id } => write!(f, "fetch {id}, async=0"),
            Self::Save {
                path,
                selection,
                format,
            } => {
                write!(f, "save {}, {selection}", path.display())?;
                if let Some(format) = format {
                    write!(f, ", format={format}")?;
                }
                Ok(())
            }
            Self::Remove { selection } => write!(f, "remove {selection}"),
            Self::Load { path, alias } => {
                write!(f, "load {}, {alias}", path.display())
            }
            Self::Align { mobile, target } => {
                write!(f, "align {mobile}, {target}")
            }
            Self::Zoom => write!(f, "zoom"),
            Self::Orient => write!(f, "orient"),
            Self::Color { color, target } => {
                write!(f, "color {color}, {target}")
            }
            Self::Png { path, dpi } => {
                write!(f, "png {}, dpi={dpi}", path.display())
            }
            Self::Delete { target } => match target {
                DeleteTarget::Object(name) => write!(f, "delete {name}"),
                DeleteTarget::All => write!(f, "delete all"),
            },
            Self::Quit => write!(f, "quit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_uses_synchronous_mode() {
        let cmd = EngineCommand::Fetch {
            id: "1abc".to_owned(),
        };
        assert_eq!(cmd.to_string(), "fetch 1abc, async=0");
    }

    #[test]
    fn save_with_explicit_format() {
        let cmd = EngineCommand::Save {
            path: PathBuf::from("1abc.cif"),
            selection: Selection::Object("1abc".to_owned()),
            format: Some(SaveFormat::Cif),
        };
        assert_eq!(cmd.to_string(), "save 1abc.cif, 1abc, format=cif");
    }

    #[test]
    fn save_chain_infers_format_from_extension() {
        let cmd = EngineCommand::Save {
            path: PathBuf::from("processed_pdbs/1abcA.pdb"),
            selection: Selection::Chain('A'),
            format: None,
        };
        assert_eq!(cmd.to_string(), "save processed_pdbs/1abcA.pdb, chain A");
    }

    #[test]
    fn remove_selections() {
        let not_chain = EngineCommand::Remove {
            selection: Selection::NotChain('B'),
        };
        assert_eq!(not_chain.to_string(), "remove not chain B");

        let solvent = EngineCommand::Remove {
            selection: Selection::NonPolymer,
        };
        assert_eq!(solvent.to_string(), "remove (all and not polymer)");
    }

    #[test]
    fn alignment_commands() {
        let load = EngineCommand::Load {
            path: PathBuf::from("reference.pdb"),
            alias: "local_pdb".to_owned(),
        };
        assert_eq!(load.to_string(), "load reference.pdb, local_pdb");

        let align = EngineCommand::Align {
            mobile: "1abc".to_owned(),
            target: "local_pdb".to_owned(),
        };
        assert_eq!(align.to_string(), "align 1abc, local_pdb");

        let color = EngineCommand::Color {
            color: "cyan".to_owned(),
            target: "1abc".to_owned(),
        };
        assert_eq!(color.to_string(), "color cyan, 1abc");

        let png = EngineCommand::Png {
            path: PathBuf::from("1abc_A_alignment.png"),
            dpi: 300,
        };
        assert_eq!(png.to_string(), "png 1abc_A_alignment.png, dpi=300");
    }

    #[test]
    fn delete_and_quit() {
        let one = EngineCommand::Delete {
            target: DeleteTarget::Object("1abc".to_owned()),
        };
        assert_eq!(one.to_string(), "delete 1abc");

        let all = EngineCommand::Delete {
            target: DeleteTarget::All,
        };
        assert_eq!(all.to_string(), "delete all");
        assert_eq!(EngineCommand::Quit.to_string(), "quit");
    }
}
