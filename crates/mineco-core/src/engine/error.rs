use thiserror::Error;

use super::config::ConfigError;
use crate::core::graph::builder::Granularity;
use crate::core::io::pdb::PdbError;
use crate::core::models::residue::ResidueKey;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Error)]
pub enum EcoError {
    #[error("Failed to read structure from {path:?}: {source}")]
    StructureParse {
        path: PathBuf,
        #[source]
        source: PdbError,
    },

    #[error("Structure contains no residues with a {granularity} position")]
    EmptyStructure { granularity: Granularity },

    #[error("Both structures have {contacts} contacts; cannot tell which state is open")]
    AmbiguousContactCount { contacts: usize },

    #[error(
        "No unique contacts remain after filtering ({candidates} candidates before the distance filter)"
    )]
    EmptyUniqueContactSet { candidates: usize },

    #[error("No path between residues {from} and {to} in the open graph")]
    DisconnectedResidues { from: ResidueKey, to: ResidueKey },

    #[error("Residue {residue} of a unique contact is missing from the open structure")]
    MissingResidue { residue: ResidueKey },

    #[error("Pair evaluation exceeded its time budget of {limit:?} (elapsed {elapsed:?})")]
    Timeout { limit: Duration, elapsed: Duration },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed pathway log at line {line}: {message}")]
    LogFormat { line: usize, message: String },

    #[error("Internal logic error: {0}")]
    Internal(String),
}

impl EcoError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
