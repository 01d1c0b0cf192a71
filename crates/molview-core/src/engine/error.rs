use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::sdf::SdfError;
use crate::core::models::error::MoleculeError;
use crate::core::models::ids::MoleculeId;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Molecule handle {0:?} does not refer to a live molecule")]
    InvalidHandle(MoleculeId),

    #[error("Molecule operation failed: {0}")]
    Molecule(#[from] MoleculeError),

    #[error("Failed to read molecule: {source}")]
    Read {
        #[from]
        source: SdfError,
    },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}
