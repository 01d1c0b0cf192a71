use std::fmt;
use thiserror::Error;

/// The storage a failing operation was addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Store {
    Atoms,
    Bonds,
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Atoms => "atom",
            Self::Bonds => "bond",
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoleculeError {
    #[error("{target} index {index} is out of range (count: {len})")]
    IndexOutOfRange {
        target: Store,
        index: usize,
        len: usize,
    },

    #[error("Failed to grow {store} storage to a capacity of {requested}")]
    AllocationFailure { store: Store, requested: usize },

    #[error("Bond between atoms {atom1} and {atom2} is degenerate: both atoms project onto the same point")]
    DegenerateGeometry { atom1: usize, atom2: usize },
}
