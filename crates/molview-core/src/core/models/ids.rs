use slotmap::new_key_type;
use std::fmt;

new_key_type! {
    /// Opaque handle to a molecule owned by a [`MoleculeRegistry`](crate::engine::registry::MoleculeRegistry).
    pub struct MoleculeId;
}

/// Position of an atom inside its owning [`Molecule`](super::molecule::Molecule).
///
/// Indices stay valid across storage growth because they never point into the
/// backing buffer directly; they are resolved against the current storage on use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AtomIndex(pub usize);

/// Position of a bond inside its owning [`Molecule`](super::molecule::Molecule).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct BondIndex(pub usize);

impl AtomIndex {
    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

impl BondIndex {
    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

impl From<usize> for AtomIndex {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl From<usize> for BondIndex {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl fmt::Display for AtomIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for BondIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
