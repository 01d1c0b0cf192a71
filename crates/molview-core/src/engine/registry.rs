use super::config::{ErrorPolicy, ViewConfig};
use super::error::EngineError;
use crate::core::models::atom::Atom;
use crate::core::models::error::MoleculeError;
use crate::core::models::ids::{AtomIndex, BondIndex, MoleculeId};
use crate::core::models::molecule::Molecule;
use crate::core::models::policy::MoleculeOptions;
use crate::core::models::topology::Bond;
use crate::core::utils::geometry::Axis;
use slotmap::SlotMap;
use tracing::debug;

/// Owns molecules on behalf of callers that can only hold opaque handles.
///
/// Handles are generational keys: once a molecule is destroyed its handle, and
/// any copy of it, is rejected with [`EngineError::InvalidHandle`] even if the
/// slot is later reused.
#[derive(Debug, Default)]
pub struct MoleculeRegistry {
    molecules: SlotMap<MoleculeId, Molecule>,
    options: MoleculeOptions,
    error_policy: ErrorPolicy,
}

impl MoleculeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry whose molecules use the config's options and whose
    /// failures are handled by the config's [`ErrorPolicy`].
    pub fn with_config(config: &ViewConfig) -> Self {
        Self {
            molecules: SlotMap::with_key(),
            options: config.molecule,
            error_policy: config.error_policy,
        }
    }

    pub fn len(&self) -> usize {
        self.molecules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.molecules.is_empty()
    }

    pub fn contains(&self, id: MoleculeId) -> bool {
        self.molecules.contains_key(id)
    }

    /// Creates an empty molecule pre-sized for the given counts.
    pub fn create(
        &mut self,
        atom_capacity: usize,
        bond_capacity: usize,
    ) -> Result<MoleculeId, EngineError> {
        let result =
            Molecule::with_capacity_and_options(atom_capacity, bond_capacity, self.options)
                .map_err(EngineError::from);
        let molecule = self.error_policy.enforce(result)?;
        Ok(self.insert(molecule))
    }

    /// Takes ownership of an already-built molecule.
    pub fn insert(&mut self, molecule: Molecule) -> MoleculeId {
        let id = self.molecules.insert(molecule);
        debug!("Registered molecule {:?} ({} live).", id, self.molecules.len());
        id
    }

    pub fn get(&self, id: MoleculeId) -> Result<&Molecule, EngineError> {
        let result = self
            .molecules
            .get(id)
            .ok_or(EngineError::InvalidHandle(id));
        self.error_policy.enforce(result)
    }

    pub fn append_atom(&mut self, id: MoleculeId, atom: Atom) -> Result<AtomIndex, EngineError> {
        self.with_mut(id, |m| m.append_atom(atom))
    }

    pub fn append_bond(
        &mut self,
        id: MoleculeId,
        atom1: AtomIndex,
        atom2: AtomIndex,
        electron_pairs: u8,
    ) -> Result<BondIndex, EngineError> {
        self.with_mut(id, |m| m.append_bond(atom1, atom2, electron_pairs))
    }

    pub fn get_atom(&self, id: MoleculeId, index: AtomIndex) -> Result<Atom, EngineError> {
        self.with(id, |m| m.get_atom(index))
    }

    pub fn set_atom(
        &mut self,
        id: MoleculeId,
        index: AtomIndex,
        atom: Atom,
    ) -> Result<(), EngineError> {
        self.with_mut(id, |m| m.set_atom(index, atom))
    }

    pub fn get_bond(&self, id: MoleculeId, index: BondIndex) -> Result<Bond, EngineError> {
        self.with(id, |m| m.get_bond(index))
    }

    pub fn rotate(&mut self, id: MoleculeId, axis: Axis, degrees: i32) -> Result<(), EngineError> {
        self.with_mut(id, |m| m.rotate(axis, degrees))
    }

    pub fn sorted_atom_order(&self, id: MoleculeId) -> Result<Vec<AtomIndex>, EngineError> {
        self.with(id, |m| Ok(m.sorted_atom_order()))
    }

    pub fn sorted_bond_order(&self, id: MoleculeId) -> Result<Vec<BondIndex>, EngineError> {
        self.with(id, |m| Ok(m.sorted_bond_order()))
    }

    /// Deep-copies a molecule and registers the copy under a fresh handle.
    pub fn copy(&mut self, id: MoleculeId) -> Result<MoleculeId, EngineError> {
        let copy = self.with(id, Molecule::copy)?;
        Ok(self.insert(copy))
    }

    /// Destroys a molecule. Destroying the same handle twice is an error.
    pub fn destroy(&mut self, id: MoleculeId) -> Result<(), EngineError> {
        self.take(id).map(Molecule::destroy)
    }

    /// Removes a molecule from the registry and hands ownership back to the caller.
    pub fn take(&mut self, id: MoleculeId) -> Result<Molecule, EngineError> {
        let result = self
            .molecules
            .remove(id)
            .ok_or(EngineError::InvalidHandle(id));
        if result.is_ok() {
            debug!("Released molecule {:?} ({} live).", id, self.molecules.len());
        }
        self.error_policy.enforce(result)
    }

    fn with<T>(
        &self,
        id: MoleculeId,
        op: impl FnOnce(&Molecule) -> Result<T, MoleculeError>,
    ) -> Result<T, EngineError> {
        let result = match self.molecules.get(id) {
            Some(molecule) => op(molecule).map_err(EngineError::from),
            None => Err(EngineError::InvalidHandle(id)),
        };
        self.error_policy.enforce(result)
    }

    fn with_mut<T>(
        &mut self,
        id: MoleculeId,
        op: impl FnOnce(&mut Molecule) -> Result<T, MoleculeError>,
    ) -> Result<T, EngineError> {
        let result = match self.molecules.get_mut(id) {
            Some(molecule) => op(molecule).map_err(EngineError::from),
            None => Err(EngineError::InvalidHandle(id)),
        };
        self.error_policy.enforce(result)
    }
}
