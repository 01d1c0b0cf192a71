use super::atom::Atom;
use super::error::{MoleculeError, Store};
use super::ids::{AtomIndex, BondIndex};
use super::policy::{AtomUpdatePolicy, DegenerateBondPolicy, MoleculeOptions};
use super::topology::{Bond, BondAdjacency};
use crate::core::ordering::depth;
use crate::core::utils::geometry::{Axis, BondGeometry, rotation_matrix, transform_point};
use nalgebra::Matrix3;
use std::collections::TryReserveError;
use tracing::{debug, instrument, trace};

/// An in-memory molecule: atoms, the bonds between them, and the bookkeeping
/// needed to draw them back to front.
///
/// Storage grows by doubling its logical capacity (0 → 1 → 2 → 4 → …). Bonds
/// store atom indices only and resolve them against the current atom storage on
/// every use, so growth can never leave a bond pointing at stale memory.
///
/// Two auxiliary index sequences, one per atom and one per bond, hold the
/// render order produced by [`sort_by_depth`](Self::sort_by_depth); the
/// canonical atom and bond storage is never reordered.
#[derive(Debug, Default)]
pub struct Molecule {
    /// Primary atom storage, in insertion order.
    atoms: Vec<Atom>,
    /// Logical atom capacity, following the doubling discipline.
    atom_capacity: usize,
    /// Primary bond storage, in insertion order.
    bonds: Vec<Bond>,
    /// Logical bond capacity, following the doubling discipline.
    bond_capacity: usize,
    /// Auxiliary atom order used for depth sorting.
    atom_order: Vec<AtomIndex>,
    /// Auxiliary bond order used for depth sorting.
    bond_order: Vec<BondIndex>,
    /// Bonds indexed by the atoms they reference.
    adjacency: BondAdjacency,
    options: MoleculeOptions,
}

impl Molecule {
    /// Creates a new, empty molecule with zero capacity and default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty molecule with the given options.
    pub fn with_options(options: MoleculeOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Creates an empty molecule pre-sized for `atom_capacity` atoms and
    /// `bond_capacity` bonds.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::AllocationFailure`] if the storage cannot be
    /// reserved.
    pub fn with_capacity(atom_capacity: usize, bond_capacity: usize) -> Result<Self, MoleculeError> {
        Self::with_capacity_and_options(atom_capacity, bond_capacity, MoleculeOptions::default())
    }

    /// Creates an empty, pre-sized molecule with the given options.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::AllocationFailure`] if the storage cannot be
    /// reserved.
    pub fn with_capacity_and_options(
        atom_capacity: usize,
        bond_capacity: usize,
        options: MoleculeOptions,
    ) -> Result<Self, MoleculeError> {
        let mut molecule = Self::with_options(options);
        molecule.reserve_atoms(atom_capacity)?;
        molecule.reserve_bonds(bond_capacity)?;
        Ok(molecule)
    }

    pub fn options(&self) -> MoleculeOptions {
        self.options
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn atom_capacity(&self) -> usize {
        self.atom_capacity
    }

    #[inline]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    #[inline]
    pub fn bond_capacity(&self) -> usize {
        self.bond_capacity
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Returns all atoms in insertion order.
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Returns all bonds in insertion order.
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Returns the bonds that reference `atom`; empty for unknown indices.
    pub fn bonds_of(&self, atom: AtomIndex) -> &[BondIndex] {
        self.adjacency.bonds_of(atom)
    }

    /// Returns the auxiliary atom order, as left by the last
    /// [`sort_by_depth`](Self::sort_by_depth) plus any atoms appended since.
    pub fn atom_order(&self) -> &[AtomIndex] {
        &self.atom_order
    }

    /// Returns the auxiliary bond order, as left by the last
    /// [`sort_by_depth`](Self::sort_by_depth) plus any bonds appended since.
    pub fn bond_order(&self) -> &[BondIndex] {
        &self.bond_order
    }

    /// Appends a copy of `atom` and returns its index.
    ///
    /// Doubles the atom capacity first if the storage is full.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::AllocationFailure`] if growth fails; the
    /// molecule is left unchanged.
    pub fn append_atom(&mut self, atom: Atom) -> Result<AtomIndex, MoleculeError> {
        if self.atoms.len() == self.atom_capacity {
            let requested = next_capacity(self.atom_capacity, Store::Atoms)?;
            self.reserve_atoms(requested)?;
        }

        let index = AtomIndex(self.atoms.len());
        self.atoms.push(atom);
        self.atom_order.push(index);
        self.adjacency.push_atom();
        Ok(index)
    }

    /// Appends a bond between two existing atoms and returns its index.
    ///
    /// The bond's geometry is derived before it becomes observable.
    ///
    /// # Arguments
    ///
    /// * `atom1` - Index of the first atom.
    /// * `atom2` - Index of the second atom.
    /// * `electron_pairs` - Number of shared electron pairs.
    ///
    /// # Errors
    ///
    /// * [`MoleculeError::IndexOutOfRange`] if either index is not below
    ///   [`atom_count`](Self::atom_count).
    /// * [`MoleculeError::DegenerateGeometry`] if the atoms coincide on the
    ///   viewing plane and the molecule rejects degenerate bonds.
    /// * [`MoleculeError::AllocationFailure`] if growth fails.
    ///
    /// On error the molecule is left unchanged.
    pub fn append_bond(
        &mut self,
        atom1: AtomIndex,
        atom2: AtomIndex,
        electron_pairs: u8,
    ) -> Result<BondIndex, MoleculeError> {
        let first = self.get_atom(atom1)?;
        let second = self.get_atom(atom2)?;
        let geometry = BondGeometry::derive(&first, &second);
        self.check_geometry(atom1, atom2, &geometry)?;

        if self.bonds.len() == self.bond_capacity {
            let requested = next_capacity(self.bond_capacity, Store::Bonds)?;
            self.reserve_bonds(requested)?;
        }

        let index = BondIndex(self.bonds.len());
        self.bonds
            .push(Bond::new(atom1, atom2, electron_pairs, geometry));
        self.bond_order.push(index);
        self.adjacency.link(index, atom1, atom2);
        trace!(
            "Appended bond {} ({}-{}), length {:.4}, depth {:.4}.",
            index, atom1, atom2, geometry.length, geometry.depth
        );
        Ok(index)
    }

    /// Returns a copy of the atom at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::IndexOutOfRange`] for an unknown index.
    pub fn get_atom(&self, index: AtomIndex) -> Result<Atom, MoleculeError> {
        self.atoms
            .get(index.get())
            .copied()
            .ok_or(MoleculeError::IndexOutOfRange {
                target: Store::Atoms,
                index: index.get(),
                len: self.atoms.len(),
            })
    }

    /// Overwrites the atom at `index`.
    ///
    /// Under [`AtomUpdatePolicy::Rederive`] every bond touching the atom is
    /// re-derived before this returns. Under [`AtomUpdatePolicy::Manual`] those
    /// bonds keep their previous geometry until [`rederive_bonds`](Self::rederive_bonds)
    /// is called.
    ///
    /// # Errors
    ///
    /// * [`MoleculeError::IndexOutOfRange`] for an unknown index.
    /// * [`MoleculeError::DegenerateGeometry`] if a dependent bond would become
    ///   degenerate and the molecule rejects degenerate bonds. Nothing is
    ///   modified in that case.
    pub fn set_atom(&mut self, index: AtomIndex, atom: Atom) -> Result<(), MoleculeError> {
        self.get_atom(index)?;

        if self.options.atom_updates == AtomUpdatePolicy::Manual {
            self.atoms[index.get()] = atom;
            return Ok(());
        }

        let resolve = |i: AtomIndex| if i == index { atom } else { self.atoms[i.get()] };
        let mut updates = Vec::with_capacity(self.adjacency.bonds_of(index).len());
        for &bond_index in self.adjacency.bonds_of(index) {
            let bond = &self.bonds[bond_index.get()];
            let geometry = BondGeometry::derive(&resolve(bond.atom1), &resolve(bond.atom2));
            self.check_geometry(bond.atom1, bond.atom2, &geometry)?;
            updates.push((bond_index, geometry));
        }

        self.atoms[index.get()] = atom;
        for (bond_index, geometry) in updates {
            self.bonds[bond_index.get()].geometry = geometry;
        }
        Ok(())
    }

    /// Returns a copy of the bond at `index`, including its derived geometry.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::IndexOutOfRange`] for an unknown index.
    pub fn get_bond(&self, index: BondIndex) -> Result<Bond, MoleculeError> {
        self.bonds
            .get(index.get())
            .copied()
            .ok_or(MoleculeError::IndexOutOfRange {
                target: Store::Bonds,
                index: index.get(),
                len: self.bonds.len(),
            })
    }

    /// Re-derives the geometry of every bond from the current atom positions.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::DegenerateGeometry`] if any bond is degenerate
    /// and the molecule rejects degenerate bonds; no bond is updated then.
    pub fn rederive_bonds(&mut self) -> Result<(), MoleculeError> {
        let geometries = self.derive_all(&self.atoms)?;
        for (bond, geometry) in self.bonds.iter_mut().zip(geometries) {
            bond.geometry = geometry;
        }
        Ok(())
    }

    /// Multiplies every atom position by `matrix`, then re-derives every bond.
    ///
    /// The update is all-or-nothing: new positions and geometries are computed
    /// first and committed together.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::DegenerateGeometry`] if the transform would
    /// leave a degenerate bond and the molecule rejects degenerate bonds. The
    /// molecule is unchanged in that case.
    #[instrument(skip_all, fields(atoms = self.atoms.len(), bonds = self.bonds.len()))]
    pub fn apply_transform(&mut self, matrix: &Matrix3<f64>) -> Result<(), MoleculeError> {
        let transformed: Vec<Atom> = self
            .atoms
            .iter()
            .map(|atom| Atom::new(atom.element, transform_point(matrix, &atom.position)))
            .collect();
        let geometries = self.derive_all(&transformed)?;

        for (atom, moved) in self.atoms.iter_mut().zip(transformed) {
            *atom = moved;
        }
        for (bond, geometry) in self.bonds.iter_mut().zip(geometries) {
            bond.geometry = geometry;
        }
        debug!("Applied transform to {} atoms.", self.atoms.len());
        Ok(())
    }

    /// Rotates the whole molecule by `degrees` about `axis`.
    ///
    /// # Errors
    ///
    /// See [`apply_transform`](Self::apply_transform).
    pub fn rotate(&mut self, axis: Axis, degrees: i32) -> Result<(), MoleculeError> {
        debug!("Rotating molecule by {} degrees about {}.", degrees, axis);
        self.apply_transform(&rotation_matrix(axis, degrees))
    }

    /// Sorts the auxiliary atom and bond orders by ascending depth.
    ///
    /// The primary storage is left untouched; only [`atom_order`](Self::atom_order)
    /// and [`bond_order`](Self::bond_order) change. Ties are left in no
    /// particular order.
    pub fn sort_by_depth(&mut self) {
        depth::sort_atoms_by_depth(&mut self.atom_order, &self.atoms);
        depth::sort_bonds_by_depth(&mut self.bond_order, &self.bonds);
    }

    /// Returns the atom indices ordered by ascending depth, without modifying
    /// the molecule.
    pub fn sorted_atom_order(&self) -> Vec<AtomIndex> {
        depth::sorted_atom_order(self)
    }

    /// Returns the bond indices ordered by ascending depth, without modifying
    /// the molecule.
    pub fn sorted_bond_order(&self) -> Vec<BondIndex> {
        depth::sorted_bond_order(self)
    }

    /// Produces a fully independent copy of this molecule.
    ///
    /// The copy is sized to this molecule's capacities and options. Bonds are
    /// copied verbatim, cached geometry included, so a bond left stale under
    /// [`AtomUpdatePolicy::Manual`] stays stale in the copy.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::AllocationFailure`] if the copy's storage
    /// cannot be reserved.
    pub fn copy(&self) -> Result<Molecule, MoleculeError> {
        let mut copy =
            Self::with_capacity_and_options(self.atom_capacity, self.bond_capacity, self.options)?;
        for atom in &self.atoms {
            copy.append_atom(*atom)?;
        }
        // Capacity is already reserved; bonds were validated by the source.
        for bond in &self.bonds {
            let index = BondIndex(copy.bonds.len());
            copy.bonds.push(*bond);
            copy.bond_order.push(index);
            copy.adjacency.link(index, bond.atom1, bond.atom2);
        }
        Ok(copy)
    }

    /// Releases all storage owned by the molecule.
    ///
    /// Taking `self` by value makes any later use a compile-time error.
    pub fn destroy(self) {
        debug!(
            "Releasing molecule with {} atoms and {} bonds.",
            self.atoms.len(),
            self.bonds.len()
        );
    }

    fn check_geometry(
        &self,
        atom1: AtomIndex,
        atom2: AtomIndex,
        geometry: &BondGeometry,
    ) -> Result<(), MoleculeError> {
        if self.options.degenerate_bonds == DegenerateBondPolicy::Reject && geometry.is_degenerate()
        {
            return Err(MoleculeError::DegenerateGeometry {
                atom1: atom1.get(),
                atom2: atom2.get(),
            });
        }
        Ok(())
    }

    fn derive_all(&self, atoms: &[Atom]) -> Result<Vec<BondGeometry>, MoleculeError> {
        self.bonds
            .iter()
            .map(|bond| {
                let geometry =
                    BondGeometry::derive(&atoms[bond.atom1.get()], &atoms[bond.atom2.get()]);
                self.check_geometry(bond.atom1, bond.atom2, &geometry)?;
                Ok(geometry)
            })
            .collect()
    }

    fn reserve_atoms(&mut self, capacity: usize) -> Result<(), MoleculeError> {
        if capacity <= self.atom_capacity {
            return Ok(());
        }
        let additional = capacity - self.atoms.len();
        let failure = |_: TryReserveError| MoleculeError::AllocationFailure {
            store: Store::Atoms,
            requested: capacity,
        };
        self.atoms.try_reserve_exact(additional).map_err(failure)?;
        self.atom_order.try_reserve_exact(additional).map_err(failure)?;
        self.adjacency.try_reserve_exact(additional).map_err(failure)?;

        debug!(
            "Grew atom storage from {} to {} slots.",
            self.atom_capacity, capacity
        );
        self.atom_capacity = capacity;
        Ok(())
    }

    fn reserve_bonds(&mut self, capacity: usize) -> Result<(), MoleculeError> {
        if capacity <= self.bond_capacity {
            return Ok(());
        }
        let additional = capacity - self.bonds.len();
        let failure = |_: TryReserveError| MoleculeError::AllocationFailure {
            store: Store::Bonds,
            requested: capacity,
        };
        self.bonds.try_reserve_exact(additional).map_err(failure)?;
        self.bond_order.try_reserve_exact(additional).map_err(failure)?;

        debug!(
            "Grew bond storage from {} to {} slots.",
            self.bond_capacity, capacity
        );
        self.bond_capacity = capacity;
        Ok(())
    }
}

fn next_capacity(current: usize, store: Store) -> Result<usize, MoleculeError> {
    if current == 0 {
        return Ok(1);
    }
    current
        .checked_mul(2)
        .ok_or(MoleculeError::AllocationFailure {
            store,
            requested: usize::MAX,
        })
}
