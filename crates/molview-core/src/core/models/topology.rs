use super::ids::{AtomIndex, BondIndex};
use crate::core::utils::geometry::BondGeometry;

/// A connection between two atoms of the same molecule.
///
/// A bond refers to its atoms only by index; positions are always resolved
/// against the owning molecule's current atom storage. `geometry` is derived
/// from those positions and kept in sync by the molecule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bond {
    pub atom1: AtomIndex,
    pub atom2: AtomIndex,
    pub electron_pairs: u8, // Number of shared electron pairs (1 = single, 2 = double, ...)
    pub geometry: BondGeometry,
}

impl Bond {
    pub(crate) fn new(
        atom1: AtomIndex,
        atom2: AtomIndex,
        electron_pairs: u8,
        geometry: BondGeometry,
    ) -> Self {
        Self {
            atom1,
            atom2,
            electron_pairs,
            geometry,
        }
    }

    pub fn contains(&self, atom: AtomIndex) -> bool {
        self.atom1 == atom || self.atom2 == atom
    }

    /// Returns the atom on the other end of the bond, if `atom` is part of it.
    pub fn partner(&self, atom: AtomIndex) -> Option<AtomIndex> {
        if self.atom1 == atom {
            Some(self.atom2)
        } else if self.atom2 == atom {
            Some(self.atom1)
        } else {
            None
        }
    }

    #[inline]
    pub fn x1(&self) -> f64 {
        self.geometry.start.x
    }

    #[inline]
    pub fn y1(&self) -> f64 {
        self.geometry.start.y
    }

    #[inline]
    pub fn x2(&self) -> f64 {
        self.geometry.end.x
    }

    #[inline]
    pub fn y2(&self) -> f64 {
        self.geometry.end.y
    }

    #[inline]
    pub fn dx(&self) -> f64 {
        self.geometry.direction.x
    }

    #[inline]
    pub fn dy(&self) -> f64 {
        self.geometry.direction.y
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.geometry.length
    }

    #[inline]
    pub fn depth(&self) -> f64 {
        self.geometry.depth
    }
}

/// Reverse adjacency: for each atom, the bonds that reference it.
#[derive(Debug, Clone, Default)]
pub(crate) struct BondAdjacency {
    by_atom: Vec<Vec<BondIndex>>,
}

impl BondAdjacency {
    pub(crate) fn len(&self) -> usize {
        self.by_atom.len()
    }

    pub(crate) fn try_reserve_exact(
        &mut self,
        additional: usize,
    ) -> Result<(), std::collections::TryReserveError> {
        self.by_atom.try_reserve_exact(additional)
    }

    pub(crate) fn push_atom(&mut self) {
        self.by_atom.push(Vec::new());
    }

    pub(crate) fn link(&mut self, bond: BondIndex, atom1: AtomIndex, atom2: AtomIndex) {
        self.by_atom[atom1.get()].push(bond);
        if atom2 != atom1 {
            self.by_atom[atom2.get()].push(bond);
        }
    }

    pub(crate) fn bonds_of(&self, atom: AtomIndex) -> &[BondIndex] {
        self.by_atom
            .get(atom.get())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;

    fn bond(a1: usize, a2: usize) -> Bond {
        let a = Atom::from_parts("C", 0.0, 0.0, 0.0).unwrap();
        let b = Atom::from_parts("O", 1.0, 0.0, 2.0).unwrap();
        Bond::new(AtomIndex(a1), AtomIndex(a2), 1, BondGeometry::derive(&a, &b))
    }

    #[test]
    fn bond_contains_returns_true_for_both_atoms() {
        let b = bond(10, 20);
        assert!(b.contains(AtomIndex(10)));
        assert!(b.contains(AtomIndex(20)));
        assert!(!b.contains(AtomIndex(30)));
    }

    #[test]
    fn partner_returns_the_opposite_atom() {
        let b = bond(3, 7);
        assert_eq!(b.partner(AtomIndex(3)), Some(AtomIndex(7)));
        assert_eq!(b.partner(AtomIndex(7)), Some(AtomIndex(3)));
        assert_eq!(b.partner(AtomIndex(5)), None);
    }

    #[test]
    fn accessors_expose_derived_geometry() {
        let b = bond(0, 1);
        assert_eq!((b.x1(), b.y1(), b.x2(), b.y2()), (0.0, 0.0, 1.0, 0.0));
        assert_eq!((b.dx(), b.dy()), (1.0, 0.0));
        assert_eq!(b.length(), 1.0);
        assert_eq!(b.depth(), 1.0);
    }

    #[test]
    fn adjacency_links_both_ends_once() {
        let mut adjacency = BondAdjacency::default();
        for _ in 0..3 {
            adjacency.push_atom();
        }
        adjacency.link(BondIndex(0), AtomIndex(0), AtomIndex(1));
        adjacency.link(BondIndex(1), AtomIndex(2), AtomIndex(2));

        assert_eq!(adjacency.len(), 3);
        assert_eq!(adjacency.bonds_of(AtomIndex(0)), &[BondIndex(0)]);
        assert_eq!(adjacency.bonds_of(AtomIndex(1)), &[BondIndex(0)]);
        assert_eq!(adjacency.bonds_of(AtomIndex(2)), &[BondIndex(1)]);
        assert!(adjacency.bonds_of(AtomIndex(9)).is_empty());
    }
}
