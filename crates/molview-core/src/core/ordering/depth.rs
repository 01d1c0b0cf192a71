use crate::core::models::atom::Atom;
use crate::core::models::ids::{AtomIndex, BondIndex};
use crate::core::models::molecule::Molecule;
use crate::core::models::topology::Bond;

/// One entry of a merged draw list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawItem {
    Atom(AtomIndex),
    Bond(BondIndex),
}

pub(crate) fn sort_atoms_by_depth(order: &mut [AtomIndex], atoms: &[Atom]) {
    order.sort_unstable_by(|a, b| atoms[a.get()].depth().total_cmp(&atoms[b.get()].depth()));
}

pub(crate) fn sort_bonds_by_depth(order: &mut [BondIndex], bonds: &[Bond]) {
    order.sort_unstable_by(|a, b| bonds[a.get()].depth().total_cmp(&bonds[b.get()].depth()));
}

/// Returns every atom index ordered by ascending z-coordinate.
///
/// Works on a snapshot of the molecule's auxiliary order; ties come out in no
/// particular order.
pub fn sorted_atom_order(molecule: &Molecule) -> Vec<AtomIndex> {
    let mut order = molecule.atom_order().to_vec();
    sort_atoms_by_depth(&mut order, molecule.atoms());
    order
}

/// Returns every bond index ordered by ascending derived depth.
pub fn sorted_bond_order(molecule: &Molecule) -> Vec<BondIndex> {
    let mut order = molecule.bond_order().to_vec();
    sort_bonds_by_depth(&mut order, molecule.bonds());
    order
}

/// Merges the depth-sorted atoms and bonds into a single back-to-front draw list.
///
/// At each step the next atom is drawn first only if it lies strictly deeper
/// than the next bond; on equal depth the bond goes first. Whatever remains of
/// either sequence is appended at the end, atoms before bonds.
pub fn draw_order(molecule: &Molecule) -> Vec<DrawItem> {
    let atoms = sorted_atom_order(molecule);
    let bonds = sorted_bond_order(molecule);
    let mut items = Vec::with_capacity(atoms.len() + bonds.len());

    let (mut i, mut j) = (0, 0);
    while i < atoms.len() && j < bonds.len() {
        let atom_depth = molecule.atoms()[atoms[i].get()].depth();
        let bond_depth = molecule.bonds()[bonds[j].get()].depth();
        if atom_depth < bond_depth {
            items.push(DrawItem::Atom(atoms[i]));
            i += 1;
        } else {
            items.push(DrawItem::Bond(bonds[j]));
            j += 1;
        }
    }
    items.extend(atoms[i..].iter().copied().map(DrawItem::Atom));
    items.extend(bonds[j..].iter().copied().map(DrawItem::Bond));

    items
}
