//! # Core Models Module
//!
//! Data structures describing a molecule as the visualization pipeline sees it.
//!
//! ## Key Components
//!
//! - [`atom`] - Element labels and atom records
//! - [`element`] - Static element symbol table
//! - [`topology`] - Bonds and the atom-to-bond reverse index
//! - [`molecule`] - The growable molecule container
//! - [`ids`] - Index types used to address atoms and bonds
//! - [`policy`] - Per-molecule behaviour switches
//! - [`error`] - Errors raised by molecule operations
//!
//! ## Usage
//!
//! ```
//! use molview::core::models::atom::Atom;
//! use molview::core::models::ids::AtomIndex;
//! use molview::core::models::molecule::Molecule;
//!
//! let mut molecule = Molecule::new();
//! let c = molecule.append_atom(Atom::from_parts("C", 0.0, 0.0, 0.0)?)?;
//! let o = molecule.append_atom(Atom::from_parts("O", 1.0, 0.0, 0.0)?)?;
//! let bond = molecule.append_bond(c, o, 2)?;
//!
//! assert_eq!(molecule.get_bond(bond)?.length(), 1.0);
//! assert_eq!(molecule.get_atom(AtomIndex(1))?.element.as_str(), "O");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod atom;
pub mod element;
pub mod error;
pub mod ids;
pub mod molecule;
pub mod policy;
pub mod topology;
