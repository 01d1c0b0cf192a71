//! Back-to-front ordering of atoms and bonds for painter's-algorithm renderers.
//!
//! Orders are produced as sequences of indices; the molecule's own storage is
//! never reordered.

pub mod depth;
