//! Provides input functionality for molecular file formats.
//!
//! Readers are thin collaborators of the molecule container: they parse a
//! format and feed the result through the container's append operations.

pub mod sdf;
pub mod traits;
