//! # Core Module
//!
//! The building blocks of MolView: the molecule container, the geometry it
//! derives, depth ordering and file input.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, bonds and the growable molecule container
//! - **Geometry** ([`utils`]) - Planar bond geometry and rigid rotations
//! - **Render Ordering** ([`ordering`]) - Back-to-front atom and bond orders
//! - **File I/O** ([`io`]) - Reading molecules from MDL molfiles / SD files
//!
//! ## Key Capabilities
//!
//! - **Index-based bonds** that survive storage growth without dangling references
//! - **Derived bond geometry** kept in step with atom positions
//! - **Painter's-algorithm ordering** without reordering canonical storage

pub mod io;
pub mod models;
pub mod ordering;
pub mod utils;
