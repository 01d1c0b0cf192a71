//! # MolView Core Library
//!
//! An in-memory molecule container for visualization: atoms and the bonds
//! between them, bond geometry derived on the viewing plane, back-to-front
//! ordering for painter's-algorithm rendering and rigid rotations.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** The `Molecule` container, element labels,
//!   derived bond geometry, depth ordering and the SD file reader.
//!
//! - **[`engine`]: Stateful Services.** View configuration, the error policy and
//!   a handle-based registry for callers that cannot own a `Molecule` directly.
//!
//! - **[`workflows`]: The Public API.** One-call procedures that read, pose and
//!   order a molecule for drawing.

pub mod core;
pub mod engine;
pub mod workflows;
