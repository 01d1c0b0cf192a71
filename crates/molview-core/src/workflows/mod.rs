//! # Workflows Module
//!
//! High-level entry points that tie [`crate::core`] and [`crate::engine`]
//! together into complete procedures.
//!
//! - **Render Workflow** ([`render`]) - Read a molecule, pose it with the configured
//!   rotations and produce a back-to-front draw list.

pub mod render;
