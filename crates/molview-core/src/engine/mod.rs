//! # Engine Module
//!
//! Stateful services layered on top of [`crate::core`]: configuration, the
//! handle-based molecule registry and the errors they raise.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - View settings, rotation steps and the error policy
//! - **Registry** ([`registry`]) - Generational handles for callers that cannot own a `Molecule`
//! - **Error Handling** ([`error`]) - The engine-level error type wrapping every lower-level failure

pub mod config;
pub mod error;
pub mod registry;
