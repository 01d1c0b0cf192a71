use crate::core::io::sdf::{SdfFile, SdfMetadata};
use crate::core::io::traits::MolecularFile;
use crate::core::models::molecule::Molecule;
use crate::core::ordering::depth::{DrawItem, draw_order};
use crate::engine::config::ViewConfig;
use crate::engine::error::EngineError;
use std::io::BufRead;
use tracing::{debug, info, instrument};

/// A molecule posed for display, together with the order to paint it in.
#[derive(Debug)]
pub struct RenderPlan {
    pub molecule: Molecule,
    /// Present when the molecule was read from a file.
    pub metadata: Option<SdfMetadata>,
    /// Atoms and bonds merged back to front.
    pub draw_order: Vec<DrawItem>,
}

/// Reads an SD record, applies the configured rotations and computes the draw order.
///
/// # Errors
///
/// Returns [`EngineError::Read`] if the record cannot be parsed, or
/// [`EngineError::Molecule`] if a rotation is rejected by the molecule's
/// degenerate-bond policy.
#[instrument(skip_all, name = "render_workflow")]
pub fn prepare(reader: &mut impl BufRead, config: &ViewConfig) -> Result<RenderPlan, EngineError> {
    let result = SdfFile::read_with(reader, config.molecule).map_err(EngineError::from);
    let (molecule, metadata) = config.error_policy.enforce(result)?;
    info!(
        "Read molecule '{}' with {} atoms and {} bonds.",
        metadata.title,
        molecule.atom_count(),
        molecule.bond_count()
    );

    let mut plan = prepare_molecule(molecule, config)?;
    plan.metadata = Some(metadata);
    Ok(plan)
}

/// Poses an already-built molecule: applies the configured rotations in order
/// and computes the draw order.
///
/// # Errors
///
/// Returns [`EngineError::Molecule`] if a rotation is rejected. The molecule
/// is consumed either way.
pub fn prepare_molecule(
    mut molecule: Molecule,
    config: &ViewConfig,
) -> Result<RenderPlan, EngineError> {
    for step in &config.rotations {
        debug!("Applying rotation {}.", step);
        let result = molecule
            .rotate(step.axis, step.degrees)
            .map_err(EngineError::from);
        config.error_policy.enforce(result)?;
    }

    let draw_order = draw_order(&molecule);
    info!(
        "Prepared draw order of {} items after {} rotation(s).",
        draw_order.len(),
        config.rotations.len()
    );

    Ok(RenderPlan {
        molecule,
        metadata: None,
        draw_order,
    })
}
