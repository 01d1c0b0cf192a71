use crate::cli::InfoArgs;
use crate::error::{CliError, Result};
use molview::core::io::sdf::{SdfFile, SdfMetadata};
use molview::core::io::traits::MolecularFile;
use molview::core::models::molecule::Molecule;
use molview::core::models::policy::MoleculeOptions;
use std::io::Write;
use tracing::info;

pub fn run(args: InfoArgs) -> Result<()> {
    info!("Loading input molecule from {:?}", &args.input);
    let (molecule, metadata) = SdfFile::read_from_path(&args.input, MoleculeOptions::default())
        .map_err(|e| CliError::FileParsing {
            path: args.input.clone(),
            source: e.into(),
        })?;

    let stdout = std::io::stdout();
    write_summary(&molecule, &metadata, &mut stdout.lock())
}

fn write_summary(molecule: &Molecule, metadata: &SdfMetadata, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Title:    {}", metadata.title)?;
    if let Some(name) = metadata.name() {
        writeln!(out, "Name:     {}", name)?;
    }
    if !metadata.program.trim().is_empty() {
        writeln!(out, "Program:  {}", metadata.program.trim())?;
    }
    if !metadata.comment.trim().is_empty() {
        writeln!(out, "Comment:  {}", metadata.comment.trim())?;
    }
    writeln!(
        out,
        "Atoms:    {} (capacity {})",
        molecule.atom_count(),
        molecule.atom_capacity()
    )?;
    writeln!(
        out,
        "Bonds:    {} (capacity {})",
        molecule.bond_count(),
        molecule.bond_capacity()
    )?;

    let degenerate = molecule
        .bonds()
        .iter()
        .filter(|bond| bond.geometry.is_degenerate())
        .count();
    if degenerate > 0 {
        writeln!(out, "Warning:  {} bond(s) have no on-screen extent", degenerate)?;
    }

    for (field, value) in &metadata.data {
        writeln!(out, "<{}> {}", field, value)?;
    }
    Ok(())
}
