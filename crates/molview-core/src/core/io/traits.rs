use crate::core::models::molecule::Molecule;
use crate::core::models::policy::MoleculeOptions;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading molecules from a file format.
///
/// Readers populate a [`Molecule`] exclusively through its public append
/// operations, so every invariant of the container holds for parsed input.
pub trait MolecularFile {
    /// The type of metadata associated with the file format.
    type Metadata;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a molecule from a buffered reader, building it with `options`.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    /// * `options` - Behaviour switches for the molecule being built.
    ///
    /// # Return
    ///
    /// Returns the parsed molecule and associated metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails, if the molecule rejects the parsed
    /// data, or if I/O operations encounter issues.
    fn read_with(
        reader: &mut impl BufRead,
        options: MoleculeOptions,
    ) -> Result<(Molecule, Self::Metadata), Self::Error>;

    /// Reads a molecule from a buffered reader with default options.
    ///
    /// # Errors
    ///
    /// See [`read_with`](Self::read_with).
    fn read_from(reader: &mut impl BufRead) -> Result<(Molecule, Self::Metadata), Self::Error> {
        Self::read_with(reader, MoleculeOptions::default())
    }

    /// Reads a molecule from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
        options: MoleculeOptions,
    ) -> Result<(Molecule, Self::Metadata), Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_with(&mut reader, options)
    }
}
