use crate::core::io::traits::MolecularFile;
use crate::core::models::atom::{Atom, ElementSymbol, ElementSymbolError};
use crate::core::models::error::MoleculeError;
use crate::core::models::ids::AtomIndex;
use crate::core::models::molecule::Molecule;
use crate::core::models::policy::MoleculeOptions;
use nalgebra::Point3;
use std::collections::BTreeMap;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::{debug, warn};

const RECORD_TERMINATOR: &str = "$$$$";
const PROPERTIES_END: &str = "M  END";

/// Header and data-item information carried alongside the connection table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SdfMetadata {
    /// First header line, usually the molecule name.
    pub title: String,
    /// Second header line: program, timestamp and dimensionality code.
    pub program: String,
    /// Third header line, free-form.
    pub comment: String,
    /// SD data items (`> <FIELD>` blocks), keyed by field name.
    pub data: BTreeMap<String, String>,
}

impl SdfMetadata {
    /// Returns the `NAME` data item, if present.
    pub fn name(&self) -> Option<&str> {
        self.data.get("NAME").map(String::as_str)
    }
}

#[derive(Debug, Error)]
pub enum SdfError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: SdfParseErrorKind },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
    #[error("Molecule rejected data on line {line}: {source}")]
    Molecule {
        line: usize,
        #[source]
        source: MoleculeError,
    },
}

#[derive(Debug, Error)]
pub enum SdfParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid {axis} coordinate (value: '{value}')")]
    InvalidFloat { axis: char, value: String },
    #[error("Atom line must contain x, y, z and an element symbol")]
    AtomLineTooShort,
    #[error("Invalid element symbol: {0}")]
    InvalidElement(#[from] ElementSymbolError),
    #[error("Atom numbers are 1-based; found 0")]
    ZeroAtomNumber,
    #[error("Only V2000 connection tables are supported")]
    UnsupportedVersion,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end)
        .or_else(|| line.get(start..))
        .unwrap_or("")
        .trim()
}

/// Line source that keeps track of 1-based line numbers.
struct Lines<R> {
    inner: io::Lines<R>,
    number: usize,
}

impl<R: BufRead> Lines<R> {
    fn new(reader: R) -> Self {
        Self {
            inner: reader.lines(),
            number: 0,
        }
    }

    fn next_line(&mut self) -> Result<Option<String>, SdfError> {
        match self.inner.next() {
            Some(line) => {
                self.number += 1;
                Ok(Some(line?))
            }
            None => Ok(None),
        }
    }

    fn require(&mut self, what: &str) -> Result<String, SdfError> {
        self.next_line()?
            .ok_or_else(|| SdfError::MissingRecord(what.to_string()))
    }
}

fn parse_count(line: &str, line_num: usize, start: usize, columns: &str) -> Result<usize, SdfError> {
    let value = slice_and_trim(line, start, start + 3);
    value.parse().map_err(|_| SdfError::Parse {
        line: line_num,
        kind: SdfParseErrorKind::InvalidInt {
            columns: columns.into(),
            value: value.into(),
        },
    })
}

fn parse_coordinate(value: &str, axis: char, line_num: usize) -> Result<f64, SdfError> {
    value.parse().map_err(|_| SdfError::Parse {
        line: line_num,
        kind: SdfParseErrorKind::InvalidFloat {
            axis,
            value: value.into(),
        },
    })
}

fn parse_atom_line(line: &str, line_num: usize) -> Result<Atom, SdfError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(SdfError::Parse {
            line: line_num,
            kind: SdfParseErrorKind::AtomLineTooShort,
        });
    }
    let x = parse_coordinate(parts[0], 'x', line_num)?;
    let y = parse_coordinate(parts[1], 'y', line_num)?;
    let z = parse_coordinate(parts[2], 'z', line_num)?;
    let element = ElementSymbol::new(parts[3]).map_err(|e| SdfError::Parse {
        line: line_num,
        kind: e.into(),
    })?;
    if !element.is_known() {
        warn!(
            "Line {}: '{}' is not a known element symbol; keeping it as a label.",
            line_num, element
        );
    }
    Ok(Atom::new(element, Point3::new(x, y, z)))
}

/// Reads the leading three-column integer fields of a counts or bond line.
///
/// Lines that are not padded to the fixed columns (e.g. `3 2`) are read as
/// whitespace-separated fields instead; if that fails too, the fixed-column
/// error is reported.
fn parse_fields<const N: usize>(line: &str, line_num: usize) -> Result<[usize; N], SdfError> {
    let mut values = [0; N];
    let mut fixed_error = None;
    for (i, value) in values.iter_mut().enumerate() {
        let columns = format!("{}-{}", 3 * i + 1, 3 * i + 3);
        match parse_count(line, line_num, 3 * i, &columns) {
            Ok(parsed) => *value = parsed,
            Err(e) => {
                fixed_error = Some(e);
                break;
            }
        }
    }
    let Some(error) = fixed_error else {
        return Ok(values);
    };

    let mut tokens = line.split_whitespace();
    for value in values.iter_mut() {
        match tokens.next().and_then(|token| token.parse().ok()) {
            Some(parsed) => *value = parsed,
            None => return Err(error),
        }
    }
    Ok(values)
}

fn atom_number(number: usize, line_num: usize) -> Result<AtomIndex, SdfError> {
    if number == 0 {
        return Err(SdfError::Parse {
            line: line_num,
            kind: SdfParseErrorKind::ZeroAtomNumber,
        });
    }
    Ok(AtomIndex(number - 1))
}

fn parse_data_header(line: &str) -> Option<String> {
    let rest = line.strip_prefix('>')?;
    let start = rest.find('<')? + 1;
    let end = start + rest[start..].find('>')?;
    Some(rest[start..end].to_string())
}

/// Reader for the first record of an MDL V2000 molfile or SD file.
///
/// Bond type (columns 7-9 of a bond line) is stored as the bond's electron-pair
/// count.
pub struct SdfFile;

impl MolecularFile for SdfFile {
    type Metadata = SdfMetadata;
    type Error = SdfError;

    fn read_with(
        reader: &mut impl BufRead,
        options: MoleculeOptions,
    ) -> Result<(Molecule, Self::Metadata), Self::Error> {
        let mut lines = Lines::new(reader);
        let mut metadata = SdfMetadata {
            title: lines.require("header block")?.trim().to_string(),
            program: lines.require("header block")?.trim_end().to_string(),
            comment: lines.require("header block")?.trim_end().to_string(),
            ..SdfMetadata::default()
        };

        let counts = lines.require("counts line")?;
        let counts_line = lines.number;
        if counts.contains("V3000") {
            return Err(SdfError::Parse {
                line: counts_line,
                kind: SdfParseErrorKind::UnsupportedVersion,
            });
        }
        let [atom_count, bond_count] = parse_fields::<2>(&counts, counts_line)?;

        let mut molecule = Molecule::with_capacity_and_options(atom_count, bond_count, options)
            .map_err(|source| SdfError::Molecule {
                line: counts_line,
                source,
            })?;

        for _ in 0..atom_count {
            let line = lines.require("atom block")?;
            let atom = parse_atom_line(&line, lines.number)?;
            molecule
                .append_atom(atom)
                .map_err(|source| SdfError::Molecule {
                    line: lines.number,
                    source,
                })?;
        }

        for _ in 0..bond_count {
            let line = lines.require("bond block")?;
            let line_num = lines.number;
            let [atom1, atom2, bond_type] = parse_fields::<3>(&line, line_num)?;
            let atom1 = atom_number(atom1, line_num)?;
            let atom2 = atom_number(atom2, line_num)?;
            let electron_pairs = u8::try_from(bond_type).map_err(|_| SdfError::Parse {
                line: line_num,
                kind: SdfParseErrorKind::InvalidInt {
                    columns: "7-9".into(),
                    value: bond_type.to_string(),
                },
            })?;
            molecule
                .append_bond(atom1, atom2, electron_pairs)
                .map_err(|source| SdfError::Molecule {
                    line: line_num,
                    source,
                })?;
        }

        let mut current_field: Option<(String, Vec<String>)> = None;
        while let Some(line) = lines.next_line()? {
            if line.trim_end() == RECORD_TERMINATOR {
                break;
            }
            if let Some((field, values)) = current_field.as_mut() {
                if line.trim().is_empty() {
                    metadata.data.insert(field.clone(), values.join("\n"));
                    current_field = None;
                } else {
                    values.push(line.trim_end().to_string());
                }
                continue;
            }
            if line.trim_end() == PROPERTIES_END {
                continue;
            }
            if let Some(field) = parse_data_header(&line) {
                current_field = Some((field, Vec::new()));
            }
        }
        if let Some((field, values)) = current_field {
            metadata.data.insert(field, values.join("\n"));
        }

        debug!(
            "Parsed SDF record '{}' with {} atoms and {} bonds.",
            metadata.title,
            molecule.atom_count(),
            molecule.bond_count()
        );
        Ok((molecule, metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::error::Store;
    use crate::core::models::ids::BondIndex;
    use crate::core::models::policy::DegenerateBondPolicy;
    use std::io::{Cursor, Write};

    const WATER: &str = "Water
  molview 3D

  3  2  0  0  0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.1173 O   0  0  0  0  0  0  0  0  0  0  0  0
    0.0000    0.7572   -0.4692 H   0  0  0  0  0  0  0  0  0  0  0  0
    0.0000   -0.7572   -0.4692 H   0  0  0  0  0  0  0  0  0  0  0  0
  1  2  1  0  0  0  0
  1  3  1  0  0  0  0
M  END
> <NAME>
water

> <FORMULA>
H2O

$$$$
";

    fn read(input: &str) -> Result<(Molecule, SdfMetadata), SdfError> {
        SdfFile::read_from(&mut Cursor::new(input))
    }

    #[test]
    fn reads_atoms_bonds_and_header() {
        let (molecule, metadata) = read(WATER).unwrap();

        assert_eq!(metadata.title, "Water");
        assert_eq!(metadata.program, "  molview 3D");
        assert_eq!(metadata.comment, "");
        assert_eq!(molecule.atom_count(), 3);
        assert_eq!(molecule.bond_count(), 2);
        assert_eq!(molecule.atom_capacity(), 3);
        assert_eq!(molecule.bond_capacity(), 2);

        let oxygen = molecule.get_atom(AtomIndex(0)).unwrap();
        assert_eq!(oxygen.element.as_str(), "O");
        assert_eq!(oxygen.position, Point3::new(0.0, 0.0, 0.1173));

        let bond = molecule.get_bond(BondIndex(1)).unwrap();
        assert_eq!((bond.atom1, bond.atom2), (AtomIndex(0), AtomIndex(2)));
        assert_eq!(bond.electron_pairs, 1);
        assert!((bond.length() - 0.7572).abs() < 1e-12);
    }

    #[test]
    fn collects_data_items() {
        let (_, metadata) = read(WATER).unwrap();
        assert_eq!(metadata.name(), Some("water"));
        assert_eq!(metadata.data.get("FORMULA").map(String::as_str), Some("H2O"));
        assert_eq!(metadata.data.len(), 2);
    }

    #[test]
    fn data_item_at_end_of_input_is_kept() {
        let input = WATER.replace("> <FORMULA>\nH2O\n\n$$$$\n", "> <FORMULA>\nH2O");
        let (_, metadata) = read(&input).unwrap();
        assert_eq!(metadata.data.get("FORMULA").map(String::as_str), Some("H2O"));
    }

    #[test]
    fn missing_header_is_reported() {
        let err = read("Only a title\n").unwrap_err();
        assert!(matches!(err, SdfError::MissingRecord(ref what) if what == "header block"));
    }

    #[test]
    fn truncated_atom_block_is_reported() {
        let input: String = WATER.lines().take(5).map(|l| format!("{}\n", l)).collect();
        let err = read(&input).unwrap_err();
        assert!(matches!(err, SdfError::MissingRecord(ref what) if what == "atom block"));
    }

    #[test]
    fn invalid_counts_line_reports_columns() {
        let input = WATER.replace("  3  2  0", "  x  2  0");
        let err = read(&input).unwrap_err();
        match err {
            SdfError::Parse {
                line: 4,
                kind: SdfParseErrorKind::InvalidInt { columns, value },
            } => {
                assert_eq!(columns, "1-3");
                assert_eq!(value, "x");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unpadded_counts_and_bond_lines_are_read_by_whitespace() {
        let input = "Water
  hand written

3 2
0.0 0.0 0.1173 O
0.0 0.7572 -0.4692 H
0.0 -0.7572 -0.4692 H
1 2 1
1 3 2
M  END
";
        let (molecule, _) = read(input).unwrap();
        assert_eq!(molecule.atom_count(), 3);
        assert_eq!(molecule.bond_count(), 2);
        let bond = molecule.get_bond(BondIndex(1)).unwrap();
        assert_eq!((bond.atom1, bond.atom2), (AtomIndex(0), AtomIndex(2)));
        assert_eq!(bond.electron_pairs, 2);
    }

    #[test]
    fn short_bond_line_reports_missing_bond_type() {
        let input = WATER.replace("  1  3  1  0  0  0  0", "  1  3");
        match read(&input).unwrap_err() {
            SdfError::Parse {
                line: 9,
                kind: SdfParseErrorKind::InvalidInt { columns, .. },
            } => assert_eq!(columns, "7-9"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_coordinate_reports_line_and_axis() {
        let input = WATER.replace("0.7572   -0.4692 H", "abc   -0.4692 H");
        let err = read(&input).unwrap_err();
        assert!(matches!(
            err,
            SdfError::Parse {
                line: 6,
                kind: SdfParseErrorKind::InvalidFloat { axis: 'y', .. }
            }
        ));
    }

    #[test]
    fn overlong_element_symbol_is_rejected() {
        let input = WATER.replacen(" O   0", " Oxy 0", 1);
        let err = read(&input).unwrap_err();
        assert!(matches!(
            err,
            SdfError::Parse {
                line: 5,
                kind: SdfParseErrorKind::InvalidElement(ElementSymbolError::TooLong(_))
            }
        ));
    }

    #[test]
    fn bond_to_missing_atom_surfaces_molecule_error() {
        let input = WATER.replace("  1  3  1  0", "  1  4  1  0");
        let err = read(&input).unwrap_err();
        match err {
            SdfError::Molecule { line, source } => {
                assert_eq!(line, 9);
                assert_eq!(
                    source,
                    MoleculeError::IndexOutOfRange {
                        target: Store::Atoms,
                        index: 3,
                        len: 3,
                    }
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn zero_atom_number_is_rejected() {
        let input = WATER.replace("  1  3  1  0", "  0  3  1  0");
        let err = read(&input).unwrap_err();
        assert!(matches!(
            err,
            SdfError::Parse {
                kind: SdfParseErrorKind::ZeroAtomNumber,
                ..
            }
        ));
    }

    #[test]
    fn v3000_files_are_rejected() {
        let input = WATER.replace("V2000", "V3000");
        let err = read(&input).unwrap_err();
        assert!(matches!(
            err,
            SdfError::Parse {
                line: 4,
                kind: SdfParseErrorKind::UnsupportedVersion
            }
        ));
    }

    #[test]
    fn options_are_applied_while_reading() {
        // Both hydrogens sit directly above the oxygen on the viewing plane.
        let input = WATER
            .replace("0.0000    0.7572   -0.4692", "0.0000    0.0000   -0.4692")
            .replace("0.0000   -0.7572   -0.4692", "0.0000    0.0000    0.9000");
        let options = MoleculeOptions {
            degenerate_bonds: DegenerateBondPolicy::Reject,
            ..MoleculeOptions::default()
        };

        let err = SdfFile::read_with(&mut Cursor::new(input.as_str()), options).unwrap_err();
        assert!(matches!(
            err,
            SdfError::Molecule {
                source: MoleculeError::DegenerateGeometry { atom1: 0, atom2: 1 },
                ..
            }
        ));

        let (molecule, _) = read(&input).unwrap();
        assert!(molecule.get_bond(BondIndex(0)).unwrap().geometry.is_degenerate());
    }

    #[test]
    fn reads_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(WATER.as_bytes()).unwrap();

        let (molecule, metadata) =
            SdfFile::read_from_path(file.path(), MoleculeOptions::default()).unwrap();
        assert_eq!(molecule.atom_count(), 3);
        assert_eq!(metadata.name(), Some("water"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SdfFile::read_from_path(dir.path().join("absent.sdf"), MoleculeOptions::default())
            .unwrap_err();
        assert!(matches!(err, SdfError::Io(_)));
    }

    #[test]
    fn parse_data_header_extracts_field_name() {
        assert_eq!(parse_data_header("> <NAME>"), Some("NAME".to_string()));
        assert_eq!(parse_data_header(">  <ID>  (1)"), Some("ID".to_string()));
        assert_eq!(parse_data_header("M  END"), None);
    }
}
