use super::element::element_name;
use nalgebra::Point3;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum number of significant characters in an element label.
pub const MAX_SYMBOL_LEN: usize = 2;

/// Errors raised when an element label cannot be represented as an [`ElementSymbol`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ElementSymbolError {
    #[error("Element symbol is empty")]
    Empty,
    #[error("Element symbol '{0}' exceeds {MAX_SYMBOL_LEN} characters")]
    TooLong(String),
    #[error("Element symbol '{0}' contains non-alphabetic characters")]
    InvalidCharacter(String),
}

/// A bounded element label holding one or two ASCII letters (e.g. "C", "Cl").
///
/// The label is stored inline, so atoms stay `Copy` and never allocate.
/// Construction trims surrounding whitespace and rejects anything that does
/// not fit; labels are never silently truncated.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementSymbol {
    bytes: [u8; MAX_SYMBOL_LEN],
    len: u8,
}

impl ElementSymbol {
    /// Creates a symbol from a textual label.
    ///
    /// # Arguments
    ///
    /// * `label` - The element label, e.g. `"C"` or `" O "`.
    ///
    /// # Errors
    ///
    /// Returns [`ElementSymbolError`] if the trimmed label is empty, longer than
    /// two characters, or contains anything other than ASCII letters.
    pub fn new(label: &str) -> Result<Self, ElementSymbolError> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(ElementSymbolError::Empty);
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ElementSymbolError::InvalidCharacter(trimmed.to_string()));
        }
        if trimmed.len() > MAX_SYMBOL_LEN {
            return Err(ElementSymbolError::TooLong(trimmed.to_string()));
        }

        let mut bytes = [0u8; MAX_SYMBOL_LEN];
        bytes[..trimmed.len()].copy_from_slice(trimmed.as_bytes());
        Ok(Self {
            bytes,
            len: trimmed.len() as u8,
        })
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII letters are ever stored.
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or_default()
    }

    /// Returns the full element name if the symbol is a known element.
    pub fn name(&self) -> Option<&'static str> {
        element_name(self.as_str())
    }

    pub fn is_known(&self) -> bool {
        self.name().is_some()
    }
}

impl FromStr for ElementSymbol {
    type Err = ElementSymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for ElementSymbol {
    type Error = ElementSymbolError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ElementSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for ElementSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementSymbol({:?})", self.as_str())
    }
}

/// Represents a labeled point in 3-D space.
///
/// Atoms are plain values: reading an atom out of a molecule or writing one
/// back always copies it, so callers never hold references into the
/// molecule's backing storage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atom {
    /// The element label (e.g. "C", "O").
    pub element: ElementSymbol,
    /// The 3-D coordinates of the atom.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new `Atom`.
    ///
    /// # Arguments
    ///
    /// * `element` - The element label of the atom.
    /// * `position` - The 3-D coordinates of the atom.
    pub fn new(element: ElementSymbol, position: Point3<f64>) -> Self {
        Self { element, position }
    }

    /// Creates a new `Atom` from a textual label and raw coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`ElementSymbolError`] if `label` is not a valid element label.
    pub fn from_parts(label: &str, x: f64, y: f64, z: f64) -> Result<Self, ElementSymbolError> {
        Ok(Self::new(ElementSymbol::new(label)?, Point3::new(x, y, z)))
    }

    /// The depth coordinate used for back-to-front ordering.
    #[inline]
    pub fn depth(&self) -> f64 {
        self.position.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_accepts_one_and_two_letter_labels() {
        assert_eq!(ElementSymbol::new("C").unwrap().as_str(), "C");
        assert_eq!(ElementSymbol::new("Cl").unwrap().as_str(), "Cl");
    }

    #[test]
    fn symbol_trims_surrounding_whitespace() {
        let symbol = ElementSymbol::new("  O ").unwrap();
        assert_eq!(symbol.as_str(), "O");
        assert_eq!(symbol, ElementSymbol::new("O").unwrap());
    }

    #[test]
    fn symbol_rejects_empty_labels() {
        assert_eq!(ElementSymbol::new(""), Err(ElementSymbolError::Empty));
        assert_eq!(ElementSymbol::new("   "), Err(ElementSymbolError::Empty));
    }

    #[test]
    fn symbol_rejects_overlong_labels_instead_of_truncating() {
        assert_eq!(
            ElementSymbol::new("Cla"),
            Err(ElementSymbolError::TooLong("Cla".to_string()))
        );
    }

    #[test]
    fn symbol_rejects_non_alphabetic_labels() {
        assert!(matches!(
            ElementSymbol::new("C1"),
            Err(ElementSymbolError::InvalidCharacter(_))
        ));
        assert!(matches!(
            ElementSymbol::new("é"),
            Err(ElementSymbolError::InvalidCharacter(_))
        ));
    }

    #[test]
    fn symbol_reports_known_elements() {
        let carbon: ElementSymbol = "C".parse().unwrap();
        assert!(carbon.is_known());
        assert_eq!(carbon.name(), Some("Carbon"));

        let unknown: ElementSymbol = "Xx".parse().unwrap();
        assert!(!unknown.is_known());
    }

    #[test]
    fn symbol_display_and_debug_output() {
        let symbol = ElementSymbol::new("Na").unwrap();
        assert_eq!(symbol.to_string(), "Na");
        assert_eq!(format!("{:?}", symbol), "ElementSymbol(\"Na\")");
    }

    #[test]
    fn atom_from_parts_sets_fields() {
        let atom = Atom::from_parts("N", 1.0, 2.0, 3.0).unwrap();
        assert_eq!(atom.element.as_str(), "N");
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.depth(), 3.0);
    }

    #[test]
    fn atom_is_copied_by_value() {
        let original = Atom::from_parts("C", 0.0, 0.0, 0.0).unwrap();
        let mut copy = original;
        copy.position.x = 5.0;
        assert_eq!(original.position.x, 0.0);
        assert_ne!(original, copy);
    }
}
