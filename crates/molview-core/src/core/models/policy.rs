use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How a molecule treats bonds whose atoms coincide on the viewing plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DegenerateBondPolicy {
    /// Accept the bond and report its direction as the zero vector.
    #[default]
    ZeroDirection,
    /// Refuse any operation that would leave a degenerate bond behind.
    Reject,
}

/// What happens to dependent bonds when an atom is overwritten with `set_atom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AtomUpdatePolicy {
    /// Re-derive every bond touching the atom before returning.
    #[default]
    Rederive,
    /// Leave dependent bonds stale until `rederive_bonds` is called.
    Manual,
}

/// Per-molecule behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoleculeOptions {
    pub degenerate_bonds: DegenerateBondPolicy,
    pub atom_updates: AtomUpdatePolicy,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid {kind} '{value}'")]
pub struct ParsePolicyError {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for DegenerateBondPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zero-direction" | "zero_direction" | "zero" => Ok(Self::ZeroDirection),
            "reject" => Ok(Self::Reject),
            _ => Err(ParsePolicyError {
                kind: "degenerate bond policy",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for AtomUpdatePolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rederive" => Ok(Self::Rederive),
            "manual" => Ok(Self::Manual),
            _ => Err(ParsePolicyError {
                kind: "atom update policy",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for DegenerateBondPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ZeroDirection => "zero-direction",
            Self::Reject => "reject",
        })
    }
}

impl fmt::Display for AtomUpdatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rederive => "rederive",
            Self::Manual => "manual",
        })
    }
}
