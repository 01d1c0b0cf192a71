use crate::core::models::policy::{AtomUpdatePolicy, DegenerateBondPolicy, MoleculeOptions};
use crate::core::utils::geometry::Axis;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid rotation step '{0}' (expected AXIS:DEGREES, e.g. 'x:90')")]
    InvalidRotation(String),

    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parsing error in '{path}': {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// What the handle-based API does when an operation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// Hand the error back to the caller.
    #[default]
    Propagate,
    /// Log the error and terminate the process.
    Abort,
}

impl ErrorPolicy {
    /// Applies the policy to the outcome of an operation.
    ///
    /// Under [`ErrorPolicy::Abort`] an error never returns: it is logged and
    /// the process exits with status 1.
    pub fn enforce<T, E: fmt::Display>(self, result: Result<T, E>) -> Result<T, E> {
        match (self, result) {
            (Self::Abort, Err(e)) => {
                error!("Unrecoverable molecule error: {}", e);
                std::process::exit(1);
            }
            (_, result) => result,
        }
    }
}

/// A single rigid rotation, written as `AXIS:DEGREES` (e.g. `z:-45`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct RotationStep {
    pub axis: Axis,
    pub degrees: i32,
}

impl RotationStep {
    pub fn new(axis: Axis, degrees: i32) -> Self {
        Self { axis, degrees }
    }
}

impl FromStr for RotationStep {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidRotation(s.to_string());
        let (axis, degrees) = s.split_once(':').ok_or_else(invalid)?;
        Ok(Self {
            axis: axis.parse().map_err(|_| invalid())?,
            degrees: degrees.trim().parse().map_err(|_| invalid())?,
        })
    }
}

impl TryFrom<String> for RotationStep {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for RotationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.axis, self.degrees)
    }
}

/// Settings for building and preparing a molecule for display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewConfig {
    /// Atom capacity to pre-size containers with.
    pub atom_capacity: usize,
    /// Bond capacity to pre-size containers with.
    pub bond_capacity: usize,
    pub molecule: MoleculeOptions,
    pub error_policy: ErrorPolicy,
    /// Rotations applied in order before ordering for display.
    pub rotations: Vec<RotationStep>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FileViewConfig {
    atom_capacity: Option<usize>,
    bond_capacity: Option<usize>,
    error_policy: Option<ErrorPolicy>,
    degenerate_bonds: Option<DegenerateBondPolicy>,
    atom_updates: Option<AtomUpdatePolicy>,
    rotations: Option<Vec<RotationStep>>,
}

impl From<FileViewConfig> for ViewConfig {
    fn from(file: FileViewConfig) -> Self {
        let defaults = ViewConfig::default();
        Self {
            atom_capacity: file.atom_capacity.unwrap_or(defaults.atom_capacity),
            bond_capacity: file.bond_capacity.unwrap_or(defaults.bond_capacity),
            molecule: MoleculeOptions {
                degenerate_bonds: file
                    .degenerate_bonds
                    .unwrap_or(defaults.molecule.degenerate_bonds),
                atom_updates: file.atom_updates.unwrap_or(defaults.molecule.atom_updates),
            },
            error_policy: file.error_policy.unwrap_or(defaults.error_policy),
            rotations: file.rotations.unwrap_or(defaults.rotations),
        }
    }
}

impl ViewConfig {
    /// Parses a configuration from TOML text. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] for malformed TOML, unknown keys or
    /// invalid values.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: FileViewConfig = toml::from_str(content).map_err(|e| ConfigError::Toml {
            path: "<inline>".to_string(),
            source: e,
        })?;
        Ok(file.into())
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Toml`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading view configuration from {}.", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let file: FileViewConfig = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Ok(file.into())
    }
}

#[derive(Default)]
pub struct ViewConfigBuilder {
    atom_capacity: Option<usize>,
    bond_capacity: Option<usize>,
    degenerate_bonds: Option<DegenerateBondPolicy>,
    atom_updates: Option<AtomUpdatePolicy>,
    error_policy: Option<ErrorPolicy>,
    rotations: Vec<RotationStep>,
    rotation_specs: Vec<String>,
}

impl ViewConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing configuration, e.g. one loaded from a file.
    pub fn from_config(config: ViewConfig) -> Self {
        Self {
            atom_capacity: Some(config.atom_capacity),
            bond_capacity: Some(config.bond_capacity),
            degenerate_bonds: Some(config.molecule.degenerate_bonds),
            atom_updates: Some(config.molecule.atom_updates),
            error_policy: Some(config.error_policy),
            rotations: config.rotations,
            rotation_specs: Vec::new(),
        }
    }

    pub fn atom_capacity(mut self, capacity: usize) -> Self {
        self.atom_capacity = Some(capacity);
        self
    }
    pub fn bond_capacity(mut self, capacity: usize) -> Self {
        self.bond_capacity = Some(capacity);
        self
    }
    pub fn degenerate_bonds(mut self, policy: DegenerateBondPolicy) -> Self {
        self.degenerate_bonds = Some(policy);
        self
    }
    pub fn atom_updates(mut self, policy: AtomUpdatePolicy) -> Self {
        self.atom_updates = Some(policy);
        self
    }
    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = Some(policy);
        self
    }
    pub fn rotate(mut self, axis: Axis, degrees: i32) -> Self {
        self.rotations.push(RotationStep::new(axis, degrees));
        self
    }
    /// Queues a rotation written as `AXIS:DEGREES`; it is validated by [`build`](Self::build).
    pub fn rotation_spec(mut self, spec: impl Into<String>) -> Self {
        self.rotation_specs.push(spec.into());
        self
    }

    pub fn build(self) -> Result<ViewConfig, ConfigError> {
        let mut rotations = self.rotations;
        for spec in &self.rotation_specs {
            rotations.push(spec.parse()?);
        }

        let defaults = ViewConfig::default();
        Ok(ViewConfig {
            atom_capacity: self.atom_capacity.unwrap_or(defaults.atom_capacity),
            bond_capacity: self.bond_capacity.unwrap_or(defaults.bond_capacity),
            molecule: MoleculeOptions {
                degenerate_bonds: self
                    .degenerate_bonds
                    .unwrap_or(defaults.molecule.degenerate_bonds),
                atom_updates: self.atom_updates.unwrap_or(defaults.molecule.atom_updates),
            },
            error_policy: self.error_policy.unwrap_or(defaults.error_policy),
            rotations,
        })
    }
}
