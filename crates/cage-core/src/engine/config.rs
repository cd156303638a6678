//! # Engine Configuration
//!
//! Plain-value configuration for the assembly and relaxation stages. Configs
//! are constructed by callers (CLI, tests) and passed down by reference; the
//! engine never reads files or environment variables on its own.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid parameter {name}: {message}")]
    InvalidParameter { name: &'static str, message: String },
}

/// How the polyhedral skeleton is sized before fragments are placed on it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ScaleMode {
    /// Size each edge to the fragment's connection length plus one bond length
    /// of clearance at either end.
    #[default]
    Auto,
    /// Use the given edge length verbatim.
    Fixed(f64),
}

/// Parameters controlling a single assembly pass.
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyConfig {
    pub scale: ScaleMode,
    /// Clearance added at each end of an edge under [`ScaleMode::Auto`].
    pub bond_length: f64,
    /// Element label placed at every skeleton vertex, if any.
    pub metal: Option<String>,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            scale: ScaleMode::Auto,
            bond_length: 1.5,
            metal: None,
        }
    }
}

impl AssemblyConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] for a non-positive fixed
    /// scale or a negative bond length.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let ScaleMode::Fixed(scale) = self.scale {
            if scale <= 0.0 || !scale.is_finite() {
                return Err(ConfigError::InvalidParameter {
                    name: "scale",
                    message: format!("fixed edge length must be positive, got {}", scale),
                });
            }
        }
        if self.bond_length < 0.0 || !self.bond_length.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "bond_length",
                message: format!("bond length must be non-negative, got {}", self.bond_length),
            });
        }
        Ok(())
    }
}

/// Parameters controlling the discrete rotational scan of [`relax_edges`].
///
/// [`relax_edges`]: crate::engine::assembly::Assembly::relax_edges
#[derive(Debug, Clone, PartialEq)]
pub struct RelaxConfig {
    /// Step between scanned rotation angles, in degrees.
    pub increment_degrees: f64,
    /// Exclusive upper bound of the scan, in degrees.
    pub scan_limit_degrees: f64,
}

impl Default for RelaxConfig {
    fn default() -> Self {
        Self {
            increment_degrees: 15.0,
            scan_limit_degrees: 180.0,
        }
    }
}

impl RelaxConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] when the increment or limit
    /// is non-positive or non-finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.increment_degrees <= 0.0 || !self.increment_degrees.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "increment_degrees",
                message: format!("must be positive, got {}", self.increment_degrees),
            });
        }
        if self.scan_limit_degrees <= 0.0 || !self.scan_limit_degrees.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "scan_limit_degrees",
                message: format!("must be positive, got {}", self.scan_limit_degrees),
            });
        }
        Ok(())
    }

    /// The scanned candidate angles in degrees: `i * increment` for every `i`
    /// with `i * increment < scan_limit`, excluding the unrotated 0 degrees.
    pub fn candidate_angles(&self) -> Vec<f64> {
        let steps = (self.scan_limit_degrees / self.increment_degrees) as usize;
        (1..steps)
            .map(|i| i as f64 * self.increment_degrees)
            .collect()
    }
}
