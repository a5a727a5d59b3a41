//! Error type for absorber computations.
//!
//! Every error here is a deterministic consequence of the inputs; nothing is
//! transient and nothing is worth retrying. Numerical edge cases such as a
//! rigid termination or α overshooting [0, 1] are handled where they occur
//! and never show up as errors.

use thiserror::Error;

/// Error type for absorber operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AbsorberError {
    /// A transfer-matrix chain was requested for zero layers.
    #[error("layer stack is empty: at least one layer is required")]
    EmptyStack,

    /// Perforated or slotted geometry that cannot exist.
    #[error(
        "invalid panel geometry: aperture {aperture} m must be smaller than a positive spacing (got {spacing} m)"
    )]
    InvalidPanelGeometry {
        /// Hole diameter or slot width in metres.
        aperture: f64,
        /// Centre-to-centre spacing in metres.
        spacing: f64,
    },

    /// Per-frequency arrays that should be parallel have different lengths.
    #[error("array length mismatch: expected {expected} frequency bins, got {actual}")]
    LengthMismatch {
        /// Length of the reference array.
        expected: usize,
        /// Length of the offending array.
        actual: usize,
    },

    /// A frequency axis that is empty, non-positive or not strictly increasing.
    #[error("invalid frequency axis: {0}")]
    InvalidFrequencyAxis(String),

    /// Any other physical parameter outside its domain.
    #[error("invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}

/// Result type alias for absorber operations.
pub type Result<T> = std::result::Result<T, AbsorberError>;

impl AbsorberError {
    pub(crate) fn invalid_parameter(name: &'static str, value: f64) -> Self {
        Self::InvalidParameter { name, value }
    }

    /// Returns true for errors caused by impossible layer or resonator geometry.
    pub fn is_geometry_error(&self) -> bool {
        matches!(
            self,
            AbsorberError::InvalidPanelGeometry { .. } | AbsorberError::InvalidParameter { .. }
        )
    }
}

/// Reject `value` unless it is finite and strictly positive.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(AbsorberError::invalid_parameter(name, value))
    }
}

/// Reject `value` unless it is finite and not negative.
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(AbsorberError::invalid_parameter(name, value))
    }
}

pub(crate) fn ensure_same_len(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(AbsorberError::LengthMismatch { expected, actual })
    }
}
