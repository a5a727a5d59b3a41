//! Frequency axes for absorption sweeps.

use crate::error::{AbsorberError, Result};
use ndarray::Array1;
use std::f64::consts::PI;

/// ISO 266 third-octave band centre frequencies (Hz).
pub const THIRD_OCTAVE_CENTERS: [f64; 31] = [
    20.0, 25.0, 31.5, 40.0, 50.0, 63.0, 80.0, 100.0, 125.0, 160.0, 200.0, 250.0, 315.0, 400.0,
    500.0, 630.0, 800.0, 1000.0, 1250.0, 1600.0, 2000.0, 2500.0, 3150.0, 4000.0, 5000.0, 6300.0,
    8000.0, 10000.0, 12500.0, 16000.0, 20000.0,
];

/// Ordered, strictly positive and strictly increasing frequencies in Hz.
///
/// An axis is never mutated once built; every evaluation gets its own.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyAxis {
    values: Array1<f64>,
}

impl Default for FrequencyAxis {
    /// 20 Hz to 20 kHz at 12 points per octave (121 points).
    fn default() -> Self {
        Self::geometric(20.0, 20_000.0, 12)
    }
}

impl FrequencyAxis {
    /// Geometrically spaced axis from `f_min` to `f_max`, both included.
    ///
    /// The point count is `ceil(log2(f_max / f_min) * points_per_octave) + 1`.
    pub fn logarithmic(f_min: f64, f_max: f64, points_per_octave: u32) -> Result<Self> {
        if !(f_min.is_finite() && f_min > 0.0) {
            return Err(AbsorberError::InvalidFrequencyAxis(format!(
                "f_min must be positive, got {f_min}"
            )));
        }
        if !(f_max.is_finite() && f_max > f_min) {
            return Err(AbsorberError::InvalidFrequencyAxis(format!(
                "f_max ({f_max}) must exceed f_min ({f_min})"
            )));
        }
        if points_per_octave == 0 {
            return Err(AbsorberError::InvalidFrequencyAxis(
                "points_per_octave must be at least 1".to_string(),
            ));
        }
        Ok(Self::geometric(f_min, f_max, points_per_octave))
    }

    fn geometric(f_min: f64, f_max: f64, points_per_octave: u32) -> Self {
        let octaves = (f_max / f_min).log2();
        let n = (octaves * points_per_octave as f64).ceil() as usize + 1;
        let span = (f_max / f_min).ln();
        let last = n - 1;
        let values = Array1::from_shape_fn(n, |i| {
            if i == last {
                f_max
            } else {
                f_min * (span * i as f64 / last as f64).exp()
            }
        });
        Self { values }
    }

    /// Axis from caller-supplied frequencies, validated for positivity and
    /// strict increase.
    pub fn from_values(values: impl Into<Vec<f64>>) -> Result<Self> {
        let values = values.into();
        if values.is_empty() {
            return Err(AbsorberError::InvalidFrequencyAxis(
                "at least one frequency is required".to_string(),
            ));
        }
        if let Some(bad) = values.iter().find(|f| !(f.is_finite() && **f > 0.0)) {
            return Err(AbsorberError::InvalidFrequencyAxis(format!(
                "frequencies must be positive and finite, got {bad}"
            )));
        }
        if let Some(w) = values.windows(2).find(|w| w[1] <= w[0]) {
            return Err(AbsorberError::InvalidFrequencyAxis(format!(
                "frequencies must be strictly increasing ({} then {})",
                w[0], w[1]
            )));
        }
        Ok(Self {
            values: Array1::from(values),
        })
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Angular frequencies ω = 2πf in rad/s.
    pub fn angular(&self) -> Array1<f64> {
        self.values.mapv(|f| 2.0 * PI * f)
    }

    pub fn min(&self) -> f64 {
        self.values[0]
    }

    pub fn max(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.values.to_vec()
    }
}

/// ISO 266 third-octave centres lying within `[f_min, f_max]`.
pub fn third_octave_bands(f_min: f64, f_max: f64) -> Vec<f64> {
    THIRD_OCTAVE_CENTERS
        .iter()
        .copied()
        .filter(|f| (f_min..=f_max).contains(f))
        .collect()
}
