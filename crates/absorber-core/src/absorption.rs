//! Surface impedance and normal-incidence absorption of a rigidly backed
//! construction.

use crate::error::Result;
use crate::transfer_matrix::{chain, MatrixArray};
use log::warn;
use ndarray::Array1;
use num_complex::Complex64;

/// Finite stand-in for the infinite impedance of a rigid wall, used when
/// T₂₁ vanishes.
pub const RIGID_WALL_IMPEDANCE: f64 = 1e30;

/// Surface impedance Zs = T₁₁/T₂₁ of a rigidly backed stack, clamping
/// degenerate bins to [`RIGID_WALL_IMPEDANCE`].
pub fn surface_impedance(total: &MatrixArray) -> Array1<Complex64> {
    surface_impedance_clamped(total, RIGID_WALL_IMPEDANCE)
}

/// Surface impedance with an explicit clamp for bins where T₂₁ is zero or
/// the quotient is not finite.
pub fn surface_impedance_clamped(total: &MatrixArray, clamp: f64) -> Array1<Complex64> {
    let mut clamped = 0usize;
    let zs = total.mapv(|t| {
        let zs = t.a / t.c;
        if t.c.norm() == 0.0 || !zs.is_finite() {
            clamped += 1;
            Complex64::new(clamp, 0.0)
        } else {
            zs
        }
    });
    if clamped > 0 {
        warn!("surface impedance clamped to {clamp:e} at {clamped} of {} bins", total.len());
    }
    zs
}

/// Pressure reflection coefficient R = (Zs − Z₀)/(Zs + Z₀).
pub fn reflection_coefficient(zs: Complex64, z0: f64) -> Complex64 {
    (zs - z0) / (zs + z0)
}

/// Normal-incidence absorption α = 1 − |R|², clipped to [0, 1].
pub fn absorption_coefficient(zs: &Array1<Complex64>, z0: f64) -> Array1<f64> {
    zs.mapv(|z| clip_unit(1.0 - reflection_coefficient(z, z0).norm_sqr()))
}

/// Clip to [0, 1]. NaN, which only arises from a degenerate quotient,
/// maps to 0 like a rigid surface.
pub(crate) fn clip_unit(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Chain per-layer matrices and return the normal-incidence absorption.
pub fn absorption_from_layers(layers: &[MatrixArray], z0: f64) -> Result<Array1<f64>> {
    let total = chain(layers)?;
    Ok(absorption_coefficient(&surface_impedance(&total), z0))
}
