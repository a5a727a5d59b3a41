//! Limp membrane facings and the mass-spring panel absorber.

use crate::constants::AirProperties;
use crate::error::{ensure_positive, Result};
use ndarray::Array1;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Series impedance jωm of a limp membrane with surface mass density
/// `mass_per_area` kg/m². Purely reactive, so it adds no loss of its own.
pub fn membrane_impedance(freqs: &Array1<f64>, mass_per_area: f64) -> Array1<Complex64> {
    freqs.mapv(|f| Complex64::new(0.0, 2.0 * PI * f * mass_per_area))
}

/// Mass-spring resonance of a membrane of `mass_per_area` kg/m² in front of
/// an air gap `gap` metres deep: f₀ = (c/2π)·√(ρ/(m·d)).
pub fn panel_absorber_resonance(mass_per_area: f64, gap: f64, air: &AirProperties) -> Result<f64> {
    let m = ensure_positive("mass_per_area", mass_per_area)?;
    let d = ensure_positive("gap", gap)?;
    Ok(air.speed_of_sound / (2.0 * PI) * (air.density / (m * d)).sqrt())
}
