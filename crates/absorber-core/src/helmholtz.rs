//! Single Helmholtz resonator: a neck of air on a cavity spring.
//!
//! The neck mass uses the flanged end correction of 0.85r on each face, so
//! L_eff = L + 1.7r. Impedances here are acoustic (Pa·s/m³), not specific.

use crate::constants::AirProperties;
use crate::error::{ensure_positive, Result};
use crate::frequency::FrequencyAxis;
use ndarray::Array1;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Total end correction as a multiple of the neck radius (0.85r per face).
const END_CORRECTION: f64 = 2.0 * 0.85;

/// Whether the neck resistance is modelled or left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeckLosses {
    /// Poiseuille flow plus boundary-layer loss in the neck.
    #[default]
    Viscous,
    /// Zero resistance; the reactance alone.
    Lossless,
}

/// Neck and cavity geometry in SI units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HelmholtzResonator {
    pub neck_length: f64,
    pub neck_radius: f64,
    pub cavity_volume: f64,
}

/// Everything a sweep over one resonator produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HelmholtzResponse {
    pub resonance_frequency: f64,
    pub frequencies: Vec<f64>,
    pub impedance: Vec<Complex64>,
    pub absorption_area: Vec<f64>,
    pub peak_absorption_area: f64,
    pub peak_frequency: f64,
    /// λ₀²/2π at the resonance frequency.
    pub theoretical_max_area: f64,
}

impl HelmholtzResonator {
    pub fn new(neck_length: f64, neck_radius: f64, cavity_volume: f64) -> Result<Self> {
        Ok(Self {
            neck_length: ensure_positive("neck_length", neck_length)?,
            neck_radius: ensure_positive("neck_radius", neck_radius)?,
            cavity_volume: ensure_positive("cavity_volume", cavity_volume)?,
        })
    }

    /// Resonator on a square box cavity of side `cavity_width` and depth
    /// `cavity_depth`.
    pub fn with_box_cavity(
        neck_length: f64,
        neck_radius: f64,
        cavity_depth: f64,
        cavity_width: f64,
    ) -> Result<Self> {
        let depth = ensure_positive("cavity_depth", cavity_depth)?;
        let width = ensure_positive("cavity_width", cavity_width)?;
        Self::new(neck_length, neck_radius, width * width * depth)
    }

    pub fn neck_area(&self) -> f64 {
        PI * self.neck_radius * self.neck_radius
    }

    pub fn effective_length(&self) -> f64 {
        self.neck_length + END_CORRECTION * self.neck_radius
    }

    /// f₀ = (c/2π)·√(A/(V·L_eff)).
    pub fn resonance_frequency(&self, air: &AirProperties) -> f64 {
        air.speed_of_sound / (2.0 * PI)
            * (self.neck_area() / (self.cavity_volume * self.effective_length())).sqrt()
    }

    /// Neck inertance ρL_eff/A.
    pub fn acoustic_mass(&self, air: &AirProperties) -> f64 {
        air.density * self.effective_length() / self.neck_area()
    }

    /// Cavity stiffness ρc²/V.
    pub fn cavity_stiffness(&self, air: &AirProperties) -> f64 {
        air.density * air.speed_of_sound * air.speed_of_sound / self.cavity_volume
    }

    /// Viscous neck resistance 8ηL_eff/(πr⁴) + ρωδv/A at angular frequency
    /// `omega`.
    pub fn neck_resistance(&self, omega: f64, air: &AirProperties) -> f64 {
        let r = self.neck_radius;
        8.0 * air.viscosity * self.effective_length() / (PI * r.powi(4))
            + air.density * omega * air.viscous_boundary_layer(omega) / self.neck_area()
    }

    /// Z = R + j(ωM − K/ω) at each frequency.
    pub fn impedance(
        &self,
        freqs: &Array1<f64>,
        air: &AirProperties,
        losses: NeckLosses,
    ) -> Array1<Complex64> {
        let mass = self.acoustic_mass(air);
        let stiffness = self.cavity_stiffness(air);
        freqs.mapv(|f| {
            let omega = 2.0 * PI * f;
            let resistance = match losses {
                NeckLosses::Viscous => self.neck_resistance(omega, air),
                NeckLosses::Lossless => 0.0,
            };
            Complex64::new(resistance, omega * mass - stiffness / omega)
        })
    }

    /// Equivalent absorption area in m²:
    /// A(f) = (λ²/π)·R_rad·R/|Z|² with R_rad = ρc(kr)²/2π, floored at 0.
    pub fn absorption_area(&self, freqs: &Array1<f64>, air: &AirProperties) -> Array1<f64> {
        let z = self.impedance(freqs, air, NeckLosses::Viscous);
        let r = self.neck_radius;
        let z0 = air.characteristic_impedance();
        Array1::from_shape_fn(freqs.len(), |i| {
            let f = freqs[i];
            let kr = air.wavenumber(f) * r;
            let radiation = z0 * kr * kr / (2.0 * PI);
            let lambda = air.wavelength(f);
            let area = lambda * lambda / PI * radiation * z[i].re / z[i].norm_sqr();
            area.max(0.0)
        })
    }

    /// Ceiling λ₀²/2π on the absorption area of a resonator at f₀.
    pub fn max_absorption_area(&self, air: &AirProperties) -> f64 {
        let lambda = air.wavelength(self.resonance_frequency(air));
        lambda * lambda / (2.0 * PI)
    }

    /// Resonance, impedance and absorption area over `axis`.
    pub fn response(&self, axis: &FrequencyAxis, air: &AirProperties) -> HelmholtzResponse {
        let freqs = axis.values();
        let impedance = self.impedance(freqs, air, NeckLosses::Viscous);
        let area = self.absorption_area(freqs, air);
        let (peak_index, peak_area) = area
            .iter()
            .copied()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, a)| if a > best.1 { (i, a) } else { best });

        HelmholtzResponse {
            resonance_frequency: self.resonance_frequency(air),
            frequencies: axis.to_vec(),
            impedance: impedance.to_vec(),
            absorption_area: area.to_vec(),
            peak_absorption_area: peak_area,
            peak_frequency: freqs[peak_index],
            theoretical_max_area: self.max_absorption_area(air),
        }
    }
}
