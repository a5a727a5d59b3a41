//! Thin perforated, slotted and micro-perforated facings.
//!
//! Each panel is modelled as a zero-thickness series impedance whose
//! reactance carries the end-corrected mass of air in the apertures and
//! whose resistance combines the viscous loss inside the holes with the
//! surface loss of the boundary layer.

use crate::constants::{area_from_diameter, AirProperties};
use crate::error::{ensure_non_negative, ensure_positive, AbsorberError, Result};
use ndarray::Array1;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, SQRT_2};

/// End correction per aperture face as a fraction of the aperture radius.
const END_CORRECTION: f64 = 0.85;

/// A thin facing sheet. All lengths in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Panel {
    /// Round holes on a square grid.
    Perforated {
        thickness: f64,
        hole_diameter: f64,
        hole_spacing: f64,
    },
    /// Parallel slots.
    Slotted {
        thickness: f64,
        slot_width: f64,
        slot_spacing: f64,
    },
    /// Sub-millimetre holes (Maa) with open-area ratio `porosity`.
    MicroPerforated {
        thickness: f64,
        hole_diameter: f64,
        porosity: f64,
    },
}

impl Panel {
    /// Micro-perforated panel with porosity taken from a square hole grid.
    pub fn micro_perforated_grid(thickness: f64, hole_diameter: f64, hole_spacing: f64) -> Result<Self> {
        Ok(Panel::MicroPerforated {
            thickness,
            hole_diameter,
            porosity: perforate_porosity(hole_diameter, hole_spacing)?,
        })
    }

    pub fn thickness(&self) -> f64 {
        match *self {
            Panel::Perforated { thickness, .. }
            | Panel::Slotted { thickness, .. }
            | Panel::MicroPerforated { thickness, .. } => thickness,
        }
    }

    /// Open-area ratio.
    pub fn porosity(&self) -> Result<f64> {
        match *self {
            Panel::Perforated {
                hole_diameter,
                hole_spacing,
                ..
            } => perforate_porosity(hole_diameter, hole_spacing),
            Panel::Slotted {
                slot_width,
                slot_spacing,
                ..
            } => slot_porosity(slot_width, slot_spacing),
            Panel::MicroPerforated { porosity, .. } => Ok(porosity),
        }
    }

    /// Series impedance of the sheet at each frequency.
    pub fn impedance(&self, freqs: &Array1<f64>, air: &AirProperties) -> Result<Array1<Complex64>> {
        match *self {
            Panel::Perforated {
                thickness,
                hole_diameter,
                hole_spacing,
            } => perforated_impedance(freqs, thickness, hole_diameter, hole_spacing, air),
            Panel::Slotted {
                thickness,
                slot_width,
                slot_spacing,
            } => slotted_impedance(freqs, thickness, slot_width, slot_spacing, air),
            Panel::MicroPerforated {
                thickness,
                hole_diameter,
                porosity,
            } => micro_perforated_impedance(freqs, thickness, hole_diameter, porosity, air),
        }
    }
}

fn check_aperture(aperture: f64, spacing: f64) -> Result<()> {
    if spacing > 0.0 && aperture < spacing {
        Ok(())
    } else {
        Err(AbsorberError::InvalidPanelGeometry { aperture, spacing })
    }
}

/// Open-area ratio πr²/s² of round holes on a square grid.
pub fn perforate_porosity(hole_diameter: f64, hole_spacing: f64) -> Result<f64> {
    check_aperture(hole_diameter, hole_spacing)?;
    Ok(area_from_diameter(hole_diameter) / (hole_spacing * hole_spacing))
}

/// Open-area ratio w/s of parallel slots.
pub fn slot_porosity(slot_width: f64, slot_spacing: f64) -> Result<f64> {
    check_aperture(slot_width, slot_spacing)?;
    Ok(slot_width / slot_spacing)
}

/// Shared aperture model: viscous term `shape·η·t_eff/(ε a²)` plus the
/// boundary-layer term ρωδv/ε, and mass reactance ρωt_eff/ε.
fn aperture_impedance(
    freqs: &Array1<f64>,
    t_eff: f64,
    porosity: f64,
    viscous_shape: f64,
    aperture: f64,
    air: &AirProperties,
) -> Array1<Complex64> {
    let rho = air.density;
    let r_viscous = viscous_shape * air.viscosity * t_eff / (porosity * aperture * aperture);
    freqs.mapv(|f| {
        let omega = 2.0 * PI * f;
        let r_surface = rho * omega * air.viscous_boundary_layer(omega) / porosity;
        Complex64::new(r_viscous + r_surface, rho * omega * t_eff / porosity)
    })
}

/// Perforated plate impedance after Ingard, with end correction
/// t_eff = t + 2·0.85·r.
pub fn perforated_impedance(
    freqs: &Array1<f64>,
    thickness: f64,
    hole_diameter: f64,
    hole_spacing: f64,
    air: &AirProperties,
) -> Result<Array1<Complex64>> {
    let porosity = perforate_porosity(hole_diameter, hole_spacing)?;
    ensure_non_negative("thickness", thickness)?;
    let r = hole_diameter / 2.0;
    let t_eff = thickness + 2.0 * END_CORRECTION * r;
    Ok(aperture_impedance(freqs, t_eff, porosity, 8.0, r, air))
}

/// Slotted panel impedance (Kristiansen & Vigran): as perforated but with
/// the parallel-plate viscous factor 12 on the slot width.
pub fn slotted_impedance(
    freqs: &Array1<f64>,
    thickness: f64,
    slot_width: f64,
    slot_spacing: f64,
    air: &AirProperties,
) -> Result<Array1<Complex64>> {
    let porosity = slot_porosity(slot_width, slot_spacing)?;
    ensure_non_negative("thickness", thickness)?;
    let t_eff = thickness + 2.0 * END_CORRECTION * (slot_width / 2.0);
    Ok(aperture_impedance(freqs, t_eff, porosity, 12.0, slot_width, air))
}

/// Micro-perforated panel impedance after Maa (1998).
///
/// With the perforate constant k = d·√(ωρ/4η):
///
/// R = 32ηt/(p d²) · (√(1 + k²/32) + √2·k·d/(32t))
///
/// X = ρωt/p · (1 + 1/√(9 + k²/2) + 0.85·d/t)
pub fn micro_perforated_impedance(
    freqs: &Array1<f64>,
    thickness: f64,
    hole_diameter: f64,
    porosity: f64,
    air: &AirProperties,
) -> Result<Array1<Complex64>> {
    let t = ensure_positive("thickness", thickness)?;
    let d = ensure_positive("hole_diameter", hole_diameter)?;
    let p = ensure_positive("porosity", porosity)?;
    if p > 1.0 {
        return Err(AbsorberError::invalid_parameter("porosity", p));
    }

    let rho = air.density;
    let eta = air.viscosity;
    Ok(freqs.mapv(|f| {
        let omega = 2.0 * PI * f;
        let k = d * (omega * rho / (4.0 * eta)).sqrt();
        let k2 = k * k;

        let r = 32.0 * eta * t / (p * d * d)
            * ((1.0 + k2 / 32.0).sqrt() + SQRT_2 * k * d / (32.0 * t));
        let x = rho * omega * t / p * (1.0 + 1.0 / (9.0 + k2 / 2.0).sqrt() + END_CORRECTION * d / t);
        Complex64::new(r, x)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freqs() -> Array1<f64> {
        Array1::from(vec![125.0, 250.0, 500.0, 1000.0, 2000.0])
    }

    #[test]
    fn test_porosity_from_geometry() {
        let p = perforate_porosity(0.005, 0.025).unwrap();
        assert!((p - PI * 0.0025 * 0.0025 / 0.025 / 0.025).abs() < 1e-12);
        assert!((slot_porosity(0.002, 0.02).unwrap() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_aperture_must_be_smaller_than_spacing() {
        assert_eq!(
            perforate_porosity(0.03, 0.025),
            Err(AbsorberError::InvalidPanelGeometry {
                aperture: 0.03,
                spacing: 0.025
            })
        );
        assert!(perforate_porosity(0.005, 0.0).is_err());
        assert!(slot_porosity(0.02, 0.02).is_err());
        assert!(Panel::micro_perforated_grid(0.001, 0.01, 0.005).is_err());

        let air = AirProperties::default();
        let bad = Panel::Slotted {
            thickness: 0.01,
            slot_width: 0.01,
            slot_spacing: -0.02,
        };
        assert!(bad.impedance(&freqs(), &air).unwrap_err().is_geometry_error());
    }

    #[test]
    fn test_perforated_reactance_is_end_corrected_mass() {
        let air = AirProperties::default();
        let f = freqs();
        let z = perforated_impedance(&f, 0.006, 0.005, 0.025, &air).unwrap();
        let eps = perforate_porosity(0.005, 0.025).unwrap();
        let t_eff = 0.006 + 2.0 * 0.85 * 0.0025;
        for (zi, fi) in z.iter().zip(f.iter()) {
            let expected = air.density * 2.0 * PI * fi * t_eff / eps;
            assert!((zi.im - expected).abs() < 1e-9 * expected, "X = {} at {fi} Hz", zi.im);
            assert!(zi.re > 0.0);
        }
    }

    #[test]
    fn test_resistance_grows_with_frequency() {
        // boundary-layer term scales as √ω
        let air = AirProperties::default();
        let z = slotted_impedance(&freqs(), 0.012, 0.003, 0.03, &air).unwrap();
        for w in z.to_vec().windows(2) {
            assert!(w[1].re > w[0].re);
        }
    }

    #[test]
    fn test_micro_perforated_low_frequency_limit() {
        // k → 0: R → 32ηt/(pd²)·1, X → ρωt/p·(1 + 1/3 + 0.85d/t)
        let air = AirProperties::default();
        let (t, d, p) = (0.001, 0.0005, 0.01);
        let f = Array1::from(vec![1e-3]);
        let z = micro_perforated_impedance(&f, t, d, p, &air).unwrap();
        let r0 = 32.0 * air.viscosity * t / (p * d * d);
        assert!((z[0].re / r0 - 1.0).abs() < 1e-3, "R = {}, R0 = {r0}", z[0].re);
        let omega = 2.0 * PI * 1e-3;
        let x0 = air.density * omega * t / p * (1.0 + 1.0 / 3.0 + 0.85 * d / t);
        assert!((z[0].im / x0 - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_micro_perforated_rejects_bad_parameters() {
        let air = AirProperties::default();
        let f = freqs();
        assert!(micro_perforated_impedance(&f, 0.0, 0.0005, 0.01, &air).is_err());
        assert!(micro_perforated_impedance(&f, 0.001, 0.0005, 0.0, &air).is_err());
        assert!(micro_perforated_impedance(&f, 0.001, 0.0005, 1.5, &air).is_err());
    }

    #[test]
    fn test_grid_constructor_matches_explicit_porosity() {
        let air = AirProperties::default();
        let grid = Panel::micro_perforated_grid(0.001, 0.0005, 0.004).unwrap();
        let explicit = Panel::MicroPerforated {
            thickness: 0.001,
            hole_diameter: 0.0005,
            porosity: perforate_porosity(0.0005, 0.004).unwrap(),
        };
        assert_eq!(grid, explicit);
        assert_eq!(
            grid.impedance(&freqs(), &air).unwrap(),
            explicit.impedance(&freqs(), &air).unwrap()
        );
        assert_eq!(grid.thickness(), 0.001);
    }
}
