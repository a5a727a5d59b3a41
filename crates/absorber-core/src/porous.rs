//! Porous absorber models.
//!
//! Each model maps frequency and flow resistivity σ (and for JCA the pore
//! microstructure) to the characteristic impedance Zc and complex
//! wavenumber kc of the equivalent fluid. The empirical models are fitted
//! for 0.01 < X < 1 with X = ρ₀f/σ. Outside that range they extrapolate:
//! the values are returned unchanged and the excursion is logged as a
//! warning. Use [`PorousModel::validity_range`] to check before evaluating.
//!
//! References: Delany & Bazley (1970); Miki (1990); Allard & Champoux
//! (1992); Johnson et al. (1987) with Champoux & Allard (1991).

use crate::constants::AirProperties;
use crate::error::{ensure_positive, AbsorberError, Result};
use log::warn;
use ndarray::Array1;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Range of X = ρ₀f/σ over which the empirical fits were made.
pub const EMPIRICAL_VALIDITY: (f64, f64) = (0.01, 1.0);

/// Characteristic impedance and wavenumber, one entry per frequency.
pub type Characteristics = (Array1<Complex64>, Array1<Complex64>);

/// Pore microstructure for the Johnson-Champoux-Allard model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Microstructure {
    /// Open porosity φ in (0, 1].
    pub porosity: f64,
    /// Tortuosity α∞ (≥ 1 for real materials).
    pub tortuosity: f64,
    /// Viscous characteristic length Λ in metres.
    pub viscous_length: f64,
    /// Thermal characteristic length Λ' in metres.
    pub thermal_length: f64,
}

impl Microstructure {
    fn validate(&self) -> Result<()> {
        ensure_positive("porosity", self.porosity)?;
        if self.porosity > 1.0 {
            return Err(AbsorberError::invalid_parameter("porosity", self.porosity));
        }
        ensure_positive("tortuosity", self.tortuosity)?;
        ensure_positive("viscous_length", self.viscous_length)?;
        ensure_positive("thermal_length", self.thermal_length)?;
        Ok(())
    }
}

/// Porous model selection. JCA carries its own microstructure, so a JCA
/// layer without it cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum PorousModel {
    DelanyBazley,
    Miki,
    AllardChampoux,
    Jca(Microstructure),
}

impl fmt::Display for PorousModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PorousModel::DelanyBazley => "delany_bazley",
            PorousModel::Miki => "miki",
            PorousModel::AllardChampoux => "allard_champoux",
            PorousModel::Jca(_) => "jca",
        };
        f.write_str(name)
    }
}

impl PorousModel {
    /// Zc and kc for this model at `freqs` with flow resistivity `sigma`.
    pub fn characteristics(
        &self,
        freqs: &Array1<f64>,
        sigma: f64,
        air: &AirProperties,
    ) -> Result<Characteristics> {
        ensure_positive("flow_resistivity", sigma)?;
        if self.is_empirical() && !Self::within_validity(freqs, sigma, air) {
            if let Some((lo, hi)) = Self::validity_range(freqs, sigma, air) {
                warn!(
                    "{self} extrapolating outside {} < X < {} (X spans {lo:.3e}..{hi:.3e})",
                    EMPIRICAL_VALIDITY.0, EMPIRICAL_VALIDITY.1
                );
            }
        }

        Ok(match self {
            PorousModel::DelanyBazley => delany_bazley(freqs, sigma, air),
            PorousModel::Miki => miki(freqs, sigma, air),
            PorousModel::AllardChampoux => allard_champoux(freqs, sigma, air),
            PorousModel::Jca(micro) => {
                micro.validate()?;
                jca(freqs, sigma, micro, air)
            }
        })
    }

    /// True for the single-parameter fits that have a stated X range.
    pub fn is_empirical(&self) -> bool {
        !matches!(self, PorousModel::Jca(_))
    }

    /// Whether every frequency lies inside the empirical fit range.
    pub fn within_validity(freqs: &Array1<f64>, sigma: f64, air: &AirProperties) -> bool {
        let (lo, hi) = EMPIRICAL_VALIDITY;
        freqs.iter().all(|&f| {
            let x = air.density * f / sigma;
            x > lo && x < hi
        })
    }

    /// Smallest and largest X = ρ₀f/σ over `freqs`, to compare against
    /// [`EMPIRICAL_VALIDITY`].
    pub fn validity_range(
        freqs: &Array1<f64>,
        sigma: f64,
        air: &AirProperties,
    ) -> Option<(f64, f64)> {
        let xs = freqs.mapv(|f| air.density * f / sigma);
        let lo = xs.iter().copied().reduce(f64::min)?;
        let hi = xs.iter().copied().reduce(f64::max)?;
        Some((lo, hi))
    }
}

/// Coefficient/exponent pairs of a Delany-Bazley style power-law fit:
/// `1 + a·X^-α − j·b·X^-β`.
struct PowerLaw {
    re: (f64, f64),
    im: (f64, f64),
}

impl PowerLaw {
    fn eval(&self, x: f64) -> Complex64 {
        Complex64::new(
            1.0 + self.re.0 * x.powf(-self.re.1),
            -self.im.0 * x.powf(-self.im.1),
        )
    }
}

struct EmpiricalFit {
    impedance: PowerLaw,
    wavenumber: PowerLaw,
}

const DELANY_BAZLEY: EmpiricalFit = EmpiricalFit {
    impedance: PowerLaw {
        re: (0.0571, 0.754),
        im: (0.0870, 0.732),
    },
    wavenumber: PowerLaw {
        re: (0.0978, 0.700),
        im: (0.1890, 0.595),
    },
};

const MIKI: EmpiricalFit = EmpiricalFit {
    impedance: PowerLaw {
        re: (0.070, 0.632),
        im: (0.107, 0.632),
    },
    wavenumber: PowerLaw {
        re: (0.109, 0.618),
        im: (0.160, 0.618),
    },
};

fn empirical(
    fit: &EmpiricalFit,
    freqs: &Array1<f64>,
    sigma: f64,
    air: &AirProperties,
) -> Characteristics {
    let z0 = air.characteristic_impedance();
    let zc = freqs.mapv(|f| fit.impedance.eval(air.density * f / sigma) * z0);
    let kc = freqs.mapv(|f| fit.wavenumber.eval(air.density * f / sigma) * air.wavenumber(f));
    (zc, kc)
}

/// Delany-Bazley empirical model (1970).
pub fn delany_bazley(freqs: &Array1<f64>, sigma: f64, air: &AirProperties) -> Characteristics {
    empirical(&DELANY_BAZLEY, freqs, sigma, air)
}

/// Miki model (1990): Delany-Bazley refitted so the real part of the
/// surface impedance stays positive at low frequency.
pub fn miki(freqs: &Array1<f64>, sigma: f64, air: &AirProperties) -> Characteristics {
    empirical(&MIKI, freqs, sigma, air)
}

/// Bulk modulus of the pore air given the thermal exchange term `h`:
/// K = γP₀ / (γ − (γ−1)/h).
fn thermal_bulk_modulus(h: Complex64, air: &AirProperties) -> Complex64 {
    let gamma = air.gamma;
    air.adiabatic_bulk_modulus() / (gamma - (gamma - 1.0) / h)
}

fn equivalent_fluid(rho_eff: Complex64, k_eff: Complex64, omega: f64) -> (Complex64, Complex64) {
    ((rho_eff * k_eff).sqrt(), (rho_eff / k_eff).sqrt() * omega)
}

/// Allard-Champoux model (1992) for fibrous materials, with separate
/// viscous (effective density) and thermal (bulk modulus) fits.
pub fn allard_champoux(freqs: &Array1<f64>, sigma: f64, air: &AirProperties) -> Characteristics {
    let viscous = PowerLaw {
        re: (0.0764, 0.700),
        im: (0.136, 0.700),
    };
    let thermal = PowerLaw {
        re: (0.0668, 0.707),
        im: (0.1170, 0.707),
    };

    let pairs = freqs.mapv(|f| {
        let x = air.density * f / sigma;
        let rho_eff = viscous.eval(x) * air.density;
        let k_eff = thermal_bulk_modulus(thermal.eval(x), air);
        equivalent_fluid(rho_eff, k_eff, 2.0 * PI * f)
    });
    split(pairs)
}

/// Johnson-Champoux-Allard model for rigid-frame porous media.
///
/// Effective density (Johnson):
/// ρ = ρ₀α∞·[1 + σφ/(jωρ₀α∞)·√(1 + j·4α∞²ηρ₀ω/(σ²Λ²φ²))]
///
/// Bulk modulus (Champoux-Allard):
/// K = γP₀ / (γ − (γ−1)/[1 + 8η/(jΛ'²Prρ₀ω)·√(1 + jρ₀ωPrΛ'²/(16η))])
///
/// Zc = √(ρK)/φ and kc = ω√(ρ/K).
pub fn jca(
    freqs: &Array1<f64>,
    sigma: f64,
    micro: &Microstructure,
    air: &AirProperties,
) -> Characteristics {
    let j = Complex64::i();
    let rho0 = air.density;
    let eta = air.viscosity;
    let pr = air.prandtl();
    let Microstructure {
        porosity: phi,
        tortuosity: tort,
        viscous_length: lambda_v,
        thermal_length: lambda_t,
    } = *micro;

    let pairs = freqs.mapv(|f| {
        let omega = match 2.0 * PI * f {
            w if w == 0.0 => 1e-30,
            w => w,
        };

        let x_v = 4.0 * tort * tort * eta * rho0 * omega / (sigma * sigma * lambda_v * lambda_v * phi * phi);
        let g_v = (1.0 + j * x_v).sqrt();
        let rho_eff = rho0 * tort * (1.0 + sigma * phi / (j * omega * rho0 * tort) * g_v);

        let x_t = rho0 * omega * pr * lambda_t * lambda_t / (16.0 * eta);
        let g_t = (1.0 + j * x_t).sqrt();
        let h = 1.0 + 8.0 * eta / (j * lambda_t * lambda_t * pr * rho0 * omega) * g_t;
        let k_eff = thermal_bulk_modulus(h, air);

        let (zc, kc) = equivalent_fluid(rho_eff, k_eff, omega);
        (zc / phi, kc)
    });
    split(pairs)
}

fn split(pairs: Array1<(Complex64, Complex64)>) -> Characteristics {
    (pairs.mapv(|p| p.0), pairs.mapv(|p| p.1))
}
