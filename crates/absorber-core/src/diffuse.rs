//! Random-incidence absorption of a locally reacting surface.
//!
//! The Paris formula weights the oblique-incidence absorption by the
//! projected solid angle:
//!
//! α_diff = 2 ∫₀^θmax α(θ) sinθ cosθ dθ
//!
//! with α(θ) = 1 − |(Zs cosθ − Z₀)/(Zs cosθ + Z₀)|². The integral is
//! evaluated with Gauss-Legendre quadrature mapped onto [0, θmax]. The
//! default upper limit of 78° follows the field-incidence convention.

use crate::absorption::clip_unit;
use crate::error::{AbsorberError, Result};
use ndarray::{Array1, Zip};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const NEWTON_TOLERANCE: f64 = 1e-15;
const NEWTON_MAX_ITER: usize = 100;

/// Quadrature configuration for the Paris integral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffuseSettings {
    /// Number of Gauss-Legendre nodes.
    pub quadrature_order: usize,
    /// Upper integration limit in degrees.
    pub max_angle_deg: f64,
}

impl Default for DiffuseSettings {
    fn default() -> Self {
        Self {
            quadrature_order: 10,
            max_angle_deg: 78.0,
        }
    }
}

impl DiffuseSettings {
    fn validate(&self) -> Result<()> {
        if self.quadrature_order == 0 {
            return Err(AbsorberError::invalid_parameter(
                "quadrature_order",
                self.quadrature_order as f64,
            ));
        }
        if !(self.max_angle_deg > 0.0 && self.max_angle_deg <= 90.0) {
            return Err(AbsorberError::invalid_parameter(
                "max_angle_deg",
                self.max_angle_deg,
            ));
        }
        Ok(())
    }
}

/// Legendre polynomial P_n(x) and its derivative via the three-term
/// recurrence (k+1)P_{k+1} = (2k+1)xP_k − kP_{k−1}.
fn legendre_and_derivative(n: usize, x: f64) -> (f64, f64) {
    if n == 0 {
        return (1.0, 0.0);
    }
    let mut p_prev = 1.0;
    let mut p = x;
    for k in 1..n {
        let kf = k as f64;
        let p_next = ((2.0 * kf + 1.0) * x * p - kf * p_prev) / (kf + 1.0);
        p_prev = p;
        p = p_next;
    }
    // P'_n = n(xP_n − P_{n−1})/(x² − 1), valid for interior nodes
    let dp = n as f64 * (x * p - p_prev) / (x * x - 1.0);
    (p, dp)
}

/// Gauss-Legendre nodes and weights on [−1, 1] for `n` points.
///
/// Roots of P_n are found by Newton iteration from the asymptotic guess
/// cos(π(i + 3/4)/(n + 1/2)); weights are w = 2/((1 − x²)·P'_n(x)²).
/// Exact for polynomials up to degree 2n − 1.
pub fn gauss_legendre(n: usize) -> (Vec<f64>, Vec<f64>) {
    let mut nodes = Vec::with_capacity(n);
    let mut weights = Vec::with_capacity(n);

    for i in 0..n {
        let mut x = (PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos();
        for _ in 0..NEWTON_MAX_ITER {
            let (p, dp) = legendre_and_derivative(n, x);
            let update = p / dp;
            x -= update;
            if update.abs() < NEWTON_TOLERANCE {
                break;
            }
        }
        let (_, dp) = legendre_and_derivative(n, x);
        nodes.push(x);
        weights.push(2.0 / ((1.0 - x * x) * dp * dp));
    }

    (nodes, weights)
}

/// Absorption of a locally reacting surface at incidence angle `theta`
/// (radians from the normal).
pub fn oblique_absorption(zs: Complex64, theta: f64, z0: f64) -> f64 {
    let zs_cos = zs * theta.cos();
    let r = (zs_cos - z0) / (zs_cos + z0);
    clip_unit(1.0 - r.norm_sqr())
}

/// Paris-formula diffuse absorption for every bin of `zs`.
pub fn diffuse_absorption(
    zs: &Array1<Complex64>,
    z0: f64,
    settings: &DiffuseSettings,
) -> Result<Array1<f64>> {
    settings.validate()?;
    let theta_max = settings.max_angle_deg.to_radians();
    let half = theta_max / 2.0;
    let (nodes, weights) = gauss_legendre(settings.quadrature_order);

    let mut integral = Array1::<f64>::zeros(zs.len());
    for (x, w) in nodes.into_iter().zip(weights) {
        let theta = half * (x + 1.0);
        let jacobian = w * half * theta.sin() * theta.cos();
        Zip::from(&mut integral)
            .and(zs)
            .for_each(|acc, &z| *acc += jacobian * oblique_absorption(z, theta, z0));
    }

    Ok(integral.mapv(|a| clip_unit(2.0 * a)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::absorption::absorption_coefficient;

    const Z0: f64 = 412.972;

    /// 2∫ α sinθ cosθ dθ for Zs = Z₀ in closed form. With u = cosθ the
    /// integrand is 4u²/(1+u)², whose antiderivative is
    /// F(u) = u − 2ln(1+u) − 1/(1+u).
    fn matched_paris(theta_max: f64) -> f64 {
        let f = |u: f64| u - 2.0 * (1.0 + u).ln() - 1.0 / (1.0 + u);
        8.0 * (f(1.0) - f(theta_max.cos()))
    }

    #[test]
    fn test_weights_sum_to_two() {
        for n in 1..=16 {
            let (_, w) = gauss_legendre(n);
            let sum: f64 = w.iter().sum();
            assert!((sum - 2.0).abs() < 1e-13, "n = {n}: Σw = {sum}");
        }
    }

    #[test]
    fn test_nodes_are_symmetric() {
        let (mut x, _) = gauss_legendre(10);
        x.sort_by(|a, b| a.total_cmp(b));
        for i in 0..5 {
            assert!((x[i] + x[9 - i]).abs() < 1e-14, "x = {x:?}");
        }
        assert!(x.iter().all(|v| v.abs() < 1.0));
    }

    #[test]
    fn test_polynomial_exactness() {
        // ∫₋₁¹ x^k dx = 2/(k+1) for even k, 0 for odd
        let n = 10;
        let (x, w) = gauss_legendre(n);
        for k in 0..(2 * n) {
            let quad: f64 = x.iter().zip(&w).map(|(xi, wi)| wi * xi.powi(k as i32)).sum();
            let exact = if k % 2 == 0 { 2.0 / (k as f64 + 1.0) } else { 0.0 };
            assert!((quad - exact).abs() < 1e-13, "degree {k}: {quad} vs {exact}");
        }
    }

    #[test]
    fn test_matched_surface_against_closed_form() {
        let zs = Array1::from(vec![Complex64::new(Z0, 0.0)]);
        let normal = absorption_coefficient(&zs, Z0);
        assert!((normal[0] - 1.0).abs() < 1e-15);

        let diffuse = diffuse_absorption(&zs, Z0, &DiffuseSettings::default()).unwrap();
        let expected = matched_paris(78f64.to_radians());
        assert!((expected - 0.8916).abs() < 1e-3, "closed form = {expected}");
        assert!(
            (diffuse[0] - expected).abs() < 1e-6,
            "diffuse = {}, closed form = {expected}",
            diffuse[0]
        );
    }

    #[test]
    fn test_full_hemisphere_matched_surface() {
        let zs = Array1::from(vec![Complex64::new(Z0, 0.0)]);
        let settings = DiffuseSettings {
            quadrature_order: 20,
            max_angle_deg: 90.0,
        };
        let diffuse = diffuse_absorption(&zs, Z0, &settings).unwrap();
        let expected = matched_paris(PI / 2.0);
        assert!((diffuse[0] - expected).abs() < 1e-8);
    }

    #[test]
    fn test_bounded_for_many_impedances() {
        let mut values = Vec::new();
        for re in [0.0, 10.0, 100.0, 412.972, 1000.0, 1e4, 1e6] {
            for im in [-5000.0, -400.0, 0.0, 400.0, 5000.0] {
                values.push(Complex64::new(re, im));
            }
        }
        let zs = Array1::from(values);
        let alpha = diffuse_absorption(&zs, Z0, &DiffuseSettings::default()).unwrap();
        for (a, z) in alpha.iter().zip(zs.iter()) {
            assert!((0.0..=1.0).contains(a), "α_diff = {a} for Zs = {z}");
        }
    }

    #[test]
    fn test_rigid_surface_is_nearly_reflective() {
        let zs = Array1::from(vec![Complex64::new(1e30, 0.0)]);
        let alpha = diffuse_absorption(&zs, Z0, &DiffuseSettings::default()).unwrap();
        assert!(alpha[0] < 1e-12, "α_diff = {}", alpha[0]);
    }

    #[test]
    fn test_invalid_settings() {
        let zs = Array1::from(vec![Complex64::new(Z0, 0.0)]);
        let zero = DiffuseSettings {
            quadrature_order: 0,
            ..DiffuseSettings::default()
        };
        assert!(diffuse_absorption(&zs, Z0, &zero).is_err());
        let wide = DiffuseSettings {
            max_angle_deg: 120.0,
            ..DiffuseSettings::default()
        };
        assert!(diffuse_absorption(&zs, Z0, &wide).is_err());
    }
}
