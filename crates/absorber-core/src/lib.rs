pub mod absorption;
pub mod constants;
pub mod diffuse;
pub mod error;
pub mod frequency;
pub mod helmholtz;
pub mod layers;
pub mod membrane;
pub mod metrics;
pub mod perforated;
pub mod porous;
pub mod stack;
pub mod transfer_matrix;

pub use constants::AirProperties;
pub use diffuse::DiffuseSettings;
pub use error::{AbsorberError, Result};
pub use frequency::FrequencyAxis;
pub use helmholtz::{HelmholtzResonator, HelmholtzResponse, NeckLosses};
pub use layers::Layer;
pub use metrics::Metrics;
pub use perforated::Panel;
pub use porous::{Microstructure, PorousModel};
pub use stack::LayerStack;
pub use transfer_matrix::TransferMatrix;

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Evaluation interface
// ---------------------------------------------------------------------------

/// Angle-of-incidence model used when turning surface impedance into α.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Incidence {
    /// Plane wave at normal incidence (impedance tube).
    #[default]
    Normal,
    /// Random incidence via the Paris integral.
    Diffuse,
}

/// Environment and incidence settings shared by every layer of one
/// evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationParams {
    pub air: AirProperties,
    pub incidence: Incidence,
    pub diffuse: DiffuseSettings,
}

/// Absorption curve of one stack together with its ratings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsorptionResult {
    /// Frequency bins in Hz (length N).
    pub frequencies: Vec<f64>,
    /// Absorption coefficient in [0, 1] at each frequency bin.
    pub alpha: Vec<f64>,
    pub metrics: Metrics,
}

/// Run the full pipeline: build every layer's matrices over `axis`, chain
/// them, convert to α for the requested incidence and rate the curve.
pub fn evaluate(
    axis: &FrequencyAxis,
    stack: &LayerStack,
    params: &EvaluationParams,
) -> Result<AbsorptionResult> {
    debug!(
        "evaluating {}-layer stack ({:.1} mm deep) over {:.0}-{:.0} Hz",
        stack.len(),
        stack.depth() * 1e3,
        axis.min(),
        axis.max()
    );

    let alpha = stack.absorption(axis.values(), params)?.to_vec();
    let frequencies = axis.to_vec();
    let metrics = Metrics::from_curve(&alpha, &frequencies)?;

    debug!(
        "NRC {:.2}, SAA {:.2}, peak α {:.3} at {:.0} Hz",
        metrics.nrc, metrics.saa, metrics.peak_alpha, metrics.peak_frequency
    );

    Ok(AbsorptionResult {
        frequencies,
        alpha,
        metrics,
    })
}

/// Evaluate independent stacks in parallel. Results come back in input
/// order, each with its own success or failure.
pub fn evaluate_many(
    axis: &FrequencyAxis,
    stacks: &[LayerStack],
    params: &EvaluationParams,
) -> Vec<Result<AbsorptionResult>> {
    stacks
        .par_iter()
        .map(|stack| evaluate(axis, stack, params))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oc703(thickness: f64) -> LayerStack {
        LayerStack::new(vec![Layer::porous(PorousModel::Miki, 13_000.0, thickness)]).unwrap()
    }

    #[test]
    fn test_evaluate_produces_parallel_arrays() {
        let axis = FrequencyAxis::default();
        let result = evaluate(&axis, &oc703(0.05), &EvaluationParams::default()).unwrap();
        assert_eq!(result.frequencies.len(), axis.len());
        assert_eq!(result.alpha.len(), axis.len());
        assert!(result.alpha.iter().all(|a| (0.0..=1.0).contains(a)));
        assert!((result.metrics.nrc - 0.65).abs() < 0.051, "NRC = {}", result.metrics.nrc);
    }

    #[test]
    fn test_evaluate_many_keeps_order() {
        let axis = FrequencyAxis::default();
        let stacks: Vec<LayerStack> = [0.025, 0.05, 0.1].iter().map(|&d| oc703(d)).collect();
        let params = EvaluationParams::default();
        let results = evaluate_many(&axis, &stacks, &params);
        assert_eq!(results.len(), 3);
        for (stack, result) in stacks.iter().zip(&results) {
            let serial = evaluate(&axis, stack, &params).unwrap();
            assert_eq!(result.as_ref().unwrap(), &serial);
        }
    }

    #[test]
    fn test_failures_stay_per_stack() {
        let axis = FrequencyAxis::default();
        let bad = LayerStack::new(vec![Layer::air(-1.0)]).unwrap();
        let results = evaluate_many(&axis, &[oc703(0.05), bad], &EvaluationParams::default());
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn test_default_params() {
        let params = EvaluationParams::default();
        assert_eq!(params.incidence, Incidence::Normal);
        assert_eq!(params.diffuse.quadrature_order, 10);
        assert_eq!(params.diffuse.max_angle_deg, 78.0);
    }
}
