use crate::absorption::{absorption_coefficient, surface_impedance};
use crate::constants::AirProperties;
use crate::diffuse::diffuse_absorption;
use crate::error::{AbsorberError, Result};
use crate::layers::Layer;
use crate::transfer_matrix::{chain, MatrixArray};
use crate::{EvaluationParams, Incidence};
use log::debug;
use ndarray::Array1;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// An ordered, non-empty list of layers on a rigid wall.
///
/// The first layer faces the incident sound; the wall sits behind the last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Layer>", into = "Vec<Layer>")]
pub struct LayerStack {
    layers: Vec<Layer>,
}

impl TryFrom<Vec<Layer>> for LayerStack {
    type Error = AbsorberError;

    fn try_from(layers: Vec<Layer>) -> Result<Self> {
        Self::new(layers)
    }
}

impl From<LayerStack> for Vec<Layer> {
    fn from(stack: LayerStack) -> Self {
        stack.layers
    }
}

impl LayerStack {
    pub fn new(layers: Vec<Layer>) -> Result<Self> {
        if layers.is_empty() {
            return Err(AbsorberError::EmptyStack);
        }
        Ok(Self { layers })
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Always false; an empty stack cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Total construction depth in metres.
    pub fn depth(&self) -> f64 {
        self.layers.iter().map(Layer::thickness).sum()
    }

    /// The same layers mounted back to front.
    pub fn reversed(&self) -> Self {
        let mut layers = self.layers.clone();
        layers.reverse();
        Self { layers }
    }

    /// Per-layer matrix arrays, front face first.
    pub fn matrices(&self, freqs: &Array1<f64>, air: &AirProperties) -> Result<Vec<MatrixArray>> {
        self.layers
            .iter()
            .map(|layer| layer.transfer_matrices(freqs, air))
            .collect()
    }

    /// Product of every layer's matrix at each frequency.
    pub fn total_transfer_matrix(
        &self,
        freqs: &Array1<f64>,
        air: &AirProperties,
    ) -> Result<MatrixArray> {
        chain(&self.matrices(freqs, air)?)
    }

    pub fn surface_impedance(
        &self,
        freqs: &Array1<f64>,
        air: &AirProperties,
    ) -> Result<Array1<Complex64>> {
        Ok(surface_impedance(&self.total_transfer_matrix(freqs, air)?))
    }

    /// Absorption coefficient at each frequency for the requested incidence.
    pub fn absorption(&self, freqs: &Array1<f64>, params: &EvaluationParams) -> Result<Array1<f64>> {
        let z0 = params.air.characteristic_impedance();
        let zs = self.surface_impedance(freqs, &params.air)?;
        debug!(
            "{} layers, {} bins, {:?} incidence",
            self.len(),
            freqs.len(),
            params.incidence
        );
        match params.incidence {
            Incidence::Normal => Ok(absorption_coefficient(&zs, z0)),
            Incidence::Diffuse => diffuse_absorption(&zs, z0, &params.diffuse),
        }
    }
}
