use crate::constants::AirProperties;
use crate::error::{ensure_non_negative, ensure_positive, Result};
use crate::membrane::membrane_impedance;
use crate::perforated::Panel;
use crate::porous::PorousModel;
use crate::transfer_matrix::{air_gap, bulk_layer, impedance_sheet, MatrixArray};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// One physical layer of an absorber, front face towards the sound.
///
/// Thicknesses are in metres. Sheets and membranes are treated as having
/// zero acoustic thickness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Layer {
    /// Rigid-frame porous material.
    Porous {
        model: PorousModel,
        /// Flow resistivity σ in Pa·s/m².
        flow_resistivity: f64,
        thickness: f64,
    },
    /// Lossless air cavity.
    Air { thickness: f64 },
    /// Perforated, slotted or micro-perforated facing.
    Sheet { panel: Panel },
    /// Limp impervious membrane.
    Membrane {
        /// Surface mass density in kg/m².
        mass_per_area: f64,
    },
}

impl Layer {
    pub fn porous(model: PorousModel, flow_resistivity: f64, thickness: f64) -> Self {
        Layer::Porous {
            model,
            flow_resistivity,
            thickness,
        }
    }

    pub fn air(thickness: f64) -> Self {
        Layer::Air { thickness }
    }

    pub fn sheet(panel: Panel) -> Self {
        Layer::Sheet { panel }
    }

    pub fn membrane(mass_per_area: f64) -> Self {
        Layer::Membrane { mass_per_area }
    }

    /// Depth this layer adds to the construction. Sheets count their panel
    /// thickness even though the acoustic model ignores it.
    pub fn thickness(&self) -> f64 {
        match self {
            Layer::Porous { thickness, .. } | Layer::Air { thickness } => *thickness,
            Layer::Sheet { panel } => panel.thickness(),
            Layer::Membrane { .. } => 0.0,
        }
    }

    /// Transfer matrix of this layer at every frequency in `freqs`.
    pub fn transfer_matrices(
        &self,
        freqs: &Array1<f64>,
        air: &AirProperties,
    ) -> Result<MatrixArray> {
        match self {
            Layer::Porous {
                model,
                flow_resistivity,
                thickness,
            } => {
                ensure_non_negative("thickness", *thickness)?;
                let (zc, kc) = model.characteristics(freqs, *flow_resistivity, air)?;
                bulk_layer(&zc, &kc, *thickness)
            }
            Layer::Air { thickness } => {
                ensure_non_negative("thickness", *thickness)?;
                Ok(air_gap(freqs, *thickness, air))
            }
            Layer::Sheet { panel } => Ok(impedance_sheet(&panel.impedance(freqs, air)?)),
            Layer::Membrane { mass_per_area } => {
                ensure_positive("mass_per_area", *mass_per_area)?;
                Ok(impedance_sheet(&membrane_impedance(freqs, *mass_per_area)))
            }
        }
    }
}
