use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Standard atmospheric pressure in Pa.
pub const STANDARD_PRESSURE: f64 = 101_325.0;

/// Specific gas constant of dry air in J/(kg·K).
const R_SPECIFIC: f64 = 287.05;

/// Properties of the air filling pores, gaps and necks.
///
/// Every model in the crate takes this explicitly; nothing reads a global.
/// The default is still air at 20 °C and 101.325 kPa with the rounded
/// reference values used throughout the absorber literature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirProperties {
    /// Density ρ₀ in kg/m³.
    pub density: f64,
    /// Speed of sound c₀ in m/s.
    pub speed_of_sound: f64,
    /// Dynamic viscosity η in Pa·s.
    pub viscosity: f64,
    /// Thermal conductivity κ in W/(m·K).
    pub thermal_conductivity: f64,
    /// Specific heat at constant pressure in J/(kg·K).
    pub specific_heat: f64,
    /// Ratio of specific heats γ.
    pub gamma: f64,
    /// Static pressure P₀ in Pa.
    pub static_pressure: f64,
}

impl Default for AirProperties {
    fn default() -> Self {
        Self {
            density: 1.204,
            speed_of_sound: 343.0,
            viscosity: 1.81e-5,
            thermal_conductivity: 0.0257,
            specific_heat: 1005.0,
            gamma: 1.4,
            static_pressure: STANDARD_PRESSURE,
        }
    }
}

impl AirProperties {
    /// Air at `temperature_c` °C and standard pressure. Transport properties
    /// keep their 20 °C values.
    pub fn at_temperature(temperature_c: f64) -> Self {
        let (c, rho) = speed_of_sound_and_density(temperature_c);
        Self {
            density: rho,
            speed_of_sound: c,
            ..Self::default()
        }
    }

    /// Characteristic impedance Z₀ = ρ₀c₀ in Pa·s/m.
    pub fn characteristic_impedance(&self) -> f64 {
        self.density * self.speed_of_sound
    }

    /// Prandtl number η·cp/κ (≈ 0.71 for air).
    pub fn prandtl(&self) -> f64 {
        self.viscosity * self.specific_heat / self.thermal_conductivity
    }

    /// Adiabatic bulk modulus γP₀ in Pa.
    pub fn adiabatic_bulk_modulus(&self) -> f64 {
        self.gamma * self.static_pressure
    }

    /// Free-field wavenumber k₀ = ω/c₀ at `frequency` Hz.
    pub fn wavenumber(&self, frequency: f64) -> f64 {
        2.0 * PI * frequency / self.speed_of_sound
    }

    /// Wavelength in metres at `frequency` Hz.
    pub fn wavelength(&self, frequency: f64) -> f64 {
        self.speed_of_sound / frequency
    }

    /// Viscous boundary-layer thickness √(2η/(ρ₀ω)) at angular frequency `omega`.
    pub fn viscous_boundary_layer(&self, omega: f64) -> f64 {
        (2.0 * self.viscosity / (self.density * omega)).sqrt()
    }
}

/// Speed of sound in air (m/s) and density (kg/m³) as a function of
/// temperature in °C. Uses the ideal-gas approximation.
pub fn speed_of_sound_and_density(temperature_c: f64) -> (f64, f64) {
    let t_kelvin = temperature_c + 273.15;
    // c = 331.3 * sqrt(T/273.15)
    let c = 331.3 * (t_kelvin / 273.15).sqrt();
    let rho = STANDARD_PRESSURE / (R_SPECIFIC * t_kelvin);
    (c, rho)
}

/// Cross-sectional area from diameter (both in metres).
pub fn area_from_diameter(diameter: f64) -> f64 {
    PI * (diameter / 2.0).powi(2)
}
