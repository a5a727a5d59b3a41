//! Single-number ratings and band summaries of an absorption curve.
//!
//! All band values are read off the curve by linear interpolation in
//! log₁₀(f). Outside the curve the end values are held, never extrapolated.

use crate::absorption::clip_unit;
use crate::error::{ensure_same_len, AbsorberError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bands averaged for the Noise Reduction Coefficient (ASTM C423).
pub const NRC_FREQUENCIES: [f64; 4] = [250.0, 500.0, 1000.0, 2000.0];

/// Third-octave bands averaged for the Sound Absorption Average.
pub const SAA_FREQUENCIES: [f64; 12] = [
    200.0, 250.0, 315.0, 400.0, 500.0, 630.0, 800.0, 1000.0, 1250.0, 1600.0, 2000.0, 2500.0,
];

/// Octave centres reported by [`octave_summary`].
pub const OCTAVE_CENTERS: [u32; 7] = [63, 125, 250, 500, 1000, 2000, 4000];

/// Rating summary of one absorption curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub nrc: f64,
    pub saa: f64,
    pub octave_summary: BTreeMap<u32, f64>,
    pub peak_frequency: f64,
    pub peak_alpha: f64,
}

impl Metrics {
    pub fn from_curve(alpha: &[f64], freqs: &[f64]) -> Result<Self> {
        let (peak_frequency, peak_alpha) = peak(alpha, freqs)?;
        Ok(Self {
            nrc: nrc(alpha, freqs)?,
            saa: saa(alpha, freqs)?,
            octave_summary: octave_summary(alpha, freqs)?,
            peak_frequency,
            peak_alpha,
        })
    }
}

fn check_curve(alpha: &[f64], freqs: &[f64]) -> Result<()> {
    if freqs.is_empty() {
        return Err(AbsorberError::InvalidFrequencyAxis(
            "cannot rate an empty curve".to_string(),
        ));
    }
    ensure_same_len(freqs.len(), alpha.len())
}

/// Round half-to-even onto a grid of `1/steps`.
fn round_to(x: f64, steps: f64) -> f64 {
    (x * steps).round_ties_even() / steps
}

/// Value of the curve at `target` Hz, interpolated linearly in log₁₀(f)
/// and held constant beyond either end. `freqs` must be increasing.
pub fn interpolate_log(alpha: &[f64], freqs: &[f64], target: f64) -> f64 {
    let last = freqs.len() - 1;
    if target <= freqs[0] {
        return alpha[0];
    }
    if target >= freqs[last] {
        return alpha[last];
    }
    let hi = freqs.partition_point(|&f| f < target);
    let lo = hi - 1;
    let (x0, x1) = (freqs[lo].log10(), freqs[hi].log10());
    let t = (target.log10() - x0) / (x1 - x0);
    alpha[lo] + t * (alpha[hi] - alpha[lo])
}

fn band_mean(alpha: &[f64], freqs: &[f64], bands: &[f64]) -> f64 {
    let sum: f64 = bands
        .iter()
        .map(|&f| clip_unit(interpolate_log(alpha, freqs, f)))
        .sum();
    sum / bands.len() as f64
}

/// Noise Reduction Coefficient: mean α at 250, 500, 1000 and 2000 Hz,
/// rounded to the nearest 0.05.
pub fn nrc(alpha: &[f64], freqs: &[f64]) -> Result<f64> {
    check_curve(alpha, freqs)?;
    Ok(round_to(band_mean(alpha, freqs, &NRC_FREQUENCIES), 20.0))
}

/// Sound Absorption Average over the twelve third-octaves 200–2500 Hz,
/// rounded to the nearest 0.01.
pub fn saa(alpha: &[f64], freqs: &[f64]) -> Result<f64> {
    check_curve(alpha, freqs)?;
    Ok(round_to(band_mean(alpha, freqs, &SAA_FREQUENCIES), 100.0))
}

/// Clipped α at each octave centre, to three decimals.
pub fn octave_summary(alpha: &[f64], freqs: &[f64]) -> Result<BTreeMap<u32, f64>> {
    check_curve(alpha, freqs)?;
    Ok(OCTAVE_CENTERS
        .iter()
        .map(|&fc| {
            let value = clip_unit(interpolate_log(alpha, freqs, fc as f64));
            (fc, round_to(value, 1000.0))
        })
        .collect())
}

/// Frequency and value of the first maximum of the curve.
pub fn peak(alpha: &[f64], freqs: &[f64]) -> Result<(f64, f64)> {
    check_curve(alpha, freqs)?;
    let mut best = 0;
    for (i, &a) in alpha.iter().enumerate().skip(1) {
        if a > alpha[best] {
            best = i;
        }
    }
    Ok((freqs[best], alpha[best]))
}
