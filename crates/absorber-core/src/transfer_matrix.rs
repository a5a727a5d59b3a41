use crate::constants::AirProperties;
use crate::error::{ensure_same_len, AbsorberError, Result};
use ndarray::{Array1, Zip};
use num_complex::Complex64;

/// A 2×2 complex transfer matrix relating the acoustic state at a layer's
/// front face to its back face.
///
/// ```text
/// [p_front]   [a  b] [p_back]
/// [u_front] = [c  d] [u_back]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferMatrix {
    pub a: Complex64,
    pub b: Complex64,
    pub c: Complex64,
    pub d: Complex64,
}

/// One transfer matrix per frequency bin.
pub type MatrixArray = Array1<TransferMatrix>;

impl TransferMatrix {
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { a, b, c, d }
    }

    /// Identity matrix (no-op layer).
    pub fn identity() -> Self {
        Self {
            a: Complex64::new(1.0, 0.0),
            b: Complex64::new(0.0, 0.0),
            c: Complex64::new(0.0, 0.0),
            d: Complex64::new(1.0, 0.0),
        }
    }

    /// Bulk layer of characteristic impedance `zc`, wavenumber `kc` and
    /// thickness `thickness` metres.
    pub fn bulk(zc: Complex64, kc: Complex64, thickness: f64) -> Self {
        let kd = kc * thickness;
        let cos_kd = kd.cos();
        let sin_kd = kd.sin();
        let j = Complex64::i();

        Self {
            a: cos_kd,
            b: j * zc * sin_kd,
            c: j * sin_kd / zc,
            d: cos_kd,
        }
    }

    /// Zero-thickness sheet of series impedance `z`.
    pub fn sheet(z: Complex64) -> Self {
        Self {
            a: Complex64::new(1.0, 0.0),
            b: z,
            c: Complex64::new(0.0, 0.0),
            d: Complex64::new(1.0, 0.0),
        }
    }

    /// Chain (multiply) this matrix with another: self · other.
    pub fn chain(&self, other: &TransferMatrix) -> TransferMatrix {
        TransferMatrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
        }
    }

    pub fn determinant(&self) -> Complex64 {
        self.a * self.d - self.b * self.c
    }

    /// Largest elementwise distance to `other`.
    pub fn max_abs_diff(&self, other: &TransferMatrix) -> f64 {
        [
            (self.a - other.a).norm(),
            (self.b - other.b).norm(),
            (self.c - other.c).norm(),
            (self.d - other.d).norm(),
        ]
        .into_iter()
        .fold(0.0, f64::max)
    }
}

/// Per-frequency bulk matrices from parallel `zc` and `kc` arrays.
pub fn bulk_layer(
    zc: &Array1<Complex64>,
    kc: &Array1<Complex64>,
    thickness: f64,
) -> Result<MatrixArray> {
    ensure_same_len(zc.len(), kc.len())?;
    Ok(Zip::from(zc)
        .and(kc)
        .map_collect(|&z, &k| TransferMatrix::bulk(z, k, thickness)))
}

/// Per-frequency sheet matrices from an impedance array.
pub fn impedance_sheet(z: &Array1<Complex64>) -> MatrixArray {
    z.mapv(TransferMatrix::sheet)
}

/// Lossless air gap: the bulk form with Zc = Z₀ and kc = ω/c₀.
pub fn air_gap(freqs: &Array1<f64>, thickness: f64, air: &AirProperties) -> MatrixArray {
    let z0 = Complex64::new(air.characteristic_impedance(), 0.0);
    freqs.mapv(|f| TransferMatrix::bulk(z0, Complex64::new(air.wavenumber(f), 0.0), thickness))
}

/// `n` identity matrices: a bare rigid wall.
pub fn identity_chain(n: usize) -> MatrixArray {
    Array1::from_elem(n, TransferMatrix::identity())
}

/// Ordered product T₁·T₂·…·Tₙ of per-frequency matrix arrays, front face
/// first. Bins are multiplied independently and never mixed.
pub fn chain(matrices: &[MatrixArray]) -> Result<MatrixArray> {
    let (first, rest) = matrices.split_first().ok_or(AbsorberError::EmptyStack)?;
    let mut total = first.clone();
    for next in rest {
        ensure_same_len(total.len(), next.len())?;
        Zip::from(&mut total)
            .and(next)
            .for_each(|t, m| *t = t.chain(m));
    }
    Ok(total)
}
