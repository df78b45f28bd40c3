// src/core/matrix.rs

//! Fixed-size 3×3 complex linear algebra used by the oscillation engine.
//!
//! Matrices are plain row-major arrays, the same representation used for
//! gate matrices elsewhere in the crate's lineage. Everything here is total:
//! no allocation, no failure paths.

use num_complex::Complex;
use num_traits::{One, Zero};

/// A complex 3-vector.
pub type Vector3 = [Complex<f64>; 3];

/// A row-major complex 3×3 matrix.
pub type Matrix3 = [[Complex<f64>; 3]; 3];

/// The all-zero matrix.
pub fn zeros() -> Matrix3 {
    [[Complex::zero(); 3]; 3]
}

/// The identity matrix.
pub fn identity() -> Matrix3 {
    diag(&[Complex::one(); 3])
}

/// Builds a diagonal matrix from its diagonal entries.
pub fn diag(d: &Vector3) -> Matrix3 {
    let mut m = zeros();
    for (j, value) in d.iter().enumerate() {
        m[j][j] = *value;
    }
    m
}

/// Reads the diagonal of a matrix.
pub fn diagonal(m: &Matrix3) -> Vector3 {
    [m[0][0], m[1][1], m[2][2]]
}

/// Matrix product `a · b`.
pub fn mul(a: &Matrix3, b: &Matrix3) -> Matrix3 {
    let mut out = zeros();
    for (row, out_row) in out.iter_mut().enumerate() {
        for (col, out_val) in out_row.iter_mut().enumerate() {
            *out_val = (0..3).map(|k| a[row][k] * b[k][col]).sum();
        }
    }
    out
}

/// Matrix-vector product `m · v`.
pub fn mul_vec(m: &Matrix3, v: &Vector3) -> Vector3 {
    let mut out = [Complex::zero(); 3];
    for (row, out_val) in out.iter_mut().enumerate() {
        *out_val = m[row].iter().zip(v.iter()).map(|(a, b)| a * b).sum();
    }
    out
}

/// Conjugate transpose.
pub fn adjoint(m: &Matrix3) -> Matrix3 {
    let mut out = zeros();
    for (row, m_row) in m.iter().enumerate() {
        for (col, value) in m_row.iter().enumerate() {
            out[col][row] = value.conj();
        }
    }
    out
}

/// Element-wise `a - b`.
pub fn sub(a: &Matrix3, b: &Matrix3) -> Matrix3 {
    let mut out = *a;
    for (out_row, b_row) in out.iter_mut().zip(b.iter()) {
        for (x, y) in out_row.iter_mut().zip(b_row.iter()) {
            *x -= *y;
        }
    }
    out
}

/// Multiplies every entry by a complex scalar.
pub fn scale(m: &Matrix3, factor: Complex<f64>) -> Matrix3 {
    let mut out = *m;
    for value in out.iter_mut().flatten() {
        *value *= factor;
    }
    out
}

/// Commutator `[a, b] = a·b − b·a`.
pub fn commutator(a: &Matrix3, b: &Matrix3) -> Matrix3 {
    sub(&mul(a, b), &mul(b, a))
}

/// Frobenius norm. Bounds the spectral norm from above.
pub fn frobenius_norm(m: &Matrix3) -> f64 {
    m.iter().flatten().map(|c| c.norm_sqr()).sum::<f64>().sqrt()
}

/// Largest entry-wise distance between two matrices.
pub fn max_abs_diff(a: &Matrix3, b: &Matrix3) -> f64 {
    a.iter()
        .flatten()
        .zip(b.iter().flatten())
        .map(|(x, y)| (x - y).norm())
        .fold(0.0, f64::max)
}

/// Exponentiates the diagonal of a diagonal matrix entry by entry.
/// Exact for diagonal inputs; off-diagonal entries are ignored.
pub fn exp_diagonal(m: &Matrix3) -> Matrix3 {
    let d = diagonal(m);
    diag(&[d[0].exp(), d[1].exp(), d[2].exp()])
}

/// Integer power `m^n` by binary exponentiation.
///
/// Uses ⌊log₂ n⌋ squarings and at most as many extra products, so rounding
/// error grows with log n rather than n. `m^0` is the identity.
pub fn powu(m: &Matrix3, mut n: u32) -> Matrix3 {
    let mut result = identity();
    let mut base = *m;
    while n > 0 {
        if n & 1 == 1 {
            result = mul(&result, &base);
        }
        n >>= 1;
        if n > 0 {
            base = mul(&base, &base);
        }
    }
    result
}

/// Squared modulus of every component.
pub fn abs2(v: &Vector3) -> [f64; 3] {
    [v[0].norm_sqr(), v[1].norm_sqr(), v[2].norm_sqr()]
}
