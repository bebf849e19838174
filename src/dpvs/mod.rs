//! Dual pairing vector spaces (DPVS).
//!
//! A vector here is an element of `G^N` for a pairing group `G`, and the pairing of two
//! vectors is the product of the coordinate-wise pairings. Starting from the
//! canonical basis `(g, 1, ..., 1), ..., (1, ..., 1, g)` and a random invertible
//! matrix `X`, the rows of `X` give a basis `B`, and the rows of `(X^T)^-1` give a
//! dual basis `B*` with `e(B[i], B*[j]) = e(g1, g2)^{delta_ij}`.
//!
//! See [`keygen`] for the master key generation of the inner-product scheme built on top.

pub mod keygen;
pub mod matrix;

pub use keygen::{generate, pairing_table, IpParameters, PublicKey, SecretKey};
pub use matrix::Matrix;

use crate::pairing::PairingEngine;
use core::ops::Range;
use group::Group;

/// Element of the product group `G^N`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vector<G>(Vec<G>);

impl<G: Group> Vector<G> {
    /// The all-identity vector of dimension `dim`.
    pub fn zero(dim: usize) -> Self {
        Vector(vec![G::identity(); dim])
    }

    /// `g` at coordinate `i`, identity elsewhere.
    pub fn unit(dim: usize, i: usize, g: G) -> Self {
        let mut v = Self::zero(dim);
        v.0[i] = g;

        v
    }

    pub fn from_coordinates(coordinates: Vec<G>) -> Self {
        Vector(coordinates)
    }

    pub fn dim(&self) -> usize {
        self.0.len()
    }

    pub fn at(&self, i: usize) -> &G {
        &self.0[i]
    }

    pub fn coordinates(&self) -> &[G] {
        &self.0
    }

    /// Coordinate-wise scalar multiplication. Identity coordinates are left untouched.
    pub fn mul_scalar(&self, s: &G::Scalar) -> Self {
        Vector(
            self.0
                .iter()
                .map(|x| {
                    if bool::from(x.is_identity()) {
                        *x
                    } else {
                        *x * *s
                    }
                })
                .collect(),
        )
    }

    /// Coordinate-wise group addition.
    pub fn add_assign(&mut self, rhs: &Self) {
        debug_assert_eq!(self.dim(), rhs.dim());

        for (x, y) in self.0.iter_mut().zip(rhs.0.iter()) {
            *x += *y;
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|x| bool::from(x.is_identity()))
    }
}

/// The canonical basis of `G^dim` built on the generator `g`.
pub fn canonical_basis<G: Group>(dim: usize, g: G) -> Vec<Vector<G>> {
    (0..dim).map(|i| Vector::unit(dim, i, g)).collect()
}

/// `sum_j basis[j] * coefficients[j]`.
pub fn linear_combination<G: Group>(basis: &[Vector<G>], coefficients: &[G::Scalar]) -> Vector<G> {
    debug_assert_eq!(basis.len(), coefficients.len());

    let dim = basis.first().map(Vector::dim).unwrap_or(0);
    basis
        .iter()
        .zip(coefficients.iter())
        .fold(Vector::zero(dim), |mut acc, (v, c)| {
            acc.add_assign(&v.mul_scalar(c));
            acc
        })
}

/// Applies the change of basis `transform` to `basis`: row `i` of the result is
/// the combination of `basis` with the coefficients of row `i` of `transform`.
pub fn change_basis<G: Group>(basis: &[Vector<G>], transform: &Matrix<G::Scalar>) -> Vec<Vector<G>> {
    (0..transform.dim())
        .map(|i| linear_combination(basis, transform.row(i)))
        .collect()
}

/// Product pairing of two vectors of equal dimension.
pub fn vector_pairing<E: PairingEngine>(
    engine: &E,
    v: &Vector<E::G1>,
    w: &Vector<E::G2>,
) -> E::Gt {
    engine.product_pairing(v.coordinates(), w.coordinates())
}

/// Index layout of the inner-product DPVS of dimension `N = 2n + 3`.
///
/// The first `n` vectors carry the inner-product components. Of the three trailing
/// vectors, `B` publishes `N-3` and `N-1` and `B*` keeps `N-3` and `N-2`;
/// everything from `n` to `N-4` stays hidden.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    n: usize,
}

impl Layout {
    pub fn new(n: usize) -> Self {
        Layout { n }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// `N = 2n + 3`.
    pub fn dimension(&self) -> usize {
        2 * self.n + 3
    }

    /// Size of the reduced bases, `n + 2`.
    pub fn reduced_len(&self) -> usize {
        self.n + 2
    }

    pub fn head(&self) -> Range<usize> {
        0..self.n
    }

    /// Trailing index kept by both bases.
    pub fn shared_tail(&self) -> usize {
        self.dimension() - 3
    }

    /// Trailing index kept only by `B`.
    pub fn public_tail(&self) -> usize {
        self.dimension() - 1
    }

    /// Trailing index kept only by `B*`.
    pub fn secret_tail(&self) -> usize {
        self.dimension() - 2
    }

    /// Indices of the full basis that survive in `B`.
    pub fn public_indices(&self) -> Vec<usize> {
        self.reduced(self.public_tail())
    }

    /// Indices of the full basis that survive in `B*`.
    pub fn secret_indices(&self) -> Vec<usize> {
        self.reduced(self.secret_tail())
    }

    /// Reduces a full basis to `head`, `shared_tail` and `tail`.
    pub(crate) fn select<G: Clone>(&self, full: &[Vector<G>], indices: &[usize]) -> Vec<Vector<G>> {
        debug_assert_eq!(full.len(), self.dimension());

        indices.iter().map(|&i| full[i].clone()).collect()
    }

    fn reduced(&self, tail: usize) -> Vec<usize> {
        self.head()
            .chain(core::iter::once(self.shared_tail()))
            .chain(core::iter::once(tail))
            .collect()
    }
}
