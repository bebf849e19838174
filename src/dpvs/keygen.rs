//! Master key generation of the inner-product scheme by Okamoto, Takashima et al.
//! * From: "[Fully Secure Functional Encryption: Attribute-Based Encryption and (Hierarchical) Inner Product Encryption](https://eprint.iacr.org/2010/110.pdf)"
//!
//! Only the dual basis setup is implemented: a random change of basis `X` is applied to the
//! canonical basis of `G1^N` and its dual `(X^T)^-1` to the canonical basis of `G2^N`,
//! after which both bases are reduced to `n + 2` vectors.

use super::{canonical_basis, change_basis, vector_pairing, Layout, Matrix, Vector};
use crate::error::{Error, Result};
use crate::pairing::PairingEngine;
use crate::params::ParameterMap;
use rand::{CryptoRng, RngCore};
use tracing::{debug, warn};

/// Inputs of the master key generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IpParameters {
    curve: ParameterMap,
    n: usize,
}

impl IpParameters {
    /// `curve` describes the pairing, `n` is the length of the inner-product vectors.
    pub fn new(curve: ParameterMap, n: usize) -> Result<Self> {
        if n == 0 {
            return Err(Error::InvalidConfig(
                "inner-product dimension must be positive".to_string(),
            ));
        }

        Ok(IpParameters { curve, n })
    }

    pub fn curve(&self) -> &ParameterMap {
        &self.curve
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn layout(&self) -> Layout {
        Layout::new(self.n)
    }
}

/// Master public key: the reduced basis `B` and `sigma = e(g1, g2)`.
#[derive(Clone, Debug, PartialEq)]
pub struct PublicKey<E: PairingEngine> {
    pub parameters: IpParameters,
    pub b: Vec<Vector<E::G1>>,
    pub sigma: E::Gt,
}

/// Master secret key: the reduced dual basis `B*`.
#[derive(Clone, Debug, PartialEq)]
pub struct SecretKey<E: PairingEngine> {
    pub parameters: IpParameters,
    pub b_star: Vec<Vector<E::G2>>,
}

/// Generates a master key pair on the pairing described by `parameters`.
///
/// Fails with [`Error::UnsupportedPairing`] when `E` cannot be built from the curve map.
pub fn generate<E, R>(parameters: &IpParameters, rng: &mut R) -> Result<(PublicKey<E>, SecretKey<E>)>
where
    E: PairingEngine,
    R: RngCore + CryptoRng,
{
    let engine = E::from_parameters(&parameters.curve)?;
    let layout = parameters.layout();

    debug!(n = parameters.n, dim = layout.dimension(), "generating dual bases");

    let (b_full, b_star_full) = dual_bases(&engine, layout.dimension(), rng);

    let b = layout.select(&b_full, &layout.public_indices());
    let b_star = layout.select(&b_star_full, &layout.secret_indices());
    let sigma = engine.pairing(&engine.g1(), &engine.g2());

    Ok((
        PublicKey {
            parameters: parameters.clone(),
            b,
            sigma,
        },
        SecretKey {
            parameters: parameters.clone(),
            b_star,
        },
    ))
}

/// Full bases `B` and `B*` of dimension `dim`.
pub(crate) fn dual_bases<E, R>(
    engine: &E,
    dim: usize,
    rng: &mut R,
) -> (Vec<Vector<E::G1>>, Vec<Vector<E::G2>>)
where
    E: PairingEngine,
    R: RngCore + CryptoRng,
{
    let (transform, dual) = sample_transform::<E::Scalar, R>(dim, rng);

    let b = change_basis(&canonical_basis(dim, engine.g1()), &transform);
    let b_star = change_basis(&canonical_basis(dim, engine.g2()), &dual);

    (b, b_star)
}

/// Uniform invertible matrix `X` together with `(X^T)^-1`.
fn sample_transform<F, R>(dim: usize, rng: &mut R) -> (Matrix<F>, Matrix<F>)
where
    F: group::ff::Field,
    R: RngCore + CryptoRng,
{
    loop {
        let transform = Matrix::random(dim, rng);
        match transform.transpose().invert() {
            Some(dual) => return (transform, dual),
            None => warn!(dim, "sampled a singular transform, resampling"),
        }
    }
}

/// `table[i][j] = e(b[i], b_star[j])`.
pub fn pairing_table<E: PairingEngine>(
    engine: &E,
    b: &[Vector<E::G1>],
    b_star: &[Vector<E::G2>],
) -> Vec<Vec<E::Gt>> {
    b.iter()
        .map(|v| b_star.iter().map(|w| vector_pairing(engine, v, w)).collect())
        .collect()
}
