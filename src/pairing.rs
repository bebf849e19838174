//! Bilinear pairing engines consumed by the dual pairing vector space construction.
//!
//! The pairing arithmetic itself lives in the curve crate; this module only adapts
//! it to the [`PairingEngine`] trait and decides from a [`ParameterMap`] whether an
//! engine can be instantiated.

use crate::error::{Error, Result};
use crate::params::{ParameterMap, TYPE_KEY};
use group::{ff::PrimeField, Group};
use irmaseal_curve::{
    multi_miller_loop, pairing, G1Affine, G1Projective, G2Affine, G2Prepared, G2Projective, Gt,
    Scalar,
};

/// A bilinear map `e: G1 x G2 -> Gt` over groups of the same prime order.
pub trait PairingEngine: Sized {
    /// Scalar field of the prime order.
    type Scalar: PrimeField;

    type G1: Group<Scalar = Self::Scalar>;

    type G2: Group<Scalar = Self::Scalar>;

    type Gt: Group<Scalar = Self::Scalar>;

    /// Builds the engine described by `params`.
    ///
    /// Fails with [`Error::UnsupportedPairing`] when `params` describe another curve.
    fn from_parameters(params: &ParameterMap) -> Result<Self>;

    /// Generator of `G1`.
    fn g1(&self) -> Self::G1;

    /// Generator of `G2`.
    fn g2(&self) -> Self::G2;

    fn pairing(&self, p: &Self::G1, q: &Self::G2) -> Self::Gt;

    /// `prod_k e(p[k], q[k])`, written additively.
    fn product_pairing(&self, p: &[Self::G1], q: &[Self::G2]) -> Self::Gt {
        p.iter()
            .zip(q.iter())
            .fold(Self::Gt::identity(), |acc, (p, q)| acc + self.pairing(p, q))
    }
}

/// Optimal ate pairing on BLS12-381.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bls12Engine;

impl Bls12Engine {
    /// Value of the `type` key naming this curve.
    pub const CURVE_TYPE: &'static str = "bls12_381";

    /// Order of the pairing groups in base 10.
    pub const ORDER: &'static str =
        "52435875175126190479447740508185965837690552500527637822603658699938581184513";

    /// Parameter map from which [`PairingEngine::from_parameters`] rebuilds this engine.
    pub fn parameters() -> ParameterMap {
        let mut map = ParameterMap::new();
        map.put(TYPE_KEY, Self::CURVE_TYPE);
        map.put("r", Self::ORDER);

        map
    }
}

impl PairingEngine for Bls12Engine {
    type Scalar = Scalar;
    type G1 = G1Projective;
    type G2 = G2Projective;
    type Gt = Gt;

    fn from_parameters(params: &ParameterMap) -> Result<Self> {
        let curve_type = params.require(TYPE_KEY)?;
        if curve_type != Self::CURVE_TYPE {
            return Err(Error::UnsupportedPairing(curve_type.to_string()));
        }

        // The order is optional, but must be the curve order when present.
        if params.contains_key("r") {
            let r: num_bigint_dig::BigUint = params.parse("r")?;
            if r.to_string() != Self::ORDER {
                return Err(Error::MalformedParameter("r".to_string()));
            }
        }

        Ok(Bls12Engine)
    }

    fn g1(&self) -> G1Projective {
        G1Projective::generator()
    }

    fn g2(&self) -> G2Projective {
        G2Projective::generator()
    }

    fn pairing(&self, p: &G1Projective, q: &G2Projective) -> Gt {
        pairing(&G1Affine::from(p), &G2Affine::from(q))
    }

    /// Shares one final exponentiation between all terms.
    fn product_pairing(&self, p: &[G1Projective], q: &[G2Projective]) -> Gt {
        let p: Vec<G1Affine> = p.iter().map(G1Affine::from).collect();
        let q: Vec<G2Prepared> = q
            .iter()
            .map(|q| G2Prepared::from(G2Affine::from(q)))
            .collect();
        let terms: Vec<(&G1Affine, &G2Prepared)> = p.iter().zip(q.iter()).collect();

        multi_miller_loop(&terms).final_exponentiation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{CurveParameters, TypeA1CurveGenerator};
    use group::ff::Field;

    #[test]
    fn instantiation() {
        assert!(Bls12Engine::from_parameters(&Bls12Engine::parameters()).is_ok());

        let mut map = ParameterMap::new();
        map.put("type", "bls12_381");
        assert!(Bls12Engine::from_parameters(&map).is_ok());

        map.put("r", 101);
        assert!(matches!(
            Bls12Engine::from_parameters(&map),
            Err(Error::MalformedParameter(k)) if k == "r"
        ));
    }

    #[test]
    fn type_a1_is_not_bls12() {
        let mut rng = rand::thread_rng();
        let params: CurveParameters = TypeA1CurveGenerator::new(2, 16)
            .unwrap()
            .generate(&mut rng)
            .unwrap()
            .into();

        assert!(matches!(
            Bls12Engine::from_parameters(&params.to_map()),
            Err(Error::UnsupportedPairing(t)) if t == "a1"
        ));
    }

    #[test]
    fn product_pairing_matches_sum_of_pairings() {
        let mut rng = rand::thread_rng();
        let engine = Bls12Engine;

        let p: Vec<G1Projective> = (0..3).map(|_| G1Projective::random(&mut rng)).collect();
        let q: Vec<G2Projective> = (0..3).map(|_| G2Projective::random(&mut rng)).collect();

        let expected = p
            .iter()
            .zip(q.iter())
            .fold(Gt::identity(), |acc, (p, q)| acc + engine.pairing(p, q));

        assert_eq!(engine.product_pairing(&p, &q), expected);
    }

    #[test]
    fn bilinear() {
        let mut rng = rand::thread_rng();
        let engine = Bls12Engine;
        let a = Scalar::random(&mut rng);
        let b = Scalar::random(&mut rng);

        let lhs = engine.pairing(&(engine.g1() * a), &(engine.g2() * b));
        let rhs = engine.pairing(&engine.g1(), &engine.g2()) * (a * b);

        assert_eq!(lhs, rhs);
    }
}
