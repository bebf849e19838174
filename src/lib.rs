//! Building blocks of pairing-based cryptography in Rust.
//!
//! This crate contains:
//! * generators for the domain parameters of type A and type A1 pairing-friendly curves
//!   (see [the params module](`crate::params`)),
//! * the dual pairing vector space (DPVS) master key generation of inner-product functional
//!   encryption (see [the dpvs module](`crate::dpvs`)), on top of the
//!   [BLS12-381 pairing-friendly elliptic curve](https://github.com/zkcrypto/bls12_381),
//! * a KEM/DEM hybrid cipher over any [`KeyEncapsulationMechanism`](`crate::kem::KeyEncapsulationMechanism`)
//!   and [`SymmetricCipher`](`crate::cipher::SymmetricCipher`) (see [the hybrid module](`crate::hybrid`)).
//!
//! # Examples
//!
//! ```
//! use pbc_kit::dpvs::{generate, pairing_table, IpParameters};
//! use pbc_kit::pairing::{Bls12Engine, PairingEngine};
//!
//! let mut rng = rand::thread_rng();
//!
//! // Master keys for inner products of length 2.
//! let params = IpParameters::new(Bls12Engine::parameters(), 2).unwrap();
//! let (pk, sk) = generate::<Bls12Engine, _>(&params, &mut rng).unwrap();
//!
//! // The first vectors of both bases pair to sigma.
//! let engine = Bls12Engine::from_parameters(params.curve()).unwrap();
//! let table = pairing_table(&engine, &pk.b, &sk.b_star);
//! assert_eq!(table[0][0], pk.sigma);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(test)]
#[macro_use]
#[allow(unused)]
mod test_macros;

#[allow(unused)]
mod util;

pub mod cipher;
pub mod dpvs;
pub mod error;
pub mod hybrid;
pub mod kem;
pub mod pairing;
pub mod params;

pub use error::{Error, Result};
pub use util::PRIME_CERTAINTY;
