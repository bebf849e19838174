//! Hashed ElGamal KEM on the G1 group of BLS12-381.
//!
//! Encapsulation picks `r`, sends `c = g*r` and derives the key block from `pk*r` and `c`
//! with SHAKE256, so the block can be as long as the caller wants.

use crate::error::{Error, Result};
use crate::kem::{KemMode, KeyEncapsulationMechanism};
use crate::util::{shake256, G1_BYTES};
use arrayref::array_ref;
use group::{ff::Field, Group};
use irmaseal_curve::{G1Affine, G1Projective, Scalar};
use rand::{CryptoRng, RngCore};
use subtle::CtOption;
use tracing::trace;

/// Size of an encapsulation in bytes.
pub const ENCAPSULATION_BYTES: usize = G1_BYTES;

/// Default size of the key block in bytes.
pub const DEFAULT_KEY_BLOCK_BYTES: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PublicKey(pub G1Affine);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SecretKey(Scalar);

/// Generates a key pair.
pub fn keypair<R: RngCore + CryptoRng>(rng: &mut R) -> (PublicKey, SecretKey) {
    let sk = Scalar::random(&mut *rng);
    let pk = G1Affine::from(G1Projective::generator() * sk);

    (PublicKey(pk), SecretKey(sk))
}

#[derive(Clone, Debug)]
pub struct ElGamalKem {
    key_block_size: usize,
    mode: Option<KemMode<PublicKey, SecretKey>>,
}

impl Default for ElGamalKem {
    fn default() -> Self {
        ElGamalKem::new(DEFAULT_KEY_BLOCK_BYTES)
    }
}

impl ElGamalKem {
    pub fn new(key_block_size: usize) -> Self {
        ElGamalKem {
            key_block_size,
            mode: None,
        }
    }

    fn derive_key(&self, shared: &G1Affine, c: &G1Affine) -> Vec<u8> {
        shake256(
            &[&shared.to_compressed(), &c.to_compressed()],
            self.key_block_size,
        )
    }
}

impl KeyEncapsulationMechanism for ElGamalKem {
    type EncryptionKey = PublicKey;
    type DecryptionKey = SecretKey;

    fn key_block_size(&self) -> usize {
        self.key_block_size
    }

    fn init(&mut self, mode: KemMode<PublicKey, SecretKey>) {
        self.mode = Some(mode);
    }

    fn process_block<R: RngCore + CryptoRng>(
        &mut self,
        input: &[u8],
        rng: &mut R,
    ) -> Result<Vec<u8>> {
        match self.mode {
            None => Err(Error::KemNotInitialized),
            Some(KemMode::Encapsulate(pk)) => {
                let r = Scalar::random(&mut *rng);
                let c = G1Affine::from(G1Projective::generator() * r);
                let shared = G1Affine::from(pk.0 * r);

                let mut out = self.derive_key(&shared, &c);
                out.extend_from_slice(&c.to_compressed());

                Ok(out)
            }
            Some(KemMode::Decapsulate(sk)) => {
                if input.len() != ENCAPSULATION_BYTES {
                    trace!(len = input.len(), "encapsulation of unexpected length");
                    return Err(Error::InvalidEncapsulation);
                }

                let c = G1Affine::from_compressed(array_ref![input, 0, ENCAPSULATION_BYTES])
                    .and_then(|c| CtOption::new(c, !c.is_identity()));
                let c: G1Affine = Option::from(c).ok_or(Error::InvalidEncapsulation)?;
                let shared = G1Affine::from(c * sk.0);

                Ok(self.derive_key(&shared, &c))
            }
        }
    }
}
