//! Key encapsulation mechanisms (KEMs) usable in a [`KemCipher`](crate::hybrid::KemCipher).
//!
//! A KEM is initialised for either direction and then fed one block:
//! - when encapsulating the input is ignored and the output is `key block || encapsulation`,
//! - when decapsulating the input is the encapsulation and the output is the key block.

#[cfg(feature = "elgamal")]
#[cfg_attr(docsrs, doc(cfg(feature = "elgamal")))]
pub mod elgamal;

use crate::error::Result;
use rand::{CryptoRng, RngCore};

/// Direction a KEM is initialised for, together with the key it needs.
#[derive(Clone, Debug)]
pub enum KemMode<E, D> {
    Encapsulate(E),
    Decapsulate(D),
}

impl<E, D> KemMode<E, D> {
    pub fn is_encapsulation(&self) -> bool {
        matches!(self, KemMode::Encapsulate(_))
    }
}

pub trait KeyEncapsulationMechanism {
    /// Key used to encapsulate.
    type EncryptionKey;

    /// Key used to decapsulate.
    type DecryptionKey;

    /// Number of key bytes produced per block, also the offset of the encapsulation.
    fn key_block_size(&self) -> usize;

    fn init(&mut self, mode: KemMode<Self::EncryptionKey, Self::DecryptionKey>);

    /// Processes one block in the direction set by [`Self::init`].
    ///
    /// Fails with [`Error::KemNotInitialized`](crate::Error::KemNotInitialized) before `init`.
    fn process_block<R: RngCore + CryptoRng>(
        &mut self,
        input: &[u8],
        rng: &mut R,
    ) -> Result<Vec<u8>>;
}
