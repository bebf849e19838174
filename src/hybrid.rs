//! Hybrid encryption: a KEM supplies a fresh symmetric key, a [`SymmetricCipher`] does the rest.
//!
//! # Examples
//!
//! ```
//! use pbc_kit::cipher::aes_gcm::AesGcmCipher;
//! use pbc_kit::hybrid::{KemCipher, KemCipherParameters};
//! use pbc_kit::kem::elgamal::{keypair, ElGamalKem};
//!
//! let mut rng = rand::thread_rng();
//! let (pk, sk) = keypair(&mut rng);
//!
//! let mut sender = KemCipher::new(AesGcmCipher::new(), ElGamalKem::default());
//! let encapsulation = sender
//!     .init(KemCipherParameters::Encryption { kem: pk, cipher_key_strength: 128 }, &mut rng)
//!     .unwrap()
//!     .unwrap();
//! let ct = sender.do_final(b"secret message").unwrap();
//!
//! let mut receiver = KemCipher::new(AesGcmCipher::new(), ElGamalKem::default());
//! receiver
//!     .init(
//!         KemCipherParameters::Decryption { kem: sk, cipher_key_strength: 128, encapsulation },
//!         &mut rng,
//!     )
//!     .unwrap();
//! assert_eq!(receiver.do_final(&ct).unwrap(), b"secret message");
//! ```

use crate::cipher::{CipherError, CipherMode, SymmetricCipher};
use crate::error::{Error, Result};
use crate::kem::{KemMode, KeyEncapsulationMechanism};
use rand::{CryptoRng, RngCore};
use tracing::debug;
use zeroize::Zeroizing;

/// Direction-specific inputs of [`KemCipher::init`].
///
/// `cipher_key_strength` is the symmetric key size in bits.
#[derive(Clone, Debug)]
pub enum KemCipherParameters<E, D> {
    Encryption {
        kem: E,
        cipher_key_strength: usize,
    },
    Decryption {
        kem: D,
        cipher_key_strength: usize,
        encapsulation: Vec<u8>,
    },
}

impl<E, D> KemCipherParameters<E, D> {
    pub fn cipher_key_strength(&self) -> usize {
        match self {
            KemCipherParameters::Encryption {
                cipher_key_strength,
                ..
            }
            | KemCipherParameters::Decryption {
                cipher_key_strength,
                ..
            } => *cipher_key_strength,
        }
    }

    /// Key strength rounded up to whole bytes.
    pub fn strength_bytes(&self) -> usize {
        (self.cipher_key_strength() + 7) / 8
    }
}

/// KEM/DEM composition of a key encapsulation mechanism `K` and a symmetric cipher `C`.
#[derive(Debug)]
pub struct KemCipher<K, C> {
    cipher: C,
    kem: K,
}

type Parameters<K> = KemCipherParameters<
    <K as KeyEncapsulationMechanism>::EncryptionKey,
    <K as KeyEncapsulationMechanism>::DecryptionKey,
>;

impl<K, C> KemCipher<K, C>
where
    K: KeyEncapsulationMechanism,
    C: SymmetricCipher,
{
    pub fn new(cipher: C, kem: K) -> Self {
        KemCipher { cipher, kem }
    }

    /// Sets up the KEM and the cipher for one message.
    ///
    /// Returns the encapsulation to send along with the ciphertext when encrypting, and
    /// `None` when decrypting. Fails with [`Error::StrengthMismatch`] before touching the
    /// KEM or the cipher when the KEM cannot produce `cipher_key_strength` bits.
    pub fn init<R: RngCore + CryptoRng>(
        &mut self,
        params: Parameters<K>,
        rng: &mut R,
    ) -> Result<Option<Vec<u8>>> {
        let strength = params.strength_bytes();
        let available = self.kem.key_block_size();

        if available < strength {
            return Err(Error::StrengthMismatch {
                requested: strength,
                available,
            });
        }

        match params {
            KemCipherParameters::Encryption { kem, .. } => {
                self.kem.init(KemMode::Encapsulate(kem));
                let out = Zeroizing::new(self.kem.process_block(&[], rng)?);
                if out.len() < available {
                    return Err(Error::InvalidEncapsulation);
                }

                self.cipher.init(CipherMode::Encrypt, &out[..strength])?;
                debug!(
                    strength,
                    algorithm = self.cipher.algorithm(),
                    "initialised kem cipher for encryption"
                );

                Ok(Some(out[available..].to_vec()))
            }
            KemCipherParameters::Decryption {
                kem, encapsulation, ..
            } => {
                self.kem.init(KemMode::Decapsulate(kem));
                let key = Zeroizing::new(self.kem.process_block(&encapsulation, rng)?);
                if key.len() < strength {
                    return Err(Error::InvalidEncapsulation);
                }

                self.cipher.init(CipherMode::Decrypt, &key[..strength])?;
                debug!(
                    strength,
                    algorithm = self.cipher.algorithm(),
                    "initialised kem cipher for decryption"
                );

                Ok(None)
            }
        }
    }

    pub fn update(&mut self, input: &[u8]) -> core::result::Result<Vec<u8>, CipherError> {
        self.cipher.update(input)
    }

    pub fn do_final(&mut self, input: &[u8]) -> core::result::Result<Vec<u8>, CipherError> {
        self.cipher.do_final(input)
    }

    pub fn output_size(&self, input_len: usize) -> usize {
        self.cipher.output_size(input_len)
    }

    pub fn cipher(&self) -> &C {
        &self.cipher
    }

    pub fn kem(&self) -> &K {
        &self.kem
    }
}
