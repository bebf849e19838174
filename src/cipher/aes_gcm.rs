//! AES-GCM as a [`SymmetricCipher`].
//!
//! Input is buffered by `update` and sealed or opened as one message by `do_final`.
//! Every key is expected to come fresh out of a KEM and to protect a single message,
//! so the nonce is fixed to zero.

use super::{CipherError, CipherMode, SymmetricCipher};
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes128Gcm, Aes256Gcm, Nonce};
use core::fmt;
use zeroize::Zeroizing;

/// Size of the authentication tag in bytes.
pub const TAG_BYTES: usize = 16;

const NONCE: [u8; 12] = [0u8; 12];

enum Engine {
    Aes128(Aes128Gcm),
    Aes256(Aes256Gcm),
}

impl Engine {
    fn new(key: &[u8]) -> Result<Self, CipherError> {
        let engine = match key.len() {
            16 => Aes128Gcm::new_from_slice(key).map(Engine::Aes128).ok(),
            32 => Aes256Gcm::new_from_slice(key).map(Engine::Aes256).ok(),
            _ => None,
        };

        engine.ok_or(CipherError::InvalidKeyLength(key.len()))
    }

    fn name(&self) -> &'static str {
        match self {
            Engine::Aes128(_) => "AES-128-GCM",
            Engine::Aes256(_) => "AES-256-GCM",
        }
    }

    fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        let nonce = Nonce::from_slice(&NONCE);
        let sealed = match self {
            Engine::Aes128(c) => c.encrypt(nonce, plaintext),
            Engine::Aes256(c) => c.encrypt(nonce, plaintext),
        };

        sealed.map_err(|_| CipherError::EncryptionFailed)
    }

    fn open(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
        if ciphertext.len() < TAG_BYTES {
            return Err(CipherError::TruncatedCiphertext(ciphertext.len()));
        }

        let nonce = Nonce::from_slice(&NONCE);
        let opened = match self {
            Engine::Aes128(c) => c.decrypt(nonce, ciphertext),
            Engine::Aes256(c) => c.decrypt(nonce, ciphertext),
        };

        opened.map_err(|_| CipherError::AuthenticationFailed)
    }
}

/// AES-GCM with a 128 or 256 bit key, chosen by the length of the key passed to `init`.
#[derive(Default)]
pub struct AesGcmCipher {
    state: Option<(CipherMode, Engine)>,
    buffer: Zeroizing<Vec<u8>>,
}

impl AesGcmCipher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Debug for AesGcmCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AesGcmCipher")
            .field("algorithm", &self.algorithm())
            .field("mode", &self.state.as_ref().map(|(mode, _)| *mode))
            .field("buffered", &self.buffer.len())
            .finish()
    }
}

impl SymmetricCipher for AesGcmCipher {
    fn algorithm(&self) -> &str {
        self.state
            .as_ref()
            .map(|(_, engine)| engine.name())
            .unwrap_or("AES-GCM")
    }

    fn block_size(&self) -> usize {
        16
    }

    fn iv(&self) -> Option<&[u8]> {
        Some(&NONCE[..])
    }

    fn output_size(&self, input_len: usize) -> usize {
        let total = self.buffer.len() + input_len;
        match self.state {
            Some((CipherMode::Encrypt, _)) => total + TAG_BYTES,
            Some((CipherMode::Decrypt, _)) => total.saturating_sub(TAG_BYTES),
            None => 0,
        }
    }

    fn init(&mut self, mode: CipherMode, key: &[u8]) -> Result<(), CipherError> {
        self.buffer.clear();
        self.state = Some((mode, Engine::new(key)?));

        Ok(())
    }

    fn update(&mut self, input: &[u8]) -> Result<Vec<u8>, CipherError> {
        if self.state.is_none() {
            return Err(CipherError::NotInitialized);
        }

        self.buffer.extend_from_slice(input);

        Ok(Vec::new())
    }

    fn do_final(&mut self, input: &[u8]) -> Result<Vec<u8>, CipherError> {
        let (mode, engine) = self.state.take().ok_or(CipherError::NotInitialized)?;
        self.buffer.extend_from_slice(input);

        let out = match mode {
            CipherMode::Encrypt => engine.seal(&self.buffer),
            CipherMode::Decrypt => engine.open(&self.buffer),
        };
        self.buffer.clear();

        out
    }
}
