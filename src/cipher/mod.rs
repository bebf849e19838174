//! Streaming symmetric ciphers driven by [`KemCipher`](crate::hybrid::KemCipher).

#[cfg(feature = "aead")]
#[cfg_attr(docsrs, doc(cfg(feature = "aead")))]
pub mod aes_gcm;

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CipherMode {
    Encrypt,
    Decrypt,
}

/// Errors of a symmetric cipher, passed through unchanged by the hybrid cipher.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    #[error("cipher used before initialisation")]
    NotInitialized,

    #[error("unsupported key length of {0} bytes")]
    InvalidKeyLength(usize),

    #[error("ciphertext too short: {0} bytes")]
    TruncatedCiphertext(usize),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("encryption failed")]
    EncryptionFailed,
}

/// A symmetric cipher with an `init`, `update`, `do_final` life cycle.
pub trait SymmetricCipher {
    fn algorithm(&self) -> &str;

    /// Block size in bytes, 0 for stream-like modes.
    fn block_size(&self) -> usize;

    fn iv(&self) -> Option<&[u8]>;

    /// Upper bound on the output of `update` followed by `do_final` for `input_len`
    /// further input bytes.
    fn output_size(&self, input_len: usize) -> usize;

    fn init(&mut self, mode: CipherMode, key: &[u8]) -> Result<(), CipherError>;

    fn update(&mut self, input: &[u8]) -> Result<Vec<u8>, CipherError>;

    /// Finishes the current message. The cipher has to be initialised again afterwards.
    fn do_final(&mut self, input: &[u8]) -> Result<Vec<u8>, CipherError>;
}
