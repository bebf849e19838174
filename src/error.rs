use crate::cipher::CipherError;
use thiserror::Error;

/// Result type used throughout this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised while generating parameters, keys or while setting up a hybrid cipher.
#[derive(Debug, Error)]
pub enum Error {
    /// The generator or scheme was configured with unusable parameters.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A required key is absent from a curve parameter map.
    #[error("missing curve parameter `{0}`")]
    MissingParameter(String),

    /// A key of a curve parameter map does not hold a value of the expected shape.
    #[error("malformed curve parameter `{0}`")]
    MalformedParameter(String),

    /// The `type` discriminator names a curve family this crate does not know.
    #[error("unknown curve type `{0}`")]
    UnknownCurveType(String),

    /// A pairing engine could not be built from the given parameters.
    #[error("cannot instantiate a pairing from parameters of type `{0}`")]
    UnsupportedPairing(String),

    /// The symmetric key requested from a KEM is larger than its key block.
    #[error("cipher strength too high for the passed KEM: {requested} bytes requested, key block holds {available}")]
    StrengthMismatch { requested: usize, available: usize },

    /// A bounded parameter search ran out of attempts.
    #[error("parameter search exhausted after {0} attempts")]
    SearchExhausted(u64),

    /// The caller asked a running search to stop.
    #[error("parameter search cancelled")]
    Cancelled,

    /// `process_block` was called before `init`.
    #[error("key encapsulation mechanism used before initialisation")]
    KemNotInitialized,

    /// The encapsulation handed to the KEM could not be decoded.
    #[error("invalid encapsulation")]
    InvalidEncapsulation,

    #[error(transparent)]
    Cipher(#[from] CipherError),
}
