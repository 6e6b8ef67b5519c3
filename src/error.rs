//! Error type for ECDSA operations.
//!
//! All fallible operations in this crate report failures with the
//! [`Error`] enum. Note that a signature which is well-formed but simply
//! does not match the message and public key is not an error: the
//! verification functions return `Ok(false)` in that case.

use thiserror::Error;

/// Errors from key, signature and message handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Private key is not 32 bytes, or its value is zero or not lower
    /// than the curve order.
    #[error("invalid private key")]
    InvalidPrivateKey,

    /// Message digest is empty or longer than 32 bytes.
    #[error("invalid message digest length: {0} (expected 1 to 32 bytes)")]
    InvalidMessageLength(usize),

    /// Public key has an unsupported length or prefix, a coordinate out
    /// of range, or is not a point on the curve.
    #[error("invalid public key encoding")]
    InvalidPublicKeyEncoding,

    /// Signature is neither a 64-byte `r||s` value nor a strict DER
    /// structure.
    #[error("invalid signature encoding")]
    InvalidSignatureEncoding,

    /// One of the signature components is not lower than the curve order.
    #[error("signature component out of range")]
    SignatureOutOfRange,

    /// Signature has a zero component, or a high `s` value.
    #[error("signature is not in canonical (low-s) form")]
    MalleableSignature,

    /// Recovery identifier is not in the 0 to 3 range.
    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    /// No public key can be recovered from the signature.
    #[error("public key recovery failed")]
    RecoveryFailed,

    /// The deterministic nonce generator did not produce a usable nonce.
    #[error("nonce generation exhausted")]
    NonceExhausted,
}
