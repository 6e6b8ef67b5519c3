//! Byte-oriented ECDSA interface.
//!
//! This module exposes the ECDSA operations over secp256k1 on raw byte
//! strings: private keys are 32-byte big-endian values, public keys are
//! 33-byte compressed or 65-byte uncompressed/hybrid encodings, and
//! signatures are either 64-byte `r||s` values or DER structures. The
//! message is always provided as a pre-computed digest (1 to 32 bytes).
//!
//! Signature verification enforces, by default, that `s` is in the
//! lower half of its range (the "low-s" rule), which makes signatures
//! non-malleable: a third party cannot turn a valid signature `(r, s)`
//! into another valid signature `(r, n-s)` for the same message. The
//! policy is carried by the `Verifier` type; `Verifier::allow_high_s()`
//! accepts both forms. The free function `verify()` uses the default
//! policy.
//!
//! ```
//! use secp256k1_ecdsa::ecdsa;
//!
//! let sk = [0x01u8; 32];
//! let digest = [0x42u8; 32];
//! let sig = ecdsa::sign(&digest, &sk).unwrap();
//! let pk = ecdsa::public_key_create(&sk).unwrap();
//! assert!(ecdsa::verify(&digest, &sig.encode_fixed(), &pk) == Ok(true));
//! ```

use crate::error::Error;
use crate::secp256k1::{PrivateKey, PublicKey};
use crate::signature::{RecoveryId, Signature};

pub use crate::rfc6979::MAX_NONCE_ATTEMPTS;

/// Returns true if `sk` is a valid private key: exactly 32 bytes,
/// encoding (big-endian) an integer in the `1..n-1` range.
pub fn is_valid_private_key(sk: &[u8]) -> bool {
    PrivateKey::is_valid(sk)
}

/// Computes the public key for a private key, in compressed format.
pub fn public_key_create(sk: &[u8]) -> Result<[u8; 33], Error> {
    Ok(PrivateKey::decode(sk)?.to_public_key().encode_compressed())
}

/// Signs a digest with a private key.
///
/// The private key is checked first (`InvalidPrivateKey`), then the
/// digest length (`InvalidMessageLength`). The signature is
/// deterministic, in low-s form, and carries its recovery id.
pub fn sign(digest: &[u8], sk: &[u8]) -> Result<Signature, Error> {
    PrivateKey::decode(sk)?.sign_hash(digest)
}

/// Verifies a signature with the default (low-s enforcing) policy.
///
/// See `Verifier::verify()`.
pub fn verify(digest: &[u8], sig: &[u8], pk: &[u8]) -> Result<bool, Error> {
    Verifier::new().verify(digest, sig, pk)
}

/// Recovers the (compressed) public key from a signature, its recovery
/// id, and the signed digest.
pub fn recover(digest: &[u8], sig: &[u8], recid: u8) -> Result<[u8; 33], Error> {
    let recid = RecoveryId::new(recid)?;
    let sig = Signature::decode(sig)?;
    Ok(PublicKey::recover(digest, &sig, recid)?.encode_compressed())
}

/// ECDSA signature verifier, with a configurable malleability policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verifier {
    enforce_low_s: bool,
}

impl Verifier {

    /// Creates a verifier which rejects high-s signatures.
    pub const fn new() -> Self {
        Self { enforce_low_s: true }
    }

    /// Creates a verifier which accepts both `(r, s)` and `(r, n-s)`.
    ///
    /// This is meant for signatures produced by third-party
    /// implementations which do not normalize `s`.
    pub const fn allow_high_s() -> Self {
        Self { enforce_low_s: false }
    }

    /// Returns true if this verifier rejects high-s signatures.
    pub fn enforces_low_s(&self) -> bool {
        self.enforce_low_s
    }

    /// Verifies a signature, provided as bytes (64-byte `r||s`, or DER;
    /// see `Signature::decode()`), over a digest, against an encoded
    /// public key.
    ///
    /// Checks are performed in the following order:
    ///
    ///  1. signature decoding (`InvalidSignatureEncoding`);
    ///  2. range of `r` and `s` (`SignatureOutOfRange`);
    ///  3. zero `r` or `s`, high `s` (if enforced): `Ok(false)`;
    ///  4. public key decoding (`InvalidPublicKeyEncoding`);
    ///  5. digest length (`InvalidMessageLength`);
    ///  6. the verification equation: `Ok(true)` or `Ok(false)`.
    pub fn verify(&self, digest: &[u8], sig: &[u8], pk: &[u8])
        -> Result<bool, Error>
    {
        let sig = Signature::decode(sig)?;
        self.verify_signature(digest, &sig, pk)
    }

    /// Verifies an already decoded signature; see `verify()`.
    pub fn verify_signature(&self, digest: &[u8], sig: &Signature, pk: &[u8])
        -> Result<bool, Error>
    {
        if (sig.r().iszero() | sig.s().iszero()) != 0 {
            return Ok(false);
        }
        if self.enforce_low_s && !sig.is_low_s() {
            return Ok(false);
        }
        let pk = PublicKey::decode(pk)?;
        pk.verify_hash(sig, digest)
    }
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new()
    }
}
