//! Deterministic nonce generation for ECDSA ([RFC 6979]).
//!
//! The per-signature secret nonce `k` is derived from the private key
//! and the message digest with HMAC-DRBG over HMAC-SHA-256, as described
//! in section 3.2 of RFC 6979. The generator is an iterator over
//! candidate nonces: each call to `next()` yields a scalar in the
//! `1..n-1` range. Raw DRBG outputs that fall outside that range are
//! skipped internally. The number of raw outputs is capped at
//! `MAX_NONCE_ATTEMPTS`, after which the iterator is exhausted; with a
//! 256-bit group order, rejection of a single output has probability
//! about 2^-128, so the cap is not reachable in practice.
//!
//! The signer also consumes a new candidate when a nonce yields `r = 0`
//! or `s = 0`; the next candidate is then produced by the same DRBG
//! update as for an out-of-range output.
//!
//! The DRBG state is wiped when the generator is dropped.
//!
//! [RFC 6979]: https://datatracker.ietf.org/doc/html/rfc6979

use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::field::Scalar;

/// Maximum number of raw HMAC-DRBG outputs drawn for one signature.
pub const MAX_NONCE_ATTEMPTS: usize = 64;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-DRBG nonce generator (RFC 6979, with SHA-256).
pub struct NonceGenerator {
    k: [u8; 32],
    v: [u8; 32],
    draws: usize,
}

impl NonceGenerator {

    /// Creates the generator for private scalar `x` and message
    /// representative `e` (the digest, already reduced modulo n).
    ///
    /// The seed is `int2octets(x) || bits2octets(e)`; since digests are
    /// at most 32 bytes and left-padded, `bits2octets()` is simply the
    /// 32-byte big-endian encoding of `e`.
    pub fn new(x: &Scalar, e: &Scalar) -> Self {
        let mut xb = x.encode_be();
        let eb = e.encode_be();
        let mut g = Self {
            k: [0x00; 32],
            v: [0x01; 32],
            draws: 0,
        };
        g.k = g.hmac(&[&g.v[..], &[0x00u8][..], &xb[..], &eb[..]]);
        g.v = g.hmac(&[&g.v[..]]);
        g.k = g.hmac(&[&g.v[..], &[0x01u8][..], &xb[..], &eb[..]]);
        g.v = g.hmac(&[&g.v[..]]);
        xb.zeroize();
        g
    }

    /// Number of raw DRBG outputs produced so far.
    pub fn draws(&self) -> usize {
        self.draws
    }

    // HMAC with the current K over the concatenation of `parts`.
    fn hmac(&self, parts: &[&[u8]]) -> [u8; 32] {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(&self.k)
            .expect("HMAC key length is always valid");
        for p in parts {
            mac.update(p);
        }
        mac.finalize().into_bytes().into()
    }

    // K <- HMAC_K(V || 0x00); V <- HMAC_K(V)
    fn update(&mut self) {
        self.k = self.hmac(&[&self.v[..], &[0x00u8][..]]);
        self.v = self.hmac(&[&self.v[..]]);
    }
}

impl Iterator for NonceGenerator {
    type Item = Scalar;

    fn next(&mut self) -> Option<Scalar> {
        while self.draws < MAX_NONCE_ATTEMPTS {
            if self.draws > 0 {
                self.update();
            }
            self.draws += 1;
            self.v = self.hmac(&[&self.v[..]]);

            // qlen = hlen = 256, so bits2int(V) is V itself.
            let (k, ok) = Scalar::decode_be(&self.v);
            if (ok & !k.iszero()) != 0 {
                return Some(k);
            }
        }
        None
    }
}

impl Zeroize for NonceGenerator {
    fn zeroize(&mut self) {
        self.k.zeroize();
        self.v.zeroize();
    }
}

impl Drop for NonceGenerator {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for NonceGenerator {}
