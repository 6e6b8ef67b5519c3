//! ECDSA signature values and their encodings.
//!
//! A signature is a pair of integers `(r, s)`, both modulo the curve
//! order n, optionally accompanied by a recovery identifier (which is
//! what allows rebuilding the signer's public key from the signature
//! and the message; see `PublicKey::recover()`).
//!
//! Two wire formats are supported:
//!
//!  - The fixed-size format: `r` and `s` encoded over 32 bytes each
//!    (unsigned big-endian), and concatenated, for a total of 64 bytes.
//!    The recovery identifier is not part of this format and must be
//!    transmitted separately.
//!
//!  - The ASN.1 DER format: `SEQUENCE { r INTEGER, s INTEGER }`. Since
//!    both integers are lower than 2^256, the encoding never exceeds 72
//!    bytes. Decoding is strict: only the unique minimal DER encoding is
//!    accepted (no BER length forms, no superfluous leading zeros, no
//!    negative integers, no trailing data).
//!
//! Decoding functions verify that `r` and `s` are lower than n; they
//! accept zero values, which the verification functions then reject
//! (`Ok(false)`). `Signature::check_canonical()` can be used to report
//! zeros and high `s` values as errors.

use core::fmt;

use crate::error::Error;
use crate::field::Scalar;

/// Recovery identifier for a signature (a 2-bit value).
///
/// Bit 0 is the parity of the y coordinate of the point `R = k*G`
/// (0 for even, 1 for odd). Bit 1 is set if the x coordinate of `R` was
/// not lower than n, i.e. `r = x(R) - n` (this is very rare).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoveryId(u8);

impl RecoveryId {

    /// Creates a recovery identifier from its numerical value (0 to 3).
    pub fn new(v: u8) -> Result<Self, Error> {
        if v < 4 {
            Ok(Self(v))
        } else {
            Err(Error::InvalidRecoveryId(v))
        }
    }

    pub(crate) fn from_flags(y_odd: u32, x_reduced: u32) -> Self {
        Self(((y_odd & 1) | ((x_reduced & 1) << 1)) as u8)
    }

    /// Returns the numerical value (0 to 3).
    pub fn to_u8(self) -> u8 {
        self.0
    }

    /// Returns true if the y coordinate of `R` is odd.
    pub fn is_y_odd(self) -> bool {
        (self.0 & 1) != 0
    }

    /// Returns true if the x coordinate of `R` was reduced modulo n.
    pub fn is_x_reduced(self) -> bool {
        (self.0 & 2) != 0
    }

    // Recovery id for the signature (r, n-s).
    fn flip_y(self) -> Self {
        Self(self.0 ^ 1)
    }
}

impl TryFrom<u8> for RecoveryId {
    type Error = Error;

    fn try_from(v: u8) -> Result<Self, Error> {
        Self::new(v)
    }
}

impl From<RecoveryId> for u8 {
    fn from(id: RecoveryId) -> u8 {
        id.0
    }
}

/// An ECDSA signature.
#[derive(Clone, Copy, Debug)]
pub struct Signature {
    r: Scalar,
    s: Scalar,
    recid: Option<RecoveryId>,
}

/// A DER-encoded signature (at most 72 bytes).
#[derive(Clone, Copy)]
pub struct DerSignature {
    buf: [u8; Signature::MAX_DER_LEN],
    len: usize,
}

impl DerSignature {

    /// Gets the encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Gets the encoding length (in bytes).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl AsRef<[u8]> for DerSignature {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for DerSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerSignature(")?;
        for b in self.as_bytes() {
            write!(f, "{:02x}", b)?;
        }
        f.write_str(")")
    }
}

impl Signature {

    /// Length of the fixed-size `r||s` encoding (in bytes).
    pub const FIXED_LEN: usize = 64;

    /// Maximum length of a DER encoding (in bytes).
    pub const MAX_DER_LEN: usize = 72;

    /// Creates a signature from its two components (no recovery id).
    pub fn from_scalars(r: Scalar, s: Scalar) -> Self {
        Self { r, s, recid: None }
    }

    pub(crate) fn with_recovery_id(r: Scalar, s: Scalar, recid: RecoveryId) -> Self {
        Self { r, s, recid: Some(recid) }
    }

    /// Returns a copy of this signature with the provided recovery id.
    pub fn set_recovery_id(self, recid: RecoveryId) -> Self {
        Self { recid: Some(recid), ..self }
    }

    /// Gets the `r` component.
    pub fn r(&self) -> Scalar {
        self.r
    }

    /// Gets the `s` component.
    pub fn s(&self) -> Scalar {
        self.s
    }

    /// Gets the recovery id, if known.
    ///
    /// Signatures produced by this crate always carry their recovery
    /// id; decoded signatures do not.
    pub fn recovery_id(&self) -> Option<RecoveryId> {
        self.recid
    }

    /// Decodes a signature in fixed-size format (64 bytes, `r||s`).
    ///
    /// A source which does not have length exactly 64 bytes is
    /// reported as `InvalidSignatureEncoding`; components not lower
    /// than n are reported as `SignatureOutOfRange`.
    pub fn decode_fixed(buf: &[u8]) -> Result<Self, Error> {
        if buf.len() != Self::FIXED_LEN {
            return Err(Error::InvalidSignatureEncoding);
        }
        let (r, cr) = Scalar::decode_be(&buf[..32]);
        let (s, cs) = Scalar::decode_be(&buf[32..]);
        if (cr & cs) == 0 {
            return Err(Error::SignatureOutOfRange);
        }
        Ok(Self::from_scalars(r, s))
    }

    /// Decodes a signature in (strict) DER format.
    pub fn decode_der(buf: &[u8]) -> Result<Self, Error> {
        // SEQUENCE, short-form length covering exactly the rest.
        if buf.len() < 2 || buf[0] != 0x30 || buf[1] >= 0x80
            || (buf[1] as usize) != buf.len() - 2
        {
            return Err(Error::InvalidSignatureEncoding);
        }
        let (rb, rest) = der_integer(&buf[2..])?;
        let (sb, rest) = der_integer(rest)?;
        if !rest.is_empty() {
            return Err(Error::InvalidSignatureEncoding);
        }
        let r = der_to_scalar(rb)?;
        let s = der_to_scalar(sb)?;
        Ok(Self::from_scalars(r, s))
    }

    /// Decodes a signature in either format.
    ///
    /// A source of any length other than 64 bytes is parsed as DER. A
    /// 64-byte source is parsed as DER if it starts with a SEQUENCE
    /// header whose length covers the rest of the buffer (`30 3E`) and
    /// is a valid DER signature; otherwise, it is interpreted as the
    /// fixed-size format.
    pub fn decode(buf: &[u8]) -> Result<Self, Error> {
        if buf.len() != Self::FIXED_LEN {
            return Self::decode_der(buf);
        }
        if buf[0] == 0x30 && (buf[1] as usize) == Self::FIXED_LEN - 2 {
            if let Ok(sig) = Self::decode_der(buf) {
                return Ok(sig);
            }
        }
        Self::decode_fixed(buf)
    }

    /// Encodes this signature in fixed-size format (64 bytes, `r||s`).
    pub fn encode_fixed(&self) -> [u8; 64] {
        let mut d = [0u8; 64];
        d[..32].copy_from_slice(&self.r.encode_be());
        d[32..].copy_from_slice(&self.s.encode_be());
        d
    }

    /// Encodes this signature in DER format.
    pub fn encode_der(&self) -> DerSignature {
        let mut d = DerSignature { buf: [0u8; Self::MAX_DER_LEN], len: 0 };
        d.buf[0] = 0x30;
        let rlen = der_put_integer(&mut d.buf[2..], &self.r.encode_be());
        let slen = der_put_integer(&mut d.buf[(2 + rlen)..], &self.s.encode_be());
        d.buf[1] = (rlen + slen) as u8;
        d.len = 2 + rlen + slen;
        d
    }

    /// Returns true if `s` is in the lower half of the `0..n-1` range
    /// (i.e. `s <= (n-1)/2`).
    pub fn is_low_s(&self) -> bool {
        self.s.is_high() == 0
    }

    /// Returns the canonical (low-s) form of this signature.
    ///
    /// If `s` is high, it is replaced with `n - s` (which is also valid
    /// for the same message and key), and the recovery id, if present,
    /// is adjusted accordingly. Otherwise, the signature is unchanged.
    pub fn normalize_s(&self) -> Self {
        if self.is_low_s() {
            return *self;
        }
        Self {
            r: self.r,
            s: -self.s,
            recid: self.recid.map(RecoveryId::flip_y),
        }
    }

    /// Checks that this signature is in canonical form: both components
    /// are non-zero, and `s` is low. Otherwise, `MalleableSignature`
    /// is returned.
    pub fn check_canonical(&self) -> Result<(), Error> {
        if (self.r.iszero() | self.s.iszero() | self.s.is_high()) != 0 {
            Err(Error::MalleableSignature)
        } else {
            Ok(())
        }
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        (self.r.equals(other.r) & self.s.equals(other.s)) != 0
            && self.recid == other.recid
    }
}

impl Eq for Signature {}

// Splits a DER INTEGER (tag, short-form length, value) from the source;
// returns the value bytes and the remaining data. The value must be
// minimal and nonnegative.
fn der_integer(buf: &[u8]) -> Result<(&[u8], &[u8]), Error> {
    if buf.len() < 2 || buf[0] != 0x02 || buf[1] >= 0x80 {
        return Err(Error::InvalidSignatureEncoding);
    }
    let len = buf[1] as usize;
    if len == 0 || buf.len() < 2 + len {
        return Err(Error::InvalidSignatureEncoding);
    }
    let v = &buf[2..(2 + len)];
    if (v[0] & 0x80) != 0 {
        return Err(Error::InvalidSignatureEncoding);
    }
    if len > 1 && v[0] == 0x00 && (v[1] & 0x80) == 0 {
        return Err(Error::InvalidSignatureEncoding);
    }
    Ok((v, &buf[(2 + len)..]))
}

// Converts a validated DER INTEGER value into a scalar.
fn der_to_scalar(v: &[u8]) -> Result<Scalar, Error> {
    let v = if v.len() > 1 && v[0] == 0x00 { &v[1..] } else { v };
    if v.len() > 32 {
        return Err(Error::SignatureOutOfRange);
    }
    let mut tmp = [0u8; 32];
    tmp[(32 - v.len())..].copy_from_slice(v);
    let (x, cc) = Scalar::decode_be(&tmp);
    if cc == 0 {
        return Err(Error::SignatureOutOfRange);
    }
    Ok(x)
}

// Writes a minimal DER INTEGER for the provided unsigned big-endian
// value; returns the number of written bytes.
fn der_put_integer(out: &mut [u8], v: &[u8; 32]) -> usize {
    let mut i = 0;
    while i < 31 && v[i] == 0 {
        i += 1;
    }
    let pad = (v[i] >> 7) as usize;
    let len = 32 - i + pad;
    out[0] = 0x02;
    out[1] = len as u8;
    out[2] = 0x00;
    out[(2 + pad)..(2 + len)].copy_from_slice(&v[i..]);
    2 + len
}

#[cfg(test)]
mod tests {

    use super::{RecoveryId, Signature};
    use crate::error::Error;
    use crate::field::Scalar;

    const R_HEX: &str = "78c15897a34de6566a0d396fdef660698c59fef56d34ee36bef14ad89ee0f6f8";
    const S_HEX: &str = "16e02e8b7285d93feafafbe745702f142973a77d5c2fa6293596357e17b3b47c";
    const N_HEX: &str = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";

    fn fixed(r: &str, s: &str) -> [u8; 64] {
        let mut d = [0u8; 64];
        d[..32].copy_from_slice(&hex::decode(r).unwrap());
        d[32..].copy_from_slice(&hex::decode(s).unwrap());
        d
    }

    #[test]
    fn fixed_format() {
        let buf = fixed(R_HEX, S_HEX);
        let sig = Signature::decode_fixed(&buf).unwrap();
        assert!(sig.encode_fixed() == buf);
        assert!(sig.recovery_id().is_none());
        assert!(sig.is_low_s());
        assert!(sig.check_canonical().is_ok());

        assert!(Signature::decode_fixed(&buf[..63]) == Err(Error::InvalidSignatureEncoding));
        let bad = fixed(N_HEX, S_HEX);
        assert!(Signature::decode_fixed(&bad) == Err(Error::SignatureOutOfRange));
        let bad = fixed(R_HEX, N_HEX);
        assert!(Signature::decode(&bad) == Err(Error::SignatureOutOfRange));

        // Zero components decode, but are not canonical.
        let zero = fixed(R_HEX, &"00".repeat(32));
        let sig = Signature::decode_fixed(&zero).unwrap();
        assert!(sig.check_canonical() == Err(Error::MalleableSignature));
    }

    #[test]
    fn der_format() {
        let sig = Signature::decode_fixed(&fixed(R_HEX, S_HEX)).unwrap();
        let der = sig.encode_der();
        let expected = hex::decode(
            ["30440220", R_HEX, "0220", S_HEX].concat()).unwrap();
        assert!(der.as_bytes() == &expected[..]);
        assert!(Signature::decode_der(der.as_bytes()).unwrap() == sig);
        assert!(Signature::decode(der.as_ref()).unwrap() == sig);

        // High bit set: a leading zero byte is needed.
        let r2 = "813ef79ccefa9a56f7ba805f0e478584fe5f0dd5f567bc09b5123ccbc9832365";
        let s2 = "900e75ad233fcc908509dbff5922647db37c21f4afd3203ae8dc4ae7794b0f87";
        let sig2 = Signature::decode_fixed(&fixed(r2, s2)).unwrap();
        let der2 = sig2.encode_der();
        let expected2 = hex::decode(
            ["3046022100", r2, "022100", s2].concat()).unwrap();
        assert!(der2.as_bytes() == &expected2[..]);
        assert!(der2.len() == 72);
        assert!(Signature::decode_der(&expected2).unwrap() == sig2);

        // Small values are encoded minimally.
        let sig3 = Signature::from_scalars(Scalar::ONE, Scalar::w64be(0, 0, 0, 0x80));
        let der3 = sig3.encode_der();
        assert!(der3.as_bytes() == &hex::decode("3007020101020200 80".replace(' ', "")).unwrap()[..]);
        assert!(Signature::decode(der3.as_bytes()).unwrap() == sig3);
        let sig4 = Signature::from_scalars(Scalar::ZERO, Scalar::ONE);
        assert!(sig4.encode_der().as_bytes() == &hex::decode("3006020100020101").unwrap()[..]);
    }

    #[test]
    fn der_64_bytes() {
        // r and s with 29-byte contents give a DER encoding of exactly
        // 64 bytes.
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r[3..].fill(0x11);
        s[3..].fill(0x22);
        let sig = Signature::from_scalars(
            Scalar::decode_be(&r).0, Scalar::decode_be(&s).0);
        let der = sig.encode_der();
        assert!(der.len() == 64);
        assert!(der.as_bytes()[..4] == [0x30, 0x3E, 0x02, 0x1D]);
        assert!(Signature::decode_der(der.as_bytes()).unwrap() == sig);
        assert!(Signature::decode(der.as_bytes()).unwrap() == sig);

        // The same bytes read as r||s are a different signature.
        let alt = Signature::decode_fixed(der.as_bytes()).unwrap();
        assert!(alt != sig);

        // A fixed-size signature that only looks like a DER header
        // falls back to the fixed format.
        let mut buf = fixed(R_HEX, S_HEX);
        buf[0] = 0x30;
        buf[1] = 0x3E;
        assert!(Signature::decode_der(&buf) == Err(Error::InvalidSignatureEncoding));
        assert!(Signature::decode(&buf).unwrap() == Signature::decode_fixed(&buf).unwrap());
        assert!(Signature::decode(&fixed(R_HEX, S_HEX)).unwrap()
            == Signature::decode_fixed(&fixed(R_HEX, S_HEX)).unwrap());
    }

    #[test]
    fn der_strict() {
        let reject = |s: &str| {
            Signature::decode_der(&hex::decode(s).unwrap())
                == Err(Error::InvalidSignatureEncoding)
        };
        assert!(reject(""));
        assert!(reject(&"3006020101020101"[..14]));
        // Wrong tags.
        assert!(reject("3106020101020101"));
        assert!(reject("3006030101020101"));
        // Sequence length mismatch.
        assert!(reject("3007020101020101"));
        assert!(reject("300602010102010100"));
        // Trailing garbage inside the sequence.
        assert!(reject("300902010102010102 0100".replace(' ', "").as_str()));
        // Long-form length.
        assert!(reject("308106020101020101"));
        assert!(reject("300702810101020101"));
        // Empty integer.
        assert!(reject("30050200020101"));
        // Negative integer.
        assert!(reject("3006020181020101"));
        // Non-minimal integers.
        assert!(reject("300702020001020101"));
        assert!(reject("30070201010202007f"));
        // Integer longer than the sequence.
        assert!(reject("3006020101020201"));

        // Well-formed but too large: 33 significant bytes.
        let big = ["30260221", &"01".repeat(33), "020101"].concat();
        assert!(Signature::decode_der(&hex::decode(big).unwrap())
            == Err(Error::SignatureOutOfRange));
        // Equal to n.
        let n = ["3026022100", N_HEX, "020101"].concat();
        assert!(Signature::decode_der(&hex::decode(n).unwrap())
            == Err(Error::SignatureOutOfRange));
    }

    #[test]
    fn low_s() {
        let r2 = "813ef79ccefa9a56f7ba805f0e478584fe5f0dd5f567bc09b5123ccbc9832365";
        let s2 = "900e75ad233fcc908509dbff5922647db37c21f4afd3203ae8dc4ae7794b0f87";
        let sig = Signature::decode_fixed(&fixed(r2, s2)).unwrap()
            .set_recovery_id(RecoveryId::new(2).unwrap());
        assert!(!sig.is_low_s());
        assert!(sig.check_canonical() == Err(Error::MalleableSignature));

        let norm = sig.normalize_s();
        assert!(norm.is_low_s());
        assert!(norm.check_canonical().is_ok());
        assert!(norm.r().equals(sig.r()) == 0xFFFFFFFF);
        assert!((norm.s() + sig.s()).iszero() == 0xFFFFFFFF);
        assert!(norm.recovery_id() == Some(RecoveryId::new(3).unwrap()));
        assert!(norm.normalize_s() == norm);
    }

    #[test]
    fn recovery_id() {
        for v in 0..4u8 {
            let id = RecoveryId::try_from(v).unwrap();
            assert!(u8::from(id) == v);
            assert!(id.is_y_odd() == ((v & 1) != 0));
            assert!(id.is_x_reduced() == (v >= 2));
        }
        assert!(RecoveryId::new(4) == Err(Error::InvalidRecoveryId(4)));
        assert!(RecoveryId::from_flags(0xFFFFFFFF, 0).to_u8() == 1);
        assert!(RecoveryId::from_flags(0, 0xFFFFFFFF).to_u8() == 2);
    }
}
