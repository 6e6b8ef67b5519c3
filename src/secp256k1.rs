//! secp256k1 curve implementation.
//!
//! This module implements group operations on the secp256k1 elliptic
//! curve, a short Weierstraß curve with equation `y^2 = x^3 + 7`,
//! standardized in SEC 2, and the ECDSA signature algorithm over that
//! curve.
//!
//! The curve has prime order n. "Scalars" are integers modulo n, and are
//! implemented by the `Scalar` type (see the `field` module). Point
//! coordinates are elements of the base field `GFsecp256k1`.
//!
//! A point on the curve is represented by the `Point` structure. The
//! additive arithmetic operators can be applied on `Point` instances
//! (`+`, `-`, `+=`, `-=`); multiplication by a scalar is supported with
//! the `*` and `*=` operators. Point doublings can be performed with the
//! `double()` function, and several successive doublings with
//! `xdouble()`. All these operations are implemented with fully
//! constant-time code and are complete, i.e. they work with all points,
//! even when adding a point with itself or when operations involve the
//! point-at-infinity (the neutral element for the group).
//!
//! Points can be encoded in compressed (33 bytes) or uncompressed (65
//! bytes) formats. Decoding accepts compressed, uncompressed, and
//! "hybrid" (like uncompressed, but with first byte 0x06 or 0x07, which
//! must then match the parity of y) formats. Decoding always enforces
//! that coordinates are in the canonical range, and that the point is
//! on the curve. The point-at-infinity has no accepted encoding.
//!
//! The `PrivateKey` structure represents an ECDSA private key; it wraps
//! a non-zero secret scalar, which is wiped from memory when the key is
//! dropped. Private keys are encoded over exactly 32 bytes (unsigned
//! big-endian, as per SEC 1).
//!
//! The `PublicKey` structure represents an ECDSA public key; it wraps a
//! non-neutral point.
//!
//! ECDSA signatures are generated with `PrivateKey::sign_hash()`, and
//! verified with `PublicKey::verify_hash()`. The signature process is
//! deterministic, following [RFC 6979] with HMAC-SHA-256. The caller
//! provides the pre-hashed message, of length 1 to 32 bytes (digests
//! shorter than 32 bytes are left-padded with zeros). Generated
//! signatures are always in low-s form, and include a recovery id with
//! which `PublicKey::recover()` can rebuild the public key.
//!
//! [RFC 6979]: https://datatracker.ietf.org/doc/html/rfc6979

// Projective/fractional coordinates traditionally use uppercase letters,
// using lowercase only for affine coordinates.
#![allow(non_snake_case)]

use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use sha2::{Sha512, Digest};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{CryptoRng, RngCore};
use crate::error::Error;
use crate::field::{GFsecp256k1, Scalar};
use crate::rfc6979::NonceGenerator;
use crate::signature::{RecoveryId, Signature};

/// A point on the short Weierstraß curve secp256k1.
#[derive(Clone, Copy, Debug)]
pub struct Point {
    X: GFsecp256k1,
    Y: GFsecp256k1,
    Z: GFsecp256k1,
}

impl Point {

    // Curve equation is: y^2 = x^3 + b  (with b = 7)
    // We use projective coordinates:
    //   (x, y) -> (X:Y:Z) such that x = X/Z and y = Y/Z
    //   Y is never 0 (not even for the neutral)
    //   X = 0 and Z = 0 for the neutral
    //   Z != 0 for all non-neutral points
    //
    // The curve has no point of order 2, and no point with x = 0.
    //
    // For point additions, we use the complete formulas from:
    //    https://eprint.iacr.org/2015/1060
    // (cost 12M+2m21); doublings use the dedicated formulas from the
    // same paper (cost 6M+2S+1m21).

    /// The neutral element (point-at-infinity) in the curve.
    pub const NEUTRAL: Self = Self {
        X: GFsecp256k1::ZERO,
        Y: GFsecp256k1::ONE,
        Z: GFsecp256k1::ZERO,
    };

    /// The conventional base point in the curve.
    pub const BASE: Self = Self {
        X: GFsecp256k1::w64be(
            0x79BE667EF9DCBBAC, 0x55A06295CE870B07,
            0x029BFCDB2DCE28D9, 0x59F2815B16F81798),
        Y: GFsecp256k1::w64be(
            0x483ADA7726A3C465, 0x5DA4FBFC0E1108A8,
            0xFD17B448A6855419, 0x9C47D08FFB10D4B8),
        Z: GFsecp256k1::ONE,
    };

    /// Curve equation parameter b.
    const B: GFsecp256k1 = GFsecp256k1::w64be(0, 0, 0, 7);

    /// Tries to decode a point.
    ///
    /// This function accepts the following encodings and lengths:
    ///
    ///  - A byte of value 0x02 or 0x03, followed by exactly 32 bytes
    ///    (unsigned big-endian encoding of the x coordinate): compressed
    ///    encoding; 0x03 means that y is odd.
    ///
    ///  - A byte of value 0x04, followed by exactly 64 bytes (unsigned
    ///    big-endian encodings of x and y): uncompressed encoding.
    ///
    ///  - A byte of value 0x06 or 0x07, followed by exactly 64 bytes:
    ///    hybrid encoding; the low bit of the first byte must match
    ///    the parity of y.
    ///
    /// On success, this structure is set to the decoded point, and
    /// 0xFFFFFFFF is returned. On failure, this structure is set to the
    /// neutral point, and 0x00000000 is returned. A failure is reported
    /// if the coordinates are not in the `0..p-1` range, or if they do
    /// not correspond to a point on the curve.
    ///
    /// Constant-time behaviour: timing-based side channels may leak
    /// the encoding length, but not the value of the obtained point, nor
    /// whether the encoding was for a valid point.
    pub fn set_decode(&mut self, buf: &[u8]) -> u32 {
        *self = Self::NEUTRAL;

        if buf.len() == 33 {

            // Compressed encoding.
            // Check that the first byte is 0x02 or 0x03.
            let mut r = byte_eq(buf[0] & 0xFE, 0x02);

            // Decode x.
            let (x, rx) = GFsecp256k1::decode_be(&buf[1..33]);
            r &= rx;

            // Compute: y = sqrt(x^3 + b)
            let (mut y, ry) = (x * x.square() + Self::B).sqrt();
            r &= ry;

            // Negate y if its parity does not match the one requested by
            // the first byte. There is no valid point with y = 0, so the
            // negation always yields the other parity.
            let want_odd = ((buf[0] & 0x01) as u32).wrapping_neg();
            y.set_condneg(y.is_odd() ^ want_odd);

            // Set the coordinates, adjusting them if the process failed.
            self.X = GFsecp256k1::select(&GFsecp256k1::ZERO, &x, r);
            self.Y = GFsecp256k1::select(&GFsecp256k1::ONE, &y, r);
            self.Z = GFsecp256k1::select(
                &GFsecp256k1::ZERO, &GFsecp256k1::ONE, r);
            r

        } else if buf.len() == 65 {

            // Uncompressed or hybrid encoding.
            let r_unc = byte_eq(buf[0], 0x04);
            let r_hyb = byte_eq(buf[0] & 0xFE, 0x06);

            // Decode x and y.
            let (x, rx) = GFsecp256k1::decode_be(&buf[1..33]);
            let (y, ry) = GFsecp256k1::decode_be(&buf[33..65]);
            let mut r = rx & ry;

            // Verify that the coordinates match the curve equation.
            r &= y.square().equals(x * x.square() + Self::B);

            // For the hybrid encoding, parity of y must match.
            let same_parity = (((buf[0] as u32) ^ y.is_odd()) & 1).wrapping_sub(1);
            r &= r_unc | (r_hyb & same_parity);

            // Set the coordinates, adjusting them if the process failed.
            self.X = GFsecp256k1::select(&GFsecp256k1::ZERO, &x, r);
            self.Y = GFsecp256k1::select(&GFsecp256k1::ONE, &y, r);
            self.Z = GFsecp256k1::select(
                &GFsecp256k1::ZERO, &GFsecp256k1::ONE, r);
            r

        } else {

            // Invalid encoding length, return 0.
            0

        }
    }

    /// Tries to decode a point.
    ///
    /// See `set_decode()` for the accepted formats. On failure,
    /// `InvalidPublicKeyEncoding` is returned.
    pub fn decode(buf: &[u8]) -> Result<Point, Error> {
        let mut P = Point::NEUTRAL;
        if P.set_decode(buf) != 0 {
            Ok(P)
        } else {
            Err(Error::InvalidPublicKeyEncoding)
        }
    }

    /// Encodes this point in compressed format (33 bytes).
    ///
    /// If the point is the neutral then `[0u8; 33]` is returned; for a
    /// non-neutral point, the first byte is always equal to 0x02 or 0x03,
    /// never to 0x00.
    pub fn encode_compressed(self) -> [u8; 33] {
        let (x, y, r) = self.to_affine();
        let mut b = [0u8; 33];
        b[0] = (((y.is_odd() & 1) as u8) | 0x02) & (r as u8);
        b[1..33].copy_from_slice(&x.encode_be());
        b
    }

    /// Encodes this point in uncompressed format (65 bytes).
    ///
    /// If the point is the neutral then `[0u8; 65]` is returned; for a
    /// non-neutral point, the first byte is always equal to 0x04, never
    /// to 0x00.
    pub fn encode_uncompressed(self) -> [u8; 65] {
        let (x, y, r) = self.to_affine();
        let mut b = [0u8; 65];
        b[0] = 0x04 & (r as u8);
        b[ 1..33].copy_from_slice(&x.encode_be());
        b[33..65].copy_from_slice(&y.encode_be());
        b
    }

    /// Gets the affine (x, y) coordinates for this point.
    ///
    /// Values (x, y, r) are returned, with x and y being field elements,
    /// and r a `u32` value that qualifies the outcome:
    ///
    ///  - if the point is the neutral, then x = 0, y = 0 and r = 0x00000000;
    ///
    ///  - otherwise, x and y are the affine coordinates, and r = 0xFFFFFFFF.
    pub fn to_affine(self) -> (GFsecp256k1, GFsecp256k1, u32) {
        let iZ = GFsecp256k1::ONE / self.Z;  // this is 0 if Z = 0
        (self.X * iZ, self.Y * iZ, !self.isneutral())
    }

    /// Sets this instance from the provided affine coordinates.
    ///
    /// If the coordinates designate a valid curve point, then the
    /// function returns 0xFFFFFFFF; otherwise, this instance is set to
    /// the neutral, and the function returns 0x00000000.
    pub fn set_affine(&mut self, x: GFsecp256k1, y: GFsecp256k1) -> u32 {
        *self = Self::NEUTRAL;
        let r = y.square().equals(x * x.square() + Self::B);
        self.X.set_cond(&x, r);
        self.Y.set_cond(&y, r);
        self.Z.set_cond(&GFsecp256k1::ONE, r);
        r
    }

    /// Creates an instance from the provided affine coordinates, which
    /// are verified to comply with the curve equation.
    pub fn from_affine(x: GFsecp256k1, y: GFsecp256k1) -> Option<Self> {
        let mut P = Self::NEUTRAL;
        if P.set_affine(x, y) != 0 {
            Some(P)
        } else {
            None
        }
    }

    /// Adds point `rhs` to `self`.
    fn set_add(&mut self, rhs: &Self) {
        let (X1, Y1, Z1) = (&self.X, &self.Y, &self.Z);
        let (X2, Y2, Z2) = (&rhs.X, &rhs.Y, &rhs.Z);

        // Renes-Costello-Batina 2016, algorithm 7 (a = 0).
        let t0 = X1 * X2;
        let t1 = Y1 * Y2;
        let t2 = Z1 * Z2;
        let xy = (X1 + Y1) * (X2 + Y2) - t0 - t1;  // X1*Y2 + X2*Y1
        let yz = (Y1 + Z1) * (Y2 + Z2) - t1 - t2;  // Y1*Z2 + Y2*Z1
        let xz = (X1 + Z1) * (X2 + Z2) - t0 - t2;  // X1*Z2 + X2*Z1
        let t0 = t0.mul3();
        let t2 = t2.mul21();
        let u = t1 + t2;
        let v = t1 - t2;
        let xz = xz.mul21();

        self.X = xy * v - yz * xz;
        self.Y = xz * t0 + v * u;
        self.Z = u * yz + t0 * xy;
    }

    /// Doubles this point (in place).
    pub fn set_double(&mut self) {
        let (X, Y, Z) = (&self.X, &self.Y, &self.Z);

        // Renes-Costello-Batina 2016, algorithm 9 (a = 0).
        let yy = Y.square();
        let yy8 = yy.mul8();
        let c = Z.square().mul21();
        let Z3 = Y * Z * yy8;
        let d = yy - c.mul3();
        let Y3 = d * (yy + c) + c * yy8;
        let X3 = (d * X * Y).mul2();

        self.X = X3;
        self.Y = Y3;
        self.Z = Z3;
    }

    /// Doubles this point.
    #[inline(always)]
    pub fn double(self) -> Self {
        let mut r = self;
        r.set_double();
        r
    }

    /// Doubles this point n times (in place).
    pub fn set_xdouble(&mut self, n: u32) {
        for _ in 0..n {
            self.set_double();
        }
    }

    /// Doubles this point n times.
    #[inline(always)]
    pub fn xdouble(self, n: u32) -> Self {
        let mut r = self;
        r.set_xdouble(n);
        r
    }

    /// Negates this point (in place).
    #[inline(always)]
    pub fn set_neg(&mut self) {
        self.Y.set_neg();
    }

    /// Subtracts point `rhs` from `self`.
    fn set_sub(&mut self, rhs: &Self) {
        self.set_add(&-rhs);
    }

    /// Compares two points for equality.
    ///
    /// Returned value is 0xFFFFFFFF if the two points are equal,
    /// 0x00000000 otherwise.
    #[inline]
    pub fn equals(self, rhs: Self) -> u32 {
        // Y != 0 for all points, so a neutral point cannot match
        // a non-neutral point on the second test.
        (self.X * rhs.Z).equals(rhs.X * self.Z)
        & (self.Y * rhs.Z).equals(rhs.Y * self.Z)
    }

    /// Tests whether this point is the neutral (point-at-infinity).
    ///
    /// Returned value is 0xFFFFFFFF for the neutral, 0x00000000 otherwise.
    #[inline(always)]
    pub fn isneutral(self) -> u32 {
        self.Z.iszero()
    }

    /// Conditionally copies the provided point (`P`) into `self`
    /// (if `ctl` is 0xFFFFFFFF; if `ctl` is 0x00000000, then `self` is
    /// unchanged).
    #[inline]
    pub fn set_cond(&mut self, P: &Self, ctl: u32) {
        self.X.set_cond(&P.X, ctl);
        self.Y.set_cond(&P.Y, ctl);
        self.Z.set_cond(&P.Z, ctl);
    }

    /// Returns a point equal to `P0` (if `ctl` = 0x00000000) or `P1` (if
    /// `ctl` = 0xFFFFFFFF).
    #[inline(always)]
    pub fn select(P0: &Self, P1: &Self, ctl: u32) -> Self {
        let mut P = *P0;
        P.set_cond(P1, ctl);
        P
    }

    /// Conditionally negates this point (if `ctl` = 0xFFFFFFFF).
    #[inline]
    pub fn set_condneg(&mut self, ctl: u32) {
        self.Y.set_condneg(ctl);
    }

    /// Recodes a scalar into 52 signed digits (5 bits each).
    ///
    /// Each digit is in -15..+16, top digit is in 0..+2. Recoding is
    /// constant-time.
    fn recode_scalar(n: &Scalar) -> [i8; 52] {
        let bb = n.encode_be();
        let mut sd = [0i8; 52];
        let mut cc = 0u32;
        for j in 0..52 {
            // Extract bits 5*j to 5*j+4 (big-endian source).
            let k = 5 * j;
            let i = 31 - (k >> 3);
            let mut w = bb[i] as u32;
            if i > 0 {
                w |= (bb[i - 1] as u32) << 8;
            }
            let d = ((w >> (k & 7)) & 0x1F) + cc;

            // If d > 16, use d - 32 and propagate a carry.
            let m = 16u32.wrapping_sub(d) >> 8;
            sd[j] = d.wrapping_sub(m & 32) as i8;
            cc = m & 1;
        }
        sd
    }

    /// Lookups a point from a window, with sign handling (constant-time).
    ///
    /// `win[i]` contains `(i+1)*P`; the returned value is `k*P`, for
    /// `k` in -16..+16.
    fn lookup(win: &[Self; 16], k: i8) -> Self {
        // Sign (0xFFFFFFFF for negative) and absolute value of k.
        let sk = ((k as i32) >> 8) as u32;
        let ak = ((k as u32) ^ sk).wrapping_sub(sk);
        let mut P = Self::NEUTRAL;
        for (i, Q) in win.iter().enumerate() {
            let j = (i as u32) + 1;
            let w = !(ak.wrapping_sub(j) | j.wrapping_sub(ak));
            P.set_cond(Q, ((w as i32) >> 31) as u32);
        }
        P.set_condneg(sk);
        P
    }

    /// Multiplies this point by a scalar (in place).
    ///
    /// This operation is constant-time with regard to both the point
    /// and the scalar value.
    pub fn set_mul(&mut self, n: &Scalar) {
        // win[i] = (i+1)*P
        let mut win = [*self; 16];
        for i in 1..16 {
            win[i] = if (i & 1) == 1 {
                win[i >> 1].double()
            } else {
                win[i - 1] + win[0]
            };
        }

        let sd = Self::recode_scalar(n);
        *self = Self::lookup(&win, sd[51]);
        for i in (0..51).rev() {
            self.set_xdouble(5);
            self.set_add(&Self::lookup(&win, sd[i]));
        }
    }

    /// Multiplies the conventional generator by a scalar.
    ///
    /// This operation is constant-time.
    pub fn mulgen(n: &Scalar) -> Self {
        let mut P = Self::BASE;
        P.set_mul(n);
        P
    }

    /// 5-bit wNAF recoding of a scalar; output is a sequence of 257
    /// digits, least significant first.
    ///
    /// Non-zero digits have an odd value, between -15 and +15
    /// (inclusive). THIS FUNCTION IS NOT CONSTANT-TIME.
    fn recode_wnaf_vartime(n: &Scalar) -> [i8; 257] {
        let bb = n.encode_be();
        let mut x = [0u64; 5];
        for i in 0..32 {
            x[(31 - i) >> 3] |= (bb[i] as u64) << (((31 - i) & 7) << 3);
        }

        let mut sd = [0i8; 257];
        for i in 0..257 {
            if (x[0] & 1) != 0 {
                let v = (x[0] & 31) as i32;
                let d = if v > 15 { v - 32 } else { v };
                sd[i] = d as i8;
                if d > 0 {
                    x[0] -= d as u64;
                } else {
                    // Adding -d clears the low bits and carries.
                    let (z, mut c) = x[0].overflowing_add((-d) as u64);
                    x[0] = z;
                    let mut j = 1;
                    while c && j < 5 {
                        let (z, c2) = x[j].overflowing_add(1);
                        x[j] = z;
                        c = c2;
                        j += 1;
                    }
                }
            }
            for j in 0..4 {
                x[j] = (x[j] >> 1) | (x[j + 1] << 63);
            }
            x[4] >>= 1;
        }
        sd
    }

    /// Returns the odd multiples `(2*i+1)*P`, for i = 0 to 7.
    fn odd_multiples(P: &Self) -> [Self; 8] {
        let mut win = [*P; 8];
        let P2 = P.double();
        for i in 1..8 {
            win[i] = win[i - 1] + P2;
        }
        win
    }

    /// Given scalars `u` and `v`, sets this point to `u*self + v*G`
    /// (with `G` being the conventional generator point, aka
    /// `Self::BASE`).
    ///
    /// This function can be used to support ECDSA signature
    /// verification and public key recovery.
    ///
    /// THIS FUNCTION IS NOT CONSTANT-TIME; it shall be used only with
    /// public data.
    pub fn set_mul_add_mulgen_vartime(&mut self, u: &Scalar, v: &Scalar) {
        let win0 = Self::odd_multiples(self);
        let win1 = Self::odd_multiples(&Self::BASE);
        let sd0 = Self::recode_wnaf_vartime(u);
        let sd1 = Self::recode_wnaf_vartime(v);

        // Doublings are skipped until the first non-zero digit.
        *self = Self::NEUTRAL;
        let mut started = false;
        for i in (0..257).rev() {
            if started {
                self.set_double();
            }
            for (e, win) in [(sd0[i], &win0), (sd1[i], &win1)] {
                if e > 0 {
                    self.set_add(&win[(e >> 1) as usize]);
                    started = true;
                } else if e < 0 {
                    self.set_sub(&win[((-e) >> 1) as usize]);
                    started = true;
                }
            }
        }
    }

    /// Given scalars `u` and `v`, returns point `u*self + v*G`
    /// (with `G` being the conventional generator point, aka
    /// `Self::BASE`).
    ///
    /// THIS FUNCTION IS NOT CONSTANT-TIME; it shall be used only with
    /// public data.
    #[inline(always)]
    pub fn mul_add_mulgen_vartime(self, u: &Scalar, v: &Scalar) -> Self {
        let mut R = self;
        R.set_mul_add_mulgen_vartime(u, v);
        R
    }
}

// Returns 0xFFFFFFFF if x == y, 0x00000000 otherwise.
#[inline(always)]
fn byte_eq(x: u8, y: u8) -> u32 {
    ((((x ^ y) as i32) - 1) >> 8) as u32
}

/// Converts a message digest (1 to 32 bytes) into an integer modulo n.
///
/// Digests shorter than 32 bytes are left-padded with zeros; the value
/// is interpreted in unsigned big-endian convention, then reduced.
pub(crate) fn digest_to_scalar(hv: &[u8]) -> Result<Scalar, Error> {
    if hv.is_empty() || hv.len() > 32 {
        return Err(Error::InvalidMessageLength(hv.len()));
    }
    Ok(Scalar::decode_reduce_be(hv))
}

/// A secp256k1 private key (for ECDSA).
///
/// The secret scalar is wiped from memory when the key is dropped.
#[derive(Clone)]
pub struct PrivateKey {
    x: Scalar,   // secret scalar, never zero
}

/// A secp256k1 public key simply wraps around a non-neutral curve point.
#[derive(Clone, Copy, Debug)]
pub struct PublicKey {
    point: Point,
}

impl PrivateKey {

    /// Generates a new private key from a cryptographically secure RNG.
    pub fn generate<T: CryptoRng + RngCore>(rng: &mut T) -> Self {
        let mut seed = [0u8; 32];
        rng.fill_bytes(&mut seed);
        let sk = Self::from_seed(&seed);
        seed.zeroize();
        sk
    }

    /// Instantiates a private key by decoding the provided bytes.
    ///
    /// The source must contain exactly 32 bytes: the unsigned
    /// **big-endian** encoding of the secret scalar (as per SEC 1). The
    /// decoding fails with `InvalidPrivateKey` if the length is wrong,
    /// or if the value is zero or not lower than the curve order.
    ///
    /// Decoding is constant-time; side-channels may leak whether the
    /// value was valid or not, but not the value itself.
    pub fn decode(buf: &[u8]) -> Result<Self, Error> {
        let (x, r) = Scalar::decode_be(buf);
        if (r & !x.iszero()) != 0 {
            Ok(Self { x })
        } else {
            Err(Error::InvalidPrivateKey)
        }
    }

    /// Returns true if the provided bytes are a valid private key
    /// encoding (see `decode()`).
    pub fn is_valid(buf: &[u8]) -> bool {
        Self::decode(buf).is_ok()
    }

    /// Encodes this private key into exactly 32 bytes (unsigned
    /// big-endian).
    pub fn encode(&self) -> [u8; 32] {
        self.x.encode_be()
    }

    /// Instantiates a private key from a random seed.
    ///
    /// The seed MUST have been generated from a cryptographically secure
    /// random source that ensured an entropy of at least 128 bits. The
    /// transform from the seed to the private key is not described by
    /// any standard; therefore, for key storage, the private key itself
    /// should be stored, not the seed.
    ///
    /// This process guarantees that the output key is valid (i.e. it is
    /// in the proper range, and it is non-zero).
    pub fn from_seed(seed: &[u8]) -> Self {
        // SHA-512 over a domain-separation prefix and the seed yields
        // a 512-bit value, which is reduced modulo n (with negligible
        // bias).
        let mut sh = Sha512::new();
        sh.update(b"secp256k1-ecdsa keygen");
        sh.update(seed);
        let mut h = sh.finalize();
        let mut x = Scalar::decode_reduce_be(&h);
        h.as_mut_slice().zeroize();

        // Zero has negligible probability; use 1 in that case.
        x.set_cond(&Scalar::ONE, x.iszero());
        Self { x }
    }

    /// Gets the public key corresponding to that private key.
    pub fn to_public_key(&self) -> PublicKey {
        PublicKey { point: Point::mulgen(&self.x) }
    }

    /// Signs a hash value with ECDSA.
    ///
    /// The hash value (`hv`) must have length 1 to 32 bytes; otherwise,
    /// `InvalidMessageLength` is returned. It MUST be a real hash value,
    /// not a raw unhashed message.
    ///
    /// The nonce is derived deterministically (RFC 6979, HMAC-SHA-256),
    /// so that signing the same hash value with the same key always
    /// yields the same signature. The returned signature is normalized
    /// to low-s form, and carries its recovery id.
    pub fn sign_hash(&self, hv: &[u8]) -> Result<Signature, Error> {
        let e = digest_to_scalar(hv)?;

        for mut k in NonceGenerator::new(&self.x, &e) {
            let sig = self.sign_with_nonce(&e, &k);
            k.zeroize();
            if let Some(sig) = sig {
                return Ok(sig);
            }
        }
        Err(Error::NonceExhausted)
    }

    /// Computes the signature for digest scalar `e` and nonce `k`.
    /// Returns `None` if the nonce yields `r = 0` or `s = 0`; the
    /// caller must then move on to the next nonce. The nonce must be
    /// non-zero and secret, and it is never retained.
    fn sign_with_nonce(&self, e: &Scalar, k: &Scalar) -> Option<Signature> {
        // R = k*G; k != 0, so R is not the neutral.
        let (x, y, _) = Point::mulgen(k).to_affine();
        let xb = x.encode_be();
        let r = Scalar::decode_reduce_be(&xb);
        if r.iszero() != 0 {
            return None;
        }
        let mut rx = r * self.x;
        let mut s = (e + rx) / k;
        rx.zeroize();
        if s.iszero() != 0 {
            return None;
        }

        // Recovery id; x(R) >= n if and only if strict decoding
        // modulo n fails.
        let (_, x_lt_n) = Scalar::decode_be(&xb);
        let mut recid = RecoveryId::from_flags(y.is_odd(), !x_lt_n);

        // Normalize to low-s; this flips the parity of R.
        let high = s.is_high();
        s.set_condneg(high);
        recid = RecoveryId::from_flags(
            (recid.to_u8() as u32) ^ high, (recid.to_u8() >> 1) as u32);

        Some(Signature::with_recovery_id(r, s, recid))
    }
}

impl Zeroize for PrivateKey {
    fn zeroize(&mut self) {
        self.x.zeroize();
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

impl PublicKey {

    /// Decodes a public key from bytes.
    ///
    /// This function accepts compressed (33 bytes), uncompressed (65
    /// bytes) and hybrid (65 bytes) formats. The point is always
    /// verified to be a valid curve point. Failures are reported as
    /// `InvalidPublicKeyEncoding`.
    pub fn decode(buf: &[u8]) -> Result<Self, Error> {
        let point = Point::decode(buf)?;
        Self::from_point(point)
    }

    /// Wraps a point into a public key; the neutral point is rejected.
    pub fn from_point(point: Point) -> Result<Self, Error> {
        if point.isneutral() != 0 {
            return Err(Error::InvalidPublicKeyEncoding);
        }
        Ok(Self { point })
    }

    /// Gets the curve point.
    pub fn to_point(self) -> Point {
        self.point
    }

    /// Encodes this public key into the compressed format (33 bytes).
    ///
    /// The first byte of the encoding always has value 0x02 or 0x03.
    pub fn encode_compressed(self) -> [u8; 33] {
        self.point.encode_compressed()
    }

    /// Encodes this public key into the uncompressed format (65 bytes).
    ///
    /// The first byte of the encoding always has value 0x04.
    pub fn encode_uncompressed(self) -> [u8; 65] {
        self.point.encode_uncompressed()
    }

    /// Verifies a signature on a given hashed message.
    ///
    /// The hash value (`hv`) must have length 1 to 32 bytes; otherwise,
    /// `InvalidMessageLength` is returned. Signatures with a zero
    /// component are reported as invalid (`Ok(false)`).
    ///
    /// This is the plain ECDSA verification equation, which accepts both
    /// `(r, s)` and `(r, n-s)`; low-s enforcement is a policy decision
    /// which is applied by `ecdsa::Verifier`.
    ///
    /// Note: this function is not constant-time; it assumes that the
    /// public key and signature value are public data.
    pub fn verify_hash(self, sig: &Signature, hv: &[u8]) -> Result<bool, Error> {
        let e = digest_to_scalar(hv)?;
        let (r, s) = (sig.r(), sig.s());
        if (r.iszero() | s.iszero()) != 0 {
            return Ok(false);
        }

        // R' = (e/s)*G + (r/s)*Q
        let w = Scalar::ONE / s;
        let R = self.point.mul_add_mulgen_vartime(&(r * w), &(e * w));
        let (x, _, nz) = R.to_affine();
        if nz == 0 {
            return Ok(false);
        }

        // Signature is valid if x(R') mod n matches r.
        let rr = Scalar::decode_reduce_be(&x.encode_be());
        Ok(r.equals(rr) != 0)
    }

    /// Recovers the public key from a signature on a hashed message.
    ///
    /// The recovery id designates which of the (up to four) candidate
    /// points was used as `R = k*G` when signing. The returned key is
    /// `(s*R - e*G)/r`; for a signature produced by the holder of a
    /// private key, this is the matching public key. `RecoveryFailed` is
    /// returned if the signature has a zero component, if the recovery
    /// id designates a non-existent point, or if the result is the
    /// neutral point.
    ///
    /// Note: this function is not constant-time.
    pub fn recover(hv: &[u8], sig: &Signature, recid: RecoveryId)
        -> Result<Self, Error>
    {
        let e = digest_to_scalar(hv)?;
        let (r, s) = (sig.r(), sig.s());
        if (r.iszero() | s.iszero()) != 0 {
            return Err(Error::RecoveryFailed);
        }

        // x(R) is r, or r + n; in the latter case, it must still be
        // lower than p (checked when decoding).
        let mut enc = [0u8; 33];
        enc[0] = 0x02 | (recid.is_y_odd() as u8);
        enc[1..].copy_from_slice(&r.encode_be());
        if recid.is_x_reduced() {
            let mut cc = 0u64;
            for i in 0..4 {
                let j = 33 - 8 * (i + 1);
                let mut w = 0u64;
                for &b in &enc[j..(j + 8)] {
                    w = (w << 8) | (b as u64);
                }
                let z = (w as u128) + (Scalar::MODULUS[i] as u128) + (cc as u128);
                enc[j..(j + 8)].copy_from_slice(&(z as u64).to_be_bytes());
                cc = (z >> 64) as u64;
            }
            if cc != 0 {
                return Err(Error::RecoveryFailed);
            }
        }
        let R = Point::decode(&enc).map_err(|_| Error::RecoveryFailed)?;

        // Q = (s/r)*R - (e/r)*G
        let w = Scalar::ONE / r;
        let Q = R.mul_add_mulgen_vartime(&(s * w), &-(e * w));
        Self::from_point(Q).map_err(|_| Error::RecoveryFailed)
    }
}

// ========================================================================

impl Add<Point> for Point {
    type Output = Point;

    #[inline(always)]
    fn add(self, other: Point) -> Point {
        let mut P = self;
        P.set_add(&other);
        P
    }
}

impl Add<&Point> for Point {
    type Output = Point;

    #[inline(always)]
    fn add(self, other: &Point) -> Point {
        let mut P = self;
        P.set_add(other);
        P
    }
}

impl Add<&Point> for &Point {
    type Output = Point;

    #[inline(always)]
    fn add(self, other: &Point) -> Point {
        let mut P = *self;
        P.set_add(other);
        P
    }
}

impl AddAssign<Point> for Point {
    #[inline(always)]
    fn add_assign(&mut self, other: Point) {
        self.set_add(&other);
    }
}

impl AddAssign<&Point> for Point {
    #[inline(always)]
    fn add_assign(&mut self, other: &Point) {
        self.set_add(other);
    }
}

impl Sub<Point> for Point {
    type Output = Point;

    #[inline(always)]
    fn sub(self, other: Point) -> Point {
        let mut P = self;
        P.set_sub(&other);
        P
    }
}

impl Sub<&Point> for Point {
    type Output = Point;

    #[inline(always)]
    fn sub(self, other: &Point) -> Point {
        let mut P = self;
        P.set_sub(other);
        P
    }
}

impl Sub<&Point> for &Point {
    type Output = Point;

    #[inline(always)]
    fn sub(self, other: &Point) -> Point {
        let mut P = *self;
        P.set_sub(other);
        P
    }
}

impl SubAssign<Point> for Point {
    #[inline(always)]
    fn sub_assign(&mut self, other: Point) {
        self.set_sub(&other);
    }
}

impl SubAssign<&Point> for Point {
    #[inline(always)]
    fn sub_assign(&mut self, other: &Point) {
        self.set_sub(other);
    }
}

impl Neg for Point {
    type Output = Point;

    #[inline(always)]
    fn neg(self) -> Point {
        let mut P = self;
        P.set_neg();
        P
    }
}

impl Neg for &Point {
    type Output = Point;

    #[inline(always)]
    fn neg(self) -> Point {
        let mut P = *self;
        P.set_neg();
        P
    }
}

impl Mul<Scalar> for Point {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: Scalar) -> Point {
        let mut P = self;
        P.set_mul(&other);
        P
    }
}

impl Mul<&Scalar> for Point {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: &Scalar) -> Point {
        let mut P = self;
        P.set_mul(other);
        P
    }
}

impl MulAssign<Scalar> for Point {
    #[inline(always)]
    fn mul_assign(&mut self, other: Scalar) {
        self.set_mul(&other);
    }
}

impl MulAssign<&Scalar> for Point {
    #[inline(always)]
    fn mul_assign(&mut self, other: &Scalar) {
        self.set_mul(other);
    }
}

impl Mul<Point> for Scalar {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: Point) -> Point {
        let mut P = other;
        P.set_mul(&self);
        P
    }
}

impl Mul<&Point> for Scalar {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: &Point) -> Point {
        let mut P = *other;
        P.set_mul(&self);
        P
    }
}

// ========================================================================
