use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use zeroize::Zeroize;

use super::{addcarry_u64, subborrow_u64, umull_add2};

/// Integers modulo a 256-bit odd modulus.
///
/// The modulus is provided as four 64-bit type parameters, that encode
/// the modulus in base 2^64 (`M0` is the least significant limb, `M3`
/// is the most significant limb). The modulus MUST be odd and `M3` MUST
/// NOT be zero. The modulus SHOULD be prime; otherwise, division by a
/// non-invertible value yields unspecified results. Square roots are
/// supported only for moduli equal to 3 modulo 4 (using `sqrt()` with
/// any other modulus is a compile-time error).
#[derive(Clone, Copy, Debug)]
pub struct ModInt256<const M0: u64, const M1: u64, const M2: u64, const M3: u64>([u64; 4]);

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> ModInt256<M0, M1, M2, M3> {

    const COMPILE_TIME_CHECKS: () = Self::compile_time_checks();
    const fn compile_time_checks() {
        assert!((M0 & 1) != 0, "modulus must be odd");
        assert!(M3 != 0, "modulus must have length at least 193 bits");
    }

    const SQRT_CHECKS: () = assert!((M0 & 3) == 3,
        "square roots are implemented only for moduli equal to 3 mod 4");

    /// The modulus, in base 2^64 (low-to-high order).
    pub const MODULUS: [u64; 4] = [ M0, M1, M2, M3 ];

    /// Encoding length, in bytes.
    pub const ENC_LEN: usize = 32;

    pub const ZERO: Self = Self([ 0, 0, 0, 0 ]);
    pub const ONE: Self = Self::w64le(1, 0, 0, 0);
    pub const MINUS_ONE: Self = Self::w64le(M0 - 1, M1, M2, M3);

    // -1/m mod 2^64
    const M0I: u64 = Self::make_m0i();

    // 2^512 mod m (Montgomery representation of 2^256 mod m)
    const R2: [u64; 4] = Self::make_r2();

    // (m-1)/2
    const HALF: [u64; 4] = [
        (M0 >> 1) | (M1 << 63),
        (M1 >> 1) | (M2 << 63),
        (M2 >> 1) | (M3 << 63),
        M3 >> 1,
    ];

    // m - 2 (exponent for inversion)
    const MM2: [u64; 4] = Self::make_mm2();

    // floor(m/4) + 1 (equal to (m+1)/4 when m = 3 mod 4)
    const QP1D4: [u64; 4] = Self::make_qp1d4();

    /// Creates an element from its four 64-bit limbs, provided in
    /// little-endian order (least significant limb first). The value
    /// is implicitly reduced modulo m. This function can be used in
    /// constant expressions; it is also safe (constant-time) at runtime.
    pub const fn w64le(x0: u64, x1: u64, x2: u64, x3: u64) -> Self {
        let _ = Self::COMPILE_TIME_CHECKS;
        Self(Self::mmul(&[ x0, x1, x2, x3 ], &Self::R2))
    }

    /// Creates an element from its four 64-bit limbs, provided in
    /// big-endian order (most significant limb first). The value
    /// is implicitly reduced modulo m.
    pub const fn w64be(x3: u64, x2: u64, x1: u64, x0: u64) -> Self {
        Self::w64le(x0, x1, x2, x3)
    }

    /// Creates an element by converting the provided integer.
    #[inline(always)]
    pub fn from_u64(x: u64) -> Self {
        Self::w64le(x, 0, 0, 0)
    }

    #[inline(always)]
    fn set_add(&mut self, rhs: &Self) {
        // Raw addition; the final carry is an extra (fifth) top bit.
        let (d0, cc) = addcarry_u64(self.0[0], rhs.0[0], 0);
        let (d1, cc) = addcarry_u64(self.0[1], rhs.0[1], cc);
        let (d2, cc) = addcarry_u64(self.0[2], rhs.0[2], cc);
        let (d3, cc) = addcarry_u64(self.0[3], rhs.0[3], cc);

        // Subtract the modulus; the final borrow is set if and only if
        // the sum was lower than m.
        let (e0, bb) = subborrow_u64(d0, M0, 0);
        let (e1, bb) = subborrow_u64(d1, M1, bb);
        let (e2, bb) = subborrow_u64(d2, M2, bb);
        let (e3, bb) = subborrow_u64(d3, M3, bb);
        let (_, bb) = subborrow_u64(cc as u64, 0, bb);

        // Keep the raw sum if it was already reduced.
        let w = (bb as u64).wrapping_neg();
        self.0[0] = e0 ^ (w & (e0 ^ d0));
        self.0[1] = e1 ^ (w & (e1 ^ d1));
        self.0[2] = e2 ^ (w & (e2 ^ d2));
        self.0[3] = e3 ^ (w & (e3 ^ d3));
    }

    #[inline(always)]
    fn set_sub(&mut self, rhs: &Self) {
        // Raw subtraction.
        let (d0, cc) = subborrow_u64(self.0[0], rhs.0[0], 0);
        let (d1, cc) = subborrow_u64(self.0[1], rhs.0[1], cc);
        let (d2, cc) = subborrow_u64(self.0[2], rhs.0[2], cc);
        let (d3, cc) = subborrow_u64(self.0[3], rhs.0[3], cc);

        // Add back the modulus if there was a borrow.
        let w = (cc as u64).wrapping_neg();
        let (d0, cc) = addcarry_u64(d0, w & M0, 0);
        let (d1, cc) = addcarry_u64(d1, w & M1, cc);
        let (d2, cc) = addcarry_u64(d2, w & M2, cc);
        let (d3, _)  = addcarry_u64(d3, w & M3, cc);

        self.0 = [ d0, d1, d2, d3 ];
    }

    /// Negates this value (in place).
    #[inline(always)]
    pub fn set_neg(&mut self) {
        let mut r = Self::ZERO;
        r.set_sub(self);
        *self = r;
    }

    #[inline(always)]
    fn set_mul(&mut self, rhs: &Self) {
        self.0 = Self::mmul(&self.0, &rhs.0);
    }

    #[inline(always)]
    fn set_div(&mut self, rhs: &Self) {
        self.set_mul(&rhs.invert());
    }

    /// Squares this value (in place).
    #[inline(always)]
    pub fn set_square(&mut self) {
        self.0 = Self::mmul(&self.0, &self.0);
    }

    /// Squares this value.
    #[inline(always)]
    pub fn square(self) -> Self {
        let mut r = self;
        r.set_square();
        r
    }

    /// Squares this value `n` times (in place).
    pub fn set_xsquare(&mut self, n: u32) {
        for _ in 0..n {
            self.set_square();
        }
    }

    /// Multiplies this value by 2 (in place).
    #[inline(always)]
    pub fn set_mul2(&mut self) {
        let r = *self;
        self.set_add(&r);
    }

    #[inline(always)]
    pub fn mul2(self) -> Self {
        let mut r = self;
        r.set_mul2();
        r
    }

    /// Multiplies this value by 3 (in place).
    #[inline(always)]
    pub fn set_mul3(&mut self) {
        let r = *self;
        self.set_mul2();
        self.set_add(&r);
    }

    #[inline(always)]
    pub fn mul3(self) -> Self {
        let mut r = self;
        r.set_mul3();
        r
    }

    /// Multiplies this value by 8 (in place).
    #[inline(always)]
    pub fn set_mul8(&mut self) {
        self.set_mul2();
        self.set_mul2();
        self.set_mul2();
    }

    #[inline(always)]
    pub fn mul8(self) -> Self {
        let mut r = self;
        r.set_mul8();
        r
    }

    /// Raises this value to the power `e` (in place).
    ///
    /// The exponent is given in base 2^64 (low-to-high order). This
    /// function is constant-time with regard to the value of `self`,
    /// but NOT with regard to the exponent, which MUST NOT be secret.
    pub fn set_pow_pubexp(&mut self, e: &[u64; 4]) {
        let x = *self;
        *self = Self::ONE;
        for i in (0..4).rev() {
            for j in (0..64).rev() {
                self.set_square();
                if ((e[i] >> j) & 1) != 0 {
                    self.set_mul(&x);
                }
            }
        }
    }

    #[inline(always)]
    pub fn pow_pubexp(self, e: &[u64; 4]) -> Self {
        let mut r = self;
        r.set_pow_pubexp(e);
        r
    }

    /// Inverts this value (in place). The inverse of zero is zero.
    ///
    /// Fermat's little theorem is used (raising to the power m-2), so
    /// that the computation time does not depend on the value.
    pub fn set_invert(&mut self) {
        self.set_pow_pubexp(&Self::MM2);
    }

    #[inline(always)]
    pub fn invert(self) -> Self {
        let mut r = self;
        r.set_invert();
        r
    }

    /// Computes a square root of this value (in place).
    ///
    /// On success, 0xFFFFFFFF is returned, and the chosen root is the
    /// one which is even (when represented as an integer in the
    /// `0..m-1` range). If the value is not a square, then this
    /// instance is set to zero, and 0x00000000 is returned.
    pub fn set_sqrt(&mut self) -> u32 {
        let _ = Self::SQRT_CHECKS;

        // Candidate root: x^((m+1)/4). It is correct if and only if the
        // source is a quadratic residue.
        let x = *self;
        self.set_pow_pubexp(&Self::QP1D4);
        let r = self.square().equals(x);

        // Normalize to the even root, then clear on failure.
        let odd = self.is_odd();
        self.set_cond(&-*self, odd);
        self.set_cond(&Self::ZERO, !r);
        r
    }

    #[inline(always)]
    pub fn sqrt(self) -> (Self, u32) {
        let mut r = self;
        let ok = r.set_sqrt();
        (r, ok)
    }

    /// Conditionally copies the provided value (`a`) into `self`:
    ///
    ///  - if `ctl` is 0xFFFFFFFF, then the value of `a` is copied;
    ///
    ///  - if `ctl` is 0x00000000, then `self` is unchanged.
    ///
    /// `ctl` MUST be either 0x00000000 or 0xFFFFFFFF.
    #[inline(always)]
    pub fn set_cond(&mut self, a: &Self, ctl: u32) {
        let cw = ((ctl as i32) as i64) as u64;
        self.0[0] ^= cw & (self.0[0] ^ a.0[0]);
        self.0[1] ^= cw & (self.0[1] ^ a.0[1]);
        self.0[2] ^= cw & (self.0[2] ^ a.0[2]);
        self.0[3] ^= cw & (self.0[3] ^ a.0[3]);
    }

    /// Returns a copy of `a0` (if `ctl` is 0x00000000) or of `a1` (if
    /// `ctl` is 0xFFFFFFFF).
    #[inline(always)]
    pub fn select(a0: &Self, a1: &Self, ctl: u32) -> Self {
        let mut r = *a0;
        r.set_cond(a1, ctl);
        r
    }

    /// Conditionally negates this value (if `ctl` is 0xFFFFFFFF).
    #[inline(always)]
    pub fn set_condneg(&mut self, ctl: u32) {
        let r = -*self;
        self.set_cond(&r, ctl);
    }

    /// Returns 0xFFFFFFFF if `self` and `rhs` represent the same value,
    /// 0x00000000 otherwise.
    #[inline]
    pub fn equals(self, rhs: Self) -> u32 {
        let z = (self.0[0] ^ rhs.0[0]) | (self.0[1] ^ rhs.0[1])
            | (self.0[2] ^ rhs.0[2]) | (self.0[3] ^ rhs.0[3]);
        (((z | z.wrapping_neg()) >> 63).wrapping_sub(1)) as u32
    }

    /// Returns 0xFFFFFFFF if this value is zero, 0x00000000 otherwise.
    #[inline]
    pub fn iszero(self) -> u32 {
        let z = self.0[0] | self.0[1] | self.0[2] | self.0[3];
        (((z | z.wrapping_neg()) >> 63).wrapping_sub(1)) as u32
    }

    /// Returns 0xFFFFFFFF if this value, as an integer in the `0..m-1`
    /// range, is odd; 0x00000000 otherwise.
    #[inline]
    pub fn is_odd(self) -> u32 {
        let x = Self::mmul(&self.0, &[ 1, 0, 0, 0 ]);
        ((x[0] & 1) as u32).wrapping_neg()
    }

    /// Returns 0xFFFFFFFF if this value, as an integer in the `0..m-1`
    /// range, is greater than `(m-1)/2`; 0x00000000 otherwise.
    #[inline]
    pub fn is_high(self) -> u32 {
        let x = Self::mmul(&self.0, &[ 1, 0, 0, 0 ]);
        let (_, bb) = subborrow_u64(Self::HALF[0], x[0], 0);
        let (_, bb) = subborrow_u64(Self::HALF[1], x[1], bb);
        let (_, bb) = subborrow_u64(Self::HALF[2], x[2], bb);
        let (_, bb) = subborrow_u64(Self::HALF[3], x[3], bb);
        (bb as u32).wrapping_neg()
    }

    /// Encodes this value over exactly 32 bytes (unsigned big-endian).
    /// The encoding is always canonical.
    pub fn encode_be(self) -> [u8; 32] {
        let x = Self::mmul(&self.0, &[ 1, 0, 0, 0 ]);
        let mut d = [0u8; 32];
        for i in 0..4 {
            d[(8 * i)..(8 * i + 8)].copy_from_slice(&x[3 - i].to_be_bytes());
        }
        d
    }

    /// Decodes a value from exactly 32 bytes (unsigned big-endian).
    ///
    /// If the source does not have length exactly 32 bytes, or if the
    /// encoded integer is not lower than the modulus, then zero and
    /// 0x00000000 are returned. Otherwise, the decoded value and
    /// 0xFFFFFFFF are returned. Only the source length may leak through
    /// timing; the value and the outcome are not leaked.
    pub fn decode_be(buf: &[u8]) -> (Self, u32) {
        if buf.len() != 32 {
            return (Self::ZERO, 0);
        }
        let x = Self::raw_be(buf);

        // The value is in range if and only if x - m borrows.
        let (_, bb) = subborrow_u64(x[0], M0, 0);
        let (_, bb) = subborrow_u64(x[1], M1, bb);
        let (_, bb) = subborrow_u64(x[2], M2, bb);
        let (_, bb) = subborrow_u64(x[3], M3, bb);
        let r = (bb as u32).wrapping_neg();

        let d = Self(Self::mmul(&x, &Self::R2));
        (Self::select(&Self::ZERO, &d, r), r)
    }

    /// Decodes a value from some bytes (unsigned big-endian), reducing
    /// it modulo m. This never fails; an empty slice yields zero.
    pub fn decode_reduce_be(buf: &[u8]) -> Self {
        let n = buf.len();
        if n == 0 {
            return Self::ZERO;
        }

        // First chunk is the top (n mod 32) bytes, or a full chunk.
        let mut j = ((n - 1) & 31) + 1;
        let mut tmp = [0u8; 32];
        tmp[(32 - j)..].copy_from_slice(&buf[..j]);
        let mut r = Self(Self::mmul(&Self::raw_be(&tmp), &Self::R2));

        // Each subsequent chunk: r <- r*2^256 + chunk. Montgomery
        // multiplication by R2 is multiplication by 2^256.
        while j < n {
            r.0 = Self::mmul(&r.0, &Self::R2);
            let c = Self(Self::mmul(&Self::raw_be(&buf[j..(j + 32)]), &Self::R2));
            r.set_add(&c);
            j += 32;
        }
        r
    }

    // Reads 32 bytes (unsigned big-endian) as four limbs, without
    // reduction. The source MUST have length at least 32 bytes.
    #[inline]
    fn raw_be(buf: &[u8]) -> [u64; 4] {
        let mut x = [0u64; 4];
        for i in 0..4 {
            let mut w = 0u64;
            for j in 0..8 {
                w = (w << 8) | (buf[8 * i + j] as u64);
            }
            x[3 - i] = w;
        }
        x
    }

    // Montgomery multiplication: returns a*b/2^256 mod m.
    // Operand b MUST be lower than m; operand a may be any 256-bit value.
    // Output is fully reduced.
    //
    // This is a plain CIOS loop. With d < 2*m on entry of a round,
    // d + ai*b + f*m < 2*m + 2^64*m + 2^64*m, so that after division by
    // 2^64 we still have d < 2*m. The accumulator thus fits on five
    // limbs (top limb is 0 or 1) between rounds, and needs a sixth limb
    // only transiently. A single conditional subtraction normalizes the
    // final value.
    //
    // This function is also used for compile-time constants.
    const fn mmul(a: &[u64; 4], b: &[u64; 4]) -> [u64; 4] {
        let m = [ M0, M1, M2, M3 ];
        let mut t = [0u64; 6];
        let mut i = 0;
        while i < 4 {
            // t <- t + a[i]*b
            let mut cc = 0u64;
            let mut j = 0;
            while j < 4 {
                let (lo, hi) = umull_add2(a[i], b[j], t[j], cc);
                t[j] = lo;
                cc = hi;
                j += 1;
            }
            let z = (t[4] as u128) + (cc as u128);
            t[4] = z as u64;
            t[5] = (z >> 64) as u64;

            // t <- (t + f*m) / 2^64, with f chosen so that the division
            // is exact.
            let f = t[0].wrapping_mul(Self::M0I);
            let (_, hi) = umull_add2(f, m[0], t[0], 0);
            let mut cc = hi;
            let mut j = 1;
            while j < 4 {
                let (lo, hi) = umull_add2(f, m[j], t[j], cc);
                t[j - 1] = lo;
                cc = hi;
                j += 1;
            }
            let z = (t[4] as u128) + (cc as u128);
            t[3] = z as u64;
            t[4] = t[5] + ((z >> 64) as u64);
            i += 1;
        }

        // t < 2*m; subtract m if t >= m.
        let (e0, bb) = sbb(t[0], M0, 0);
        let (e1, bb) = sbb(t[1], M1, bb);
        let (e2, bb) = sbb(t[2], M2, bb);
        let (e3, bb) = sbb(t[3], M3, bb);
        let (_, bb) = sbb(t[4], 0, bb);
        let w = bb.wrapping_neg();
        [
            e0 ^ (w & (e0 ^ t[0])),
            e1 ^ (w & (e1 ^ t[1])),
            e2 ^ (w & (e2 ^ t[2])),
            e3 ^ (w & (e3 ^ t[3])),
        ]
    }

    const fn make_m0i() -> u64 {
        // For odd m0, m0*m0 = 1 mod 8, so m0 is its own inverse over
        // 3 bits; each Newton iteration doubles the number of correct
        // bits.
        let mut y = M0;
        let mut i = 0;
        while i < 5 {
            y = y.wrapping_mul(2u64.wrapping_sub(M0.wrapping_mul(y)));
            i += 1;
        }
        y.wrapping_neg()
    }

    const fn make_r2() -> [u64; 4] {
        // Start at 1, and double 512 times modulo m.
        let mut x = [ 1u64, 0, 0, 0 ];
        let mut i = 0;
        while i < 512 {
            let (d0, cc) = adc(x[0], x[0], 0);
            let (d1, cc) = adc(x[1], x[1], cc);
            let (d2, cc) = adc(x[2], x[2], cc);
            let (d3, cc) = adc(x[3], x[3], cc);
            let (e0, bb) = sbb(d0, M0, 0);
            let (e1, bb) = sbb(d1, M1, bb);
            let (e2, bb) = sbb(d2, M2, bb);
            let (e3, bb) = sbb(d3, M3, bb);
            let (_, bb) = sbb(cc, 0, bb);
            let w = bb.wrapping_neg();
            x = [
                e0 ^ (w & (e0 ^ d0)),
                e1 ^ (w & (e1 ^ d1)),
                e2 ^ (w & (e2 ^ d2)),
                e3 ^ (w & (e3 ^ d3)),
            ];
            i += 1;
        }
        x
    }

    const fn make_mm2() -> [u64; 4] {
        let (d0, bb) = sbb(M0, 2, 0);
        let (d1, bb) = sbb(M1, 0, bb);
        let (d2, bb) = sbb(M2, 0, bb);
        let (d3, _) = sbb(M3, 0, bb);
        [ d0, d1, d2, d3 ]
    }

    const fn make_qp1d4() -> [u64; 4] {
        let (d0, cc) = adc((M0 >> 2) | (M1 << 62), 1, 0);
        let (d1, cc) = adc((M1 >> 2) | (M2 << 62), 0, cc);
        let (d2, cc) = adc((M2 >> 2) | (M3 << 62), 0, cc);
        let (d3, _) = adc(M3 >> 2, 0, cc);
        [ d0, d1, d2, d3 ]
    }
}

// Compile-time add with carry (carry is 0 or 1).
const fn adc(x: u64, y: u64, c: u64) -> (u64, u64) {
    let z = (x as u128) + (y as u128) + (c as u128);
    (z as u64, (z >> 64) as u64)
}

// Compile-time subtract with borrow (borrow is 0 or 1).
const fn sbb(x: u64, y: u64, c: u64) -> (u64, u64) {
    let z = (x as u128).wrapping_sub(y as u128).wrapping_sub(c as u128);
    (z as u64, (z >> 127) as u64)
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> Zeroize for ModInt256<M0, M1, M2, M3> {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

macro_rules! modint_binop {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident, $set:ident) => {
        impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> $Op<ModInt256<M0, M1, M2, M3>> for ModInt256<M0, M1, M2, M3> {
            type Output = ModInt256<M0, M1, M2, M3>;

            #[inline(always)]
            fn $op(self, other: ModInt256<M0, M1, M2, M3>) -> Self::Output {
                let mut r = self;
                r.$set(&other);
                r
            }
        }

        impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> $Op<&ModInt256<M0, M1, M2, M3>> for ModInt256<M0, M1, M2, M3> {
            type Output = ModInt256<M0, M1, M2, M3>;

            #[inline(always)]
            fn $op(self, other: &ModInt256<M0, M1, M2, M3>) -> Self::Output {
                let mut r = self;
                r.$set(other);
                r
            }
        }

        impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> $Op<ModInt256<M0, M1, M2, M3>> for &ModInt256<M0, M1, M2, M3> {
            type Output = ModInt256<M0, M1, M2, M3>;

            #[inline(always)]
            fn $op(self, other: ModInt256<M0, M1, M2, M3>) -> Self::Output {
                let mut r = *self;
                r.$set(&other);
                r
            }
        }

        impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> $Op<&ModInt256<M0, M1, M2, M3>> for &ModInt256<M0, M1, M2, M3> {
            type Output = ModInt256<M0, M1, M2, M3>;

            #[inline(always)]
            fn $op(self, other: &ModInt256<M0, M1, M2, M3>) -> Self::Output {
                let mut r = *self;
                r.$set(other);
                r
            }
        }

        impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> $OpAssign<ModInt256<M0, M1, M2, M3>> for ModInt256<M0, M1, M2, M3> {
            #[inline(always)]
            fn $op_assign(&mut self, other: ModInt256<M0, M1, M2, M3>) {
                self.$set(&other);
            }
        }

        impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> $OpAssign<&ModInt256<M0, M1, M2, M3>> for ModInt256<M0, M1, M2, M3> {
            #[inline(always)]
            fn $op_assign(&mut self, other: &ModInt256<M0, M1, M2, M3>) {
                self.$set(other);
            }
        }
    };
}

modint_binop!(Add, add, AddAssign, add_assign, set_add);
modint_binop!(Sub, sub, SubAssign, sub_assign, set_sub);
modint_binop!(Mul, mul, MulAssign, mul_assign, set_mul);
modint_binop!(Div, div, DivAssign, div_assign, set_div);

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> Neg for ModInt256<M0, M1, M2, M3> {
    type Output = ModInt256<M0, M1, M2, M3>;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        let mut r = self;
        r.set_neg();
        r
    }
}

impl<const M0: u64, const M1: u64, const M2: u64, const M3: u64> Neg for &ModInt256<M0, M1, M2, M3> {
    type Output = ModInt256<M0, M1, M2, M3>;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        let mut r = *self;
        r.set_neg();
        r
    }
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::ModInt256;
    use num_bigint::{BigInt, Sign};
    use sha2::{Sha256, Digest};

    fn modulus<const M0: u64, const M1: u64, const M2: u64, const M3: u64>() -> BigInt {
        let mut b = [0u8; 32];
        b[ 0.. 8].copy_from_slice(&M3.to_be_bytes());
        b[ 8..16].copy_from_slice(&M2.to_be_bytes());
        b[16..24].copy_from_slice(&M1.to_be_bytes());
        b[24..32].copy_from_slice(&M0.to_be_bytes());
        BigInt::from_bytes_be(Sign::Plus, &b)
    }

    fn to_big<const M0: u64, const M1: u64, const M2: u64, const M3: u64>
        (x: ModInt256<M0, M1, M2, M3>) -> BigInt
    {
        BigInt::from_bytes_be(Sign::Plus, &x.encode_be())
    }

    // va and vb must be 32 bytes each in length; vx may have any length.
    fn check_ops<const M0: u64, const M1: u64, const M2: u64, const M3: u64>
        (va: &[u8], vb: &[u8], vx: &[u8])
    {
        let zp = modulus::<M0, M1, M2, M3>();

        let a = ModInt256::<M0, M1, M2, M3>::decode_reduce_be(va);
        let b = ModInt256::<M0, M1, M2, M3>::decode_reduce_be(vb);
        let za = BigInt::from_bytes_be(Sign::Plus, va) % &zp;
        let zb = BigInt::from_bytes_be(Sign::Plus, vb) % &zp;
        assert!(to_big(a) == za);
        assert!(to_big(b) == zb);

        assert!(to_big(a + b) == (&za + &zb) % &zp);
        assert!(to_big(a - b) == ((&zp + &za) - &zb) % &zp);
        assert!(to_big(-a) == (&zp - &za) % &zp);
        assert!(to_big(a * b) == (&za * &zb) % &zp);
        assert!(to_big(a.square()) == (&za * &za) % &zp);
        assert!(to_big(a.mul2()) == (&za << 1) % &zp);
        assert!(to_big(a.mul3()) == (&za * 3) % &zp);
        assert!(to_big(a.mul8()) == (&za << 3) % &zp);

        let mut c = a;
        c += b;
        c -= a;
        c *= a;
        assert!(c.equals(a * b) == 0xFFFFFFFF);

        let c = a / b;
        if b.iszero() != 0 {
            assert!(c.iszero() == 0xFFFFFFFF);
        } else {
            assert!((c * b).equals(a) == 0xFFFFFFFF);
        }

        // Strict decoding accepts exactly the values lower than m.
        let (e, cc) = ModInt256::<M0, M1, M2, M3>::decode_be(va);
        let zva = BigInt::from_bytes_be(Sign::Plus, va);
        if zva < zp {
            assert!(cc == 0xFFFFFFFF);
            assert!(e.encode_be()[..] == va[..]);
        } else {
            assert!(cc == 0);
            assert!(e.iszero() == 0xFFFFFFFF);
        }

        // Oddness and "high" status.
        let zh = (&zp - 1u32) >> 1;
        assert!((a.is_odd() != 0) == ((&za & BigInt::from(1u32)) == BigInt::from(1u32)));
        assert!((a.is_high() != 0) == (za > zh));

        // Reduction of arbitrary-length inputs.
        for k in 0..(vx.len() + 1) {
            let c = ModInt256::<M0, M1, M2, M3>::decode_reduce_be(&vx[..k]);
            let zd = BigInt::from_bytes_be(Sign::Plus, &vx[..k]) % &zp;
            assert!(to_big(c) == zd);
        }
    }

    fn test_ring<const M0: u64, const M1: u64, const M2: u64, const M3: u64>() {
        let va = [0u8; 32];
        let vb = [0u8; 32];
        let vx = [0u8; 65];
        check_ops::<M0, M1, M2, M3>(&va, &vb, &vx);
        check_ops::<M0, M1, M2, M3>(&[0xFFu8; 32], &[0xFFu8; 32], &[0xFFu8; 96]);

        // The modulus itself reduces to zero and fails strict decoding.
        let mut vm = [0u8; 32];
        vm[ 0.. 8].copy_from_slice(&M3.to_be_bytes());
        vm[ 8..16].copy_from_slice(&M2.to_be_bytes());
        vm[16..24].copy_from_slice(&M1.to_be_bytes());
        vm[24..32].copy_from_slice(&M0.to_be_bytes());
        assert!(ModInt256::<M0, M1, M2, M3>::decode_reduce_be(&vm).iszero() == 0xFFFFFFFF);
        assert!(ModInt256::<M0, M1, M2, M3>::decode_be(&vm).1 == 0);
        assert!(ModInt256::<M0, M1, M2, M3>::MINUS_ONE.encode_be()[31] == vm[31] - 1);
        assert!(ModInt256::<M0, M1, M2, M3>::decode_be(&vm[..31]).1 == 0);

        let mut sh = Sha256::new();
        for i in 0..200 {
            sh.update(((3 * i + 0) as u64).to_le_bytes());
            let va = sh.finalize_reset();
            sh.update(((3 * i + 1) as u64).to_le_bytes());
            let vb = sh.finalize_reset();
            sh.update(((3 * i + 2) as u64).to_le_bytes());
            let vx1 = sh.finalize_reset();
            let mut vx = [0u8; 64];
            vx[..32].copy_from_slice(&vx1);
            vx[32..].copy_from_slice(&va);
            check_ops::<M0, M1, M2, M3>(&va, &vb, &vx);
        }
    }

    // For a modulus equal to 3 mod 4, -1 is not a quadratic residue.
    fn test_sqrt<const M0: u64, const M1: u64, const M2: u64, const M3: u64>() {
        let (z, r) = ModInt256::<M0, M1, M2, M3>::ZERO.sqrt();
        assert!(r == 0xFFFFFFFF);
        assert!(z.iszero() == 0xFFFFFFFF);

        let mut sh = Sha256::new();
        for i in 0..100 {
            sh.update((i as u64).to_le_bytes());
            let va = sh.finalize_reset();
            let a = ModInt256::<M0, M1, M2, M3>::decode_reduce_be(&va);
            let s = a.square();
            let (t, r) = s.sqrt();
            assert!(r == 0xFFFFFFFF);
            assert!(t.square().equals(s) == 0xFFFFFFFF);
            assert!(t.is_odd() == 0);
            assert!(t.equals(a) | t.equals(-a) == 0xFFFFFFFF);
            let (t2, r) = (-s).sqrt();
            assert!(r == 0);
            assert!(t2.iszero() == 0xFFFFFFFF);
        }
    }

    #[test]
    fn gfsecp256k1_ops() {
        // 2^256 - 2^32 - 977
        test_ring::< 0xFFFFFFFEFFFFFC2F,
                     0xFFFFFFFFFFFFFFFF,
                     0xFFFFFFFFFFFFFFFF,
                     0xFFFFFFFFFFFFFFFF >();
        test_sqrt::< 0xFFFFFFFEFFFFFC2F,
                     0xFFFFFFFFFFFFFFFF,
                     0xFFFFFFFFFFFFFFFF,
                     0xFFFFFFFFFFFFFFFF >();
    }

    #[test]
    fn scsecp256k1_ops() {
        // Order of the secp256k1 curve.
        test_ring::< 0xBFD25E8CD0364141,
                     0xBAAEDCE6AF48A03B,
                     0xFFFFFFFFFFFFFFFE,
                     0xFFFFFFFFFFFFFFFF >();
    }

    #[test]
    fn gfp256_ops() {
        // Modulus from curve P-256 (equal to 3 mod 4).
        test_ring::< 0xFFFFFFFFFFFFFFFF,
                     0x00000000FFFFFFFF,
                     0x0000000000000000,
                     0xFFFFFFFF00000001 >();
        test_sqrt::< 0xFFFFFFFFFFFFFFFF,
                     0x00000000FFFFFFFF,
                     0x0000000000000000,
                     0xFFFFFFFF00000001 >();
    }

    #[test]
    fn gf25519_ops() {
        // 2^255 - 19 (top bit clear).
        test_ring::< 0xFFFFFFFFFFFFFFED,
                     0xFFFFFFFFFFFFFFFF,
                     0xFFFFFFFFFFFFFFFF,
                     0x7FFFFFFFFFFFFFFF >();
    }

    #[test]
    fn inversion() {
        type GF = ModInt256<0xFFFFFFFEFFFFFC2F, 0xFFFFFFFFFFFFFFFF,
                            0xFFFFFFFFFFFFFFFF, 0xFFFFFFFFFFFFFFFF>;
        assert!(GF::ZERO.invert().iszero() == 0xFFFFFFFF);
        assert!(GF::ONE.invert().equals(GF::ONE) == 0xFFFFFFFF);
        assert!(GF::MINUS_ONE.invert().equals(GF::MINUS_ONE) == 0xFFFFFFFF);
        let three = GF::from_u64(3);
        assert!((three * three.invert()).equals(GF::ONE) == 0xFFFFFFFF);
        assert!((GF::ONE / three * GF::w64be(0, 0, 0, 3)).equals(GF::ONE) != 0);
    }
}
