//! Finite fields.
//!
//! This module defines the two finite fields used by secp256k1: the base
//! field (integers modulo p = 2^256 - 2^32 - 977), over which point
//! coordinates are defined, and the scalar field (integers modulo the
//! prime curve order n). Both are merely specializations of the
//! backend-provided `ModInt256` type.

pub use crate::backend::ModInt256;

/// Field for secp256k1 point coordinates: integers modulo
/// p = 2^256 - 2^32 - 977.
pub type GFsecp256k1 = ModInt256<0xFFFFFFFEFFFFFC2F, 0xFFFFFFFFFFFFFFFF,
                                 0xFFFFFFFFFFFFFFFF, 0xFFFFFFFFFFFFFFFF>;

/// Integers modulo the secp256k1 curve order n (a 256-bit prime).
pub type Scalar = ModInt256<0xBFD25E8CD0364141, 0xBAAEDCE6AF48A03B,
                            0xFFFFFFFFFFFFFFFE, 0xFFFFFFFFFFFFFFFF>;

// 3*b = 21 (curve equation is y^2 = x^3 + 7).
const B3: GFsecp256k1 = GFsecp256k1::w64be(0, 0, 0, 21);

impl GFsecp256k1 {

    /// Multiplies this value by 21 (in place).
    #[inline(always)]
    pub fn set_mul21(&mut self) {
        *self *= B3;
    }

    /// Multiplies this value by 21.
    #[inline(always)]
    pub fn mul21(self) -> Self {
        let mut r = self;
        r.set_mul21();
        r
    }
}
