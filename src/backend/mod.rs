//! Arithmetic backend for 256-bit modular integers.
//!
//! This module provides the `ModInt256` type, which implements integers
//! modulo a 256-bit odd modulus chosen at compile time through const
//! type parameters. Both the secp256k1 base field and the scalar field
//! (integers modulo the curve order) are specializations of that type
//! (see the `field` module).
//!
//! In general, the following properties apply:
//!
//!  - An instance encapsulates a value modulo the modulus `m`. The
//!    internal representation is Montgomery's (`x*2^256 mod m`), always
//!    fully reduced, so that two equal values have the same internal
//!    representation.
//!
//!  - The constant values `Self::ZERO` and `Self::ONE` contain the
//!    elements of value 0 and 1, respectively.
//!
//!  - Usual arithmetic operators can be used (`+`, `-`, `*`, `/`, unary
//!    `-`, and the compound assignments `+=`, `-=`, `*=` and `/=`).
//!    Division by zero is tolerated, and yields zero (regardless of the
//!    dividend). Operators can use both the raw types, and references
//!    thereof.
//!
//!  - Functions which modify the instance in place have a name in
//!    `set_*()` (e.g. `set_square()`); the corresponding function
//!    without the prefix returns a new instance (e.g. `square()`).
//!
//!  - Secret-dependent Booleans are represented as `u32` masks:
//!    0xFFFFFFFF for "true", 0x00000000 for "false". `set_cond()`,
//!    `select()` and `equals()` work with such masks.
//!
//!  - Constants can be defined with the const-qualified `w64le()` and
//!    `w64be()` functions, which take the value as four 64-bit limbs in
//!    little-endian and big-endian order, respectively. The value is
//!    implicitly reduced modulo the modulus.
//!
//!  - Encoding and decoding use the unsigned **big-endian** convention,
//!    since this is what all secp256k1-related standards use
//!    (`encode_be()`, `decode_be()`, `decode_reduce_be()`).
//!
//! All operations are constant-time, except when explicitly documented
//! otherwise (functions with "vartime" in their name).
//!
//! # Backend selection
//!
//! Carry propagation is implemented by the `addcarry_u64()` and
//! `subborrow_u64()` functions below. On x86_64, the native
//! `_addcarry_u64()` and `_subborrow_u64()` intrinsics are used; on other
//! architectures, or if the `portable` feature is set, a plain
//! implementation over `u128` is used instead. The choice is made at
//! compilation time and applies to the whole crate; both variants yield
//! exactly the same results.

pub mod modint;

pub use modint::ModInt256;

// Add with carry; carry is 0 or 1.
// (x, y, c_in) -> x + y + c_in mod 2^64, c_out

#[cfg(all(target_arch = "x86_64", not(feature = "portable")))]
#[inline(always)]
#[allow(unused_unsafe)]
pub(crate) fn addcarry_u64(x: u64, y: u64, c: u8) -> (u64, u8) {
    use core::arch::x86_64::_addcarry_u64;
    unsafe {
        let mut d = 0u64;
        let cc = _addcarry_u64(c, x, y, &mut d);
        (d, cc)
    }
}

#[cfg(not(all(target_arch = "x86_64", not(feature = "portable"))))]
#[inline(always)]
pub(crate) const fn addcarry_u64(x: u64, y: u64, c: u8) -> (u64, u8) {
    let z = (x as u128).wrapping_add(y as u128).wrapping_add(c as u128);
    (z as u64, (z >> 64) as u8)
}

// Subtract with borrow; borrow is 0 or 1.
// (x, y, c_in) -> x - y - c_in mod 2^64, c_out

#[cfg(all(target_arch = "x86_64", not(feature = "portable")))]
#[inline(always)]
#[allow(unused_unsafe)]
pub(crate) fn subborrow_u64(x: u64, y: u64, c: u8) -> (u64, u8) {
    use core::arch::x86_64::_subborrow_u64;
    unsafe {
        let mut d = 0u64;
        let cc = _subborrow_u64(c, x, y, &mut d);
        (d, cc)
    }
}

#[cfg(not(all(target_arch = "x86_64", not(feature = "portable"))))]
#[inline(always)]
pub(crate) const fn subborrow_u64(x: u64, y: u64, c: u8) -> (u64, u8) {
    let z = (x as u128).wrapping_sub(y as u128).wrapping_sub(c as u128);
    (z as u64, (z >> 127) as u8)
}

// Compute x*y+z1+z2 over 128 bits, returned as two 64-bit words (lo, hi).
// This cannot overflow: (2^64-1)^2 + 2*(2^64-1) = 2^128 - 1.
#[inline(always)]
pub(crate) const fn umull_add2(x: u64, y: u64, z1: u64, z2: u64) -> (u64, u64) {
    let t = ((x as u128) * (y as u128))
        .wrapping_add(z1 as u128).wrapping_add(z2 as u128);
    (t as u64, (t >> 64) as u64)
}

#[cfg(test)]
mod tests {

    use super::{addcarry_u64, subborrow_u64, umull_add2};

    #[test]
    fn carries() {
        assert!(addcarry_u64(0xFFFFFFFFFFFFFFFF, 1, 0) == (0, 1));
        assert!(addcarry_u64(0xFFFFFFFFFFFFFFFF, 0xFFFFFFFFFFFFFFFF, 1)
            == (0xFFFFFFFFFFFFFFFF, 1));
        assert!(addcarry_u64(5, 7, 1) == (13, 0));
        assert!(subborrow_u64(0, 1, 0) == (0xFFFFFFFFFFFFFFFF, 1));
        assert!(subborrow_u64(0, 0xFFFFFFFFFFFFFFFF, 1) == (0, 1));
        assert!(subborrow_u64(10, 3, 1) == (6, 0));
        let m = 0xFFFFFFFFFFFFFFFF;
        assert!(umull_add2(m, m, m, m) == (0xFFFFFFFFFFFFFFFF, 0xFFFFFFFFFFFFFFFF));
        assert!(umull_add2(1 << 32, 1 << 32, 3, 4) == (7, 1));
    }
}
