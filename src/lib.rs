//! ECDSA over the secp256k1 curve.
//!
//! This library implements the ECDSA signature algorithm over the
//! secp256k1 elliptic curve (as standardized in SEC 2): private key
//! validation, public key encoding and decoding (compressed,
//! uncompressed and hybrid formats), deterministic signature generation
//! ([RFC 6979]), signature verification with protection against
//! malleability (low-s rule), and public key recovery.
//!
//! The field and scalar arithmetic is implemented by the generic
//! `ModInt256` type in `backend`, specialized for the two moduli of
//! secp256k1 in `field`. Curve points, private and public keys are in
//! `secp256k1`. Signature values and their encodings (fixed 64-byte
//! format, ASN.1 DER) are in `signature`, and the deterministic nonce
//! generator in `rfc6979`. The `ecdsa` module provides a byte-oriented
//! interface on top of these types.
//!
//! Messages are not hashed by this library: all signing and
//! verification functions take as input a digest of 1 to 32 bytes,
//! computed by the caller with the hash function of its choice.
//!
//! # Usage
//!
//! The library is `no_std` and does not allocate. By default, it
//! compiles against the standard library, which only makes the `Error`
//! type implement `std::error::Error`.
//!
//! # Conventions
//!
//! All implemented functions should be strictly constant-time, unless
//! explicitly documented otherwise (non-constant-time functions normally
//! have "vartime" in their name). In order to avoid unwanted side-channel
//! leaks, Booleans are avoided on secret data (compilers tend to
//! "optimize" things a bit too eagerly when handling `bool` values).
//! All functions that return or use a potentially secret Boolean value
//! use the `u32` type; the convention is that 0xFFFFFFFF means "true",
//! and 0x00000000 means "false". No other value shall be used, for they
//! would lead to unpredictable results. For the same reason, the `Eq`
//! and `PartialEq` traits are not implemented on field elements, scalars
//! and points; they are implemented on signatures and errors, which are
//! public values.
//!
//! Algebraic operations on field elements and curve points are performed
//! with the usual operators (e.g. `+`); appropriate traits are defined
//! so that structure types and pointers to structure types can be used
//! more or less interchangeably. Throughout the code, functions that
//! modify the object on which they are called tend to have a name in
//! `set_*()` (e.g. for a curve point `P`, if we want to compute the
//! double of that point, then `P.set_double()` modifies the point
//! structure in place, while `P.double()` leaves `P` unmodified and
//! returns the double as a new structure instance).
//!
//! Fallible operations on externally provided data (keys, signatures,
//! digests) return a `Result` with the crate's `Error` type. A
//! well-formed signature which does not verify is not an error: it is
//! reported as `Ok(false)`.
//!
//! No inline assembly is used. On x86-64 architectures, the
//! `_addcarry_u64()` and `_subborrow_u64()` intrinsics are used
//! (from `core::arch::x86_64`); however, plain implementations with
//! no intrinsics are available (and used on other architectures, or
//! when the `portable` feature is enabled).
//!
//! [RFC 6979]: https://datatracker.ietf.org/doc/html/rfc6979

#![no_std]

pub use rand_core::{CryptoRng, RngCore};

pub mod backend;
pub mod field;
pub mod error;
pub mod secp256k1;
pub mod rfc6979;
pub mod signature;
pub mod ecdsa;

pub use error::Error;
