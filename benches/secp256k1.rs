#![allow(non_snake_case)]

mod util;
use util::{core_cycles, median_cost};

use secp256k1_ecdsa::ecdsa;
use secp256k1_ecdsa::field::Scalar;
use secp256k1_ecdsa::secp256k1::{Point, PrivateKey};
use secp256k1_ecdsa::signature::Signature;
use sha2::{Sha256, Digest};

fn seed_scalar(tag: u8) -> Scalar {
    let mut sh = Sha256::new();
    sh.update(core_cycles().to_le_bytes());
    sh.update([tag]);
    Scalar::decode_reduce_be(&sh.finalize())
}

fn bench_mulgen() -> (f64, u8) {
    let mut s = seed_scalar(0);
    let v = median_cost(100, 100, || {
        let P = Point::mulgen(&s);
        s += Scalar::select(&Scalar::ONE, &Scalar::ZERO, P.isneutral());
    });
    (v, s.encode_be()[0])
}

fn bench_mul() -> (f64, u8) {
    let mut s = seed_scalar(1);
    let mut P = Point::mulgen(&s);
    let v = median_cost(100, 100, || {
        P *= s;
        s += Scalar::select(&Scalar::ONE, &Scalar::ZERO, P.isneutral());
    });
    (v, s.encode_be()[0])
}

fn bench_mul_add_mulgen() -> (f64, u8) {
    let mut uu = [Scalar::ZERO; 128];
    let mut vv = [Scalar::ZERO; 128];
    for i in 0..128 {
        uu[i] = seed_scalar(2 * (i as u8));
        vv[i] = seed_scalar(2 * (i as u8) + 1);
    }
    let mut P = Point::mulgen(&uu[127]);
    let mut j = 0usize;
    let v = median_cost(100, 128, || {
        let Q = P.mul_add_mulgen_vartime(&uu[j & 127], &vv[(j >> 7) & 127]);
        P += Q;
        j = j.wrapping_add(1);
    });
    (v, P.encode_compressed()[0])
}

fn bench_sign() -> (f64, u8) {
    let skey = PrivateKey::from_seed(&seed_scalar(3).encode_be());
    let mut msg = [0u8; 32];
    let v = median_cost(100, 100, || {
        if let Ok(sig) = skey.sign_hash(&msg) {
            msg.copy_from_slice(&sig.encode_fixed()[..32]);
        }
    });
    (v, msg[0])
}

fn bench_verify() -> (f64, u8) {
    let skey = PrivateKey::from_seed(&seed_scalar(4).encode_be());
    let pkey = skey.to_public_key();
    let mut sigs = [Signature::from_scalars(Scalar::ZERO, Scalar::ZERO); 128];
    for i in 0..128 {
        if let Ok(sig) = skey.sign_hash(&[i as u8; 32]) {
            sigs[i] = sig;
        }
    }
    let mut msg = [0u8; 32];
    let mut j = 0usize;
    let v = median_cost(100, 128, || {
        let ff = pkey.verify_hash(&sigs[j & 127], &msg) == Ok(true);
        msg[3] ^= 3u8.wrapping_sub(ff as u8);
        j = j.wrapping_add(1);
    });
    (v, msg[0])
}

fn bench_verify_bytes() -> (f64, u8) {
    let sk = seed_scalar(5).encode_be();
    let pk = ecdsa::public_key_create(&sk).unwrap_or([0u8; 33]);
    let msg = [0x55u8; 32];
    let sig = ecdsa::sign(&msg, &sk)
        .map(|s| s.encode_der())
        .unwrap_or_else(|_| Signature::from_scalars(Scalar::ONE, Scalar::ONE).encode_der());
    let mut n = 0u8;
    let v = median_cost(100, 100, || {
        if ecdsa::verify(&msg, sig.as_bytes(), &pk) == Ok(true) {
            n = n.wrapping_add(1);
        }
    });
    (v, n)
}

fn main() {
    let mut bx = 0u8;

    let (v, x) = bench_mul();
    bx ^= x;
    println!("secp256k1 point mul:           {:13.2}", v);
    let (v, x) = bench_mulgen();
    bx ^= x;
    println!("secp256k1 point mulgen:        {:13.2}", v);
    let (v, x) = bench_mul_add_mulgen();
    bx ^= x;
    println!("secp256k1 point mul_add_mulgen:{:13.2}", v);
    let (v, x) = bench_sign();
    bx ^= x;
    println!("secp256k1 sign:                {:13.2}", v);
    let (v, x) = bench_verify();
    bx ^= x;
    println!("secp256k1 verify:              {:13.2}", v);
    let (v, x) = bench_verify_bytes();
    bx ^= x;
    println!("secp256k1 verify (DER bytes):  {:13.2}", v);

    println!("{}", bx);
}
