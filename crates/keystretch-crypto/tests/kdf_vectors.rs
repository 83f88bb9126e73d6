//! Known-answer vectors and cross-module derivation properties.
//!
//! scrypt vectors come from RFC 7914 Section 12 (the 2^20-cost vector is
//! skipped; it needs a gigabyte of arena). PBKDF2 vectors live with the
//! module; this file exercises the public surface: determinism, the length
//! contract, the parameter-rejection matrix, input sensitivity, and
//! async/sync agreement.

use std::collections::HashSet;

use keystretch_crypto::{pbkdf2, scrypt, scrypt_async};
use keystretch_types::{HashAlgId, KdfError};

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

// ---------------------------------------------------------------------------
// scrypt known answers (RFC 7914 Section 12)
// ---------------------------------------------------------------------------

#[test]
fn test_scrypt_rfc7914_vector2() {
    let key = scrypt(b"password", b"NaCl", 1024, 8, 16, 64).unwrap();
    assert_eq!(
        hex(&key),
        "fdbabe1c9d3472007856e7190d01e9fe7c6ad7cbc8237830e77376634b373162\
2eaf30d92e22a3886ff109279d9830dac727afb94a83ee6d8360cbdfa2cc0640"
    );
}

#[test]
fn test_scrypt_rfc7914_vector3() {
    let key = scrypt(b"pleaseletmein", b"SodiumChloride", 16384, 8, 1, 64).unwrap();
    assert_eq!(
        hex(&key),
        "7023bdcb3afd7348461c06cd81fd38ebfda8fbba904f8e3ea9b543f6545da1f2\
d5432955613f0fcf62d49705242a9af9e61e85dc0d651e40dfcf017b45575887"
    );
}

// ---------------------------------------------------------------------------
// Determinism and length contract
// ---------------------------------------------------------------------------

#[test]
fn test_scrypt_length_contract() {
    for dk_len in [0usize, 1, 32, 64, 1000] {
        let key = scrypt(b"password", b"salt", 16, 1, 1, dk_len).unwrap();
        assert_eq!(key.len(), dk_len);
    }
}

#[test]
fn test_pbkdf2_length_contract() {
    for dk_len in [0usize, 1, 32, 64, 1000] {
        let key = pbkdf2(HashAlgId::Sha256, b"password", b"salt", 2, dk_len).unwrap();
        assert_eq!(key.len(), dk_len);
    }
}

#[test]
fn test_scrypt_independent_calls_agree() {
    let a = scrypt(b"correct horse", b"battery staple", 256, 2, 2, 40).unwrap();
    let b = scrypt(b"correct horse", b"battery staple", 256, 2, 2, 40).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_pbkdf2_independent_calls_agree() {
    let a = pbkdf2(HashAlgId::Sha512, b"correct horse", b"battery staple", 100, 80).unwrap();
    let b = pbkdf2(HashAlgId::Sha512, b"correct horse", b"battery staple", 100, 80).unwrap();
    assert_eq!(a, b);
}

// ---------------------------------------------------------------------------
// Parameter rejection
// ---------------------------------------------------------------------------

#[test]
fn test_scrypt_rejection_matrix() {
    let cases: &[(u64, u64, u64, usize)] = &[
        (0, 1, 1, 32),                // N = 0
        (1, 1, 1, 32),                // N = 1
        (3, 1, 1, 32),                // N not a power of two
        (1 << 16, 1, 1, 32),          // N >= 2^(16 r)
        (16, 0, 1, 32),               // r = 0
        (16, 1, 0, 32),               // p = 0
        (16, 1 << 15, 1 << 15, 32),   // r * p == 2^30
        (16, 1 << 20, 1 << 20, 32),   // r * p far over the bound
        (16, 1, 1, usize::MAX),       // derived key too long
    ];
    for &(n, r, p, dk_len) in cases {
        let err = scrypt(b"password", b"salt", n, r, p, dk_len).unwrap_err();
        assert!(
            err.is_parameter_error(),
            "expected parameter error for (N={n}, r={r}, p={p}, dkLen={dk_len}), got {err}"
        );
    }
}

#[test]
fn test_pbkdf2_rejects_zero_iterations() {
    let err = pbkdf2(HashAlgId::Sha256, b"password", b"salt", 0, 32).unwrap_err();
    assert!(matches!(err, KdfError::InvalidIterationCount));
    assert!(err.is_parameter_error());
}

// ---------------------------------------------------------------------------
// Sensitivity
// ---------------------------------------------------------------------------

#[test]
fn test_scrypt_input_sensitivity() {
    let mut outputs = HashSet::new();

    let base_password = b"password".to_vec();
    let base_salt = b"salt".to_vec();
    let fresh = |out: Vec<u8>, outputs: &mut HashSet<Vec<u8>>| {
        assert!(outputs.insert(out), "two distinct inputs collided");
    };

    fresh(
        scrypt(&base_password, &base_salt, 32, 1, 1, 32).unwrap(),
        &mut outputs,
    );

    // Flip every byte of the password, one at a time
    for i in 0..base_password.len() {
        let mut password = base_password.clone();
        password[i] ^= 0x01;
        fresh(scrypt(&password, &base_salt, 32, 1, 1, 32).unwrap(), &mut outputs);
    }

    // Flip every byte of the salt
    for i in 0..base_salt.len() {
        let mut salt = base_salt.clone();
        salt[i] ^= 0x01;
        fresh(scrypt(&base_password, &salt, 32, 1, 1, 32).unwrap(), &mut outputs);
    }

    // Vary each cost parameter
    fresh(scrypt(&base_password, &base_salt, 64, 1, 1, 32).unwrap(), &mut outputs);
    fresh(scrypt(&base_password, &base_salt, 32, 2, 1, 32).unwrap(), &mut outputs);
    fresh(scrypt(&base_password, &base_salt, 32, 1, 2, 32).unwrap(), &mut outputs);
}

#[test]
fn test_pbkdf2_input_sensitivity() {
    let mut outputs = HashSet::new();
    for (password, salt, iterations) in [
        (b"password".as_slice(), b"salt".as_slice(), 10u32),
        (b"passwore", b"salt", 10),
        (b"password", b"sale", 10),
        (b"password", b"salt", 11),
    ] {
        let out = pbkdf2(HashAlgId::Sha256, password, salt, iterations, 32).unwrap();
        assert!(outputs.insert(out), "two distinct inputs collided");
    }
}

// ---------------------------------------------------------------------------
// Async entry point
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_scrypt_async_matches_sync() {
    let sync_key = scrypt(b"password", b"NaCl", 256, 2, 2, 32).unwrap();
    let async_key = scrypt_async(b"password", b"NaCl", 256, 2, 2, 32)
        .await
        .unwrap();
    assert_eq!(async_key, sync_key);
}

#[tokio::test]
async fn test_scrypt_async_rejects_bad_parameters() {
    let err = scrypt_async(b"password", b"salt", 3, 1, 1, 32).await.unwrap_err();
    assert!(matches!(err, KdfError::InvalidCostParameter));
}
