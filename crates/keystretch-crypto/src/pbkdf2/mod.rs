//! PBKDF2 (Password-Based Key Derivation Function 2) implementation.
//!
//! PBKDF2 is defined in RFC 8018 (PKCS#5 v2.1). It derives cryptographic
//! keys from a password by applying a pseudorandom function (HMAC over any
//! registered hash) iteratively to increase computational cost and resist
//! brute-force attacks.

use crate::hash;
use crate::hmac::Hmac;
use keystretch_types::{HashAlgId, KdfError};
use zeroize::Zeroize;

/// Derive a key from a password using PBKDF2.
///
/// # Parameters
/// - `hash`: the hash algorithm underlying the HMAC PRF.
/// - `password`: the password bytes.
/// - `salt`: the salt bytes (should be random, at least 16 bytes).
/// - `iterations`: the iteration count (must be at least 1).
/// - `dk_len`: the desired derived key length in bytes.
///
/// # Returns
/// The derived key of exactly `dk_len` bytes.
pub fn pbkdf2(
    hash: HashAlgId,
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    dk_len: usize,
) -> Result<Vec<u8>, KdfError> {
    if iterations == 0 {
        return Err(KdfError::InvalidIterationCount);
    }

    let prf = Hmac::new(hash::algorithm(hash), password)?;

    // RFC 8018: dkLen <= (2^32 - 1) * hLen. Checked before the output
    // buffer is allocated.
    if dk_len as u128 > 0xffff_ffff * prf.output_size() as u128 {
        return Err(KdfError::DerivedKeyTooLong);
    }

    let mut out = vec![0u8; dk_len];
    derive(&prf, salt, iterations, &mut out)?;
    Ok(out)
}

/// Fill `out` with PBKDF2 output using an already-keyed PRF.
///
/// The scrypt driver calls this directly for its expansion and compression
/// steps, reusing one keyed HMAC for both. `out.len()` must not exceed
/// `(2^32 - 1) * prf.output_size()`; the public entry points check this.
pub(crate) fn derive(
    prf: &Hmac,
    salt: &[u8],
    iterations: u32,
    out: &mut [u8],
) -> Result<(), KdfError> {
    let h_len = prf.output_size();
    let mut u = vec![0u8; h_len];
    let mut t = vec![0u8; h_len];

    for (i, chunk) in out.chunks_mut(h_len).enumerate() {
        // U_1 = PRF(P, S || INT(i)), with INT big-endian and 1-based
        let block_index = (i as u32) + 1;
        let mut ctx = prf.clone();
        ctx.update(salt)?;
        ctx.update(&block_index.to_be_bytes())?;
        ctx.finish(&mut u)?;
        t.copy_from_slice(&u);

        // U_2 .. U_c, XOR-folded into T_i
        for _ in 1..iterations {
            let mut ctx = prf.clone();
            ctx.update(&u)?;
            ctx.finish(&mut u)?;
            for (acc, &u_j) in t.iter_mut().zip(u.iter()) {
                *acc ^= u_j;
            }
        }

        chunk.copy_from_slice(&t[..chunk.len()]);
    }

    u.zeroize();
    t.zeroize();
    Ok(())
}
