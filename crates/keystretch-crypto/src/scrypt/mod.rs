//! scrypt password-based key derivation function.
//!
//! scrypt is a memory-hard key derivation function designed by Colin Percival
//! (RFC 7914). It is intentionally expensive in both CPU and memory to resist
//! brute-force attacks using custom hardware (ASICs/FPGAs).
//!
//! The driver expands the password into `p` independent 128r-byte lanes with
//! one PBKDF2-HMAC-SHA256 round, runs the memory-hard ROMix stage over each
//! lane, and compresses the mixed lanes back down to the requested key length
//! with a final PBKDF2-HMAC-SHA256 round. Lanes never share memory, so they
//! are fanned out across worker threads when more than one CPU is available;
//! the result is byte-identical regardless of the schedule.

mod romix;
mod salsa;

use crate::hash;
use crate::hmac::Hmac;
use crate::pbkdf2;
use keystretch_types::{HashAlgId, KdfError};
use zeroize::{Zeroize, Zeroizing};

/// Validated derivation geometry, in native sizes.
struct Geometry {
    /// CPU/memory cost parameter N.
    n: usize,
    /// Parallelization parameter p (number of lanes).
    p: usize,
    /// Bytes per lane: 128 * r.
    lane_len: usize,
    /// Expansion buffer size: p * 128 * r.
    b_len: usize,
    /// Arena size per worker: N * 128 * r.
    v_len: usize,
}

/// Check the scrypt parameters against RFC 7914 and platform bounds.
///
/// Every rule here runs before any allocation. Parameter violations are
/// caller errors; sizes that cannot be represented in `usize` are resource
/// errors (the caller may retry with smaller parameters on a bigger
/// platform, but not here).
fn validate(n: u64, r: u64, p: u64, dk_len: usize) -> Result<Geometry, KdfError> {
    if r == 0 || p == 0 {
        return Err(KdfError::InvalidBlockParameter);
    }
    if n < 2 || n & (n - 1) != 0 {
        return Err(KdfError::InvalidCostParameter);
    }
    // RFC 7914: r * p < 2^30
    if r.checked_mul(p).map_or(true, |rp| rp >= 1 << 30) {
        return Err(KdfError::ParameterProductTooLarge);
    }
    // RFC 7914: N < 2^(128 * r / 8). For r >= 4 the bound exceeds u64.
    if r < 4 && n >= 1u64 << (16 * r) {
        return Err(KdfError::InvalidCostParameter);
    }
    // RFC 7914: dkLen <= (2^32 - 1) * 32 for the SHA-256 driver
    if dk_len as u128 > 0xffff_ffff * 32 {
        return Err(KdfError::DerivedKeyTooLong);
    }

    let n = usize::try_from(n).map_err(|_| KdfError::MemoryRequirementOverflow)?;
    let r = usize::try_from(r).map_err(|_| KdfError::MemoryRequirementOverflow)?;
    let p = usize::try_from(p).map_err(|_| KdfError::MemoryRequirementOverflow)?;

    let lane_len = r
        .checked_mul(128)
        .ok_or(KdfError::MemoryRequirementOverflow)?;
    let b_len = lane_len
        .checked_mul(p)
        .ok_or(KdfError::MemoryRequirementOverflow)?;
    let v_len = lane_len
        .checked_mul(n)
        .ok_or(KdfError::MemoryRequirementOverflow)?;

    Ok(Geometry {
        n,
        p,
        lane_len,
        b_len,
        v_len,
    })
}

/// Allocate a zero-filled buffer, surfacing allocation failure as an error
/// instead of an abort.
fn alloc_buffer(len: usize) -> Result<Vec<u8>, KdfError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| KdfError::MemAllocFail)?;
    buf.resize(len, 0);
    Ok(buf)
}

/// Number of worker threads for `lanes` independent lanes.
fn worker_count(lanes: usize) -> usize {
    let cpus = std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get);
    lanes.min(cpus)
}

/// Run ROMix over every 128r-byte lane of `b`.
///
/// Lanes are distributed round-robin over `workers` scoped threads, each
/// owning one V arena and one scratch buffer for the lanes it processes.
/// Each lane is mixed in place, so its output position always equals its
/// index and the schedule cannot affect the result.
fn mix_lanes(b: &mut [u8], geom: &Geometry, workers: usize) -> Result<(), KdfError> {
    if workers <= 1 {
        let mut v = alloc_buffer(geom.v_len)?;
        let mut scratch = alloc_buffer(geom.lane_len)?;
        for lane in b.chunks_mut(geom.lane_len) {
            romix::ro_mix(lane, &mut v, &mut scratch, geom.n);
        }
        v.zeroize();
        scratch.zeroize();
        return Ok(());
    }

    // Allocate every worker's arena up front so an allocation failure
    // surfaces before any thread is spawned.
    let mut arenas: Vec<(Vec<u8>, Vec<u8>)> = Vec::with_capacity(workers);
    for _ in 0..workers {
        arenas.push((alloc_buffer(geom.v_len)?, alloc_buffer(geom.lane_len)?));
    }

    let mut assignments: Vec<Vec<&mut [u8]>> = (0..workers).map(|_| Vec::new()).collect();
    for (i, lane) in b.chunks_mut(geom.lane_len).enumerate() {
        assignments[i % workers].push(lane);
    }

    let n = geom.n;
    std::thread::scope(|s| {
        for (arena, lanes) in arenas.iter_mut().zip(assignments) {
            s.spawn(move || {
                let (v, scratch) = arena;
                for lane in lanes {
                    romix::ro_mix(lane, v, scratch, n);
                }
            });
        }
    });

    for (mut v, mut scratch) in arenas {
        v.zeroize();
        scratch.zeroize();
    }
    Ok(())
}

/// Derive a key from a password using scrypt.
///
/// # Parameters
/// - `password`: the password bytes.
/// - `salt`: the salt bytes (should be random, at least 16 bytes).
/// - `n`: the CPU/memory cost parameter (a power of two greater than one).
/// - `r`: the block size parameter.
/// - `p`: the parallelization parameter (`r * p < 2^30`).
/// - `dk_len`: the desired derived key length in bytes.
///
/// # Returns
/// The derived key of exactly `dk_len` bytes.
pub fn scrypt(
    password: &[u8],
    salt: &[u8],
    n: u64,
    r: u64,
    p: u64,
    dk_len: usize,
) -> Result<Vec<u8>, KdfError> {
    let geom = validate(n, r, p, dk_len)?;
    let prf = Hmac::new(hash::algorithm(HashAlgId::Sha256), password)?;

    // Expansion: B = PBKDF2-HMAC-SHA256(P, S, 1, p * 128 * r)
    let mut b = Zeroizing::new(alloc_buffer(geom.b_len)?);
    pbkdf2::derive(&prf, salt, 1, &mut b)?;

    // Memory-hard stage: ROMix over each lane
    mix_lanes(&mut b, &geom, worker_count(geom.p))?;

    // Compression: DK = PBKDF2-HMAC-SHA256(P, B, 1, dkLen)
    let mut out = vec![0u8; dk_len];
    if let Err(err) = pbkdf2::derive(&prf, &b, 1, &mut out) {
        out.zeroize();
        return Err(err);
    }
    Ok(out)
}

/// Derive a key with scrypt on a blocking worker thread.
///
/// Parameters are validated eagerly, so caller errors resolve without
/// spawning anything. The synchronous driver then runs on
/// [`tokio::task::spawn_blocking`], and the future resolves exactly once
/// with the derived key or the error. There is no cancellation: once the
/// worker starts, the derivation runs to completion even if the returned
/// future is dropped.
pub async fn scrypt_async(
    password: &[u8],
    salt: &[u8],
    n: u64,
    r: u64,
    p: u64,
    dk_len: usize,
) -> Result<Vec<u8>, KdfError> {
    validate(n, r, p, dk_len)?;

    let password = Zeroizing::new(password.to_vec());
    let salt = Zeroizing::new(salt.to_vec());
    tokio::task::spawn_blocking(move || scrypt(&password, &salt, n, r, p, dk_len))
        .await
        .map_err(|_| KdfError::ProviderFailure("blocking worker did not complete"))?
}
