//! HMAC (Hash-based Message Authentication Code) implementation.
//!
//! HMAC provides message authentication using a cryptographic hash function
//! combined with a secret key, as defined in RFC 2104.
//!
//! HMAC(K, m) = H((K' XOR opad) || H((K' XOR ipad) || m))
//!
//! where K' is the key padded/hashed to block size, ipad = 0x36, opad = 0x5c.
//!
//! The context is keyed once and cloned per message: both PBKDF2 and scrypt
//! reuse the same password key across many HMAC invocations, and cloning the
//! ipad/opad-keyed digest states skips the key schedule entirely.

use crate::provider::{Digest, HashAlgorithm};
use keystretch_types::KdfError;
use zeroize::Zeroize;

/// HMAC context over any registered digest.
pub struct Hmac {
    /// Inner hash context (keyed with ipad-xored key).
    inner: Box<dyn Digest>,
    /// Outer hash context (keyed with opad-xored key).
    outer: Box<dyn Digest>,
}

impl Clone for Hmac {
    fn clone(&self) -> Self {
        Hmac {
            inner: self.inner.clone_box(),
            outer: self.outer.clone_box(),
        }
    }
}

impl Hmac {
    /// Create a new HMAC context keyed with `key`.
    pub fn new(alg: &dyn HashAlgorithm, key: &[u8]) -> Result<Self, KdfError> {
        let mut inner = alg.new_digest();
        let mut outer = alg.new_digest();
        let block_size = inner.block_size();
        let output_size = inner.output_size();

        // Step 1: if key > block_size, hash it; otherwise pad with zeros
        let mut key_block = vec![0u8; block_size];
        if key.len() > block_size {
            let mut hasher = alg.new_digest();
            hasher.update(key)?;
            let mut hashed_key = vec![0u8; output_size];
            hasher.finish(&mut hashed_key)?;
            key_block[..output_size].copy_from_slice(&hashed_key);
            hashed_key.zeroize();
        } else {
            key_block[..key.len()].copy_from_slice(key);
        }

        // Step 2: key the inner and outer contexts
        let mut pad = vec![0u8; block_size];
        for (byte, &k) in pad.iter_mut().zip(key_block.iter()) {
            *byte = k ^ 0x36;
        }
        inner.update(&pad)?;

        for (byte, &k) in pad.iter_mut().zip(key_block.iter()) {
            *byte = k ^ 0x5c;
        }
        outer.update(&pad)?;

        pad.zeroize();
        key_block.zeroize();

        Ok(Hmac { inner, outer })
    }

    /// The output size of the MAC in bytes.
    pub fn output_size(&self) -> usize {
        self.inner.output_size()
    }

    /// Feed data into the MAC computation.
    pub fn update(&mut self, data: &[u8]) -> Result<(), KdfError> {
        self.inner.update(data)
    }

    /// Finalize the MAC computation and write the result to `out`.
    ///
    /// Consumes the keyed state; clone the context before finishing if the
    /// key is needed again.
    pub fn finish(mut self, out: &mut [u8]) -> Result<(), KdfError> {
        let output_size = self.inner.output_size();
        let mut inner_hash = vec![0u8; output_size];
        self.inner.finish(&mut inner_hash)?;

        self.outer.update(&inner_hash)?;
        inner_hash.zeroize();

        self.outer.finish(out)
    }

    /// One-shot HMAC computation.
    pub fn mac(alg: &dyn HashAlgorithm, key: &[u8], data: &[u8]) -> Result<Vec<u8>, KdfError> {
        let mut ctx = Hmac::new(alg, key)?;
        ctx.update(data)?;
        let mut out = vec![0u8; ctx.output_size()];
        ctx.finish(&mut out)?;
        Ok(out)
    }
}
