//! Trait-based provider mechanism for hash algorithms.
//!
//! These traits define the abstract hash capability the key derivation
//! functions are written against: block size, digest size, and streaming
//! update/finish. Concrete digests register themselves through the
//! [`crate::hash`] registry; the KDFs never name a hash family directly.

use keystretch_types::KdfError;

/// A hash / message digest algorithm.
pub trait Digest: Send + Sync {
    /// The output size in bytes.
    fn output_size(&self) -> usize;

    /// The internal block size in bytes.
    fn block_size(&self) -> usize;

    /// Feed data into the hash state.
    fn update(&mut self, data: &[u8]) -> Result<(), KdfError>;

    /// Finalize the hash and write the digest to `out`.
    /// The length of `out` must be at least `output_size()`.
    fn finish(&mut self, out: &mut [u8]) -> Result<(), KdfError>;

    /// Reset the hash state to process a new message.
    fn reset(&mut self);

    /// Clone the current hash state into a new boxed context.
    ///
    /// HMAC caches its keyed inner/outer states and clones them per
    /// invocation instead of re-deriving the key schedule.
    fn clone_box(&self) -> Box<dyn Digest>;
}

/// A convenience wrapper trait for creating digest instances.
pub trait HashAlgorithm: Send + Sync {
    /// Create a new digest context.
    fn new_digest(&self) -> Box<dyn Digest>;

    /// One-shot hash computation.
    fn hash(&self, data: &[u8]) -> Result<Vec<u8>, KdfError> {
        let mut ctx = self.new_digest();
        ctx.update(data)?;
        let mut out = vec![0u8; ctx.output_size()];
        ctx.finish(&mut out)?;
        Ok(out)
    }
}
