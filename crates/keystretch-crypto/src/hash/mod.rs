//! Hash registry.
//!
//! Resolves a hash algorithm identifier (or its registry name, e.g.
//! `"SHA256"`) to the capability the KDFs consume: a factory for digest
//! contexts carrying their own block and output sizes. The KDFs themselves
//! never name a concrete hash family.

pub use crate::provider::{Digest, HashAlgorithm};

use crate::sha1::Sha1;
use crate::sha2::{Sha224, Sha256, Sha384, Sha512};
use keystretch_types::{HashAlgId, KdfError};

struct Sha1Algorithm;
struct Sha224Algorithm;
struct Sha256Algorithm;
struct Sha384Algorithm;
struct Sha512Algorithm;

impl HashAlgorithm for Sha1Algorithm {
    fn new_digest(&self) -> Box<dyn Digest> {
        Box::new(Sha1::new())
    }
}

impl HashAlgorithm for Sha224Algorithm {
    fn new_digest(&self) -> Box<dyn Digest> {
        Box::new(Sha224::new())
    }
}

impl HashAlgorithm for Sha256Algorithm {
    fn new_digest(&self) -> Box<dyn Digest> {
        Box::new(Sha256::new())
    }
}

impl HashAlgorithm for Sha384Algorithm {
    fn new_digest(&self) -> Box<dyn Digest> {
        Box::new(Sha384::new())
    }
}

impl HashAlgorithm for Sha512Algorithm {
    fn new_digest(&self) -> Box<dyn Digest> {
        Box::new(Sha512::new())
    }
}

/// Resolve an algorithm identifier to its implementation.
pub fn algorithm(id: HashAlgId) -> &'static dyn HashAlgorithm {
    match id {
        HashAlgId::Sha1 => &Sha1Algorithm,
        HashAlgId::Sha224 => &Sha224Algorithm,
        HashAlgId::Sha256 => &Sha256Algorithm,
        HashAlgId::Sha384 => &Sha384Algorithm,
        HashAlgId::Sha512 => &Sha512Algorithm,
    }
}

/// Look up a hash algorithm by its registry name.
///
/// Names are the uppercase identifiers callers pass across API boundaries:
/// `"SHA1"`, `"SHA224"`, `"SHA256"`, `"SHA384"`, `"SHA512"`.
pub fn by_name(name: &str) -> Option<HashAlgId> {
    match name {
        "SHA1" => Some(HashAlgId::Sha1),
        "SHA224" => Some(HashAlgId::Sha224),
        "SHA256" => Some(HashAlgId::Sha256),
        "SHA384" => Some(HashAlgId::Sha384),
        "SHA512" => Some(HashAlgId::Sha512),
        _ => None,
    }
}

/// Like [`by_name`], but unknown names are a caller error.
pub fn lookup(name: &str) -> Result<HashAlgId, KdfError> {
    by_name(name).ok_or_else(|| KdfError::UnknownHashAlgorithm(name.to_string()))
}

/// Whether a registry name resolves to a supported hash algorithm.
pub fn has_hash(name: &str) -> bool {
    by_name(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_round_trip() {
        for (name, id) in [
            ("SHA1", HashAlgId::Sha1),
            ("SHA224", HashAlgId::Sha224),
            ("SHA256", HashAlgId::Sha256),
            ("SHA384", HashAlgId::Sha384),
            ("SHA512", HashAlgId::Sha512),
        ] {
            assert_eq!(by_name(name), Some(id));
            assert!(has_hash(name));
        }
    }

    #[test]
    fn test_registry_unknown_name() {
        assert_eq!(by_name("MD5"), None);
        assert!(!has_hash("sha256")); // names are case-sensitive, like the original table
        let err = lookup("WHIRLPOOL").unwrap_err();
        assert!(matches!(err, KdfError::UnknownHashAlgorithm(_)));
        assert!(err.is_parameter_error());
    }

    #[test]
    fn test_registry_digest_sizes() {
        let sizes = [
            (HashAlgId::Sha1, 20, 64),
            (HashAlgId::Sha224, 28, 64),
            (HashAlgId::Sha256, 32, 64),
            (HashAlgId::Sha384, 48, 128),
            (HashAlgId::Sha512, 64, 128),
        ];
        for (id, output, block) in sizes {
            let ctx = algorithm(id).new_digest();
            assert_eq!(ctx.output_size(), output);
            assert_eq!(ctx.block_size(), block);
        }
    }

    #[test]
    fn test_one_shot_hash() {
        let digest = algorithm(HashAlgId::Sha256).hash(b"abc").unwrap();
        assert_eq!(digest.len(), 32);
        assert_eq!(digest[0], 0xba);
        assert_eq!(digest[31], 0xad);
    }
}
