/// Hash algorithm identifiers.
///
/// These select the HMAC's underlying digest for the generic PBKDF2 path.
/// The scrypt driver always uses SHA-256 internally, as required by
/// RFC 7914.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgId {
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

/// KDF algorithm identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KdfAlgId {
    Pbkdf2,
    Scrypt,
}
