#![forbid(unsafe_code)]
#![doc = "Password-based key derivation: generic PBKDF2-HMAC and scrypt."]

// Core traits
pub mod provider;

// Hash algorithms
pub mod sha1;
pub mod sha2;

// Hash registry
pub mod hash;

// MAC
pub mod hmac;

// KDFs
pub mod pbkdf2;
pub mod scrypt;

pub use pbkdf2::pbkdf2;
pub use scrypt::{scrypt, scrypt_async};
