//! Unix crypt(3) password hashing and verification.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! Implementations of the modular crypt hash families found in
//! `/etc/shadow` and Apache `htpasswd` files: [MD5-crypt](md5_crypt),
//! its [apr1](apr1_crypt) variant, [SHA256-crypt](sha256_crypt) and
//! [SHA512-crypt](sha512_crypt), the latter two as specified by
//! Ulrich Drepper's SHA-crypt document. Output is byte-identical to
//! the reference implementations, so hashes interoperate with system
//! shadow files.
//!
//! # Getting Started
//!
//! Add the following to the `[dependencies]` section of your `Cargo.toml`:
//!
//! ```toml
//! crypt3 = "1"
//! ```
//!
//! # Examples
//!
//! To verify a password hashed with a known algorithm:
//!
//! ```
//! use crypt3::sha512_crypt;
//!
//! let h = "$6$saltstring$svn8UoSVapNtMuq1ukKS4tPQd8iKwSMHWjl/O817G3uB\
//!          nIFNjnQJuesI68u4OTLiBFdcbYEdFCoEOfaS35inz1";
//! assert!(sha512_crypt::verify(h, "Hello world!").is_ok());
//! ```
//!
//! To hash a password with a fresh random salt and default parameters:
//!
//! ```
//! use crypt3::sha512_crypt;
//!
//! let h = sha512_crypt::generate("password", "").unwrap();
//! ```
//!
//! To verify a password against any recognized hash format:
//!
//! ```
//! use crypt3::registry;
//!
//! let h = "$1$5pZSV9va$azfrPr6af3Fc7dLblQXVa0";
//! assert!(registry::verify(h, "password").is_ok());
//! ```
//!
//! # Summary
//!
//! Each algorithm lives in its own module and offers three functions:
//! `generate` hashes a key using parameters parsed out of a salt
//! string (or a random salt, if the string is empty), `verify` checks
//! a key against a stored hash, and `cost` reports the number of
//! rounds a hash was computed with. The same operations are available
//! through the [`Crypter`] trait, which additionally supports hashes
//! carrying an opaque scheme tag such as `{SHA512-CRYPT}`, and through
//! the [registry](registry), which recognizes the algorithm from the
//! hash itself.
//!
//! Verification recomputes the hash with the stored parameters and
//! compares in constant time; it never parses the encoded digest.

#![warn(missing_docs)]

mod enc_dec;
pub mod error;
pub mod salt;
mod sha2_crypt;
pub mod md5_crypt;
pub mod apr1_crypt;
pub mod sha256_crypt;
pub mod sha512_crypt;
pub mod registry;

/// Type alias for the Result type.
pub type Result<T> = std::result::Result<T, error::Error>;

/// Uniform operations over a password hashing algorithm.
///
/// Implemented by the unit structs in the algorithm modules; the
/// registry hands out trait objects for hash-format dispatch.
pub trait Crypter: Sync {
    /// Hash `key` using parameters parsed out of `raw_salt`.
    ///
    /// An empty `raw_salt` stands for a fresh random salt of maximum
    /// length with the default number of rounds. A full hash string
    /// may be passed as `raw_salt`; the trailing encoded digest is
    /// ignored.
    fn generate(&self, key: &[u8], raw_salt: &str) -> Result<String>;

    /// Verify that `hashed_key` corresponds to `key`.
    ///
    /// Recomputes the hash with `hashed_key` as the raw salt and
    /// compares the result in constant time. A mismatch reports
    /// [`KeyMismatch`](error::Error::KeyMismatch), which callers
    /// should distinguish from malformed-input errors.
    fn verify(&self, hashed_key: &str, key: &[u8]) -> Result<()>;

    /// Report the number of rounds `hashed_key` was computed with, or
    /// the algorithm's default if the hash doesn't spell them out.
    fn cost(&self, hashed_key: &str) -> Result<u32>;

    /// Like [`generate`](Crypter::generate), with an opaque tag such
    /// as `{SHA512-CRYPT}` prepended to the result.
    fn generate_with_prefix(&self, prefix: &str, key: &[u8], raw_salt: &str) -> Result<String> {
        Ok(format!("{}{}", prefix, self.generate(key, raw_salt)?))
    }

    /// Like [`verify`](Crypter::verify), stripping a literal `prefix`
    /// tag from `hashed_key` first. An untagged hash is verified
    /// as-is.
    fn verify_with_prefix(&self, prefix: &str, hashed_key: &str, key: &[u8]) -> Result<()> {
        let stripped = hashed_key.strip_prefix(prefix).unwrap_or(hashed_key);
        self.verify(stripped, key)
    }
}

fn consteq(hash: &str, calchash: &str) -> bool {
    if hash.len() != calchash.len() {
        return false;
    }
    0 == hash
        .bytes()
        .zip(calchash.bytes())
        .fold(0, |xs, (h1, h2)| xs | h1 ^ h2)
}
