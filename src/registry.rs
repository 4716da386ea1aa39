//! Algorithm registry and hash-format dispatch.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! Maps magic `$id$` prefixes to algorithm implementations. The
//! registry is a static table, populated at compile time and
//! read-only thereafter, so concurrent lookups need no
//! synchronization.
//!
//! # Example
//!
//! ```
//! use crypt3::registry;
//!
//! let h = "$1$5pZSV9va$azfrPr6af3Fc7dLblQXVa0";
//! assert!(registry::verify(h, "password").is_ok());
//! ```

use crate::error::Error;
use crate::{apr1_crypt, md5_crypt, sha256_crypt, sha512_crypt, Crypter, Result};

/// Identifiers of the supported algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    /// MD5-crypt, `$1$`.
    Md5,
    /// Apache MD5-crypt variant, `$apr1$`.
    Apr1,
    /// SHA256-crypt, `$5$`.
    Sha256,
    /// SHA512-crypt, `$6$`.
    Sha512,
}

/// All supported algorithms, in registration order.
pub const ALGORITHMS: [Algorithm; 4] = [
    Algorithm::Md5,
    Algorithm::Apr1,
    Algorithm::Sha256,
    Algorithm::Sha512,
];

impl Algorithm {
    /// The magic prefix of hashes produced by this algorithm.
    pub fn magic(self) -> &'static str {
        match self {
            Algorithm::Md5 => md5_crypt::MAGIC,
            Algorithm::Apr1 => apr1_crypt::MAGIC,
            Algorithm::Sha256 => sha256_crypt::MAGIC,
            Algorithm::Sha512 => sha512_crypt::MAGIC,
        }
    }

    /// The algorithm's [`Crypter`] implementation.
    pub fn crypter(self) -> &'static dyn Crypter {
        match self {
            Algorithm::Md5 => &md5_crypt::Md5Crypt,
            Algorithm::Apr1 => &apr1_crypt::Apr1Crypt,
            Algorithm::Sha256 => &sha256_crypt::Sha256Crypt,
            Algorithm::Sha512 => &sha512_crypt::Sha512Crypt,
        }
    }

    /// Recognize the algorithm a hash string was produced with, by the
    /// longest matching magic prefix.
    pub fn from_hash(hash: &str) -> Option<Algorithm> {
        ALGORITHMS
            .iter()
            .copied()
            .filter(|a| hash.starts_with(a.magic()))
            .max_by_key(|a| a.magic().len())
    }
}

/// A Unix __crypt__(3) work-alike, dispatching on the magic prefix.
pub fn crypt<B: AsRef<[u8]>>(key: B, hash: &str) -> Result<String> {
    match Algorithm::from_hash(hash) {
        Some(alg) => alg.crypter().generate(key.as_ref(), hash),
        None => Err(Error::InvalidPrefix),
    }
}

/// Verify a hash in any registered format.
pub fn verify<B: AsRef<[u8]>>(hashed_key: &str, key: B) -> Result<()> {
    match Algorithm::from_hash(hashed_key) {
        Some(alg) => alg.crypter().verify(hashed_key, key.as_ref()),
        None => Err(Error::InvalidPrefix),
    }
}

/// Report the number of rounds a hash in any registered format was
/// computed with.
pub fn cost(hashed_key: &str) -> Result<u32> {
    match Algorithm::from_hash(hashed_key) {
        Some(alg) => alg.crypter().cost(hashed_key),
        None => Err(Error::InvalidPrefix),
    }
}

#[cfg(test)]
mod tests {
    use super::{cost, crypt, verify, Algorithm};
    use crate::error::Error;

    #[test]
    fn recognition() {
        assert_eq!(Algorithm::from_hash("$1$abc$def"), Some(Algorithm::Md5));
        assert_eq!(Algorithm::from_hash("$apr1$abc$def"), Some(Algorithm::Apr1));
        assert_eq!(Algorithm::from_hash("$5$abc$def"), Some(Algorithm::Sha256));
        assert_eq!(Algorithm::from_hash("$6$abc$def"), Some(Algorithm::Sha512));
        assert_eq!(Algorithm::from_hash("$2y$05$abcdef"), None);
        assert_eq!(Algorithm::from_hash("plaintext"), None);
    }

    #[test]
    fn crypt_recognized() {
        assert_eq!(
            crypt("password", "$1$5pZSV9va$azfrPr6af3Fc7dLblQXVa0").unwrap(),
            "$1$5pZSV9va$azfrPr6af3Fc7dLblQXVa0"
        );
        assert_eq!(
            crypt("Hello world!", "$6$saltstring").unwrap(),
            "$6$saltstring$svn8UoSVapNtMuq1ukKS4tPQd8iKwSMHWjl/O817G3uBnIFNjnQJuesI68u4OTLiBFdcbYEdFCoEOfaS35inz1"
        );
    }

    #[test]
    fn verify_and_cost() {
        assert!(verify("$apr1$r31.....$HqJZimcKQFAMYayBlzkrA/", "myPassword").is_ok());
        assert_eq!(
            verify("$apr1$r31.....$HqJZimcKQFAMYayBlzkrA/", "notMyPassword").unwrap_err(),
            Error::KeyMismatch
        );
        assert_eq!(cost("$apr1$r31.....$HqJZimcKQFAMYayBlzkrA/").unwrap(), 1000);
        assert_eq!(cost("$6$rounds=77777$short$x").unwrap(), 77777);
        assert_eq!(cost("md5$plain").unwrap_err(), Error::InvalidPrefix);
    }
}
