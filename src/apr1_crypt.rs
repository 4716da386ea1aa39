//! Apache "apr1" MD5 based hash.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! The variant of MD5-crypt used by the Apache HTTP server's
//! `htpasswd` files. The only change from MD5-crypt is the magic
//! constant `$apr1$` instead of `$1$`; the algorithms are otherwise
//! identical.
//!
//! # Example
//!
//! ```
//! use crypt3::apr1_crypt;
//!
//! let h = "$apr1$r31.....$HqJZimcKQFAMYayBlzkrA/";
//! assert!(apr1_crypt::verify(h, "myPassword").is_ok());
//! ```
//!
//! # Parameters
//!
//! * __Key length__: unlimited.
//!
//! * __Salt length__: 0 to 8 characters. Default is 8.
//!
//! * __Rounds__: 1000 (fixed.)
//!
//! # Hash Format
//!
//! The format of the hash is
//! __`$apr1$`__*`{salt}`*__$__*`{checksum}`*, where:
//!
//! * *`{salt}`* is the salt string.
//!
//! * *`{checksum}`* is a 22-character Base64 encoding of the checksum.

use crate::error::Error;
use crate::md5_crypt::md5_crypt;
use crate::salt;
use crate::{consteq, Crypter, Result};

pub use crate::md5_crypt::MAX_SALT_LEN;
pub use crate::md5_crypt::ROUNDS;

/// Magic prefix identifying apr1 hashes.
pub const MAGIC: &str = "$apr1$";

/// Hash a key using the salt parsed out of `raw_salt`.
///
/// If `raw_salt` is empty, a random maximum-length salt is generated.
/// A salt that is too long is truncated to maximum length.
pub fn generate<B: AsRef<[u8]>>(key: B, raw_salt: &str) -> Result<String> {
    md5_crypt(key.as_ref(), raw_salt, MAGIC)
}

/// Verify that the hash corresponds to a key.
pub fn verify<B: AsRef<[u8]>>(hashed_key: &str, key: B) -> Result<()> {
    let computed = generate(key, hashed_key)?;
    if consteq(hashed_key, &computed) {
        Ok(())
    } else {
        Err(Error::KeyMismatch)
    }
}

/// Report the number of rounds a hash was computed with; fixed for
/// this algorithm, but the hash must still have the expected number
/// of fields.
pub fn cost(hashed_key: &str) -> Result<u32> {
    salt::cost(hashed_key, ROUNDS)
}

/// apr1 as a [`Crypter`](crate::Crypter).
pub struct Apr1Crypt;

impl Crypter for Apr1Crypt {
    fn generate(&self, key: &[u8], raw_salt: &str) -> Result<String> {
        generate(key, raw_salt)
    }

    fn verify(&self, hashed_key: &str, key: &[u8]) -> Result<()> {
        verify(hashed_key, key)
    }

    fn cost(&self, hashed_key: &str) -> Result<u32> {
        cost(hashed_key)
    }
}

#[cfg(test)]
mod tests {
    use super::{cost, generate, verify, Apr1Crypt, Crypter};
    use crate::md5_crypt;

    #[test]
    fn known_vector() {
        // from the Apache htpasswd documentation
        assert_eq!(
            generate("myPassword", "$apr1$r31.....$HqJZimcKQFAMYayBlzkrA/").unwrap(),
            "$apr1$r31.....$HqJZimcKQFAMYayBlzkrA/"
        );
    }

    #[test]
    fn differs_from_md5_crypt() {
        let apr1 = generate("password", "$apr1$saltsalt").unwrap();
        let md5 = md5_crypt::generate("password", "$1$saltsalt").unwrap();
        assert!(verify(&apr1, "password").is_ok());
        assert_ne!(apr1["$apr1$".len()..], md5["$1$".len()..]);
    }

    #[test]
    fn fixed_cost() {
        assert_eq!(cost("$apr1$r31.....$HqJZimcKQFAMYayBlzkrA/").unwrap(), 1000);
        assert_eq!(cost("garbage").unwrap_err(), crate::error::Error::InvalidFormat);
    }

    #[test]
    fn with_prefix() {
        let hash = Apr1Crypt
            .generate_with_prefix("{APR1-CRYPT}", b"password", "$apr1$saltsalt")
            .unwrap();
        assert!(hash.starts_with("{APR1-CRYPT}$apr1$saltsalt$"));
        assert!(Apr1Crypt
            .verify_with_prefix("{APR1-CRYPT}", &hash, b"password")
            .is_ok());
    }
}
