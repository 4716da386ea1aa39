//! SHA-256 based hash.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! This algorithm was developed as an alternative to bcrypt
//! with NIST-approved hashing functions. It is similar to
//! MD5-crypt, but has a variable number of rounds and a larger
//! salt.
//!
//! # Example
//!
//! ```
//! use crypt3::sha256_crypt;
//!
//! let h = "$5$saltstring$5B8vYYiY.CVt1RlTTf8KbXBH3hsxY/GNooZaBBGWEc5";
//! assert!(sha256_crypt::verify(h, "Hello world!").is_ok());
//! ```
//!
//! # Parameters
//!
//! * __Key length__: unlimited.
//!
//! * __Salt length__: 0 to 16 characters. Default is 16.
//!
//! * __Rounds__: 1000 to 999999999. Default is 5000. If a number
//!   outside of the range is chosen, it is coerced to the nearest
//!   limit.
//!
//! # Hash Format
//!
//! The format of the hash is
//! __`$5$rounds=`__*`{rounds}`*__$__*`{salt}`*__$__*`{checksum}`*, where:
//!
//! * *`{rounds}`* is the number of rounds, encoded as a decimal number
//!   without leading zeroes.
//!
//! * *`{salt}`* is the salt string.
//!
//! * *`{checksum}`* is a 43-character Base64 encoding of the checksum.
//!
//! The format __`$5$`__*`{salt}`*__$__*`{checksum}`* can be used if
//! the default number of rounds is chosen.

use sha2::Sha256;

use crate::error::Error;
use crate::salt::{self, SaltParams};
use crate::sha2_crypt::sha2_generate;
use crate::{consteq, Crypter, Result};

pub use crate::sha2_crypt::DEFAULT_ROUNDS;
pub use crate::sha2_crypt::MAX_ROUNDS;
pub use crate::sha2_crypt::MAX_SALT_LEN;
pub use crate::sha2_crypt::MIN_ROUNDS;

/// Magic prefix identifying SHA256-crypt hashes.
pub const MAGIC: &str = "$5$";

const TRANSPOSE: [u8; 32] = [
    20, 10, 0, 11, 1, 21, 2, 22, 12, 23, 13, 3, 14, 4, 24, 5, 25, 15, 26, 16, 6, 17, 7, 27, 8, 28,
    18, 29, 19, 9, 30, 31,
];

const PARAMS: SaltParams = SaltParams {
    magic: MAGIC,
    salt_len_min: 1,
    salt_len_max: MAX_SALT_LEN,
    rounds_default: DEFAULT_ROUNDS,
    rounds_min: MIN_ROUNDS,
    rounds_max: MAX_ROUNDS,
};

/// Hash a key using parameters parsed out of `raw_salt`.
///
/// If `raw_salt` is empty, a random maximum-length salt is generated
/// and the default number of rounds is used. A salt that is too long
/// is truncated to maximum length, and an out-of-range rounds value
/// is coerced into the allowed range.
pub fn generate<B: AsRef<[u8]>>(key: B, raw_salt: &str) -> Result<String> {
    sha2_generate::<Sha256>(&PARAMS, key.as_ref(), raw_salt, &TRANSPOSE)
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

/// Report the number of rounds a hash was computed with.
pub fn cost(hashed_key: &str) -> Result<u32> {
    salt::cost(hashed_key, DEFAULT_ROUNDS)
}

/// SHA256-crypt as a [`Crypter`](crate::Crypter).
pub struct Sha256Crypt;

impl Crypter for Sha256Crypt {
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
