//! SHA-512 based hash.
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
//! use crypt3::sha512_crypt;
//!
//! let h = "$6$saltstring$svn8UoSVapNtMuq1ukKS4tPQd8iKwSMHWjl/O817G3uB\
//!          nIFNjnQJuesI68u4OTLiBFdcbYEdFCoEOfaS35inz1";
//! assert!(sha512_crypt::verify(h, "Hello world!").is_ok());
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
//! __`$6$rounds=`__*`{rounds}`*__$__*`{salt}`*__$__*`{checksum}`*, where:
//!
//! * *`{rounds}`* is the number of rounds, encoded as a decimal number
//!   without leading zeroes.
//!
//! * *`{salt}`* is the salt string.
//!
//! * *`{checksum}`* is an 86-character Base64 encoding of the checksum.
//!
//! The format __`$6$`__*`{salt}`*__$__*`{checksum}`* can be used if
//! the default number of rounds is chosen.

use sha2::Sha512;

use crate::error::Error;
use crate::salt::{self, SaltParams};
use crate::sha2_crypt::sha2_generate;
use crate::{consteq, Crypter, Result};

pub use crate::sha2_crypt::DEFAULT_ROUNDS;
pub use crate::sha2_crypt::MAX_ROUNDS;
pub use crate::sha2_crypt::MAX_SALT_LEN;
pub use crate::sha2_crypt::MIN_ROUNDS;

/// Magic prefix identifying SHA512-crypt hashes.
pub const MAGIC: &str = "$6$";

// Output byte order of the final digest. Consecutive encoded
// characters draw from non-adjacent digest bytes.
const TRANSPOSE: [u8; 64] = [
    42, 21, 0, 1, 43, 22, 23, 2, 44, 45, 24, 3, 4, 46, 25, 26, 5, 47, 48, 27, 6, 7, 49, 28, 29, 8,
    50, 51, 30, 9, 10, 52, 31, 32, 11, 53, 54, 33, 12, 13, 55, 34, 35, 14, 56, 57, 36, 15, 16, 58,
    37, 38, 17, 59, 60, 39, 18, 19, 61, 40, 41, 20, 62, 63,
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
    sha2_generate::<Sha512>(&PARAMS, key.as_ref(), raw_salt, &TRANSPOSE)
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

/// SHA512-crypt as a [`Crypter`](crate::Crypter).
pub struct Sha512Crypt;

impl Crypter for Sha512Crypt {
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
    use super::{cost, generate, verify, Crypter, Sha512Crypt};
    use crate::enc_dec::CRYPT_HASH64;
    use crate::error::Error;

    const VECTORS: &[(&str, &str, &str, u32)] = &[
        (
            "$6$saltstring",
            "Hello world!",
            "$6$saltstring$svn8UoSVapNtMuq1ukKS4tPQd8iKwSMHWjl/O817G3uBnIFNjnQJuesI68u4OTLiBFdcbYEdFCoEOfaS35inz1",
            5000,
        ),
        (
            "$6$rounds=10000$saltstringsaltstring",
            "Hello world!",
            "$6$rounds=10000$saltstringsaltst$OW1/O6BYHV6BcXZu8QVeXbDWra3Oeqh0sbHbbMCVNSnCM/UrjmM0Dp8vOuZeHBy/YTBmSK6H9qs/y3RnOaw5v.",
            10000,
        ),
        (
            "$6$rounds=5000$toolongsaltstring",
            "This is just a test",
            "$6$rounds=5000$toolongsaltstrin$lQ8jolhgVRVhY4b5pZKaysCLi0QBxGoNeKQzQ3glMhwllF7oGDZxUhx1yxdYcz/e1JSbq3y6JMxxl8audkUEm0",
            5000,
        ),
        (
            "$6$rounds=1400$anotherlongsaltstring",
            "a very much longer text to encrypt. Kinda long.\nWith a linebreak.",
            "$6$rounds=1400$anotherlongsalts$g.gUQRW7IS01Gjoxx45nbrcyyZCRRdMKVSVIaXSBnk6HigfcRLqrj6E3SM9lFBsGJp4klvm1ygxV998PGCDiV/",
            1400,
        ),
        (
            "$6$rounds=77777$short",
            "we have a short salt string but not a short password",
            "$6$rounds=77777$short$WuQyW2YR.hBNpjjRhpYD/ifIw05xdfeEyQoMxIXbkvr0gge1a1x3yRULJ5CCaUeOxFmtlcGZelFl5CxtgfiAc0",
            77777,
        ),
        (
            "$6$rounds=123456$asaltof16chars..",
            "a short string",
            "$6$rounds=123456$asaltof16chars..$BtCwjqMJGx5hrJhZywWvt0RLE8uZ4oPwcelCjmw2kSYu.Ec6ycULevoBK25fs2xXgMNrCzIMVcgEJAstJeonj1",
            123456,
        ),
    ];

    #[test]
    fn reference_vectors() {
        for &(salt, key, expected, rounds) in VECTORS {
            let hash = generate(key, salt).unwrap();
            assert_eq!(hash, expected);
            assert_eq!(cost(&hash).unwrap(), rounds);
        }
    }

    #[test]
    fn verify_own_output() {
        let keys: &[&[u8]] = &[
            b"password",
            b"12345",
            b"That's amazing! I've got the same combination on my luggage!",
            b"         random  spa  c    ing.",
            b"94ajflkvjzpe8u3&*j1k513KLJ&*()",
        ];
        for &key in keys {
            let hash = generate(key, "$6$saltstring").unwrap();
            assert!(verify(&hash, key).is_ok());
            assert_eq!(verify(&hash, "wrong").unwrap_err(), Error::KeyMismatch);
        }
    }

    #[test]
    fn verify_explicit_rounds_hash() {
        let hash = generate("password", "$6$rounds=1337$shortsalt").unwrap();
        assert!(hash.starts_with("$6$rounds=1337$shortsalt$"));
        assert!(verify(&hash, "password").is_ok());
    }

    #[test]
    fn with_prefix() {
        let hash = Sha512Crypt
            .generate_with_prefix("{SHA512-CRYPT}", b"password", "$6$saltstring")
            .unwrap();
        assert!(hash.starts_with("{SHA512-CRYPT}$6$saltstring$"));
        assert!(Sha512Crypt
            .verify_with_prefix("{SHA512-CRYPT}", &hash, b"password")
            .is_ok());
        // an untagged hash still verifies
        let plain = generate("password", "$6$saltstring").unwrap();
        assert!(Sha512Crypt
            .verify_with_prefix("{SHA512-CRYPT}", &plain, b"password")
            .is_ok());
    }

    #[test]
    fn random_salt() {
        let hash = generate("password", "").unwrap();
        assert!(hash.starts_with("$6$"));
        assert!(verify(&hash, "password").is_ok());
        let encoded = hash.rsplit('$').next().unwrap();
        assert_eq!(encoded.len(), 86);
    }

    #[test]
    fn encoded_alphabet_and_length() {
        let hash = generate("Hello world!", "$6$saltstring").unwrap();
        let encoded = hash.rsplit('$').next().unwrap();
        assert_eq!(encoded.len(), 86);
        assert!(encoded.bytes().all(|b| CRYPT_HASH64.contains(&b)));
    }

    #[test]
    fn salt_truncation_equivalence() {
        let at_max = generate("password", "$6$aaaaaaaaaaaaaaaa").unwrap();
        let over_max = generate("password", "$6$aaaaaaaaaaaaaaaaa").unwrap();
        assert_eq!(at_max, over_max);
    }

    #[test]
    fn rounds_clamped_into_output() {
        let hash = generate("password", "$6$rounds=0$salt").unwrap();
        assert!(hash.starts_with("$6$rounds=1000$salt$"));
        assert_eq!(cost(&hash).unwrap(), 1000);
        assert!(verify(&hash, "password").is_ok());
    }

    #[test]
    fn empty_key() {
        let h1 = generate("", "$6$saltstring").unwrap();
        let h2 = generate("", "$6$saltstring").unwrap();
        assert_eq!(h1, h2);
        assert!(verify(&h1, "").is_ok());
        assert_eq!(verify(&h1, "x").unwrap_err(), Error::KeyMismatch);
    }
}
