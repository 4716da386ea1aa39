//! MD5 based hash.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! This algorithm was developed by Poul-Henning Kamp for FreeBSD to
//! replace the aging DES crypt. It was adopted in various Linux
//! distributions and saw wide use. Presently, it's considered
//! insecure and shouldn't be used for new passwords.
//!
//! # Example
//!
//! ```
//! use crypt3::md5_crypt;
//!
//! let h = "$1$5pZSV9va$azfrPr6af3Fc7dLblQXVa0";
//! assert!(md5_crypt::verify(h, "password").is_ok());
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
//! __`$1$`__*`{salt}`*__$__*`{checksum}`*, where:
//!
//! * *`{salt}`* is the salt string.
//!
//! * *`{checksum}`* is a 22-character Base64 encoding of the checksum.

use std::cmp::min;
use std::str;

use md5::{Digest, Md5};
use zeroize::Zeroize;

use crate::enc_dec::encode_24bit;
use crate::error::Error;
use crate::salt::{self, SaltParams};
use crate::sha2_crypt::sequence;
use crate::{consteq, Crypter, Result};

/// Maximum (and default generated) salt length.
pub const MAX_SALT_LEN: usize = 8;
/// Number of rounds of the inner loop; fixed for this algorithm.
pub const ROUNDS: u32 = 1000;

/// Magic prefix identifying MD5-crypt hashes.
pub const MAGIC: &str = "$1$";

const TRANSPOSE: [u8; 16] = [12, 6, 0, 13, 7, 1, 14, 8, 2, 15, 9, 3, 5, 10, 4, 11];

fn params(magic: &'static str) -> SaltParams {
    SaltParams {
        magic,
        salt_len_min: 1,
        salt_len_max: MAX_SALT_LEN,
        rounds_default: ROUNDS,
        rounds_min: ROUNDS,
        rounds_max: ROUNDS,
    }
}

// The magic prefix takes part in the digest, so $1$ and $apr1$ hashes
// of the same key and salt differ in more than the leading tag.
pub(crate) fn md5_crypt(key: &[u8], raw_salt: &str, magic: &'static str) -> Result<String> {
    if raw_salt.is_empty() {
        let header = params(magic).generate(MAX_SALT_LEN, ROUNDS)?;
        let salt = parse_salt(header.as_bytes(), magic)?;
        do_md5_crypt(key, salt, magic)
    } else {
        let salt = parse_salt(raw_salt.as_bytes(), magic)?;
        do_md5_crypt(key, salt, magic)
    }
}

fn parse_salt<'a>(raw: &'a [u8], magic: &str) -> Result<&'a [u8]> {
    if !raw.starts_with(magic.as_bytes()) {
        return Err(Error::InvalidPrefix);
    }
    let rest = &raw[magic.len()..];
    let end = rest.iter().position(|&b| b == b'$').unwrap_or(rest.len());
    let salt = &rest[..end];
    Ok(&salt[..min(salt.len(), MAX_SALT_LEN)])
}

fn do_md5_crypt(key: &[u8], salt: &[u8], magic: &str) -> Result<String> {
    let mut b = Md5::new();
    b.update(key);
    b.update(salt);
    b.update(key);
    let mut bsum = b.finalize().to_vec();

    let mut a = Md5::new();
    a.update(key);
    a.update(magic.as_bytes());
    a.update(salt);
    a.update(&sequence(&bsum, key.len()));

    let mut i = key.len();
    while i > 0 {
        if i & 1 != 0 {
            a.update(&[0u8]);
        } else {
            a.update(&key[..1]);
        }
        i >>= 1;
    }
    let asum = a.finalize().to_vec();
    bsum.zeroize();

    let mut csum = asum;
    for r in 0..ROUNDS {
        let mut c = Md5::new();
        if r & 1 != 0 {
            c.update(key);
        } else {
            c.update(&csum);
        }
        if r % 3 != 0 {
            c.update(salt);
        }
        if r % 7 != 0 {
            c.update(key);
        }
        if r & 1 != 0 {
            c.update(&csum);
        } else {
            c.update(key);
        }
        csum.copy_from_slice(c.finalize().as_slice());
    }

    let mut permuted = [0u8; 16];
    for (i, &t) in TRANSPOSE.iter().enumerate() {
        permuted[i] = csum[t as usize];
    }
    csum.zeroize();

    let mut out = String::with_capacity(40);
    out.push_str(magic);
    out.push_str(str::from_utf8(salt).map_err(|_| Error::InvalidFormat)?);
    out.push('$');
    out.push_str(&encode_24bit(&permuted));
    Ok(out)
}

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

/// MD5-crypt as a [`Crypter`](crate::Crypter).
pub struct Md5Crypt;

impl Crypter for Md5Crypt {
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
    use super::{cost, generate, verify};
    use crate::error::Error;

    #[test]
    fn cost_requires_well_formed_hash() {
        assert_eq!(cost("$1$5pZSV9va$azfrPr6af3Fc7dLblQXVa0").unwrap(), 1000);
        assert_eq!(cost("garbage").unwrap_err(), Error::InvalidFormat);
    }

    #[test]
    fn known_vector() {
        assert_eq!(
            generate("password", "$1$5pZSV9va$azfrPr6af3Fc7dLblQXVa0").unwrap(),
            "$1$5pZSV9va$azfrPr6af3Fc7dLblQXVa0"
        );
        assert_eq!(
            generate("password", "$1$5pZSV9va").unwrap(),
            "$1$5pZSV9va$azfrPr6af3Fc7dLblQXVa0"
        );
    }

    #[test]
    fn verify_and_mismatch() {
        let h = "$1$5pZSV9va$azfrPr6af3Fc7dLblQXVa0";
        assert!(verify(h, "password").is_ok());
        assert_eq!(verify(h, "passwort").unwrap_err(), Error::KeyMismatch);
    }

    #[test]
    fn salt_truncation() {
        let long = generate("password", "$1$abcdefghij").unwrap();
        let max = generate("password", "$1$abcdefgh").unwrap();
        assert_eq!(long, max);
    }

    #[test]
    fn random_salt() {
        let hash = generate("password", "").unwrap();
        assert!(hash.starts_with("$1$"));
        assert!(verify(&hash, "password").is_ok());
        let encoded = hash.rsplit('$').next().unwrap();
        assert_eq!(encoded.len(), 22);
    }

    #[test]
    fn wrong_magic() {
        assert_eq!(
            generate("password", "$6$saltstring").unwrap_err(),
            Error::InvalidPrefix
        );
    }
}
