// Shared SHA-crypt pipeline.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//
// Implements the construction from Ulrich Drepper's SHA-crypt
// specification, http://www.akkadia.org/drepper/SHA-crypt.txt. The
// step numbers below refer to that document. SHA-256 and SHA-512 run
// the same pipeline; only the digest, the magic prefix and the output
// byte order differ.
use std::str;

use sha2::digest::Digest;
use zeroize::Zeroize;

use crate::enc_dec::encode_24bit;
use crate::error::Error;
use crate::salt::{ParsedSalt, SaltParams};
use crate::Result;

/// Minimum rounds.
pub const MIN_ROUNDS: u32 = 1000;
/// Maximum rounds.
pub const MAX_ROUNDS: u32 = 999_999_999;
/// Default number of rounds.
pub const DEFAULT_ROUNDS: u32 = 5000;
/// Maximum (and default generated) salt length.
pub const MAX_SALT_LEN: usize = 16;

/// Repeat `input` and truncate the concatenation to exactly `length`
/// bytes.
pub(crate) fn sequence(input: &[u8], length: usize) -> Vec<u8> {
    let mut seq = Vec::with_capacity(length);
    let mut length = length;
    while length > input.len() {
        seq.extend_from_slice(input);
        length -= input.len();
    }
    seq.extend_from_slice(&input[..length]);
    seq
}

pub(crate) fn sha2_crypt<D: Digest>(
    key: &[u8],
    salt: ParsedSalt,
    transpose: &[u8],
    magic: &str,
) -> Result<String> {
    let ParsedSalt { salt, rounds, rounds_explicit } = salt;

    // step 1-3
    let mut a = D::new();
    a.update(key);
    a.update(salt);

    // step 4-8
    let mut b = D::new();
    b.update(key);
    b.update(salt);
    b.update(key);
    let mut bsum = b.finalize().to_vec();

    // step 9-10
    a.update(&sequence(&bsum, key.len()));

    // step 11-12
    let mut i = key.len();
    while i > 0 {
        if i & 1 != 0 {
            a.update(&bsum);
        } else {
            a.update(key);
        }
        i >>= 1;
    }
    let asum = a.finalize().to_vec();
    bsum.zeroize();

    // step 13-15
    let mut dp = D::new();
    for _ in 0..key.len() {
        dp.update(key);
    }
    let mut dpsum = dp.finalize().to_vec();

    // step 16
    let mut p = sequence(&dpsum, key.len());
    dpsum.zeroize();

    // step 17-19
    let mut ds = D::new();
    for _ in 0..16 + asum[0] as usize {
        ds.update(salt);
    }
    let mut dssum = ds.finalize().to_vec();

    // step 20
    let mut s = sequence(&dssum, salt.len());
    dssum.zeroize();

    // step 21
    let mut csum = asum;
    for r in 0..rounds {
        let mut c = D::new();
        if r & 1 != 0 {
            c.update(&p);
        } else {
            c.update(&csum);
        }
        if r % 3 != 0 {
            c.update(&s);
        }
        if r % 7 != 0 {
            c.update(&p);
        }
        if r & 1 != 0 {
            c.update(&csum);
        } else {
            c.update(&p);
        }
        csum.copy_from_slice(c.finalize().as_slice());
    }
    p.zeroize();
    s.zeroize();

    // step 22
    let mut permuted = vec![0u8; transpose.len()];
    for (i, &t) in transpose.iter().enumerate() {
        permuted[i] = csum[t as usize];
    }
    csum.zeroize();

    let mut out = String::with_capacity(123);
    out.push_str(magic);
    if rounds_explicit {
        out.push_str(&format!("rounds={}$", rounds));
    }
    out.push_str(str::from_utf8(salt).map_err(|_| Error::InvalidFormat)?);
    out.push('$');
    out.push_str(&encode_24bit(&permuted));
    Ok(out)
}

pub(crate) fn sha2_generate<D: Digest>(
    params: &SaltParams,
    key: &[u8],
    raw_salt: &str,
    transpose: &[u8],
) -> Result<String> {
    if raw_salt.is_empty() {
        let header = params.generate(params.salt_len_max, params.rounds_default)?;
        let parsed = params.parse(header.as_bytes())?;
        sha2_crypt::<D>(key, parsed, transpose, params.magic)
    } else {
        let parsed = params.parse(raw_salt.as_bytes())?;
        sha2_crypt::<D>(key, parsed, transpose, params.magic)
    }
}
