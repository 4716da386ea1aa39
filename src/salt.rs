//! Salt header parsing and generation.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! A modular crypt salt header has the shape
//! `$<id>$[rounds=N$]<salt>`, and is usually handed to a hashing
//! function as the leading part of a previously computed hash. The
//! parser therefore stops the salt at the next `$` and ignores any
//! trailing data, which is what makes verification through
//! re-hashing work.
use std::cmp::min;
use std::str;

use rand::rngs::OsRng;
use rand::RngCore;

use crate::enc_dec::encode_24bit;
use crate::error::Error;
use crate::Result;

const ROUNDS_PREFIX: &[u8] = b"rounds=";

/// Per-algorithm salt and rounds limits.
pub struct SaltParams {
    /// Magic `$id$` prefix identifying the algorithm.
    pub magic: &'static str,
    /// Minimum generated salt length, in characters.
    pub salt_len_min: usize,
    /// Maximum salt length, in characters; longer salts are truncated.
    pub salt_len_max: usize,
    /// Rounds used when the header carries no `rounds=` field.
    pub rounds_default: u32,
    /// Lower clamp bound for explicit rounds.
    pub rounds_min: u32,
    /// Upper clamp bound for explicit rounds.
    pub rounds_max: u32,
}

/// A salt header parsed into its components.
#[derive(Debug)]
pub struct ParsedSalt<'a> {
    /// Salt bytes, already truncated to the algorithm's maximum.
    pub salt: &'a [u8],
    /// Number of rounds, clamped into the algorithm's range.
    pub rounds: u32,
    /// Whether the header spelled the rounds out.
    pub rounds_explicit: bool,
}

impl SaltParams {
    /// Parse a raw salt header.
    ///
    /// The input must start with the magic prefix and contain at least
    /// three `$`-delimited fields. An explicit `rounds=` value is
    /// clamped into the allowed range rather than rejected, for
    /// compatibility with shadow entries written by other systems.
    pub fn parse<'a>(&self, raw: &'a [u8]) -> Result<ParsedSalt<'a>> {
        if !raw.starts_with(self.magic.as_bytes()) {
            return Err(Error::InvalidPrefix);
        }
        let toks: Vec<&[u8]> = raw.splitn(5, |&b| b == b'$').collect();
        if toks.len() < 3 {
            return Err(Error::InvalidFormat);
        }
        let (salt, rounds, rounds_explicit) = if toks[2].starts_with(ROUNDS_PREFIX) {
            let rounds = str::from_utf8(&toks[2][ROUNDS_PREFIX.len()..])
                .ok()
                .and_then(|v| v.parse::<i32>().ok())
                .ok_or(Error::InvalidRounds)?;
            match toks.get(3) {
                Some(&salt) => (salt, self.clamp_rounds(rounds), true),
                None => return Err(Error::InvalidFormat),
            }
        } else {
            (toks[2], self.rounds_default, false)
        };
        let salt = &salt[..min(salt.len(), self.salt_len_max)];
        Ok(ParsedSalt { salt, rounds, rounds_explicit })
    }

    /// Generate a random salt header of `length` characters.
    ///
    /// The `rounds=` field is emitted only when `rounds` differs from
    /// the algorithm's default.
    pub fn generate(&self, length: usize, rounds: u32) -> Result<String> {
        let chars = gen_salt_chars(length)?;
        let mut out = String::from(self.magic);
        if rounds != self.rounds_default {
            out.push_str(&format!("rounds={}$", rounds));
        }
        out.push_str(&chars);
        Ok(out)
    }

    fn clamp_rounds(&self, rounds: i32) -> u32 {
        (rounds.max(0) as u32).max(self.rounds_min).min(self.rounds_max)
    }
}

/// Draw enough CSPRNG bytes for `length` encoded characters and
/// return the first `length` of them.
fn gen_salt_chars(length: usize) -> Result<String> {
    let mut raw = vec![0u8; (length * 6 + 7) / 8];
    OsRng
        .try_fill_bytes(&mut raw)
        .map_err(|e| Error::RandomError(e.to_string()))?;
    let mut chars = encode_24bit(&raw);
    chars.truncate(length);
    Ok(chars)
}

/// Read the rounds field out of a full hash string.
pub(crate) fn cost(hashed_key: &str, rounds_default: u32) -> Result<u32> {
    let toks: Vec<&str> = hashed_key.split('$').collect();
    if toks.len() < 3 {
        return Err(Error::InvalidFormat);
    }
    if !toks[2].starts_with("rounds=") {
        return Ok(rounds_default);
    }
    toks[2]["rounds=".len()..]
        .parse::<u32>()
        .map_err(|_| Error::InvalidRounds)
}
