//! Error values.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>. This file may not be copied,
// modified, or distributed except according to the terms of this
// license.
//!
//! For simplicity, there's no provision for recording the cause of any
//! errors except failures of the system entropy source.
use std::error::Error as StdError;
use std::fmt;

/// Possible errors.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// The hash string does not start with the algorithm's magic prefix.
    InvalidPrefix,
    /// The hash string has too few `$`-delimited fields.
    InvalidFormat,
    /// The `rounds=` field does not contain a decimal 32-bit value.
    InvalidRounds,
    /// The hashed value is not the hash of the given key.
    KeyMismatch,
    /// Random salt bytes cannot be generated.
    RandomError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidPrefix => write!(f, "invalid magic prefix"),
            Error::InvalidFormat => write!(f, "invalid salt format"),
            Error::InvalidRounds => write!(f, "invalid rounds"),
            Error::KeyMismatch => write!(f, "hashed value is not the hash of the given key"),
            Error::RandomError(ref err) => write!(f, "{}", err),
        }
    }
}

impl StdError for Error {}
