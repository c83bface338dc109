//! Identifier types used throughout kvom.
//!
//! Entity identities default to ULIDs: 128 bits rendered as 26 Crockford
//! base32 characters, time-ordered and lexicographically sortable. The bits
//! come from a UUID v7, whose leading 48 bits are the same millisecond Unix
//! timestamp a ULID carries, so identities sort by creation time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Crockford base32 alphabet (no I, L, O or U).
pub const ULID_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Length of a rendered ULID.
pub const ULID_LEN: usize = 26;

/// A 128-bit, time-ordered identifier rendered in Crockford base32.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ulid(u128);

impl Ulid {
    /// Creates a new ULID stamped with the current time.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7().as_u128())
    }

    /// Creates a ULID from its raw bits.
    #[must_use]
    pub const fn from_u128(bits: u128) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    #[must_use]
    pub const fn as_u128(&self) -> u128 {
        self.0
    }

    /// Milliseconds since the Unix epoch encoded in the leading 48 bits.
    #[must_use]
    pub const fn timestamp_ms(&self) -> u64 {
        (self.0 >> 80) as u64
    }

    /// Parses a ULID from its 26-character form. Lowercase is accepted.
    pub fn parse(s: &str) -> crate::Result<Self> {
        if s.len() != ULID_LEN {
            return Err(crate::Error::InvalidUlid(s.to_string()));
        }

        let mut bits: u128 = 0;
        for (i, c) in s.bytes().enumerate() {
            let digit = decode_char(c).ok_or_else(|| crate::Error::InvalidUlid(s.to_string()))?;
            // 26 * 5 = 130 bits, so the first character may only carry 3.
            if i == 0 && digit > 7 {
                return Err(crate::Error::InvalidUlid(s.to_string()));
            }
            bits = (bits << 5) | u128::from(digit);
        }
        Ok(Self(bits))
    }

    /// Returns true if `s` is a well-formed, uppercase ULID.
    #[must_use]
    pub fn is_valid(s: &str) -> bool {
        s.len() == ULID_LEN
            && s.bytes().all(|c| ULID_ALPHABET.contains(&c))
            && s.as_bytes()[0] <= b'7'
    }
}

fn decode_char(c: u8) -> Option<u8> {
    let upper = c.to_ascii_uppercase();
    ULID_ALPHABET
        .iter()
        .position(|&a| a == upper)
        .map(|p| p as u8)
}

/// Generates a fresh ULID string. This is the default identity strategy.
#[must_use]
pub fn generate_ulid() -> String {
    Ulid::new().to_string()
}

impl Default for Ulid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Ulid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; ULID_LEN];
        for (i, slot) in buf.iter_mut().enumerate() {
            let shift = 125 - 5 * i;
            let digit = ((self.0 >> shift) & 0x1F) as usize;
            *slot = ULID_ALPHABET[digit];
        }
        // Every byte comes from ULID_ALPHABET, which is ASCII.
        f.write_str(std::str::from_utf8(&buf).map_err(|_| fmt::Error)?)
    }
}

impl FromStr for Ulid {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Ulid {
    type Error = crate::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Ulid> for String {
    fn from(id: Ulid) -> Self {
        id.to_string()
    }
}
