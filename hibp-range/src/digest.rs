//! SHA-1 password digests in the uppercase hex form the range API expects.

use std::fmt;
use std::str::FromStr;

use sha1::{Digest, Sha1};

use crate::error::Error;
use crate::{DIGEST_HEX_LEN, HEX_CHARS, PREFIX_LEN};

/// A SHA-1 digest rendered as 40 uppercase hex characters.
///
/// The hex is stored inline, so splitting into prefix and suffix never allocates.
/// Every constructor guarantees the buffer holds only `0-9A-F`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PasswordDigest([u8; DIGEST_HEX_LEN]);

impl PasswordDigest {
    /// Hashes a password with a single unsalted SHA-1 pass.
    ///
    /// This has to stay plain SHA-1: the service indexes its corpus by exactly
    /// this digest, so any stretching or salting would never match.
    pub fn of_password(password: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(password);
        let hash: [u8; 20] = hasher.finalize().into();
        Self::from_bytes(&hash)
    }

    /// Renders a raw 20-byte SHA-1 hash as uppercase hex.
    pub fn from_bytes(hash: &[u8; 20]) -> Self {
        let mut hex = [0u8; DIGEST_HEX_LEN];
        for (i, byte) in hash.iter().enumerate() {
            hex[i * 2] = HEX_CHARS[(byte >> 4) as usize];
            hex[i * 2 + 1] = HEX_CHARS[(byte & 0x0f) as usize];
        }
        Self(hex)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        // SAFETY: the buffer only ever holds ASCII hex digits.
        unsafe { std::str::from_utf8_unchecked(&self.0) }
    }

    /// The 5 character prefix, the only part of the digest that is ever sent.
    #[inline]
    pub fn prefix(&self) -> DigestPrefix {
        let mut prefix = [0u8; PREFIX_LEN];
        prefix.copy_from_slice(&self.0[..PREFIX_LEN]);
        DigestPrefix(prefix)
    }

    /// The remaining 35 characters, compared locally against the candidates.
    #[inline]
    pub fn suffix(&self) -> &str {
        &self.as_str()[PREFIX_LEN..]
    }

    #[inline]
    pub fn split(&self) -> (DigestPrefix, &str) {
        (self.prefix(), self.suffix())
    }
}

impl FromStr for PasswordDigest {
    type Err = Error;

    /// Parses a digest as stored in a hash file. Lowercase hex is accepted and
    /// normalized to uppercase; surrounding whitespace is not trimmed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != DIGEST_HEX_LEN {
            return Err(Error::InvalidDigest {
                input: s.to_string(),
                reason: format!("expected {} hex characters, got {}", DIGEST_HEX_LEN, bytes.len()),
            });
        }

        let mut hex = [0u8; DIGEST_HEX_LEN];
        for (i, &c) in bytes.iter().enumerate() {
            if !c.is_ascii_hexdigit() {
                return Err(Error::InvalidDigest {
                    input: s.to_string(),
                    reason: format!("non-hex character at position {}", i + 1),
                });
            }
            hex[i] = c.to_ascii_uppercase();
        }

        Ok(Self(hex))
    }
}

impl fmt::Display for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PasswordDigest").field(&self.as_str()).finish()
    }
}

/// The first 5 hex characters of a [`PasswordDigest`].
///
/// Only obtainable from a digest, so a prefix handed to a [`RangeQuery`](crate::RangeQuery)
/// is always well formed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DigestPrefix([u8; PREFIX_LEN]);

impl DigestPrefix {
    #[inline]
    pub fn as_str(&self) -> &str {
        // SAFETY: copied out of a PasswordDigest, which is ASCII hex.
        unsafe { std::str::from_utf8_unchecked(&self.0) }
    }
}

impl fmt::Display for DigestPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for DigestPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DigestPrefix").field(&self.as_str()).finish()
    }
}
