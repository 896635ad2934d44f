//! Content fingerprint type.
//!
//! A [`Fingerprint`] is the SHA-256 digest of a value's canonical bytes, rendered as 64
//! lowercase hexadecimal characters. Once constructed it is guaranteed to be in that form, so
//! a stored fingerprint read back from persistence can be compared byte-for-byte.

use crate::canonical::canonical_bytes;
use crate::{FingerprintError, FingerprintResult};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Length of a rendered fingerprint in characters.
const HEX_LEN: usize = 64;

/// Canonical SHA-256 content fingerprint.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprints any serialisable value.
    ///
    /// # Errors
    ///
    /// Returns [`FingerprintError::Serialisation`] if the value cannot be represented as JSON.
    pub fn of<T: Serialize + ?Sized>(value: &T) -> FingerprintResult<Self> {
        let bytes = canonical_bytes(value)?;
        let fingerprint = Self::from_bytes(&bytes);
        tracing::trace!(fingerprint = %fingerprint, len = bytes.len(), "computed fingerprint");
        Ok(fingerprint)
    }

    /// Hashes raw bytes that are already in canonical form.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let digest: [u8; 32] = hasher.finalize().into();
        Self(hex::encode(digest))
    }

    /// Validates a previously rendered fingerprint, for example one read from storage.
    ///
    /// Uppercase or otherwise non-canonical renderings are rejected rather than normalised.
    pub fn parse(input: &str) -> FingerprintResult<Self> {
        if Self::is_canonical(input) {
            return Ok(Self(input.to_owned()));
        }
        Err(FingerprintError::InvalidFingerprint(format!(
            "expected {HEX_LEN} lowercase hex characters, got: '{input}'"
        )))
    }

    /// Returns true if `input` is exactly 64 lowercase hex characters.
    pub fn is_canonical(input: &str) -> bool {
        input.len() == HEX_LEN
            && input
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }

    /// Whether `value` still has this fingerprint, i.e. results computed for it are fresh.
    pub fn matches<T: Serialize + ?Sized>(&self, value: &T) -> FingerprintResult<bool> {
        Ok(Self::of(value)? == *self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Fingerprint {
    type Err = FingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for Fingerprint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Fingerprint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Fingerprint::parse(&s).map_err(serde::de::Error::custom)
    }
}
