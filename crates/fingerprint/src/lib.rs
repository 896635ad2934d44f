//! Evaluation input fingerprints
//!
//! This crate computes a content fingerprint of the evaluation input so that callers can tell
//! whether previously stored results are stale.
//!
//! ## Design Principles
//!
//! - The fingerprint depends on content only, never on key insertion order
//! - Any content change yields a different fingerprint with overwhelming probability
//! - The crate holds no cache; comparing and storing fingerprints is the caller's job
//!
//! ## Canonical Form
//!
//! ```text
//! value ──serde──▶ JSON tree ──sort object keys (recursive)──▶ compact JSON bytes
//!       ──SHA-256──▶ 32 bytes ──hex──▶ 64 lowercase hex characters
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use std::collections::BTreeMap;
//! use tmd_fingerprint::Fingerprint;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut answers = BTreeMap::new();
//! answers.insert("SQ1", "yes");
//!
//! let stored = Fingerprint::of(&answers)?;
//! assert!(stored.matches(&answers)?);
//! # Ok(())
//! # }
//! ```

mod canonical;
mod fingerprint;

pub use canonical::{canonical_bytes, canonicalise};
pub use fingerprint::Fingerprint;

/// Errors that can occur while fingerprinting
#[derive(Debug, thiserror::Error)]
pub enum FingerprintError {
    /// The value could not be represented as JSON (for example a map with non-string keys)
    #[error("Serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),

    /// A stored fingerprint string is not 64 lowercase hex characters
    #[error("Invalid fingerprint: {0}")]
    InvalidFingerprint(String),
}

/// Result type for fingerprint operations.
pub type FingerprintResult<T> = Result<T, FingerprintError>;
