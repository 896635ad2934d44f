//! Error types for the engine crate.
//!
//! Evaluation itself is total and never fails. Errors come from parsing identifiers and
//! configuration values, and from fingerprinting an input.

/// Errors returned by `tmd-core`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A diagnosis identifier that is not in the registry.
    #[error("unknown diagnosis: {0}")]
    UnknownDiagnosis(String),
    /// A locale code other than the supported languages.
    #[error("unknown locale: {0}")]
    UnknownLocale(String),

    #[error("fingerprint error: {0}")]
    Fingerprint(#[from] tmd_fingerprint::FingerprintError),
}

/// Type alias for Results that can fail with a [`CoreError`].
pub type CoreResult<T> = std::result::Result<T, CoreError>;
