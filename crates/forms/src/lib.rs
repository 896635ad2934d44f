//! Boundary support for collected form data.
//!
//! The form-collection layer hands the engine two things: the symptom questionnaire answers and
//! the examination measurements. This crate defines those shapes and parses them strictly from
//! YAML (or JSON, which is a YAML subset), reporting the failing field path on mismatch.
//!
//! The engine itself never parses or validates input. Anything that reaches `tmd-core` has
//! already gone through [`EvaluationInput::parse`] or been built in code.

pub mod answers;
pub mod input;
pub mod measurements;

pub use answers::{AnswerSet, AnswerValue, Duration};
pub use input::EvaluationInput;
pub use measurements::{Finding, FindingScope, Findings, MeasurementSet, MeasurementValue};

// Re-export the shared value types used in measurement keys
pub use tmd_types::{Location, Region, Side};

/// Errors returned by the `tmd-forms` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum FormsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid YAML, or does not match the input schema. `path` is
    /// `<root>` when the failure is not tied to a field.
    #[error("schema mismatch at {path}: {message}")]
    Schema { path: String, message: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Type alias for Results that can fail with a [`FormsError`].
pub type FormsResult<T> = Result<T, FormsError>;
