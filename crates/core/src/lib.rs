//! # TMD Core
//!
//! Diagnostic criteria evaluation engine for temporomandibular disorders.
//!
//! This crate turns a patient's symptom questionnaire answers and a clinician's examination
//! findings into a verdict per diagnosis:
//! - Question dependency resolution (which questionnaire items are live)
//! - Anamnesis screening per diagnosis
//! - Examination criteria per region and side, gated by the anamnesis
//! - Aggregation across locations and across the subtype hierarchy
//! - Static clinical context for each diagnosis
//!
//! Every operation is a pure function over its inputs and the static rule tables. Missing
//! data is reported as [`CriterionStatus::Pending`], never as an error.
//!
//! **No I/O concerns**: reading input files and printing reports belong in the `tmd` binary.

pub mod aggregate;
pub mod anamnesis;
pub mod config;
pub mod constants;
pub mod context;
pub mod diagnosis;
pub mod error;
pub mod evaluation;
pub mod location;
pub mod questionnaire;

pub use aggregate::{DiagnosisEvaluationResult, LocationResult};
pub use anamnesis::{evaluate_all_anamnesis, evaluate_anamnesis, AnamnesisSummary};
pub use config::{locale_from_env_value, CoreConfig, Locale};
pub use context::{context_for, get_context, ClinicalContext, ContextView, ValidityLevel};
pub use diagnosis::{definition, get_definition, Category, DiagnosisDefinition, DiagnosisId};
pub use error::{CoreError, CoreResult};
pub use evaluation::{evaluate, evaluate_diagnoses, evaluate_diagnosis, fingerprint, is_stale, Evaluation};
pub use location::evaluate_location;
pub use questionnaire::{is_enabled, is_reachable, live_answers};

pub use tmd_fingerprint::Fingerprint;
pub use tmd_forms::{AnswerSet, EvaluationInput, MeasurementSet};
pub use tmd_types::{CriterionStatus, Location, Region, Side};
