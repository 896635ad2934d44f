//! Evaluation pipeline: resolver, anamnesis, locations and aggregation for every diagnosis.

use crate::aggregate::{aggregate, aggregate_with_subtypes, DiagnosisEvaluationResult, LocationResult};
use crate::anamnesis;
use crate::diagnosis::{subtypes_of, DiagnosisId};
use crate::error::CoreResult;
use crate::location::{evaluate_location, locations_for};
use crate::questionnaire::live_answers;
use serde::Serialize;
use tmd_fingerprint::Fingerprint;
use tmd_forms::{AnswerSet, EvaluationInput, MeasurementSet};

/// Results for one evaluation input, with the fingerprint of that input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub fingerprint: Fingerprint,
    pub results: Vec<DiagnosisEvaluationResult>,
}

impl Evaluation {
    pub fn result(&self, id: DiagnosisId) -> Option<&DiagnosisEvaluationResult> {
        self.results.iter().find(|result| result.diagnosis_id() == id)
    }

    /// Diagnoses whose overall status is positive, in registry order.
    pub fn positive(&self) -> impl Iterator<Item = &DiagnosisEvaluationResult> {
        self.results.iter().filter(|result| result.status().is_positive())
    }
}

/// Evaluates every diagnosis for the input and fingerprints it.
pub fn evaluate(input: &EvaluationInput) -> CoreResult<Evaluation> {
    let fingerprint = fingerprint(input)?;
    let results = evaluate_diagnoses(&input.answers, &input.measurements);

    tracing::info!(
        %fingerprint,
        positive = results.iter().filter(|r| r.status().is_positive()).count(),
        pending = results.iter().filter(|r| r.status().is_pending()).count(),
        "evaluation complete"
    );
    Ok(Evaluation {
        fingerprint,
        results,
    })
}

/// Evaluates every diagnosis, in registry order.
///
/// Subtypes are registered before their parent, so a parent is rolled up from the results
/// already computed in this pass.
pub fn evaluate_diagnoses(
    answers: &AnswerSet,
    measurements: &MeasurementSet,
) -> Vec<DiagnosisEvaluationResult> {
    let live = live_answers(answers);
    let mut results: Vec<DiagnosisEvaluationResult> = Vec::with_capacity(DiagnosisId::ALL.len());

    for id in DiagnosisId::ALL {
        let subtypes = subtypes_of(id);
        let result = if subtypes.is_empty() {
            evaluate_leaf(id, &live, measurements)
        } else {
            let subtype_results: Vec<_> = results
                .iter()
                .filter(|result| subtypes.contains(&result.diagnosis_id()))
                .cloned()
                .collect();
            aggregate_with_subtypes(id, anamnesis::evaluate_live(id, &live), &subtype_results)
        };
        results.push(result);
    }

    results
}

/// Evaluates a single diagnosis. Parents are rolled up from their subtypes.
pub fn evaluate_diagnosis(
    id: DiagnosisId,
    answers: &AnswerSet,
    measurements: &MeasurementSet,
) -> DiagnosisEvaluationResult {
    evaluate_with_live(id, &live_answers(answers), measurements)
}

fn evaluate_with_live(
    id: DiagnosisId,
    live: &AnswerSet,
    measurements: &MeasurementSet,
) -> DiagnosisEvaluationResult {
    let subtypes = subtypes_of(id);
    if subtypes.is_empty() {
        return evaluate_leaf(id, live, measurements);
    }

    let subtype_results: Vec<_> = subtypes
        .iter()
        .map(|subtype| evaluate_with_live(*subtype, live, measurements))
        .collect();
    aggregate_with_subtypes(id, anamnesis::evaluate_live(id, live), &subtype_results)
}

fn evaluate_leaf(
    id: DiagnosisId,
    live: &AnswerSet,
    measurements: &MeasurementSet,
) -> DiagnosisEvaluationResult {
    let anamnesis_status = anamnesis::evaluate_live(id, live);
    let location_results = locations_for(id)
        .map(|location| {
            let status = evaluate_location(
                id,
                location.region,
                location.side,
                measurements,
                anamnesis_status,
            );
            LocationResult::new(location, status)
        })
        .collect();

    aggregate(id, anamnesis_status, location_results)
}

/// Content fingerprint of an evaluation input.
pub fn fingerprint(input: &EvaluationInput) -> CoreResult<Fingerprint> {
    Ok(Fingerprint::of(input)?)
}

/// Whether results stored under `stored` are out of date for `input`.
pub fn is_stale(input: &EvaluationInput, stored: &Fingerprint) -> CoreResult<bool> {
    let stale = !stored.matches(input)?;
    if stale {
        tracing::debug!(%stored, "stored results are stale");
    }
    Ok(stale)
}
