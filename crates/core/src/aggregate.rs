//! Diagnosis aggregation: merging anamnesis and location statuses into one verdict.

use crate::diagnosis::{definition, DiagnosisId};
use crate::location::locations_for;
use serde::Serialize;
use tmd_types::{CriterionStatus, Location, Region, Side};

/// Status of one diagnosis at one (region, side).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LocationResult {
    pub region: Region,
    pub side: Side,
    pub status: CriterionStatus,
}

impl LocationResult {
    pub fn new(location: Location, status: CriterionStatus) -> Self {
        Self {
            region: location.region,
            side: location.side,
            status,
        }
    }

    pub fn location(&self) -> Location {
        Location::new(self.region, self.side)
    }
}

/// Final verdict for one diagnosis.
///
/// Fields are read-only: `positive_locations` is derived from `location_results` on
/// construction and cannot diverge from it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosisEvaluationResult {
    diagnosis_id: DiagnosisId,
    status: CriterionStatus,
    anamnesis_status: CriterionStatus,
    location_results: Vec<LocationResult>,
    positive_locations: Vec<Location>,
}

impl DiagnosisEvaluationResult {
    fn new(
        diagnosis_id: DiagnosisId,
        status: CriterionStatus,
        anamnesis_status: CriterionStatus,
        location_results: Vec<LocationResult>,
    ) -> Self {
        let positive_locations = location_results
            .iter()
            .filter(|result| result.status.is_positive())
            .map(LocationResult::location)
            .collect();

        Self {
            diagnosis_id,
            status,
            anamnesis_status,
            location_results,
            positive_locations,
        }
    }

    pub fn diagnosis_id(&self) -> DiagnosisId {
        self.diagnosis_id
    }

    pub fn status(&self) -> CriterionStatus {
        self.status
    }

    pub fn anamnesis_status(&self) -> CriterionStatus {
        self.anamnesis_status
    }

    pub fn location_results(&self) -> &[LocationResult] {
        &self.location_results
    }

    pub fn positive_locations(&self) -> &[Location] {
        &self.positive_locations
    }
}

/// Any-positive roll-up: positive if any is positive, else pending if any is pending, else
/// negative. An empty input is negative.
pub fn rollup(statuses: impl IntoIterator<Item = CriterionStatus>) -> CriterionStatus {
    let mut pending = false;
    for status in statuses {
        match status {
            CriterionStatus::Positive => return CriterionStatus::Positive,
            CriterionStatus::Pending => pending = true,
            CriterionStatus::Negative => {}
        }
    }

    if pending {
        CriterionStatus::Pending
    } else {
        CriterionStatus::Negative
    }
}

/// Aggregates a diagnosis without subtypes.
///
/// History-only diagnoses take the anamnesis status. Otherwise the diagnosis is positive if
/// any location is positive, pending if some location is pending and the anamnesis is not
/// conclusively negative, and negative in every other case.
pub fn aggregate(
    diagnosis_id: DiagnosisId,
    anamnesis_status: CriterionStatus,
    location_results: Vec<LocationResult>,
) -> DiagnosisEvaluationResult {
    let status = if definition(diagnosis_id).is_history_only() {
        anamnesis_status
    } else {
        match rollup(location_results.iter().map(|result| result.status)) {
            CriterionStatus::Pending if anamnesis_status == CriterionStatus::Negative => {
                CriterionStatus::Negative
            }
            other => other,
        }
    };

    tracing::debug!(diagnosis = %diagnosis_id, %anamnesis_status, %status, "diagnosis aggregated");
    DiagnosisEvaluationResult::new(diagnosis_id, status, anamnesis_status, location_results)
}

/// Aggregates a parent diagnosis from its subtypes' results.
///
/// The parent is positive iff at least one subtype is positive. Its location results are the
/// per-location roll-up of the subtype location results, so its positive locations are exactly
/// the locations where some subtype is positive.
pub fn aggregate_with_subtypes(
    parent: DiagnosisId,
    anamnesis_status: CriterionStatus,
    subtype_results: &[DiagnosisEvaluationResult],
) -> DiagnosisEvaluationResult {
    let location_results = locations_for(parent)
        .map(|location| {
            let status = rollup(subtype_results.iter().flat_map(|subtype| {
                subtype
                    .location_results()
                    .iter()
                    .filter(move |result| result.location() == location)
                    .map(|result| result.status)
            }));
            LocationResult::new(location, status)
        })
        .collect();

    let status = rollup(subtype_results.iter().map(DiagnosisEvaluationResult::status));

    tracing::debug!(
        diagnosis = %parent,
        subtypes = subtype_results.len(),
        %status,
        "parent diagnosis rolled up"
    );
    DiagnosisEvaluationResult::new(parent, status, anamnesis_status, location_results)
}
