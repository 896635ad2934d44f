//! Location criteria: examination rules evaluated per region and side.
//!
//! Rules are expressions over recorded [`Finding`]s and are evaluated in three-valued logic.
//! A finding that was not recorded is unknown, and a location is only decided when the recorded
//! findings settle the rule regardless of the unknown ones. Anything else is pending.
//!
//! Every location-bearing diagnosis is gated by its anamnesis. While the gate is not positive
//! the rule is not consulted at all and the diagnosis's [`GatePolicy`] decides the status.

use crate::constants::LIMITED_OPENING_THRESHOLD_MM;
use crate::diagnosis::{definition, DiagnosisId, GatePolicy};
use tmd_forms::{Finding, MeasurementSet};
use tmd_types::{CriterionStatus, Location, Region, Side};

/// Examination rule expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Criterion {
    /// The finding was recorded as present.
    Present(Finding),
    /// The finding was recorded as absent.
    Absent(Finding),
    /// Millimetre measurement strictly below the threshold.
    Below(Finding, u32),
    /// Millimetre measurement at or above the threshold.
    AtLeast(Finding, u32),
    All(&'static [Criterion]),
    Any(&'static [Criterion]),
}

impl Criterion {
    /// Kleene evaluation. `None` means the recorded findings do not decide the rule.
    pub fn evaluate(&self, measurements: &MeasurementSet, location: Location) -> Option<bool> {
        match self {
            Self::Present(finding) => measurements
                .finding(location, *finding)
                .and_then(|value| value.as_flag()),
            Self::Absent(finding) => measurements
                .finding(location, *finding)
                .and_then(|value| value.as_flag())
                .map(|present| !present),
            Self::Below(finding, threshold) => measurements
                .finding(location, *finding)
                .and_then(|value| value.as_millimetres())
                .map(|mm| mm < *threshold),
            Self::AtLeast(finding, threshold) => measurements
                .finding(location, *finding)
                .and_then(|value| value.as_millimetres())
                .map(|mm| mm >= *threshold),
            Self::All(parts) => {
                let mut unknown = false;
                for part in *parts {
                    match part.evaluate(measurements, location) {
                        Some(false) => return Some(false),
                        Some(true) => {}
                        None => unknown = true,
                    }
                }
                (!unknown).then_some(true)
            }
            Self::Any(parts) => {
                let mut unknown = false;
                for part in *parts {
                    match part.evaluate(measurements, location) {
                        Some(true) => return Some(true),
                        Some(false) => {}
                        None => unknown = true,
                    }
                }
                (!unknown).then_some(false)
            }
        }
    }
}

use Criterion::{Absent, All, Any, AtLeast, Below, Present};

static MYALGIA: Criterion = All(&[
    Present(Finding::PainConfirmed),
    Any(&[
        Present(Finding::FamiliarPainPalpation),
        Present(Finding::FamiliarPainOpening),
    ]),
]);

static LOCAL_MYALGIA: Criterion = All(&[
    Present(Finding::PainConfirmed),
    Present(Finding::FamiliarPainPalpation),
    Absent(Finding::SpreadingPain),
    Absent(Finding::ReferredPain),
]);

static MYOFASCIAL_PAIN: Criterion = All(&[
    Present(Finding::PainConfirmed),
    Present(Finding::FamiliarPainPalpation),
    Present(Finding::SpreadingPain),
    Absent(Finding::ReferredPain),
]);

static MYOFASCIAL_PAIN_WITH_REFERRAL: Criterion = All(&[
    Present(Finding::PainConfirmed),
    Present(Finding::FamiliarPainPalpation),
    Present(Finding::ReferredPain),
]);

static ARTHRALGIA: Criterion = All(&[
    Present(Finding::PainConfirmed),
    Any(&[
        Present(Finding::FamiliarPainPalpation),
        Present(Finding::FamiliarPainOpening),
        Present(Finding::FamiliarPainMovement),
    ]),
]);

static HEADACHE: Criterion = All(&[
    Present(Finding::HeadacheConfirmed),
    Any(&[
        Present(Finding::FamiliarHeadachePalpation),
        Present(Finding::FamiliarHeadacheMovement),
    ]),
]);

static REDUCING_DISC_NOISE: Criterion = Any(&[
    Present(Finding::ClickOpenAndClose),
    All(&[
        Present(Finding::ClickOpenOrClose),
        Present(Finding::ClickLateralProtrusive),
    ]),
]);

static LIMITED_OPENING: Criterion = Below(Finding::AssistedOpeningMm, LIMITED_OPENING_THRESHOLD_MM);

static UNLIMITED_OPENING: Criterion =
    AtLeast(Finding::AssistedOpeningMm, LIMITED_OPENING_THRESHOLD_MM);

static CREPITUS: Criterion = Present(Finding::Crepitus);

/// Examination rule for a diagnosis; `None` for history-only diagnoses.
pub fn location_rule(id: DiagnosisId) -> Option<&'static Criterion> {
    match id {
        DiagnosisId::Myalgia => Some(&MYALGIA),
        DiagnosisId::LocalMyalgia => Some(&LOCAL_MYALGIA),
        DiagnosisId::MyofascialPain => Some(&MYOFASCIAL_PAIN),
        DiagnosisId::MyofascialPainWithReferral => Some(&MYOFASCIAL_PAIN_WITH_REFERRAL),
        DiagnosisId::Arthralgia => Some(&ARTHRALGIA),
        DiagnosisId::HeadacheAttributedToTmd => Some(&HEADACHE),
        DiagnosisId::DiscDisplacementWithReduction
        | DiagnosisId::DiscDisplacementWithReductionIntermittentLocking => {
            Some(&REDUCING_DISC_NOISE)
        }
        DiagnosisId::DiscDisplacementWithoutReductionLimitedOpening => Some(&LIMITED_OPENING),
        DiagnosisId::DiscDisplacementWithoutReductionWithoutLimitedOpening => {
            Some(&UNLIMITED_OPENING)
        }
        DiagnosisId::DegenerativeJointDisease => Some(&CREPITUS),
        DiagnosisId::Subluxation => None,
    }
}

/// Evaluates one diagnosis at one region and side.
///
/// - Regions the diagnosis is not evaluated at are negative.
/// - History-only diagnoses mirror the anamnesis status.
/// - A non-positive anamnesis is resolved by the diagnosis's gate policy.
pub fn evaluate_location(
    id: DiagnosisId,
    region: Region,
    side: Side,
    measurements: &MeasurementSet,
    anamnesis: CriterionStatus,
) -> CriterionStatus {
    let def = definition(id);
    let Some(rule) = location_rule(id) else {
        return anamnesis;
    };

    if !def.regions.contains(&region) {
        return CriterionStatus::Negative;
    }

    let status = match (anamnesis, def.gate) {
        (CriterionStatus::Positive, _) => {
            CriterionStatus::from_truth(rule.evaluate(measurements, Location::new(region, side)))
        }
        (CriterionStatus::Pending, _) => CriterionStatus::Pending,
        (CriterionStatus::Negative, GatePolicy::ClosedWorld) => CriterionStatus::Negative,
        (CriterionStatus::Negative, GatePolicy::AwaitAnamnesis) => CriterionStatus::Pending,
    };

    tracing::trace!(diagnosis = %id, %region, %side, %anamnesis, %status, "location evaluated");
    status
}

/// Every (region, side) a diagnosis is evaluated at, in region then side order.
pub fn locations_for(id: DiagnosisId) -> impl Iterator<Item = Location> {
    definition(id)
        .regions
        .iter()
        .flat_map(|region| Side::ALL.into_iter().map(move |side| Location::new(*region, side)))
}
