//! Examination measurements.
//!
//! Findings are recorded per examination site (region and side) with a small number of global
//! measurements such as the maximum assisted opening, which belongs to the whole jaw rather than
//! to one joint.
//!
//! ```yaml
//! global:
//!   assisted_opening_mm: 36
//! sites:
//!   tmj:
//!     left:
//!       click_open_and_close: true
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tmd_types::{Location, Region, Side};

/// Where a finding is recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FindingScope {
    Site,
    Global,
}

/// A single examination finding.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Finding {
    /// Examiner confirmed the patient's pain location in this region.
    PainConfirmed,
    /// Examiner confirmed the patient's headache location in this region.
    HeadacheConfirmed,
    FamiliarPainPalpation,
    /// Familiar pain on maximum unassisted or assisted opening.
    FamiliarPainOpening,
    /// Familiar pain on lateral or protrusive movements.
    FamiliarPainMovement,
    FamiliarHeadachePalpation,
    /// Familiar headache on opening, lateral or protrusive movements.
    FamiliarHeadacheMovement,
    /// Pain spreading beyond the palpation site but within the muscle boundary.
    SpreadingPain,
    /// Pain referred beyond the boundary of the palpated muscle.
    ReferredPain,
    ClickOpenAndClose,
    ClickOpenOrClose,
    ClickLateralProtrusive,
    Crepitus,
    /// Maximum assisted opening including vertical incisal overlap, in millimetres.
    AssistedOpeningMm,
}

impl Finding {
    pub fn scope(self) -> FindingScope {
        match self {
            Self::AssistedOpeningMm => FindingScope::Global,
            _ => FindingScope::Site,
        }
    }
}

/// Recorded value of a finding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MeasurementValue {
    Flag(bool),
    Millimetres(u32),
}

impl MeasurementValue {
    pub fn as_flag(self) -> Option<bool> {
        match self {
            Self::Flag(flag) => Some(flag),
            Self::Millimetres(_) => None,
        }
    }

    pub fn as_millimetres(self) -> Option<u32> {
        match self {
            Self::Millimetres(mm) => Some(mm),
            Self::Flag(_) => None,
        }
    }
}

impl From<bool> for MeasurementValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<u32> for MeasurementValue {
    fn from(value: u32) -> Self {
        Self::Millimetres(value)
    }
}

/// Findings recorded at one site (or globally).
pub type Findings = BTreeMap<Finding, MeasurementValue>;

/// All examination measurements for one patient encounter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeasurementSet {
    #[serde(default)]
    global: Findings,
    #[serde(default)]
    sites: BTreeMap<Region, BTreeMap<Side, Findings>>,
}

impl MeasurementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a finding. Global findings ignore `location`.
    pub fn record(&mut self, location: Location, finding: Finding, value: impl Into<MeasurementValue>) {
        let value = value.into();
        match finding.scope() {
            FindingScope::Global => {
                self.global.insert(finding, value);
            }
            FindingScope::Site => {
                self.sites
                    .entry(location.region)
                    .or_default()
                    .entry(location.side)
                    .or_default()
                    .insert(finding, value);
            }
        }
    }

    /// Builder-style [`record`](Self::record).
    pub fn with(mut self, location: Location, finding: Finding, value: impl Into<MeasurementValue>) -> Self {
        self.record(location, finding, value);
        self
    }

    /// Looks up a finding for a location, resolving global findings from the global scope.
    pub fn finding(&self, location: Location, finding: Finding) -> Option<MeasurementValue> {
        match finding.scope() {
            FindingScope::Global => self.global.get(&finding).copied(),
            FindingScope::Site => self
                .site(location)
                .and_then(|findings| findings.get(&finding))
                .copied(),
        }
    }

    pub fn site(&self, location: Location) -> Option<&Findings> {
        self.sites
            .get(&location.region)
            .and_then(|sides| sides.get(&location.side))
    }

    pub fn global(&self) -> &Findings {
        &self.global
    }

    /// Iterates every recorded site in region then side order.
    pub fn sites(&self) -> impl Iterator<Item = (Location, &Findings)> {
        self.sites.iter().flat_map(|(region, sides)| {
            sides
                .iter()
                .map(move |(side, findings)| (Location::new(*region, *side), findings))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.sites().all(|(_, findings)| findings.is_empty())
    }
}
