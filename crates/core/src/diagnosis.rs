//! Diagnosis identifiers, definitions and the subtype hierarchy.
//!
//! Definitions are a flat registry. Which diagnoses are subtypes of which parent is kept in a
//! separate explicit mapping ([`SUBTYPES`]) so roll-up is a plain reduction over that table.

use crate::{CoreError, CoreResult};
use std::fmt;
use std::str::FromStr;
use tmd_types::Region;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosisId {
    LocalMyalgia,
    MyofascialPain,
    MyofascialPainWithReferral,
    Myalgia,
    Arthralgia,
    HeadacheAttributedToTmd,
    DiscDisplacementWithReduction,
    DiscDisplacementWithReductionIntermittentLocking,
    DiscDisplacementWithoutReductionLimitedOpening,
    DiscDisplacementWithoutReductionWithoutLimitedOpening,
    DegenerativeJointDisease,
    Subluxation,
}

impl DiagnosisId {
    /// Every diagnosis, in registry order. Subtypes come before their parent.
    pub const ALL: [DiagnosisId; 12] = [
        Self::LocalMyalgia,
        Self::MyofascialPain,
        Self::MyofascialPainWithReferral,
        Self::Myalgia,
        Self::Arthralgia,
        Self::HeadacheAttributedToTmd,
        Self::DiscDisplacementWithReduction,
        Self::DiscDisplacementWithReductionIntermittentLocking,
        Self::DiscDisplacementWithoutReductionLimitedOpening,
        Self::DiscDisplacementWithoutReductionWithoutLimitedOpening,
        Self::DegenerativeJointDisease,
        Self::Subluxation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Myalgia => "myalgia",
            Self::LocalMyalgia => "local_myalgia",
            Self::MyofascialPain => "myofascial_pain",
            Self::MyofascialPainWithReferral => "myofascial_pain_with_referral",
            Self::Arthralgia => "arthralgia",
            Self::HeadacheAttributedToTmd => "headache_attributed_to_tmd",
            Self::DiscDisplacementWithReduction => "disc_displacement_with_reduction",
            Self::DiscDisplacementWithReductionIntermittentLocking => {
                "disc_displacement_with_reduction_intermittent_locking"
            }
            Self::DiscDisplacementWithoutReductionLimitedOpening => {
                "disc_displacement_without_reduction_limited_opening"
            }
            Self::DiscDisplacementWithoutReductionWithoutLimitedOpening => {
                "disc_displacement_without_reduction_without_limited_opening"
            }
            Self::DegenerativeJointDisease => "degenerative_joint_disease",
            Self::Subluxation => "subluxation",
        }
    }

    /// Parses an identifier, returning `None` for anything unknown.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == id.trim())
    }
}

impl fmt::Display for DiagnosisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiagnosisId {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::from_id(s).ok_or_else(|| CoreError::UnknownDiagnosis(s.to_owned()))
    }
}

/// Diagnostic group, used to organise summaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    PainDisorder,
    Headache,
    JointDisorder,
}

/// What happens to location statuses while the anamnesis gate is not positive.
///
/// A pending anamnesis always keeps locations pending. The policies differ only when the
/// anamnesis is conclusively negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GatePolicy {
    /// A negative history rules the diagnosis out: locations are negative.
    ClosedWorld,
    /// The history can still be completed during the examination (for example the patient
    /// reports joint noise while it is being tested): locations stay pending.
    AwaitAnamnesis,
}

/// Static description of one diagnosis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct DiagnosisDefinition {
    pub id: DiagnosisId,
    pub display_name: &'static str,
    pub category: Category,
    /// Examination regions the diagnosis is evaluated at. Empty for history-only diagnoses.
    pub regions: &'static [Region],
    pub gate: GatePolicy,
    /// Examination sections to chart once the anamnesis is positive.
    pub examination_sections: &'static [&'static str],
}

impl DiagnosisDefinition {
    pub fn is_history_only(&self) -> bool {
        self.regions.is_empty()
    }
}

const MUSCLES: &[Region] = &[Region::Temporalis, Region::Masseter];
const JOINT: &[Region] = &[Region::Tmj];
const MUSCLE_PAIN_SECTIONS: &[&str] = &["E1", "E2", "E4", "E9"];
const JOINT_SECTIONS: &[&str] = &["E6", "E7", "E8"];
const CLOSED_LOCK_SECTIONS: &[&str] = &["E4", "E6", "E7", "E8"];

pub static DEFINITIONS: &[DiagnosisDefinition] = &[
    DiagnosisDefinition {
        id: DiagnosisId::LocalMyalgia,
        display_name: "Local myalgia",
        category: Category::PainDisorder,
        regions: MUSCLES,
        gate: GatePolicy::ClosedWorld,
        examination_sections: MUSCLE_PAIN_SECTIONS,
    },
    DiagnosisDefinition {
        id: DiagnosisId::MyofascialPain,
        display_name: "Myofascial pain",
        category: Category::PainDisorder,
        regions: MUSCLES,
        gate: GatePolicy::ClosedWorld,
        examination_sections: MUSCLE_PAIN_SECTIONS,
    },
    DiagnosisDefinition {
        id: DiagnosisId::MyofascialPainWithReferral,
        display_name: "Myofascial pain with referral",
        category: Category::PainDisorder,
        regions: MUSCLES,
        gate: GatePolicy::ClosedWorld,
        examination_sections: MUSCLE_PAIN_SECTIONS,
    },
    DiagnosisDefinition {
        id: DiagnosisId::Myalgia,
        display_name: "Myalgia",
        category: Category::PainDisorder,
        regions: MUSCLES,
        gate: GatePolicy::ClosedWorld,
        examination_sections: MUSCLE_PAIN_SECTIONS,
    },
    DiagnosisDefinition {
        id: DiagnosisId::Arthralgia,
        display_name: "Arthralgia",
        category: Category::PainDisorder,
        regions: JOINT,
        gate: GatePolicy::ClosedWorld,
        examination_sections: &["E1", "E4", "E5", "E9"],
    },
    DiagnosisDefinition {
        id: DiagnosisId::HeadacheAttributedToTmd,
        display_name: "Headache attributed to TMD",
        category: Category::Headache,
        regions: &[Region::Temporalis],
        gate: GatePolicy::ClosedWorld,
        examination_sections: &["E1", "E4", "E5", "E9"],
    },
    DiagnosisDefinition {
        id: DiagnosisId::DiscDisplacementWithReduction,
        display_name: "Disc displacement with reduction",
        category: Category::JointDisorder,
        regions: JOINT,
        gate: GatePolicy::AwaitAnamnesis,
        examination_sections: JOINT_SECTIONS,
    },
    DiagnosisDefinition {
        id: DiagnosisId::DiscDisplacementWithReductionIntermittentLocking,
        display_name: "Disc displacement with reduction, with intermittent locking",
        category: Category::JointDisorder,
        regions: JOINT,
        gate: GatePolicy::AwaitAnamnesis,
        examination_sections: JOINT_SECTIONS,
    },
    DiagnosisDefinition {
        id: DiagnosisId::DiscDisplacementWithoutReductionLimitedOpening,
        display_name: "Disc displacement without reduction, with limited opening",
        category: Category::JointDisorder,
        regions: JOINT,
        gate: GatePolicy::ClosedWorld,
        examination_sections: CLOSED_LOCK_SECTIONS,
    },
    DiagnosisDefinition {
        id: DiagnosisId::DiscDisplacementWithoutReductionWithoutLimitedOpening,
        display_name: "Disc displacement without reduction, without limited opening",
        category: Category::JointDisorder,
        regions: JOINT,
        gate: GatePolicy::ClosedWorld,
        examination_sections: CLOSED_LOCK_SECTIONS,
    },
    DiagnosisDefinition {
        id: DiagnosisId::DegenerativeJointDisease,
        display_name: "Degenerative joint disease",
        category: Category::JointDisorder,
        regions: JOINT,
        gate: GatePolicy::AwaitAnamnesis,
        examination_sections: JOINT_SECTIONS,
    },
    DiagnosisDefinition {
        id: DiagnosisId::Subluxation,
        display_name: "Subluxation",
        category: Category::JointDisorder,
        regions: &[],
        gate: GatePolicy::ClosedWorld,
        examination_sections: &["E8"],
    },
];

/// Parent diagnoses and their subtypes. One level only.
pub static SUBTYPES: &[(DiagnosisId, &[DiagnosisId])] = &[(
    DiagnosisId::Myalgia,
    &[
        DiagnosisId::LocalMyalgia,
        DiagnosisId::MyofascialPain,
        DiagnosisId::MyofascialPainWithReferral,
    ],
)];

/// Definition of a known diagnosis.
///
/// `DEFINITIONS` is laid out in `DiagnosisId` declaration order, so the discriminant indexes it.
pub fn definition(id: DiagnosisId) -> &'static DiagnosisDefinition {
    &DEFINITIONS[id as usize]
}

/// Definition lookup by raw identifier; `None` when no metadata is available.
pub fn get_definition(id: &str) -> Option<&'static DiagnosisDefinition> {
    DiagnosisId::from_id(id).map(definition)
}

/// Subtypes of `id`, empty when it is not a parent.
pub fn subtypes_of(id: DiagnosisId) -> &'static [DiagnosisId] {
    SUBTYPES
        .iter()
        .find(|(parent, _)| *parent == id)
        .map(|(_, children)| *children)
        .unwrap_or(&[])
}

pub fn parent_of(id: DiagnosisId) -> Option<DiagnosisId> {
    SUBTYPES
        .iter()
        .find(|(_, children)| children.contains(&id))
        .map(|(parent, _)| *parent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definitions_follow_declaration_order() {
        assert_eq!(DEFINITIONS.len(), DiagnosisId::ALL.len());
        for (index, id) in DiagnosisId::ALL.into_iter().enumerate() {
            assert_eq!(DEFINITIONS[index].id, id);
            assert_eq!(id as usize, index);
            assert_eq!(definition(id).id, id);
        }
    }

    #[test]
    fn identifiers_round_trip_through_text() {
        for id in DiagnosisId::ALL {
            assert_eq!(id.as_str().parse::<DiagnosisId>().unwrap(), id);
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }

    #[test]
    fn unknown_identifier_is_absent() {
        assert!(get_definition("bruxism").is_none());
        assert!(matches!(
            "bruxism".parse::<DiagnosisId>(),
            Err(CoreError::UnknownDiagnosis(id)) if id == "bruxism"
        ));
    }

    #[test]
    fn subtypes_precede_their_parent() {
        let position = |id| DiagnosisId::ALL.iter().position(|other| *other == id).unwrap();
        for (parent, children) in SUBTYPES {
            for child in *children {
                assert!(position(*child) < position(*parent), "{child} after {parent}");
            }
        }
    }

    #[test]
    fn joint_disorders_chart_joint_sections() {
        for def in DEFINITIONS {
            if def.category != Category::JointDisorder || def.is_history_only() {
                continue;
            }
            for section in ["E6", "E7", "E8"] {
                assert!(def.examination_sections.contains(&section), "{} lacks {section}", def.id);
            }
        }
        for id in [
            DiagnosisId::DiscDisplacementWithoutReductionLimitedOpening,
            DiagnosisId::DiscDisplacementWithoutReductionWithoutLimitedOpening,
        ] {
            assert_eq!(definition(id).examination_sections, &["E4", "E6", "E7", "E8"]);
        }
        assert_eq!(definition(DiagnosisId::Subluxation).examination_sections, &["E8"]);
    }

    #[test]
    fn hierarchy_is_one_level_deep() {
        for (parent, children) in SUBTYPES {
            assert!(parent_of(*parent).is_none());
            for child in *children {
                assert_eq!(parent_of(*child), Some(*parent));
                assert!(subtypes_of(*child).is_empty());
                assert_eq!(definition(*child).regions, definition(*parent).regions);
            }
        }
        assert_eq!(subtypes_of(DiagnosisId::Myalgia).len(), 3);
        assert!(subtypes_of(DiagnosisId::Arthralgia).is_empty());
    }

    #[test]
    fn subluxation_is_history_only() {
        assert!(definition(DiagnosisId::Subluxation).is_history_only());
        assert!(!definition(DiagnosisId::Arthralgia).is_history_only());
    }
}
