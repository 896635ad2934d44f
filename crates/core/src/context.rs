//! Clinical context registry.
//!
//! Static, read-only metadata for each diagnosis: classification code, descriptive text,
//! published validity and imaging guidance. The registry is built once on first use and never
//! mutated afterwards.
//!
//! Lookups by raw identifier return `None` for unknown diagnoses. Callers probe this metadata
//! optionally and treat absence as "nothing to show".

use crate::config::Locale;
use crate::diagnosis::{definition, DiagnosisId};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Text available in every supported locale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Localized {
    pub en: &'static str,
    pub de: &'static str,
}

impl Localized {
    pub fn get(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.en,
            Locale::De => self.de,
        }
    }
}

/// Strength of the published evidence for a diagnosis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidityLevel {
    /// Sensitivity and specificity both meet the target for a definitive diagnosis.
    Definitive,
    /// Usable clinically, but imaging is needed for a definitive diagnosis.
    Provisional,
    /// No criterion validity established.
    ContentValidityOnly,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DiagnosticValidity {
    pub level: ValidityLevel,
    pub statement: Localized,
    pub sensitivity: Option<f64>,
    pub specificity: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ClinicalContext {
    pub diagnosis_id: DiagnosisId,
    /// ICD-10 code.
    pub icd_code: &'static str,
    pub description: Localized,
    pub validity: DiagnosticValidity,
    pub imaging_recommendation: Option<Localized>,
    pub comments: &'static [&'static str],
}

/// A [`ClinicalContext`] with its text resolved for one locale, ready for rendering.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContextView {
    pub diagnosis_id: DiagnosisId,
    pub display_name: &'static str,
    pub icd_code: &'static str,
    pub description: &'static str,
    pub validity_level: ValidityLevel,
    pub validity_statement: &'static str,
    pub sensitivity: Option<f64>,
    pub specificity: Option<f64>,
    pub imaging_recommendation: Option<&'static str>,
    pub comments: &'static [&'static str],
}

impl ClinicalContext {
    pub fn view(&self, locale: Locale) -> ContextView {
        ContextView {
            diagnosis_id: self.diagnosis_id,
            display_name: definition(self.diagnosis_id).display_name,
            icd_code: self.icd_code,
            description: self.description.get(locale),
            validity_level: self.validity.level,
            validity_statement: self.validity.statement.get(locale),
            sensitivity: self.validity.sensitivity,
            specificity: self.validity.specificity,
            imaging_recommendation: self.imaging_recommendation.map(|text| text.get(locale)),
            comments: self.comments,
        }
    }
}

const CONTENT_VALIDITY_ONLY: Localized = Localized {
    en: "Sensitivity and specificity have not been established; the diagnosis has content validity only.",
    de: "Sensitivität und Spezifität sind nicht bestimmt; die Diagnose besitzt nur Inhaltsvalidität.",
};

const MRI_REFERENCE: Localized = Localized {
    en: "MRI is the reference standard when confirmation of the disc position is needed.",
    de: "Die MRT ist Referenzstandard, wenn die Diskusposition bestätigt werden muss.",
};

const MUSCLE_PAIN_COMMENTS: &[&str] = &[
    "The pain is not better accounted for by another pain diagnosis.",
    "The subtype is determined by the 5-second palpation of the masseter and temporalis.",
];

static CONTEXTS: [ClinicalContext; 12] = [
    ClinicalContext {
        diagnosis_id: DiagnosisId::Myalgia,
        icd_code: "M79.1",
        description: Localized {
            en: "Pain of muscle origin that is affected by jaw movement, function or parafunction, and is replicated by provocation testing of the masticatory muscles.",
            de: "Schmerz muskulären Ursprungs, der durch Kieferbewegung, Funktion oder Parafunktion beeinflusst wird und bei Provokationstests der Kaumuskulatur reproduzierbar ist.",
        },
        validity: DiagnosticValidity {
            level: ValidityLevel::Definitive,
            statement: Localized {
                en: "Sensitivity 0.90 and specificity 0.99 for myalgia including its subtypes.",
                de: "Sensitivität 0,90 und Spezifität 0,99 für Myalgie einschließlich ihrer Subtypen.",
            },
            sensitivity: Some(0.90),
            specificity: Some(0.99),
        },
        imaging_recommendation: None,
        comments: MUSCLE_PAIN_COMMENTS,
    },
    ClinicalContext {
        diagnosis_id: DiagnosisId::LocalMyalgia,
        icd_code: "M79.1",
        description: Localized {
            en: "Myalgia with pain localised to the immediate site of palpation.",
            de: "Myalgie mit auf die unmittelbare Palpationsstelle begrenztem Schmerz.",
        },
        validity: DiagnosticValidity {
            level: ValidityLevel::ContentValidityOnly,
            statement: CONTENT_VALIDITY_ONLY,
            sensitivity: None,
            specificity: None,
        },
        imaging_recommendation: None,
        comments: MUSCLE_PAIN_COMMENTS,
    },
    ClinicalContext {
        diagnosis_id: DiagnosisId::MyofascialPain,
        icd_code: "M79.1",
        description: Localized {
            en: "Myalgia with pain spreading beyond the site of palpation but within the boundary of the muscle.",
            de: "Myalgie mit Schmerzausbreitung über die Palpationsstelle hinaus, jedoch innerhalb der Muskelgrenzen.",
        },
        validity: DiagnosticValidity {
            level: ValidityLevel::ContentValidityOnly,
            statement: CONTENT_VALIDITY_ONLY,
            sensitivity: None,
            specificity: None,
        },
        imaging_recommendation: None,
        comments: MUSCLE_PAIN_COMMENTS,
    },
    ClinicalContext {
        diagnosis_id: DiagnosisId::MyofascialPainWithReferral,
        icd_code: "M79.1",
        description: Localized {
            en: "Myalgia with pain referred beyond the boundary of the palpated muscle.",
            de: "Myalgie mit Schmerzübertragung über die Grenzen des palpierten Muskels hinaus.",
        },
        validity: DiagnosticValidity {
            level: ValidityLevel::Definitive,
            statement: Localized {
                en: "Sensitivity 0.86 and specificity 0.98.",
                de: "Sensitivität 0,86 und Spezifität 0,98.",
            },
            sensitivity: Some(0.86),
            specificity: Some(0.98),
        },
        imaging_recommendation: None,
        comments: MUSCLE_PAIN_COMMENTS,
    },
    ClinicalContext {
        diagnosis_id: DiagnosisId::Arthralgia,
        icd_code: "M26.62",
        description: Localized {
            en: "Pain of joint origin that is affected by jaw movement, function or parafunction, and is replicated by provocation testing of the TMJ.",
            de: "Schmerz des Kiefergelenks, der durch Kieferbewegung, Funktion oder Parafunktion beeinflusst wird und bei Provokationstests des Kiefergelenks reproduzierbar ist.",
        },
        validity: DiagnosticValidity {
            level: ValidityLevel::Definitive,
            statement: Localized {
                en: "Sensitivity 0.89 and specificity 0.98.",
                de: "Sensitivität 0,89 und Spezifität 0,98.",
            },
            sensitivity: Some(0.89),
            specificity: Some(0.98),
        },
        imaging_recommendation: None,
        comments: &["The pain is not better accounted for by another pain diagnosis."],
    },
    ClinicalContext {
        diagnosis_id: DiagnosisId::HeadacheAttributedToTmd,
        icd_code: "G44.89",
        description: Localized {
            en: "Headache in the temple area secondary to pain-related TMD that is affected by jaw movement, function or parafunction.",
            de: "Kopfschmerz im Schläfenbereich infolge einer schmerzhaften CMD, der durch Kieferbewegung, Funktion oder Parafunktion beeinflusst wird.",
        },
        validity: DiagnosticValidity {
            level: ValidityLevel::Definitive,
            statement: Localized {
                en: "Sensitivity 0.89 and specificity 0.87.",
                de: "Sensitivität 0,89 und Spezifität 0,87.",
            },
            sensitivity: Some(0.89),
            specificity: Some(0.87),
        },
        imaging_recommendation: None,
        comments: &[
            "A diagnosis of myalgia or arthralgia should also be present.",
            "The headache is not better accounted for by another headache diagnosis.",
        ],
    },
    ClinicalContext {
        diagnosis_id: DiagnosisId::DiscDisplacementWithReduction,
        icd_code: "M26.63",
        description: Localized {
            en: "Intracapsular disorder in which the disc lies anterior to the condylar head with the mouth closed and reduces on opening.",
            de: "Intrakapsuläre Störung, bei der der Diskus bei geschlossenem Mund vor dem Kondylus liegt und bei Mundöffnung reponiert.",
        },
        validity: DiagnosticValidity {
            level: ValidityLevel::Provisional,
            statement: Localized {
                en: "Sensitivity 0.34 and specificity 0.92 without imaging.",
                de: "Sensitivität 0,34 und Spezifität 0,92 ohne Bildgebung.",
            },
            sensitivity: Some(0.34),
            specificity: Some(0.92),
        },
        imaging_recommendation: Some(MRI_REFERENCE),
        comments: &["Noise reported by the patient during the examination satisfies the history."],
    },
    ClinicalContext {
        diagnosis_id: DiagnosisId::DiscDisplacementWithReductionIntermittentLocking,
        icd_code: "M26.63",
        description: Localized {
            en: "Disc displacement with reduction in which the disc intermittently fails to reduce, causing episodes of limited opening.",
            de: "Diskusverlagerung mit Reposition, bei der die Reposition zeitweise ausbleibt und Episoden eingeschränkter Mundöffnung auftreten.",
        },
        validity: DiagnosticValidity {
            level: ValidityLevel::Provisional,
            statement: Localized {
                en: "Sensitivity 0.38 and specificity 0.98 without imaging.",
                de: "Sensitivität 0,38 und Spezifität 0,98 ohne Bildgebung.",
            },
            sensitivity: Some(0.38),
            specificity: Some(0.98),
        },
        imaging_recommendation: Some(MRI_REFERENCE),
        comments: &["If locked during the examination, limited opening that a manoeuvre reduces confirms the diagnosis."],
    },
    ClinicalContext {
        diagnosis_id: DiagnosisId::DiscDisplacementWithoutReductionLimitedOpening,
        icd_code: "M26.63",
        description: Localized {
            en: "The disc is displaced and does not reduce on opening; opening is limited (closed lock).",
            de: "Der Diskus ist verlagert und reponiert bei Mundöffnung nicht; die Mundöffnung ist eingeschränkt.",
        },
        validity: DiagnosticValidity {
            level: ValidityLevel::Definitive,
            statement: Localized {
                en: "Sensitivity 0.80 and specificity 0.97 without imaging.",
                de: "Sensitivität 0,80 und Spezifität 0,97 ohne Bildgebung.",
            },
            sensitivity: Some(0.80),
            specificity: Some(0.97),
        },
        imaging_recommendation: None,
        comments: &["Maximum assisted opening is below 40 mm including vertical incisal overlap."],
    },
    ClinicalContext {
        diagnosis_id: DiagnosisId::DiscDisplacementWithoutReductionWithoutLimitedOpening,
        icd_code: "M26.63",
        description: Localized {
            en: "The disc is displaced and does not reduce on opening; opening is not limited.",
            de: "Der Diskus ist verlagert und reponiert bei Mundöffnung nicht; die Mundöffnung ist nicht eingeschränkt.",
        },
        validity: DiagnosticValidity {
            level: ValidityLevel::Provisional,
            statement: Localized {
                en: "Sensitivity 0.54 and specificity 0.79 without imaging.",
                de: "Sensitivität 0,54 und Spezifität 0,79 ohne Bildgebung.",
            },
            sensitivity: Some(0.54),
            specificity: Some(0.79),
        },
        imaging_recommendation: Some(MRI_REFERENCE),
        comments: &["Maximum assisted opening is 40 mm or more including vertical incisal overlap."],
    },
    ClinicalContext {
        diagnosis_id: DiagnosisId::DegenerativeJointDisease,
        icd_code: "M26.69",
        description: Localized {
            en: "Degenerative disorder of the joint with deterioration of articular tissue and osseous changes in the condyle or articular eminence.",
            de: "Degenerative Gelenkerkrankung mit Abbau des Gelenkgewebes und knöchernen Veränderungen an Kondylus oder Tuberculum articulare.",
        },
        validity: DiagnosticValidity {
            level: ValidityLevel::Provisional,
            statement: Localized {
                en: "Sensitivity 0.55 and specificity 0.61 without imaging.",
                de: "Sensitivität 0,55 und Spezifität 0,61 ohne Bildgebung.",
            },
            sensitivity: Some(0.55),
            specificity: Some(0.61),
        },
        imaging_recommendation: Some(Localized {
            en: "CT or CBCT is the reference standard for osseous changes.",
            de: "CT oder DVT ist Referenzstandard für knöcherne Veränderungen.",
        }),
        comments: &["Crepitus reported by the patient during the examination satisfies the history."],
    },
    ClinicalContext {
        diagnosis_id: DiagnosisId::Subluxation,
        icd_code: "S03.0",
        description: Localized {
            en: "Hypermobility disorder in which the disc-condyle complex sits anterior to the articular eminence and cannot return to the closed position without a manoeuvre.",
            de: "Hypermobilitätsstörung, bei der der Diskus-Kondylus-Komplex vor dem Tuberculum articulare steht und ohne Manöver nicht in die Schlussstellung zurückkehrt.",
        },
        validity: DiagnosticValidity {
            level: ValidityLevel::Definitive,
            statement: Localized {
                en: "Sensitivity 0.98 and specificity 1.00 from history alone.",
                de: "Sensitivität 0,98 und Spezifität 1,00 allein aus der Anamnese.",
            },
            sensitivity: Some(0.98),
            specificity: Some(1.00),
        },
        imaging_recommendation: None,
        comments: &["If present during the examination, inability to close without a manoeuvre confirms it."],
    },
];

static REGISTRY: LazyLock<BTreeMap<DiagnosisId, ClinicalContext>> = LazyLock::new(|| {
    CONTEXTS
        .iter()
        .map(|context| (context.diagnosis_id, *context))
        .collect()
});

/// Clinical context for a diagnosis.
pub fn get_context(id: DiagnosisId) -> Option<&'static ClinicalContext> {
    REGISTRY.get(&id)
}

/// Clinical context lookup by raw identifier; `None` for unknown identifiers.
pub fn context_for(id: &str) -> Option<&'static ClinicalContext> {
    DiagnosisId::from_id(id).and_then(get_context)
}
