//! Anamnesis gate: per-diagnosis screening of the symptom questionnaire.
//!
//! Each diagnosis has a fixed boolean expression over questionnaire items. Evaluation works on
//! the live answers only (see [`questionnaire::live_answers`]) and is strict about missing data:
//! if any question the expression mentions is unanswered and still reachable, the result is
//! pending. Questions that can no longer be enabled simply do not match.

use crate::constants::{CONTINUOUS, INTERMITTENT, NO, YES};
use crate::diagnosis::{definition, Category, DiagnosisId};
use crate::questionnaire::{self, is_reachable};
use tmd_forms::AnswerSet;
use tmd_types::CriterionStatus;

/// Screening expression over questionnaire answers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    /// The answer equals the literal.
    Is(&'static str, &'static str),
    /// The answer equals one of the literals.
    OneOf(&'static str, &'static [&'static str]),
    All(&'static [Screen]),
    Any(&'static [Screen]),
}

impl Screen {
    /// Evaluates the expression; unanswered questions do not match.
    pub fn matches(&self, answers: &AnswerSet) -> bool {
        match self {
            Self::Is(question, literal) => answers
                .get(question)
                .is_some_and(|value| value.matches(literal)),
            Self::OneOf(question, literals) => answers
                .get(question)
                .is_some_and(|value| literals.iter().any(|literal| value.matches(literal))),
            Self::All(parts) => parts.iter().all(|part| part.matches(answers)),
            Self::Any(parts) => parts.iter().any(|part| part.matches(answers)),
        }
    }

    /// Every question the expression refers to, in expression order.
    pub fn questions(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        self.collect_questions(&mut out);
        out
    }

    fn collect_questions(&self, out: &mut Vec<&'static str>) {
        match self {
            Self::Is(question, _) | Self::OneOf(question, _) => {
                if !out.contains(question) {
                    out.push(*question);
                }
            }
            Self::All(parts) | Self::Any(parts) => {
                for part in *parts {
                    part.collect_questions(out);
                }
            }
        }
    }
}

/// Pain in a masticatory structure, in the last 30 days, modified by jaw function.
static JAW_PAIN_HISTORY: Screen = Screen::All(&[
    Screen::Is("SQ1", YES),
    Screen::OneOf("SQ3", &[INTERMITTENT, CONTINUOUS]),
    Screen::Any(&[
        Screen::Is("SQ4_A", YES),
        Screen::Is("SQ4_B", YES),
        Screen::Is("SQ4_C", YES),
        Screen::Is("SQ4_D", YES),
    ]),
]);

static TEMPLE_HEADACHE_HISTORY: Screen = Screen::All(&[
    Screen::Is("SQ5", YES),
    Screen::Any(&[
        Screen::Is("SQ7_A", YES),
        Screen::Is("SQ7_B", YES),
        Screen::Is("SQ7_C", YES),
        Screen::Is("SQ7_D", YES),
    ]),
]);

static JOINT_NOISE_HISTORY: Screen = Screen::Is("SQ8", YES);

static INTERMITTENT_LOCKING_HISTORY: Screen = Screen::All(&[
    Screen::Is("SQ8", YES),
    Screen::Is("SQ11", YES),
    Screen::Is("SQ12", NO),
]);

static CLOSED_LOCK_HISTORY: Screen = Screen::All(&[Screen::Is("SQ9", YES), Screen::Is("SQ10", YES)]);

static OPEN_LOCK_HISTORY: Screen = Screen::All(&[Screen::Is("SQ13", YES), Screen::Is("SQ14", YES)]);

/// Screening rule for a diagnosis.
pub fn screening_rule(id: DiagnosisId) -> &'static Screen {
    match id {
        DiagnosisId::Myalgia
        | DiagnosisId::LocalMyalgia
        | DiagnosisId::MyofascialPain
        | DiagnosisId::MyofascialPainWithReferral
        | DiagnosisId::Arthralgia => &JAW_PAIN_HISTORY,
        DiagnosisId::HeadacheAttributedToTmd => &TEMPLE_HEADACHE_HISTORY,
        DiagnosisId::DiscDisplacementWithReduction | DiagnosisId::DegenerativeJointDisease => {
            &JOINT_NOISE_HISTORY
        }
        DiagnosisId::DiscDisplacementWithReductionIntermittentLocking => {
            &INTERMITTENT_LOCKING_HISTORY
        }
        DiagnosisId::DiscDisplacementWithoutReductionLimitedOpening
        | DiagnosisId::DiscDisplacementWithoutReductionWithoutLimitedOpening => {
            &CLOSED_LOCK_HISTORY
        }
        DiagnosisId::Subluxation => &OPEN_LOCK_HISTORY,
    }
}

/// Evaluates the anamnesis gate for one diagnosis.
pub fn evaluate_anamnesis(id: DiagnosisId, answers: &AnswerSet) -> CriterionStatus {
    let live = questionnaire::live_answers(answers);
    evaluate_live(id, &live)
}

/// Same as [`evaluate_anamnesis`] for answers that are already filtered to live ones.
pub(crate) fn evaluate_live(id: DiagnosisId, live: &AnswerSet) -> CriterionStatus {
    let rule = screening_rule(id);

    let awaiting = rule
        .questions()
        .into_iter()
        .find(|question| !live.is_answered(question) && is_reachable(question, live));

    if let Some(question) = awaiting {
        tracing::trace!(diagnosis = %id, question, "anamnesis awaiting answer");
        return CriterionStatus::Pending;
    }

    if rule.matches(live) {
        CriterionStatus::Positive
    } else {
        CriterionStatus::Negative
    }
}

/// Screening summary used to drive the intake overview.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct AnamnesisSummary {
    pub diagnosis_id: DiagnosisId,
    pub status: CriterionStatus,
    pub category: Category,
    pub display_name: &'static str,
    /// Examination sections to chart. Only populated when the status is positive.
    pub examination_sections: &'static [&'static str],
}

/// Evaluates the anamnesis gate for every diagnosis, in registry order.
pub fn evaluate_all_anamnesis(answers: &AnswerSet) -> Vec<AnamnesisSummary> {
    let live = questionnaire::live_answers(answers);

    DiagnosisId::ALL
        .into_iter()
        .map(|id| {
            let def = definition(id);
            let status = evaluate_live(id, &live);
            AnamnesisSummary {
                diagnosis_id: id,
                status,
                category: def.category,
                display_name: def.display_name,
                examination_sections: if status.is_positive() {
                    def.examination_sections
                } else {
                    &[]
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NO_PAIN;

    fn jaw_pain(modifier: &str) -> AnswerSet {
        AnswerSet::new()
            .with("SQ1", YES)
            .with("SQ3", INTERMITTENT)
            .with("SQ4_A", modifier)
            .with("SQ4_B", NO)
            .with("SQ4_C", NO)
            .with("SQ4_D", NO)
    }

    #[test]
    fn jaw_pain_modified_by_function_is_positive() {
        let answers = jaw_pain(YES);
        assert_eq!(
            evaluate_anamnesis(DiagnosisId::Myalgia, &answers),
            CriterionStatus::Positive
        );
        assert_eq!(
            evaluate_anamnesis(DiagnosisId::Arthralgia, &answers),
            CriterionStatus::Positive
        );
    }

    #[test]
    fn jaw_pain_not_modified_is_negative() {
        assert_eq!(
            evaluate_anamnesis(DiagnosisId::Myalgia, &jaw_pain(NO)),
            CriterionStatus::Negative
        );
    }

    #[test]
    fn unanswered_enabled_question_is_pending() {
        let answers = AnswerSet::new()
            .with("SQ1", YES)
            .with("SQ3", CONTINUOUS)
            .with("SQ4_A", YES);
        // SQ4_B..D are enabled and unanswered
        assert_eq!(
            evaluate_anamnesis(DiagnosisId::Myalgia, &answers),
            CriterionStatus::Pending
        );
    }

    #[test]
    fn empty_questionnaire_is_pending_everywhere() {
        let answers = AnswerSet::new();
        for id in DiagnosisId::ALL {
            assert_eq!(evaluate_anamnesis(id, &answers), CriterionStatus::Pending, "{id}");
        }
    }

    #[test]
    fn disabled_questions_do_not_hold_the_gate_open() {
        // SQ1 = no disables SQ2..SQ4, so nothing is awaited and the gate closes
        let answers = AnswerSet::new().with("SQ1", NO);
        assert_eq!(
            evaluate_anamnesis(DiagnosisId::Arthralgia, &answers),
            CriterionStatus::Negative
        );

        let no_pain_recently = AnswerSet::new().with("SQ1", YES).with("SQ3", NO_PAIN);
        assert_eq!(
            evaluate_anamnesis(DiagnosisId::Myalgia, &no_pain_recently),
            CriterionStatus::Negative
        );
    }

    #[test]
    fn stale_answers_to_disabled_questions_are_ignored() {
        let mut answers = jaw_pain(YES);
        answers.insert("SQ1", NO);
        assert_eq!(
            evaluate_anamnesis(DiagnosisId::Myalgia, &answers),
            CriterionStatus::Negative
        );
    }

    #[test]
    fn intermittent_locking_needs_current_lock_answer() {
        let answers = AnswerSet::new()
            .with("SQ8", YES)
            .with("SQ9", YES)
            .with("SQ11", YES);
        let id = DiagnosisId::DiscDisplacementWithReductionIntermittentLocking;
        assert_eq!(evaluate_anamnesis(id, &answers), CriterionStatus::Pending);

        let unlocked = answers.clone().with("SQ12", NO);
        assert_eq!(evaluate_anamnesis(id, &unlocked), CriterionStatus::Positive);

        let locked = answers.with("SQ12", YES);
        assert_eq!(evaluate_anamnesis(id, &locked), CriterionStatus::Negative);
    }

    #[test]
    fn never_locked_closes_locking_gates() {
        let answers = AnswerSet::new().with("SQ8", YES).with("SQ9", NO);
        assert_eq!(
            evaluate_anamnesis(
                DiagnosisId::DiscDisplacementWithReductionIntermittentLocking,
                &answers
            ),
            CriterionStatus::Negative
        );
        assert_eq!(
            evaluate_anamnesis(
                DiagnosisId::DiscDisplacementWithoutReductionLimitedOpening,
                &answers
            ),
            CriterionStatus::Negative
        );
    }

    #[test]
    fn subluxation_history() {
        let answers = AnswerSet::new().with("SQ13", YES).with("SQ14", YES);
        assert_eq!(
            evaluate_anamnesis(DiagnosisId::Subluxation, &answers),
            CriterionStatus::Positive
        );
    }

    #[test]
    fn joint_noise_without_locking_answer_is_pending() {
        let answers = AnswerSet::new().with("SQ8", YES);
        assert_eq!(
            evaluate_anamnesis(DiagnosisId::DiscDisplacementWithReduction, &answers),
            CriterionStatus::Positive
        );
        assert_eq!(
            evaluate_anamnesis(
                DiagnosisId::DiscDisplacementWithReductionIntermittentLocking,
                &answers
            ),
            CriterionStatus::Pending
        );
    }

    /// Answers that satisfy every rule question except the gating one, which is left open.
    fn without_gate(id: DiagnosisId) -> AnswerSet {
        match id {
            DiagnosisId::Myalgia
            | DiagnosisId::LocalMyalgia
            | DiagnosisId::MyofascialPain
            | DiagnosisId::MyofascialPainWithReferral
            | DiagnosisId::Arthralgia => AnswerSet::new()
                .with("SQ3", INTERMITTENT)
                .with("SQ4_A", YES)
                .with("SQ4_B", YES)
                .with("SQ4_C", YES)
                .with("SQ4_D", YES),
            DiagnosisId::HeadacheAttributedToTmd => AnswerSet::new()
                .with("SQ7_A", YES)
                .with("SQ7_B", YES),
            DiagnosisId::DiscDisplacementWithReduction | DiagnosisId::DegenerativeJointDisease => {
                AnswerSet::new().with("SQ9", YES).with("SQ13", NO)
            }
            DiagnosisId::DiscDisplacementWithReductionIntermittentLocking => AnswerSet::new()
                .with("SQ8", YES)
                .with("SQ11", YES)
                .with("SQ12", NO),
            DiagnosisId::DiscDisplacementWithoutReductionLimitedOpening
            | DiagnosisId::DiscDisplacementWithoutReductionWithoutLimitedOpening => {
                AnswerSet::new().with("SQ8", YES).with("SQ10", YES)
            }
            DiagnosisId::Subluxation => AnswerSet::new().with("SQ14", YES),
        }
    }

    #[test]
    fn open_gating_question_keeps_every_rule_pending() {
        for id in DiagnosisId::ALL {
            let answers = without_gate(id);
            assert_eq!(evaluate_anamnesis(id, &answers), CriterionStatus::Pending, "{id}");

            let summary = evaluate_all_anamnesis(&answers);
            let row = summary.iter().find(|row| row.diagnosis_id == id).unwrap();
            assert_eq!(row.status, CriterionStatus::Pending, "{id}");
            assert!(row.examination_sections.is_empty());
        }
    }

    #[test]
    fn rule_questions_are_deduplicated_in_order() {
        assert_eq!(
            screening_rule(DiagnosisId::Myalgia).questions(),
            vec!["SQ1", "SQ3", "SQ4_A", "SQ4_B", "SQ4_C", "SQ4_D"]
        );
    }

    #[test]
    fn summary_routes_positive_diagnoses_only() {
        let answers = jaw_pain(YES)
            .with("SQ5", NO)
            .with("SQ8", NO)
            .with("SQ9", NO)
            .with("SQ13", NO);
        let summary = evaluate_all_anamnesis(&answers);

        assert_eq!(summary.len(), DiagnosisId::ALL.len());
        let arthralgia = summary
            .iter()
            .find(|s| s.diagnosis_id == DiagnosisId::Arthralgia)
            .unwrap();
        assert_eq!(arthralgia.status, CriterionStatus::Positive);
        assert_eq!(arthralgia.examination_sections, &["E1", "E4", "E5", "E9"]);
        assert_eq!(arthralgia.category, Category::PainDisorder);

        let ddwr = summary
            .iter()
            .find(|s| s.diagnosis_id == DiagnosisId::DiscDisplacementWithReduction)
            .unwrap();
        assert_eq!(ddwr.status, CriterionStatus::Negative);
        assert!(ddwr.examination_sections.is_empty());
    }
}
