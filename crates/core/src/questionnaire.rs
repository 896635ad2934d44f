//! Symptom questionnaire structure and question dependency resolution.
//!
//! Whether a question is relevant depends on earlier answers in the same questionnaire (for
//! example the "what changes your pain" items are only asked when the patient reported pain).
//! Those dependencies are data: each [`Question`] carries a list of [`Condition`]s that must all
//! hold, and [`is_enabled`] is the single interpreter for that table.
//!
//! An unanswered dependency never satisfies an `Equals` condition and always satisfies a
//! `NotEquals` condition, because an absent value differs from every expected literal.

use crate::constants::{NO_PAIN, YES};
use tmd_forms::AnswerSet;

/// Comparison applied to the dependency's answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Equals,
    NotEquals,
}

/// One enablement condition: `answers[dependency] <operator> expected`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Condition {
    pub dependency: &'static str,
    pub operator: Operator,
    pub expected: &'static str,
}

impl Condition {
    pub const fn equals(dependency: &'static str, expected: &'static str) -> Self {
        Self {
            dependency,
            operator: Operator::Equals,
            expected,
        }
    }

    pub const fn not_equals(dependency: &'static str, expected: &'static str) -> Self {
        Self {
            dependency,
            operator: Operator::NotEquals,
            expected,
        }
    }

    /// Evaluates the condition. Missing answers: `Equals` is false, `NotEquals` is true.
    pub fn holds(&self, answers: &AnswerSet) -> bool {
        let matches = answers
            .get(self.dependency)
            .is_some_and(|value| value.matches(self.expected));

        match self.operator {
            Operator::Equals => matches,
            Operator::NotEquals => !matches,
        }
    }
}

/// A questionnaire item and the conditions under which it is asked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Question {
    pub id: &'static str,
    pub conditions: &'static [Condition],
}

const PAIN_REPORTED: Condition = Condition::equals("SQ1", YES);
const PAIN_IN_LAST_30_DAYS: Condition = Condition::not_equals("SQ3", NO_PAIN);
const HEADACHE_REPORTED: Condition = Condition::equals("SQ5", YES);
const EVER_LOCKED: Condition = Condition::equals("SQ9", YES);
const LOCKED_WIDE_OPEN: Condition = Condition::equals("SQ13", YES);

/// The symptom questionnaire, in form order. Dependencies always precede their dependants.
pub static QUESTIONS: &[Question] = &[
    Question { id: "SQ1", conditions: &[] },
    Question { id: "SQ2", conditions: &[PAIN_REPORTED] },
    Question { id: "SQ3", conditions: &[PAIN_REPORTED] },
    Question { id: "SQ4_A", conditions: &[PAIN_REPORTED, PAIN_IN_LAST_30_DAYS] },
    Question { id: "SQ4_B", conditions: &[PAIN_REPORTED, PAIN_IN_LAST_30_DAYS] },
    Question { id: "SQ4_C", conditions: &[PAIN_REPORTED, PAIN_IN_LAST_30_DAYS] },
    Question { id: "SQ4_D", conditions: &[PAIN_REPORTED, PAIN_IN_LAST_30_DAYS] },
    Question { id: "SQ5", conditions: &[] },
    Question { id: "SQ6", conditions: &[HEADACHE_REPORTED] },
    Question { id: "SQ7_A", conditions: &[HEADACHE_REPORTED] },
    Question { id: "SQ7_B", conditions: &[HEADACHE_REPORTED] },
    Question { id: "SQ7_C", conditions: &[HEADACHE_REPORTED] },
    Question { id: "SQ7_D", conditions: &[HEADACHE_REPORTED] },
    Question { id: "SQ8", conditions: &[] },
    Question { id: "SQ9", conditions: &[] },
    Question { id: "SQ10", conditions: &[EVER_LOCKED] },
    Question { id: "SQ11", conditions: &[EVER_LOCKED] },
    Question { id: "SQ12", conditions: &[EVER_LOCKED, Condition::equals("SQ11", YES)] },
    Question { id: "SQ13", conditions: &[] },
    Question { id: "SQ14", conditions: &[LOCKED_WIDE_OPEN] },
];

/// Looks up a question by identifier.
pub fn question(question_id: &str) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == question_id)
}

/// Whether `question_id` is enabled given `answers`.
///
/// Questions without conditions, and identifiers not in the questionnaire, are always enabled.
/// Conditions are combined with AND.
pub fn is_enabled(question_id: &str, answers: &AnswerSet) -> bool {
    question(question_id)
        .map(|q| q.conditions.iter().all(|condition| condition.holds(answers)))
        .unwrap_or(true)
}

/// Whether `question_id` is enabled now or could still become enabled.
///
/// A condition that does not hold yet is still open when its dependency is unanswered and is
/// itself reachable. Dependencies always precede their dependants, so the walk terminates.
pub fn is_reachable(question_id: &str, answers: &AnswerSet) -> bool {
    question(question_id)
        .map(|q| {
            q.conditions.iter().all(|condition| {
                condition.holds(answers)
                    || (!answers.is_answered(condition.dependency)
                        && is_reachable(condition.dependency, answers))
            })
        })
        .unwrap_or(true)
}

/// Returns the answers that are live: those belonging to enabled questions.
///
/// Questions are resolved in form order against the answers kept so far, so a stale answer to
/// a disabled question can never enable its dependants. Answers to identifiers outside the
/// questionnaire are kept as they are.
pub fn live_answers(answers: &AnswerSet) -> AnswerSet {
    let mut live = AnswerSet::new();

    for q in QUESTIONS {
        if let Some(value) = answers.get(q.id) {
            if is_enabled(q.id, &live) {
                live.insert(q.id, value.clone());
            } else {
                tracing::trace!(question = q.id, "dropping answer to disabled question");
            }
        }
    }

    for (id, value) in answers.iter() {
        if question(id).is_none() {
            live.insert(id, value.clone());
        }
    }

    live
}
