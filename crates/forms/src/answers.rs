//! Symptom questionnaire answers.
//!
//! An [`AnswerSet`] maps question identifiers (for example `SQ1`, `SQ4_A`) to the value the
//! patient gave. Absent keys mean "unanswered"; there is no separate null marker.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single answer value.
///
/// Binary questionnaire items are recorded as the literals `yes` / `no`; choice items use their
/// option literal (for example `intermittent`). Onset questions carry a [`Duration`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Number(serde_json::Number),
    Duration(Duration),
}

impl AnswerValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Whether this answer equals the given option literal.
    ///
    /// Numbers compare by their canonical decimal rendering. Durations never match a literal.
    pub fn matches(&self, literal: &str) -> bool {
        match self {
            Self::Text(text) => text == literal,
            Self::Number(number) => number.to_string() == literal,
            Self::Duration(_) => false,
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<Duration> for AnswerValue {
    fn from(value: Duration) -> Self {
        Self::Duration(value)
    }
}

/// Elapsed time since onset, as entered on the questionnaire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Duration {
    #[serde(default)]
    pub years: u32,
    #[serde(default)]
    pub months: u32,
}

impl Duration {
    pub fn total_months(&self) -> u32 {
        self.years.saturating_mul(12).saturating_add(self.months)
    }
}

/// Immutable-by-convention mapping from question identifier to answer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, AnswerValue>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for constructing answer sets in code.
    pub fn with(mut self, question_id: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        self.0.insert(question_id.into(), value.into());
        self
    }

    pub fn insert(&mut self, question_id: impl Into<String>, value: impl Into<AnswerValue>) {
        self.0.insert(question_id.into(), value.into());
    }

    pub fn get(&self, question_id: &str) -> Option<&AnswerValue> {
        self.0.get(question_id)
    }

    pub fn is_answered(&self, question_id: &str) -> bool {
        self.0.contains_key(question_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.0.iter().map(|(id, value)| (id.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<AnswerValue>> FromIterator<(K, V)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(id, value)| (id.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_answer_shapes() {
        let yaml = r#"SQ1: "yes"
SQ2:
  years: 1
  months: 6
SQ3: intermittent
AGE: 42
"#;
        let answers: AnswerSet = serde_yaml::from_str(yaml).expect("parse answers");
        assert_eq!(answers.len(), 4);
        assert!(answers.get("SQ1").is_some_and(|v| v.matches("yes")));
        assert!(answers.get("AGE").is_some_and(|v| v.matches("42")));
        assert_eq!(
            answers.get("SQ2"),
            Some(&AnswerValue::Duration(Duration {
                years: 1,
                months: 6
            }))
        );
    }

    #[test]
    fn duration_never_matches_a_literal() {
        let value = AnswerValue::from(Duration {
            years: 0,
            months: 3,
        });
        assert!(!value.matches("3"));
        assert!(!value.matches("yes"));
    }

    #[test]
    fn total_months_combines_years() {
        let onset = Duration {
            years: 2,
            months: 5,
        };
        assert_eq!(onset.total_months(), 29);
    }

    #[test]
    fn unanswered_questions_are_absent() {
        let answers = AnswerSet::new().with("SQ1", "no");
        assert!(answers.is_answered("SQ1"));
        assert!(!answers.is_answered("SQ3"));
        assert_eq!(answers.get("SQ3"), None);
    }
}
