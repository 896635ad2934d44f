//! Combined evaluation input: answers plus measurements.

use crate::{AnswerSet, Finding, FindingScope, FormsError, FormsResult, MeasurementSet, MeasurementValue};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything the engine needs for one evaluation.
///
/// This is also the value the fingerprint is computed over, so its serialised form is the
/// caching key persisted next to stored results.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvaluationInput {
    #[serde(default)]
    pub answers: AnswerSet,
    #[serde(default)]
    pub measurements: MeasurementSet,
}

impl EvaluationInput {
    pub fn new(answers: AnswerSet, measurements: MeasurementSet) -> Self {
        Self {
            answers,
            measurements,
        }
    }

    /// Parse an evaluation input from YAML (or JSON) text.
    ///
    /// # Errors
    ///
    /// Returns [`FormsError::Schema`] with the failing field path when the text does not match
    /// the input schema (unknown keys included), and [`FormsError::InvalidInput`] when a finding
    /// is recorded in the wrong scope or with the wrong kind of value.
    pub fn parse(text: &str) -> FormsResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(text);

        let input = match serde_path_to_error::deserialize::<_, EvaluationInput>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>".to_owned()
                } else {
                    path
                };
                return Err(FormsError::Schema {
                    path,
                    message: source.to_string(),
                });
            }
        };

        input.validate()?;
        tracing::debug!(
            answers = input.answers.len(),
            sites = input.measurements.sites().count(),
            "parsed evaluation input"
        );
        Ok(input)
    }

    /// Read and parse an evaluation input file.
    pub fn read(path: &Path) -> FormsResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Checks finding scopes and value kinds.
    pub fn validate(&self) -> FormsResult<()> {
        for (finding, value) in self.measurements.global() {
            if finding.scope() != FindingScope::Global {
                return Err(FormsError::InvalidInput(format!(
                    "finding {finding:?} must be recorded per site, not globally"
                )));
            }
            check_value_kind(*finding, *value)?;
        }

        for (location, findings) in self.measurements.sites() {
            for (finding, value) in findings {
                if finding.scope() != FindingScope::Site {
                    return Err(FormsError::InvalidInput(format!(
                        "finding {finding:?} is global and cannot be recorded at {location}"
                    )));
                }
                check_value_kind(*finding, *value)?;
            }
        }

        Ok(())
    }
}

fn check_value_kind(finding: Finding, value: MeasurementValue) -> FormsResult<()> {
    let ok = match finding {
        Finding::AssistedOpeningMm => value.as_millimetres().is_some(),
        _ => value.as_flag().is_some(),
    };

    if ok {
        Ok(())
    } else {
        Err(FormsError::InvalidInput(format!(
            "finding {finding:?} has the wrong kind of value: {value:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tmd_types::{Location, Region, Side};

    const SAMPLE: &str = r#"answers:
  SQ1: "yes"
  SQ3: intermittent
measurements:
  global:
    assisted_opening_mm: 38
  sites:
    tmj:
      left:
        click_open_and_close: true
"#;

    #[test]
    fn parses_sample_input() {
        let input = EvaluationInput::parse(SAMPLE).expect("parse input");
        assert!(input.answers.get("SQ3").is_some_and(|v| v.matches("intermittent")));
        assert_eq!(
            input
                .measurements
                .finding(Location::new(Region::Tmj, Side::Left), Finding::ClickOpenAndClose),
            Some(MeasurementValue::Flag(true))
        );
    }

    #[test]
    fn empty_document_sections_default() {
        let input = EvaluationInput::parse("answers: {}\n").expect("parse input");
        assert!(input.answers.is_empty());
        assert!(input.measurements.is_empty());
    }

    #[test]
    fn rejects_unknown_keys() {
        let input = format!("{SAMPLE}unexpected_key: 1\n");
        let err = EvaluationInput::parse(&input).expect_err("should reject unknown key");
        match err {
            FormsError::Schema { message, .. } => assert!(message.contains("unexpected_key")),
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_finding() {
        let input = r#"measurements:
  sites:
    tmj:
      left:
        clunk: true
"#;
        let err = EvaluationInput::parse(input).expect_err("should reject unknown finding");
        match err {
            FormsError::Schema { message, .. } => assert!(message.contains("clunk")),
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_yaml_is_a_schema_error() {
        let err = EvaluationInput::parse("answers: [SQ1\n").expect_err("should reject bad YAML");
        assert!(matches!(err, FormsError::Schema { .. }), "got {err:?}");

        let err = EvaluationInput::parse("- just\n- a list\n").expect_err("not a mapping");
        match err {
            FormsError::Schema { path, .. } => assert_eq!(path, "<root>"),
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_global_finding_recorded_per_site() {
        let input = r#"measurements:
  sites:
    tmj:
      right:
        assisted_opening_mm: 35
"#;
        let err = EvaluationInput::parse(input).expect_err("should reject misplaced finding");
        assert!(matches!(err, FormsError::InvalidInput(msg) if msg.contains("tmj:right")));
    }

    #[test]
    fn rejects_flag_for_numeric_finding() {
        let input = r#"measurements:
  global:
    assisted_opening_mm: true
"#;
        let err = EvaluationInput::parse(input).expect_err("should reject wrong value kind");
        assert!(matches!(err, FormsError::InvalidInput(msg) if msg.contains("wrong kind")));
    }

    #[test]
    fn reads_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        file.write_all(SAMPLE.as_bytes()).expect("write sample");

        let input = EvaluationInput::read(file.path()).expect("read input");
        assert_eq!(input.answers.len(), 2);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::TempDir::new().expect("create temp dir");
        let err = EvaluationInput::read(&dir.path().join("absent.yaml")).expect_err("missing");
        assert!(matches!(err, FormsError::Io(_)));
    }
}
