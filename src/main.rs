use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tmd_core::constants::LOCALE_ENV_VAR;
use tmd_core::questionnaire;
use tmd_core::{
    definition, evaluate_all_anamnesis, get_context, locale_from_env_value, CoreConfig,
    DiagnosisId, EvaluationInput,
};

#[derive(Parser)]
#[command(name = "tmd")]
#[command(about = "TMD diagnostic criteria evaluation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate every diagnosis for an input file
    Evaluate {
        /// YAML or JSON file with `answers` and `measurements`
        file: PathBuf,
        /// Print the full evaluation as JSON
        #[arg(long)]
        json: bool,
    },
    /// Screen the questionnaire answers only
    Anamnesis {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Print the content fingerprint of an input file
    Fingerprint { file: PathBuf },
    /// Show clinical context for a diagnosis
    Context {
        /// Diagnosis identifier, e.g. `disc_displacement_with_reduction`
        diagnosis_id: String,
        #[arg(long)]
        json: bool,
    },
    /// Check whether a questionnaire item is enabled by the answers in a file
    Enabled {
        file: PathBuf,
        /// Question identifier, e.g. `SQ4_A`
        question_id: String,
    },
}

/// Entry point for the `tmd` command
///
/// # Environment Variables
/// - `TMD_LOCALE`: language for clinical context text, `en` or `de` (default: "en")
/// - `RUST_LOG`: tracing filter (default directive: "tmd=info")
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("tmd=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = CoreConfig::new(locale_from_env_value(std::env::var(LOCALE_ENV_VAR).ok())?);
    let cli = Cli::parse();

    let output = run(cli.command, &config)?;
    print!("{output}");
    Ok(())
}

fn read_input(path: &Path) -> anyhow::Result<EvaluationInput> {
    EvaluationInput::read(path).with_context(|| format!("failed to read input {}", path.display()))
}

fn run(command: Commands, config: &CoreConfig) -> anyhow::Result<String> {
    let mut out = String::new();

    match command {
        Commands::Evaluate { file, json } => {
            let input = read_input(&file)?;
            let evaluation = tmd_core::evaluate(&input)?;

            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&evaluation)?)?;
            } else {
                writeln!(out, "Fingerprint: {}", evaluation.fingerprint)?;
                for result in &evaluation.results {
                    let name = definition(result.diagnosis_id()).display_name;
                    writeln!(out, "{name:<56} {}", result.status())?;
                    if !result.positive_locations().is_empty() {
                        let locations: Vec<String> = result
                            .positive_locations()
                            .iter()
                            .map(ToString::to_string)
                            .collect();
                        writeln!(out, "    positive at: {}", locations.join(", "))?;
                    }
                }
            }
        }
        Commands::Anamnesis { file, json } => {
            let input = read_input(&file)?;
            let summary = evaluate_all_anamnesis(&input.answers);

            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
            } else {
                for row in &summary {
                    writeln!(out, "{:<56} {}", row.display_name, row.status)?;
                    if !row.examination_sections.is_empty() {
                        writeln!(out, "    examine: {}", row.examination_sections.join(", "))?;
                    }
                }
            }
        }
        Commands::Fingerprint { file } => {
            let input = read_input(&file)?;
            writeln!(out, "{}", tmd_core::fingerprint(&input)?)?;
        }
        Commands::Context { diagnosis_id, json } => {
            let id: DiagnosisId = diagnosis_id.parse()?;
            let view = get_context(id)
                .with_context(|| format!("no clinical context for {id}"))?
                .view(config.locale());

            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
            } else {
                writeln!(out, "{} ({})", view.display_name, view.icd_code)?;
                writeln!(out, "{}", view.description)?;
                writeln!(out, "Validity: {}", view.validity_statement)?;
                if let Some(imaging) = view.imaging_recommendation {
                    writeln!(out, "Imaging: {imaging}")?;
                }
                for comment in view.comments {
                    writeln!(out, "- {comment}")?;
                }
            }
        }
        Commands::Enabled { file, question_id } => {
            let input = read_input(&file)?;
            if questionnaire::question(&question_id).is_none() {
                tracing::warn!(question = %question_id, "question is not part of the questionnaire");
            }
            let enabled = questionnaire::is_enabled(&question_id, &input.answers);
            writeln!(
                out,
                "{question_id}: {}",
                if enabled { "enabled" } else { "disabled" }
            )?;
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tmd_core::Locale;

    const INPUT: &str = r#"
answers:
  SQ8: "yes"
  SQ9: "no"
  SQ13: "no"
measurements:
  sites:
    tmj:
      left:
        click_open_and_close: true
"#;

    fn input_file(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn evaluate_lists_positive_locations() {
        let file = input_file(INPUT);
        let out = run(
            Commands::Evaluate {
                file: file.path().to_path_buf(),
                json: false,
            },
            &CoreConfig::default(),
        )
        .unwrap();

        assert!(out.starts_with("Fingerprint: "));
        assert!(out.contains("positive at: tmj:left"));
    }

    #[test]
    fn evaluate_json_is_machine_readable() {
        let file = input_file(INPUT);
        let out = run(
            Commands::Evaluate {
                file: file.path().to_path_buf(),
                json: true,
            },
            &CoreConfig::default(),
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["results"].as_array().unwrap().len(), DiagnosisId::ALL.len());
    }

    #[test]
    fn fingerprint_is_lowercase_hex() {
        let file = input_file(INPUT);
        let out = run(
            Commands::Fingerprint {
                file: file.path().to_path_buf(),
            },
            &CoreConfig::default(),
        )
        .unwrap();

        let digest = out.trim();
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn context_follows_configured_locale() {
        let out = run(
            Commands::Context {
                diagnosis_id: "subluxation".into(),
                json: false,
            },
            &CoreConfig::new(Locale::De),
        )
        .unwrap();
        assert!(out.starts_with("Subluxation (S03.0)"));
        assert!(out.contains("Hypermobilitätsstörung"));
    }

    #[test]
    fn unknown_diagnosis_is_an_error() {
        let result = run(
            Commands::Context {
                diagnosis_id: "bruxism".into(),
                json: false,
            },
            &CoreConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn enabled_reports_dependency_state() {
        let file = input_file(INPUT);
        let path = file.path().to_path_buf();

        let out = run(
            Commands::Enabled {
                file: path.clone(),
                question_id: "SQ10".into(),
            },
            &CoreConfig::default(),
        )
        .unwrap();
        assert_eq!(out, "SQ10: disabled\n");

        let out = run(
            Commands::Enabled {
                file: path,
                question_id: "SQ9".into(),
            },
            &CoreConfig::default(),
        )
        .unwrap();
        assert_eq!(out, "SQ9: enabled\n");
    }

    #[test]
    fn missing_input_file_is_reported() {
        let err = run(
            Commands::Fingerprint {
                file: PathBuf::from("/nonexistent/input.yaml"),
            },
            &CoreConfig::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("failed to read input"));
    }
}
