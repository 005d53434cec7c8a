//! Generate Commands
//!
//! Turns a requirement into the fixed login scenarios.

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

use scenariogen_common::{generate_scenarios, generate_scenarios_from_value, validate_scenarios, ScenarioSet};

use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct GenerateArgs {
    /// Requirement text
    pub requirement: Option<String>,

    /// Read the requirement from a text file
    #[arg(short, long, conflicts_with_all = ["requirement", "from_json"])]
    pub file: Option<PathBuf>,

    /// Read a JSON document and use its `requirement_text` field
    #[arg(long, conflicts_with = "requirement")]
    pub from_json: Option<PathBuf>,

    /// Also run the validator over the generated scenarios
    #[arg(long)]
    pub validate: bool,
}

#[derive(Serialize)]
struct GenerateReport<'a> {
    scenarios: &'a ScenarioSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    valid: Option<bool>,
}

pub fn execute(args: GenerateArgs, format: OutputFormat) -> Result<()> {
    let scenarios = load_scenarios(&args)?;
    debug!("Generated {} scenario(s)", scenarios.len());

    let valid = args.validate.then(|| validate_scenarios(&scenarios));

    match format {
        OutputFormat::Json | OutputFormat::Yaml => {
            output::print_structured(
                &GenerateReport {
                    scenarios: &scenarios,
                    valid,
                },
                format,
            )?;
            return Ok(());
        }
        _ if scenarios.is_empty() => {
            output::print_info("No scenarios generated: the requirement does not mention login.");
        }
        OutputFormat::Table => output::print_table(&output::scenario_rows(&scenarios)),
        OutputFormat::Plain => output::print_blocks(&scenarios),
    }

    if let Some(valid) = valid {
        output::print_verdict(valid);
    }

    Ok(())
}

fn load_scenarios(args: &GenerateArgs) -> Result<ScenarioSet> {
    if let Some(path) = &args.from_json {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let document: Value = serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?;
        return Ok(generate_scenarios_from_value(requirement_field(&document))?);
    }

    if let Some(path) = &args.file {
        let requirement = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        return Ok(generate_scenarios(&requirement));
    }

    match &args.requirement {
        Some(requirement) => Ok(generate_scenarios(requirement)),
        None => bail!("Provide requirement text, --file or --from-json"),
    }
}

/// `requirement_text` of an object, or the document itself otherwise
fn requirement_field(document: &Value) -> &Value {
    match document {
        Value::Object(map) => map.get("requirement_text").unwrap_or(&Value::Null),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args() -> GenerateArgs {
        GenerateArgs {
            requirement: None,
            file: None,
            from_json: None,
            validate: false,
        }
    }

    #[test]
    fn test_requirement_field() {
        assert_eq!(requirement_field(&json!({"requirement_text": "login"})), &json!("login"));
        assert_eq!(requirement_field(&json!({"other": 1})), &Value::Null);
        assert_eq!(requirement_field(&json!("login")), &json!("login"));
    }

    #[test]
    fn test_from_json_rejects_numbers() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("req.json");
        std::fs::write(&path, r#"{"requirement_text": 123}"#).unwrap();

        let err = load_scenarios(&GenerateArgs {
            from_json: Some(path),
            ..args()
        })
        .unwrap_err();
        assert!(err.to_string().contains("requirement_text must be a string"));
    }

    #[test]
    fn test_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("req.txt");
        std::fs::write(&path, "Users must be able to LOGIN").unwrap();

        let scenarios = load_scenarios(&GenerateArgs {
            file: Some(path),
            ..args()
        })
        .unwrap();
        assert_eq!(scenarios.len(), 2);
    }

    #[test]
    fn test_missing_input_is_an_error() {
        assert!(load_scenarios(&args()).is_err());
    }
}
