//! Validate Commands
//!
//! Checks scenario text against the known action keywords.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use scenariogen_common::{find_unknown_step, generate_scenarios, ScenarioBlock, ScenarioSet, UnknownStep};

use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct ValidateArgs {
    /// Scenario files, one block per file (or JSON arrays with --json)
    pub files: Vec<PathBuf>,

    /// Validate the scenarios generated for this requirement instead
    #[arg(short, long, conflicts_with = "files")]
    pub requirement: Option<String>,

    /// Treat each file as a JSON array of scenario strings
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
pub struct ValidationReport {
    pub scenarios: usize,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unknown_step: Option<UnknownStep>,
}

/// Returns whether the scenarios passed
pub fn execute(args: ValidateArgs, format: OutputFormat) -> Result<bool> {
    let scenarios = load_scenarios(&args)?;
    let report = check(&scenarios);

    match format {
        OutputFormat::Json | OutputFormat::Yaml => output::print_structured(&report, format)?,
        _ => {
            output::print_verdict(report.valid);
            if let Some(step) = &report.unknown_step {
                output::print_error(&step.to_string());
            }
        }
    }

    Ok(report.valid)
}

pub fn check(scenarios: &ScenarioSet) -> ValidationReport {
    let unknown_step = find_unknown_step(scenarios);
    ValidationReport {
        scenarios: scenarios.len(),
        valid: unknown_step.is_none(),
        unknown_step,
    }
}

fn load_scenarios(args: &ValidateArgs) -> Result<ScenarioSet> {
    if let Some(requirement) = &args.requirement {
        return Ok(generate_scenarios(requirement));
    }

    let mut scenarios = ScenarioSet::new();
    for path in &args.files {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        if args.json {
            let blocks = ScenarioSet::from_json(&content)
                .with_context(|| format!("Expected a JSON array of strings in {}", path.display()))?;
            for block in blocks {
                scenarios.push(block);
            }
        } else {
            scenarios.push(ScenarioBlock::new(content));
        }
    }

    Ok(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_reports_first_unknown_step() {
        let mut scenarios = generate_scenarios("login");
        scenarios.push(ScenarioBlock::new("Scenario: X\n  When the user performs a backflip"));

        let report = check(&scenarios);
        assert!(!report.valid);
        assert_eq!(report.scenarios, 3);
        assert_eq!(report.unknown_step.unwrap().text, "the user performs a backflip");
    }

    #[test]
    fn test_no_files_is_vacuously_valid() {
        let args = ValidateArgs {
            files: vec![],
            requirement: None,
            json: false,
        };
        let report = check(&load_scenarios(&args).unwrap());
        assert!(report.valid);
        assert_eq!(report.scenarios, 0);
    }

    #[test]
    fn test_json_files() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("scenarios.json");
        std::fs::write(&path, r#"["Given the user enters a name", "Then a toast is shown"]"#).unwrap();

        let args = ValidateArgs {
            files: vec![path],
            requirement: None,
            json: true,
        };
        let report = check(&load_scenarios(&args).unwrap());
        assert!(!report.valid);
        assert_eq!(report.unknown_step.unwrap().block, 1);
    }

    #[test]
    fn test_classic_mac_line_endings() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("tricks.feature");
        std::fs::write(
            &path,
            "Feature: Tricks\r  Scenario: Showing off\r    When the user performs a backflip\r",
        )
        .unwrap();

        let args = ValidateArgs {
            files: vec![path],
            requirement: None,
            json: false,
        };
        let report = check(&load_scenarios(&args).unwrap());
        assert!(!report.valid);
        assert_eq!(report.unknown_step.unwrap().line, 3);
    }
}
