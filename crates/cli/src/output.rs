//! Output formatting for CLI

use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use scenariogen_common::ScenarioSet;

/// Separator printed between scenario blocks in plain output
const BLOCK_SEPARATOR_WIDTH: usize = 40;

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
    /// Scenario text as written
    #[default]
    Plain,
}

/// Trait for items that can be displayed in a table
pub trait TableDisplay {
    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;
}

/// One scenario as a table row
#[derive(Serialize, Clone)]
pub struct ScenarioRow {
    pub index: usize,
    pub feature: String,
    pub scenario: String,
    pub steps: usize,
}

impl TableDisplay for ScenarioRow {
    fn headers() -> Vec<&'static str> {
        vec!["#", "Feature", "Scenario", "Steps"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.index.to_string(),
            self.feature.clone(),
            self.scenario.clone(),
            self.steps.to_string(),
        ]
    }
}

pub fn scenario_rows(scenarios: &ScenarioSet) -> Vec<ScenarioRow> {
    scenarios
        .iter()
        .enumerate()
        .map(|(i, block)| ScenarioRow {
            index: i + 1,
            feature: block.feature_name().unwrap_or("-").to_string(),
            scenario: block.scenario_name().unwrap_or("-").to_string(),
            steps: block.step_lines().count(),
        })
        .collect()
}

/// Print a list of items as a table
pub fn print_table<T: TableDisplay>(items: &[T]) {
    if items.is_empty() {
        println!("No items found.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(T::headers());
    for item in items {
        table.add_row(item.row());
    }

    println!("{table}");
}

/// Print a serializable value as JSON or YAML
pub fn print_structured<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(value)?),
        _ => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

/// Print scenario blocks separated by a dashed rule
pub fn print_blocks(scenarios: &ScenarioSet) {
    for block in scenarios {
        println!("{}", block);
        println!("{}", "-".repeat(BLOCK_SEPARATOR_WIDTH));
    }
}

/// Print the validation verdict line
pub fn print_verdict(valid: bool) {
    let verdict = if valid {
        "true".green().bold()
    } else {
        "false".red().bold()
    };
    println!("Validation result: {}", verdict);
}

/// Print success message
pub fn print_success(message: &str) {
    println!("✅ {}", message);
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("❌ {}", message);
}

/// Print info message
pub fn print_info(message: &str) {
    println!("ℹ️  {}", message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenariogen_common::generate_scenarios;

    #[test]
    fn test_scenario_rows() {
        let rows = scenario_rows(&generate_scenarios("login"));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row(), ["1", "User login", "Valid user logs in successfully", "4"]);
        assert_eq!(rows[1].scenario, "Invalid user cannot log in");
    }
}
