//! Rule-based scenario generation
//!
//! No model is consulted. A requirement that mentions "login" yields the
//! fixed happy-path and negative-path scenarios; anything else yields nothing.

use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{ScenarioBlock, ScenarioSet};

/// Trigger word looked for in the lower-cased requirement
pub const LOGIN_TRIGGER: &str = "login";

pub const HAPPY_PATH_SCENARIO: &str = "Valid user logs in successfully";
pub const NEGATIVE_PATH_SCENARIO: &str = "Invalid user cannot log in";

const HAPPY_PATH: &str = "Feature: User login

  Scenario: Valid user logs in successfully
\tGiven the user is on the login page
\tWhen the user enters valid credentials
\tAnd the user clicks the Login button
\tThen the user is redirected to the dashboard
";

const NEGATIVE_PATH: &str = "Feature: User login

  Scenario: Invalid user cannot log in
\tGiven the user is on the login page
\tWhen the user enters invalid credentials
\tAnd the user clicks the Login button
\tThen an error message is displayed
";

/// Generate scenarios for a plain-English requirement
pub fn generate_scenarios(requirement_text: &str) -> ScenarioSet {
    let text = requirement_text.to_lowercase();
    let mut scenarios = ScenarioSet::new();

    if text.contains(LOGIN_TRIGGER) {
        scenarios.push(ScenarioBlock::new(HAPPY_PATH));
        scenarios.push(ScenarioBlock::new(NEGATIVE_PATH));
    }

    debug!(
        requirement_len = requirement_text.len(),
        generated = scenarios.len(),
        "Generated scenarios"
    );
    scenarios
}

/// Generate scenarios from an untyped JSON value.
///
/// Anything other than a JSON string is rejected before matching.
pub fn generate_scenarios_from_value(requirement_text: &Value) -> Result<ScenarioSet> {
    match requirement_text {
        Value::String(text) => Ok(generate_scenarios(text)),
        other => Err(Error::RequirementType {
            found: json_kind(other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
