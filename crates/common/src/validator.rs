//! Scenario validation against the action whitelist
//!
//! Every step line must mention at least one known action. This only gates
//! against unrecognised vocabulary; step order and arguments are not checked.

use serde::Serialize;
use tracing::debug;

use crate::keywords::ActionKeyword;
use crate::types::{split_lines, StepLine};

/// First step that mentions no known action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnknownStep {
    /// Index of the block within the input
    pub block: usize,
    /// 1-based line number inside the block
    pub line: usize,
    /// Step text without its Given/When/Then/And prefix
    pub text: String,
}

impl std::fmt::Display for UnknownStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "scenario {} line {}: no known action in \"{}\"",
            self.block + 1,
            self.line,
            self.text
        )
    }
}

/// Return true if every step of every scenario uses a known action.
///
/// Blank and non-step lines are ignored. An empty input is valid.
pub fn validate_scenarios<I, S>(scenarios: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    find_unknown_step(scenarios).is_none()
}

/// Find the first step without a known action, stopping at the first hit
pub fn find_unknown_step<I, S>(scenarios: I) -> Option<UnknownStep>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for (block_index, scenario) in scenarios.into_iter().enumerate() {
        for (line_index, line) in split_lines(scenario.as_ref()).enumerate() {
            let Some(step) = StepLine::parse(line) else {
                continue;
            };

            if ActionKeyword::find_in(step.text).is_none() {
                debug!(block = block_index, line = line_index + 1, "Unknown step: {}", step.text);
                return Some(UnknownStep {
                    block: block_index,
                    line: line_index + 1,
                    text: step.text.to_string(),
                });
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate_scenarios;
    use crate::types::ScenarioSet;

    #[test]
    fn test_empty_input_is_valid() {
        assert!(validate_scenarios(&ScenarioSet::new()));
        assert!(validate_scenarios(Vec::<String>::new()));
    }

    #[test]
    fn test_generated_scenarios_are_valid() {
        let scenarios = generate_scenarios("login required");
        assert!(validate_scenarios(&scenarios));
    }

    #[test]
    fn test_unknown_action_fails_whole_set() {
        let mut blocks: Vec<String> = generate_scenarios("login")
            .into_iter()
            .map(String::from)
            .collect();
        blocks.push(
            "Feature: Tricks\n  Scenario: Showing off\n    Given the user is on the login page\n    When the user performs a backflip"
                .to_string(),
        );

        assert!(!validate_scenarios(&blocks));

        let unknown = find_unknown_step(&blocks).unwrap();
        assert_eq!(unknown.block, 2);
        assert_eq!(unknown.line, 4);
        assert_eq!(unknown.text, "the user performs a backflip");
    }

    #[test]
    fn test_first_failure_wins() {
        let blocks = ["When a cat sits", "Then a dog barks"];
        let unknown = find_unknown_step(blocks).unwrap();
        assert_eq!(unknown.block, 0);
        assert_eq!(unknown.text, "a cat sits");
    }

    #[test]
    fn test_steps_after_any_line_boundary_are_checked() {
        for separator in ["\r", "\u{2028}", "\u{2029}", "\x0b", "\x0c", "\u{85}"] {
            let block = format!("Feature: X{}When the user performs a backflip", separator);
            assert!(!validate_scenarios([&block]), "separator {:?}", separator);
        }

        let block = "Feature: X\r\n\r\n  Scenario: Y\r    When the user performs a backflip";
        let unknown = find_unknown_step([block]).unwrap();
        assert_eq!(unknown.line, 4);
        assert_eq!(unknown.text, "the user performs a backflip");
    }

    #[test]
    fn test_non_step_lines_are_ignored() {
        let block = "Feature: Anything goes\n\n  Scenario: Nothing known here\n  # a comment\n  Another line\n  Given";
        assert!(validate_scenarios([block]));
    }

    #[test]
    fn test_prefix_is_case_insensitive() {
        assert!(validate_scenarios(["  WHEN the user Enters a name"]));
        assert!(!validate_scenarios(["  AND the user waits"]));
    }

    #[test]
    fn test_prefix_word_alone_is_not_an_action() {
        // "Given login" passes because of the step text, not the prefix
        assert!(validate_scenarios(["Given login"]));
        assert!(!validate_scenarios(["Given nothing"]));
    }
}
