//! Scenariogen Common Library
//!
//! Rule-based BDD scenario generation and the action-keyword validator that
//! decides whether generated scenarios are trusted for automation.

pub mod error;
pub mod generator;
pub mod keywords;
pub mod types;
pub mod validator;

// Re-export commonly used types
pub use error::{Error, Result};
pub use generator::{generate_scenarios, generate_scenarios_from_value};
pub use keywords::{ActionKeyword, KNOWN_ACTION_KEYWORDS};
pub use types::{split_lines, ScenarioBlock, ScenarioSet, StepLine, StepPrefix};
pub use validator::{find_unknown_step, validate_scenarios, UnknownStep};

/// Scenariogen version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
