//! Error types for E2E testing

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Failed to bind fixture server: {0}")]
    Bind(#[source] std::io::Error),

    #[error("Fixture server failed to start: {0}")]
    ServerStartup(String),

    #[error("Fixture server failed to shut down: {0}")]
    ServerShutdown(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Playwright not found. Install with: npm install playwright && npx playwright install")]
    PlaywrightNotFound,

    #[error("Playwright error: {0}")]
    Playwright(String),

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Config write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type E2eResult<T> = Result<T, E2eError>;
