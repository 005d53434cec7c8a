//! Scenariogen E2E Test Framework
//!
//! This crate drives the approved login scenario in a real browser:
//! - Serves the sample app from a local fixture server on an ephemeral port
//! - Records page actions and replays them through Playwright
//! - Binds the Gherkin login steps to those actions
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 cucumber harness (tests/login.rs)           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  FixtureServer (one per session)                            │
//! │    ├── spawn(config) -> entry_url                           │
//! │    └── Drop -> cancel + join worker                         │
//! │  BrowserPage (one per scenario)                             │
//! │    ├── goto / fill / click      (recorded)                  │
//! │    └── url() -> replay via node + playwright                │
//! │  login::*                                                   │
//! │    └── step bindings + dashboard assertion                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod login;
pub mod playwright;
pub mod server;

pub use config::HarnessConfig;
pub use error::{E2eError, E2eResult};
pub use playwright::{BrowserPage, PlaywrightConfig};
pub use server::{FixtureConfig, FixtureServer, ServerState};
