//! Browser actions behind the approved login scenario
//!
//! Only "Valid user logs in successfully" is automated. The negative-path
//! scenario produced by the generator has no bindings and is never run.

use serde::{Deserialize, Serialize};
use tracing::info;

use scenariogen_common::generator::HAPPY_PATH_SCENARIO;
use scenariogen_common::{validate_scenarios, ScenarioBlock, ScenarioSet};

use crate::error::{E2eError, E2eResult};
use crate::playwright::BrowserPage;

/// The only scenario with step bindings
pub const APPROVED_SCENARIO: &str = HAPPY_PATH_SCENARIO;

pub const USERNAME_SELECTOR: &str = "#username";
pub const PASSWORD_SELECTOR: &str = "#password";
pub const LOGIN_BUTTON_SELECTOR: &str = "#login";

/// Suffix the final URL must carry after a successful login
pub const DASHBOARD_SUFFIX: &str = "dashboard.html";

/// Credentials typed into the sample app
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        }
    }
}

/// Given the user is on the login page
pub fn open_login_page(page: &mut BrowserPage, app_url: &str) {
    page.goto(app_url);
}

/// When the user enters valid credentials
pub fn enter_valid_credentials(page: &mut BrowserPage, credentials: &Credentials) {
    page.fill(USERNAME_SELECTOR, &credentials.username);
    page.fill(PASSWORD_SELECTOR, &credentials.password);
}

/// And the user clicks the Login button
pub fn click_login(page: &mut BrowserPage) {
    page.click(LOGIN_BUTTON_SELECTOR);
}

/// Then the user is redirected to the dashboard
pub async fn assert_redirected_to_dashboard(page: &BrowserPage) -> E2eResult<String> {
    let url = page.url().await?;
    check_dashboard_url(&url)?;
    info!("Redirected to dashboard: {}", url);
    Ok(url)
}

pub fn check_dashboard_url(url: &str) -> E2eResult<()> {
    if url.ends_with(DASHBOARD_SUFFIX) {
        Ok(())
    } else {
        Err(E2eError::AssertionFailed(format!(
            "expected URL ending with {}, got {}",
            DASHBOARD_SUFFIX, url
        )))
    }
}

/// Scenarios that may be handed to the browser.
///
/// Nothing passes unless the whole set validates; of a valid set only the
/// approved scenario is kept.
pub fn automatable_scenarios(scenarios: &ScenarioSet) -> Vec<&ScenarioBlock> {
    if !validate_scenarios(scenarios) {
        return Vec::new();
    }

    scenarios
        .iter()
        .filter(|block| block.scenario_name() == Some(APPROVED_SCENARIO))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playwright::{PageAction, PlaywrightConfig};
    use scenariogen_common::generate_scenarios;
    use std::path::Path;

    #[test]
    fn test_dashboard_url_check() {
        assert!(check_dashboard_url("http://127.0.0.1:4000/dashboard.html").is_ok());

        let err = check_dashboard_url("http://127.0.0.1:4000/sample_app.html").unwrap_err();
        assert!(matches!(err, E2eError::AssertionFailed(_)));
        assert!(check_dashboard_url("http://127.0.0.1:4000/dashboard.html?next=1").is_err());
    }

    #[test]
    fn test_login_steps_record_expected_actions() {
        let mut page = BrowserPage::new(PlaywrightConfig::default());
        open_login_page(&mut page, "http://127.0.0.1:4000/sample_app.html");
        enter_valid_credentials(&mut page, &Credentials::default());
        click_login(&mut page);

        let actions = page.actions();
        assert_eq!(actions.len(), 4);
        assert_eq!(
            actions[1],
            PageAction::Fill {
                selector: "#username".to_string(),
                value: "admin".to_string()
            }
        );
        assert_eq!(
            actions[2],
            PageAction::Fill {
                selector: "#password".to_string(),
                value: "admin123".to_string()
            }
        );
        assert_eq!(
            actions[3],
            PageAction::Click {
                selector: "#login".to_string()
            }
        );
    }

    #[test]
    fn test_only_happy_path_is_automatable() {
        let scenarios = generate_scenarios("Users must be able to login");
        let approved = automatable_scenarios(&scenarios);
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].scenario_name(), Some(APPROVED_SCENARIO));
    }

    #[test]
    fn test_invalid_set_is_not_automatable() {
        let mut scenarios = generate_scenarios("login");
        scenarios.push(ScenarioBlock::new(
            "Feature: Tricks\n  Scenario: Backflip\n    When the user performs a backflip",
        ));
        assert!(automatable_scenarios(&scenarios).is_empty());
    }

    #[test]
    fn test_feature_file_matches_generated_happy_path() {
        let feature = Path::new(env!("CARGO_MANIFEST_DIR")).join("features/login.feature");
        let feature = ScenarioBlock::new(std::fs::read_to_string(feature).unwrap());
        assert_eq!(feature.scenario_name(), Some(APPROVED_SCENARIO));

        let scenarios = generate_scenarios("login");
        let generated = scenarios.get(0).unwrap();

        let feature_steps: Vec<&str> = feature.step_lines().map(|s| s.text).collect();
        let generated_steps: Vec<&str> = generated.step_lines().map(|s| s.text).collect();
        assert_eq!(feature_steps, generated_steps);
    }
}
