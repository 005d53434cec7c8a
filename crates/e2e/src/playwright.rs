//! Playwright browser automation
//!
//! A [`BrowserPage`] records page actions and replays them in one generated
//! Node script whenever the current URL is requested, so every step of a
//! scenario runs in the same browser context.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{E2eError, E2eResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

impl std::str::FromStr for Browser {
    type Err = E2eError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chromium" => Ok(Browser::Chromium),
            "firefox" => Ok(Browser::Firefox),
            "webkit" => Ok(Browser::Webkit),
            other => Err(E2eError::InvalidConfig(format!("unknown browser: {}", other))),
        }
    }
}

/// A recorded page interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PageAction {
    Goto { url: String },
    Fill { selector: String, value: String },
    Click { selector: String },
}

impl PageAction {
    fn name(&self) -> String {
        match self {
            PageAction::Goto { url } => format!("goto:{}", url),
            PageAction::Fill { selector, .. } => format!("fill:{}", selector),
            PageAction::Click { selector } => format!("click:{}", selector),
        }
    }

    fn to_js(&self) -> E2eResult<String> {
        let js = match self {
            PageAction::Goto { url } => {
                format!("    await page.goto({});", serde_json::to_string(url)?)
            }
            PageAction::Fill { selector, value } => format!(
                "    await page.fill({}, {});",
                serde_json::to_string(selector)?,
                serde_json::to_string(value)?
            ),
            PageAction::Click { selector } => format!(
                "    await page.click({});\n    await page.waitForLoadState();",
                serde_json::to_string(selector)?
            ),
        };
        Ok(js)
    }
}

/// Last line printed by a generated script
#[derive(Debug, Clone, Deserialize)]
struct ScriptOutcome {
    success: bool,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Shared page handle used by the step bindings
#[derive(Debug, Clone)]
pub struct BrowserPage {
    config: PlaywrightConfig,
    actions: Vec<PageAction>,
}

impl BrowserPage {
    pub fn new(config: PlaywrightConfig) -> Self {
        Self {
            config,
            actions: Vec::new(),
        }
    }

    pub fn goto(&mut self, url: &str) {
        self.push(PageAction::Goto {
            url: url.to_string(),
        });
    }

    pub fn fill(&mut self, selector: &str, value: &str) {
        self.push(PageAction::Fill {
            selector: selector.to_string(),
            value: value.to_string(),
        });
    }

    pub fn click(&mut self, selector: &str) {
        self.push(PageAction::Click {
            selector: selector.to_string(),
        });
    }

    pub fn actions(&self) -> &[PageAction] {
        &self.actions
    }

    fn push(&mut self, action: PageAction) {
        debug!("Recording page action: {}", action.name());
        self.actions.push(action);
    }

    /// Build the Playwright script replaying every recorded action
    pub fn build_script(&self) -> E2eResult<String> {
        let mut script = String::new();

        script.push_str(&format!(
            r#"
const {{ chromium, firefox, webkit }} = require('playwright');

(async () => {{
  const browser = await {browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  const page = await context.newPage();
  page.setDefaultTimeout({timeout});

  try {{
"#,
            browser = self.config.browser.as_str(),
            headless = self.config.headless,
            width = self.config.viewport_width,
            height = self.config.viewport_height,
            timeout = self.config.action_timeout_ms,
        ));

        for (i, action) in self.actions.iter().enumerate() {
            script.push_str(&format!("\n    // Step {}: {}\n", i + 1, action.name()));
            script.push_str(&action.to_js()?);
            script.push('\n');
        }

        script.push_str(
            r#"
    console.log(JSON.stringify({ success: true, url: page.url() }));
  } catch (error) {
    console.log(JSON.stringify({ success: false, url: page.url(), error: error.message }));
    process.exitCode = 1;
  } finally {
    await browser.close();
  }
})();
"#,
        );

        Ok(script)
    }

    /// Replay the recorded actions and return the page's final URL
    pub async fn url(&self) -> E2eResult<String> {
        let script = self.build_script()?;
        let outcome = self.run_script(&script).await?;

        match outcome {
            ScriptOutcome {
                success: true,
                url: Some(url),
                ..
            } => {
                info!("Page settled at {}", url);
                Ok(url)
            }
            ScriptOutcome { url, error, .. } => Err(E2eError::Playwright(format!(
                "{} (page was at {})",
                error.unwrap_or_else(|| "script reported failure".to_string()),
                url.as_deref().unwrap_or("<unknown>")
            ))),
        }
    }

    async fn run_script(&self, script: &str) -> E2eResult<ScriptOutcome> {
        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("steps.js");
        std::fs::write(&script_path, script)?;

        debug!("Running Playwright script: {}", script_path.display());

        let mut cmd = self.config.node_command();
        cmd.arg(&script_path)
            .current_dir(temp_dir.path())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.config.script_timeout(), cmd.output())
            .await
            .map_err(|_| {
                E2eError::Timeout(format!(
                    "Playwright script after {} ms",
                    self.config.script_timeout_ms
                ))
            })??;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let last_line = stdout.lines().rev().find(|line| !line.trim().is_empty());

        match last_line.map(serde_json::from_str::<ScriptOutcome>) {
            Some(Ok(outcome)) => Ok(outcome),
            _ => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(E2eError::Playwright(format!(
                    "Script failed ({}):\nstdout: {}\nstderr: {}",
                    output.status, stdout, stderr
                )))
            }
        }
    }
}

/// Check that node can load the `playwright` package
pub async fn check_playwright_installed(config: &PlaywrightConfig) -> E2eResult<()> {
    let status = config
        .node_command()
        .args(["-e", "require.resolve('playwright')"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    match status {
        Ok(status) if status.success() => Ok(()),
        _ => Err(E2eError::PlaywrightNotFound),
    }
}

/// Configuration for Playwright
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaywrightConfig {
    pub browser: Browser,
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,

    /// Default timeout for each page action
    pub action_timeout_ms: u64,

    /// Upper bound for a whole replay
    pub script_timeout_ms: u64,

    /// Node executable
    pub node_binary: PathBuf,

    /// Directory holding `node_modules/playwright`, exported as NODE_PATH
    pub node_path: Option<PathBuf>,
}

impl PlaywrightConfig {
    pub fn script_timeout(&self) -> Duration {
        Duration::from_millis(self.script_timeout_ms)
    }

    fn node_command(&self) -> Command {
        let mut cmd = Command::new(&self.node_binary);
        if let Some(node_path) = &self.node_path {
            cmd.env("NODE_PATH", node_path);
        }
        cmd
    }
}

impl Default for PlaywrightConfig {
    fn default() -> Self {
        Self {
            browser: Browser::Chromium,
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            action_timeout_ms: 5000,
            script_timeout_ms: 60_000,
            node_binary: PathBuf::from("node"),
            node_path: None,
        }
    }
}
