//! Harness configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::E2eResult;
use crate::login::Credentials;
use crate::playwright::PlaywrightConfig;
use crate::server::FixtureConfig;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "SCENARIOGEN_E2E_CONFIG";

/// Harness configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Fixture server configuration
    pub fixture: FixtureConfig,

    /// Browser configuration
    pub browser: PlaywrightConfig,

    /// Login credentials for the sample app
    pub credentials: Credentials,
}

impl HarnessConfig {
    /// Load configuration from file, falling back to defaults when absent
    pub fn load(path: &Path) -> E2eResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> E2eResult<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from `SCENARIOGEN_E2E_CONFIG` (or `e2e.toml` in this crate) and
    /// apply environment overrides. Relative paths resolve against the
    /// config file's directory.
    pub fn from_env() -> E2eResult<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| default_config_dir().join("e2e.toml"));

        let mut config = Self::load(&path)?;
        let base = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(default_config_dir);
        config.resolve_paths(&base);
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Make relative paths absolute against `base`
    pub fn resolve_paths(&mut self, base: &Path) {
        if self.fixture.root_dir.is_relative() {
            self.fixture.root_dir = base.join(&self.fixture.root_dir);
        }
        if let Some(node_path) = &self.browser.node_path {
            if node_path.is_relative() {
                self.browser.node_path = Some(base.join(node_path));
            }
        }
    }

    fn apply_env_overrides(&mut self) -> E2eResult<()> {
        if let Ok(browser) = std::env::var("SCENARIOGEN_E2E_BROWSER") {
            self.browser.browser = browser.parse()?;
        }
        if let Ok(headless) = std::env::var("SCENARIOGEN_E2E_HEADLESS") {
            self.browser.headless = !matches!(headless.as_str(), "0" | "false" | "no");
        }
        if let Ok(node_path) = std::env::var("SCENARIOGEN_E2E_NODE_PATH") {
            self.browser.node_path = Some(PathBuf::from(node_path));
        }
        Ok(())
    }
}

/// Directory of this crate, where the sample app and feature files live
pub fn default_config_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playwright::Browser;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = HarnessConfig::load(&tmp.path().join("nope.toml")).unwrap();
        assert_eq!(config.fixture.entry_file, "sample_app.html");
        assert_eq!(config.credentials.username, "admin");
        assert_eq!(config.credentials.password, "admin123");
        assert!(config.browser.headless);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("e2e.toml");
        std::fs::write(
            &path,
            "[browser]\nbrowser = \"webkit\"\n\n[fixture]\nshutdown_grace_ms = 250\n",
        )
        .unwrap();

        let config = HarnessConfig::load(&path).unwrap();
        assert_eq!(config.browser.browser, Browser::Webkit);
        assert_eq!(config.browser.viewport_width, 1280);
        assert_eq!(config.fixture.shutdown_grace_ms, 250);
        assert_eq!(config.fixture.entry_file, "sample_app.html");
    }

    #[test]
    fn test_save_then_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("e2e.toml");

        let mut config = HarnessConfig::default();
        config.credentials.username = "root".to_string();
        config.browser.node_path = Some(PathBuf::from("/opt/node_modules"));
        config.save(&path).unwrap();

        let loaded = HarnessConfig::load(&path).unwrap();
        assert_eq!(loaded.credentials.username, "root");
        assert_eq!(loaded.browser.node_path, Some(PathBuf::from("/opt/node_modules")));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("e2e.toml");
        std::fs::write(&path, "[fixture\nroot_dir = ").unwrap();
        assert!(HarnessConfig::load(&path).is_err());
    }

    #[test]
    fn test_resolve_paths() {
        let mut config = HarnessConfig::default();
        config.browser.node_path = Some(PathBuf::from("node_modules"));
        config.resolve_paths(Path::new("/srv/e2e"));

        assert_eq!(config.fixture.root_dir, PathBuf::from("/srv/e2e/app"));
        assert_eq!(config.browser.node_path, Some(PathBuf::from("/srv/e2e/node_modules")));
    }
}
