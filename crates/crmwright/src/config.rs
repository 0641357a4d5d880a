//! Suite configuration.
//!
//! Resolution order, later wins:
//!
//! 1. built-in defaults
//! 2. `crmwright.yaml` (or the file given explicitly)
//! 3. `.env` in the working directory, loaded into the process environment
//! 4. environment variables (`SF_LOGIN_URL`, `SF_USERNAME`, `SF_PASSWORD`,
//!    `CRMWRIGHT_HEADLESS`, `CRMWRIGHT_WORKERS`, `CRMWRIGHT_REPORT_DIR`,
//!    `CHROMIUM_PATH`)

use crate::browser::BrowserConfig;
use crate::result::{CrmError, CrmResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "crmwright.yaml";

/// Default report directory
pub const DEFAULT_REPORT_DIR: &str = "cucumber-reports";

const REDACTED: &str = "********";

/// Browser viewport size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in CSS pixels
    pub width: u32,
    /// Height in CSS pixels
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1440,
            height: 900,
        }
    }
}

/// Everything a run needs to know about the org and the browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuiteConfig {
    /// Login page of the org
    pub login_url: String,
    /// Salesforce username
    pub username: String,
    /// Salesforce password
    pub password: String,
    /// Run Chromium without a window
    pub headless: bool,
    /// Disable the Chromium sandbox (containers)
    pub no_sandbox: bool,
    /// Viewport size
    pub viewport: Viewport,
    /// Auto-wait timeout for element actions
    pub action_timeout_ms: u64,
    /// Timeout for page navigations
    pub navigation_timeout_ms: u64,
    /// Where reports and screenshots go
    pub report_dir: PathBuf,
    /// Concurrent parallel scenarios (0 = one per CPU)
    pub workers: usize,
    /// Chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            login_url: "https://login.salesforce.com".to_string(),
            username: String::new(),
            password: String::new(),
            headless: true,
            no_sandbox: false,
            viewport: Viewport::default(),
            action_timeout_ms: crate::locator::DEFAULT_TIMEOUT_MS,
            navigation_timeout_ms: 60_000,
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
            workers: 0,
            chromium_path: None,
        }
    }
}

fn parse_bool(var: &str, value: &str) -> CrmResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(CrmError::config(format!("{var}: expected a boolean, got '{other}'"))),
    }
}

impl SuiteConfig {
    /// Create default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse YAML
    ///
    /// # Errors
    ///
    /// Returns [`CrmError::Yaml`] for malformed YAML or unknown keys
    pub fn from_yaml_str(yaml: &str) -> CrmResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Read a YAML file
    ///
    /// # Errors
    ///
    /// Returns an I/O or YAML error
    pub fn from_file(path: &Path) -> CrmResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Resolve the configuration from file, `.env` and the environment.
    ///
    /// An explicit `path` must exist; without one, `crmwright.yaml` is read
    /// only if present.
    ///
    /// # Errors
    ///
    /// Returns an error for unreadable files, a malformed `.env` or invalid
    /// variable values
    pub fn load(path: Option<&Path>) -> CrmResult<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        match dotenvy::dotenv() {
            Ok(env_file) => tracing::debug!(path = %env_file.display(), "loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(CrmError::config(format!(".env: {e}"))),
        }

        let config = base.with_env(|var| std::env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`
    ///
    /// # Errors
    ///
    /// Returns [`CrmError::Config`] for unparsable values
    pub fn with_env<F>(mut self, lookup: F) -> CrmResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SF_LOGIN_URL") {
            self.login_url = url;
        }
        if let Some(username) = lookup("SF_USERNAME") {
            self.username = username;
        }
        if let Some(password) = lookup("SF_PASSWORD") {
            self.password = password;
        }
        if let Some(headless) = lookup("CRMWRIGHT_HEADLESS") {
            self.headless = parse_bool("CRMWRIGHT_HEADLESS", &headless)?;
        }
        if let Some(workers) = lookup("CRMWRIGHT_WORKERS") {
            self.workers = workers.trim().parse().map_err(|_| {
                CrmError::config(format!("CRMWRIGHT_WORKERS: expected a number, got '{workers}'"))
            })?;
        }
        if let Some(dir) = lookup("CRMWRIGHT_REPORT_DIR") {
            self.report_dir = PathBuf::from(dir);
        }
        if let Some(path) = lookup("CHROMIUM_PATH") {
            self.chromium_path = Some(path);
        }
        Ok(self)
    }

    /// Check values that would only fail later, mid-run
    ///
    /// # Errors
    ///
    /// Returns [`CrmError::Config`] describing the first problem
    pub fn validate(&self) -> CrmResult<()> {
        if !(self.login_url.starts_with("https://") || self.login_url.starts_with("http://")) {
            return Err(CrmError::config(format!(
                "login_url must be an http(s) URL, got '{}'",
                self.login_url
            )));
        }
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(CrmError::config("viewport must be non-empty"));
        }
        if self.action_timeout_ms == 0 {
            return Err(CrmError::config("action_timeout_ms must be positive"));
        }
        Ok(())
    }

    /// Set login URL
    #[must_use]
    pub fn with_login_url(mut self, url: impl Into<String>) -> Self {
        self.login_url = url.into();
        self
    }

    /// Set credentials
    #[must_use]
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set worker count
    #[must_use]
    pub const fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set report directory
    #[must_use]
    pub fn with_report_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.report_dir = dir.into();
        self
    }

    /// Copy safe to print: password masked
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.password.is_empty() {
            copy.password = REDACTED.to_string();
        }
        copy
    }

    /// YAML rendering of [`redacted`](Self::redacted)
    ///
    /// # Errors
    ///
    /// Returns [`CrmError::Yaml`] if serialization fails
    pub fn to_redacted_yaml(&self) -> CrmResult<String> {
        Ok(serde_yaml_ng::to_string(&self.redacted())?)
    }

    /// Effective number of parallel workers
    #[must_use]
    pub fn effective_workers(&self) -> usize {
        if self.workers == 0 {
            std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
        } else {
            self.workers
        }
    }

    /// Element action timeout
    #[must_use]
    pub const fn action_timeout(&self) -> Duration {
        Duration::from_millis(self.action_timeout_ms)
    }

    /// Navigation timeout
    #[must_use]
    pub const fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    /// Directory failure screenshots are written to
    #[must_use]
    pub fn screenshot_dir(&self) -> PathBuf {
        self.report_dir.join("screenshots")
    }

    /// Browser launch settings
    #[must_use]
    pub fn browser_config(&self) -> BrowserConfig {
        let mut config = BrowserConfig::default()
            .with_headless(self.headless)
            .with_viewport(self.viewport.width, self.viewport.height)
            .with_navigation_timeout(self.navigation_timeout())
            .with_action_timeout(self.action_timeout());
        if self.no_sandbox {
            config = config.with_no_sandbox();
        }
        if let Some(path) = &self.chromium_path {
            config = config.with_chromium_path(path.clone());
        }
        config
    }
}
