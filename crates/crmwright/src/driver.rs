//! PageDriver - the seam between page objects and the browser.
//!
//! Page objects, the form filler, the verifier and the navigation helper only
//! talk to [`PageDriver`]. The CDP-backed [`crate::browser::Page`] implements it
//! for real runs; [`MockDriver`] implements it in memory for unit tests.
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ Step defs    │──▶│ Page objects │──▶│ PageDriver   │
//! └──────────────┘   └──────────────┘   └──────┬───────┘
//!                                              │
//!                          ┌───────────────────┴──────────────┐
//!                          ▼                                  ▼
//!                   browser::Page (CDP)                 MockDriver
//! ```

use crate::locator::{Locator, DEFAULT_TIMEOUT_MS};
use crate::result::{CrmError, CrmResult};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Browser operations needed by the suite.
///
/// Element actions auto-wait up to the locator's timeout and fail with
/// [`CrmError::Timeout`] when the element never shows up. `is_visible` and
/// `text_visible` answer immediately.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate to URL and wait for the load event
    async fn goto(&self, url: &str) -> CrmResult<()>;

    /// Get current URL
    async fn current_url(&self) -> CrmResult<String>;

    /// Click element
    async fn click(&self, locator: &Locator) -> CrmResult<()>;

    /// Replace the value of a text-like control
    async fn fill(&self, locator: &Locator, value: &str) -> CrmResult<()>;

    /// Set a checkbox state
    async fn set_checked(&self, locator: &Locator, checked: bool) -> CrmResult<()>;

    /// Choose an option of a native `<select>` by its label
    async fn select_option(&self, locator: &Locator, option: &str) -> CrmResult<()>;

    /// Read the current value of a control
    async fn input_value(&self, locator: &Locator) -> CrmResult<String>;

    /// Whether the element is visible right now
    async fn is_visible(&self, locator: &Locator) -> CrmResult<bool>;

    /// Wait until the element is visible
    async fn wait_for(&self, locator: &Locator) -> CrmResult<()>;

    /// Whether the exact text is visible right now, page-wide or inside `scope`
    async fn text_visible(&self, text: &str, scope: Option<&Locator>) -> CrmResult<bool>;

    /// Take a PNG screenshot of the viewport
    async fn screenshot(&self) -> CrmResult<Vec<u8>>;

    /// How long element actions built by page objects wait
    fn action_timeout(&self) -> Duration {
        Duration::from_millis(DEFAULT_TIMEOUT_MS)
    }
}

/// A recorded driver call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    /// `goto(url)`
    Goto(String),
    /// `click(locator)`
    Click(String),
    /// `fill(locator, value)`
    Fill(String, String),
    /// `set_checked(locator, checked)`
    SetChecked(String, bool),
    /// `select_option(locator, option)`
    SelectOption(String, String),
    /// `wait_for(locator)`
    WaitFor(String),
    /// `screenshot()`
    Screenshot,
}

#[derive(Debug, Default)]
struct MockState {
    url: String,
    permissive: bool,
    elements: HashSet<String>,
    values: HashMap<String, String>,
    page_text: Vec<String>,
    scoped_text: HashMap<String, Vec<String>>,
    publish_on: Option<(String, Option<String>)>,
    screenshot: Option<Vec<u8>>,
    action_timeout: Option<Duration>,
    disconnected: bool,
    calls: Vec<DriverCall>,
}

/// Mock driver for unit testing.
///
/// Elements are keyed by [`Locator::describe`]. A locator that was never
/// added behaves like a missing element and fails with a timeout, unless the
/// driver is [`permissive`](MockDriver::permissive).
#[derive(Debug, Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl MockDriver {
    /// Create new mock driver with no elements
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock driver where every locator resolves
    #[must_use]
    pub fn permissive() -> Self {
        let driver = Self::new();
        driver.lock().permissive = true;
        driver
    }

    /// Set the action timeout page objects apply to their locators
    #[must_use]
    pub fn with_action_timeout(self, timeout: Duration) -> Self {
        self.lock().action_timeout = Some(timeout);
        self
    }

    /// Simulate a dead browser: page queries fail with a page error
    pub fn disconnect(&self) {
        self.lock().disconnected = true;
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a mock element
    pub fn add_element(&self, locator: &Locator) {
        let _ = self.lock().elements.insert(locator.describe());
    }

    /// Make text visible page-wide
    pub fn add_text(&self, text: impl Into<String>) {
        self.lock().page_text.push(text.into());
    }

    /// Make text visible inside a scope element
    pub fn add_scoped_text(&self, scope: &Locator, text: impl Into<String>) {
        self.lock()
            .scoped_text
            .entry(scope.describe())
            .or_default()
            .push(text.into());
    }

    /// When `trigger` is clicked, every filled value becomes visible text,
    /// inside `scope` when given, else page-wide. Simulates a record save.
    pub fn publish_values_on(&self, trigger: &Locator, scope: Option<&Locator>) {
        self.lock().publish_on = Some((trigger.describe(), scope.map(Locator::describe)));
    }

    /// Set mock screenshot bytes
    pub fn set_screenshot(&self, png: Vec<u8>) {
        self.lock().screenshot = Some(png);
    }

    /// Current value of a control
    #[must_use]
    pub fn value_of(&self, locator: &Locator) -> Option<String> {
        self.lock().values.get(&locator.describe()).cloned()
    }

    /// Get call history
    #[must_use]
    pub fn calls(&self) -> Vec<DriverCall> {
        self.lock().calls.clone()
    }

    /// Check if a call was recorded
    #[must_use]
    pub fn was_called(&self, call: &DriverCall) -> bool {
        self.lock().calls.contains(call)
    }

    fn connected(state: &MockState) -> CrmResult<()> {
        if state.disconnected {
            Err(CrmError::PageError {
                message: "target closed".to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn resolve(state: &MockState, locator: &Locator) -> CrmResult<String> {
        let key = locator.describe();
        if state.permissive || state.elements.contains(&key) {
            Ok(key)
        } else {
            Err(CrmError::timeout(key, locator.timeout_ms()))
        }
    }
}

#[async_trait]
impl PageDriver for MockDriver {
    async fn goto(&self, url: &str) -> CrmResult<()> {
        let mut state = self.lock();
        state.calls.push(DriverCall::Goto(url.to_string()));
        state.url = url.to_string();
        Ok(())
    }

    async fn current_url(&self) -> CrmResult<String> {
        let state = self.lock();
        Self::connected(&state)?;
        Ok(state.url.clone())
    }

    async fn click(&self, locator: &Locator) -> CrmResult<()> {
        let mut state = self.lock();
        let key = Self::resolve(&state, locator)?;
        state.calls.push(DriverCall::Click(key.clone()));
        if let Some((trigger, scope)) = state.publish_on.clone() {
            if trigger == key {
                let values: Vec<String> = state.values.values().cloned().collect();
                match scope {
                    Some(scope) => state.scoped_text.entry(scope).or_default().extend(values),
                    None => state.page_text.extend(values),
                }
            }
        }
        Ok(())
    }

    async fn fill(&self, locator: &Locator, value: &str) -> CrmResult<()> {
        let mut state = self.lock();
        let key = Self::resolve(&state, locator)?;
        state
            .calls
            .push(DriverCall::Fill(key.clone(), value.to_string()));
        let _ = state.values.insert(key, value.to_string());
        Ok(())
    }

    async fn set_checked(&self, locator: &Locator, checked: bool) -> CrmResult<()> {
        let mut state = self.lock();
        let key = Self::resolve(&state, locator)?;
        state.calls.push(DriverCall::SetChecked(key.clone(), checked));
        let _ = state.values.insert(key, checked.to_string());
        Ok(())
    }

    async fn select_option(&self, locator: &Locator, option: &str) -> CrmResult<()> {
        let mut state = self.lock();
        let key = Self::resolve(&state, locator)?;
        state
            .calls
            .push(DriverCall::SelectOption(key.clone(), option.to_string()));
        let _ = state.values.insert(key, option.to_string());
        Ok(())
    }

    async fn input_value(&self, locator: &Locator) -> CrmResult<String> {
        let state = self.lock();
        let key = Self::resolve(&state, locator)?;
        Ok(state.values.get(&key).cloned().unwrap_or_default())
    }

    async fn is_visible(&self, locator: &Locator) -> CrmResult<bool> {
        let state = self.lock();
        Ok(Self::resolve(&state, locator).is_ok())
    }

    async fn wait_for(&self, locator: &Locator) -> CrmResult<()> {
        let mut state = self.lock();
        let key = Self::resolve(&state, locator)?;
        state.calls.push(DriverCall::WaitFor(key));
        Ok(())
    }

    async fn text_visible(&self, text: &str, scope: Option<&Locator>) -> CrmResult<bool> {
        let state = self.lock();
        Self::connected(&state)?;
        let found = match scope {
            Some(scope) => state
                .scoped_text
                .get(&scope.describe())
                .is_some_and(|texts| texts.iter().any(|t| t == text)),
            None => {
                state.page_text.iter().any(|t| t == text)
                    || state
                        .scoped_text
                        .values()
                        .any(|texts| texts.iter().any(|t| t == text))
            }
        };
        Ok(found)
    }

    async fn screenshot(&self) -> CrmResult<Vec<u8>> {
        let mut state = self.lock();
        state.calls.push(DriverCall::Screenshot);
        state
            .screenshot
            .clone()
            .ok_or_else(|| CrmError::ScreenshotError {
                message: "No mock screenshot set".to_string(),
            })
    }

    fn action_timeout(&self) -> Duration {
        self.lock()
            .action_timeout
            .unwrap_or(Duration::from_millis(DEFAULT_TIMEOUT_MS))
    }
}
