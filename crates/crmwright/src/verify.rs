//! Post-save verification: every expected value must show up as visible text.
//!
//! The check is textual. With [`VerifyScope::Page`] any visible element on the
//! page counts, so a value that also appears in a list view or a toast passes.
//! Page objects that know where their record renders narrow this with
//! [`VerifyScope::Within`].

use crate::driver::PageDriver;
use crate::field_map::{is_blank, FieldMap};
use crate::locator::Locator;
use crate::result::{CrmError, CrmResult};
use crate::wait::{poll_until, WaitOptions};
use std::fmt;
use std::time::Duration;

/// Default time a value has to appear (matches an expect-style assertion)
pub const DEFAULT_VERIFY_TIMEOUT_MS: u64 = 5_000;

/// Where expected text is searched for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VerifyScope {
    /// Anywhere on the page
    #[default]
    Page,
    /// Inside the elements matching this locator
    Within(Locator),
}

impl fmt::Display for VerifyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page => f.write_str("page"),
            Self::Within(locator) => write!(f, "{locator}"),
        }
    }
}

/// A value that never became visible
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Missing {
    /// Table label
    pub label: String,
    /// Expected text
    pub text: String,
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' (field '{}')", self.text, self.label)
    }
}

/// Asserts field values are visible
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verifier {
    scope: VerifyScope,
    wait: WaitOptions,
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new(VerifyScope::Page)
    }
}

impl Verifier {
    /// Create a verifier for a scope
    #[must_use]
    pub const fn new(scope: VerifyScope) -> Self {
        Self {
            scope,
            wait: WaitOptions::new(
                Duration::from_millis(DEFAULT_VERIFY_TIMEOUT_MS),
                Duration::from_millis(crate::locator::DEFAULT_POLL_INTERVAL_MS),
            ),
        }
    }

    /// Set how long each value may take to appear
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.wait.timeout = timeout;
        self
    }

    /// Get the scope
    #[must_use]
    pub const fn scope(&self) -> &VerifyScope {
        &self.scope
    }

    /// Whether `text` shows up within the wait window.
    ///
    /// Timeouts reported by the driver count as "not yet". Any other driver
    /// error ends the wait and is returned.
    async fn is_shown<D: PageDriver + ?Sized>(&self, driver: &D, text: &str) -> CrmResult<bool> {
        let scope = match &self.scope {
            VerifyScope::Page => None,
            VerifyScope::Within(locator) => Some(locator),
        };
        let outcome = poll_until(text, self.wait, move || async move {
            match driver.text_visible(text, scope).await {
                Ok(true) => Some(Ok(())),
                Ok(false) => None,
                Err(e) if e.is_timeout() => {
                    tracing::trace!(text, error = %e, "text probe timed out");
                    None
                }
                Err(e) => Some(Err(e)),
            }
        })
        .await;
        match outcome {
            Ok(Ok(())) => Ok(true),
            Ok(Err(e)) => Err(e),
            Err(_) => Ok(false),
        }
    }

    /// Values of the map that are not visible, in table order.
    ///
    /// # Errors
    ///
    /// Returns the driver's error when the page cannot be queried
    pub async fn missing<D: PageDriver + ?Sized>(
        &self,
        driver: &D,
        map: &FieldMap,
    ) -> CrmResult<Vec<Missing>> {
        let mut missing = Vec::new();
        for (label, value) in map.iter() {
            if is_blank(value) {
                continue;
            }
            if !self.is_shown(driver, value.trim()).await? {
                missing.push(Missing {
                    label: label.to_string(),
                    text: value.trim().to_string(),
                });
            }
        }
        Ok(missing)
    }

    /// Assert every non-blank value is visible, stopping at the first miss.
    ///
    /// # Errors
    ///
    /// Returns [`CrmError::AssertionFailed`] naming the missing text and its
    /// label, or the driver's error when the page cannot be queried
    pub async fn verify<D: PageDriver + ?Sized>(&self, driver: &D, map: &FieldMap) -> CrmResult<()> {
        for (label, value) in map.iter() {
            if is_blank(value) {
                continue;
            }
            let text = value.trim();
            if !self.is_shown(driver, text).await? {
                let missing = Missing {
                    label: label.to_string(),
                    text: text.to_string(),
                };
                return Err(CrmError::assertion(format!(
                    "expected text {missing} to be visible on {}",
                    self.scope
                )));
            }
            tracing::debug!(label, text, "verified");
        }
        Ok(())
    }

    /// Assert every non-blank value is visible, reporting all misses together.
    ///
    /// # Errors
    ///
    /// Returns [`CrmError::AssertionFailed`] listing every missing value, or
    /// the driver's error when the page cannot be queried
    pub async fn verify_all<D: PageDriver + ?Sized>(
        &self,
        driver: &D,
        map: &FieldMap,
    ) -> CrmResult<()> {
        let missing = self.missing(driver, map).await?;
        if missing.is_empty() {
            return Ok(());
        }
        let list = missing
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Err(CrmError::assertion(format!(
            "{} value(s) not visible on {}: {list}",
            missing.len(),
            self.scope
        )))
    }
}
