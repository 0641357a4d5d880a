//! Salesforce login form

use crate::driver::PageDriver;
use crate::locator::Locator;
use crate::result::{CrmError, CrmResult};
use std::time::Duration;

/// Username/password login page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginPage {
    username: Locator,
    password: Locator,
    submit: Locator,
    landed: Locator,
}

impl Default for LoginPage {
    fn default() -> Self {
        Self {
            username: Locator::new("input#username"),
            password: Locator::new("input#password"),
            submit: Locator::new("input#Login"),
            landed: Locator::button("App Launcher"),
        }
    }
}

impl LoginPage {
    /// Create the standard login page
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// How long the org may take to show Lightning after login
    #[must_use]
    pub fn with_landing_timeout(mut self, timeout: Duration) -> Self {
        self.landed = self.landed.with_timeout(timeout);
        self
    }

    /// Element whose presence means login succeeded
    #[must_use]
    pub fn with_landing_marker(mut self, locator: Locator) -> Self {
        self.landed = locator;
        self
    }

    /// Log in and wait for Lightning to load.
    ///
    /// # Errors
    ///
    /// Returns [`CrmError::Config`] for empty credentials, otherwise the
    /// driver's error. A rejected password shows up as a timeout waiting for
    /// the landing marker.
    pub async fn login<D: PageDriver + ?Sized>(
        &self,
        driver: &D,
        login_url: &str,
        username: &str,
        password: &str,
    ) -> CrmResult<()> {
        if username.is_empty() || password.is_empty() {
            return Err(CrmError::config("username and password are required to log in"));
        }
        tracing::info!(url = login_url, username, "logging in");
        driver.goto(login_url).await?;
        let timeout = driver.action_timeout();
        driver
            .fill(&self.username.clone().with_timeout(timeout), username)
            .await?;
        driver
            .fill(&self.password.clone().with_timeout(timeout), password)
            .await?;
        driver.click(&self.submit.clone().with_timeout(timeout)).await?;
        driver.wait_for(&self.landed).await?;
        tracing::info!(username, "logged in");
        Ok(())
    }
}
