//! Scenario state shared by the step definitions.

use crmwright::prelude::*;
use crmwright::FillReport;
use cucumber::World;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A browser page plus whether it already holds a Salesforce session.
///
/// Serial scenarios of a feature share one `Session`, so the login flag
/// travels with the page.
#[derive(Debug, Clone)]
pub struct Session {
    pub page: Page,
    logged_in: Arc<AtomicBool>,
}

impl Session {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            logged_in: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in.load(Ordering::Acquire)
    }

    pub fn mark_logged_in(&self) {
        self.logged_in.store(true, Ordering::Release);
    }
}

#[derive(Debug, Default, World)]
pub struct SalesforceWorld {
    pub config: Arc<SuiteConfig>,
    pub session: Option<Session>,
    pub mode: ExecutionMode,
    registry: PageRegistry,
    launcher: AppLauncher,
    /// Entity and values of the last record created in this scenario
    last_record: Option<(String, FieldMap)>,
}

impl SalesforceWorld {
    /// Called from the before hook with the scenario's page
    pub fn attach(&mut self, config: Arc<SuiteConfig>, session: Session, mode: ExecutionMode) {
        self.config = config;
        self.session = Some(session);
        self.mode = mode;
        self.registry = standard_registry();
    }

    pub fn page(&self) -> CrmResult<&Page> {
        self.session
            .as_ref()
            .map(|s| &s.page)
            .ok_or_else(|| CrmError::config("no browser page attached to this scenario"))
    }

    pub async fn log_in(&self) -> CrmResult<()> {
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| CrmError::config("no browser page attached to this scenario"))?;
        if session.is_logged_in() {
            tracing::debug!("session already logged in");
            return Ok(());
        }
        LoginPage::new()
            .login(
                &session.page,
                &self.config.login_url,
                &self.config.username,
                &self.config.password,
            )
            .await?;
        session.mark_logged_in();
        Ok(())
    }

    /// Open an entity's list (or any other app) through the App Launcher
    pub async fn open_app(&self, name: &str) -> CrmResult<()> {
        let page = self.page()?;
        match self.registry.get(name) {
            Some(entity) => entity.open(page, &self.launcher).await,
            None => self.launcher.open_app(page, name).await,
        }
    }

    /// Open an entity's list view by URL on the org the browser is on
    pub async fn open_list(&self, entity: &str) -> CrmResult<()> {
        let page = self.page()?;
        let base = origin(&page.current_url().await?)?;
        self.registry
            .require(entity)?
            .open_list(page, &self.launcher, &base)
            .await
    }

    pub async fn create(&mut self, entity: &str, map: FieldMap) -> CrmResult<FillReport> {
        let report = self
            .registry
            .require(entity)?
            .add_new(self.page()?, &map)
            .await?;
        if !report.unmatched.is_empty() {
            tracing::warn!(entity, unmatched = ?report.unmatched, "labels without a control");
        }
        self.last_record = Some((entity.to_string(), map));
        Ok(report)
    }

    /// Check the last created record's values, page-wide or in the record body
    pub async fn verify_last_record(&self, in_record_body: bool) -> CrmResult<()> {
        let (entity, map) = self
            .last_record
            .as_ref()
            .ok_or_else(|| CrmError::assertion("no record was created in this scenario"))?;
        let page = self.registry.require(entity)?;
        if in_record_body {
            page.verify_in_record(self.page()?, map).await
        } else {
            page.verify(self.page()?, map).await
        }
    }

    /// Soft check: every value of the table, all misses reported at once
    pub async fn verify_visible(&self, map: &FieldMap) -> CrmResult<()> {
        Verifier::default().verify_all(self.page()?, map).await
    }

    /// Current URL for failure messages; empty when unknown
    pub async fn page_url(&self) -> String {
        match self.page() {
            Ok(page) => page.current_url().await.unwrap_or_default(),
            Err(_) => String::new(),
        }
    }

    pub async fn record_id(&self, entity: &str) -> CrmResult<Option<String>> {
        self.registry
            .require(entity)?
            .current_record_id(self.page()?)
            .await
    }
}

/// `https://host/path?q` -> `https://host`
fn origin(url: &str) -> CrmResult<String> {
    let scheme_end = url
        .find("://")
        .map(|i| i + 3)
        .ok_or_else(|| CrmError::config(format!("not an absolute URL: {url}")))?;
    let host_end = url[scheme_end..]
        .find('/')
        .map_or(url.len(), |i| scheme_end + i);
    Ok(url[..host_end].to_string())
}
