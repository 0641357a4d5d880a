//! crmwright: page objects and form automation for Salesforce Lightning suites
//!
//! Gherkin scenarios describe record workflows with two-column data tables.
//! Step definitions turn each table into a [`FieldMap`] and hand it to a
//! [`RecordPage`], which fills the open form, saves, and checks the saved
//! values are visible.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    CRMWRIGHT Architecture                        │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Feature    │    │ Step defs  │    │ Page       │            │
//! │   │ files      │───►│ FieldMap   │───►│ objects    │            │
//! │   └────────────┘    └────────────┘    └─────┬──────┘            │
//! │                                             │                   │
//! │           FormFiller / Verifier / AppLauncher                   │
//! │                                             │                   │
//! │                                     ┌───────▼──────┐            │
//! │                                     │ PageDriver   │            │
//! │                                     │ CDP | Mock   │            │
//! │                                     └──────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]

mod artifacts;
mod browser;
mod config;
mod driver;
mod field_map;
mod form;
mod locator;
mod navigation;
mod result;
mod session;
mod tags;
mod verify;
mod wait;

/// Record page trait, registry and URL matching
pub mod page_object;

/// Concrete entity pages
pub mod pages;

pub use artifacts::{
    capture_on_failure, file_timestamp, sanitize_name, screenshot_path, ScenarioStatus,
};
pub use browser::BrowserConfig;
#[cfg(feature = "browser")]
pub use browser::{Browser, Page};
pub use config::{SuiteConfig, Viewport, DEFAULT_CONFIG_FILE, DEFAULT_REPORT_DIR};
pub use driver::{DriverCall, MockDriver, PageDriver};
pub use field_map::{is_blank, parse_flag, FieldMap, NONE_OPTION};
pub use form::{ControlKind, FieldSpec, FillReport, FormFiller};
pub use locator::{
    text_visible_query, Locator, LocatorOptions, Selector, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_TIMEOUT_MS,
};
pub use navigation::{home_url, object_list_url, AppLauncher};
pub use page_object::{PageRegistry, RecordPage, UrlMatcher, RECORD_BODY};
pub use pages::standard_registry;
pub use result::{CrmError, CrmResult};
pub use session::SessionPool;
pub use tags::{ExecutionMode, Tag, TagExpression, SERIAL_TAG};
pub use verify::{Missing, Verifier, VerifyScope, DEFAULT_VERIFY_TIMEOUT_MS};
pub use wait::{poll_until, WaitOptions};

/// Prelude for step definitions
pub mod prelude {
    pub use super::page_object::RecordPage;
    pub use super::pages::*;
    pub use super::{
        AppLauncher, CrmError, CrmResult, ExecutionMode, FieldMap, FieldSpec, Locator,
        PageDriver, PageRegistry, ScenarioStatus, SessionPool, SuiteConfig, Verifier,
        VerifyScope,
    };
    #[cfg(feature = "browser")]
    pub use super::{Browser, BrowserConfig, Page};
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::prelude::*;

    #[tokio::test]
    async fn test_prelude_covers_a_step() {
        let driver = crate::MockDriver::permissive();
        let registry = standard_registry();
        let page = registry.require("Account").unwrap();
        let map = FieldMap::new().with("Name", "Acme");
        let report = page.add_new(&driver, &map).await.unwrap();
        assert_eq!(report.filled, vec!["Name"]);
    }

    #[test]
    fn test_error_display() {
        let err = CrmError::BrowserNotFound;
        assert!(err.to_string().contains("CHROMIUM_PATH"));
    }
}
