//! Record page objects.
//!
//! Every Salesforce entity the suite touches follows one shape: open the
//! list, click New, fill the form from a field map, Save, then check the saved
//! values are visible. [`RecordPage`] captures that shape once; concrete pages
//! in [`crate::pages`] only declare their names and field table.

use crate::driver::PageDriver;
use crate::field_map::FieldMap;
use crate::form::{ControlKind, FieldSpec, FillReport, FormFiller};
use crate::locator::Locator;
use crate::navigation::AppLauncher;
use crate::result::{CrmError, CrmResult};
use crate::verify::{Verifier, VerifyScope};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// Component hosting the body of a Lightning record page
pub const RECORD_BODY: &str = "one-record-home-flexipage2";

/// A Salesforce entity with a New/Save record form.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug)]
/// struct CasePage;
///
/// impl RecordPage for CasePage {
///     fn object_name(&self) -> &'static str { "Cases" }
///     fn api_name(&self) -> &'static str { "Case" }
///     fn fields(&self) -> &'static [FieldSpec] { FIELDS }
/// }
/// ```
#[async_trait]
pub trait RecordPage: fmt::Debug + Send + Sync {
    /// Name shown in the App Launcher (plural label, e.g. "Work Orders")
    fn object_name(&self) -> &'static str;

    /// Object API name (e.g. "WorkOrder")
    fn api_name(&self) -> &'static str;

    /// Controls of the New record form
    fn fields(&self) -> &'static [FieldSpec];

    /// Extra names scenarios use for this entity
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// The list view's New button
    fn new_button(&self) -> Locator {
        Locator::button("New")
    }

    /// The record form's Save button
    fn save_button(&self) -> Locator {
        Locator::new("button[name='SaveEdit']")
    }

    /// Where [`verify`](RecordPage::verify) looks for saved values
    fn verify_scope(&self) -> VerifyScope {
        VerifyScope::Page
    }

    /// Verifier used after save
    fn verifier(&self) -> Verifier {
        Verifier::new(self.verify_scope())
    }

    /// Open the entity's list view through the App Launcher.
    ///
    /// # Errors
    ///
    /// Returns a timeout when a launcher element does not appear
    async fn open(&self, driver: &dyn PageDriver, launcher: &AppLauncher) -> CrmResult<()> {
        launcher.open_app(driver, self.object_name()).await
    }

    /// Open the entity's list view by URL.
    ///
    /// # Errors
    ///
    /// Returns the driver's navigation error
    async fn open_list(
        &self,
        driver: &dyn PageDriver,
        launcher: &AppLauncher,
        base_url: &str,
    ) -> CrmResult<()> {
        launcher
            .open_object_list(driver, base_url, self.api_name())
            .await
    }

    /// Click New, fill the form from `map`, click Save.
    ///
    /// Buttons wait up to the driver's action timeout.
    ///
    /// # Errors
    ///
    /// Returns the first driver error; Save is not clicked if filling failed
    async fn add_new(&self, driver: &dyn PageDriver, map: &FieldMap) -> CrmResult<FillReport> {
        tracing::info!(object = self.api_name(), fields = map.len(), "creating record");
        let timeout = driver.action_timeout();
        driver.click(&self.new_button().with_timeout(timeout)).await?;
        let report = FormFiller::new(self.fields()).fill(driver, map).await?;
        driver.click(&self.save_button().with_timeout(timeout)).await?;
        Ok(report)
    }

    /// Assert the map's values are visible within [`verify_scope`](RecordPage::verify_scope).
    ///
    /// # Errors
    ///
    /// Returns [`CrmError::AssertionFailed`] for the first missing value
    async fn verify(&self, driver: &dyn PageDriver, map: &FieldMap) -> CrmResult<()> {
        self.verifier()
            .verify(driver, &self.displayed_values(map))
            .await
    }

    /// Assert the map's values are visible in the record body only.
    ///
    /// # Errors
    ///
    /// Returns [`CrmError::AssertionFailed`] for the first missing value
    async fn verify_in_record(&self, driver: &dyn PageDriver, map: &FieldMap) -> CrmResult<()> {
        Verifier::new(VerifyScope::Within(Locator::new(RECORD_BODY)))
            .verify(driver, &self.displayed_values(map))
            .await
    }

    /// Pairs whose value shows up as text after save.
    ///
    /// Rows naming the same control keep only the value the form ended up
    /// with. Checkbox flags render as a ticked box, not as `true`, so they are
    /// dropped. Labels without a control stay in.
    fn displayed_values(&self, map: &FieldMap) -> FieldMap {
        let filler = FormFiller::new(self.fields());
        filler
            .effective(map)
            .iter()
            .filter(|(label, _)| {
                !matches!(filler.resolve(label), Some(spec) if spec.control == ControlKind::Checkbox)
            })
            .collect()
    }

    /// Id of the record the browser is showing, if it is one of ours
    ///
    /// # Errors
    ///
    /// Returns the driver's error reading the URL
    async fn current_record_id(&self, driver: &dyn PageDriver) -> CrmResult<Option<String>> {
        let url = driver.current_url().await?;
        let matcher = UrlMatcher::new("/lightning/r/:object/:id/view");
        let params = matcher.extract_params(&url);
        Ok(match params.get("object") {
            Some(object) if object == self.api_name() => params.get("id").cloned(),
            _ => None,
        })
    }
}

/// Lowercase alphanumerics only: "Work Orders" -> "workorders"
fn normalize(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// English singular of a normalized plural, good enough for object labels
fn singular(name: &str) -> String {
    if let Some(stem) = name.strip_suffix("ies") {
        format!("{stem}y")
    } else if let Some(stem) = name.strip_suffix('s') {
        stem.to_string()
    } else {
        name.to_string()
    }
}

/// Page objects by entity name.
///
/// Lookup ignores case, spaces and punctuation and accepts singular or plural:
/// `"Work Order"`, `"work orders"` and `"WorkOrder"` resolve to the same page.
#[derive(Debug, Default, Clone)]
pub struct PageRegistry {
    pages: HashMap<String, Arc<dyn RecordPage>>,
    order: BTreeMap<&'static str, Arc<dyn RecordPage>>,
}

impl PageRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page object under all of its names
    pub fn register<P: RecordPage + 'static>(&mut self, page: P) {
        let page: Arc<dyn RecordPage> = Arc::new(page);
        let object = normalize(page.object_name());
        let mut keys = vec![
            singular(&object),
            object,
            normalize(page.api_name()),
        ];
        keys.extend(page.aliases().iter().map(|a| normalize(a)));
        for key in keys {
            let _ = self.pages.insert(key, Arc::clone(&page));
        }
        let _ = self.order.insert(page.object_name(), page);
    }

    /// Builder-style register
    #[must_use]
    pub fn with<P: RecordPage + 'static>(mut self, page: P) -> Self {
        self.register(page);
        self
    }

    /// Look up a page by entity name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn RecordPage>> {
        let key = normalize(name);
        self.pages
            .get(&key)
            .or_else(|| self.pages.get(&singular(&key)))
            .cloned()
    }

    /// Look up a page by entity name, failing on unknown names
    ///
    /// # Errors
    ///
    /// Returns [`CrmError::UnknownEntity`]
    pub fn require(&self, name: &str) -> CrmResult<Arc<dyn RecordPage>> {
        self.get(name).ok_or_else(|| CrmError::UnknownEntity {
            name: name.to_string(),
        })
    }

    /// Launcher names of every registered page, sorted
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        self.order.keys().copied().collect()
    }

    /// Number of registered pages
    #[must_use]
    pub fn count(&self) -> usize {
        self.order.len()
    }
}

/// URL path matcher, e.g. `/lightning/r/:object/:id/view`.
///
/// Scheme, host, query and fragment of the URL are ignored.
#[derive(Debug, Clone)]
pub struct UrlMatcher {
    pattern: String,
    segments: Vec<UrlSegment>,
}

#[derive(Debug, Clone)]
enum UrlSegment {
    Literal(String),
    Wildcard,
    Parameter(String),
}

fn path_segments(url: &str) -> Vec<&str> {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| {
        rest.find('/').map_or("", |slash| &rest[slash..])
    });
    let path = without_scheme
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    path.split('/').filter(|s| !s.is_empty()).collect()
}

impl UrlMatcher {
    /// Create a matcher. `*` matches any one segment, `:name` captures one.
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                if s == "*" {
                    UrlSegment::Wildcard
                } else if let Some(name) = s.strip_prefix(':') {
                    UrlSegment::Parameter(name.to_string())
                } else {
                    UrlSegment::Literal(s.to_string())
                }
            })
            .collect();

        Self {
            pattern: pattern.to_string(),
            segments,
        }
    }

    /// Check if a URL matches the pattern
    #[must_use]
    pub fn matches(&self, url: &str) -> bool {
        let url_segments = path_segments(url);
        url_segments.len() == self.segments.len()
            && self
                .segments
                .iter()
                .zip(&url_segments)
                .all(|(segment, actual)| match segment {
                    UrlSegment::Literal(lit) => lit == actual,
                    UrlSegment::Wildcard | UrlSegment::Parameter(_) => true,
                })
    }

    /// Captured parameters; empty when the URL does not match
    #[must_use]
    pub fn extract_params(&self, url: &str) -> HashMap<String, String> {
        if !self.matches(url) {
            return HashMap::new();
        }
        self.segments
            .iter()
            .zip(path_segments(url))
            .filter_map(|(segment, value)| match segment {
                UrlSegment::Parameter(name) => Some((name.clone(), value.to_string())),
                _ => None,
            })
            .collect()
    }

    /// Get the original pattern
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}
