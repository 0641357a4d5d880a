//! Field-map-driven form filling.
//!
//! A page object declares its form as a table of [`FieldSpec`]s. The
//! [`FormFiller`] walks a [`FieldMap`] in table order, resolves each label
//! against the specs (label or synonym, case-insensitive) and drives the
//! matching control. Labels with no spec are skipped: forms differ between
//! orgs and record types, and one scenario table is reused across them.

use crate::driver::PageDriver;
use crate::field_map::{is_blank, parse_flag, FieldMap};
use crate::locator::Locator;
use crate::result::CrmResult;

/// How a form control takes a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// Single-line input
    Text,
    /// Multi-line input
    TextArea,
    /// Checkbox, checked for `yes`/`true`
    Checkbox,
    /// Lightning combobox: open it, then pick the option by title
    Picklist,
    /// Native `<select>`
    Select,
    /// Type-ahead record lookup: type, then pick the suggestion by title
    Lookup,
    /// Date input, filled as text in the org's locale format
    Date,
}

/// One control on a record form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Visible label on the form
    pub label: &'static str,
    /// Other names scenarios use for this control
    pub synonyms: &'static [&'static str],
    /// Control type
    pub control: ControlKind,
    /// Whether the form refuses to save without it
    pub required: bool,
}

impl FieldSpec {
    /// Create a field spec
    #[must_use]
    pub const fn new(label: &'static str, control: ControlKind) -> Self {
        Self {
            label,
            synonyms: &[],
            control,
            required: false,
        }
    }

    /// Text input
    #[must_use]
    pub const fn text(label: &'static str) -> Self {
        Self::new(label, ControlKind::Text)
    }

    /// Text area
    #[must_use]
    pub const fn text_area(label: &'static str) -> Self {
        Self::new(label, ControlKind::TextArea)
    }

    /// Checkbox
    #[must_use]
    pub const fn checkbox(label: &'static str) -> Self {
        Self::new(label, ControlKind::Checkbox)
    }

    /// Lightning picklist
    #[must_use]
    pub const fn picklist(label: &'static str) -> Self {
        Self::new(label, ControlKind::Picklist)
    }

    /// Native select
    #[must_use]
    pub const fn select(label: &'static str) -> Self {
        Self::new(label, ControlKind::Select)
    }

    /// Record lookup
    #[must_use]
    pub const fn lookup(label: &'static str) -> Self {
        Self::new(label, ControlKind::Lookup)
    }

    /// Date input
    #[must_use]
    pub const fn date(label: &'static str) -> Self {
        Self::new(label, ControlKind::Date)
    }

    /// Set synonyms
    #[must_use]
    pub const fn with_synonyms(mut self, synonyms: &'static [&'static str]) -> Self {
        self.synonyms = synonyms;
        self
    }

    /// Mark as required
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Whether a table label names this control
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        let key = key.trim();
        self.label.eq_ignore_ascii_case(key)
            || self.synonyms.iter().any(|s| s.eq_ignore_ascii_case(key))
    }

    /// Locator for the control itself
    #[must_use]
    pub fn locator(&self) -> Locator {
        Locator::label(self.label)
    }

    /// Whether any of the map's labels names this control
    fn present_in(&self, map: &FieldMap) -> bool {
        map.iter().any(|(label, value)| self.matches(label) && !is_blank(value))
    }

    /// Whether filling `value` leaves the control as it was
    fn leaves_default(&self, value: &str) -> bool {
        is_blank(value) || (self.control == ControlKind::Checkbox && !parse_flag(value))
    }
}

/// What a fill pass did with each table row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillReport {
    /// Labels whose control was driven
    pub filled: Vec<String>,
    /// Labels left at the control's default: blank value or unset flag
    pub skipped_blank: Vec<String>,
    /// Labels no spec matched
    pub unmatched: Vec<String>,
    /// Required controls the table never gave a value
    pub missing_required: Vec<&'static str>,
}

impl FillReport {
    /// Whether every row was used
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unmatched.is_empty() && self.missing_required.is_empty()
    }
}

/// Fills the open form from a field map
#[derive(Debug, Clone, Copy)]
pub struct FormFiller<'a> {
    specs: &'a [FieldSpec],
}

impl<'a> FormFiller<'a> {
    /// Create a filler over a form's field table
    #[must_use]
    pub const fn new(specs: &'a [FieldSpec]) -> Self {
        Self { specs }
    }

    /// Spec for a table label, first match wins
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<&'a FieldSpec> {
        self.specs.iter().find(|spec| spec.matches(key))
    }

    /// Rows as the form ends up holding them.
    ///
    /// Rows naming the same control collapse to the last one that drives it,
    /// at that row's position. Unmatched labels pass through unchanged.
    #[must_use]
    pub fn effective(&self, map: &FieldMap) -> FieldMap {
        let mut rows: Vec<(Option<&'static str>, &str, &str)> = Vec::new();
        for (label, value) in map.iter() {
            let Some(spec) = self.resolve(label) else {
                rows.push((None, label, value));
                continue;
            };
            let control = Some(spec.label);
            let held = rows.iter().any(|(c, _, _)| *c == control);
            if held && spec.leaves_default(value) {
                continue;
            }
            rows.retain(|(c, _, _)| *c != control);
            rows.push((control, label, value));
        }
        rows.into_iter().map(|(_, label, value)| (label, value)).collect()
    }

    /// Drive every matched control in table order.
    ///
    /// # Errors
    ///
    /// Returns the driver's error (usually a timeout) for the first control
    /// that cannot be driven. Nothing after it is touched.
    pub async fn fill<D: PageDriver + ?Sized>(
        &self,
        driver: &D,
        map: &FieldMap,
    ) -> CrmResult<FillReport> {
        let mut report = FillReport::default();

        for (key, value) in map.iter() {
            let Some(spec) = self.resolve(key) else {
                tracing::debug!(label = key, "no control for label, skipping");
                report.unmatched.push(key.to_string());
                continue;
            };

            if spec.leaves_default(value) {
                tracing::debug!(label = key, value, "leaving default");
                report.skipped_blank.push(key.to_string());
                continue;
            }

            Self::drive(driver, spec, value).await?;
            tracing::debug!(label = spec.label, value, control = ?spec.control, "filled");
            report.filled.push(key.to_string());
        }

        report.missing_required = self
            .specs
            .iter()
            .filter(|spec| spec.required && !spec.present_in(map))
            .map(|spec| spec.label)
            .collect();
        if !report.missing_required.is_empty() {
            tracing::warn!(fields = ?report.missing_required, "required fields not provided");
        }

        Ok(report)
    }

    async fn drive<D: PageDriver + ?Sized>(
        driver: &D,
        spec: &FieldSpec,
        value: &str,
    ) -> CrmResult<()> {
        let timeout = driver.action_timeout();
        let control = spec.locator().with_timeout(timeout);
        let option = || Locator::title(value).with_timeout(timeout);
        match spec.control {
            ControlKind::Text | ControlKind::TextArea | ControlKind::Date => {
                driver.fill(&control, value).await
            }
            ControlKind::Checkbox => driver.set_checked(&control, true).await,
            ControlKind::Picklist => {
                driver.click(&control).await?;
                driver.click(&option()).await
            }
            ControlKind::Select => driver.select_option(&control, value).await,
            ControlKind::Lookup => {
                driver.fill(&control, value).await?;
                driver.click(&option()).await
            }
        }
    }
}
