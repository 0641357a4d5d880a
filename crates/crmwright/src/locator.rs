//! Locator abstraction for element selection.
//!
//! Lightning pages render most controls inside web components, so every
//! generated query walks open shadow roots instead of stopping at
//! `document.querySelectorAll`.
//!
//! # Design
//!
//! - **Auto-Waiting**: drivers poll a locator until it resolves or its timeout expires
//! - **Label-first**: form controls are found by their visible label, the way a user reads the form
//! - **Fluent API**: chainable option setters

use std::fmt;
use std::time::Duration;

/// Default timeout for auto-waiting (30 seconds, the action timeout of the suite)
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default polling interval for auto-waiting (100ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Collects every element in the document, descending into open shadow roots.
const DEEP_ELEMENTS: &str = "((root) => { const out = []; \
const walk = (node) => { for (const el of node.querySelectorAll('*')) { out.push(el); if (el.shadowRoot) { walk(el.shadowRoot); } } }; \
walk(root); return out; })";

/// Whitespace-normalised text helper shared by every query
const NORM: &str = "const norm = (s) => (s || '').replace(/\\s+/g, ' ').trim();";

/// Visibility predicate shared by every query
const VISIBLE: &str = "const visible = (el) => !!el && el.getClientRects().length > 0 \
&& getComputedStyle(el).visibility !== 'hidden';";

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// CSS selector (e.g., "button.slds-button")
    Css(String),
    /// XPath selector (does not pierce shadow roots)
    XPath(String),
    /// Innermost element whose visible text equals the string
    Text(String),
    /// Form control associated with a visible label or `aria-label`
    Label(String),
    /// Element with an ARIA role (explicit or implicit) and accessible name
    Role {
        /// ARIA role, e.g. "button", "link", "combobox"
        role: String,
        /// Accessible name
        name: String,
    },
    /// Element whose `title` attribute equals the string
    Title(String),
    /// Combined selector with text filter
    CssWithText {
        /// Base CSS selector
        css: String,
        /// Text content to match
        text: String,
    },
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(selector: impl Into<String>) -> Self {
        Self::XPath(selector.into())
    }

    /// Create a text selector
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create a label selector
    #[must_use]
    pub fn label(label: impl Into<String>) -> Self {
        Self::Label(label.into())
    }

    /// Create a role selector
    #[must_use]
    pub fn role(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Role {
            role: role.into(),
            name: name.into(),
        }
    }

    /// Create a title selector
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self::Title(title.into())
    }

    /// JavaScript expression evaluating to the array of matching elements
    #[must_use]
    pub fn to_matches_query(&self) -> String {
        let filter = match self {
            Self::XPath(s) => {
                return format!(
                    "(() => {{ const snap = document.evaluate({s:?}, document, null, \
                     XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); const out = []; \
                     for (let i = 0; i < snap.snapshotLength; i++) {{ out.push(snap.snapshotItem(i)); }} \
                     return out; }})()"
                );
            }
            Self::Css(s) => format!("all.filter((el) => el.matches({s:?}))"),
            Self::Text(t) => format!(
                "all.filter((el) => norm(el.textContent) === {t:?} \
                 && !Array.from(el.children).some((c) => norm(c.textContent) === {t:?}))"
            ),
            Self::Label(l) => format!(
                "(() => {{ const want = {l:?}; \
                 const clean = (s) => norm(s).replace(/^\\*\\s*/, '').replace(/\\s*\\*$/, ''); \
                 const controls = 'input, textarea, select, button[role=\"combobox\"], [role=\"combobox\"]'; \
                 const found = []; \
                 for (const label of all.filter((el) => (el.tagName === 'LABEL' || el.classList.contains('slds-form-element__label')) && clean(el.textContent) === want)) {{ \
                   const root = label.getRootNode(); \
                   const byId = label.htmlFor && root.getElementById ? root.getElementById(label.htmlFor) : null; \
                   if (byId) {{ found.push(byId); continue; }} \
                   const group = label.closest('.slds-form-element, lightning-input, lightning-textarea, lightning-combobox, lightning-picklist, lightning-input-field'); \
                   const inner = group ? group.querySelector(controls) : null; \
                   if (inner) {{ found.push(inner); }} \
                 }} \
                 for (const el of all.filter((el) => el.matches(controls) && norm(el.getAttribute('aria-label')) === want)) {{ \
                   if (!found.includes(el)) {{ found.push(el); }} \
                 }} \
                 return found; }})()"
            ),
            Self::Role { role, name } => format!(
                "all.filter((el) => {{ \
                 const tag = el.tagName.toLowerCase(); \
                 const type = (el.getAttribute('type') || '').toLowerCase(); \
                 const implicit = tag === 'button' ? 'button' \
                   : (tag === 'a' && el.hasAttribute('href')) ? 'link' \
                   : tag === 'select' ? 'combobox' \
                   : tag === 'textarea' ? 'textbox' \
                   : (tag === 'input' && type === 'checkbox') ? 'checkbox' \
                   : (tag === 'input' && type === 'search') ? 'searchbox' \
                   : (tag === 'input' && (type === '' || type === 'text' || type === 'email' || type === 'tel' || type === 'url')) ? 'textbox' \
                   : null; \
                 const role = el.getAttribute('role') || implicit; \
                 if (role !== {role:?}) {{ return false; }} \
                 const accessible = norm(el.getAttribute('aria-label')) || norm(el.textContent) || norm(el.getAttribute('title')) || norm(el.getAttribute('placeholder')); \
                 return accessible === {name:?}; }})"
            ),
            Self::Title(t) => format!("all.filter((el) => el.getAttribute('title') === {t:?})"),
            Self::CssWithText { css, text } => format!(
                "all.filter((el) => el.matches({css:?}) && norm(el.textContent).includes({text:?}))"
            ),
        };
        format!("(() => {{ {NORM} const all = {DEEP_ELEMENTS}(document); return {filter}; }})()")
    }

    /// JavaScript expression resolving the first visible match, else the first match, else null
    #[must_use]
    pub fn to_query(&self) -> String {
        format!(
            "(() => {{ {VISIBLE} const found = {}; return found.find(visible) || found[0] || null; }})()",
            self.to_matches_query()
        )
    }

    /// JavaScript expression counting matches
    #[must_use]
    pub fn to_count_query(&self) -> String {
        format!("{}.length", self.to_matches_query())
    }

    /// JavaScript expression checking that at least one match is visible
    #[must_use]
    pub fn to_visible_query(&self) -> String {
        format!(
            "(() => {{ {VISIBLE} return {}.some(visible); }})()",
            self.to_matches_query()
        )
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css {s:?}"),
            Self::XPath(s) => write!(f, "xpath {s:?}"),
            Self::Text(t) => write!(f, "text {t:?}"),
            Self::Label(l) => write!(f, "label {l:?}"),
            Self::Role { role, name } => write!(f, "{role} {name:?}"),
            Self::Title(t) => write!(f, "title {t:?}"),
            Self::CssWithText { css, text } => write!(f, "css {css:?} with text {text:?}"),
        }
    }
}

/// JavaScript expression checking that `text` is visible, page-wide or inside `scope`.
///
/// Matches elements whose normalised text equals `text`, plus form controls whose
/// current value equals it.
#[must_use]
pub fn text_visible_query(text: &str, scope: Option<&Selector>) -> String {
    let roots = scope.map_or_else(
        || "[document]".to_string(),
        |s| format!("{}.map((el) => el.shadowRoot || el)", s.to_matches_query()),
    );
    format!(
        "(() => {{ {NORM} {VISIBLE} const want = {text:?}; \
         for (const root of {roots}) {{ \
           const all = {DEEP_ELEMENTS}(root); \
           if (root !== document && root.nodeType === 1) {{ all.unshift(root); }} \
           const hit = all.some((el) => visible(el) && ( \
             (norm(el.textContent) === want && !Array.from(el.children).some((c) => norm(c.textContent) === want)) \
             || ((el.tagName === 'INPUT' || el.tagName === 'TEXTAREA') && norm(el.value) === want) \
             || norm(el.getAttribute('title')) === want)); \
           if (hit) {{ return true; }} \
         }} \
         return false; }})()"
    )
}

/// Locator options for customizing behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorOptions {
    /// Timeout for auto-waiting
    pub timeout: Duration,
    /// Polling interval for auto-waiting
    pub poll_interval: Duration,
    /// Whether the element must be visible before acting
    pub visible: bool,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            visible: true,
        }
    }
}

/// A locator for finding and interacting with elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    selector: Selector,
    options: LocatorOptions,
}

impl Locator {
    /// Create a new locator with a CSS selector
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self::from_selector(Selector::Css(selector.into()))
    }

    /// Create a locator from a selector
    #[must_use]
    pub fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            options: LocatorOptions::default(),
        }
    }

    /// Locate a form control by its label
    #[must_use]
    pub fn label(label: impl Into<String>) -> Self {
        Self::from_selector(Selector::label(label))
    }

    /// Locate a button by accessible name
    #[must_use]
    pub fn button(name: impl Into<String>) -> Self {
        Self::from_selector(Selector::role("button", name))
    }

    /// Locate a link by accessible name
    #[must_use]
    pub fn link(name: impl Into<String>) -> Self {
        Self::from_selector(Selector::role("link", name))
    }

    /// Locate an element by its exact text
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::from_selector(Selector::text(text))
    }

    /// Locate an element by its title attribute
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self::from_selector(Selector::title(title))
    }

    /// Filter by text content (CSS locators only)
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        let selector = match self.selector {
            Selector::Css(css) => Selector::CssWithText {
                css,
                text: text.into(),
            },
            other => other,
        };
        Self {
            selector,
            options: self.options,
        }
    }

    /// Set a custom timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Set a custom polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.options.poll_interval = interval;
        self
    }

    /// Set visibility requirement
    #[must_use]
    pub const fn with_visible(mut self, visible: bool) -> Self {
        self.options.visible = visible;
        self
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the options
    #[must_use]
    pub const fn options(&self) -> &LocatorOptions {
        &self.options
    }

    /// Timeout in whole milliseconds
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.options.timeout.as_millis()).unwrap_or(u64::MAX)
    }

    /// Human-readable description for logs and errors
    #[must_use]
    pub fn describe(&self) -> String {
        self.selector.to_string()
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.selector.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod selector_tests {
        use super::*;

        #[test]
        fn test_css_selector_query() {
            let query = Selector::css("button.slds-button").to_query();
            assert!(query.contains("el.matches(\"button.slds-button\")"));
            assert!(query.contains("shadowRoot"));
        }

        #[test]
        fn test_label_selector_query() {
            let query = Selector::label("Account Name").to_query();
            assert!(query.contains("\"Account Name\""));
            assert!(query.contains("htmlFor"));
            assert!(query.contains("aria-label"));
        }

        #[test]
        fn test_role_selector_query() {
            let query = Selector::role("button", "Save").to_query();
            assert!(query.contains("role !== \"button\""));
            assert!(query.contains("accessible === \"Save\""));
        }

        #[test]
        fn test_xpath_does_not_walk_shadow_roots() {
            let query = Selector::xpath("//a[@title='Home']").to_matches_query();
            assert!(query.contains("document.evaluate"));
            assert!(!query.contains("shadowRoot"));
        }

        #[test]
        fn test_count_and_visible_queries() {
            let selector = Selector::title("Acme Corp");
            assert!(selector.to_count_query().ends_with(".length"));
            assert!(selector.to_visible_query().contains("some(visible)"));
        }

        #[test]
        fn test_quotes_are_escaped() {
            let query = Selector::text("O\"Brien").to_query();
            assert!(query.contains("O\\\"Brien"));
        }

        #[test]
        fn test_display() {
            assert_eq!(Selector::label("Phone").to_string(), "label \"Phone\"");
            assert_eq!(Selector::role("link", "Accounts").to_string(), "link \"Accounts\"");
        }
    }

    mod locator_tests {
        use super::*;

        #[test]
        fn test_locator_new_is_css() {
            let locator = Locator::new("input");
            assert!(matches!(locator.selector(), Selector::Css(_)));
        }

        #[test]
        fn test_locator_with_text() {
            let locator = Locator::new("button").with_text("New");
            assert!(matches!(locator.selector(), Selector::CssWithText { .. }));
        }

        #[test]
        fn test_with_text_keeps_non_css() {
            let locator = Locator::label("Name").with_text("ignored");
            assert_eq!(locator.selector(), &Selector::label("Name"));
        }

        #[test]
        fn test_default_options() {
            let locator = Locator::button("Save");
            assert_eq!(locator.timeout_ms(), DEFAULT_TIMEOUT_MS);
            assert_eq!(
                locator.options().poll_interval,
                Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)
            );
            assert!(locator.options().visible);
        }

        #[test]
        fn test_custom_timeout() {
            let locator = Locator::link("View All").with_timeout(Duration::from_secs(5));
            assert_eq!(locator.timeout_ms(), 5000);
        }

        #[test]
        fn test_describe() {
            assert_eq!(Locator::button("Save").describe(), "button \"Save\"");
        }
    }

    mod text_query_tests {
        use super::*;

        #[test]
        fn test_page_wide_text_query() {
            let query = text_visible_query("Acme Corp", None);
            assert!(query.contains("[document]"));
            assert!(query.contains("\"Acme Corp\""));
        }

        #[test]
        fn test_scoped_text_query() {
            let scope = Selector::css("records-highlights2");
            let query = text_visible_query("Acme Corp", Some(&scope));
            assert!(!query.contains("[document]"));
            assert!(query.contains("records-highlights2"));
        }
    }
}
