//! Browser control over the Chrome `DevTools` Protocol.
//!
//! With the `browser` feature, [`Browser`] launches Chromium through
//! chromiumoxide and hands out [`Page`]s implementing
//! [`PageDriver`](crate::driver::PageDriver). Every element action is a small
//! script built from the locator's query and evaluated in the page, polled
//! until it reports success or the locator times out.

use std::time::Duration;

/// Browser configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
    /// Timeout for `goto`
    pub navigation_timeout: Duration,
    /// Auto-wait for element actions page objects perform
    pub action_timeout: Duration,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1440,
            viewport_height: 900,
            chromium_path: None,
            sandbox: true,
            navigation_timeout: Duration::from_secs(60),
            action_timeout: Duration::from_millis(crate::locator::DEFAULT_TIMEOUT_MS),
        }
    }
}

impl BrowserConfig {
    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }

    /// Set navigation timeout
    #[must_use]
    pub const fn with_navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    /// Set element action timeout
    #[must_use]
    pub const fn with_action_timeout(mut self, timeout: Duration) -> Self {
        self.action_timeout = timeout;
        self
    }
}

/// Scripts run against the element a locator resolves to.
///
/// Each script evaluates to `null` while the element is missing (or hidden
/// when visibility is required), which keeps the auto-wait polling.
mod scripts {
    use crate::locator::Locator;

    fn with_element(locator: &Locator, body: &str) -> String {
        let visible_check = if locator.options().visible {
            "if (el.getClientRects().length === 0 || getComputedStyle(el).visibility === 'hidden') { return null; }"
        } else {
            ""
        };
        format!(
            "(() => {{ const el = {}; if (!el) {{ return null; }} {visible_check} {body} }})()",
            locator.selector().to_query()
        )
    }

    pub(super) fn click(locator: &Locator) -> String {
        with_element(
            locator,
            "el.scrollIntoView({ block: 'center' }); el.click(); return true;",
        )
    }

    pub(super) fn fill(locator: &Locator, value: &str) -> String {
        with_element(
            locator,
            &format!(
                "if (el.disabled || el.readOnly) {{ return null; }} \
                 el.scrollIntoView({{ block: 'center' }}); el.focus(); \
                 const proto = el.tagName === 'TEXTAREA' ? HTMLTextAreaElement.prototype : HTMLInputElement.prototype; \
                 Object.getOwnPropertyDescriptor(proto, 'value').set.call(el, {value:?}); \
                 el.dispatchEvent(new Event('input', {{ bubbles: true, composed: true }})); \
                 el.dispatchEvent(new Event('change', {{ bubbles: true, composed: true }})); \
                 el.blur(); return true;"
            ),
        )
    }

    pub(super) fn set_checked(locator: &Locator, checked: bool) -> String {
        with_element(
            locator,
            &format!(
                "if (el.checked !== {checked}) {{ el.scrollIntoView({{ block: 'center' }}); el.click(); }} \
                 return el.checked === {checked} ? true : null;"
            ),
        )
    }

    pub(super) fn select_option(locator: &Locator, option: &str) -> String {
        with_element(
            locator,
            &format!(
                "const opt = Array.from(el.options || []).find((o) => o.label.trim() === {option:?} || o.value === {option:?}); \
                 if (!opt) {{ return null; }} \
                 el.value = opt.value; \
                 el.dispatchEvent(new Event('change', {{ bubbles: true, composed: true }})); \
                 return true;"
            ),
        )
    }

    pub(super) fn input_value(locator: &Locator) -> String {
        with_element(
            locator,
            "return el.type === 'checkbox' ? String(el.checked) : String(el.value ?? '');",
        )
    }

    pub(super) fn exists(locator: &Locator) -> String {
        with_element(locator, "return true;")
    }
}

#[cfg(feature = "browser")]
#[allow(clippy::wildcard_imports)]
mod cdp {
    use super::*;
    use crate::driver::PageDriver;
    use crate::locator::{text_visible_query, Locator};
    use crate::result::{CrmError, CrmResult};
    use crate::wait::{poll_until, WaitOptions};
    use async_trait::async_trait;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::cdp::browser_protocol::page::{
        CaptureScreenshotFormat, CaptureScreenshotParams,
    };
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use serde::de::DeserializeOwned;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    /// Browser instance with real CDP connection
    #[derive(Debug)]
    pub struct Browser {
        config: BrowserConfig,
        inner: Arc<Mutex<CdpBrowser>>,
        handle: tokio::task::JoinHandle<()>,
    }

    impl Browser {
        /// Launch a new browser instance
        ///
        /// # Errors
        ///
        /// Returns error if browser cannot be launched
        pub async fn launch(config: BrowserConfig) -> CrmResult<Self> {
            let mut builder = CdpConfig::builder()
                .window_size(config.viewport_width, config.viewport_height);

            if !config.headless {
                builder = builder.with_head();
            }

            if !config.sandbox {
                builder = builder.no_sandbox();
            }

            if let Some(ref path) = config.chromium_path {
                if !std::path::Path::new(path).exists() {
                    return Err(CrmError::BrowserNotFound);
                }
                builder = builder.chrome_executable(path);
            }

            // Without an explicit path, a build failure means auto-detection found nothing
            let cdp_config = builder.build().map_err(|message| {
                if config.chromium_path.is_none() {
                    tracing::debug!(%message, "chromium auto-detection failed");
                    CrmError::BrowserNotFound
                } else {
                    CrmError::BrowserLaunchError { message }
                }
            })?;

            let (browser, mut handler) = CdpBrowser::launch(cdp_config).await.map_err(|e| {
                CrmError::BrowserLaunchError {
                    message: e.to_string(),
                }
            })?;

            let handle = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if let Err(e) = event {
                        tracing::debug!(error = %e, "cdp handler event error");
                    }
                }
            });

            tracing::info!(
                headless = config.headless,
                width = config.viewport_width,
                height = config.viewport_height,
                "browser launched"
            );

            Ok(Self {
                config,
                inner: Arc::new(Mutex::new(browser)),
                handle,
            })
        }

        /// Create a new page, isolated from other pages' navigation
        ///
        /// # Errors
        ///
        /// Returns error if page cannot be created
        pub async fn new_page(&self) -> CrmResult<Page> {
            let browser = self.inner.lock().await;
            let cdp_page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| CrmError::PageError {
                    message: e.to_string(),
                })?;

            Ok(Page {
                navigation_timeout: self.config.navigation_timeout,
                action_timeout: self.config.action_timeout,
                inner: Arc::new(Mutex::new(cdp_page)),
            })
        }

        /// Get the browser configuration
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }

        /// Close the browser
        ///
        /// # Errors
        ///
        /// Returns error if the browser process does not shut down cleanly
        pub async fn close(self) -> CrmResult<()> {
            let mut browser = self.inner.lock().await;
            browser
                .close()
                .await
                .map_err(|e| CrmError::BrowserLaunchError {
                    message: e.to_string(),
                })?;
            let _ = browser.wait().await;
            self.handle.abort();
            Ok(())
        }
    }

    /// A browser page with real CDP connection
    #[derive(Debug, Clone)]
    pub struct Page {
        navigation_timeout: Duration,
        action_timeout: Duration,
        inner: Arc<Mutex<CdpPage>>,
    }

    impl Page {
        /// Evaluate an expression and deserialize its JSON result
        ///
        /// # Errors
        ///
        /// Returns error if evaluation throws or the value does not deserialize
        pub async fn evaluate<T: DeserializeOwned>(&self, expr: &str) -> CrmResult<T> {
            let page = self.inner.lock().await;
            let result = page.evaluate(expr).await.map_err(|e| CrmError::PageError {
                message: e.to_string(),
            })?;
            result.into_value().map_err(|e| CrmError::PageError {
                message: e.to_string(),
            })
        }

        /// Close the tab. Clones of this page become unusable.
        ///
        /// # Errors
        ///
        /// Returns error if the target cannot be closed
        pub async fn close(&self) -> CrmResult<()> {
            let page = self.inner.lock().await.clone();
            page.close().await.map_err(|e| CrmError::PageError {
                message: e.to_string(),
            })
        }

        /// Evaluate a script until it yields a non-null value.
        ///
        /// Evaluation errors count as "not yet": they happen routinely while
        /// Lightning swaps the execution context during navigation.
        async fn poll_script<T: DeserializeOwned>(
            &self,
            locator: &Locator,
            script: &str,
        ) -> CrmResult<T> {
            poll_until(&locator.describe(), WaitOptions::from(locator), move || async move {
                match self.evaluate::<Option<T>>(script).await {
                    Ok(value) => value,
                    Err(e) => {
                        tracing::trace!(locator = %locator, error = %e, "probe failed");
                        None
                    }
                }
            })
            .await
        }
    }

    #[async_trait]
    impl PageDriver for Page {
        async fn goto(&self, url: &str) -> CrmResult<()> {
            let page = self.inner.lock().await;
            let navigation = async {
                page.goto(url).await?;
                page.wait_for_navigation().await?;
                Ok::<(), chromiumoxide::error::CdpError>(())
            };
            match tokio::time::timeout(self.navigation_timeout, navigation).await {
                Ok(Ok(())) => {
                    tracing::info!(url, "navigated");
                    Ok(())
                }
                Ok(Err(e)) => Err(CrmError::NavigationError {
                    url: url.to_string(),
                    message: e.to_string(),
                }),
                Err(_) => Err(CrmError::timeout(
                    format!("navigation to {url}"),
                    u64::try_from(self.navigation_timeout.as_millis()).unwrap_or(u64::MAX),
                )),
            }
        }

        async fn current_url(&self) -> CrmResult<String> {
            let page = self.inner.lock().await;
            let url = page.url().await.map_err(|e| CrmError::PageError {
                message: e.to_string(),
            })?;
            Ok(url.unwrap_or_default())
        }

        async fn click(&self, locator: &Locator) -> CrmResult<()> {
            tracing::debug!(locator = %locator, "click");
            self.poll_script::<bool>(locator, &scripts::click(locator))
                .await
                .map(|_| ())
        }

        async fn fill(&self, locator: &Locator, value: &str) -> CrmResult<()> {
            tracing::debug!(locator = %locator, value, "fill");
            self.poll_script::<bool>(locator, &scripts::fill(locator, value))
                .await
                .map(|_| ())
        }

        async fn set_checked(&self, locator: &Locator, checked: bool) -> CrmResult<()> {
            tracing::debug!(locator = %locator, checked, "set checked");
            self.poll_script::<bool>(locator, &scripts::set_checked(locator, checked))
                .await
                .map(|_| ())
        }

        async fn select_option(&self, locator: &Locator, option: &str) -> CrmResult<()> {
            tracing::debug!(locator = %locator, option, "select option");
            self.poll_script::<bool>(locator, &scripts::select_option(locator, option))
                .await
                .map(|_| ())
        }

        async fn input_value(&self, locator: &Locator) -> CrmResult<String> {
            self.poll_script::<String>(locator, &scripts::input_value(locator))
                .await
        }

        async fn is_visible(&self, locator: &Locator) -> CrmResult<bool> {
            self.evaluate::<bool>(&locator.selector().to_visible_query())
                .await
        }

        async fn wait_for(&self, locator: &Locator) -> CrmResult<()> {
            self.poll_script::<bool>(locator, &scripts::exists(locator))
                .await
                .map(|_| ())
        }

        async fn text_visible(&self, text: &str, scope: Option<&Locator>) -> CrmResult<bool> {
            self.evaluate::<bool>(&text_visible_query(text, scope.map(Locator::selector)))
                .await
        }

        async fn screenshot(&self) -> CrmResult<Vec<u8>> {
            let page = self.inner.lock().await;
            let params = CaptureScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Png)
                .build();

            let screenshot =
                page.execute(params)
                    .await
                    .map_err(|e| CrmError::ScreenshotError {
                        message: e.to_string(),
                    })?;

            use base64::Engine;
            base64::engine::general_purpose::STANDARD
                .decode(&screenshot.data)
                .map_err(|e| CrmError::ScreenshotError {
                    message: e.to_string(),
                })
        }

        fn action_timeout(&self) -> Duration {
            self.action_timeout
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::{Browser, Page};
