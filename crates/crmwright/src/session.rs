//! Browser page sharing between scenarios.
//!
//! Serial scenarios of one feature reuse a single page so records created by
//! an earlier scenario are still on screen for the next. Parallel scenarios
//! always get a fresh page.

use crate::result::CrmResult;
use crate::tags::ExecutionMode;
use std::collections::HashMap;
use std::future::Future;
use tokio::sync::Mutex;

/// Pages kept alive per feature for serial scenarios
#[derive(Debug)]
pub struct SessionPool<P> {
    shared: Mutex<HashMap<String, P>>,
}

impl<P> Default for SessionPool<P> {
    fn default() -> Self {
        Self {
            shared: Mutex::new(HashMap::new()),
        }
    }
}

impl<P: Clone + Send> SessionPool<P> {
    /// Create an empty pool
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Page for a scenario of `feature`.
    ///
    /// Serial scenarios get the feature's shared page, opened by `open` on
    /// first use. Parallel scenarios always get a page from `open`.
    ///
    /// # Errors
    ///
    /// Returns the error of `open`
    pub async fn page_for<F, Fut>(&self, feature: &str, mode: ExecutionMode, open: F) -> CrmResult<P>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = CrmResult<P>>,
    {
        if !mode.is_serial() {
            return open().await;
        }

        let mut shared = self.shared.lock().await;
        if let Some(page) = shared.get(feature) {
            tracing::debug!(feature, "reusing serial page");
            return Ok(page.clone());
        }
        tracing::debug!(feature, "opening serial page");
        let page = open().await?;
        let _ = shared.insert(feature.to_string(), page.clone());
        Ok(page)
    }

    /// Forget the shared page of a feature, returning it
    pub async fn release(&self, feature: &str) -> Option<P> {
        self.shared.lock().await.remove(feature)
    }

    /// Remove every shared page
    pub async fn drain(&self) -> Vec<P> {
        self.shared.lock().await.drain().map(|(_, p)| p).collect()
    }

    /// Number of features holding a shared page
    pub async fn len(&self) -> usize {
        self.shared.lock().await.len()
    }

    /// Whether no feature holds a shared page
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
