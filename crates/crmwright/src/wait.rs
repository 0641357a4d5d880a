//! Auto-wait polling.
//!
//! Every element action goes through [`poll_until`]: the probe runs until it
//! yields a value or the locator's timeout expires. There is no retry on top
//! of this; a timeout is terminal for the step that hit it.

use crate::locator::Locator;
use crate::result::{CrmError, CrmResult};
use std::future::Future;
use std::time::{Duration, Instant};

/// Options for a wait operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Give up after this long
    pub timeout: Duration,
    /// Sleep between probes
    pub poll_interval: Duration,
}

impl WaitOptions {
    /// Create wait options
    #[must_use]
    pub const fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Timeout in whole milliseconds
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

impl From<&Locator> for WaitOptions {
    fn from(locator: &Locator) -> Self {
        Self::new(locator.options().timeout, locator.options().poll_interval)
    }
}

/// Poll `probe` until it returns `Some`, or fail with [`CrmError::Timeout`].
///
/// The probe always runs at least once, even with a zero timeout.
pub async fn poll_until<T, F, Fut>(what: &str, options: WaitOptions, mut probe: F) -> CrmResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let start = Instant::now();
    loop {
        if let Some(value) = probe().await {
            tracing::trace!(what, elapsed_ms = start.elapsed().as_millis() as u64, "wait satisfied");
            return Ok(value);
        }
        if start.elapsed() >= options.timeout {
            return Err(CrmError::timeout(what, options.timeout_ms()));
        }
        tokio::time::sleep(options.poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn fast(timeout_ms: u64) -> WaitOptions {
        WaitOptions::new(Duration::from_millis(timeout_ms), Duration::from_millis(5))
    }

    #[tokio::test]
    async fn test_immediate_success() {
        let value = poll_until("ready", fast(50), || async { Some(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_succeeds_after_some_probes() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let value = poll_until("third probe", fast(1_000), move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            async move { (n >= 2).then_some(n) }
        })
        .await
        .unwrap();
        assert_eq!(value, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_times_out() {
        let err = poll_until::<(), _, _>("button \"Save\"", fast(20), || async { None })
            .await
            .unwrap_err();
        match err {
            CrmError::Timeout { what, ms } => {
                assert_eq!(what, "button \"Save\"");
                assert_eq!(ms, 20);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_zero_timeout_probes_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let result = poll_until::<(), _, _>("never", fast(0), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { None }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_options_from_locator() {
        let locator = Locator::button("Save").with_timeout(Duration::from_secs(3));
        let options = WaitOptions::from(&locator);
        assert_eq!(options.timeout_ms(), 3000);
    }
}
