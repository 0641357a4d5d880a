//! Failure screenshots.
//!
//! `<report_dir>/screenshots/<scenario>_<status>_<timestamp>.png`, written for
//! every scenario that did not pass. A failed capture is logged and otherwise
//! ignored: it never changes the scenario's result.

use crate::driver::PageDriver;
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::{Path, PathBuf};

/// Outcome of a scenario as recorded in artifact names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioStatus {
    /// Every step passed
    Passed,
    /// A step failed
    Failed,
    /// A step was skipped or undefined
    Skipped,
    /// A step hit its timeout
    TimedOut,
}

impl ScenarioStatus {
    /// Whether a screenshot should be taken
    #[must_use]
    pub const fn needs_screenshot(self) -> bool {
        !matches!(self, Self::Passed)
    }
}

impl fmt::Display for ScenarioStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
            Self::TimedOut => "timedOut",
        })
    }
}

/// File-name-safe form of a scenario name: runs of anything outside
/// `[A-Za-z0-9_-]` become a single `_`
#[must_use]
pub fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            out.push(c);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    let out = out.trim_matches('_');
    if out.is_empty() {
        "scenario".to_string()
    } else {
        out.to_string()
    }
}

/// ISO-8601 UTC timestamp with `:` and `.` replaced by `-`
#[must_use]
pub fn file_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H-%M-%S-%3fZ").to_string()
}

/// Path of the screenshot for a scenario result
#[must_use]
pub fn screenshot_path(
    screenshot_dir: &Path,
    scenario: &str,
    status: ScenarioStatus,
    at: DateTime<Utc>,
) -> PathBuf {
    screenshot_dir.join(format!(
        "{}_{status}_{}.png",
        sanitize_name(scenario),
        file_timestamp(at)
    ))
}

/// Screenshot the page if the scenario did not pass.
///
/// Returns the written path, or `None` when the scenario passed or capture
/// failed.
pub async fn capture_on_failure<D: PageDriver + ?Sized>(
    driver: &D,
    screenshot_dir: &Path,
    scenario: &str,
    status: ScenarioStatus,
) -> Option<PathBuf> {
    if !status.needs_screenshot() {
        return None;
    }
    let path = screenshot_path(screenshot_dir, scenario, status, Utc::now());
    match write_screenshot(driver, &path).await {
        Ok(()) => {
            tracing::info!(scenario, %status, path = %path.display(), "saved screenshot");
            Some(path)
        }
        Err(e) => {
            tracing::warn!(scenario, %status, error = %e, "failed to capture screenshot");
            None
        }
    }
}

async fn write_screenshot<D: PageDriver + ?Sized>(
    driver: &D,
    path: &Path,
) -> crate::result::CrmResult<()> {
    let png = driver.screenshot().await?;
    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }
    tokio::fs::write(path, png).await?;
    Ok(())
}
