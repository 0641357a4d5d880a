//! Result and error types for crmwright.

use thiserror::Error;

/// Result type for crmwright operations
pub type CrmResult<T> = Result<T, CrmError>;

/// Errors that can occur while driving the CRM UI
#[derive(Debug, Error)]
pub enum CrmError {
    /// Browser executable not found
    #[error("Browser not found. Install Chromium or set CHROMIUM_PATH")]
    BrowserNotFound,

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunchError {
        /// Error message
        message: String,
    },

    /// Page error
    #[error("Page error: {message}")]
    PageError {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    NavigationError {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// An element did not appear (or become actionable) within the wait window
    #[error("Timed out after {ms}ms waiting for {what}")]
    Timeout {
        /// What was being waited for
        what: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Assertion failed
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// Gherkin data table does not have the expected shape
    #[error("Invalid data table at row {row}: {message}")]
    InvalidTable {
        /// Zero-based row index
        row: usize,
        /// Error message
        message: String,
    },

    /// No page object registered for an entity name
    #[error("No page object for entity '{name}'")]
    UnknownEntity {
        /// Entity name as written in the scenario
        name: String,
    },

    /// Screenshot error
    #[error("Screenshot failed: {message}")]
    ScreenshotError {
        /// Error message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Invalid tag expression
    #[error("Invalid tag expression '{expression}': {message}")]
    TagExpression {
        /// The expression as given
        expression: String,
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl CrmError {
    /// Create a timeout error
    #[must_use]
    pub fn timeout(what: impl Into<String>, ms: u64) -> Self {
        Self::Timeout {
            what: what.into(),
            ms,
        }
    }

    /// Create an assertion error
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this is the element-not-found/timeout kind of failure
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        let err = CrmError::timeout("button \"Save\"", 30_000);
        assert_eq!(
            err.to_string(),
            "Timed out after 30000ms waiting for button \"Save\""
        );
        assert!(err.is_timeout());
    }

    #[test]
    fn test_assertion_display() {
        let err = CrmError::assertion("text 'Acme' not visible");
        assert!(err.to_string().contains("Assertion failed"));
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_invalid_table_display() {
        let err = CrmError::InvalidTable {
            row: 2,
            message: "expected 2 cells, found 3".to_string(),
        };
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CrmError = io_err.into();
        assert!(err.to_string().contains("I/O"));
    }
}
