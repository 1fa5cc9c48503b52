//! Engine error types.

use std::time::Duration;

use thiserror::Error;

use crate::cdp::CdpError;

/// Automation engine errors.
///
/// Only launch, navigation, and session-death failures are fatal to a run;
/// per-field problems are absorbed into the fill summary by the strategies.
#[derive(Debug, Error)]
pub enum AutomationError {
    #[error("Chrome not found. Install Google Chrome or set an explicit browser path.")]
    ChromeNotFound,

    #[error("Failed to launch Chrome: {0}")]
    LaunchFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Navigation did not settle within {0:?}")]
    NavigationTimeout(Duration),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("File upload failed: {0}")]
    UploadFailed(String),

    #[error("Screenshot failed: {0}")]
    ScreenshotFailed(String),

    #[error("Browser session closed unexpectedly")]
    SessionClosed,

    #[error("Browser error: {0}")]
    Browser(String),
}

impl From<CdpError> for AutomationError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::ElementNotFound(s) => AutomationError::ElementNotFound(s),
            CdpError::NavigationFailed(s) => AutomationError::NavigationFailed(s),
            CdpError::SessionClosed => AutomationError::SessionClosed,
            other => AutomationError::Browser(other.to_string()),
        }
    }
}

impl AutomationError {
    /// Fatal errors abort the whole run; everything else is containable at
    /// the field level.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AutomationError::SessionClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AutomationError::LaunchFailed("permission denied".to_string());
        assert_eq!(err.to_string(), "Failed to launch Chrome: permission denied");

        let err = AutomationError::NavigationTimeout(Duration::from_secs(30));
        assert!(err.to_string().contains("30s"));
    }

    #[test]
    fn test_cdp_error_mapping() {
        let err: AutomationError = CdpError::ElementNotFound("label 'Email'".to_string()).into();
        assert!(matches!(err, AutomationError::ElementNotFound(_)));
        assert!(!err.is_fatal());

        let err: AutomationError = CdpError::SessionClosed.into();
        assert!(err.is_fatal());

        let err: AutomationError = CdpError::Timeout("Request timed out".to_string()).into();
        assert!(matches!(err, AutomationError::Browser(_)));
        assert!(!err.is_fatal());
    }
}
