//! Run reporting: screenshot artifact and status derivation.
//!
//! The engine never submits the form, so the screenshot of the filled page
//! is the run's only verification artifact. It is captured whenever
//! navigation succeeded, independent of how the fill went.

use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::{debug, warn};

use crate::cdp::{PageSession, ScreenshotFormat};
use crate::error::AutomationError;
use crate::types::{ApplicationStatus, FillSummary};

const SLUG_MAX_LEN: usize = 100;

/// Derive a deterministic filesystem-safe slug from a job URL. Two runs
/// against the same URL map to the same artifact (last write wins).
pub fn screenshot_slug(job_url: &str) -> String {
    let trimmed = job_url
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://");

    let mut slug = String::with_capacity(trimmed.len().min(SLUG_MAX_LEN));
    let mut last_was_dash = false;
    for c in trimmed.chars() {
        if slug.len() >= SLUG_MAX_LEN {
            break;
        }
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            last_was_dash = false;
        } else if !last_was_dash && !slug.is_empty() {
            slug.push('-');
            last_was_dash = true;
        }
    }

    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "application".to_string()
    } else {
        slug.to_string()
    }
}

/// Capture a full-page screenshot under `output_dir`. Failures degrade to
/// `None` — a missing artifact never fails the run.
pub async fn capture_screenshot(
    session: &PageSession,
    output_dir: &Path,
    job_url: &str,
) -> Option<PathBuf> {
    let path = output_dir.join(format!("{}.png", screenshot_slug(job_url)));
    match try_capture(session, &path).await {
        Ok(()) => {
            debug!(path = %path.display(), "screenshot captured");
            Some(path)
        }
        Err(e) => {
            warn!(error = %e, "screenshot capture failed");
            None
        }
    }
}

async fn try_capture(session: &PageSession, path: &Path) -> Result<(), AutomationError> {
    let data = session
        .screenshot(ScreenshotFormat::Png, None, true)
        .await
        .map_err(|e| AutomationError::ScreenshotFailed(e.to_string()))?;

    let bytes = BASE64
        .decode(data.as_bytes())
        .map_err(|e| AutomationError::ScreenshotFailed(e.to_string()))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| AutomationError::ScreenshotFailed(e.to_string()))?;
    }
    std::fs::write(path, bytes).map_err(|e| AutomationError::ScreenshotFailed(e.to_string()))?;
    Ok(())
}

/// Aggregate status for a completed strategy run.
pub fn derive_status(summary: &FillSummary) -> ApplicationStatus {
    if summary.has_core_failure() {
        ApplicationStatus::PartialSuccess
    } else {
        ApplicationStatus::Success
    }
}

/// Human-readable message for a completed strategy run.
pub fn run_message(status: ApplicationStatus, summary: &FillSummary) -> String {
    match status {
        ApplicationStatus::Success => "Form filled (not submitted)".to_string(),
        ApplicationStatus::PartialSuccess => format!(
            "Form partially filled (not submitted); {} field(s) could not be filled",
            summary.failed_count()
        ),
        ApplicationStatus::Error => "Automation failed".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FillField, FillReason};

    #[test]
    fn test_slug_is_deterministic_and_safe() {
        let url = "https://boards.greenhouse.io/acme/jobs/123?gh_jid=9";
        let slug = screenshot_slug(url);
        assert_eq!(slug, screenshot_slug(url));
        assert_eq!(slug, "boards-greenhouse-io-acme-jobs-123-gh-jid-9");
        assert!(slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
    }

    #[test]
    fn test_slug_collapses_separator_runs() {
        assert_eq!(
            screenshot_slug("https://jobs.lever.co//acme///role"),
            "jobs-lever-co-acme-role"
        );
    }

    #[test]
    fn test_slug_never_empty_and_bounded() {
        assert_eq!(screenshot_slug(""), "application");
        assert_eq!(screenshot_slug("https://"), "application");

        let long = format!("https://example.com/{}", "a".repeat(500));
        assert!(screenshot_slug(&long).len() <= SLUG_MAX_LEN);
    }

    #[test]
    fn test_status_from_summary() {
        let mut summary = FillSummary::new();
        assert_eq!(derive_status(&summary), ApplicationStatus::Success);

        summary.record_failed(FillField::Phone, FillReason::NotFound);
        assert_eq!(derive_status(&summary), ApplicationStatus::Success);

        summary.record_failed(FillField::Email, FillReason::NotFound);
        assert_eq!(derive_status(&summary), ApplicationStatus::PartialSuccess);
    }

    #[test]
    fn test_partial_message_counts_failures() {
        let mut summary = FillSummary::new();
        summary.record_failed(FillField::FirstName, FillReason::NotFound);
        summary.record_failed(FillField::Phone, FillReason::NotFound);

        let message = run_message(ApplicationStatus::PartialSuccess, &summary);
        assert!(message.contains("2 field(s)"));
        assert!(message.contains("not submitted"));
    }
}
