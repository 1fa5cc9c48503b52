//! Per-platform form fill strategies.
//!
//! Each strategy fills the standard application fields against a live page,
//! recording one outcome per logical field. Per-field failures are contained:
//! a field that cannot be located is recorded `not-found` and the remaining
//! fields are still attempted. Only session death aborts a strategy.

mod generic;
mod greenhouse;
mod lever;

pub use generic::GenericStrategy;
pub use greenhouse::GreenhouseStrategy;
pub use lever::LeverStrategy;

use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::AutomationError;
use crate::page::FormPage;
use crate::types::{ApplicantProfile, FillField, FillReason, FillSummary};

/// Common fill contract implemented by every ATS variant. Strategies are
/// pure fill functions; their platform association lives in the detector
/// registry.
#[async_trait]
pub trait FillStrategy: Send + Sync {
    /// Fill the form fields on `page` from `profile`, attaching the resume
    /// when a valid path is given. Returns a summary with one outcome per
    /// logical field; `Err` only on fatal session failure.
    async fn fill(
        &self,
        page: &dyn FormPage,
        profile: &ApplicantProfile,
        resume_path: Option<&Path>,
    ) -> Result<FillSummary, AutomationError>;
}

/// Record one field operation, containing non-fatal failures as `not-found`.
fn absorb(
    summary: &mut FillSummary,
    field: FillField,
    result: Result<(), AutomationError>,
) -> Result<(), AutomationError> {
    match result {
        Ok(()) => {
            summary.record_filled(field);
            Ok(())
        }
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            debug!(field = ?field, error = %e, "field could not be filled");
            summary.record_failed(field, FillReason::NotFound);
            Ok(())
        }
    }
}

/// Attempt a label-located field, skipping it when the profile has no value.
pub(crate) async fn fill_labelled(
    page: &dyn FormPage,
    summary: &mut FillSummary,
    field: FillField,
    label: &str,
    value: Option<&str>,
) -> Result<(), AutomationError> {
    match value {
        None => {
            summary.record_unsupplied(field);
            Ok(())
        }
        Some(v) => absorb(summary, field, page.fill_by_label(label, v).await),
    }
}

/// Attempt a name-attribute-located field, skipping it when the profile has
/// no value.
pub(crate) async fn fill_named(
    page: &dyn FormPage,
    summary: &mut FillSummary,
    field: FillField,
    name: &str,
    value: Option<&str>,
) -> Result<(), AutomationError> {
    match value {
        None => {
            summary.record_unsupplied(field);
            Ok(())
        }
        Some(v) => absorb(summary, field, page.fill_by_name(name, v).await),
    }
}

/// Shared resume policy: missing path or missing file is an optional skip,
/// an attach failure degrades only the resume field.
pub(crate) async fn upload_resume(
    page: &dyn FormPage,
    summary: &mut FillSummary,
    resume_path: Option<&Path>,
) -> Result<(), AutomationError> {
    let Some(path) = resume_path else {
        summary.record_skipped(FillField::Resume, FillReason::OptionalSkipped);
        return Ok(());
    };

    if !path.exists() {
        debug!(path = %path.display(), "resume file missing, skipping upload");
        summary.record_skipped(FillField::Resume, FillReason::OptionalSkipped);
        return Ok(());
    }

    match page.attach_file(path).await {
        Ok(()) => {
            summary.record_filled(FillField::Resume);
            Ok(())
        }
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            warn!(error = %e, "resume upload failed");
            summary.record_failed(FillField::Resume, FillReason::UploadError);
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
