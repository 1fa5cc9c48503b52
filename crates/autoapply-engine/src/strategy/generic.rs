//! Best-effort filler for unrecognized platforms.

use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use crate::error::AutomationError;
use crate::page::FormPage;
use crate::types::{ApplicantProfile, FillField, FillReason, FillSummary};

use super::{FillStrategy, upload_resume};

/// Label synonyms probed in priority order per logical field.
const FIRST_NAME_LABELS: &[&str] = &["First Name", "First name"];
const LAST_NAME_LABELS: &[&str] = &["Last Name", "Last name"];
const EMAIL_LABELS: &[&str] = &["Email", "Email Address"];
const PHONE_LABELS: &[&str] = &["Phone", "Mobile"];
const LINKEDIN_LABELS: &[&str] = &["LinkedIn", "LinkedIn Profile"];

/// Fallback strategy: probes common label texts field by field and fills
/// whatever it can find. Never raises for a missing field.
pub struct GenericStrategy;

impl GenericStrategy {
    async fn fill_any_label(
        &self,
        page: &dyn FormPage,
        summary: &mut FillSummary,
        field: FillField,
        labels: &[&str],
        value: Option<&str>,
    ) -> Result<(), AutomationError> {
        let Some(v) = value else {
            summary.record_unsupplied(field);
            return Ok(());
        };

        for label in labels {
            match page.fill_by_label(label, v).await {
                Ok(()) => {
                    summary.record_filled(field);
                    return Ok(());
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(_) => continue,
            }
        }

        summary.record_failed(field, FillReason::NotFound);
        Ok(())
    }
}

#[async_trait]
impl FillStrategy for GenericStrategy {
    async fn fill(
        &self,
        page: &dyn FormPage,
        profile: &ApplicantProfile,
        resume_path: Option<&Path>,
    ) -> Result<FillSummary, AutomationError> {
        info!("unrecognized platform, attempting generic form fill");
        let mut summary = FillSummary::new();

        self.fill_any_label(
            page,
            &mut summary,
            FillField::FirstName,
            FIRST_NAME_LABELS,
            profile.value(FillField::FirstName),
        )
        .await?;
        self.fill_any_label(
            page,
            &mut summary,
            FillField::LastName,
            LAST_NAME_LABELS,
            profile.value(FillField::LastName),
        )
        .await?;
        self.fill_any_label(
            page,
            &mut summary,
            FillField::Email,
            EMAIL_LABELS,
            profile.value(FillField::Email),
        )
        .await?;
        self.fill_any_label(
            page,
            &mut summary,
            FillField::Phone,
            PHONE_LABELS,
            profile.value(FillField::Phone),
        )
        .await?;
        self.fill_any_label(
            page,
            &mut summary,
            FillField::Linkedin,
            LINKEDIN_LABELS,
            profile.value(FillField::Linkedin),
        )
        .await?;

        upload_resume(page, &mut summary, resume_path).await?;

        Ok(summary)
    }
}
