//! Lever.co form filler.

use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::AutomationError;
use crate::page::FormPage;
use crate::types::{ApplicantProfile, FillField, FillReason, FillSummary};

use super::{FillStrategy, fill_named, upload_resume};

/// Lever forms use structural `name` attributes rather than labels, and a
/// single combined full-name input.
pub struct LeverStrategy;

impl LeverStrategy {
    /// Fill Lever's combined `name` input and mirror the outcome onto the
    /// first- and last-name logical fields that were actually supplied.
    async fn fill_combined_name(
        &self,
        page: &dyn FormPage,
        summary: &mut FillSummary,
        profile: &ApplicantProfile,
    ) -> Result<(), AutomationError> {
        let name_fields = [FillField::FirstName, FillField::LastName];

        let Some(full_name) = profile.full_name() else {
            for field in name_fields {
                summary.record_unsupplied(field);
            }
            return Ok(());
        };

        let result = page.fill_by_name("name", &full_name).await;
        let failed = match result {
            Ok(()) => false,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                debug!(error = %e, "combined name field could not be filled");
                true
            }
        };

        for field in name_fields {
            if profile.value(field).is_none() {
                summary.record_unsupplied(field);
            } else if failed {
                summary.record_failed(field, FillReason::NotFound);
            } else {
                summary.record_filled(field);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl FillStrategy for LeverStrategy {
    async fn fill(
        &self,
        page: &dyn FormPage,
        profile: &ApplicantProfile,
        resume_path: Option<&Path>,
    ) -> Result<FillSummary, AutomationError> {
        info!("filling Lever application form");
        let mut summary = FillSummary::new();

        self.fill_combined_name(page, &mut summary, profile).await?;
        fill_named(
            page,
            &mut summary,
            FillField::Email,
            "email",
            profile.value(FillField::Email),
        )
        .await?;
        fill_named(
            page,
            &mut summary,
            FillField::Phone,
            "phone",
            profile.value(FillField::Phone),
        )
        .await?;
        fill_named(
            page,
            &mut summary,
            FillField::Linkedin,
            "urls[LinkedIn]",
            profile.value(FillField::Linkedin),
        )
        .await?;

        upload_resume(page, &mut summary, resume_path).await?;

        Ok(summary)
    }
}
