//! Greenhouse.io form filler.

use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use crate::error::AutomationError;
use crate::page::FormPage;
use crate::types::{ApplicantProfile, FillField, FillSummary};

use super::{FillStrategy, fill_labelled, upload_resume};

/// Greenhouse forms expose their inputs through visible labels.
pub struct GreenhouseStrategy;

#[async_trait]
impl FillStrategy for GreenhouseStrategy {
    async fn fill(
        &self,
        page: &dyn FormPage,
        profile: &ApplicantProfile,
        resume_path: Option<&Path>,
    ) -> Result<FillSummary, AutomationError> {
        info!("filling Greenhouse application form");
        let mut summary = FillSummary::new();

        fill_labelled(
            page,
            &mut summary,
            FillField::FirstName,
            "First Name",
            profile.value(FillField::FirstName),
        )
        .await?;
        fill_labelled(
            page,
            &mut summary,
            FillField::LastName,
            "Last Name",
            profile.value(FillField::LastName),
        )
        .await?;
        fill_labelled(
            page,
            &mut summary,
            FillField::Email,
            "Email",
            profile.value(FillField::Email),
        )
        .await?;
        fill_labelled(
            page,
            &mut summary,
            FillField::Phone,
            "Phone",
            profile.value(FillField::Phone),
        )
        .await?;
        // Not every Greenhouse board asks for it
        fill_labelled(
            page,
            &mut summary,
            FillField::Linkedin,
            "LinkedIn Profile",
            profile.value(FillField::Linkedin),
        )
        .await?;

        upload_resume(page, &mut summary, resume_path).await?;

        Ok(summary)
    }
}
