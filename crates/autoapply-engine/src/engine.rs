//! Automation entry point.

use std::path::Path;

use tracing::{error, info};

use crate::launcher::{BrowserInstance, LaunchConfig};
use crate::page::CdpFormPage;
use crate::platform::PlatformRegistry;
use crate::report;
use crate::types::{
    ApplicantProfile, ApplicationResult, ApplicationStatus, JobApplicationTarget,
};

/// Drives one job application per call: launch, detect, fill, report,
/// tear down. Stateless between calls; safe to share across concurrent
/// runs, each of which gets its own browser process.
pub struct AutomationEngine {
    config: LaunchConfig,
    registry: PlatformRegistry,
}

impl AutomationEngine {
    pub fn new(config: LaunchConfig) -> Self {
        Self {
            config,
            registry: PlatformRegistry::standard(),
        }
    }

    /// An engine with a caller-extended platform registry.
    pub fn with_registry(config: LaunchConfig, registry: PlatformRegistry) -> Self {
        Self { config, registry }
    }

    /// Fill the application form at `job_url` from `profile`. Never submits
    /// the form. Always returns a terminal result: launch, navigation, and
    /// unexpected strategy failures come back as `status = error`, and the
    /// browser is torn down on every path.
    pub async fn apply_to_job(
        &self,
        job_url: &str,
        profile: &ApplicantProfile,
        resume_path: Option<&Path>,
    ) -> ApplicationResult {
        info!(url = %job_url, "starting application run");

        let browser = match BrowserInstance::launch(&self.config).await {
            Ok(browser) => browser,
            Err(e) => {
                error!(error = %e, "browser launch failed");
                return ApplicationResult::fatal(e.to_string());
            }
        };

        let result = self.run(&browser, job_url, profile, resume_path).await;
        browser.shutdown().await;
        result
    }

    async fn run(
        &self,
        browser: &BrowserInstance,
        job_url: &str,
        profile: &ApplicantProfile,
        resume_path: Option<&Path>,
    ) -> ApplicationResult {
        let resolved_url = match browser.navigate(job_url).await {
            Ok(url) => url,
            Err(e) => {
                error!(error = %e, "navigation failed");
                return ApplicationResult::fatal(e.to_string());
            }
        };

        let (platform, strategy) = self.registry.resolve(&resolved_url);
        let target = JobApplicationTarget {
            requested_url: job_url.to_string(),
            resolved_url,
            platform,
        };
        info!(platform = ?target.platform, resolved = %target.resolved_url, "platform detected");

        let page = CdpFormPage::new(browser.page(), self.config.slow_mo);
        let filled = strategy.fill(&page, profile, resume_path).await;

        // Navigation succeeded, so the verification artifact is captured
        // whatever the fill outcome was
        let screenshot_path =
            report::capture_screenshot(browser.page(), &self.config.output_dir, job_url).await;

        match filled {
            Ok(summary) => {
                let status = report::derive_status(&summary);
                let message = report::run_message(status, &summary);
                info!(status = ?status, "application run finished");
                ApplicationResult {
                    status,
                    message,
                    screenshot_path,
                    fill_summary: Some(summary),
                }
            }
            Err(e) => {
                error!(error = %e, "strategy aborted");
                ApplicationResult {
                    status: ApplicationStatus::Error,
                    message: e.to_string(),
                    screenshot_path,
                    fill_summary: None,
                }
            }
        }
    }
}
