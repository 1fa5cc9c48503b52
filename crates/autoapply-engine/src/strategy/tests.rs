use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::AutomationError;
use crate::page::FormPage;
use crate::types::{ApplicantProfile, FillField, FillReason};

use super::*;

/// Scripted page: fills succeed only against the configured exact label
/// texts / name attributes, and every operation is logged.
#[derive(Default)]
struct MockFormPage {
    labels: Vec<&'static str>,
    names: Vec<&'static str>,
    has_file_input: bool,
    fail_upload: bool,
    dead: bool,
    fills: Mutex<Vec<(String, String)>>,
    uploads: Mutex<Vec<PathBuf>>,
}

impl MockFormPage {
    fn fill_log(&self) -> Vec<(String, String)> {
        self.fills.lock().clone()
    }
}

#[async_trait]
impl FormPage for MockFormPage {
    async fn fill_by_label(&self, label: &str, value: &str) -> Result<(), AutomationError> {
        if self.dead {
            return Err(AutomationError::SessionClosed);
        }
        if self.labels.contains(&label) {
            self.fills
                .lock()
                .push((format!("label:{label}"), value.to_string()));
            Ok(())
        } else {
            Err(AutomationError::ElementNotFound(format!("label '{label}'")))
        }
    }

    async fn fill_by_name(&self, name: &str, value: &str) -> Result<(), AutomationError> {
        if self.dead {
            return Err(AutomationError::SessionClosed);
        }
        if self.names.contains(&name) {
            self.fills
                .lock()
                .push((format!("name:{name}"), value.to_string()));
            Ok(())
        } else {
            Err(AutomationError::ElementNotFound(format!(
                "input[name='{name}']"
            )))
        }
    }

    async fn attach_file(&self, path: &Path) -> Result<(), AutomationError> {
        if self.dead {
            return Err(AutomationError::SessionClosed);
        }
        if !self.has_file_input {
            return Err(AutomationError::ElementNotFound(
                "input[type='file']".to_string(),
            ));
        }
        if self.fail_upload {
            return Err(AutomationError::UploadFailed("attach rejected".to_string()));
        }
        self.uploads.lock().push(path.to_path_buf());
        Ok(())
    }
}

fn greenhouse_page() -> MockFormPage {
    MockFormPage {
        labels: vec![
            "First Name",
            "Last Name",
            "Email",
            "Phone",
            "LinkedIn Profile",
        ],
        has_file_input: true,
        ..Default::default()
    }
}

fn lever_page() -> MockFormPage {
    MockFormPage {
        names: vec!["name", "email", "phone", "urls[LinkedIn]"],
        has_file_input: true,
        ..Default::default()
    }
}

fn full_profile() -> ApplicantProfile {
    ApplicantProfile {
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        email: Some("ada@example.com".to_string()),
        phone: Some("+1 555 0100".to_string()),
        linkedin_url: Some("https://linkedin.com/in/ada".to_string()),
    }
}

#[tokio::test]
async fn greenhouse_fills_full_profile_with_resume() {
    let page = greenhouse_page();
    let resume = tempfile::NamedTempFile::new().unwrap();

    let summary = GreenhouseStrategy
        .fill(&page, &full_profile(), Some(resume.path()))
        .await
        .unwrap();

    for field in FillField::ORDER {
        assert!(summary.outcome(field).filled, "{field:?} should be filled");
    }
    assert!(!summary.has_core_failure());
    assert_eq!(page.uploads.lock().len(), 1);
}

#[tokio::test]
async fn greenhouse_fields_fill_in_declared_order() {
    let page = greenhouse_page();

    GreenhouseStrategy
        .fill(&page, &full_profile(), None)
        .await
        .unwrap();

    let targets: Vec<String> = page.fill_log().into_iter().map(|(t, _)| t).collect();
    assert_eq!(
        targets,
        vec![
            "label:First Name",
            "label:Last Name",
            "label:Email",
            "label:Phone",
            "label:LinkedIn Profile",
        ]
    );
}

#[tokio::test]
async fn greenhouse_missing_field_does_not_stop_the_rest() {
    let mut page = greenhouse_page();
    page.labels.retain(|l| *l != "Phone");

    let summary = GreenhouseStrategy
        .fill(&page, &full_profile(), None)
        .await
        .unwrap();

    let phone = summary.outcome(FillField::Phone);
    assert!(phone.attempted);
    assert!(!phone.filled);
    assert_eq!(phone.reason, Some(FillReason::NotFound));

    // Fields after phone were still attempted
    assert!(summary.outcome(FillField::Linkedin).filled);
    assert!(!summary.has_core_failure());
}

#[tokio::test]
async fn greenhouse_missing_core_label_is_a_core_failure() {
    let mut page = greenhouse_page();
    page.labels.retain(|l| *l != "Email");

    let summary = GreenhouseStrategy
        .fill(&page, &full_profile(), None)
        .await
        .unwrap();

    assert!(summary.has_core_failure());
    assert!(summary.outcome(FillField::FirstName).filled);
}

#[tokio::test]
async fn absent_linkedin_never_fails_the_run() {
    let page = greenhouse_page();
    let profile = ApplicantProfile {
        linkedin_url: None,
        ..full_profile()
    };

    let summary = GreenhouseStrategy.fill(&page, &profile, None).await.unwrap();

    let linkedin = summary.outcome(FillField::Linkedin);
    assert!(!linkedin.attempted);
    assert_eq!(linkedin.reason, Some(FillReason::OptionalSkipped));
    assert!(!summary.has_core_failure());
}

#[tokio::test]
async fn lever_concatenates_first_and_last_name() {
    let page = lever_page();

    let summary = LeverStrategy
        .fill(&page, &full_profile(), None)
        .await
        .unwrap();

    let log = page.fill_log();
    assert_eq!(log[0], ("name:name".to_string(), "Ada Lovelace".to_string()));
    assert!(summary.outcome(FillField::FirstName).filled);
    assert!(summary.outcome(FillField::LastName).filled);
}

#[tokio::test]
async fn lever_single_name_component_mirrors_only_supplied_field() {
    let page = lever_page();
    let profile = ApplicantProfile {
        first_name: Some("Ada".to_string()),
        email: Some("ada@example.com".to_string()),
        ..Default::default()
    };

    let summary = LeverStrategy.fill(&page, &profile, None).await.unwrap();

    assert_eq!(page.fill_log()[0].1, "Ada");
    assert!(summary.outcome(FillField::FirstName).filled);
    let last = summary.outcome(FillField::LastName);
    assert!(!last.attempted);
    assert_eq!(last.reason, Some(FillReason::Absent));
}

#[tokio::test]
async fn lever_missing_phone_input_is_not_core() {
    let mut page = lever_page();
    page.names.retain(|n| *n != "phone");

    let summary = LeverStrategy
        .fill(&page, &full_profile(), None)
        .await
        .unwrap();

    assert_eq!(
        summary.outcome(FillField::Phone).reason,
        Some(FillReason::NotFound)
    );
    assert!(!summary.has_core_failure());
    assert!(summary.outcome(FillField::Email).filled);
}

#[tokio::test]
async fn lever_missing_name_input_fails_both_name_fields() {
    let mut page = lever_page();
    page.names.retain(|n| *n != "name");

    let summary = LeverStrategy
        .fill(&page, &full_profile(), None)
        .await
        .unwrap();

    for field in [FillField::FirstName, FillField::LastName] {
        let outcome = summary.outcome(field);
        assert!(outcome.attempted);
        assert_eq!(outcome.reason, Some(FillReason::NotFound));
    }
    assert!(summary.has_core_failure());
}

#[tokio::test]
async fn generic_probes_label_synonyms_in_order() {
    // Only the second synonym of each list exists on this page
    let page = MockFormPage {
        labels: vec!["First name", "Last name", "Email Address", "Mobile"],
        ..Default::default()
    };

    let summary = GenericStrategy
        .fill(&page, &full_profile(), None)
        .await
        .unwrap();

    assert!(summary.outcome(FillField::FirstName).filled);
    assert!(summary.outcome(FillField::LastName).filled);
    assert!(summary.outcome(FillField::Email).filled);
    assert!(summary.outcome(FillField::Phone).filled);
    // "LinkedIn" synonym list found nothing on this page
    assert_eq!(
        summary.outcome(FillField::Linkedin).reason,
        Some(FillReason::NotFound)
    );
    assert!(!summary.has_core_failure());
}

#[tokio::test]
async fn generic_email_only_profile_succeeds() {
    let page = MockFormPage {
        labels: vec!["Email"],
        ..Default::default()
    };
    let profile = ApplicantProfile {
        email: Some("ada@example.com".to_string()),
        ..Default::default()
    };

    let summary = GenericStrategy.fill(&page, &profile, None).await.unwrap();

    assert!(summary.outcome(FillField::Email).filled);
    // Unsupplied names are absent, not failed
    assert!(!summary.outcome(FillField::FirstName).attempted);
    assert!(!summary.has_core_failure());
}

#[tokio::test]
async fn generic_unlocatable_email_is_a_core_failure() {
    let page = MockFormPage::default();
    let profile = ApplicantProfile {
        email: Some("ada@example.com".to_string()),
        ..Default::default()
    };

    let summary = GenericStrategy.fill(&page, &profile, None).await.unwrap();

    assert_eq!(
        summary.outcome(FillField::Email).reason,
        Some(FillReason::NotFound)
    );
    assert!(summary.has_core_failure());
}

#[tokio::test]
async fn resume_none_is_optional_skipped() {
    let page = greenhouse_page();

    let summary = GreenhouseStrategy
        .fill(&page, &full_profile(), None)
        .await
        .unwrap();

    let resume = summary.outcome(FillField::Resume);
    assert!(!resume.attempted);
    assert_eq!(resume.reason, Some(FillReason::OptionalSkipped));
    assert!(page.uploads.lock().is_empty());
}

#[tokio::test]
async fn resume_missing_file_is_optional_skipped() {
    let page = greenhouse_page();

    let summary = GreenhouseStrategy
        .fill(
            &page,
            &full_profile(),
            Some(Path::new("/nonexistent/resume.pdf")),
        )
        .await
        .unwrap();

    assert_eq!(
        summary.outcome(FillField::Resume).reason,
        Some(FillReason::OptionalSkipped)
    );
    assert!(!summary.has_core_failure());
    assert!(page.uploads.lock().is_empty());
}

#[tokio::test]
async fn resume_upload_failure_degrades_only_that_field() {
    let mut page = greenhouse_page();
    page.fail_upload = true;
    let resume = tempfile::NamedTempFile::new().unwrap();

    let summary = GreenhouseStrategy
        .fill(&page, &full_profile(), Some(resume.path()))
        .await
        .unwrap();

    let outcome = summary.outcome(FillField::Resume);
    assert!(outcome.attempted);
    assert_eq!(outcome.reason, Some(FillReason::UploadError));
    assert!(!summary.has_core_failure());
}

#[tokio::test]
async fn session_death_aborts_the_strategy() {
    let page = MockFormPage {
        dead: true,
        ..greenhouse_page()
    };

    let result = GreenhouseStrategy.fill(&page, &full_profile(), None).await;
    assert!(matches!(result, Err(AutomationError::SessionClosed)));
}
