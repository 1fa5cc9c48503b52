//! Data model for one automation run: applicant profile, per-field fill
//! outcomes, and the terminal application result.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// Applicant data supplied by the caller. All fields optional; blank
/// strings are treated the same as absent values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
}

impl ApplicantProfile {
    /// The profile value for a logical field, normalized: trimmed, and
    /// `None` when absent or blank.
    pub fn value(&self, field: FillField) -> Option<&str> {
        let slot = match field {
            FillField::FirstName => self.first_name.as_deref(),
            FillField::LastName => self.last_name.as_deref(),
            FillField::Email => self.email.as_deref(),
            FillField::Phone => self.phone.as_deref(),
            FillField::Linkedin => self.linkedin_url.as_deref(),
            FillField::Resume => None,
        };
        slot.map(str::trim).filter(|v| !v.is_empty())
    }

    /// First and last name joined for platforms with a single name input.
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [
            self.value(FillField::FirstName),
            self.value(FillField::LastName),
        ]
        .into_iter()
        .flatten()
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// The closed set of logical fields every strategy reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillField {
    FirstName,
    LastName,
    Email,
    Phone,
    Linkedin,
    Resume,
}

impl FillField {
    /// Declared fill order within a run.
    pub const ORDER: [FillField; 6] = [
        FillField::FirstName,
        FillField::LastName,
        FillField::Email,
        FillField::Phone,
        FillField::Linkedin,
        FillField::Resume,
    ];

    /// Core fields degrade the run status when they fail; the rest are
    /// always optional.
    pub fn is_core(self) -> bool {
        matches!(
            self,
            FillField::FirstName | FillField::LastName | FillField::Email
        )
    }
}

/// Why a field ended up unfilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillReason {
    /// No value supplied in the profile.
    Absent,
    /// The field could not be located or interacted with on the page.
    NotFound,
    /// A file input was found but the attach operation failed.
    UploadError,
    /// Optional input skipped (e.g. no resume path, or the file is missing).
    OptionalSkipped,
}

/// Outcome of one logical field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillOutcome {
    pub field: FillField,
    /// A fill was actually attempted against the page.
    pub attempted: bool,
    /// The fill operation completed without an observed lookup or
    /// interaction failure. The value is not read back from the page.
    pub filled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<FillReason>,
}

/// Per-run fill report: exactly one outcome per logical field, in declared
/// order, even for fields that were skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillSummary {
    outcomes: Vec<FillOutcome>,
}

impl FillSummary {
    /// A summary with every field seeded as unsupplied. Strategies overwrite
    /// the outcomes they attempt.
    pub fn new() -> Self {
        let outcomes = FillField::ORDER
            .into_iter()
            .map(|field| FillOutcome {
                field,
                attempted: false,
                filled: false,
                reason: Some(Self::unsupplied_reason(field)),
            })
            .collect();
        Self { outcomes }
    }

    /// Core fields without a profile value are recorded `absent`; optional
    /// fields are recorded `optional-skipped`.
    fn unsupplied_reason(field: FillField) -> FillReason {
        if field.is_core() {
            FillReason::Absent
        } else {
            FillReason::OptionalSkipped
        }
    }

    fn record(&mut self, field: FillField, attempted: bool, filled: bool, reason: Option<FillReason>) {
        if let Some(outcome) = self.outcomes.iter_mut().find(|o| o.field == field) {
            outcome.attempted = attempted;
            outcome.filled = filled;
            outcome.reason = reason;
        }
    }

    /// Mark a field as successfully filled.
    pub fn record_filled(&mut self, field: FillField) {
        self.record(field, true, true, None);
    }

    /// Mark a field as attempted but failed.
    pub fn record_failed(&mut self, field: FillField, reason: FillReason) {
        self.record(field, true, false, Some(reason));
    }

    /// Mark a field as skipped without an attempt.
    pub fn record_skipped(&mut self, field: FillField, reason: FillReason) {
        self.record(field, false, false, Some(reason));
    }

    /// Mark a field whose profile value was not supplied.
    pub fn record_unsupplied(&mut self, field: FillField) {
        self.record(field, false, false, Some(Self::unsupplied_reason(field)));
    }

    /// The outcome for one logical field.
    pub fn outcome(&self, field: FillField) -> &FillOutcome {
        self.outcomes
            .iter()
            .find(|o| o.field == field)
            .expect("summary holds every logical field")
    }

    /// All outcomes in declared field order.
    pub fn outcomes(&self) -> &[FillOutcome] {
        &self.outcomes
    }

    /// True when a core field was attempted (i.e. supplied non-empty) and
    /// could not be filled.
    pub fn has_core_failure(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| o.field.is_core() && o.attempted && !o.filled)
    }

    /// Count of fields that were attempted and failed.
    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.attempted && !o.filled)
            .count()
    }
}

impl Default for FillSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// The page a run resolved to. Created fresh per invocation, discarded
/// after the result is returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobApplicationTarget {
    pub requested_url: String,
    /// Final URL after redirects; the platform is derived from this.
    pub resolved_url: String,
    pub platform: Platform,
}

/// Terminal status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Success,
    PartialSuccess,
    Error,
}

/// The result every `apply_to_job` call terminates with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationResult {
    pub status: ApplicationStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_summary: Option<FillSummary>,
}

impl ApplicationResult {
    /// A run that failed before any filling could happen.
    pub(crate) fn fatal(message: impl Into<String>) -> Self {
        Self {
            status: ApplicationStatus::Error,
            message: message.into(),
            screenshot_path: None,
            fill_summary: None,
        }
    }
}
