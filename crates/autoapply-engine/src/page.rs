//! Form-page access seam.
//!
//! Strategies interact with the live page through the [`FormPage`] trait
//! rather than the CDP session directly, so they can be exercised against a
//! scripted page in tests. [`CdpFormPage`] is the production implementation.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::cdp::{CdpError, PageSession};
use crate::error::AutomationError;

/// Field-level page operations used by the fill strategies.
#[async_trait]
pub trait FormPage: Send + Sync {
    /// Fill the control associated with a visible label. The label match is
    /// fuzzy: case-insensitive substring over the label's text content.
    async fn fill_by_label(&self, label: &str, value: &str) -> Result<(), AutomationError>;

    /// Fill an input located by its `name` attribute.
    async fn fill_by_name(&self, name: &str, value: &str) -> Result<(), AutomationError>;

    /// Attach a local file to the first file input on the page.
    async fn attach_file(&self, path: &Path) -> Result<(), AutomationError>;
}

/// [`FormPage`] over a live CDP page session.
pub struct CdpFormPage<'a> {
    session: &'a PageSession,
    /// Interaction pacing delay (observability aid, not correctness).
    pacing: Option<Duration>,
    token_seq: AtomicU64,
}

impl<'a> CdpFormPage<'a> {
    pub fn new(session: &'a PageSession, pacing: Option<Duration>) -> Self {
        Self {
            session,
            pacing,
            token_seq: AtomicU64::new(0),
        }
    }

    async fn pace(&self) {
        if let Some(delay) = self.pacing {
            tokio::time::sleep(delay).await;
        }
    }

    /// Locate a labelled control in the page and tag it with a transient
    /// attribute so it can be addressed by selector. Returns the tag token,
    /// or None when no label matches.
    async fn tag_labelled_control(&self, label: &str) -> Result<Option<String>, CdpError> {
        let token = format!("af{}", self.token_seq.fetch_add(1, Ordering::Relaxed));
        let wanted = serde_json::json!(label).to_string();
        let tag = serde_json::json!(token).to_string();

        let script = format!(
            r#"(() => {{
                const wanted = {wanted}.trim().toLowerCase();
                const labels = Array.from(document.querySelectorAll('label'));
                const hit = labels.find(l => (l.textContent || '').trim().toLowerCase().includes(wanted));
                if (!hit) return false;
                let control = hit.htmlFor ? document.getElementById(hit.htmlFor) : null;
                if (!control) control = hit.querySelector('input, textarea, select');
                if (!control) return false;
                control.setAttribute('data-autofill', {tag});
                return true;
            }})()"#
        );

        let found = self.session.evaluate(&script).await?;
        if found.as_bool().unwrap_or(false) {
            Ok(Some(token))
        } else {
            Ok(None)
        }
    }

    async fn clear_tag(&self, token: &str) {
        let script = format!(
            "document.querySelector(\"[data-autofill='{token}']\")?.removeAttribute('data-autofill')"
        );
        // Best-effort cleanup; the tag is transient either way
        let _ = self.session.evaluate(&script).await;
    }
}

#[async_trait]
impl FormPage for CdpFormPage<'_> {
    async fn fill_by_label(&self, label: &str, value: &str) -> Result<(), AutomationError> {
        let token = self
            .tag_labelled_control(label)
            .await
            .map_err(AutomationError::from)?
            .ok_or_else(|| AutomationError::ElementNotFound(format!("label '{label}'")))?;

        let selector = format!("[data-autofill='{token}']");
        let filled = self.session.fill(&selector, value).await;
        self.clear_tag(&token).await;
        filled?;

        debug!(label, "filled field by label");
        self.pace().await;
        Ok(())
    }

    async fn fill_by_name(&self, name: &str, value: &str) -> Result<(), AutomationError> {
        let selector = format!("input[name='{name}']");
        self.session.fill(&selector, value).await?;

        debug!(name, "filled field by name");
        self.pace().await;
        Ok(())
    }

    async fn attach_file(&self, path: &Path) -> Result<(), AutomationError> {
        self.session
            .set_file_input("input[type='file']", path)
            .await
            .map_err(|e| match e {
                CdpError::ElementNotFound(s) => AutomationError::ElementNotFound(s),
                CdpError::SessionClosed => AutomationError::SessionClosed,
                other => AutomationError::UploadFailed(other.to_string()),
            })?;

        debug!(path = %path.display(), "attached file");
        self.pace().await;
        Ok(())
    }
}
