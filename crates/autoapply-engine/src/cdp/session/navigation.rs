//! Navigation and page-readiness operations for CDP page session.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use serde_json::json;
use tracing::{debug, trace};

use crate::cdp::error::CdpError;
use crate::cdp::protocol::CdpResponse;

use super::core::PageSession;

/// Poll interval while draining network events.
const EVENT_POLL: Duration = Duration::from_millis(100);

impl PageSession {
    /// Start navigation to URL. Does not wait for the page to settle;
    /// callers follow up with [`PageSession::wait_for_network_settled`].
    pub async fn navigate(&self, url: &str) -> Result<(), CdpError> {
        let result = self
            .call("Page.navigate", Some(json!({"url": url})))
            .await?;

        if let Some(error) = result.get("errorText") {
            return Err(CdpError::NavigationFailed(
                error.as_str().unwrap_or("Unknown error").to_string(),
            ));
        }

        debug!("Navigation started: {}", url);
        Ok(())
    }

    /// Wait until the page has settled: `document.readyState` is
    /// complete/interactive and no network request has been in flight for
    /// the `quiet` window. In-flight requests are tracked from the
    /// session's `Network.*` event stream.
    pub async fn wait_for_network_settled(
        &self,
        timeout: Duration,
        quiet: Duration,
    ) -> Result<(), CdpError> {
        let deadline = Instant::now() + timeout;
        let mut inflight: HashSet<String> = HashSet::new();
        let mut last_activity = Instant::now();
        let mut events = self.events.lock().await;

        loop {
            match tokio::time::timeout(EVENT_POLL, events.recv()).await {
                Ok(Some(event)) => {
                    if track_network_event(&event, &mut inflight) {
                        trace!("network activity, {} request(s) in flight", inflight.len());
                        last_activity = Instant::now();
                    }
                }
                Ok(None) => return Err(CdpError::SessionClosed),
                Err(_) => {}
            }

            if inflight.is_empty() && last_activity.elapsed() >= quiet {
                let state = self.evaluate("document.readyState").await?;
                if matches!(state.as_str(), Some("complete") | Some("interactive")) {
                    debug!("Page settled");
                    return Ok(());
                }
            }

            if Instant::now() >= deadline {
                return Err(CdpError::Timeout(format!(
                    "Page did not settle within {:?}",
                    timeout
                )));
            }
        }
    }

    /// Get current URL (post-redirect).
    pub async fn current_url(&self) -> Result<String, CdpError> {
        let result = self.evaluate("window.location.href").await?;
        Ok(result.as_str().unwrap_or("").to_string())
    }
}

/// Update the in-flight request set from one CDP event. Returns true if the
/// event was network activity.
pub(super) fn track_network_event(event: &CdpResponse, inflight: &mut HashSet<String>) -> bool {
    let Some(method) = event.method.as_deref() else {
        return false;
    };
    let request_id = event
        .params
        .as_ref()
        .and_then(|p| p["requestId"].as_str());

    match (method, request_id) {
        ("Network.requestWillBeSent", Some(id)) => {
            inflight.insert(id.to_string());
            true
        }
        ("Network.loadingFinished", Some(id)) | ("Network.loadingFailed", Some(id)) => {
            inflight.remove(id);
            true
        }
        _ => false,
    }
}
