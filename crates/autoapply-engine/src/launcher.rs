//! Per-run browser lifecycle.
//!
//! Every automation run gets its own Chrome process on an ephemeral
//! debugging port with a throwaway profile directory, plus an isolated
//! browser context inside it. Teardown runs on every exit path: the engine
//! calls [`BrowserInstance::shutdown`] after the run body, and if the future
//! is dropped mid-run the process is killed (`kill_on_drop`) and the profile
//! directory removed (`TempDir` drop).

use std::net::TcpListener;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tempfile::TempDir;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::cdp::{CdpClient, CdpError, PageSession};
use crate::error::AutomationError;

/// Explicit run configuration; tests and callers inject their own instead
/// of relying on process-wide defaults.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// Run Chrome without a visible window.
    pub headless: bool,
    /// Optional delay after each page interaction. Aids watching a headed
    /// run; has no effect on correctness.
    pub slow_mo: Option<Duration>,
    /// Upper bound on navigation + network settling.
    pub nav_timeout: Duration,
    /// Quiet window with no network activity required to consider the page
    /// settled.
    pub settle_quiet: Duration,
    /// Chrome binary override; otherwise discovered from well-known paths.
    pub chrome_path: Option<PathBuf>,
    /// Directory for screenshot artifacts.
    pub output_dir: PathBuf,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            headless: true,
            slow_mo: None,
            nav_timeout: Duration::from_secs(30),
            settle_quiet: Duration::from_millis(500),
            chrome_path: None,
            output_dir: PathBuf::from("output"),
        }
    }
}

/// One launched Chrome process with one isolated context and one page.
pub struct BrowserInstance {
    child: Child,
    client: CdpClient,
    context_id: String,
    page: PageSession,
    /// Profile lives exactly as long as the run.
    _profile_dir: TempDir,
    debug_port: u16,
    nav_timeout: Duration,
    settle_quiet: Duration,
}

impl BrowserInstance {
    /// Find a Chrome executable on this machine.
    pub fn find_chrome() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        let candidates = [
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
        ];

        #[cfg(target_os = "linux")]
        let candidates = [
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ];

        #[cfg(target_os = "windows")]
        let candidates = [
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];

        candidates
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Launch a fresh Chrome process and attach one page in an isolated
    /// browser context.
    pub async fn launch(config: &LaunchConfig) -> Result<Self, AutomationError> {
        let chrome_path = config
            .chrome_path
            .clone()
            .or_else(Self::find_chrome)
            .ok_or(AutomationError::ChromeNotFound)?;

        let debug_port =
            pick_free_port().map_err(|e| AutomationError::LaunchFailed(e.to_string()))?;
        let profile_dir = tempfile::Builder::new()
            .prefix("autoapply-profile-")
            .tempdir()
            .map_err(|e| AutomationError::LaunchFailed(e.to_string()))?;

        info!(
            port = debug_port,
            headless = config.headless,
            "launching Chrome"
        );

        let mut cmd = Command::new(&chrome_path);
        cmd.arg(format!("--remote-debugging-port={debug_port}"))
            .arg(format!("--user-data-dir={}", profile_dir.path().display()))
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-background-networking")
            .arg("--disable-sync")
            .arg("--disable-translate")
            .arg("--metrics-recording-only")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        if config.headless {
            cmd.arg("--headless=new");
        }

        let child = cmd
            .spawn()
            .map_err(|e| AutomationError::LaunchFailed(e.to_string()))?;

        let endpoint = format!("http://127.0.0.1:{debug_port}");
        if let Err(e) = wait_for_endpoint(&endpoint).await {
            // The spawned process is reaped by kill_on_drop
            return Err(e);
        }

        let client = CdpClient::connect(&endpoint)
            .await
            .map_err(|e| AutomationError::LaunchFailed(e.to_string()))?;
        let context_id = client
            .create_browser_context()
            .await
            .map_err(|e| AutomationError::LaunchFailed(e.to_string()))?;
        let page = client
            .create_page(&context_id)
            .await
            .map_err(|e| AutomationError::LaunchFailed(e.to_string()))?;

        debug!(port = debug_port, context = %context_id, "browser ready");

        Ok(Self {
            child,
            client,
            context_id,
            page,
            _profile_dir: profile_dir,
            debug_port,
            nav_timeout: config.nav_timeout,
            settle_quiet: config.settle_quiet,
        })
    }

    pub fn page(&self) -> &PageSession {
        &self.page
    }

    /// Navigate to the job URL and wait for the page to settle. Returns the
    /// resolved (post-redirect) URL.
    pub async fn navigate(&self, url: &str) -> Result<String, AutomationError> {
        self.page.navigate(url).await.map_err(|e| match e {
            CdpError::NavigationFailed(msg) => AutomationError::NavigationFailed(msg),
            other => AutomationError::NavigationFailed(other.to_string()),
        })?;

        self.page
            .wait_for_network_settled(self.nav_timeout, self.settle_quiet)
            .await
            .map_err(|e| match e {
                CdpError::Timeout(_) => AutomationError::NavigationTimeout(self.nav_timeout),
                other => AutomationError::NavigationFailed(other.to_string()),
            })?;

        let resolved = self
            .page
            .current_url()
            .await
            .map_err(|e| AutomationError::NavigationFailed(e.to_string()))?;

        debug!(resolved = %resolved, "navigation settled");
        Ok(resolved)
    }

    /// Tear down the context and kill the browser process. Consumes the
    /// instance, so teardown can only happen once per run.
    pub async fn shutdown(mut self) {
        if let Err(e) = self.client.dispose_browser_context(&self.context_id).await {
            debug!(error = %e, "browser context dispose failed");
        }
        if let Err(e) = self.child.kill().await {
            warn!(error = %e, "failed to kill Chrome process");
        }
        debug!(port = self.debug_port, "browser torn down");
    }
}

fn pick_free_port() -> std::io::Result<u16> {
    let listener = TcpListener::bind(("127.0.0.1", 0))?;
    Ok(listener.local_addr()?.port())
}

/// Wait for Chrome to start accepting debugger connections.
async fn wait_for_endpoint(endpoint: &str) -> Result<(), AutomationError> {
    let max_attempts = 30; // 30 * 200ms = 6 seconds
    for _ in 0..max_attempts {
        tokio::time::sleep(Duration::from_millis(200)).await;
        if reqwest::get(format!("{endpoint}/json/version")).await.is_ok() {
            return Ok(());
        }
    }
    Err(AutomationError::LaunchFailed(
        "Chrome did not start accepting connections within timeout".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = LaunchConfig::default();
        assert!(config.headless);
        assert!(config.slow_mo.is_none());
        assert_eq!(config.nav_timeout, Duration::from_secs(30));
        assert_eq!(config.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn test_pick_free_port_varies() {
        let a = pick_free_port().unwrap();
        assert!(a > 0);
    }

    #[test]
    fn test_find_chrome() {
        // May or may not find Chrome depending on the machine
        let _result = BrowserInstance::find_chrome();
    }

    #[tokio::test]
    async fn test_launch_with_bogus_chrome_path_fails() {
        let config = LaunchConfig {
            chrome_path: Some(PathBuf::from("/nonexistent/chrome-binary")),
            ..Default::default()
        };
        let result = BrowserInstance::launch(&config).await;
        assert!(matches!(result, Err(AutomationError::LaunchFailed(_))));
    }
}
