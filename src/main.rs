//! AutoApply - browser-driven job application autofill.
//!
//! Main entry point for the AutoApply CLI.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use autoapply_engine::{ApplicantProfile, ApplicationStatus, AutomationEngine, LaunchConfig};

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    info!(url = %cli.url, "autoapply starting");

    let config = LaunchConfig {
        headless: !cli.headed,
        slow_mo: cli.slow_mo.map(Duration::from_millis),
        nav_timeout: Duration::from_secs(cli.timeout_secs),
        chrome_path: cli.chrome.clone(),
        output_dir: cli.output_dir.clone(),
        ..LaunchConfig::default()
    };

    let profile = ApplicantProfile {
        first_name: cli.first_name.clone(),
        last_name: cli.last_name.clone(),
        email: cli.email.clone(),
        phone: cli.phone.clone(),
        linkedin_url: cli.linkedin.clone(),
    };

    let engine = AutomationEngine::new(config);
    let result = engine
        .apply_to_job(&cli.url, &profile, cli.resume.as_deref())
        .await;

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(if result.status == ApplicationStatus::Error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}
