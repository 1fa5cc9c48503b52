//! Command-line interface definitions.

use std::path::PathBuf;

use clap::Parser;

/// AutoApply CLI.
#[derive(Parser)]
#[command(name = "autoapply")]
#[command(about = "Fill a job application form in a real browser (never submits)")]
#[command(version)]
pub struct Cli {
    /// Job posting URL
    #[arg(long)]
    pub url: String,

    /// Applicant first name
    #[arg(long)]
    pub first_name: Option<String>,

    /// Applicant last name
    #[arg(long)]
    pub last_name: Option<String>,

    /// Applicant email address
    #[arg(long)]
    pub email: Option<String>,

    /// Applicant phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// LinkedIn profile URL
    #[arg(long)]
    pub linkedin: Option<String>,

    /// Resume file to attach
    #[arg(long)]
    pub resume: Option<PathBuf>,

    /// Run with a visible browser window
    #[arg(long)]
    pub headed: bool,

    /// Delay between page interactions, in milliseconds
    #[arg(long)]
    pub slow_mo: Option<u64>,

    /// Navigation settle timeout, in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Directory for screenshot artifacts
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Chrome executable override
    #[arg(long, env = "AUTOAPPLY_CHROME")]
    pub chrome: Option<PathBuf>,
}
