//! Command-line interface

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::auth;
use crate::client::{GmailApiClient, GmailClient};
use crate::config::Config;
use crate::downloader::{DownloadReport, Downloader};
use crate::error::{GmailError, Result};
use crate::filter::FilterConfig;
use crate::labels::{resolve_labels, LabelSelection};
use crate::paths::NamingPolicy;

#[derive(Parser, Debug)]
#[command(name = "gmail-attachments")]
#[command(version)]
#[command(about = "Export Gmail attachments into a local directory tree", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Path to OAuth2 credentials file
    #[arg(long, default_value = "credentials.json")]
    pub credentials: PathBuf,

    /// Path to token cache file
    #[arg(long, default_value = ".gmail-attachments/token.json")]
    pub token_cache: PathBuf,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate with Gmail API
    Auth {
        /// Force re-authentication even if token exists
        #[arg(long)]
        force: bool,
    },

    /// Download qualifying attachments
    Download(DownloadArgs),

    /// Generate example configuration file
    InitConfig {
        /// Path to create config file
        #[arg(short, long, default_value = "config.toml")]
        output: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Account identifier ("me" for the authenticated user)
    #[arg(long)]
    pub account: String,

    /// Destination base directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Minimum attachment size in bytes (inclusive)
    #[arg(long)]
    pub min_size: Option<u64>,

    /// Only messages older than this many days qualify
    #[arg(long, conflicts_with = "before")]
    pub age_days: Option<u32>,

    /// Only messages strictly older than this UTC date (YYYY-MM-DD) qualify
    #[arg(long)]
    pub before: Option<NaiveDate>,

    /// Label name to include (repeatable); the first label of a message
    /// found in this set names its subfolder
    #[arg(long = "include-label", value_name = "NAME")]
    pub include_labels: Vec<String>,

    /// Label name to exclude (repeatable); a message carrying any of these
    /// is never downloaded
    #[arg(long = "exclude-label", value_name = "NAME")]
    pub exclude_labels: Vec<String>,

    /// Suffix filenames with the message id instead of overwriting
    /// same-named attachments
    #[arg(long)]
    pub unique_names: bool,
}

/// Resolve the single cutoff instant for a run.
///
/// An absolute `--before` date wins over an age in days; with neither, the
/// cutoff is exactly one year before run time. Resolved once, never
/// recomputed mid-run.
pub fn resolve_cutoff(
    age_days: Option<u32>,
    before: Option<NaiveDate>,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    if let Some(date) = before {
        return date.and_time(NaiveTime::MIN).and_utc();
    }
    let days = age_days.unwrap_or(365);
    now - Duration::days(i64::from(days))
}

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration as StdDuration;

/// Progress reporter using indicatif
pub struct ProgressReporter {
    multi: MultiProgress,
    spinner_style: ProgressStyle,
    bar_style: ProgressStyle,
}

impl ProgressReporter {
    pub fn new() -> Self {
        // Use {elapsed} for human-readable format (e.g., "1s", "234ms")
        let spinner_style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed:>6}] {msg}")
            .unwrap()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ");

        let bar_style = ProgressStyle::default_bar()
            .template("[{elapsed:>6}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
            .unwrap()
            .progress_chars("##-");

        Self {
            multi: MultiProgress::new(),
            spinner_style,
            bar_style,
        }
    }

    pub fn add_spinner(&self, msg: &str) -> ProgressBar {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(self.spinner_style.clone());
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(StdDuration::from_millis(100));
        pb
    }

    pub fn add_progress_bar(&self, len: u64, msg: &str) -> ProgressBar {
        let pb = self.multi.add(ProgressBar::new(len));
        pb.set_style(self.bar_style.clone());
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(StdDuration::from_millis(100));
        pb
    }

    /// Finish a spinner and clear it from the multi-progress display
    pub fn finish_spinner(&self, pb: &ProgressBar, msg: &str) {
        pb.finish_and_clear();
        println!("  ✓ {}", msg);
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the download pipeline end to end
///
/// Merges config-file defaults with CLI flags, authenticates, resolves
/// label names (only when a label filter was requested), and drives the
/// downloader.
///
/// # Returns
/// * `Ok(DownloadReport)` - counters for the summary block
/// * `Err(GmailError)` - if any step fails
pub async fn run_download(cli: &Cli, args: &DownloadArgs) -> Result<DownloadReport> {
    let reporter = ProgressReporter::new();

    let config_spinner = reporter.add_spinner("Loading configuration...");
    let config = Config::load(&cli.config).await?;
    reporter.finish_spinner(
        &config_spinner,
        &format!("Configuration loaded from {:?}", cli.config),
    );

    // CLI flags override config-file defaults
    let dest = args
        .output
        .clone()
        .or_else(|| config.download.output_dir.clone())
        .ok_or_else(|| {
            GmailError::ConfigError(
                "No destination directory: pass --output or set download.output_dir".to_string(),
            )
        })?;
    let min_size = args.min_size.unwrap_or(config.download.min_size_bytes);
    let include_names = if args.include_labels.is_empty() {
        config.download.include_labels.clone()
    } else {
        args.include_labels.clone()
    };
    let exclude_names = if args.exclude_labels.is_empty() {
        config.download.exclude_labels.clone()
    } else {
        args.exclude_labels.clone()
    };
    let age_days = args.age_days.or(config.download.age_days);
    let naming = if args.unique_names || config.download.unique_names {
        NamingPolicy::SuffixMessageId
    } else {
        NamingPolicy::Overwrite
    };
    let cutoff = resolve_cutoff(age_days, args.before, Utc::now());

    let auth_spinner = reporter.add_spinner("Authenticating with Gmail API...");
    let hub = auth::initialize_gmail_hub(&cli.credentials, &cli.token_cache).await?;
    reporter.finish_spinner(&auth_spinner, "Gmail API authenticated");

    let client: Box<dyn GmailClient> = Box::new(GmailApiClient::new(hub, args.account.clone()));

    // Listing labels costs a network call; skip it when no label filter
    // was requested.
    let labels = if LabelSelection::is_wanted(&include_names, &exclude_names) {
        let label_spinner = reporter.add_spinner("Resolving label names...");
        let account_labels = client.list_labels().await?;
        let selection = resolve_labels(&account_labels, &include_names, &exclude_names);
        reporter.finish_spinner(
            &label_spinner,
            &format!(
                "Resolved {} of {} requested labels",
                selection.include.len() + selection.exclude.len(),
                include_names.len() + exclude_names.len()
            ),
        );
        for name in &selection.unresolved {
            warn!(
                "Requested label {:?} does not exist on this account; ignoring it",
                name
            );
        }
        selection
    } else {
        LabelSelection::default()
    };

    info!(
        "Downloading attachments of at least {} bytes from messages before {}",
        min_size,
        cutoff.format("%Y-%m-%d %H:%M:%S")
    );

    let filter = FilterConfig {
        min_size,
        cutoff,
        labels,
    };

    let downloader = Downloader::new(client, filter, dest, naming);
    downloader.run(&reporter).await
}
