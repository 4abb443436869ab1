//! Gmail Attachment Export
//!
//! A single-pass batch tool that scans a Gmail mailbox, selects message
//! parts carrying attachments that satisfy a set of filters (minimum size,
//! cutoff date, label inclusion/exclusion), and writes the attachment
//! payloads into a local directory tree organized by label.
//!
//! # Overview
//!
//! - **Authentication**: OAuth2 (read-only scope) with token caching
//! - **Selection**: per-part filtering on size, message age, and labels
//! - **Label resolution**: best-effort mapping of label names to identifiers
//! - **Output**: `<base>[/<label>]/<filename>`, overwriting on collision
//!   unless the unique-names policy is enabled
//!
//! # Example Usage
//!
//! ```no_run
//! use gmail_attachment_export::{auth, client::GmailApiClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let hub = auth::initialize_gmail_hub(
//!         "credentials.json".as_ref(),
//!         ".gmail-attachments/token.json".as_ref(),
//!     )
//!     .await?;
//!
//!     let client = GmailApiClient::new(hub, "me");
//!     // Use client to list messages and fetch attachments
//!     // ...
//!
//!     Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`auth`] - OAuth2 authentication and Gmail API initialization
//! - [`client`] - Gmail API client and message parsing
//! - [`cli`] - Command-line interface and pipeline glue
//! - [`config`] - Configuration management
//! - [`downloader`] - Sequential download pipeline
//! - [`error`] - Error types and result alias
//! - [`fetcher`] - Attachment byte retrieval and file writing
//! - [`filter`] - Per-part selection logic
//! - [`labels`] - Label name resolution
//! - [`models`] - Core data structures
//! - [`paths`] - Destination path construction

pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod downloader;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod labels;
pub mod models;
pub mod paths;

// Re-export commonly used types for convenience
pub use error::{GmailError, Result};

// Core data models
pub use models::{AttachmentPart, MessageDetail, PartData};

// Client types
pub use client::{GmailApiClient, GmailClient, LabelInfo};

// Selection and output types
pub use filter::{FilterConfig, PartDecision, RejectReason};
pub use labels::{resolve_labels, LabelSelection};
pub use paths::NamingPolicy;

// Pipeline types
pub use downloader::{DownloadReport, Downloader};

// Config types
pub use config::{Config, DownloadConfig};

// CLI types (for binary usage)
pub use cli::{Cli, Commands, ProgressReporter};
