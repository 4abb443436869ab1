//! Single-pass download pipeline: list, filter, fetch, write

use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::cli::ProgressReporter;
use crate::client::GmailClient;
use crate::error::{GmailError, Result};
use crate::fetcher;
use crate::filter::{evaluate_part, FilterConfig, PartDecision};
use crate::paths::{attachment_path, NamingPolicy};

/// Provider-side pre-filter; everything else is decided locally per part.
const ATTACHMENT_QUERY: &str = "has:attachment";

/// Counters accumulated over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    /// Messages returned by the listing query.
    pub messages_scanned: usize,
    /// Attachment files written to disk.
    pub attachments_written: usize,
    /// Parts that qualified but carried neither inline data nor an
    /// attachment identifier.
    pub parts_skipped: usize,
    /// Total decoded bytes written.
    pub bytes_written: u64,
}

/// Drives the per-message pipeline sequentially: one message is fully
/// processed before the next begins. No state is shared across messages
/// beyond the read-only filter configuration.
pub struct Downloader {
    client: Box<dyn GmailClient>,
    filter: FilterConfig,
    dest: PathBuf,
    naming: NamingPolicy,
}

impl Downloader {
    pub fn new(
        client: Box<dyn GmailClient>,
        filter: FilterConfig,
        dest: PathBuf,
        naming: NamingPolicy,
    ) -> Self {
        Self {
            client,
            filter,
            dest,
            naming,
        }
    }

    /// Run the download pass.
    ///
    /// Network and filesystem failures abort the run; the only locally
    /// recovered condition is a qualifying part with no payload location,
    /// which is logged and counted in `parts_skipped`.
    pub async fn run(&self, reporter: &ProgressReporter) -> Result<DownloadReport> {
        let list_spinner = reporter.add_spinner("Listing messages with attachments...");
        let message_ids = self.client.list_message_ids(ATTACHMENT_QUERY).await?;
        reporter.finish_spinner(
            &list_spinner,
            &format!("Found {} messages with attachments", message_ids.len()),
        );

        let mut report = DownloadReport {
            messages_scanned: message_ids.len(),
            ..Default::default()
        };

        if message_ids.is_empty() {
            info!("No messages found.");
            return Ok(report);
        }

        let pb = reporter.add_progress_bar(message_ids.len() as u64, "Downloading attachments...");

        for message_id in &message_ids {
            let message = self.client.get_message(message_id).await?;

            if message.parts.is_empty() {
                debug!("Message {} has no parts, skipping", message.id);
                pb.inc(1);
                continue;
            }

            for part in &message.parts {
                match evaluate_part(&message, part, &self.filter) {
                    PartDecision::Accept { subfolder } => {
                        self.download_part(&message.id, part, subfolder.as_deref(), &mut report)
                            .await?;
                    }
                    PartDecision::Reject(reason) => {
                        debug!(
                            "Rejected part {:?} of message {}: {:?}",
                            part.filename, message.id, reason
                        );
                    }
                }
            }

            pb.inc(1);
        }

        pb.finish_with_message(format!(
            "Done: {} attachments written ({} bytes)",
            report.attachments_written, report.bytes_written
        ));

        Ok(report)
    }

    async fn download_part(
        &self,
        message_id: &str,
        part: &crate::models::AttachmentPart,
        subfolder: Option<&str>,
        report: &mut DownloadReport,
    ) -> Result<()> {
        let path = attachment_path(&self.dest, subfolder, &part.filename, message_id, self.naming);

        let bytes = match fetcher::fetch_part_bytes(self.client.as_ref(), message_id, part).await {
            Ok(bytes) => bytes,
            // A part without a payload location is skipped; the run goes on.
            Err(GmailError::InvalidMessageFormat(msg)) => {
                warn!("Skipping part: {}", msg);
                report.parts_skipped += 1;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        fetcher::write_attachment(&path, &bytes).await?;
        debug!("Wrote {} ({} bytes)", path.display(), bytes.len());

        report.attachments_written += 1;
        report.bytes_written += bytes.len() as u64;
        Ok(())
    }
}
