//! Common test utilities and fixtures

use chrono::{DateTime, Utc};
use gmail_attachment_export::client::{GmailClient, LabelInfo};
use gmail_attachment_export::error::Result;
use gmail_attachment_export::filter::FilterConfig;
use gmail_attachment_export::labels::LabelSelection;
use gmail_attachment_export::models::{AttachmentPart, MessageDetail, PartData};
use mockall::mock;

/// Create a test message with the given labels and parts
pub fn create_test_message(
    id: &str,
    internal_date: DateTime<Utc>,
    labels: &[&str],
    parts: Vec<AttachmentPart>,
) -> MessageDetail {
    MessageDetail {
        id: id.to_string(),
        internal_date,
        label_ids: labels.iter().map(|s| s.to_string()).collect(),
        parts,
    }
}

/// Part with inline payload bytes
pub fn inline_part(filename: &str, size: u64, bytes: &[u8]) -> AttachmentPart {
    AttachmentPart {
        filename: filename.to_string(),
        size,
        data: PartData::Inline(bytes.to_vec()),
    }
}

/// Part that needs a follow-up attachments.get call
pub fn ref_part(filename: &str, size: u64, attachment_id: &str) -> AttachmentPart {
    AttachmentPart {
        filename: filename.to_string(),
        size,
        data: PartData::AttachmentId(attachment_id.to_string()),
    }
}

/// Part with neither inline data nor an attachment identifier
pub fn missing_part(filename: &str, size: u64) -> AttachmentPart {
    AttachmentPart {
        filename: filename.to_string(),
        size,
        data: PartData::Missing,
    }
}

/// Create a test LabelInfo
pub fn create_test_label_info(id: &str, name: &str) -> LabelInfo {
    LabelInfo {
        id: id.to_string(),
        name: name.to_string(),
    }
}

/// Filter config with no label constraints
pub fn filter_config(min_size: u64, cutoff: DateTime<Utc>) -> FilterConfig {
    FilterConfig {
        min_size,
        cutoff,
        labels: LabelSelection::default(),
    }
}

// Mock implementation of GmailClient for testing
mock! {
    pub GmailClient {}

    #[async_trait::async_trait]
    impl GmailClient for GmailClient {
        async fn list_labels(&self) -> Result<Vec<LabelInfo>>;
        async fn list_message_ids(&self, query: &str) -> Result<Vec<String>>;
        async fn get_message(&self, id: &str) -> Result<MessageDetail>;
        async fn get_attachment(&self, message_id: &str, attachment_id: &str) -> Result<Vec<u8>>;
    }
}
