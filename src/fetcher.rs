//! Attachment byte retrieval and file writing

use std::path::Path;

use crate::client::GmailClient;
use crate::error::{GmailError, Result};
use crate::models::{AttachmentPart, PartData};
use crate::paths;

/// Retrieve the raw bytes of a part.
///
/// Inline payloads are returned as-is (the API layer already decoded the
/// URL-safe base64 wire encoding); otherwise a follow-up `attachments.get`
/// is issued against the owning message. A part carrying neither is an
/// `InvalidMessageFormat` error for that part only.
pub async fn fetch_part_bytes(
    client: &dyn GmailClient,
    message_id: &str,
    part: &AttachmentPart,
) -> Result<Vec<u8>> {
    match &part.data {
        PartData::Inline(bytes) => Ok(bytes.clone()),
        PartData::AttachmentId(att_id) => client.get_attachment(message_id, att_id).await,
        PartData::Missing => Err(GmailError::InvalidMessageFormat(format!(
            "Part {:?} of message {} has neither inline data nor an attachment id",
            part.filename, message_id
        ))),
    }
}

/// Write attachment bytes to `path`, fully replacing any existing file.
pub async fn write_attachment(path: &Path, bytes: &[u8]) -> Result<()> {
    paths::ensure_parent_dir(path).await?;
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_attachment_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Receipts/invoice.pdf");

        write_attachment(&path, b"first payload").await.unwrap();
        write_attachment(&path, b"second").await.unwrap();

        let contents = tokio::fs::read(&path).await.unwrap();
        assert_eq!(contents, b"second");
    }
}
