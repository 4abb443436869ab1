//! Gmail API client for listing messages and fetching attachment bytes

use async_trait::async_trait;
use chrono::DateTime;
use google_gmail1::{
    api::{Message, MessagePart},
    hyper_rustls, hyper_util, Gmail,
};
use tracing::debug;

use crate::error::{GmailError, Result};
use crate::models::{AttachmentPart, MessageDetail, PartData};

const READONLY_SCOPE: &str = "https://www.googleapis.com/auth/gmail.readonly";

/// Label info returned from Gmail API
#[derive(Debug, Clone)]
pub struct LabelInfo {
    pub id: String,
    pub name: String,
}

/// Trait defining the Gmail operations this tool consumes, for easier testing
#[async_trait]
pub trait GmailClient: Send + Sync {
    /// List all labels in the account
    async fn list_labels(&self) -> Result<Vec<LabelInfo>>;

    /// List all message IDs matching a query
    async fn list_message_ids(&self, query: &str) -> Result<Vec<String>>;

    /// Get full message detail (internal date, label IDs, payload parts)
    async fn get_message(&self, id: &str) -> Result<MessageDetail>;

    /// Fetch the bytes of an attachment by message and attachment identifier
    async fn get_attachment(&self, message_id: &str, attachment_id: &str) -> Result<Vec<u8>>;
}

/// Gmail client backed by an authenticated API hub
///
/// All calls are sequential and unbuffered; a failure propagates to the
/// caller and aborts the run.
pub struct GmailApiClient {
    hub: Gmail<hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>>,
    account: String,
}

impl GmailApiClient {
    /// Create a client for the given account identifier
    ///
    /// # Arguments
    /// * `hub` - Gmail API hub instance
    /// * `account` - Account identifier passed to every call ("me" for the
    ///   authenticated user)
    pub fn new(
        hub: Gmail<
            hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>,
        >,
        account: impl Into<String>,
    ) -> Self {
        Self {
            hub,
            account: account.into(),
        }
    }
}

#[async_trait]
impl GmailClient for GmailApiClient {
    async fn list_labels(&self) -> Result<Vec<LabelInfo>> {
        let (_, response) = self
            .hub
            .users()
            .labels_list(&self.account)
            .add_scope(READONLY_SCOPE)
            .doit()
            .await?;

        let labels: Vec<LabelInfo> = response
            .labels
            .unwrap_or_default()
            .into_iter()
            .filter_map(|label| match (label.id, label.name) {
                (Some(id), Some(name)) => Some(LabelInfo { id, name }),
                _ => None,
            })
            .collect();

        debug!("Listed {} labels", labels.len());
        Ok(labels)
    }

    async fn list_message_ids(&self, query: &str) -> Result<Vec<String>> {
        let mut all_ids = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut call = self
                .hub
                .users()
                .messages_list(&self.account)
                .q(query)
                .max_results(100);

            if let Some(token) = page_token.as_ref() {
                call = call.page_token(token);
            }

            let (_, response) = call.add_scope(READONLY_SCOPE).doit().await?;

            if let Some(messages) = response.messages {
                for msg_ref in messages {
                    if let Some(id) = msg_ref.id {
                        all_ids.push(id);
                    }
                }
            }

            page_token = response.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        debug!("Listed {} message ids for query {:?}", all_ids.len(), query);
        Ok(all_ids)
    }

    async fn get_message(&self, id: &str) -> Result<MessageDetail> {
        let (_, msg) = self
            .hub
            .users()
            .messages_get(&self.account, id)
            .format("full")
            .add_scope(READONLY_SCOPE)
            .doit()
            .await?;

        parse_message_detail(msg)
    }

    async fn get_attachment(&self, message_id: &str, attachment_id: &str) -> Result<Vec<u8>> {
        let (_, body) = self
            .hub
            .users()
            .messages_attachments_get(&self.account, message_id, attachment_id)
            .add_scope(READONLY_SCOPE)
            .doit()
            .await?;

        body.data.ok_or_else(|| {
            GmailError::InvalidMessageFormat(format!(
                "Attachment {} of message {} carried no data",
                attachment_id, message_id
            ))
        })
    }
}

/// Parse a Gmail API Message into our MessageDetail structure
fn parse_message_detail(msg: Message) -> Result<MessageDetail> {
    let id = msg
        .id
        .ok_or_else(|| GmailError::InvalidMessageFormat("Missing message ID".to_string()))?;

    let millis = msg.internal_date.ok_or_else(|| {
        GmailError::InvalidMessageFormat(format!("Message {} has no internal date", id))
    })?;
    let internal_date = DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        GmailError::InvalidMessageFormat(format!(
            "Message {} has invalid internal date {}",
            id, millis
        ))
    })?;

    let label_ids = msg.label_ids.unwrap_or_default();

    // The payload is a multipart tree; flatten it depth-first. The root node
    // is the message body itself, only its children can be attachments.
    let mut parts = Vec::new();
    if let Some(payload) = msg.payload {
        for child in payload.parts.unwrap_or_default() {
            collect_parts(child, &mut parts);
        }
    }

    Ok(MessageDetail {
        id,
        internal_date,
        label_ids,
        parts,
    })
}

fn collect_parts(part: MessagePart, out: &mut Vec<AttachmentPart>) {
    let filename = part.filename.unwrap_or_default();
    let mut size = 0u64;
    let mut data = PartData::Missing;

    if let Some(body) = part.body {
        size = body.size.map(|s| s.max(0) as u64).unwrap_or(0);
        if let Some(bytes) = body.data {
            data = PartData::Inline(bytes);
        } else if let Some(att_id) = body.attachment_id {
            data = PartData::AttachmentId(att_id);
        }
    }

    out.push(AttachmentPart {
        filename,
        size,
        data,
    });

    for child in part.parts.unwrap_or_default() {
        collect_parts(child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use google_gmail1::api::MessagePartBody;

    fn leaf_part(filename: &str, size: i32, data: Option<&[u8]>, att_id: Option<&str>) -> MessagePart {
        MessagePart {
            filename: Some(filename.to_string()),
            body: Some(MessagePartBody {
                size: Some(size),
                data: data.map(|d| d.to_vec()),
                attachment_id: att_id.map(|s| s.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn message_with_parts(parts: Vec<MessagePart>) -> Message {
        Message {
            id: Some("msg1".to_string()),
            internal_date: Some(1_704_124_800_000),
            label_ids: Some(vec!["INBOX".to_string(), "Label_7".to_string()]),
            payload: Some(MessagePart {
                parts: Some(parts),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_message_detail() {
        let msg = message_with_parts(vec![
            leaf_part("", 0, None, None),
            leaf_part("invoice.pdf", 60000, Some(b"pdf bytes"), None),
        ]);

        let detail = parse_message_detail(msg).unwrap();
        assert_eq!(detail.id, "msg1");
        assert_eq!(detail.internal_date.timestamp_millis(), 1_704_124_800_000);
        assert_eq!(detail.label_ids, vec!["INBOX", "Label_7"]);
        assert_eq!(detail.parts.len(), 2);
        assert_eq!(detail.parts[0].filename, "");
        assert_eq!(detail.parts[1].filename, "invoice.pdf");
        assert_eq!(detail.parts[1].size, 60000);
        assert_eq!(detail.parts[1].data, PartData::Inline(b"pdf bytes".to_vec()));
    }

    #[test]
    fn test_parse_nested_part_tree_is_flattened() {
        let nested = MessagePart {
            filename: Some(String::new()),
            parts: Some(vec![
                leaf_part("photo.jpg", 80_000, None, Some("att-42")),
                leaf_part("notes.txt", 120, Some(b"hi"), None),
            ]),
            ..Default::default()
        };
        let msg = message_with_parts(vec![nested]);

        let detail = parse_message_detail(msg).unwrap();
        // container node plus its two children
        assert_eq!(detail.parts.len(), 3);
        assert_eq!(detail.parts[1].filename, "photo.jpg");
        assert_eq!(
            detail.parts[1].data,
            PartData::AttachmentId("att-42".to_string())
        );
        assert_eq!(detail.parts[2].filename, "notes.txt");
    }

    #[test]
    fn test_parse_message_without_parts() {
        let msg = Message {
            id: Some("msg2".to_string()),
            internal_date: Some(1_600_000_000_000),
            payload: Some(MessagePart::default()),
            ..Default::default()
        };

        let detail = parse_message_detail(msg).unwrap();
        assert!(detail.parts.is_empty());
        assert!(detail.label_ids.is_empty());
    }

    #[test]
    fn test_parse_part_with_no_body_location() {
        let msg = message_with_parts(vec![leaf_part("ghost.bin", 512, None, None)]);
        let detail = parse_message_detail(msg).unwrap();
        assert_eq!(detail.parts[0].data, PartData::Missing);
    }

    #[test]
    fn test_parse_rejects_missing_id_and_date() {
        let no_id = Message {
            internal_date: Some(1_600_000_000_000),
            ..Default::default()
        };
        assert!(matches!(
            parse_message_detail(no_id),
            Err(GmailError::InvalidMessageFormat(_))
        ));

        let no_date = Message {
            id: Some("msg3".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            parse_message_detail(no_date),
            Err(GmailError::InvalidMessageFormat(_))
        ));
    }
}
