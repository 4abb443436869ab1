use chrono::{DateTime, Utc};

/// Parsed view of one message as returned by `users.messages.get`.
///
/// Transient per-iteration value; never cached or mutated. The label
/// identifiers keep the order the account returned them in, which is what
/// include-label subfolder selection ties on.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageDetail {
    pub id: String,
    /// Provider-assigned internal timestamp (immutable, millisecond precision).
    pub internal_date: DateTime<Utc>,
    pub label_ids: Vec<String>,
    /// Flattened payload tree. Container parts are kept with their empty
    /// filenames so the filter owns the "not an attachment" decision.
    pub parts: Vec<AttachmentPart>,
}

/// One node of a message's payload tree.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentPart {
    /// Empty when the part is not a file attachment.
    pub filename: String,
    /// Declared byte size of the part body.
    pub size: u64,
    pub data: PartData,
}

/// Where the payload bytes of a part live.
#[derive(Debug, Clone, PartialEq)]
pub enum PartData {
    /// Bytes embedded in the message response.
    Inline(Vec<u8>),
    /// Opaque identifier for a follow-up `attachments.get` call.
    AttachmentId(String),
    /// Neither inline data nor an attachment identifier was present.
    Missing,
}

impl AttachmentPart {
    /// True when the part names a file, i.e. could produce an output.
    pub fn is_attachment(&self) -> bool {
        !self.filename.is_empty()
    }
}
