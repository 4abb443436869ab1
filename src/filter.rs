//! Per-part selection: decides which attachment parts qualify for download

use chrono::{DateTime, Utc};

use crate::labels::LabelSelection;
use crate::models::{AttachmentPart, MessageDetail};

/// Immutable selection thresholds, constructed once at startup and passed by
/// reference into every evaluation.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Inclusive lower bound on the part's declared byte size.
    pub min_size: u64,
    /// Messages qualify only when their internal timestamp is strictly
    /// earlier than this instant.
    pub cutoff: DateTime<Utc>,
    pub labels: LabelSelection,
}

/// Outcome of evaluating one part of one message.
#[derive(Debug, Clone, PartialEq)]
pub enum PartDecision {
    /// Download this part; `subfolder` carries the display name of the first
    /// matching include label, if include labels were configured.
    Accept { subfolder: Option<String> },
    Reject(RejectReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The part has no filename, so it is not a file attachment.
    NotAnAttachment,
    /// Declared size is below the configured minimum.
    TooSmall,
    /// The message's internal timestamp is not strictly before the cutoff.
    TooRecent,
    /// The message carries an excluded label.
    Excluded,
    /// Include labels were configured and the message carries none of them.
    NoIncludeLabel,
}

/// Decide whether `part` of `message` qualifies for download.
///
/// Checks run in order and the first failing one wins. Exclusion takes
/// precedence over inclusion: a message carrying labels from both sets is
/// rejected.
pub fn evaluate_part(
    message: &MessageDetail,
    part: &AttachmentPart,
    config: &FilterConfig,
) -> PartDecision {
    if !part.is_attachment() {
        return PartDecision::Reject(RejectReason::NotAnAttachment);
    }

    if part.size < config.min_size {
        return PartDecision::Reject(RejectReason::TooSmall);
    }

    if message.internal_date >= config.cutoff {
        return PartDecision::Reject(RejectReason::TooRecent);
    }

    if message
        .label_ids
        .iter()
        .any(|id| config.labels.exclude.contains(id))
    {
        return PartDecision::Reject(RejectReason::Excluded);
    }

    if config.labels.include.is_empty() {
        return PartDecision::Accept { subfolder: None };
    }

    // First include match in the order the account returned the labels wins.
    match message
        .label_ids
        .iter()
        .find_map(|id| config.labels.include.get(id))
    {
        Some(name) => PartDecision::Accept {
            subfolder: Some(name.clone()),
        },
        None => PartDecision::Reject(RejectReason::NoIncludeLabel),
    }
}
