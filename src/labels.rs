//! Resolution of human-readable label names to provider label identifiers

use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::client::LabelInfo;

/// Resolved label sets used by the message filter.
///
/// Built once per run from a snapshot of the account's labels; immutable
/// afterwards. Lookups are best-effort: requested names with no match end up
/// in `unresolved` rather than producing an error, since the account's label
/// list is mutable external state.
#[derive(Debug, Clone, Default)]
pub struct LabelSelection {
    /// Resolved include labels: identifier -> display name (the account's
    /// spelling, used for the destination subfolder).
    pub include: HashMap<String, String>,
    /// Resolved exclude label identifiers.
    pub exclude: HashSet<String>,
    /// Requested names (include or exclude) that matched no account label.
    pub unresolved: Vec<String>,
}

impl LabelSelection {
    /// True when neither an include nor an exclude set was requested, in
    /// which case the orchestrator never needs to list labels at all.
    pub fn is_wanted(include_names: &[String], exclude_names: &[String]) -> bool {
        !include_names.is_empty() || !exclude_names.is_empty()
    }
}

/// Resolve requested include/exclude label names against the account's labels.
///
/// Matching is case-insensitive; the display name recorded for an include
/// match is the account's own spelling, not the requested one.
pub fn resolve_labels(
    labels: &[LabelInfo],
    include_names: &[String],
    exclude_names: &[String],
) -> LabelSelection {
    let by_name: HashMap<String, &LabelInfo> = labels
        .iter()
        .map(|l| (l.name.to_lowercase(), l))
        .collect();

    let mut selection = LabelSelection::default();

    for name in include_names {
        match by_name.get(&name.to_lowercase()) {
            Some(label) => {
                selection
                    .include
                    .insert(label.id.clone(), label.name.clone());
            }
            None => selection.unresolved.push(name.clone()),
        }
    }

    for name in exclude_names {
        match by_name.get(&name.to_lowercase()) {
            Some(label) => {
                selection.exclude.insert(label.id.clone());
            }
            None => selection.unresolved.push(name.clone()),
        }
    }

    debug!(
        "Resolved {} include and {} exclude labels ({} unresolved)",
        selection.include.len(),
        selection.exclude.len(),
        selection.unresolved.len()
    );
    selection
}
