//! Destination path construction for downloaded attachments

use std::path::{Path, PathBuf};

use crate::error::Result;

/// How to name the output file when two attachments share a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamingPolicy {
    /// Use the remote filename verbatim; a later attachment with the same
    /// name overwrites the earlier one.
    #[default]
    Overwrite,
    /// Suffix the file stem with the message identifier so same-named
    /// attachments from different messages land side by side.
    SuffixMessageId,
}

/// Compute the output path for an attachment.
///
/// Yields `<base>/<subfolder>/<filename>` when a subfolder was selected,
/// `<base>/<filename>` otherwise. The filename is used as supplied by the
/// remote part; no sanitization or collision avoidance beyond the naming
/// policy is applied.
pub fn attachment_path(
    base: &Path,
    subfolder: Option<&str>,
    filename: &str,
    message_id: &str,
    policy: NamingPolicy,
) -> PathBuf {
    let dir = match subfolder {
        Some(sub) => base.join(sub),
        None => base.to_path_buf(),
    };

    let name = match policy {
        NamingPolicy::Overwrite => filename.to_string(),
        NamingPolicy::SuffixMessageId => suffix_with_message_id(filename, message_id),
    };

    dir.join(name)
}

fn suffix_with_message_id(filename: &str, message_id: &str) -> String {
    let path = Path::new(filename);
    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(ext)) => format!(
            "{}-{}.{}",
            stem.to_string_lossy(),
            message_id,
            ext.to_string_lossy()
        ),
        _ => format!("{}-{}", filename, message_id),
    }
}

/// Create the directory containing `path` if it does not exist yet.
/// Creating an already-existing directory is not an error.
pub async fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_without_subfolder() {
        let path = attachment_path(
            Path::new("/tmp/out"),
            None,
            "invoice.pdf",
            "m1",
            NamingPolicy::Overwrite,
        );
        assert_eq!(path, PathBuf::from("/tmp/out/invoice.pdf"));
    }

    #[test]
    fn test_path_with_subfolder() {
        let path = attachment_path(
            Path::new("/tmp/out"),
            Some("Receipts"),
            "invoice.pdf",
            "m1",
            NamingPolicy::Overwrite,
        );
        assert_eq!(path, PathBuf::from("/tmp/out/Receipts/invoice.pdf"));
    }

    #[test]
    fn test_suffix_policy_inserts_message_id_before_extension() {
        let path = attachment_path(
            Path::new("/tmp/out"),
            None,
            "invoice.pdf",
            "18c2ab",
            NamingPolicy::SuffixMessageId,
        );
        assert_eq!(path, PathBuf::from("/tmp/out/invoice-18c2ab.pdf"));
    }

    #[test]
    fn test_suffix_policy_without_extension() {
        let path = attachment_path(
            Path::new("/tmp/out"),
            Some("Docs"),
            "README",
            "18c2ab",
            NamingPolicy::SuffixMessageId,
        );
        assert_eq!(path, PathBuf::from("/tmp/out/Docs/README-18c2ab"));
    }

    #[tokio::test]
    async fn test_ensure_parent_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("sub/inner/file.bin");

        ensure_parent_dir(&file).await.unwrap();
        assert!(file.parent().unwrap().is_dir());

        // creating again must not fail
        ensure_parent_dir(&file).await.unwrap();
    }
}
