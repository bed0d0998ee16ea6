//! Attachments: a display name paired with base64-encoded content.
//!
//! The whole file is materialized in memory at load time. Fine for small
//! CLI notification attachments; large files would need a streaming source.

use std::path::Path;

use crate::codec;
use crate::error::{MailcatError, Result};

/// A single attachment, ready for composition.
///
/// Immutable once constructed. `content` is already base64 text, so the
/// composer can splice it into the message verbatim.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Display filename: the final path component only, no directories.
    pub filename: String,

    /// Base64 encoding of the file's raw bytes.
    pub content: String,
}

impl Attachment {
    /// Load an attachment from a file path.
    ///
    /// Reads the entire file as raw bytes (no newline translation) and
    /// encodes it. The display name is the basename of `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(MailcatError::AttachmentNotFound(path.to_path_buf()));
        }

        let bytes = std::fs::read(path).map_err(|e| MailcatError::io(path, e))?;

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());

        Ok(Self::from_bytes(filename, &bytes))
    }

    /// Build an attachment from in-memory bytes.
    pub fn from_bytes(filename: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            filename: filename.into(),
            content: codec::encode(bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_encodes_and_takes_basename() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("report.txt");
        let mut f = std::fs::File::create(&path).expect("create");
        f.write_all(b"ok").expect("write");

        let att = Attachment::load(&path).expect("load");
        assert_eq!(att.filename, "report.txt");
        assert_eq!(att.content, codec::encode(b"ok"));
    }

    #[test]
    fn test_load_binary_is_byte_exact() {
        // CRLF and NUL bytes must survive untouched (binary read, no
        // newline translation).
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("blob.bin");
        let raw: Vec<u8> = vec![0x0D, 0x0A, 0x00, 0xFF, 0x0A];
        std::fs::write(&path, &raw).expect("write");

        let att = Attachment::load(&path).expect("load");
        assert_eq!(codec::decode(&att.content).expect("decode"), raw);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Attachment::load("/no/such/file.txt").unwrap_err();
        assert!(matches!(err, MailcatError::AttachmentNotFound(_)));
        assert!(err.to_string().contains("/no/such/file.txt"));
    }

    #[test]
    fn test_from_bytes_empty() {
        let att = Attachment::from_bytes("empty.dat", b"");
        assert_eq!(att.content, "");
    }
}
