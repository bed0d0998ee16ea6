//! Serialize an [`Envelope`] into a multipart/mixed MIME message.
//!
//! Framing (every line CRLF-terminated):
//! header block, blank line, one `text/html` body part, one
//! `application/octet-stream` part per attachment in input order, closing
//! `--<boundary>--` delimiter.

use std::fmt::Write as _;
use std::time::{SystemTime, UNIX_EPOCH};

use sha2::{Digest, Sha256};

use crate::model::envelope::Envelope;

/// Serialize `envelope` with a freshly generated boundary token.
pub fn compose(envelope: &Envelope) -> Vec<u8> {
    compose_with_boundary(envelope, &generate_boundary())
}

/// Serialize `envelope` using the given boundary token.
///
/// Deterministic: same envelope and token, same bytes. The body and
/// attachment content are spliced in verbatim; nothing scans them for a
/// line equal to `--<boundary>`, so a colliding body would corrupt the
/// framing. The per-message token from [`generate_boundary`] makes that
/// window negligible for non-adversarial input.
pub fn compose_with_boundary(envelope: &Envelope, boundary: &str) -> Vec<u8> {
    let mut msg = String::new();

    // Header block.
    let _ = write!(
        msg,
        "From: {}\r\n\
         To: {}\r\n\
         Subject: {}\r\n\
         MIME-Version: 1.0\r\n\
         Content-Type: multipart/mixed; boundary=\"{}\"\r\n\
         \r\n",
        envelope.from, envelope.to, envelope.subject, boundary
    );

    // HTML body part.
    let _ = write!(
        msg,
        "--{}\r\n\
         Content-Type: text/html; charset=utf-8\r\n\
         Content-Transfer-Encoding: 8bit\r\n\
         \r\n\
         {}\r\n",
        boundary, envelope.html_body
    );

    // One part per attachment, input order preserved.
    for att in &envelope.attachments {
        let _ = write!(
            msg,
            "--{}\r\n\
             Content-Type: application/octet-stream; name=\"{}\"\r\n\
             Content-Transfer-Encoding: base64\r\n\
             Content-Disposition: attachment; filename=\"{}\"\r\n\
             \r\n\
             {}\r\n",
            boundary, att.filename, att.filename, att.content
        );
    }

    let _ = write!(msg, "--{boundary}--\r\n");

    msg.into_bytes()
}

/// Generate a per-message boundary token.
///
/// Hex digest of process id + nanosecond clock, so two messages from the
/// same process get distinct tokens. The `=_` prefix cannot occur in
/// base64 output, which rules out collisions with attachment content.
pub fn generate_boundary() -> String {
    let mut hasher = Sha256::new();
    hasher.update(std::process::id().to_le_bytes());
    if let Ok(now) = SystemTime::now().duration_since(UNIX_EPOCH) {
        hasher.update(now.as_nanos().to_le_bytes());
    }
    let digest = hasher.finalize();

    let mut token = String::with_capacity(2 + 32);
    token.push_str("=_");
    for byte in &digest[..16] {
        let _ = write!(token, "{byte:02x}");
    }
    token
}
