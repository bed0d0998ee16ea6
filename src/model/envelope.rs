//! The message envelope: everything the composer needs for one send.

use crate::model::attachment::Attachment;

/// Input to the composer. Constructed once per invocation, consumed once.
///
/// `from` and `to` are treated as opaque text at this layer; the transport
/// parses them when building its own envelope. `to` may be a single address
/// or a comma-joined list.
#[derive(Debug, Clone)]
pub struct Envelope {
    /// Sender address, used verbatim in the `From:` header.
    pub from: String,
    /// Recipient address(es), used verbatim in the `To:` header.
    pub to: String,
    /// Subject line. May be empty; the header is still emitted.
    pub subject: String,
    /// Raw HTML body text.
    pub html_body: String,
    /// Attachments in the order they should appear in the message.
    pub attachments: Vec<Attachment>,
}
