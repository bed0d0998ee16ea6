//! Data model: the message envelope and its attachments.

pub mod attachment;
pub mod envelope;
