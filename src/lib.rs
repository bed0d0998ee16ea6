//! `mailcat` — send a single email from the command line.
//!
//! This crate provides the core library for composing a multipart/mixed
//! MIME message (HTML body plus base64-encoded attachments) and submitting
//! it to an SMTP relay with a bounded retry loop.

pub mod codec;
pub mod compose;
pub mod config;
pub mod deliver;
pub mod error;
pub mod model;
pub mod provider;
