//! Error types for the request builder and the XML helper.
//!
//! # Design
//! Transport failures are data, not exceptions: `execute` surfaces them as
//! the `Err` arm of its `Result`, carrying a stable numeric code plus the
//! underlying message. "Value not found" conditions (missing element,
//! missing attribute, empty query result) are never errors — accessors
//! return `None` or an empty `Vec` for those.

use std::fmt;

/// A network-level failure while executing a request.
///
/// Carries a stable numeric `code` for programmatic matching and the
/// transport's own `message` for debugging. HTTP error statuses (4xx/5xx)
/// are *not* transport errors; they come back as ordinary responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub code: i32,
    pub message: String,
}

impl TransportError {
    /// No URI was configured on the builder.
    pub const MISSING_URI: i32 = 1;

    /// The method, URI, or a header failed validation before sending.
    pub const INVALID_REQUEST: i32 = 2;

    /// DNS resolution failed.
    pub const HOST_NOT_FOUND: i32 = 3;

    /// The TCP or TLS connection could not be established.
    pub const CONNECT_FAILED: i32 = 4;

    /// A socket-level read or write failed mid-exchange.
    pub const IO: i32 = 5;

    /// Any other transport-level failure (timeouts, protocol violations).
    pub const FAILED: i32 = 6;

    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transport error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for TransportError {}

/// Errors returned by the XML helper.
#[derive(Debug)]
pub enum XmlError {
    /// The input text is not a well-formed XML document.
    Parse(String),

    /// An XPath expression failed to compile or evaluate.
    XPath(String),
}

impl fmt::Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmlError::Parse(msg) => write!(f, "XML parse failed: {msg}"),
            XmlError::XPath(msg) => write!(f, "XPath failed: {msg}"),
        }
    }
}

impl std::error::Error for XmlError {}
