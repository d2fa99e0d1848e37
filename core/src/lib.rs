//! Web utility helpers: a fluent HTTP request builder and an XML
//! query/mutation helper.
//!
//! # Overview
//! Two independent components with no data flow between them:
//!
//! - [`RequestBuilder`] accumulates URI, method, headers, body, and
//!   basic-auth credentials through chained setters, then executes a single
//!   blocking round trip against an [`HttpTransport`].
//! - [`XmlDocument`] owns a DOM tree; [`XmlNode`] views expose typed
//!   accessors over XPath-selected children and attributes plus simple
//!   mutation and indented serialization.
//!
//! # Design
//! - Requests and responses are plain data ([`HttpRequest`],
//!   [`HttpResponse`]); the transport seam keeps the builder testable
//!   without a network.
//! - Transport failures come back in-band as [`TransportError`] values,
//!   never as panics; HTTP error statuses are ordinary responses.
//! - "Not found" never fails: absent elements and attributes are `None`,
//!   empty query results are empty `Vec`s, and numeric conversions fall
//!   back to `0`/`0.0` instead of erroring.

pub mod error;
pub mod http;
pub mod request;
pub mod transport;
pub mod xml;

mod render;
mod value;

pub use error::{TransportError, XmlError};
pub use http::{HttpRequest, HttpResponse};
pub use request::RequestBuilder;
pub use transport::{HttpTransport, UreqTransport};
pub use xml::{XmlDocument, XmlNode};
