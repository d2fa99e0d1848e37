//! HTTP wire types shared by the request builder and transports.
//!
//! # Design
//! Requests and responses are plain data. The builder produces an
//! `HttpRequest`, a transport turns it into an `HttpResponse`, and neither
//! type knows anything about the network. All fields use owned types
//! (`String`, `Vec`) so values can be moved freely between the builder,
//! transports, and test harnesses.

use std::borrow::Cow;

/// An HTTP request described as plain data.
///
/// Produced by `RequestBuilder::build` with the managed `Content-Length` and
/// `Authorization` headers already merged in. Hand it to an `HttpTransport`,
/// or execute it with your own I/O loop.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: String,
    pub uri: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

/// A fully buffered HTTP response.
///
/// `headers` is a collapsed mapping: when the server repeats a header name,
/// only the last occurrence survives. HTTP error statuses are carried here
/// as data — a 404 is a successful round trip.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Look up a header value by name, ASCII case-insensitively.
    ///
    /// The last matching entry wins, mirroring the collapse rule transports
    /// apply when the server repeats a name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The body as text, with invalid UTF-8 replaced.
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
