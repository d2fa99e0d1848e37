//! Fluent HTTP request builder.
//!
//! # Design
//! `RequestBuilder` accumulates URI, method, headers, body, and basic-auth
//! credentials through chained `with_*` setters, then hands a fully merged
//! `HttpRequest` to an `HttpTransport` for a single blocking round trip.
//! Two headers are managed, never caller-owned: `Content-Length` is computed
//! from the body and `Authorization` from the credentials, overwriting any
//! caller-supplied value for those names at build time.

use base64ct::{Base64, Encoding};

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::HttpTransport;

/// Builds and executes a single HTTP request.
///
/// No retries, no redirect-following, no timeout configuration — one
/// request, one response. Callers needing concurrency run independent
/// builders on independent threads.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    uri: Option<String>,
    method: String,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    auth_username: Option<String>,
    auth_password: Option<String>,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    /// A builder with no URI, method `GET`, and no headers or body.
    pub fn new() -> Self {
        Self {
            uri: None,
            method: "GET".to_string(),
            headers: Vec::new(),
            body: None,
            auth_username: None,
            auth_password: None,
        }
    }

    pub fn with_uri(mut self, value: impl Into<String>) -> Self {
        self.uri = Some(value.into());
        self
    }

    pub fn with_auth_username(mut self, value: impl Into<String>) -> Self {
        self.auth_username = Some(value.into());
        self
    }

    pub fn with_auth_password(mut self, value: impl Into<String>) -> Self {
        self.auth_password = Some(value.into());
        self
    }

    /// Any token the transport accepts is allowed, including custom verbs.
    pub fn with_method(mut self, value: impl Into<String>) -> Self {
        self.method = value.into();
        self
    }

    /// Set a header, overwriting an existing entry with the same name
    /// (ASCII case-insensitive) in place.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        set_header(&mut self.headers, key.into(), value.into());
        self
    }

    pub fn with_body(mut self, value: impl Into<Vec<u8>>) -> Self {
        self.body = Some(value.into());
        self
    }

    /// The fully merged request as plain data.
    ///
    /// Fails with `TransportError::MISSING_URI` when no URI was configured.
    /// Hosts that own their I/O loop can execute the returned value
    /// themselves instead of calling [`execute`](Self::execute).
    pub fn build(&self) -> Result<HttpRequest, TransportError> {
        let uri = self.uri.clone().ok_or_else(|| {
            TransportError::new(TransportError::MISSING_URI, "no request URI configured")
        })?;

        Ok(HttpRequest {
            method: self.method.clone(),
            uri,
            headers: self.effective_headers(),
            body: self.body.clone(),
        })
    }

    /// The raw request representation: effective header lines, a blank line,
    /// then the body (lossy UTF-8). For introspection and debug logging
    /// only — transports consume [`build`](Self::build), not this text.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.effective_headers() {
            out.push_str(&key);
            out.push_str(": ");
            out.push_str(&value);
            out.push_str("\r\n");
        }
        out.push_str("\r\n");
        if let Some(body) = &self.body {
            out.push_str(&String::from_utf8_lossy(body));
        }
        out
    }

    /// Execute the request as a single blocking round trip.
    ///
    /// Transport failures (DNS, connect, timeout, I/O) come back as the
    /// `Err` arm with a stable numeric code; HTTP error statuses are `Ok`
    /// responses like any other.
    pub fn execute<T: HttpTransport>(&self, transport: &T) -> Result<HttpResponse, TransportError> {
        let request = self.build()?;
        log::debug!("executing {} {}", request.method, request.uri);

        match transport.send(&request) {
            Ok(response) => {
                log::debug!("{} {} -> {}", request.method, request.uri, response.status);
                Ok(response)
            }
            Err(err) => {
                log::warn!("{} {} failed: {err}", request.method, request.uri);
                Err(err)
            }
        }
    }

    /// Explicit headers overlaid with the managed `Content-Length` and
    /// `Authorization` entries.
    fn effective_headers(&self) -> Vec<(String, String)> {
        let mut headers = self.headers.clone();

        let body_len = self.body.as_ref().map_or(0, Vec::len);
        set_header(&mut headers, "Content-Length".to_string(), body_len.to_string());

        if let Some(auth) = self.auth_header() {
            set_header(&mut headers, "Authorization".to_string(), auth);
        }

        headers
    }

    /// `Basic base64(username ":" password)`; password is treated as empty
    /// when absent, and no header is produced without a username.
    fn auth_header(&self) -> Option<String> {
        let username = self.auth_username.as_deref()?;
        let password = self.auth_password.as_deref().unwrap_or("");
        let credentials = format!("{username}:{password}");
        Some(format!("Basic {}", Base64::encode_string(credentials.as_bytes())))
    }
}

/// Overwrite a header entry in place when the name matches (ASCII
/// case-insensitive), otherwise append, preserving insertion order.
fn set_header(headers: &mut Vec<(String, String)>, key: String, value: String) {
    match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&key)) {
        Some(entry) => entry.1 = value,
        None => headers.push((key, value)),
    }
}
