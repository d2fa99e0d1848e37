//! Blocking HTTP transport seam.
//!
//! # Design
//! `HttpTransport` is the single primitive the request builder needs: send a
//! fully assembled request, get back a buffered response or a transport
//! error. The shipped `UreqTransport` wraps a `ureq::Agent` configured so
//! HTTP error statuses come back as data rather than `Err`, leaving status
//! interpretation to the caller. Tests substitute their own implementations.

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// A blocking "send request, get response or transport error" primitive.
pub trait HttpTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `HttpTransport` backed by a `ureq::Agent`.
///
/// One agent holds one connection pool; clone-free reuse across requests is
/// fine, but independent threads should construct independent transports.
#[derive(Debug)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = ureq::http::Request::builder()
            .method(request.method.as_str())
            .uri(request.uri.as_str());

        for (name, value) in &request.headers {
            // The agent derives framing from the body it is handed; the
            // recomputed value equals the one the builder merged in.
            if name.eq_ignore_ascii_case("content-length") {
                continue;
            }
            builder = builder.header(name.as_str(), value.as_str());
        }

        let wire_request = builder
            .body(request.body.as_deref().unwrap_or_default())
            .map_err(|err| TransportError::new(TransportError::INVALID_REQUEST, err.to_string()))?;

        let mut response = self.agent.run(wire_request).map_err(map_error)?;

        let status = response.status().as_u16();
        let headers = collapse_headers(&response);
        let body = response.body_mut().read_to_vec().map_err(map_error)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Collapse the response header map into an ordered mapping where the last
/// occurrence of a repeated name wins; values are trimmed.
fn collapse_headers(response: &ureq::http::Response<ureq::Body>) -> Vec<(String, String)> {
    let mut headers: Vec<(String, String)> = Vec::new();
    for (name, value) in response.headers() {
        let value = String::from_utf8_lossy(value.as_bytes()).trim().to_string();
        match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name.as_str())) {
            Some(entry) => entry.1 = value,
            None => headers.push((name.as_str().to_string(), value)),
        }
    }
    headers
}

fn map_error(err: ureq::Error) -> TransportError {
    let code = match &err {
        ureq::Error::BadUri(_) => TransportError::INVALID_REQUEST,
        ureq::Error::HostNotFound => TransportError::HOST_NOT_FOUND,
        ureq::Error::ConnectionFailed => TransportError::CONNECT_FAILED,
        ureq::Error::Io(_) => TransportError::IO,
        _ => TransportError::FAILED,
    };
    TransportError::new(code, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_uri_maps_to_invalid_request() {
        let transport = UreqTransport::new();
        let request = HttpRequest {
            method: "GET".to_string(),
            uri: "not a uri".to_string(),
            headers: Vec::new(),
            body: None,
        };
        let err = transport.send(&request).unwrap_err();
        assert_eq!(err.code, TransportError::INVALID_REQUEST);
        assert!(!err.message.is_empty());
    }

    #[test]
    fn invalid_method_token_maps_to_invalid_request() {
        let transport = UreqTransport::new();
        let request = HttpRequest {
            method: "NOT A METHOD".to_string(),
            uri: "http://127.0.0.1:1/".to_string(),
            headers: Vec::new(),
            body: None,
        };
        let err = transport.send(&request).unwrap_err();
        assert_eq!(err.code, TransportError::INVALID_REQUEST);
    }
}
