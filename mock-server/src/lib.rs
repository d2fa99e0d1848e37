use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::Path,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// What `/echo` observed about the incoming request.
///
/// Header names are lowercased by the HTTP stack; repeated names keep the
/// last value only, which is all the client-side tests need.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EchoReply {
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

/// Fixture document served by `/catalog.xml`.
pub const CATALOG_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<catalog version="2">
  <released>2024-03-01</released>
  <item id="1">
    <name>bolt</name>
    <qty>10</qty>
    <price>0.25</price>
  </item>
  <item id="2">
    <name>nut</name>
    <qty>20</qty>
    <price>0.10</price>
  </item>
</catalog>
"#;

pub fn app() -> Router {
    Router::new()
        .route("/echo", any(echo))
        .route("/status/{code}", any(status))
        .route("/auth", get(auth))
        .route("/catalog.xml", get(catalog))
        .route("/duplicate-headers", get(duplicate_headers))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(method: Method, headers: HeaderMap, body: Bytes) -> Json<EchoReply> {
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).to_string(),
            )
        })
        .collect();
    Json(EchoReply {
        method: method.to_string(),
        headers,
        body: String::from_utf8_lossy(&body).to_string(),
    })
}

async fn status(Path(code): Path<u16>) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Reflects the received `Authorization` header, or 401 without one.
async fn auth(headers: HeaderMap) -> (StatusCode, String) {
    match headers.get(header::AUTHORIZATION) {
        Some(value) => (
            StatusCode::OK,
            String::from_utf8_lossy(value.as_bytes()).to_string(),
        ),
        None => (StatusCode::UNAUTHORIZED, "missing credentials".to_string()),
    }
}

async fn catalog() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/xml")], CATALOG_XML)
}

/// Repeats `x-fruit` so clients can exercise their header-collapse rule.
async fn duplicate_headers() -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    headers.append("x-fruit", HeaderValue::from_static("apple"));
    headers.append("x-fruit", HeaderValue::from_static("banana"));
    (headers, "fruit")
}
