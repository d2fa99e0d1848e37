use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, EchoReply, CATALOG_XML};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

// --- echo ---

#[tokio::test]
async fn echo_reflects_method_headers_and_body() {
    let app = app();
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/echo")
                .header("x-probe", "42")
                .body("x=1".to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let reply: EchoReply = body_json(resp).await;
    assert_eq!(reply.method, "POST");
    assert_eq!(reply.headers.get("x-probe").map(String::as_str), Some("42"));
    assert_eq!(reply.body, "x=1");
}

#[tokio::test]
async fn echo_lowercases_header_names() {
    let app = app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/echo")
                .header("X-Mixed-Case", "kept")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    let reply: EchoReply = body_json(resp).await;
    assert!(reply.headers.contains_key("x-mixed-case"));
    assert!(!reply.headers.contains_key("X-Mixed-Case"));
}

// --- status ---

#[tokio::test]
async fn status_returns_the_requested_code() {
    let app = app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/status/418")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
}

#[tokio::test]
async fn status_out_of_range_becomes_500() {
    let app = app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/status/9999")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// --- auth ---

#[tokio::test]
async fn auth_without_header_is_401() {
    let app = app();
    let resp = app
        .oneshot(Request::builder().uri("/auth").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn auth_reflects_the_authorization_header() {
    let app = app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/auth")
                .header(http::header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], b"Basic dXNlcjpwYXNz");
}

// --- catalog ---

#[tokio::test]
async fn catalog_is_served_as_xml() {
    let app = app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/catalog.xml")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(http::header::CONTENT_TYPE).unwrap(),
        "application/xml"
    );
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], CATALOG_XML.as_bytes());
}

// --- duplicate headers ---

#[tokio::test]
async fn duplicate_headers_are_sent_twice() {
    let app = app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/duplicate-headers")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    let values: Vec<&str> = resp
        .headers()
        .get_all("x-fruit")
        .iter()
        .map(|value| value.to_str().unwrap())
        .collect();
    assert_eq!(values, vec!["apple", "banana"]);
}
