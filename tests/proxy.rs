//! End-to-end tests against the real router with a mocked upstream.
//!
//! Each test stands up a wiremock server playing both the OAuth2 token
//! endpoint and the content API, then drives the axum router directly with
//! `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use quran_proxy::config::Config;
use quran_proxy::{app, AppState};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(base_url: String, token_url: String) -> Config {
    Config {
        port: 0,
        client_id: "test-client".into(),
        client_secret: "test-secret".into(),
        token_url,
        base_url,
        allowed_origins: vec!["http://localhost:5173".into()],
        translation_id: 131,
        verses_per_page: 10,
    }
}

async fn proxy_app(server: &MockServer) -> axum::Router {
    let cfg = test_config(server.uri(), format!("{}/oauth2/token", server.uri()));
    app(Arc::new(AppState::new(cfg).unwrap()))
}

async fn mount_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-123",
            "expires_in": 3600,
            "token_type": "bearer"
        })))
        .mount(server)
        .await;
}

async fn body_string(resp: axum::response::Response) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn chapters_pass_through_with_auth_headers() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    let upstream_body = json!({"chapters": [{"id": 1, "name_simple": "Al-Fatihah"}]});
    Mock::given(method("GET"))
        .and(path("/chapters"))
        .and(header("x-auth-token", "tok-123"))
        .and(header("x-client-id", "test-client"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let resp = proxy_app(&server)
        .await
        .oneshot(Request::get("/api/chapters").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(body, upstream_body);
}

#[tokio::test]
async fn verses_request_carries_the_fixed_parameter_set() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    // The mock only matches when every fixed parameter is present, so a 200
    // from the proxy proves the outbound query was built correctly.
    Mock::given(method("GET"))
        .and(path("/verses/by_chapter/2"))
        .and(query_param("language", "en"))
        .and(query_param("words", "false"))
        .and(query_param("translations", "131"))
        .and(query_param("fields", "text_uthmani"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "verses": [{
                "id": 8,
                "verse_key": "2:1",
                "text_uthmani": "الٓمٓ",
                "translations": [{"text": "Alif, Lam, Meem.<sup foot_note=76373>1</sup>", "resource_id": 131}]
            }],
            "pagination": {"per_page": 10, "total_pages": 29, "current_page": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = proxy_app(&server)
        .await
        .oneshot(
            Request::get("/api/chapters/2/verses?page=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    // Footnote marker stripped, the rest untouched.
    assert_eq!(body["verses"][0]["translations"][0]["text"], "Alif, Lam, Meem.");
    assert_eq!(body["verses"][0]["translations"][0]["resource_id"], 131);
    assert_eq!(body["pagination"]["total_pages"], 29);
}

#[tokio::test]
async fn upstream_error_status_and_body_pass_through_verbatim() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    Mock::given(method("GET"))
        .and(path("/chapters"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"msg":"not found"}"#))
        .mount(&server)
        .await;

    let resp = proxy_app(&server)
        .await
        .oneshot(Request::get("/api/chapters").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(resp).await, r#"{"msg":"not found"}"#);
}

#[tokio::test]
async fn rejected_token_exchange_yields_401() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid_client"))
        .mount(&server)
        .await;

    let resp = proxy_app(&server)
        .await
        .oneshot(Request::get("/api/chapters").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(body["error"]["type"], "authentication_error");
}

#[tokio::test]
async fn unreachable_content_api_yields_503() {
    // Token endpoint works, content API does not.
    let token_server = MockServer::start().await;
    mount_token_endpoint(&token_server).await;

    let cfg = test_config(
        "http://127.0.0.1:1".into(),
        format!("{}/oauth2/token", token_server.uri()),
    );
    let router = app(Arc::new(AppState::new(cfg).unwrap()));

    let resp = router
        .oneshot(Request::get("/api/chapters").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(body["error"]["type"], "connection_error");
}

#[tokio::test]
async fn one_token_exchange_serves_many_content_requests() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-123",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/chapters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"chapters": []})))
        .expect(3)
        .mount(&server)
        .await;

    let cfg = test_config(server.uri(), format!("{}/oauth2/token", server.uri()));
    let state = Arc::new(AppState::new(cfg).unwrap());

    for _ in 0..3 {
        let resp = app(state.clone())
            .oneshot(Request::get("/api/chapters").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn routes_also_answer_without_the_api_prefix() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    Mock::given(method("GET"))
        .and(path("/chapters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"chapters": []})))
        .mount(&server)
        .await;

    let resp = proxy_app(&server)
        .await
        .oneshot(Request::get("/chapters").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn health_endpoint_reports_ok_with_request_id() {
    let server = MockServer::start().await;
    let resp = proxy_app(&server)
        .await
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    assert_eq!(body_string(resp).await, "ok");
}
