//! Integration tests for the login and catalog clients
//!
//! These tests use wiremock to stand in for the bookshelf backend and exercise
//! the full request/response cycle and error mapping.

use access_client::{
    AccessError, ApiClient, AuthClient, CatalogClient, CatalogItem, ClientConfig, Credentials,
    Session,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api(server: &MockServer) -> ApiClient {
    ApiClient::new(ClientConfig::new(server.uri())).unwrap()
}

fn credentials() -> Credentials {
    Credentials::new("AB1234", "Abc1234!")
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/Access/Login"))
        .and(header("content-type", "application/json; charset=utf-8"))
        .and(body_json(json!({"UserName": "AB1234", "Password": "Abc1234!"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "xyz"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = AuthClient::new(api(&mock_server));
    let session = auth.login(&credentials()).await.unwrap();

    assert_eq!(session, Session::new("xyz"));
}

#[tokio::test]
async fn test_login_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/Access/Login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let auth = AuthClient::new(api(&mock_server));
    let err = auth.login(&credentials()).await.unwrap_err();

    assert_eq!(err, AccessError::Auth { status: 401 });
}

#[tokio::test]
async fn test_login_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/Access/Login"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .mount(&mock_server)
        .await;

    let auth = AuthClient::new(api(&mock_server));
    let err = auth.login(&credentials()).await.unwrap_err();

    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_login_missing_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/Access/Login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": "AB1234"})))
        .mount(&mock_server)
        .await;

    let auth = AuthClient::new(api(&mock_server));
    let err = auth.login(&credentials()).await.unwrap_err();

    assert!(matches!(err, AccessError::Protocol(_)));
}

#[tokio::test]
async fn test_login_invalid_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/Access/Login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&mock_server)
        .await;

    let auth = AuthClient::new(api(&mock_server));
    let err = auth.login(&credentials()).await.unwrap_err();

    assert!(matches!(err, AccessError::Protocol(_)));
}

#[tokio::test]
async fn test_login_transport_error() {
    // Nothing listens on port 1
    let client = ApiClient::new(ClientConfig::new("http://127.0.0.1:1")).unwrap();
    let auth = AuthClient::new(client);

    let err = auth.login(&credentials()).await.unwrap_err();

    assert!(matches!(err, AccessError::Transport(_)));
}

#[tokio::test]
async fn test_login_sends_default_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/Access/Login"))
        .and(header("X-Client", "bookshelf-tests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "t"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::new(mock_server.uri()).with_header("X-Client", "bookshelf-tests");
    let auth = AuthClient::new(ApiClient::new(config).unwrap());

    assert!(auth.login(&credentials()).await.is_ok());
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn test_catalog_sorted_by_release_date() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Access/Books"))
        .and(header("Authorization", "Bearer xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "B", "img_url": "", "date_released": "2023-02-01", "pdf_url": ""},
            {"id": 2, "title": "A", "img_url": "", "date_released": "2023-01-01", "pdf_url": ""}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let catalog = CatalogClient::new(api(&mock_server));
    let items = catalog.fetch_catalog(&Session::new("xyz")).await.unwrap();

    assert_eq!(
        items,
        vec![
            CatalogItem {
                id: 2,
                title: "A".to_string(),
                image_url: String::new(),
                release_date: "2023-01-01".to_string(),
                document_url: String::new(),
            },
            CatalogItem {
                id: 1,
                title: "B".to_string(),
                image_url: String::new(),
                release_date: "2023-02-01".to_string(),
                document_url: String::new(),
            },
        ]
    );
}

#[tokio::test]
async fn test_catalog_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Access/Books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let catalog = CatalogClient::new(api(&mock_server));
    let items = catalog.fetch_catalog(&Session::new("xyz")).await.unwrap();

    assert!(items.is_empty());
}

#[tokio::test]
async fn test_catalog_malformed_element_aborts_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Access/Books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "B", "img_url": "", "date_released": "2023-02-01", "pdf_url": ""},
            {"id": 2, "title": "A", "date_released": "2023-01-01", "pdf_url": ""}
        ])))
        .mount(&mock_server)
        .await;

    let catalog = CatalogClient::new(api(&mock_server));
    let err = catalog.fetch_catalog(&Session::new("xyz")).await.unwrap_err();

    assert!(matches!(err, AccessError::Protocol(_)));
}

#[tokio::test]
async fn test_catalog_not_an_array() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Access/Books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"books": []})))
        .mount(&mock_server)
        .await;

    let catalog = CatalogClient::new(api(&mock_server));
    let err = catalog.fetch_catalog(&Session::new("xyz")).await.unwrap_err();

    assert!(matches!(err, AccessError::Protocol(_)));
}

#[tokio::test]
async fn test_catalog_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Access/Books"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let catalog = CatalogClient::new(api(&mock_server));
    let err = catalog.fetch_catalog(&Session::new("stale")).await.unwrap_err();

    assert_eq!(err, AccessError::Catalog { status: 401 });
}

#[tokio::test]
async fn test_catalog_transport_error() {
    let client = ApiClient::new(ClientConfig::new("http://127.0.0.1:1")).unwrap();
    let catalog = CatalogClient::new(client);

    let err = catalog.fetch_catalog(&Session::new("xyz")).await.unwrap_err();

    assert!(matches!(err, AccessError::Transport(_)));
}
