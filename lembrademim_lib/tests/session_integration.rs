use std::sync::Arc;

use lembrademim_lib::lembrademim_api::{TOKEN_KEY, USER_KEY};
use lembrademim_lib::types::{Id, LoginRequest, SignupRequest};
use lembrademim_lib::{Client, CredentialStore, FileStore, LibError, MemoryStore, Session};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session_with(base: &str, store: Arc<dyn CredentialStore>) -> Session {
    Session::new(Client::with_base_url(base, store).unwrap())
}

fn logged_in_store() -> Arc<MemoryStore> {
    let store = MemoryStore::with_token("tok");
    store
        .set(USER_KEY, r#"{"id":7,"name":"Maria","email":"maria@example.com"}"#)
        .unwrap();
    Arc::new(store)
}

fn credentials() -> LoginRequest {
    LoginRequest {
        email: "maria@example.com".into(),
        password: "secret1".into(),
    }
}

// ============================================================================
// Login / signup / logout
// ============================================================================

#[tokio::test]
async fn login_persists_token_and_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "maria@example.com", "password": "secret1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "abc",
            "user": {"id": 7, "name": "Maria", "email": "maria@example.com"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let session = session_with(&server.uri(), store.clone());

    let auth = session.login(&credentials()).await.unwrap();
    assert_eq!(auth.token, "abc");
    assert_eq!(auth.user.id, Id::from(7));

    assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
    assert!(session.is_authenticated());
    assert_eq!(session.user().unwrap().name, "Maria");
}

#[tokio::test]
async fn login_accepts_access_token_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "access_token": "xyz",
            "user": {"id": "7", "name": "Maria", "email": "maria@example.com"}
        })))
        .mount(&server)
        .await;

    let session = session_with(&server.uri(), Arc::new(MemoryStore::new()));
    let auth = session.login(&credentials()).await.unwrap();
    assert_eq!(auth.token, "xyz");
    assert_eq!(session.token().as_deref(), Some("xyz"));
}

#[tokio::test]
async fn login_without_token_stores_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 7, "name": "Maria", "email": "maria@example.com"}
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let session = session_with(&server.uri(), store.clone());

    let err = session.login(&credentials()).await.unwrap_err();
    assert!(matches!(err, LibError::MissingToken));
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn login_rejected_surfaces_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Credenciais inválidas"})),
        )
        .mount(&server)
        .await;

    let session = session_with(&server.uri(), Arc::new(MemoryStore::new()));
    let err = session.login(&credentials()).await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(
        lembrademim_lib::messages::login_error(&err),
        "Wrong email or password"
    );
}

#[tokio::test]
async fn signup_survives_reopening_file_store() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user"))
        .and(body_json(json!({
            "name": "Maria",
            "email": "maria@example.com",
            "password": "secret1"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "token": "fresh",
            "user": {"id": 8, "name": "Maria", "email": "maria@example.com"}
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("nested").join("credentials.json");

    let session = session_with(&server.uri(), Arc::new(FileStore::new(&file)));
    session
        .signup(&SignupRequest {
            name: "Maria".into(),
            email: "maria@example.com".into(),
            password: "secret1".into(),
        })
        .await
        .unwrap();

    let reopened = session_with(&server.uri(), Arc::new(FileStore::new(&file)));
    assert_eq!(reopened.token().as_deref(), Some("fresh"));
    assert_eq!(reopened.user().unwrap().id, Id::from(8));
}

#[tokio::test]
async fn logout_clears_credentials() {
    let server = MockServer::start().await;
    let store = logged_in_store();
    let session = session_with(&server.uri(), store.clone());

    assert!(session.is_authenticated());
    session.logout().unwrap();
    assert!(!session.is_authenticated());
    assert_eq!(store.get(USER_KEY).unwrap(), None);
}

// ============================================================================
// Token validation
// ============================================================================

#[tokio::test]
async fn rejected_token_clears_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/validate"))
        .and(header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_with(&server.uri(), logged_in_store());
    assert!(!session.validate_token().await.unwrap());
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn invalid_flag_clears_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/validate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"valid": false})))
        .mount(&server)
        .await;

    let session = session_with(&server.uri(), logged_in_store());
    assert_eq!(session.check_authentication().await, None);
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn missing_validation_route_trusts_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/validate"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let session = session_with(&server.uri(), logged_in_store());
    assert!(session.validate_token().await.unwrap());
    let user = session.check_authentication().await.unwrap();
    assert_eq!(user.email, "maria@example.com");
}

#[tokio::test]
async fn validation_without_verdict_trusts_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/validate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let session = session_with(&server.uri(), logged_in_store());
    assert!(session.validate_token().await.unwrap());
    assert_eq!(
        session.check_authentication().await.map(|u| u.id),
        Some(Id::from(7))
    );
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn empty_validation_body_trusts_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/validate"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let session = session_with(&server.uri(), logged_in_store());
    assert!(session.validate_token().await.unwrap());
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn offline_start_keeps_session() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let session = session_with(&base, logged_in_store());
    let user = session.check_authentication().await;
    assert_eq!(user.map(|u| u.id), Some(Id::from(7)));
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn server_error_during_check_clears_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/validate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let session = session_with(&server.uri(), logged_in_store());
    assert_eq!(session.check_authentication().await, None);
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn no_token_skips_validation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/validate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"valid": true})))
        .expect(0)
        .mount(&server)
        .await;

    let session = session_with(&server.uri(), Arc::new(MemoryStore::new()));
    assert!(!session.validate_token().await.unwrap());
}

// ============================================================================
// Password reset
// ============================================================================

#[tokio::test]
async fn reset_flow() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/request-reset"))
        .and(body_json(json!({"email": "maria@example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "sent"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/validate-code"))
        .and(body_json(json!({"email": "maria@example.com", "code": "123456"})))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/validate-code"))
        .and(body_json(json!({"email": "maria@example.com", "code": "000000"})))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "Código inválido"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/reset-password"))
        .and(body_json(json!({
            "email": "maria@example.com",
            "code": "123456",
            "newPassword": "another1"
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_with(&server.uri(), Arc::new(MemoryStore::new()));
    session
        .request_password_reset("maria@example.com")
        .await
        .unwrap();
    assert!(session.validate_reset_code("maria@example.com", "123456").await);
    assert!(!session.validate_reset_code("maria@example.com", "000000").await);
    session
        .confirm_password_reset("maria@example.com", "123456", "another1")
        .await
        .unwrap();
}
