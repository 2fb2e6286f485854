//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test as actix_test;
use serde_json::{Value, json};

pub use crate::test_support::memory_state;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Register an account and return its session cookie and id.
pub async fn register_and_login<S>(app: &S, name: &str, email: &str) -> (Cookie<'static>, String)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let signup = actix_test::TestRequest::post()
        .uri("/api/v1/register")
        .set_json(json!({ "name": name, "email": email, "password": "secret1" }))
        .to_request();
    let registered: Value = actix_test::call_and_read_body_json(app, signup).await;
    let id = registered
        .get("id")
        .and_then(Value::as_str)
        .expect("registered id")
        .to_owned();

    let login_request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "email": email, "password": "secret1" }))
        .to_request();
    let response = actix_test::call_service(app, login_request).await;
    assert!(response.status().is_success(), "login failed");
    let cookie = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned();
    (cookie, id)
}
