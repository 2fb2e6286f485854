//! Shared helpers for HTTP integration tests.
//!
//! Builds the full `/api/v1` surface over the in-memory store so scenarios
//! exercise the same handlers, session middleware and JSON configuration
//! the server wires up.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::{Value, json};

use pet_registry::Trace;
use pet_registry::inbound::http::breeds::list_breeds;
use pet_registry::inbound::http::json_config;
use pet_registry::inbound::http::pets::{create_pet, delete_pet, get_pet, list_pets, update_pet};
use pet_registry::inbound::http::profile::{delete_profile, get_profile, update_profile};
use pet_registry::inbound::http::state::HttpState;
use pet_registry::inbound::http::users::{login, logout, register};
use pet_registry::outbound::memory::MemoryStore;
use pet_registry::test_support::memory_state;

pub const PASSWORD: &str = "secret1";

/// Initialise the API over `state`.
pub async fn init_app(
    state: HttpState,
) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .wrap(Trace)
            .service(
                web::scope("/api/v1")
                    .wrap(session)
                    .service(register)
                    .service(login)
                    .service(logout)
                    .service(get_profile)
                    .service(update_profile)
                    .service(delete_profile)
                    .service(list_pets)
                    .service(create_pet)
                    .service(get_pet)
                    .service(update_pet)
                    .service(delete_pet)
                    .service(list_breeds),
            ),
    )
    .await
}

/// Initialise the API over a fresh in-memory store.
pub async fn memory_app() -> (
    impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    Arc<MemoryStore>,
) {
    let (state, store) = memory_state();
    (init_app(state).await, store)
}

/// Register `email` and return a session cookie for it.
pub async fn sign_up<S>(app: &S, name: &str, email: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let signup = TestRequest::post()
        .uri("/api/v1/register")
        .set_json(json!({ "name": name, "email": email, "password": PASSWORD }))
        .to_request();
    assert_eq!(
        test::call_service(app, signup).await.status(),
        StatusCode::CREATED
    );
    sign_in(app, email, PASSWORD)
        .await
        .expect("fresh account can log in")
}

/// Log in, returning the session cookie when credentials are accepted.
pub async fn sign_in<S>(app: &S, email: &str, password: &str) -> Option<Cookie<'static>>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let response = test::call_service(app, request).await;
    if !response.status().is_success() {
        return None;
    }
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// Build a valid pet payload.
pub fn pet(name: &str, species: &str) -> Value {
    json!({
        "name": name,
        "age": 4,
        "type": species,
        "breed": "SRD",
        "ownerName": "Ana",
        "ownerContact": "ana@example.com"
    })
}

/// Send `request` with `cookie` attached and return status and JSON body.
pub async fn send<S>(app: &S, request: TestRequest, cookie: &Cookie<'static>) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(app, request.cookie(cookie.clone()).to_request()).await;
    let status = response.status();
    let body = test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

/// Create a pet as `cookie`'s user and return the stored record.
pub async fn create_pet_as<S>(app: &S, cookie: &Cookie<'static>, payload: Value) -> Value
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, body) = send(
        app,
        TestRequest::post().uri("/api/v1/pets").set_json(payload),
        cookie,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body
}

/// Read a string field from a JSON object.
pub fn text<'a>(value: &'a Value, field: &str) -> &'a str {
    value
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("missing string field {field} in {value}"))
}

/// Read an unsigned integer field from a JSON object.
pub fn number(value: &Value, field: &str) -> u64 {
    value
        .get(field)
        .and_then(Value::as_u64)
        .unwrap_or_else(|| panic!("missing numeric field {field} in {value}"))
}

/// Names of the listed pets, in response order.
pub fn names(listing: &Value) -> Vec<String> {
    listing
        .get("items")
        .and_then(Value::as_array)
        .expect("items array")
        .iter()
        .map(|item| text(item, "name").to_owned())
        .collect()
}
