//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::rstest;
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::email_taken("taken"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::reauth_required("prove it"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn body_of(error: &Error) -> (HttpResponse<()>, Value) {
    let (head, body) = ResponseError::error_response(error).into_parts();
    let bytes = to_bytes(body).await.expect("read error body");
    let json = serde_json::from_slice(&bytes).expect("error body is JSON");
    (head, json)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id() {
    let error = Error::internal("database password is hunter2")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"secret": "x"}));

    let (response, body) = body_of(&error).await;

    assert_eq!(
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
        Some(TRACE_ID)
    );
    assert_eq!(body["code"], "internal_error");
    assert_eq!(body["message"], "Internal server error");
    assert_eq!(body["traceId"], TRACE_ID);
    assert!(body.get("details").is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details() {
    let error = Error::reauth_required("current password is incorrect")
        .with_details(json!({"code": "incorrect_current_password"}));

    let (response, body) = body_of(&error).await;

    assert!(response.headers().get(TRACE_ID_HEADER).is_none());
    assert_eq!(body["code"], "reauth_required");
    assert_eq!(body["message"], "current password is incorrect");
    assert_eq!(body["details"]["code"], "incorrect_current_password");
}

#[actix_web::test]
async fn malformed_json_bodies_use_the_error_envelope() {
    use actix_web::{App, test, web};

    let app = test::init_service(
        App::new()
            .app_data(json_config())
            .route(
                "/",
                web::post().to(|_: web::Json<Value>| async { HttpResponse::Ok().finish() }),
            ),
    )
    .await;
    let request = test::TestRequest::post()
        .uri("/")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();

    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"], "invalid_json");
}
