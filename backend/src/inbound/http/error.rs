//! HTTP adapter mapping for domain errors.
//!
//! The domain error type stays HTTP-agnostic; this module picks the status
//! code and serialises the error envelope, hiding internal messages.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use serde_json::json;
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::EmailTaken => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden | ErrorCode::ReauthRequired => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

fn map_json_payload_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    Error::invalid_request("request body is not valid JSON for this endpoint")
        .with_details(json!({ "code": "invalid_json", "reason": err.to_string() }))
        .into()
}

/// JSON extractor configuration that reports malformed bodies with the
/// standard error envelope instead of actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(map_json_payload_error)
}

#[cfg(test)]
mod tests;
