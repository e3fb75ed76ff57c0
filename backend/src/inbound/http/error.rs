//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into the `{"errors": [...]}` envelope and
//! a status code.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::TRACE_ID_HEADER;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message returned when a JSON body cannot be decoded.
pub const INVALID_BODY_MESSAGE: &str = "invalid request body";

/// One entry of the failure envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorItem {
    pub message: String,
}

/// Failure envelope: `{"errors": [{"message": "..."}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub errors: Vec<ErrorItem>,
}

impl From<&Error> for ErrorEnvelope {
    fn from(error: &Error) -> Self {
        Self {
            errors: error
                .messages()
                .iter()
                .map(|message| ErrorItem {
                    message: message.clone(),
                })
                .collect(),
        }
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::OperationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let redacted = Error::internal(ErrorCode::InternalError.default_message());
        match error.trace_id() {
            Some(id) => redacted.with_trace_id(id),
            None => redacted,
        }
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let trace_id = self.trace_id().map(|id| id.to_string());
        if status.is_server_error() {
            error!(
                code = ?self.code(),
                messages = %self,
                trace_id = trace_id.as_deref().unwrap_or_default(),
                "request failed"
            );
        } else {
            debug!(code = ?self.code(), messages = %self, "request rejected");
        }

        let mut builder = HttpResponse::build(status);
        if let Some(id) = trace_id {
            builder.insert_header((TRACE_ID_HEADER, id));
        }
        builder.json(ErrorEnvelope::from(&redact_if_internal(self)))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(ErrorCode::InternalError.default_message())
    }
}

/// `JsonConfig` error handler rendering decode failures in the envelope.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    Error::invalid_request(INVALID_BODY_MESSAGE).into()
}

/// `QueryConfig` error handler for query strings that fail to decode at all.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected query string");
    Error::invalid_request("invalid query string").into()
}
