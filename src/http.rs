//! Mapping of service results onto transport responses.
//!
//! Both functions always produce a response: serialization problems degrade
//! to fixed bodies instead of surfacing a second error.

use std::error::Error as StdError;

use serde::Serialize;

use crate::context::RequestContext;
use crate::dto::error::ErrorResponse;
use crate::errors::{AppError, ErrorCode};

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Last-resort body used when even the generic error cannot be serialized.
pub const INTERNAL_SERVER_ERROR_BODY: &str =
    r#"{"errorCode":"INTERNAL_SERVER_ERROR","description":"Internal server error has occurred"}"#;

/// Transport-neutral response: status code plus serialized JSON body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Serializes a successful result; on failure answers `500` with `{}`.
pub fn serialize_response<T>(status: u16, body: &T) -> TransportResponse
where
    T: Serialize + ?Sized,
{
    match serde_json::to_string(body) {
        Ok(json) => TransportResponse::new(status, json),
        Err(err) => {
            log::error!("Failed to serialize response body: {err}");
            TransportResponse::new(ErrorCode::InternalServerError.status(), "{}")
        }
    }
}

fn error_body<T: Serialize>(dto: &T) -> Option<String> {
    serde_json::to_string(dto)
        .map_err(|err| log::error!("Failed to serialize error body: {err}"))
        .ok()
}

fn internal_server_error(ctx: &RequestContext) -> TransportResponse {
    let body = error_body(&ErrorResponse::internal(ctx))
        .unwrap_or_else(|| INTERNAL_SERVER_ERROR_BODY.to_string());
    TransportResponse::new(ErrorCode::InternalServerError.status(), body)
}

/// Maps any error onto a sanitized response.
///
/// [`AppError`] values keep their status, code and params. Anything else is
/// reported as a generic internal error and its message is only logged.
pub fn serialize_error(err: &(dyn StdError + 'static), ctx: &RequestContext) -> TransportResponse {
    let Some(app_error) = err.downcast_ref::<AppError>() else {
        log::error!("{ctx} unexpected error: {err}");
        return internal_server_error(ctx);
    };

    match error_body(&ErrorResponse::from_error(app_error, ctx)) {
        Some(body) => TransportResponse::new(app_error.status(), body),
        None => internal_server_error(ctx),
    }
}

#[cfg(feature = "server")]
impl From<TransportResponse> for actix_web::HttpResponse {
    fn from(response: TransportResponse) -> Self {
        let status = actix_web::http::StatusCode::from_u16(response.status)
            .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
        actix_web::HttpResponse::build(status)
            .content_type(CONTENT_TYPE_JSON)
            .body(response.body)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use serde::Serializer;
    use serde::ser::Error as _;
    use serde_json::Value;

    use super::*;

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("refusing to serialize"))
        }
    }

    fn ctx() -> RequestContext {
        RequestContext::new("trace-1", "span-1")
    }

    #[test]
    fn not_found_maps_to_404_without_internal_details() {
        let err = AppError::entity_not_found("secret lookup detail", "id", "abc")
            .caused_by(io::Error::other("driver exploded"));

        let response = serialize_error(&err, &ctx());

        assert_eq!(response.status, 404);
        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["errorCode"], "ENTITY_NOT_FOUND");
        assert_eq!(body["description"], "Entity not found");
        assert_eq!(body["params"]["id"], "abc");
        assert_eq!(body["traceId"], "trace-1");
        assert_eq!(body["spanId"], "span-1");
        assert!(!response.body.contains("secret lookup detail"));
        assert!(!response.body.contains("driver exploded"));
    }

    #[test]
    fn foreign_errors_become_opaque_internal_errors() {
        let err = io::Error::other("connection string user:pass@db");

        let response = serialize_error(&err, &ctx());

        assert_eq!(response.status, 500);
        let body: ErrorResponse = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body.error_code, ErrorCode::InternalServerError);
        assert!(body.params.is_empty());
        assert!(!response.body.contains("user:pass"));
    }

    #[test]
    fn taxonomy_statuses_are_preserved() {
        let cases = [
            (AppError::invalid_request("bad json"), 400),
            (AppError::invalid_request_parameter("empty", "id"), 400),
            (AppError::entity_already_exists("dup", "id", "1"), 422),
            (AppError::insufficient_permission("nope"), 403),
            (AppError::internal_server_error("boom"), 500),
        ];

        for (err, status) in cases {
            let response = serialize_error(&err, &ctx());
            assert_eq!(response.status, status, "{err}");
            let body: ErrorResponse = serde_json::from_str(&response.body).unwrap();
            assert_eq!(body.error_code, err.code());
        }
    }

    #[test]
    fn empty_params_are_omitted() {
        let response = serialize_error(&AppError::invalid_request("bad"), &ctx());
        assert!(!response.body.contains("params"));
    }

    #[test]
    fn success_body_is_serialized() {
        let response = serialize_response(201, &serde_json::json!({"id": "1"}));
        assert_eq!(response.status, 201);
        assert_eq!(response.body, r#"{"id":"1"}"#);
    }

    #[test]
    fn success_serialization_failure_degrades_to_empty_object() {
        let response = serialize_response(200, &Unserializable);
        assert_eq!(response.status, 500);
        assert_eq!(response.body, "{}");
    }

    #[test]
    fn error_body_failure_yields_none() {
        assert_eq!(error_body(&Unserializable), None);
    }

    #[test]
    fn fallback_literal_is_valid_json() {
        let body: Value = serde_json::from_str(INTERNAL_SERVER_ERROR_BODY).unwrap();
        assert_eq!(body["errorCode"], "INTERNAL_SERVER_ERROR");
    }
}
