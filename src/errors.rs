//! Structured application errors shared by every use case.
//!
//! An [`AppError`] carries a stable [`ErrorCode`], a description that is safe
//! to show to API consumers, an internal diagnostic message, an optional
//! underlying cause and a set of named parameters. Only the code, the
//! description and the parameters ever leave the service; see
//! [`crate::http::serialize_error`].

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Boxed underlying error kept for diagnostics only.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

pub type AppResult<T> = Result<T, AppError>;

/// Closed set of error kinds understood by the transport boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "INTERNAL_SERVER_ERROR")]
    InternalServerError,
    #[serde(rename = "INVALID_REQUEST")]
    InvalidRequest,
    #[serde(rename = "INVALID_REQUEST_PARAMETERS")]
    InvalidRequestParameters,
    #[serde(rename = "ENTITY_NOT_FOUND")]
    EntityNotFound,
    #[serde(rename = "ENTITY_ALREADY_EXIST")]
    EntityAlreadyExists,
    #[serde(rename = "INSUFFICIENT_PERMISSION")]
    InsufficientPermission,
}

impl ErrorCode {
    /// Stable machine-readable representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::InvalidRequestParameters => "INVALID_REQUEST_PARAMETERS",
            Self::EntityNotFound => "ENTITY_NOT_FOUND",
            Self::EntityAlreadyExists => "ENTITY_ALREADY_EXIST",
            Self::InsufficientPermission => "INSUFFICIENT_PERMISSION",
        }
    }

    /// HTTP status code reported for this kind.
    pub const fn status(self) -> u16 {
        match self {
            Self::InternalServerError => 500,
            Self::InvalidRequest | Self::InvalidRequestParameters => 400,
            Self::EntityNotFound => 404,
            Self::EntityAlreadyExists => 422,
            Self::InsufficientPermission => 403,
        }
    }

    /// Description safe for external exposure.
    pub const fn description(self) -> &'static str {
        match self {
            Self::InternalServerError => "Internal server error has occurred",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidRequestParameters => "Invalid request parameter",
            Self::EntityNotFound => "Entity not found",
            Self::EntityAlreadyExists => "Entity already exist",
            Self::InsufficientPermission => {
                "You do not have rights to perform this action on this entity"
            }
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error value produced at the point of failure and propagated unchanged up
/// to the transport boundary.
#[derive(Debug, Error)]
#[error("Code: {code}, InternalDescription: {internal_description}")]
pub struct AppError {
    code: ErrorCode,
    internal_description: String,
    #[source]
    cause: Option<BoxError>,
    params: BTreeMap<String, String>,
}

impl AppError {
    fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            internal_description: message.into(),
            cause: None,
            params: BTreeMap::new(),
        }
    }

    fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Unexpected internal failure.
    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalServerError, message)
    }

    /// Request body or shape could not be understood.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// A single named parameter failed validation.
    pub fn invalid_request_parameter(message: impl Into<String>, param: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequestParameters, message).with_param("param", param)
    }

    /// A single named parameter failed the given validation rule.
    pub fn invalid_request_parameter_with_rule(
        message: impl Into<String>,
        param: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self::invalid_request_parameter(message, param).with_param("rule", rule)
    }

    /// Lookup by a single key found nothing.
    pub fn entity_not_found(
        message: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::new(ErrorCode::EntityNotFound, message).with_param(key, value)
    }

    /// Lookup by several keys found nothing.
    pub fn entity_not_found_for_fields<I, K, V>(message: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        fields
            .into_iter()
            .fold(Self::new(ErrorCode::EntityNotFound, message), |err, (k, v)| {
                err.with_param(k, v)
            })
    }

    /// Uniqueness violation on the given key.
    pub fn entity_already_exists(
        message: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::new(ErrorCode::EntityAlreadyExists, message).with_param(key, value)
    }

    /// Caller is not allowed to perform the action.
    pub fn insufficient_permission(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InsufficientPermission, message)
    }

    /// Attaches the underlying error that triggered this one.
    pub fn caused_by(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn status(&self) -> u16 {
        self.code.status()
    }

    pub fn description(&self) -> &'static str {
        self.code.description()
    }

    pub fn internal_description(&self) -> &str {
        &self.internal_description
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Returns `true` when this error has the given code.
    pub fn is(&self, code: ErrorCode) -> bool {
        self.code == code
    }
}

/// Checks whether an arbitrary error is an [`AppError`] of the given kind.
///
/// Errors outside the taxonomy always yield `false`.
pub fn is(err: &(dyn StdError + 'static), code: ErrorCode) -> bool {
    err.downcast_ref::<AppError>()
        .is_some_and(|app_error| app_error.is(code))
}
