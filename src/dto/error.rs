//! Error payload returned to API consumers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::context::RequestContext;
use crate::errors::{AppError, ErrorCode};

/// Sanitized error body. Only the code, the public description, the named
/// parameters and the correlation ids are ever exposed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_code: ErrorCode,
    pub description: String,
    pub trace_id: String,
    pub span_id: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
}

impl ErrorResponse {
    pub fn from_error(err: &AppError, ctx: &RequestContext) -> Self {
        Self {
            error_code: err.code(),
            description: err.description().to_string(),
            trace_id: ctx.trace_id().to_string(),
            span_id: ctx.span_id().to_string(),
            params: err.params().clone(),
        }
    }

    /// Generic body used for every error outside the taxonomy.
    pub fn internal(ctx: &RequestContext) -> Self {
        Self {
            error_code: ErrorCode::InternalServerError,
            description: ErrorCode::InternalServerError.description().to_string(),
            trace_id: ctx.trace_id().to_string(),
            span_id: ctx.span_id().to_string(),
            params: BTreeMap::new(),
        }
    }
}
