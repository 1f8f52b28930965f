//! HTTP routes and the helpers shared by them.

use actix_web::error::{InternalError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;

use crate::context::{RequestContext, TRACE_ID_HEADER};
use crate::errors::{AppError, AppResult};
use crate::http::{serialize_error, serialize_response};

pub mod order;

/// Registers the order routes together with the query-string error handler.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(order::create_order)
        .service(order::list_orders)
        .service(order::get_order);
}

/// Opens a span for the request, continuing the caller's trace if any.
pub fn request_context(req: &HttpRequest) -> RequestContext {
    let trace_id = req
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok());
    RequestContext::start(trace_id)
}

fn with_trace_header(ctx: &RequestContext, mut response: HttpResponse) -> HttpResponse {
    if let Ok(value) = HeaderValue::from_str(ctx.trace_id()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
    }
    response
}

/// Turns a use case result into a JSON response.
pub fn respond<T: Serialize>(
    ctx: &RequestContext,
    status: StatusCode,
    result: AppResult<T>,
) -> HttpResponse {
    let response = match result {
        Ok(body) => serialize_response(status.as_u16(), &body),
        Err(err) => serialize_error(&err, ctx),
    };
    with_trace_header(ctx, response.into())
}

/// Runs a repository-bound use case on the blocking thread pool.
pub async fn run_blocking<T, F>(task: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    web::block(task).await.map_err(|err| {
        AppError::internal_server_error(format!("Blocking task was cancelled: {err}"))
    })?
}

fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    let ctx = request_context(req);
    let app_error = AppError::invalid_request(format!("Failed to parse query string: {err}"));
    let response = with_trace_header(&ctx, serialize_error(&app_error, &ctx).into());
    InternalError::from_response(err, response).into()
}
