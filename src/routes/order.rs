use std::collections::HashMap;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, get, post, web};

use crate::domain::order::Order;
use crate::domain::order_filter::OrderFilter;
use crate::dto::order::ListOrdersQuery;
use crate::errors::AppError;
use crate::forms::order::CreateOrderForm;
use crate::pagination::PageSpec;
use crate::repository::DieselRepository;
use crate::routes::{request_context, respond, run_blocking};
use crate::services::order as order_service;

#[post("/orders")]
pub async fn create_order(
    req: HttpRequest,
    body: web::Bytes,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    let ctx = request_context(&req);

    let form = match serde_json::from_slice::<CreateOrderForm>(&body) {
        Ok(form) => form,
        Err(err) => {
            let err = AppError::invalid_request("Failed to parse request").caused_by(err);
            return respond::<Order>(&ctx, StatusCode::CREATED, Err(err));
        }
    };

    let repo = repo.get_ref().clone();
    let task_ctx = ctx.clone();
    let result =
        run_blocking(move || order_service::create_order(&repo, &task_ctx, form)).await;

    respond(&ctx, StatusCode::CREATED, result)
}

#[get("/orders")]
pub async fn list_orders(
    req: HttpRequest,
    params: web::Query<HashMap<String, String>>,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    let ctx = request_context(&req);
    let params = params.into_inner();

    let filter = match OrderFilter::from_params(&params) {
        Ok(filter) => filter,
        Err(err) => return respond::<Order>(&ctx, StatusCode::OK, Err(err)),
    };
    let query = ListOrdersQuery {
        filter,
        page: PageSpec::from_params(&params, Order::PRIMARY_KEY),
    };

    let repo = repo.get_ref().clone();
    let task_ctx = ctx.clone();
    let result = run_blocking(move || order_service::list_orders(&repo, &task_ctx, query)).await;

    respond(&ctx, StatusCode::OK, result)
}

#[get("/orders/{order_id}")]
pub async fn get_order(
    req: HttpRequest,
    order_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    let ctx = request_context(&req);
    let order_id = order_id.into_inner();

    let repo = repo.get_ref().clone();
    let task_ctx = ctx.clone();
    let result =
        run_blocking(move || order_service::get_order(&repo, &task_ctx, &order_id)).await;

    respond(&ctx, StatusCode::OK, result)
}
