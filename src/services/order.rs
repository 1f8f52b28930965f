use validator::Validate;

use crate::context::RequestContext;
use crate::domain::order::Order;
use crate::dto::order::ListOrdersQuery;
use crate::errors::{AppError, AppResult};
use crate::filter::FilterSpec;
use crate::forms::order::CreateOrderForm;
use crate::pagination::PaginatedResult;
use crate::repository::{OrderReader, OrderWriter, QueryExecutor};
use crate::services::execute_use_case;

/// Fetches a single order by its identifier.
pub fn get_order<R>(repo: &R, ctx: &RequestContext, id: &str) -> AppResult<Order>
where
    R: OrderReader + ?Sized,
{
    execute_use_case(ctx, "get_order", || {
        if id.is_empty() {
            return Err(AppError::invalid_request_parameter(
                "id can not be empty",
                "id",
            ));
        }

        repo.get_order_by_id(id)
            .map_err(|err| {
                AppError::internal_server_error("Unexpected error when querying order")
                    .caused_by(err)
            })?
            .ok_or_else(|| AppError::entity_not_found("Order not found", "id", id))
    })
}

/// Returns the requested page of orders matching the filter.
pub fn list_orders<R>(
    repo: &R,
    ctx: &RequestContext,
    query: ListOrdersQuery,
) -> AppResult<PaginatedResult<Order>>
where
    R: QueryExecutor<Order> + ?Sized,
{
    execute_use_case(ctx, "list_orders", || {
        let descriptor = query.filter.to_query(query.page);
        log::debug!("{ctx} Order query: {descriptor:?}");

        let (total, items) = repo.execute(&descriptor).map_err(|err| {
            AppError::internal_server_error("Failed to list orders").caused_by(err)
        })?;
        log::debug!(
            "{ctx} Listed {} of {total} orders (skip {}, sort {} {:?})",
            items.len(),
            descriptor.page().skip(),
            descriptor.page().sort_field(),
            descriptor.page().sort_direction()
        );

        PaginatedResult::from_page(items, total as u64, descriptor.page())
    })
}

/// Validates the form and persists a new order.
pub fn create_order<R>(repo: &R, ctx: &RequestContext, form: CreateOrderForm) -> AppResult<Order>
where
    R: OrderWriter + ?Sized,
{
    execute_use_case(ctx, "create_order", || {
        form.validate()?;

        let new_order = form.into_new_order();
        log::info!("{ctx} Saving order {}", new_order.id);

        Ok(repo.save_order(&new_order)?)
    })
}
