//! DTOs exchanged between the order routes and services.

use crate::domain::order_filter::OrderFilter;
use crate::pagination::PageSpec;

/// Parsed input of the order list use case.
#[derive(Clone, Debug, Default)]
pub struct ListOrdersQuery {
    pub filter: OrderFilter,
    pub page: PageSpec,
}
