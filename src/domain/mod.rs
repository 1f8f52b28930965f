//! Domain aggregates exposed by the order service layer.

pub mod order;
pub mod order_filter;
