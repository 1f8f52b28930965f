use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::order::{NewOrder as DomainNewOrder, Order as DomainOrder};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::orders)]
/// Diesel model for [`crate::domain::order::Order`].
pub struct Order {
    pub id: String,
    pub name: String,
    pub version: i32,
    pub created: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::orders)]
/// Insertable form of [`Order`].
pub struct NewOrder<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub version: i32,
    pub created: NaiveDateTime,
}

impl From<Order> for DomainOrder {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            name: order.name,
            version: order.version,
            created: order.created.and_utc(),
        }
    }
}

impl<'a> From<&'a DomainNewOrder> for NewOrder<'a> {
    fn from(order: &'a DomainNewOrder) -> Self {
        Self {
            id: order.id.as_str(),
            name: order.name.as_str(),
            version: order.version,
            created: order.created.naive_utc(),
        }
    }
}
