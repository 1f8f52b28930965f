//! Repository implementation for orders.

use chrono::{DateTime, Utc};
use diesel::define_sql_function;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Integer, Text};
use diesel::sqlite::Sqlite;
use diesel::upsert::excluded;

use crate::{
    domain::order::{NewOrder, Order, fields},
    filter::{Predicate, QueryDescriptor},
    models::order::{NewOrder as DbNewOrder, Order as DbOrder},
    pagination::{PageSpec, SortDirection},
    repository::{
        DieselRepository, OrderReader, OrderWriter, QueryExecutor,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::orders,
};

type OrderPredicate = Box<dyn BoxableExpression<orders::table, Sqlite, SqlType = Bool>>;

define_sql_function! {
    /// 1-based position of `needle` in `haystack`, 0 when absent. Compares
    /// bytes, so matching is case-sensitive and has no wildcards.
    fn instr(haystack: Text, needle: Text) -> Integer;
}

fn created_range(
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> RepositoryResult<OrderPredicate> {
    match (from, to) {
        (Some(from), Some(to)) => Ok(Box::new(
            orders::created
                .ge(from.naive_utc())
                .and(orders::created.le(to.naive_utc())),
        )),
        (Some(from), None) => Ok(Box::new(orders::created.ge(from.naive_utc()))),
        (None, Some(to)) => Ok(Box::new(orders::created.le(to.naive_utc()))),
        (None, None) => Err(RepositoryError::ValidationError(
            "Range predicate without bounds".to_string(),
        )),
    }
}

fn order_predicate(field: &str, predicate: &Predicate) -> RepositoryResult<OrderPredicate> {
    let expression: OrderPredicate = match (field, predicate) {
        (fields::ID, Predicate::Equals(value)) => Box::new(orders::id.eq(value.clone())),
        (fields::ID, Predicate::Contains(value)) => {
            Box::new(instr(orders::id, value.clone()).gt(0))
        }
        (fields::NAME, Predicate::Equals(value)) => Box::new(orders::name.eq(value.clone())),
        (fields::NAME, Predicate::Contains(value)) => {
            Box::new(instr(orders::name, value.clone()).gt(0))
        }
        (fields::CREATED, Predicate::Range { from, to }) => created_range(*from, *to)?,
        _ => {
            return Err(RepositoryError::ValidationError(format!(
                "Unsupported predicate on field {field}: {predicate:?}"
            )));
        }
    };
    Ok(expression)
}

/// Orders by the requested field, falling back to the primary key for
/// unknown fields. Ties are always broken by id so pages are stable.
fn sorted(
    query: orders::BoxedQuery<'static, Sqlite>,
    page: &PageSpec,
) -> orders::BoxedQuery<'static, Sqlite> {
    let desc = page.sort_direction() == SortDirection::Desc;
    let query = match (page.sort_field(), desc) {
        (fields::NAME, false) => query.order(orders::name.asc()),
        (fields::NAME, true) => query.order(orders::name.desc()),
        (fields::VERSION, false) => query.order(orders::version.asc()),
        (fields::VERSION, true) => query.order(orders::version.desc()),
        (fields::CREATED, false) => query.order(orders::created.asc()),
        (fields::CREATED, true) => query.order(orders::created.desc()),
        (_, false) => return query.order(orders::id.asc()),
        (_, true) => return query.order(orders::id.desc()),
    };
    query.then_order_by(orders::id.asc())
}

fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl QueryExecutor<Order> for DieselRepository {
    fn execute(&self, query: &QueryDescriptor) -> RepositoryResult<(usize, Vec<Order>)> {
        let mut conn = self.conn()?;
        let page = query.page();

        let mut count_query = orders::table.count().into_boxed();
        let mut items_query = orders::table.into_boxed();
        for (field, predicate) in query.predicates() {
            count_query = count_query.filter(order_predicate(field, predicate)?);
            items_query = items_query.filter(order_predicate(field, predicate)?);
        }

        let total: i64 = count_query.get_result(&mut conn)?;

        let items = sorted(items_query, page)
            .offset(to_sql_int(page.skip()))
            .limit(to_sql_int(page.page_size()))
            .load::<DbOrder>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect::<Vec<Order>>();

        Ok((usize::try_from(total).unwrap_or_default(), items))
    }
}

impl OrderReader for DieselRepository {
    fn get_order_by_id(&self, id: &str) -> RepositoryResult<Option<Order>> {
        let mut conn = self.conn()?;

        let order = orders::table
            .find(id)
            .first::<DbOrder>(&mut conn)
            .optional()?;

        Ok(order.map(Into::into))
    }
}

impl OrderWriter for DieselRepository {
    fn save_order(&self, order: &NewOrder) -> RepositoryResult<Order> {
        let mut conn = self.conn()?;

        let db_new_order: DbNewOrder = order.into();

        let saved = diesel::insert_into(orders::table)
            .values(&db_new_order)
            .on_conflict(orders::id)
            .do_update()
            .set((
                orders::name.eq(excluded(orders::name)),
                orders::version.eq(orders::version + 1),
            ))
            .get_result::<DbOrder>(&mut conn)?;

        Ok(saved.into())
    }
}
