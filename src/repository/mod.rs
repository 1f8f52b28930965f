use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::order::{NewOrder, Order},
    filter::QueryDescriptor,
    repository::errors::RepositoryResult,
};

pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod order;

/// Diesel-backed repository sharing a SQLite connection pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

/// Runs a list query described by a [`QueryDescriptor`].
///
/// Returns the number of records matching the predicates, ignoring paging,
/// together with the requested page of records.
pub trait QueryExecutor<T> {
    fn execute(&self, query: &QueryDescriptor) -> RepositoryResult<(usize, Vec<T>)>;
}

pub trait OrderReader {
    fn get_order_by_id(&self, id: &str) -> RepositoryResult<Option<Order>>;
}

pub trait OrderWriter {
    /// Inserts the order or replaces the name of an existing one, bumping
    /// its version.
    fn save_order(&self, order: &NewOrder) -> RepositoryResult<Order>;
}
