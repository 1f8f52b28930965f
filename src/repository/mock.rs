//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::order::{NewOrder, Order};
use crate::filter::QueryDescriptor;
use crate::repository::errors::RepositoryResult;
use crate::repository::{OrderReader, OrderWriter, QueryExecutor};

mock! {
    pub Repository {}

    impl QueryExecutor<Order> for Repository {
        fn execute(&self, query: &QueryDescriptor) -> RepositoryResult<(usize, Vec<Order>)>;
    }

    impl OrderReader for Repository {
        fn get_order_by_id(&self, id: &str) -> RepositoryResult<Option<Order>>;
    }

    impl OrderWriter for Repository {
        fn save_order(&self, order: &NewOrder) -> RepositoryResult<Order>;
    }
}
