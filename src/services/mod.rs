//! Use cases of the order service.

use std::time::Instant;

use crate::context::RequestContext;
use crate::errors::AppResult;

pub mod order;

/// Runs a use case, logging when it starts, how long it took and how it
/// ended.
pub fn execute_use_case<T, F>(ctx: &RequestContext, name: &str, use_case: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T>,
{
    let started = Instant::now();
    log::info!("{ctx} Starting execution of {name}");

    let result = use_case();

    match &result {
        Ok(_) => log::info!(
            "{ctx} Finished execution of {name} in {:?}",
            started.elapsed()
        ),
        Err(err) => log::warn!(
            "{ctx} Execution of {name} failed in {:?}: {err}",
            started.elapsed()
        ),
    }

    result
}
