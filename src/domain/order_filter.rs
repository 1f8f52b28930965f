//! Filter accepted by the order list endpoint.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::order::fields;
use crate::errors::AppResult;
use crate::filter::{FilterBuilder, FilterSpec, string_param, timestamp_param};

pub const CREATED_FROM_PARAM: &str = "createdFrom";
pub const CREATED_TO_PARAM: &str = "createdTo";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderFilter {
    /// Matches orders whose id contains this value.
    pub id: String,
    /// Matches orders whose name contains this value.
    pub name: String,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

impl OrderFilter {
    /// Parses the raw query string. Timestamps are validated first so a
    /// malformed bound rejects the request before anything else happens.
    pub fn from_params(params: &HashMap<String, String>) -> AppResult<Self> {
        let created_from = timestamp_param(params, CREATED_FROM_PARAM)?;
        let created_to = timestamp_param(params, CREATED_TO_PARAM)?;

        Ok(Self {
            id: string_param(params, fields::ID),
            name: string_param(params, fields::NAME),
            created_from,
            created_to,
        })
    }
}

impl FilterSpec for OrderFilter {
    fn apply(&self, builder: FilterBuilder) -> FilterBuilder {
        builder
            .contains(fields::ID, &self.id)
            .contains(fields::NAME, &self.name)
            .range(fields::CREATED, self.created_from, self.created_to)
    }
}
