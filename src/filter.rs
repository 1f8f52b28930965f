//! Translation of loosely-typed filter parameters into a query descriptor.
//!
//! Entity filters implement [`FilterSpec`] and describe their predicates to a
//! [`FilterBuilder`]. Empty values never produce a predicate, so an absent
//! filter never turns into a match-everything constraint.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};

use crate::errors::{AppError, AppResult};
use crate::pagination::PageSpec;

/// Validation rule reported when a timestamp parameter cannot be parsed.
pub const RFC3339_RULE: &str = "RFC3339 timestamp";

/// Persistence-neutral constraint on a single field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Predicate {
    Equals(String),
    Contains(String),
    /// Inclusive bounds; at least one of them is set.
    Range {
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    },
}

/// Everything a [`crate::repository::QueryExecutor`] needs to run a list
/// query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryDescriptor {
    predicates: BTreeMap<String, Predicate>,
    page: PageSpec,
}

impl QueryDescriptor {
    pub fn predicates(&self) -> &BTreeMap<String, Predicate> {
        &self.predicates
    }

    pub fn predicate(&self, field: &str) -> Option<&Predicate> {
        self.predicates.get(field)
    }

    pub fn page(&self) -> &PageSpec {
        &self.page
    }
}

#[derive(Debug, Default)]
pub struct FilterBuilder {
    predicates: BTreeMap<String, Predicate>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact match on `field`, skipped when `value` is empty.
    pub fn equals(mut self, field: impl Into<String>, value: &str) -> Self {
        if !value.is_empty() {
            self.predicates
                .insert(field.into(), Predicate::Equals(value.to_string()));
        }
        self
    }

    /// Substring match on `field`, skipped when `value` is empty.
    pub fn contains(mut self, field: impl Into<String>, value: &str) -> Self {
        if !value.is_empty() {
            self.predicates
                .insert(field.into(), Predicate::Contains(value.to_string()));
        }
        self
    }

    /// Closed or one-sided time range, skipped when both bounds are absent.
    pub fn range(
        mut self,
        field: impl Into<String>,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        if from.is_some() || to.is_some() {
            self.predicates
                .insert(field.into(), Predicate::Range { from, to });
        }
        self
    }

    pub fn build(self, page: PageSpec) -> QueryDescriptor {
        QueryDescriptor {
            predicates: self.predicates,
            page,
        }
    }
}

/// A validated set of optional predicates over one entity's fields.
pub trait FilterSpec {
    fn apply(&self, builder: FilterBuilder) -> FilterBuilder;

    fn to_query(&self, page: PageSpec) -> QueryDescriptor {
        self.apply(FilterBuilder::new()).build(page)
    }
}

/// Returns the raw value of a query parameter or an empty string.
pub fn string_param(params: &HashMap<String, String>, name: &str) -> String {
    params.get(name).cloned().unwrap_or_default()
}

/// Parses an optional RFC3339 timestamp parameter.
pub fn timestamp_param(
    params: &HashMap<String, String>,
    name: &str,
) -> AppResult<Option<DateTime<Utc>>> {
    let raw = match params.get(name) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(None),
    };

    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| Some(parsed.with_timezone(&Utc)))
        .map_err(|err| {
            AppError::invalid_request_parameter_with_rule(
                format!("Failed to parse query parameter {name} with value '{raw}'"),
                name,
                RFC3339_RULE,
            )
            .caused_by(err)
        })
}
