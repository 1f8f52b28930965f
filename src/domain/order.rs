use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Field names understood by order filters and sorting.
pub mod fields {
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const VERSION: &str = "version";
    pub const CREATED: &str = "created";
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    pub id: String,
    pub name: String,
    pub version: i32,
    pub created: DateTime<Utc>,
}

impl Order {
    pub const PRIMARY_KEY: &'static str = fields::ID;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewOrder {
    pub id: String,
    pub name: String,
    pub version: i32,
    pub created: DateTime<Utc>,
}

impl NewOrder {
    /// Starts a new order at version 1. An empty `id` is replaced by a
    /// random UUID.
    #[must_use]
    pub fn new(id: Option<String>, name: String) -> Self {
        let id = id
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Self {
            id,
            name,
            version: 1,
            created: Utc::now(),
        }
    }
}
