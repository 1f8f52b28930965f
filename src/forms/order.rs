use serde::Deserialize;
use validator::Validate;

use crate::domain::order::NewOrder;

#[derive(Debug, Default, Deserialize, Validate)]
/// Payload accepted by `POST /orders`.
pub struct CreateOrderForm {
    /// Client supplied id; generated when missing or blank.
    #[serde(default)]
    #[validate(length(max = 64))]
    pub id: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub name: String,
}

impl CreateOrderForm {
    pub fn into_new_order(self) -> NewOrder {
        NewOrder::new(self.id, self.name)
    }
}
