use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::types::ProductId;

/// Catalog product as listed by the `products` collection.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: ProductId,
    pub name: String,
    /// Catalog unit price.
    pub price: Decimal,
    /// Units in stock as last reported by the backend.
    #[serde(default, alias = "countInStock")]
    pub stock: u32,
    #[serde(default)]
    pub category: Option<String>,
}
