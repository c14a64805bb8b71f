use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::types::ShopkeeperId;

/// Retail shop account served by the salesmen.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Shopkeeper {
    #[serde(alias = "_id")]
    pub id: ShopkeeperId,
    pub name: String,
    #[serde(default)]
    pub shop_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Outstanding balance owed to the business.
    #[serde(default)]
    pub pending_amount: Decimal,
}
