//! Form definitions backing the salesman portal.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod recovery;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid shopkeeper id")]
    InvalidShopkeeperId,

    #[error("invalid product id")]
    InvalidProductId,

    #[error("invalid amount: {0}")]
    InvalidAmount(TypeConstraintError),

    #[error("invalid quantity: {0}")]
    InvalidQuantity(TypeConstraintError),

    #[error("invalid recovery type: {0}")]
    InvalidRecoveryType(TypeConstraintError),

    #[error("only {available} units of {product} in stock, {requested} requested")]
    InsufficientStock {
        product: String,
        requested: u32,
        available: u32,
    },

    #[error("product {0} is not part of this recovery")]
    UnknownItem(String),

    #[error("a payment-only recovery cannot carry items")]
    ItemsNotAllowed,

    #[error("a recovery with items needs at least one item")]
    ItemsRequired,

    #[error("form belongs to shopkeeper {form}, not {expected}")]
    ShopkeeperMismatch { form: String, expected: String },
}
