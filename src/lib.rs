//! Client-side core of the snack distribution portals: list-view
//! pagination against the REST backend and salesman recovery bookkeeping.

pub mod domain;
pub mod dto;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod services;
pub mod source;

/// Collection paths of the REST backend used by the list views.
pub mod collections {
    pub const PRODUCTS: &str = "products";
    pub const CATEGORIES: &str = "categories";
    pub const USERS: &str = "users";
    pub const ORDERS: &str = "orders";
    pub const RECOVERIES: &str = "recoveries";
    pub const SHOPKEEPER_ORDERS: &str = "shopkeeper-orders";
}
