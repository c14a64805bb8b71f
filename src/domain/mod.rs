//! Domain aggregates handled by the distribution portals.

pub mod product;
pub mod recovery;
pub mod shopkeeper;
pub mod types;
pub mod user;
