//! Data transfer objects exchanged with the backend and the views.

pub mod recovery;
pub mod reports;
