//! Page sources: where list views get their records from.

use std::future::Future;

use serde_json::Value;
use thiserror::Error;

use crate::pagination::PageParams;

#[cfg(feature = "client")]
pub mod http;

/// Why a page could not be loaded.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// No response was received.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The backend answered with an error status.
    #[error("backend returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The body did not contain a recognisable collection.
    #[error("unexpected response shape: {0}")]
    Shape(String),
}

/// Fetches one page of a collection.
///
/// Implementations return the raw JSON body; shape normalization happens in
/// the controller.
pub trait PageSource {
    fn fetch(&self, params: &PageParams) -> impl Future<Output = Result<Value, FetchError>>;
}

/// Any `Fn(&PageParams) -> impl Future` works as a source, which keeps
/// one-off fetch functions free of boilerplate.
impl<F, Fut> PageSource for F
where
    F: Fn(&PageParams) -> Fut,
    Fut: Future<Output = Result<Value, FetchError>>,
{
    fn fetch(&self, params: &PageParams) -> impl Future<Output = Result<Value, FetchError>> {
        self(params)
    }
}
