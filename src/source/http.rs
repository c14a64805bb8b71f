//! REST collection endpoints reached over HTTP.

use std::fmt;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;

use crate::models::config::ClientConfig;
use crate::pagination::PageParams;
use crate::source::{FetchError, PageSource};

/// Page source backed by one collection endpoint of the REST backend.
///
/// Credentials are attached here and nowhere else: every request built by
/// [`HttpSource::build_request`] carries the configured bearer token.
#[derive(Clone)]
pub struct HttpSource {
    http: Client,
    endpoint: Url,
    token: Option<String>,
}

impl fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpSource")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl HttpSource {
    /// Creates a source for `collection` (e.g. `"recoveries"` or
    /// `"shopkeeper/orders"`) relative to the configured API base URL.
    pub fn new(config: &ClientConfig, collection: &str) -> Result<Self, FetchError> {
        let mut base = config.api_base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let endpoint = Url::parse(&base)
            .and_then(|base| base.join(collection.trim().trim_start_matches('/')))
            .map_err(|e| FetchError::Transport(format!("invalid endpoint for {collection}: {e}")))?;

        let http = Client::builder()
            .user_agent(concat!("snackdist/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| FetchError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint,
            token: config
                .api_token
                .as_ref()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn build_request(&self, params: &PageParams) -> RequestBuilder {
        let request = self
            .http
            .get(self.endpoint.clone())
            .query(&params.query_pairs());

        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

impl PageSource for HttpSource {
    async fn fetch(&self, params: &PageParams) -> Result<Value, FetchError> {
        let response = self
            .build_request(params)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Shape(format!("body is not JSON: {e}")))
    }
}

/// Pulls the human-readable message out of an error body, which the backend
/// sends as `{"message": "..."}` (or `{"error": "..."}`) when it can.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "error"]
                .iter()
                .find_map(|key| value.get(*key).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}
