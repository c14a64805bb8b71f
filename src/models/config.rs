//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::pagination::{DEFAULT_PAGE_SIZE, PAGE_SIZE_PRESETS};

fn default_timeout() -> u64 {
    30
}

#[derive(Clone, Debug, Deserialize)]
/// Settings for talking to the distribution backend.
pub struct ClientConfig {
    /// Base URL of the REST API, e.g. `https://shop.example.com/api`.
    pub api_base_url: String,
    /// Bearer token attached to every request when set.
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default)]
    pub default_page_size: Option<usize>,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Configured page size when it is one of the selector presets,
    /// otherwise the default.
    pub fn page_size(&self) -> usize {
        match self.default_page_size {
            Some(size) if PAGE_SIZE_PRESETS.contains(&size) => size,
            Some(size) => {
                log::warn!("page size {size} is not a preset; using {DEFAULT_PAGE_SIZE}");
                DEFAULT_PAGE_SIZE
            }
            None => DEFAULT_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_optional_settings_use_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"api_base_url":"http://localhost/api"}"#).unwrap();

        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.api_token, None);
        assert_eq!(config.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn page_size_accepts_presets_only() {
        let mut config: ClientConfig =
            serde_json::from_str(r#"{"api_base_url":"x","default_page_size":50}"#).unwrap();
        assert_eq!(config.page_size(), 50);

        config.default_page_size = Some(37);
        assert_eq!(config.page_size(), DEFAULT_PAGE_SIZE);
    }
}
