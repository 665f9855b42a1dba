use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::model::ListingId;
use crate::DEFAULT_API_BASE;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ConfigError {
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Where the listings backend lives. Validated once at construction so the
/// request URL builders stay infallible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    base: String,
}

impl ApiConfig {
    pub fn new(base: impl Into<String>) -> Result<Self, ConfigError> {
        let base = base.into();

        let parsed = Url::parse(&base).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base.clone(),
            reason: e.to_string(),
        })?;

        let scheme = parsed.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(ConfigError::InvalidBaseUrl {
                url: base,
                reason: format!("unsupported scheme '{scheme}'"),
            });
        }

        if parsed.host_str().is_none() {
            return Err(ConfigError::InvalidBaseUrl {
                url: base,
                reason: "missing host".to_string(),
            });
        }

        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    #[must_use]
    pub fn items_url(&self) -> String {
        format!("{}/items", self.base)
    }

    #[must_use]
    pub fn item_url(&self, id: ListingId) -> String {
        format!("{}/items/{id}", self.base)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE).expect("default API base URL is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(ApiConfig::new("http://localhost:3000").is_ok());
        assert!(ApiConfig::new("https://api.example.com").is_ok());
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(ApiConfig::new("ftp://example.com").is_err());
        assert!(ApiConfig::new("file:///etc/passwd").is_err());
        assert!(ApiConfig::new("not a url").is_err());
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let config = ApiConfig::new("http://localhost:3000/").unwrap();
        assert_eq!(config.items_url(), "http://localhost:3000/items");
        assert_eq!(config.item_url(ListingId(9)), "http://localhost:3000/items/9");
    }

    #[test]
    fn default_points_at_the_local_backend() {
        assert_eq!(ApiConfig::default().base(), DEFAULT_API_BASE);
    }
}
