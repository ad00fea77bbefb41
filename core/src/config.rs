//! Client configuration.
//!
//! The API base URL is injected into `ProductClient` rather than compiled
//! into the call sites. The binary resolves the URL from its `--api-url` flag,
//! which falls back to `PRODUCTOS_API_URL` and then `DEFAULT_BASE_URL`.

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Environment variable name for overriding the base URL.
pub const BASE_URL_ENV_VAR: &str = "PRODUCTOS_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_localhost() {
        assert_eq!(ClientConfig::default().base_url, "http://localhost:3000");
    }
}
