//! Client configuration.

use std::time::Duration;

use url::Url;

use crate::error::ApiError;

/// Default per-request deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_USER_AGENT: &str = "Ascend/0.1.0";

/// Configuration for an [`crate::ApiClient`] instance.
///
/// Constructed once at process start and handed to the client; there is
/// no hidden global configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Url,
    timeout: Duration,
    user_agent: String,
}

impl ClientConfig {
    /// Creates a configuration for the given backend base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if the base URL cannot be parsed.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::InvalidRequest {
            message: format!("invalid base URL `{base_url}`: {e}"),
        })?;

        Ok(Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    /// Sets the per-request deadline.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the `User-Agent` announced by the transport.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// The backend base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The per-request deadline.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The configured user agent.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Resolves a backend path against the base URL.
    ///
    /// Redundant slashes on either side of the join are tolerated.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if the joined URL is invalid.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|e| ApiError::InvalidRequest {
            message: format!("invalid request path `{path}`: {e}"),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("https://api.example.com").unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.user_agent(), "Ascend/0.1.0");
    }

    #[test]
    fn test_endpoint_joins_slashes() {
        let config = ClientConfig::new("https://api.example.com/").unwrap();
        let url = config.endpoint("/api/v1/user/profile").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/v1/user/profile");

        let url = config.endpoint("api/v1/user/profile").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/v1/user/profile");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = ClientConfig::new("not a url");
        assert!(matches!(result, Err(ApiError::InvalidRequest { .. })));
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::new("https://api.example.com")
            .unwrap()
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("AscendMobile/2.3");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.user_agent(), "AscendMobile/2.3");
    }
}
