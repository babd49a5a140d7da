use std::time::Duration;

use storico_core::StoricoError;

use crate::{DEFAULT_BASE_URL, FredConnector};

/// Configures and constructs a [`FredConnector`].
///
/// ```no_run
/// use storico_fred::FredConnector;
///
/// let fred = FredConnector::builder()
///     .api_key(std::env::var("FRED_API_KEY").unwrap())
///     .timeout(std::time::Duration::from_secs(10))
///     .build()
///     .unwrap();
/// # let _ = fred;
/// ```
#[derive(Debug, Clone, Default)]
pub struct FredBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl FredBuilder {
    /// Start with nothing configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the FRED API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the API root, mainly for pointing tests at a local server.
    /// A trailing slash is trimmed.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Bound every request with a client-side timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validate the configuration and construct the connector.
    ///
    /// # Errors
    /// `InvalidArg` if the API key is missing or empty, or if the HTTP
    /// client cannot be constructed.
    pub fn build(self) -> Result<FredConnector, StoricoError> {
        let api_key = self
            .api_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| StoricoError::InvalidArg("FRED API key is required".into()))?;
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();

        let mut client = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            client = client.timeout(timeout);
        }
        let client = client
            .build()
            .map_err(|e| StoricoError::InvalidArg(format!("http client: {e}")))?;

        Ok(FredConnector::from_parts(
            client,
            base_url,
            api_key,
            self.timeout,
        ))
    }
}
