use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::client::RecipeClient;
use crate::config::RecipeConfig;
use crate::error::RecipeError;
use crate::fetchers::{PageFetcher, RequestFetcher};

/// Builder for [`RecipeClient`]
#[derive(Default)]
pub struct RecipeClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    fetcher: Option<Arc<dyn PageFetcher>>,
}

impl RecipeClientBuilder {
    /// Take base URL, timeout and user agent from a loaded configuration
    pub fn config(mut self, config: &RecipeConfig) -> Self {
        self.base_url = Some(config.base_url.clone());
        self.timeout = Some(Duration::from_secs(config.timeout));
        self.user_agent = Some(config.user_agent.clone());
        self
    }

    /// Set the site root used for searches and relative links
    ///
    /// # Example
    /// ```
    /// use recipe_for::RecipeClient;
    ///
    /// let builder = RecipeClient::builder()
    ///     .base_url("http://localhost:8080/");
    /// ```
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use recipe_for::RecipeClient;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeClient::builder()
    ///     .timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use a custom page fetcher instead of the default HTTP client.
    /// Timeout and user agent are ignored in that case.
    pub fn fetcher(mut self, fetcher: Arc<dyn PageFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn build(self) -> Result<RecipeClient, RecipeError> {
        let defaults = RecipeConfig::default();
        let base_url = self.base_url.unwrap_or(defaults.base_url);
        let base_url = Url::parse(&base_url)
            .map_err(|e| RecipeError::BuilderError(format!("invalid base URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(RecipeError::BuilderError(format!(
                "{base_url} cannot be used as a base URL"
            )));
        }

        let fetcher = match self.fetcher {
            Some(fetcher) => fetcher,
            None => {
                let user_agent = self.user_agent.unwrap_or(defaults.user_agent);
                Arc::new(RequestFetcher::new(self.timeout, &user_agent)?)
            }
        };

        Ok(RecipeClient::new(fetcher, base_url))
    }
}
