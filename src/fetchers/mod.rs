mod request;

pub use request::RequestFetcher;

use crate::error::RecipeError;
use async_trait::async_trait;

/// Source of raw page bodies
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return the response body as text
    async fn fetch(&self, url: &str) -> Result<String, RecipeError>;
}
