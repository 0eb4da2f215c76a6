use thiserror::Error;

/// Errors that can occur while fetching search or recipe pages
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Failed to fetch a page
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Request to {url} failed with status {status}")]
    HttpStatus { status: u16, url: String },

    /// A base URL or recipe link could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
