use std::sync::Arc;

use log::debug;
use url::Url;

use crate::builder::RecipeClientBuilder;
use crate::error::RecipeError;
use crate::extractors::{Extractor, JsonLdExtractor, ParsingContext, SearchResultExtractor};
use crate::fetchers::PageFetcher;
use crate::model::{ParsedRecipe, RecipeSummary, SearchType};

/// Searches the recipe site and loads detail pages
#[derive(Clone)]
pub struct RecipeClient {
    fetcher: Arc<dyn PageFetcher>,
    base_url: Url,
}

impl RecipeClient {
    /// Create a new builder
    ///
    /// # Example
    /// ```
    /// use recipe_for::RecipeClient;
    ///
    /// let client = RecipeClient::builder()
    ///     .base_url("https://foodle.recipes/")
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn builder() -> RecipeClientBuilder {
        RecipeClientBuilder::default()
    }

    pub fn new(fetcher: Arc<dyn PageFetcher>, base_url: Url) -> Self {
        Self { fetcher, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base_url}?f={t|i}&q={text}`
    pub fn search_url(&self, search_type: SearchType, text: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("f", search_type.as_str())
            .append_pair("q", text);
        url
    }

    /// Resolve a possibly site-relative recipe link
    pub fn resolve(&self, href: &str) -> Result<Url, RecipeError> {
        Ok(self.base_url.join(href)?)
    }

    pub async fn fetch_search_page(
        &self,
        search_type: SearchType,
        text: &str,
    ) -> Result<String, RecipeError> {
        let url = self.search_url(search_type, text);
        self.fetcher.fetch(url.as_str()).await
    }

    pub async fn fetch_recipe_page(&self, summary: &RecipeSummary) -> Result<String, RecipeError> {
        let url = self.resolve(&summary.url)?;
        self.fetcher.fetch(url.as_str()).await
    }

    /// Parse a search-results page fetched from this site
    pub fn parse_search(&self, html: &str) -> Vec<RecipeSummary> {
        let context = ParsingContext::new(self.base_url.clone(), html);
        SearchResultExtractor.parse(&context)
    }

    /// Extract the embedded recipe from a detail page
    pub fn parse_recipe(&self, page_url: &str, html: &str) -> Option<ParsedRecipe> {
        let url = self
            .resolve(page_url)
            .unwrap_or_else(|_| self.base_url.clone());
        let context = ParsingContext::new(url, html);
        JsonLdExtractor.parse(&context)
    }

    pub async fn search(
        &self,
        search_type: SearchType,
        text: &str,
    ) -> Result<Vec<RecipeSummary>, RecipeError> {
        let html = self.fetch_search_page(search_type, text).await?;
        let summaries = self.parse_search(&html);
        debug!("Search for {text:?} returned {} recipes", summaries.len());
        Ok(summaries)
    }

    /// Fetch the recipe page behind `summary`. `Ok(None)` means the page has
    /// no usable structured data.
    pub async fn recipe(
        &self,
        summary: &RecipeSummary,
    ) -> Result<Option<ParsedRecipe>, RecipeError> {
        let html = self.fetch_recipe_page(summary).await?;
        Ok(self.parse_recipe(&summary.url, &html))
    }
}
