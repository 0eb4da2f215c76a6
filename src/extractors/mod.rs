use scraper::Html;
use url::Url;

mod json_ld;
mod search_results;

pub use json_ld::{normalize_recipe, JsonLdExtractor};
pub use search_results::SearchResultExtractor;

pub struct ParsingContext {
    /// Page URL for detail pages, site base URL for search results.
    /// Relative links and images are resolved against it.
    pub url: Url,
    pub document: Html,
}

impl ParsingContext {
    pub fn new(url: Url, html: &str) -> Self {
        Self {
            url,
            document: Html::parse_document(html),
        }
    }
}

pub trait Extractor {
    type Output;

    fn parse(&self, context: &ParsingContext) -> Self::Output;
}
