use super::{Extractor, ParsingContext};
use crate::model::{RecipeSummary, SummaryImage};
use log::debug;
use regex::Regex;
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

pub struct SearchResultExtractor;

static BACKGROUND_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"background-image:\s*url\(['"]?(.*?)['"]?\)"#)
        .expect("Invalid background-image regex")
});

struct Selectors {
    results: Selector,
    anchor: Selector,
    heading: Selector,
    cite: Selector,
    time: Selector,
    thumbnail: Selector,
}

impl Selectors {
    fn new() -> Option<Self> {
        Some(Self {
            results: Selector::parse("#results").ok()?,
            anchor: Selector::parse("a").ok()?,
            heading: Selector::parse("h2").ok()?,
            cite: Selector::parse("cite").ok()?,
            time: Selector::parse("time").ok()?,
            thumbnail: Selector::parse("div.img").ok()?,
        })
    }
}

fn trimmed_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn first_text(root: ElementRef, selector: &Selector) -> Option<String> {
    root.select(selector).next().map(trimmed_text)
}

impl SearchResultExtractor {
    fn thumbnail(
        &self,
        anchor: ElementRef,
        selectors: &Selectors,
        context: &ParsingContext,
    ) -> SummaryImage {
        let style = anchor
            .select(&selectors.thumbnail)
            .next()
            .and_then(|div| div.value().attr("style"));

        let Some(path) = style
            .and_then(|css| BACKGROUND_IMAGE.captures(css))
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str())
        else {
            return SummaryImage::Document;
        };

        match context.url.join(path) {
            Ok(url) => SummaryImage::Thumbnail(url.to_string()),
            Err(e) => {
                debug!("SearchResultExtractor: unusable thumbnail {path}: {e}");
                SummaryImage::Document
            }
        }
    }

    fn summary(
        &self,
        anchor: ElementRef,
        selectors: &Selectors,
        context: &ParsingContext,
    ) -> Option<RecipeSummary> {
        let name = first_text(anchor, &selectors.heading)
            .filter(|heading| !heading.is_empty())
            .unwrap_or_else(|| trimmed_text(anchor));
        if name.is_empty() {
            return None;
        }

        Some(RecipeSummary {
            name,
            url: anchor.value().attr("href").unwrap_or_default().to_string(),
            source: first_text(anchor, &selectors.cite).unwrap_or_default(),
            time: first_text(anchor, &selectors.time).filter(|time| !time.is_empty()),
            image: self.thumbnail(anchor, selectors, context),
        })
    }
}

impl Extractor for SearchResultExtractor {
    type Output = Vec<RecipeSummary>;

    fn parse(&self, context: &ParsingContext) -> Vec<RecipeSummary> {
        let Some(selectors) = Selectors::new() else {
            return Vec::new();
        };

        let Some(results) = context.document.select(&selectors.results).next() else {
            debug!("SearchResultExtractor: no results container");
            return Vec::new();
        };

        let summaries: Vec<RecipeSummary> = results
            .select(&selectors.anchor)
            .filter_map(|anchor| self.summary(anchor, &selectors, context))
            .collect();
        debug!("SearchResultExtractor: {} summaries", summaries.len());
        summaries
    }
}
