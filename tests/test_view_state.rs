use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use recipe_for::fetchers::PageFetcher;
use recipe_for::render::FALLBACK_NOTICE;
use recipe_for::{
    Attribute, DetailState, DetailView, RecipeClient, RecipeError, RecipeSummary, SearchType,
    SearchView, SummaryImage,
};

/// Serves fixed pages by URL
struct StaticFetcher {
    pages: HashMap<String, String>,
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String, RecipeError> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| RecipeError::HttpStatus {
                status: 404,
                url: url.to_string(),
            })
    }
}

fn recipe_page(name: &str) -> String {
    format!(
        r#"<html><head><script type="application/ld+json">
        {{"@type": "Recipe", "name": "{name}", "author": {{"name": "Jane"}}, "totalTime": "PT1H"}}
        </script></head></html>"#
    )
}

fn client() -> RecipeClient {
    let mut pages = HashMap::new();
    pages.insert(
        "https://foodle.recipes/r/soup".to_string(),
        recipe_page("Tomato Soup"),
    );
    pages.insert(
        "https://foodle.recipes/r/plain".to_string(),
        "<html><body>No structured data</body></html>".to_string(),
    );
    pages.insert(
        "https://foodle.recipes/?f=t&q=soup".to_string(),
        r#"<div id="results"><a href="/r/soup"><h2>Tomato Soup</h2></a></div>"#.to_string(),
    );
    RecipeClient::builder()
        .fetcher(Arc::new(StaticFetcher { pages }))
        .build()
        .unwrap()
}

fn summary(url: &str) -> RecipeSummary {
    RecipeSummary {
        name: "Soup".to_string(),
        url: url.to_string(),
        source: String::new(),
        time: None,
        image: SummaryImage::Document,
    }
}

fn not_found() -> RecipeError {
    RecipeError::HttpStatus {
        status: 404,
        url: "https://foodle.recipes/r/missing".to_string(),
    }
}

#[tokio::test]
async fn test_detail_load_extracts_once() {
    let client = client();
    let mut view = DetailView::new(summary("/r/soup"));
    assert_eq!(view.state(), &DetailState::Idle);

    assert!(view.load(&client).await);

    match view.state() {
        DetailState::Extracted(recipe) => assert_eq!(recipe.name, "Tomato Soup"),
        other => panic!("Expected extracted recipe, got {other:?}"),
    }
    let rendered = view.render();
    assert!(!rendered.is_loading);
    assert_eq!(rendered.navigation_title, "Soup");
    assert_eq!(rendered.attributes[0], Attribute::label("Author", "Jane"));
}

#[tokio::test]
async fn test_page_without_recipe_falls_back() {
    let client = client();
    let mut view = DetailView::new(summary("/r/plain"));
    view.load(&client).await;

    assert_eq!(view.state(), &DetailState::Fallback);
    let rendered = view.render();
    assert!(rendered.markdown.contains(FALLBACK_NOTICE));
    assert!(rendered.attributes.is_empty());
    assert!(view.take_notice().is_none());
}

#[test]
fn test_superseded_detail_result_is_ignored() {
    let client = client();
    let mut view = DetailView::new(summary("/r/soup"));

    let stale = view.begin_fetch();
    let fresh = view.begin_fetch();
    assert!(view.is_loading());

    assert!(view.complete(fresh, Ok("<html></html>".to_string()), &client));
    assert_eq!(view.state(), &DetailState::Fallback);

    assert!(!view.complete(stale, Ok(recipe_page("Late Soup")), &client));
    assert_eq!(view.state(), &DetailState::Fallback);
}

#[test]
fn test_selecting_new_recipe_invalidates_in_flight_fetch() {
    let client = client();
    let mut view = DetailView::new(summary("/r/soup"));

    let ticket = view.begin_fetch();
    view.select(summary("/r/plain"));

    assert!(!view.complete(ticket, Ok(recipe_page("Tomato Soup")), &client));
    assert_eq!(view.state(), &DetailState::Idle);
    assert_eq!(view.summary().url, "/r/plain");
}

#[test]
fn test_previous_recipe_stays_visible_while_refetching() {
    let client = client();
    let mut view = DetailView::new(summary("/r/soup"));

    let first = view.begin_fetch();
    view.complete(first, Ok(recipe_page("Tomato Soup")), &client);

    let _second = view.begin_fetch();
    assert!(view.is_loading());
    assert_eq!(view.recipe().map(|r| r.name.as_str()), Some("Tomato Soup"));
    assert!(view.render().is_loading);
}

#[test]
fn test_network_error_keeps_previous_record_and_sets_notice() {
    let client = client();
    let mut view = DetailView::new(summary("/r/soup"));

    let first = view.begin_fetch();
    view.complete(first, Ok(recipe_page("Tomato Soup")), &client);

    let second = view.begin_fetch();
    assert!(view.complete(second, Err(not_found()), &client));

    assert!(matches!(view.state(), DetailState::Extracted(_)));
    let notice = view.take_notice().unwrap();
    assert!(notice.contains("404"));
    assert!(view.take_notice().is_none());
}

#[test]
fn test_network_error_without_data_falls_back() {
    let client = client();
    let mut view = DetailView::new(summary("/r/missing"));

    let ticket = view.begin_fetch();
    view.complete(ticket, Err(not_found()), &client);

    assert_eq!(view.state(), &DetailState::Fallback);
    assert!(view.take_notice().is_some());
}

#[tokio::test]
async fn test_search_view_loads_results() {
    let client = client();
    let mut view = SearchView::new(SearchType::Title);

    assert!(view.search("soup", &client).await);

    assert!(!view.is_loading());
    assert_eq!(view.text(), "soup");
    assert_eq!(view.results().len(), 1);
    assert_eq!(view.results()[0].url, "/r/soup");
}

#[test]
fn test_search_view_keeps_results_and_drops_stale_responses() {
    let client = client();
    let mut view = SearchView::new(SearchType::Title);

    let first = view.set_search_text("soup");
    view.complete(
        first,
        Ok(r#"<div id="results"><a href="/r/soup">Tomato Soup</a></div>"#.to_string()),
        &client,
    );
    assert_eq!(view.results().len(), 1);

    let slow = view.set_search_text("soupe");
    let latest = view.set_search_text("soup au pistou");
    assert!(view.is_loading());
    // Previous results remain visible while the new search runs
    assert_eq!(view.results().len(), 1);

    assert!(view.complete(
        latest,
        Ok(r#"<div id="results"><a href="/a">A</a><a href="/b">B</a></div>"#.to_string()),
        &client,
    ));
    assert!(!view.complete(slow, Ok(r#"<div id="results"></div>"#.to_string()), &client));

    assert!(!view.is_loading());
    assert_eq!(view.results().len(), 2);
}

#[test]
fn test_search_error_keeps_results() {
    let client = client();
    let mut view = SearchView::new(SearchType::Ingredient);

    let first = view.set_search_text("leek");
    view.complete(
        first,
        Ok(r#"<div id="results"><a href="/r/leek">Leek pie</a></div>"#.to_string()),
        &client,
    );

    let second = view.set_search_text("leeks");
    view.complete(second, Err(not_found()), &client);

    assert_eq!(view.results().len(), 1);
    assert!(view.take_notice().is_some());
}
