//! Per-view fetch state.
//!
//! Each view owns its data and allows one outstanding fetch. Starting a
//! fetch hands out a [`FetchTicket`]; completing with anything but the most
//! recent ticket is ignored, so a slow, superseded response can never
//! overwrite newer state.

use log::{debug, warn};

use crate::client::RecipeClient;
use crate::error::RecipeError;
use crate::model::{ParsedRecipe, RecipeSummary, RenderedRecipe, SearchType};
use crate::render::render_detail;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Idle,
    /// A fetch is outstanding; the last extracted record stays visible
    Fetching { previous: Option<ParsedRecipe> },
    Extracted(ParsedRecipe),
    /// The page was loaded but held no recipe, or could not be loaded
    Fallback,
}

/// Detail view for one selected recipe
#[derive(Debug, Clone)]
pub struct DetailView {
    summary: RecipeSummary,
    generation: u64,
    state: DetailState,
    notice: Option<String>,
}

impl DetailView {
    pub fn new(summary: RecipeSummary) -> Self {
        Self {
            summary,
            generation: 0,
            state: DetailState::Idle,
            notice: None,
        }
    }

    pub fn summary(&self) -> &RecipeSummary {
        &self.summary
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, DetailState::Fetching { .. })
    }

    /// Record currently shown, including the stale one while refetching
    pub fn recipe(&self) -> Option<&ParsedRecipe> {
        match &self.state {
            DetailState::Extracted(recipe) => Some(recipe),
            DetailState::Fetching { previous } => previous.as_ref(),
            DetailState::Idle | DetailState::Fallback => None,
        }
    }

    /// Switch to another recipe. Outstanding tickets become stale.
    pub fn select(&mut self, summary: RecipeSummary) {
        self.summary = summary;
        self.generation += 1;
        self.state = DetailState::Idle;
        self.notice = None;
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        let previous = self.recipe().cloned();
        self.state = DetailState::Fetching { previous };
        FetchTicket(self.generation)
    }

    /// Apply a fetch result. Returns `false` when the ticket was superseded
    /// and the result was dropped.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<String, RecipeError>,
        client: &RecipeClient,
    ) -> bool {
        if ticket.0 != self.generation {
            debug!("Dropping stale detail result for {}", self.summary.url);
            return false;
        }

        let previous = match std::mem::replace(&mut self.state, DetailState::Idle) {
            DetailState::Fetching { previous } => previous,
            DetailState::Extracted(recipe) => Some(recipe),
            DetailState::Idle | DetailState::Fallback => None,
        };

        self.state = match result {
            Ok(html) => match client.parse_recipe(&self.summary.url, &html) {
                Some(recipe) => DetailState::Extracted(recipe),
                None => DetailState::Fallback,
            },
            Err(e) => {
                warn!("Loading {} failed: {e}", self.summary.url);
                self.notice = Some(e.to_string());
                previous.map_or(DetailState::Fallback, DetailState::Extracted)
            }
        };
        true
    }

    /// Fetch and extract the selected recipe
    pub async fn load(&mut self, client: &RecipeClient) -> bool {
        let ticket = self.begin_fetch();
        let result = client.fetch_recipe_page(&self.summary).await;
        self.complete(ticket, result, client)
    }

    /// Transient error message, cleared once taken
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    pub fn render(&self) -> RenderedRecipe {
        render_detail(&self.summary, self.recipe(), self.is_loading())
    }
}

/// Searchable list of summaries
#[derive(Debug, Clone, Default)]
pub struct SearchView {
    search_type: SearchType,
    text: String,
    generation: u64,
    loading: bool,
    results: Vec<RecipeSummary>,
    notice: Option<String>,
}

impl SearchView {
    pub fn new(search_type: SearchType) -> Self {
        Self {
            search_type,
            ..Self::default()
        }
    }

    pub fn search_type(&self) -> SearchType {
        self.search_type
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Current results; the previous list stays until a new one arrives
    pub fn results(&self) -> &[RecipeSummary] {
        &self.results
    }

    /// Start a search for `text`, superseding any search in flight
    pub fn set_search_text(&mut self, text: impl Into<String>) -> FetchTicket {
        self.text = text.into();
        self.generation += 1;
        self.loading = true;
        FetchTicket(self.generation)
    }

    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<String, RecipeError>,
        client: &RecipeClient,
    ) -> bool {
        if ticket.0 != self.generation {
            debug!("Dropping stale search result for {:?}", self.text);
            return false;
        }

        self.loading = false;
        match result {
            Ok(html) => self.results = client.parse_search(&html),
            Err(e) => {
                warn!("Search for {:?} failed: {e}", self.text);
                self.notice = Some(e.to_string());
            }
        }
        true
    }

    pub async fn search(&mut self, text: impl Into<String>, client: &RecipeClient) -> bool {
        let ticket = self.set_search_text(text);
        let result = client.fetch_search_page(self.search_type, &self.text).await;
        self.complete(ticket, result, client)
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }
}
