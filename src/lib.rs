pub mod builder;
pub mod client;
pub mod config;
pub mod duration;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod model;
pub mod render;
pub mod view;

pub use builder::RecipeClientBuilder;
pub use client::RecipeClient;
pub use config::RecipeConfig;
pub use duration::format_duration;
pub use error::RecipeError;
pub use model::{
    Attribute, Ingredients, Instruction, InstructionKind, ParsedRecipe, RecipeSummary,
    RenderedRecipe, SearchType, SummaryImage,
};
pub use render::{render_detail, render_recipe};
pub use view::{DetailState, DetailView, FetchTicket, SearchView};

/// Search the configured site and return the result summaries
///
/// # Example
/// ```no_run
/// use recipe_for::{search_recipes, SearchType};
///
/// # async fn run() -> Result<(), recipe_for::RecipeError> {
/// let recipes = search_recipes(SearchType::Ingredient, "leek").await?;
/// for recipe in recipes {
///     println!("{} ({})", recipe.name, recipe.source);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_recipes(
    search_type: SearchType,
    text: &str,
) -> Result<Vec<RecipeSummary>, RecipeError> {
    let config = RecipeConfig::load()?;
    RecipeClient::builder()
        .config(&config)
        .build()?
        .search(search_type, text)
        .await
}

/// Fetch a recipe page and extract its embedded schema.org recipe
///
/// Returns `Ok(None)` if the page loaded but carries no recipe data.
pub async fn fetch_recipe(url: &str) -> Result<Option<ParsedRecipe>, RecipeError> {
    let config = RecipeConfig::load()?;
    let client = RecipeClient::builder().config(&config).build()?;
    let summary = RecipeSummary {
        name: String::new(),
        url: url.to_string(),
        source: String::new(),
        time: None,
        image: SummaryImage::Document,
    };
    client.recipe(&summary).await
}
