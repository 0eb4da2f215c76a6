use crate::model::{Attribute, Ingredients, ParsedRecipe, RecipeSummary, RenderedRecipe};

pub const FALLBACK_NOTICE: &str =
    "Could not extract recipe data from the page. Please open the recipe in your browser.";

fn bullets<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    items
        .into_iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<String>>()
        .join("\n")
}

fn body(summary: &RecipeSummary, extracted: Option<&ParsedRecipe>) -> String {
    let mut blocks = vec![format!("# {}", summary.name)];

    let image = extracted
        .map(|recipe| recipe.image.as_str())
        .filter(|image| !image.is_empty())
        .or_else(|| summary.image.url());
    if let Some(image) = image {
        blocks.push(format!("![{}]({})", summary.name, image));
    }

    let Some(recipe) = extracted else {
        blocks.push(FALLBACK_NOTICE.to_string());
        return blocks.join("\n\n") + "\n";
    };

    if !recipe.description.is_empty() {
        blocks.push(format!("## Description\n{}", recipe.description));
    }

    let ingredients = match &recipe.ingredients {
        Some(Ingredients::List(list)) if !list.is_empty() => {
            Some(bullets(list.iter().map(String::as_str)))
        }
        Some(Ingredients::Single(single)) => Some(bullets([single.as_str()])),
        _ => None,
    };
    if let Some(ingredients) = ingredients {
        blocks.push(format!("## Ingredients\n{ingredients}"));
    }

    let steps: Vec<&str> = recipe
        .instructions
        .iter()
        .flatten()
        .filter(|instruction| instruction.is_step())
        .map(|instruction| instruction.text.as_str())
        .collect();
    if !steps.is_empty() {
        blocks.push(format!("## Instructions\n{}", bullets(steps)));
    }

    blocks.join("\n\n") + "\n"
}

fn attributes(recipe: &ParsedRecipe) -> Vec<Attribute> {
    let mut attributes = Vec::new();

    if !recipe.author.is_empty() {
        attributes.push(Attribute::label("Author", &recipe.author));
        attributes.push(Attribute::Separator);
    }

    let times = [
        ("Prep Time", &recipe.prep_time),
        ("Cook Time", &recipe.cook_time),
        ("Total Time", &recipe.total_time),
    ];
    let mut any_time = false;
    for (title, value) in times {
        if let Some(text) = value.as_deref().filter(|t| !t.is_empty()) {
            attributes.push(Attribute::label(title, text));
            any_time = true;
        }
    }
    if any_time {
        attributes.push(Attribute::Separator);
    }

    if !recipe.recipe_yield.is_empty() {
        attributes.push(Attribute::label("Yield", &recipe.recipe_yield));
    }
    if !recipe.recipe_category.is_empty() {
        attributes.push(Attribute::label("Category", &recipe.recipe_category));
    }

    attributes
}

/// Build the Markdown body and attribute list for a recipe.
///
/// Without an extracted record the body only carries the title, image and
/// a notice pointing at the browser, and there are no attributes.
pub fn render_recipe(
    summary: &RecipeSummary,
    extracted: Option<&ParsedRecipe>,
) -> (String, Vec<Attribute>) {
    let attributes = extracted.map(attributes).unwrap_or_default();
    (body(summary, extracted), attributes)
}

pub fn render_detail(
    summary: &RecipeSummary,
    extracted: Option<&ParsedRecipe>,
    is_loading: bool,
) -> RenderedRecipe {
    let (markdown, attributes) = render_recipe(summary, extracted);
    RenderedRecipe {
        navigation_title: summary.name.clone(),
        markdown,
        attributes,
        is_loading,
        url: summary.url.clone(),
    }
}
