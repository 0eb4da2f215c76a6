use super::{Extractor, ParsingContext};
use crate::duration::format_duration;
use crate::model::{Ingredients, Instruction, InstructionKind, ParsedRecipe};
use log::debug;
use scraper::Selector;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

pub struct JsonLdExtractor;

#[derive(Debug, Deserialize)]
struct NameObject {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AuthorEntry {
    String(String),
    Object(NameObject),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Author {
    String(String),
    Object(NameObject),
    Multiple(Vec<AuthorEntry>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeYield {
    String(String),
    Number(serde_json::Number),
    Array(Vec<Value>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeCategory {
    String(String),
    Multiple(Vec<String>),
}

#[derive(Debug, Deserialize)]
struct TextObject {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DescriptionType {
    String(String),
    Object(TextObject),
}

#[derive(Debug, Deserialize)]
struct ImageObject {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageEntry {
    String(String),
    Object(ImageObject),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageType {
    String(String),
    Object(ImageObject),
    Multiple(Vec<ImageEntry>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeIngredients {
    Strings(Vec<String>),
    String(String),
}

#[derive(Debug, Deserialize)]
struct InstructionObject {
    #[serde(rename = "@type")]
    kind: Option<Value>,
    text: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InstructionEntry {
    String(String),
    Object(InstructionObject),
    Unknown(Value),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeInstructions {
    String(String),
    Multiple(Vec<InstructionEntry>),
}

/// Decode one property on its own so a single odd field can't reject the
/// whole recipe.
fn field<T: DeserializeOwned>(value: &Value, key: &str) -> Option<T> {
    let raw = value.get(key)?;
    match serde_json::from_value(raw.clone()) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            debug!("JsonLdExtractor: ignoring unexpected shape for {key}: {e}");
            None
        }
    }
}

fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(kind)) => kind == "Recipe",
        Some(Value::Array(kinds)) => kinds.iter().any(|k| k.as_str() == Some("Recipe")),
        _ => false,
    }
}

fn author_name(author: Author) -> String {
    match author {
        Author::String(name) => name,
        Author::Object(obj) => obj.name.unwrap_or_default(),
        Author::Multiple(authors) => authors
            .into_iter()
            .filter_map(|a| match a {
                AuthorEntry::String(name) => Some(name),
                AuthorEntry::Object(obj) => obj.name,
            })
            .filter(|name| !name.is_empty())
            .collect::<Vec<String>>()
            .join(", "),
    }
}

fn yield_text(recipe_yield: RecipeYield) -> String {
    match recipe_yield {
        RecipeYield::String(s) => s,
        RecipeYield::Number(n) => n.to_string(),
        RecipeYield::Array(values) => values
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect::<Vec<String>>()
            .join(", "),
    }
}

fn category_text(category: RecipeCategory) -> String {
    match category {
        RecipeCategory::String(s) => s,
        RecipeCategory::Multiple(v) => v.join(", "),
    }
}

fn image_url(image: ImageType) -> String {
    match image {
        ImageType::String(url) => url,
        ImageType::Object(obj) => obj.url.unwrap_or_default(),
        ImageType::Multiple(images) => images
            .into_iter()
            .find_map(|img| match img {
                ImageEntry::String(url) => Some(url),
                ImageEntry::Object(obj) => obj.url,
            })
            .unwrap_or_default(),
    }
}

fn instruction_kind(kind: Option<Value>) -> InstructionKind {
    match kind {
        Some(Value::String(kind)) => match kind.as_str() {
            "HowToStep" => InstructionKind::Step,
            "HowToSection" => InstructionKind::Section,
            _ => InstructionKind::Other(kind),
        },
        _ => InstructionKind::Untyped,
    }
}

fn instruction_list(instructions: RecipeInstructions) -> Vec<Instruction> {
    match instructions {
        RecipeInstructions::String(text) => vec![Instruction {
            kind: InstructionKind::Untyped,
            text,
        }],
        RecipeInstructions::Multiple(entries) => entries
            .into_iter()
            .map(|entry| match entry {
                InstructionEntry::String(text) => Instruction {
                    kind: InstructionKind::Untyped,
                    text,
                },
                InstructionEntry::Object(obj) => Instruction {
                    kind: instruction_kind(obj.kind),
                    // Prefer text over name
                    text: obj.text.or(obj.name).unwrap_or_default(),
                },
                InstructionEntry::Unknown(_) => Instruction {
                    kind: InstructionKind::Untyped,
                    text: String::new(),
                },
            })
            .collect(),
    }
}

fn duration_field(value: &Value, key: &str) -> Option<String> {
    let raw: Option<String> = field(value, key);
    format_duration(raw.as_deref()).or(raw)
}

/// Map a single JSON-LD entity to a [`ParsedRecipe`].
///
/// Returns `None` unless `@type` is `"Recipe"` or an array containing it.
pub fn normalize_recipe(value: &Value) -> Option<ParsedRecipe> {
    if !is_recipe_type(value) {
        return None;
    }

    Some(ParsedRecipe {
        name: field(value, "name").unwrap_or_default(),
        author: field(value, "author").map(author_name).unwrap_or_default(),
        prep_time: duration_field(value, "prepTime"),
        cook_time: duration_field(value, "cookTime"),
        total_time: duration_field(value, "totalTime"),
        recipe_yield: field(value, "recipeYield")
            .map(yield_text)
            .unwrap_or_default(),
        recipe_category: field(value, "recipeCategory")
            .map(category_text)
            .unwrap_or_default(),
        description: field(value, "description")
            .map(|desc: DescriptionType| match desc {
                DescriptionType::String(d) => d,
                DescriptionType::Object(d) => d.text,
            })
            .unwrap_or_default(),
        image: field(value, "image").map(image_url).unwrap_or_default(),
        ingredients: field(value, "recipeIngredient").map(
            |ingredients: RecipeIngredients| match ingredients {
                RecipeIngredients::Strings(list) => Ingredients::List(list),
                RecipeIngredients::String(single) => Ingredients::Single(single),
            },
        ),
        instructions: field(value, "recipeInstructions").map(instruction_list),
    })
}

/// Find the first recipe in a parsed JSON-LD payload: the value itself, or
/// the first qualifying entry of an array or `@graph` container.
fn find_recipe(json_ld: &Value) -> Option<ParsedRecipe> {
    if let Some(recipe) = normalize_recipe(json_ld) {
        debug!("JsonLdExtractor: Found Recipe type in root");
        return Some(recipe);
    }

    let entries = match json_ld {
        Value::Array(entries) => entries,
        Value::Object(_) => json_ld.get("@graph")?.as_array()?,
        _ => return None,
    };
    debug!("JsonLdExtractor: Scanning {} container entries", entries.len());
    entries.iter().find_map(normalize_recipe)
}

fn strip_comment_markers(raw: &str) -> &str {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix("<!--").unwrap_or(trimmed);
    trimmed.strip_suffix("-->").unwrap_or(trimmed).trim()
}

impl Extractor for JsonLdExtractor {
    type Output = Option<ParsedRecipe>;

    fn parse(&self, context: &ParsingContext) -> Option<ParsedRecipe> {
        debug!("JsonLdExtractor: Starting parse for URL: {}", context.url);
        let selector = Selector::parse("script[type='application/ld+json']").ok()?;

        let scripts: Vec<_> = context.document.select(&selector).collect();
        debug!(
            "JsonLdExtractor: Found {} JSON-LD script tags",
            scripts.len()
        );

        for (index, script) in scripts.iter().enumerate() {
            let raw_json = script.text().collect::<String>();
            let json_ld = match serde_json::from_str::<Value>(strip_comment_markers(&raw_json)) {
                Ok(json_ld) => json_ld,
                Err(e) => {
                    debug!("JsonLdExtractor: Failed to parse JSON-LD {}: {}", index, e);
                    continue;
                }
            };

            if let Some(mut recipe) = find_recipe(&json_ld) {
                debug!("JsonLdExtractor: Script {} holds a recipe", index);
                if !recipe.image.is_empty() {
                    if let Ok(absolute) = context.url.join(&recipe.image) {
                        recipe.image = absolute.to_string();
                    }
                }
                return Some(recipe);
            }
            debug!("JsonLdExtractor: No recipe found in JSON-LD {}", index);
        }

        None
    }
}
