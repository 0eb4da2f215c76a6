use serde::Serialize;

/// Which field the search endpoint matches against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchType {
    #[default]
    Title,
    Ingredient,
}

impl SearchType {
    /// Value of the `f` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Title => "t",
            SearchType::Ingredient => "i",
        }
    }
}

/// Icon shown next to a search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SummaryImage {
    /// Generic document placeholder
    Document,
    /// Absolute thumbnail URL, displayed with a rounded-rectangle mask
    Thumbnail(String),
}

impl SummaryImage {
    pub fn url(&self) -> Option<&str> {
        match self {
            SummaryImage::Document => None,
            SummaryImage::Thumbnail(url) => Some(url.as_str()),
        }
    }
}

/// One entry of a search-results page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeSummary {
    pub name: String,
    /// Absolute or site-relative link to the recipe page
    pub url: String,
    /// Publisher name, may be empty
    pub source: String,
    pub time: Option<String>,
    pub image: SummaryImage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Ingredients {
    List(Vec<String>),
    Single(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum InstructionKind {
    /// `HowToStep`
    Step,
    /// `HowToSection`
    Section,
    /// Any other `@type`
    Other(String),
    /// Plain strings and objects without a type
    Untyped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instruction {
    pub kind: InstructionKind,
    pub text: String,
}

impl Instruction {
    pub fn is_step(&self) -> bool {
        self.kind == InstructionKind::Step
    }
}

/// Normalized schema.org `Recipe` taken from a detail page.
///
/// Empty strings mean the attribute is not rendered. Duration fields hold
/// either a human-readable phrase or the raw value when it couldn't be
/// formatted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedRecipe {
    pub name: String,
    pub author: String,
    pub prep_time: Option<String>,
    pub cook_time: Option<String>,
    pub total_time: Option<String>,
    pub recipe_yield: String,
    pub recipe_category: String,
    pub description: String,
    pub image: String,
    pub ingredients: Option<Ingredients>,
    pub instructions: Option<Vec<Instruction>>,
}

/// Labeled value shown beside the detail body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Attribute {
    Label { title: String, text: String },
    Separator,
}

impl Attribute {
    pub fn label(title: &str, text: &str) -> Self {
        Attribute::Label {
            title: title.to_string(),
            text: text.to_string(),
        }
    }
}

/// Everything the presentation layer needs for a detail view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedRecipe {
    pub navigation_title: String,
    pub markdown: String,
    pub attributes: Vec<Attribute>,
    pub is_loading: bool,
    /// Target of the "Open in Browser" action
    pub url: String,
}
