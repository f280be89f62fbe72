//! Search filters, the outbound query builder, and the local title filter.

use super::recipe::RecipeSummary;

/// Number of results requested when the caller does not say otherwise.
pub const DEFAULT_RESULT_LIMIT: u32 = 20;

/// Categories that are really dietary restrictions.
pub const DIET_KEYWORDS: [&str; 4] = ["vegetarian", "vegan", "gluten-free", "dairy-free"];

fn is_diet_keyword(value: &str) -> bool {
    DIET_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(value))
}

/// User-selected search criteria. Rebuilt on every search, never persisted.
///
/// Ingredients and dietary filters behave as sets that remember insertion
/// order, so "the first dietary filter" is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    ingredients: Vec<String>,
    category: Option<String>,
    dietary: Vec<String>,
    free_text_query: String,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for ingredient in ingredients {
            push_unique(&mut self.ingredients, ingredient.into());
        }
        self
    }

    pub fn with_category(mut self, category: Option<impl Into<String>>) -> Self {
        self.category = category.map(Into::into).filter(|c| !c.trim().is_empty());
        self
    }

    pub fn with_dietary<I, S>(mut self, dietary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for diet in dietary {
            push_unique(&mut self.dietary, diet.into());
        }
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.free_text_query = query.into();
        self
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn dietary(&self) -> &[String] {
        &self.dietary
    }

    pub fn free_text_query(&self) -> &str {
        &self.free_text_query
    }
}

// Empty strings are not names; anything else passes through verbatim.
fn push_unique(values: &mut Vec<String>, value: String) {
    if !value.is_empty() && !values.contains(&value) {
        values.push(value);
    }
}

/// Parameters of one outbound recipe search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    pub include_ingredients: String,
    pub diet: String,
    pub type_tag: String,
    pub number: u32,
    pub add_recipe_information: bool,
    pub fill_ingredients: bool,
}

impl SearchParams {
    /// Translate filters into request parameters.
    ///
    /// Free text wins the `query` slot; a category then moves to `type`
    /// unless it names a diet, in which case it implies `diet`.
    pub fn from_filters(filters: &SearchFilters, result_limit: u32) -> Self {
        let category = filters.category().unwrap_or_default();

        let query = if !filters.free_text_query.is_empty() {
            filters.free_text_query.clone()
        } else {
            category.to_string()
        };

        let type_tag = if !category.is_empty() && !is_diet_keyword(category) {
            category.to_string()
        } else {
            String::new()
        };

        let diet = match filters.dietary.first() {
            Some(first) => first.clone(),
            None if is_diet_keyword(category) => category.to_lowercase(),
            None => String::new(),
        };

        Self {
            query,
            include_ingredients: filters.ingredients.join(","),
            diet,
            type_tag,
            number: result_limit,
            add_recipe_information: true,
            fill_ingredients: true,
        }
    }

    /// Query-string pairs, omitting empty parameters.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(7);
        for (key, value) in [
            ("query", &self.query),
            ("includeIngredients", &self.include_ingredients),
            ("type", &self.type_tag),
            ("diet", &self.diet),
        ] {
            if !value.is_empty() {
                pairs.push((key, value.clone()));
            }
        }
        pairs.push(("number", self.number.to_string()));
        pairs.push(("addRecipeInformation", self.add_recipe_information.to_string()));
        pairs.push(("fillIngredients", self.fill_ingredients.to_string()));
        pairs
    }
}

/// Keep the entries whose title contains `query`, ignoring case.
///
/// An empty query returns the list unchanged. No I/O.
pub fn local_filter(results: &[RecipeSummary], query: &str) -> Vec<RecipeSummary> {
    if query.is_empty() {
        return results.to_vec();
    }
    let needle = query.to_lowercase();
    results
        .iter()
        .filter(|recipe| recipe.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
