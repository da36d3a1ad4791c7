//! Match & score engine: ranks catalog recipes against the user's ingredient
//! and cookware selections.
//!
//! Scoring: matched-ingredient percentage (0..100, or a flat 50 when no
//! ingredients are selected) plus a cookware bonus of up to 20. The total is
//! deliberately uncapped, so a full ingredient match with cookware can exceed
//! 100. A recipe with no usable ingredient list gets a fixed base score of 10
//! and is kept in the output rather than dropped.
//!
//! With no selections at all the engine returns the catalog in load order,
//! capped at 50; randomized presentation is a display concern and lives in
//! [`shuffled_sample`], never inside the engine.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::catalog::Recipe;

pub const MAX_RESULTS: usize = 50;
pub const MALFORMED_BASE_SCORE: f64 = 10.0;
const NO_SELECTION_SCORE: f64 = 50.0;
const COOKWARE_BONUS_WEIGHT: f64 = 20.0;

fn default_quantity() -> f64 {
    1.0
}

/// A user-selected ingredient or cookware item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Selection {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub cut: Option<String>,
    #[serde(default)]
    pub variety: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub id: String,
}

impl Selection {
    pub fn named(name: &str) -> Self {
        Selection {
            name: name.to_string(),
            quantity: 1.0,
            ..Default::default()
        }
    }
}

/// A recipe plus its relevance score, built fresh on every match call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredRecipe {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub score: f64,
    #[serde(rename = "matchedIngredients")]
    pub matched_ingredients: Vec<Selection>,
    #[serde(rename = "totalIngredients")]
    pub total_ingredients: usize,
}

fn score_recipe(
    recipe: &Recipe,
    ingredients: &[Selection],
    cookware: &[Selection],
) -> ScoredRecipe {
    if recipe.ingredients.is_empty() {
        return ScoredRecipe {
            recipe: recipe.clone(),
            score: MALFORMED_BASE_SCORE,
            matched_ingredients: Vec::new(),
            total_ingredients: 0,
        };
    }

    let recipe_ingredients: Vec<String> =
        recipe.ingredients.iter().map(|i| i.to_lowercase()).collect();
    let matched_ingredients: Vec<Selection> = ingredients
        .iter()
        .filter(|sel| {
            let name = sel.name.to_lowercase();
            !name.is_empty() && recipe_ingredients.iter().any(|text| text.contains(&name))
        })
        .cloned()
        .collect();

    let match_percentage = if ingredients.is_empty() {
        NO_SELECTION_SCORE
    } else {
        matched_ingredients.len() as f64 / ingredients.len() as f64 * 100.0
    };

    let cookware_bonus = if cookware.is_empty() {
        0.0
    } else {
        let recipe_cookware: Vec<String> = recipe
            .required_cookware
            .iter()
            .map(|c| c.to_lowercase())
            .collect();
        let matched = cookware
            .iter()
            .filter(|sel| {
                let name = sel.name.to_lowercase();
                !name.is_empty() && recipe_cookware.iter().any(|text| text.contains(&name))
            })
            .count();
        matched as f64 / cookware.len() as f64 * COOKWARE_BONUS_WEIGHT
    };

    ScoredRecipe {
        recipe: recipe.clone(),
        score: match_percentage + cookware_bonus,
        matched_ingredients,
        total_ingredients: recipe.ingredients.len(),
    }
}

/// Rank the catalog against the given selections. Pure over its inputs:
/// identical calls yield identical output (the descending sort is stable, so
/// ties keep catalog order).
pub fn match_recipes(
    ingredients: &[Selection],
    cookware: &[Selection],
    catalog: &[Recipe],
) -> Vec<ScoredRecipe> {
    let mut scored: Vec<ScoredRecipe> = catalog
        .iter()
        .map(|recipe| score_recipe(recipe, ingredients, cookware))
        .collect();

    if !ingredients.is_empty() || !cookware.is_empty() {
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    }
    scored.truncate(MAX_RESULTS);
    scored
}

/// Display-layer helper: a random permutation of the catalog, capped at
/// `MAX_RESULTS`. Call sites that want a browsable "no selections" view use
/// this; the engine itself stays deterministic.
pub fn shuffled_sample(catalog: &[Recipe]) -> Vec<Recipe> {
    let mut recipes: Vec<Recipe> = catalog.to_vec();
    recipes.shuffle(&mut rand::thread_rng());
    recipes.truncate(MAX_RESULTS);
    recipes
}
