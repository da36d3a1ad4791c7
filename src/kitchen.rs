//! Kitchen state: the user's ingredient and cookware selections, persisted
//! wholesale through a [`SelectionStore`] so they survive reloads.
//!
//! Ingredient identity is the case-folded name (adding a duplicate merges by
//! summing quantity); cookware identity is the composite
//! category-type-variety id. Store write failures are reported, never thrown:
//! callers get a [`SaveOutcome`] and the in-memory state stays updated.

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::matcher::{self, ScoredRecipe, Selection};
use crate::catalog::Recipe;
use crate::sequence::RequestSequence;
use crate::store::{SelectionStore, KITCHEN_COOKWARE_KEY, KITCHEN_INGREDIENTS_KEY};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveOutcome {
    pub success: bool,
    pub message: String,
}

impl SaveOutcome {
    pub(crate) fn ok() -> Self {
        SaveOutcome {
            success: true,
            message: "saved".to_string(),
        }
    }

    pub(crate) fn failed(message: String) -> Self {
        SaveOutcome {
            success: false,
            message,
        }
    }
}

pub struct Kitchen<S: SelectionStore> {
    store: S,
    ingredients: Vec<Selection>,
    cookware: Vec<Selection>,
    matched: Vec<ScoredRecipe>,
    match_sequence: RequestSequence,
}

impl<S: SelectionStore> Kitchen<S> {
    /// Restore kitchen state from the store. A missing or unreadable blob
    /// degrades to an empty list rather than failing the load.
    pub fn load(store: S) -> Self {
        let ingredients = match store.load_json(KITCHEN_INGREDIENTS_KEY) {
            Ok(list) => list.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "could not restore saved ingredients");
                Vec::new()
            }
        };
        let cookware = match store.load_json(KITCHEN_COOKWARE_KEY) {
            Ok(list) => list.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "could not restore saved cookware");
                Vec::new()
            }
        };
        Kitchen {
            store,
            ingredients,
            cookware,
            matched: Vec::new(),
            match_sequence: RequestSequence::new(),
        }
    }

    pub fn ingredients(&self) -> &[Selection] {
        &self.ingredients
    }

    pub fn cookware(&self) -> &[Selection] {
        &self.cookware
    }

    pub fn matched_recipes(&self) -> &[ScoredRecipe] {
        &self.matched
    }

    fn composite_id(selection: &Selection) -> String {
        let category = selection.category.as_deref().unwrap_or("custom");
        let kind = selection.kind.as_deref().unwrap_or("generic");
        match selection.variety.as_deref() {
            Some(variety) => format!("{}-{}-{}", category, kind, variety),
            None => format!("{}-{}-{}", category, kind, Uuid::new_v4()),
        }
    }

    /// Add an ingredient selection. A selection with the same case-folded
    /// name already in the kitchen absorbs the new quantity instead of
    /// appearing twice.
    pub fn add_ingredient(&mut self, mut selection: Selection) -> SaveOutcome {
        let folded = selection.name.to_lowercase();
        if let Some(existing) = self
            .ingredients
            .iter_mut()
            .find(|item| item.name.to_lowercase() == folded)
        {
            existing.quantity += if selection.quantity > 0.0 {
                selection.quantity
            } else {
                1.0
            };
        } else {
            if selection.id.is_empty() {
                selection.id = Self::composite_id(&selection);
            }
            if selection.quantity <= 0.0 {
                selection.quantity = 1.0;
            }
            self.ingredients.push(selection);
        }
        self.persist_ingredients()
    }

    /// Add a cookware selection, deduplicated by composite id.
    pub fn add_cookware(&mut self, mut selection: Selection) -> SaveOutcome {
        if selection.id.is_empty() {
            selection.id = Self::composite_id(&selection);
        }
        if self.cookware.iter().any(|item| item.id == selection.id) {
            return SaveOutcome::ok();
        }
        self.cookware.push(selection);
        self.persist_cookware()
    }

    pub fn remove_ingredient(&mut self, index: usize) -> SaveOutcome {
        if index < self.ingredients.len() {
            self.ingredients.remove(index);
        }
        self.persist_ingredients()
    }

    pub fn remove_cookware(&mut self, index: usize) -> SaveOutcome {
        if index < self.cookware.len() {
            self.cookware.remove(index);
        }
        self.persist_cookware()
    }

    pub fn clear_ingredients(&mut self) -> SaveOutcome {
        self.ingredients.clear();
        self.persist_ingredients()
    }

    pub fn clear_cookware(&mut self) -> SaveOutcome {
        self.cookware.clear();
        self.persist_cookware()
    }

    /// Rank `catalog` against the current selections and remember the result.
    pub fn find_matching_recipes(&mut self, catalog: &[Recipe]) -> &[ScoredRecipe] {
        let token = self.begin_match();
        let results = matcher::match_recipes(&self.ingredients, &self.cookware, catalog);
        self.apply_match_result(token, results);
        &self.matched
    }

    /// Start a match request; results must be applied with the returned
    /// token so a superseded request cannot overwrite a newer one.
    pub fn begin_match(&self) -> u64 {
        self.match_sequence.begin()
    }

    /// Accept a match result if its token is still current. Returns whether
    /// the result was applied.
    pub fn apply_match_result(&mut self, token: u64, results: Vec<ScoredRecipe>) -> bool {
        if !self.match_sequence.is_current(token) {
            return false;
        }
        self.matched = results;
        true
    }

    fn persist_ingredients(&self) -> SaveOutcome {
        match self.store.save_json(KITCHEN_INGREDIENTS_KEY, &self.ingredients) {
            Ok(()) => SaveOutcome::ok(),
            Err(e) => SaveOutcome::failed(e.to_string()),
        }
    }

    fn persist_cookware(&self) -> SaveOutcome {
        match self.store.save_json(KITCHEN_COOKWARE_KEY, &self.cookware) {
            Ok(()) => SaveOutcome::ok(),
            Err(e) => SaveOutcome::failed(e.to_string()),
        }
    }
}
