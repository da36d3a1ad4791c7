//! Cookbook state: saved recipes, named collections, ratings, and the
//! rotating recipe of the week, persisted wholesale through a
//! [`SelectionStore`].
//!
//! Recipe identity is the catalog id (saving the same recipe twice is
//! rejected); collection identity is the case-folded name. The weekly pick
//! rotates through recipes rated four stars and up, keyed by the week index,
//! and is cached in the store so a reload within the same week keeps the
//! same pick.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::catalog::Recipe;
use crate::kitchen::SaveOutcome;
use crate::store::{SelectionStore, COOKBOOK_KEY, RECIPE_OF_WEEK_KEY};

pub const ALL_COLLECTION: &str = "all";
pub const FAVORITES_COLLECTION: &str = "favorites";

const WEEKLY_RATING_FLOOR: u8 = 4;

/// A recipe as it lives in the cookbook: the catalog fields that matter for
/// display, plus rating and collection memberships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRecipe {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub required_cookware: Vec<String>,
    #[serde(default)]
    pub prep_time: String,
    #[serde(default)]
    pub cook_time: String,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub collections: Vec<String>,
}

impl From<&Recipe> for SavedRecipe {
    fn from(recipe: &Recipe) -> Self {
        SavedRecipe {
            id: recipe.id.clone(),
            name: recipe.name.clone(),
            description: recipe.description.clone(),
            image_url: recipe.image_url.clone(),
            ingredients: recipe.ingredients.clone(),
            steps: recipe.steps.clone(),
            required_cookware: recipe.required_cookware.clone(),
            prep_time: recipe.prep_time.clone(),
            cook_time: recipe.cook_time.clone(),
            rating: 0,
            collections: vec![ALL_COLLECTION.to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub count: usize,
}

fn default_collections() -> Vec<Collection> {
    vec![
        Collection {
            id: ALL_COLLECTION.to_string(),
            name: "All Recipes".to_string(),
            count: 0,
        },
        Collection {
            id: FAVORITES_COLLECTION.to_string(),
            name: "Favorites".to_string(),
            count: 0,
        },
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CookbookState {
    recipes: Vec<SavedRecipe>,
    collections: Vec<Collection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WeeklyPick {
    week: u64,
    recipe: SavedRecipe,
}

fn current_week_index() -> u64 {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    secs / (7 * 86_400)
}

pub struct Cookbook<S: SelectionStore> {
    store: S,
    recipes: Vec<SavedRecipe>,
    collections: Vec<Collection>,
    weekly_pick: Option<WeeklyPick>,
}

impl<S: SelectionStore> Cookbook<S> {
    /// Restore cookbook state from the store. A missing or unreadable blob
    /// degrades to an empty cookbook with the default collections.
    pub fn load(store: S) -> Self {
        let state = match store.load_json::<CookbookState>(COOKBOOK_KEY) {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "could not restore saved cookbook");
                None
            }
        };
        let (recipes, collections) = match state {
            Some(state) => (state.recipes, state.collections),
            None => (Vec::new(), default_collections()),
        };
        let weekly_pick = match store.load_json::<WeeklyPick>(RECIPE_OF_WEEK_KEY) {
            Ok(pick) => pick,
            Err(e) => {
                warn!(error = %e, "could not restore cached recipe of the week");
                None
            }
        };
        Cookbook {
            store,
            recipes,
            collections,
            weekly_pick,
        }
    }

    pub fn recipes(&self) -> &[SavedRecipe] {
        &self.recipes
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    /// Save a catalog recipe into the cookbook. Re-adding a recipe already
    /// saved under the same id is rejected.
    pub fn add_recipe(&mut self, recipe: &Recipe) -> SaveOutcome {
        if self.recipes.iter().any(|r| r.id == recipe.id) {
            return SaveOutcome::failed("Recipe already in cookbook".to_string());
        }
        self.recipes.push(SavedRecipe::from(recipe));
        self.bump_count(ALL_COLLECTION, 1);
        self.persist("Recipe added to cookbook")
    }

    pub fn remove_recipe(&mut self, recipe_id: &str) -> SaveOutcome {
        let Some(index) = self.recipes.iter().position(|r| r.id == recipe_id) else {
            return SaveOutcome::failed("Recipe not found".to_string());
        };
        let removed = self.recipes.remove(index);
        for collection_id in &removed.collections {
            self.bump_count(collection_id, -1);
        }
        self.persist("Recipe removed from cookbook")
    }

    /// Create a collection. Names are trimmed and deduplicated
    /// case-insensitively.
    pub fn create_collection(&mut self, name: &str) -> SaveOutcome {
        let name = name.trim();
        if name.is_empty() {
            return SaveOutcome::failed("Collection name cannot be empty".to_string());
        }
        let folded = name.to_lowercase();
        if self
            .collections
            .iter()
            .any(|c| c.name.to_lowercase() == folded)
        {
            return SaveOutcome::failed("Collection with this name already exists".to_string());
        }
        self.collections.push(Collection {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            count: 0,
        });
        self.persist("Collection created")
    }

    pub fn remove_collection(&mut self, collection_id: &str) -> SaveOutcome {
        if collection_id == ALL_COLLECTION || collection_id == FAVORITES_COLLECTION {
            return SaveOutcome::failed("Cannot remove default collections".to_string());
        }
        let Some(index) = self.collections.iter().position(|c| c.id == collection_id) else {
            return SaveOutcome::failed("Collection not found".to_string());
        };
        self.collections.remove(index);
        for recipe in &mut self.recipes {
            recipe.collections.retain(|id| id != collection_id);
        }
        self.persist("Collection removed")
    }

    /// Flip a saved recipe's membership in a collection, keeping the
    /// collection count consistent.
    pub fn toggle_recipe_in_collection(
        &mut self,
        recipe_id: &str,
        collection_id: &str,
    ) -> SaveOutcome {
        if !self.collections.iter().any(|c| c.id == collection_id) {
            return SaveOutcome::failed("Collection not found".to_string());
        }
        let Some(recipe) = self.recipes.iter_mut().find(|r| r.id == recipe_id) else {
            return SaveOutcome::failed("Recipe not found".to_string());
        };
        let was_member = recipe.collections.iter().any(|id| id == collection_id);
        if was_member {
            recipe.collections.retain(|id| id != collection_id);
            self.bump_count(collection_id, -1);
            self.persist("Recipe removed from collection")
        } else {
            recipe.collections.push(collection_id.to_string());
            self.bump_count(collection_id, 1);
            self.persist("Recipe added to collection")
        }
    }

    pub fn rate_recipe(&mut self, recipe_id: &str, rating: u8) -> SaveOutcome {
        let Some(recipe) = self.recipes.iter_mut().find(|r| r.id == recipe_id) else {
            return SaveOutcome::failed("Recipe not found".to_string());
        };
        recipe.rating = rating.min(5);
        self.persist("Rating updated")
    }

    /// The recipe of the week: rotates through recipes rated four stars and
    /// up, falling back to the first saved recipe when none qualify. The
    /// pick is cached so repeated calls within one week agree.
    pub fn recipe_of_week(&mut self) -> Option<SavedRecipe> {
        self.recipe_of_week_for(current_week_index())
    }

    fn recipe_of_week_for(&mut self, week: u64) -> Option<SavedRecipe> {
        if let Some(pick) = &self.weekly_pick {
            if pick.week == week {
                return Some(pick.recipe.clone());
            }
        }
        let highly_rated: Vec<&SavedRecipe> = self
            .recipes
            .iter()
            .filter(|r| r.rating >= WEEKLY_RATING_FLOOR)
            .collect();
        let chosen = if highly_rated.is_empty() {
            self.recipes.first().cloned()?
        } else {
            let index = (week % highly_rated.len() as u64) as usize;
            highly_rated[index].clone()
        };
        let pick = WeeklyPick {
            week,
            recipe: chosen.clone(),
        };
        if let Err(e) = self.store.save_json(RECIPE_OF_WEEK_KEY, &pick) {
            warn!(error = %e, "could not cache recipe of the week");
        }
        self.weekly_pick = Some(pick);
        Some(chosen)
    }

    fn bump_count(&mut self, collection_id: &str, delta: i64) {
        if let Some(collection) = self.collections.iter_mut().find(|c| c.id == collection_id) {
            collection.count = collection
                .count
                .saturating_add_signed(delta as isize);
        }
    }

    fn persist(&self, message: &str) -> SaveOutcome {
        let state = CookbookState {
            recipes: self.recipes.clone(),
            collections: self.collections.clone(),
        };
        match self.store.save_json(COOKBOOK_KEY, &state) {
            Ok(()) => SaveOutcome {
                success: true,
                message: message.to_string(),
            },
            Err(e) => SaveOutcome::failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RecipeRecord;
    use crate::store::MemoryStore;

    fn recipe(id: &str, name: &str) -> Recipe {
        RecipeRecord {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            ingredients: Some("salt, pepper".to_string()),
            ..Default::default()
        }
        .normalize()
    }

    #[test]
    fn duplicate_recipe_ids_are_rejected() {
        let mut cookbook = Cookbook::load(MemoryStore::new());
        assert!(cookbook.add_recipe(&recipe("r-1", "Carbonara")).success);
        let outcome = cookbook.add_recipe(&recipe("r-1", "Carbonara"));

        assert!(!outcome.success);
        assert!(outcome.message.contains("already"));
        assert_eq!(cookbook.recipes().len(), 1);
    }

    #[test]
    fn adding_and_removing_keep_all_count_consistent() {
        let mut cookbook = Cookbook::load(MemoryStore::new());
        cookbook.add_recipe(&recipe("r-1", "Carbonara"));
        cookbook.add_recipe(&recipe("r-2", "Stir Fry"));
        let all = cookbook
            .collections()
            .iter()
            .find(|c| c.id == ALL_COLLECTION)
            .unwrap();
        assert_eq!(all.count, 2);

        cookbook.remove_recipe("r-1");
        let all = cookbook
            .collections()
            .iter()
            .find(|c| c.id == ALL_COLLECTION)
            .unwrap();
        assert_eq!(all.count, 1);

        let outcome = cookbook.remove_recipe("r-1");
        assert!(!outcome.success);
    }

    #[test]
    fn collection_names_dedupe_case_insensitively() {
        let mut cookbook = Cookbook::load(MemoryStore::new());
        assert!(cookbook.create_collection("Weeknight").success);
        assert!(!cookbook.create_collection("weeknight").success);
        assert!(!cookbook.create_collection("  ").success);
        // The two defaults plus the one created.
        assert_eq!(cookbook.collections().len(), 3);
    }

    #[test]
    fn toggle_flips_membership_and_count() {
        let mut cookbook = Cookbook::load(MemoryStore::new());
        cookbook.add_recipe(&recipe("r-1", "Carbonara"));

        let outcome = cookbook.toggle_recipe_in_collection("r-1", FAVORITES_COLLECTION);
        assert!(outcome.success);
        assert!(cookbook.recipes()[0]
            .collections
            .iter()
            .any(|id| id == FAVORITES_COLLECTION));
        let favorites = cookbook
            .collections()
            .iter()
            .find(|c| c.id == FAVORITES_COLLECTION)
            .unwrap();
        assert_eq!(favorites.count, 1);

        cookbook.toggle_recipe_in_collection("r-1", FAVORITES_COLLECTION);
        assert!(cookbook.recipes()[0]
            .collections
            .iter()
            .all(|id| id != FAVORITES_COLLECTION));
        let favorites = cookbook
            .collections()
            .iter()
            .find(|c| c.id == FAVORITES_COLLECTION)
            .unwrap();
        assert_eq!(favorites.count, 0);
    }

    #[test]
    fn default_collections_cannot_be_removed() {
        let mut cookbook = Cookbook::load(MemoryStore::new());
        assert!(!cookbook.remove_collection(ALL_COLLECTION).success);
        assert!(!cookbook.remove_collection(FAVORITES_COLLECTION).success);
    }

    #[test]
    fn removing_a_collection_detaches_recipes() {
        let mut cookbook = Cookbook::load(MemoryStore::new());
        cookbook.add_recipe(&recipe("r-1", "Carbonara"));
        cookbook.create_collection("Weeknight");
        let weeknight_id = cookbook.collections()[2].id.clone();
        cookbook.toggle_recipe_in_collection("r-1", &weeknight_id);

        assert!(cookbook.remove_collection(&weeknight_id).success);
        assert!(cookbook.recipes()[0]
            .collections
            .iter()
            .all(|id| *id != weeknight_id));
    }

    #[test]
    fn ratings_survive_reload_through_store() {
        let store = MemoryStore::new();
        {
            let mut cookbook = Cookbook::load(&store);
            cookbook.add_recipe(&recipe("r-1", "Carbonara"));
            cookbook.rate_recipe("r-1", 5);
        }
        let cookbook = Cookbook::load(&store);
        assert_eq!(cookbook.recipes()[0].rating, 5);
        // Default collections restored alongside the recipes.
        assert!(cookbook
            .collections()
            .iter()
            .any(|c| c.id == FAVORITES_COLLECTION));
    }

    #[test]
    fn weekly_pick_rotates_and_is_cached_within_a_week() {
        let store = MemoryStore::new();
        {
            let mut cookbook = Cookbook::load(&store);
            cookbook.add_recipe(&recipe("r-1", "Carbonara"));
            cookbook.add_recipe(&recipe("r-2", "Stir Fry"));
            cookbook.rate_recipe("r-1", 5);
            cookbook.rate_recipe("r-2", 4);

            let first = cookbook.recipe_of_week_for(10).unwrap();
            assert_eq!(first.id, "r-1");
            // Same week, same pick, even after ratings change.
            cookbook.rate_recipe("r-1", 1);
            assert_eq!(cookbook.recipe_of_week_for(10).unwrap().id, "r-1");
        }

        // The cached pick survives a reload within the same week.
        let mut cookbook = Cookbook::load(&store);
        assert_eq!(cookbook.recipe_of_week_for(10).unwrap().id, "r-1");
        // A new week rotates to the remaining highly rated recipe.
        assert_eq!(cookbook.recipe_of_week_for(11).unwrap().id, "r-2");
    }

    #[test]
    fn weekly_pick_falls_back_to_first_saved_recipe() {
        let mut cookbook = Cookbook::load(MemoryStore::new());
        assert!(cookbook.recipe_of_week_for(3).is_none());

        cookbook.add_recipe(&recipe("r-1", "Carbonara"));
        assert_eq!(cookbook.recipe_of_week_for(3).unwrap().id, "r-1");
    }

    #[test]
    fn write_failure_is_reported_not_thrown() {
        let mut cookbook = Cookbook::load(MemoryStore::read_only());
        let outcome = cookbook.add_recipe(&recipe("r-1", "Carbonara"));

        assert!(!outcome.success);
        assert!(outcome.message.contains(COOKBOOK_KEY));
        // In-memory state still updated.
        assert_eq!(cookbook.recipes().len(), 1);
    }
}
