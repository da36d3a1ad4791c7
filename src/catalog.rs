//! Recipe catalog: CSV ingestion, record normalization, and the loader with
//! its source fallback chain. The loader never raises past its own boundary;
//! total failure degrades to the bundled sample set.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

use crate::classifier::DetailedTags;

pub const PLACEHOLDER_IMAGE: &str = "/assets/images/vegetable-pasta.png";
pub const PLACEHOLDER_DESCRIPTION: &str = "A delicious recipe";
pub const UNTITLED_RECIPE: &str = "Untitled Recipe";

/// A normalized recipe. After normalization every list field is a real array
/// and `id`, `name`, `description`, and `image_url` are always populated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub required_cookware: Vec<String>,
    #[serde(default)]
    pub prep_time: String,
    #[serde(default)]
    pub cook_time: String,
    #[serde(default)]
    pub servings: String,
    #[serde(default)]
    pub cuisine_type: String,
    #[serde(default)]
    pub protein_tags: Vec<String>,
    #[serde(default)]
    pub veggie_tags: Vec<String>,
    #[serde(default)]
    pub herb_tags: Vec<String>,
    #[serde(flatten, default)]
    pub detailed_tags: DetailedTags,
}

/// A recipe as it arrives from an external source, before any defaulting.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub ingredients: Option<String>,
    pub steps: Option<String>,
    pub required_cookware: Option<String>,
    pub prep_time: Option<String>,
    pub cook_time: Option<String>,
    pub servings: Option<String>,
    pub cuisine_type: Option<String>,
    pub protein_tags: Option<String>,
    pub veggie_tags: Option<String>,
    pub herb_tags: Option<String>,
}

/// Split a source cell into a list. Cells may hold a JSON array string or a
/// comma-joined string; an absent cell becomes an empty list.
pub fn split_list(cell: Option<&str>) -> Vec<String> {
    let Some(raw) = cell else {
        return Vec::new();
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if let Ok(items) = serde_json::from_str::<Vec<String>>(trimmed) {
        return items
            .into_iter()
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .collect();
    }
    trimmed
        .split(',')
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .collect()
}

fn image_path_for(name: &str) -> String {
    let slug = name.split_whitespace().collect::<Vec<_>>().join("-").to_lowercase();
    format!("/assets/images/{}.png", slug)
}

impl RecipeRecord {
    /// Apply the normalization guarantees: lists are always arrays, `id` is
    /// generated when absent, and name/description/image fall back to
    /// defaults rather than staying empty.
    pub fn normalize(self) -> Recipe {
        let nonempty = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        let name = nonempty(self.name).unwrap_or_else(|| UNTITLED_RECIPE.to_string());
        let image_url = nonempty(self.image_url).unwrap_or_else(|| {
            if name == UNTITLED_RECIPE {
                PLACEHOLDER_IMAGE.to_string()
            } else {
                image_path_for(&name)
            }
        });

        Recipe {
            id: nonempty(self.id).unwrap_or_else(|| Uuid::new_v4().to_string()),
            name,
            description: nonempty(self.description)
                .unwrap_or_else(|| PLACEHOLDER_DESCRIPTION.to_string()),
            image_url,
            ingredients: split_list(self.ingredients.as_deref()),
            steps: split_list(self.steps.as_deref()),
            required_cookware: split_list(self.required_cookware.as_deref()),
            prep_time: nonempty(self.prep_time).unwrap_or_default(),
            cook_time: nonempty(self.cook_time).unwrap_or_default(),
            servings: nonempty(self.servings).unwrap_or_default(),
            cuisine_type: nonempty(self.cuisine_type).unwrap_or_default(),
            protein_tags: split_list(self.protein_tags.as_deref()),
            veggie_tags: split_list(self.veggie_tags.as_deref()),
            herb_tags: split_list(self.herb_tags.as_deref()),
            detailed_tags: DetailedTags::default(),
        }
    }
}

impl Recipe {
    /// Recompute the detailed three-level tag columns from this recipe's
    /// coarse tags, ingredients, and cookware.
    pub fn with_detailed_tags(mut self) -> Self {
        self.detailed_tags = DetailedTags::for_recipe(
            &self.protein_tags,
            &self.veggie_tags,
            &self.herb_tags,
            &self.ingredients,
            &self.required_cookware,
        );
        self
    }
}

/// Strip artifacts seen in pasted CSV content: stray `npm ...` command lines
/// at the top and carriage returns.
pub fn clean_csv_content(content: &str) -> String {
    content
        .replace('\r', "")
        .lines()
        .filter(|line| !line.trim_start().starts_with("npm "))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse catalog CSV text into normalized recipes. Rows that fail to read
/// are skipped with a warning; header layout is resolved by name so column
/// order does not matter. `title`/`image` are accepted as aliases.
pub fn parse_catalog_csv(content: &str) -> Result<Vec<Recipe>> {
    let cleaned = clean_csv_content(content);
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(cleaned.as_bytes());

    let headers = rdr.headers().context("failed to read CSV headers")?.clone();
    let index: HashMap<&str, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim(), i))
        .collect();

    let col = |record: &csv::StringRecord, names: &[&str]| -> Option<String> {
        names
            .iter()
            .filter_map(|n| index.get(n))
            .filter_map(|&i| record.get(i))
            .map(|v| v.to_string())
            .next()
    };

    let mut recipes = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!(row, error = %e, "skipping unreadable catalog row");
                continue;
            }
        };
        let raw = RecipeRecord {
            id: col(&record, &["id"]),
            name: col(&record, &["name", "title"]),
            description: col(&record, &["description"]),
            image_url: col(&record, &["image_url", "image"]),
            ingredients: col(&record, &["ingredients"]),
            steps: col(&record, &["steps"]),
            required_cookware: col(&record, &["required_cookware"]),
            prep_time: col(&record, &["prep_time"]),
            cook_time: col(&record, &["cook_time"]),
            servings: col(&record, &["servings"]),
            cuisine_type: col(&record, &["cuisine_type", "cuisine"]),
            protein_tags: col(&record, &["protein_tags"]),
            veggie_tags: col(&record, &["veggie_tags"]),
            herb_tags: col(&record, &["herb_tags"]),
        };
        recipes.push(raw.normalize());
    }
    Ok(recipes)
}

static BUNDLED_RECIPES: Lazy<Vec<Recipe>> = Lazy::new(|| {
    parse_catalog_csv(include_str!("../data/sample_recipes.csv")).unwrap_or_default()
});

/// The compiled-in fallback set. An empty result here is a configuration
/// error, not a runtime condition.
pub fn bundled_recipes() -> Vec<Recipe> {
    BUNDLED_RECIPES.clone()
}

#[derive(Debug, Clone)]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
}

/// Loads the catalog from an ordered list of sources, falling back to the
/// bundled sample set when every source fails.
#[derive(Debug, Clone, Default)]
pub struct CatalogLoader {
    sources: Vec<CatalogSource>,
}

impl CatalogLoader {
    pub fn new(sources: Vec<CatalogSource>) -> Self {
        Self { sources }
    }

    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.sources.push(CatalogSource::File(path.as_ref().to_path_buf()));
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.sources.push(CatalogSource::Url(url.into()));
        self
    }

    /// Load and normalize the catalog. Never errors: each source is tried in
    /// order, and the bundled set is the last resort.
    pub async fn load(&self) -> Vec<Recipe> {
        for source in &self.sources {
            match self.try_source(source).await {
                Ok(recipes) if !recipes.is_empty() => return recipes,
                Ok(_) => warn!(?source, "catalog source produced no recipes"),
                Err(e) => warn!(?source, error = %e, "catalog source failed"),
            }
        }
        bundled_recipes()
    }

    async fn try_source(&self, source: &CatalogSource) -> Result<Vec<Recipe>> {
        let content = match source {
            CatalogSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read catalog file {:?}", path))?,
            CatalogSource::Url(url) => reqwest::get(url)
                .await
                .with_context(|| format!("failed to fetch catalog from {}", url))?
                .error_for_status()
                .with_context(|| format!("catalog fetch from {} returned an error status", url))?
                .text()
                .await
                .context("failed to read catalog response body")?,
        };
        parse_catalog_csv(&content)
    }
}

pub fn find_by_id<'a>(catalog: &'a [Recipe], id: &str) -> Option<&'a Recipe> {
    catalog.iter().find(|r| r.id == id)
}
