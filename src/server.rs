//! HTTP surface: a thin transport wrapper over the catalog loader, match
//! engine, and tag classifier.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::catalog::{self, Recipe};
use crate::matcher::{self, Selection};

pub struct AppState {
    pub catalog: RwLock<Vec<Recipe>>,
}

impl AppState {
    pub fn new(catalog: Vec<Recipe>) -> Self {
        AppState {
            catalog: RwLock::new(catalog),
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/recipes", get(list_recipes))
        .route("/api/recipes/match", post(match_recipes))
        .route("/api/recipes/{id}", get(get_recipe))
        .route("/api/import-recipes", post(import_recipes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /api/recipes — the full normalized catalog.
async fn list_recipes(State(state): State<Arc<AppState>>) -> Json<Vec<Recipe>> {
    let catalog = state.catalog.read().await;
    Json(catalog.clone())
}

#[derive(Debug, Deserialize)]
struct MatchRequest {
    #[serde(default)]
    ingredients: Vec<Selection>,
    #[serde(default)]
    cookware: Vec<Selection>,
}

/// POST /api/recipes/match — rank the catalog against the request's
/// selections. With no selections this returns the catalog in load order,
/// capped like any other match.
async fn match_recipes(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MatchRequest>,
) -> Json<Vec<matcher::ScoredRecipe>> {
    let catalog = state.catalog.read().await;
    let results = matcher::match_recipes(&request.ingredients, &request.cookware, &catalog);
    info!(
        selected = request.ingredients.len(),
        cookware = request.cookware.len(),
        results = results.len(),
        "matched recipes"
    );
    Json(results)
}

/// GET /api/recipes/{id}
async fn get_recipe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>, (StatusCode, Json<Value>)> {
    let catalog = state.catalog.read().await;
    catalog::find_by_id(&catalog, &id)
        .cloned()
        .map(Json)
        .ok_or((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Recipe not found" })),
        ))
}

#[derive(Debug, Deserialize)]
struct ImportRequest {
    #[serde(rename = "csvContent")]
    csv_content: String,
}

/// POST /api/import-recipes — parse pasted CSV content, normalize and
/// re-tag every record, and replace the in-memory catalog.
async fn import_recipes(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ImportRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let recipes = catalog::parse_catalog_csv(&request.csv_content).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Failed to import recipes: {}", e) })),
        )
    })?;
    let recipes: Vec<Recipe> = recipes
        .into_iter()
        .map(Recipe::with_detailed_tags)
        .collect();
    let count = recipes.len();

    let mut catalog = state.catalog.write().await;
    *catalog = recipes;
    info!(count, "imported recipe catalog");

    Ok(Json(json!({
        "message": format!("Successfully imported {} recipes", count)
    })))
}
