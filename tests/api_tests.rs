//! Router-level tests for the HTTP surface, driven through tower's
//! `oneshot` without binding a socket.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use porkchop::catalog::RecipeRecord;
use porkchop::server::{build_router, AppState};

fn test_router() -> axum::Router {
    let catalog = vec![
        RecipeRecord {
            id: Some("r-1".to_string()),
            name: Some("Garlic Chicken".to_string()),
            ingredients: Some("chicken breast, garlic".to_string()),
            ..Default::default()
        }
        .normalize(),
        RecipeRecord {
            id: Some("r-2".to_string()),
            name: Some("Tofu Bowl".to_string()),
            ingredients: Some("tofu, soy sauce".to_string()),
            ..Default::default()
        }
        .normalize(),
    ];
    build_router(Arc::new(AppState::new(catalog)))
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn list_recipes_returns_catalog() {
    let response = test_router()
        .oneshot(Request::get("/api/recipes").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let recipes = body.as_array().unwrap();
    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0]["name"], "Garlic Chicken");
    assert!(recipes[0]["ingredients"].is_array());
}

#[tokio::test]
async fn match_ranks_by_score() {
    let request = json_request(
        "POST",
        "/api/recipes/match",
        json!({ "ingredients": [{ "name": "chicken" }], "cookware": [] }),
    );
    let response = test_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["id"], "r-1");
    assert_eq!(results[0]["score"], 100.0);
    assert_eq!(results[0]["matchedIngredients"].as_array().unwrap().len(), 1);
    assert_eq!(results[1]["score"], 0.0);
}

#[tokio::test]
async fn match_with_no_selections_returns_whole_catalog() {
    let request = json_request("POST", "/api/recipes/match", json!({}));
    let response = test_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 2);
    // Catalog order is preserved when nothing is selected.
    assert_eq!(results[0]["id"], "r-1");
    assert_eq!(results[1]["id"], "r-2");
}

#[tokio::test]
async fn get_recipe_by_id() {
    let response = test_router()
        .oneshot(Request::get("/api/recipes/r-2").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["name"], "Tofu Bowl");
}

#[tokio::test]
async fn unknown_recipe_is_404() {
    let response = test_router()
        .oneshot(Request::get("/api/recipes/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Recipe not found");
}

#[tokio::test]
async fn import_replaces_catalog_and_tags_records() {
    let router = test_router();
    let csv = "name,ingredients,required_cookware\n\
               Salmon Bake,\"salmon fillet, lemon\",sheet pan\n";
    let request = json_request("POST", "/api/import-recipes", json!({ "csvContent": csv }));

    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Successfully imported 1 recipes");

    let response = router
        .oneshot(Request::get("/api/recipes").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = json_body(response).await;
    let recipes = body.as_array().unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0]["name"], "Salmon Bake");
    // Classifier ran during import: salmon lands under protein/fish.
    assert_eq!(recipes[0]["protein_type"][0], "fish");
    assert_eq!(recipes[0]["protein_cut"][0], "salmon");
    assert_eq!(recipes[0]["cookware_category"][0], "cookware");
}
