//! Batch job: re-run the consolidated tag classifier over a persisted recipe
//! CSV and write the detailed three-level tag columns back out. Not part of
//! the live request path.

use anyhow::{Context, Result};
use csv::WriterBuilder;

use porkchop::catalog::{parse_catalog_csv, Recipe};
use porkchop::cli::parse_backfill_args;

fn list_cell(items: &[String]) -> Result<String> {
    serde_json::to_string(items).context("failed to encode list column")
}

fn write_tagged_csv(path: &str, recipes: &[Recipe]) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("failed to create output CSV '{}'", path))?;

    wtr.write_record([
        "id",
        "name",
        "description",
        "image_url",
        "ingredients",
        "steps",
        "prep_time",
        "cook_time",
        "servings",
        "required_cookware",
        "protein_tags",
        "veggie_tags",
        "herb_tags",
        "cuisine_type",
        "protein_category",
        "protein_type",
        "protein_cut",
        "veggie_category",
        "veggie_type",
        "veggie_variety",
        "pantry_category",
        "pantry_type",
        "pantry_variety",
        "dairy_category",
        "dairy_type",
        "dairy_variety",
        "fruit_category",
        "fruit_type",
        "fruit_variety",
        "cookware_category",
        "cookware_type",
        "cookware_variety",
    ])?;

    for recipe in recipes {
        let tags = &recipe.detailed_tags;
        wtr.write_record([
            recipe.id.clone(),
            recipe.name.clone(),
            recipe.description.clone(),
            recipe.image_url.clone(),
            list_cell(&recipe.ingredients)?,
            list_cell(&recipe.steps)?,
            recipe.prep_time.clone(),
            recipe.cook_time.clone(),
            recipe.servings.clone(),
            list_cell(&recipe.required_cookware)?,
            list_cell(&recipe.protein_tags)?,
            list_cell(&recipe.veggie_tags)?,
            list_cell(&recipe.herb_tags)?,
            recipe.cuisine_type.clone(),
            list_cell(&tags.protein_category)?,
            list_cell(&tags.protein_type)?,
            list_cell(&tags.protein_cut)?,
            list_cell(&tags.veggie_category)?,
            list_cell(&tags.veggie_type)?,
            list_cell(&tags.veggie_variety)?,
            list_cell(&tags.pantry_category)?,
            list_cell(&tags.pantry_type)?,
            list_cell(&tags.pantry_variety)?,
            list_cell(&tags.dairy_category)?,
            list_cell(&tags.dairy_type)?,
            list_cell(&tags.dairy_variety)?,
            list_cell(&tags.fruit_category)?,
            list_cell(&tags.fruit_type)?,
            list_cell(&tags.fruit_variety)?,
            list_cell(&tags.cookware_category)?,
            list_cell(&tags.cookware_type)?,
            list_cell(&tags.cookware_variety)?,
        ])?;
    }
    wtr.flush().context("failed to flush output CSV")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = parse_backfill_args();

    println!("Reading recipe catalog from '{}'...", args.input);
    let content = tokio::fs::read_to_string(&args.input)
        .await
        .with_context(|| format!("failed to read input CSV '{}'", args.input))?;
    let recipes = parse_catalog_csv(&content)
        .with_context(|| format!("failed to parse recipe CSV '{}'", args.input))?;
    println!("Found {} recipes to update", recipes.len());

    let mut tagged_count = 0usize;
    let total = recipes.len();
    let tagged: Vec<Recipe> = recipes
        .into_iter()
        .enumerate()
        .map(|(idx, recipe)| {
            let recipe = recipe.with_detailed_tags();
            if recipe.detailed_tags.is_empty() {
                println!(
                    "({}/{}) {}: no taxonomy matches, columns left empty",
                    idx + 1,
                    total,
                    recipe.name
                );
            } else {
                tagged_count += 1;
                println!(
                    "({}/{}) {}: protein={:?} veggie={:?} cookware={:?}",
                    idx + 1,
                    total,
                    recipe.name,
                    recipe.detailed_tags.protein_type,
                    recipe.detailed_tags.veggie_type,
                    recipe.detailed_tags.cookware_type
                );
            }
            recipe
        })
        .collect();

    write_tagged_csv(&args.output, &tagged)?;
    println!(
        "\nDone. {} of {} recipes tagged; output written to '{}'",
        tagged_count, total, args.output
    );
    Ok(())
}
