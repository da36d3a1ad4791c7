//! Tag classifier: assigns a category/type/variety from a taxonomy grid to a
//! free-text ingredient or cookware name via case-folded substring
//! containment.
//!
//! Tie-break policy: longest-match-wins. When a text contains several type
//! keywords ("onion" and "garlic", say), the longest contained type name is
//! kept; declaration order only breaks exact length ties. The same rule picks
//! the variety within the winning type. Texts that contain no type keyword
//! fall back to a variety scan across the whole grid, so "spinach" still
//! classifies under veggies/leafy.
//!
//! One text yields at most one tag. A name hitting varieties in several
//! categories ("garlic butter", say) records only the winning one, so the
//! detailed tag columns are intentionally sparser than a
//! record-every-variety-hit scan would produce.

use serde::{Deserialize, Serialize};

use crate::taxonomy::Taxonomy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub category: &'static str,
    pub kind: &'static str,
    pub variety: Option<&'static str>,
}

fn contains_fold(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.contains(&needle.to_lowercase())
}

/// Classify a free-text name against a taxonomy grid. Empty or
/// whitespace-only text yields no tag.
pub fn classify(text: &str, taxonomy: &'static Taxonomy) -> Option<Tag> {
    let folded = text.trim().to_lowercase();
    if folded.is_empty() {
        return None;
    }

    // Pass 1: match on type names.
    let mut best: Option<Tag> = None;
    let mut best_len = 0usize;
    for cat in &taxonomy.categories {
        for kind in &cat.kinds {
            if contains_fold(&folded, kind.name) && kind.name.len() > best_len {
                best_len = kind.name.len();
                let variety = longest_variety(&folded, &kind.varieties);
                best = Some(Tag {
                    category: cat.name,
                    kind: kind.name,
                    variety,
                });
            }
        }
    }
    if best.is_some() {
        return best;
    }

    // Pass 2: no type keyword present; infer the type from a variety match.
    let mut best_variety_len = 0usize;
    for cat in &taxonomy.categories {
        for kind in &cat.kinds {
            for &variety in &kind.varieties {
                if contains_fold(&folded, variety) && variety.len() > best_variety_len {
                    best_variety_len = variety.len();
                    best = Some(Tag {
                        category: cat.name,
                        kind: kind.name,
                        variety: Some(variety),
                    });
                }
            }
        }
    }
    best
}

fn longest_variety(folded: &str, varieties: &[&'static str]) -> Option<&'static str> {
    let mut best: Option<&'static str> = None;
    let mut best_len = 0usize;
    for &variety in varieties {
        if contains_fold(folded, variety) && variety.len() > best_len {
            best_len = variety.len();
            best = Some(variety);
        }
    }
    best
}

/// The detailed three-level tag columns persisted alongside each recipe.
/// Column names follow the hosted-store schema: the protein grid's third
/// level is a "cut", every other category calls it a "variety".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailedTags {
    #[serde(default)]
    pub protein_category: Vec<String>,
    #[serde(default)]
    pub protein_type: Vec<String>,
    #[serde(default)]
    pub protein_cut: Vec<String>,
    #[serde(default)]
    pub veggie_category: Vec<String>,
    #[serde(default)]
    pub veggie_type: Vec<String>,
    #[serde(default)]
    pub veggie_variety: Vec<String>,
    #[serde(default)]
    pub pantry_category: Vec<String>,
    #[serde(default)]
    pub pantry_type: Vec<String>,
    #[serde(default)]
    pub pantry_variety: Vec<String>,
    #[serde(default)]
    pub dairy_category: Vec<String>,
    #[serde(default)]
    pub dairy_type: Vec<String>,
    #[serde(default)]
    pub dairy_variety: Vec<String>,
    #[serde(default)]
    pub fruit_category: Vec<String>,
    #[serde(default)]
    pub fruit_type: Vec<String>,
    #[serde(default)]
    pub fruit_variety: Vec<String>,
    #[serde(default)]
    pub cookware_category: Vec<String>,
    #[serde(default)]
    pub cookware_type: Vec<String>,
    #[serde(default)]
    pub cookware_variety: Vec<String>,
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

impl DetailedTags {
    pub fn is_empty(&self) -> bool {
        *self == DetailedTags::default()
    }

    fn record(&mut self, tag: &Tag) {
        let (category_col, type_col, variety_col) = match tag.category {
            "protein" => (
                &mut self.protein_category,
                &mut self.protein_type,
                &mut self.protein_cut,
            ),
            "veggies" => (
                &mut self.veggie_category,
                &mut self.veggie_type,
                &mut self.veggie_variety,
            ),
            "pantry" => (
                &mut self.pantry_category,
                &mut self.pantry_type,
                &mut self.pantry_variety,
            ),
            "dairy" => (
                &mut self.dairy_category,
                &mut self.dairy_type,
                &mut self.dairy_variety,
            ),
            "fruit" => (
                &mut self.fruit_category,
                &mut self.fruit_type,
                &mut self.fruit_variety,
            ),
            "cookware" => (
                &mut self.cookware_category,
                &mut self.cookware_type,
                &mut self.cookware_variety,
            ),
            _ => return,
        };
        push_unique(category_col, tag.category);
        push_unique(type_col, tag.kind);
        if let Some(variety) = tag.variety {
            push_unique(variety_col, variety);
        }
    }

    /// Generate the detailed tag columns for one recipe from its coarse tag
    /// lists, free-text ingredients, and required cookware.
    pub fn for_recipe(
        protein_tags: &[String],
        veggie_tags: &[String],
        herb_tags: &[String],
        ingredients: &[String],
        required_cookware: &[String],
    ) -> Self {
        let taxonomy = crate::taxonomy::ingredient_taxonomy();
        let mut tags = DetailedTags::default();

        // Coarse protein tags always mark the protein category, even when the
        // tag text matches no type keyword.
        for tag_text in protein_tags {
            push_unique(&mut tags.protein_category, "protein");
            if let Some(tag) = classify(tag_text, taxonomy) {
                if tag.category == "protein" {
                    tags.record(&tag);
                }
            }
        }
        for tag_text in veggie_tags {
            push_unique(&mut tags.veggie_category, "veggies");
            if let Some(tag) = classify(tag_text, taxonomy) {
                if tag.category == "veggies" {
                    tags.record(&tag);
                }
            }
        }

        for text in herb_tags.iter().chain(ingredients.iter()) {
            if let Some(tag) = classify(text, taxonomy) {
                tags.record(&tag);
            }
        }

        for text in required_cookware {
            if let Some(tag) = classify(text, taxonomy) {
                if tag.category == "cookware" {
                    tags.record(&tag);
                }
            }
        }

        tags
    }
}
