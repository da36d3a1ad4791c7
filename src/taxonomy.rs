//! Fixed three-level classification grids (category -> type -> variety) for
//! ingredients and cookware. Built once, immutable for the process lifetime.
//! All classification call sites share these two tables.

use once_cell::sync::Lazy;

#[derive(Debug, Clone)]
pub struct Kind {
    pub name: &'static str,
    pub varieties: Vec<&'static str>,
}

#[derive(Debug, Clone)]
pub struct Category {
    pub name: &'static str,
    pub kinds: Vec<Kind>,
}

#[derive(Debug, Clone)]
pub struct Taxonomy {
    pub categories: Vec<Category>,
}

impl Taxonomy {
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }
}

fn kind(name: &'static str, varieties: [&'static str; 6]) -> Kind {
    Kind {
        name,
        varieties: varieties.to_vec(),
    }
}

fn category(name: &'static str, kinds: [Kind; 6]) -> Category {
    Category {
        name,
        kinds: kinds.to_vec(),
    }
}

static INGREDIENT_TAXONOMY: Lazy<Taxonomy> = Lazy::new(|| Taxonomy {
    categories: vec![
        category(
            "protein",
            [
                kind("beef", ["ground", "steak", "roast", "ribs", "brisket", "other"]),
                kind("chicken", ["breast", "thigh", "drumstick", "wing", "whole", "ground"]),
                kind("pork", ["chop", "loin", "shoulder", "belly", "ground", "ribs"]),
                kind("fish", ["salmon", "tuna", "cod", "tilapia", "halibut", "other"]),
                kind("tofu", ["firm", "silken", "extra-firm", "smoked", "fried", "other"]),
                kind("eggs", ["whole", "white", "yolk", "boiled", "poached", "other"]),
            ],
        ),
        category(
            "veggies",
            [
                kind("leafy", ["spinach", "kale", "lettuce", "arugula", "chard", "cabbage"]),
                kind("root", ["carrot", "potato", "onion", "radish", "beet", "turnip"]),
                kind(
                    "cruciferous",
                    ["broccoli", "cauliflower", "brussels", "kohlrabi", "bokchoy", "collard"],
                ),
                kind("squash", ["zucchini", "butternut", "acorn", "spaghetti", "pumpkin", "yellow"]),
                kind("peppers", ["bell", "jalapeno", "habanero", "serrano", "poblano", "cayenne"]),
                kind("alliums", ["onion", "garlic", "shallot", "leek", "scallion", "chive"]),
            ],
        ),
        category(
            "pantry",
            [
                kind("grains", ["rice", "quinoa", "barley", "farro", "oats", "bulgur"]),
                kind("pasta", ["spaghetti", "penne", "fettuccine", "macaroni", "lasagna", "orzo"]),
                kind("canned", ["beans", "tomatoes", "corn", "tuna", "soup", "coconut_milk"]),
                kind("spices", ["paprika", "cumin", "cinnamon", "turmeric", "oregano", "basil"]),
                kind("oils", ["olive", "vegetable", "coconut", "sesame", "avocado", "peanut"]),
                kind(
                    "baking",
                    ["flour", "sugar", "baking_powder", "baking_soda", "yeast", "vanilla"],
                ),
            ],
        ),
        category(
            "dairy",
            [
                kind("milk", ["whole", "skim", "almond", "soy", "oat", "coconut"]),
                kind("cheese", ["cheddar", "mozzarella", "parmesan", "feta", "gouda", "blue"]),
                kind("yogurt", ["greek", "regular", "coconut", "almond", "kefir", "skyr"]),
                kind(
                    "butter",
                    ["salted", "unsalted", "clarified", "plant-based", "whipped", "cultured"],
                ),
                kind(
                    "cream",
                    ["heavy", "light", "sour", "whipped", "half-and-half", "creme_fraiche"],
                ),
                kind("alternatives", ["almond", "soy", "oat", "coconut", "cashew", "rice"]),
            ],
        ),
        category(
            "fruit",
            [
                kind(
                    "berries",
                    ["strawberry", "blueberry", "raspberry", "blackberry", "cranberry", "acai"],
                ),
                kind("citrus", ["orange", "lemon", "lime", "grapefruit", "tangerine", "kumquat"]),
                kind(
                    "tropical",
                    ["banana", "pineapple", "mango", "papaya", "kiwi", "passion_fruit"],
                ),
                kind("pome", ["apple", "pear", "quince", "crabapple", "medlar", "loquat"]),
                kind("stone", ["peach", "plum", "cherry", "apricot", "nectarine", "mango"]),
                kind(
                    "melons",
                    ["watermelon", "cantaloupe", "honeydew", "casaba", "crenshaw", "galia"],
                ),
            ],
        ),
        category(
            "cookware",
            [
                kind("pots", ["stock", "sauce", "dutch", "pressure", "slow", "multi"]),
                kind("pans", ["frying", "saute", "grill", "griddle", "wok", "crepe"]),
                kind("bakeware", ["sheet", "cake", "muffin", "loaf", "casserole", "pie"]),
                kind("utensils", ["spatula", "whisk", "tongs", "ladle", "spoon", "turner"]),
                kind(
                    "appliances",
                    ["blender", "mixer", "processor", "toaster", "microwave", "airfryer"],
                ),
                kind("knives", ["chef", "paring", "bread", "utility", "santoku", "cleaver"]),
            ],
        ),
    ],
});

static COOKWARE_TAXONOMY: Lazy<Taxonomy> = Lazy::new(|| Taxonomy {
    categories: vec![
        category(
            "pots",
            [
                kind("stock", ["stainless", "aluminum", "nonstick", "ceramic", "enamel", "copper"]),
                kind("sauce", ["small", "medium", "large", "stainless", "nonstick", "copper"]),
                kind("dutch", ["cast_iron", "enamel", "small", "medium", "large", "oval"]),
                kind("pressure", ["electric", "stovetop", "small", "medium", "large", "multi"]),
                kind("slow", ["small", "medium", "large", "programmable", "manual", "travel"]),
                kind("multi", ["instant", "ninja", "small", "medium", "large", "deluxe"]),
            ],
        ),
        category(
            "pans",
            [
                kind("frying", ["cast_iron", "nonstick", "stainless", "small", "medium", "large"]),
                kind("saute", ["stainless", "nonstick", "small", "medium", "large", "copper"]),
                kind("grill", ["cast_iron", "nonstick", "ridged", "flat", "reversible", "electric"]),
                kind(
                    "griddle",
                    ["cast_iron", "nonstick", "electric", "stovetop", "double", "reversible"],
                ),
                kind("wok", ["carbon", "cast_iron", "nonstick", "flat", "round", "electric"]),
                kind("crepe", ["nonstick", "cast_iron", "electric", "carbon", "small", "large"]),
            ],
        ),
        category(
            "bakeware",
            [
                kind("sheet", ["aluminum", "nonstick", "insulated", "small", "medium", "large"]),
                kind("cake", ["round", "square", "springform", "bundt", "sheet", "layer"]),
                kind("muffin", ["standard", "mini", "jumbo", "silicone", "nonstick", "metal"]),
                kind("loaf", ["standard", "mini", "pullman", "silicone", "nonstick", "glass"]),
                kind("casserole", ["glass", "ceramic", "metal", "small", "medium", "large"]),
                kind("pie", ["glass", "ceramic", "metal", "deep", "standard", "mini"]),
            ],
        ),
        category(
            "utensils",
            [
                kind("spatula", ["silicone", "metal", "wood", "plastic", "fish", "offset"]),
                kind("whisk", ["balloon", "french", "flat", "silicone", "metal", "mini"]),
                kind("tongs", ["metal", "silicone", "locking", "long", "short", "bbq"]),
                kind("ladle", ["metal", "silicone", "plastic", "small", "large", "soup"]),
                kind("spoon", ["wood", "metal", "silicone", "slotted", "solid", "serving"]),
                kind("turner", ["metal", "silicone", "plastic", "slotted", "solid", "fish"]),
            ],
        ),
        category(
            "appliances",
            [
                kind(
                    "blender",
                    ["countertop", "immersion", "personal", "high_speed", "standard", "professional"],
                ),
                kind(
                    "mixer",
                    ["stand", "hand", "kitchenaid", "planetary", "compact", "professional"],
                ),
                kind(
                    "processor",
                    ["full_size", "mini", "chopper", "manual", "electric", "professional"],
                ),
                kind(
                    "toaster",
                    ["two_slice", "four_slice", "toaster_oven", "convection", "smart", "retro"],
                ),
                kind(
                    "microwave",
                    ["countertop", "built_in", "convection", "small", "medium", "large"],
                ),
                kind("airfryer", ["basket", "oven", "combo", "small", "medium", "large"]),
            ],
        ),
        category(
            "knives",
            [
                kind("chef", ["german", "japanese", "small", "medium", "large", "carbon"]),
                kind(
                    "paring",
                    ["straight", "bird_beak", "sheep_foot", "small", "medium", "ceramic"],
                ),
                kind("bread", ["serrated", "offset", "straight", "short", "medium", "long"]),
                kind("utility", ["straight", "serrated", "small", "medium", "japanese", "german"]),
                kind("santoku", ["traditional", "hollow", "small", "medium", "large", "damascus"]),
                kind("cleaver", ["chinese", "butcher", "vegetable", "small", "medium", "large"]),
            ],
        ),
    ],
});

/// The shared ingredient grid: protein, veggies, pantry, dairy, fruit, cookware.
pub fn ingredient_taxonomy() -> &'static Taxonomy {
    &INGREDIENT_TAXONOMY
}

/// The shared cookware grid: pots, pans, bakeware, utensils, appliances, knives.
pub fn cookware_taxonomy() -> &'static Taxonomy {
    &COOKWARE_TAXONOMY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingredient_grid_is_six_by_six_by_six() {
        let taxonomy = ingredient_taxonomy();
        assert_eq!(taxonomy.categories.len(), 6);
        for cat in &taxonomy.categories {
            assert_eq!(cat.kinds.len(), 6, "category '{}'", cat.name);
            for kind in &cat.kinds {
                assert_eq!(kind.varieties.len(), 6, "type '{}.{}'", cat.name, kind.name);
            }
        }
    }

    #[test]
    fn cookware_grid_is_six_by_six_by_six() {
        let taxonomy = cookware_taxonomy();
        assert_eq!(taxonomy.categories.len(), 6);
        for cat in &taxonomy.categories {
            assert_eq!(cat.kinds.len(), 6, "category '{}'", cat.name);
            for kind in &cat.kinds {
                assert_eq!(kind.varieties.len(), 6, "type '{}.{}'", cat.name, kind.name);
            }
        }
    }

    #[test]
    fn category_lookup_by_name() {
        let taxonomy = ingredient_taxonomy();
        assert!(taxonomy.category("protein").is_some());
        assert!(taxonomy.category("knives").is_none());
        assert!(cookware_taxonomy().category("knives").is_some());
    }
}
