use super::{AllergenDefinition, MealSuggestions, Severity};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn meals(breakfast: &[&str], lunch: &[&str], dinner: &[&str], snacks: &[&str]) -> MealSuggestions {
    MealSuggestions {
        breakfast: strings(breakfast),
        lunch: strings(lunch),
        dinner: strings(dinner),
        snacks: strings(snacks),
    }
}

pub(super) fn builtin_definitions() -> Vec<AllergenDefinition> {
    vec![
        AllergenDefinition {
            id: "milk".to_string(),
            aliases: strings(&["dairy", "lactose"]),
            keywords: strings(&[
                "milk", "dairy", "lactose", "casein", "whey", "butter", "cream", "cheese",
                "yogurt", "ghee", "buttermilk",
            ]),
            severity: Severity::High,
            alternatives: strings(&[
                "almond milk",
                "oat milk",
                "coconut milk",
                "soy milk",
                "rice milk",
                "dairy-free cheese",
                "coconut yogurt",
            ]),
            avoid: strings(&[
                "milk", "cheese", "butter", "cream", "yogurt", "ice cream", "whey protein",
            ]),
            meal_suggestions: meals(
                &["oatmeal with almond milk", "dairy-free smoothie", "avocado toast"],
                &["quinoa salad", "hummus wrap", "dairy-free soup"],
                &[
                    "grilled chicken with vegetables",
                    "dairy-free pasta",
                    "stir-fry with coconut milk",
                ],
                &["nuts", "fruits", "dairy-free crackers"],
            ),
            tips: strings(&[
                "Read labels for hidden dairy",
                "Try fortified plant milks for calcium",
                "Look for \"vegan\" labels",
            ]),
        },
        AllergenDefinition {
            id: "eggs".to_string(),
            aliases: strings(&["egg"]),
            keywords: strings(&["egg", "albumin", "lecithin", "mayonnaise", "meringue", "custard"]),
            severity: Severity::High,
            alternatives: strings(&[
                "flax eggs",
                "chia eggs",
                "applesauce",
                "mashed banana",
                "aquafaba",
                "tofu scramble",
            ]),
            avoid: strings(&["eggs", "mayonnaise", "custard", "meringue", "some baked goods"]),
            meal_suggestions: meals(
                &["chia pudding", "oatmeal", "smoothie bowl", "avocado toast"],
                &["quinoa bowl", "lentil soup", "vegetable wrap"],
                &["grilled fish with rice", "vegetable curry", "bean salad"],
                &["fruit", "nuts", "veggie sticks with hummus"],
            ),
            tips: strings(&[
                "Use flax eggs in baking",
                "Check vaccine ingredients",
                "Be careful with processed foods",
            ]),
        },
        AllergenDefinition {
            id: "fish".to_string(),
            aliases: vec![],
            keywords: strings(&[
                "fish", "salmon", "tuna", "cod", "anchovy", "sardine", "mackerel", "halibut",
            ]),
            severity: Severity::High,
            alternatives: strings(&["plant-based protein", "tofu", "tempeh", "legumes"]),
            avoid: strings(&[
                "fish",
                "salmon",
                "tuna",
                "anchovies",
                "fish sauce",
                "worcestershire sauce",
                "caesar dressing",
            ]),
            meal_suggestions: meals(
                &["oatmeal with berries", "scrambled tofu", "fruit smoothie"],
                &["chicken salad", "lentil soup", "bean burrito"],
                &["roast chicken with vegetables", "tofu stir-fry", "chickpea curry"],
                &["fruits", "rice cakes", "veggie sticks with hummus"],
            ),
            tips: strings(&[
                "Ask whether fryer oil is shared with fish",
                "Check sauces and dressings for anchovies",
                "Consider an algae-based omega-3 source",
            ]),
        },
        AllergenDefinition {
            id: "shellfish".to_string(),
            aliases: strings(&["seafood", "crustaceans"]),
            keywords: strings(&[
                "shellfish", "shrimp", "crab", "lobster", "clam", "oyster", "scallop", "mussels",
            ]),
            severity: Severity::High,
            alternatives: strings(&["mushrooms", "seaweed", "plant-based seafood"]),
            avoid: strings(&[
                "shrimp",
                "crab",
                "lobster",
                "clams",
                "oysters",
                "scallops",
                "mussels",
                "seafood stock",
            ]),
            meal_suggestions: meals(
                &["yogurt parfait", "oatmeal", "avocado toast"],
                &["mushroom risotto", "turkey sandwich", "quinoa bowl"],
                &["grilled chicken with rice", "mushroom pasta", "vegetable curry"],
                &["fruits", "seaweed snacks", "crackers"],
            ),
            tips: strings(&[
                "Avoid seafood restaurants where cross-contact is common",
                "Check Asian sauces and broths for shellfish extracts",
                "Inform restaurants about shellfish allergies",
            ]),
        },
        AllergenDefinition {
            id: "tree_nuts".to_string(),
            aliases: strings(&["nuts", "tree nuts", "tree nut"]),
            keywords: strings(&[
                "almond",
                "walnut",
                "cashew",
                "pecan",
                "pistachio",
                "brazil nut",
                "hazelnut",
                "macadamia",
                "pine nuts",
            ]),
            severity: Severity::High,
            alternatives: strings(&[
                "sunflower seeds",
                "pumpkin seeds",
                "hemp seeds",
                "tahini",
                "sunflower seed butter",
            ]),
            avoid: strings(&["almonds", "walnuts", "cashews", "pistachios", "hazelnuts", "pecans"]),
            meal_suggestions: meals(
                &["seed butter toast", "oatmeal with seeds", "fruit smoothie"],
                &["seed-based salad", "hummus wrap", "quinoa bowl"],
                &[
                    "grilled protein with vegetables",
                    "seed-crusted fish",
                    "vegetable stir-fry",
                ],
                &["sunflower seeds", "pumpkin seeds", "safe granola bars"],
            ),
            tips: strings(&[
                "Carry safe snacks",
                "Inform restaurants about tree nut allergies",
                "Check for cross-contamination",
            ]),
        },
        AllergenDefinition {
            id: "peanuts".to_string(),
            aliases: strings(&["peanut", "groundnuts"]),
            keywords: strings(&["peanut", "groundnut", "arachis", "peanut butter", "peanut oil"]),
            severity: Severity::High,
            alternatives: strings(&["sunflower seed butter", "almond butter", "tahini"]),
            avoid: strings(&[
                "peanuts",
                "peanut butter",
                "peanut oil",
                "satay sauce",
                "trail mix",
                "some candy bars",
            ]),
            meal_suggestions: meals(
                &["sunflower seed butter toast", "oatmeal", "fruit smoothie"],
                &["turkey wrap", "quinoa salad", "tomato soup"],
                &["baked salmon with rice", "vegetable curry", "pasta primavera"],
                &["fruits", "popcorn", "rice cakes"],
            ),
            tips: strings(&[
                "Check baked goods and candy for peanut traces",
                "Avoid bulk bins because of cross-contact",
                "Carry your emergency medication",
            ]),
        },
        AllergenDefinition {
            id: "wheat".to_string(),
            aliases: strings(&["gluten"]),
            keywords: strings(&[
                "wheat", "gluten", "flour", "bread", "pasta", "cereal", "barley", "rye", "spelt",
            ]),
            severity: Severity::Medium,
            alternatives: strings(&[
                "rice flour",
                "quinoa",
                "gluten-free oats",
                "almond flour",
                "rice",
                "corn",
                "potatoes",
                "coconut flour",
            ]),
            avoid: strings(&["wheat", "bread", "pasta", "cereal", "crackers", "beer", "soy sauce"]),
            meal_suggestions: meals(
                &["rice porridge", "gluten-free oats", "quinoa breakfast bowl"],
                &["rice bowl", "corn tortilla wrap", "potato salad"],
                &["rice noodles", "quinoa pilaf", "baked potato with toppings"],
                &["rice cakes", "corn chips", "fruits and vegetables"],
            ),
            tips: strings(&[
                "Look for certified gluten-free products",
                "Use alternative flours for baking",
                "Check medication ingredients",
            ]),
        },
        AllergenDefinition {
            id: "soy".to_string(),
            aliases: strings(&["soya"]),
            keywords: strings(&["soy", "soya", "tofu", "tempeh", "soy sauce", "edamame", "miso"]),
            severity: Severity::Medium,
            alternatives: strings(&[
                "coconut aminos",
                "chickpeas",
                "lentils",
                "hemp protein",
                "pea protein",
            ]),
            avoid: strings(&["soy sauce", "tofu", "tempeh", "edamame", "soy milk", "miso"]),
            meal_suggestions: meals(
                &["pea protein smoothie", "oatmeal", "fruit bowl"],
                &["chickpea salad", "lentil soup", "quinoa bowl"],
                &["grilled meat with vegetables", "coconut curry", "bean-based dishes"],
                &["nuts", "seeds", "fresh fruit"],
            ),
            tips: strings(&[
                "Use coconut aminos instead of soy sauce",
                "Check processed foods for soy lecithin",
                "Read supplement labels",
            ]),
        },
    ]
}
