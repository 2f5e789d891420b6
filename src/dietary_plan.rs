//! Expands a user's allergy list into a two-day rotating dietary plan.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::enrichment::AI_DISCLAIMER;
use crate::knowledge::{KnowledgeBase, MealKind};
use crate::profile::UserAllergyProfile;

pub const DEFAULT_ITEMS_PER_DAY: usize = 3;
pub const PLAN_DAYS: usize = 2;

// Fixed for every profile; the engine does not tailor supplementation advice.
pub const SUPPLEMENTATION_NOTES: [&str; 3] = [
    "Discuss vitamin and mineral supplementation with your healthcare provider before starting any supplement.",
    "Prefer fortified alternatives (plant milks, cereals) to replace nutrients from avoided foods.",
    "Check supplement labels for hidden allergens such as lactose, soy lecithin or fish oil.",
];

const GENERAL_SAFE_FOODS: [&str; 5] = [
    "fresh fruits",
    "fresh vegetables",
    "plain rice",
    "plain potatoes",
    "lean meats",
];
const GENERAL_AVOID: [&str; 3] = [
    "processed foods with unclear ingredients",
    "foods without labels",
    "cross-contaminated items",
];
const GENERAL_TIPS: [&str; 6] = [
    "Always read food labels carefully",
    "Inform restaurants about your allergies",
    "Carry emergency medication",
    "Use dedicated cooking utensils",
    "Store allergen-free foods separately",
    "Keep a food diary to track reactions",
];

// (meal, day 1 items, day 2 items) for the generic healthy plan.
const GENERIC_MEAL_PLAN: [(MealKind, [&str; 2], [&str; 2]); 4] = [
    (
        MealKind::Breakfast,
        ["oatmeal with fresh fruit", "whole grain toast"],
        ["yogurt with berries", "scrambled eggs"],
    ),
    (
        MealKind::Lunch,
        ["grilled chicken salad", "vegetable soup"],
        ["rice bowl with vegetables", "lentil salad"],
    ),
    (
        MealKind::Dinner,
        ["baked fish with vegetables", "brown rice"],
        ["lean beef stir-fry", "roasted potatoes"],
    ),
    (
        MealKind::Snacks,
        ["fresh fruit", "vegetable sticks"],
        ["plain popcorn", "rice cakes"],
    ),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    pub meal: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDay {
    pub day: String,
    pub meals: Vec<Meal>,
}

/// A guidance card, one per recognised allergy plus a general-safety card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietaryRecommendation {
    pub id: String,
    pub category: String,
    pub title: String,
    pub description: String,
    pub foods: Vec<String>,
    pub avoid: Vec<String>,
    pub tips: Vec<String>,
    pub safety_score: u8,
    pub allergen_specific: bool,
}

/// A simple dish built around safe foods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeRecipe {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub cook_time: String,
    pub difficulty: String,
    pub servings: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietaryPlan {
    pub restrictions: Vec<String>,
    pub alternatives: Vec<String>,
    pub supplementation_notes: Vec<String>,
    pub meal_plan: Vec<PlanDay>,
    pub shopping_list: Vec<String>,
    pub guidance: Vec<DietaryRecommendation>,
    pub safe_recipes: Vec<SafeRecipe>,
    pub ai_enhanced: bool,
}

impl DietaryPlan {
    /// Prepends a clearly labelled, non-authoritative guidance card.
    /// Restrictions, alternatives and the meal plan are left untouched.
    pub fn with_ai_insight(mut self, insight: String) -> Self {
        self.guidance.insert(
            0,
            DietaryRecommendation {
                id: "ai-insights".to_string(),
                category: "AI Enhanced Recommendations".to_string(),
                title: "Personalized AI Guidance".to_string(),
                description: format!("{}: {}", AI_DISCLAIMER, insight),
                foods: vec![],
                avoid: vec![],
                tips: vec![],
                safety_score: 85,
                allergen_specific: true,
            },
        );
        self.ai_enhanced = true;
        self
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn extend_unique(target: &mut Vec<String>, items: &[String]) {
    for item in items {
        if !target.contains(item) {
            target.push(item.clone());
        }
    }
}

fn general_safety_card() -> DietaryRecommendation {
    DietaryRecommendation {
        id: "general-safety".to_string(),
        category: "General Food Safety".to_string(),
        title: "Universal Allergy Safety Tips".to_string(),
        description: "Essential practices for managing food allergies safely in daily life.".to_string(),
        foods: to_strings(&GENERAL_SAFE_FOODS),
        avoid: to_strings(&GENERAL_AVOID),
        tips: to_strings(&GENERAL_TIPS),
        safety_score: 95,
        allergen_specific: false,
    }
}

const RECIPE_INGREDIENT_LIMIT: usize = 4;

// (id, name, category, description, ingredients, cook time, servings)
const GENERAL_RECIPES: [(&str, &str, MealKind, &str, [&str; 4], &str, u8); 2] = [
    (
        "safe-rice-bowl",
        "Safe Rice & Vegetable Bowl",
        MealKind::Lunch,
        "A simple, allergy-friendly rice bowl with safe vegetables.",
        ["white rice", "carrots", "broccoli", "olive oil"],
        "25 minutes",
        2,
    ),
    (
        "quinoa-salad",
        "Quinoa Power Salad",
        MealKind::Dinner,
        "Protein-rich quinoa salad with fresh vegetables.",
        ["quinoa", "cucumber", "tomatoes", "lemon juice"],
        "20 minutes",
        3,
    ),
];

fn general_recipes() -> Vec<SafeRecipe> {
    GENERAL_RECIPES
        .iter()
        .map(|(id, name, category, description, ingredients, cook_time, servings)| SafeRecipe {
            id: id.to_string(),
            name: name.to_string(),
            category: category.label().to_string(),
            description: description.to_string(),
            ingredients: to_strings(ingredients),
            cook_time: cook_time.to_string(),
            difficulty: "Easy".to_string(),
            servings: *servings,
        })
        .collect()
}

/// A bowl built on the first safe alternative; `None` when there is none.
fn allergy_recipe(index: usize, allergy: &str, alternatives: &[String]) -> Option<SafeRecipe> {
    let main = alternatives.first()?;
    let category = if index % 2 == 0 { MealKind::Lunch } else { MealKind::Dinner };
    Some(SafeRecipe {
        id: format!("recipe-{}", index),
        name: format!("{}-Free {} Bowl", allergy, main),
        category: category.label().to_string(),
        description: format!(
            "A nutritious and safe meal featuring {} as the main ingredient, completely free from {}.",
            main, allergy
        ),
        ingredients: alternatives.iter().take(RECIPE_INGREDIENT_LIMIT).cloned().collect(),
        cook_time: "15-20 minutes".to_string(),
        difficulty: "Easy".to_string(),
        servings: 2,
    })
}

fn day_label(day: usize) -> String {
    format!("Day {}", day + 1)
}

/// Cuts each meal bucket into consecutive `items_per_day` slices, one per day.
/// Meals with nothing left for a day are omitted, as are empty days.
fn shape_days(buckets: &[(MealKind, Vec<String>)], items_per_day: usize) -> Vec<PlanDay> {
    (0..PLAN_DAYS)
        .filter_map(|day| {
            let meals: Vec<Meal> = buckets
                .iter()
                .filter_map(|(kind, items)| {
                    let day_items: Vec<String> = items
                        .iter()
                        .skip(day * items_per_day)
                        .take(items_per_day)
                        .cloned()
                        .collect();
                    (!day_items.is_empty()).then(|| Meal {
                        meal: kind.label().to_string(),
                        items: day_items,
                    })
                })
                .collect();
            (!meals.is_empty()).then(|| PlanDay {
                day: day_label(day),
                meals,
            })
        })
        .collect()
}

pub fn generic_plan() -> DietaryPlan {
    let meal_plan = (0..PLAN_DAYS)
        .map(|day| PlanDay {
            day: day_label(day),
            meals: GENERIC_MEAL_PLAN
                .iter()
                .map(|(kind, first, second)| Meal {
                    meal: kind.label().to_string(),
                    items: to_strings(if day == 0 { first } else { second }),
                })
                .collect(),
        })
        .collect();

    DietaryPlan {
        restrictions: to_strings(&GENERAL_AVOID),
        alternatives: to_strings(&GENERAL_SAFE_FOODS),
        supplementation_notes: to_strings(&SUPPLEMENTATION_NOTES),
        meal_plan,
        shopping_list: to_strings(&GENERAL_SAFE_FOODS),
        guidance: vec![general_safety_card()],
        safe_recipes: general_recipes(),
        ai_enhanced: false,
    }
}

/// Builds plans from the knowledge base.
#[derive(Debug, Clone, Copy)]
pub struct PlanGenerator<'a> {
    knowledge_base: &'a KnowledgeBase,
    items_per_day: usize,
}

impl<'a> PlanGenerator<'a> {
    pub fn new(knowledge_base: &'a KnowledgeBase, items_per_day: usize) -> Self {
        Self {
            knowledge_base,
            items_per_day: items_per_day.max(1),
        }
    }

    pub fn generate(&self, profile: &UserAllergyProfile) -> DietaryPlan {
        if profile.is_empty() {
            return generic_plan();
        }

        let mut restrictions = Vec::new();
        let mut alternatives = Vec::new();
        let mut guidance = Vec::new();
        let mut safe_recipes = Vec::new();
        let mut buckets: Vec<(MealKind, Vec<String>)> =
            MealKind::ALL.iter().map(|kind| (*kind, Vec::new())).collect();
        let mut processed: HashSet<&str> = HashSet::new();

        for (index, name) in profile.allergies().iter().enumerate() {
            let Some(definition) = self.knowledge_base.lookup(name) else {
                tracing::debug!(allergy = %name, "Allergy not in knowledge base, using generic restriction");
                extend_unique(&mut restrictions, &[format!("all {} products", name)]);
                continue;
            };
            if !processed.insert(definition.id.as_str()) {
                continue;
            }

            extend_unique(&mut alternatives, &definition.alternatives);
            extend_unique(&mut restrictions, &definition.avoid);
            for (kind, bucket) in buckets.iter_mut() {
                extend_unique(bucket, definition.meal_suggestions.for_meal(*kind));
            }

            safe_recipes.extend(allergy_recipe(index, name, &definition.alternatives));
            guidance.push(DietaryRecommendation {
                id: format!("rec-{}", index),
                category: format!("{} Management", name),
                title: format!("Safe Foods for {} Allergy", name),
                description: format!(
                    "Comprehensive dietary guidance for managing {} allergies with safe alternatives and meal suggestions.",
                    name
                ),
                foods: definition.alternatives.clone(),
                avoid: definition.avoid.clone(),
                tips: definition.tips.clone(),
                safety_score: 90,
                allergen_specific: true,
            });
        }
        guidance.push(general_safety_card());
        safe_recipes.extend(general_recipes());

        DietaryPlan {
            meal_plan: shape_days(&buckets, self.items_per_day),
            shopping_list: alternatives.clone(),
            restrictions,
            alternatives,
            supplementation_notes: to_strings(&SUPPLEMENTATION_NOTES),
            guidance,
            safe_recipes,
            ai_enhanced: false,
        }
    }

    /// False when `food_item` contains a food to avoid for any recognised allergy.
    pub fn check_food_safety(&self, food_item: &str, profile: &UserAllergyProfile) -> bool {
        let item = food_item.to_lowercase();
        !profile
            .allergies()
            .iter()
            .filter_map(|name| self.knowledge_base.lookup(name))
            .any(|definition| definition.avoid.iter().any(|avoid| item.contains(&avoid.to_lowercase())))
    }
}
