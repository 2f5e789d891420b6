use crate::profile::UserAllergyProfile;

fn allergies_or_none(profile: &UserAllergyProfile) -> String {
    if profile.is_empty() {
        "none reported".to_string()
    } else {
        profile.joined()
    }
}

pub fn analysis_prompt(ingredients: &[String], profile: &UserAllergyProfile) -> String {
    format!(
        "Analyze these food ingredients for allergens: {}

Known user allergies: {}

Identify potential allergens, assess safety, and provide recommendations. Focus on:
1. Common allergens (milk, eggs, nuts, soy, wheat, fish, shellfish)
2. Hidden allergen sources
3. Cross-contamination risks
4. Alternative suggestions",
        ingredients.join(", "),
        allergies_or_none(profile)
    )
}

pub fn plan_prompt(profile: &UserAllergyProfile) -> String {
    format!(
        "Create dietary recommendations for someone with allergies to: {}. Include safe foods, foods to avoid, and meal suggestions.",
        allergies_or_none(profile)
    )
}

pub fn assistant_prompt(message: &str, profile: &UserAllergyProfile) -> String {
    format!(
        "As an allergy specialist assistant, respond helpfully to: User allergies: {}. User message: {}",
        allergies_or_none(profile),
        message.trim()
    )
}
