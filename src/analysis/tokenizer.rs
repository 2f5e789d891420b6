const SEPARATORS: [char; 4] = [',', ';', '.', '\n'];

/// Splits free-text ingredient lists into cleaned tokens.
///
/// Tokens are trimmed; empty tokens and tokens made only of digits are dropped.
/// A decimal such as "2.5%" is split at the dot, so "2" is dropped and "5%" kept.
pub fn parse_ingredients_text(text: &str) -> Vec<String> {
    text.split(SEPARATORS)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter(|token| !token.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
        .collect()
}

/// Cleans an already-split ingredient list, re-splitting any entry that still
/// contains separators.
pub fn clean_ingredients<S: AsRef<str>>(ingredients: &[S]) -> Vec<String> {
    ingredients
        .iter()
        .flat_map(|raw| parse_ingredients_text(raw.as_ref()))
        .collect()
}
