use serde_json::json;

use crate::domain::{
    preferences::entities::UserPreferences,
    scan::entities::{Ingredient, ScanResult},
};

pub const EXTRACTION_TEMPERATURE: f32 = 0.1;
pub const EXTRACTION_MAX_TOKENS: u32 = 2048;
pub const INGREDIENT_TEMPERATURE: f32 = 0.1;
pub const INGREDIENT_MAX_TOKENS: u32 = 2048;
pub const CLAIM_TEMPERATURE: f32 = 0.1;
pub const CLAIM_MAX_TOKENS: u32 = 1024;
pub const PERSONALIZATION_TEMPERATURE: f32 = 0.2;
pub const PERSONALIZATION_MAX_TOKENS: u32 = 1024;
pub const CHAT_TEMPERATURE: f32 = 0.3;
pub const CHAT_MAX_TOKENS: u32 = 512;

/// Prompt for the extraction stage; sent together with the front and back
/// product images.
pub fn extraction_prompt() -> String {
    r#"Analyze these product images and extract information. Return ONLY a valid JSON object with this exact structure:
{
  "productName": "extracted product name",
  "brand": "extracted brand name",
  "claims": ["list", "of", "health", "claims"],
  "ingredients": ["list", "of", "ingredients"],
  "nutritionFacts": {
    "calories": "value if available",
    "protein": "value if available",
    "carbs": "value if available",
    "fat": "value if available"
  }
}

From the front image: Extract product name, brand, and all visible health/marketing claims.
From the back image: Extract ingredients list and nutrition facts if visible."#
        .to_string()
}

/// Prompt for one ingredient analysis batch.
pub fn ingredient_batch_prompt(names: &[String]) -> String {
    format!(
        r#"Analyze these food ingredients and return ONLY a valid JSON array with this exact structure:
[
  {{
    "name": "ingredient name",
    "purpose": "why it's used in food",
    "origin": "natural/synthetic/processed",
    "controversy": "any known issues or none",
    "legalStatus": {{
      "bannedCountries": ["list of countries where this ingredient is banned", "or empty array if not banned anywhere"]
    }},
    "safeLimit": "daily safe amount or general guideline",
    "riskLevel": "Low/Moderate/High"
  }}
]

Ingredients to analyze: {}

For each ingredient:
1. Research and list ALL countries where the ingredient is currently banned or heavily restricted
2. If no countries have banned the ingredient, return an empty array for bannedCountries
3. Include both full country names and common abbreviations (e.g. "United States (USA)")
4. Provide factual, concise information for each ingredient"#,
        names.join(", ")
    )
}

/// Prompt for the claim verification stage.
pub fn claim_verification_prompt(claims: &[String], ingredients: &[Ingredient]) -> String {
    let ingredient_names = ingredients
        .iter()
        .map(|i| i.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let numbered_claims = claims
        .iter()
        .enumerate()
        .map(|(index, claim)| format!("{}. {claim}", index + 1))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Analyze these product claims based on the ingredients. Return ONLY a valid JSON array with this exact structure:
[
  {{
    "claim": "exact claim text",
    "verdict": "True",
    "reason": "explanation for verdict"
  }}
]

Ingredients present: {ingredient_names}

Claims to verify:
{numbered_claims}

For each claim, determine if it's "True", "False", or "Misleading" based on the ingredients list. Provide a clear reason for each verdict."#
    )
}

/// Prompt for the personalization engine, combining the scan result with
/// the user's health profile.
pub fn personalization_prompt(result: &ScanResult, preferences: &UserPreferences) -> String {
    let product = json!({
        "productName": result.product_name,
        "brand": result.brand,
        "ingredients": result.ingredients,
        "nutritionFacts": result.nutrition_facts,
        "claims": result.claims,
    });
    let profile = json!({
        "healthConcerns": preferences.health_concerns,
        "allergies": preferences.allergies,
        "dietaryPreferences": preferences.dietary_preferences,
    });

    format!(
        r#"Analyze this product specifically for this user's health profile and preferences. Return ONLY a valid JSON object with this exact structure:
{{
  "concerns": [
    {{
      "issue": "brief issue description",
      "explanation": "detailed explanation"
    }}
  ],
  "recommendations": [
    "specific recommendation"
  ],
  "compatibility": "High/Moderate/Low"
}}

Product Information:
{}

User Health Profile:
{}

Guidelines:
1. Focus on ingredients and nutrition that specifically relate to the user's health concerns, allergies, and dietary preferences
2. Flag any ingredients that might conflict with their health conditions
3. Consider their dietary restrictions when determining compatibility
4. Provide specific, actionable recommendations
5. Keep explanations concise but informative"#,
        serde_json::to_string_pretty(&product).unwrap_or_default(),
        serde_json::to_string_pretty(&profile).unwrap_or_default(),
    )
}

/// Prompt for the product assistant. Domain-restricted: anything outside
/// product analysis gets a fixed refusal line.
pub fn chat_prompt(result: &ScanResult, question: &str) -> String {
    format!(
        r#"You are a concise product analysis assistant focused ONLY on analyzing food and beverage products. Your domain is strictly limited to:
- Ingredients analysis
- Nutritional information
- Health claims verification
- Product safety
- Allergens
- Food regulations
- Product composition

Product Information:
{}

Guidelines:
- Keep responses under 3 sentences when possible
- Use bullet points for lists
- Focus on facts, not opinions
- Include numbers and specifics when available
- No disclaimers unless critical for health/safety
- Be direct and clear

IMPORTANT: If the user asks about anything unrelated to food product analysis (e.g., general chat, personal advice, cooking recipes, other topics), respond ONLY with:
"I can only help with questions about this product's ingredients, nutrition, and health claims. Please ask something specific about the product."

User Question: {question}

Remember: Be brief, specific, and informative. Stay within the product analysis domain."#,
        serde_json::to_string_pretty(result).unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingredient_prompt_lists_the_batch() {
        let prompt = ingredient_batch_prompt(&["Sugar".to_string(), "Salt".to_string()]);
        assert!(prompt.contains("Ingredients to analyze: Sugar, Salt"));
    }

    #[test]
    fn claim_prompt_numbers_claims_in_order() {
        let claims = vec!["All natural".to_string(), "No added sugar".to_string()];
        let prompt = claim_verification_prompt(&claims, &[]);

        assert!(prompt.contains("1. All natural"));
        assert!(prompt.contains("2. No added sugar"));
    }
}
