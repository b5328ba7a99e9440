use crate::domain::scan::entities::{Ingredient, RiskLevel};

const BENEFIT_KEYWORDS: [&str; 6] = [
    "nutrient",
    "vitamin",
    "mineral",
    "fiber",
    "protein",
    "antioxidant",
];
const ADDITIVE_KEYWORDS: [&str; 4] = ["preservative", "color", "texture", "flavor"];

/// Composite health score over the analyzed ingredient list.
///
/// Pure and fully deterministic: identical ingredient data always yields
/// the identical integer. Starts from a neutral 50 and applies six
/// independently clamped additive factors, then clamps the total to
/// [0, 100].
pub fn health_score(ingredients: &[Ingredient]) -> u8 {
    let mut score: i32 = 50;

    // 1. Processing impact, clamped to [-20, +10].
    let processing: i32 = ingredients
        .iter()
        .map(|i| match normalized(i.origin.as_deref()).as_str() {
            "natural" | "minimally processed" => 2,
            "processed" => -2,
            "highly processed" | "synthetic" => -4,
            _ => 0,
        })
        .sum();
    score += processing.clamp(-20, 10);

    // 2. Legal restriction impact, -3 per banned country, floored at -15.
    // Never positive, so no upper clamp is needed.
    let banned: i32 = ingredients
        .iter()
        .map(|i| -3 * i.legal_status.banned_countries.len() as i32)
        .sum();
    score += banned.max(-15);

    // 3. Risk level impact, clamped to [-20, +10]. Unknown risk is
    // neutral.
    let risk: i32 = ingredients
        .iter()
        .map(|i| match i.risk_level {
            Some(RiskLevel::Low) => 2,
            Some(RiskLevel::Moderate) => -2,
            Some(RiskLevel::High) => -4,
            None => 0,
        })
        .sum();
    score += risk.clamp(-20, 10);

    // 4. Controversy impact, -2 per flagged ingredient, floored at -10.
    let controversy: i32 = ingredients
        .iter()
        .filter(|i| {
            i.controversy
                .as_deref()
                .is_some_and(|text| !text.is_empty() && text != "No data available")
        })
        .count() as i32
        * -2;
    score += controversy.max(-10);

    // 5. Purpose/benefit keyword impact, clamped to [0, +15]. The first
    // matching category wins per ingredient.
    let benefit: i32 = ingredients
        .iter()
        .map(|i| {
            let purpose = normalized(i.purpose.as_deref());
            if BENEFIT_KEYWORDS.iter().any(|k| purpose.contains(k)) {
                3
            } else if ADDITIVE_KEYWORDS.iter().any(|k| purpose.contains(k)) {
                -1
            } else {
                0
            }
        })
        .sum();
    score += benefit.clamp(0, 15);

    // 6. Safe-limit keyword impact, clamped to [-10, +10]. "unlimited"
    // contains "limited", so the positive check runs first.
    let safe_limit: i32 = ingredients
        .iter()
        .map(|i| {
            let limit = normalized(i.safe_limit.as_deref());
            if limit.contains("no limit") || limit.contains("unlimited") {
                2
            } else if limit.contains("restricted") || limit.contains("limited") {
                -2
            } else {
                0
            }
        })
        .sum();
    score += safe_limit.clamp(-10, 10);

    score.clamp(0, 100) as u8
}

fn normalized(text: Option<&str>) -> String {
    text.unwrap_or_default().trim().to_lowercase()
}
