use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{
    common::entities::app_errors::CoreError,
    scan::entities::{ClaimVerdict, Ingredient, LegalStatus, NutritionFacts, RiskLevel, Verdict},
    scan::value_objects::ExtractedProduct,
};

pub const UNKNOWN_PRODUCT: &str = "Unknown Product";
pub const UNKNOWN_BRAND: &str = "Unknown Brand";

/// Wire shape of the extraction response. Every field is optional and the
/// model's snake_case spelling is accepted alongside camelCase; defaults
/// are applied when mapping to the domain type.
#[derive(Debug, Deserialize)]
struct ExtractionPayload {
    #[serde(default, rename = "productName", alias = "product_name")]
    product_name: Option<String>,
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    claims: Vec<Value>,
    #[serde(default)]
    ingredients: Vec<IngredientNameEntry>,
    #[serde(default, rename = "nutritionFacts", alias = "nutrition_facts")]
    nutrition_facts: serde_json::Map<String, Value>,
}

/// Ingredient list entries arrive either as bare strings or as objects
/// carrying a `name` or `ingredient` key.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IngredientNameEntry {
    Name(String),
    Object {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        ingredient: Option<String>,
    },
    Other(Value),
}

impl IngredientNameEntry {
    fn into_name(self) -> Option<String> {
        let name = match self {
            IngredientNameEntry::Name(name) => name,
            IngredientNameEntry::Object { name, ingredient } => name.or(ingredient)?,
            IngredientNameEntry::Other(_) => return None,
        };
        let name = name.trim();
        (!name.is_empty()).then(|| name.to_string())
    }
}

/// Map the recovered extraction JSON onto `ExtractedProduct`, applying
/// the documented defaults for missing fields.
pub fn parse_extraction(value: Value) -> Result<ExtractedProduct, CoreError> {
    let payload: ExtractionPayload = serde_json::from_value(value)
        .map_err(|e| CoreError::MalformedResponse(format!("unexpected extraction shape: {e}")))?;

    let product_name = payload
        .product_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string());
    let brand = payload
        .brand
        .filter(|brand| !brand.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_BRAND.to_string());

    // Non-string claim entries are skipped, not fatal: one stray object
    // in the list must not fail the whole extraction.
    let claims = payload
        .claims
        .into_iter()
        .filter_map(|value| match value {
            Value::String(text) if !text.trim().is_empty() => Some(text),
            _ => None,
        })
        .collect();

    let ingredient_names = payload
        .ingredients
        .into_iter()
        .filter_map(IngredientNameEntry::into_name)
        .collect();

    let mut nutrition_facts = NutritionFacts::new();
    for (nutrient, value) in payload.nutrition_facts {
        match value {
            Value::String(text) => {
                nutrition_facts.insert(nutrient, text);
            }
            Value::Number(number) => {
                nutrition_facts.insert(nutrient, number.to_string());
            }
            // Absent or non-scalar nutrients are omitted, never
            // synthesized.
            _ => {}
        }
    }

    Ok(ExtractedProduct {
        product_name,
        brand,
        claims,
        ingredient_names,
        nutrition_facts,
    })
}

/// Wire shape of one analyzed ingredient.
#[derive(Debug, Deserialize)]
struct IngredientPayload {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    amount: Option<String>,
    #[serde(default)]
    purpose: Option<String>,
    #[serde(default)]
    origin: Option<String>,
    #[serde(default)]
    controversy: Option<String>,
    #[serde(default, rename = "legalStatus", alias = "legal_status")]
    legal_status: LegalStatusPayload,
    #[serde(default, rename = "safeLimit", alias = "safe_limit")]
    safe_limit: Option<String>,
    #[serde(default, rename = "riskLevel", alias = "risk_level")]
    risk_level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LegalStatusPayload {
    #[serde(default, rename = "bannedCountries", alias = "banned_countries")]
    banned_countries: Vec<String>,
}

/// Parse one ingredient batch response against the names that were sent.
///
/// The stage contract demands the same cardinality and order as the
/// input; a batch that comes back with a different count is a stage
/// failure, not something to paper over.
pub fn parse_ingredient_batch(
    value: Value,
    batch_names: &[String],
) -> Result<Vec<Ingredient>, CoreError> {
    let payloads: Vec<IngredientPayload> = serde_json::from_value(value)
        .map_err(|e| CoreError::MalformedResponse(format!("unexpected ingredient shape: {e}")))?;

    if payloads.len() != batch_names.len() {
        return Err(CoreError::MalformedResponse(format!(
            "ingredient batch returned {} entries for {} names",
            payloads.len(),
            batch_names.len()
        )));
    }

    Ok(payloads
        .into_iter()
        .zip(batch_names)
        .map(|(payload, input_name)| Ingredient {
            name: payload
                .name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| input_name.clone()),
            amount: payload.amount,
            purpose: payload.purpose,
            origin: payload.origin,
            controversy: payload.controversy,
            legal_status: LegalStatus {
                banned_countries: payload.legal_status.banned_countries,
            },
            safe_limit: payload.safe_limit,
            risk_level: payload.risk_level.as_deref().and_then(RiskLevel::parse),
        })
        .collect())
}

/// Deterministic stage-failure fallback: one placeholder record per input
/// name, order preserved.
pub fn fallback_ingredients(names: &[String]) -> Vec<Ingredient> {
    names.iter().cloned().map(Ingredient::fallback).collect()
}

/// Wire shape of one claim verdict.
#[derive(Debug, Deserialize)]
struct VerdictPayload {
    #[serde(default)]
    verdict: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}

/// Align the verification response with the input claims.
///
/// Verdicts are re-keyed by input index and the claim text is restored
/// verbatim, so a paraphrasing model can neither drop nor reorder
/// verdicts; missing entries fall back to `Unclear`.
pub fn align_claim_verdicts(claims: &[String], value: Value) -> Result<Vec<ClaimVerdict>, CoreError> {
    let mut payloads: Vec<Option<VerdictPayload>> = serde_json::from_value(value)
        .map_err(|e| CoreError::MalformedResponse(format!("unexpected verdict shape: {e}")))?;
    payloads.resize_with(claims.len(), || None);

    Ok(claims
        .iter()
        .zip(payloads)
        .map(|(claim, payload)| match payload {
            Some(payload) => ClaimVerdict {
                claim: claim.clone(),
                verdict: payload
                    .verdict
                    .as_deref()
                    .map(Verdict::parse)
                    .unwrap_or(Verdict::Unclear),
                reason: payload.reason.unwrap_or_default(),
            },
            None => ClaimVerdict::fallback(claim.clone()),
        })
        .collect())
}

/// Fallback when the whole verification stage fails: one `Unclear`
/// verdict per claim.
pub fn fallback_verdicts(claims: &[String]) -> Vec<ClaimVerdict> {
    claims.iter().cloned().map(ClaimVerdict::fallback).collect()
}

static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").expect("static regex"));

/// Clean up an assistant reply for display: markdown asterisks become
/// bullet points, blank lines collapse.
pub fn tidy_chat_reply(text: &str) -> String {
    let bulleted = text.replace('*', "\u{2022}");
    BLANK_LINES.replace_all(&bulleted, "\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extraction_applies_defaults_and_snake_case_aliases() {
        let value = json!({
            "product_name": "Granola Crunch",
            "nutrition_facts": {"calories": "120", "protein": 4},
        });

        let extracted = parse_extraction(value).unwrap();

        assert_eq!(extracted.product_name, "Granola Crunch");
        assert_eq!(extracted.brand, UNKNOWN_BRAND);
        assert!(extracted.claims.is_empty());
        assert!(extracted.ingredient_names.is_empty());
        assert_eq!(extracted.nutrition_facts["calories"], "120");
        assert_eq!(extracted.nutrition_facts["protein"], "4");
    }

    #[test]
    fn extraction_defaults_product_and_brand_when_blank() {
        let extracted = parse_extraction(json!({"productName": "  ", "brand": ""})).unwrap();

        assert_eq!(extracted.product_name, UNKNOWN_PRODUCT);
        assert_eq!(extracted.brand, UNKNOWN_BRAND);
    }

    #[test]
    fn extraction_accepts_mixed_ingredient_entries() {
        let value = json!({
            "productName": "Foo",
            "brand": "Bar",
            "ingredients": [
                "Sugar",
                {"name": "Salt"},
                {"ingredient": "Citric Acid"},
                {"weight": "3g"},
                "   ",
            ],
        });

        let extracted = parse_extraction(value).unwrap();
        assert_eq!(extracted.ingredient_names, vec!["Sugar", "Salt", "Citric Acid"]);
    }

    #[test]
    fn extraction_skips_non_string_claims() {
        let value = json!({
            "productName": "Foo",
            "brand": "Bar",
            "claims": ["All natural", {"claim": "No sugar"}, 42, null, "  ", "Organic"],
        });

        let extracted = parse_extraction(value).unwrap();
        assert_eq!(extracted.claims, vec!["All natural", "Organic"]);
    }

    #[test]
    fn extraction_rejects_non_object_payload() {
        let err = parse_extraction(json!(["not", "an", "object"])).unwrap_err();
        assert!(matches!(err, CoreError::MalformedResponse(_)));
    }

    #[test]
    fn ingredient_batch_maps_fields_and_tolerates_unknown_risk() {
        let names = vec!["Tartrazine".to_string(), "Honey".to_string()];
        let value = json!([
            {
                "name": "Tartrazine",
                "purpose": "color",
                "origin": "synthetic",
                "controversy": "hyperactivity concerns",
                "legalStatus": {"bannedCountries": ["Norway"]},
                "safeLimit": "restricted",
                "riskLevel": "High",
            },
            {
                "purpose": "sweetener",
                "origin": "natural",
                "riskLevel": "not sure",
            },
        ]);

        let ingredients = parse_ingredient_batch(value, &names).unwrap();

        assert_eq!(ingredients.len(), 2);
        assert_eq!(ingredients[0].risk_level, Some(RiskLevel::High));
        assert_eq!(ingredients[0].legal_status.banned_countries, vec!["Norway"]);
        // Missing name falls back to the input name, unknown risk to None.
        assert_eq!(ingredients[1].name, "Honey");
        assert_eq!(ingredients[1].risk_level, None);
    }

    #[test]
    fn ingredient_batch_count_mismatch_is_a_stage_failure() {
        let names = vec!["A".to_string(), "B".to_string()];
        let err = parse_ingredient_batch(json!([{"name": "A"}]), &names).unwrap_err();

        assert!(matches!(err, CoreError::MalformedResponse(_)));
    }

    #[test]
    fn fallback_ingredients_preserve_order_and_count() {
        let names: Vec<String> = ["C", "A", "B"].iter().map(|s| s.to_string()).collect();
        let fallback = fallback_ingredients(&names);

        assert_eq!(fallback.len(), 3);
        let fallback_names: Vec<&str> = fallback.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(fallback_names, vec!["C", "A", "B"]);
    }

    #[test]
    fn verdicts_align_by_index_and_keep_input_claim_text() {
        let claims = vec!["All natural".to_string(), "No sugar".to_string()];
        let value = json!([
            {"claim": "all-natural (paraphrased)", "verdict": "Misleading", "reason": "contains additives"},
        ]);

        let verdicts = align_claim_verdicts(&claims, value).unwrap();

        assert_eq!(verdicts.len(), 2);
        assert_eq!(verdicts[0].claim, "All natural");
        assert_eq!(verdicts[0].verdict, Verdict::Misleading);
        assert_eq!(verdicts[1].verdict, Verdict::Unclear);
        assert_eq!(verdicts[1].reason, "Unable to verify due to analysis error");
    }

    #[test]
    fn fallback_verdicts_cover_every_claim() {
        let claims = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let verdicts = fallback_verdicts(&claims);

        assert_eq!(verdicts.len(), claims.len());
        assert!(verdicts.iter().all(|v| v.verdict == Verdict::Unclear));
    }

    #[test]
    fn chat_reply_is_bulleted_and_collapsed() {
        let raw = "* Sugar is the second ingredient\n\n\n* No fiber listed\n\n";
        assert_eq!(
            tidy_chat_reply(raw),
            "\u{2022} Sugar is the second ingredient\n\u{2022} No fiber listed"
        );
    }
}
