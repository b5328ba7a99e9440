use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::{
    personalization::entities::PersonalizedAnalysis,
    scan::entities::{ClaimVerdict, Ingredient},
};

/// Nutrient name to value string, exactly as printed on the label.
/// Absent nutrients are simply omitted, never synthesized.
pub type NutritionFacts = BTreeMap<String, String>;

/// The assembled outcome of one scan: extracted product data, analyzed
/// ingredients, verified claims and the derived health score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub product_name: String,
    pub brand: String,
    /// Marketing claims in extraction order; `claim_verdicts` follows the
    /// same order.
    pub claims: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub nutrition_facts: NutritionFacts,
    pub claim_verdicts: Vec<ClaimVerdict>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_score: Option<u8>,
    /// Cache of personalized analyses keyed by preference fingerprint.
    /// Grows monotonically across sessions, never shrinks.
    #[serde(default)]
    pub personalized_analysis: HashMap<String, PersonalizedAnalysis>,
}
