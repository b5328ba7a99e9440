use serde::{Deserialize, Serialize};

/// One fully analyzed ingredient. Created in bulk by the ingredient
/// analysis stage and immutable afterwards except as part of a
/// `ScanResult` replace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controversy: Option<String>,
    #[serde(default)]
    pub legal_status: LegalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safe_limit: Option<String>,
    /// Absent means the model gave no usable classification; scored as
    /// neutral.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalStatus {
    #[serde(default)]
    pub banned_countries: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }

    /// Tolerant parse of model output; anything unrecognized is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Some(RiskLevel::Low),
            "moderate" | "medium" => Some(RiskLevel::Moderate),
            "high" => Some(RiskLevel::High),
            _ => None,
        }
    }
}

impl Ingredient {
    /// Deterministic placeholder substituted when the analysis stage
    /// fails, keeping the overall scan non-fatal.
    pub fn fallback(name: String) -> Self {
        Self {
            name,
            amount: None,
            purpose: Some("Unknown".to_string()),
            origin: Some("Unknown".to_string()),
            controversy: Some("No data available".to_string()),
            legal_status: LegalStatus::default(),
            safe_limit: Some("Unknown".to_string()),
            risk_level: Some(RiskLevel::Low),
        }
    }
}
