use serde::{Deserialize, Serialize};

/// One profile-specific analysis, cached on the scan result under the
/// preference fingerprint that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizedAnalysis {
    pub concerns: Vec<Concern>,
    pub recommendations: Vec<String>,
    pub compatibility: Compatibility,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concern {
    pub issue: String,
    pub explanation: String,
}

/// How well the product fits the user's profile overall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Compatibility {
    High,
    Moderate,
    Low,
}

impl Compatibility {
    pub fn as_str(&self) -> &str {
        match self {
            Compatibility::High => "High",
            Compatibility::Moderate => "Moderate",
            Compatibility::Low => "Low",
        }
    }

    /// Tolerant parse of model output; anything unrecognized is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Compatibility::High),
            "moderate" | "medium" => Some(Compatibility::Moderate),
            "low" => Some(Compatibility::Low),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compatibility_parse_is_tolerant() {
        assert_eq!(Compatibility::parse("High"), Some(Compatibility::High));
        assert_eq!(Compatibility::parse(" low "), Some(Compatibility::Low));
        assert_eq!(Compatibility::parse("Medium"), Some(Compatibility::Moderate));
        assert_eq!(Compatibility::parse("great"), None);
    }
}
