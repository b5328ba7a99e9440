use serde::{Deserialize, Serialize};

/// A user's dietary profile, assembled from the onboarding
/// questionnaire. The three tag lists feed the personalization
/// fingerprint, so their order is preserved as saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default)]
    pub health_concerns: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
    #[serde(default)]
    pub completed_questionnaire: bool,
}
