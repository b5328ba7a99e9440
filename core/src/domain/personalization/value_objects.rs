use base64::{engine::general_purpose, Engine as _};
use serde_json::json;
use uuid::Uuid;

use crate::domain::preferences::entities::UserPreferences;

#[derive(Debug, Clone)]
pub struct PersonalizeInput {
    pub scan_id: Uuid,
    pub api_key: String,
}

/// Deterministic cache key over the three preference lists.
///
/// Encodes the structure twice (JSON then base64), so the key is
/// sensitive to tag order within each list: a profile edit that reorders
/// tags invalidates the cache on purpose.
pub fn preference_fingerprint(preferences: &UserPreferences) -> String {
    let relevant = json!({
        "healthConcerns": preferences.health_concerns,
        "allergies": preferences.allergies,
        "dietaryPreferences": preferences.dietary_preferences,
    });

    general_purpose::STANDARD.encode(relevant.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preferences(concerns: &[&str], allergies: &[&str], diet: &[&str]) -> UserPreferences {
        UserPreferences {
            health_concerns: concerns.iter().map(|s| s.to_string()).collect(),
            allergies: allergies.iter().map(|s| s.to_string()).collect(),
            dietary_preferences: diet.iter().map(|s| s.to_string()).collect(),
            completed_questionnaire: true,
        }
    }

    #[test]
    fn identical_profiles_share_a_fingerprint() {
        let a = preferences(&["Diabetes"], &["Peanuts"], &["Vegan"]);
        let b = preferences(&["Diabetes"], &["Peanuts"], &["Vegan"]);

        assert_eq!(preference_fingerprint(&a), preference_fingerprint(&b));
    }

    #[test]
    fn any_list_change_or_reorder_changes_the_fingerprint() {
        let base = preferences(&["Diabetes", "Hypertension"], &["Peanuts"], &["Vegan"]);
        let reordered = preferences(&["Hypertension", "Diabetes"], &["Peanuts"], &["Vegan"]);
        let extra_allergy = preferences(&["Diabetes", "Hypertension"], &["Peanuts", "Soy"], &["Vegan"]);

        assert_ne!(preference_fingerprint(&base), preference_fingerprint(&reordered));
        assert_ne!(preference_fingerprint(&base), preference_fingerprint(&extra_allergy));
    }

    #[test]
    fn completed_flag_does_not_affect_the_fingerprint() {
        let mut a = preferences(&["Diabetes"], &[], &[]);
        let fingerprint = preference_fingerprint(&a);
        a.completed_questionnaire = false;

        assert_eq!(preference_fingerprint(&a), fingerprint);
    }
}
