use crate::{domain::preferences::entities::UserPreferences, entity::user_preferences};

fn tags(value: &serde_json::Value) -> Vec<String> {
    serde_json::from_value(value.clone()).unwrap_or_default()
}

impl From<&user_preferences::Model> for UserPreferences {
    fn from(model: &user_preferences::Model) -> Self {
        Self {
            health_concerns: tags(&model.health_concerns),
            allergies: tags(&model.allergies),
            dietary_preferences: tags(&model.dietary_preferences),
            completed_questionnaire: model.completed_questionnaire,
        }
    }
}

impl From<user_preferences::Model> for UserPreferences {
    fn from(model: user_preferences::Model) -> Self {
        Self::from(&model)
    }
}
