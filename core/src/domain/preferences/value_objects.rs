use crate::domain::preferences::entities::UserPreferences;

#[derive(Debug, Clone)]
pub struct SavePreferencesInput {
    pub preferences: UserPreferences,
}
