use sea_orm::{sea_query::OnConflict, ActiveValue::Set, DatabaseConnection, EntityTrait};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        preferences::{entities::UserPreferences, ports::PreferencesRepository},
    },
    entity::user_preferences::{ActiveModel, Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresPreferencesRepository {
    pub db: DatabaseConnection,
}

impl PostgresPreferencesRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl PreferencesRepository for PostgresPreferencesRepository {
    async fn upsert(
        &self,
        user_id: Uuid,
        preferences: UserPreferences,
    ) -> Result<UserPreferences, CoreError> {
        let saved = Entity::insert(ActiveModel {
            user_id: Set(user_id),
            health_concerns: Set(serde_json::json!(preferences.health_concerns)),
            allergies: Set(serde_json::json!(preferences.allergies)),
            dietary_preferences: Set(serde_json::json!(preferences.dietary_preferences)),
            completed_questionnaire: Set(preferences.completed_questionnaire),
            updated_at: Set(chrono::Utc::now().fixed_offset()),
        })
        .on_conflict(
            OnConflict::column(Column::UserId)
                .update_columns([
                    Column::HealthConcerns,
                    Column::Allergies,
                    Column::DietaryPreferences,
                    Column::CompletedQuestionnaire,
                    Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(&self.db)
        .await
        .map(UserPreferences::from)
        .map_err(|e| {
            error!("Failed to upsert preferences: {}", e);
            CoreError::Persistence(e.to_string())
        })?;

        Ok(saved)
    }

    async fn get_by_user(&self, user_id: Uuid) -> Result<Option<UserPreferences>, CoreError> {
        let preferences = Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get preferences: {}", e);
                CoreError::Persistence(e.to_string())
            })?
            .map(UserPreferences::from);

        Ok(preferences)
    }
}
