use tracing::info;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service, value_objects::Identity},
    preferences::{
        entities::UserPreferences,
        ports::{PreferencesRepository, PreferencesService},
        value_objects::SavePreferencesInput,
    },
    scan::ports::{LlmClient, ScanRepository},
};

impl<S, P, L> PreferencesService for Service<S, P, L>
where
    S: ScanRepository,
    P: PreferencesRepository,
    L: LlmClient,
{
    async fn save_preferences(
        &self,
        identity: Identity,
        input: SavePreferencesInput,
    ) -> Result<UserPreferences, CoreError> {
        let saved = self
            .preferences_repository
            .upsert(identity.id(), input.preferences)
            .await?;

        info!(user_id = %identity.id(), "saved user preferences");

        Ok(saved)
    }

    async fn get_preferences(
        &self,
        identity: Identity,
    ) -> Result<Option<UserPreferences>, CoreError> {
        self.preferences_repository.get_by_user(identity.id()).await
    }
}
