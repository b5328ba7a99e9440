use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, value_objects::Identity},
    preferences::{entities::UserPreferences, value_objects::SavePreferencesInput},
};

/// Document-style store for preference records, keyed by user id.
#[cfg_attr(test, mockall::automock)]
pub trait PreferencesRepository: Send + Sync {
    /// Create the record or replace it whole (full-document write).
    fn upsert(
        &self,
        user_id: Uuid,
        preferences: UserPreferences,
    ) -> impl Future<Output = Result<UserPreferences, CoreError>> + Send;

    fn get_by_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<UserPreferences>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait PreferencesService: Send + Sync {
    fn save_preferences(
        &self,
        identity: Identity,
        input: SavePreferencesInput,
    ) -> impl Future<Output = Result<UserPreferences, CoreError>> + Send;

    fn get_preferences(
        &self,
        identity: Identity,
    ) -> impl Future<Output = Result<Option<UserPreferences>, CoreError>> + Send;
}
