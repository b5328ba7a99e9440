use std::future::Future;

use crate::domain::{
    common::{entities::app_errors::CoreError, value_objects::Identity},
    personalization::{entities::PersonalizedAnalysis, value_objects::PersonalizeInput},
};

#[cfg_attr(test, mockall::automock)]
pub trait PersonalizationService: Send + Sync {
    /// Produce (or fetch from the result's cache) the analysis of a
    /// completed scan against the caller's saved preferences.
    fn personalize_scan(
        &self,
        identity: Identity,
        input: PersonalizeInput,
    ) -> impl Future<Output = Result<PersonalizedAnalysis, CoreError>> + Send;
}
