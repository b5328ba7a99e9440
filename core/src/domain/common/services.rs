use crate::domain::{
    preferences::ports::PreferencesRepository,
    scan::ports::{LlmClient, ScanRepository},
};

/// Aggregate service over the three ports the core depends on. The
/// domain service traits (`ScanService`, `PersonalizationService`,
/// `PreferencesService`) are all implemented on this one struct.
#[derive(Debug, Clone)]
pub struct Service<S, P, L>
where
    S: ScanRepository,
    P: PreferencesRepository,
    L: LlmClient,
{
    pub scan_repository: S,
    pub preferences_repository: P,
    pub llm_client: L,
}

impl<S, P, L> Service<S, P, L>
where
    S: ScanRepository,
    P: PreferencesRepository,
    L: LlmClient,
{
    pub fn new(scan_repository: S, preferences_repository: P, llm_client: L) -> Self {
        Self {
            scan_repository,
            preferences_repository,
            llm_client,
        }
    }
}
