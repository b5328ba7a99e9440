use serde::Deserialize;
use tracing::info;

use crate::domain::{
    common::{
        entities::app_errors::CoreError, policies::ensure_owner, services::Service,
        value_objects::Identity,
    },
    personalization::{
        entities::{Compatibility, Concern, PersonalizedAnalysis},
        ports::PersonalizationService,
        value_objects::{preference_fingerprint, PersonalizeInput},
    },
    preferences::ports::PreferencesRepository,
    scan::{
        codec, prompts,
        ports::{LlmClient, ScanRepository},
        value_objects::LlmRequest,
    },
};

/// Wire shape of the personalization response. All three fields are
/// required; a response missing any of them is unusable, not something
/// to fill in.
#[derive(Debug, Deserialize)]
struct AnalysisPayload {
    concerns: Option<Vec<Concern>>,
    recommendations: Option<Vec<String>>,
    compatibility: Option<String>,
}

impl AnalysisPayload {
    fn into_analysis(self) -> Result<PersonalizedAnalysis, CoreError> {
        let concerns = self.concerns.ok_or(CoreError::IncompleteAnalysis)?;
        let recommendations = self.recommendations.ok_or(CoreError::IncompleteAnalysis)?;
        let compatibility = self
            .compatibility
            .as_deref()
            .and_then(Compatibility::parse)
            .ok_or(CoreError::IncompleteAnalysis)?;

        Ok(PersonalizedAnalysis {
            concerns,
            recommendations,
            compatibility,
        })
    }
}

impl<S, P, L> PersonalizationService for Service<S, P, L>
where
    S: ScanRepository,
    P: PreferencesRepository,
    L: LlmClient,
{
    async fn personalize_scan(
        &self,
        identity: Identity,
        input: PersonalizeInput,
    ) -> Result<PersonalizedAnalysis, CoreError> {
        let mut scan = self
            .scan_repository
            .get_by_id(input.scan_id)
            .await?
            .ok_or(CoreError::NotFound)?;
        ensure_owner(&identity, scan.user_id)?;

        // Only completed scans carry a result to personalize.
        let mut result = scan.result.clone().ok_or(CoreError::NotFound)?;

        let preferences = self
            .preferences_repository
            .get_by_user(identity.id())
            .await?
            .ok_or(CoreError::NotFound)?;

        let fingerprint = preference_fingerprint(&preferences);
        if let Some(cached) = result.personalized_analysis.get(&fingerprint) {
            info!(scan_id = %scan.id, "personalized analysis served from cache");
            return Ok(cached.clone());
        }

        if input.api_key.trim().is_empty() {
            return Err(CoreError::MissingCredential);
        }

        let request = LlmRequest::text(
            prompts::personalization_prompt(&result, &preferences),
            prompts::PERSONALIZATION_TEMPERATURE,
            prompts::PERSONALIZATION_MAX_TOKENS,
        );
        let raw = self.llm_client.generate(input.api_key, request).await?;
        let value = codec::extract_json(&raw)?;

        let payload: AnalysisPayload = serde_json::from_value(value)
            .map_err(|_| CoreError::IncompleteAnalysis)?;
        let analysis = payload.into_analysis()?;

        // Last write wins on an idempotent key; a concurrent request for
        // the same profile can only write the same entry.
        result
            .personalized_analysis
            .insert(fingerprint, analysis.clone());
        scan.result = Some(result);
        scan.updated_at = chrono::Utc::now();
        self.scan_repository.upsert(scan).await?;

        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    use crate::domain::{
        preferences::{entities::UserPreferences, ports::MockPreferencesRepository},
        scan::{
            entities::{ProductScan, ScanResult},
            ports::{MockLlmClient, MockScanRepository},
        },
    };

    type TestService = Service<MockScanRepository, MockPreferencesRepository, MockLlmClient>;

    fn preferences() -> UserPreferences {
        UserPreferences {
            health_concerns: vec!["Diabetes".to_string()],
            allergies: vec!["Peanuts".to_string()],
            dietary_preferences: vec!["Vegan".to_string()],
            completed_questionnaire: true,
        }
    }

    fn completed_result() -> ScanResult {
        ScanResult {
            product_name: "Granola Crunch".to_string(),
            brand: "Acme".to_string(),
            claims: vec!["All natural".to_string()],
            ingredients: Vec::new(),
            nutrition_facts: Default::default(),
            claim_verdicts: Vec::new(),
            health_score: Some(72),
            personalized_analysis: Default::default(),
        }
    }

    fn completed_scan(user_id: Uuid, result: ScanResult) -> ProductScan {
        let mut scan = ProductScan::new(user_id, "front".into(), "back".into());
        scan.complete(result);
        scan
    }

    fn analysis() -> PersonalizedAnalysis {
        PersonalizedAnalysis {
            concerns: vec![Concern {
                issue: "Added sugars".to_string(),
                explanation: "High sugar content conflicts with blood sugar control".to_string(),
            }],
            recommendations: vec!["Choose an unsweetened variant".to_string()],
            compatibility: Compatibility::Low,
        }
    }

    fn analysis_response() -> String {
        serde_json::json!({
            "concerns": [{
                "issue": "Added sugars",
                "explanation": "High sugar content conflicts with blood sugar control",
            }],
            "recommendations": ["Choose an unsweetened variant"],
            "compatibility": "Low",
        })
        .to_string()
    }

    #[tokio::test]
    async fn cache_hit_answers_without_a_model_call() {
        let identity = Identity::new(Uuid::new_v4());
        let prefs = preferences();
        let fingerprint = preference_fingerprint(&prefs);

        let mut result = completed_result();
        result
            .personalized_analysis
            .insert(fingerprint, analysis());
        let scan = completed_scan(identity.id(), result);
        let scan_id = scan.id;

        let mut scans = MockScanRepository::new();
        scans
            .expect_get_by_id()
            .returning(move |_| {
                let scan = scan.clone();
                Box::pin(async move { Ok(Some(scan)) })
            });
        scans.expect_upsert().times(0);

        let mut prefs_repo = MockPreferencesRepository::new();
        let prefs_clone = prefs.clone();
        prefs_repo.expect_get_by_user().returning(move |_| {
            let prefs = prefs_clone.clone();
            Box::pin(async move { Ok(Some(prefs)) })
        });

        let mut llm = MockLlmClient::new();
        llm.expect_generate().times(0);

        let service = TestService::new(scans, prefs_repo, llm);
        let got = service
            .personalize_scan(
                identity,
                PersonalizeInput {
                    scan_id,
                    api_key: "key".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(got, analysis());
    }

    #[tokio::test]
    async fn cache_miss_calls_the_model_once_and_persists_the_entry() {
        let identity = Identity::new(Uuid::new_v4());
        let prefs = preferences();
        let fingerprint = preference_fingerprint(&prefs);

        let scan = completed_scan(identity.id(), completed_result());
        let scan_id = scan.id;

        let mut scans = MockScanRepository::new();
        scans.expect_get_by_id().returning(move |_| {
            let scan = scan.clone();
            Box::pin(async move { Ok(Some(scan)) })
        });
        let expected_key = fingerprint.clone();
        scans
            .expect_upsert()
            .withf(move |scan| {
                scan.result
                    .as_ref()
                    .is_some_and(|r| r.personalized_analysis.contains_key(&expected_key))
            })
            .times(1)
            .returning(|scan| Box::pin(async move { Ok(scan) }));

        let mut prefs_repo = MockPreferencesRepository::new();
        let prefs_clone = prefs.clone();
        prefs_repo.expect_get_by_user().returning(move |_| {
            let prefs = prefs_clone.clone();
            Box::pin(async move { Ok(Some(prefs)) })
        });

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut llm = MockLlmClient::new();
        llm.expect_generate().returning(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            let body = analysis_response();
            Box::pin(async move { Ok(body) })
        });

        let service = TestService::new(scans, prefs_repo, llm);
        let got = service
            .personalize_scan(
                identity,
                PersonalizeInput {
                    scan_id,
                    api_key: "key".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(got, analysis());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn incomplete_model_output_is_rejected() {
        let identity = Identity::new(Uuid::new_v4());
        let scan = completed_scan(identity.id(), completed_result());
        let scan_id = scan.id;

        let mut scans = MockScanRepository::new();
        scans.expect_get_by_id().returning(move |_| {
            let scan = scan.clone();
            Box::pin(async move { Ok(Some(scan)) })
        });
        scans.expect_upsert().times(0);

        let mut prefs_repo = MockPreferencesRepository::new();
        prefs_repo
            .expect_get_by_user()
            .returning(|_| Box::pin(async { Ok(Some(preferences())) }));

        let mut llm = MockLlmClient::new();
        llm.expect_generate().returning(|_, _| {
            Box::pin(async {
                Ok(r#"{"concerns": [], "recommendations": ["eat less"]}"#.to_string())
            })
        });

        let service = TestService::new(scans, prefs_repo, llm);
        let err = service
            .personalize_scan(
                identity,
                PersonalizeInput {
                    scan_id,
                    api_key: "key".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err, CoreError::IncompleteAnalysis);
    }

    #[tokio::test]
    async fn other_users_scan_is_denied() {
        let identity = Identity::new(Uuid::new_v4());
        let scan = completed_scan(Uuid::new_v4(), completed_result());
        let scan_id = scan.id;

        let mut scans = MockScanRepository::new();
        scans.expect_get_by_id().returning(move |_| {
            let scan = scan.clone();
            Box::pin(async move { Ok(Some(scan)) })
        });

        let service = TestService::new(
            scans,
            MockPreferencesRepository::new(),
            MockLlmClient::new(),
        );
        let err = service
            .personalize_scan(
                identity,
                PersonalizeInput {
                    scan_id,
                    api_key: "key".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err, CoreError::PermissionDenied);
    }

    #[tokio::test]
    async fn missing_credential_is_checked_only_after_the_cache() {
        let identity = Identity::new(Uuid::new_v4());
        let scan = completed_scan(identity.id(), completed_result());
        let scan_id = scan.id;

        let mut scans = MockScanRepository::new();
        scans.expect_get_by_id().returning(move |_| {
            let scan = scan.clone();
            Box::pin(async move { Ok(Some(scan)) })
        });

        let mut prefs_repo = MockPreferencesRepository::new();
        prefs_repo
            .expect_get_by_user()
            .returning(|_| Box::pin(async { Ok(Some(preferences())) }));

        let service = TestService::new(scans, prefs_repo, MockLlmClient::new());
        let err = service
            .personalize_scan(
                identity,
                PersonalizeInput {
                    scan_id,
                    api_key: "   ".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err, CoreError::MissingCredential);
    }
}
