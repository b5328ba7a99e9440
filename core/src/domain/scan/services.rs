use std::collections::HashMap;
use std::time::Duration;

use base64::{engine::general_purpose, Engine as _};
use tracing::{info, warn};

use crate::domain::{
    common::{
        entities::app_errors::CoreError, policies::ensure_owner, services::Service,
        value_objects::Identity,
    },
    preferences::ports::PreferencesRepository,
    scan::{
        codec, helpers, prompts, score,
        entities::{ClaimVerdict, Ingredient, ProductScan, ScanResult},
        ports::{LlmClient, ScanRepository, ScanService},
        value_objects::{
            ChatInput, DeleteScanInput, ExtractedProduct, GetScanInput, LlmRequest,
            ProcessScanInput,
        },
    },
};

/// Ingredient names per model call, bounding prompt length and rate-limit
/// exposure.
const INGREDIENT_BATCH_SIZE: usize = 5;
/// Mandatory pause between ingredient batches; batches are never issued
/// in parallel.
const INGREDIENT_BATCH_DELAY: Duration = Duration::from_secs(1);

impl<S, P, L> Service<S, P, L>
where
    S: ScanRepository,
    P: PreferencesRepository,
    L: LlmClient,
{
    /// Extraction stage: read product name, brand, claims, raw ingredient
    /// names and nutrition facts off the two images.
    async fn extract_product(
        &self,
        api_key: &str,
        input: &ProcessScanInput,
    ) -> Result<ExtractedProduct, CoreError> {
        let request = LlmRequest::with_images(
            prompts::extraction_prompt(),
            vec![input.front_image.clone(), input.back_image.clone()],
            prompts::EXTRACTION_TEMPERATURE,
            prompts::EXTRACTION_MAX_TOKENS,
        );

        let raw = self.llm_client.generate(api_key.to_string(), request).await?;
        let value = codec::extract_json(&raw)?;

        helpers::parse_extraction(value)
    }

    /// Ingredient analysis stage: batches of `INGREDIENT_BATCH_SIZE`
    /// names, issued strictly sequentially with a fixed pause between
    /// batches. Output preserves input order and cardinality.
    async fn analyze_ingredients(
        &self,
        api_key: &str,
        names: &[String],
    ) -> Result<Vec<Ingredient>, CoreError> {
        let mut analyzed = Vec::with_capacity(names.len());

        for (index, batch) in names.chunks(INGREDIENT_BATCH_SIZE).enumerate() {
            if index > 0 {
                tokio::time::sleep(INGREDIENT_BATCH_DELAY).await;
            }

            let request = LlmRequest::text(
                prompts::ingredient_batch_prompt(batch),
                prompts::INGREDIENT_TEMPERATURE,
                prompts::INGREDIENT_MAX_TOKENS,
            );

            let raw = self.llm_client.generate(api_key.to_string(), request).await?;
            let value = codec::extract_json(&raw)?;

            analyzed.extend(helpers::parse_ingredient_batch(value, batch)?);
        }

        Ok(analyzed)
    }

    /// Claim verification stage: one call covering every claim, verdicts
    /// aligned back to the input order.
    async fn verify_claims(
        &self,
        api_key: &str,
        claims: &[String],
        ingredients: &[Ingredient],
    ) -> Result<Vec<ClaimVerdict>, CoreError> {
        let request = LlmRequest::text(
            prompts::claim_verification_prompt(claims, ingredients),
            prompts::CLAIM_TEMPERATURE,
            prompts::CLAIM_MAX_TOKENS,
        );

        let raw = self.llm_client.generate(api_key.to_string(), request).await?;
        let value = codec::extract_json(&raw)?;

        helpers::align_claim_verdicts(claims, value)
    }
}

impl<S, P, L> ScanService for Service<S, P, L>
where
    S: ScanRepository,
    P: PreferencesRepository,
    L: LlmClient,
{
    async fn process_product_scan(
        &self,
        identity: Identity,
        input: ProcessScanInput,
    ) -> Result<ProductScan, CoreError> {
        // 1. Require a credential before any network or store call.
        if input.api_key.trim().is_empty() {
            return Err(CoreError::MissingCredential);
        }

        let liveness = input.liveness.clone();

        // 2. Record the pending scan.
        let mut scan = ProductScan::new(
            identity.id(),
            general_purpose::STANDARD.encode(&input.front_image.data),
            general_purpose::STANDARD.encode(&input.back_image.data),
        );
        liveness.ensure_live()?;
        scan = self.scan_repository.upsert(scan).await?;
        info!(scan_id = %scan.id, "starting product scan analysis");

        // 3. Extraction failure is fatal: there is no product data to
        // analyze. The terminal state is persisted exactly once.
        let extracted = match self.extract_product(&input.api_key, &input).await {
            Ok(extracted) => extracted,
            Err(e) => {
                liveness.ensure_live()?;
                scan.fail(e.to_string());
                self.scan_repository.upsert(scan).await?;
                return Err(e);
            }
        };
        liveness.ensure_live()?;
        info!(
            scan_id = %scan.id,
            claims = extracted.claims.len(),
            ingredients = extracted.ingredient_names.len(),
            "extracted product data"
        );

        // 4. Ingredient analysis is non-fatal; failure degrades to
        // deterministic fallback records.
        let ingredients = if extracted.ingredient_names.is_empty() {
            Vec::new()
        } else {
            match self
                .analyze_ingredients(&input.api_key, &extracted.ingredient_names)
                .await
            {
                Ok(ingredients) => ingredients,
                Err(e) => {
                    warn!(scan_id = %scan.id, error = %e, "ingredient analysis failed, using fallback records");
                    helpers::fallback_ingredients(&extracted.ingredient_names)
                }
            }
        };
        liveness.ensure_live()?;

        // 5. Claim verification is non-fatal as well; every claim keeps a
        // verdict either way.
        let claim_verdicts = if extracted.claims.is_empty() {
            Vec::new()
        } else {
            match self
                .verify_claims(&input.api_key, &extracted.claims, &ingredients)
                .await
            {
                Ok(verdicts) => verdicts,
                Err(e) => {
                    warn!(scan_id = %scan.id, error = %e, "claim verification failed, using fallback verdicts");
                    helpers::fallback_verdicts(&extracted.claims)
                }
            }
        };
        liveness.ensure_live()?;

        // 6. Score, assemble and persist the terminal state exactly once.
        let health_score = score::health_score(&ingredients);
        scan.complete(ScanResult {
            product_name: extracted.product_name,
            brand: extracted.brand,
            claims: extracted.claims,
            ingredients,
            nutrition_facts: extracted.nutrition_facts,
            claim_verdicts,
            health_score: Some(health_score),
            personalized_analysis: HashMap::new(),
        });
        let scan = self.scan_repository.upsert(scan).await?;
        info!(scan_id = %scan.id, health_score, "product scan completed");

        Ok(scan)
    }

    async fn get_scan(
        &self,
        identity: Identity,
        input: GetScanInput,
    ) -> Result<ProductScan, CoreError> {
        let scan = self
            .scan_repository
            .get_by_id(input.scan_id)
            .await?
            .ok_or(CoreError::NotFound)?;

        ensure_owner(&identity, scan.user_id)?;

        Ok(scan)
    }

    async fn get_scan_history(&self, identity: Identity) -> Result<Vec<ProductScan>, CoreError> {
        self.scan_repository.get_by_user(identity.id()).await
    }

    async fn delete_scan(
        &self,
        identity: Identity,
        input: DeleteScanInput,
    ) -> Result<(), CoreError> {
        let scan = self
            .scan_repository
            .get_by_id(input.scan_id)
            .await?
            .ok_or(CoreError::NotFound)?;

        ensure_owner(&identity, scan.user_id)?;

        self.scan_repository.delete(scan.id).await
    }

    async fn clear_scan_history(&self, identity: Identity) -> Result<usize, CoreError> {
        let scans = self.scan_repository.get_by_user(identity.id()).await?;
        let count = scans.len();

        for scan in scans {
            self.scan_repository.delete(scan.id).await?;
        }

        Ok(count)
    }

    async fn chat_about_scan(
        &self,
        identity: Identity,
        input: ChatInput,
    ) -> Result<String, CoreError> {
        if input.api_key.trim().is_empty() {
            return Err(CoreError::MissingCredential);
        }

        let scan = self
            .scan_repository
            .get_by_id(input.scan_id)
            .await?
            .ok_or(CoreError::NotFound)?;
        ensure_owner(&identity, scan.user_id)?;

        // The assistant is grounded in the completed result; a scan
        // without one has nothing to answer from.
        let result = scan.result.as_ref().ok_or(CoreError::NotFound)?;

        let request = LlmRequest::text(
            prompts::chat_prompt(result, &input.question),
            prompts::CHAT_TEMPERATURE,
            prompts::CHAT_MAX_TOKENS,
        );
        let raw = self.llm_client.generate(input.api_key, request).await?;

        Ok(helpers::tidy_chat_reply(&raw))
    }
}
