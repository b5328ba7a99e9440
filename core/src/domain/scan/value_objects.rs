use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use uuid::Uuid;

use crate::domain::{common::entities::app_errors::CoreError, scan::entities::NutritionFacts};

/// A raw image payload handed in by the surrounding application.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl ImagePayload {
    pub fn jpeg(data: Vec<u8>) -> Self {
        Self {
            mime_type: "image/jpeg".to_string(),
            data,
        }
    }
}

/// One model call: prompt text, optional inline images and the generation
/// parameters of the stage issuing it.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub prompt: String,
    pub images: Vec<ImagePayload>,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl LlmRequest {
    pub fn text(prompt: String, temperature: f32, max_output_tokens: u32) -> Self {
        Self {
            prompt,
            images: Vec::new(),
            temperature,
            max_output_tokens,
        }
    }

    pub fn with_images(
        prompt: String,
        images: Vec<ImagePayload>,
        temperature: f32,
        max_output_tokens: u32,
    ) -> Self {
        Self {
            prompt,
            images,
            temperature,
            max_output_tokens,
        }
    }
}

/// Cooperative cancellation handle for an in-flight scan.
///
/// The surrounding UI flips this when its context is torn down; the
/// orchestrator checks it after every await point and ignores late stage
/// results instead of mutating persisted state.
#[derive(Debug, Clone, Default)]
pub struct Liveness {
    cancelled: Arc<AtomicBool>,
}

impl Liveness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_live(&self) -> bool {
        !self.cancelled.load(Ordering::Acquire)
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Guard called before every state mutation that follows an await
    /// point.
    pub fn ensure_live(&self) -> Result<(), CoreError> {
        if self.is_live() {
            Ok(())
        } else {
            Err(CoreError::Cancelled)
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProcessScanInput {
    pub api_key: String,
    pub front_image: ImagePayload,
    pub back_image: ImagePayload,
    pub liveness: Liveness,
}

#[derive(Debug, Clone)]
pub struct GetScanInput {
    pub scan_id: Uuid,
}

/// One question to the product assistant about a completed scan.
#[derive(Debug, Clone)]
pub struct ChatInput {
    pub scan_id: Uuid,
    pub api_key: String,
    pub question: String,
}

#[derive(Debug, Clone)]
pub struct DeleteScanInput {
    pub scan_id: Uuid,
}

/// Output of the extraction stage: product data as read off the two
/// images, before any per-ingredient analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedProduct {
    pub product_name: String,
    pub brand: String,
    pub claims: Vec<String>,
    pub ingredient_names: Vec<String>,
    pub nutrition_facts: NutritionFacts,
}
