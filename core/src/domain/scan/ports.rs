use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, value_objects::Identity},
    scan::{
        entities::ProductScan,
        value_objects::{ChatInput, DeleteScanInput, GetScanInput, LlmRequest, ProcessScanInput},
    },
};

/// Document-style store for scan records: create/replace by id, read by
/// id, list by owner, delete by id.
#[cfg_attr(test, mockall::automock)]
pub trait ScanRepository: Send + Sync {
    /// Create the record or replace it whole (full-document write).
    fn upsert(&self, scan: ProductScan)
        -> impl Future<Output = Result<ProductScan, CoreError>> + Send;

    fn get_by_id(
        &self,
        scan_id: Uuid,
    ) -> impl Future<Output = Result<Option<ProductScan>, CoreError>> + Send;

    fn get_by_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Vec<ProductScan>, CoreError>> + Send;

    fn delete(&self, scan_id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Client for the multimodal generation endpoint. The credential travels
/// with every call; the core never stores it.
#[cfg_attr(test, mockall::automock)]
pub trait LlmClient: Send + Sync {
    fn generate(
        &self,
        api_key: String,
        request: LlmRequest,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Scan pipeline and history operations.
#[cfg_attr(test, mockall::automock)]
pub trait ScanService: Send + Sync {
    /// Run the full analysis pipeline for one front+back image pair and
    /// persist the terminal scan record.
    fn process_product_scan(
        &self,
        identity: Identity,
        input: ProcessScanInput,
    ) -> impl Future<Output = Result<ProductScan, CoreError>> + Send;

    fn get_scan(
        &self,
        identity: Identity,
        input: GetScanInput,
    ) -> impl Future<Output = Result<ProductScan, CoreError>> + Send;

    fn get_scan_history(
        &self,
        identity: Identity,
    ) -> impl Future<Output = Result<Vec<ProductScan>, CoreError>> + Send;

    fn delete_scan(
        &self,
        identity: Identity,
        input: DeleteScanInput,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Delete every scan owned by the caller; returns how many were
    /// removed.
    fn clear_scan_history(
        &self,
        identity: Identity,
    ) -> impl Future<Output = Result<usize, CoreError>> + Send;

    /// Answer one free-form question about a completed scan, grounded in
    /// its result.
    fn chat_about_scan(
        &self,
        identity: Identity,
        input: ChatInput,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}
