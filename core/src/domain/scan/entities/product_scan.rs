use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{common::generate_uuid_v7, scan::entities::ScanResult};

/// One submission of a front+back image pair through the analysis
/// pipeline.
///
/// Invariants: `Completed` implies `result` is present; `Failed` implies
/// `error` is present (the result may then be absent or a partial earlier
/// value). Both statuses are terminal once set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductScan {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Base64-encoded image payload of the product front (marketing side).
    pub front_image: String,
    /// Base64-encoded image payload of the product back (label side).
    pub back_image: String,
    pub result: Option<ScanResult>,
    pub status: ScanStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Pending,
    Completed,
    Failed,
}

impl ScanStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ScanStatus::Pending => "pending",
            ScanStatus::Completed => "completed",
            ScanStatus::Failed => "failed",
        }
    }
}

impl From<&str> for ScanStatus {
    fn from(s: &str) -> Self {
        match s {
            "completed" => ScanStatus::Completed,
            "failed" => ScanStatus::Failed,
            _ => ScanStatus::Pending,
        }
    }
}

impl ProductScan {
    pub fn new(user_id: Uuid, front_image: String, back_image: String) -> Self {
        let now = Utc::now();

        Self {
            id: generate_uuid_v7(),
            user_id,
            front_image,
            back_image,
            result: None,
            status: ScanStatus::Pending,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn complete(&mut self, result: ScanResult) {
        self.result = Some(result);
        self.status = ScanStatus::Completed;
        self.error = None;
        self.updated_at = Utc::now();
    }

    pub fn fail(&mut self, error: String) {
        self.status = ScanStatus::Failed;
        self.error = Some(error);
        self.updated_at = Utc::now();
    }
}
