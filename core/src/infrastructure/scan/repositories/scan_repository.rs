use sea_orm::{
    sea_query::OnConflict, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        scan::{entities::ProductScan, ports::ScanRepository},
    },
    entity::product_scans::{ActiveModel, Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresScanRepository {
    pub db: DatabaseConnection,
}

impl PostgresScanRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ScanRepository for PostgresScanRepository {
    async fn upsert(&self, scan: ProductScan) -> Result<ProductScan, CoreError> {
        let result_json = scan
            .result
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| {
                error!("Failed to serialize scan result: {}", e);
                CoreError::Persistence(format!("scan result serialization: {e}"))
            })?;

        let saved = Entity::insert(ActiveModel {
            id: Set(scan.id),
            user_id: Set(scan.user_id),
            front_image: Set(scan.front_image),
            back_image: Set(scan.back_image),
            result: Set(result_json),
            status: Set(scan.status.as_str().to_string()),
            error: Set(scan.error),
            created_at: Set(scan.created_at.fixed_offset()),
            updated_at: Set(scan.updated_at.fixed_offset()),
        })
        .on_conflict(
            OnConflict::column(Column::Id)
                .update_columns([
                    Column::Result,
                    Column::Status,
                    Column::Error,
                    Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(&self.db)
        .await
        .map(ProductScan::from)
        .map_err(|e| {
            error!("Failed to upsert scan: {}", e);
            CoreError::Persistence(e.to_string())
        })?;

        Ok(saved)
    }

    async fn get_by_id(&self, scan_id: Uuid) -> Result<Option<ProductScan>, CoreError> {
        let scan = Entity::find_by_id(scan_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get scan: {}", e);
                CoreError::Persistence(e.to_string())
            })?
            .map(ProductScan::from);

        Ok(scan)
    }

    async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<ProductScan>, CoreError> {
        let scans = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list scans: {}", e);
                CoreError::Persistence(e.to_string())
            })?;

        Ok(scans.iter().map(ProductScan::from).collect())
    }

    async fn delete(&self, scan_id: Uuid) -> Result<(), CoreError> {
        Entity::delete_by_id(scan_id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete scan: {}", e);
                CoreError::Persistence(e.to_string())
            })?;

        Ok(())
    }
}
