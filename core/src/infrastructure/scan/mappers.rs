use crate::{domain::scan::entities::ProductScan, entity::product_scans};

impl From<&product_scans::Model> for ProductScan {
    fn from(model: &product_scans::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            front_image: model.front_image.clone(),
            back_image: model.back_image.clone(),
            // A result column that no longer deserializes is treated as
            // absent rather than poisoning the whole record.
            result: model
                .result
                .clone()
                .and_then(|value| serde_json::from_value(value).ok()),
            status: model.status.as_str().into(),
            error: model.error.clone(),
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        }
    }
}

impl From<product_scans::Model> for ProductScan {
    fn from(model: product_scans::Model) -> Self {
        Self::from(&model)
    }
}
