pub mod product_scans;
pub mod user_preferences;
