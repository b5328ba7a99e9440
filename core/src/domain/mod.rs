pub mod common;
pub mod personalization;
pub mod preferences;
pub mod scan;
