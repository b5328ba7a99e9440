pub mod claim_verdict;
pub mod ingredient;
pub mod product_scan;
pub mod scan_result;

pub use claim_verdict::*;
pub use ingredient::*;
pub use product_scan::*;
pub use scan_result::*;
