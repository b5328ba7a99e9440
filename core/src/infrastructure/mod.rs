pub mod llm;
pub mod preferences;
pub mod scan;
