pub mod error;
pub mod ingestion_config;

// Schema inference and typed table types
pub mod table;
