// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod document_writer;
pub mod file_source;
pub mod sheet_values;
pub mod sheets_source;
pub mod uuid_generator;
