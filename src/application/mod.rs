// Application layer - Use cases and the row-folding core
pub mod board_context;
pub mod errors;
pub mod hierarchy_builder;
pub mod id_generator;
pub mod table_source;
pub mod template_service;
