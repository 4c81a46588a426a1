// Domain layer - Template document model and row semantics
pub mod board;
pub mod row;
pub mod template;
