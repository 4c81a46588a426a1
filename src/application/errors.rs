// Structural errors raised while folding rows into the template tree
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Hierarchy level an offending row needed to have open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Tab,
    Grid,
    Chart,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Tab => f.write_str("tab"),
            Level::Grid => f.write_str("grid"),
            Level::Chart => f.write_str("chart"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {row}: no open {missing} to attach to")]
pub struct StructuralError {
    pub row: usize,
    pub missing: Level,
}

impl StructuralError {
    pub fn new(row: usize, missing: Level) -> Self {
        Self { row, missing }
    }
}
