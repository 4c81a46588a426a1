// JSON document writer
use crate::domain::template::TemplateDocument;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentWriteError {
    #[error("failed to serialize template document: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct JsonDocumentWriter {
    path: PathBuf,
}

impl JsonDocumentWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the document as two-space indented JSON, creating parent
    /// directories as needed.
    pub async fn write(&self, document: &TemplateDocument) -> Result<(), DocumentWriteError> {
        let mut json = serde_json::to_vec_pretty(document)?;
        json.push(b'\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| self.io_error(source))?;
        }
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|source| self.io_error(source))?;
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> DocumentWriteError {
        DocumentWriteError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}
