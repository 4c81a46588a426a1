// Local JSON export row source
use crate::application::table_source::{Row, TableSource};
use crate::infrastructure::sheet_values::{SheetValues, SourceFetchError};
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_values(&self) -> Result<SheetValues, SourceFetchError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceFetchError::Io {
                path: self.path.display().to_string(),
                source,
            })?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[async_trait]
impl TableSource for JsonFileSource {
    async fn fetch_rows(&self) -> anyhow::Result<Vec<Row>> {
        tracing::debug!("Reading outline rows from {}", self.path.display());
        Ok(self.read_values().await?.into_rows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_reads_value_range_export() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"range": "Sheet1!A4:J", "values": [["Tab1", "Grid1"], ["", "", "Bar", "Chart"]]}}"#
        )
        .unwrap();

        let rows = JsonFileSource::new(file.path()).fetch_rows().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["", "", "Bar", "Chart"]);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = JsonFileSource::new("no/such/rows.json")
            .fetch_rows()
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SourceFetchError>(),
            Some(SourceFetchError::Io { .. })
        ));
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = JsonFileSource::new(file.path()).fetch_rows().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SourceFetchError>(),
            Some(SourceFetchError::Decode(_))
        ));
    }
}
