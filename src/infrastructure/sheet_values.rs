// Sheets ValueRange payload and row-source errors
use crate::application::table_source::Row;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceFetchError {
    #[error("sheet request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("not authorized to read the sheet (status {0})")]
    Unauthorized(StatusCode),
    #[error("sheet request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("failed to decode sheet values: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("gave up after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        last: Box<SourceFetchError>,
    },
}

impl SourceFetchError {
    /// Network failures, throttling and server errors are worth another try.
    pub fn is_transient(&self) -> bool {
        match self {
            SourceFetchError::Request(_) => true,
            SourceFetchError::Status { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            _ => false,
        }
    }
}

/// Response body of `GET /v4/spreadsheets/{id}/values/{range}`. `values` is
/// absent when the range holds no data; trailing empty cells are dropped.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

/// Exported sheet contents: either a full ValueRange or a bare row matrix.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SheetValues {
    Range(ValueRange),
    Rows(Vec<Vec<Value>>),
}

impl SheetValues {
    pub fn into_rows(self) -> Vec<Row> {
        let values = match self {
            SheetValues::Range(range) => range.values,
            SheetValues::Rows(rows) => rows,
        };
        values_to_rows(values)
    }
}

pub fn values_to_rows(values: Vec<Vec<Value>>) -> Vec<Row> {
    values
        .into_iter()
        .map(|row| row.into_iter().map(cell_to_string).collect())
        .collect()
}

fn cell_to_string(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
