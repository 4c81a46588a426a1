// Row source trait for outline table access
use async_trait::async_trait;

/// One sheet row: an ordered list of string cells, possibly empty.
pub type Row = Vec<String>;

#[async_trait]
pub trait TableSource: Send + Sync {
    /// Fetch every row of the outline, in sheet order.
    /// Retrying transient failures is the implementor's business.
    async fn fetch_rows(&self) -> anyhow::Result<Vec<Row>>;
}
