// Identifier generation seam
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

#[cfg(test)]
pub use sequential::SequentialIds;
