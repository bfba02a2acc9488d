//! Vector store contract, record metadata, and error types.
use serde_json::Value;
use thiserror::Error;

use crate::plugin::BoxError;

/// Metadata attached to a stored vector, and the shape of a search hit.
pub type Metadata = serde_json::Map<String, Value>;

/// Key under which the default [`VectorStore::upsert`] stores the raw text.
pub const TEXT_KEY: &str = "text";

/// Errors that can occur during vector store operations.
#[derive(Error, Debug)]
pub enum VectorStoreError {
    #[error("got {vectors} vectors but {metadata} metadata records")]
    LengthMismatch { vectors: usize, metadata: usize },

    #[error("vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Backend-specific failure, passed through as-is.
    #[error(transparent)]
    Backend(BoxError),
}

/// Trait for vector store implementations.
pub trait VectorStore: Send + Sync {
    /// Add vectors with parallel metadata records.
    ///
    /// Callers must pass `vectors.len() == metadata.len()`. Implementations
    /// may check this with [`ensure_parallel`].
    fn add_vectors(
        &mut self,
        vectors: Vec<Vec<f32>>,
        metadata: Vec<Metadata>,
    ) -> Result<(), VectorStoreError>;

    /// Return up to `limit` records, most relevant first.
    fn search(&self, vector: &[f32], limit: usize) -> Result<Vec<Metadata>, VectorStoreError>;

    /// Store one vector together with the text it was computed from.
    ///
    /// The default keeps the caller's metadata and writes `text` under
    /// [`TEXT_KEY`], replacing any value already there. Stores with their own
    /// document model should override this.
    fn upsert(
        &mut self,
        vector: Vec<f32>,
        text: &str,
        metadata: Option<Metadata>,
    ) -> Result<(), VectorStoreError> {
        let mut record = metadata.unwrap_or_default();
        record.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
        self.add_vectors(vec![vector], vec![record])
    }
}

/// Check the `add_vectors` length invariant.
pub fn ensure_parallel(vectors: &[Vec<f32>], metadata: &[Metadata]) -> Result<(), VectorStoreError> {
    if vectors.len() != metadata.len() {
        return Err(VectorStoreError::LengthMismatch {
            vectors: vectors.len(),
            metadata: metadata.len(),
        });
    }
    Ok(())
}
