//! Embedder contract and shared types for text embedding.
//!
//! Concrete embedders live in plugin crates and are resolved by name through
//! [`crate::plugin::embedder_factory`].
use thiserror::Error;

use crate::plugin::BoxError;

/// Errors that can occur during embedding operations.
#[derive(Error, Debug)]
pub enum EmbedderError {
    #[error("inference failed: {0}")]
    InferenceFailed(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Backend-specific failure, passed through as-is.
    #[error(transparent)]
    Backend(BoxError),
}

/// Trait for text embedding implementations.
///
/// All implementations must be `Send + Sync` so an engine holding one can be
/// moved across threads.
pub trait Embedder: Send + Sync {
    /// Embed a single text string into a vector.
    fn embed_text(&self, text: &str) -> Result<Vec<f32>, EmbedderError>;

    /// Embed multiple texts. Returns one vector per input, in input order.
    fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedderError>;
}
