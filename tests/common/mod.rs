//! Shared test plugins, registered once into the process-wide registries.
#![allow(dead_code)]

use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Once;

use ragplug::plugin::{self, BoxError, FromConfig, PluginConfig};
use ragplug::vector_store::{Metadata, VectorStore, VectorStoreError, ensure_parallel};
use ragplug::{Embedder, EmbedderError};
use serde::Deserialize;

pub const HASH_EMBEDDER: &str = "it-hash";
pub const MEMORY_STORE: &str = "it-memory";
pub const FAILING_EMBEDDER: &str = "it-failing-embedder";
pub const TINY_STORE: &str = "it-tiny-store";

static REGISTER: Once = Once::new();

/// Publish the test plugins. Safe to call from every test.
pub fn register_plugins() {
    REGISTER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        plugin::register_embedder::<HashEmbedder>(HASH_EMBEDDER);
        plugin::register_vector_store::<MemoryStore>(MEMORY_STORE);
        plugin::register_embedder_fn(FAILING_EMBEDDER, |_| Err("embedder offline".into()));
        plugin::register_vector_store_fn(TINY_STORE, |_| {
            let store: Box<dyn VectorStore> = Box::new(MemoryStore::with_dimensions(3));
            Ok(store)
        });
    });
}

#[derive(Debug, Deserialize)]
struct HashSettings {
    #[serde(default = "default_dimensions")]
    dimensions: usize,
}

fn default_dimensions() -> usize {
    64
}

/// Deterministic embedder seeded from the text hash, L2-normalized.
pub struct HashEmbedder {
    pub dimensions: usize,
}

impl FromConfig for HashEmbedder {
    fn from_config(config: &PluginConfig) -> Result<Self, BoxError> {
        let settings: HashSettings = config.parse()?;
        if settings.dimensions == 0 {
            return Err("dimensions must be positive".into());
        }
        Ok(Self {
            dimensions: settings.dimensions,
        })
    }
}

impl Embedder for HashEmbedder {
    fn embed_text(&self, text: &str) -> Result<Vec<f32>, EmbedderError> {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let bytes = hasher.finish().to_le_bytes();

        let mut embedding: Vec<f32> = (0..self.dimensions)
            .map(|i| f32::from(bytes[i % 8]) / 255.0)
            .collect();

        let norm_sq: f32 = embedding.iter().map(|v| v * v).sum();
        if norm_sq > 0.0 {
            let inv = 1.0 / norm_sq.sqrt();
            for v in &mut embedding {
                *v *= inv;
            }
        }
        Ok(embedding)
    }

    fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedderError> {
        texts.iter().map(|t| self.embed_text(t)).collect()
    }
}

#[derive(Debug, Deserialize)]
struct MemorySettings {
    #[serde(default = "default_dimensions")]
    dimensions: usize,
}

/// Brute-force cosine-similarity store held in memory.
pub struct MemoryStore {
    dimensions: usize,
    rows: Vec<(Vec<f32>, Metadata)>,
}

impl MemoryStore {
    pub fn with_dimensions(dimensions: usize) -> Self {
        Self {
            dimensions,
            rows: Vec::new(),
        }
    }
}

impl FromConfig for MemoryStore {
    fn from_config(config: &PluginConfig) -> Result<Self, BoxError> {
        let settings: MemorySettings = config.parse()?;
        Ok(Self::with_dimensions(settings.dimensions))
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na: f32 = a.iter().map(|v| v * v).sum::<f32>().sqrt();
    let nb: f32 = b.iter().map(|v| v * v).sum::<f32>().sqrt();
    if na == 0.0 || nb == 0.0 { 0.0 } else { dot / (na * nb) }
}

impl VectorStore for MemoryStore {
    fn add_vectors(
        &mut self,
        vectors: Vec<Vec<f32>>,
        metadata: Vec<Metadata>,
    ) -> Result<(), VectorStoreError> {
        ensure_parallel(&vectors, &metadata)?;
        for v in &vectors {
            if v.len() != self.dimensions {
                return Err(VectorStoreError::DimensionMismatch {
                    expected: self.dimensions,
                    actual: v.len(),
                });
            }
        }
        self.rows.extend(vectors.into_iter().zip(metadata));
        Ok(())
    }

    fn search(&self, vector: &[f32], limit: usize) -> Result<Vec<Metadata>, VectorStoreError> {
        let mut scored: Vec<(f32, &Metadata)> = self
            .rows
            .iter()
            .map(|(v, m)| (cosine(vector, v), m))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        Ok(scored
            .into_iter()
            .take(limit)
            .map(|(score, m)| {
                let mut hit = m.clone();
                hit.insert("score".to_string(), serde_json::json!(score));
                hit
            })
            .collect())
    }
}
