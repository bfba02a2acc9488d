//! # ragplug: Pluggable RAG orchestration
//!
//! Wires an externally supplied embedder and vector store together to index
//! and query text. Neither component is implemented here: both are plugins,
//! resolved by name from a registry group and instantiated with shared,
//! opaque configuration.
//!
//! ## Architecture
//!
//! - **[`embedder`]**: `Embedder` contract and its error type
//! - **[`vector_store`]**: `VectorStore` contract, record metadata, error type
//! - **[`plugin`]**: registry groups, plugin classes, cached per-group factories
//! - **[`engine`]**: `Engine`: one embedder + one vector store behind index/search
//! - **[`config`]**: `EngineConfig` loading (JSON / TOML / YAML) and validation

pub mod config;
pub mod embedder;
pub mod engine;
pub mod plugin;
pub mod vector_store;

pub use config::EngineConfig;
pub use embedder::{Embedder, EmbedderError};
pub use engine::{DEFAULT_SEARCH_LIMIT, Engine, EngineError};
pub use plugin::{BoxError, FromConfig, PluginConfig, PluginError};
pub use vector_store::{Metadata, VectorStore, VectorStoreError};
