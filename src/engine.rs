//! The engine: one embedder plus one vector store behind index/search.
use std::fmt;

use thiserror::Error;
use tracing::info;

use crate::config::EngineConfig;
use crate::embedder::{Embedder, EmbedderError};
use crate::plugin::{self, PluginConfig, PluginError, PluginFactory};
use crate::vector_store::{Metadata, VectorStore, VectorStoreError};

/// Result limit used by [`Engine::search_default`] unless configured otherwise.
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Errors surfaced by the engine. Every variant passes its source through
/// without adding context.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Plugin(#[from] PluginError),

    #[error(transparent)]
    Embedder(#[from] EmbedderError),

    #[error(transparent)]
    VectorStore(#[from] VectorStoreError),
}

/// Composes an embedder and a vector store, both resolved by plugin name.
///
/// The pair is fixed at construction. Construction either yields both
/// plugins or fails; a half-built engine is never returned.
pub struct Engine {
    vector_store_name: String,
    embedder_name: String,
    vector_store: Box<dyn VectorStore>,
    embedder: Box<dyn Embedder>,
    default_limit: usize,
}

impl Engine {
    /// Build an engine from the process-wide plugin factories.
    ///
    /// Both plugins receive the same `config`.
    pub fn new(
        vector_store_name: &str,
        embedder_name: &str,
        config: &PluginConfig,
    ) -> Result<Self, EngineError> {
        Self::with_factories(
            plugin::vector_store_factory(),
            plugin::embedder_factory(),
            vector_store_name,
            embedder_name,
            config,
        )
    }

    /// Build an engine from explicit factories.
    ///
    /// Both names are resolved before anything is constructed, so an unknown
    /// name runs no constructor. The embedder is constructed first; if it
    /// fails, the vector store constructor is never called.
    pub fn with_factories(
        vector_stores: &PluginFactory<dyn VectorStore>,
        embedders: &PluginFactory<dyn Embedder>,
        vector_store_name: &str,
        embedder_name: &str,
        config: &PluginConfig,
    ) -> Result<Self, EngineError> {
        info!(
            "Initializing engine with vector store '{vector_store_name}' and embedder '{embedder_name}'"
        );

        embedders.get_plugin_class(embedder_name)?;
        vector_stores.get_plugin_class(vector_store_name)?;

        let embedder = embedders.create_instance(embedder_name, config)?;
        let vector_store = vector_stores.create_instance(vector_store_name, config)?;

        Ok(Self {
            vector_store_name: vector_store_name.to_string(),
            embedder_name: embedder_name.to_string(),
            vector_store,
            embedder,
            default_limit: DEFAULT_SEARCH_LIMIT,
        })
    }

    /// Build an engine from a validated [`EngineConfig`].
    pub fn from_config(config: &EngineConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let engine = Self::new(&config.vector_store, &config.embedder, &config.options)?;
        Ok(engine.with_default_limit(config.search_limit))
    }

    #[must_use]
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    /// Embed `text` and store it with its metadata.
    ///
    /// How text and metadata are attached to the vector is up to the store
    /// (see [`VectorStore::upsert`]).
    pub fn index_text(&mut self, text: &str, metadata: Option<Metadata>) -> Result<(), EngineError> {
        let embedding = self.embedder.embed_text(text)?;
        self.vector_store.upsert(embedding, text, metadata)?;
        Ok(())
    }

    /// Embed `query` and return the store's top `limit` records unchanged.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<Metadata>, EngineError> {
        let query_embedding = self.embedder.embed_text(query)?;
        Ok(self.vector_store.search(&query_embedding, limit)?)
    }

    /// [`Engine::search`] with the engine's default limit.
    pub fn search_default(&self, query: &str) -> Result<Vec<Metadata>, EngineError> {
        self.search(query, self.default_limit)
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    pub fn vector_store_name(&self) -> &str {
        &self.vector_store_name
    }

    pub fn embedder_name(&self) -> &str {
        &self.embedder_name
    }

    pub fn embedder(&self) -> &dyn Embedder {
        self.embedder.as_ref()
    }

    pub fn vector_store(&self) -> &dyn VectorStore {
        self.vector_store.as_ref()
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("vector_store", &self.vector_store_name)
            .field("embedder", &self.embedder_name)
            .field("default_limit", &self.default_limit)
            .finish_non_exhaustive()
    }
}
