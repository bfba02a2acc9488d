//! Process-wide registries and factories for the two plugin groups.
//!
//! One registry and one factory exist per group for the life of the process.
//! Plugin crates publish into the registries (usually at startup); the engine
//! resolves through the factories.
use std::sync::{Arc, LazyLock};

use super::registry::{EntryPoints, PluginClass, StaticRegistry};
use super::{BoxError, FromConfig, PluginConfig, PluginFactory};
use crate::embedder::Embedder;
use crate::vector_store::VectorStore;

/// Registry group for embedder plugins.
pub const EMBEDDER_GROUP: &str = "ragplug.embedder";

/// Registry group for vector store plugins.
pub const VECTOR_STORE_GROUP: &str = "ragplug.vector_db";

static EMBEDDER_REGISTRY: LazyLock<Arc<StaticRegistry<dyn Embedder>>> =
    LazyLock::new(|| Arc::new(StaticRegistry::new()));

static VECTOR_STORE_REGISTRY: LazyLock<Arc<StaticRegistry<dyn VectorStore>>> =
    LazyLock::new(|| Arc::new(StaticRegistry::new()));

static EMBEDDER_FACTORY: LazyLock<PluginFactory<dyn Embedder>> = LazyLock::new(|| {
    let source: Arc<dyn EntryPoints<dyn Embedder>> = EMBEDDER_REGISTRY.clone();
    PluginFactory::new(EMBEDDER_GROUP, source)
});

static VECTOR_STORE_FACTORY: LazyLock<PluginFactory<dyn VectorStore>> = LazyLock::new(|| {
    let source: Arc<dyn EntryPoints<dyn VectorStore>> = VECTOR_STORE_REGISTRY.clone();
    PluginFactory::new(VECTOR_STORE_GROUP, source)
});

pub fn embedder_registry() -> &'static StaticRegistry<dyn Embedder> {
    &EMBEDDER_REGISTRY
}

pub fn vector_store_registry() -> &'static StaticRegistry<dyn VectorStore> {
    &VECTOR_STORE_REGISTRY
}

pub fn embedder_factory() -> &'static PluginFactory<dyn Embedder> {
    &EMBEDDER_FACTORY
}

pub fn vector_store_factory() -> &'static PluginFactory<dyn VectorStore> {
    &VECTOR_STORE_FACTORY
}

/// Publish an embedder type under `name`.
pub fn register_embedder<P>(name: &str)
where
    P: Embedder + FromConfig + 'static,
{
    register_embedder_fn(name, |config| {
        let embedder: Box<dyn Embedder> = Box::new(P::from_config(config)?);
        Ok(embedder)
    });
}

/// Publish an embedder constructor under `name`.
pub fn register_embedder_fn<F>(name: &str, constructor: F)
where
    F: Fn(&PluginConfig) -> Result<Box<dyn Embedder>, BoxError> + Send + Sync + 'static,
{
    EMBEDDER_REGISTRY.register_class(EMBEDDER_GROUP, PluginClass::new(name, constructor));
}

/// Publish a vector store type under `name`.
pub fn register_vector_store<P>(name: &str)
where
    P: VectorStore + FromConfig + 'static,
{
    register_vector_store_fn(name, |config| {
        let store: Box<dyn VectorStore> = Box::new(P::from_config(config)?);
        Ok(store)
    });
}

/// Publish a vector store constructor under `name`.
pub fn register_vector_store_fn<F>(name: &str, constructor: F)
where
    F: Fn(&PluginConfig) -> Result<Box<dyn VectorStore>, BoxError> + Send + Sync + 'static,
{
    VECTOR_STORE_REGISTRY.register_class(VECTOR_STORE_GROUP, PluginClass::new(name, constructor));
}

pub fn list_embedders() -> Vec<String> {
    EMBEDDER_FACTORY.available_plugins()
}

pub fn list_vector_stores() -> Vec<String> {
    VECTOR_STORE_FACTORY.available_plugins()
}
