//! Plugin resolution: registry groups, plugin classes, and per-group factories.
//!
//! A plugin is published under a name in a registry group. A
//! [`PluginFactory`] bound to that group resolves the name to a
//! [`PluginClass`] (cached after the first lookup) and instantiates it with
//! a [`PluginConfig`].
//!
//! The process-wide embedder and vector-store factories live in [`global`].
//!
//! ```ignore
//! use ragplug::plugin::{self, FromConfig, PluginConfig};
//!
//! plugin::register_embedder::<MyEmbedder>("my-embedder");
//! let embedder = plugin::embedder_factory()
//!     .create_instance("my-embedder", &PluginConfig::new().with("model", "e5-small"))?;
//! ```

pub mod config;
pub mod error;
pub mod factory;
pub mod global;
pub mod registry;

pub use config::PluginConfig;
pub use error::{BoxError, PluginError};
pub use factory::PluginFactory;
pub use global::{
    EMBEDDER_GROUP, VECTOR_STORE_GROUP, embedder_factory, embedder_registry, list_embedders,
    list_vector_stores, register_embedder, register_embedder_fn, register_vector_store,
    register_vector_store_fn, vector_store_factory, vector_store_registry,
};
pub use registry::{EntryPoint, EntryPoints, PluginClass, StaticRegistry};

/// Construction from opaque, named configuration.
///
/// Implemented by concrete plugins. Reject configuration you cannot work with
/// by returning an error; ignore keys you do not use.
pub trait FromConfig: Sized {
    fn from_config(config: &PluginConfig) -> Result<Self, BoxError>;
}
