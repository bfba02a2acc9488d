//! Per-group plugin factory with a monotonically growing class cache.
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use super::registry::{EntryPoints, PluginClass};
use super::{PluginConfig, PluginError};

/// Resolves plugin names within one registry group and builds instances.
///
/// Resolved classes are cached by name for the factory's lifetime; a cache
/// hit never touches the registry. Each factory owns its own cache, so the
/// same name in two groups never collides.
pub struct PluginFactory<T: ?Sized> {
    group: String,
    registry: Arc<dyn EntryPoints<T>>,
    cache: RwLock<HashMap<String, PluginClass<T>>>,
}

impl<T: ?Sized> PluginFactory<T> {
    pub fn new(group: impl Into<String>, registry: Arc<dyn EntryPoints<T>>) -> Self {
        Self {
            group: group.into(),
            registry,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    /// Find the class published as `name` in this factory's group.
    ///
    /// On a cache miss the group is enumerated and the first entry named
    /// `name` is loaded and cached. If nothing matches, the error lists every
    /// name the group does publish.
    pub fn get_plugin_class(&self, name: &str) -> Result<PluginClass<T>, PluginError> {
        if let Some(class) = self.read_cache().get(name) {
            debug!("Plugin '{name}' served from cache (group '{}')", self.group);
            return Ok(class.clone());
        }

        let entries = self.registry.select(&self.group);
        debug!(
            "Enumerated {} plugins in group '{}' looking for '{name}'",
            entries.len(),
            self.group
        );

        let mut matches = entries.iter().filter(|ep| ep.name() == name);
        let Some(entry) = matches.next() else {
            return Err(PluginError::NotFound {
                name: name.to_string(),
                group: self.group.clone(),
                available: entries.iter().map(|ep| ep.name().to_string()).collect(),
            });
        };

        let shadowed = matches.count();
        if shadowed > 0 {
            warn!(
                "Plugin '{name}' is published {} times in group '{}'; using the first",
                shadowed + 1,
                self.group
            );
        }

        let class = entry.load().map_err(|source| {
            warn!("Failed to load plugin '{name}' from group '{}'", self.group);
            PluginError::LoadFailed(source)
        })?;

        // Concurrent first lookups converge on whichever class landed first.
        let mut cache = self.write_cache();
        Ok(cache.entry(name.to_string()).or_insert(class).clone())
    }

    /// Resolve `name` and build an instance, forwarding `config` unchanged.
    ///
    /// A constructor failure comes back as [`PluginError::Construction`]
    /// carrying the constructor's own error.
    pub fn create_instance(&self, name: &str, config: &PluginConfig) -> Result<Box<T>, PluginError> {
        let class = self.get_plugin_class(name)?;
        info!("Creating plugin instance '{name}' from group '{}'", self.group);
        class.instantiate(config).map_err(PluginError::Construction)
    }

    /// Every name published in this group, in enumeration order.
    pub fn available_plugins(&self) -> Vec<String> {
        self.registry
            .select(&self.group)
            .iter()
            .map(|ep| ep.name().to_string())
            .collect()
    }

    /// Whether `name` has already been resolved by this factory.
    pub fn is_cached(&self, name: &str) -> bool {
        self.read_cache().contains_key(name)
    }

    fn read_cache(&self) -> RwLockReadGuard<'_, HashMap<String, PluginClass<T>>> {
        self.cache.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_cache(&self) -> RwLockWriteGuard<'_, HashMap<String, PluginClass<T>>> {
        self.cache.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: ?Sized> fmt::Debug for PluginFactory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cached: Vec<String> = self.read_cache().keys().cloned().collect();
        f.debug_struct("PluginFactory")
            .field("group", &self.group)
            .field("cached", &cached)
            .finish_non_exhaustive()
    }
}
