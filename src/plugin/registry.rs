//! Registry groups: where named plugin classes are published.
//!
//! A registry maps a group identifier to an ordered list of [`EntryPoint`]s.
//! Listing a group is cheap; an entry's loader runs only when that entry is
//! actually requested.
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use super::{BoxError, PluginConfig};

/// A resolved plugin "class": a name plus the constructor that builds instances.
///
/// Cloning is cheap and clones compare equal under [`PluginClass::ptr_eq`].
pub struct PluginClass<T: ?Sized> {
    inner: Arc<ClassInner<T>>,
}

struct ClassInner<T: ?Sized> {
    name: String,
    constructor: Box<dyn Fn(&PluginConfig) -> Result<Box<T>, BoxError> + Send + Sync>,
}

impl<T: ?Sized + 'static> PluginClass<T> {
    pub fn new<F>(name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(&PluginConfig) -> Result<Box<T>, BoxError> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(ClassInner {
                name: name.into(),
                constructor: Box::new(constructor),
            }),
        }
    }
}

impl<T: ?Sized> PluginClass<T> {
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Run the constructor. Its error is returned exactly as produced.
    pub fn instantiate(&self, config: &PluginConfig) -> Result<Box<T>, BoxError> {
        (self.inner.constructor)(config)
    }

    /// Whether both handles refer to the same loaded class.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: ?Sized> Clone for PluginClass<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: ?Sized> fmt::Debug for PluginClass<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginClass")
            .field("name", &self.inner.name)
            .finish_non_exhaustive()
    }
}

/// One published `(name, loader)` pair within a group.
pub struct EntryPoint<T: ?Sized> {
    name: String,
    group: String,
    loader: Arc<dyn Fn() -> Result<PluginClass<T>, BoxError> + Send + Sync>,
}

impl<T: ?Sized + 'static> EntryPoint<T> {
    pub fn new<F>(group: impl Into<String>, name: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> Result<PluginClass<T>, BoxError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            group: group.into(),
            loader: Arc::new(loader),
        }
    }
}

impl<T: ?Sized> EntryPoint<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    /// Resolve the entry to its class. May run plugin initialization code.
    pub fn load(&self) -> Result<PluginClass<T>, BoxError> {
        (self.loader)()
    }
}

impl<T: ?Sized> Clone for EntryPoint<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            group: self.group.clone(),
            loader: Arc::clone(&self.loader),
        }
    }
}

impl<T: ?Sized> fmt::Debug for EntryPoint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryPoint")
            .field("name", &self.name)
            .field("group", &self.group)
            .finish_non_exhaustive()
    }
}

/// Source of published plugins, queried one group at a time.
pub trait EntryPoints<T: ?Sized>: Send + Sync {
    /// Every entry published under `group`, in the registry's enumeration order.
    fn select(&self, group: &str) -> Vec<EntryPoint<T>>;
}

/// In-process registration table. Enumeration follows registration order.
pub struct StaticRegistry<T: ?Sized> {
    entries: RwLock<Vec<EntryPoint<T>>>,
}

impl<T: ?Sized> Default for StaticRegistry<T> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }
}

impl<T: ?Sized + 'static> StaticRegistry<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish `name` under `group` with a lazy loader.
    pub fn register<F>(&self, group: &str, name: &str, loader: F)
    where
        F: Fn() -> Result<PluginClass<T>, BoxError> + Send + Sync + 'static,
    {
        self.push(EntryPoint::new(group, name, loader));
    }

    /// Publish an already-built class under `group`, using the class's name.
    pub fn register_class(&self, group: &str, class: PluginClass<T>) {
        let name = class.name().to_string();
        self.push(EntryPoint::new(group, name, move || Ok(class.clone())));
    }

    pub fn push(&self, entry: EntryPoint<T>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }

    /// Total entries across all groups.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: ?Sized> EntryPoints<T> for StaticRegistry<T> {
    fn select(&self, group: &str) -> Vec<EntryPoint<T>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|ep| ep.group == group)
            .cloned()
            .collect()
    }
}
