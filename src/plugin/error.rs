use thiserror::Error;

/// Boxed error returned by plugin loaders and constructors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while resolving or instantiating a plugin.
#[derive(Error, Debug)]
pub enum PluginError {
    #[error("plugin '{name}' not found in group '{group}'. Available plugins: {available:?}")]
    NotFound {
        name: String,
        group: String,
        available: Vec<String>,
    },

    /// The entry's loader failed. Its error is passed through untouched.
    #[error(transparent)]
    LoadFailed(BoxError),

    /// The plugin's constructor failed. Its error is passed through untouched.
    #[error(transparent)]
    Construction(BoxError),
}

impl PluginError {
    /// Names published in the group, when the lookup failed.
    pub fn available(&self) -> Option<&[String]> {
        match self {
            PluginError::NotFound { available, .. } => Some(available),
            _ => None,
        }
    }
}
