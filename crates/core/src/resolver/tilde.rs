//! Home directory expansion.

use std::path::PathBuf;

/// Resolves user-entered paths before they reach the OS.
pub trait PathResolver: Send + Sync {
    /// Replace a leading `~/` with the home directory. Any other path,
    /// including a bare `~` or a `~` later in the path, is returned unchanged.
    fn expand_tilde(&self, path: &str) -> String;
}

/// Path resolver using the current user's home directory.
#[derive(Debug, Clone)]
pub struct HomePathResolver {
    home: Option<PathBuf>,
}

impl Default for HomePathResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl HomePathResolver {
    /// Resolver for the home directory of the current user.
    pub fn new() -> Self {
        Self {
            home: dirs::home_dir(),
        }
    }

    /// Resolver with an explicit home directory.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
        }
    }

    /// The home directory, if one could be determined.
    pub fn home(&self) -> Option<&PathBuf> {
        self.home.as_ref()
    }
}

impl PathResolver for HomePathResolver {
    fn expand_tilde(&self, path: &str) -> String {
        match (&self.home, path.strip_prefix('~')) {
            (Some(home), Some(rest)) if rest.starts_with('/') => {
                format!("{}{}", home.to_string_lossy(), rest)
            }
            _ => path.to_string(),
        }
    }
}
