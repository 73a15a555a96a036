//! Safety checks applied to paths before they are opened or executed.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Characters rejected anywhere in a path.
pub const SHELL_METACHARACTERS: &[char] = &[';', '&', '$', '`', '<', '>', '|', '!'];

/// A path failed a safety check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathSecurityError {
    /// The path contains a shell metacharacter.
    #[error("Path contains invalid shell metacharacters: {path}")]
    ShellMetacharacters { path: String },

    /// The resolved path is outside every allowed root.
    #[error("Path is outside the allowed directory: {}", .path.display())]
    OutsideAllowedRoot { path: PathBuf },

    /// A relative path could not be resolved.
    #[error("Cannot resolve path {path}: {reason}")]
    Unresolvable { path: String, reason: String },
}

/// Validates and resolves paths handed to the OS.
///
/// Every path is checked for shell metacharacters and turned into an
/// absolute, lexically normalized path. Data paths (folders, launch
/// arguments) must additionally lie under one of the allowed roots when
/// root restriction is enabled.
#[derive(Debug, Clone)]
pub struct PathGuard {
    allowed_roots: Vec<PathBuf>,
    restrict_to_roots: bool,
}

impl PathGuard {
    /// Guard restricting data paths to the given roots.
    pub fn new(allowed_roots: Vec<PathBuf>, restrict_to_roots: bool) -> Self {
        Self {
            allowed_roots: allowed_roots.iter().map(|r| normalize_lexically(r)).collect(),
            restrict_to_roots,
        }
    }

    /// Guard that only rejects metacharacters.
    pub fn unrestricted() -> Self {
        Self::new(Vec::new(), false)
    }

    /// The normalized allowed roots.
    pub fn allowed_roots(&self) -> &[PathBuf] {
        &self.allowed_roots
    }

    /// Check a folder or argument path.
    pub fn check_path(&self, path: &str) -> Result<PathBuf, PathSecurityError> {
        reject_metacharacters(path)?;
        let resolved = absolutize(path)?;

        if self.restrict_to_roots && !self.is_allowed(&resolved) {
            return Err(PathSecurityError::OutsideAllowedRoot { path: resolved });
        }

        Ok(resolved)
    }

    /// Check an executable path.
    ///
    /// Executables may live anywhere. A bare program name is returned as-is
    /// so it is looked up on `PATH`.
    pub fn check_executable(&self, path: &str) -> Result<PathBuf, PathSecurityError> {
        reject_metacharacters(path)?;
        if !path.contains('/') && !path.contains('\\') {
            return Ok(PathBuf::from(path));
        }
        absolutize(path)
    }

    fn is_allowed(&self, resolved: &Path) -> bool {
        self.allowed_roots.iter().any(|root| resolved.starts_with(root))
    }
}

fn reject_metacharacters(path: &str) -> Result<(), PathSecurityError> {
    if path.contains(SHELL_METACHARACTERS) {
        return Err(PathSecurityError::ShellMetacharacters {
            path: path.to_string(),
        });
    }
    Ok(())
}

fn absolutize(path: &str) -> Result<PathBuf, PathSecurityError> {
    let raw = Path::new(path);
    if raw.is_absolute() {
        return Ok(normalize_lexically(raw));
    }

    let cwd = std::env::current_dir().map_err(|e| PathSecurityError::Unresolvable {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    Ok(normalize_lexically(&cwd.join(raw)))
}

/// Resolve `.` and `..` without touching the filesystem.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` never climbs above the root.
                if !matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                ) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
