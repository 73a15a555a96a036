//! Configuration for the launcher module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the system launch primitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LauncherConfig {
    /// URL schemes that may be opened.
    #[serde(default = "default_schemes")]
    pub allowed_url_schemes: Vec<String>,

    /// Whether folder and argument paths must lie under an allowed root.
    #[serde(default = "default_true")]
    pub restrict_to_allowed_roots: bool,

    /// Allowed roots in addition to the home directory. `~/` is expanded.
    #[serde(default = "default_allowed_roots")]
    pub allowed_roots: Vec<PathBuf>,

    /// Command used to open URLs and paths, e.g. `"xdg-open"` or
    /// `"gio open"`. Defaults to the platform opener.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opener: Option<String>,

    /// How long to wait for the opener to exit (seconds).
    #[serde(default = "default_opener_timeout")]
    pub opener_timeout_secs: u64,
}

fn default_schemes() -> Vec<String> {
    vec!["http".to_string(), "https".to_string(), "mailto".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_opener_timeout() -> u64 {
    10
}

#[cfg(target_os = "macos")]
fn default_allowed_roots() -> Vec<PathBuf> {
    ["/Applications", "/System/Applications"]
        .into_iter()
        .map(PathBuf::from)
        .collect()
}

#[cfg(target_os = "windows")]
fn default_allowed_roots() -> Vec<PathBuf> {
    [r"C:\Program Files", r"C:\Program Files (x86)"]
        .into_iter()
        .map(PathBuf::from)
        .collect()
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn default_allowed_roots() -> Vec<PathBuf> {
    ["/usr/bin", "/usr/local/bin", "/usr/share/applications", "/opt", "/snap/bin"]
        .into_iter()
        .map(PathBuf::from)
        .collect()
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            allowed_url_schemes: default_schemes(),
            restrict_to_allowed_roots: true,
            allowed_roots: default_allowed_roots(),
            opener: None,
            opener_timeout_secs: default_opener_timeout(),
        }
    }
}

impl LauncherConfig {
    /// Sets the URL scheme allow-list.
    pub fn with_allowed_schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_url_schemes = schemes.into_iter().map(Into::into).collect();
        self
    }

    /// Enables or disables root restriction.
    pub fn with_root_restriction(mut self, enabled: bool) -> Self {
        self.restrict_to_allowed_roots = enabled;
        self
    }

    /// Adds an allowed root.
    pub fn with_allowed_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.allowed_roots.push(root.into());
        self
    }

    /// Sets the opener command.
    pub fn with_opener(mut self, opener: impl Into<String>) -> Self {
        self.opener = Some(opener.into());
        self
    }

    /// Whether a URL scheme is allowed (case-insensitive).
    pub fn allows_scheme(&self, scheme: &str) -> bool {
        self.allowed_url_schemes
            .iter()
            .any(|s| s.trim_end_matches(':').eq_ignore_ascii_case(scheme))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LauncherConfig::default();
        assert_eq!(config.allowed_url_schemes, vec!["http", "https", "mailto"]);
        assert!(config.restrict_to_allowed_roots);
        assert!(!config.allowed_roots.is_empty());
        assert!(config.opener.is_none());
        assert_eq!(config.opener_timeout_secs, 10);
    }

    #[test]
    fn test_allows_scheme() {
        let config = LauncherConfig::default().with_allowed_schemes(["https", "vscode:"]);
        assert!(config.allows_scheme("https"));
        assert!(config.allows_scheme("HTTPS"));
        assert!(config.allows_scheme("vscode"));
        assert!(!config.allows_scheme("http"));
        assert!(!config.allows_scheme("file"));
    }

    #[test]
    fn test_deserialize_minimal() {
        let config: LauncherConfig = toml::from_str("").unwrap();
        assert_eq!(config.allowed_url_schemes.len(), 3);
        assert_eq!(config.opener_timeout_secs, 10);
    }

    #[test]
    fn test_deserialize_full() {
        let toml = r#"
            allowed_url_schemes = ["https"]
            restrict_to_allowed_roots = false
            allowed_roots = ["/srv/projects"]
            opener = "gio open"
            opener_timeout_secs = 3
        "#;
        let config: LauncherConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.allowed_url_schemes, vec!["https"]);
        assert!(!config.restrict_to_allowed_roots);
        assert_eq!(config.allowed_roots, vec![PathBuf::from("/srv/projects")]);
        assert_eq!(config.opener.as_deref(), Some("gio open"));
        assert_eq!(config.opener_timeout_secs, 3);
    }
}
