use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use crate::launcher::LauncherConfig;
use crate::orchestrator::OrchestratorConfig;
use crate::resolver::PathResolver;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub launcher: LauncherConfig,
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_port() -> u16 {
    7878
}

/// Workspace store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// YAML file holding all workspaces. A leading `~/` is expanded.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("~/.workdeck/workspaces.yaml")
}

impl StoreConfig {
    /// The store path with a leading `~/` expanded.
    pub fn resolved_path(&self, resolver: &dyn PathResolver) -> PathBuf {
        PathBuf::from(resolver.expand_tilde(&self.path.to_string_lossy()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::DependencyPolicy;
    use crate::resolver::HomePathResolver;

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
        assert_eq!(config.server.port, 7878);
        assert_eq!(config.store.path, PathBuf::from("~/.workdeck/workspaces.yaml"));
        assert_eq!(config.launcher.opener_timeout_secs, 10);
        assert_eq!(config.orchestrator.max_wait_secs, 300);
    }

    #[test]
    fn test_deserialize_all_sections() {
        let toml = r#"
[server]
host = "0.0.0.0"
port = 9000

[store]
path = "/srv/workdeck/workspaces.yaml"

[launcher]
allowed_url_schemes = ["https"]
opener = "gio open"

[orchestrator]
dependency_policy = "enforce"
max_wait_secs = 60
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.store.path, PathBuf::from("/srv/workdeck/workspaces.yaml"));
        assert_eq!(config.launcher.allowed_url_schemes, vec!["https"]);
        assert_eq!(config.orchestrator.dependency_policy, DependencyPolicy::Enforce);
        assert_eq!(config.orchestrator.max_wait_secs, 60);
    }

    #[test]
    fn test_store_path_resolution() {
        let resolver = HomePathResolver::with_home("/home/ada");
        let store = StoreConfig::default();
        assert_eq!(
            store.resolved_path(&resolver),
            PathBuf::from("/home/ada/.workdeck/workspaces.yaml")
        );

        let store = StoreConfig {
            path: PathBuf::from("/data/ws.yaml"),
        };
        assert_eq!(store.resolved_path(&resolver), PathBuf::from("/data/ws.yaml"));
    }

    #[test]
    fn test_serialize_roundtrip_for_config_endpoint() {
        let json = serde_json::to_value(Config::default()).unwrap();
        assert_eq!(json["server"]["port"], 7878);
        assert_eq!(json["orchestrator"]["dependency_policy"], "advisory");
    }
}
