use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - At least one URL scheme is allowed
/// - Opener timeout is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Launcher validation
    if config
        .launcher
        .allowed_url_schemes
        .iter()
        .all(|s| s.trim().is_empty())
    {
        return Err(ConfigError::ValidationError(
            "launcher.allowed_url_schemes cannot be empty".to_string(),
        ));
    }

    if config.launcher.opener_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "launcher.opener_timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let config = Config {
            server: ServerConfig {
                port: 0,
                ..ServerConfig::default()
            },
            ..Config::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_empty_schemes_fails() {
        let mut config = Config::default();
        config.launcher.allowed_url_schemes.clear();
        assert!(validate_config(&config).is_err());

        config.launcher.allowed_url_schemes = vec![" ".to_string()];
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_opener_timeout_fails() {
        let mut config = Config::default();
        config.launcher.opener_timeout_secs = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("opener_timeout_secs"));
    }
}
