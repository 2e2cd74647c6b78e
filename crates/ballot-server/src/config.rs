use anyhow::Context;
use serde::Deserialize;

/// Server configuration, loaded from a TOML file. Every field has a default
/// so a missing file or an empty file still yields a runnable local setup.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    /// Externally reachable base URL, if different from the bind address.
    pub public_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            public_url: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://data/ballot.db?mode=rwc".to_string(),
            max_connections: 5,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiry_seconds: u64,
    pub registration_enabled: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_expiry_seconds: 60 * 60 * 24 * 7,
            registration_enabled: true,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let config = if std::path::Path::new(path).exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("could not read config file '{path}'"))?;
            toml::from_str(&contents)
                .with_context(|| format!("could not parse config file '{path}'"))?
        } else {
            tracing::warn!("Config file '{}' not found, using defaults", path);
            Config::default()
        };
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_sections() {
        let config: Config = toml::from_str("").expect("empty config");
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.database.max_connections, 5);
        assert!(config.auth.registration_enabled);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [auth]
            jwt_secret = "s3cret"
            registration_enabled = false
            "#,
        )
        .expect("partial config");
        assert_eq!(config.auth.jwt_secret, "s3cret");
        assert!(!config.auth.registration_enabled);
        assert_eq!(config.auth.jwt_expiry_seconds, 60 * 60 * 24 * 7);
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
    }
}
