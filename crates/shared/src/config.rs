//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// Push gateway configuration.
    #[serde(default)]
    pub push: PushConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
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

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL, or `memory://` for the in-process store.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

impl DatabaseConfig {
    /// Returns true if the in-memory store was requested instead of Postgres.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.url.starts_with("memory:")
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT settings.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for verifying tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    900 // 15 minutes
}

/// Push gateway configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PushConfig {
    /// Gateway endpoint receiving notification payloads.
    #[serde(default = "default_push_endpoint")]
    pub endpoint: String,
    /// Server key sent as `Authorization: key=<server_key>`.
    ///
    /// Notifications are composed but not sent while this is unset.
    #[serde(default)]
    pub server_key: Option<String>,
    /// Upper bound for a single gateway call, in seconds.
    #[serde(default = "default_push_timeout")]
    pub timeout_secs: u64,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            endpoint: default_push_endpoint(),
            server_key: None,
            timeout_secs: default_push_timeout(),
        }
    }
}

fn default_push_endpoint() -> String {
    "https://fcm.googleapis.com/fcm/send".to_string()
}

fn default_push_timeout() -> u64 {
    10
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PAYUP").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_applies_defaults() {
        temp_env::with_vars(
            [
                ("PAYUP__DATABASE__URL", Some("postgres://localhost/payup")),
                ("PAYUP__JWT__SECRET", Some("secret")),
                ("PAYUP__PUSH__SERVER_KEY", None::<&str>),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.server.host, "0.0.0.0");
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.jwt.access_token_expiry_secs, 900);
                assert_eq!(config.push.endpoint, "https://fcm.googleapis.com/fcm/send");
                assert_eq!(config.push.timeout_secs, 10);
                assert!(config.push.server_key.is_none());
            },
        );
    }

    #[test]
    fn test_load_reads_nested_environment() {
        temp_env::with_vars(
            [
                ("PAYUP__DATABASE__URL", Some("memory://")),
                ("PAYUP__JWT__SECRET", Some("secret")),
                ("PAYUP__SERVER__PORT", Some("9090")),
                ("PAYUP__PUSH__SERVER_KEY", Some("server-key")),
                ("PAYUP__PUSH__TIMEOUT_SECS", Some("3")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.server.port, 9090);
                assert!(config.database.is_in_memory());
                assert_eq!(config.push.server_key.as_deref(), Some("server-key"));
                assert_eq!(config.push.timeout_secs, 3);
            },
        );
    }

    #[test]
    fn test_postgres_url_is_not_in_memory() {
        let db = DatabaseConfig {
            url: "postgres://localhost/payup".to_string(),
            max_connections: 10,
            min_connections: 1,
        };
        assert!(!db.is_in_memory());
    }
}
