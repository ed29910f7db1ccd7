use serde::Deserialize;

use crate::domain::ClassifierThresholds;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,
    pub thresholds: ClassifierThresholds,
    pub renderer: RendererConfig,
    pub transport: TransportConfig,
    pub notifier: NotifierConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Postgres connection settings. No URL means in-memory repositories.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

/// Language-generation service. No URL means the built-in template renderer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub base_url: Option<String>,
    pub timeout_ms: u64,
}

/// Outbound mail gateway. No URL means the log-only transport.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub base_url: Option<String>,
    pub timeout_ms: u64,
}

/// Team chat webhook. No URL disables notifications.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct NotifierConfig {
    pub slack_webhook_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
        }
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_ms: 10_000,
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_ms: 30_000,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_run_without_external_services() {
        let config = AppConfig::default();
        assert!(config.database.url.is_none());
        assert!(config.renderer.base_url.is_none());
        assert!(config.transport.base_url.is_none());
        assert!(config.notifier.slack_webhook_url.is_none());
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_default_thresholds_match_decision_table() {
        let config = AppConfig::default();
        assert_eq!(config.thresholds, ClassifierThresholds::default());
    }

    #[test]
    fn test_log_format_labels() {
        let format: LogFormat = serde_json::from_str("\"json\"").unwrap();
        assert!(matches!(format, LogFormat::Json));

        let format: LogFormat = serde_json::from_str("\"pretty\"").unwrap();
        assert!(matches!(format, LogFormat::Pretty));
    }
}
