//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, DatabaseConfig, LogFormat, LoggingConfig, NotifierConfig, RendererConfig,
    ServerConfig, TransportConfig,
};
