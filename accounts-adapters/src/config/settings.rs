use std::sync::LazyLock;

use config::{Config, ConfigError, Environment, File};
use secrecy::Secret;
use serde::Deserialize;

/// Service configuration, loaded once per process.
///
/// Sources, later wins: built-in defaults, an optional `config.json` in the
/// working directory, then environment variables with `__` as the section
/// separator (e.g. `DATABASE__URL`, `AUTH__JWT__SECRET`).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    /// Serve the interactive explorer on GET /graphql.
    pub graphiql: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: Secret<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt: JwtSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    pub secret: Secret<String>,
    pub access_ttl_seconds: i64,
    pub refresh_ttl_seconds: i64,
}

impl Settings {
    /// Load the process-wide configuration.
    ///
    /// # Panics
    /// Panics if a required value (database URL, JWT secret) is missing or
    /// a value fails to deserialize.
    pub fn load() -> &'static Settings {
        static SETTINGS: LazyLock<Settings> =
            LazyLock::new(|| Settings::build().expect("Failed to load configuration"));
        &SETTINGS
    }

    fn build() -> Result<Settings, ConfigError> {
        Config::builder()
            .set_default("application.host", "0.0.0.0")?
            .set_default("application.port", 3000)?
            .set_default("application.graphiql", true)?
            .set_default("database.max_connections", 5)?
            .set_default("auth.jwt.access_ttl_seconds", 900)?
            .set_default("auth.jwt.refresh_ttl_seconds", 86_400)?
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::default().separator("__"))
            .build()?
            .try_deserialize()
    }
}
