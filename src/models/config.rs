use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Optional settings file, resolved relative to the working directory.
pub const SETTINGS_FILE: &str = "config/settings";

/// Runtime settings of the storefront server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Path of the SQLite database file.
    pub database_url: String,
    /// Interface the HTTP server binds to.
    pub address: String,
    pub port: u16,
    /// Cookie signing secret; a random key is generated when absent or too short.
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Cookie domain used for the session cookie.
    pub domain: String,
    /// Directory holding the Tera templates.
    pub templates_dir: String,
    /// Directory served under `/assets`.
    pub assets_dir: String,
}

impl ServerConfig {
    /// Load settings from defaults, the optional settings file and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Environment::default())
    }

    fn load_from(environment: Environment) -> Result<Self, ConfigError> {
        Self::builder(environment)?.build()?.try_deserialize()
    }

    fn builder(
        environment: Environment,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Ok(Config::builder()
            .set_default("database_url", "app.db")?
            .set_default("address", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("domain", "localhost")?
            .set_default("templates_dir", "templates")?
            .set_default("assets_dir", "assets")?
            .add_source(File::with_name(SETTINGS_FILE).required(false))
            .add_source(environment))
    }

    /// Glob passed to Tera.
    pub fn templates_glob(&self) -> String {
        format!("{}/**/*", self.templates_dir.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load_with(vars: &[(&str, &str)]) -> ServerConfig {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        let environment = Environment::default().source(Some(source));

        ServerConfig::load_from(environment).expect("config should load")
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = load_with(&[]);

        assert_eq!(config.database_url, "app.db");
        assert_eq!(config.address, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.secret_key.is_none());
        assert_eq!(config.templates_glob(), "templates/**/*");
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = load_with(&[
            ("DATABASE_URL", "shop.db"),
            ("PORT", "9000"),
            ("TEMPLATES_DIR", "/srv/templates/"),
        ]);

        assert_eq!(config.database_url, "shop.db");
        assert_eq!(config.port, 9000);
        assert_eq!(config.templates_glob(), "/srv/templates/**/*");
    }

    #[test]
    fn malformed_port_is_reported() {
        let source = HashMap::from([("PORT".to_string(), "eighty".to_string())]);
        let environment = Environment::default().source(Some(source));

        assert!(ServerConfig::load_from(environment).is_err());
    }
}
