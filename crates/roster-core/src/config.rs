//! Configuration management for Roster services.
//!
//! Configuration is loaded from (in priority order):
//! 1. `URI`, `USERNAME`, `PASSWORD` environment variables (database credentials)
//! 2. Environment variables with the `ROSTER__` prefix (e.g. `ROSTER__SERVER__BIND`)
//! 3. Config file (`roster.toml` by default)
//! 4. Defaults

use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::RosterError;

/// Credentials and pool settings for the graph database.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub uri: String,
    pub username: String,
    pub password: String,

    /// Database to open sessions against.
    #[serde(default = "default_db_name")]
    pub name: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_fetch_size")]
    pub fetch_size: usize,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Upper bound on a single store call, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl ServerSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn from_config(cfg: &Config) -> Result<Self, RosterError> {
        match cfg.get::<ServerSettings>("server") {
            Ok(s) => Ok(s),
            Err(ConfigError::NotFound(_)) => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Required database keys and the environment variable that supplies each.
const REQUIRED_DATABASE_KEYS: [(&str, &str); 3] = [
    ("database.uri", "URI"),
    ("database.username", "USERNAME"),
    ("database.password", "PASSWORD"),
];

impl DatabaseSettings {
    /// Extract database settings, failing if any credential is missing or empty.
    pub fn from_config(cfg: &Config) -> Result<Self, RosterError> {
        for (key, var) in REQUIRED_DATABASE_KEYS {
            let present = cfg.get_string(key).map(|v| !v.is_empty()).unwrap_or(false);
            if !present {
                return Err(RosterError::Config(format!(
                    "{var} is not set (or `{key}` in the config file)"
                )));
            }
        }
        Ok(cfg.get::<DatabaseSettings>("database")?)
    }
}

/// Build the layered configuration for the given file prefix.
///
/// The file is optional; a missing `roster.toml` is not an error.
pub fn load(file_prefix: &str) -> Result<Config, RosterError> {
    let cfg = Config::builder()
        .add_source(File::with_name(file_prefix).required(false))
        .add_source(
            Environment::with_prefix("ROSTER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("database.uri", env_var("URI"))?
        .set_override_option("database.username", env_var("USERNAME"))?
        .set_override_option("database.password", env_var("PASSWORD"))?
        .build()?;

    tracing::debug!(file_prefix, "Configuration loaded");
    Ok(cfg)
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn default_db_name() -> String {
    "neo4j".to_string()
}

fn default_max_connections() -> u32 {
    16
}

fn default_fetch_size() -> usize {
    256
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(overrides: &[(&str, &str)]) -> Config {
        let mut builder = Config::builder();
        for (k, v) in overrides {
            builder = builder.set_override(*k, *v).unwrap();
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_server_defaults_when_absent() {
        let cfg = build(&[]);
        let server = ServerSettings::from_config(&cfg).unwrap();
        assert_eq!(server, ServerSettings::default());
        assert_eq!(server.bind, "127.0.0.1:5000");
        assert_eq!(server.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_server_overrides() {
        let cfg = Config::builder()
            .set_override("server.bind", "0.0.0.0:8080")
            .unwrap()
            .set_override("server.request_timeout_secs", 5_i64)
            .unwrap()
            .build()
            .unwrap();
        let server = ServerSettings::from_config(&cfg).unwrap();
        assert_eq!(server.bind, "0.0.0.0:8080");
        assert_eq!(server.request_timeout_secs, 5);
    }

    #[test]
    fn test_database_settings_with_defaults() {
        let cfg = build(&[
            ("database.uri", "bolt://db:7687"),
            ("database.username", "neo4j"),
            ("database.password", "secret"),
        ]);
        let db = DatabaseSettings::from_config(&cfg).unwrap();
        assert_eq!(db.uri, "bolt://db:7687");
        assert_eq!(db.username, "neo4j");
        assert_eq!(db.password, "secret");
        assert_eq!(db.name, "neo4j");
        assert_eq!(db.max_connections, 16);
        assert_eq!(db.fetch_size, 256);
    }

    #[test]
    fn test_database_settings_missing_password() {
        let cfg = build(&[
            ("database.uri", "bolt://db:7687"),
            ("database.username", "neo4j"),
        ]);
        let err = DatabaseSettings::from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("PASSWORD"), "{err}");
    }

    #[test]
    fn test_database_settings_empty_uri_rejected() {
        let cfg = build(&[
            ("database.uri", ""),
            ("database.username", "neo4j"),
            ("database.password", "secret"),
        ]);
        let err = DatabaseSettings::from_config(&cfg).unwrap_err();
        assert!(matches!(err, RosterError::Config(_)));
        assert!(err.to_string().contains("URI"), "{err}");
    }

    // ── load() against the real environment ─────────────────────

    /// Serializes tests that touch process environment variables.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    /// Sets or clears variables for one test and restores them on drop.
    struct EnvGuard {
        saved: Vec<(&'static str, Option<String>)>,
    }

    impl EnvGuard {
        fn apply(vars: &[(&'static str, Option<&str>)]) -> Self {
            let saved = vars
                .iter()
                .map(|(key, _)| (*key, std::env::var(key).ok()))
                .collect();
            for (key, value) in vars {
                match value {
                    Some(v) => std::env::set_var(key, v),
                    None => std::env::remove_var(key),
                }
            }
            Self { saved }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in &self.saved {
                match value {
                    Some(v) => std::env::set_var(key, v),
                    None => std::env::remove_var(key),
                }
            }
        }
    }

    #[test]
    fn test_load_env_overrides_file() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("roster.toml"),
            "[database]\n\
             uri = \"bolt://file:7687\"\n\
             username = \"file-user\"\n\
             password = \"file-pass\"\n\
             name = \"filedb\"\n\
             \n\
             [server]\n\
             bind = \"0.0.0.0:9000\"\n",
        )
        .unwrap();

        let _env = EnvGuard::apply(&[
            ("URI", Some("bolt://env:7687")),
            ("USERNAME", None),
            ("PASSWORD", Some("")),
            ("ROSTER__DATABASE__NAME", Some("envdb")),
            ("ROSTER__SERVER__BIND", None),
        ]);

        let prefix = dir.path().join("roster");
        let cfg = load(prefix.to_str().unwrap()).unwrap();
        let db = DatabaseSettings::from_config(&cfg).unwrap();

        assert_eq!(db.uri, "bolt://env:7687");
        assert_eq!(db.username, "file-user");
        // An empty variable does not blank the file value.
        assert_eq!(db.password, "file-pass");
        assert_eq!(db.name, "envdb");

        let server = ServerSettings::from_config(&cfg).unwrap();
        assert_eq!(server.bind, "0.0.0.0:9000");
    }

    #[test]
    fn test_load_without_file_uses_env_credentials() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let _env = EnvGuard::apply(&[
            ("URI", Some("bolt://only-env:7687")),
            ("USERNAME", Some("env-user")),
            ("PASSWORD", Some("env-pass")),
            ("ROSTER__DATABASE__NAME", None),
            ("ROSTER__SERVER__BIND", None),
        ]);

        let prefix = dir.path().join("absent");
        let cfg = load(prefix.to_str().unwrap()).unwrap();
        let db = DatabaseSettings::from_config(&cfg).unwrap();

        assert_eq!(db.uri, "bolt://only-env:7687");
        assert_eq!(db.username, "env-user");
        assert_eq!(db.password, "env-pass");
        assert_eq!(db.name, "neo4j");
        assert_eq!(ServerSettings::from_config(&cfg).unwrap(), ServerSettings::default());
    }
}
