use std::io;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// `compact` (default) or `json`
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3000,
            worker_threads: Some(4),
            log_format: default_log_format(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    /// Used instead of `url` when `APP_ENV=test`.
    #[serde(default)]
    pub test_url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
    #[serde(default = "default_auto_migrate")]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            test_url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
            auto_migrate: default_auto_migrate(),
        }
    }
}

fn default_log_format() -> String { "compact".to_string() }
fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_auto_migrate() -> bool { true }

/// Config file path: `CONFIG_PATH` or `config.toml`.
pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`) and validate it. Only a missing
    /// file falls back to `SERVER_HOST` / `SERVER_PORT` / `DATABASE_URL`; an
    /// unreadable or malformed file is an error.
    pub fn load_or_env() -> Result<Self> {
        let mut cfg = Self::from_file_or_env_with(&config_path(), &process_env)?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    fn from_file_or_env_with(path: &str, lookup: EnvLookup<'_>) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => load_from_str(&content).with_context(|| format!("invalid config file {path}")),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::from_env_with(lookup)),
            Err(e) => Err(e).with_context(|| format!("cannot read config file {path}")),
        }
    }

    fn from_env_with(lookup: EnvLookup<'_>) -> Self {
        let mut cfg = AppConfig::default();
        if let Some(host) = lookup("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT").and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Some(w) = lookup("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        if let Some(fmt) = lookup("LOG_FORMAT") {
            cfg.server.log_format = fmt;
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.normalize_and_validate_with(&process_env)
    }

    fn normalize_and_validate_with(&mut self, lookup: EnvLookup<'_>) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env_with(lookup);
        self.database.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    /// Resolve the effective URL: `APP_ENV=test` selects the test database,
    /// and an empty URL is filled from the environment.
    pub fn normalize_from_env(&mut self) {
        self.normalize_from_env_with(&process_env)
    }

    fn normalize_from_env_with(&mut self, lookup: EnvLookup<'_>) {
        let testing = lookup("APP_ENV").is_some_and(|v| v.eq_ignore_ascii_case("test"));
        if testing {
            if self.test_url.trim().is_empty() {
                if let Some(url) = lookup("TEST_DATABASE_URL") {
                    self.test_url = url;
                }
            }
            self.url = self.test_url.clone();
        }
        if self.url.trim().is_empty() {
            if let Some(url) = lookup("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn parses_minimal_toml_with_defaults() {
        let cfg = load_from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [database]
            url = "postgres://localhost/biztime"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.log_format, "compact");
        assert_eq!(cfg.database.max_connections, 10);
        assert!(cfg.database.auto_migrate);
    }

    #[test]
    fn rejects_non_postgres_url() {
        let db = DatabaseConfig { url: "mysql://localhost/biztime".into(), ..Default::default() };
        assert!(db.validate().is_err());
    }

    #[test]
    fn rejects_inconsistent_pool_bounds() {
        let db = DatabaseConfig {
            url: "postgres://localhost/biztime".into(),
            min_connections: 5,
            max_connections: 2,
            ..Default::default()
        };
        assert!(db.validate().is_err());
    }

    #[test]
    fn empty_url_is_filled_from_env() {
        let mut db = DatabaseConfig::default();
        db.normalize_from_env_with(&env_of(&[("DATABASE_URL", "postgres://env/biztime")]));
        assert_eq!(db.url, "postgres://env/biztime");
    }

    #[test]
    fn test_env_selects_test_database() {
        let mut db = DatabaseConfig {
            url: "postgres://localhost/biztime".into(),
            ..Default::default()
        };
        let env = env_of(&[
            ("APP_ENV", "test"),
            ("TEST_DATABASE_URL", "postgres://localhost/biztime_test"),
        ]);
        db.normalize_from_env_with(&env);
        assert_eq!(db.url, "postgres://localhost/biztime_test");
    }

    #[test]
    fn env_fallback_and_worker_normalization() {
        let env = env_of(&[
            ("SERVER_PORT", "4000"),
            ("TOKIO_WORKER_THREADS", "0"),
            ("DATABASE_URL", "postgres://localhost/biztime"),
        ]);
        let mut cfg = AppConfig::from_env_with(&env);
        cfg.normalize_and_validate_with(&env).unwrap();
        assert_eq!(cfg.server.port, 4000);
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.database.url, "postgres://localhost/biztime");
    }

    fn scratch_file(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("biztime-{}-{}.toml", name, std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let path = scratch_file("malformed", "[server\nport = \"not a number\"\n");
        let env = env_of(&[("DATABASE_URL", "postgres://env/biztime")]);
        let res = AppConfig::from_file_or_env_with(path.to_str().unwrap(), &env);
        std::fs::remove_file(&path).ok();
        let err = res.unwrap_err();
        assert!(err.to_string().contains("invalid config file"));
    }

    #[test]
    fn mistyped_config_value_is_an_error() {
        let path = scratch_file("mistyped", "[server]\nhost = \"0.0.0.0\"\nport = \"eighty\"\n");
        let res = AppConfig::from_file_or_env_with(path.to_str().unwrap(), &env_of(&[]));
        std::fs::remove_file(&path).ok();
        assert!(res.is_err());
    }

    #[test]
    fn missing_config_file_falls_back_to_env() {
        let env = env_of(&[("SERVER_PORT", "4100")]);
        let cfg = AppConfig::from_file_or_env_with("/nonexistent/biztime-config.toml", &env).unwrap();
        assert_eq!(cfg.server.port, 4100);
    }

    #[test]
    fn zero_port_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        cfg.database.url = "postgres://localhost/biztime".into();
        assert!(cfg.normalize_and_validate_with(&env_of(&[])).is_err());
    }
}
