use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:9000";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

/// Listener settings. `port` is optional so each deployment can apply its own default.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ServerConfig {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string of the submission store.
    #[serde(default)]
    pub url: String,
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
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

/// Where the frontend deployment finds the backend.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct BackendConfig {
    #[serde(default)]
    pub base_url: String,
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Read `config.toml` (or `CONFIG_PATH`) when present, then fill blanks from the environment.
    /// A missing file is not an error; a malformed one is.
    pub fn load() -> Result<Self> {
        let path = config_path();
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            AppConfig::default()
        };
        cfg.apply_env_with(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    /// Fill empty settings from `lookup` (normally the process environment).
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.server.host.trim().is_empty() {
            self.server.host = lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        }
        if self.server.port.is_none() {
            self.server.port = lookup("SERVER_PORT").and_then(|p| p.parse::<u16>().ok());
        }
        if self.server.worker_threads.is_none() {
            self.server.worker_threads = lookup("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok());
        }
        if self.database.url.trim().is_empty() {
            if let Some(url) = lookup("DATABASE_URL") {
                self.database.url = url;
            }
        }
        if self.backend.base_url.trim().is_empty() {
            self.backend.base_url = lookup("BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        }
    }
}

impl ServerConfig {
    /// `host:port`, using `default_port` when none was configured.
    pub fn bind_addr(&self, default_port: u16) -> Result<String> {
        let port = self.port.unwrap_or(default_port);
        if port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        let host = if self.host.trim().is_empty() { DEFAULT_HOST } else { self.host.trim() };
        Ok(format!("{}:{}", host, port))
    }

    /// Worker thread count; zero is treated as unset.
    pub fn worker_threads(&self) -> Option<usize> {
        self.worker_threads.filter(|w| *w > 0)
    }
}

impl DatabaseConfig {
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

impl BackendConfig {
    pub fn validate(&self) -> Result<()> {
        let lower = self.base_url.trim().to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("backend.base_url must start with http:// or https://"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn parses_full_file() {
        let cfg = load_from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            worker_threads = 2

            [database]
            url = "postgres://u:p@localhost:5432/guestbook"
            max_connections = 5

            [backend]
            base_url = "http://backend:9000"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.bind_addr(1).unwrap(), "0.0.0.0:9000");
        assert_eq!(cfg.server.worker_threads(), Some(2));
        assert_eq!(cfg.database.max_connections, 5);
        assert_eq!(cfg.database.min_connections, 2);
        assert!(cfg.database.validate().is_ok());
        assert!(cfg.backend.validate().is_ok());
    }

    #[test]
    fn env_fills_blanks_only() {
        let mut cfg = load_from_str("[server]\nport = 7000\n").unwrap();
        cfg.apply_env_with(env(&[
            ("SERVER_PORT", "1234"),
            ("SERVER_HOST", "10.0.0.1"),
            ("DATABASE_URL", "postgresql://localhost/db"),
        ]));
        assert_eq!(cfg.server.bind_addr(1).unwrap(), "10.0.0.1:7000");
        assert_eq!(cfg.database.url, "postgresql://localhost/db");
        assert_eq!(cfg.backend.base_url, DEFAULT_BACKEND_URL);
    }

    #[test]
    fn deployment_default_port_applies_when_unset() {
        let mut cfg = AppConfig::default();
        cfg.apply_env_with(env(&[]));
        assert_eq!(cfg.server.bind_addr(8000).unwrap(), "127.0.0.1:8000");
        assert_eq!(cfg.server.worker_threads(), None);
    }

    #[test]
    fn zero_port_rejected() {
        let cfg = load_from_str("[server]\nport = 0\n").unwrap();
        assert!(cfg.server.bind_addr(9000).is_err());
    }

    #[test]
    fn database_validation() {
        let mut db = DatabaseConfig::default();
        assert!(db.validate().is_err());
        db.url = "mysql://localhost/db".into();
        assert!(db.validate().is_err());
        db.url = "postgres://localhost/db".into();
        assert!(db.validate().is_ok());
        db.max_connections = 1;
        assert!(db.validate().is_err());
    }

    #[test]
    fn backend_url_must_be_http() {
        let b = BackendConfig { base_url: "ftp://x".into() };
        assert!(b.validate().is_err());
        let b = BackendConfig { base_url: "https://x".into() };
        assert!(b.validate().is_ok());
    }
}
