//! Application configuration loaded from environment variables.

use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Start with the demo record instead of an empty store.
    #[serde(default = "default_true")]
    pub seed_items: bool,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    // === Database Probe ===
    /// Database host. Absent or empty disables the startup probe.
    #[serde(default)]
    pub mysql_host: Option<String>,

    /// Database port, used when the host carries none.
    #[serde(default = "default_mysql_port")]
    pub mysql_port: u16,

    /// Database user.
    #[serde(default)]
    pub mysql_user: Option<String>,

    /// Database password. Never logged.
    #[serde(default)]
    pub mysql_password: Option<String>,

    /// Database name.
    #[serde(default)]
    pub mysql_database: Option<String>,

    /// Upper bound on the startup probe, in seconds.
    #[serde(default = "default_probe_timeout")]
    pub db_probe_timeout_secs: u64,
}

/// Connection parameters for the startup database probe.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Host name or address.
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// User name.
    pub user: Option<String>,
    /// Password.
    pub password: Option<String>,
    /// Database name.
    pub database: Option<String>,
}

impl DatabaseConfig {
    /// `host:port` string to dial. IPv6 literals are bracketed.
    pub fn address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("database", &self.database)
            .finish()
    }
}

/// Split `raw` into host and port, falling back to `default_port`.
///
/// Accepts `name`, `name:port`, `v6addr`, `[v6addr]` and `[v6addr]:port`.
/// Brackets are stripped from the returned host.
fn split_host_port(raw: &str, default_port: u16) -> (String, u16) {
    if let Some(rest) = raw.strip_prefix('[') {
        if let Some((host, tail)) = rest.split_once(']') {
            let port = tail
                .strip_prefix(':')
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(default_port);
            return (host.to_string(), port);
        }
    }

    match raw.rsplit_once(':') {
        Some((host, port)) if !host.contains(':') => match port.parse::<u16>() {
            Ok(port) => (host.to_string(), port),
            Err(_) => (raw.to_string(), default_port),
        },
        _ => (raw.to_string(), default_port),
    }
}

fn default_port() -> u16 {
    3000
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_mysql_port() -> u16 {
    3306
}

fn default_probe_timeout() -> u64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            seed_items: default_true(),
            rust_log: default_log_level(),
            mysql_host: None,
            mysql_port: default_mysql_port(),
            mysql_user: None,
            mysql_password: None,
            mysql_database: None,
            db_probe_timeout_secs: default_probe_timeout(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("PORT must be greater than 0".to_string());
        }

        if self.db_probe_timeout_secs == 0 {
            return Err("DB_PROBE_TIMEOUT_SECS must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Probe timeout as a `Duration`.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.db_probe_timeout_secs)
    }

    /// Database probe parameters, if a host is configured.
    ///
    /// A host of the form `name:port` or `[v6addr]:port` overrides `MYSQL_PORT`.
    pub fn database(&self) -> Option<DatabaseConfig> {
        let raw = self.mysql_host.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }

        let (host, port) = split_host_port(raw, self.mysql_port);

        Some(DatabaseConfig {
            host,
            port,
            user: self.mysql_user.clone(),
            password: self.mysql_password.clone(),
            database: self.mysql_database.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_sensible() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert!(config.seed_items);
        assert_eq!(config.mysql_port, 3306);
        assert_eq!(config.probe_timeout(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_port() {
        let config = Config {
            port: 0,
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_probe_timeout() {
        let config = Config {
            db_probe_timeout_secs: 0,
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn database_absent_without_host() {
        assert!(Config::default().database().is_none());

        let blank = Config {
            mysql_host: Some("  ".to_string()),
            ..Config::default()
        };
        assert!(blank.database().is_none());
    }

    #[test]
    fn database_uses_default_port() {
        let config = Config {
            mysql_host: Some("db.internal".to_string()),
            mysql_user: Some("app".to_string()),
            ..Config::default()
        };

        let db = config.database().unwrap();
        assert_eq!(db.address(), "db.internal:3306");
        assert_eq!(db.user.as_deref(), Some("app"));
    }

    #[test]
    fn database_host_port_overrides_default() {
        let config = Config {
            mysql_host: Some("127.0.0.1:13306".to_string()),
            ..Config::default()
        };

        let db = config.database().unwrap();
        assert_eq!(db.host, "127.0.0.1");
        assert_eq!(db.port, 13306);
    }

    #[test]
    fn database_accepts_ipv6_hosts() {
        let bracketed = Config {
            mysql_host: Some("[::1]:13306".to_string()),
            ..Config::default()
        };
        let db = bracketed.database().unwrap();
        assert_eq!(db.host, "::1");
        assert_eq!(db.port, 13306);
        assert_eq!(db.address(), "[::1]:13306");

        let bracketed_no_port = Config {
            mysql_host: Some("[fe80::2]".to_string()),
            ..Config::default()
        };
        assert_eq!(bracketed_no_port.database().unwrap().address(), "[fe80::2]:3306");

        let bare = Config {
            mysql_host: Some("::1".to_string()),
            ..Config::default()
        };
        assert_eq!(bare.database().unwrap().address(), "[::1]:3306");
    }

    #[test]
    fn debug_output_redacts_password() {
        let config = Config {
            mysql_host: Some("db".to_string()),
            mysql_password: Some("hunter2".to_string()),
            ..Config::default()
        };

        let rendered = format!("{:?}", config.database().unwrap());
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
