use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use library::LibraryConfig;
use serde::{Deserialize, Serialize};
use shelf_db::DbConfig;
use shelf_security::PolicyKind;

/// Prefix for environment overrides, e.g. `SHELF__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "SHELF__";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8087,
        }
    }
}

impl ServerConfig {
    /// # Errors
    ///
    /// Fails if `host:port` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse()
            .with_context(|| format!("invalid server address '{raw}'"))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `library=debug,tower_http=info`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Human,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    pub policy: PolicyKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DbConfig,
    pub logging: LoggingConfig,
    pub library: LibraryConfig,
    pub auth: AuthConfig,
}

/// Command-line values that win over every other layer.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub verbose: u8,
    pub mock: bool,
}

impl AppConfig {
    /// Layered load: defaults, then the YAML file (if any), then `SHELF__*`
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing or unreadable, or if any layer holds a
    /// value of the wrong shape.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            anyhow::ensure!(
                path.is_file(),
                "config file does not exist: {}",
                path.display()
            );
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("failed to load config")
    }

    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if cli.verbose > 0 {
            self.logging.level = match cli.verbose {
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
            .to_owned();
        }
        if cli.mock {
            self.database = DbConfig::default();
        }
    }

    /// Effective configuration as YAML with the database password masked.
    ///
    /// # Errors
    ///
    /// Propagates serialization failures.
    pub fn to_yaml(&self) -> Result<String> {
        let mut shown = self.clone();
        shown.database.dsn = self.database.redacted_dsn();
        serde_saphyr::to_string(&shown).context("failed to render config")
    }
}
