use crate::models::column::{Column, SortOrder};
use crate::models::node_stats::NodeStats;
use crate::table::sorting::SortKey;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub sort: Option<SortConfig>,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub static_peers: Vec<NodeStats>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_auto_start")]
    pub auto_start: bool,
}

/// Sort applied to the table at startup
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SortConfig {
    pub column: Column,
    #[serde(default)]
    pub order: SortOrder,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_console")]
    pub console: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            auto_start: default_auto_start(),
        }
    }
}

impl From<SortConfig> for SortKey {
    fn from(config: SortConfig) -> Self {
        SortKey::new(config.column, config.order)
    }
}

// Default value functions
fn default_num_threads() -> usize {
    num_cpus::get()
}

fn default_interval_ms() -> u64 {
    1000
}

fn default_auto_start() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_console() -> bool {
    false
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            bail!("Server port must be greater than 0");
        }

        if self.server.num_threads == 0 {
            bail!("num_threads must be greater than 0");
        }

        if self.refresh.interval_ms == 0 {
            bail!("refresh interval_ms must be greater than 0");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        for peer in &self.static_peers {
            if !peer.ping_time.is_finite() || peer.ping_time < 0.0 {
                bail!(
                    "Static peer {} has invalid ping_time {}",
                    peer.node_id,
                    peer.ping_time
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MINIMAL: &str = r#"
[server]
port = 8080

[logging]
level = "debug"
format = "console"
"#;

    #[test]
    fn test_minimal_config_defaults() {
        let config = Config::from_toml(MINIMAL).expect("Failed to parse config");

        assert_eq!(config.server.port, 8080);
        assert!(config.server.num_threads > 0);
        assert_eq!(config.refresh.interval_ms, 1000);
        assert!(config.refresh.auto_start);
        assert!(config.sort.is_none());
        assert!(config.static_peers.is_empty());
        assert!(!config.logging.console);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[server]
port = 9000
num_threads = 2

[refresh]
interval_ms = 250
auto_start = false

[sort]
column = "ping"
order = "descending"

[logging]
level = "info"
format = "json"

[[static_peers]]
node_id = 1
addr_name = "10.0.0.1:8333"
clean_sub_ver = "/Satoshi:0.9.1/"
ping_time = 0.125
"#
        )
        .unwrap();

        let config = Config::from_file(&file.path().to_path_buf()).expect("Failed to load config");

        assert_eq!(config.server.num_threads, 2);
        assert_eq!(config.refresh.interval_ms, 250);
        assert!(!config.refresh.auto_start);

        let key: SortKey = config.sort.unwrap().into();
        assert_eq!(key, SortKey::new(Column::Ping, SortOrder::Descending));

        assert_eq!(config.static_peers.len(), 1);
        assert_eq!(config.static_peers[0].addr_name, "10.0.0.1:8333");
    }

    #[test]
    fn test_sort_order_defaults_to_ascending() {
        let content = format!("{}\n[sort]\ncolumn = \"address\"\n", MINIMAL);
        let config = Config::from_toml(&content).unwrap();

        let sort = config.sort.unwrap();
        assert_eq!(sort.column, Column::Address);
        assert_eq!(sort.order, SortOrder::Ascending);
    }

    #[test]
    fn test_missing_file() {
        let path = PathBuf::from("/nonexistent/peer-table.toml");
        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn test_rejects_zero_interval() {
        let content = format!("{}\n[refresh]\ninterval_ms = 0\n", MINIMAL);
        let err = Config::from_toml(&content).unwrap_err();
        assert!(err.to_string().contains("interval_ms"));
    }

    #[test]
    fn test_rejects_invalid_log_level() {
        let content = MINIMAL.replace("\"debug\"", "\"verbose\"");
        assert!(Config::from_toml(&content).is_err());
    }

    #[test]
    fn test_rejects_negative_static_ping() {
        let content = format!(
            "{}\n[[static_peers]]\nnode_id = 3\naddr_name = \"a\"\nclean_sub_ver = \"b\"\nping_time = -1.0\n",
            MINIMAL
        );
        assert!(Config::from_toml(&content).is_err());
    }

    #[test]
    fn test_rejects_unknown_sort_column() {
        let content = format!("{}\n[sort]\ncolumn = \"height\"\n", MINIMAL);
        assert!(Config::from_toml(&content).is_err());
    }
}
