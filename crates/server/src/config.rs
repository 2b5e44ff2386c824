use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides `server.port`
pub const PORT_ENV_VAR: &str = "DASHBOARD_API_PORT";

/// Dashboard API server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Bookmark page served at `/`
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// HTTP binding and logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP bind address
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// HTTP port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log filter used when `RUST_LOG` is not set (e.g. "info", "dashboard_db=debug")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory, lost on restart
    #[default]
    Memory,
    /// `SQLite` file at `database.path`
    Sqlite,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Which storage backend holds application records
    #[serde(default)]
    pub backend: StorageBackend,

    /// Path to `SQLite` database file (only used when backend = "sqlite")
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

/// Bookmark page configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Page title
    #[serde(default = "default_title")]
    pub title: String,

    /// Bookmark sections, rendered in order
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// A named group of bookmarks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    pub name: String,
    pub bookmarks: Vec<Bookmark>,
}

/// A single link on the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bookmark {
    pub name: String,
    /// Optional one-line description
    #[serde(rename = "desc")]
    pub description: String,
    pub url: String,
    /// Icon image URL
    pub icon: String,
}

fn default_title() -> String {
    "Dashboard".to_string()
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_database_path() -> PathBuf {
    if cfg!(debug_assertions) {
        PathBuf::from("./dashboard.db")
    } else {
        PathBuf::from("/var/lib/dashboard/dashboard.db")
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_database_path(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            sections: Vec::new(),
        }
    }
}

impl DashboardConfig {
    /// Reject pages that would render with missing names or links
    pub fn validate(&self) -> Result<()> {
        if self.title.is_empty() {
            bail!("dashboard title cannot be empty");
        }
        for (i, section) in self.sections.iter().enumerate() {
            section
                .validate()
                .with_context(|| format!("error validating section {i}"))?;
        }
        Ok(())
    }
}

impl Section {
    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            bail!("section name cannot be empty");
        }
        if self.bookmarks.is_empty() {
            bail!("section '{}' has no bookmarks", self.name);
        }
        for (i, bookmark) in self.bookmarks.iter().enumerate() {
            bookmark
                .validate()
                .with_context(|| format!("error validating bookmark {i} of '{}'", self.name))?;
        }
        Ok(())
    }
}

impl Bookmark {
    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            bail!("bookmark name cannot be empty");
        }
        if self.url.is_empty() {
            bail!("bookmark '{}' has no url", self.name);
        }
        if self.icon.is_empty() {
            bail!("bookmark '{}' has no icon", self.name);
        }
        Ok(())
    }
}

impl ServerConfig {
    /// `bind_address:port`
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl Config {
    /// Load configuration from the given file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load from default locations in order:
    /// 1. ./dashboard.toml (current directory)
    /// 2. /etc/dashboard/config.toml (system-wide)
    /// 3. Built-in defaults
    pub fn load_default() -> Result<Self> {
        let paths = vec![
            PathBuf::from("./dashboard.toml"),
            PathBuf::from("/etc/dashboard/config.toml"),
        ];

        for path in paths {
            if path.exists() {
                return Self::load(&path);
            }
        }

        Ok(Self::default())
    }

    /// Parse configuration from TOML text
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides using `lookup` to read variables
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(PORT_ENV_VAR) {
            self.server.port = value
                .trim()
                .parse()
                .with_context(|| format!("parsing {PORT_ENV_VAR} value `{value}`"))?;
        }
        Ok(())
    }

    /// Check values that parse fine but cannot be served
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            bail!("port cannot be 0");
        }

        EnvFilter::try_new(&self.server.log_level)
            .with_context(|| format!("invalid log_level `{}`", self.server.log_level))?;

        self.dashboard.validate()
    }

    /// Generate example configuration file
    pub fn example() -> Result<String> {
        Ok(toml::to_string_pretty(&Config::default())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.addr(), "0.0.0.0:3000");
        assert_eq!(config.server.log_level, "info");
        assert_eq!(config.database.backend, StorageBackend::Memory);
        assert_eq!(config.dashboard.title, "Dashboard");
        assert!(config.dashboard.sections.is_empty());
        assert!(config.validate().is_ok());
    }

    fn bookmark() -> Bookmark {
        Bookmark {
            name: "Grafana".to_string(),
            description: String::new(),
            url: "https://grafana.local".to_string(),
            icon: "https://grafana.local/icon.png".to_string(),
        }
    }

    fn dashboard(bookmark: Bookmark) -> DashboardConfig {
        DashboardConfig {
            title: "Home".to_string(),
            sections: vec![Section {
                name: "Monitoring".to_string(),
                bookmarks: vec![bookmark],
            }],
        }
    }

    #[test]
    fn test_dashboard_validation() {
        let cases = [
            ("valid bookmark without description", dashboard(bookmark()), true),
            (
                "bookmark missing name",
                dashboard(Bookmark {
                    name: String::new(),
                    ..bookmark()
                }),
                false,
            ),
            (
                "bookmark missing url",
                dashboard(Bookmark {
                    url: String::new(),
                    ..bookmark()
                }),
                false,
            ),
            (
                "bookmark missing icon",
                dashboard(Bookmark {
                    icon: String::new(),
                    ..bookmark()
                }),
                false,
            ),
            (
                "empty title",
                DashboardConfig {
                    title: String::new(),
                    ..dashboard(bookmark())
                },
                false,
            ),
            (
                "section missing name",
                DashboardConfig {
                    sections: vec![Section {
                        name: String::new(),
                        bookmarks: vec![bookmark()],
                    }],
                    ..dashboard(bookmark())
                },
                false,
            ),
            (
                "section without bookmarks",
                DashboardConfig {
                    sections: vec![Section {
                        name: "Empty".to_string(),
                        bookmarks: Vec::new(),
                    }],
                    ..dashboard(bookmark())
                },
                false,
            ),
        ];

        for (name, config, valid) in cases {
            assert_eq!(config.validate().is_ok(), valid, "{name}");
        }
    }

    #[test]
    fn test_dashboard_error_names_location() {
        let config = dashboard(Bookmark {
            url: String::new(),
            ..bookmark()
        });
        let Err(err) = config.validate() else {
            panic!("expected a validation error");
        };
        let message = format!("{err:#}");
        assert!(message.contains("section 0"), "{message}");
        assert!(message.contains("bookmark 0 of 'Monitoring'"), "{message}");
        assert!(message.contains("has no url"), "{message}");
    }

    #[test]
    fn test_parse_dashboard_sections() -> Result<()> {
        let config = Config::parse(
            r#"
            [dashboard]
            title = "Homelab"

            [[dashboard.sections]]
            name = "Monitoring"

            [[dashboard.sections.bookmarks]]
            name = "Grafana"
            desc = "Metrics"
            url = "https://grafana.local"
            icon = "https://grafana.local/icon.png"
            "#,
        )?;

        assert_eq!(config.dashboard.title, "Homelab");
        assert_eq!(config.dashboard.sections.len(), 1);
        let bookmark = &config.dashboard.sections[0].bookmarks[0];
        assert_eq!(bookmark.description, "Metrics");
        assert!(config.validate().is_ok());

        // An invalid page fails whole-config validation too
        let config = Config::parse("[dashboard]\ntitle = \"\"\n")?;
        assert!(config.validate().is_err());
        Ok(())
    }

    #[test]
    fn test_parse_partial_file_keeps_defaults() -> Result<()> {
        let config = Config::parse(
            r#"
            [server]
            port = 8080

            [database]
            backend = "sqlite"
            path = "/tmp/apps.db"
            "#,
        )?;

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.database.backend, StorageBackend::Sqlite);
        assert_eq!(config.database.path, PathBuf::from("/tmp/apps.db"));
        Ok(())
    }

    #[test]
    fn test_parse_rejects_unknown_backend() {
        let result = Config::parse("[database]\nbackend = \"postgres\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.server.log_level = "dashboard_db=verbose".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.server.log_level = "warn,dashboard_db=debug".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_port_env_override() -> Result<()> {
        let mut config = Config::default();
        config.apply_env_with(|key| (key == PORT_ENV_VAR).then(|| "4321".to_string()))?;
        assert_eq!(config.server.port, 4321);

        let mut config = Config::default();
        config.apply_env_with(|_| None)?;
        assert_eq!(config.server.port, 3000);

        let mut config = Config::default();
        let result = config.apply_env_with(|_| Some("not-a-port".to_string()));
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("dashboard.toml");
        let mut file = std::fs::File::create(&path)?;
        writeln!(file, "[server]\nport = 5000")?;

        let config = Config::load(&path)?;
        assert_eq!(config.server.port, 5000);

        assert!(Config::load(dir.path().join("missing.toml")).is_err());
        Ok(())
    }

    #[test]
    fn test_example_round_trips() -> Result<()> {
        let parsed = Config::parse(&Config::example()?)?;
        assert_eq!(parsed.server.port, 3000);
        assert_eq!(parsed.database.backend, StorageBackend::Memory);
        assert_eq!(parsed.dashboard.title, "Dashboard");
        Ok(())
    }
}
