use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where the roster lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Pretty-printed JSON file
    #[default]
    Json,
    /// Named blob in a SQLite database
    Sqlite,
    /// Another rollbook server's HTTP API
    Remote,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Json => "json",
            Backend::Sqlite => "sqlite",
            Backend::Remote => "remote",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RollbookConfig {
    pub backend: Option<Backend>,
    pub path: Option<String>,
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub port: Option<u16>,
}

/// Values given on the command line; these win over the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub backend: Option<Backend>,
    pub path: Option<PathBuf>,
    pub api_url: Option<String>,
    pub port: Option<u16>,
}

/// Fully resolved runtime settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub backend: Backend,
    pub path: PathBuf,
    pub api_url: String,
    pub timeout: Duration,
    pub port: u16,
}

impl Settings {
    pub fn resolve(config: Option<RollbookConfig>, overrides: Overrides) -> Self {
        let config = config.unwrap_or_default();
        let backend = overrides.backend.or(config.backend).unwrap_or_default();
        let path = overrides
            .path
            .or_else(|| config.path.map(PathBuf::from))
            .unwrap_or_else(|| default_data_path(backend));

        Self {
            backend,
            path,
            api_url: overrides
                .api_url
                .or(config.api_url)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            timeout: Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            port: overrides.port.or(config.port).unwrap_or(DEFAULT_PORT),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("rollbook.toml")
}

pub fn default_data_path(backend: Backend) -> PathBuf {
    match backend {
        Backend::Sqlite => PathBuf::from(".rollbook").join("rollbook.db"),
        Backend::Json | Backend::Remote => PathBuf::from(crate::storage::json_file::DEFAULT_JSON_FILE),
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<RollbookConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: RollbookConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &RollbookConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}
