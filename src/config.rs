use anyhow::Context;
use clap::Parser;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DATABASE_FILE_NAME: &str = "mesto.db";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";

/// Configuration for the Mesto server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// URL for the database connection
    pub database_url: String,
    /// Address the HTTP server listens on
    pub bind_address: String,
    /// Identity used for requests that arrive without one
    pub acting_user_id: Option<String>,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

/// Update structure for Config with all fields optional
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigUpdate {
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default)]
    pub bind_address: Option<String>,
    #[serde(default)]
    pub acting_user_id: Option<String>,
    #[serde(default)]
    pub log_json: Option<bool>,
}

/// Command line arguments for the server
#[derive(Parser, Debug, Default)]
#[clap(name = "mesto", about = "Photo cards API server")]
pub struct CliArgs {
    /// Database URL
    #[clap(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Address to listen on, e.g. 0.0.0.0:3000
    #[clap(long, env = "MESTO_BIND_ADDRESS")]
    pub bind_address: Option<String>,

    /// Fallback acting user for requests without an x-user-id header
    #[clap(long, env = "MESTO_ACTING_USER_ID")]
    pub acting_user_id: Option<String>,

    /// Emit logs as JSON
    #[clap(long, env = "MESTO_LOG_JSON")]
    pub log_json: Option<bool>,

    /// Explicit path to a TOML config file
    #[clap(long, env = "MESTO_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Applies a config update to the current configuration
    pub fn apply_update(self, update: ConfigUpdate) -> Self {
        Self {
            database_url: update.database_url.unwrap_or(self.database_url),
            bind_address: update.bind_address.unwrap_or(self.bind_address),
            acting_user_id: update.acting_user_id.or(self.acting_user_id),
            log_json: update.log_json.unwrap_or(self.log_json),
        }
    }

    /// Parses the bind address
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        self.bind_address
            .parse()
            .with_context(|| format!("Invalid bind address: {}", self.bind_address))
    }
}

/// Returns the base (default) configuration
///
/// The database lives in `data_dir` when one is known, otherwise in the
/// working directory.
pub fn base_config(data_dir: Option<&Path>) -> Config {
    let database_url = data_dir.map_or(DATABASE_FILE_NAME.to_string(), |dir| {
        dir.join(DATABASE_FILE_NAME).to_string_lossy().to_string()
    });

    Config {
        database_url,
        bind_address: DEFAULT_BIND_ADDRESS.to_string(),
        acting_user_id: None,
        log_json: false,
    }
}

/// Loads configuration from a TOML file
///
/// A missing file is not an error and yields an empty update.
pub fn config_from_file(config_path: Option<&Path>) -> anyhow::Result<ConfigUpdate> {
    let Some(config_path) = config_path else {
        return Ok(ConfigUpdate::default());
    };

    if !config_path.exists() {
        info!("Config file not found at {:?}, using defaults", config_path);
        return Ok(ConfigUpdate::default());
    }

    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file {:?}", config_path))?;
    let update = toml::from_str::<ConfigUpdate>(&content)
        .with_context(|| format!("Failed to parse config file {:?}", config_path))?;

    info!("Loaded configuration from {:?}", config_path);
    Ok(update)
}

/// Loads configuration from command line arguments
pub fn config_from_args(args: &CliArgs) -> ConfigUpdate {
    ConfigUpdate {
        database_url: args.database_url.clone(),
        bind_address: args.bind_address.clone(),
        acting_user_id: args.acting_user_id.clone(),
        log_json: args.log_json,
    }
}

/// Gets the complete configuration by combining defaults with
/// values from the config file, environment variables, and command line
/// arguments in order of increasing precedence
pub fn get_config(args: &CliArgs) -> anyhow::Result<Config> {
    let project_dirs = ProjectDirs::from("com", "mesto", "mesto");
    if project_dirs.is_none() {
        warn!("Could not determine platform directories, using working directory");
    }

    let data_dir = project_dirs
        .as_ref()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .filter(|dir| dir.exists());

    let config_path = args.config.clone().or_else(|| {
        project_dirs
            .as_ref()
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    });

    let config = base_config(data_dir.as_deref())
        .apply_update(config_from_file(config_path.as_deref())?)
        .apply_update(config_from_args(args));

    debug!("Resolved configuration: {:?}", config);

    Ok(config)
}
