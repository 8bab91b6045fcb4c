use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use serde::Deserialize;

/// Default listening port when none is given on the command line.
pub const DEFAULT_PORT: u16 = 8080;

/// Environment variable naming an optional YAML settings file.
pub const SETTINGS_ENV: &str = "CATALOG_SETTINGS";

pub const USAGE: &str = "usage: catalog-server <catalogue-directory> <redirect-table-file> [port]";

/// Tunables read from the optional YAML settings file.
///
/// ```yaml
/// bind_host: 127.0.0.1
/// server_name: files-01
/// read_timeout_secs: 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Address the listener binds to
    pub bind_host: String,
    /// Value of the `Server` response header
    pub server_name: String,
    /// Deadline for each socket read; 0 waits forever
    pub read_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            server_name: "catalog-server".to_string(),
            read_timeout_secs: 30,
        }
    }
}

impl Settings {
    pub fn from_yaml(source: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(source).context("Invalid settings file")
    }

    /// Reads settings from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_yaml(&source)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        match self.read_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Canonical catalogue directory
    pub root: Arc<Path>,
    pub redirect_table: PathBuf,
    pub port: u16,
    pub settings: Settings,
}

impl Config {
    /// Builds the configuration from the process arguments and the settings
    /// file named by `CATALOG_SETTINGS`, if set.
    pub fn load() -> anyhow::Result<Self> {
        let settings_path = std::env::var_os(SETTINGS_ENV).map(PathBuf::from);
        let settings = Settings::load(settings_path.as_deref())?;
        Self::from_args(std::env::args().skip(1), settings)
    }

    /// Parses `<catalogue-directory> <redirect-table-file> [port]`.
    ///
    /// The catalogue directory is canonicalized here, once, and the redirect
    /// table must be readable.
    pub fn from_args<I>(args: I, settings: Settings) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        if !(2..=3).contains(&args.len()) {
            bail!(USAGE);
        }

        let port = match args.get(2) {
            Some(port) => port
                .parse::<u16>()
                .with_context(|| format!("Invalid port {port:?}\n{USAGE}"))?,
            None => DEFAULT_PORT,
        };

        let root = std::fs::canonicalize(&args[0])
            .with_context(|| format!("Failed to resolve catalogue directory {}", args[0]))?;
        if !root.is_dir() {
            bail!("Catalogue path {} is not a directory", root.display());
        }

        let redirect_table = PathBuf::from(&args[1]);
        std::fs::File::open(&redirect_table).with_context(|| {
            format!("Failed to open redirect table {}", redirect_table.display())
        })?;

        Ok(Self {
            root: Arc::from(root),
            redirect_table,
            port,
            settings,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.settings.bind_host, self.port)
    }
}
