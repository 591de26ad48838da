//! Run configuration.
//!
//! Connection settings come from command-line flags (with `DB_*` environment
//! fallbacks) layered over an optional `scylla-gen.toml` file. Everything is
//! resolved and checked here, before any catalog call.

use std::path::{Path, PathBuf};
use std::time::Duration;

use scylla_gen_catalog::driver::DEFAULT_PORT;
use scylla_gen_catalog::{ConnectOptions, Credentials};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "scylla-gen.toml";
pub const DEFAULT_OUT_DIR: &str = "src/models";
pub const DEFAULT_FORMATTER: &str = "npx prettier --write";

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no keyspace given: pass --keyspace or set DB_DEFAULT_KEYSPACE")]
    MissingKeyspace,

    #[error("no contact points given: pass --contact-points or set DB_CONTACT_POINTS")]
    MissingContactPoints,

    #[error("no local data center given: pass --local-data-center or set DB_LOCAL_DATA_CENTER")]
    MissingDataCenter,

    #[error("credentials need both a username and a password")]
    PartialCredentials,

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Contents of `scylla-gen.toml`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub keyspace: Option<String>,
    #[serde(default, rename = "contact-points")]
    pub contact_points: Vec<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default, rename = "local-data-center")]
    pub local_data_center: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default, rename = "out-dir")]
    pub out_dir: Option<PathBuf>,
    #[serde(default)]
    pub formatter: Option<String>,
    #[serde(default, rename = "connect-timeout-secs")]
    pub connect_timeout_secs: Option<u64>,
    #[serde(default, rename = "request-timeout-secs")]
    pub request_timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Load an explicitly named config file, which must exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` if given, else `scylla-gen.toml` in the working
    /// directory if it exists, else the empty config.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Connection settings as given on the command line or in the environment.
#[derive(Debug, Clone, Default)]
pub struct ConnectionArgs {
    pub keyspace: Option<String>,
    pub contact_points: Vec<String>,
    pub port: Option<u16>,
    pub local_data_center: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub keyspace: String,
    pub out_dir: PathBuf,
    pub formatter: String,
    args: ConnectionArgs,
    file: FileConfig,
}

impl Settings {
    /// Resolve flags over the config file. Only the keyspace is required
    /// here; connection settings are checked by [`Settings::connect_options`]
    /// since a fixture run never connects.
    pub fn resolve(
        args: ConnectionArgs,
        file: FileConfig,
        out_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let keyspace = args
            .keyspace
            .clone()
            .or_else(|| file.keyspace.clone())
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingKeyspace)?;

        let out_dir = out_dir
            .or_else(|| file.out_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));
        let formatter = file
            .formatter
            .clone()
            .unwrap_or_else(|| DEFAULT_FORMATTER.to_string());

        Ok(Self {
            keyspace: keyspace.trim().to_string(),
            out_dir,
            formatter,
            args,
            file,
        })
    }

    pub fn connect_options(&self) -> Result<ConnectOptions, ConfigError> {
        let contact_points = if self.args.contact_points.is_empty() {
            self.file.contact_points.clone()
        } else {
            self.args.contact_points.clone()
        };
        if contact_points.iter().all(|p| p.trim().is_empty()) {
            return Err(ConfigError::MissingContactPoints);
        }

        let local_data_center = self
            .args
            .local_data_center
            .clone()
            .or_else(|| self.file.local_data_center.clone())
            .filter(|dc| !dc.trim().is_empty())
            .ok_or(ConfigError::MissingDataCenter)?;

        let username = self.args.username.clone().or_else(|| self.file.username.clone());
        let password = self.args.password.clone().or_else(|| self.file.password.clone());
        let credentials = match (username, password) {
            (Some(username), Some(password)) => Some(Credentials { username, password }),
            (None, None) => None,
            _ => return Err(ConfigError::PartialCredentials),
        };

        Ok(ConnectOptions {
            contact_points,
            port: self.args.port.or(self.file.port).unwrap_or(DEFAULT_PORT),
            local_data_center,
            credentials,
            connect_timeout: Duration::from_secs(
                self.file
                    .connect_timeout_secs
                    .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
            ),
            request_timeout: Duration::from_secs(
                self.file
                    .request_timeout_secs
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ConnectionArgs {
        ConnectionArgs {
            keyspace: Some("chat".to_string()),
            contact_points: vec!["127.0.0.1".to_string()],
            local_data_center: Some("dc1".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_flags_win_over_file() {
        let file = FileConfig {
            keyspace: Some("from_file".to_string()),
            port: Some(19042),
            out_dir: Some(PathBuf::from("models")),
            ..Default::default()
        };

        let settings = Settings::resolve(args(), file, None).unwrap();
        assert_eq!(settings.keyspace, "chat");
        assert_eq!(settings.out_dir, PathBuf::from("models"));
        assert_eq!(settings.formatter, DEFAULT_FORMATTER);

        let options = settings.connect_options().unwrap();
        assert_eq!(options.port, 19042);
        assert_eq!(options.local_data_center, "dc1");
        assert!(options.credentials.is_none());
    }

    #[test]
    fn test_file_fills_missing_flags() {
        let file = FileConfig {
            keyspace: Some("billing".to_string()),
            contact_points: vec!["db-1".to_string(), "db-2".to_string()],
            local_data_center: Some("eu-west".to_string()),
            username: Some("gen".to_string()),
            password: Some("secret".to_string()),
            ..Default::default()
        };

        let settings = Settings::resolve(ConnectionArgs::default(), file, None).unwrap();
        assert_eq!(settings.keyspace, "billing");
        assert_eq!(settings.out_dir, PathBuf::from(DEFAULT_OUT_DIR));

        let options = settings.connect_options().unwrap();
        assert_eq!(options.known_nodes(), ["db-1:9042", "db-2:9042"]);
        assert_eq!(options.credentials.unwrap().username, "gen");
    }

    #[test]
    fn test_missing_keyspace_is_fatal() {
        let mut args = args();
        args.keyspace = Some("  ".to_string());
        let err = Settings::resolve(args, FileConfig::default(), None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKeyspace));
    }

    #[test]
    fn test_connection_requirements() {
        let mut no_points = args();
        no_points.contact_points.clear();
        let settings = Settings::resolve(no_points, FileConfig::default(), None).unwrap();
        assert!(matches!(
            settings.connect_options(),
            Err(ConfigError::MissingContactPoints)
        ));

        let mut no_dc = args();
        no_dc.local_data_center = None;
        let settings = Settings::resolve(no_dc, FileConfig::default(), None).unwrap();
        assert!(matches!(
            settings.connect_options(),
            Err(ConfigError::MissingDataCenter)
        ));

        let mut half = args();
        half.username = Some("gen".to_string());
        let settings = Settings::resolve(half, FileConfig::default(), None).unwrap();
        assert!(matches!(
            settings.connect_options(),
            Err(ConfigError::PartialCredentials)
        ));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(
            &path,
            r#"
keyspace = "chat"
contact-points = ["10.0.0.1", "10.0.0.2"]
local-data-center = "dc1"
out-dir = "web/models"
formatter = "npx biome format --write"
request-timeout-secs = 30
"#,
        )
        .unwrap();

        let file = FileConfig::load(&path).unwrap();
        assert_eq!(file.contact_points.len(), 2);
        assert_eq!(file.request_timeout_secs, Some(30));

        let settings = Settings::resolve(ConnectionArgs::default(), file, None).unwrap();
        assert_eq!(settings.out_dir, PathBuf::from("web/models"));
        assert_eq!(settings.formatter, "npx biome format --write");
        assert_eq!(
            settings.connect_options().unwrap().request_timeout,
            Duration::from_secs(30)
        );
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "keyspace = [").unwrap();
        assert!(matches!(
            FileConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            FileConfig::discover(Some(&dir.path().join("missing.toml"))),
            Err(ConfigError::Read { .. })
        ));
    }
}
