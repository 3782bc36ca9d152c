//! Runtime configuration.
//!
//! Values come from, in decreasing precedence: explicit overrides (CLI
//! flags), `config.toml` in the bookmarky home, the environment, and
//! built-in defaults.

use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::probe::ProbeMode;
use bookmarky_store::factory::Backend;
use bookmarky_store::factory::choose_backend_from_env;
use serde::Deserialize;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_TOML_FILE: &str = "config.toml";

const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine home directory; set BOOKMARKY_HOME")]
    NoHome,

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("page_size must be at least 1")]
    PageSize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProbeConfig {
    pub mode: ProbeMode,
    pub timeout: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            mode: ProbeMode::default(),
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding the persistence slot.
    pub data_dir: PathBuf,
    pub backend: Backend,
    pub page_size: usize,
    pub probe: ProbeConfig,
}

/// Values that take precedence over anything read from disk.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub backend: Option<Backend>,
    pub page_size: Option<usize>,
    pub probe_mode: Option<ProbeMode>,
}

/// On-disk shape of `config.toml`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigToml {
    data_dir: Option<PathBuf>,
    backend: Option<Backend>,
    page_size: Option<usize>,
    probe: Option<ProbeToml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProbeToml {
    mode: Option<ProbeMode>,
    timeout_secs: Option<u64>,
}

impl Config {
    /// Load using the home from [`find_bookmarky_home`].
    pub fn load(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let home = find_bookmarky_home()?;
        Self::load_from_home(&home, overrides)
    }

    pub fn load_from_home(home: &Path, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let toml = read_config_toml(&home.join(CONFIG_TOML_FILE))?;
        let probe_toml = toml.probe.unwrap_or_default();

        let page_size = overrides
            .page_size
            .or(toml.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(ConfigError::PageSize);
        }

        Ok(Self {
            data_dir: overrides
                .data_dir
                .or(toml.data_dir)
                .unwrap_or_else(|| home.to_path_buf()),
            backend: overrides
                .backend
                .or(toml.backend)
                .unwrap_or_else(choose_backend_from_env),
            page_size,
            probe: ProbeConfig {
                mode: overrides
                    .probe_mode
                    .or(probe_toml.mode)
                    .unwrap_or_default(),
                timeout: probe_toml
                    .timeout_secs
                    .map(Duration::from_secs)
                    .unwrap_or(DEFAULT_PROBE_TIMEOUT),
            },
        })
    }
}

fn read_config_toml(path: &Path) -> Result<ConfigToml, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("no config at {}; using defaults", path.display());
            return Ok(ConfigToml::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// `$BOOKMARKY_HOME` if set and non-empty, otherwise `~/.bookmarky`.
/// The directory is not required to exist.
pub fn find_bookmarky_home() -> Result<PathBuf, ConfigError> {
    if let Ok(val) = std::env::var("BOOKMARKY_HOME")
        && !val.is_empty()
    {
        return Ok(PathBuf::from(val));
    }
    let mut home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
    home.push(".bookmarky");
    Ok(home)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_without_config_file() {
        let home = tempfile::tempdir().unwrap();
        let cfg = Config::load_from_home(
            home.path(),
            ConfigOverrides {
                backend: Some(Backend::File),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(
            cfg,
            Config {
                data_dir: home.path().to_path_buf(),
                backend: Backend::File,
                page_size: 20,
                probe: ProbeConfig::default(),
            }
        );
    }

    #[test]
    fn file_values_apply_and_overrides_win() {
        let home = tempfile::tempdir().unwrap();
        std::fs::write(
            home.path().join(CONFIG_TOML_FILE),
            r#"
page_size = 5
backend = "sqlite"

[probe]
mode = "strict"
timeout_secs = 3
"#,
        )
        .unwrap();

        let cfg = Config::load_from_home(home.path(), ConfigOverrides::default()).unwrap();
        assert_eq!(cfg.page_size, 5);
        assert_eq!(cfg.backend, Backend::Sqlite);
        assert_eq!(cfg.probe.mode, ProbeMode::Strict);
        assert_eq!(cfg.probe.timeout, Duration::from_secs(3));

        let cfg = Config::load_from_home(
            home.path(),
            ConfigOverrides {
                page_size: Some(7),
                probe_mode: Some(ProbeMode::Off),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(cfg.page_size, 7);
        assert_eq!(cfg.probe.mode, ProbeMode::Off);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let home = tempfile::tempdir().unwrap();
        std::fs::write(home.path().join(CONFIG_TOML_FILE), "page_size = \"lots\"").unwrap();
        let err = Config::load_from_home(home.path(), ConfigOverrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let home = tempfile::tempdir().unwrap();
        let err = Config::load_from_home(
            home.path(),
            ConfigOverrides {
                page_size: Some(0),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::PageSize));
    }
}
