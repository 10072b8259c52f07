//! Resolves [`Config`] from defaults, an optional TOML file, an optional
//! `.env` file and the process environment.
//!
//! Precedence, lowest to highest: built-in defaults, the TOML file,
//! environment variables (including those loaded from `.env`).

pub mod error;

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};
use url::Url;

use crate::constants::{
    DEFAULT_API_TIMEOUT, DEFAULT_API_URL, DEFAULT_CONFIG_FILE, ENV_API_TIMEOUT,
    ENV_API_URL, ENV_CONFIG_PATH, ENV_PAGE_SIZE, ENV_RESET_CATEGORY,
};
use crate::models::sources::FileConfig;
use crate::models::{ApiConfig, Config, ConfigMetadata, FilterConfig, PagingConfig};
use crate::util::{non_empty_var, parse_bool};
use error::ConfigLoadError;

#[derive(Debug, Clone, Default)]
pub struct ConfigLoaderOptions {
    /// Explicit config file. It must exist when given.
    pub config_path: Option<PathBuf>,
    /// Explicit `.env` file. When unset, `.env` in the working directory is
    /// loaded if present.
    pub env_file: Option<PathBuf>,
    /// Skip `.env` handling entirely.
    pub skip_env_file: bool,
}

/// A resolved config plus any non-fatal notes gathered while loading.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    /// Loads from the real process environment.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let mut notes = Vec::new();
        let env_file = self.load_env_file(&mut notes)?;

        let lookup = |name: &str| std::env::var(name).ok();
        let config_path = self
            .options
            .config_path
            .clone()
            .or_else(|| non_empty_var(&lookup, ENV_CONFIG_PATH).map(PathBuf::from));
        let (file, config_path) = read_file_config(config_path, &mut notes)?;

        let mut config = resolve(file, lookup)?;
        config.metadata = ConfigMetadata {
            config_path,
            env_file,
        };
        info!(
            api = %config.api.base_url,
            page_size = config.paging.page_size,
            "configuration loaded"
        );
        Ok(ConfigLoad { config, notes })
    }

    fn load_env_file(
        &self,
        notes: &mut Vec<String>,
    ) -> Result<Option<PathBuf>, ConfigLoadError> {
        if self.options.skip_env_file {
            return Ok(None);
        }

        match &self.options.env_file {
            Some(path) => {
                dotenvy::from_path(path).map_err(|source| ConfigLoadError::EnvFile {
                    path: path.clone(),
                    source,
                })?;
                Ok(Some(path.clone()))
            }
            None => match dotenvy::dotenv() {
                Ok(path) => Ok(Some(path)),
                Err(err) if err.not_found() => Ok(None),
                Err(err) => {
                    notes.push(format!("Ignoring unreadable .env file: {err}"));
                    Ok(None)
                }
            },
        }
    }
}

/// Reads the TOML file at `explicit`, or `partfinder.toml` in the working
/// directory when present.
fn read_file_config(
    explicit: Option<PathBuf>,
    notes: &mut Vec<String>,
) -> Result<(FileConfig, Option<PathBuf>), ConfigLoadError> {
    let path = match explicit {
        Some(path) if !path.exists() => {
            return Err(ConfigLoadError::Missing { path });
        }
        Some(path) => path,
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !fallback.exists() {
                notes.push(format!("No {DEFAULT_CONFIG_FILE} found; using defaults"));
                return Ok((FileConfig::default(), None));
            }
            fallback
        }
    };

    let file = read_toml(&path)?;
    debug!(path = %path.display(), "read config file");
    Ok((file, Some(path)))
}

pub fn read_toml(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    FileConfig::from_toml(&raw).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Merges `file` with environment values from `lookup` over the defaults
/// and validates the result.
pub fn resolve<F>(file: FileConfig, lookup: F) -> Result<Config, ConfigLoadError>
where
    F: Fn(&str) -> Option<String>,
{
    let base_url = non_empty_var(&lookup, ENV_API_URL)
        .or(file.api.base_url)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let base_url = parse_base_url(&base_url)?;

    let timeout = match non_empty_var(&lookup, ENV_API_TIMEOUT).or(file.api.timeout) {
        Some(raw) => parse_timeout(&raw)?,
        None => DEFAULT_API_TIMEOUT,
    };

    let page_size = match non_empty_var(&lookup, ENV_PAGE_SIZE) {
        Some(raw) => raw.parse::<usize>().map_err(|err| ConfigLoadError::Invalid {
            key: ENV_PAGE_SIZE,
            message: format!("'{raw}' is not a page size: {err}"),
        })?,
        None => file
            .paging
            .page_size
            .unwrap_or_else(|| PagingConfig::default().page_size),
    };
    if page_size == 0 {
        return Err(ConfigLoadError::Invalid {
            key: "paging.page_size",
            message: "must be greater than zero".to_string(),
        });
    }

    let reset_category_on_brand_change = match non_empty_var(&lookup, ENV_RESET_CATEGORY)
    {
        Some(raw) => parse_bool(&raw).ok_or_else(|| ConfigLoadError::Invalid {
            key: ENV_RESET_CATEGORY,
            message: format!("'{raw}' is not a boolean"),
        })?,
        None => file.filter.reset_category_on_brand_change.unwrap_or(false),
    };

    Ok(Config {
        api: ApiConfig { base_url, timeout },
        paging: PagingConfig { page_size },
        filter: FilterConfig {
            reset_category_on_brand_change,
        },
        metadata: ConfigMetadata::default(),
    })
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigLoadError> {
    let url = Url::parse(raw).map_err(|err| ConfigLoadError::Invalid {
        key: "api.base_url",
        message: format!("'{raw}': {err}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigLoadError::Invalid {
            key: "api.base_url",
            message: format!("'{raw}' must use http or https"),
        });
    }
    Ok(url)
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigLoadError> {
    let timeout = humantime::parse_duration(raw).map_err(|err| ConfigLoadError::Invalid {
        key: "api.timeout",
        message: format!("'{raw}': {err}"),
    })?;
    if timeout.is_zero() {
        return Err(ConfigLoadError::Invalid {
            key: "api.timeout",
            message: "must be greater than zero".to_string(),
        });
    }
    Ok(timeout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    fn file(raw: &str) -> FileConfig {
        FileConfig::from_toml(raw).unwrap()
    }

    #[test]
    fn defaults_apply_without_file_or_env() {
        let config = resolve(FileConfig::default(), env(&[])).unwrap();
        assert_eq!(config.api.base_url.as_str(), "http://localhost:8000/");
        assert_eq!(config.api.timeout, Duration::from_secs(30));
        assert_eq!(config.paging.page_size, 30);
        assert!(!config.filter.reset_category_on_brand_change);
    }

    #[test]
    fn file_overrides_defaults() {
        let config = resolve(
            file(
                r#"
                [api]
                base_url = "https://parts.example.com/api/"
                timeout = "1m 30s"

                [paging]
                page_size = 50

                [filter]
                reset_category_on_brand_change = true
                "#,
            ),
            env(&[]),
        )
        .unwrap();
        assert_eq!(config.api.base_url.as_str(), "https://parts.example.com/api/");
        assert_eq!(config.api.timeout, Duration::from_secs(90));
        assert_eq!(config.paging.page_size, 50);
        assert!(config.filter.policy().reset_category_on_brand_change);
    }

    #[test]
    fn env_overrides_file() {
        let config = resolve(
            file(
                r#"
                [api]
                base_url = "https://parts.example.com"
                [paging]
                page_size = 50
                "#,
            ),
            env(&[
                (ENV_API_URL, "http://127.0.0.1:9000"),
                (ENV_PAGE_SIZE, "10"),
                (ENV_RESET_CATEGORY, "yes"),
            ]),
        )
        .unwrap();
        assert_eq!(config.api.base_url.as_str(), "http://127.0.0.1:9000/");
        assert_eq!(config.paging.page_size, 10);
        assert!(config.filter.reset_category_on_brand_change);
    }

    #[test]
    fn blank_env_values_fall_through_to_file() {
        let config = resolve(
            file("[paging]\npage_size = 12\n"),
            env(&[(ENV_PAGE_SIZE, "  ")]),
        )
        .unwrap();
        assert_eq!(config.paging.page_size, 12);
    }

    #[test]
    fn rejects_invalid_values() {
        let cases = [
            (env(&[(ENV_API_URL, "ftp://parts.example.com")]), "api.base_url"),
            (env(&[(ENV_PAGE_SIZE, "0")]), "paging.page_size"),
            (env(&[(ENV_PAGE_SIZE, "many")]), ENV_PAGE_SIZE),
            (env(&[(ENV_API_TIMEOUT, "soon")]), "api.timeout"),
            (env(&[(ENV_RESET_CATEGORY, "perhaps")]), ENV_RESET_CATEGORY),
        ];
        for (lookup, expected) in cases {
            match resolve(FileConfig::default(), lookup) {
                Err(ConfigLoadError::Invalid { key, .. }) => assert_eq!(key, expected),
                other => panic!("expected invalid {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        assert!(FileConfig::from_toml("[api]\nbase_uri = \"http://x\"\n").is_err());
    }

    #[test]
    fn loader_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partfinder.toml");
        let mut handle = std::fs::File::create(&path).unwrap();
        writeln!(handle, "[paging]\npage_size = 25").unwrap();

        let (file, used) = read_file_config(Some(path.clone()), &mut Vec::new()).unwrap();

        assert_eq!(file.paging.page_size, Some(25));
        assert_eq!(used, Some(path));
    }

    #[test]
    fn loader_reports_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = read_file_config(Some(path), &mut Vec::new()).unwrap_err();

        assert!(matches!(err, ConfigLoadError::Missing { .. }));
    }

    #[test]
    fn loader_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[paging\npage_size = ").unwrap();

        let err = read_toml(&path).unwrap_err();

        assert!(matches!(err, ConfigLoadError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }
}
