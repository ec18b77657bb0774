pub mod error;

use once_cell::sync::Lazy;
use std::{fs, path::PathBuf, time::Duration};
use tracing::debug;
use url::Url;

use self::error::ConfigLoadError;
use crate::{
    models::{
        ApiConfig, Config, ConfigMetadata, ListConfig, LocationConfig,
        sources::{EnvConfig, FileConfig},
    },
    validation::{self, ConfigWarnings},
};

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("ecomap.toml"),
        PathBuf::from("config/ecomap.toml"),
    ]
});

const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
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

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        self.load_with_env(EnvConfig::gather(), env_file_loaded)
    }

    /// Compose against an already gathered environment. `load` is the usual
    /// entry point; this one lets callers supply the environment directly.
    pub fn load_with_env(
        &self,
        env_config: EnvConfig,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env_config)?;

        let (config, warnings) = compose_config(
            file_config,
            env_config,
            ConfigMetadata {
                config_path,
                env_file_loaded,
            },
        )?;

        Ok(ConfigLoad { config, warnings })
    }

    fn load_file_config(
        &self,
        env_config: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let mut source = ConfigPathSource::default();

        if let Some(explicit) = &self.options.config_path {
            source.explicit = Some(explicit.clone());
        } else if let Some(from_env) = &env_config.config_path {
            source.env = Some(from_env.clone());
        }

        if source.is_empty() {
            source.default = DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
                .cloned();
        }

        let Some((path, provenance)) = source.resolved_path() else {
            return Ok((None, None));
        };

        if !path.exists() {
            if provenance.is_explicit() {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            return Ok((None, None));
        }

        let contents =
            fs::read_to_string(&path).map_err(|err| ConfigLoadError::Io {
                path: path.clone(),
                source: err,
            })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
                path: path.clone(),
                source: err,
            })?;

        debug!(path = %path.display(), "loaded configuration file");
        Ok((Some(file_config), Some(path)))
    }
}

fn compose_config(
    file_config: Option<FileConfig>,
    env: EnvConfig,
    metadata: ConfigMetadata,
) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
    let mut warnings = ConfigWarnings::default();

    if metadata.config_path.is_none() {
        warnings.push_with_hint(
            "No ecomap.toml detected; using defaults and environment variables",
            "Create ecomap.toml or set ECOMAP_CONFIG to point at one",
        );
    }

    let FileConfig {
        api: file_api,
        list: file_list,
        location: file_location,
    } = file_config.unwrap_or_default();

    let raw_base = env
        .api_url
        .clone()
        .or(file_api.base_url)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let base_url = normalize_url("api.base_url", &raw_base, &mut warnings)?;

    let site_url = match env.site_url.clone().or(file_api.site_url) {
        Some(raw) => normalize_url("api.site_url", &raw, &mut warnings)?,
        None => base_url.clone(),
    };

    let request_timeout = env
        .request_timeout
        .clone()
        .or(file_api.request_timeout)
        .map(|raw| parse_duration("api.request_timeout", &raw))
        .transpose()?;

    let list_defaults = ListConfig::default();
    let list = ListConfig {
        page_limit: env
            .page_limit
            .or(file_list.page_limit)
            .unwrap_or(list_defaults.page_limit),
        render_ceiling: env
            .render_ceiling
            .or(file_list.render_ceiling)
            .unwrap_or(list_defaults.render_ceiling),
        search_debounce: env
            .search_debounce
            .clone()
            .or(file_list.search_debounce)
            .map(|raw| parse_duration("list.search_debounce", &raw))
            .transpose()?
            .unwrap_or(list_defaults.search_debounce),
        sentinel_threshold: file_list
            .sentinel_threshold
            .unwrap_or(list_defaults.sentinel_threshold),
    };

    let location_defaults = LocationConfig::default();
    let location = LocationConfig {
        timeout: env
            .location_timeout
            .clone()
            .or(file_location.timeout)
            .map(|raw| parse_duration("location.timeout", &raw))
            .transpose()?
            .unwrap_or(location_defaults.timeout),
        high_accuracy: file_location
            .high_accuracy
            .unwrap_or(location_defaults.high_accuracy),
    };

    let config = Config {
        api: ApiConfig {
            base_url,
            site_url,
            request_timeout,
        },
        list,
        location,
        metadata,
    };

    let guard_warnings = validation::apply_guard_rails(&config)?;
    warnings.extend(guard_warnings);

    Ok((config, warnings))
}

/// Accept `localhost:8000` style input: add `http://` when no scheme is
/// given and drop trailing slashes so joined paths never double up.
fn normalize_url(
    field: &'static str,
    raw: &str,
    warnings: &mut ConfigWarnings,
) -> Result<Url, ConfigLoadError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let with_scheme =
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("http://{trimmed}")
        };

    if with_scheme != raw {
        warnings.push(format!(
            "Normalized {field} from '{raw}' to '{with_scheme}'"
        ));
    }

    Url::parse(&with_scheme).map_err(|source| ConfigLoadError::InvalidUrl {
        field,
        value: raw.to_string(),
        source,
    })
}

fn parse_duration(
    field: &'static str,
    raw: &str,
) -> Result<Duration, ConfigLoadError> {
    humantime::parse_duration(raw.trim()).map_err(|source| {
        ConfigLoadError::InvalidDuration {
            field,
            value: raw.to_string(),
            source,
        }
    })
}

#[derive(Debug, Default)]
struct ConfigPathSource {
    explicit: Option<PathBuf>,
    env: Option<PathBuf>,
    default: Option<PathBuf>,
}

impl ConfigPathSource {
    fn is_empty(&self) -> bool {
        self.explicit.is_none() && self.env.is_none() && self.default.is_none()
    }

    fn resolved_path(&self) -> Option<(PathBuf, ConfigPathProvenance)> {
        if let Some(path) = &self.explicit {
            return Some((path.clone(), ConfigPathProvenance::Explicit));
        }
        if let Some(path) = &self.env {
            return Some((path.clone(), ConfigPathProvenance::Env));
        }
        if let Some(path) = &self.default {
            return Some((path.clone(), ConfigPathProvenance::Default));
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigPathProvenance {
    Explicit,
    Env,
    Default,
}

impl ConfigPathProvenance {
    fn is_explicit(self) -> bool {
        matches!(
            self,
            ConfigPathProvenance::Explicit | ConfigPathProvenance::Env
        )
    }
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_gets_scheme_and_warning() {
        let mut warnings = ConfigWarnings::default();
        let url =
            normalize_url("api.base_url", "example.org:8080/", &mut warnings)
                .unwrap();
        assert_eq!(url.as_str(), "http://example.org:8080/");
        assert_eq!(warnings.items.len(), 1);
    }

    #[test]
    fn well_formed_url_is_left_alone() {
        let mut warnings = ConfigWarnings::default();
        normalize_url("api.base_url", "https://eco.example", &mut warnings)
            .unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn bad_duration_names_the_field() {
        let err = parse_duration("list.search_debounce", "soon").unwrap_err();
        assert!(matches!(
            err,
            ConfigLoadError::InvalidDuration {
                field: "list.search_debounce",
                ..
            }
        ));
    }
}
