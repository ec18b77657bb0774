use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub api: FileApiConfig,
    #[serde(default)]
    pub list: FileListConfig,
    #[serde(default)]
    pub location: FileLocationConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileApiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,
    /// Humantime string such as `"30s"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileListConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render_ceiling: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_debounce: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentinel_threshold: Option<f64>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileLocationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_accuracy: Option<bool>,
}

/// Environment-derived configuration values.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub api_url: Option<String>,
    pub site_url: Option<String>,
    pub request_timeout: Option<String>,
    pub page_limit: Option<u32>,
    pub render_ceiling: Option<usize>,
    pub search_debounce: Option<String>,
    pub location_timeout: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        let mut env_config = Self::default();

        env_config.config_path =
            non_empty_var("ECOMAP_CONFIG").map(PathBuf::from);
        env_config.api_url = non_empty_var("ECOMAP_API_URL");
        env_config.site_url = non_empty_var("ECOMAP_SITE_URL");
        env_config.request_timeout = non_empty_var("ECOMAP_REQUEST_TIMEOUT");
        env_config.page_limit =
            non_empty_var("ECOMAP_PAGE_LIMIT").and_then(|s| s.parse().ok());
        env_config.render_ceiling = non_empty_var("ECOMAP_RENDER_CEILING")
            .and_then(|s| s.parse().ok());
        env_config.search_debounce = non_empty_var("ECOMAP_SEARCH_DEBOUNCE");
        env_config.location_timeout = non_empty_var("ECOMAP_LOCATION_TIMEOUT");

        env_config
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}
