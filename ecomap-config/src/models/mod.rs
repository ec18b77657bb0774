pub mod sources;

use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Fully resolved client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub list: ListConfig,
    pub location: LocationConfig,
    pub metadata: ConfigMetadata,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Origin serving `/api/*`; never carries a trailing slash.
    pub base_url: Url,
    /// Origin used for "View Details" links.
    pub site_url: Url,
    /// Whole-request timeout. Unset means requests wait on the transport.
    pub request_timeout: Option<Duration>,
}

impl ApiConfig {
    /// `base_url` as a string without the trailing slash `Url` adds to bare
    /// origins.
    pub fn base(&self) -> String {
        self.base_url.as_str().trim_end_matches('/').to_string()
    }

    pub fn site(&self) -> String {
        self.site_url.as_str().trim_end_matches('/').to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListConfig {
    pub page_limit: u32,
    /// Most rows the list keeps rendered at once.
    pub render_ceiling: usize,
    pub search_debounce: Duration,
    /// Fraction of the sentinel that must be visible to count as reached.
    pub sentinel_threshold: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationConfig {
    pub timeout: Duration,
    pub high_accuracy: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_limit: ecomap_model::query::DEFAULT_PAGE_LIMIT,
            render_ceiling: 100,
            search_debounce: Duration::from_millis(300),
            sentinel_threshold: 0.1,
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(5000),
            high_accuracy: true,
        }
    }
}
