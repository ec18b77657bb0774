use thiserror::Error;

use super::models::Config;
use ecomap_model::query::MAX_PAGE_LIMIT;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigGuardRailError {
    #[error("page limit {value} must be between 1 and 100")]
    PageLimitOutOfRange { value: u32 },
    #[error("render ceiling {ceiling} must be at least the page limit {limit}")]
    CeilingBelowLimit { ceiling: usize, limit: u32 },
    #[error("sentinel threshold {value} must be greater than 0 and at most 1")]
    ThresholdOutOfRange { value: f64 },
    #[error("location timeout must be non-zero")]
    ZeroLocationTimeout,
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();
    let list = &config.list;

    if list.page_limit == 0 || list.page_limit > MAX_PAGE_LIMIT {
        return Err(ConfigGuardRailError::PageLimitOutOfRange {
            value: list.page_limit,
        });
    }

    if list.render_ceiling < list.page_limit as usize {
        return Err(ConfigGuardRailError::CeilingBelowLimit {
            ceiling: list.render_ceiling,
            limit: list.page_limit,
        });
    }

    if !(list.sentinel_threshold > 0.0 && list.sentinel_threshold <= 1.0) {
        return Err(ConfigGuardRailError::ThresholdOutOfRange {
            value: list.sentinel_threshold,
        });
    }

    if config.location.timeout.is_zero() {
        return Err(ConfigGuardRailError::ZeroLocationTimeout);
    }

    if list.search_debounce.is_zero() {
        warnings.push_with_hint(
            "Search debounce is zero; every keystroke issues a request",
            "Set list.search_debounce or ECOMAP_SEARCH_DEBOUNCE (default 300ms)",
        );
    }

    if config.api.base_url.scheme() == "http"
        && config
            .api
            .base_url
            .host_str()
            .is_some_and(|host| host != "localhost" && host != "127.0.0.1")
    {
        warnings.push_with_hint(
            "API base URL uses plain HTTP; session cookies travel unencrypted",
            "Use an https:// origin outside local development",
        );
    }

    Ok(warnings)
}
