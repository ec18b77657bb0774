//! Configuration library for the Ecomap client.
//!
//! Values are layered as defaults, then an optional `ecomap.toml`, then the
//! process environment (after `.env` has been folded in). The composed
//! [`Config`] is checked by guard rails before it is handed to the engine.

pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{
    ConfigLoad, ConfigLoader, ConfigLoaderOptions, error::ConfigLoadError,
};
pub use models::{
    ApiConfig, Config, ConfigMetadata, ListConfig, LocationConfig,
    sources::{EnvConfig, FileConfig},
};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
