use anyhow::Context;
use clap::Parser;
use ecomap_client::domains::location::LocationResolver;
use ecomap_client::infra::{
    HttpFacilityApi, StaticSensor, TerminalList, TerminalMap, TerminalShell,
};
use ecomap_client::{EngineSettings, Message, Runtime, ViewCoordinator};
use ecomap_config::{ConfigLoad, ConfigLoader};
use ecomap_contracts::prelude::{LocationSensor, SensorOptions};
use ecomap_model::{
    CategoryId, FacilityId, Point, SortDir, SortField, UserId, Viewer,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Used when `RUST_LOG` is unset or unparsable.
const DEFAULT_LOG_FILTER: &str = "info,ecomap_client=debug";

/// Browse eco facilities from the terminal
#[derive(Parser, Debug)]
#[command(name = "ecomap")]
#[command(about = "Page through eco facilities the way the map view does")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to a .env file to load before reading the environment
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Free-text search applied after the first page loads
    #[arg(short, long)]
    search: Option<String>,

    /// Restrict results to one category id
    #[arg(short, long)]
    category: Option<CategoryId>,

    /// Sort column: id, title, town or postcode
    #[arg(long)]
    sort: Option<SortField>,

    /// Sort direction: asc or desc
    #[arg(long)]
    dir: Option<SortDir>,

    /// Additional pages to request after the first
    #[arg(short, long, default_value_t = 0)]
    pages: u32,

    /// Viewer latitude; without it the city-centre fallback is used
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Viewer longitude
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lng: Option<f64>,

    /// Act as this user when rendering popups and comments
    #[arg(long)]
    user_id: Option<UserId>,

    /// Show the status comments of a loaded facility before exiting
    #[arg(long)]
    statuses: Option<FacilityId>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = &cli.env_file {
        loader = loader.with_env_file(path);
    }
    let ConfigLoad { config, warnings } =
        loader.load().context("failed to load configuration")?;

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint, "configuration warning")
            }
            None => warn!(message = %warning.message, "configuration warning"),
        }
    }

    let api = HttpFacilityApi::from_config(&config.api)
        .context("failed to build HTTP client")?;

    let sensor: Option<Arc<dyn LocationSensor>> = match (cli.lat, cli.lng) {
        (Some(lat), Some(lng)) => {
            Some(Arc::new(StaticSensor(Point::new(lat, lng))))
        }
        _ => None,
    };
    let resolver = LocationResolver::new(sensor).with_options(SensorOptions {
        high_accuracy: config.location.high_accuracy,
        timeout: config.location.timeout,
        ..SensorOptions::default()
    });

    let viewer = cli.user_id.map(Viewer::user).unwrap_or_default();
    let coordinator = ViewCoordinator::new(
        EngineSettings::from_config(&config, viewer),
        Box::new(TerminalMap::new()),
        Box::new(TerminalList::new()),
        Box::new(TerminalShell),
    );

    let mut runtime =
        Runtime::new(coordinator, Arc::new(api), Arc::new(resolver));
    let handle = runtime.handle();

    runtime.start();
    runtime.run_until_settled().await;

    if let Some(dir) = cli.dir {
        handle.send(Message::SortDirSelected(dir));
        runtime.run_until_settled().await;
    }
    if let Some(field) = cli.sort {
        handle.send(Message::SortFieldSelected(field));
        runtime.run_until_settled().await;
    }
    if cli.category.is_some() {
        handle.send(Message::CategorySelected(cli.category));
        runtime.run_until_settled().await;
    }
    if let Some(text) = cli.search {
        handle.send(Message::SearchInput(text));
        runtime.run_until_settled().await;
    }

    for _ in 0..cli.pages {
        if !runtime.coordinator().synchronizer().has_more() {
            info!("no more facilities to load");
            break;
        }
        handle.send(Message::LoadMoreClicked);
        runtime.run_until_settled().await;
    }

    if let Some(id) = cli.statuses {
        handle.send(Message::OpenStatuses(id));
        runtime.run_until_settled().await;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_log_filter_parses() {
        let filter = tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER)
            .expect("default filter is valid");
        let rendered = filter.to_string();
        assert!(rendered.contains("ecomap_client=debug"));
        assert!(rendered.contains("info"));
    }

    #[test]
    fn cli_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "ecomap", "--lat", "53.48", "--lng", "-2.24", "--pages", "2",
        ])
        .expect("arguments parse");
        assert_eq!(cli.lng, Some(-2.24));
        assert_eq!(cli.pages, 2);
    }
}
