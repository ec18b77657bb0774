use crate::error::SensorError;
use async_trait::async_trait;
use ecomap_model::Point;
use std::fmt::Debug;
use std::time::Duration;

/// Options forwarded to the platform positioning call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest cached fix the platform may hand back; zero forces a fresh read.
    pub maximum_age: Duration,
}

impl Default for SensorOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_millis(5000),
            maximum_age: Duration::ZERO,
        }
    }
}

#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait LocationSensor: Send + Sync + Debug {
    async fn current_position(
        &self,
        options: SensorOptions,
    ) -> Result<Point, SensorError>;
}
