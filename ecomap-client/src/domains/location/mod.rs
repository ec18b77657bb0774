//! Location domain - resolves the starting viewpoint

use ecomap_contracts::prelude::{LocationSensor, SensorError, SensorOptions};
use ecomap_model::Point;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Zoom used for a sensed or cached position.
pub const LOCATED_ZOOM: u8 = 15;
/// Zoom used when falling back to the city view.
pub const FALLBACK_ZOOM: u8 = 13;

pub type LocationListener = Arc<dyn Fn(Point) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSource {
    Sensed,
    Cached,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFix {
    pub point: Point,
    pub source: LocationSource,
}

impl LocationFix {
    pub fn zoom(&self) -> u8 {
        match self.source {
            LocationSource::Fallback => FALLBACK_ZOOM,
            LocationSource::Sensed | LocationSource::Cached => LOCATED_ZOOM,
        }
    }
}

/// Resolves the viewer's position at most once successfully.
///
/// A successful read is cached for the lifetime of the resolver and handed
/// to every registered listener. Failures and timeouts yield the fallback
/// point and are not cached, so a later [`resolve`](Self::resolve) senses
/// again.
pub struct LocationResolver {
    sensor: Option<Arc<dyn LocationSensor>>,
    options: SensorOptions,
    fallback: Point,
    cached: Mutex<Option<Point>>,
    listeners: Mutex<Vec<LocationListener>>,
}

impl fmt::Debug for LocationResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationResolver")
            .field("has_sensor", &self.sensor.is_some())
            .field("options", &self.options)
            .field("cached", &*self.cached.lock())
            .field("listeners", &self.listeners.lock().len())
            .finish()
    }
}

impl LocationResolver {
    pub fn new(sensor: Option<Arc<dyn LocationSensor>>) -> Self {
        Self {
            sensor,
            options: SensorOptions::default(),
            fallback: Point::FALLBACK,
            cached: Mutex::new(None),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn with_options(mut self, options: SensorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_fallback(mut self, fallback: Point) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn options(&self) -> SensorOptions {
        self.options
    }

    pub fn cached(&self) -> Option<Point> {
        *self.cached.lock()
    }

    /// Register a callback invoked with the point of the first successful read.
    pub fn on_resolved(&self, listener: LocationListener) {
        self.listeners.lock().push(listener);
    }

    pub async fn resolve(&self) -> LocationFix {
        let cached = self.cached();
        if let Some(point) = cached {
            debug!(%point, "using cached location");
            return LocationFix {
                point,
                source: LocationSource::Cached,
            };
        }

        let Some(sensor) = self.sensor.clone() else {
            warn!("location sensing unsupported; using fallback point");
            return self.fallback_fix();
        };

        let read = tokio::time::timeout(
            self.options.timeout,
            sensor.current_position(self.options),
        )
        .await
        .unwrap_or(Err(SensorError::Timeout))
        .and_then(|point| {
            if point.is_valid() {
                Ok(point)
            } else {
                Err(SensorError::Unavailable(format!(
                    "sensor returned out-of-range point {point}"
                )))
            }
        });

        match read {
            Ok(point) => {
                *self.cached.lock() = Some(point);
                info!(%point, "location resolved");
                let listeners = self.listeners.lock().clone();
                for listener in listeners {
                    listener(point);
                }
                LocationFix {
                    point,
                    source: LocationSource::Sensed,
                }
            }
            Err(err) => {
                warn!(
                    error = %err,
                    timeout_ms = self.options.timeout.as_millis() as u64,
                    "location sensing failed; using fallback point"
                );
                self.fallback_fix()
            }
        }
    }

    fn fallback_fix(&self) -> LocationFix {
        LocationFix {
            point: self.fallback,
            source: LocationSource::Fallback,
        }
    }
}
