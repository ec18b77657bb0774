//! Startup viewpoint selection and the location indicator.

mod common;

use common::harness;
use ecomap_client::coordinator::LOCATION_LABEL;
use ecomap_client::domains::location::{FALLBACK_ZOOM, LOCATED_ZOOM};
use ecomap_client::infra::testing::page_of;
use ecomap_contracts::prelude::SensorError;
use ecomap_model::Point;
use std::time::Duration;
use tokio::time::Instant;

#[tokio::test]
async fn sensed_location_zooms_in_and_loads() {
    let mut h = harness();
    let here = Point::new(53.4668, -2.2339);
    h.sensor.push_ok(here);
    h.api.push_page(Ok(page_of(1..=5, 5, 1)));

    h.boot().await;

    assert_eq!(h.map.views().first(), Some(&(here, LOCATED_ZOOM)));
    assert_eq!(h.map.indicators(), vec![(here, LOCATION_LABEL.to_string())]);
    assert_eq!(h.api.page_calls(), 1);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn slow_sensor_times_out_to_city_view() {
    let mut h = harness();
    h.sensor
        .push_delayed(Point::new(51.5, -0.12), Duration::from_secs(10));
    h.api.push_page(Ok(page_of(1..=5, 5, 1)));

    let started = Instant::now();
    h.boot().await;

    let (first_request, _) = h.api.page_queries()[0].clone();
    assert_eq!(first_request.duration_since(started), Duration::from_secs(5));
    assert_eq!(h.map.views().first(), Some(&(Point::FALLBACK, FALLBACK_ZOOM)));
    assert_eq!(h.map.indicators().len(), 1);
    assert_eq!(h.list.len(), 5);
}

#[tokio::test]
async fn denied_permission_still_loads_the_list() {
    let mut h = harness();
    h.sensor.push_err(SensorError::PermissionDenied);
    h.api.push_page(Ok(page_of(1..=3, 3, 1)));

    h.boot().await;

    assert_eq!(h.map.last_view(), Some((Point::FALLBACK, FALLBACK_ZOOM)));
    assert_eq!(h.list.len(), 3);
    assert_eq!(h.sensor.calls(), 1);
}
