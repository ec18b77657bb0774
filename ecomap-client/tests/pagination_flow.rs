//! Paging through facilities: initial load, load-more, exhaustion, failures,
//! de-duplication and eviction of old rows.

mod common;

use common::{harness, harness_with, settings};
use ecomap_client::EngineSettings;
use ecomap_client::Message;
use ecomap_client::infra::testing::{category, page_of};
use ecomap_contracts::prelude::{ApiError, LoadMoreButton, NoticeLevel};
use ecomap_model::{CategoryId, FacilityId, SortDir};
use std::time::Duration;

fn ids(range: std::ops::RangeInclusive<u64>) -> Vec<FacilityId> {
    range.map(FacilityId).collect()
}

#[tokio::test]
async fn twelve_facilities_over_three_pages() {
    let mut h = harness();
    h.api
        .set_categories(Ok(vec![category(1, "Recycling"), category(2, "Compost")]))
        .push_page(Ok(page_of(1..=5, 12, 3)))
        .push_page(Ok(page_of(6..=10, 12, 3)))
        .push_page(Ok(page_of(11..=12, 12, 3)));

    h.boot().await;

    assert_eq!(h.list.row_ids(), ids(1..=5));
    assert_eq!(h.shell.status_line().as_deref(), Some("Showing 5 of 12 facilities"));
    assert_eq!(h.shell.button(), Some(LoadMoreButton::Ready));
    assert!(!h.shell.is_loading());
    let categories = h.shell.categories();
    assert_eq!(categories.len(), 3);
    assert_eq!(categories[0].label, "All Categories");
    assert_eq!(categories[2].value, Some(CategoryId(2)));

    h.send(Message::LoadMoreClicked).await;
    assert_eq!(h.list.row_ids(), ids(1..=10));
    assert_eq!(h.shell.status_line().as_deref(), Some("Showing 10 of 12 facilities"));

    h.send(Message::SentinelVisibility(0.5)).await;
    assert_eq!(h.list.row_ids(), ids(1..=12));
    assert_eq!(h.shell.status_line().as_deref(), Some("Showing 12 of 12 facilities"));
    assert_eq!(h.shell.button(), Some(LoadMoreButton::Exhausted));

    let sync = h.runtime.coordinator().synchronizer();
    assert!(!sync.has_more());
    assert_eq!(sync.state().page, 3);
    assert_eq!(sync.state().loaded_items, 12);

    h.send(Message::LoadMoreClicked).await;
    h.send(Message::SentinelVisibility(0.0)).await;
    h.send(Message::SentinelVisibility(1.0)).await;
    assert_eq!(h.api.page_calls(), 3);

    let pages: Vec<u32> = h.api.page_queries().iter().map(|(_, q)| q.page).collect();
    assert_eq!(pages, vec![1, 2, 3]);
    assert_eq!(h.runtime.coordinator().markers().len(), 12);
}

#[tokio::test]
async fn first_request_uses_default_query() {
    let mut h = harness();
    h.api.push_page(Ok(page_of(1..=5, 5, 1)));
    h.boot().await;

    let (_, query) = h.api.page_queries().remove(0);
    assert_eq!(
        query.to_query_pairs(),
        vec![
            ("page", "1".to_string()),
            ("limit", "5".to_string()),
            ("order", "id".to_string()),
            ("dir", "ASC".to_string()),
        ]
    );
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn failed_load_more_restores_page_and_expires_notice() {
    let mut h = harness();
    h.api
        .push_page(Ok(page_of(1..=5, 12, 3)))
        .push_page(Err(ApiError::Transport("connection reset".into())))
        .push_page(Ok(page_of(6..=10, 12, 3)));
    h.boot().await;

    h.send(Message::LoadMoreClicked).await;

    assert_eq!(h.list.row_ids(), ids(1..=5));
    assert_eq!(h.runtime.coordinator().synchronizer().state().page, 1);
    assert_eq!(h.shell.button(), Some(LoadMoreButton::Ready));
    let notices = h.shell.visible_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(
        notices[0].message,
        "Could not load more facilities. Please try again later."
    );
    assert_eq!(notices[0].ttl, Duration::from_secs(5));

    tokio::time::sleep(Duration::from_secs(6)).await;
    assert!(h.runtime.run_until_settled().await);
    assert!(h.shell.visible_notices().is_empty());

    h.send(Message::LoadMoreClicked).await;
    assert_eq!(h.api.page_queries().last().map(|(_, q)| q.page), Some(2));
    assert_eq!(h.list.row_ids(), ids(1..=10));
}

#[tokio::test]
async fn malformed_initial_page_reports_invalid_response() {
    let mut h = harness();
    h.api.push_page(Err(ApiError::Malformed("missing facilities".into())));
    h.boot().await;

    let notices = h.shell.visible_notices();
    assert_eq!(notices[0].message, "Invalid response from server");
    assert!(h.list.is_empty());
    assert_eq!(h.runtime.coordinator().synchronizer().state().page, 1);
}

#[tokio::test]
async fn load_more_after_failed_first_page_retries_page_one() {
    let mut h = harness();
    h.api
        .push_page(Err(ApiError::Transport("connection refused".into())))
        .push_page(Ok(page_of(1..=5, 12, 3)));
    h.boot().await;
    assert!(h.list.is_empty());

    h.send(Message::LoadMoreClicked).await;

    let pages: Vec<u32> = h
        .api
        .page_queries()
        .into_iter()
        .map(|(_, query)| query.page)
        .collect();
    assert_eq!(pages, vec![1, 1]);
    assert_eq!(h.list.row_ids(), ids(1..=5));
    let state = h.runtime.coordinator().synchronizer().state();
    assert_eq!(state.page, 1);
    assert_eq!(state.loaded_items, 5);
    assert_eq!(h.shell.button(), Some(LoadMoreButton::Ready));
}

#[tokio::test]
async fn overlapping_batches_do_not_duplicate_markers_or_rows() {
    let mut h = harness();
    h.api
        .push_page(Ok(page_of(1..=5, 12, 3)))
        .push_page(Ok(page_of(4..=8, 12, 3)));
    h.boot().await;
    h.send(Message::LoadMoreClicked).await;

    let coordinator = h.runtime.coordinator();
    assert_eq!(coordinator.markers().len(), 8);
    assert_eq!(h.map.overlays_created(), 8);
    assert_eq!(h.map.live_overlays(), 8);
    assert_eq!(h.list.row_ids(), ids(1..=8));
    assert_eq!(
        coordinator.markers().get(FacilityId(4)).map(|m| m.popup_version()),
        Some(2)
    );
    // Loaded count follows batch sizes, not distinct ids.
    assert_eq!(coordinator.synchronizer().state().loaded_items, 10);
}

#[tokio::test]
async fn rendered_rows_stay_under_the_ceiling() {
    let mut h = harness_with(EngineSettings {
        page_limit: 35,
        render_ceiling: 100,
        ..settings()
    });
    h.api
        .push_page(Ok(page_of(1..=35, 105, 3)))
        .push_page(Ok(page_of(36..=70, 105, 3)))
        .push_page(Ok(page_of(71..=105, 105, 3)));
    h.boot().await;
    h.send(Message::FacilitySelected(FacilityId(2))).await;
    assert_eq!(h.list.active(), Some(FacilityId(2)));

    h.send(Message::LoadMoreClicked).await;
    h.send(Message::LoadMoreClicked).await;

    let coordinator = h.runtime.coordinator();
    assert_eq!(coordinator.rendered().len(), 100);
    assert_eq!(h.list.len(), 100);
    assert_eq!(h.list.removed(), 5);
    assert_eq!(h.list.row_ids().first(), Some(&FacilityId(6)));
    assert_eq!(coordinator.markers().len(), 105);
    assert_eq!(h.list.active(), None);
    assert_eq!(
        h.shell.status_line().as_deref(),
        Some("Showing 105 of 105 facilities")
    );
}

#[tokio::test]
async fn filter_change_rebuilds_markers_and_rows() {
    let mut h = harness();
    h.api
        .push_page(Ok(page_of(1..=5, 12, 3)))
        .push_page(Ok(page_of(20..=21, 2, 1)));
    h.boot().await;

    h.send(Message::CategorySelected(Some(CategoryId(2)))).await;

    let (_, query) = h.api.page_queries().pop().unwrap();
    assert_eq!(query.page, 1);
    assert_eq!(query.category_id, Some(CategoryId(2)));
    assert_eq!(h.runtime.coordinator().markers().len(), 2);
    assert_eq!(h.map.live_overlays(), 2);
    assert_eq!(h.list.row_ids(), ids(20..=21));
    assert_eq!(h.shell.button(), Some(LoadMoreButton::Exhausted));
}

#[tokio::test]
async fn empty_result_shows_placeholder() {
    let mut h = harness();
    h.api
        .push_page(Ok(page_of(1..=5, 12, 3)))
        .push_page(Ok(page_of(1..=0, 0, 0)));
    h.boot().await;

    h.send(Message::SortDirSelected(SortDir::Desc)).await;

    assert!(h.list.is_empty());
    assert_eq!(h.list.placeholder().as_deref(), Some("No facilities found"));
    assert_eq!(h.runtime.coordinator().markers().len(), 0);
    assert_eq!(h.shell.status_line().as_deref(), Some("Showing 0 of 0 facilities"));
    assert_eq!(h.shell.button(), Some(LoadMoreButton::Exhausted));
}

#[tokio::test]
async fn category_failure_is_only_logged() {
    let mut h = harness();
    h.api
        .set_categories(Err(ApiError::Transport("down".into())))
        .push_page(Ok(page_of(1..=5, 5, 1)));
    h.boot().await;

    assert!(h.shell.categories().is_empty());
    assert!(h.shell.notices().is_empty());
    assert_eq!(h.list.len(), 5);
}
