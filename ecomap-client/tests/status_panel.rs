//! Comment panel flows and their isolation from pagination.

mod common;

use common::{harness, harness_for};
use ecomap_client::Message;
use ecomap_client::infra::testing::{ApiCall, comment, page_of};
use ecomap_contracts::prelude::{ApiError, NoticeLevel};
use ecomap_model::{FacilityId, StatusId, UserId, Viewer};
use std::time::Duration;

#[tokio::test]
async fn opening_the_panel_renders_comments() {
    let mut h = harness_for(Viewer::user(UserId(7)));
    h.api
        .push_page(Ok(page_of(1..=5, 12, 3)))
        .set_statuses(
            FacilityId(2),
            vec![comment(10, 2, 7, "Bins emptied"), comment(11, 2, 8, "Full again")],
        );
    h.boot().await;

    h.send(Message::OpenStatuses(FacilityId(2))).await;

    let panel = h.shell.last_panel().expect("panel rendered");
    assert_eq!(panel.facility_id, FacilityId(2));
    assert_eq!(panel.title, "Facility 2");
    assert!(panel.can_add);
    assert_eq!(panel.comments.len(), 2);
    assert!(panel.comments[0].editable);
    assert!(!panel.comments[1].editable);
    assert_eq!(panel.empty_message, None);
}

#[tokio::test]
async fn empty_panel_and_unknown_facility() {
    let mut h = harness();
    h.api.push_page(Ok(page_of(1..=5, 12, 3)));
    h.boot().await;

    h.send(Message::OpenStatuses(FacilityId(99))).await;
    assert!(h.shell.last_panel().is_none());
    assert!(!h.api.calls().contains(&ApiCall::FetchStatuses(FacilityId(99))));

    h.send(Message::OpenStatuses(FacilityId(1))).await;
    let panel = h.shell.last_panel().expect("panel rendered");
    assert_eq!(panel.empty_message.as_deref(), Some("No status updates yet."));
    assert!(!panel.can_add);
}

#[tokio::test]
async fn comment_actions_leave_pagination_untouched() {
    let mut h = harness_for(Viewer::user(UserId(7)));
    h.api
        .push_page(Ok(page_of(1..=5, 12, 3)))
        .push_page(Ok(page_of(6..=10, 12, 3)))
        .set_statuses(FacilityId(3), vec![comment(10, 3, 7, "Clean")]);
    h.boot().await;
    h.send(Message::LoadMoreClicked).await;

    let before = h.runtime.coordinator().synchronizer().state().clone();
    let rows_before = h.list.row_ids();
    let overlays_before = h.map.overlays_created();

    h.send(Message::OpenStatuses(FacilityId(3))).await;
    h.send(Message::SubmitStatus {
        facility_id: FacilityId(3),
        text: "  Recycling bins full  ".into(),
    })
    .await;
    h.send(Message::EditStatus(StatusId(10))).await;
    h.send(Message::UpdateStatus {
        status_id: StatusId(10),
        text: "Clean again".into(),
    })
    .await;

    assert_eq!(h.runtime.coordinator().synchronizer().state(), &before);
    assert_eq!(h.list.row_ids(), rows_before);
    assert_eq!(h.map.overlays_created(), overlays_before);
    assert_eq!(h.api.page_calls(), 2);

    let calls = h.api.calls();
    assert!(calls.contains(&ApiCall::SubmitStatus {
        facility_id: FacilityId(3),
        text: "Recycling bins full".into(),
    }));
    assert!(calls.contains(&ApiCall::UpdateStatus {
        status_id: StatusId(10),
        text: "Clean again".into(),
    }));

    let messages: Vec<String> =
        h.shell.notices().into_iter().map(|n| n.message).collect();
    assert_eq!(
        messages,
        vec![
            "Status update added successfully".to_string(),
            "Status update edited successfully".to_string(),
        ]
    );
    assert!(h.shell.notices().iter().all(|n| n.ttl == Duration::from_millis(2500)));
    assert_eq!(h.shell.inputs_cleared(), 1);
}

#[tokio::test]
async fn edit_mode_is_rendered_and_cancel_refetches() {
    let mut h = harness_for(Viewer::user(UserId(7)));
    h.api
        .push_page(Ok(page_of(1..=5, 12, 3)))
        .set_statuses(FacilityId(1), vec![comment(10, 1, 7, "Mine")]);
    h.boot().await;
    h.send(Message::OpenStatuses(FacilityId(1))).await;

    h.send(Message::EditStatus(StatusId(10))).await;
    let panel = h.shell.last_panel().unwrap();
    assert!(panel.comments[0].editing);

    h.send(Message::CancelEdit).await;
    let panel = h.shell.last_panel().unwrap();
    assert!(!panel.comments[0].editing);
    let fetches = h
        .api
        .calls()
        .into_iter()
        .filter(|call| *call == ApiCall::FetchStatuses(FacilityId(1)))
        .count();
    assert_eq!(fetches, 2);
}

#[tokio::test]
async fn unauthenticated_submit_shows_server_message() {
    let mut h = harness();
    h.api
        .push_page(Ok(page_of(1..=5, 12, 3)))
        .push_submit(Err(ApiError::Unauthorized(
            "You must be logged in to add a status".into(),
        )));
    h.boot().await;

    h.send(Message::SubmitStatus {
        facility_id: FacilityId(1),
        text: "hello".into(),
    })
    .await;

    let notice = h.shell.notices().pop().expect("notice shown");
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "Error: You must be logged in to add a status");
    assert_eq!(h.shell.inputs_cleared(), 0);
}

#[tokio::test]
async fn blank_comment_is_not_sent() {
    let mut h = harness_for(Viewer::user(UserId(1)));
    h.api.push_page(Ok(page_of(1..=5, 12, 3)));
    h.boot().await;

    h.send(Message::SubmitStatus {
        facility_id: FacilityId(1),
        text: "   ".into(),
    })
    .await;

    assert!(
        !h.api
            .calls()
            .iter()
            .any(|call| matches!(call, ApiCall::SubmitStatus { .. }))
    );
    assert!(h.shell.notices().is_empty());
}

#[tokio::test]
async fn status_fetch_failure_shows_notice() {
    let mut h = harness();
    h.api
        .push_page(Ok(page_of(1..=5, 12, 3)))
        .fail_statuses(ApiError::Status {
            status: 500,
            message: "boom".into(),
        });
    h.boot().await;

    h.send(Message::OpenStatuses(FacilityId(4))).await;

    let notice = h.shell.notices().pop().expect("notice shown");
    assert_eq!(notice.message, "Error loading status updates");
}
