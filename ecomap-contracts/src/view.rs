//! Render payloads handed to the surfaces.

use ecomap_model::{CategoryId, FacilityId, StatusComment};
use std::time::Duration;

/// One entry of the category filter control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    pub value: Option<CategoryId>,
    pub label: String,
}

impl CategoryOption {
    pub fn all_categories() -> Self {
        Self {
            value: None,
            label: "All Categories".to_string(),
        }
    }
}

/// Content of one list row.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRow {
    pub id: FacilityId,
    pub title: String,
    pub category: String,
    pub locality: String,
    /// `"1.2 km away"`
    pub distance: Option<String>,
}

/// Presentation of the manual load-more control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMoreButton {
    Ready,
    Loading,
    Exhausted,
}

impl LoadMoreButton {
    pub fn label(&self) -> &'static str {
        match self {
            LoadMoreButton::Ready => "Load More",
            LoadMoreButton::Loading => "Loading...",
            LoadMoreButton::Exhausted => "No More Items",
        }
    }

    pub fn enabled(&self) -> bool {
        matches!(self, LoadMoreButton::Ready)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoticeId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient message, dismissed after `ttl`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: NoticeId,
    pub level: NoticeLevel,
    pub message: String,
    pub ttl: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentView {
    pub comment: StatusComment,
    pub editable: bool,
    pub editing: bool,
}

/// Comment panel for one facility.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusPanelView {
    pub facility_id: FacilityId,
    pub title: String,
    pub category: String,
    pub can_add: bool,
    pub comments: Vec<CommentView>,
    /// Shown instead of the list when there are no comments.
    pub empty_message: Option<String>,
}
