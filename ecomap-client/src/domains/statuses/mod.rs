//! Statuses domain - the per-facility comment panel
//!
//! Nothing here touches pagination, markers or rendered rows; the panel only
//! reads the facility record it was opened for.

use ecomap_contracts::prelude::{CommentView, StatusPanelView};
use ecomap_model::{Facility, FacilityId, StatusComment, StatusId, Viewer};
use std::time::Duration;

/// How long comment result notices stay on screen.
pub const COMMENT_NOTICE_TTL: Duration = Duration::from_millis(2500);

pub const EMPTY_COMMENTS: &str = "No status updates yet.";
pub const ADDED: &str = "Status update added successfully";
pub const EDITED: &str = "Status update edited successfully";
pub const LOAD_FAILED: &str = "Error loading status updates";

#[derive(Debug, Clone)]
struct OpenPanel {
    facility: Facility,
    comments: Vec<StatusComment>,
    editing: Option<StatusId>,
}

#[derive(Debug, Default)]
pub struct StatusPanel {
    open: Option<OpenPanel>,
}

impl StatusPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn facility_id(&self) -> Option<FacilityId> {
        self.open.as_ref().map(|panel| panel.facility.id)
    }

    pub fn editing(&self) -> Option<StatusId> {
        self.open.as_ref().and_then(|panel| panel.editing)
    }

    /// Open for `facility`; comments arrive later through [`Self::loaded`].
    pub fn open(&mut self, facility: &Facility) {
        self.open = Some(OpenPanel {
            facility: facility.clone(),
            comments: Vec::new(),
            editing: None,
        });
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    /// Store fetched comments if they belong to the open facility.
    pub fn loaded(
        &mut self,
        facility_id: FacilityId,
        comments: Vec<StatusComment>,
    ) -> bool {
        match self.open.as_mut() {
            Some(panel) if panel.facility.id == facility_id => {
                panel.comments = comments;
                panel.editing = None;
                true
            }
            _ => false,
        }
    }

    /// Put one of the viewer's comments into edit mode.
    pub fn begin_edit(&mut self, status_id: StatusId, viewer: &Viewer) -> bool {
        let Some(panel) = self.open.as_mut() else {
            return false;
        };
        let editable = panel
            .comments
            .iter()
            .any(|c| c.id == status_id && viewer.can_edit(c));
        if editable {
            panel.editing = Some(status_id);
        }
        editable
    }

    /// Leave edit mode; returns the facility whose comments should be refetched.
    pub fn cancel_edit(&mut self) -> Option<FacilityId> {
        let panel = self.open.as_mut()?;
        panel.editing = None;
        Some(panel.facility.id)
    }

    pub fn view(&self, viewer: &Viewer) -> Option<StatusPanelView> {
        let panel = self.open.as_ref()?;
        let comments: Vec<CommentView> = panel
            .comments
            .iter()
            .map(|comment| CommentView {
                editable: viewer.can_edit(comment),
                editing: panel.editing == Some(comment.id),
                comment: comment.clone(),
            })
            .collect();

        Some(StatusPanelView {
            facility_id: panel.facility.id,
            title: panel.facility.title.clone(),
            category: panel.facility.category_name.clone(),
            can_add: viewer.is_logged_in(),
            empty_message: comments
                .is_empty()
                .then(|| EMPTY_COMMENTS.to_string()),
            comments,
        })
    }
}

/// Trimmed comment text, or `None` when nothing is left to send.
pub fn normalize_comment(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
