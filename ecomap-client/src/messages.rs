//! Messages consumed by the coordinator and the effects it asks for.

use crate::domains::list::PageRequest;
use crate::domains::location::LocationFix;
use ecomap_contracts::prelude::{ApiError, NoticeId};
use ecomap_model::{
    Category, CategoryId, FacilityId, FacilityPage, SortDir, SortField,
    StatusComment, StatusId, StatusSubmitted, StatusUpdated,
};
use std::time::Duration;

#[derive(Clone, Debug)]
pub enum Message {
    // Startup
    LocationResolved(LocationFix),
    CategoriesLoaded(Result<Vec<Category>, ApiError>),

    // Filter controls
    /// Raw keystroke in the search box; debounced before it applies.
    SearchInput(String),
    /// Quiet period elapsed for this text.
    SearchDebounced(String),
    CategorySelected(Option<CategoryId>),
    SortFieldSelected(SortField),
    SortDirSelected(SortDir),

    // Paging
    /// Intersection ratio of the sentinel row.
    SentinelVisibility(f64),
    LoadMoreClicked,
    PageLoaded {
        request: PageRequest,
        result: Result<FacilityPage, ApiError>,
    },

    // Highlight
    MarkerClicked(FacilityId),
    RowClicked(FacilityId),
    FacilitySelected(FacilityId),

    // Status panel
    OpenStatuses(FacilityId),
    StatusesLoaded {
        facility_id: FacilityId,
        result: Result<Vec<StatusComment>, ApiError>,
    },
    SubmitStatus {
        facility_id: FacilityId,
        text: String,
    },
    StatusSubmitted {
        facility_id: FacilityId,
        result: Result<StatusSubmitted, ApiError>,
    },
    EditStatus(StatusId),
    CancelEdit,
    UpdateStatus {
        status_id: StatusId,
        text: String,
    },
    StatusUpdated {
        status_id: StatusId,
        result: Result<StatusUpdated, ApiError>,
    },

    DismissNotice(NoticeId),
    Shutdown,
}

/// Work the runtime performs on the coordinator's behalf.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    ResolveLocation,
    FetchCategories,
    FetchPage(PageRequest),
    /// Restart the search quiet-period timer.
    Debounce { text: String, delay: Duration },
    FetchStatuses(FacilityId),
    SubmitStatus { facility_id: FacilityId, text: String },
    UpdateStatus { status_id: StatusId, text: String },
    ExpireNotice { id: NoticeId, after: Duration },
}
