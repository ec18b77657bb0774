use super::state::SearchState;
use ecomap_contracts::prelude::ApiError;
use ecomap_model::{
    CategoryId, Facility, FacilityPage, FacilityQuery, SortDir, SortField,
};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    Initial,
    More,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    #[default]
    Idle,
    Loading(LoadKind),
}

/// A mutation of the list filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Text(String),
    Category(Option<CategoryId>),
    SortField(SortField),
    SortDir(SortDir),
}

/// One issued paginate request; echoed back on completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub kind: LoadKind,
    pub query: FacilityQuery,
}

impl PageRequest {
    pub fn page(&self) -> u32 {
        self.query.page
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchMode {
    Replace,
    Append,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub mode: BatchMode,
    pub facilities: Vec<Facility>,
}

/// A failed page load. Always recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind:?} load of page {page} failed: {source}")]
pub struct LoadFailure {
    pub kind: LoadKind,
    pub page: u32,
    #[source]
    pub source: ApiError,
}

impl LoadFailure {
    /// Text of the notice shown for this failure.
    pub fn notice(&self) -> &'static str {
        if self.source.is_malformed() {
            return "Invalid response from server";
        }
        match self.kind {
            LoadKind::Initial => {
                "Could not load facilities. Please try again later."
            }
            LoadKind::More => {
                "Could not load more facilities. Please try again later."
            }
        }
    }
}

/// Pagination state machine over [`SearchState`].
///
/// `Idle`/`Loading` is the only exclusion mechanism: `load_initial` and
/// `load_more` are dropped while a request is in flight, `set_filter` is not.
/// In-flight requests are never cancelled, so a response for a superseded
/// filter is still applied when it arrives.
#[derive(Debug, Default)]
pub struct ListSynchronizer {
    state: SearchState,
    phase: SyncPhase,
}

impl ListSynchronizer {
    pub fn new(limit: u32) -> Self {
        Self {
            state: SearchState::with_limit(limit),
            phase: SyncPhase::Idle,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, SyncPhase::Loading(_))
    }

    pub fn has_more(&self) -> bool {
        self.state.has_more
    }

    /// Apply a filter change, reset pagination and issue page one.
    pub fn set_filter(&mut self, change: FilterChange) -> PageRequest {
        match change {
            FilterChange::Text(text) => self.state.text = text,
            FilterChange::Category(category) => {
                self.state.category_id = category
            }
            FilterChange::SortField(field) => self.state.sort_field = field,
            FilterChange::SortDir(dir) => self.state.sort_dir = dir,
        }
        if self.is_loading() {
            debug!(phase = ?self.phase, "filter changed while a request is in flight");
        }
        self.state.reset_pagination();
        self.issue(LoadKind::Initial)
    }

    pub fn load_initial(&mut self) -> Option<PageRequest> {
        if self.is_loading() {
            debug!("initial load dropped; request already in flight");
            return None;
        }
        self.state.page = 1;
        Some(self.issue(LoadKind::Initial))
    }

    /// Advance to the next page optimistically.
    ///
    /// Until a first page has landed since the last reset there is nothing
    /// to advance from, so this retries page one instead.
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if self.is_loading() || !self.state.has_more {
            return None;
        }
        if self.state.total_pages.is_none() {
            debug!("no first page yet; retrying initial load");
            return self.load_initial();
        }
        self.state.page += 1;
        Some(self.issue(LoadKind::More))
    }

    /// Reconcile a response with the live state and return to `Idle`.
    pub fn complete(
        &mut self,
        request: &PageRequest,
        result: Result<FacilityPage, ApiError>,
    ) -> Result<Batch, LoadFailure> {
        self.phase = SyncPhase::Idle;

        match result {
            Ok(page) => {
                let received = page.facilities.len() as u64;
                self.state.total_items = page.total;
                self.state.total_pages = Some(page.pages);
                let mode = match request.kind {
                    LoadKind::Initial => {
                        self.state.loaded_items = received;
                        BatchMode::Replace
                    }
                    LoadKind::More => {
                        self.state.loaded_items += received;
                        BatchMode::Append
                    }
                };
                self.state.recompute_has_more();

                info!(
                    page = request.page(),
                    received,
                    loaded = self.state.loaded_items,
                    total = self.state.total_items,
                    has_more = self.state.has_more,
                    "page reconciled"
                );

                Ok(Batch {
                    mode,
                    facilities: page.facilities,
                })
            }
            Err(source) => {
                // Only undo our own optimistic step; a newer request may have
                // moved the page since this one was issued.
                if request.kind == LoadKind::More
                    && self.state.page == request.page()
                    && self.state.page > 1
                {
                    self.state.page -= 1;
                }

                warn!(
                    page = request.page(),
                    kind = ?request.kind,
                    error = %source,
                    "page load failed"
                );

                Err(LoadFailure {
                    kind: request.kind,
                    page: request.page(),
                    source,
                })
            }
        }
    }

    fn issue(&mut self, kind: LoadKind) -> PageRequest {
        self.phase = SyncPhase::Loading(kind);
        let query = self.state.query();
        debug!(page = query.page, ?kind, "issuing page request");
        PageRequest { kind, query }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::testing::page_of;

    #[test]
    fn first_request_carries_defaults() {
        let mut sync = ListSynchronizer::new(5);
        let request = sync.load_initial().expect("idle");
        assert_eq!(request.kind, LoadKind::Initial);
        assert_eq!(request.query, FacilityQuery::default());
        assert!(sync.is_loading());
    }

    #[test]
    fn overlapping_loads_are_dropped() {
        let mut sync = ListSynchronizer::new(5);
        let initial = sync.load_initial().unwrap();
        assert!(sync.load_initial().is_none());
        assert!(sync.load_more().is_none());

        sync.complete(&initial, Ok(page_of(1..=5, 12, 3))).unwrap();
        let more = sync.load_more().unwrap();
        assert!(sync.load_more().is_none());
        assert_eq!(more.page(), 2);
    }

    #[test]
    fn failed_load_more_restores_page() {
        let mut sync = ListSynchronizer::new(5);
        let initial = sync.load_initial().unwrap();
        sync.complete(&initial, Ok(page_of(1..=5, 12, 3))).unwrap();

        let more = sync.load_more().unwrap();
        assert_eq!(sync.state().page, 2);
        let failure = sync
            .complete(&more, Err(ApiError::Transport("reset".into())))
            .unwrap_err();

        assert_eq!(sync.state().page, 1);
        assert_eq!(sync.state().loaded_items, 5);
        assert_eq!(sync.phase(), SyncPhase::Idle);
        assert_eq!(
            failure.notice(),
            "Could not load more facilities. Please try again later."
        );
    }

    #[test]
    fn failed_initial_load_stays_on_first_page() {
        let mut sync = ListSynchronizer::new(5);
        let initial = sync.load_initial().unwrap();
        let failure = sync
            .complete(
                &initial,
                Err(ApiError::Status {
                    status: 500,
                    message: "boom".into(),
                }),
            )
            .unwrap_err();
        assert_eq!(sync.state().page, 1);
        assert_eq!(sync.phase(), SyncPhase::Idle);
        assert_eq!(
            failure.notice(),
            "Could not load facilities. Please try again later."
        );
    }

    #[test]
    fn load_more_after_failed_first_page_retries_page_one() {
        let mut sync = ListSynchronizer::new(5);
        let initial = sync.load_initial().unwrap();
        let _ = sync.complete(&initial, Err(ApiError::Transport("down".into())));

        let retry = sync.load_more().unwrap();
        assert_eq!(retry.kind, LoadKind::Initial);
        assert_eq!(retry.page(), 1);

        let batch = sync.complete(&retry, Ok(page_of(1..=5, 12, 3))).unwrap();
        assert_eq!(batch.mode, BatchMode::Replace);
        assert_eq!(sync.state().page, 1);
        assert_eq!(sync.state().loaded_items, 5);
    }

    #[test]
    fn malformed_payload_has_its_own_notice() {
        let mut sync = ListSynchronizer::new(5);
        let initial = sync.load_initial().unwrap();
        let failure = sync
            .complete(&initial, Err(ApiError::Malformed("no facilities".into())))
            .unwrap_err();
        assert_eq!(failure.notice(), "Invalid response from server");
    }

    #[test]
    fn set_filter_resets_even_while_loading() {
        let mut sync = ListSynchronizer::new(5);
        let initial = sync.load_initial().unwrap();
        sync.complete(&initial, Ok(page_of(1..=5, 12, 3))).unwrap();
        let _more = sync.load_more().unwrap();

        let request = sync.set_filter(FilterChange::Text("glass".into()));

        assert_eq!(request.kind, LoadKind::Initial);
        assert_eq!(request.query.page, 1);
        assert_eq!(request.query.text, "glass");
        assert_eq!(sync.state().loaded_items, 0);
        assert_eq!(sync.state().total_pages, None);
        assert!(sync.state().has_more);
    }

    #[test]
    fn superseded_failure_does_not_push_page_below_one() {
        let mut sync = ListSynchronizer::new(5);
        let initial = sync.load_initial().unwrap();
        sync.complete(&initial, Ok(page_of(1..=5, 12, 3))).unwrap();
        let more = sync.load_more().unwrap();

        let _refresh = sync.set_filter(FilterChange::SortDir(SortDir::Desc));
        let _ = sync.complete(&more, Err(ApiError::Transport("late".into())));

        assert_eq!(sync.state().page, 1);
    }

    #[test]
    fn empty_batch_is_valid() {
        let mut sync = ListSynchronizer::new(5);
        let initial = sync.load_initial().unwrap();
        let batch = sync.complete(&initial, Ok(page_of(1..=0, 0, 0))).unwrap();
        assert!(batch.facilities.is_empty());
        assert_eq!(batch.mode, BatchMode::Replace);
        assert!(!sync.has_more());
    }
}
