//! View coordinator - owns the markers and rendered rows and routes every
//! message to the domain that handles it.

use crate::domains::list::{
    self, Batch, BatchMode, FilterChange, ListSynchronizer, LoadFailure,
    PageRequest, RenderedList,
};
use crate::domains::location::{LOCATED_ZOOM, LocationFix};
use crate::domains::map::{HighlightCallback, MarkerRegistry, PopupContext};
use crate::domains::statuses::{self, StatusPanel};
use crate::domains::viewport::{Trigger, ViewportLoader};
use crate::messages::{Effect, Message};
use ecomap_config::Config;
use ecomap_contracts::prelude::{
    ApiError, CategoryOption, ListSurface, MapSurface, Notice, NoticeId,
    NoticeLevel, PageShell,
};
use ecomap_model::{Category, Facility, FacilityId, Viewer};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// How long list error notices stay on screen.
pub const LIST_NOTICE_TTL: Duration = Duration::from_secs(5);
pub const LOCATION_LABEL: &str = "Your Current Location";

/// Tunables the coordinator needs from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub page_limit: u32,
    pub render_ceiling: usize,
    pub search_debounce: Duration,
    pub sentinel_threshold: f64,
    pub site_url: String,
    pub viewer: Viewer,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            page_limit: ecomap_model::query::DEFAULT_PAGE_LIMIT,
            render_ceiling: 100,
            search_debounce: Duration::from_millis(300),
            sentinel_threshold: 0.1,
            site_url: String::new(),
            viewer: Viewer::anonymous(),
        }
    }
}

impl EngineSettings {
    pub fn from_config(config: &Config, viewer: Viewer) -> Self {
        Self {
            page_limit: config.list.page_limit,
            render_ceiling: config.list.render_ceiling,
            search_debounce: config.list.search_debounce,
            sentinel_threshold: config.list.sentinel_threshold,
            site_url: config.api.site(),
            viewer,
        }
    }
}

pub struct ViewCoordinator {
    settings: EngineSettings,
    popup: PopupContext,
    map: Box<dyn MapSurface>,
    list: Box<dyn ListSurface>,
    shell: Box<dyn PageShell>,
    sync: ListSynchronizer,
    viewport: ViewportLoader,
    markers: MarkerRegistry,
    rendered: RenderedList,
    panel: StatusPanel,
    categories: Vec<Category>,
    pending_search: Option<String>,
    highlights: Arc<Mutex<Vec<FacilityId>>>,
    on_highlight: HighlightCallback,
    next_notice: u64,
}

impl fmt::Debug for ViewCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewCoordinator")
            .field("settings", &self.settings)
            .field("sync", &self.sync)
            .field("markers", &self.markers.len())
            .field("rendered", &self.rendered.len())
            .field("pending_search", &self.pending_search)
            .finish_non_exhaustive()
    }
}

impl ViewCoordinator {
    pub fn new(
        settings: EngineSettings,
        map: Box<dyn MapSurface>,
        list: Box<dyn ListSurface>,
        shell: Box<dyn PageShell>,
    ) -> Self {
        let highlights = Arc::new(Mutex::new(Vec::new()));
        let sink = highlights.clone();
        let on_highlight: HighlightCallback =
            Arc::new(move |id| sink.lock().push(id));

        Self {
            popup: PopupContext::new(
                settings.site_url.clone(),
                settings.viewer,
            ),
            sync: ListSynchronizer::new(settings.page_limit),
            viewport: ViewportLoader::new(settings.sentinel_threshold),
            rendered: RenderedList::new(settings.render_ceiling),
            markers: MarkerRegistry::new(),
            panel: StatusPanel::new(),
            categories: Vec::new(),
            pending_search: None,
            highlights,
            on_highlight,
            next_notice: 0,
            settings,
            map,
            list,
            shell,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn synchronizer(&self) -> &ListSynchronizer {
        &self.sync
    }

    pub fn markers(&self) -> &MarkerRegistry {
        &self.markers
    }

    pub fn rendered(&self) -> &RenderedList {
        &self.rendered
    }

    pub fn panel(&self) -> &StatusPanel {
        &self.panel
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Location and categories are requested together.
    pub fn start(&mut self) -> Vec<Effect> {
        info!("starting facility view");
        vec![Effect::ResolveLocation, Effect::FetchCategories]
    }

    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        match message {
            Message::LocationResolved(fix) => self.on_location(fix),
            Message::CategoriesLoaded(result) => {
                self.on_categories(result);
                Vec::new()
            }

            Message::SearchInput(text) => {
                self.pending_search = Some(text.clone());
                vec![Effect::Debounce {
                    text,
                    delay: self.settings.search_debounce,
                }]
            }
            Message::SearchDebounced(text) => {
                // A newer keystroke superseded this one.
                if self.pending_search.as_deref() != Some(text.as_str()) {
                    debug!(%text, "stale debounced search dropped");
                    return Vec::new();
                }
                self.pending_search = None;
                self.set_filter(FilterChange::Text(text))
            }
            Message::CategorySelected(category) => {
                self.set_filter(FilterChange::Category(category))
            }
            Message::SortFieldSelected(field) => {
                self.set_filter(FilterChange::SortField(field))
            }
            Message::SortDirSelected(dir) => {
                self.set_filter(FilterChange::SortDir(dir))
            }

            Message::SentinelVisibility(ratio) => {
                let request = self.viewport.on_sentinel(ratio, &mut self.sync);
                self.issue(request)
            }
            Message::LoadMoreClicked => self.request_more(Trigger::Manual),
            Message::PageLoaded { request, result } => {
                self.on_page_loaded(&request, result)
            }

            Message::MarkerClicked(id) => {
                self.on_marker_clicked(id);
                Vec::new()
            }
            Message::RowClicked(id) | Message::FacilitySelected(id) => {
                self.highlight_facility(id);
                Vec::new()
            }

            Message::OpenStatuses(id) => self.open_statuses(id),
            Message::StatusesLoaded {
                facility_id,
                result,
            } => self.on_statuses_loaded(facility_id, result),
            Message::SubmitStatus { facility_id, text } => {
                match statuses::normalize_comment(&text) {
                    Some(text) => vec![Effect::SubmitStatus { facility_id, text }],
                    None => {
                        debug!(%facility_id, "blank status comment ignored");
                        Vec::new()
                    }
                }
            }
            Message::StatusSubmitted {
                facility_id,
                result,
            } => match result {
                Ok(_) => {
                    self.shell.clear_comment_input();
                    let mut effects = vec![self.notify(
                        NoticeLevel::Success,
                        statuses::ADDED,
                        statuses::COMMENT_NOTICE_TTL,
                    )];
                    effects.push(Effect::FetchStatuses(facility_id));
                    effects
                }
                Err(err) => vec![self.comment_error(&err)],
            },
            Message::EditStatus(status_id) => {
                if self.panel.begin_edit(status_id, &self.settings.viewer) {
                    self.render_panel();
                }
                Vec::new()
            }
            Message::CancelEdit => self
                .panel
                .cancel_edit()
                .map(|id| vec![Effect::FetchStatuses(id)])
                .unwrap_or_default(),
            Message::UpdateStatus { status_id, text } => {
                match statuses::normalize_comment(&text) {
                    Some(text) => vec![Effect::UpdateStatus { status_id, text }],
                    None => Vec::new(),
                }
            }
            Message::StatusUpdated { status_id, result } => match result {
                Ok(_) => {
                    debug!(%status_id, "status comment updated");
                    let mut effects = vec![self.notify(
                        NoticeLevel::Success,
                        statuses::EDITED,
                        statuses::COMMENT_NOTICE_TTL,
                    )];
                    if let Some(id) = self.panel.cancel_edit() {
                        effects.push(Effect::FetchStatuses(id));
                    }
                    effects
                }
                Err(err) => vec![self.comment_error(&err)],
            },

            Message::DismissNotice(id) => {
                self.shell.dismiss_notice(id);
                Vec::new()
            }
            Message::Shutdown => Vec::new(),
        }
    }

    /// Issue page one unless a request is already in flight.
    pub fn load_initial(&mut self) -> Vec<Effect> {
        let request = self.sync.load_initial();
        self.issue(request)
    }

    /// Same path for the sentinel and the load-more button.
    pub fn request_more(&mut self, trigger: Trigger) -> Vec<Effect> {
        let request = self.viewport.request_more(trigger, &mut self.sync);
        self.issue(request)
    }

    pub fn set_filter(&mut self, change: FilterChange) -> Vec<Effect> {
        let request = self.sync.set_filter(change);
        self.issue(Some(request))
    }

    /// Pan to the marker, open its popup and mark its row active.
    ///
    /// Returns false when no marker exists for `id`.
    pub fn highlight_facility(&mut self, id: FacilityId) -> bool {
        let Some(marker) = self.markers.get(id) else {
            debug!(%id, "highlight requested for unknown facility");
            return false;
        };
        self.map.set_view(marker.position(), LOCATED_ZOOM);
        marker.open_popup(self.map.as_mut());

        let active = self.rendered.set_active(id);
        self.list.set_active(active);
        if let Some(id) = active {
            self.list.scroll_into_view(id);
        }
        true
    }

    fn on_location(&mut self, fix: LocationFix) -> Vec<Effect> {
        info!(point = %fix.point, source = ?fix.source, "initial viewpoint");
        self.map.set_view(fix.point, fix.zoom());
        self.map.add_location_indicator(fix.point, LOCATION_LABEL);
        self.load_initial()
    }

    fn on_categories(&mut self, result: Result<Vec<Category>, ApiError>) {
        match result {
            Ok(categories) => {
                let mut options = vec![CategoryOption::all_categories()];
                options.extend(categories.iter().map(|c| CategoryOption {
                    value: Some(c.id),
                    label: c.name.clone(),
                }));
                self.shell.set_categories(&options);
                self.categories = categories;
            }
            Err(err) => warn!(error = %err, "failed to load categories"),
        }
    }

    fn issue(&mut self, request: Option<PageRequest>) -> Vec<Effect> {
        let Some(request) = request else {
            return Vec::new();
        };
        if request.kind == list::LoadKind::Initial {
            self.rendered.clear();
            self.list.clear_rows();
        }
        self.shell.set_loading(true);
        self.refresh_button();
        vec![Effect::FetchPage(request)]
    }

    fn on_page_loaded(
        &mut self,
        request: &PageRequest,
        result: Result<ecomap_model::FacilityPage, ApiError>,
    ) -> Vec<Effect> {
        let outcome = self.sync.complete(request, result);
        self.shell.set_loading(self.sync.is_loading());

        let effects = match outcome {
            Ok(batch) => {
                self.apply_batch(batch);
                self.shell.set_status_line(&self.sync.state().status_line());
                Vec::new()
            }
            Err(failure) => vec![self.list_error(&failure)],
        };
        self.refresh_button();
        effects
    }

    fn apply_batch(&mut self, batch: Batch) {
        match batch.mode {
            BatchMode::Replace => self.apply_replace(batch.facilities),
            BatchMode::Append => self.apply_append(batch.facilities),
        }
    }

    fn apply_replace(&mut self, facilities: Vec<Facility>) {
        self.markers.clear(self.map.as_mut());
        self.upsert_markers(&facilities);

        let added = self.rendered.replace(facilities.iter().map(|f| f.id));
        if facilities.is_empty() {
            self.list.show_placeholder(list::EMPTY_PLACEHOLDER);
            return;
        }
        let rows: Vec<_> = rows_for(&facilities, &added);
        self.list.replace_rows(&rows);
        let evicted = self.rendered.evict_overflow();
        if evicted > 0 {
            self.list.remove_oldest(evicted);
        }
    }

    fn apply_append(&mut self, facilities: Vec<Facility>) {
        self.upsert_markers(&facilities);

        let added = self.rendered.append(facilities.iter().map(|f| f.id));
        if !added.is_empty() {
            let rows: Vec<_> = rows_for(&facilities, &added);
            self.list.append_rows(&rows);
        }

        let evicted = self.rendered.evict_overflow();
        if evicted > 0 {
            debug!(evicted, ceiling = self.rendered.ceiling(), "evicted oldest rows");
            self.list.remove_oldest(evicted);
            if self.rendered.active().is_none() {
                self.list.set_active(None);
            }
        }
    }

    fn upsert_markers(&mut self, facilities: &[Facility]) {
        for facility in facilities {
            self.markers.upsert(
                facility.clone(),
                &self.popup,
                self.map.as_mut(),
                &self.on_highlight,
            );
        }
    }

    fn on_marker_clicked(&mut self, id: FacilityId) {
        let Some(marker) = self.markers.get(id) else {
            return;
        };
        marker.handle_click(self.map.as_mut());
        let requested: Vec<FacilityId> =
            std::mem::take(&mut *self.highlights.lock());
        for id in requested {
            self.highlight_facility(id);
        }
    }

    fn open_statuses(&mut self, id: FacilityId) -> Vec<Effect> {
        let Some(marker) = self.markers.get(id) else {
            debug!(%id, "status panel requested for unknown facility");
            return Vec::new();
        };
        self.panel.open(marker.facility());
        vec![Effect::FetchStatuses(id)]
    }

    fn on_statuses_loaded(
        &mut self,
        facility_id: FacilityId,
        result: Result<Vec<ecomap_model::StatusComment>, ApiError>,
    ) -> Vec<Effect> {
        match result {
            Ok(comments) => {
                if self.panel.loaded(facility_id, comments) {
                    self.render_panel();
                }
                Vec::new()
            }
            Err(err) => {
                warn!(%facility_id, error = %err, "failed to load statuses");
                vec![self.notify(
                    NoticeLevel::Error,
                    statuses::LOAD_FAILED,
                    statuses::COMMENT_NOTICE_TTL,
                )]
            }
        }
    }

    fn render_panel(&mut self) {
        if let Some(view) = self.panel.view(&self.settings.viewer) {
            self.shell.render_status_panel(&view);
        }
    }

    fn refresh_button(&mut self) {
        self.shell
            .set_load_more_button(ViewportLoader::button(&self.sync));
    }

    fn list_error(&mut self, failure: &LoadFailure) -> Effect {
        self.notify(NoticeLevel::Error, failure.notice(), LIST_NOTICE_TTL)
    }

    fn comment_error(&mut self, err: &ApiError) -> Effect {
        warn!(error = %err, "status comment action failed");
        self.notify(
            NoticeLevel::Error,
            &format!("Error: {}", err.user_message()),
            statuses::COMMENT_NOTICE_TTL,
        )
    }

    fn notify(
        &mut self,
        level: NoticeLevel,
        message: &str,
        ttl: Duration,
    ) -> Effect {
        self.next_notice += 1;
        let notice = Notice {
            id: NoticeId(self.next_notice),
            level,
            message: message.to_string(),
            ttl,
        };
        self.shell.show_notice(&notice);
        Effect::ExpireNotice {
            id: notice.id,
            after: ttl,
        }
    }
}

fn rows_for(
    facilities: &[Facility],
    ids: &[FacilityId],
) -> Vec<ecomap_contracts::prelude::ListRow> {
    ids.iter()
        .filter_map(|id| facilities.iter().find(|f| f.id == *id))
        .map(list::list_row)
        .collect()
}
