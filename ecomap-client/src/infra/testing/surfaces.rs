use ecomap_contracts::prelude::{
    CategoryOption, ListRow, ListSurface, LoadMoreButton, MapSurface, Notice,
    NoticeId, OverlayHandle, PageShell, StatusPanelView,
};
use ecomap_model::{FacilityId, Point};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct Overlay {
    at: Point,
    html: String,
    attached: bool,
}

#[derive(Debug, Default)]
struct MapState {
    next_handle: u64,
    overlays: BTreeMap<OverlayHandle, Overlay>,
    created: usize,
    attach_calls: usize,
    detach_calls: usize,
    opened_popup: Option<OverlayHandle>,
    views: Vec<(Point, u8)>,
    indicators: Vec<(Point, String)>,
}

/// In-memory [`MapSurface`] that remembers overlays and viewpoint changes.
#[derive(Debug, Clone, Default)]
pub struct RecordingMap {
    state: Arc<Mutex<MapState>>,
}

impl RecordingMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlays_created(&self) -> usize {
        self.state.lock().created
    }

    /// Overlays that exist and are attached.
    pub fn live_overlays(&self) -> usize {
        self.state
            .lock()
            .overlays
            .values()
            .filter(|overlay| overlay.attached)
            .count()
    }

    pub fn attach_calls(&self) -> usize {
        self.state.lock().attach_calls
    }

    pub fn detach_calls(&self) -> usize {
        self.state.lock().detach_calls
    }

    pub fn popup_html(&self, handle: OverlayHandle) -> Option<String> {
        self.state
            .lock()
            .overlays
            .get(&handle)
            .map(|overlay| overlay.html.clone())
    }

    pub fn overlay_position(&self, handle: OverlayHandle) -> Option<Point> {
        self.state.lock().overlays.get(&handle).map(|o| o.at)
    }

    /// The popup currently open, if any.
    pub fn opened_popup(&self) -> Option<OverlayHandle> {
        self.state.lock().opened_popup
    }

    pub fn views(&self) -> Vec<(Point, u8)> {
        self.state.lock().views.clone()
    }

    pub fn last_view(&self) -> Option<(Point, u8)> {
        self.state.lock().views.last().copied()
    }

    pub fn indicators(&self) -> Vec<(Point, String)> {
        self.state.lock().indicators.clone()
    }
}

impl MapSurface for RecordingMap {
    fn create_overlay(&mut self, at: Point, popup_html: &str) -> OverlayHandle {
        let mut state = self.state.lock();
        state.next_handle += 1;
        state.created += 1;
        let handle = OverlayHandle(state.next_handle);
        state.overlays.insert(
            handle,
            Overlay {
                at,
                html: popup_html.to_string(),
                attached: false,
            },
        );
        handle
    }

    fn attach(&mut self, handle: OverlayHandle) {
        let mut state = self.state.lock();
        state.attach_calls += 1;
        if let Some(overlay) = state.overlays.get_mut(&handle) {
            overlay.attached = true;
        }
    }

    fn detach(&mut self, handle: OverlayHandle) {
        let mut state = self.state.lock();
        state.detach_calls += 1;
        if let Some(overlay) = state.overlays.get_mut(&handle) {
            overlay.attached = false;
        }
    }

    fn is_attached(&self, handle: OverlayHandle) -> bool {
        self.state
            .lock()
            .overlays
            .get(&handle)
            .is_some_and(|overlay| overlay.attached)
    }

    fn destroy(&mut self, handle: OverlayHandle) {
        let mut state = self.state.lock();
        state.overlays.remove(&handle);
        if state.opened_popup == Some(handle) {
            state.opened_popup = None;
        }
    }

    fn set_popup_content(&mut self, handle: OverlayHandle, html: &str) {
        if let Some(overlay) = self.state.lock().overlays.get_mut(&handle) {
            overlay.html = html.to_string();
        }
    }

    fn open_popup(&mut self, handle: OverlayHandle) {
        self.state.lock().opened_popup = Some(handle);
    }

    fn close_popup(&mut self, handle: OverlayHandle) {
        let mut state = self.state.lock();
        if state.opened_popup == Some(handle) {
            state.opened_popup = None;
        }
    }

    fn set_view(&mut self, center: Point, zoom: u8) {
        self.state.lock().views.push((center, zoom));
    }

    fn add_location_indicator(&mut self, at: Point, label: &str) {
        self.state.lock().indicators.push((at, label.to_string()));
    }
}

#[derive(Debug, Default)]
struct ListState {
    rows: Vec<ListRow>,
    placeholder: Option<String>,
    active: Option<FacilityId>,
    scrolled: Vec<FacilityId>,
    removed: usize,
}

/// In-memory [`ListSurface`].
#[derive(Debug, Clone, Default)]
pub struct RecordingList {
    state: Arc<Mutex<ListState>>,
}

impl RecordingList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> Vec<ListRow> {
        self.state.lock().rows.clone()
    }

    pub fn row_ids(&self) -> Vec<FacilityId> {
        self.state.lock().rows.iter().map(|row| row.id).collect()
    }

    pub fn len(&self) -> usize {
        self.state.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().rows.is_empty()
    }

    pub fn placeholder(&self) -> Option<String> {
        self.state.lock().placeholder.clone()
    }

    pub fn active(&self) -> Option<FacilityId> {
        self.state.lock().active
    }

    pub fn scrolled(&self) -> Vec<FacilityId> {
        self.state.lock().scrolled.clone()
    }

    /// Total rows removed from the head so far.
    pub fn removed(&self) -> usize {
        self.state.lock().removed
    }
}

impl ListSurface for RecordingList {
    fn replace_rows(&mut self, rows: &[ListRow]) {
        let mut state = self.state.lock();
        state.rows = rows.to_vec();
        state.placeholder = None;
    }

    fn append_rows(&mut self, rows: &[ListRow]) {
        let mut state = self.state.lock();
        state.rows.extend_from_slice(rows);
        state.placeholder = None;
    }

    fn remove_oldest(&mut self, count: usize) {
        let mut state = self.state.lock();
        let count = count.min(state.rows.len());
        state.rows.drain(..count);
        state.removed += count;
    }

    fn clear_rows(&mut self) {
        let mut state = self.state.lock();
        state.rows.clear();
        state.placeholder = None;
    }

    fn show_placeholder(&mut self, message: &str) {
        let mut state = self.state.lock();
        state.rows.clear();
        state.placeholder = Some(message.to_string());
    }

    fn set_active(&mut self, id: Option<FacilityId>) {
        self.state.lock().active = id;
    }

    fn scroll_into_view(&mut self, id: FacilityId) {
        self.state.lock().scrolled.push(id);
    }
}

#[derive(Debug, Default)]
struct ShellState {
    categories: Vec<CategoryOption>,
    loading: Vec<bool>,
    buttons: Vec<LoadMoreButton>,
    status_lines: Vec<String>,
    notices: Vec<Notice>,
    dismissed: Vec<NoticeId>,
    panels: Vec<StatusPanelView>,
    inputs_cleared: usize,
}

/// In-memory [`PageShell`].
#[derive(Debug, Clone, Default)]
pub struct RecordingShell {
    state: Arc<Mutex<ShellState>>,
}

impl RecordingShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> Vec<CategoryOption> {
        self.state.lock().categories.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().loading.last().copied().unwrap_or(false)
    }

    pub fn button(&self) -> Option<LoadMoreButton> {
        self.state.lock().buttons.last().copied()
    }

    pub fn status_line(&self) -> Option<String> {
        self.state.lock().status_lines.last().cloned()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.state.lock().notices.clone()
    }

    /// Notices shown and not yet dismissed.
    pub fn visible_notices(&self) -> Vec<Notice> {
        let state = self.state.lock();
        state
            .notices
            .iter()
            .filter(|notice| !state.dismissed.contains(&notice.id))
            .cloned()
            .collect()
    }

    pub fn dismissed(&self) -> Vec<NoticeId> {
        self.state.lock().dismissed.clone()
    }

    pub fn last_panel(&self) -> Option<StatusPanelView> {
        self.state.lock().panels.last().cloned()
    }

    pub fn inputs_cleared(&self) -> usize {
        self.state.lock().inputs_cleared
    }
}

impl PageShell for RecordingShell {
    fn set_categories(&mut self, options: &[CategoryOption]) {
        self.state.lock().categories = options.to_vec();
    }

    fn set_loading(&mut self, loading: bool) {
        self.state.lock().loading.push(loading);
    }

    fn set_load_more_button(&mut self, button: LoadMoreButton) {
        self.state.lock().buttons.push(button);
    }

    fn set_status_line(&mut self, text: &str) {
        self.state.lock().status_lines.push(text.to_string());
    }

    fn show_notice(&mut self, notice: &Notice) {
        self.state.lock().notices.push(notice.clone());
    }

    fn dismiss_notice(&mut self, id: NoticeId) {
        self.state.lock().dismissed.push(id);
    }

    fn render_status_panel(&mut self, panel: &StatusPanelView) {
        self.state.lock().panels.push(panel.clone());
    }

    fn clear_comment_input(&mut self) {
        self.state.lock().inputs_cleared += 1;
    }
}
