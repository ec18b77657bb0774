//! Terminal adapters used by the `ecomap` binary
//!
//! The map is not drawn; overlay and viewpoint changes are logged. The list
//! and page shell print what a reader of the page would see.

use async_trait::async_trait;
use ecomap_contracts::prelude::{
    CategoryOption, ListRow, ListSurface, LoadMoreButton, LocationSensor,
    MapSurface, Notice, NoticeId, NoticeLevel, OverlayHandle, PageShell,
    SensorError, SensorOptions, StatusPanelView,
};
use ecomap_model::{FacilityId, Point};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct TerminalMap {
    next_handle: u64,
    overlays: HashMap<OverlayHandle, Point>,
    attached: HashSet<OverlayHandle>,
}

impl TerminalMap {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MapSurface for TerminalMap {
    fn create_overlay(&mut self, at: Point, _popup_html: &str) -> OverlayHandle {
        self.next_handle += 1;
        let handle = OverlayHandle(self.next_handle);
        self.overlays.insert(handle, at);
        handle
    }

    fn attach(&mut self, handle: OverlayHandle) {
        self.attached.insert(handle);
    }

    fn detach(&mut self, handle: OverlayHandle) {
        self.attached.remove(&handle);
    }

    fn is_attached(&self, handle: OverlayHandle) -> bool {
        self.attached.contains(&handle)
    }

    fn destroy(&mut self, handle: OverlayHandle) {
        self.attached.remove(&handle);
        self.overlays.remove(&handle);
    }

    fn set_popup_content(&mut self, handle: OverlayHandle, _html: &str) {
        debug!(?handle, "popup content replaced");
    }

    fn open_popup(&mut self, handle: OverlayHandle) {
        if let Some(at) = self.overlays.get(&handle) {
            info!(?handle, position = %at, "popup opened");
        }
    }

    fn close_popup(&mut self, handle: OverlayHandle) {
        debug!(?handle, "popup closed");
    }

    fn set_view(&mut self, center: Point, zoom: u8) {
        info!(%center, zoom, "map view set");
    }

    fn add_location_indicator(&mut self, at: Point, label: &str) {
        info!(position = %at, label, "location indicator added");
    }
}

#[derive(Debug, Default)]
pub struct TerminalList {
    rows: usize,
}

impl TerminalList {
    pub fn new() -> Self {
        Self::default()
    }

    fn print(row: &ListRow) {
        let distance = row
            .distance
            .as_deref()
            .map(|d| format!(" ({d})"))
            .unwrap_or_default();
        println!(
            "  #{:<5} {} [{}] {}{}",
            row.id, row.title, row.category, row.locality, distance
        );
    }
}

impl ListSurface for TerminalList {
    fn replace_rows(&mut self, rows: &[ListRow]) {
        println!("--- facilities ---");
        rows.iter().for_each(Self::print);
        self.rows = rows.len();
    }

    fn append_rows(&mut self, rows: &[ListRow]) {
        rows.iter().for_each(Self::print);
        self.rows += rows.len();
    }

    fn remove_oldest(&mut self, count: usize) {
        self.rows = self.rows.saturating_sub(count);
        debug!(count, remaining = self.rows, "oldest rows removed");
    }

    fn clear_rows(&mut self) {
        self.rows = 0;
    }

    fn show_placeholder(&mut self, message: &str) {
        self.rows = 0;
        println!("  {message}");
    }

    fn set_active(&mut self, id: Option<FacilityId>) {
        debug!(?id, "active row");
    }

    fn scroll_into_view(&mut self, id: FacilityId) {
        debug!(%id, "row scrolled into view");
    }
}

#[derive(Debug, Default)]
pub struct TerminalShell;

impl PageShell for TerminalShell {
    fn set_categories(&mut self, options: &[CategoryOption]) {
        let labels: Vec<&str> =
            options.iter().map(|option| option.label.as_str()).collect();
        info!(categories = %labels.join(", "), "category filter populated");
    }

    fn set_loading(&mut self, loading: bool) {
        debug!(loading, "loading indicator");
    }

    fn set_load_more_button(&mut self, button: LoadMoreButton) {
        debug!(label = button.label(), enabled = button.enabled(), "load more");
    }

    fn set_status_line(&mut self, text: &str) {
        println!("{text}");
    }

    fn show_notice(&mut self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Success => println!("[ok] {}", notice.message),
            NoticeLevel::Error => eprintln!("[error] {}", notice.message),
        }
    }

    fn dismiss_notice(&mut self, id: NoticeId) {
        debug!(?id, "notice dismissed");
    }

    fn render_status_panel(&mut self, panel: &StatusPanelView) {
        println!("--- {} ({}) ---", panel.title, panel.category);
        if let Some(empty) = &panel.empty_message {
            println!("  {empty}");
        }
        for view in &panel.comments {
            let marker = if view.editing { "*" } else { " " };
            println!(
                " {marker}#{} {}: {}",
                view.comment.id, view.comment.author_name, view.comment.text
            );
        }
    }

    fn clear_comment_input(&mut self) {}
}

/// Sensor that always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct StaticSensor(pub Point);

#[async_trait]
impl LocationSensor for StaticSensor {
    async fn current_position(
        &self,
        _options: SensorOptions,
    ) -> Result<Point, SensorError> {
        Ok(self.0)
    }
}
