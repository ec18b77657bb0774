use crate::view::{
    CategoryOption, ListRow, LoadMoreButton, Notice, NoticeId, StatusPanelView,
};
use ecomap_model::{FacilityId, Point};

/// Opaque reference to one overlay owned by a [`MapSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayHandle(pub u64);

/// Map rendering capability: overlays, popups and the viewpoint.
pub trait MapSurface: Send {
    /// Create a detached overlay at `at` with bound popup markup.
    fn create_overlay(&mut self, at: Point, popup_html: &str) -> OverlayHandle;

    fn attach(&mut self, handle: OverlayHandle);

    fn detach(&mut self, handle: OverlayHandle);

    fn is_attached(&self, handle: OverlayHandle) -> bool;

    /// Detach (if needed) and release the overlay.
    fn destroy(&mut self, handle: OverlayHandle);

    fn set_popup_content(&mut self, handle: OverlayHandle, html: &str);

    fn open_popup(&mut self, handle: OverlayHandle);

    fn close_popup(&mut self, handle: OverlayHandle);

    fn set_view(&mut self, center: Point, zoom: u8);

    /// Marker showing where the viewer is, with an opened popup label.
    fn add_location_indicator(&mut self, at: Point, label: &str);
}

/// The scrollable facility list. Rows always sit before the sentinel.
pub trait ListSurface: Send {
    fn replace_rows(&mut self, rows: &[ListRow]);

    fn append_rows(&mut self, rows: &[ListRow]);

    /// Remove `count` rows from the top of the list.
    fn remove_oldest(&mut self, count: usize);

    fn clear_rows(&mut self);

    fn show_placeholder(&mut self, message: &str);

    /// Mark exactly one row active; `None` clears the active marker.
    fn set_active(&mut self, id: Option<FacilityId>);

    fn scroll_into_view(&mut self, id: FacilityId);
}

/// Everything on the page that is neither the map nor the list.
pub trait PageShell: Send {
    fn set_categories(&mut self, options: &[CategoryOption]);

    fn set_loading(&mut self, loading: bool);

    fn set_load_more_button(&mut self, button: LoadMoreButton);

    fn set_status_line(&mut self, text: &str);

    fn show_notice(&mut self, notice: &Notice);

    fn dismiss_notice(&mut self, id: NoticeId);

    fn render_status_panel(&mut self, panel: &StatusPanelView);

    fn clear_comment_input(&mut self);
}
