use super::popup::{self, PopupContext};
use ecomap_contracts::prelude::{MapSurface, OverlayHandle};
use ecomap_model::{Facility, FacilityId, Point};
use std::fmt;
use std::sync::Arc;

pub type HighlightCallback = Arc<dyn Fn(FacilityId) + Send + Sync>;

/// One facility bound to one map overlay and its popup.
pub struct FacilityMarker {
    facility: Facility,
    handle: OverlayHandle,
    popup_version: u32,
    on_highlight: HighlightCallback,
}

impl fmt::Debug for FacilityMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FacilityMarker")
            .field("id", &self.facility.id)
            .field("handle", &self.handle)
            .field("popup_version", &self.popup_version)
            .finish_non_exhaustive()
    }
}

impl FacilityMarker {
    /// Create the overlay, bind its popup and attach it to the map.
    pub fn new(
        facility: Facility,
        ctx: &PopupContext,
        map: &mut dyn MapSurface,
        on_highlight: HighlightCallback,
    ) -> Self {
        let html = popup::render(&facility, ctx);
        let handle = map.create_overlay(facility.position(), &html);
        map.attach(handle);

        Self {
            facility,
            handle,
            popup_version: 1,
            on_highlight,
        }
    }

    pub fn id(&self) -> FacilityId {
        self.facility.id
    }

    pub fn facility(&self) -> &Facility {
        &self.facility
    }

    pub fn handle(&self) -> OverlayHandle {
        self.handle
    }

    pub fn popup_version(&self) -> u32 {
        self.popup_version
    }

    pub fn position(&self) -> Point {
        self.facility.position()
    }

    /// Overlay click: open the popup, then report the highlight.
    pub fn handle_click(&self, map: &mut dyn MapSurface) {
        self.open_popup(map);
        (self.on_highlight)(self.facility.id);
    }

    /// Swap in a replacement record and regenerate popup markup in place.
    pub fn update_content(
        &mut self,
        facility: Facility,
        ctx: &PopupContext,
        map: &mut dyn MapSurface,
    ) {
        self.facility = facility;
        let html = popup::render(&self.facility, ctx);
        map.set_popup_content(self.handle, &html);
        self.popup_version += 1;
    }

    pub fn set_visible(&self, visible: bool, map: &mut dyn MapSurface) {
        let attached = map.is_attached(self.handle);
        if visible && !attached {
            map.attach(self.handle);
        } else if !visible && attached {
            map.detach(self.handle);
        }
    }

    pub fn open_popup(&self, map: &mut dyn MapSurface) {
        map.open_popup(self.handle);
    }

    pub fn close_popup(&self, map: &mut dyn MapSurface) {
        map.close_popup(self.handle);
    }

    /// Detach and release the overlay.
    pub fn destroy(self, map: &mut dyn MapSurface) {
        map.destroy(self.handle);
    }
}
