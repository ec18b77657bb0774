//! Map domain - facility markers and the registry that owns them

pub mod marker;
pub mod popup;

pub use self::marker::{FacilityMarker, HighlightCallback};
pub use self::popup::PopupContext;

use ecomap_contracts::prelude::MapSurface;
use ecomap_model::{Facility, FacilityId};
use std::collections::HashMap;

/// Live markers keyed by facility id; never more than one per id.
#[derive(Debug, Default)]
pub struct MarkerRegistry {
    markers: HashMap<FacilityId, FacilityMarker>,
}

/// What [`MarkerRegistry::upsert`] did with a facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Created,
    Refreshed,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn contains(&self, id: FacilityId) -> bool {
        self.markers.contains_key(&id)
    }

    pub fn get(&self, id: FacilityId) -> Option<&FacilityMarker> {
        self.markers.get(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = FacilityId> + '_ {
        self.markers.keys().copied()
    }

    /// Create a marker for a new id, or refresh the popup of an existing one.
    pub fn upsert(
        &mut self,
        facility: Facility,
        ctx: &PopupContext,
        map: &mut dyn MapSurface,
        on_highlight: &HighlightCallback,
    ) -> Upsert {
        if let Some(existing) = self.markers.get_mut(&facility.id) {
            existing.update_content(facility, ctx, map);
            return Upsert::Refreshed;
        }

        let id = facility.id;
        let marker =
            FacilityMarker::new(facility, ctx, map, on_highlight.clone());
        self.markers.insert(id, marker);
        Upsert::Created
    }

    /// Detach and drop every marker.
    pub fn clear(&mut self, map: &mut dyn MapSurface) {
        for (_, marker) in self.markers.drain() {
            marker.destroy(map);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::testing::{RecordingMap, facility};
    use ecomap_model::Viewer;
    use std::sync::Arc;

    #[test]
    fn repeated_ids_refresh_instead_of_duplicating() {
        let mut map = RecordingMap::new();
        let mut registry = MarkerRegistry::new();
        let ctx = PopupContext::new("", Viewer::anonymous());
        let noop: HighlightCallback = Arc::new(|_| {});

        assert_eq!(
            registry.upsert(facility(1), &ctx, &mut map, &noop),
            Upsert::Created
        );
        assert_eq!(
            registry.upsert(facility(1), &ctx, &mut map, &noop),
            Upsert::Refreshed
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(map.live_overlays(), 1);
        assert_eq!(
            registry.get(FacilityId(1)).map(|m| m.popup_version()),
            Some(2)
        );
    }

    #[test]
    fn clear_destroys_overlays() {
        let mut map = RecordingMap::new();
        let mut registry = MarkerRegistry::new();
        let ctx = PopupContext::new("", Viewer::anonymous());
        let noop: HighlightCallback = Arc::new(|_| {});
        for id in 1..=3 {
            registry.upsert(facility(id), &ctx, &mut map, &noop);
        }

        registry.clear(&mut map);

        assert!(registry.is_empty());
        assert_eq!(map.live_overlays(), 0);
    }
}
