//! List domain - query state, pagination and the bounded rendered list

pub mod rendered;
pub mod state;
pub mod synchronizer;

pub use self::rendered::RenderedList;
pub use self::state::SearchState;
pub use self::synchronizer::{
    Batch, BatchMode, FilterChange, ListSynchronizer, LoadFailure, LoadKind,
    PageRequest, SyncPhase,
};

use ecomap_contracts::prelude::ListRow;
use ecomap_model::Facility;

/// Placeholder shown when a refresh returns nothing.
pub const EMPTY_PLACEHOLDER: &str = "No facilities found";

pub fn list_row(facility: &Facility) -> ListRow {
    ListRow {
        id: facility.id,
        title: facility.title.clone(),
        category: facility.category_name.clone(),
        locality: facility.locality(),
        distance: facility.distance.map(|km| format!("{km:.1} km away")),
    }
}
