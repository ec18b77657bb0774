//! Core data model definitions shared across Ecomap crates.
#![allow(missing_docs)]

pub mod error;
pub mod facility;
pub mod geo;
pub mod ids;
pub mod prelude;
pub mod query;
#[cfg(feature = "serde")]
mod serde_helpers;
pub mod status;
pub mod viewer;

// Intentionally curated re-exports for downstream consumers.
pub use error::{ModelError, Result as ModelResult};
pub use facility::{Category, Facility};
pub use geo::Point;
pub use ids::{CategoryId, FacilityId, StatusId, UserId};
pub use query::{FacilityPage, FacilityQuery, SortDir, SortField};
pub use status::{StatusComment, StatusSubmitted, StatusUpdated};
pub use viewer::{Role, Viewer};
