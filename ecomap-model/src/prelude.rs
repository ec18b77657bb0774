//! Client focused snapshot of the types surface.
//! Prefer importing from this module instead of individual tree nodes when
//! working in ecomap-client or other presentation layers.

pub use super::facility::{Category, Facility};
pub use super::geo::Point;
pub use super::ids::{CategoryId, FacilityId, StatusId, UserId};
pub use super::query::{
    DEFAULT_PAGE_LIMIT, FacilityPage, FacilityQuery, MAX_PAGE_LIMIT, SortDir,
    SortField,
};
pub use super::status::{StatusComment, StatusSubmitted, StatusUpdated};
pub use super::viewer::{Role, Viewer};
