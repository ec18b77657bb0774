//! Trait surfaces that describe the collaborators of the Ecomap engine.
//!
//! The engine never talks to a network stack, a positioning device or a
//! renderer directly. Each of those sits behind one of the traits below so
//! the synchronization logic can run against recording fakes in tests and
//! against real adapters in the binary.

pub mod api;
pub mod error;
pub mod sensor;
pub mod surface;
pub mod view;

/// Frequently used contracts for the client crate.
pub mod prelude {
    pub use super::api::{ApiResult, FacilityApi};
    pub use super::error::{ApiError, SensorError};
    pub use super::sensor::{LocationSensor, SensorOptions};
    pub use super::surface::{ListSurface, MapSurface, OverlayHandle, PageShell};
    pub use super::view::{
        CategoryOption, CommentView, ListRow, LoadMoreButton, Notice,
        NoticeId, NoticeLevel, StatusPanelView,
    };
}

#[cfg(feature = "mock")]
pub use api::MockFacilityApi;
#[cfg(feature = "mock")]
pub use sensor::MockLocationSensor;
