//! Testing infrastructure for the Ecomap engine
//!
//! - **Surfaces**: `RecordingMap`, `RecordingList` and `RecordingShell`
//!   implement the render traits and keep every call for assertions. They are
//!   cheap clones over shared state, so a test can hand one copy to the
//!   coordinator and inspect another.
//! - **Stubs**: `ScriptedApi` and `ScriptedSensor` replay queued responses
//!   with optional delays, recording when each call was made.
//! - **Fixtures**: small constructors for facilities, pages and comments.

pub mod fixtures;
pub mod stubs;
pub mod surfaces;

pub use fixtures::{category, comment, facility, page_of};
pub use stubs::{ApiCall, ScriptedApi, ScriptedSensor};
pub use surfaces::{RecordingList, RecordingMap, RecordingShell};
