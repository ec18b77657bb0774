//! Domain modules for the Ecomap client
//!
//! Each domain owns one slice of engine state and exposes plain methods; the
//! coordinator decides when to call them and which surfaces to touch.

pub mod list;
pub mod location;
pub mod map;
pub mod statuses;
pub mod viewport;
