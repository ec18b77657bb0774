//! Ecomap client library
//!
//! This crate holds the incremental facility synchronization engine used by
//! the `ecomap` executable in `src/main.rs`: the location resolver, marker
//! bindings, list synchronizer, viewport loader and status panel, the
//! coordinator that ties them to the map, list and page surfaces, and the
//! message loop that executes their effects.
//!
//! Notes
//! - The coordinator never performs I/O itself; it returns [`Effect`]s that
//!   the [`Runtime`] turns into spawned futures.
//! - Surfaces are traits from `ecomap-contracts`; `infra::testing` carries
//!   recording implementations used by the integration tests.

pub mod coordinator;
pub mod domains;
pub mod infra;
pub mod messages;
pub mod runtime;

pub use coordinator::{EngineSettings, ViewCoordinator};
pub use messages::{Effect, Message};
pub use runtime::{Runtime, RuntimeHandle};
