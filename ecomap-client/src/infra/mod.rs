//! Infrastructure module: concrete collaborators for the engine
//!
//! - `api_client`: the HTTP facility backend
//! - `adapters`: terminal renderings of the map, list and page shell
//! - `testing`: recording surfaces and scripted collaborators

pub mod adapters;
pub mod api_client;
pub mod testing;

pub use adapters::{StaticSensor, TerminalList, TerminalMap, TerminalShell};
pub use api_client::HttpFacilityApi;
