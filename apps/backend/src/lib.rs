//! Cassino: a two-player fishing card game served over HTTP.
//!
//! The `domain` module is a pure rules engine; `services` binds it to the
//! versioned room store; `routes` exposes the operations as JSON endpoints.

#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod utils;

pub use config::{AppConfig, GameConfig};
pub use error::AppError;
pub use errors::ErrorCode;
pub use middleware::request_span::RequestSpan;
pub use services::rooms::{DeckSource, RoomService};
pub use state::app_state::AppState;
pub use store::{InMemoryRoomStore, RoomStore};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
