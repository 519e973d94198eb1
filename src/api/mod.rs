//! HTTP API module for the Coverage Engine.
//!
//! This module exposes the roster commands (add entry, remove last, clear)
//! and the coverage report as REST endpoints. Each session owns its own
//! roster.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::AddEntryRequest;
pub use response::{ApiError, EntryAdded, ModelsResponse, RosterChanged, SessionCreated};
pub use state::{AppState, SessionStore};
