//! Web layer for the gazetteer server.
//!
//! Provides the region comment pages, the location search page and the JSON
//! search and resolution endpoints.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, HomeRegion};
