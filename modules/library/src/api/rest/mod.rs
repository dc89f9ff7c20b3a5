//! REST surface: `/api/<resource>` CRUD routes over the domain service.
//!
//! Handlers authorize first, then build a query plan from the raw query
//! string (any rejection is a 400 naming the offending parameter), then call
//! the service and render the records through the resource's contract.

pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod presenters;
pub mod render;
pub mod routes;
pub mod state;

pub use presenters::Presenters;
pub use routes::router;
pub use state::AppState;
