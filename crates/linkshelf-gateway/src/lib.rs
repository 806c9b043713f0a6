//! HTTP gateway of the linkshelf URL shortener.
//!
//! Serves the `/api/links` resource, operational endpoints and the alias
//! redirects on a single axum router.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod openapi;
pub mod pagination;
pub mod state;

pub use app::App;
pub use state::AppState;
