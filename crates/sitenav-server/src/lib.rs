//! HTTP server for sitenav.
//!
//! Serves the website collection API under `/api/websites`, image uploads,
//! the favicon lookup endpoint, and uploaded images under `/images`.

pub mod config;
pub mod error;
pub mod forms;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;
pub mod uploads;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult, ServerError, ServerResult};
pub use server::SitenavServer;
pub use state::AppState;
