//! # HTTP Module
//!
//! The REST surface: routers, shared state, configuration, and response
//! envelopes.

pub mod catalog_routes;
pub mod config;
pub mod order_routes;
pub mod response;
pub mod server;
pub mod state;
pub mod user_routes;

pub use config::HttpServerConfig;
pub use response::{ApiError, ErrorResponse, ListResponse};
pub use server::HttpServer;
pub use state::{ApiState, SEED_SUPERUSER_EMAIL, SEED_SUPERUSER_PASSWORD};
