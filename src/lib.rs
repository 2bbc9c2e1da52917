//! airways - airport service REST API
//!
//! User accounts with bearer-token auth, a catalog of airports, routes,
//! airplanes, crews and flights, and user-scoped ticket orders.

pub mod auth;
pub mod catalog;
pub mod cli;
pub mod http;
pub mod observability;
