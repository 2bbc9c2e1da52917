//! # Catalog Module
//!
//! The airport domain: airports, routes, airplane types, airplanes, crews,
//! flights, and ticket orders, backed by a thread-safe in-memory store.

pub mod errors;
pub mod filter;
pub mod models;
pub mod store;

pub use errors::{CatalogError, CatalogResult};
pub use filter::{
    AirplaneFilter, AirplaneTypeFilter, AirportFilter, CrewFilter, FlightFilter, Page, RouteFilter,
};
pub use models::{
    Airplane, AirplaneCreate, AirplaneType, AirplaneTypeCreate, AirplaneTypeUpdate, AirplaneUpdate,
    AirplaneView, Airport, AirportCreate, AirportUpdate, Crew, CrewCreate, CrewUpdate, Flight,
    FlightCreate, FlightDetail, FlightUpdate, FlightView, Order, OrderCreate, Route, RouteCreate,
    RouteDetail, RouteUpdate, RouteView, TakenSeat, Ticket, TicketCreate,
};
pub use store::{CatalogStore, Listing};
