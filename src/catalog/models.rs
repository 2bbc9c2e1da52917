//! # Catalog Models
//!
//! Records for the airport domain: airports, airplane types, airplanes,
//! routes, crews, flights, and ticket orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An airport, identified by name plus its closest big city
/// (unique together)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airport {
    pub id: Uuid,
    pub name: String,
    pub closest_big_city: String,
}

/// A class of airplane (e.g. "Wide-Body")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirplaneType {
    pub id: Uuid,
    pub name: String,
}

/// An airplane with a seat grid of `rows` x `seats_in_row`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airplane {
    pub id: Uuid,
    pub name: String,
    pub rows: u32,
    pub seats_in_row: u32,
    pub airplane_type_id: Uuid,
}

impl Airplane {
    /// Total seat capacity
    pub fn capacity(&self) -> u32 {
        self.rows * self.seats_in_row
    }
}

/// A route between two distinct airports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub id: Uuid,
    pub source_id: Uuid,
    pub destination_id: Uuid,
    pub distance_km: u32,
}

/// A crew member, unique by (first_name, last_name)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crew {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

impl Crew {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A scheduled flight over a route, operated by an airplane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    pub id: Uuid,
    pub route_id: Uuid,
    pub airplane_id: Uuid,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub crew_ids: Vec<Uuid>,
}

/// A booked seat on a flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Uuid,
    pub flight_id: Uuid,
    pub row: u32,
    pub seat: u32,
}

/// An order placed by a user, holding one or more tickets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub tickets: Vec<Ticket>,
}

// ==================
// Create / Update Requests
// ==================

#[derive(Debug, Clone, Deserialize)]
pub struct AirportCreate {
    pub name: String,
    pub closest_big_city: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AirportUpdate {
    pub name: Option<String>,
    pub closest_big_city: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AirplaneTypeCreate {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AirplaneTypeUpdate {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AirplaneCreate {
    pub name: String,
    pub rows: u32,
    pub seats_in_row: u32,
    pub airplane_type_id: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AirplaneUpdate {
    pub name: Option<String>,
    pub rows: Option<u32>,
    pub seats_in_row: Option<u32>,
    pub airplane_type_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteCreate {
    pub source_id: Uuid,
    pub destination_id: Uuid,
    pub distance_km: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteUpdate {
    pub source_id: Option<Uuid>,
    pub destination_id: Option<Uuid>,
    pub distance_km: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrewCreate {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrewUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlightCreate {
    pub route_id: Uuid,
    pub airplane_id: Uuid,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    #[serde(default)]
    pub crew_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightUpdate {
    pub route_id: Option<Uuid>,
    pub airplane_id: Option<Uuid>,
    pub departure_time: Option<DateTime<Utc>>,
    pub arrival_time: Option<DateTime<Utc>>,
    pub crew_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TicketCreate {
    pub flight_id: Uuid,
    pub row: u32,
    pub seat: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderCreate {
    pub tickets: Vec<TicketCreate>,
}

// ==================
// Read Views
// ==================

/// Route with airport names resolved, for listings
#[derive(Debug, Clone, Serialize)]
pub struct RouteView {
    pub id: Uuid,
    pub source: String,
    pub destination: String,
    pub distance_km: u32,
}

/// Route with full airports embedded, for detail responses
#[derive(Debug, Clone, Serialize)]
pub struct RouteDetail {
    pub id: Uuid,
    pub source: Airport,
    pub destination: Airport,
    pub distance_km: u32,
}

/// Airplane with its type name resolved
#[derive(Debug, Clone, Serialize)]
pub struct AirplaneView {
    pub id: Uuid,
    pub name: String,
    pub rows: u32,
    pub seats_in_row: u32,
    pub airplane_type: String,
    pub num_of_seats: u32,
}

/// Flight with route endpoints, airplane and crew resolved, plus the
/// remaining seat count
#[derive(Debug, Clone, Serialize)]
pub struct FlightView {
    pub id: Uuid,
    pub route: RouteView,
    pub airplane: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub crew: Vec<String>,
    pub available_tickets: u32,
}

/// Flight detail: the list view plus the seats already taken
#[derive(Debug, Clone, Serialize)]
pub struct FlightDetail {
    #[serde(flatten)]
    pub view: FlightView,
    pub taken_seats: Vec<TakenSeat>,
}

/// A (row, seat) pair already booked on a flight
#[derive(Debug, Clone, Serialize)]
pub struct TakenSeat {
    pub row: u32,
    pub seat: u32,
}
