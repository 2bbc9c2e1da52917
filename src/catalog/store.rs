//! # Catalog Store
//!
//! Thread-safe in-memory record sets for the airport domain, with
//! referential-integrity and unique-constraint validation on every write.
//! All collections live behind one lock so cross-collection checks see a
//! consistent snapshot.

use std::sync::RwLock;

use chrono::Utc;
use uuid::Uuid;

use super::errors::{CatalogError, CatalogResult};
use super::filter::{
    AirplaneFilter, AirplaneTypeFilter, AirportFilter, CrewFilter, FlightFilter, Page, RouteFilter,
};
use super::models::{
    Airplane, AirplaneCreate, AirplaneType, AirplaneTypeCreate, AirplaneTypeUpdate, AirplaneUpdate,
    AirplaneView, Airport, AirportCreate, AirportUpdate, Crew, CrewCreate, CrewUpdate, Flight,
    FlightCreate, FlightDetail, FlightUpdate, FlightView, Order, OrderCreate, Route, RouteCreate,
    RouteDetail, RouteUpdate, RouteView, TakenSeat, Ticket,
};

/// A filtered listing plus the total match count before pagination
#[derive(Debug, Clone)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub total: usize,
}

#[derive(Debug, Default)]
struct Inner {
    airports: Vec<Airport>,
    airplane_types: Vec<AirplaneType>,
    airplanes: Vec<Airplane>,
    routes: Vec<Route>,
    crews: Vec<Crew>,
    flights: Vec<Flight>,
    orders: Vec<Order>,
}

impl Inner {
    fn airport(&self, id: Uuid) -> CatalogResult<&Airport> {
        self.airports
            .iter()
            .find(|a| a.id == id)
            .ok_or(CatalogError::NotFound("airport"))
    }

    fn airplane_type(&self, id: Uuid) -> CatalogResult<&AirplaneType> {
        self.airplane_types
            .iter()
            .find(|t| t.id == id)
            .ok_or(CatalogError::NotFound("airplane type"))
    }

    fn airplane(&self, id: Uuid) -> CatalogResult<&Airplane> {
        self.airplanes
            .iter()
            .find(|a| a.id == id)
            .ok_or(CatalogError::NotFound("airplane"))
    }

    fn route(&self, id: Uuid) -> CatalogResult<&Route> {
        self.routes
            .iter()
            .find(|r| r.id == id)
            .ok_or(CatalogError::NotFound("route"))
    }

    fn flight(&self, id: Uuid) -> CatalogResult<&Flight> {
        self.flights
            .iter()
            .find(|f| f.id == id)
            .ok_or(CatalogError::NotFound("flight"))
    }

    /// Seats already sold on a flight, across all orders
    fn tickets_for_flight(&self, flight_id: Uuid) -> Vec<&Ticket> {
        self.orders
            .iter()
            .flat_map(|o| o.tickets.iter())
            .filter(|t| t.flight_id == flight_id)
            .collect()
    }

    fn route_view(&self, route: &Route) -> CatalogResult<RouteView> {
        let source = self.airport(route.source_id)?;
        let destination = self.airport(route.destination_id)?;
        Ok(RouteView {
            id: route.id,
            source: source.name.clone(),
            destination: destination.name.clone(),
            distance_km: route.distance_km,
        })
    }

    fn airplane_view(&self, airplane: &Airplane) -> CatalogResult<AirplaneView> {
        let airplane_type = self.airplane_type(airplane.airplane_type_id)?;
        Ok(AirplaneView {
            id: airplane.id,
            name: airplane.name.clone(),
            rows: airplane.rows,
            seats_in_row: airplane.seats_in_row,
            airplane_type: airplane_type.name.clone(),
            num_of_seats: airplane.capacity(),
        })
    }

    fn flight_view(&self, flight: &Flight) -> CatalogResult<FlightView> {
        let route = self.route(flight.route_id)?;
        let airplane = self.airplane(flight.airplane_id)?;

        let crew = flight
            .crew_ids
            .iter()
            .filter_map(|id| self.crews.iter().find(|c| c.id == *id))
            .map(|c| c.full_name())
            .collect();

        let sold = self.tickets_for_flight(flight.id).len() as u32;

        Ok(FlightView {
            id: flight.id,
            route: self.route_view(route)?,
            airplane: airplane.name.clone(),
            departure_time: flight.departure_time,
            arrival_time: flight.arrival_time,
            crew,
            available_tickets: airplane.capacity().saturating_sub(sold),
        })
    }
}

/// The in-memory catalog
#[derive(Default)]
pub struct CatalogStore {
    inner: RwLock<Inner>,
}

fn require_non_empty(value: &str, field: &str) -> CatalogResult<()> {
    if value.trim().is_empty() {
        Err(CatalogError::Validation(format!("{} must not be empty", field)))
    } else {
        Ok(())
    }
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> CatalogResult<std::sync::RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| CatalogError::StorageError("Lock poisoned".to_string()))
    }

    fn write(&self) -> CatalogResult<std::sync::RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| CatalogError::StorageError("Lock poisoned".to_string()))
    }

    // ==================
    // Airports
    // ==================

    pub fn create_airport(&self, request: AirportCreate) -> CatalogResult<Airport> {
        require_non_empty(&request.name, "name")?;
        require_non_empty(&request.closest_big_city, "closest_big_city")?;

        let mut inner = self.write()?;

        if inner
            .airports
            .iter()
            .any(|a| a.name == request.name && a.closest_big_city == request.closest_big_city)
        {
            return Err(CatalogError::Duplicate(format!(
                "airport \"{}\" near {}",
                request.name, request.closest_big_city
            )));
        }

        let airport = Airport {
            id: Uuid::new_v4(),
            name: request.name,
            closest_big_city: request.closest_big_city,
        };
        inner.airports.push(airport.clone());

        Ok(airport)
    }

    pub fn list_airports(
        &self,
        filter: &AirportFilter,
        page: Page,
    ) -> CatalogResult<Listing<Airport>> {
        let inner = self.read()?;

        let matched: Vec<Airport> = inner
            .airports
            .iter()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();

        let total = matched.len();
        Ok(Listing {
            items: page.apply(matched),
            total,
        })
    }

    pub fn get_airport(&self, id: Uuid) -> CatalogResult<Airport> {
        Ok(self.read()?.airport(id)?.clone())
    }

    pub fn update_airport(&self, id: Uuid, patch: AirportUpdate) -> CatalogResult<Airport> {
        let mut inner = self.write()?;

        let mut updated = inner.airport(id)?.clone();
        if let Some(name) = patch.name {
            require_non_empty(&name, "name")?;
            updated.name = name;
        }
        if let Some(city) = patch.closest_big_city {
            require_non_empty(&city, "closest_big_city")?;
            updated.closest_big_city = city;
        }

        if inner.airports.iter().any(|a| {
            a.id != id && a.name == updated.name && a.closest_big_city == updated.closest_big_city
        }) {
            return Err(CatalogError::Duplicate(format!(
                "airport \"{}\" near {}",
                updated.name, updated.closest_big_city
            )));
        }

        let slot = inner
            .airports
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(CatalogError::NotFound("airport"))?;
        *slot = updated.clone();

        Ok(updated)
    }

    pub fn delete_airport(&self, id: Uuid) -> CatalogResult<()> {
        let mut inner = self.write()?;
        inner.airport(id)?;

        if inner
            .routes
            .iter()
            .any(|r| r.source_id == id || r.destination_id == id)
        {
            return Err(CatalogError::InUse {
                resource: "airport",
                referenced_by: "route",
            });
        }

        inner.airports.retain(|a| a.id != id);
        Ok(())
    }

    // ==================
    // Airplane Types
    // ==================

    pub fn create_airplane_type(&self, request: AirplaneTypeCreate) -> CatalogResult<AirplaneType> {
        require_non_empty(&request.name, "name")?;

        let mut inner = self.write()?;

        if inner.airplane_types.iter().any(|t| t.name == request.name) {
            return Err(CatalogError::Duplicate(format!(
                "airplane type \"{}\"",
                request.name
            )));
        }

        let airplane_type = AirplaneType {
            id: Uuid::new_v4(),
            name: request.name,
        };
        inner.airplane_types.push(airplane_type.clone());

        Ok(airplane_type)
    }

    pub fn list_airplane_types(
        &self,
        filter: &AirplaneTypeFilter,
        page: Page,
    ) -> CatalogResult<Listing<AirplaneType>> {
        let inner = self.read()?;

        let matched: Vec<AirplaneType> = inner
            .airplane_types
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();

        let total = matched.len();
        Ok(Listing {
            items: page.apply(matched),
            total,
        })
    }

    pub fn get_airplane_type(&self, id: Uuid) -> CatalogResult<AirplaneType> {
        Ok(self.read()?.airplane_type(id)?.clone())
    }

    pub fn update_airplane_type(
        &self,
        id: Uuid,
        patch: AirplaneTypeUpdate,
    ) -> CatalogResult<AirplaneType> {
        let mut inner = self.write()?;

        let mut updated = inner.airplane_type(id)?.clone();
        if let Some(name) = patch.name {
            require_non_empty(&name, "name")?;
            updated.name = name;
        }

        if inner
            .airplane_types
            .iter()
            .any(|t| t.id != id && t.name == updated.name)
        {
            return Err(CatalogError::Duplicate(format!(
                "airplane type \"{}\"",
                updated.name
            )));
        }

        let slot = inner
            .airplane_types
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(CatalogError::NotFound("airplane type"))?;
        *slot = updated.clone();

        Ok(updated)
    }

    pub fn delete_airplane_type(&self, id: Uuid) -> CatalogResult<()> {
        let mut inner = self.write()?;
        inner.airplane_type(id)?;

        if inner.airplanes.iter().any(|a| a.airplane_type_id == id) {
            return Err(CatalogError::InUse {
                resource: "airplane type",
                referenced_by: "airplane",
            });
        }

        inner.airplane_types.retain(|t| t.id != id);
        Ok(())
    }

    // ==================
    // Airplanes
    // ==================

    fn validate_seat_grid(rows: u32, seats_in_row: u32) -> CatalogResult<()> {
        if rows == 0 || seats_in_row == 0 {
            return Err(CatalogError::Validation(
                "rows and seats_in_row must be positive".to_string(),
            ));
        }
        // Capacity is rows x seats_in_row; the product must stay in u32
        if rows.checked_mul(seats_in_row).is_none() {
            return Err(CatalogError::Validation(
                "rows x seats_in_row exceeds the supported seat count".to_string(),
            ));
        }
        Ok(())
    }

    pub fn create_airplane(&self, request: AirplaneCreate) -> CatalogResult<AirplaneView> {
        require_non_empty(&request.name, "name")?;
        Self::validate_seat_grid(request.rows, request.seats_in_row)?;

        let mut inner = self.write()?;

        if inner.airplane_type(request.airplane_type_id).is_err() {
            return Err(CatalogError::UnknownReference {
                resource: "airplane type",
                id: request.airplane_type_id.to_string(),
            });
        }

        let airplane = Airplane {
            id: Uuid::new_v4(),
            name: request.name,
            rows: request.rows,
            seats_in_row: request.seats_in_row,
            airplane_type_id: request.airplane_type_id,
        };
        inner.airplanes.push(airplane.clone());

        inner.airplane_view(&airplane)
    }

    pub fn list_airplanes(
        &self,
        filter: &AirplaneFilter,
        page: Page,
    ) -> CatalogResult<Listing<AirplaneView>> {
        let inner = self.read()?;

        let mut matched = Vec::new();
        for airplane in &inner.airplanes {
            let type_name = inner.airplane_type(airplane.airplane_type_id)?.name.clone();
            if filter.matches(airplane, &type_name) {
                matched.push(inner.airplane_view(airplane)?);
            }
        }

        let total = matched.len();
        Ok(Listing {
            items: page.apply(matched),
            total,
        })
    }

    pub fn get_airplane(&self, id: Uuid) -> CatalogResult<AirplaneView> {
        let inner = self.read()?;
        let airplane = inner.airplane(id)?;
        inner.airplane_view(airplane)
    }

    pub fn update_airplane(&self, id: Uuid, patch: AirplaneUpdate) -> CatalogResult<AirplaneView> {
        let mut inner = self.write()?;

        let mut updated = inner.airplane(id)?.clone();
        if let Some(name) = patch.name {
            require_non_empty(&name, "name")?;
            updated.name = name;
        }
        if let Some(rows) = patch.rows {
            updated.rows = rows;
        }
        if let Some(seats) = patch.seats_in_row {
            updated.seats_in_row = seats;
        }
        Self::validate_seat_grid(updated.rows, updated.seats_in_row)?;

        if let Some(type_id) = patch.airplane_type_id {
            if inner.airplane_type(type_id).is_err() {
                return Err(CatalogError::UnknownReference {
                    resource: "airplane type",
                    id: type_id.to_string(),
                });
            }
            updated.airplane_type_id = type_id;
        }

        let slot = inner
            .airplanes
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(CatalogError::NotFound("airplane"))?;
        *slot = updated.clone();

        inner.airplane_view(&updated)
    }

    pub fn delete_airplane(&self, id: Uuid) -> CatalogResult<()> {
        let mut inner = self.write()?;
        inner.airplane(id)?;

        if inner.flights.iter().any(|f| f.airplane_id == id) {
            return Err(CatalogError::InUse {
                resource: "airplane",
                referenced_by: "flight",
            });
        }

        inner.airplanes.retain(|a| a.id != id);
        Ok(())
    }

    // ==================
    // Routes
    // ==================

    fn validate_route(inner: &Inner, source_id: Uuid, destination_id: Uuid) -> CatalogResult<()> {
        if source_id == destination_id {
            return Err(CatalogError::Validation(
                "destination cannot be the same as source".to_string(),
            ));
        }
        if inner.airport(source_id).is_err() {
            return Err(CatalogError::UnknownReference {
                resource: "airport",
                id: source_id.to_string(),
            });
        }
        if inner.airport(destination_id).is_err() {
            return Err(CatalogError::UnknownReference {
                resource: "airport",
                id: destination_id.to_string(),
            });
        }
        Ok(())
    }

    pub fn create_route(&self, request: RouteCreate) -> CatalogResult<RouteView> {
        let mut inner = self.write()?;
        Self::validate_route(&inner, request.source_id, request.destination_id)?;

        let route = Route {
            id: Uuid::new_v4(),
            source_id: request.source_id,
            destination_id: request.destination_id,
            distance_km: request.distance_km,
        };
        inner.routes.push(route.clone());

        inner.route_view(&route)
    }

    pub fn list_routes(
        &self,
        filter: &RouteFilter,
        page: Page,
    ) -> CatalogResult<Listing<RouteView>> {
        let inner = self.read()?;

        let mut matched = Vec::new();
        for route in &inner.routes {
            let source = inner.airport(route.source_id)?;
            let destination = inner.airport(route.destination_id)?;
            if filter.matches(route, source, destination) {
                matched.push(inner.route_view(route)?);
            }
        }

        let total = matched.len();
        Ok(Listing {
            items: page.apply(matched),
            total,
        })
    }

    pub fn get_route(&self, id: Uuid) -> CatalogResult<RouteDetail> {
        let inner = self.read()?;
        let route = inner.route(id)?;

        Ok(RouteDetail {
            id: route.id,
            source: inner.airport(route.source_id)?.clone(),
            destination: inner.airport(route.destination_id)?.clone(),
            distance_km: route.distance_km,
        })
    }

    pub fn update_route(&self, id: Uuid, patch: RouteUpdate) -> CatalogResult<RouteView> {
        let mut inner = self.write()?;

        let mut updated = inner.route(id)?.clone();
        if let Some(source_id) = patch.source_id {
            updated.source_id = source_id;
        }
        if let Some(destination_id) = patch.destination_id {
            updated.destination_id = destination_id;
        }
        if let Some(distance_km) = patch.distance_km {
            updated.distance_km = distance_km;
        }
        Self::validate_route(&inner, updated.source_id, updated.destination_id)?;

        let slot = inner
            .routes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(CatalogError::NotFound("route"))?;
        *slot = updated.clone();

        inner.route_view(&updated)
    }

    pub fn delete_route(&self, id: Uuid) -> CatalogResult<()> {
        let mut inner = self.write()?;
        inner.route(id)?;

        if inner.flights.iter().any(|f| f.route_id == id) {
            return Err(CatalogError::InUse {
                resource: "route",
                referenced_by: "flight",
            });
        }

        inner.routes.retain(|r| r.id != id);
        Ok(())
    }

    // ==================
    // Crews
    // ==================

    pub fn create_crew(&self, request: CrewCreate) -> CatalogResult<Crew> {
        require_non_empty(&request.first_name, "first_name")?;
        require_non_empty(&request.last_name, "last_name")?;

        let mut inner = self.write()?;

        if inner
            .crews
            .iter()
            .any(|c| c.first_name == request.first_name && c.last_name == request.last_name)
        {
            return Err(CatalogError::Duplicate(format!(
                "crew member {} {}",
                request.first_name, request.last_name
            )));
        }

        let crew = Crew {
            id: Uuid::new_v4(),
            first_name: request.first_name,
            last_name: request.last_name,
        };
        inner.crews.push(crew.clone());

        Ok(crew)
    }

    pub fn list_crews(&self, filter: &CrewFilter, page: Page) -> CatalogResult<Listing<Crew>> {
        let inner = self.read()?;

        let matched: Vec<Crew> = inner
            .crews
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();

        let total = matched.len();
        Ok(Listing {
            items: page.apply(matched),
            total,
        })
    }

    pub fn get_crew(&self, id: Uuid) -> CatalogResult<Crew> {
        self.read()?
            .crews
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound("crew member"))
    }

    pub fn update_crew(&self, id: Uuid, patch: CrewUpdate) -> CatalogResult<Crew> {
        let mut inner = self.write()?;

        let mut updated = inner
            .crews
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound("crew member"))?;
        if let Some(first_name) = patch.first_name {
            require_non_empty(&first_name, "first_name")?;
            updated.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            require_non_empty(&last_name, "last_name")?;
            updated.last_name = last_name;
        }

        if inner.crews.iter().any(|c| {
            c.id != id && c.first_name == updated.first_name && c.last_name == updated.last_name
        }) {
            return Err(CatalogError::Duplicate(format!(
                "crew member {}",
                updated.full_name()
            )));
        }

        let slot = inner
            .crews
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(CatalogError::NotFound("crew member"))?;
        *slot = updated.clone();

        Ok(updated)
    }

    pub fn delete_crew(&self, id: Uuid) -> CatalogResult<()> {
        let mut inner = self.write()?;

        if !inner.crews.iter().any(|c| c.id == id) {
            return Err(CatalogError::NotFound("crew member"));
        }

        if inner.flights.iter().any(|f| f.crew_ids.contains(&id)) {
            return Err(CatalogError::InUse {
                resource: "crew member",
                referenced_by: "flight",
            });
        }

        inner.crews.retain(|c| c.id != id);
        Ok(())
    }

    // ==================
    // Flights
    // ==================

    fn validate_flight(inner: &Inner, flight: &Flight) -> CatalogResult<()> {
        if inner.route(flight.route_id).is_err() {
            return Err(CatalogError::UnknownReference {
                resource: "route",
                id: flight.route_id.to_string(),
            });
        }
        if inner.airplane(flight.airplane_id).is_err() {
            return Err(CatalogError::UnknownReference {
                resource: "airplane",
                id: flight.airplane_id.to_string(),
            });
        }
        for crew_id in &flight.crew_ids {
            if !inner.crews.iter().any(|c| c.id == *crew_id) {
                return Err(CatalogError::UnknownReference {
                    resource: "crew member",
                    id: crew_id.to_string(),
                });
            }
        }
        if flight.arrival_time <= flight.departure_time {
            return Err(CatalogError::Validation(
                "arrival time must be after departure time".to_string(),
            ));
        }
        Ok(())
    }

    pub fn create_flight(&self, request: FlightCreate) -> CatalogResult<FlightView> {
        let mut inner = self.write()?;

        let flight = Flight {
            id: Uuid::new_v4(),
            route_id: request.route_id,
            airplane_id: request.airplane_id,
            departure_time: request.departure_time,
            arrival_time: request.arrival_time,
            crew_ids: request.crew_ids,
        };
        Self::validate_flight(&inner, &flight)?;

        inner.flights.push(flight.clone());
        inner.flight_view(&flight)
    }

    pub fn list_flights(
        &self,
        filter: &FlightFilter,
        page: Page,
    ) -> CatalogResult<Listing<FlightView>> {
        let inner = self.read()?;

        let mut matched = Vec::new();
        for flight in &inner.flights {
            let route = inner.route(flight.route_id)?;
            let source = inner.airport(route.source_id)?;
            let destination = inner.airport(route.destination_id)?;
            if filter.matches(flight, source, destination) {
                matched.push(inner.flight_view(flight)?);
            }
        }

        let total = matched.len();
        Ok(Listing {
            items: page.apply(matched),
            total,
        })
    }

    pub fn get_flight(&self, id: Uuid) -> CatalogResult<FlightDetail> {
        let inner = self.read()?;
        let flight = inner.flight(id)?;

        let taken_seats = inner
            .tickets_for_flight(id)
            .into_iter()
            .map(|t| TakenSeat {
                row: t.row,
                seat: t.seat,
            })
            .collect();

        Ok(FlightDetail {
            view: inner.flight_view(flight)?,
            taken_seats,
        })
    }

    pub fn update_flight(&self, id: Uuid, patch: FlightUpdate) -> CatalogResult<FlightView> {
        let mut inner = self.write()?;

        let mut updated = inner.flight(id)?.clone();
        if let Some(route_id) = patch.route_id {
            updated.route_id = route_id;
        }
        if let Some(airplane_id) = patch.airplane_id {
            updated.airplane_id = airplane_id;
        }
        if let Some(departure_time) = patch.departure_time {
            updated.departure_time = departure_time;
        }
        if let Some(arrival_time) = patch.arrival_time {
            updated.arrival_time = arrival_time;
        }
        if let Some(crew_ids) = patch.crew_ids {
            updated.crew_ids = crew_ids;
        }
        Self::validate_flight(&inner, &updated)?;

        let slot = inner
            .flights
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(CatalogError::NotFound("flight"))?;
        *slot = updated.clone();

        inner.flight_view(&updated)
    }

    pub fn delete_flight(&self, id: Uuid) -> CatalogResult<()> {
        let mut inner = self.write()?;
        inner.flight(id)?;

        if !inner.tickets_for_flight(id).is_empty() {
            return Err(CatalogError::InUse {
                resource: "flight",
                referenced_by: "ticket",
            });
        }

        inner.flights.retain(|f| f.id != id);
        Ok(())
    }

    // ==================
    // Orders
    // ==================

    /// Create an order for a user. All tickets are validated against seat
    /// bounds and existing bookings before anything is stored: the order
    /// is all-or-nothing.
    pub fn create_order(&self, user_id: Uuid, request: OrderCreate) -> CatalogResult<Order> {
        if request.tickets.is_empty() {
            return Err(CatalogError::Validation(
                "an order must contain at least one ticket".to_string(),
            ));
        }

        let mut inner = self.write()?;

        let mut tickets = Vec::with_capacity(request.tickets.len());
        for ticket in &request.tickets {
            let flight = match inner.flight(ticket.flight_id) {
                Ok(f) => f,
                Err(_) => {
                    return Err(CatalogError::UnknownReference {
                        resource: "flight",
                        id: ticket.flight_id.to_string(),
                    })
                }
            };
            let airplane = inner.airplane(flight.airplane_id)?;

            if ticket.row < 1 || ticket.row > airplane.rows {
                return Err(CatalogError::Validation(format!(
                    "row must be in range [1, {}]",
                    airplane.rows
                )));
            }
            if ticket.seat < 1 || ticket.seat > airplane.seats_in_row {
                return Err(CatalogError::Validation(format!(
                    "seat must be in range [1, {}]",
                    airplane.seats_in_row
                )));
            }

            let already_taken = inner
                .tickets_for_flight(ticket.flight_id)
                .iter()
                .any(|t| t.row == ticket.row && t.seat == ticket.seat)
                || tickets.iter().any(|t: &Ticket| {
                    t.flight_id == ticket.flight_id && t.row == ticket.row && t.seat == ticket.seat
                });
            if already_taken {
                return Err(CatalogError::Duplicate(format!(
                    "seat (row {}, seat {})",
                    ticket.row, ticket.seat
                )));
            }

            tickets.push(Ticket {
                id: Uuid::new_v4(),
                flight_id: ticket.flight_id,
                row: ticket.row,
                seat: ticket.seat,
            });
        }

        let order = Order {
            id: Uuid::new_v4(),
            user_id,
            created_at: Utc::now(),
            tickets,
        };
        inner.orders.push(order.clone());

        Ok(order)
    }

    /// List orders placed by a user, newest first
    pub fn list_orders(&self, user_id: Uuid, page: Page) -> CatalogResult<Listing<Order>> {
        let inner = self.read()?;

        let mut matched: Vec<Order> = inner
            .orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matched.len();
        Ok(Listing {
            items: page.apply(matched),
            total,
        })
    }

    /// Get one of the user's own orders. Another user's order is reported
    /// as not found rather than forbidden.
    pub fn get_order(&self, id: Uuid, user_id: Uuid) -> CatalogResult<Order> {
        self.read()?
            .orders
            .iter()
            .find(|o| o.id == id && o.user_id == user_id)
            .cloned()
            .ok_or(CatalogError::NotFound("order"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::TicketCreate;

    fn seeded_store() -> (CatalogStore, Uuid, Uuid) {
        let store = CatalogStore::new();

        let kyiv = store
            .create_airport(AirportCreate {
                name: "Boryspil".to_string(),
                closest_big_city: "Kyiv".to_string(),
            })
            .unwrap();
        let london = store
            .create_airport(AirportCreate {
                name: "Heathrow".to_string(),
                closest_big_city: "London".to_string(),
            })
            .unwrap();

        (store, kyiv.id, london.id)
    }

    fn seeded_flight_fixtures(store: &CatalogStore, source: Uuid, destination: Uuid) -> (Uuid, Uuid) {
        let wide_body = store
            .create_airplane_type(AirplaneTypeCreate {
                name: "Wide-Body".to_string(),
            })
            .unwrap();
        let airplane = store
            .create_airplane(AirplaneCreate {
                name: "Boeing 777".to_string(),
                rows: 3,
                seats_in_row: 2,
                airplane_type_id: wide_body.id,
            })
            .unwrap();
        let route = store
            .create_route(RouteCreate {
                source_id: source,
                destination_id: destination,
                distance_km: 2400,
            })
            .unwrap();

        (route.id, airplane.id)
    }

    #[test]
    fn test_airport_unique_together() {
        let (store, _, _) = seeded_store();

        let result = store.create_airport(AirportCreate {
            name: "Boryspil".to_string(),
            closest_big_city: "Kyiv".to_string(),
        });
        assert!(matches!(result, Err(CatalogError::Duplicate(_))));

        // Same name near a different city is fine
        assert!(store
            .create_airport(AirportCreate {
                name: "Boryspil".to_string(),
                closest_big_city: "Lviv".to_string(),
            })
            .is_ok());
    }

    #[test]
    fn test_route_must_reference_existing_airports() {
        let (store, kyiv, _) = seeded_store();

        let result = store.create_route(RouteCreate {
            source_id: kyiv,
            destination_id: Uuid::new_v4(),
            distance_km: 100,
        });
        assert!(matches!(
            result,
            Err(CatalogError::UnknownReference { resource: "airport", .. })
        ));
    }

    #[test]
    fn test_route_rejects_same_endpoints() {
        let (store, kyiv, _) = seeded_store();

        let result = store.create_route(RouteCreate {
            source_id: kyiv,
            destination_id: kyiv,
            distance_km: 0,
        });
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_airport_in_use_cannot_be_deleted() {
        let (store, kyiv, london) = seeded_store();
        seeded_flight_fixtures(&store, kyiv, london);

        assert!(matches!(
            store.delete_airport(kyiv),
            Err(CatalogError::InUse { .. })
        ));
    }

    #[test]
    fn test_airplane_seat_grid_must_fit_u32() {
        let store = CatalogStore::new();
        let wide_body = store
            .create_airplane_type(AirplaneTypeCreate {
                name: "Wide-Body".to_string(),
            })
            .unwrap();

        // 70_000 x 70_000 overflows u32 capacity
        let result = store.create_airplane(AirplaneCreate {
            name: "Impossible".to_string(),
            rows: 70_000,
            seats_in_row: 70_000,
            airplane_type_id: wide_body.id,
        });
        assert!(matches!(result, Err(CatalogError::Validation(_))));

        // An update cannot push an existing grid past the bound either
        let airplane = store
            .create_airplane(AirplaneCreate {
                name: "A320".to_string(),
                rows: 10,
                seats_in_row: 6,
                airplane_type_id: wide_body.id,
            })
            .unwrap();
        let result = store.update_airplane(
            airplane.id,
            AirplaneUpdate {
                rows: Some(70_000),
                seats_in_row: Some(70_000),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_flight_requires_live_route_and_airplane() {
        let (store, kyiv, london) = seeded_store();
        let (route_id, airplane_id) = seeded_flight_fixtures(&store, kyiv, london);

        // Dangling route
        let result = store.create_flight(FlightCreate {
            route_id: Uuid::new_v4(),
            airplane_id,
            departure_time: "2026-06-01T10:00:00Z".parse().unwrap(),
            arrival_time: "2026-06-01T14:00:00Z".parse().unwrap(),
            crew_ids: vec![],
        });
        assert!(matches!(
            result,
            Err(CatalogError::UnknownReference { resource: "route", .. })
        ));

        // Dangling airplane
        let result = store.create_flight(FlightCreate {
            route_id,
            airplane_id: Uuid::new_v4(),
            departure_time: "2026-06-01T10:00:00Z".parse().unwrap(),
            arrival_time: "2026-06-01T14:00:00Z".parse().unwrap(),
            crew_ids: vec![],
        });
        assert!(matches!(
            result,
            Err(CatalogError::UnknownReference { resource: "airplane", .. })
        ));

        // Live references succeed and the flight is immediately listable
        let flight = store
            .create_flight(FlightCreate {
                route_id,
                airplane_id,
                departure_time: "2026-06-01T10:00:00Z".parse().unwrap(),
                arrival_time: "2026-06-01T14:00:00Z".parse().unwrap(),
                crew_ids: vec![],
            })
            .unwrap();

        let listing = store
            .list_flights(&FlightFilter::default(), Page::default())
            .unwrap();
        assert_eq!(listing.total, 1);
        assert_eq!(listing.items[0].id, flight.id);
    }

    #[test]
    fn test_flight_arrival_must_follow_departure() {
        let (store, kyiv, london) = seeded_store();
        let (route_id, airplane_id) = seeded_flight_fixtures(&store, kyiv, london);

        // Equal timestamps rejected
        let result = store.create_flight(FlightCreate {
            route_id,
            airplane_id,
            departure_time: "2026-06-01T10:00:00Z".parse().unwrap(),
            arrival_time: "2026-06-01T10:00:00Z".parse().unwrap(),
            crew_ids: vec![],
        });
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_flight_view_resolves_names_and_capacity() {
        let (store, kyiv, london) = seeded_store();
        let (route_id, airplane_id) = seeded_flight_fixtures(&store, kyiv, london);

        let crew = store
            .create_crew(CrewCreate {
                first_name: "Vika".to_string(),
                last_name: "Bevz".to_string(),
            })
            .unwrap();

        let flight = store
            .create_flight(FlightCreate {
                route_id,
                airplane_id,
                departure_time: "2026-06-01T10:00:00Z".parse().unwrap(),
                arrival_time: "2026-06-01T14:00:00Z".parse().unwrap(),
                crew_ids: vec![crew.id],
            })
            .unwrap();

        assert_eq!(flight.route.source, "Boryspil");
        assert_eq!(flight.route.destination, "Heathrow");
        assert_eq!(flight.airplane, "Boeing 777");
        assert_eq!(flight.crew, vec!["Vika Bevz".to_string()]);
        // 3 rows x 2 seats, nothing sold yet
        assert_eq!(flight.available_tickets, 6);
    }

    #[test]
    fn test_order_books_seats_and_decrements_availability() {
        let (store, kyiv, london) = seeded_store();
        let (route_id, airplane_id) = seeded_flight_fixtures(&store, kyiv, london);
        let flight = store
            .create_flight(FlightCreate {
                route_id,
                airplane_id,
                departure_time: "2026-06-01T10:00:00Z".parse().unwrap(),
                arrival_time: "2026-06-01T14:00:00Z".parse().unwrap(),
                crew_ids: vec![],
            })
            .unwrap();

        let user = Uuid::new_v4();
        let order = store
            .create_order(
                user,
                OrderCreate {
                    tickets: vec![
                        TicketCreate {
                            flight_id: flight.id,
                            row: 1,
                            seat: 1,
                        },
                        TicketCreate {
                            flight_id: flight.id,
                            row: 1,
                            seat: 2,
                        },
                    ],
                },
            )
            .unwrap();
        assert_eq!(order.tickets.len(), 2);

        let detail = store.get_flight(flight.id).unwrap();
        assert_eq!(detail.view.available_tickets, 4);
        assert_eq!(detail.taken_seats.len(), 2);
    }

    #[test]
    fn test_order_rejects_taken_and_out_of_bounds_seats() {
        let (store, kyiv, london) = seeded_store();
        let (route_id, airplane_id) = seeded_flight_fixtures(&store, kyiv, london);
        let flight = store
            .create_flight(FlightCreate {
                route_id,
                airplane_id,
                departure_time: "2026-06-01T10:00:00Z".parse().unwrap(),
                arrival_time: "2026-06-01T14:00:00Z".parse().unwrap(),
                crew_ids: vec![],
            })
            .unwrap();

        let user = Uuid::new_v4();
        store
            .create_order(
                user,
                OrderCreate {
                    tickets: vec![TicketCreate {
                        flight_id: flight.id,
                        row: 1,
                        seat: 1,
                    }],
                },
            )
            .unwrap();

        // Seat already taken, by another user even
        let result = store.create_order(
            Uuid::new_v4(),
            OrderCreate {
                tickets: vec![TicketCreate {
                    flight_id: flight.id,
                    row: 1,
                    seat: 1,
                }],
            },
        );
        assert!(matches!(result, Err(CatalogError::Duplicate(_))));

        // Out of the 3x2 grid
        let result = store.create_order(
            user,
            OrderCreate {
                tickets: vec![TicketCreate {
                    flight_id: flight.id,
                    row: 4,
                    seat: 1,
                }],
            },
        );
        assert!(matches!(result, Err(CatalogError::Validation(_))));

        // Duplicate seat within one request
        let result = store.create_order(
            user,
            OrderCreate {
                tickets: vec![
                    TicketCreate {
                        flight_id: flight.id,
                        row: 2,
                        seat: 1,
                    },
                    TicketCreate {
                        flight_id: flight.id,
                        row: 2,
                        seat: 1,
                    },
                ],
            },
        );
        assert!(matches!(result, Err(CatalogError::Duplicate(_))));
    }

    #[test]
    fn test_orders_scoped_to_user() {
        let (store, kyiv, london) = seeded_store();
        let (route_id, airplane_id) = seeded_flight_fixtures(&store, kyiv, london);
        let flight = store
            .create_flight(FlightCreate {
                route_id,
                airplane_id,
                departure_time: "2026-06-01T10:00:00Z".parse().unwrap(),
                arrival_time: "2026-06-01T14:00:00Z".parse().unwrap(),
                crew_ids: vec![],
            })
            .unwrap();

        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let order = store
            .create_order(
                alice,
                OrderCreate {
                    tickets: vec![TicketCreate {
                        flight_id: flight.id,
                        row: 1,
                        seat: 1,
                    }],
                },
            )
            .unwrap();

        assert_eq!(store.list_orders(alice, Page::default()).unwrap().total, 1);
        assert_eq!(store.list_orders(bob, Page::default()).unwrap().total, 0);

        // Bob cannot see Alice's order even by ID
        assert!(matches!(
            store.get_order(order.id, bob),
            Err(CatalogError::NotFound("order"))
        ));
    }

    #[test]
    fn test_update_respects_unique_constraints() {
        let store = CatalogStore::new();
        let narrow = store
            .create_airplane_type(AirplaneTypeCreate {
                name: "Narrow-Body".to_string(),
            })
            .unwrap();
        store
            .create_airplane_type(AirplaneTypeCreate {
                name: "Wide-Body".to_string(),
            })
            .unwrap();

        // Renaming onto an existing name fails
        let result = store.update_airplane_type(
            narrow.id,
            AirplaneTypeUpdate {
                name: Some("Wide-Body".to_string()),
            },
        );
        assert!(matches!(result, Err(CatalogError::Duplicate(_))));

        let renamed = store
            .update_airplane_type(
                narrow.id,
                AirplaneTypeUpdate {
                    name: Some("Regional".to_string()),
                },
            )
            .unwrap();
        assert_eq!(renamed.name, "Regional");

        let crew = store
            .create_crew(CrewCreate {
                first_name: "Vika".to_string(),
                last_name: "Bevz".to_string(),
            })
            .unwrap();
        let updated = store
            .update_crew(
                crew.id,
                CrewUpdate {
                    first_name: None,
                    last_name: Some("Shevchenko".to_string()),
                },
            )
            .unwrap();
        assert_eq!(updated.full_name(), "Vika Shevchenko");
    }

    #[test]
    fn test_empty_order_rejected() {
        let (store, _, _) = seeded_store();
        let result = store.create_order(Uuid::new_v4(), OrderCreate { tickets: vec![] });
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }
}
